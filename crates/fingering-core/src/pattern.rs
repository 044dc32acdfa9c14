//! Pattern recognizer: windowed classification of a hand-local note stream
//! into a sorted, non-overlapping list of [`PatternSegment`]s.
//!
//! The classifier is a closed, priority-ordered decision tree over 11
//! [`PatternType`] variants, implemented as an exhaustively-matched enum
//! rather than trait objects. It never fails: an unclassifiable window
//! always falls through to [`PatternType::Unknown`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::features::{self, WindowFeatures};
use crate::note::Note;

/// The 11 recognized pattern types, in the priority order the classifier
/// tests them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PatternType {
    /// Ornament or grace-note figure; always checked first.
    Ornamented,
    /// Low-high-mid-high broken-chord accompaniment figure.
    Alberti,
    /// A short figure repeating contiguously at least three times.
    Ostinato,
    /// Two or more independent voices with little beat overlap.
    Polyphonic,
    /// Dense simultaneity; treated as a vertical sonority.
    Chordal,
    /// A stepwise run, one direction or a turn-around.
    Scale,
    /// A broken chord outlining a recognized triad or seventh.
    Arpeggio,
    /// The same pitch repeated, or strict alternation between two pitches.
    Repeated,
    /// Dominated by large leaps without enough direction changes to be
    /// ornamental or without the stepwise/chordal shape of the above.
    Leap,
    /// Slurred or rhythmically uneven singing line.
    Melodic,
    /// None of the above matched.
    Unknown,
}

/// Coarse melodic direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Net upward motion.
    Ascending,
    /// Net downward motion.
    Descending,
    /// Both directions present in roughly comparable measure.
    Bidirectional,
}

/// Identified scale type from the interval vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScaleType {
    /// All steps are semitones.
    Chromatic,
    /// Matches the major-scale step pattern.
    Major,
    /// Matches the natural-minor step pattern.
    Minor,
    /// All steps are whole or minor-third (pentatonic) leaps.
    Pentatonic,
    /// Stepwise but none of the above named patterns.
    Modal,
}

/// Recognized triad/seventh shape for an arpeggio or chordal window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChordShape {
    /// Major third then minor third (root position major triad).
    Major,
    /// Minor third then major third (root position minor triad).
    Minor,
    /// Two minor thirds (diminished triad).
    Diminished,
    /// Two major thirds (augmented triad).
    Augmented,
    /// Four distinct pitch classes stacked in thirds-like motion.
    Seventh,
}

/// Which equal-adjacent-pitch shape a [`PatternType::Repeated`] window has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RepeatedShape {
    /// A single pitch repeated three or more times in a row.
    Single,
    /// Strict alternation between exactly two distinct pitches.
    Alternating,
}

/// Melodic contour for a [`PatternType::Leap`] window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Contour {
    /// Direction reverses often enough to read as jagged.
    Jagged,
    /// Rises then falls.
    Arch,
    /// Falls then rises.
    Valley,
    /// Monotonic or flat overall shape.
    Linear,
}

/// Expressive style for a [`PatternType::Melodic`] window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MelodicStyle {
    /// Slurred, long note values.
    Cantabile,
    /// High duration variance.
    Expressive,
    /// Slurred without the cantabile duration profile.
    Lyrical,
    /// Neither slurred nor especially uneven.
    Neutral,
}

/// Which ornament triggered a [`PatternType::Ornamented`] window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrnamentType {
    /// Trill flag, or the alternating-neighbor-tone heuristic.
    Trill,
    /// Mordent flag.
    Mordent,
    /// Turn flag.
    Turn,
    /// Grace-note flag.
    Grace,
}

/// Pattern-specific attributes, tagged by [`PatternType`] so matches stay
/// exhaustive at the call site.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PatternDetail {
    /// See [`PatternType::Ornamented`].
    Ornamented {
        /// The triggering ornament.
        ornament: OrnamentType,
    },
    /// See [`PatternType::Alberti`].
    Alberti {
        /// Fraction of consecutive 4-note groups matching the Alberti shape.
        match_ratio: f64,
    },
    /// See [`PatternType::Ostinato`].
    Ostinato {
        /// Length of the repeating cell.
        pattern_length: usize,
        /// Total contiguous occurrences of the cell (>= 3).
        occurrences: usize,
    },
    /// See [`PatternType::Polyphonic`].
    Polyphonic {
        /// Distinct voice tags seen in the window.
        voice_count: usize,
    },
    /// See [`PatternType::Chordal`].
    Chordal {
        /// Mean notes sharing a rounded beat position.
        mean_simultaneity: f64,
        /// Max notes sharing a rounded beat position.
        max_simultaneity: usize,
        /// Best-effort triad/seventh guess at the densest simultaneity.
        chord_shape: Option<ChordShape>,
    },
    /// See [`PatternType::Scale`].
    Scale {
        /// Net melodic direction.
        direction: Direction,
        /// Identified scale type.
        scale_type: ScaleType,
    },
    /// See [`PatternType::Arpeggio`].
    Arpeggio {
        /// Net melodic direction.
        direction: Direction,
        /// Identified triad/seventh shape.
        chord_shape: ChordShape,
        /// Root pitch class (first unique pitch class encountered).
        root: u8,
    },
    /// See [`PatternType::Repeated`].
    Repeated {
        /// Which repetition shape matched.
        shape: RepeatedShape,
        /// Count of repeated notes (run length, or window length if alternating).
        count: usize,
    },
    /// See [`PatternType::Leap`].
    Leap {
        /// Overall melodic contour.
        contour: Contour,
    },
    /// See [`PatternType::Melodic`].
    Melodic {
        /// Expressive style.
        style: MelodicStyle,
    },
    /// See [`PatternType::Unknown`].
    Unknown,
}

/// A contiguous, classified span of the hand-local note stream.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatternSegment {
    /// First note index covered (inclusive).
    pub start: usize,
    /// Last note index covered (inclusive).
    pub end: usize,
    /// The classified pattern.
    pub pattern_type: PatternType,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,
    /// Pattern-specific attributes.
    pub detail: PatternDetail,
}

impl PatternSegment {
    /// Number of notes this segment covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// True when the segment is empty (never constructed by this crate, but
    /// kept so `len`/`is_empty` pair the way clippy expects).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

const MAJOR_STEPS: [i32; 7] = [2, 2, 1, 2, 2, 2, 1];
const MINOR_STEPS: [i32; 7] = [2, 1, 2, 2, 1, 2, 2];

fn contains_subsequence(haystack: &[i32], needle: &[i32]) -> bool {
    if needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn unique_pitch_classes(pitches: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for &p in pitches {
        let pc = p % 12;
        if !out.contains(&pc) {
            out.push(pc);
        }
    }
    out
}

fn chord_shape_from_pcs(pcs: &[u8]) -> Option<ChordShape> {
    if pcs.len() < 3 {
        return None;
    }
    let d1 = (i32::from(pcs[1]) - i32::from(pcs[0])).rem_euclid(12);
    let d2 = (i32::from(pcs[2]) - i32::from(pcs[1])).rem_euclid(12);
    if pcs.len() >= 4 {
        let d3 = (i32::from(pcs[3]) - i32::from(pcs[2])).rem_euclid(12);
        if matches!(d1, 3 | 4) && matches!(d2, 3 | 4) {
            return Some(ChordShape::Seventh);
        }
        let _ = d3;
    }
    match (d1, d2) {
        (4, 3) => Some(ChordShape::Major),
        (3, 4) => Some(ChordShape::Minor),
        (3, 3) => Some(ChordShape::Diminished),
        (4, 4) => Some(ChordShape::Augmented),
        _ => None,
    }
}

fn classify_ornamented(window: &[Note], f: &WindowFeatures) -> Option<(PatternDetail, f64)> {
    if f.any_ornament || f.any_grace {
        let ornament = window
            .iter()
            .find_map(|n| {
                if n.flags.has_trill {
                    Some(OrnamentType::Trill)
                } else if n.flags.has_mordent {
                    Some(OrnamentType::Mordent)
                } else if n.flags.has_turn {
                    Some(OrnamentType::Turn)
                } else if n.flags.is_grace {
                    Some(OrnamentType::Grace)
                } else {
                    None
                }
            })
            .unwrap_or(OrnamentType::Grace);
        return Some((PatternDetail::Ornamented { ornament }, 1.0));
    }

    if f.duration_mean < 0.125
        && f.max_abs_interval <= 2
        && f.intervals.len() >= 2
        && f.intervals
            .windows(2)
            .all(|pair| pair[0].abs() <= 2 && pair[1] == -pair[0])
    {
        return Some((
            PatternDetail::Ornamented {
                ornament: OrnamentType::Trill,
            },
            0.75,
        ));
    }
    None
}

fn classify_alberti(window: &[Note], f: &WindowFeatures) -> Option<(PatternDetail, f64)> {
    let staff_or_low = f.first_staff == 2 || f.pitches.first().is_some_and(|&p| p < 60);
    if !staff_or_low || f.pitches.len() < 4 {
        return None;
    }
    let groups: Vec<&[u8]> = f.pitches.chunks_exact(4).collect();
    if groups.is_empty() {
        return None;
    }
    let matches = groups
        .iter()
        .filter(|g| {
            let (p0, p1, p2, p3) = (
                i32::from(g[0]),
                i32::from(g[1]),
                i32::from(g[2]),
                i32::from(g[3]),
            );
            p0 < p2 && p2 < p1 && (p1 - p3).abs() <= 1
        })
        .count();
    let match_ratio = matches as f64 / groups.len() as f64;
    if match_ratio >= 0.6 {
        let _ = window;
        return Some((
            PatternDetail::Alberti { match_ratio },
            (0.6 + 0.35 * match_ratio).min(1.0),
        ));
    }
    None
}

fn classify_ostinato(f: &WindowFeatures) -> Option<(PatternDetail, f64)> {
    let n = f.pitches.len();
    let max_len = (n / 3).min(8);
    if max_len < 2 {
        return None;
    }
    for l in 2..=max_len {
        let cell = &f.pitches[0..l];
        let mut occurrences = 1;
        let mut offset = l;
        while offset + l <= n && &f.pitches[offset..offset + l] == cell {
            occurrences += 1;
            offset += l;
        }
        if occurrences >= 3 {
            let confidence = (0.7 + 0.05 * occurrences as f64).min(0.95);
            return Some((
                PatternDetail::Ostinato {
                    pattern_length: l,
                    occurrences,
                },
                confidence,
            ));
        }
    }
    None
}

fn classify_polyphonic(window: &[Note], f: &WindowFeatures) -> Option<(PatternDetail, f64)> {
    if f.voices.len() < 2 {
        return None;
    }
    let voice_a = f.voices[0];
    let voice_b = f.voices[1];
    let beats_a: Vec<i64> = window
        .iter()
        .filter(|n| n.voice == voice_a)
        .map(|n| (n.beat * 100.0).round() as i64)
        .collect();
    let beats_b: Vec<i64> = window
        .iter()
        .filter(|n| n.voice == voice_b)
        .map(|n| (n.beat * 100.0).round() as i64)
        .collect();
    let intersection = beats_a.iter().filter(|b| beats_b.contains(b)).count();
    let max_size = beats_a.len().max(beats_b.len()).max(1);
    let overlap = intersection as f64 / max_size as f64;
    if overlap < 0.4 {
        return Some((
            PatternDetail::Polyphonic {
                voice_count: f.voices.len(),
            },
            0.8,
        ));
    }
    None
}

fn classify_chordal(f: &WindowFeatures) -> Option<(PatternDetail, f64)> {
    if f.simultaneity_mean >= 2.0 || f.simultaneity_max >= 3 {
        let pcs = unique_pitch_classes(&f.pitches);
        let chord_shape = chord_shape_from_pcs(&pcs);
        return Some((
            PatternDetail::Chordal {
                mean_simultaneity: f.simultaneity_mean,
                max_simultaneity: f.simultaneity_max,
                chord_shape,
            },
            0.9,
        ));
    }
    None
}

fn classify_scale(f: &WindowFeatures) -> Option<(PatternDetail, f64)> {
    if f.stepwise_ratio < 0.8 {
        return None;
    }
    let direction = if f.ascending_ratio > 0.75 {
        Direction::Ascending
    } else if f.descending_ratio > 0.75 {
        Direction::Descending
    } else if f.ascending_ratio > 0.5 && f.descending_ratio > 0.3 {
        Direction::Bidirectional
    } else {
        return None;
    };

    let abs_seq: Vec<i32> = f.intervals.iter().map(|i| i.abs()).collect();
    let matching_seq: Vec<i32> = if direction == Direction::Descending {
        abs_seq.iter().rev().copied().collect()
    } else {
        abs_seq
    };

    let scale_type = if matching_seq.iter().all(|&i| i == 1) {
        ScaleType::Chromatic
    } else if contains_subsequence(&matching_seq, &MAJOR_STEPS) {
        ScaleType::Major
    } else if contains_subsequence(&matching_seq, &MINOR_STEPS) {
        ScaleType::Minor
    } else if matching_seq.iter().all(|&i| i == 2 || i == 3) {
        ScaleType::Pentatonic
    } else {
        ScaleType::Modal
    };

    Some((
        PatternDetail::Scale {
            direction,
            scale_type,
        },
        0.92,
    ))
}

fn classify_arpeggio(f: &WindowFeatures) -> Option<(PatternDetail, f64)> {
    // Leap-heavy windows are the common case, but a broken chord spanning
    // several octaves can string together only thirds and fourths: no
    // individual interval exceeds the "leap" cutoff, yet the window never
    // moves by step either. A window with zero stepwise motion is judged
    // the same way regardless of how big its intervals got.
    let no_stepwise_motion = !f.intervals.is_empty() && f.stepwise_ratio == 0.0;
    if f.leap_ratio < 0.5 && !no_stepwise_motion {
        return None;
    }
    let pcs = unique_pitch_classes(&f.pitches);
    let chord_shape = chord_shape_from_pcs(&pcs)?;
    let direction = if f.ascending_ratio >= f.descending_ratio {
        Direction::Ascending
    } else {
        Direction::Descending
    };
    Some((
        PatternDetail::Arpeggio {
            direction,
            chord_shape,
            root: pcs[0],
        },
        0.88,
    ))
}

fn classify_repeated(f: &WindowFeatures) -> Option<(PatternDetail, f64)> {
    if f.pitch_entropy >= 0.5 {
        return None;
    }
    let pitches = &f.pitches;

    let mut longest_run = 1usize;
    let mut run = 1usize;
    for w in pitches.windows(2) {
        if w[0] == w[1] {
            run += 1;
            longest_run = longest_run.max(run);
        } else {
            run = 1;
        }
    }
    if longest_run >= 3 {
        let confidence = (0.7 + 0.05 * longest_run as f64).min(0.95);
        return Some((
            PatternDetail::Repeated {
                shape: RepeatedShape::Single,
                count: longest_run,
            },
            confidence,
        ));
    }

    let distinct: Vec<u8> = {
        let mut d = Vec::new();
        for &p in pitches {
            if !d.contains(&p) {
                d.push(p);
            }
        }
        d
    };
    if distinct.len() == 2
        && pitches.len() >= 3
        && pitches
            .windows(2)
            .all(|w| w[0] != w[1] && distinct.contains(&w[0]) && distinct.contains(&w[1]))
    {
        return Some((
            PatternDetail::Repeated {
                shape: RepeatedShape::Alternating,
                count: pitches.len(),
            },
            0.85,
        ));
    }
    None
}

fn classify_leap(f: &WindowFeatures) -> Option<(PatternDetail, f64)> {
    let n_intervals = f.intervals.len();
    if f.max_abs_interval <= 4 || n_intervals == 0 {
        return None;
    }
    if f.direction_changes as f64 <= 0.4 * n_intervals as f64 {
        return None;
    }

    let half = n_intervals / 2;
    let (first_half, second_half) = f.intervals.split_at(half);
    let first_sum: i32 = first_half.iter().sum();
    let second_sum: i32 = second_half.iter().sum();

    let contour = if f.direction_changes as f64 > 0.5 * n_intervals as f64 {
        Contour::Jagged
    } else if first_sum > 0 && second_sum < 0 {
        Contour::Arch
    } else if first_sum < 0 && second_sum > 0 {
        Contour::Valley
    } else {
        Contour::Linear
    };

    Some((PatternDetail::Leap { contour }, 0.8))
}

fn classify_melodic(f: &WindowFeatures) -> Option<(PatternDetail, f64)> {
    if !f.any_slur && f.duration_variance <= 0.3 {
        return None;
    }
    let style = if f.any_slur && f.duration_mean > 1.0 {
        MelodicStyle::Cantabile
    } else if f.duration_variance > 0.4 {
        MelodicStyle::Expressive
    } else if f.any_slur {
        MelodicStyle::Lyrical
    } else {
        MelodicStyle::Neutral
    };
    Some((PatternDetail::Melodic { style }, 0.7))
}

/// Classify one window, returning the winning `(PatternType, detail, confidence)`.
///
/// Rules are tested in a fixed priority order; the first match wins.
#[must_use]
pub fn classify(window: &[Note], f: &WindowFeatures) -> (PatternType, PatternDetail, f64) {
    if let Some((detail, confidence)) = classify_ornamented(window, f) {
        return (PatternType::Ornamented, detail, confidence);
    }
    if let Some((detail, confidence)) = classify_alberti(window, f) {
        return (PatternType::Alberti, detail, confidence);
    }
    if let Some((detail, confidence)) = classify_ostinato(f) {
        return (PatternType::Ostinato, detail, confidence);
    }
    if let Some((detail, confidence)) = classify_polyphonic(window, f) {
        return (PatternType::Polyphonic, detail, confidence);
    }
    if let Some((detail, confidence)) = classify_chordal(f) {
        return (PatternType::Chordal, detail, confidence);
    }
    if let Some((detail, confidence)) = classify_scale(f) {
        return (PatternType::Scale, detail, confidence);
    }
    if let Some((detail, confidence)) = classify_arpeggio(f) {
        return (PatternType::Arpeggio, detail, confidence);
    }
    if let Some((detail, confidence)) = classify_repeated(f) {
        return (PatternType::Repeated, detail, confidence);
    }
    if let Some((detail, confidence)) = classify_leap(f) {
        return (PatternType::Leap, detail, confidence);
    }
    if let Some((detail, confidence)) = classify_melodic(f) {
        return (PatternType::Melodic, detail, confidence);
    }
    (PatternType::Unknown, PatternDetail::Unknown, 0.5)
}

/// Mean duration of up to the next 16 notes starting at `cursor`, used to
/// pick the adaptive window size.
fn mean_duration_ahead(notes: &[Note], cursor: usize) -> f64 {
    let end = (cursor + 16).min(notes.len());
    if end <= cursor {
        return 0.0;
    }
    let slice = &notes[cursor..end];
    slice.iter().map(|n| n.duration).sum::<f64>() / slice.len() as f64
}

fn adaptive_window(notes: &[Note], cursor: usize) -> usize {
    let mean = mean_duration_ahead(notes, cursor);
    if mean < 0.25 {
        16
    } else if mean < 0.5 {
        12
    } else if mean > 2.0 {
        4
    } else {
        8
    }
}

fn raw_segments(notes: &[Note]) -> Vec<PatternSegment> {
    let n = notes.len();
    let mut segments = Vec::new();
    let mut cursor = 0usize;
    let mut covered = 0usize;

    while cursor < n {
        if n - cursor < 2 {
            break;
        }
        let w = adaptive_window(notes, cursor);
        let end = (cursor + w).min(n);
        let f = features::extract(notes, cursor, end);
        let (pattern_type, detail, confidence) = classify(&notes[cursor..end], &f);

        let seg_start = covered.max(cursor);
        let seg_end = end - 1;
        if seg_start <= seg_end {
            segments.push(PatternSegment {
                start: seg_start,
                end: seg_end,
                pattern_type,
                confidence,
                detail,
            });
            covered = seg_end + 1;
        }

        cursor += (w / 2).max(1);
    }

    if covered < n {
        let f = features::extract(notes, covered, n);
        let (pattern_type, detail, confidence) = classify(&notes[covered..n], &f);
        segments.push(PatternSegment {
            start: covered,
            end: n - 1,
            pattern_type,
            confidence,
            detail,
        });
    }

    segments
}

/// Merge adjacent segments that share a pattern type, or whose running
/// segment is shorter than 3 notes. The merged type/detail is inherited
/// from whichever of the pair is longer, so an absorbed short segment
/// never overrides its well-supported neighbor.
fn merge_segments(segments: Vec<PatternSegment>) -> Vec<PatternSegment> {
    let mut merged: Vec<PatternSegment> = Vec::with_capacity(segments.len());
    for seg in segments {
        match merged.last_mut() {
            Some(last) if last.pattern_type == seg.pattern_type || last.len() < 3 => {
                if seg.len() > last.len() {
                    last.pattern_type = seg.pattern_type;
                    last.detail = seg.detail;
                }
                last.confidence = last.confidence.max(seg.confidence);
                last.end = seg.end;
            }
            _ => merged.push(seg),
        }
    }
    merged
}

/// Segment a hand-local note stream into a sorted, non-overlapping,
/// fully-covering list of [`PatternSegment`]s. Total: an empty stream
/// yields an empty list; every other stream is fully covered.
#[must_use]
pub fn recognize(notes: &[Note]) -> Vec<PatternSegment> {
    merge_segments(raw_segments(notes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Hand;

    fn notes_with_durations(pitches: &[u8], duration: f64, hand: Hand) -> Vec<Note> {
        pitches
            .iter()
            .map(|&p| Note::new(p, duration, hand))
            .collect()
    }

    #[test]
    fn empty_stream_yields_no_segments() {
        assert!(recognize(&[]).is_empty());
    }

    #[test]
    fn ascending_major_scale_is_one_segment() {
        let pitches = [60u8, 62, 64, 65, 67, 69, 71, 72];
        let notes = notes_with_durations(&pitches, 1.0, Hand::Right);
        let segments = recognize(&notes);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, 0);
        assert_eq!(segments[0].end, 7);
        assert_eq!(segments[0].pattern_type, PatternType::Scale);
        match segments[0].detail {
            PatternDetail::Scale {
                direction,
                scale_type,
            } => {
                assert_eq!(direction, Direction::Ascending);
                assert_eq!(scale_type, ScaleType::Major);
            }
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn descending_major_scale_is_detected_as_major() {
        let pitches = [72u8, 71, 69, 67, 65, 64, 62, 60];
        let notes = notes_with_durations(&pitches, 1.0, Hand::Right);
        let segments = recognize(&notes);
        assert_eq!(segments[0].pattern_type, PatternType::Scale);
        match segments[0].detail {
            PatternDetail::Scale {
                direction,
                scale_type,
            } => {
                assert_eq!(direction, Direction::Descending);
                assert_eq!(scale_type, ScaleType::Major);
            }
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn wide_triad_arpeggio_is_detected() {
        let pitches = [60u8, 76, 91];
        let notes = notes_with_durations(&pitches, 1.0, Hand::Right);
        let segments = recognize(&notes);
        assert_eq!(segments[0].pattern_type, PatternType::Arpeggio);
        match segments[0].detail {
            PatternDetail::Arpeggio { chord_shape, .. } => {
                assert_eq!(chord_shape, ChordShape::Major);
            }
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn broken_triad_with_no_leaps_over_four_semitones_is_still_arpeggio() {
        // [4,3,5,4,3,5]: no interval exceeds the leap cutoff, but none are
        // stepwise either, so the broken-chord shape carries the call.
        let pitches = [60u8, 64, 67, 72, 76, 79, 84];
        let notes = notes_with_durations(&pitches, 1.0, Hand::Right);
        let segments = recognize(&notes);
        assert_eq!(segments[0].pattern_type, PatternType::Arpeggio);
        match segments[0].detail {
            PatternDetail::Arpeggio {
                chord_shape,
                direction,
                ..
            } => {
                assert_eq!(chord_shape, ChordShape::Major);
                assert_eq!(direction, Direction::Ascending);
            }
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn repeated_note_run_is_detected_with_count() {
        let pitches = [60u8, 60, 60, 60, 60];
        let notes = notes_with_durations(&pitches, 1.0, Hand::Right);
        let segments = recognize(&notes);
        assert_eq!(segments[0].pattern_type, PatternType::Repeated);
        match segments[0].detail {
            PatternDetail::Repeated { shape, count } => {
                assert_eq!(shape, RepeatedShape::Single);
                assert_eq!(count, 5);
            }
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn trill_flag_forces_ornamented_with_full_confidence() {
        let mut notes = notes_with_durations(&[64u8, 65], 0.25, Hand::Right);
        notes[0].flags.has_trill = true;
        notes[1].flags.has_trill = true;
        let segments = recognize(&notes);
        assert_eq!(segments[0].pattern_type, PatternType::Ornamented);
        assert_eq!(segments[0].confidence, 1.0);
    }

    #[test]
    fn alberti_bass_shape_is_detected_in_left_hand() {
        let pitches = [48u8, 55, 52, 55, 48, 55, 52, 55, 48, 55, 52, 55];
        let notes = notes_with_durations(&pitches, 0.5, Hand::Left);
        let segments = recognize(&notes);
        assert!(
            segments.iter().any(|s| s.pattern_type == PatternType::Alberti),
            "expected an Alberti segment, got {segments:?}"
        );
    }

    #[test]
    fn segments_fully_cover_the_stream_without_overlap() {
        let pitches: Vec<u8> = (0..40).map(|i| 60 + (i % 12)).collect();
        let notes = notes_with_durations(&pitches, 0.3, Hand::Right);
        let segments = recognize(&notes);
        assert_eq!(segments.first().unwrap().start, 0);
        assert_eq!(segments.last().unwrap().end, notes.len() - 1);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end + 1, pair[1].start);
        }
    }

    #[test]
    fn single_note_stream_yields_single_segment() {
        let notes = notes_with_durations(&[60], 1.0, Hand::Right);
        let segments = recognize(&notes);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, 0);
        assert_eq!(segments[0].end, 0);
    }
}
