//! Fingering planner: a Viterbi-style dynamic program over `(note-index,
//! finger)` states whose transition costs are shaped by the recognized
//! pattern segments, the active hand-position anchor, and the difficulty
//! profile.
//!
//! Costs are plain `i32`s, which keeps tie-breaks and test expectations
//! stable across platforms. Parent pointers are `(layer, finger)` pairs
//! rather than back-references, so the table is a flat `Vec` of layers.

use crate::difficulty::{natural_span, Difficulty, DifficultyProfile};
use crate::geometry::expected_finger;
use crate::note::{is_black_key, Hand, Note};
use crate::pattern::{PatternSegment, PatternType};

/// A single hand's solved fingering.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResult {
    /// Finger (1..=5) assigned to each note, aligned with the hand-local
    /// input order.
    pub fingers: Vec<u8>,
    /// Ordered reason tags per note.
    pub reasons: Vec<Vec<&'static str>>,
    /// Total cost of the solution.
    pub total_cost: i64,
}

const PRUNE_THRESHOLD: i32 = 500;
const FULL_DP_LIMIT: usize = 64;
const CHUNK_SIZE: usize = 32;
const CHUNK_OVERLAP: usize = 4;

/// Hand position anchors per note index.
#[must_use]
pub fn compute_anchors(notes: &[Note], hand: Hand) -> Vec<u8> {
    let n = notes.len();
    let mut anchors = vec![0u8; n];
    if n == 0 {
        return anchors;
    }
    let mut seg_start = 0usize;
    let mut run_min = notes[0].pitch;
    let mut run_max = notes[0].pitch;
    for i in 1..n {
        let p = notes[i].pitch;
        let cand_min = run_min.min(p);
        let cand_max = run_max.max(p);
        if i32::from(cand_max) - i32::from(cand_min) > 8 {
            let anchor = match hand {
                Hand::Right => run_min,
                Hand::Left => run_max,
            };
            anchors[seg_start..i].fill(anchor);
            seg_start = i;
            run_min = p;
            run_max = p;
        } else {
            run_min = cand_min;
            run_max = cand_max;
        }
    }
    let anchor = match hand {
        Hand::Right => run_min,
        Hand::Left => run_max,
    };
    anchors[seg_start..n].fill(anchor);
    anchors
}

/// Per-note scale-segment mask: true for notes inside a maximal run of
/// `>= 4` consecutive same-sign stepwise intervals.
#[must_use]
pub fn compute_scale_mask(notes: &[Note]) -> Vec<bool> {
    let n = notes.len();
    let mut mask = vec![false; n];
    if n < 2 {
        return mask;
    }
    let intervals: Vec<i32> = notes
        .windows(2)
        .map(|w| i32::from(w[1].pitch) - i32::from(w[0].pitch))
        .collect();

    let mut i = 0usize;
    while i < intervals.len() {
        let step = intervals[i].abs() == 1 || intervals[i].abs() == 2;
        if step {
            let sign = intervals[i].signum();
            let mut j = i;
            while j < intervals.len()
                && (intervals[j].abs() == 1 || intervals[j].abs() == 2)
                && intervals[j].signum() == sign
            {
                j += 1;
            }
            if j - i >= 4 {
                mask[i..=j].fill(true);
            }
            i = j;
        } else {
            i += 1;
        }
    }
    mask
}

fn pattern_at(segments: &[PatternSegment], index: usize) -> PatternType {
    segments
        .iter()
        .find(|s| s.start <= index && index <= s.end)
        .map(|s| s.pattern_type)
        .unwrap_or(PatternType::Unknown)
}

fn initial_cost(
    profile: &DifficultyProfile,
    kind: Difficulty,
    hand: Hand,
    note0: Note,
    anchor0: u8,
    f: u8,
) -> (i32, Vec<&'static str>) {
    let mut cost = 0i32;
    let mut reasons = Vec::new();

    let offset = i32::from(note0.pitch) - i32::from(anchor0);
    let expected = expected_finger(hand, offset);
    if f == expected {
        cost -= 25;
        reasons.push("Matches position");
    } else {
        cost += 12 * i32::from(f).abs_diff(i32::from(expected)) as i32;
    }

    if kind == Difficulty::Beginner {
        if f == 4 {
            cost += profile.finger4_penalty;
        }
        if f == 5 {
            cost += profile.finger5_penalty;
        }
        if matches!(f, 1 | 2 | 3) {
            cost -= 5;
        }
    }

    if is_black_key(note0.pitch) {
        if matches!(f, 1 | 5) {
            cost += if profile.allow_thumb_on_black { 10 } else { 25 };
            reasons.push("Short finger on black key");
        } else {
            cost -= 8;
            reasons.push("Long finger on black key");
        }
    }

    (cost, reasons)
}

#[allow(clippy::too_many_arguments)]
fn transition(
    profile: &DifficultyProfile,
    kind: Difficulty,
    hand: Hand,
    prev: Note,
    curr: Note,
    anchor: u8,
    in_scale: bool,
    pat_ctx: PatternType,
    g: u8,
    f: u8,
) -> (i32, Vec<&'static str>) {
    let mut cost = 0i32;
    let mut reasons = Vec::new();

    let interval = i32::from(curr.pitch) - i32::from(prev.pitch);
    let abs_interval = interval.abs();
    let delta_f = i32::from(f) - i32::from(g);

    // Rules 1/2: same-finger leap vs repeated pitch are mutually exclusive
    // on the sign of `interval`.
    if interval != 0 {
        if f == g {
            cost += 40 + 5 * abs_interval;
            reasons.push("Same finger leap");
        }
    } else if f == g {
        cost += 25;
    } else {
        cost -= 10;
    }

    // Rule 3: natural progression / thumb crossing.
    if interval != 0 {
        let natural = match hand {
            Hand::Right => (interval > 0) == (delta_f > 0),
            Hand::Left => (interval > 0) == (delta_f < 0),
        };
        if natural {
            cost -= 20;
        } else if g == 1 || f == 1 {
            let crossing_in_scale = in_scale || pat_ctx == PatternType::Scale;
            cost += if crossing_in_scale {
                profile.thumb_crossing_penalty / 3
            } else {
                profile.thumb_crossing_penalty
            };
            reasons.push("Thumb crossing");
        }
    }

    // Rule 4: span/stretch.
    let span = natural_span(g, f);
    let over = abs_interval - span;
    if over > 0 && over > (profile.max_comfortable_span - span) {
        cost += 200;
        reasons.push("Impossible stretch");
    } else {
        cost += over * profile.stretch_penalty;
    }

    // Rule 5: position adherence (only outside a scale run).
    if !in_scale {
        let offset = i32::from(curr.pitch) - i32::from(anchor);
        let expected = expected_finger(hand, offset);
        if f == expected {
            cost -= 15;
        } else {
            cost += 8 * i32::from(f).abs_diff(i32::from(expected)) as i32;
        }
    }

    // Rule 6: scale shaping.
    if in_scale || pat_ctx == PatternType::Scale {
        const FORWARD_PAIRS: [(u8, u8); 6] = [(1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (4, 1)];
        const BACKWARD_PAIRS: [(u8, u8); 7] =
            [(5, 4), (4, 3), (3, 2), (2, 1), (1, 3), (1, 2), (1, 4)];
        let forward_motion = match hand {
            Hand::Right => interval > 0,
            Hand::Left => interval < 0,
        };
        let backward_motion = match hand {
            Hand::Right => interval < 0,
            Hand::Left => interval > 0,
        };
        if forward_motion && FORWARD_PAIRS.contains(&(g, f)) {
            cost -= 25;
        } else if backward_motion && BACKWARD_PAIRS.contains(&(g, f)) {
            cost -= 25;
        } else if f == g {
            cost += 50;
        }
        if (g == 1 || f == 1) && profile.prefer_simple_patterns {
            cost += 20;
        }
    }

    // Rule 7: black-key preference on the arrival note.
    if is_black_key(curr.pitch) {
        match f {
            1 => cost += if profile.allow_thumb_on_black { 15 } else { 35 },
            5 => cost += 20,
            _ => cost -= 5,
        }
    }

    // Rule 8: difficulty shaping.
    match kind {
        Difficulty::Beginner => {
            if f == 4 {
                cost += profile.finger4_penalty;
            }
            if f == 5 && !is_black_key(curr.pitch) {
                cost += profile.finger5_penalty;
            }
            if delta_f.abs() <= 1 && abs_interval <= 2 {
                cost -= 10;
                reasons.push("Simple transition");
            }
        }
        Difficulty::Advanced => {
            if abs_interval > 5 && (g == 1 || f == 1) {
                cost -= 10;
                reasons.push("Efficient crossing");
            }
        }
        Difficulty::Intermediate => {}
    }

    // Rule 9: arpeggio shaping.
    if pat_ctx == PatternType::Arpeggio && interval != 0 {
        let ascending = interval > 0;
        let good = match (hand, ascending) {
            (Hand::Right, true) => g < f || (g >= 3 && f == 1),
            (Hand::Right, false) => g > f || (g == 1 && f >= 3),
            (Hand::Left, true) => g > f || (g == 1 && f >= 3),
            (Hand::Left, false) => g < f || (g >= 3 && f == 1),
        };
        if good {
            cost -= 15;
            reasons.push("Good arpeggio");
        }
    }

    (cost, reasons)
}

fn empty_reason_slots() -> [Vec<&'static str>; 5] {
    [
        Vec::new(),
        Vec::new(),
        Vec::new(),
        Vec::new(),
        Vec::new(),
    ]
}

/// Solve a single DP window. `offset` is the absolute index of `notes[0]`
/// within the full hand-local stream, used to look up `segments`/`anchors`/
/// `scale_mask`, which are always computed over the whole stream even when
/// this window is a chunk.
fn solve_window(
    notes: &[Note],
    offset: usize,
    hand: Hand,
    segments: &[PatternSegment],
    anchors: &[u8],
    scale_mask: &[bool],
    profile: &DifficultyProfile,
    kind: Difficulty,
) -> PlanResult {
    let n = notes.len();
    if n == 0 {
        return PlanResult {
            fingers: Vec::new(),
            reasons: Vec::new(),
            total_cost: 0,
        };
    }

    let mut cost: Vec<[i32; 5]> = vec![[0; 5]; n];
    let mut parent: Vec<[u8; 5]> = vec![[0; 5]; n];
    let mut reason: Vec<[Vec<&'static str>; 5]> = (0..n).map(|_| empty_reason_slots()).collect();

    for f in 1..=5u8 {
        let (c, r) = initial_cost(profile, kind, hand, notes[0], anchors[offset], f);
        cost[0][(f - 1) as usize] = c;
        reason[0][(f - 1) as usize] = r;
    }

    for i in 1..n {
        let abs_i = offset + i;
        let in_scale = scale_mask[abs_i];
        let pat_ctx = pattern_at(segments, abs_i);
        let anchor = anchors[abs_i];
        for f in 1..=5u8 {
            let mut best_cost = i32::MAX;
            let mut best_parent = 0u8;
            let mut best_reason: Vec<&'static str> = Vec::new();
            for g in 1..=5u8 {
                let (tcost, treason) = transition(
                    profile,
                    kind,
                    hand,
                    notes[i - 1],
                    notes[i],
                    anchor,
                    in_scale,
                    pat_ctx,
                    g,
                    f,
                );
                if tcost > PRUNE_THRESHOLD {
                    continue;
                }
                let candidate = cost[i - 1][(g - 1) as usize].saturating_add(tcost);
                if candidate < best_cost {
                    best_cost = candidate;
                    best_parent = g;
                    best_reason = treason;
                }
            }
            if best_parent == 0 {
                // Never observed on well-formed input: every predecessor was pruned.
                best_cost = 0;
                best_parent = 3;
                best_reason = vec!["Fallback finger"];
            }
            cost[i][(f - 1) as usize] = best_cost;
            parent[i][(f - 1) as usize] = best_parent;
            reason[i][(f - 1) as usize] = best_reason;
        }
    }

    let mut best_idx = 0usize;
    let mut best_val = cost[n - 1][0];
    for idx in 1..5 {
        if cost[n - 1][idx] < best_val {
            best_val = cost[n - 1][idx];
            best_idx = idx;
        }
    }

    let mut fingers = vec![0u8; n];
    let mut reasons: Vec<Vec<&'static str>> = vec![Vec::new(); n];
    fingers[n - 1] = (best_idx + 1) as u8;
    reasons[n - 1] = reason[n - 1][best_idx].clone();

    let mut cur = best_idx;
    for i in (1..n).rev() {
        let g = parent[i][cur];
        fingers[i - 1] = g;
        cur = (g - 1) as usize;
        reasons[i - 1] = reason[i - 1][cur].clone();
    }

    PlanResult {
        fingers,
        reasons,
        total_cost: i64::from(best_val),
    }
}

/// Solve a full hand-local stream, chunking into overlapping 32-note
/// windows once the stream exceeds 64 notes.
#[must_use]
pub fn plan(
    notes: &[Note],
    hand: Hand,
    segments: &[PatternSegment],
    profile: &DifficultyProfile,
    kind: Difficulty,
) -> PlanResult {
    let n = notes.len();
    let anchors = compute_anchors(notes, hand);
    let scale_mask = compute_scale_mask(notes);

    if n <= FULL_DP_LIMIT {
        return solve_window(notes, 0, hand, segments, &anchors, &scale_mask, profile, kind);
    }

    let mut fingers = Vec::with_capacity(n);
    let mut reasons = Vec::with_capacity(n);
    let mut total_cost: i64 = 0;
    let mut start = 0usize;
    loop {
        let end = (start + CHUNK_SIZE).min(n);
        let chunk = &notes[start..end];
        let result = solve_window(
            chunk,
            start,
            hand,
            segments,
            &anchors,
            &scale_mask,
            profile,
            kind,
        );
        let keep_from = if start == 0 {
            0
        } else {
            CHUNK_OVERLAP.min(result.fingers.len())
        };
        fingers.extend_from_slice(&result.fingers[keep_from..]);
        reasons.extend(result.reasons[keep_from..].iter().cloned());
        total_cost += result.total_cost;
        if end == n {
            break;
        }
        start += CHUNK_SIZE - CHUNK_OVERLAP;
    }

    PlanResult {
        fingers,
        reasons,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Hand;
    use crate::pattern::recognize;

    fn notes(pitches: &[u8], hand: Hand) -> Vec<Note> {
        pitches.iter().map(|&p| Note::new(p, 1.0, hand)).collect()
    }

    #[test]
    fn empty_stream_has_empty_plan() {
        let result = plan(&[], Hand::Right, &[], &DifficultyProfile::intermediate(), Difficulty::Intermediate);
        assert!(result.fingers.is_empty());
        assert_eq!(result.total_cost, 0);
    }

    #[test]
    fn single_note_is_assigned_one_finger() {
        let stream = notes(&[60], Hand::Right);
        let segments = recognize(&stream);
        let result = plan(
            &stream,
            Hand::Right,
            &segments,
            &DifficultyProfile::intermediate(),
            Difficulty::Intermediate,
        );
        assert_eq!(result.fingers.len(), 1);
        assert!((1..=5).contains(&result.fingers[0]));
    }

    #[test]
    fn ascending_octave_uses_five_finger_position_then_thumb_under() {
        let pitches = [60u8, 62, 64, 65, 67, 69, 71, 72];
        let stream = notes(&pitches, Hand::Right);
        let segments = recognize(&stream);
        let result = plan(
            &stream,
            Hand::Right,
            &segments,
            &DifficultyProfile::intermediate(),
            Difficulty::Intermediate,
        );
        assert_eq!(result.fingers.len(), 8);
        assert!(result.fingers.iter().all(|f| (1..=5).contains(f)));
        assert_eq!(result.fingers[0], 1);
    }

    #[test]
    fn descending_octave_starts_on_pinky() {
        let pitches = [72u8, 71, 69, 67, 65, 64, 62, 60];
        let stream = notes(&pitches, Hand::Right);
        let segments = recognize(&stream);
        let result = plan(
            &stream,
            Hand::Right,
            &segments,
            &DifficultyProfile::intermediate(),
            Difficulty::Intermediate,
        );
        assert_eq!(result.fingers[0], 5);
    }

    #[test]
    fn repeated_note_never_uses_the_same_finger_twice_in_a_row() {
        let pitches = [60u8, 60, 60, 60, 60];
        let stream = notes(&pitches, Hand::Right);
        let segments = recognize(&stream);
        let result = plan(
            &stream,
            Hand::Right,
            &segments,
            &DifficultyProfile::beginner(),
            Difficulty::Beginner,
        );
        for pair in result.fingers.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn scale_labeling_never_increases_cost_over_unknown_context() {
        let pitches = [60u8, 62, 64, 65, 67, 69, 71, 72];
        let stream = notes(&pitches, Hand::Right);
        let profile = DifficultyProfile::intermediate();

        let scale_segments = recognize(&stream);
        let with_scale = plan(&stream, Hand::Right, &scale_segments, &profile, Difficulty::Intermediate);
        let without_scale = plan(&stream, Hand::Right, &[], &profile, Difficulty::Intermediate);

        assert!(with_scale.total_cost <= without_scale.total_cost);
    }

    #[test]
    fn deterministic_repeated_runs_match_byte_for_byte() {
        let pitches = [60u8, 64, 67, 72, 76, 79, 84];
        let stream = notes(&pitches, Hand::Right);
        let segments = recognize(&stream);
        let profile = DifficultyProfile::advanced();
        let a = plan(&stream, Hand::Right, &segments, &profile, Difficulty::Advanced);
        let b = plan(&stream, Hand::Right, &segments, &profile, Difficulty::Advanced);
        assert_eq!(a, b);
    }

    #[test]
    fn chunking_boundary_64_vs_65() {
        let pitches_64: Vec<u8> = (0..64).map(|i| 60 + (i % 12) as u8).collect();
        let pitches_65: Vec<u8> = (0..65).map(|i| 60 + (i % 12) as u8).collect();
        let stream_64 = notes(&pitches_64, Hand::Right);
        let stream_65 = notes(&pitches_65, Hand::Right);
        let segments_64 = recognize(&stream_64);
        let segments_65 = recognize(&stream_65);
        let profile = DifficultyProfile::intermediate();
        let result_64 = plan(&stream_64, Hand::Right, &segments_64, &profile, Difficulty::Intermediate);
        let result_65 = plan(&stream_65, Hand::Right, &segments_65, &profile, Difficulty::Intermediate);
        assert_eq!(result_64.fingers.len(), 64);
        assert_eq!(result_65.fingers.len(), 65);
    }
}
