//! Per-window numeric feature extraction.
//!
//! Every ratio here is guarded against an empty denominator and returns 0
//! in that case, so callers never need to special-case a one-note window
//! beyond what `classify` already does.

use std::collections::HashMap;

use crate::note::Note;

/// Numeric features computed over a single recognizer window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFeatures {
    /// `max(pitch) - min(pitch)` across the window.
    pub pitch_range: u8,
    /// Shannon entropy (base 2) of the pitch distribution.
    pub pitch_entropy: f64,
    /// Fraction of intervals with positive sign.
    pub ascending_ratio: f64,
    /// Fraction of intervals with negative sign.
    pub descending_ratio: f64,
    /// Largest interval magnitude.
    pub max_abs_interval: i32,
    /// Mean interval magnitude.
    pub mean_abs_interval: f64,
    /// Variance of interval magnitude.
    pub variance_abs_interval: f64,
    /// Fraction of intervals with `|I| <= 2`.
    pub stepwise_ratio: f64,
    /// Fraction of intervals with `|I| > 4`.
    pub leap_ratio: f64,
    /// Count of adjacent interval sign flips (both nonzero).
    pub direction_changes: usize,
    /// Mean notes sharing a rounded beat position.
    pub simultaneity_mean: f64,
    /// Max notes sharing a rounded beat position.
    pub simultaneity_max: usize,
    /// Variance of note durations.
    pub duration_variance: f64,
    /// Mean note duration.
    pub duration_mean: f64,
    /// Any note in the window is under a slur.
    pub any_slur: bool,
    /// Any note carries a trill/mordent/turn.
    pub any_ornament: bool,
    /// Any note is a grace note.
    pub any_grace: bool,
    /// Staff of the first note in the window.
    pub first_staff: u8,
    /// The raw interval sequence, kept for classifiers that need the shape
    /// rather than just its aggregate statistics (scale/arpeggio/Alberti).
    pub intervals: Vec<i32>,
    /// Raw pitch sequence.
    pub pitches: Vec<u8>,
    /// Distinct voice tags seen in the window, in first-seen order.
    pub voices: Vec<u8>,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    mean(&values.iter().map(|v| (v - m).powi(2)).collect::<Vec<_>>())
}

/// Shannon entropy (base 2) of a discrete sample. Zero for an empty or
/// single-valued sample.
#[must_use]
pub fn shannon_entropy(values: &[u8]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mut counts: HashMap<u8, usize> = HashMap::new();
    for &v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let total = values.len() as f64;
    -counts
        .values()
        .map(|&c| {
            let p = c as f64 / total;
            p * p.log2()
        })
        .sum::<f64>()
}

/// Compute features for the window `notes[start..end]`.
#[must_use]
pub fn extract(notes: &[Note], start: usize, end: usize) -> WindowFeatures {
    let window = &notes[start..end];
    let pitches: Vec<u8> = window.iter().map(|n| n.pitch).collect();
    let intervals: Vec<i32> = pitches
        .windows(2)
        .map(|p| i32::from(p[1]) - i32::from(p[0]))
        .collect();

    let pitch_range = if pitches.is_empty() {
        0
    } else {
        pitches.iter().max().copied().unwrap_or(0) - pitches.iter().min().copied().unwrap_or(0)
    };

    let n_intervals = intervals.len() as f64;
    let ascending = intervals.iter().filter(|i| **i > 0).count();
    let descending = intervals.iter().filter(|i| **i < 0).count();
    let ascending_ratio = if n_intervals > 0.0 {
        ascending as f64 / n_intervals
    } else {
        0.0
    };
    let descending_ratio = if n_intervals > 0.0 {
        descending as f64 / n_intervals
    } else {
        0.0
    };

    let abs_intervals: Vec<f64> = intervals.iter().map(|i| i.unsigned_abs() as f64).collect();
    let max_abs_interval = intervals.iter().map(|i| i.abs()).max().unwrap_or(0);
    let mean_abs_interval = mean(&abs_intervals);
    let variance_abs_interval = variance(&abs_intervals);

    let stepwise_ratio = if n_intervals > 0.0 {
        intervals.iter().filter(|i| i.abs() <= 2).count() as f64 / n_intervals
    } else {
        0.0
    };
    let leap_ratio = if n_intervals > 0.0 {
        intervals.iter().filter(|i| i.abs() > 4).count() as f64 / n_intervals
    } else {
        0.0
    };

    let mut direction_changes = 0usize;
    for pair in intervals.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a != 0 && b != 0 && a.signum() != b.signum() {
            direction_changes += 1;
        }
    }

    let mut beat_groups: HashMap<i64, usize> = HashMap::new();
    for note in window {
        let rounded = (note.beat * 100.0).round() as i64;
        *beat_groups.entry(rounded).or_insert(0) += 1;
    }
    let simultaneity_max = beat_groups.values().copied().max().unwrap_or(0);
    let simultaneity_mean = if beat_groups.is_empty() {
        0.0
    } else {
        beat_groups.values().sum::<usize>() as f64 / beat_groups.len() as f64
    };

    let durations: Vec<f64> = window.iter().map(|n| n.duration).collect();
    let duration_mean = mean(&durations);
    let duration_variance = variance(&durations);

    let any_slur = window.iter().any(|n| n.flags.has_slur);
    let any_ornament = window.iter().any(|n| n.flags.any_ornament());
    let any_grace = window.iter().any(|n| n.flags.is_grace);
    let first_staff = window.first().map(|n| n.staff).unwrap_or(0);

    let mut voices = Vec::new();
    for note in window {
        if !voices.contains(&note.voice) {
            voices.push(note.voice);
        }
    }

    WindowFeatures {
        pitch_range,
        pitch_entropy: shannon_entropy(&pitches),
        ascending_ratio,
        descending_ratio,
        max_abs_interval,
        mean_abs_interval,
        variance_abs_interval,
        stepwise_ratio,
        leap_ratio,
        direction_changes,
        simultaneity_mean,
        simultaneity_max,
        duration_variance,
        duration_mean,
        any_slur,
        any_ornament,
        any_grace,
        first_staff,
        intervals,
        pitches,
        voices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Hand;

    fn note(pitch: u8) -> Note {
        Note::new(pitch, 1.0, Hand::Right)
    }

    #[test]
    fn entropy_of_single_value_is_zero() {
        assert_eq!(shannon_entropy(&[60, 60, 60]), 0.0);
    }

    #[test]
    fn entropy_of_empty_is_zero() {
        assert_eq!(shannon_entropy(&[]), 0.0);
    }

    #[test]
    fn ratios_guard_empty_interval_set() {
        let notes = vec![note(60)];
        let f = extract(&notes, 0, 1);
        assert_eq!(f.stepwise_ratio, 0.0);
        assert_eq!(f.leap_ratio, 0.0);
        assert_eq!(f.ascending_ratio, 0.0);
    }

    #[test]
    fn ascending_scale_has_stepwise_ratio_one() {
        let notes: Vec<Note> = [60u8, 62, 64, 65, 67].into_iter().map(note).collect();
        let f = extract(&notes, 0, notes.len());
        assert_eq!(f.stepwise_ratio, 1.0);
        assert_eq!(f.ascending_ratio, 1.0);
        assert_eq!(f.direction_changes, 0);
    }
}
