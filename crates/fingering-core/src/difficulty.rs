//! Difficulty profiles and the natural-span lookup table.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The three calibrated difficulty regimes. Weights are fixed design
/// constants; the planner does not learn them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DifficultyProfile {
    /// Penalty for crossing the thumb under/over another finger.
    pub thumb_crossing_penalty: i32,
    /// Penalty for closing out a hand-position segment.
    pub position_change_penalty: i32,
    /// Flat penalty for using the ring finger (4).
    pub finger4_penalty: i32,
    /// Flat penalty for using the pinky (5).
    pub finger5_penalty: i32,
    /// Penalty per semitone beyond the natural span between two fingers.
    pub stretch_penalty: i32,
    /// Widest span (in semitones) considered comfortable before the
    /// stretch transition treats the reach as impossible.
    pub max_comfortable_span: i32,
    /// When true, simple-pattern shaping and simple-transition bonuses apply.
    pub prefer_simple_patterns: bool,
    /// When true, the thumb may land on a black key without the harsher penalty.
    pub allow_thumb_on_black: bool,
}

impl DifficultyProfile {
    /// Beginner profile: large penalties, position-locked, thumb never on black keys.
    #[must_use]
    pub fn beginner() -> Self {
        Self {
            thumb_crossing_penalty: 80,
            position_change_penalty: 60,
            finger4_penalty: 15,
            finger5_penalty: 10,
            stretch_penalty: 25,
            max_comfortable_span: 5,
            prefer_simple_patterns: true,
            allow_thumb_on_black: false,
        }
    }

    /// Intermediate profile: moderate penalties, no simple-pattern preference.
    #[must_use]
    pub fn intermediate() -> Self {
        Self {
            thumb_crossing_penalty: 30,
            position_change_penalty: 30,
            finger4_penalty: 5,
            finger5_penalty: 5,
            stretch_penalty: 12,
            max_comfortable_span: 7,
            prefer_simple_patterns: false,
            allow_thumb_on_black: false,
        }
    }

    /// Advanced profile: minimal penalties, thumb may sit on black keys.
    #[must_use]
    pub fn advanced() -> Self {
        Self {
            thumb_crossing_penalty: 10,
            position_change_penalty: 15,
            finger4_penalty: 0,
            finger5_penalty: 0,
            stretch_penalty: 5,
            max_comfortable_span: 9,
            prefer_simple_patterns: false,
            allow_thumb_on_black: true,
        }
    }
}

/// Named difficulty tag, used at API/CLI boundaries where a profile is
/// selected by name rather than constructed directly, and by the planner
/// wherever a rule is scoped to one specific regime rather than driven by
/// a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    /// See [`DifficultyProfile::beginner`].
    Beginner,
    /// See [`DifficultyProfile::intermediate`].
    Intermediate,
    /// See [`DifficultyProfile::advanced`].
    Advanced,
}

impl Difficulty {
    /// Resolve the tag to its calibrated profile.
    #[must_use]
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Self::Beginner => DifficultyProfile::beginner(),
            Self::Intermediate => DifficultyProfile::intermediate(),
            Self::Advanced => DifficultyProfile::advanced(),
        }
    }
}

/// Comfortable semitone span between a pair of fingers in a relaxed hand.
/// Lookup is symmetric in finger order.
#[must_use]
pub fn natural_span(a: u8, b: u8) -> i32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    match (lo, hi) {
        (1, 2) => 2,
        (2, 3) => 2,
        (3, 4) => 1,
        (4, 5) => 2,
        (1, 3) => 4,
        (2, 4) => 3,
        (3, 5) => 3,
        (1, 4) => 5,
        (2, 5) => 5,
        (1, 5) => 8,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_span_is_symmetric() {
        assert_eq!(natural_span(1, 5), natural_span(5, 1));
        assert_eq!(natural_span(1, 5), 8);
        assert_eq!(natural_span(3, 4), 1);
    }

    #[test]
    fn natural_span_same_finger_is_zero() {
        assert_eq!(natural_span(2, 2), 0);
    }

    #[test]
    fn profiles_match_calibrated_table() {
        let b = DifficultyProfile::beginner();
        assert_eq!(b.thumb_crossing_penalty, 80);
        let a = DifficultyProfile::advanced();
        assert_eq!(a.max_comfortable_span, 9);
        assert!(a.allow_thumb_on_black);
        assert!(!b.allow_thumb_on_black);
    }
}
