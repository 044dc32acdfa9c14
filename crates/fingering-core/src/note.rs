//! The note stream the pipeline consumes.
//!
//! Notes are plain data: the core never mutates them and never owns the
//! decoding step that produced them (that lives in an external score
//! reader). Pitch is a raw MIDI number rather than a temperament-aware
//! abstraction — this pipeline only ever reasons about 12-TET semitone
//! distances on a physical keyboard.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which hand a note is played with, derived upstream from the staff number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Hand {
    /// Staff 1 / upper staff.
    Right,
    /// Staff 2 / lower staff.
    Left,
}

/// Ornamental and articulation flags carried on a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NoteFlags {
    /// Part of a vertical chord stack.
    pub is_chord: bool,
    /// Grace note (no independent rhythmic value).
    pub is_grace: bool,
    /// A rest; filtered out before the note reaches the core.
    pub is_rest: bool,
    /// Under a slur.
    pub has_slur: bool,
    /// Has a trill ornament.
    pub has_trill: bool,
    /// Has a mordent ornament.
    pub has_mordent: bool,
    /// Has a turn ornament.
    pub has_turn: bool,
    /// Carries an accent mark.
    pub has_accent: bool,
    /// Carries a staccato mark.
    pub has_staccato: bool,
}

impl NoteFlags {
    /// True if any ornament flag (trill, mordent, turn) is set.
    #[must_use]
    pub fn any_ornament(&self) -> bool {
        self.has_trill || self.has_mordent || self.has_turn
    }
}

/// A single pitched note in the input stream.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Note {
    /// MIDI pitch number, 0..=127 (middle C = 60).
    pub pitch: u8,
    /// Duration in abstract beat units; must be positive for a sounding note.
    pub duration: f64,
    /// Voice number (polyphonic voice tag within a staff).
    pub voice: u8,
    /// Staff number (1 = upper/RH, 2 = lower/LH).
    pub staff: u8,
    /// Hand derived from `staff` by the upstream decoder.
    pub hand: Hand,
    /// 1-based measure number.
    pub measure_number: u32,
    /// Beat position within the measure (non-negative).
    pub beat: f64,
    /// Ornamental/articulation flags.
    pub flags: NoteFlags,
}

impl Note {
    /// Construct a plain, unornamented note.
    #[must_use]
    pub fn new(pitch: u8, duration: f64, hand: Hand) -> Self {
        Self {
            pitch,
            duration,
            voice: 1,
            staff: match hand {
                Hand::Right => 1,
                Hand::Left => 2,
            },
            hand,
            measure_number: 1,
            beat: 0.0,
            flags: NoteFlags::default(),
        }
    }

    /// True if the pitch falls on a black key (pitch class in {1,3,6,8,10}).
    #[must_use]
    pub fn is_black_key(&self) -> bool {
        is_black_key(self.pitch)
    }
}

/// True if `pitch`'s pitch class is a black key (C#, D#, F#, G#, A#).
#[must_use]
pub fn is_black_key(pitch: u8) -> bool {
    matches!(pitch % 12, 1 | 3 | 6 | 8 | 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_keys_are_recognized() {
        assert!(is_black_key(61)); // C#4
        assert!(!is_black_key(60)); // C4
        assert!(is_black_key(70)); // A#4/Bb4
    }

    #[test]
    fn new_note_defaults_to_matching_staff() {
        let n = Note::new(60, 1.0, Hand::Left);
        assert_eq!(n.staff, 2);
        assert!(!n.flags.any_ornament());
    }
}
