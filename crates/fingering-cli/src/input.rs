//! JSON note-file loading: a stand-in for the score decoder, which lives
//! upstream of this crate as a separate collaborator.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use fingering_core::{Hand, Note, NoteFlags};
use serde::Deserialize;

/// On-disk representation of one note. Only `pitch`, `duration`, and
/// `hand` are required; everything else defaults the way a plain melody
/// or bass line would.
#[derive(Debug, Deserialize)]
struct InputNote {
    pitch: u8,
    duration: f64,
    hand: InputHand,
    #[serde(default = "default_voice")]
    voice: u8,
    #[serde(default)]
    measure_number: Option<u32>,
    #[serde(default)]
    beat: f64,
    #[serde(default)]
    flags: NoteFlags,
}

fn default_voice() -> u8 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum InputHand {
    Rh,
    Lh,
}

impl From<InputHand> for Hand {
    fn from(value: InputHand) -> Self {
        match value {
            InputHand::Rh => Hand::Right,
            InputHand::Lh => Hand::Left,
        }
    }
}

/// Read a JSON array of notes from `path` into the core's `Note` type.
pub fn load_notes(path: &Path) -> Result<Vec<Note>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read note file {}", path.display()))?;
    let input: Vec<InputNote> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse note file {}", path.display()))?;

    Ok(input
        .into_iter()
        .map(|n| {
            let hand: Hand = n.hand.into();
            let mut note = Note::new(n.pitch, n.duration, hand);
            note.voice = n.voice;
            note.measure_number = n.measure_number.unwrap_or(1);
            note.beat = n.beat;
            note.flags = n.flags;
            note
        })
        .collect())
}
