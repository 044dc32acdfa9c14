//! Two-stage piano fingering pipeline: a windowed pattern recognizer feeds
//! context into a per-hand dynamic-program fingering planner, and a merger
//! interleaves both hands' solutions back into original input order.
//!
//! The crate is pure computation over an in-memory [`note::Note`] stream —
//! it owns no I/O, file formats, or score decoding; those live upstream of
//! [`pipeline::analyze`], the single entry point most callers need.

#![forbid(unsafe_code)]

pub mod difficulty;
pub mod features;
pub mod geometry;
pub mod merge;
pub mod note;
pub mod pattern;
pub mod pipeline;
pub mod planner;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use note::{Hand, Note, NoteFlags};
pub use pattern::{PatternDetail, PatternSegment, PatternType};
pub use pipeline::{analyze, AnalysisResult, FingeringAssignment, MergedSegmentView};
