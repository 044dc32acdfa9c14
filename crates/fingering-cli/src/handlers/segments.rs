use anyhow::Result;
use fingering_core::{pattern, Hand};

use crate::cli::SegmentsArgs;
use crate::format::OutputFormat;
use crate::input::load_notes;
use crate::reports::SegmentsReport;

pub fn handle_segments(format: OutputFormat, args: SegmentsArgs) -> Result<()> {
    let notes = load_notes(&args.notes)?;
    let right: Vec<_> = notes.iter().filter(|n| n.hand == Hand::Right).copied().collect();
    let left: Vec<_> = notes.iter().filter(|n| n.hand == Hand::Left).copied().collect();

    let right_segments = pattern::recognize(&right);
    let left_segments = pattern::recognize(&left);

    let report = SegmentsReport::from_segments(args.hand, &right_segments, &left_segments);
    format.emit(&report, SegmentsReport::render_text)
}
