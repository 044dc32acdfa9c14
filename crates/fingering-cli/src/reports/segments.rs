use std::fmt::Write as FmtWrite;

use fingering_core::PatternSegment;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SegmentEntry {
    pub start: usize,
    pub end: usize,
    pub pattern_type: String,
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
pub struct SegmentsReport {
    pub right_hand: Option<Vec<SegmentEntry>>,
    pub left_hand: Option<Vec<SegmentEntry>>,
}

fn to_entries(segments: &[PatternSegment]) -> Vec<SegmentEntry> {
    segments
        .iter()
        .map(|s| SegmentEntry {
            start: s.start,
            end: s.end,
            pattern_type: format!("{:?}", s.pattern_type),
            confidence: s.confidence,
        })
        .collect()
}

impl SegmentsReport {
    #[must_use]
    pub fn from_segments(
        hand: crate::cli::HandFilter,
        right: &[PatternSegment],
        left: &[PatternSegment],
    ) -> Self {
        use crate::cli::HandFilter;
        Self {
            right_hand: matches!(hand, HandFilter::Rh | HandFilter::Both)
                .then(|| to_entries(right)),
            left_hand: matches!(hand, HandFilter::Lh | HandFilter::Both).then(|| to_entries(left)),
        }
    }

    #[must_use]
    pub fn render_text(report: &SegmentsReport) -> String {
        let mut out = String::new();
        if let Some(segments) = &report.right_hand {
            let _ = writeln!(&mut out, "Right hand:");
            render_hand(&mut out, segments);
        }
        if let Some(segments) = &report.left_hand {
            let _ = writeln!(&mut out, "Left hand:");
            render_hand(&mut out, segments);
        }
        out
    }
}

fn render_hand(out: &mut String, segments: &[SegmentEntry]) {
    if segments.is_empty() {
        let _ = writeln!(out, "  (no notes)");
        return;
    }
    for seg in segments {
        let _ = writeln!(
            out,
            "  {}-{} {} (confidence {:.2})",
            seg.start, seg.end, seg.pattern_type, seg.confidence
        );
    }
}
