use std::fmt::Write as FmtWrite;

use fingering_core::AnalysisResult;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NoteFingering {
    pub index: usize,
    pub finger: u8,
    pub reasons: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SegmentSummary {
    pub hand: String,
    pub start: usize,
    pub end: usize,
    pub pattern_type: String,
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub note_count: usize,
    pub fingerings: Vec<NoteFingering>,
    pub segments: Vec<SegmentSummary>,
    pub total_cost: i64,
}

impl PlanReport {
    #[must_use]
    pub fn from_analysis(result: &AnalysisResult) -> Self {
        let fingerings = result
            .fingering
            .iter()
            .map(|f| NoteFingering {
                index: f.index,
                finger: f.finger,
                reasons: f.reasons.clone(),
            })
            .collect();

        let segments = result
            .segments
            .iter()
            .map(|s| SegmentSummary {
                hand: format!("{:?}", s.hand),
                start: s.start,
                end: s.end,
                pattern_type: format!("{:?}", s.pattern_type),
                confidence: s.confidence,
            })
            .collect();

        Self {
            note_count: result.fingering.len(),
            fingerings,
            segments,
            total_cost: result.total_cost,
        }
    }

    #[must_use]
    pub fn render_text(report: &PlanReport) -> String {
        let mut out = String::new();
        let _ = writeln!(
            &mut out,
            "Plan: {} notes, total cost {}",
            report.note_count, report.total_cost
        );
        let _ = writeln!(&mut out, "\nSegments:");
        for seg in &report.segments {
            let _ = writeln!(
                &mut out,
                "  [{}] {}-{} {} (confidence {:.2})",
                seg.hand, seg.start, seg.end, seg.pattern_type, seg.confidence
            );
        }
        let _ = writeln!(&mut out, "\nFingerings:");
        for f in &report.fingerings {
            let reasons = if f.reasons.is_empty() {
                String::from("-")
            } else {
                f.reasons.join(", ")
            };
            let _ = writeln!(&mut out, "  {:>4}: finger {} ({reasons})", f.index, f.finger);
        }
        out
    }
}
