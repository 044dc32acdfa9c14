//! Top-level orchestration: recognize, plan, and merge both hands back
//! into original input order.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::merge::{self, MergedSegment};
use crate::note::Note;
use crate::pattern;
use crate::planner;

/// The complete fingering for one note, in original input order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FingeringAssignment {
    /// Original stream index.
    pub index: usize,
    /// Chosen finger, 1 (thumb) through 5 (pinky).
    pub finger: u8,
    /// Reason tags contributing to this choice, in rule order.
    pub reasons: Vec<String>,
}

/// The full result of running the pipeline over one note stream.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalysisResult {
    /// Per-note fingering, ordered by original input index.
    pub fingering: Vec<FingeringAssignment>,
    /// Recognized pattern segments from both hands, interleaved and
    /// ordered by original start index.
    pub segments: Vec<MergedSegmentView>,
    /// Sum of the right- and left-hand DP solution costs.
    pub total_cost: i64,
}

/// A [`MergedSegment`] flattened to data that serializes cleanly (no
/// `Copy`-only enum handles into the recognizer's internal tables).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MergedSegmentView {
    /// Right or left hand.
    pub hand: crate::note::Hand,
    /// First original index covered (inclusive).
    pub start: usize,
    /// Last original index covered (inclusive).
    pub end: usize,
    /// The recognized pattern type.
    pub pattern_type: pattern::PatternType,
    /// Pattern-specific attributes.
    pub detail: pattern::PatternDetail,
    /// Detector confidence in `[0, 1]`.
    pub confidence: f64,
}

impl From<MergedSegment> for MergedSegmentView {
    fn from(m: MergedSegment) -> Self {
        Self {
            hand: m.hand,
            start: m.start,
            end: m.end,
            pattern_type: m.segment.pattern_type,
            detail: m.segment.detail,
            confidence: m.segment.confidence,
        }
    }
}

/// Run the full pipeline: split by hand, recognize patterns, plan
/// fingerings, and merge both hands back into original input order.
#[must_use]
pub fn analyze(notes: &[Note], difficulty: Difficulty) -> AnalysisResult {
    let n = notes.len();
    let (right, left) = merge::split_by_hand(notes);
    let profile = difficulty.profile();

    let right_segments = pattern::recognize(&right.notes);
    let left_segments = pattern::recognize(&left.notes);

    let right_plan = planner::plan(
        &right.notes,
        crate::note::Hand::Right,
        &right_segments,
        &profile,
        difficulty,
    );
    let left_plan = planner::plan(
        &left.notes,
        crate::note::Hand::Left,
        &left_segments,
        &profile,
        difficulty,
    );

    let mut out_fingers = vec![0u8; n];
    let mut out_reasons: Vec<Vec<&'static str>> = vec![Vec::new(); n];
    merge::scatter_into(
        &right,
        &right_plan.fingers,
        &right_plan.reasons,
        &mut out_fingers,
        &mut out_reasons,
    );
    merge::scatter_into(
        &left,
        &left_plan.fingers,
        &left_plan.reasons,
        &mut out_fingers,
        &mut out_reasons,
    );

    let fingering = out_fingers
        .into_iter()
        .zip(out_reasons)
        .enumerate()
        .map(|(index, (finger, reasons))| FingeringAssignment {
            index,
            finger,
            reasons: reasons.into_iter().map(str::to_owned).collect(),
        })
        .collect();

    let segments = merge::merge_segments(&right, &right_segments, &left, &left_segments)
        .into_iter()
        .map(MergedSegmentView::from)
        .collect();

    AnalysisResult {
        fingering,
        segments,
        total_cost: right_plan.total_cost + left_plan.total_cost,
    }
}
