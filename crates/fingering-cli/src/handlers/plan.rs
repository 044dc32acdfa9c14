use anyhow::Result;
use fingering_core::analyze;

use crate::cli::PlanArgs;
use crate::format::OutputFormat;
use crate::input::load_notes;
use crate::reports::PlanReport;

pub fn handle_plan(format: OutputFormat, args: PlanArgs) -> Result<()> {
    let notes = load_notes(&args.notes)?;
    let result = analyze(&notes, args.difficulty.into());
    let report = PlanReport::from_analysis(&result);
    format.emit(&report, PlanReport::render_text)
}
