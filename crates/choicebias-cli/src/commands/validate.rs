use choicebias_core::SelectionHistory;
use serde::Serialize;

use super::{CommandResult, Outcome, emit_json, load_records};

pub struct ValidateCommandConfig<'a> {
    pub input_path: &'a str,
    pub positions: usize,
}

#[derive(Debug, Serialize)]
struct ValidationSummary {
    valid: bool,
    records: usize,
    position_count: usize,
}

pub fn run(cfg: ValidateCommandConfig<'_>) -> CommandResult {
    let records = load_records(cfg.input_path)?;
    let history = SelectionHistory::new(records, cfg.positions)?;
    emit_json(
        &ValidationSummary {
            valid: true,
            records: history.len(),
            position_count: history.position_count(),
        },
        None,
    )?;
    Ok(Outcome::Clean)
}
