pub mod analyze;
pub mod validate;

use std::error::Error;
use std::fs;
use std::path::Path;

use choicebias_core::{AnalysisConfig, SelectionRecord};

pub type CommandResult = Result<Outcome, Box<dyn Error>>;

/// How a successful command should exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    BiasDetected,
}

/// Read records from a JSON array, or from JSON lines when the file does not
/// start with `[`. Blank lines are skipped.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<SelectionRecord>, Box<dyn Error>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    parse_records(&text).map_err(|e| format!("{}: {e}", path.display()).into())
}

fn parse_records(text: &str) -> Result<Vec<SelectionRecord>, Box<dyn Error>> {
    if text.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(text)?);
    }
    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: SelectionRecord =
            serde_json::from_str(line).map_err(|e| format!("line {}: {e}", i + 1))?;
        records.push(record);
    }
    Ok(records)
}

/// Load thresholds from `path` (or defaults) and apply the slot override.
pub fn load_config(
    path: Option<&str>,
    positions: Option<usize>,
) -> Result<AnalysisConfig, Box<dyn Error>> {
    let mut config = match path {
        Some(p) => {
            let text = fs::read_to_string(p).map_err(|e| format!("failed to read {p}: {e}"))?;
            serde_json::from_str::<AnalysisConfig>(&text)
                .map_err(|e| format!("invalid config {p}: {e}"))?
        }
        None => AnalysisConfig::default(),
    };
    if let Some(n) = positions {
        config = config.with_position_count(n);
    }
    config.validate()?;
    log::debug!("analysis config: {config:?}");
    Ok(config)
}

/// Write pretty JSON to `path`, or stdout when `None`.
pub fn emit_json<T: serde::Serialize>(
    value: &T,
    path: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(p) => {
            fs::write(p, json).map_err(|e| format!("failed to write {p}: {e}"))?;
            log::info!("report written to {p}");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RECORD_A: &str =
        r#"{"selected_category":"A","position":0,"presentation_order":["A","B","C","D"]}"#;
    const RECORD_B: &str =
        r#"{"selected_category":"B","position":2,"presentation_order":["C","D","B","A"]}"#;

    // -----------------------------------------------------------------------
    // record loading
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_json_array() {
        let text = format!("[{RECORD_A}, {RECORD_B}]");
        let records = parse_records(&text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].position, 2);
    }

    #[test]
    fn test_parse_json_lines_skips_blanks() {
        let text = format!("{RECORD_A}\n\n{RECORD_B}\n");
        let records = parse_records(&text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].selected_category, "A");
    }

    #[test]
    fn test_parse_json_lines_reports_line() {
        let text = format!("{RECORD_A}\nnot json\n");
        let err = parse_records(&text).unwrap_err();
        assert!(err.to_string().starts_with("line 2"));
    }

    #[test]
    fn test_load_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{RECORD_A}").unwrap();
        writeln!(file, "{RECORD_B}").unwrap();
        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_load_records_missing_file() {
        let err = load_records("/nonexistent/records.json").unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    // -----------------------------------------------------------------------
    // config loading
    // -----------------------------------------------------------------------

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(None, None).unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_load_config_positions_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"position_count": 6, "edge_threshold": 0.2}}"#).unwrap();
        let path = file.path().to_str().unwrap();
        let config = load_config(Some(path), Some(5)).unwrap();
        assert_eq!(config.position_count, 5);
        assert!((config.edge_threshold - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_load_config_rejects_zero_positions() {
        assert!(load_config(None, Some(0)).is_err());
    }

    #[test]
    fn test_emit_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let path = path.to_str().unwrap();
        emit_json(&serde_json::json!({"ok": true}), Some(path)).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["ok"], true);
    }
}
