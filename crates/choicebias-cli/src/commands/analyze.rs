use choicebias_core::{SelectionHistory, full_analysis};

use super::{CommandResult, Outcome, emit_json, load_config, load_records};

pub struct AnalyzeCommandConfig<'a> {
    pub input_path: &'a str,
    pub positions: Option<usize>,
    pub config_path: Option<&'a str>,
    pub output_path: Option<&'a str>,
    pub fail_on_bias: bool,
}

pub fn run(cfg: AnalyzeCommandConfig<'_>) -> CommandResult {
    let config = load_config(cfg.config_path, cfg.positions)?;
    let records = load_records(cfg.input_path)?;
    let history = SelectionHistory::new(records, config.position_count)?;
    if history.is_empty() {
        log::warn!("{} contains no records", cfg.input_path);
    }

    let report = full_analysis(&history, &config);
    emit_json(&report, cfg.output_path)?;

    if cfg.fail_on_bias && report.bias_detected() {
        return Ok(Outcome::BiasDetected);
    }
    Ok(Outcome::Clean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_history(
        lines: impl IntoIterator<Item = (usize, [&'static str; 4])>,
    ) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for (position, order) in lines {
            let record = serde_json::json!({
                "selected_category": order[position],
                "position": position,
                "presentation_order": order,
            });
            writeln!(file, "{record}").unwrap();
        }
        file
    }

    #[test]
    fn test_analyze_writes_report() {
        let input = write_history((0..20).map(|i| (i % 4, ["A", "B", "C", "D"])));
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");
        let outcome = run(AnalyzeCommandConfig {
            input_path: input.path().to_str().unwrap(),
            positions: None,
            config_path: None,
            output_path: out.to_str(),
            fail_on_bias: false,
        })
        .unwrap();
        assert_eq!(outcome, Outcome::Clean);

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(report["trial_count"], 20);
        assert_eq!(report["position_count"], 4);
        assert_eq!(report["position_bias"]["value"]["has_bias"], false);
    }

    #[test]
    fn test_fail_on_bias() {
        let input = write_history((0..20).map(|_| (0, ["A", "B", "C", "D"])));
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");
        let outcome = run(AnalyzeCommandConfig {
            input_path: input.path().to_str().unwrap(),
            positions: None,
            config_path: None,
            output_path: out.to_str(),
            fail_on_bias: true,
        })
        .unwrap();
        assert_eq!(outcome, Outcome::BiasDetected);
    }

    #[test]
    fn test_short_history_does_not_fail_on_bias() {
        // Each option twice at each slot, below the runs-test minimum.
        let trials = [(["A", "B"], 0), (["A", "B"], 1), (["B", "A"], 0), (["B", "A"], 1)];
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for _ in 0..2 {
            for (order, position) in trials {
                let record = serde_json::json!({
                    "selected_category": order[position],
                    "position": position,
                    "presentation_order": order,
                });
                writeln!(file, "{record}").unwrap();
            }
        }
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");
        let outcome = run(AnalyzeCommandConfig {
            input_path: file.path().to_str().unwrap(),
            positions: Some(2),
            config_path: None,
            output_path: out.to_str(),
            fail_on_bias: true,
        })
        .unwrap();
        assert_eq!(outcome, Outcome::Clean);

        let empty = tempfile::NamedTempFile::new().unwrap();
        let outcome = run(AnalyzeCommandConfig {
            input_path: empty.path().to_str().unwrap(),
            positions: None,
            config_path: None,
            output_path: out.to_str(),
            fail_on_bias: true,
        })
        .unwrap();
        assert_eq!(outcome, Outcome::Clean);
    }

    #[test]
    fn test_domain_violation_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"selected_category":"Z","position":0,"presentation_order":["A","B","C","D"]}}"#
        )
        .unwrap();
        let err = run(AnalyzeCommandConfig {
            input_path: file.path().to_str().unwrap(),
            positions: None,
            config_path: None,
            output_path: None,
            fail_on_bias: false,
        })
        .unwrap_err();
        assert!(err.to_string().contains("record 0"));
    }
}
