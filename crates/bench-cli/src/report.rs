//! Summaries of exported hyperfine results

use std::fs;
use std::path::{Path, PathBuf};

use bench_suite::Tool;
use colored::{Color, Colorize};
use serde::Deserialize;

use crate::errors::ReportError;

const BAR_WIDTH: usize = 40;
const BAR_CHAR: char = '\u{2588}';

/// Subset of hyperfine's `--export-json` document that the report reads
#[derive(Debug, Deserialize)]
struct HyperfineExport {
    results: Vec<ResultEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultEntry {
    pub command: String,
    pub mean: f64,
    /// hyperfine writes `null` when only one run was measured
    #[serde(default)]
    pub stddev: Option<f64>,
}

/// Results of one operation, named after the export file's stem
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResults {
    pub operation: String,
    pub entries: Vec<ResultEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFamily {
    Ripenv,
    Pipenv,
    Uv,
    Other,
}

impl ToolFamily {
    /// Classify a command name by its leading word, which suites set to the tool name
    pub fn of(command_name: &str) -> Self {
        let leading = command_name.split_whitespace().next().unwrap_or_default();
        match leading.parse::<Tool>() {
            Ok(Tool::Ripenv) => Self::Ripenv,
            Ok(Tool::Pipenv) => Self::Pipenv,
            Ok(Tool::Uv) => Self::Uv,
            Err(_) => Self::Other,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Ripenv => Color::Blue,
            Self::Pipenv => Color::Yellow,
            Self::Uv => Color::Green,
            Self::Other => Color::White,
        }
    }
}

pub fn parse_export(path: &Path) -> Result<Vec<ResultEntry>, ReportError> {
    let content = fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let export: HyperfineExport =
        serde_json::from_str(&content).map_err(|source| ReportError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(export.results)
}

/// Load every `*.json` export in `dir`, sorted by file name
pub fn load_results(dir: &Path) -> Result<Vec<OperationResults>, ReportError> {
    let read_error = |source| ReportError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(read_error)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(ReportError::NoResults(dir.to_path_buf()));
    }

    files
        .iter()
        .map(|path| {
            let operation = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(OperationResults {
                operation,
                entries: parse_export(path)?,
            })
        })
        .collect()
}

/// Render a grouped table of mean ± stddev with bars scaled to the slowest
/// mean across all operations.
pub fn render(results: &[OperationResults]) -> String {
    let slowest = results
        .iter()
        .flat_map(|group| group.entries.iter().map(|entry| entry.mean))
        .fold(0.0_f64, f64::max);
    let name_width = results
        .iter()
        .flat_map(|group| group.entries.iter().map(|entry| entry.command.len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for group in results {
        out.push_str(&format!("{}\n", group.operation.bold()));
        for entry in &group.entries {
            let family = ToolFamily::of(&entry.command);
            let bar_len = if slowest > 0.0 {
                ((entry.mean / slowest) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let bar = BAR_CHAR.to_string().repeat(bar_len.max(1));
            out.push_str(&format!(
                "  {:<width$}  {}  {}\n",
                entry.command,
                format_timing(entry),
                bar.color(family.color()),
                width = name_width
            ));
        }
        out.push('\n');
    }
    out
}

fn format_timing(entry: &ResultEntry) -> String {
    match entry.stddev {
        Some(stddev) => format!("{:>8.3} s ± {:.3} s", entry.mean, stddev),
        None => format!("{:>8.3} s", entry.mean),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LOCK_COLD: &str = r#"{
      "results": [
        {"command": "ripenv lock-cold (ripenv)", "mean": 2.0, "stddev": 0.1, "times": [1.9, 2.1]},
        {"command": "uv lock-cold (uv)", "mean": 0.5, "stddev": null}
      ]
    }"#;

    #[test]
    fn test_tool_family_palette() {
        assert_eq!(ToolFamily::of("ripenv lock-cold (ripenv-0)"), ToolFamily::Ripenv);
        assert_eq!(ToolFamily::of("pipenv sync-warm (pipenv)"), ToolFamily::Pipenv);
        assert_eq!(ToolFamily::of("uv install-cold (uv)"), ToolFamily::Uv);
        assert_eq!(ToolFamily::of("poetry lock"), ToolFamily::Other);
    }

    #[test]
    fn test_tool_family_ignores_labels() {
        assert_eq!(ToolFamily::of("ripenv lock-warm (ruvector)"), ToolFamily::Ripenv);
        assert_eq!(ToolFamily::of("pipenv lock-warm (ripenv-fork)"), ToolFamily::Pipenv);
        assert_eq!(ToolFamily::of("ruvector lock"), ToolFamily::Other);
        assert_eq!(ToolFamily::of(""), ToolFamily::Other);
        assert_eq!(ToolFamily::Ripenv.color(), Color::Blue);
    }

    #[test]
    fn test_load_results_sorted_by_stem() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        assert!(fs::write(temp_dir.path().join("sync-warm.json"), r#"{"results": []}"#).is_ok());
        assert!(fs::write(temp_dir.path().join("lock-cold.json"), LOCK_COLD).is_ok());
        assert!(fs::write(temp_dir.path().join("notes.txt"), "ignored").is_ok());

        let Ok(results) = load_results(temp_dir.path()) else {
            panic!("results should load");
        };
        let operations: Vec<&str> = results.iter().map(|r| r.operation.as_str()).collect();
        assert_eq!(operations, vec!["lock-cold", "sync-warm"]);
        assert_eq!(results[0].entries.len(), 2);
        assert_eq!(results[0].entries[1].stddev, None);
    }

    #[test]
    fn test_empty_directory_and_bad_json() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        assert!(matches!(
            load_results(temp_dir.path()),
            Err(ReportError::NoResults(_))
        ));

        assert!(fs::write(temp_dir.path().join("lock-warm.json"), "{not json").is_ok());
        assert!(matches!(
            load_results(temp_dir.path()),
            Err(ReportError::Parse { .. })
        ));
    }

    #[test]
    fn test_render_scales_bars_to_slowest() {
        colored::control::set_override(false);
        let results = vec![OperationResults {
            operation: "lock-cold".to_string(),
            entries: vec![
                ResultEntry {
                    command: "ripenv lock-cold (ripenv)".to_string(),
                    mean: 2.0,
                    stddev: Some(0.1),
                },
                ResultEntry {
                    command: "uv lock-cold (uv)".to_string(),
                    mean: 0.5,
                    stddev: None,
                },
            ],
        }];
        let table = render(&results);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "lock-cold");
        assert!(lines[1].contains("2.000 s ± 0.100 s"));
        assert_eq!(lines[1].matches(BAR_CHAR).count(), BAR_WIDTH);
        assert_eq!(lines[2].matches(BAR_CHAR).count(), BAR_WIDTH / 4);
        assert!(lines[2].starts_with("  uv lock-cold (uv)       "));
    }
}
