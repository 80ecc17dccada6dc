use std::fs;
use std::path::PathBuf;

use bench_config::BenchConfig;
use bench_logger as logger;
use bench_manifest::{translate_with, TranslateOptions};
use clap::Args;

use crate::errors::BenchError;

#[derive(Args, Debug, Clone)]
pub struct TranslateCommand {
    /// Pipfile to translate
    pub pipfile: PathBuf,
    /// Write the pyproject.toml here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Project name written into [project]
    #[arg(long)]
    pub name: Option<String>,
    /// Value of requires-python
    #[arg(long)]
    pub requires_python: Option<String>,
}

pub fn project_options(
    config: &BenchConfig,
    name: Option<String>,
    requires_python: Option<String>,
) -> TranslateOptions {
    TranslateOptions {
        project_name: name.unwrap_or_else(|| config.project_name_or_default()),
        requires_python: requires_python.unwrap_or_else(|| config.requires_python_or_default()),
        ..TranslateOptions::default()
    }
}

pub fn handle_translate(cmd: TranslateCommand, config: &BenchConfig) -> Result<(), BenchError> {
    let options = project_options(config, cmd.name, cmd.requires_python);
    let pyproject = translate_with(&cmd.pipfile, &options)?;

    match cmd.output {
        Some(path) => {
            fs::write(&path, pyproject)?;
            logger::success(&format!("Wrote {}", path.display()));
        }
        None => print!("{}", pyproject),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let config = BenchConfig {
            project_name: Some("from-config".to_string()),
            requires_python: Some(">=3.10".to_string()),
            ..Default::default()
        };
        let options = project_options(&config, None, Some(">=3.13".to_string()));
        assert_eq!(options.project_name, "from-config");
        assert_eq!(options.requires_python, ">=3.13");
        assert_eq!(options.version, "0.0.1");
    }
}
