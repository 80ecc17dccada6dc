//! The timing harness seam and its hyperfine implementation

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as ProcessCommand;

use bench_logger as logger;
use bench_suite::{command::join, Command, Operation};
use tracing::debug;

use crate::errors::HarnessError;

/// Placeholder prepare for commands that need none, so every command in a
/// group keeps its own `--prepare` slot.
const NO_PREPARE: &str = "true";

/// Commands for one operation, timed against each other in one harness run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonGroup {
    pub operation: Operation,
    pub commands: Vec<Command>,
}

impl ComparisonGroup {
    pub fn label(&self) -> &'static str {
        self.operation.as_str()
    }

    fn any_prepare(&self) -> bool {
        self.commands.iter().any(|cmd| cmd.prepare.is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunCount {
    /// Let the harness decide, but never fewer than this
    MinRuns(u32),
    Exact(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub warmup: u32,
    pub runs: RunCount,
    pub show_output: bool,
    /// Where `<operation>.json` exports go; `None` disables export
    pub export_dir: Option<PathBuf>,
}

/// What happened to one submitted group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOutcome {
    pub operation: Operation,
    pub commands: usize,
    pub exit_code: Option<i32>,
    pub export: Option<PathBuf>,
}

impl GroupOutcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a comparison group to completion before returning
pub trait Harness {
    fn run_group(&mut self, group: &ComparisonGroup) -> Result<GroupOutcome, HarnessError>;
}

pub struct Hyperfine {
    binary: PathBuf,
    config: HarnessConfig,
}

impl Hyperfine {
    pub fn new(binary: impl Into<PathBuf>, config: HarnessConfig) -> Self {
        Self {
            binary: binary.into(),
            config,
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn export_path(&self, operation: Operation) -> Option<PathBuf> {
        self.config
            .export_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", operation)))
    }

    /// Arguments passed to hyperfine for `group`, excluding the binary
    pub fn build_args(&self, group: &ComparisonGroup) -> Vec<String> {
        let mut args = vec!["--warmup".to_string(), self.config.warmup.to_string()];
        match self.config.runs {
            RunCount::MinRuns(n) => {
                args.push("--min-runs".to_string());
                args.push(n.to_string());
            }
            RunCount::Exact(n) => {
                args.push("--runs".to_string());
                args.push(n.to_string());
            }
        }
        if self.config.show_output {
            args.push("--show-output".to_string());
        }
        if let Some(path) = self.export_path(group.operation) {
            args.push("--export-json".to_string());
            args.push(path.to_string_lossy().into_owned());
        }

        // hyperfine pairs the i-th --prepare with the i-th command
        if group.any_prepare() {
            for cmd in &group.commands {
                args.push("--prepare".to_string());
                args.push(cmd.prepare.clone().unwrap_or_else(|| NO_PREPARE.to_string()));
            }
        }
        for cmd in &group.commands {
            args.push("--command-name".to_string());
            args.push(cmd.name.clone());
        }
        args.extend(group.commands.iter().map(Command::shell_line));
        args
    }
}

impl Harness for Hyperfine {
    fn run_group(&mut self, group: &ComparisonGroup) -> Result<GroupOutcome, HarnessError> {
        if let Some(dir) = &self.config.export_dir {
            fs::create_dir_all(dir).map_err(|source| HarnessError::ResultsDir {
                path: dir.clone(),
                source,
            })?;
        }

        let args = self.build_args(group);
        debug!(
            "Running: {} {}",
            self.binary.display(),
            join(&args)
        );
        logger::step(&format!(
            "hyperfine {} with {} command(s)",
            group.label(),
            group.commands.len()
        ));

        let status = ProcessCommand::new(&self.binary)
            .args(&args)
            .status()
            .map_err(|source| HarnessError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        Ok(GroupOutcome {
            operation: group.operation,
            commands: group.commands.len(),
            exit_code: status.code(),
            export: self.export_path(group.operation),
        })
    }
}
