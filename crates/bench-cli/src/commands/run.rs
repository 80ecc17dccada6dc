use std::path::{Path, PathBuf};

use bench_config::{find_binary, find_hyperfine, BenchConfig};
use bench_logger as logger;
use bench_suite::{suite_for, Operation, Suite, Tool};
use clap::Args;
use colored::Colorize;
use tracing::debug;

use crate::commands::report::results_dir;
use crate::commands::translate::project_options;
use crate::errors::BenchError;
use crate::fixtures;
use crate::harness::{HarnessConfig, Hyperfine, RunCount};
use crate::orchestrator::{self, SessionSummary};
use crate::setup;
use crate::GlobalOpts;

#[derive(Args, Debug, Clone, Default)]
pub struct RunCommand {
    /// Fixture name (trio, flask, jupyter) or path to a Pipfile
    pub fixture: String,

    /// Benchmark ripenv
    #[arg(long)]
    pub ripenv: bool,
    /// Benchmark pipenv
    #[arg(long)]
    pub pipenv: bool,
    /// Benchmark uv
    #[arg(long)]
    pub uv: bool,

    /// Path to a ripenv binary (repeatable for comparison)
    #[arg(long = "ripenv-path", value_name = "PATH")]
    pub ripenv_paths: Vec<PathBuf>,
    /// Path to a pipenv binary (repeatable for comparison)
    #[arg(long = "pipenv-path", value_name = "PATH")]
    pub pipenv_paths: Vec<PathBuf>,
    /// Path to a uv binary (repeatable for comparison)
    #[arg(long = "uv-path", value_name = "PATH")]
    pub uv_paths: Vec<PathBuf>,

    /// Benchmark(s) to run (repeatable, default: all but sync-noop)
    #[arg(short, long = "benchmark", value_name = "NAME")]
    pub benchmarks: Vec<Operation>,

    /// Warmup runs (default: 3)
    #[arg(long)]
    pub warmup: Option<u32>,
    /// Minimum runs (default: 10)
    #[arg(long, conflicts_with = "runs")]
    pub min_runs: Option<u32>,
    /// Exact number of runs
    #[arg(long)]
    pub runs: Option<u32>,

    /// Export results to <results-dir>/<benchmark>.json
    #[arg(long)]
    pub json: bool,
    /// Directory for JSON exports
    #[arg(long, value_name = "DIR")]
    pub results_dir: Option<PathBuf>,

    /// hyperfine binary to use instead of the one on PATH
    #[arg(long, value_name = "PATH")]
    pub hyperfine: Option<PathBuf>,
    /// Directory holding fixture subdirectories
    #[arg(long, value_name = "DIR")]
    pub fixtures_dir: Option<PathBuf>,
}

impl RunCommand {
    fn selected_tools(&self) -> Vec<Tool> {
        let flags = [
            (Tool::Ripenv, self.ripenv),
            (Tool::Pipenv, self.pipenv),
            (Tool::Uv, self.uv),
        ];
        if flags.iter().all(|(_, selected)| !selected) {
            return Tool::ALL.to_vec();
        }
        flags
            .into_iter()
            .filter_map(|(tool, selected)| selected.then_some(tool))
            .collect()
    }

    fn explicit_paths(&self, tool: Tool) -> &[PathBuf] {
        match tool {
            Tool::Ripenv => &self.ripenv_paths,
            Tool::Pipenv => &self.pipenv_paths,
            Tool::Uv => &self.uv_paths,
        }
    }

    fn operations(&self) -> Vec<Operation> {
        if self.benchmarks.is_empty() {
            Operation::DEFAULT.to_vec()
        } else {
            self.benchmarks.clone()
        }
    }

    fn harness_config(&self, config: &BenchConfig, opts: &GlobalOpts) -> HarnessConfig {
        // Flags outrank the config file as a pair, so --min-runs also
        // overrides a configured exact count.
        let runs = match (self.runs, self.min_runs, config.runs) {
            (Some(n), _, _) => RunCount::Exact(n),
            (None, Some(n), _) => RunCount::MinRuns(n),
            (None, None, Some(n)) => RunCount::Exact(n),
            (None, None, None) => RunCount::MinRuns(config.min_runs_or_default()),
        };
        HarnessConfig {
            warmup: self.warmup.unwrap_or_else(|| config.warmup_or_default()),
            runs,
            show_output: opts.verbosity_level() > 0,
            export_dir: self
                .json
                .then(|| results_dir(config, self.results_dir.clone())),
        }
    }
}

/// Binary paths for `tool`: explicit flags, then the config file, then PATH
fn resolve_binaries(tool: Tool, explicit: &[PathBuf], config: &BenchConfig) -> Vec<PathBuf> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }
    let configured = match tool {
        Tool::Ripenv => &config.tools.ripenv,
        Tool::Pipenv => &config.tools.pipenv,
        Tool::Uv => &config.tools.uv,
    };
    if !configured.is_empty() {
        return configured.iter().map(PathBuf::from).collect();
    }
    match find_binary(tool.as_str()) {
        Some(path) => {
            debug!("Found {} at {:?}", tool, path);
            vec![path]
        }
        None => {
            logger::warn(&format!("{} not found on PATH, skipping", tool));
            Vec::new()
        }
    }
}

pub fn handle_run(
    cmd: RunCommand,
    config: &BenchConfig,
    opts: &GlobalOpts,
) -> Result<SessionSummary, BenchError> {
    let fixtures_dir = cmd
        .fixtures_dir
        .clone()
        .or_else(|| config.fixtures_dir.clone().map(PathBuf::from));
    let fixture = fixtures::resolve(&cmd.fixture, fixtures_dir.as_deref())?;
    debug!("Using fixture {:?}", fixture);

    let binaries: Vec<(Tool, Vec<PathBuf>)> = cmd
        .selected_tools()
        .into_iter()
        .map(|tool| (tool, resolve_binaries(tool, cmd.explicit_paths(tool), config)))
        .filter(|(_, paths)| !paths.is_empty())
        .collect();

    let hyperfine_override = cmd
        .hyperfine
        .clone()
        .or_else(|| config.hyperfine_path.clone().map(PathBuf::from));
    let hyperfine_path = find_hyperfine(hyperfine_override.as_deref())?;

    if binaries.is_empty() {
        return Err(BenchError::NoTools);
    }

    let session = tempfile::Builder::new()
        .prefix("bench-ripenv-")
        .tempdir()?;
    logger::debug(&format!("Session directory: {}", session.path().display()));
    let pipfile = fixture.materialize(session.path())?;

    let project = project_options(config, None, None);
    let suites = seed_suites(&binaries, session.path(), &pipfile, &project)?;

    let operations = cmd.operations();
    print_session_header(&cmd.fixture, &suites, &operations);

    let mut hyperfine = Hyperfine::new(hyperfine_path, cmd.harness_config(config, opts));
    let summary = orchestrator::run(&operations, &suites, &mut hyperfine)?;
    print_session_summary(&summary);
    Ok(summary)
}

fn seed_suites(
    binaries: &[(Tool, Vec<PathBuf>)],
    session_dir: &Path,
    pipfile: &Path,
    project: &bench_manifest::TranslateOptions,
) -> Result<Vec<Box<dyn Suite>>, BenchError> {
    let mut suites = Vec::new();
    for (tool, paths) in binaries {
        for context in setup::plan_contexts(*tool, paths, session_dir) {
            let suite = suite_for(*tool, context, project);
            setup::seed(suite.as_ref(), pipfile)?;
            suites.push(suite);
        }
    }
    Ok(suites)
}

fn print_session_header(fixture: &str, suites: &[Box<dyn Suite>], operations: &[Operation]) {
    let tools: Vec<String> = suites.iter().map(|suite| suite.display_name()).collect();
    let names: Vec<&str> = operations.iter().map(|op| op.as_str()).collect();
    println!("\n{} {}", "Benchmarking fixture:".bold(), fixture);
    println!("{} {}", "Tools:".bold(), tools.join(", "));
    println!("{} {}", "Benchmarks:".bold(), names.join(", "));
}

fn print_session_summary(summary: &SessionSummary) {
    for operation in &summary.skipped {
        logger::info(&format!("Skipped {}: no selected tool supports it", operation));
    }
    for outcome in &summary.outcomes {
        if let Some(export) = outcome.export.as_ref().filter(|p| p.exists()) {
            logger::info(&format!("{} results: {}", outcome.operation, export.display()));
        }
    }
    let failed = summary.failed().count();
    if failed == 0 {
        logger::success(&format!("Completed {} benchmark(s)", summary.outcomes.len()));
    } else {
        logger::warn(&format!(
            "{} of {} benchmark(s) reported a failure",
            failed,
            summary.outcomes.len()
        ));
    }
}
