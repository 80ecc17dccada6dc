use std::path::PathBuf;

use bench_config::BenchConfig;
use clap::Args;

use crate::errors::BenchError;
use crate::report::{load_results, render};

pub const DEFAULT_RESULTS_DIR: &str = "bench-results";

#[derive(Args, Debug, Clone)]
pub struct ReportCommand {
    /// Directory holding hyperfine JSON exports (default: results-dir from
    /// config, else ./bench-results)
    pub dir: Option<PathBuf>,
}

pub fn results_dir(config: &BenchConfig, flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| config.results_dir.clone().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_DIR))
}

pub fn handle_report(cmd: ReportCommand, config: &BenchConfig) -> Result<(), BenchError> {
    let dir = results_dir(config, cmd.dir);
    let results = load_results(&dir)?;
    print!("{}", render(&results));
    Ok(())
}
