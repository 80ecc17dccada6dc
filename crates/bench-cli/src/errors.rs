//! Error types for the `bench-ripenv` command line

use bench_config::ConfigError;
use bench_manifest::ManifestError;
use bench_suite::SuiteError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while driving the timing harness
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Failed to run {binary}: {source}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create results directory {path}: {source}")]
    ResultsDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised while reading exported benchmark results
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No JSON result files found in {0}")]
    NoResults(PathBuf),
}

/// Top-level error for every `bench-ripenv` command
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Suite(#[from] SuiteError),

    #[error(transparent)]
    Harness(#[from] HarnessError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Unknown fixture '{name}'. Available fixtures: {available}")]
    UnknownFixture { name: String, available: String },

    #[error("No tools available to benchmark")]
    NoTools,

    #[error("Failed to prepare directory {path}: {source}")]
    SessionDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Initial lock for {tool} ({label}) failed (exit {})", exit_label(.status))]
    SetupFailed {
        tool: String,
        label: String,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

fn exit_label(status: &Option<i32>) -> String {
    status.map_or_else(|| "signal".to_string(), |code| code.to_string())
}
