use bench_manifest::ManifestError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing a suite's working directory or spawning
/// one of its commands. Building a `Command` never fails.
#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("Unknown benchmark '{0}'. Expected one of: {1}")]
    UnknownOperation(String, String),

    #[error("Unknown tool '{0}'. Expected one of: ripenv, pipenv, uv")]
    UnknownTool(String),

    #[error("Command '{0}' has an empty argument vector")]
    EmptyInvocation(String),

    #[error("Failed to copy manifest {from} to {to}: {source}")]
    CopyManifest {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}
