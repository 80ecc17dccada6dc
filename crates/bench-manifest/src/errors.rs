use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing manifests
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize pyproject.toml: {0}")]
    Serialize(#[from] toml::ser::Error),
}
