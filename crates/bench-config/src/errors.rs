use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration or locating tools
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine the user configuration directory")]
    NoConfigDir,

    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("hyperfine is required but was not found. Install it with `cargo install hyperfine` or `brew install hyperfine`")]
    HyperfineNotFound,

    #[error("Configured hyperfine path does not exist: {0}")]
    HyperfineMissing(PathBuf),
}
