//! Configuration for `bench-ripenv`
//!
//! Holds the optional TOML config file and the helpers that locate the
//! benchmarked tools and the `hyperfine` harness.

pub mod config;
pub mod discovery;
pub mod errors;

pub use config::{BenchConfig, ToolPaths, CONFIG_ENV_VAR, DEFAULT_MIN_RUNS, DEFAULT_WARMUP};
pub use discovery::{find_binary, find_hyperfine};
pub use errors::ConfigError;
