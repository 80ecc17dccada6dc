//! bench-ripenv library - expose modules for testing
//!
//! Session setup, the hyperfine harness and the orchestrator live here so
//! they can be exercised without going through the binary.

pub mod commands;
pub mod common;
pub mod errors;
pub mod fixtures;
pub mod harness;
pub mod orchestrator;
pub mod report;
pub mod setup;

pub use common::GlobalOpts;
