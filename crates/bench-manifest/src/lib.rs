//! Manifest handling for the ripenv benchmark runner
//!
//! Reads the dependency sections of a Pipfile and renders an equivalent
//! pyproject.toml, so that tools which do not understand Pipfiles can be
//! benchmarked against the same dependency set.

pub mod errors;
pub mod pipfile;
pub mod pyproject;
pub mod types;

pub use errors::ManifestError;
pub use pipfile::{parse_pipfile, read_pipfile};
pub use pyproject::{
    render_pyproject, translate, translate_with, write_pyproject, TranslateOptions,
    PYPROJECT_FILE_NAME,
};
pub use types::{Pipfile, Requirement, Section, WILDCARD};
