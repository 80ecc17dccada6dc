//! pyproject.toml generation for tools that read PEP 621 metadata
//!
//! `[packages]` maps to `[project].dependencies` and `[dev-packages]` maps to
//! `[dependency-groups].dev`. Both lists are always written, even when empty.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::ManifestError;
use crate::pipfile::read_pipfile;
use crate::types::{Pipfile, Requirement};

pub const PYPROJECT_FILE_NAME: &str = "pyproject.toml";

/// Project metadata written alongside the translated dependency lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateOptions {
    pub project_name: String,
    pub version: String,
    pub requires_python: String,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            project_name: "bench-fixture".to_string(),
            version: "0.0.1".to_string(),
            requires_python: ">=3.12".to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct PyProject<'a> {
    project: Project<'a>,
    dependency_groups: DependencyGroups,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct Project<'a> {
    name: &'a str,
    version: &'a str,
    requires_python: &'a str,
    dependencies: Vec<String>,
}

#[derive(Serialize)]
struct DependencyGroups {
    dev: Vec<String>,
}

/// Render a parsed Pipfile as pyproject.toml text
pub fn render_pyproject(
    pipfile: &Pipfile,
    options: &TranslateOptions,
) -> Result<String, ManifestError> {
    let document = PyProject {
        project: Project {
            name: &options.project_name,
            version: &options.version,
            requires_python: &options.requires_python,
            dependencies: requirement_strings(&pipfile.packages),
        },
        dependency_groups: DependencyGroups {
            dev: requirement_strings(&pipfile.dev_packages),
        },
    };
    Ok(toml::to_string(&document)?)
}

/// Translate the Pipfile at `pipfile_path` into pyproject.toml text
pub fn translate(pipfile_path: &Path) -> Result<String, ManifestError> {
    translate_with(pipfile_path, &TranslateOptions::default())
}

/// Translate with explicit project metadata
pub fn translate_with(
    pipfile_path: &Path,
    options: &TranslateOptions,
) -> Result<String, ManifestError> {
    let pipfile = read_pipfile(pipfile_path)?;
    debug!(
        "Translated {} runtime and {} dev dependencies from {:?}",
        pipfile.packages.len(),
        pipfile.dev_packages.len(),
        pipfile_path
    );
    render_pyproject(&pipfile, options)
}

/// Translate a Pipfile and write `pyproject.toml` into `output_dir`
pub fn write_pyproject(
    pipfile_path: &Path,
    output_dir: &Path,
    options: &TranslateOptions,
) -> Result<PathBuf, ManifestError> {
    let content = translate_with(pipfile_path, options)?;
    let output_path = output_dir.join(PYPROJECT_FILE_NAME);
    fs::write(&output_path, content).map_err(|source| ManifestError::Write {
        path: output_path.clone(),
        source,
    })?;
    info!("pyproject.toml written to: {:?}", output_path);
    Ok(output_path)
}

fn requirement_strings(requirements: &[Requirement]) -> Vec<String> {
    requirements.iter().map(ToString::to_string).collect()
}
