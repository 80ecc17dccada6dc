//! Line-oriented Pipfile reader
//!
//! This is a best-effort scanner, not a TOML parser: it only understands
//! `name = "value"` pairs inside `[packages]` and `[dev-packages]`.
//! Inline tables, multi-line values and escaped quotes are skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::ManifestError;
use crate::types::{Pipfile, Requirement, Section};

static ENTRY_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r#"^(\S+)\s*=\s*"([^"]*)""#).ok());

/// Parse the dependency sections out of Pipfile content
pub fn parse_pipfile(content: &str) -> Pipfile {
    let mut pipfile = Pipfile::default();
    let mut current: Option<Section> = None;

    for (index, line) in content.lines().enumerate() {
        let stripped = line.trim();

        if stripped.starts_with('[') {
            current = Section::from_header(stripped);
            continue;
        }

        let Some(section) = current else {
            continue;
        };

        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }

        match parse_entry(stripped) {
            Some(requirement) => pipfile.section_mut(section).push(requirement),
            None => debug!("Skipping unparseable Pipfile line {}: {}", index + 1, stripped),
        }
    }

    pipfile
}

/// Read and parse a Pipfile from disk
pub fn read_pipfile(path: &Path) -> Result<Pipfile, ManifestError> {
    debug!("Reading Pipfile: {:?}", path);
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_pipfile(&content))
}

fn parse_entry(line: &str) -> Option<Requirement> {
    let captures = ENTRY_RE.as_ref()?.captures(line)?;
    let name = captures.get(1)?.as_str();
    let value = captures.get(2)?.as_str();
    Some(Requirement::from_pipfile_value(name, value))
}
