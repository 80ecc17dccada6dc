//! Fixture Pipfiles: bundled into the binary, or read from a directory

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::BenchError;

/// Fixtures compiled into the binary, by name
pub const BUNDLED: &[(&str, &str)] = &[
    ("flask", include_str!("../fixtures/flask/Pipfile")),
    ("jupyter", include_str!("../fixtures/jupyter/Pipfile")),
    ("trio", include_str!("../fixtures/trio/Pipfile")),
];

const PIPFILE: &str = "Pipfile";

/// Where a fixture's Pipfile comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fixture {
    File(PathBuf),
    Bundled {
        name: &'static str,
        content: &'static str,
    },
}

impl Fixture {
    /// Path to a Pipfile on disk, writing bundled content under `session_dir`
    pub fn materialize(&self, session_dir: &Path) -> Result<PathBuf, BenchError> {
        match self {
            Self::File(path) => Ok(path.clone()),
            Self::Bundled { name, content } => {
                let dir = session_dir.join(format!("fixture-{name}"));
                fs::create_dir_all(&dir).map_err(|source| BenchError::SessionDir {
                    path: dir.clone(),
                    source,
                })?;
                let path = dir.join(PIPFILE);
                fs::write(&path, content)?;
                Ok(path)
            }
        }
    }
}

/// Fixture names under `dir` plus the bundled ones, sorted and deduplicated
pub fn available(dir: Option<&Path>) -> Vec<String> {
    let mut names: Vec<String> = BUNDLED.iter().map(|(name, _)| (*name).to_string()).collect();
    if let Some(entries) = dir.and_then(|dir| fs::read_dir(dir).ok()) {
        names.extend(
            entries
                .filter_map(Result::ok)
                .filter(|entry| entry.path().join(PIPFILE).is_file())
                .map(|entry| entry.file_name().to_string_lossy().into_owned()),
        );
    }
    names.sort();
    names.dedup();
    names
}

/// Resolve a fixture argument.
///
/// Accepts a path to a Pipfile, a directory holding one, the name of a
/// fixture under `dir`, or the name of a bundled fixture.
pub fn resolve(fixture: &str, dir: Option<&Path>) -> Result<Fixture, BenchError> {
    let as_path = Path::new(fixture);
    if as_path.is_file() {
        return Ok(Fixture::File(as_path.to_path_buf()));
    }
    if as_path.join(PIPFILE).is_file() {
        return Ok(Fixture::File(as_path.join(PIPFILE)));
    }

    if let Some(custom) = dir.map(|dir| dir.join(fixture).join(PIPFILE)) {
        if custom.is_file() {
            return Ok(Fixture::File(custom));
        }
    }

    if let Some((name, content)) = BUNDLED.iter().find(|(name, _)| *name == fixture) {
        return Ok(Fixture::Bundled {
            name: *name,
            content: *content,
        });
    }

    Err(BenchError::UnknownFixture {
        name: fixture.to_string(),
        available: available(dir).join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_fixtures_resolve_without_a_directory() {
        assert_eq!(available(None), vec!["flask", "jupyter", "trio"]);

        let trio = resolve("trio", Some(Path::new("/nonexistent/fixtures")));
        assert!(matches!(trio, Ok(Fixture::Bundled { name: "trio", .. })));
        let flask = resolve("flask", None);
        assert!(flask.is_ok_and(
            |fixture| matches!(fixture, Fixture::Bundled { content, .. } if content.contains("[packages]"))
        ));
    }

    #[test]
    fn test_materialize_writes_bundled_pipfile() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let Ok(fixture) = resolve("trio", None) else {
            panic!("trio should be bundled");
        };
        let Ok(path) = fixture.materialize(temp_dir.path()) else {
            panic!("bundled fixture should be written");
        };
        assert!(path.starts_with(temp_dir.path()));
        let content = fs::read_to_string(&path).unwrap_or_default();
        assert!(content.contains("trio"));
    }

    #[test]
    fn test_resolve_paths_and_unknown_names() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let custom = temp_dir.path().join("custom");
        assert!(fs::create_dir_all(&custom).is_ok());
        assert!(fs::write(custom.join(PIPFILE), "[packages]\n").is_ok());

        let by_dir = resolve(&custom.to_string_lossy(), None);
        assert!(by_dir.is_ok_and(|f| f == Fixture::File(custom.join(PIPFILE))));

        let by_file = resolve(&custom.join(PIPFILE).to_string_lossy(), None);
        assert!(by_file.is_ok());

        let by_name = resolve("custom", Some(temp_dir.path()));
        assert!(by_name.is_ok_and(|f| f == Fixture::File(custom.join(PIPFILE))));

        let unknown = resolve("django", Some(temp_dir.path()));
        assert!(matches!(
            unknown,
            Err(BenchError::UnknownFixture { ref available, .. })
                if available == "custom, flask, jupyter, trio"
        ));
    }

    #[test]
    fn test_fixture_directory_overrides_bundled_name() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let trio = temp_dir.path().join("trio");
        assert!(fs::create_dir_all(&trio).is_ok());
        assert!(fs::write(trio.join(PIPFILE), "[packages]\ntrio = \"<1\"\n").is_ok());

        let resolved = resolve("trio", Some(temp_dir.path()));
        assert!(resolved.is_ok_and(|f| f == Fixture::File(trio.join(PIPFILE))));
    }
}
