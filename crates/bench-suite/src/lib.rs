//! Benchmark command generation
//!
//! Each [`Suite`] turns an [`Operation`] into a [`Command`]: a named, timed
//! invocation plus the untimed `prepare` step that clears whatever state the
//! operation must start without. Building a command never touches the disk;
//! only [`Suite::seed_manifest`] and running the commands do.

pub mod command;
pub mod errors;
pub mod operation;
pub mod pipenv;
pub mod ripenv;
pub mod suite;
pub mod uv;

use bench_manifest::TranslateOptions;

pub use command::{Command, Invocation};
pub use errors::SuiteError;
pub use operation::{CacheTemperature, Operation, Step};
pub use pipenv::PipenvSuite;
pub use ripenv::RipenvSuite;
pub use suite::{StateLayout, Suite, SuiteContext, Tool};
pub use uv::UvSuite;

/// Build the suite for `tool` bound to `context`. `project` only matters
/// to tools that read a generated pyproject.toml.
pub fn suite_for(tool: Tool, context: SuiteContext, project: &TranslateOptions) -> Box<dyn Suite> {
    match tool {
        Tool::Ripenv => Box::new(RipenvSuite::new(context)),
        Tool::Pipenv => Box::new(PipenvSuite::new(context)),
        Tool::Uv => Box::new(UvSuite::new(context).with_project(project.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::Path;

    fn contexts(root: &Path) -> Vec<(Tool, SuiteContext)> {
        Tool::ALL
            .into_iter()
            .map(|tool| {
                let context = SuiteContext::new(
                    tool.as_str(),
                    tool.as_str(),
                    root.join(tool.as_str()),
                    root.join(format!("{}-cache", tool)),
                );
                (tool, context)
            })
            .collect()
    }

    #[test]
    fn test_factories_are_deterministic() {
        for (tool, context) in contexts(Path::new("/tmp/session")) {
            let first = suite_for(tool, context.clone(), &TranslateOptions::default());
            let second = suite_for(tool, context, &TranslateOptions::default());
            for op in Operation::ALL {
                assert_eq!(first.command(op), second.command(op), "{tool} {op}");
                assert_eq!(first.command(op), first.command(op), "{tool} {op}");
            }
        }
    }

    #[test]
    fn test_names_are_unique_within_a_group() {
        for op in Operation::ALL {
            let names: Vec<String> = contexts(Path::new("/tmp/session"))
                .into_iter()
                .filter_map(|(tool, context)| {
                    suite_for(tool, context, &TranslateOptions::default()).command(op)
                })
                .map(|cmd| cmd.name)
                .collect();
            let unique: HashSet<&String> = names.iter().collect();
            assert_eq!(unique.len(), names.len(), "{op}");
            assert!(names.iter().all(|name| name.contains(op.as_str())));
        }
    }

    #[test]
    fn test_building_commands_touches_nothing() {
        let Ok(temp_dir) = tempfile::TempDir::new() else {
            return;
        };
        for (tool, context) in contexts(temp_dir.path()) {
            let suite = suite_for(tool, context, &TranslateOptions::default());
            for op in suite.operations() {
                let _ = suite.command(op);
            }
            let _ = suite.seed_command();
        }
        let entries = std::fs::read_dir(temp_dir.path()).map(|dir| dir.count());
        assert!(entries.is_ok_and(|count| count == 0));
    }

    /// Fill a suite's directories with every artifact an operation may
    /// have to clear, plus an unrelated file that must survive.
    #[cfg(unix)]
    fn populate(layout: &StateLayout, working_dir: &Path) -> bool {
        use std::fs;
        fs::create_dir_all(working_dir).is_ok()
            && fs::write(&layout.lockfile, "lock").is_ok()
            && fs::create_dir_all(layout.venv.join("bin")).is_ok()
            && fs::write(layout.venv.join("bin").join("python"), "").is_ok()
            && fs::create_dir_all(layout.cache_dir.join("wheels")).is_ok()
            && fs::write(working_dir.join("Pipfile"), "[packages]\n").is_ok()
    }

    #[test]
    #[cfg(unix)]
    fn test_prepare_leaves_the_implied_state() {
        let Ok(temp_dir) = tempfile::TempDir::new() else {
            return;
        };
        for (tool, context) in contexts(temp_dir.path()) {
            let working_dir = context.working_dir.clone();
            let suite = suite_for(tool, context, &TranslateOptions::default());
            let layout = suite.layout();

            for op in suite.operations() {
                // Run twice: once from a full state, once from an already
                // cleared one.
                assert!(populate(&layout, &working_dir), "{tool} {op} populate");
                for _ in 0..2 {
                    let Some(cmd) = suite.command(op) else {
                        panic!("{tool} should support {op}");
                    };
                    if let Some(prepare) = &cmd.prepare {
                        let status = std::process::Command::new("sh")
                            .arg("-c")
                            .arg(prepare)
                            .status();
                        assert!(status.is_ok_and(|s| s.success()), "{tool} {op}");
                    }
                    assert_eq!(layout.lockfile.exists(), !op.clears_lockfile(), "{tool} {op}");
                    assert_eq!(layout.venv.exists(), !op.clears_venv(), "{tool} {op}");
                    assert_eq!(layout.cache_dir.exists(), !op.clears_cache(), "{tool} {op}");
                    assert!(working_dir.join("Pipfile").exists(), "{tool} {op}");
                }
            }
        }
    }
}
