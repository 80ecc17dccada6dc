use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::command::Command;
use crate::errors::SuiteError;
use crate::operation::Operation;
use crate::suite::{copy_pipfile, lookup, CapabilityTable, Suite, SuiteContext, Tool};

/// pipenv, kept inside its working directory: the virtualenv lands in
/// `<wd>/.venv` and every prompt is auto-confirmed.
pub struct PipenvSuite {
    context: SuiteContext,
}

impl PipenvSuite {
    const CAPABILITIES: CapabilityTable<Self> = &[
        (Operation::LockCold, Self::lock_cold),
        (Operation::LockWarm, Self::lock_warm),
        (Operation::LockNoop, Self::lock_noop),
        (Operation::SyncCold, Self::sync_cold),
        (Operation::SyncWarm, Self::sync_warm),
        (Operation::InstallCold, Self::install_cold),
        (Operation::InstallWarm, Self::install_warm),
    ];

    pub fn new(context: SuiteContext) -> Self {
        Self { context }
    }

    fn env(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (
                "PIPENV_CACHE_DIR".to_string(),
                self.context.cache_dir.to_string_lossy().into_owned(),
            ),
            (
                "WORKON_HOME".to_string(),
                self.context.working_dir.to_string_lossy().into_owned(),
            ),
            ("PIPENV_VENV_IN_PROJECT".to_string(), "1".to_string()),
            ("PIPENV_YES".to_string(), "1".to_string()),
        ])
    }

    fn invoke(&self, name: String, subcommand: &str) -> Command {
        Command::argv(
            name,
            vec![self.context.binary_str(), subcommand.to_string()],
        )
        .with_env(self.env())
        .with_cwd(&self.context.working_dir)
    }

    fn build(&self, operation: Operation) -> Command {
        self.invoke(self.command_name(operation), operation.step().as_str())
            .with_prepare(self.layout().prepare_for(operation))
    }

    pub fn lock_cold(&self) -> Command {
        self.build(Operation::LockCold)
    }

    pub fn lock_warm(&self) -> Command {
        self.build(Operation::LockWarm)
    }

    pub fn lock_noop(&self) -> Command {
        self.build(Operation::LockNoop)
    }

    pub fn sync_cold(&self) -> Command {
        self.build(Operation::SyncCold)
    }

    pub fn sync_warm(&self) -> Command {
        self.build(Operation::SyncWarm)
    }

    pub fn install_cold(&self) -> Command {
        self.build(Operation::InstallCold)
    }

    pub fn install_warm(&self) -> Command {
        self.build(Operation::InstallWarm)
    }
}

impl Suite for PipenvSuite {
    fn tool(&self) -> Tool {
        Tool::Pipenv
    }

    fn context(&self) -> &SuiteContext {
        &self.context
    }

    fn operations(&self) -> Vec<Operation> {
        Self::CAPABILITIES.iter().map(|(op, _)| *op).collect()
    }

    fn command(&self, operation: Operation) -> Option<Command> {
        lookup(Self::CAPABILITIES, operation).map(|factory| factory(self))
    }

    fn seed_manifest(&self, source_pipfile: &Path) -> Result<PathBuf, SuiteError> {
        copy_pipfile(source_pipfile, &self.context.working_dir)
    }

    fn seed_command(&self) -> Command {
        self.invoke(
            format!("{} seed ({})", self.tool(), self.label()),
            "lock",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Invocation;

    fn suite(label: &str) -> PipenvSuite {
        PipenvSuite::new(SuiteContext::new(
            "/usr/bin/pipenv",
            label,
            "/tmp/session/pipenv-0",
            "/tmp/session/pipenv-cache-0",
        ))
    }

    #[test]
    fn test_pipenv_environment() {
        let cmd = suite("pipenv-0").install_warm();
        assert_eq!(cmd.name, "pipenv install-warm (pipenv-0)");
        let keys: Vec<&str> = cmd.env.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "PIPENV_CACHE_DIR",
                "PIPENV_VENV_IN_PROJECT",
                "PIPENV_YES",
                "WORKON_HOME"
            ]
        );
        assert_eq!(
            cmd.env.get("WORKON_HOME").map(String::as_str),
            Some("/tmp/session/pipenv-0")
        );
        assert_eq!(
            cmd.prepare.as_deref(),
            Some("rm -f /tmp/session/pipenv-0/Pipfile.lock && rm -rf /tmp/session/pipenv-0/.venv")
        );
        assert!(matches!(&cmd.invocation, Invocation::Argv(args) if args[1] == "install"));
    }

    #[test]
    fn test_shell_line_for_harness() {
        let line = suite("pipenv").lock_noop().shell_line();
        assert_eq!(
            line,
            "cd /tmp/session/pipenv-0 && PIPENV_CACHE_DIR=/tmp/session/pipenv-cache-0 \
             PIPENV_VENV_IN_PROJECT=1 PIPENV_YES=1 WORKON_HOME=/tmp/session/pipenv-0 \
             /usr/bin/pipenv lock"
        );
    }

    #[test]
    fn test_seed_manifest_copies_pipfile() {
        let Ok(temp_dir) = tempfile::TempDir::new() else {
            return;
        };
        let source = temp_dir.path().join("fixture.Pipfile");
        let working_dir = temp_dir.path().join("pipenv");
        assert!(std::fs::write(&source, "[packages]\ntrio = \"*\"\n").is_ok());
        assert!(std::fs::create_dir_all(&working_dir).is_ok());

        let suite = PipenvSuite::new(SuiteContext::new(
            "pipenv",
            "pipenv",
            &working_dir,
            temp_dir.path().join("pipenv-cache"),
        ));
        let seeded = suite.seed_manifest(&source);
        assert!(seeded.is_ok_and(|p| p == working_dir.join("Pipfile")));
        let copied = std::fs::read_to_string(working_dir.join("Pipfile"));
        assert!(copied.is_ok_and(|c| c.contains("trio")));
    }

    #[test]
    fn test_seed_manifest_missing_source() {
        let suite = suite("pipenv");
        let result = suite.seed_manifest(Path::new("/nonexistent/Pipfile"));
        assert!(matches!(result, Err(SuiteError::CopyManifest { .. })));
    }
}
