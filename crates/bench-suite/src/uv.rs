//! uv, driven through a pyproject.toml translated from the fixture Pipfile

use std::path::{Path, PathBuf};

use bench_manifest::{write_pyproject, TranslateOptions};

use crate::command::{join, Command};
use crate::errors::SuiteError;
use crate::operation::{Operation, Step};
use crate::suite::{lookup, CapabilityTable, Suite, SuiteContext, Tool};

pub struct UvSuite {
    context: SuiteContext,
    project: TranslateOptions,
}

impl UvSuite {
    const CAPABILITIES: CapabilityTable<Self> = &[
        (Operation::LockCold, Self::lock_cold),
        (Operation::LockWarm, Self::lock_warm),
        (Operation::LockNoop, Self::lock_noop),
        (Operation::SyncCold, Self::sync_cold),
        (Operation::SyncWarm, Self::sync_warm),
        (Operation::SyncNoop, Self::sync_noop),
        (Operation::InstallCold, Self::install_cold),
        (Operation::InstallWarm, Self::install_warm),
    ];

    pub fn new(context: SuiteContext) -> Self {
        Self {
            context,
            project: TranslateOptions::default(),
        }
    }

    /// Project metadata for the generated pyproject.toml
    pub fn with_project(mut self, project: TranslateOptions) -> Self {
        self.project = project;
        self
    }

    fn args(&self, subcommand: &str) -> Vec<String> {
        vec![
            self.context.binary_str(),
            subcommand.to_string(),
            "--cache-dir".to_string(),
            self.context.cache_dir.to_string_lossy().into_owned(),
            "--directory".to_string(),
            self.context.working_dir.to_string_lossy().into_owned(),
        ]
    }

    fn build(&self, operation: Operation) -> Command {
        let name = self.command_name(operation);
        let command = match operation.step() {
            Step::Lock => Command::argv(name, self.args(Step::Lock.as_str())),
            Step::Sync => Command::argv(name, self.args(Step::Sync.as_str())),
            // uv has no single install command
            Step::Install => Command::shell(
                name,
                format!(
                    "{} && {}",
                    join(&self.args(Step::Lock.as_str())),
                    join(&self.args(Step::Sync.as_str()))
                ),
            ),
        };
        command.with_prepare(self.layout().prepare_for(operation))
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

    pub fn sync_noop(&self) -> Command {
        self.build(Operation::SyncNoop)
    }

    pub fn install_cold(&self) -> Command {
        self.build(Operation::InstallCold)
    }

    pub fn install_warm(&self) -> Command {
        self.build(Operation::InstallWarm)
    }
}

impl Suite for UvSuite {
    fn tool(&self) -> Tool {
        Tool::Uv
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
        write_pyproject(source_pipfile, &self.context.working_dir, &self.project)
            .map_err(SuiteError::from)
    }

    fn seed_command(&self) -> Command {
        Command::argv(
            format!("{} seed ({})", self.tool(), self.label()),
            self.args(Step::Lock.as_str()),
        )
    }
}
