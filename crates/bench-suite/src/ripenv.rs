//! ripenv: a Pipfile front-end over the uv resolver

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::command::Command;
use crate::errors::SuiteError;
use crate::operation::Operation;
use crate::suite::{copy_pipfile, lookup, CapabilityTable, Suite, SuiteContext, Tool, PIPFILE_NAME};

pub struct RipenvSuite {
    context: SuiteContext,
    pipfile: PathBuf,
}

impl RipenvSuite {
    const CAPABILITIES: CapabilityTable<Self> = &[
        (Operation::LockCold, Self::lock_cold),
        (Operation::LockWarm, Self::lock_warm),
        (Operation::LockNoop, Self::lock_noop),
        (Operation::SyncCold, Self::sync_cold),
        (Operation::SyncWarm, Self::sync_warm),
        (Operation::InstallCold, Self::install_cold),
        (Operation::InstallWarm, Self::install_warm),
    ];

    /// Bind to `context`, reading the Pipfile seeded into its working directory
    pub fn new(context: SuiteContext) -> Self {
        let pipfile = context.working_dir.join(PIPFILE_NAME);
        Self { context, pipfile }
    }

    /// Point ripenv at a Pipfile outside the working directory
    pub fn with_pipfile(mut self, pipfile: impl Into<PathBuf>) -> Self {
        self.pipfile = pipfile.into();
        self
    }

    pub fn pipfile(&self) -> &Path {
        &self.pipfile
    }

    fn env(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (
                "PIPENV_PIPFILE".to_string(),
                self.pipfile.to_string_lossy().into_owned(),
            ),
            (
                "UV_CACHE_DIR".to_string(),
                self.context.cache_dir.to_string_lossy().into_owned(),
            ),
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

impl Suite for RipenvSuite {
    fn tool(&self) -> Tool {
        Tool::Ripenv
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
