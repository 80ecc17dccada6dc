//! The per-tool command factory shared by every suite

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::command::{quote, Command};
use crate::errors::SuiteError;
use crate::operation::Operation;

/// Directory name every tool uses for its project virtualenv
pub const VENV_DIR_NAME: &str = ".venv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tool {
    Ripenv,
    Pipenv,
    Uv,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Ripenv, Tool::Pipenv, Tool::Uv];

    /// Executable name looked up on `PATH`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ripenv => "ripenv",
            Self::Pipenv => "pipenv",
            Self::Uv => "uv",
        }
    }

    /// Lockfile written into the working directory
    pub fn lockfile_name(self) -> &'static str {
        match self {
            Self::Ripenv | Self::Uv => "uv.lock",
            Self::Pipenv => "Pipfile.lock",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = SuiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s.trim())
            .ok_or_else(|| SuiteError::UnknownTool(s.to_string()))
    }
}

/// State a suite is bound to for the whole session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteContext {
    pub binary: PathBuf,
    pub label: String,
    pub working_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl SuiteContext {
    pub fn new(
        binary: impl Into<PathBuf>,
        label: impl Into<String>,
        working_dir: impl Into<PathBuf>,
        cache_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            binary: binary.into(),
            label: label.into(),
            working_dir: working_dir.into(),
            cache_dir: cache_dir.into(),
        }
    }

    pub fn binary_str(&self) -> String {
        self.binary.to_string_lossy().into_owned()
    }
}

/// The artifacts a measured run may have to discard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLayout {
    pub lockfile: PathBuf,
    pub venv: PathBuf,
    pub cache_dir: PathBuf,
}

impl StateLayout {
    pub fn for_tool(tool: Tool, context: &SuiteContext) -> Self {
        Self {
            lockfile: context.working_dir.join(tool.lockfile_name()),
            venv: context.working_dir.join(VENV_DIR_NAME),
            cache_dir: context.cache_dir.clone(),
        }
    }

    /// The untimed shell step that puts the directories into the state
    /// `operation` expects: lockfile first, then virtualenv, then cache.
    /// `None` for no-op operations, which must see the previous state.
    pub fn prepare_for(&self, operation: Operation) -> Option<String> {
        let mut steps = Vec::new();
        if operation.clears_lockfile() {
            steps.push(remove_file(&self.lockfile));
        }
        if operation.clears_venv() {
            steps.push(remove_dir(&self.venv));
        }
        if operation.clears_cache() {
            steps.push(remove_dir(&self.cache_dir));
        }

        if steps.is_empty() {
            None
        } else {
            Some(steps.join(" && "))
        }
    }
}

fn remove_file(path: &Path) -> String {
    format!("rm -f {}", quote(&path.to_string_lossy()))
}

fn remove_dir(path: &Path) -> String {
    format!("rm -rf {}", quote(&path.to_string_lossy()))
}

/// File name of the Pipfile seeded into pipenv-style working directories
pub const PIPFILE_NAME: &str = "Pipfile";

/// Copy the fixture Pipfile into `working_dir`, returning the new path
pub(crate) fn copy_pipfile(source: &Path, working_dir: &Path) -> Result<PathBuf, SuiteError> {
    let target = working_dir.join(PIPFILE_NAME);
    fs::copy(source, &target).map_err(|source_err| SuiteError::CopyManifest {
        from: source.to_path_buf(),
        to: target.clone(),
        source: source_err,
    })?;
    debug!("Copied {:?} to {:?}", source, target);
    Ok(target)
}

/// Maps each supported operation to the factory that builds its command.
/// Operations missing from the table are unsupported by that suite.
pub type CapabilityTable<S> = &'static [(Operation, fn(&S) -> Command)];

pub fn lookup<S>(table: CapabilityTable<S>, operation: Operation) -> Option<fn(&S) -> Command> {
    table
        .iter()
        .find(|(op, _)| *op == operation)
        .map(|(_, factory)| *factory)
}

/// A tool under benchmark.
///
/// Implementations are immutable after construction; every factory is a
/// pure function of the bound [`SuiteContext`] and creates no files.
pub trait Suite {
    fn tool(&self) -> Tool;

    fn context(&self) -> &SuiteContext;

    /// Operations this suite can produce a command for, in table order
    fn operations(&self) -> Vec<Operation>;

    /// The command for `operation`, or `None` when the tool has no
    /// equivalent
    fn command(&self, operation: Operation) -> Option<Command>;

    /// Place the tool's manifest into the working directory, derived from
    /// the fixture Pipfile. Returns the path written.
    fn seed_manifest(&self, source_pipfile: &Path) -> Result<PathBuf, SuiteError>;

    /// The initial lock that gives warm and no-op operations a lockfile
    fn seed_command(&self) -> Command;

    fn label(&self) -> &str {
        &self.context().label
    }

    fn display_name(&self) -> String {
        format!("{} ({})", self.tool(), self.label())
    }

    fn layout(&self) -> StateLayout {
        StateLayout::for_tool(self.tool(), self.context())
    }

    fn command_name(&self, operation: Operation) -> String {
        format!("{} {} ({})", self.tool(), operation, self.label())
    }
}
