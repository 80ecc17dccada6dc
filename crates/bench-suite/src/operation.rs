//! Benchmark operations: a lifecycle step paired with a cache temperature

use std::fmt;
use std::str::FromStr;

use crate::errors::SuiteError;

/// The lifecycle step being timed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Resolve dependencies and write the lockfile
    Lock,
    /// Install the lockfile's pins into the virtualenv
    Sync,
    /// Lock followed by sync
    Install,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lock => "lock",
            Self::Sync => "sync",
            Self::Install => "install",
        }
    }
}

/// Which reusable artifacts survive between measured runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTemperature {
    /// Nothing reusable: no cache, no lockfile, no virtualenv
    Cold,
    /// Downloaded metadata and wheels are cached, the step's output is not
    Warm,
    /// The step's output is already current
    Noop,
}

impl CacheTemperature {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Warm => "warm",
            Self::Noop => "noop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    LockCold,
    LockWarm,
    LockNoop,
    SyncCold,
    SyncWarm,
    SyncNoop,
    InstallCold,
    InstallWarm,
}

impl Operation {
    /// Operations run when the caller selects none
    pub const DEFAULT: [Operation; 7] = [
        Operation::LockCold,
        Operation::LockWarm,
        Operation::LockNoop,
        Operation::SyncCold,
        Operation::SyncWarm,
        Operation::InstallCold,
        Operation::InstallWarm,
    ];

    /// Every operation a suite may implement, including opt-in ones
    pub const ALL: [Operation; 8] = [
        Operation::LockCold,
        Operation::LockWarm,
        Operation::LockNoop,
        Operation::SyncCold,
        Operation::SyncWarm,
        Operation::SyncNoop,
        Operation::InstallCold,
        Operation::InstallWarm,
    ];

    pub fn step(self) -> Step {
        match self {
            Self::LockCold | Self::LockWarm | Self::LockNoop => Step::Lock,
            Self::SyncCold | Self::SyncWarm | Self::SyncNoop => Step::Sync,
            Self::InstallCold | Self::InstallWarm => Step::Install,
        }
    }

    pub fn temperature(self) -> CacheTemperature {
        match self {
            Self::LockCold | Self::SyncCold | Self::InstallCold => CacheTemperature::Cold,
            Self::LockWarm | Self::SyncWarm | Self::InstallWarm => CacheTemperature::Warm,
            Self::LockNoop | Self::SyncNoop => CacheTemperature::Noop,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LockCold => "lock-cold",
            Self::LockWarm => "lock-warm",
            Self::LockNoop => "lock-noop",
            Self::SyncCold => "sync-cold",
            Self::SyncWarm => "sync-warm",
            Self::SyncNoop => "sync-noop",
            Self::InstallCold => "install-cold",
            Self::InstallWarm => "install-warm",
        }
    }

    /// Whether the lockfile must be gone before a measured run.
    /// Sync reads the lockfile, so only steps that write it discard it.
    pub fn clears_lockfile(self) -> bool {
        self.temperature() != CacheTemperature::Noop
            && matches!(self.step(), Step::Lock | Step::Install)
    }

    /// Whether the virtualenv must be gone before a measured run
    pub fn clears_venv(self) -> bool {
        self.temperature() != CacheTemperature::Noop
            && matches!(self.step(), Step::Sync | Step::Install)
    }

    /// Whether the download/metadata cache must be gone before a measured run
    pub fn clears_cache(self) -> bool {
        self.temperature() == CacheTemperature::Cold
    }

    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|op| op.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = SuiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s.trim())
            .ok_or_else(|| SuiteError::UnknownOperation(s.to_string(), Self::names()))
    }
}
