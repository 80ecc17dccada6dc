use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::ConfigError;

pub const CONFIG_ENV_VAR: &str = "BENCH_RIPENV_CONFIG";
pub const CONFIG_FILE_NAME: &str = "bench-ripenv.toml";

pub const DEFAULT_WARMUP: u32 = 3;
pub const DEFAULT_MIN_RUNS: u32 = 10;
pub const DEFAULT_REQUIRES_PYTHON: &str = ">=3.12";
pub const DEFAULT_PROJECT_NAME: &str = "bench-fixture";

/// Keys accepted by `config get` / `config set`
pub const KNOWN_KEYS: &[&str] = &[
    "warmup",
    "min-runs",
    "runs",
    "results-dir",
    "fixtures-dir",
    "hyperfine-path",
    "requires-python",
    "project-name",
];

/// Binary paths per tool; every entry becomes its own suite
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolPaths {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ripenv: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pipenv: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uv: Vec<String>,
}

impl ToolPaths {
    pub fn is_empty(&self) -> bool {
        self.ripenv.is_empty() && self.pipenv.is_empty() && self.uv.is_empty()
    }
}

/// Persistent defaults for benchmark sessions. CLI flags take precedence.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct BenchConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warmup: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_runs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixtures_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyperfine_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_python: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "ToolPaths::is_empty")]
    pub tools: ToolPaths,
}

impl BenchConfig {
    /// Resolve the config file location.
    ///
    /// `BENCH_RIPENV_CONFIG` wins when set and non-empty, otherwise the file
    /// lives in the platform config directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("bench-ripenv").join(CONFIG_FILE_NAME))
    }

    /// Load from the resolved path; a missing file yields the defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "warmup" => self.warmup.map(|v| v.to_string()),
            "min-runs" => self.min_runs.map(|v| v.to_string()),
            "runs" => self.runs.map(|v| v.to_string()),
            "results-dir" => self.results_dir.clone(),
            "fixtures-dir" => self.fixtures_dir.clone(),
            "hyperfine-path" => self.hyperfine_path.clone(),
            "requires-python" => self.requires_python.clone(),
            "project-name" => self.project_name.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key {
            "warmup" => self.warmup = Some(parse_count(key, &value)?),
            "min-runs" => self.min_runs = Some(parse_count(key, &value)?),
            "runs" => self.runs = Some(parse_count(key, &value)?),
            "results-dir" => self.results_dir = Some(value),
            "fixtures-dir" => self.fixtures_dir = Some(value),
            "hyperfine-path" => self.hyperfine_path = Some(value),
            "requires-python" => self.requires_python = Some(value),
            "project-name" => self.project_name = Some(value),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        KNOWN_KEYS.iter().all(|key| self.get(key).is_none()) && self.tools.is_empty()
    }

    pub fn values_iter(&self) -> Vec<(&'static str, String)> {
        let mut values: Vec<(&'static str, String)> = KNOWN_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect();
        for (tool, paths) in [
            ("tools.ripenv", &self.tools.ripenv),
            ("tools.pipenv", &self.tools.pipenv),
            ("tools.uv", &self.tools.uv),
        ] {
            if !paths.is_empty() {
                values.push((tool, paths.join(", ")));
            }
        }
        values
    }

    pub fn warmup_or_default(&self) -> u32 {
        self.warmup.unwrap_or(DEFAULT_WARMUP)
    }

    pub fn min_runs_or_default(&self) -> u32 {
        self.min_runs.unwrap_or(DEFAULT_MIN_RUNS)
    }

    pub fn requires_python_or_default(&self) -> String {
        self.requires_python
            .clone()
            .unwrap_or_else(|| DEFAULT_REQUIRES_PYTHON.to_string())
    }

    pub fn project_name_or_default(&self) -> String {
        self.project_name
            .clone()
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string())
    }
}

fn parse_count(key: &str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}
