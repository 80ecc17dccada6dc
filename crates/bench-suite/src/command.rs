//! The timed-command descriptor handed to the harness

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command as ProcessCommand;

use crate::errors::SuiteError;

/// How the timed part of a [`Command`] is executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Executable plus arguments, spawned without a shell
    Argv(Vec<String>),
    /// An expression that needs `sh -c`, e.g. two chained commands
    Shell(String),
}

/// One measured command within a comparison group.
///
/// `prepare` runs untimed before every measured invocation. `env` and `cwd`
/// are applied when the invocation is spawned and never touch the current
/// process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub prepare: Option<String>,
    pub env: BTreeMap<String, String>,
    pub cwd: Option<PathBuf>,
    pub invocation: Invocation,
}

impl Command {
    pub fn argv(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            prepare: None,
            env: BTreeMap::new(),
            cwd: None,
            invocation: Invocation::Argv(args),
        }
    }

    pub fn shell(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prepare: None,
            env: BTreeMap::new(),
            cwd: None,
            invocation: Invocation::Shell(expression.into()),
        }
    }

    pub fn with_prepare(mut self, prepare: Option<String>) -> Self {
        self.prepare = prepare;
        self
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Render as a single POSIX shell line: `cd <cwd> && K=V ... <invocation>`
    pub fn shell_line(&self) -> String {
        let mut line = String::new();
        if let Some(cwd) = &self.cwd {
            line.push_str("cd ");
            line.push_str(&quote(&cwd.to_string_lossy()));
            line.push_str(" && ");
        }

        let assignments: Vec<String> = self
            .env
            .iter()
            .map(|(key, value)| format!("{}={}", key, quote(value)))
            .collect();

        match &self.invocation {
            Invocation::Argv(args) => {
                let mut words = assignments;
                words.extend(args.iter().map(|arg| quote(arg)));
                line.push_str(&words.join(" "));
            }
            Invocation::Shell(expression) if assignments.is_empty() => {
                line.push_str(expression);
            }
            Invocation::Shell(expression) => {
                line.push_str("env ");
                line.push_str(&assignments.join(" "));
                line.push_str(" sh -c ");
                line.push_str(&quote(expression));
            }
        }
        line
    }

    /// Build a process for running this command directly (outside the harness)
    pub fn to_process(&self) -> Result<ProcessCommand, SuiteError> {
        let mut process = match &self.invocation {
            Invocation::Argv(args) => {
                let (program, rest) = args
                    .split_first()
                    .ok_or_else(|| SuiteError::EmptyInvocation(self.name.clone()))?;
                let mut process = ProcessCommand::new(program);
                process.args(rest);
                process
            }
            Invocation::Shell(expression) => {
                let mut process = ProcessCommand::new("sh");
                process.arg("-c").arg(expression);
                process
            }
        };
        process.envs(&self.env);
        if let Some(cwd) = &self.cwd {
            process.current_dir(cwd);
        }
        Ok(process)
    }
}

/// Quote one word for a POSIX shell
pub fn quote(word: &str) -> String {
    match shlex::try_quote(word) {
        Ok(quoted) => quoted.into_owned(),
        // shlex refuses NUL bytes; no real path contains one, strip and retry
        Err(_) => {
            let cleaned = word.replace('\0', "");
            shlex::try_quote(&cleaned)
                .map(Cow::into_owned)
                .unwrap_or(cleaned)
        }
    }
}

/// Join words into a shell-safe command line
pub fn join(words: &[String]) -> String {
    words
        .iter()
        .map(|word| quote(word))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_plain_argv_line() {
        let cmd = Command::argv(
            "uv lock-noop (uv)",
            vec!["/usr/bin/uv".into(), "lock".into()],
        );
        assert_eq!(cmd.shell_line(), "/usr/bin/uv lock");
    }

    #[test]
    fn test_env_and_cwd_are_prefixed() {
        let cmd = Command::argv(
            "pipenv lock-noop (pipenv)",
            vec!["pipenv".into(), "lock".into()],
        )
        .with_env(env(&[("PIPENV_YES", "1"), ("PIPENV_CACHE_DIR", "/tmp/cache")]))
        .with_cwd("/tmp/pipenv");
        // BTreeMap orders the assignments by key
        assert_eq!(
            cmd.shell_line(),
            "cd /tmp/pipenv && PIPENV_CACHE_DIR=/tmp/cache PIPENV_YES=1 pipenv lock"
        );
    }

    #[test]
    fn test_awkward_words_survive_shell_splitting() {
        let cmd = Command::argv(
            "uv lock-noop (uv)",
            vec![
                "/opt/my tools/uv".into(),
                "lock".into(),
                "--directory".into(),
                "/tmp/it's here".into(),
            ],
        );
        let words = shlex::split(&cmd.shell_line());
        assert_eq!(
            words,
            Some(vec![
                "/opt/my tools/uv".to_string(),
                "lock".to_string(),
                "--directory".to_string(),
                "/tmp/it's here".to_string(),
            ])
        );
    }

    #[test]
    fn test_shell_expression_with_env_goes_through_env() {
        let cmd = Command::shell("x", "a && b").with_env(env(&[("K", "v")]));
        assert_eq!(
            shlex::split(&cmd.shell_line()),
            Some(vec![
                "env".to_string(),
                "K=v".to_string(),
                "sh".to_string(),
                "-c".to_string(),
                "a && b".to_string(),
            ])
        );

        let bare = Command::shell("x", "a && b");
        assert_eq!(bare.shell_line(), "a && b");
    }

    #[test]
    fn test_to_process_rejects_empty_argv() {
        let cmd = Command::argv("empty", Vec::new());
        assert!(matches!(
            cmd.to_process(),
            Err(SuiteError::EmptyInvocation(_))
        ));
    }

    #[test]
    #[cfg(unix)]
    fn test_to_process_applies_env_and_cwd() {
        let Ok(temp_dir) = tempfile::TempDir::new() else {
            return;
        };
        let cmd = Command::shell("probe", "printf '%s' \"$BENCH_PROBE\" > probe.txt")
            .with_env(env(&[("BENCH_PROBE", "applied")]))
            .with_cwd(temp_dir.path());
        let status = cmd.to_process().map(|mut p| p.status());
        assert!(matches!(status, Ok(Ok(s)) if s.success()));
        let written = std::fs::read_to_string(temp_dir.path().join("probe.txt"));
        assert!(written.is_ok_and(|s| s == "applied"));
        // the parent environment is untouched
        assert!(std::env::var("BENCH_PROBE").is_err());
    }

    #[test]
    fn test_quote_and_join() {
        assert_eq!(quote("/plain/path"), "/plain/path");
        let joined = join(&["uv".into(), "--directory".into(), "/a b".into()]);
        assert!(joined.starts_with("uv --directory "));
        assert_eq!(
            shlex::split(&joined),
            Some(vec!["uv".to_string(), "--directory".to_string(), "/a b".to_string()])
        );
    }
}
