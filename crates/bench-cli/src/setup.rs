//! Session directories, suite construction and the initial lock

use std::fs;
use std::path::{Path, PathBuf};

use bench_logger as logger;
use bench_suite::{Suite, SuiteContext, Tool};
use tracing::debug;

use crate::errors::BenchError;

/// Bind one context per binary path. With several paths for the same tool,
/// labels and directories get a `-<index>` suffix so nothing is shared.
pub fn plan_contexts(tool: Tool, binaries: &[PathBuf], session_dir: &Path) -> Vec<SuiteContext> {
    binaries
        .iter()
        .enumerate()
        .map(|(index, binary)| {
            let suffix = if binaries.len() > 1 {
                format!("-{}", index)
            } else {
                String::new()
            };
            let file_name = binary
                .file_name()
                .map_or_else(|| tool.as_str().to_string(), |n| n.to_string_lossy().into_owned());
            SuiteContext::new(
                binary,
                format!("{}{}", file_name, suffix),
                session_dir.join(format!("{}{}", tool, suffix)),
                session_dir.join(format!("{}-cache{}", tool, suffix)),
            )
        })
        .collect()
}

/// Create the suite's directories, write its manifest and run the initial
/// lock so warm and no-op operations have a lockfile to start from.
pub fn seed(suite: &dyn Suite, fixture_pipfile: &Path) -> Result<(), BenchError> {
    let context = suite.context();
    for dir in [&context.working_dir, &context.cache_dir] {
        fs::create_dir_all(dir).map_err(|source| BenchError::SessionDir {
            path: dir.clone(),
            source,
        })?;
    }

    let manifest = suite.seed_manifest(fixture_pipfile)?;
    debug!("Seeded {} with {:?}", suite.display_name(), manifest);

    let seed = suite.seed_command();
    logger::spinner_start(&format!("Setting up {}...", suite.display_name()));
    let output = match seed.to_process()?.output() {
        Ok(output) => output,
        Err(e) => {
            logger::spinner_error(&format!("Failed to run {}", seed.name));
            return Err(e.into());
        }
    };
    logger::capture_output(&seed.name, &output);

    if !output.status.success() {
        logger::spinner_error(&format!("Setting up {} failed", suite.display_name()));
        return Err(BenchError::SetupFailed {
            tool: suite.tool().to_string(),
            label: suite.label().to_string(),
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    logger::spinner_success(&format!("Set up {}", suite.display_name()));
    Ok(())
}

/// Print the captured streams of a failed initial lock
pub fn report_setup_failure(error: &BenchError) {
    if let BenchError::SetupFailed { stdout, stderr, .. } = error {
        if !stderr.is_empty() {
            eprintln!("  stderr: {}", stderr);
        }
        if !stdout.is_empty() {
            eprintln!("  stdout: {}", stdout);
        }
    }
}
