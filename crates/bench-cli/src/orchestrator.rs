//! Groups suite commands per operation and feeds them to the harness

use bench_logger as logger;
use bench_suite::{Operation, Suite};
use tracing::{debug, info};

use crate::errors::HarnessError;
use crate::harness::{ComparisonGroup, GroupOutcome, Harness};

/// What a session ran, in submission order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub outcomes: Vec<GroupOutcome>,
    /// Operations no active suite supports
    pub skipped: Vec<Operation>,
}

impl SessionSummary {
    pub fn failed(&self) -> impl Iterator<Item = &GroupOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.succeeded())
    }
}

/// Collect the command for `operation` from every suite that supports it.
/// Returns `None` when no suite does.
pub fn collect_group(operation: Operation, suites: &[Box<dyn Suite>]) -> Option<ComparisonGroup> {
    let commands: Vec<_> = suites
        .iter()
        .filter_map(|suite| {
            let command = suite.command(operation);
            if command.is_none() {
                debug!("{} has no {}", suite.display_name(), operation);
            }
            command
        })
        .collect();

    if commands.is_empty() {
        None
    } else {
        Some(ComparisonGroup {
            operation,
            commands,
        })
    }
}

/// Run `operations` in order, one harness invocation per operation.
///
/// A harness that exits non-zero is recorded and the session moves on; a
/// harness that cannot be started ends the session.
pub fn run(
    operations: &[Operation],
    suites: &[Box<dyn Suite>],
    harness: &mut dyn Harness,
) -> Result<SessionSummary, HarnessError> {
    let mut summary = SessionSummary::default();

    for &operation in operations {
        let Some(group) = collect_group(operation, suites) else {
            info!("Skipping {}: no tool supports it", operation);
            summary.skipped.push(operation);
            continue;
        };

        logger::banner(group.label());
        let outcome = harness.run_group(&group)?;
        if !outcome.succeeded() {
            logger::warn(&format!(
                "hyperfine exited with {} for {}",
                outcome
                    .exit_code
                    .map_or_else(|| "a signal".to_string(), |code| format!("status {}", code)),
                operation
            ));
        }
        summary.outcomes.push(outcome);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_suite::{RipenvSuite, SuiteContext, UvSuite};

    #[derive(Default)]
    struct RecordingHarness {
        groups: Vec<ComparisonGroup>,
        exit_code: Option<i32>,
    }

    impl Harness for RecordingHarness {
        fn run_group(&mut self, group: &ComparisonGroup) -> Result<GroupOutcome, HarnessError> {
            self.groups.push(group.clone());
            Ok(GroupOutcome {
                operation: group.operation,
                commands: group.commands.len(),
                exit_code: self.exit_code,
                export: None,
            })
        }
    }

    fn suites() -> Vec<Box<dyn Suite>> {
        vec![
            Box::new(RipenvSuite::new(SuiteContext::new(
                "ripenv",
                "ripenv",
                "/tmp/s/ripenv",
                "/tmp/s/ripenv-cache",
            ))),
            Box::new(UvSuite::new(SuiteContext::new(
                "uv",
                "uv",
                "/tmp/s/uv",
                "/tmp/s/uv-cache",
            ))),
        ]
    }

    #[test]
    fn test_unsupported_operation_narrows_the_group() {
        let mut harness = RecordingHarness {
            exit_code: Some(0),
            ..Default::default()
        };
        let summary = run(
            &[Operation::LockCold, Operation::SyncNoop],
            &suites(),
            &mut harness,
        );
        assert!(summary.is_ok_and(|s| s.outcomes.len() == 2 && s.skipped.is_empty()));

        assert_eq!(harness.groups.len(), 2);
        assert_eq!(harness.groups[0].commands.len(), 2);
        assert_eq!(harness.groups[1].commands.len(), 1);
        assert_eq!(harness.groups[1].commands[0].name, "uv sync-noop (uv)");
    }

    #[test]
    fn test_empty_group_is_never_submitted() {
        let ripenv_only: Vec<Box<dyn Suite>> = suites().into_iter().take(1).collect();
        let mut harness = RecordingHarness::default();
        let summary = run(
            &[Operation::SyncNoop, Operation::LockNoop],
            &ripenv_only,
            &mut harness,
        );
        assert!(summary.is_ok_and(|s| s.skipped == vec![Operation::SyncNoop]));
        assert_eq!(harness.groups.len(), 1);
        assert_eq!(harness.groups[0].operation, Operation::LockNoop);

        let mut harness = RecordingHarness::default();
        assert!(run(&Operation::DEFAULT, &[], &mut harness).is_ok());
        assert!(harness.groups.is_empty());
    }

    #[test]
    fn test_groups_follow_caller_order_and_failures_are_recorded() {
        let mut harness = RecordingHarness {
            exit_code: Some(1),
            ..Default::default()
        };
        let order = [Operation::InstallWarm, Operation::LockCold];
        let Ok(summary) = run(&order, &suites(), &mut harness) else {
            panic!("recording harness never fails");
        };
        let ran: Vec<Operation> = harness.groups.iter().map(|g| g.operation).collect();
        assert_eq!(ran, order.to_vec());
        assert_eq!(summary.failed().count(), 2);
    }
}
