//! Executes generation plans against the filesystem
//!
//! Files are written only when absent; an existing file is skipped and
//! logged, never overwritten. Commands run through the platform shell with
//! the target directory as working directory. In dry-run mode nothing is
//! touched and every action is reported as planned.

use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    process::Command,
};

use templatizer_generation::{GenerationPlan, PlannedAction};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// What happened to one planned action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// File was created
    Written(PathBuf),
    /// File already existed and was left alone
    Skipped(PathBuf),
    /// Command ran and exited successfully
    Ran(String),
    /// Dry run: the action was not performed
    Planned(PlannedAction),
}

/// Result of executing a whole plan
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    /// Outcomes in plan order
    pub outcomes: Vec<ActionOutcome>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl ExecutionReport {
    /// Number of files written
    pub fn files_written(&self) -> usize {
        self.count(|o| matches!(o, ActionOutcome::Written(_)))
    }

    /// Number of files skipped because they already existed
    pub fn files_skipped(&self) -> usize {
        self.count(|o| matches!(o, ActionOutcome::Skipped(_)))
    }

    /// Number of commands run
    pub fn commands_run(&self) -> usize {
        self.count(|o| matches!(o, ActionOutcome::Ran(_)))
    }

    fn count(&self, pred: impl Fn(&ActionOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Applies plans inside a target directory
pub struct PlanExecutor {
    target_dir: PathBuf,
    dry_run: bool,
}

impl PlanExecutor {
    /// Create an executor writing under `target_dir`
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            dry_run: false,
        }
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Directory relative output paths and commands are anchored to
    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Execute every action in order, stopping at the first failure
    pub fn execute(&self, plan: &GenerationPlan) -> CliResult<ExecutionReport> {
        let mut report = ExecutionReport {
            outcomes: Vec::with_capacity(plan.actions.len()),
            dry_run: self.dry_run,
        };

        for action in &plan.actions {
            let outcome = if self.dry_run {
                ActionOutcome::Planned(action.clone())
            } else {
                match action {
                    PlannedAction::WriteFile { path, content } => self.write_file(path, content)?,
                    PlannedAction::RunCommand { command } => self.run_command(command)?,
                }
            };
            report.outcomes.push(outcome);
        }

        debug!(
            template = %plan.template,
            written = report.files_written(),
            skipped = report.files_skipped(),
            commands = report.commands_run(),
            dry_run = self.dry_run,
            "executed plan"
        );
        Ok(report)
    }

    fn write_file(&self, path: &Path, content: &str) -> CliResult<ActionOutcome> {
        let full_path = self.target_dir.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // create_new makes the existence check and the creation one step
        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full_path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                warn!(path = %full_path.display(), "file exists, skipping");
                return Ok(ActionOutcome::Skipped(full_path));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(content.as_bytes())?;
        info!(path = %full_path.display(), "wrote file");
        Ok(ActionOutcome::Written(full_path))
    }

    fn run_command(&self, command: &str) -> CliResult<ActionOutcome> {
        info!(command, "running command");
        let status = shell_command(command)
            .current_dir(&self.target_dir)
            .status()?;
        if !status.success() {
            return Err(CliError::CommandFailed {
                command: command.to_string(),
                status: status.to_string(),
            });
        }
        Ok(ActionOutcome::Ran(command.to_string()))
    }
}

/// Build a process that runs `command` through the platform shell
pub fn shell_command(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn plan(actions: Vec<PlannedAction>) -> GenerationPlan {
        GenerationPlan {
            template: "test".to_string(),
            actions,
            unknown_markers: Vec::new(),
        }
    }

    fn write(path: &str, content: &str) -> PlannedAction {
        PlannedAction::WriteFile {
            path: PathBuf::from(path),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_writes_new_files_and_parents() {
        let dir = TempDir::new().unwrap();
        let executor = PlanExecutor::new(dir.path());

        let report = executor
            .execute(&plan(vec![write("src/widget.rs", "pub struct Widget;\n")]))
            .unwrap();

        assert_eq!(report.files_written(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("src/widget.rs")).unwrap(),
            "pub struct Widget;\n"
        );
    }

    #[test]
    fn test_existing_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("widget.hpp"), "keep me").unwrap();
        let executor = PlanExecutor::new(dir.path());

        let report = executor
            .execute(&plan(vec![write("widget.hpp", "new content")]))
            .unwrap();

        assert_eq!(report.files_skipped(), 1);
        assert_eq!(report.files_written(), 0);
        assert_eq!(
            fs::read_to_string(dir.path().join("widget.hpp")).unwrap(),
            "keep me"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_skipped_not_followed() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("widget.hpp");
        std::os::unix::fs::symlink(dir.path().join("elsewhere.hpp"), &link).unwrap();
        let executor = PlanExecutor::new(dir.path());

        let report = executor
            .execute(&plan(vec![write("widget.hpp", "new content")]))
            .unwrap();

        assert_eq!(report.outcomes, vec![ActionOutcome::Skipped(link)]);
        assert!(!dir.path().join("elsewhere.hpp").exists());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let executor = PlanExecutor::new(dir.path()).with_dry_run(true);
        let actions = vec![
            write("widget.hpp", "content"),
            PlannedAction::RunCommand {
                command: "touch ran".to_string(),
            },
        ];

        let report = executor.execute(&plan(actions.clone())).unwrap();

        assert!(report.dry_run);
        assert_eq!(
            report.outcomes,
            actions
                .into_iter()
                .map(ActionOutcome::Planned)
                .collect::<Vec<_>>()
        );
        assert!(!dir.path().join("widget.hpp").exists());
        assert!(!dir.path().join("ran").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_commands_run_in_target_dir() {
        let dir = TempDir::new().unwrap();
        let executor = PlanExecutor::new(dir.path());

        let report = executor
            .execute(&plan(vec![PlannedAction::RunCommand {
                command: "echo generated > marker.txt".to_string(),
            }]))
            .unwrap();

        assert_eq!(report.commands_run(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("marker.txt")).unwrap(),
            "generated\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_stops_execution() {
        let dir = TempDir::new().unwrap();
        let executor = PlanExecutor::new(dir.path());

        let result = executor.execute(&plan(vec![
            PlannedAction::RunCommand {
                command: "exit 3".to_string(),
            },
            write("after.txt", "unreachable"),
        ]));

        assert!(matches!(result, Err(CliError::CommandFailed { .. })));
        assert!(!dir.path().join("after.txt").exists());
    }
}
