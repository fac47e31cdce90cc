use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness for running CLI commands with temporary databases
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with a temporary database
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self { temp_dir, db_path }
    }

    /// Get a Command instance configured for testing. It runs inside the temp
    /// directory so no stray taskboard.toml is picked up.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskboard").expect("Failed to find taskboard binary");

        cmd.current_dir(self.temp_dir.path())
            .env("TASKBOARD_DATABASE_PATH", &self.db_path)
            .env_remove("TASKBOARD_STORE")
            .env_remove("TASKBOARD_CATEGORY_DELETE")
            .env_remove("TASKBOARD_DEFAULT_VIEW")
            .env_remove("RUST_LOG");

        cmd
    }

    /// Write a taskboard.toml into the working directory of every command
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.temp_dir.path().join("taskboard.toml"), contents)
            .expect("Failed to write config file");
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Stdout of a successful command
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self.run_success(args).get_output().stdout.clone();
        String::from_utf8(output).expect("stdout is not UTF-8")
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use super::*;

    /// Predicate to check if output contains task table headers
    pub fn has_task_table_headers() -> impl Predicate<str> {
        predicate::str::contains("ID")
            .and(predicate::str::contains("Title"))
            .and(predicate::str::contains("Priority"))
    }

    /// Predicate to check if output contains category table headers
    pub fn has_category_table_headers() -> impl Predicate<str> {
        predicate::str::contains("Name").and(predicate::str::contains("Tasks"))
    }

    pub fn task_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("Added task")
    }

    pub fn empty_result() -> impl Predicate<str> {
        predicate::str::contains("No tasks found")
    }

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error")
    }
}
