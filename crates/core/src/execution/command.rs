//! Command execution utilities
//!
//! This module spawns the external tools recipes plan for, from the workspace
//! root, with consistent error handling and logging.

use std::process::Command;

use crate::recipes::{RunContext, ToolInvocation};
use crate::types::{PipelineError, PipelineResult};

/// Runs tool invocations on behalf of one task
pub struct CommandExecutor<'a> {
    ctx: &'a RunContext,
    task_name: &'a str,
}

impl<'a> CommandExecutor<'a> {
    pub fn new(ctx: &'a RunContext, task_name: &'a str) -> Self {
        Self { ctx, task_name }
    }

    /// Execute a command with common setup and error handling
    pub fn execute_command(
        &self,
        command: &mut Command,
        execution_error_message: &str,
        failure_error_message: &str,
    ) -> PipelineResult<()> {
        command.current_dir(&self.ctx.root);
        command.env("BMD_BUILD_TASK", self.task_name);

        let status = command
            .status()
            .map_err(|e| PipelineError::Task(format!("{}: {}", execution_error_message, e)))?;

        if !status.success() {
            return Err(PipelineError::Task(format!(
                "{}: {}",
                failure_error_message,
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }

    /// Run a planned tool invocation
    pub fn execute_invocation(&self, invocation: &ToolInvocation) -> PipelineResult<()> {
        if self.ctx.dry_run {
            tracing::info!(task = %self.task_name, command = %invocation, "dry run, not executing");
            return Ok(());
        }

        tracing::debug!(task = %self.task_name, command = %invocation, "spawning");
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        self.execute_command(
            &mut command,
            &format!(
                "Task '{}' failed to execute '{}'",
                self.task_name, invocation.program
            ),
            &format!(
                "Task '{}': '{}' failed with exit code",
                self.task_name, invocation.program
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::pipeline::{Tool, ToolsConfig};

    #[test]
    fn test_dry_run_never_spawns() {
        let mut ctx = RunContext::new(std::env::temp_dir());
        ctx.dry_run = true;
        ctx.tools = ToolsConfig {
            sass: Some("definitely-not-an-installed-program".to_string()),
            ..ToolsConfig::default()
        };

        let invocation = ToolInvocation::new(&ctx.tools, Tool::Sass).arg("a.scss:a.css");
        CommandExecutor::new(&ctx, "sass")
            .execute_invocation(&invocation)
            .unwrap();
    }

    #[test]
    fn test_missing_program_is_a_task_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut ctx = RunContext::new(temp_dir.path());
        ctx.tools = ToolsConfig {
            rollup: Some("definitely-not-an-installed-program".to_string()),
            ..ToolsConfig::default()
        };

        let invocation = ToolInvocation::new(&ctx.tools, Tool::Rollup);
        let err = CommandExecutor::new(&ctx, "rollup:es")
            .execute_invocation(&invocation)
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("Task 'rollup:es' failed to execute 'definitely-not-an-installed-program'"));
    }
}
