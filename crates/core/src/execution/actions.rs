//! Native actions: removals and copies, plus dispatch of tool invocations

use std::path::Path;

use crate::execution::command::CommandExecutor;
use crate::recipes::{Action, RunContext};
use crate::transforms::ContentTransform;
use crate::types::{PipelineError, PipelineResult};

/// Performs the actions planned by one task
pub struct ActionExecutor<'a> {
    ctx: &'a RunContext,
    task_name: &'a str,
}

impl<'a> ActionExecutor<'a> {
    pub fn new(ctx: &'a RunContext, task_name: &'a str) -> Self {
        Self { ctx, task_name }
    }

    pub fn execute_all(&self, actions: &[Action]) -> PipelineResult<()> {
        for action in actions {
            self.execute(action)?;
        }
        Ok(())
    }

    pub fn execute(&self, action: &Action) -> PipelineResult<()> {
        match action {
            Action::Invoke(invocation) => {
                CommandExecutor::new(self.ctx, self.task_name).execute_invocation(invocation)
            }
            _ if self.ctx.dry_run => {
                tracing::info!(task = %self.task_name, action = %action, "dry run, not executing");
                Ok(())
            }
            Action::Remove(path) => self.remove(path),
            Action::Copy {
                from,
                to,
                transform,
            } => self.copy(from, to, *transform),
        }
    }

    fn remove(&self, path: &Path) -> PipelineResult<()> {
        let full_path = self.ctx.resolve(path);
        tracing::debug!(task = %self.task_name, path = %full_path.display(), "removing");

        let result = if full_path.is_dir() {
            std::fs::remove_dir_all(&full_path)
        } else if full_path.exists() {
            std::fs::remove_file(&full_path)
        } else {
            Ok(())
        };

        result.map_err(|e| {
            PipelineError::Task(format!(
                "Task '{}' failed to remove {}: {}",
                self.task_name,
                full_path.display(),
                e
            ))
        })
    }

    fn copy(
        &self,
        from: &Path,
        to: &Path,
        transform: Option<ContentTransform>,
    ) -> PipelineResult<()> {
        let source = self.ctx.resolve(from);
        let target = self.ctx.resolve(to);
        let io_error = |e: std::io::Error| {
            PipelineError::Task(format!(
                "Task '{}' failed to copy {} to {}: {}",
                self.task_name,
                source.display(),
                target.display(),
                e
            ))
        };

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let bytes = std::fs::read(&source).map_err(io_error)?;
        let content = match (transform, String::from_utf8(bytes)) {
            (Some(transform), Ok(text)) => transform.apply(&text).into_bytes(),
            (_, Ok(text)) => text.into_bytes(),
            (_, Err(binary)) => binary.into_bytes(),
        };

        std::fs::write(&target, content).map_err(io_error)
    }
}
