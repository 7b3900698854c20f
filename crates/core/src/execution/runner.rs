//! High-level task runner
//!
//! This module runs the steps of a series: one step after another, with the
//! tasks of a parallel group spread over the blocking thread pool.

use std::sync::Arc;
use std::time::Instant;

use colored::*;

use crate::execution::actions::ActionExecutor;
use crate::graph::{RecipeRef, Series, Step};
use crate::recipes::{Recipe, RunContext};
use crate::results::{RunSummary, TaskOutcome};
use crate::types::{PipelineError, PipelineResult};

/// Runs series against one workspace
#[derive(Debug, Clone)]
pub struct TaskRunner {
    ctx: Arc<RunContext>,
}

impl TaskRunner {
    pub fn new(ctx: RunContext) -> Self {
        Self { ctx: Arc::new(ctx) }
    }

    pub fn context(&self) -> &RunContext {
        &self.ctx
    }

    /// Run every step of a series, stopping at the first failing step
    pub async fn run_series(&self, series: &Series) -> PipelineResult<RunSummary> {
        let started = Instant::now();
        let mut tasks = Vec::new();

        for (index, step) in series.steps.iter().enumerate() {
            tracing::info!(
                series = %series.name,
                step = index + 1,
                tasks = ?step.task_names(),
                "starting step"
            );
            tasks.extend(self.run_step(step).await?);
        }

        Ok(RunSummary {
            target: series.name.clone(),
            tasks,
            duration: started.elapsed(),
        })
    }

    async fn run_step(&self, step: &Step) -> PipelineResult<Vec<TaskOutcome>> {
        match step {
            Step::Task(recipe) => Ok(vec![self.spawn(recipe.clone()).await?]),
            Step::Parallel(recipes) => {
                let handles: Vec<_> = recipes
                    .iter()
                    .map(|recipe| {
                        let runner = self.clone();
                        let recipe = recipe.clone();
                        tokio::spawn(async move { runner.spawn(recipe).await })
                    })
                    .collect();

                // Wait for the whole group so no task is left running
                let mut outcomes = Vec::new();
                let mut failures = Vec::new();
                for handle in handles {
                    match handle.await {
                        Ok(Ok(outcome)) => outcomes.push(outcome),
                        Ok(Err(e)) => failures.push(e.to_string()),
                        Err(e) => failures.push(format!("Task panicked: {}", e)),
                    }
                }

                if failures.is_empty() {
                    Ok(outcomes)
                } else {
                    Err(PipelineError::Task(failures.join("; ")))
                }
            }
        }
    }

    async fn spawn(&self, recipe: RecipeRef) -> PipelineResult<TaskOutcome> {
        let ctx = self.ctx.clone();
        let name = recipe.name().to_string();
        tokio::task::spawn_blocking(move || run_recipe(&ctx, recipe.as_ref()))
            .await
            .map_err(|e| PipelineError::Task(format!("Task '{}' panicked: {}", name, e)))?
    }
}

/// Stable terminal color for a task, so interleaved parallel output stays attributable
pub fn task_color(task_name: &str) -> Color {
    const PALETTE: [Color; 6] = [
        Color::Cyan,
        Color::Magenta,
        Color::Yellow,
        Color::BrightBlue,
        Color::BrightGreen,
        Color::BrightMagenta,
    ];

    // FNV-1a
    let hash = task_name.bytes().fold(0xcbf2_9ce4_8422_2325u64, |acc, b| {
        (acc ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    });
    PALETTE[(hash % PALETTE.len() as u64) as usize]
}

/// Plan and execute one task synchronously
pub fn run_recipe(ctx: &RunContext, recipe: &dyn Recipe) -> PipelineResult<TaskOutcome> {
    let started = Instant::now();
    let name = recipe.name();
    let color = task_color(name);

    println!(
        "┌─ {} {}",
        "Running task".bold(),
        format!("'{}'", name).color(color).bold()
    );
    println!("└─ {} {}", "Kind:".bright_black(), recipe.kind());

    let actions = recipe.actions(ctx)?;
    if actions.is_empty() {
        tracing::warn!(task = %name, "nothing to do");
    }
    ActionExecutor::new(ctx, name).execute_all(&actions)?;

    let duration = started.elapsed();
    println!(
        "{} {}",
        "✓".green().bold(),
        format!("Completed {} in {:.2?}", name, duration).color(color)
    );

    Ok(TaskOutcome {
        name: name.to_string(),
        actions: actions.len(),
        duration,
    })
}
