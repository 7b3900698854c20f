//! Result types for pipeline operations
//!
//! This module contains the result types returned by pipeline manager
//! operations, providing a centralized location for output structures.

use std::time::Duration;

use crate::recipes::RecipeKind;

/// A registered series and the tasks it expands to
#[derive(Debug, Clone)]
pub struct SeriesInfo {
    pub name: String,
    pub stages: Vec<Vec<String>>,
}

/// A registered task
#[derive(Debug, Clone)]
pub struct TaskInfo {
    pub name: String,
    pub kind: RecipeKind,
}

/// Result of listing what the pipeline can run
#[derive(Debug)]
pub struct PipelineListResult {
    pub series: Vec<SeriesInfo>,
    pub tasks: Vec<TaskInfo>,
}

/// The actions one task would perform right now
#[derive(Debug, Clone)]
pub struct PlannedTask {
    pub name: String,
    pub kind: RecipeKind,
    pub actions: Vec<String>,
}

/// Result of planning a target without running it
#[derive(Debug)]
pub struct PlanResult {
    pub target: String,
    pub stages: Vec<Vec<PlannedTask>>,
}

/// Outcome of one executed task
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub name: String,
    pub actions: usize,
    pub duration: Duration,
}

/// Result of running a target
#[derive(Debug)]
pub struct RunSummary {
    pub target: String,
    pub tasks: Vec<TaskOutcome>,
    pub duration: Duration,
}
