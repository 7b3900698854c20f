//! Named entry points into the pipeline
//!
//! A [`BuildGraph`] owns every task and every named series. A series is an
//! ordered list of [`Step`]s: steps run one after another, and the tasks of a
//! [`Step::Parallel`] group may run concurrently with no guaranteed relative
//! order. Tasks and series share one namespace, and every task can be invoked
//! on its own.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::recipes::Recipe;
use crate::types::{PipelineError, PipelineResult};

pub type RecipeRef = Arc<dyn Recipe>;

#[derive(Debug, Clone)]
pub enum Step {
    Task(RecipeRef),
    Parallel(Vec<RecipeRef>),
}

impl Step {
    pub fn task(recipe: &RecipeRef) -> Self {
        Step::Task(recipe.clone())
    }

    /// Group tasks (and other groups, which are flattened) to run concurrently
    pub fn parallel<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = Step>,
    {
        let mut recipes = Vec::new();
        for step in steps {
            recipes.extend(step.recipes());
        }
        Step::Parallel(recipes)
    }

    pub fn recipes(&self) -> Vec<RecipeRef> {
        match self {
            Step::Task(recipe) => vec![recipe.clone()],
            Step::Parallel(recipes) => recipes.clone(),
        }
    }

    pub fn task_names(&self) -> Vec<String> {
        self.recipes()
            .iter()
            .map(|recipe| recipe.name().to_string())
            .collect()
    }
}

impl From<&RecipeRef> for Step {
    fn from(recipe: &RecipeRef) -> Self {
        Step::task(recipe)
    }
}

impl From<&[RecipeRef]> for Step {
    fn from(recipes: &[RecipeRef]) -> Self {
        Step::Parallel(recipes.to_vec())
    }
}

#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub steps: Vec<Step>,
}

impl Series {
    /// Task names per step, in execution order
    pub fn stages(&self) -> Vec<Vec<String>> {
        self.steps
            .iter()
            .map(Step::task_names)
            .filter(|stage| !stage.is_empty())
            .collect()
    }

    pub fn recipes(&self) -> Vec<RecipeRef> {
        self.steps.iter().flat_map(Step::recipes).collect()
    }
}

/// Every task and named series of the pipeline
#[derive(Debug, Default)]
pub struct BuildGraph {
    tasks: BTreeMap<String, RecipeRef>,
    series: BTreeMap<String, Series>,
}

impl BuildGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task under its qualified name
    pub fn register_task<R: Recipe + 'static>(&mut self, recipe: R) -> PipelineResult<RecipeRef> {
        let name = recipe.name().to_string();
        self.ensure_name_free(&name)?;

        let recipe: RecipeRef = Arc::new(recipe);
        self.tasks.insert(name, recipe.clone());
        Ok(recipe)
    }

    /// Register a named series. Every task it references must already be registered.
    pub fn register_series(&mut self, name: &str, steps: Vec<Step>) -> PipelineResult<()> {
        if name.trim().is_empty() {
            return Err(PipelineError::Series(
                "Series name must not be empty".to_string(),
            ));
        }
        self.ensure_name_free(name)?;

        for step in &steps {
            for recipe in step.recipes() {
                match self.tasks.get(recipe.name()) {
                    Some(registered) if Arc::ptr_eq(registered, &recipe) => {}
                    _ => {
                        return Err(PipelineError::Series(format!(
                            "Series '{}' references unregistered task '{}'",
                            name,
                            recipe.name()
                        )))
                    }
                }
            }
        }

        self.series.insert(
            name.to_string(),
            Series {
                name: name.to_string(),
                steps,
            },
        );
        Ok(())
    }

    fn ensure_name_free(&self, name: &str) -> PipelineResult<()> {
        if self.tasks.contains_key(name) {
            return Err(PipelineError::Series(format!(
                "A task named '{}' is already registered",
                name
            )));
        }
        if self.series.contains_key(name) {
            return Err(PipelineError::Series(format!(
                "A series named '{}' is already registered",
                name
            )));
        }
        Ok(())
    }

    pub fn series_names(&self) -> Vec<String> {
        self.series.keys().cloned().collect()
    }

    pub fn task_names(&self) -> Vec<String> {
        self.tasks.keys().cloned().collect()
    }

    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.get(name)
    }

    pub fn task(&self, name: &str) -> Option<&RecipeRef> {
        self.tasks.get(name)
    }

    /// Resolve a series name, or a task name as a single-step series
    pub fn resolve(&self, target: &str) -> PipelineResult<Series> {
        if let Some(series) = self.series.get(target) {
            return Ok(series.clone());
        }
        if let Some(recipe) = self.tasks.get(target) {
            return Ok(Series {
                name: target.to_string(),
                steps: vec![Step::task(recipe)],
            });
        }

        Err(PipelineError::Series(format!(
            "Task or series '{}' not found. Series: {}",
            target,
            self.series_names().join(", ")
        )))
    }

    pub fn stages(&self, target: &str) -> PipelineResult<Vec<Vec<String>>> {
        Ok(self.resolve(target)?.stages())
    }

    /// Distinct watch directories of every task reachable from `target`
    pub fn watch_dirs(&self, target: &str) -> PipelineResult<Vec<PathBuf>> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for recipe in self.resolve(target)?.recipes() {
            for dir in recipe.watch_dirs() {
                if !dirs.contains(&dir) {
                    dirs.push(dir);
                }
            }
        }
        Ok(dirs)
    }

    /// Ordering graph of a target: each task points at the tasks of the
    /// previous step it waits for. Edges are labelled `after`.
    pub fn ordering_graph(&self, target: &str) -> PipelineResult<DiGraph<String, &'static str>> {
        let mut graph = DiGraph::<String, &'static str>::new();
        let mut previous: Vec<NodeIndex> = Vec::new();

        for stage in self.stages(target)? {
            let current: Vec<NodeIndex> = stage
                .into_iter()
                .map(|name| graph.add_node(name))
                .collect();
            for &node in &current {
                for &prerequisite in &previous {
                    graph.add_edge(node, prerequisite, "after");
                }
            }
            previous = current;
        }

        Ok(graph)
    }
}
