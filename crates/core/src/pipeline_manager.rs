//! High-level pipeline management interface
//!
//! This module provides the [`PipelineManager`] which serves as the primary interface
//! for all pipeline operations. It loads `bmd-build.yml` and `package.json`, builds
//! the task graph once, and exposes listing, planning, running and graph export.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bmd_build_core::pipeline_manager::{PipelineManager, PipelineManagerConfig};
//! use std::path::PathBuf;
//!
//! # async fn example() -> bmd_build_core::types::PipelineResult<()> {
//! let manager = PipelineManager::new(PipelineManagerConfig {
//!     workspace_root: PathBuf::from("."),
//!     dry_run: false,
//! })?;
//!
//! // Show what the default series would do
//! let plan = manager.plan("default")?;
//!
//! // Run the stylesheet series
//! manager.run("css").await?;
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::time::Duration;

use chrono::Datelike;
use petgraph::dot::{Config, Dot};

use crate::configs::package::load_package_metadata;
use crate::configs::pipeline::{load_pipeline_config, PipelineConfig};
use crate::execution::TaskRunner;
use crate::graph::BuildGraph;
use crate::pipelines::{build_graph, PipelineContext};
use crate::recipes::RunContext;
use crate::results::{
    PipelineListResult, PlanResult, PlannedTask, RunSummary, SeriesInfo, TaskInfo,
};
use crate::types::PipelineResult;

/// High-level pipeline manager that encapsulates all pipeline operations
pub struct PipelineManager {
    pub config: PipelineConfig,
    graph: BuildGraph,
    runner: TaskRunner,
}

/// Configuration for initializing a pipeline manager
pub struct PipelineManagerConfig {
    pub workspace_root: PathBuf,
    /// Log every action instead of performing it
    pub dry_run: bool,
}

impl PipelineManager {
    /// Initialize a new pipeline manager from the given workspace root
    pub fn new(config: PipelineManagerConfig) -> PipelineResult<Self> {
        let pipeline_config = load_pipeline_config(&config.workspace_root)?;
        let package =
            load_package_metadata(&config.workspace_root.join(pipeline_config.package_file()))?;

        let ctx = PipelineContext {
            package,
            year: chrono::Local::now().year(),
            config: pipeline_config,
        };
        Self::with_context(config, ctx)
    }

    /// Initialize from an already loaded pipeline context
    pub fn with_context(
        config: PipelineManagerConfig,
        ctx: PipelineContext,
    ) -> PipelineResult<Self> {
        let graph = build_graph(&ctx)?;
        tracing::debug!(
            root = %config.workspace_root.display(),
            tasks = graph.task_names().len(),
            series = graph.series_names().len(),
            "pipeline loaded"
        );

        let mut run_context = RunContext::new(config.workspace_root);
        run_context.tools = ctx.config.tools();
        run_context.dry_run = config.dry_run;

        Ok(Self {
            config: ctx.config,
            graph,
            runner: TaskRunner::new(run_context),
        })
    }

    pub fn workspace_root(&self) -> &std::path::Path {
        &self.runner.context().root
    }

    /// List every series and task
    pub fn list(&self) -> PipelineResult<PipelineListResult> {
        let series = self
            .graph
            .series_names()
            .into_iter()
            .map(|name| {
                Ok(SeriesInfo {
                    stages: self.graph.stages(&name)?,
                    name,
                })
            })
            .collect::<PipelineResult<Vec<_>>>()?;

        let tasks = self
            .graph
            .task_names()
            .into_iter()
            .filter_map(|name| {
                self.graph.task(&name).map(|recipe| TaskInfo {
                    kind: recipe.kind(),
                    name,
                })
            })
            .collect();

        Ok(PipelineListResult { series, tasks })
    }

    /// Compute the actions a target would perform against the current tree
    pub fn plan(&self, target: &str) -> PipelineResult<PlanResult> {
        let series = self.graph.resolve(target)?;
        let ctx = self.runner.context();

        let stages = series
            .steps
            .iter()
            .map(|step| {
                step.recipes()
                    .iter()
                    .map(|recipe| {
                        Ok(PlannedTask {
                            name: recipe.name().to_string(),
                            kind: recipe.kind(),
                            actions: recipe
                                .actions(ctx)?
                                .iter()
                                .map(|action| action.to_string())
                                .collect(),
                        })
                    })
                    .collect::<PipelineResult<Vec<_>>>()
            })
            .collect::<PipelineResult<Vec<_>>>()?;

        Ok(PlanResult {
            target: series.name,
            stages,
        })
    }

    /// Run a series or a single task
    pub async fn run(&self, target: &str) -> PipelineResult<RunSummary> {
        let series = self.graph.resolve(target)?;
        self.runner.run_series(&series).await
    }

    /// Graphviz rendering of the step ordering of a target
    pub fn graph_dot(&self, target: &str) -> PipelineResult<String> {
        let graph = self.graph.ordering_graph(target)?;
        Ok(format!("{}", Dot::with_config(&graph, &[Config::EdgeNoLabel])))
    }

    /// Directories whose changes should re-run `target`
    pub fn watch_dirs(&self, target: &str) -> PipelineResult<Vec<PathBuf>> {
        self.graph.watch_dirs(target)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.config.debounce_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::pipeline::CONFIG_FILE_NAME;
    use crate::recipes::test_support::write;

    const PACKAGE: &str = r#"{
        "name": "bootstrap-material-design",
        "version": "4.0.0",
        "homepage": "https://fezvrasta.github.io/bootstrap-material-design",
        "author": "Federico Zivolo <federico.zivolo@gmail.com>"
    }"#;

    fn manager(root: &std::path::Path, dry_run: bool) -> PipelineManager {
        PipelineManager::new(PipelineManagerConfig {
            workspace_root: root.to_path_buf(),
            dry_run,
        })
        .unwrap()
    }

    #[test]
    fn test_new_requires_package_metadata() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = PipelineManager::new(PipelineManagerConfig {
            workspace_root: temp_dir.path().to_path_buf(),
            dry_run: false,
        });

        let err = result.err().unwrap();
        assert!(err.to_string().contains("Failed to read package metadata"));
    }

    #[test]
    fn test_list_reports_series_and_tasks() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "package.json", PACKAGE);

        let result = manager(temp_dir.path(), false).list().unwrap();

        let default = result.series.iter().find(|s| s.name == "default").unwrap();
        assert_eq!(default.stages.len(), 4);
        assert!(result.tasks.iter().any(|t| t.name == "docs:vendor:uglify"));
        assert!(result.tasks.iter().any(|t| t.name == "minify:css"));
    }

    #[test]
    fn test_plan_lists_actions_per_stage() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "package.json", PACKAGE);
        write(temp_dir.path(), "scss/bootstrap-material-design.scss", "");
        write(temp_dir.path(), "scss/_variables.scss", "");

        let plan = manager(temp_dir.path(), false).plan("css").unwrap();

        assert_eq!(plan.target, "css");
        assert_eq!(plan.stages.len(), 2);
        assert_eq!(plan.stages[0][0].name, "scsslint");
        assert_eq!(plan.stages[1][0].name, "sass");
        assert_eq!(plan.stages[1][0].actions.len(), 1);
        assert!(plan.stages[1][0].actions[0]
            .contains("scss/bootstrap-material-design.scss:dist/bootstrap-material-design.css"));
    }

    #[test]
    fn test_config_file_overrides_tools_and_preset() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "package.json", PACKAGE);
        write(
            temp_dir.path(),
            CONFIG_FILE_NAME,
            "tools:\n  sass: node_modules/.bin/sass\npreset:\n  stylesheets:\n    dest: build\nwatch:\n  debounceMs: 50\n",
        );
        write(temp_dir.path(), "scss/site.scss", "");

        let manager = manager(temp_dir.path(), false);
        let plan = manager.plan("sass").unwrap();

        assert!(plan.stages[0][0].actions[0].starts_with("node_modules/.bin/sass"));
        assert!(plan.stages[0][0].actions[0].contains("scss/site.scss:build/site.css"));
        assert_eq!(manager.debounce(), Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_run_clean_removes_destinations() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "package.json", PACKAGE);
        write(temp_dir.path(), "dist/bootstrap-material-design.css", "");

        let summary = manager(temp_dir.path(), false).run("clean").await.unwrap();

        assert_eq!(summary.tasks.len(), 1);
        assert!(!temp_dir.path().join("dist").exists());
    }

    #[tokio::test]
    async fn test_dry_run_leaves_tree_untouched() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "package.json", PACKAGE);
        write(temp_dir.path(), "dist/bootstrap-material-design.css", "");

        manager(temp_dir.path(), true).run("clean").await.unwrap();

        assert!(temp_dir.path().join("dist").exists());
    }

    #[test]
    fn test_graph_dot_and_unknown_target() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "package.json", PACKAGE);
        let manager = manager(temp_dir.path(), false);

        let dot = manager.graph_dot("lint").unwrap();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("label = \"scsslint\""));
        assert!(dot.contains("1 -> 0"));
        // edges carry no label in the rendering
        assert!(!dot.contains("after"));

        let err = manager.graph_dot("deploy").unwrap_err();
        assert!(err.to_string().contains("Task or series 'deploy' not found"));
    }
}
