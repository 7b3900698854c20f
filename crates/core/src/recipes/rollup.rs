use std::fmt;
use std::path::PathBuf;

use crate::configs::pipeline::Tool;
use crate::configs::preset::{Phase, Preset};
use crate::configs::recipes::{RollupConfig, RollupOptions};
use crate::merge::merge_all;
use crate::recipes::{apply_phase, Action, Recipe, RecipeKind, RunContext, ToolInvocation};
use crate::types::{PipelineError, PipelineResult};

/// Module wrapping convention of a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleFormat {
    Es,
    Umd,
    Iife,
}

impl ModuleFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleFormat::Es => "es",
            ModuleFormat::Umd => "umd",
            ModuleFormat::Iife => "iife",
        }
    }

    /// UMD and IIFE bundles expose their exports through a global name
    pub fn needs_module_name(&self) -> bool {
        !matches!(self, ModuleFormat::Es)
    }
}

impl fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bundles the javascripts entry point in one module format
#[derive(Debug)]
pub struct Rollup {
    name: String,
    format: ModuleFormat,
    source: Phase,
    watch: Phase,
    dest: PathBuf,
    options: RollupOptions,
}

impl Rollup {
    pub fn new(
        format: ModuleFormat,
        preset: &Preset,
        configs: &[RollupConfig],
    ) -> PipelineResult<Self> {
        let config = merge_all(&RollupConfig::default(), configs);
        let recipe = config.recipe;
        let options = config.options.unwrap_or_default();
        let name = recipe.task_name(&format!("rollup:{}", format));

        if format.needs_module_name() && options.module_name.is_none() {
            return Err(PipelineError::Config(format!(
                "Task '{}' builds a {} bundle and needs a module name",
                name, format
            )));
        }

        Ok(Self {
            name,
            format,
            source: apply_phase(&preset.javascripts.source, &recipe.source),
            watch: apply_phase(&preset.javascripts.watch, &recipe.watch),
            dest: recipe
                .dest
                .unwrap_or_else(|| preset.javascripts.dest.clone()),
            options,
        })
    }

    pub fn output_file(&self) -> PathBuf {
        let file = self
            .options
            .dest
            .clone()
            .unwrap_or_else(|| format!("index.{}.js", self.format));
        self.dest.join(file)
    }
}

impl Recipe for Rollup {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> RecipeKind {
        RecipeKind::Rollup
    }

    fn watch_dirs(&self) -> Vec<PathBuf> {
        vec![self.watch.cwd.clone()]
    }

    fn actions(&self, ctx: &RunContext) -> PipelineResult<Vec<Action>> {
        let entry = self
            .source
            .cwd
            .join(self.options.entry.as_deref().unwrap_or("index.js"));
        if !ctx.resolve(&entry).is_file() {
            return Err(PipelineError::Task(format!(
                "Entry file '{}' for task '{}' not found",
                entry.display(),
                self.name
            )));
        }

        let mut invocation = ToolInvocation::new(&ctx.tools, Tool::Rollup)
            .path_arg(&entry)
            .arg("--format")
            .arg(self.format.as_str())
            .arg("--file")
            .path_arg(&self.output_file());

        if let Some(module_name) = &self.options.module_name {
            invocation = invocation.arg("--name").arg(module_name.clone());
        }
        if let Some(banner) = &self.options.banner {
            invocation = invocation.arg("--banner").arg(banner.clone());
        }
        if let Some(external) = self.options.external.as_ref().filter(|e| !e.is_empty()) {
            invocation = invocation.arg("--external").arg(external.join(","));
        }
        if let Some(globals) = self.options.globals.as_ref().filter(|g| !g.is_empty()) {
            let globals = globals
                .iter()
                .map(|(module, global)| format!("{}:{}", module, global))
                .collect::<Vec<_>>()
                .join(",");
            invocation = invocation.arg("--globals").arg(globals);
        }

        Ok(vec![Action::Invoke(invocation)])
    }
}
