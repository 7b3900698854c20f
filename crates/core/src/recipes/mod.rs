//! Task recipes
//!
//! A recipe is one concrete build operation built from a preset plus typed
//! overrides. Recipes do not touch the filesystem or spawn processes
//! themselves: [`Recipe::actions`] plans the work against the current state of
//! the workspace and the executor carries it out. This keeps `plan` and
//! `--dry-run` honest and lets every recipe be tested without the external
//! tools installed.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::configs::pipeline::{Tool, ToolsConfig};
use crate::configs::preset::{Phase, PhaseOverride};
use crate::transforms::ContentTransform;
use crate::types::PipelineResult;

pub mod clean;
pub mod copy;
pub mod lint;
pub mod minify;
pub mod rollup;
pub mod sass;
pub mod uglify;

pub use clean::Clean;
pub use copy::Copy;
pub use lint::Lint;
pub use minify::MinifyCss;
pub use rollup::{ModuleFormat, Rollup};
pub use sass::Sass;
pub use uglify::Uglify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeKind {
    Clean,
    Copy,
    EsLint,
    ScssLint,
    Sass,
    Rollup,
    MinifyCss,
    Uglify,
}

impl fmt::Display for RecipeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecipeKind::Clean => "clean",
            RecipeKind::Copy => "copy",
            RecipeKind::EsLint => "eslint",
            RecipeKind::ScssLint => "scss-lint",
            RecipeKind::Sass => "sass",
            RecipeKind::Rollup => "rollup",
            RecipeKind::MinifyCss => "minify-css",
            RecipeKind::Uglify => "uglify",
        };
        write!(f, "{}", label)
    }
}

/// A single run of an external program, relative to the workspace root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub tool: Tool,
    pub program: String,
    pub args: Vec<String>,
}

impl ToolInvocation {
    pub fn new(tools: &ToolsConfig, tool: Tool) -> Self {
        Self {
            tool,
            program: tools.program(tool),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        let arg = path.to_string_lossy().into_owned();
        self.arg(arg)
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// One unit of planned work. Paths are relative to the workspace root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Invoke(ToolInvocation),
    Remove(PathBuf),
    Copy {
        from: PathBuf,
        to: PathBuf,
        transform: Option<ContentTransform>,
    },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Invoke(invocation) => write!(f, "{}", invocation),
            Action::Remove(path) => write!(f, "remove {}", path.display()),
            Action::Copy {
                from,
                to,
                transform,
            } => {
                write!(f, "copy {} -> {}", from.display(), to.display())?;
                if let Some(transform) = transform {
                    write!(f, " ({:?})", transform)?;
                }
                Ok(())
            }
        }
    }
}

/// Everything a recipe needs to know about the run it is part of
#[derive(Debug, Clone)]
pub struct RunContext {
    pub root: PathBuf,
    pub tools: ToolsConfig,
    pub dry_run: bool,
}

impl RunContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            tools: ToolsConfig::default(),
            dry_run: false,
        }
    }

    /// Resolve a workspace-relative path
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Files selected by a phase, as workspace-relative paths
    pub fn select(&self, phase: &Phase) -> PipelineResult<Vec<PathBuf>> {
        let files = crate::files::collect_files(&self.resolve(&phase.cwd), &phase.globs)?;
        Ok(files.into_iter().map(|f| phase.cwd.join(f)).collect())
    }
}

/// A configured build operation
pub trait Recipe: Send + Sync + fmt::Debug {
    /// Fully qualified task name, including any prefix
    fn name(&self) -> &str;

    fn kind(&self) -> RecipeKind;

    /// Directories whose changes should trigger this recipe again
    fn watch_dirs(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    /// Plan the work this recipe would do right now
    fn actions(&self, ctx: &RunContext) -> PipelineResult<Vec<Action>>;
}

pub(crate) fn apply_phase(base: &Phase, over: &Option<PhaseOverride>) -> Phase {
    match over {
        Some(over) => base.with_override(over),
        None => base.clone(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    pub fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
}
