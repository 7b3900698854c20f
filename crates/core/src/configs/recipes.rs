//! Per-task override fragments
//!
//! Each recipe starts from the shared preset and layers any number of these
//! fragments on top, in order, via [`Merge`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::configs::preset::PhaseOverride;
use crate::merge::{replace, Merge};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskNaming {
    /// Replaces the recipe's default task name
    pub name: Option<String>,
    /// Prepended to the task name, e.g. `docs:`
    pub prefix: Option<String>,
}

impl Merge for TaskNaming {
    fn merge(&self, other: &Self) -> Self {
        Self {
            name: replace(&self.name, &other.name),
            prefix: replace(&self.prefix, &other.prefix),
        }
    }
}

/// Overrides understood by every recipe
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeConfig {
    pub task: Option<TaskNaming>,
    pub source: Option<PhaseOverride>,
    pub watch: Option<PhaseOverride>,
    pub dest: Option<PathBuf>,
}

impl RecipeConfig {
    pub fn prefixed(prefix: &str) -> Self {
        Self {
            task: Some(TaskNaming {
                name: None,
                prefix: Some(prefix.to_string()),
            }),
            ..Self::default()
        }
    }

    pub fn named(name: &str) -> Self {
        Self {
            task: Some(TaskNaming {
                name: Some(name.to_string()),
                prefix: None,
            }),
            ..Self::default()
        }
    }

    /// Fully qualified task name: prefix followed by the configured or default name
    pub fn task_name(&self, default_name: &str) -> String {
        let naming = self.task.clone().unwrap_or_default();
        format!(
            "{}{}",
            naming.prefix.unwrap_or_default(),
            naming.name.unwrap_or_else(|| default_name.to_string())
        )
    }
}

impl Merge for RecipeConfig {
    fn merge(&self, other: &Self) -> Self {
        Self {
            task: self.task.merge(&other.task),
            source: self.source.merge(&other.source),
            watch: self.watch.merge(&other.watch),
            dest: replace(&self.dest, &other.dest),
        }
    }
}

/// Options passed through to the bundler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollupOptions {
    /// Entry file relative to the javascripts source directory
    pub entry: Option<String>,
    /// Output file name, written into the javascripts destination
    pub dest: Option<String>,
    pub module_name: Option<String>,
    pub banner: Option<String>,
    pub external: Option<Vec<String>>,
    pub globals: Option<BTreeMap<String, String>>,
}

impl Merge for RollupOptions {
    fn merge(&self, other: &Self) -> Self {
        Self {
            entry: replace(&self.entry, &other.entry),
            dest: replace(&self.dest, &other.dest),
            module_name: replace(&self.module_name, &other.module_name),
            banner: replace(&self.banner, &other.banner),
            external: replace(&self.external, &other.external),
            globals: self.globals.merge(&other.globals),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollupConfig {
    pub recipe: RecipeConfig,
    pub options: Option<RollupOptions>,
}

impl RollupConfig {
    pub fn from_recipe(recipe: RecipeConfig) -> Self {
        Self {
            recipe,
            options: None,
        }
    }

    pub fn with_options(options: RollupOptions) -> Self {
        Self {
            recipe: RecipeConfig::default(),
            options: Some(options),
        }
    }
}

impl Merge for RollupConfig {
    fn merge(&self, other: &Self) -> Self {
        Self {
            recipe: self.recipe.merge(&other.recipe),
            options: self.options.merge(&other.options),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UglifyConfig {
    pub recipe: RecipeConfig,
    /// Output file name, written into the javascripts destination
    pub dest: Option<String>,
}

impl Merge for UglifyConfig {
    fn merge(&self, other: &Self) -> Self {
        Self {
            recipe: self.recipe.merge(&other.recipe),
            dest: replace(&self.dest, &other.dest),
        }
    }
}
