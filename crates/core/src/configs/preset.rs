//! Baseline source/watch/test locations per asset category
//!
//! A [`Preset`] is always complete. It is produced by [`Preset::baseline`] from
//! a set of typed [`PresetOverrides`], with every unspecified field falling back
//! to the defaults below.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::merge::{replace, Merge};

/// A working directory plus the globs selecting files inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub cwd: PathBuf,
    pub globs: Vec<String>,
}

impl Phase {
    pub fn new(cwd: impl Into<PathBuf>, globs: &[&str]) -> Self {
        Self {
            cwd: cwd.into(),
            globs: globs.iter().map(|g| g.to_string()).collect(),
        }
    }

    /// Apply an override, returning a new phase
    pub fn with_override(&self, over: &PhaseOverride) -> Self {
        Self {
            cwd: over.cwd.clone().unwrap_or_else(|| self.cwd.clone()),
            globs: over.glob.clone().unwrap_or_else(|| self.globs.clone()),
        }
    }
}

/// Locations for one asset category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    pub source: Phase,
    pub watch: Phase,
    pub test: Option<Phase>,
    pub dest: PathBuf,
}

impl AssetConfig {
    fn with_override(&self, over: &AssetOverrides) -> Self {
        let test = match (&self.test, &over.test) {
            (Some(test), Some(test_over)) => Some(test.with_override(test_over)),
            (None, Some(test_over)) => Some(
                Phase {
                    cwd: PathBuf::from("test"),
                    globs: self.source.globs.clone(),
                }
                .with_override(test_over),
            ),
            (test, None) => test.clone(),
        };

        Self {
            source: over
                .source
                .as_ref()
                .map_or_else(|| self.source.clone(), |o| self.source.with_override(o)),
            watch: over
                .watch
                .as_ref()
                .map_or_else(|| self.watch.clone(), |o| self.watch.with_override(o)),
            test,
            dest: over.dest.clone().unwrap_or_else(|| self.dest.clone()),
        }
    }
}

/// Shared baseline configuration read by every task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub javascripts: AssetConfig,
    pub stylesheets: AssetConfig,
    pub images: AssetConfig,
    pub post_processor: AssetConfig,
}

impl Default for Preset {
    fn default() -> Self {
        let scripts = Phase::new("src", &["**/*.js"]);
        let styles = Phase::new("src", &["**/*.scss"]);
        let images = Phase::new("images", &["**/*.{png,gif,jpg,jpeg,svg}"]);
        let dist = Phase::new("dist", &["**/*"]);

        Self {
            javascripts: AssetConfig {
                source: scripts.clone(),
                watch: scripts,
                test: Some(Phase::new("test", &["**/*.js"])),
                dest: PathBuf::from("dist"),
            },
            stylesheets: AssetConfig {
                source: styles.clone(),
                watch: styles,
                test: None,
                dest: PathBuf::from("dist"),
            },
            images: AssetConfig {
                source: images.clone(),
                watch: images,
                test: None,
                dest: PathBuf::from("dist"),
            },
            post_processor: AssetConfig {
                source: dist.clone(),
                watch: dist,
                test: None,
                dest: PathBuf::from("dist"),
            },
        }
    }
}

impl Preset {
    /// Build a complete preset from the defaults and the given overrides
    pub fn baseline(overrides: &PresetOverrides) -> Self {
        Self::default().with_overrides(overrides)
    }

    pub fn with_overrides(&self, overrides: &PresetOverrides) -> Self {
        let apply = |asset: &AssetConfig, over: &Option<AssetOverrides>| match over {
            Some(over) => asset.with_override(over),
            None => asset.clone(),
        };

        Self {
            javascripts: apply(&self.javascripts, &overrides.javascripts),
            stylesheets: apply(&self.stylesheets, &overrides.stylesheets),
            images: apply(&self.images, &overrides.images),
            post_processor: apply(&self.post_processor, &overrides.post_processor),
        }
    }

    /// Distinct output directories, in category order
    pub fn destinations(&self) -> Vec<PathBuf> {
        let mut dests: Vec<PathBuf> = Vec::new();
        for dest in [
            &self.javascripts.dest,
            &self.stylesheets.dest,
            &self.images.dest,
            &self.post_processor.dest,
        ] {
            if !dests.contains(dest) {
                dests.push(dest.clone());
            }
        }
        dests
    }
}

#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PhaseOverride {
    pub cwd: Option<PathBuf>,
    pub glob: Option<Vec<String>>,
}

impl PhaseOverride {
    pub fn cwd(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
            glob: None,
        }
    }

    pub fn with_glob(mut self, globs: &[&str]) -> Self {
        self.glob = Some(globs.iter().map(|g| g.to_string()).collect());
        self
    }
}

impl Merge for PhaseOverride {
    fn merge(&self, other: &Self) -> Self {
        Self {
            cwd: replace(&self.cwd, &other.cwd),
            glob: replace(&self.glob, &other.glob),
        }
    }
}

#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssetOverrides {
    pub source: Option<PhaseOverride>,
    pub watch: Option<PhaseOverride>,
    pub test: Option<PhaseOverride>,
    pub dest: Option<PathBuf>,
}

impl AssetOverrides {
    /// Point source and watch at the same directory
    pub fn sources(cwd: &str) -> Self {
        Self {
            source: Some(PhaseOverride::cwd(cwd)),
            watch: Some(PhaseOverride::cwd(cwd)),
            ..Self::default()
        }
    }
}

impl Merge for AssetOverrides {
    fn merge(&self, other: &Self) -> Self {
        Self {
            source: self.source.merge(&other.source),
            watch: self.watch.merge(&other.watch),
            test: self.test.merge(&other.test),
            dest: replace(&self.dest, &other.dest),
        }
    }
}

#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PresetOverrides {
    pub javascripts: Option<AssetOverrides>,
    pub stylesheets: Option<AssetOverrides>,
    pub images: Option<AssetOverrides>,
    pub post_processor: Option<AssetOverrides>,
}

impl Merge for PresetOverrides {
    fn merge(&self, other: &Self) -> Self {
        Self {
            javascripts: self.javascripts.merge(&other.javascripts),
            stylesheets: self.stylesheets.merge(&other.stylesheets),
            images: self.images.merge(&other.images),
            post_processor: self.post_processor.merge(&other.post_processor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_defaults() {
        let preset = Preset::baseline(&PresetOverrides::default());

        assert_eq!(preset.javascripts.source.cwd, PathBuf::from("src"));
        assert_eq!(preset.javascripts.source.globs, vec!["**/*.js".to_string()]);
        assert_eq!(
            preset.javascripts.test.as_ref().map(|t| t.cwd.clone()),
            Some(PathBuf::from("test"))
        );
        assert_eq!(preset.stylesheets.dest, PathBuf::from("dist"));
        assert!(preset.stylesheets.test.is_none());
        assert_eq!(preset.destinations(), vec![PathBuf::from("dist")]);
    }

    #[test]
    fn test_baseline_applies_overrides() {
        let preset = Preset::baseline(&PresetOverrides {
            javascripts: Some(AssetOverrides {
                test: Some(PhaseOverride::cwd("js/tests")),
                dest: Some(PathBuf::from("docs/dist")),
                ..AssetOverrides::sources("js/src")
            }),
            stylesheets: Some(AssetOverrides::sources("scss")),
            ..PresetOverrides::default()
        });

        assert_eq!(preset.javascripts.source.cwd, PathBuf::from("js/src"));
        assert_eq!(preset.javascripts.watch.cwd, PathBuf::from("js/src"));
        // unspecified glob keeps its default
        assert_eq!(preset.javascripts.source.globs, vec!["**/*.js".to_string()]);
        assert_eq!(
            preset.javascripts.test.as_ref().map(|t| t.cwd.clone()),
            Some(PathBuf::from("js/tests"))
        );
        assert_eq!(preset.stylesheets.source.cwd, PathBuf::from("scss"));
        assert_eq!(preset.images.source.cwd, PathBuf::from("images"));
        assert_eq!(
            preset.destinations(),
            vec![PathBuf::from("docs/dist"), PathBuf::from("dist")]
        );
    }

    #[test]
    fn test_override_merge_keeps_one_sided_keys() {
        let base = PresetOverrides {
            stylesheets: Some(AssetOverrides::sources("scss")),
            ..PresetOverrides::default()
        };
        let over = PresetOverrides {
            stylesheets: Some(AssetOverrides {
                source: Some(PhaseOverride::default().with_glob(&["**/*.scss", "!docs.scss"])),
                ..AssetOverrides::default()
            }),
            ..PresetOverrides::default()
        };

        let merged = base.merge(&over);
        let source = merged
            .stylesheets
            .as_ref()
            .and_then(|s| s.source.clone())
            .unwrap();

        assert_eq!(source.cwd, Some(PathBuf::from("scss")));
        assert_eq!(
            source.glob,
            Some(vec!["**/*.scss".to_string(), "!docs.scss".to_string()])
        );
        assert_eq!(base.stylesheets.as_ref().unwrap().source.as_ref().unwrap().glob, None);
    }

    #[test]
    fn test_overrides_reject_unknown_fields() {
        let yaml = "javascripts:\n  source:\n    cdw: js/src\n";
        let parsed: Result<PresetOverrides, _> = serde_yaml::from_str(yaml);
        assert!(parsed.is_err());
    }
}
