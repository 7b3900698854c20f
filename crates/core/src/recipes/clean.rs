use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::configs::preset::Preset;
use crate::configs::recipes::RecipeConfig;
use crate::merge::merge_all;
use crate::recipes::{Action, Recipe, RecipeKind, RunContext};
use crate::types::{PipelineError, PipelineResult};

/// Removes the output directories of a preset
#[derive(Debug)]
pub struct Clean {
    name: String,
    preset: Arc<Preset>,
    dest: Option<PathBuf>,
}

impl Clean {
    pub fn new(preset: Arc<Preset>, configs: &[RecipeConfig]) -> Self {
        let config = merge_all(&RecipeConfig::default(), configs);
        Self {
            name: config.task_name("clean"),
            preset,
            dest: config.dest,
        }
    }

    fn targets(&self) -> Vec<PathBuf> {
        match &self.dest {
            Some(dest) => vec![dest.clone()],
            None => self.preset.destinations(),
        }
    }
}

/// Only strictly nested, relative paths may be removed
fn ensure_removable(path: &Path) -> PipelineResult<()> {
    let mut depth = 0usize;
    for component in path.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            _ => {
                return Err(PipelineError::Path(format!(
                    "Refusing to clean '{}': outside of the workspace",
                    path.display()
                )))
            }
        }
    }

    if depth == 0 {
        return Err(PipelineError::Path(format!(
            "Refusing to clean '{}': it is the workspace root",
            path.display()
        )));
    }
    Ok(())
}

impl Recipe for Clean {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> RecipeKind {
        RecipeKind::Clean
    }

    fn actions(&self, ctx: &RunContext) -> PipelineResult<Vec<Action>> {
        let mut actions = Vec::new();
        for target in self.targets() {
            ensure_removable(&target)?;
            if ctx.resolve(&target).exists() {
                actions.push(Action::Remove(target));
            }
        }
        Ok(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::preset::{AssetOverrides, PresetOverrides};

    #[test]
    fn test_clean_removes_existing_destinations() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("dist")).unwrap();

        let preset = Arc::new(Preset::baseline(&PresetOverrides {
            stylesheets: Some(AssetOverrides {
                dest: Some(PathBuf::from("build/css")),
                ..AssetOverrides::default()
            }),
            ..PresetOverrides::default()
        }));
        let clean = Clean::new(preset, &[]);

        // build/css does not exist, so there is nothing to remove there
        let actions = clean.actions(&RunContext::new(temp_dir.path())).unwrap();
        assert_eq!(actions, vec![Action::Remove(PathBuf::from("dist"))]);
        assert_eq!(clean.name(), "clean");
    }

    #[test]
    fn test_clean_refuses_paths_outside_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let preset = Arc::new(Preset::default());

        for dest in ["../dist", ".", "/tmp/dist"] {
            let clean = Clean::new(
                preset.clone(),
                &[RecipeConfig {
                    dest: Some(PathBuf::from(dest)),
                    ..RecipeConfig::default()
                }],
            );
            let err = clean
                .actions(&RunContext::new(temp_dir.path()))
                .unwrap_err();
            assert!(err.to_string().contains("Refusing to clean"), "{}", dest);
        }
    }
}
