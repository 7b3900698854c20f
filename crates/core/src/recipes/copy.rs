use std::path::PathBuf;

use crate::configs::preset::{Phase, Preset};
use crate::configs::recipes::RecipeConfig;
use crate::merge::merge_all;
use crate::recipes::{apply_phase, Action, Recipe, RecipeKind, RunContext};
use crate::transforms::ContentTransform;
use crate::types::PipelineResult;

/// Copies selected files into a destination, preserving their relative
/// layout and optionally rewriting their content. Defaults to the images
/// category of the preset.
#[derive(Debug)]
pub struct Copy {
    name: String,
    source: Phase,
    dest: PathBuf,
    transform: Option<ContentTransform>,
}

impl Copy {
    pub fn new(
        preset: &Preset,
        configs: &[RecipeConfig],
        transform: Option<ContentTransform>,
    ) -> Self {
        let config = merge_all(&RecipeConfig::default(), configs);
        Self {
            name: config.task_name("copy"),
            source: apply_phase(&preset.images.source, &config.source),
            dest: config.dest.unwrap_or_else(|| preset.images.dest.clone()),
            transform,
        }
    }
}

impl Recipe for Copy {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> RecipeKind {
        RecipeKind::Copy
    }

    fn actions(&self, ctx: &RunContext) -> PipelineResult<Vec<Action>> {
        let files = crate::files::collect_files(&ctx.resolve(&self.source.cwd), &self.source.globs)?;
        Ok(files
            .into_iter()
            .map(|relative| Action::Copy {
                from: self.source.cwd.join(&relative),
                to: self.dest.join(&relative),
                transform: self.transform,
            })
            .collect())
    }
}
