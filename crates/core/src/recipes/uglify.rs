use std::path::PathBuf;

use crate::configs::pipeline::Tool;
use crate::configs::preset::{Phase, Preset};
use crate::configs::recipes::UglifyConfig;
use crate::merge::merge_all;
use crate::recipes::{apply_phase, Action, Recipe, RecipeKind, RunContext, ToolInvocation};
use crate::types::PipelineResult;

/// Concatenates and minifies scripts into a single file
#[derive(Debug)]
pub struct Uglify {
    name: String,
    source: Phase,
    watch: Phase,
    output: PathBuf,
}

impl Uglify {
    pub fn new(preset: &Preset, configs: &[UglifyConfig]) -> Self {
        let config = merge_all(&UglifyConfig::default(), configs);
        let recipe = config.recipe;
        let name = recipe.task_name("uglify");
        let dest = recipe
            .dest
            .unwrap_or_else(|| preset.javascripts.dest.clone());

        Self {
            name,
            source: apply_phase(&preset.javascripts.source, &recipe.source),
            watch: apply_phase(&preset.javascripts.watch, &recipe.watch),
            output: dest.join(config.dest.unwrap_or_else(|| "index.min.js".to_string())),
        }
    }
}

impl Recipe for Uglify {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> RecipeKind {
        RecipeKind::Uglify
    }

    fn watch_dirs(&self) -> Vec<PathBuf> {
        vec![self.watch.cwd.clone()]
    }

    fn actions(&self, ctx: &RunContext) -> PipelineResult<Vec<Action>> {
        let files = ctx.select(&self.source)?;
        if files.is_empty() {
            tracing::warn!(task = %self.name, "no scripts to minify");
            return Ok(Vec::new());
        }

        let invocation = files
            .iter()
            .fold(ToolInvocation::new(&ctx.tools, Tool::UglifyJs), |inv, file| {
                inv.path_arg(file)
            })
            .arg("--compress")
            .arg("--mangle")
            .arg("-o")
            .path_arg(&self.output);
        Ok(vec![Action::Invoke(invocation)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::preset::{AssetOverrides, PhaseOverride, PresetOverrides};
    use crate::configs::recipes::RecipeConfig;
    use crate::recipes::test_support::write;

    #[test]
    fn test_vendor_scripts_are_concatenated() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "docs/assets/js/vendor/anchor.js", "");
        write(temp_dir.path(), "docs/assets/js/vendor/clipboard.js", "");

        let preset = Preset::baseline(&PresetOverrides {
            javascripts: Some(AssetOverrides {
                dest: Some(PathBuf::from("docs/dist")),
                ..AssetOverrides::sources("docs/assets/js/src")
            }),
            ..PresetOverrides::default()
        });
        let uglify = Uglify::new(
            &preset,
            &[
                UglifyConfig {
                    recipe: RecipeConfig::prefixed("docs:"),
                    dest: None,
                },
                UglifyConfig {
                    recipe: RecipeConfig {
                        source: Some(PhaseOverride::cwd("docs/assets/js/vendor")),
                        ..RecipeConfig::named("vendor:uglify")
                    },
                    dest: Some("docs-vendor.min.js".to_string()),
                },
            ],
        );

        assert_eq!(uglify.name(), "docs:vendor:uglify");
        let actions = uglify.actions(&RunContext::new(temp_dir.path())).unwrap();
        assert_eq!(
            actions.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
            vec![
                "uglifyjs docs/assets/js/vendor/anchor.js docs/assets/js/vendor/clipboard.js --compress --mangle -o docs/dist/docs-vendor.min.js"
            ]
        );
    }

    #[test]
    fn test_defaults_to_javascripts_dest_and_index_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "src/app.js", "");

        let uglify = Uglify::new(&Preset::default(), &[]);

        assert_eq!(uglify.name(), "uglify");
        assert_eq!(uglify.watch_dirs(), vec![PathBuf::from("src")]);
        let actions = uglify.actions(&RunContext::new(temp_dir.path())).unwrap();
        assert_eq!(
            actions.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
            vec!["uglifyjs src/app.js --compress --mangle -o dist/index.min.js"]
        );
    }
}
