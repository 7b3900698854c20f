use std::path::{Path, PathBuf};

use crate::configs::pipeline::Tool;
use crate::configs::preset::{Phase, Preset};
use crate::configs::recipes::RecipeConfig;
use crate::merge::merge_all;
use crate::recipes::{apply_phase, Action, Recipe, RecipeKind, RunContext, ToolInvocation};
use crate::types::PipelineResult;

/// Compiles every non-partial stylesheet into the stylesheets destination
#[derive(Debug)]
pub struct Sass {
    name: String,
    source: Phase,
    watch: Phase,
    dest: PathBuf,
}

impl Sass {
    pub fn new(preset: &Preset, configs: &[RecipeConfig]) -> Self {
        let config = merge_all(&RecipeConfig::default(), configs);
        Self {
            name: config.task_name("sass"),
            source: apply_phase(&preset.stylesheets.source, &config.source),
            watch: apply_phase(&preset.stylesheets.watch, &config.watch),
            dest: config
                .dest
                .unwrap_or_else(|| preset.stylesheets.dest.clone()),
        }
    }
}

fn is_partial(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('_'))
}

impl Recipe for Sass {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> RecipeKind {
        RecipeKind::Sass
    }

    fn watch_dirs(&self) -> Vec<PathBuf> {
        vec![self.watch.cwd.clone()]
    }

    fn actions(&self, ctx: &RunContext) -> PipelineResult<Vec<Action>> {
        let entries: Vec<PathBuf> =
            crate::files::collect_files(&ctx.resolve(&self.source.cwd), &self.source.globs)?
                .into_iter()
                .filter(|file| !is_partial(file))
                .collect();

        if entries.is_empty() {
            tracing::warn!(task = %self.name, "no stylesheets to compile");
            return Ok(Vec::new());
        }

        let invocation = entries.iter().fold(
            ToolInvocation::new(&ctx.tools, Tool::Sass)
                .arg("--load-path=node_modules")
                .arg("--style=expanded"),
            |inv, entry| {
                let input = self.source.cwd.join(entry);
                let output = self.dest.join(entry).with_extension("css");
                inv.arg(format!("{}:{}", input.display(), output.display()))
            },
        );
        Ok(vec![Action::Invoke(invocation)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::preset::{AssetOverrides, PresetOverrides};
    use crate::recipes::test_support::write;

    #[test]
    fn test_sass_skips_partials_and_maps_outputs() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "scss/bootstrap-material-design.scss", "");
        write(temp_dir.path(), "scss/_variables.scss", "");
        write(temp_dir.path(), "scss/themes/dark.scss", "");

        let sass = Sass::new(
            &Preset::baseline(&PresetOverrides {
                stylesheets: Some(AssetOverrides::sources("scss")),
                ..PresetOverrides::default()
            }),
            &[],
        );
        let actions = sass.actions(&RunContext::new(temp_dir.path())).unwrap();

        match &actions[..] {
            [Action::Invoke(invocation)] => assert_eq!(
                invocation.args,
                vec![
                    "--load-path=node_modules",
                    "--style=expanded",
                    "scss/bootstrap-material-design.scss:dist/bootstrap-material-design.css",
                    "scss/themes/dark.scss:dist/themes/dark.css",
                ]
            ),
            other => panic!("unexpected actions: {:?}", other),
        }
    }

    #[test]
    fn test_sass_prefixed_name_and_dest() {
        let sass = Sass::new(
            &Preset::baseline(&PresetOverrides {
                stylesheets: Some(AssetOverrides {
                    dest: Some(PathBuf::from("docs/dist")),
                    ..AssetOverrides::sources("docs/assets/scss")
                }),
                ..PresetOverrides::default()
            }),
            &[RecipeConfig::prefixed("docs:")],
        );

        assert_eq!(sass.name(), "docs:sass");
        assert_eq!(sass.dest, PathBuf::from("docs/dist"));
        assert_eq!(sass.watch_dirs(), vec![PathBuf::from("docs/assets/scss")]);
    }
}
