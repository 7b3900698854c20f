use std::path::PathBuf;

use crate::configs::pipeline::Tool;
use crate::configs::preset::{Phase, Preset};
use crate::configs::recipes::RecipeConfig;
use crate::merge::merge_all;
use crate::recipes::{apply_phase, Action, Recipe, RecipeKind, RunContext, ToolInvocation};
use crate::types::PipelineResult;

/// Writes a `.min.css` next to every compiled stylesheet in the post-processor source
#[derive(Debug)]
pub struct MinifyCss {
    name: String,
    source: Phase,
    dest: PathBuf,
}

impl MinifyCss {
    pub fn new(preset: &Preset, configs: &[RecipeConfig]) -> Self {
        let config = merge_all(&RecipeConfig::default(), configs);
        let base = Phase {
            cwd: preset.post_processor.source.cwd.clone(),
            globs: vec!["**/*.css".to_string(), "!**/*.min.css".to_string()],
        };
        Self {
            name: config.task_name("minify:css"),
            source: apply_phase(&base, &config.source),
            dest: config
                .dest
                .unwrap_or_else(|| preset.post_processor.dest.clone()),
        }
    }
}

impl Recipe for MinifyCss {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> RecipeKind {
        RecipeKind::MinifyCss
    }

    fn actions(&self, ctx: &RunContext) -> PipelineResult<Vec<Action>> {
        let files = crate::files::collect_files(&ctx.resolve(&self.source.cwd), &self.source.globs)?;
        Ok(files
            .into_iter()
            .map(|relative| {
                let output = self.dest.join(&relative).with_extension("min.css");
                Action::Invoke(
                    ToolInvocation::new(&ctx.tools, Tool::CleanCss)
                        .arg("-o")
                        .path_arg(&output)
                        .path_arg(&self.source.cwd.join(&relative)),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::test_support::write;

    #[test]
    fn test_minify_skips_already_minified() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "dist/bootstrap-material-design.css", "");
        write(temp_dir.path(), "dist/bootstrap-material-design.min.css", "");
        write(temp_dir.path(), "dist/bootstrap-material-design.umd.js", "");

        let minify = MinifyCss::new(&Preset::default(), &[]);
        let actions = minify.actions(&RunContext::new(temp_dir.path())).unwrap();

        assert_eq!(minify.name(), "minify:css");
        assert_eq!(
            actions.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
            vec![
                "cleancss -o dist/bootstrap-material-design.min.css dist/bootstrap-material-design.css"
            ]
        );
        // minification output must never retrigger a watch
        assert!(minify.watch_dirs().is_empty());
    }
}
