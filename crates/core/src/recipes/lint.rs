use std::path::PathBuf;

use crate::configs::pipeline::Tool;
use crate::configs::preset::{AssetConfig, Phase, Preset};
use crate::configs::recipes::RecipeConfig;
use crate::merge::merge_all;
use crate::recipes::{apply_phase, Action, Recipe, RecipeKind, RunContext, ToolInvocation};
use crate::types::PipelineResult;

/// Runs a linter over the source files of one asset category
#[derive(Debug)]
pub struct Lint {
    name: String,
    kind: RecipeKind,
    tool: Tool,
    source: Phase,
    watch: Phase,
}

impl Lint {
    /// `eslint` over the javascripts sources
    pub fn eslint(preset: &Preset, configs: &[RecipeConfig]) -> Self {
        Self::new(
            "eslint",
            RecipeKind::EsLint,
            Tool::EsLint,
            &preset.javascripts,
            configs,
        )
    }

    /// `scss-lint` over the stylesheets sources
    pub fn scss_lint(preset: &Preset, configs: &[RecipeConfig]) -> Self {
        Self::new(
            "scsslint",
            RecipeKind::ScssLint,
            Tool::ScssLint,
            &preset.stylesheets,
            configs,
        )
    }

    fn new(
        default_name: &str,
        kind: RecipeKind,
        tool: Tool,
        asset: &AssetConfig,
        configs: &[RecipeConfig],
    ) -> Self {
        let config = merge_all(&RecipeConfig::default(), configs);
        Self {
            name: config.task_name(default_name),
            kind,
            tool,
            source: apply_phase(&asset.source, &config.source),
            watch: apply_phase(&asset.watch, &config.watch),
        }
    }
}

impl Recipe for Lint {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> RecipeKind {
        self.kind
    }

    fn watch_dirs(&self) -> Vec<PathBuf> {
        vec![self.watch.cwd.clone()]
    }

    fn actions(&self, ctx: &RunContext) -> PipelineResult<Vec<Action>> {
        let files = ctx.select(&self.source)?;
        if files.is_empty() {
            tracing::warn!(task = %self.name, cwd = %self.source.cwd.display(), "no files to lint");
            return Ok(Vec::new());
        }

        let invocation = files
            .iter()
            .fold(ToolInvocation::new(&ctx.tools, self.tool), |inv, file| {
                inv.path_arg(file)
            });
        Ok(vec![Action::Invoke(invocation)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::preset::{AssetOverrides, PhaseOverride, PresetOverrides};
    use crate::recipes::test_support::write;

    fn preset() -> Preset {
        Preset::baseline(&PresetOverrides {
            javascripts: Some(AssetOverrides::sources("js/src")),
            stylesheets: Some(AssetOverrides::sources("scss")),
            ..PresetOverrides::default()
        })
    }

    #[test]
    fn test_eslint_lints_every_script() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "js/src/index.js", "");
        write(temp_dir.path(), "js/src/ripples.js", "");
        write(temp_dir.path(), "js/src/readme.md", "");

        let lint = Lint::eslint(&preset(), &[]);
        let actions = lint.actions(&RunContext::new(temp_dir.path())).unwrap();

        assert_eq!(lint.name(), "eslint");
        assert_eq!(lint.kind(), RecipeKind::EsLint);
        assert_eq!(lint.watch_dirs(), vec![PathBuf::from("js/src")]);
        match &actions[..] {
            [Action::Invoke(invocation)] => {
                assert_eq!(invocation.program, "eslint");
                assert_eq!(invocation.args, vec!["js/src/index.js", "js/src/ripples.js"]);
            }
            other => panic!("unexpected actions: {:?}", other),
        }
    }

    #[test]
    fn test_scss_lint_honours_glob_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "docs/assets/scss/docs.scss", "");
        write(temp_dir.path(), "docs/assets/scss/_anchor.scss", "");

        let lint = Lint::scss_lint(
            &Preset::baseline(&PresetOverrides {
                stylesheets: Some(AssetOverrides::sources("docs/assets/scss")),
                ..PresetOverrides::default()
            }),
            &[
                RecipeConfig::prefixed("docs:"),
                RecipeConfig {
                    source: Some(PhaseOverride::default().with_glob(&["**/*.scss", "!docs.scss"])),
                    ..RecipeConfig::default()
                },
            ],
        );
        let actions = lint.actions(&RunContext::new(temp_dir.path())).unwrap();

        assert_eq!(lint.name(), "docs:scsslint");
        assert_eq!(actions.len(), 1);
        assert_eq!(
            actions[0].to_string(),
            "scss-lint docs/assets/scss/_anchor.scss"
        );
    }

    #[test]
    fn test_lint_without_sources_plans_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let lint = Lint::scss_lint(&preset(), &[]);

        assert!(lint.actions(&RunContext::new(temp_dir.path())).unwrap().is_empty());
    }
}
