//! The Bootstrap Material Design pipeline
//!
//! [`build_graph`] declares every task of the library and of its documentation
//! site and binds them into the named series the CLI exposes.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::configs::package::PackageMetadata;
use crate::configs::pipeline::PipelineConfig;
use crate::configs::preset::{AssetOverrides, PhaseOverride, Preset, PresetOverrides};
use crate::configs::recipes::{RecipeConfig, RollupConfig, RollupOptions, UglifyConfig};
use crate::graph::{BuildGraph, RecipeRef, Step};
use crate::merge::Merge;
use crate::recipes::{Clean, Copy, Lint, MinifyCss, ModuleFormat, Rollup, Sass, Uglify};
use crate::transforms::ContentTransform;
use crate::types::PipelineResult;

pub const DOCS_PREFIX: &str = "docs:";
const MODULE_NAME: &str = "bootstrapMaterialDesign";

/// Inputs the pipeline definition depends on
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub package: PackageMetadata,
    /// Copyright year stamped into the bundle banner
    pub year: i32,
    pub config: PipelineConfig,
}

pub fn library_preset(config: &PipelineConfig) -> Preset {
    let defaults = PresetOverrides {
        javascripts: Some(AssetOverrides {
            test: Some(PhaseOverride::cwd("js/tests")),
            ..AssetOverrides::sources("js/src")
        }),
        stylesheets: Some(AssetOverrides::sources("scss")),
        images: Some(AssetOverrides::sources("images")),
        ..PresetOverrides::default()
    };
    Preset::baseline(&defaults.merge(&config.preset.clone().unwrap_or_default()))
}

pub fn docs_preset(config: &PipelineConfig) -> Preset {
    let defaults = PresetOverrides {
        javascripts: Some(AssetOverrides {
            test: Some(PhaseOverride::cwd("docs/assets/js/tests")),
            dest: Some(PathBuf::from("docs/dist")),
            ..AssetOverrides::sources("docs/assets/js/src")
        }),
        stylesheets: Some(AssetOverrides {
            dest: Some(PathBuf::from("docs/dist")),
            ..AssetOverrides::sources("docs/assets/scss")
        }),
        ..PresetOverrides::default()
    };
    Preset::baseline(&defaults.merge(&config.docs_preset.clone().unwrap_or_default()))
}

/// Options shared by every bundle
pub fn rollup_template(package: &PackageMetadata, year: i32) -> RollupConfig {
    RollupConfig::with_options(RollupOptions {
        external: Some(vec!["anchor-js".to_string(), "clipboard".to_string()]),
        globals: Some(BTreeMap::from([
            ("anchor-js".to_string(), "anchors".to_string()),
            ("clipboard".to_string(), "Clipboard".to_string()),
        ])),
        banner: Some(package.banner(year)),
        ..RollupOptions::default()
    })
}

fn bundle(dest: &str, module_name: Option<&str>) -> RollupConfig {
    RollupConfig::with_options(RollupOptions {
        dest: Some(dest.to_string()),
        module_name: module_name.map(str::to_string),
        ..RollupOptions::default()
    })
}

/// Build every task and series of the pipeline
pub fn build_graph(ctx: &PipelineContext) -> PipelineResult<BuildGraph> {
    let mut graph = BuildGraph::new();
    let rollup = rollup_template(&ctx.package, ctx.year);

    register_library(&mut graph, &ctx.config, &rollup)?;
    register_docs(&mut graph, &ctx.config, &rollup)?;

    Ok(graph)
}

fn register_library(
    graph: &mut BuildGraph,
    config: &PipelineConfig,
    rollup: &RollupConfig,
) -> PipelineResult<()> {
    let preset = Arc::new(library_preset(config));

    let rollups: Vec<RecipeRef> = vec![
        graph.register_task(Rollup::new(
            ModuleFormat::Es,
            &preset,
            &[rollup.clone(), bundle("bootstrap-material-design.es.js", None)],
        )?)?,
        graph.register_task(Rollup::new(
            ModuleFormat::Umd,
            &preset,
            &[
                rollup.clone(),
                bundle("bootstrap-material-design.umd.js", Some(MODULE_NAME)),
            ],
        )?)?,
        graph.register_task(Rollup::new(
            ModuleFormat::Iife,
            &preset,
            &[
                rollup.clone(),
                bundle("bootstrap-material-design.iife.js", Some(MODULE_NAME)),
            ],
        )?)?,
    ];

    let eslint = graph.register_task(Lint::eslint(&preset, &[]))?;
    let scsslint = graph.register_task(Lint::scss_lint(&preset, &[]))?;
    let sass = graph.register_task(Sass::new(&preset, &[]))?;
    let clean = graph.register_task(Clean::new(preset.clone(), &[]))?;
    let minify = graph.register_task(MinifyCss::new(&preset, &[]))?;
    let lint = [scsslint.clone(), eslint.clone()];

    graph.register_series(
        "default",
        vec![
            Step::task(&clean),
            Step::from(&lint[..]),
            Step::parallel([Step::task(&sass), Step::from(&rollups[..])]),
            Step::task(&minify),
        ],
    )?;
    graph.register_series("lint", lint.iter().map(Step::task).collect())?;
    graph.register_series("js", vec![Step::task(&eslint), Step::from(&rollups[..])])?;
    graph.register_series("css", vec![Step::task(&scsslint), Step::task(&sass)])?;

    Ok(())
}

fn register_docs(
    graph: &mut BuildGraph,
    config: &PipelineConfig,
    rollup: &RollupConfig,
) -> PipelineResult<()> {
    let preset = docs_preset(config);
    let docs = RecipeConfig::prefixed(DOCS_PREFIX);
    let without_docs_scss = PhaseOverride::default().with_glob(&["**/*.scss", "!docs.scss"]);

    let lint = [
        graph.register_task(Lint::scss_lint(
            &preset,
            &[
                docs.clone(),
                RecipeConfig {
                    source: Some(without_docs_scss.clone()),
                    watch: Some(without_docs_scss),
                    ..RecipeConfig::default()
                },
            ],
        ))?,
        graph.register_task(Lint::eslint(&preset, &[docs.clone()]))?,
    ];

    let assets = [
        graph.register_task(Rollup::new(
            ModuleFormat::Iife,
            &preset,
            &[
                RollupConfig::from_recipe(docs.clone()),
                rollup.clone(),
                bundle("docs.iife.js", Some("docs")),
            ],
        )?)?,
        graph.register_task(Uglify::new(
            &preset,
            &[
                UglifyConfig {
                    recipe: docs.clone(),
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
        ))?,
        graph.register_task(Sass::new(&preset, &[docs.clone()]))?,
    ];

    graph.register_series(
        &format!("{}default", DOCS_PREFIX),
        vec![Step::from(&lint[..]), Step::from(&assets[..])],
    )?;

    let bootstrap_docs = config.bootstrap_docs();
    let copy = |name: &str, source: &str, globs: &[&str], dest: &str| RecipeConfig {
        source: Some(PhaseOverride::cwd(bootstrap_docs.join(source)).with_glob(globs)),
        dest: Some(PathBuf::from(dest)),
        ..RecipeConfig::named(name)
    };

    let copies = [
        graph.register_task(Copy::new(
            &preset,
            &[
                docs.clone(),
                copy("copy:bs-docs-content", "content", &["**/*"], "docs/content/"),
            ],
            Some(ContentTransform::BootstrapDocs),
        ))?,
        graph.register_task(Copy::new(
            &preset,
            &[
                docs.clone(),
                copy("copy:bs-docs-components", "components", &["**/*"], "docs/components/"),
            ],
            Some(ContentTransform::BootstrapDocs),
        ))?,
        // keeps the local docs.scss variable customizations
        graph.register_task(Copy::new(
            &preset,
            &[
                docs.clone(),
                copy(
                    "copy:bs-docs-scss",
                    "assets/scss",
                    &["**/*", "!docs.scss"],
                    "docs/assets/scss/",
                ),
            ],
            Some(ContentTransform::DoNotEditHeader),
        ))?,
        graph.register_task(Copy::new(
            &preset,
            &[
                docs,
                copy("copy:bs-docs-plugins", "_plugins", &["**/*", "!bridge.rb"], "docs/_plugins/"),
            ],
            None,
        ))?,
    ];

    graph.register_series(
        &format!("{}copy-bs", DOCS_PREFIX),
        copies.iter().map(Step::task).collect(),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::package::parse_package_metadata;
    use crate::recipes::test_support::write;
    use crate::recipes::{Action, RunContext};

    fn context() -> PipelineContext {
        PipelineContext {
            package: parse_package_metadata(
                r#"{"version": "4.0.0", "homepage": "https://example.com", "author": "FezVrasta"}"#,
            )
            .unwrap(),
            year: 2016,
            config: PipelineConfig::default(),
        }
    }

    fn names(stage: &[&str]) -> Vec<String> {
        stage.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_library_series() {
        let graph = build_graph(&context()).unwrap();

        assert_eq!(
            graph.stages("default").unwrap(),
            vec![
                names(&["clean"]),
                names(&["scsslint", "eslint"]),
                names(&["sass", "rollup:es", "rollup:umd", "rollup:iife"]),
                names(&["minify:css"]),
            ]
        );
        assert_eq!(
            graph.stages("lint").unwrap(),
            vec![names(&["scsslint"]), names(&["eslint"])]
        );
        assert_eq!(
            graph.stages("js").unwrap(),
            vec![
                names(&["eslint"]),
                names(&["rollup:es", "rollup:umd", "rollup:iife"])
            ]
        );
        assert_eq!(
            graph.stages("css").unwrap(),
            vec![names(&["scsslint"]), names(&["sass"])]
        );
    }

    #[test]
    fn test_docs_series() {
        let graph = build_graph(&context()).unwrap();

        assert_eq!(
            graph.stages("docs:copy-bs").unwrap(),
            vec![
                names(&["docs:copy:bs-docs-content"]),
                names(&["docs:copy:bs-docs-components"]),
                names(&["docs:copy:bs-docs-scss"]),
                names(&["docs:copy:bs-docs-plugins"]),
            ]
        );
        assert_eq!(
            graph.stages("docs:default").unwrap(),
            vec![
                names(&["docs:scsslint", "docs:eslint"]),
                names(&["docs:rollup:iife", "docs:vendor:uglify", "docs:sass"]),
            ]
        );
        assert_eq!(
            graph.series_names(),
            names(&["css", "default", "docs:copy-bs", "docs:default", "js", "lint"])
        );
    }

    #[test]
    fn test_bundles_share_one_banner() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "js/src/index.js", "");
        let graph = build_graph(&context()).unwrap();
        let ctx = RunContext::new(temp_dir.path());

        let banners: Vec<String> = ["rollup:es", "rollup:umd", "rollup:iife"]
            .iter()
            .map(|name| {
                let actions = graph.task(name).unwrap().actions(&ctx).unwrap();
                match &actions[..] {
                    [Action::Invoke(invocation)] => {
                        let at = invocation.args.iter().position(|a| a == "--banner").unwrap();
                        invocation.args[at + 1].clone()
                    }
                    other => panic!("unexpected actions: {:?}", other),
                }
            })
            .collect();

        assert!(banners.iter().all(|b| b == &banners[0]));
        assert!(banners[0].contains("Bootstrap Material Design v4.0.0 (https://example.com)"));
        assert!(banners[0].contains("Copyright 2014-2016 FezVrasta"));
    }

    #[test]
    fn test_docs_copy_rewrites_reference_pages() {
        let temp_dir = tempfile::tempdir().unwrap();
        let workspace = temp_dir.path().join("bootstrap-material-design");
        write(
            temp_dir.path(),
            "bootstrap/docs/content/typography.md",
            "---\nlayout: docs\n---\n<h1>Fancy display heading</h1>",
        );
        write(temp_dir.path(), "bootstrap/docs/_plugins/bridge.rb", "");
        write(temp_dir.path(), "bootstrap/docs/_plugins/highlight.rb", "");
        std::fs::create_dir_all(&workspace).unwrap();

        let graph = build_graph(&context()).unwrap();
        let ctx = RunContext::new(&workspace);

        let content = graph
            .task("docs:copy:bs-docs-content")
            .unwrap()
            .actions(&ctx)
            .unwrap();
        assert_eq!(
            content,
            vec![Action::Copy {
                from: PathBuf::from("../bootstrap/docs/content/typography.md"),
                to: PathBuf::from("docs/content/typography.md"),
                transform: Some(ContentTransform::BootstrapDocs),
            }]
        );

        let plugins = graph
            .task("docs:copy:bs-docs-plugins")
            .unwrap()
            .actions(&ctx)
            .unwrap();
        assert_eq!(plugins.len(), 1);
        assert!(plugins[0].to_string().ends_with("docs/_plugins/highlight.rb"));
    }

    #[test]
    fn test_config_file_overrides_reach_the_preset() {
        let mut ctx = context();
        ctx.config.preset = Some(PresetOverrides {
            stylesheets: Some(AssetOverrides {
                dest: Some(PathBuf::from("build")),
                ..AssetOverrides::default()
            }),
            ..PresetOverrides::default()
        });

        let preset = library_preset(&ctx.config);
        assert_eq!(preset.stylesheets.dest, PathBuf::from("build"));
        // untouched fields keep the library defaults
        assert_eq!(preset.stylesheets.source.cwd, PathBuf::from("scss"));
    }
}
