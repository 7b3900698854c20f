use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use serde_json::Value as JsonValue;

use crate::configs::preset::PresetOverrides;
use crate::merge::deep_merge;
use crate::types::{PipelineError, PipelineResult};

pub const CONFIG_FILE_NAME: &str = "bmd-build.yml";
pub const LOCAL_CONFIG_FILE_NAME: &str = "bmd-build.local.yml";

/// Contents of the optional `bmd-build.yml` at the workspace root
#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PipelineConfig {
    /// Package metadata file used for the bundle banner. Defaults to `package.json`.
    pub package_file: Option<PathBuf>,
    /// Documentation tree of the upstream Bootstrap checkout. Defaults to `../bootstrap/docs`.
    pub bootstrap_docs: Option<PathBuf>,
    pub tools: Option<ToolsConfig>,
    /// Merged over the library preset
    pub preset: Option<PresetOverrides>,
    /// Merged over the documentation preset
    pub docs_preset: Option<PresetOverrides>,
    pub watch: Option<WatchConfig>,
}

impl PipelineConfig {
    pub fn package_file(&self) -> PathBuf {
        self.package_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("package.json"))
    }

    pub fn bootstrap_docs(&self) -> PathBuf {
        self.bootstrap_docs
            .clone()
            .unwrap_or_else(|| PathBuf::from("../bootstrap/docs"))
    }

    pub fn tools(&self) -> ToolsConfig {
        self.tools.clone().unwrap_or_default()
    }

    pub fn debounce_ms(&self) -> u64 {
        self.watch
            .as_ref()
            .and_then(|w| w.debounce_ms)
            .unwrap_or(300)
    }
}

/// Program names for the external tools, for installs outside `PATH`
#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToolsConfig {
    pub sass: Option<String>,
    pub eslint: Option<String>,
    pub scss_lint: Option<String>,
    pub rollup: Option<String>,
    pub cleancss: Option<String>,
    pub uglifyjs: Option<String>,
}

/// The external programs a recipe may call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Sass,
    EsLint,
    ScssLint,
    Rollup,
    CleanCss,
    UglifyJs,
}

impl Tool {
    pub fn default_program(&self) -> &'static str {
        match self {
            Tool::Sass => "sass",
            Tool::EsLint => "eslint",
            Tool::ScssLint => "scss-lint",
            Tool::Rollup => "rollup",
            Tool::CleanCss => "cleancss",
            Tool::UglifyJs => "uglifyjs",
        }
    }
}

impl ToolsConfig {
    /// Resolve the program to run for a tool
    pub fn program(&self, tool: Tool) -> String {
        let configured = match tool {
            Tool::Sass => &self.sass,
            Tool::EsLint => &self.eslint,
            Tool::ScssLint => &self.scss_lint,
            Tool::Rollup => &self.rollup,
            Tool::CleanCss => &self.cleancss,
            Tool::UglifyJs => &self.uglifyjs,
        };
        configured
            .clone()
            .unwrap_or_else(|| tool.default_program().to_string())
    }
}

#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WatchConfig {
    pub debounce_ms: Option<u64>,
}

/// Load `bmd-build.yml` from the workspace root and deep-merge an untracked
/// `bmd-build.local.yml` over it. Missing files contribute nothing, so a bare
/// checkout runs on defaults.
pub fn load_pipeline_config(workspace_root: &Path) -> PipelineResult<PipelineConfig> {
    let mut merged = JsonValue::Object(Default::default());
    let mut sources = Vec::new();

    for name in [CONFIG_FILE_NAME, LOCAL_CONFIG_FILE_NAME] {
        let path = workspace_root.join(name);
        if let Some(layer) = read_config_layer(&path)? {
            merged = deep_merge(&merged, &layer);
            sources.push(path.display().to_string());
        }
    }

    if sources.is_empty() {
        return Ok(PipelineConfig::default());
    }

    serde_json::from_value(merged).map_err(|e| {
        PipelineError::Config(format!(
            "Failed to parse pipeline config {}: {}",
            sources.join(" + "),
            e
        ))
    })
}

fn read_config_layer(path: &Path) -> PipelineResult<Option<JsonValue>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        PipelineError::Config(format!(
            "Failed to read pipeline config {}: {}",
            path.display(),
            e
        ))
    })?;

    let layer: JsonValue = serde_yaml::from_str(&content).map_err(|e| {
        PipelineError::Config(format!(
            "Failed to parse pipeline config {}: {}",
            path.display(),
            e
        ))
    })?;

    // an empty file is an empty layer
    Ok(match layer {
        JsonValue::Null => None,
        layer => Some(layer),
    })
}

/// JSON schema of `bmd-build.yml`, for editor completion
pub fn config_schema() -> PipelineResult<String> {
    let schema = schemars::schema_for!(PipelineConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}
