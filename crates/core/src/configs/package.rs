use std::path::Path;

use serde::Deserialize;

use crate::types::{PipelineError, PipelineResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    Person {
        name: String,
        email: Option<String>,
        url: Option<String>,
    },
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Author::Name(name) => write!(f, "{}", name),
            Author::Person { name, .. } => write!(f, "{}", name),
        }
    }
}

/// The subset of `package.json` the pipeline interpolates into generated files
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PackageMetadata {
    pub name: Option<String>,
    pub version: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
}

impl PackageMetadata {
    /// Header comment shared by every JavaScript bundle
    pub fn banner(&self, year: i32) -> String {
        let author = self
            .author
            .as_ref()
            .map(|a| a.to_string())
            .unwrap_or_default();
        format!(
            "/*!\n  * Bootstrap Material Design v{} ({})\n  * Copyright 2014-{} {}\n  * Licensed under MIT (https://github.com/FezVrasta/bootstrap-material-design/blob/master/LICENSE)\n  */",
            self.version,
            self.homepage.as_deref().unwrap_or_default(),
            year,
            author
        )
    }
}

pub fn parse_package_metadata(json_str: &str) -> PipelineResult<PackageMetadata> {
    let metadata: PackageMetadata = serde_json::from_str(json_str)?;
    Ok(metadata)
}

pub fn load_package_metadata(path: &Path) -> PipelineResult<PackageMetadata> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        PipelineError::Config(format!(
            "Failed to read package metadata {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_package_metadata(&content).map_err(|e| {
        PipelineError::Config(format!(
            "Failed to parse package metadata {}: {}",
            path.display(),
            e
        ))
    })
}
