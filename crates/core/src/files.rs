//! File selection for recipe sources
//!
//! A source is a working directory plus an ordered list of globs. Globs are
//! matched against paths relative to the working directory; a glob starting
//! with `!` excludes whatever it matches.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::types::{PipelineError, PipelineResult};

#[derive(Debug)]
pub struct FileMatcher {
    includes: GlobSet,
    excludes: GlobSet,
}

impl FileMatcher {
    pub fn new(globs: &[String]) -> PipelineResult<Self> {
        let mut include_builder = GlobSetBuilder::new();
        let mut exclude_builder = GlobSetBuilder::new();

        for pattern in globs {
            match pattern.strip_prefix('!') {
                Some(negated) => exclude_builder.add(build_glob(negated)?),
                None => include_builder.add(build_glob(pattern)?),
            };
        }

        Ok(Self {
            includes: include_builder.build()?,
            excludes: exclude_builder.build()?,
        })
    }

    pub fn is_match(&self, relative_path: &Path) -> bool {
        self.includes.is_match(relative_path) && !self.excludes.is_match(relative_path)
    }
}

fn build_glob(pattern: &str) -> PipelineResult<globset::Glob> {
    Ok(GlobBuilder::new(pattern).literal_separator(true).build()?)
}

fn path_error(dir: &Path, e: std::io::Error) -> PipelineError {
    PipelineError::Path(format!("Failed to read directory {}: {}", dir.display(), e))
}

/// Collect the files under `cwd` matching `globs`, as paths relative to `cwd`,
/// sorted. A missing directory yields no files.
pub fn collect_files(cwd: &Path, globs: &[String]) -> PipelineResult<Vec<PathBuf>> {
    let matcher = FileMatcher::new(globs)?;
    let mut files = Vec::new();

    if !cwd.is_dir() {
        tracing::debug!(cwd = %cwd.display(), "source directory does not exist");
        return Ok(files);
    }

    // canonical directories already walked, so symlink cycles end
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(cwd.to_path_buf());

    while let Some(current_dir) = queue.pop_front() {
        let canonical = current_dir.canonicalize().map_err(|e| path_error(&current_dir, e))?;
        if !visited.insert(canonical) {
            tracing::debug!(dir = %current_dir.display(), "directory already walked, skipping");
            continue;
        }

        let entries = std::fs::read_dir(&current_dir).map_err(|e| path_error(&current_dir, e))?;

        for entry in entries {
            let path = entry.map_err(|e| path_error(&current_dir, e))?.path();
            if path.is_dir() {
                queue.push_back(path);
                continue;
            }
            if !path.is_file() {
                tracing::warn!(path = %path.display(), "skipping dangling entry");
                continue;
            }

            let relative_path = path.strip_prefix(cwd).unwrap_or(&path);
            if matcher.is_match(relative_path) {
                files.push(relative_path.to_path_buf());
            }
        }
    }

    files.sort();
    Ok(files)
}
