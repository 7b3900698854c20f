//! Watch mode: re-run a target whenever its sources change
//!
//! Watches the directories of every task reachable from the target and runs the
//! target again after each debounced batch of changes. A failing run is reported
//! and watching continues.

use std::path::PathBuf;

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, DebouncedEvent, DebouncedEventKind};
use tokio::sync::mpsc;

use crate::pipeline_manager::PipelineManager;
use crate::types::{PipelineError, PipelineResult};

/// Existing absolute directories to watch for `target`
pub fn watch_roots(manager: &PipelineManager, target: &str) -> PipelineResult<Vec<PathBuf>> {
    let root = manager.workspace_root();
    let dirs: Vec<PathBuf> = manager
        .watch_dirs(target)?
        .into_iter()
        .map(|dir| root.join(dir))
        .filter(|dir| {
            let exists = dir.is_dir();
            if !exists {
                tracing::warn!(dir = %dir.display(), "watch directory does not exist, skipping");
            }
            exists
        })
        .collect();

    if dirs.is_empty() {
        return Err(PipelineError::Watch(format!(
            "Target '{}' has no existing directories to watch",
            target
        )));
    }
    Ok(dirs)
}

/// Paths touched by a batch of debounced events
pub fn changed_paths(events: &[DebouncedEvent]) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = events
        .iter()
        .filter(|e| matches!(e.kind, DebouncedEventKind::Any))
        .map(|e| e.path.clone())
        .collect();
    paths.sort();
    paths.dedup();
    paths
}

/// Block on file changes, re-running `target` after each batch.
/// Returns only if the watcher shuts down or fails to start.
pub async fn watch_target(manager: &PipelineManager, target: &str) -> PipelineResult<()> {
    let dirs = watch_roots(manager, target)?;
    let (tx, mut rx) = mpsc::unbounded_channel::<DebounceEventResult>();

    let mut debouncer = new_debouncer(manager.debounce(), move |result| {
        // the receiver is gone only when watching stopped
        let _ = tx.send(result);
    })
    .map_err(|e| PipelineError::Watch(format!("Failed to initialize file watcher: {}", e)))?;

    for dir in &dirs {
        debouncer
            .watcher()
            .watch(dir, RecursiveMode::Recursive)
            .map_err(|e| {
                PipelineError::Watch(format!("Failed to watch {}: {}", dir.display(), e))
            })?;
        tracing::info!(series = %target, dir = %dir.display(), "watching");
    }

    while let Some(result) = rx.recv().await {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(error = %e, "watch error");
                continue;
            }
        };

        let changed = changed_paths(&events);
        if changed.is_empty() {
            continue;
        }
        for path in &changed {
            tracing::info!(path = %path.display(), "changed");
        }

        match manager.run(target).await {
            Ok(summary) => tracing::info!(
                series = %summary.target,
                tasks = summary.tasks.len(),
                duration = ?summary.duration,
                "rebuilt"
            ),
            Err(e) => tracing::error!(series = %target, error = %e, "rebuild failed"),
        }
    }

    Ok(())
}
