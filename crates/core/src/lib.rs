//! Bootstrap Material Design build core
//!
//! This is the core library of the `bmd-build` tool. It declares the build
//! pipeline of Bootstrap Material Design (linting, stylesheet compilation,
//! JavaScript bundling, minification and the documentation copy series) and
//! runs it against a checkout.
//!
//! ## Architecture
//!
//! The core library is organized into several modules:
//!
//! - [`pipeline_manager`] - High-level interface used by the CLI
//! - [`pipelines`] - The concrete library and documentation pipeline
//! - [`recipes`] - Configurable task templates that plan actions
//! - [`graph`] - Task registry and named series
//! - [`execution`] - Runs series, actions and external tools
//! - [`configs`] - Presets, recipe overrides, `bmd-build.yml` and `package.json`
//! - [`merge`] - Deep merge of layered configuration
//! - [`transforms`] - Text rewrites applied while copying documentation
//! - [`files`] - Glob selection of input files
//! - [`watch`] - Re-run a target on file changes
//! - [`results`] - Result types for pipeline operations
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bmd_build_core::pipeline_manager::{PipelineManager, PipelineManagerConfig};
//! use std::path::PathBuf;
//!
//! # async fn example() -> bmd_build_core::types::PipelineResult<()> {
//! let manager = PipelineManager::new(PipelineManagerConfig {
//!     workspace_root: PathBuf::from("."),
//!     dry_run: true,
//! })?;
//!
//! manager.run("default").await?;
//! # Ok(())
//! # }
//! ```

pub mod configs;
pub mod execution;
pub mod files;
pub mod graph;
pub mod merge;
pub mod pipeline_manager;
pub mod pipelines;
pub mod recipes;
pub mod results;
pub mod transforms;
pub mod types;
pub mod watch;

// Re-export the main types for easier usage
pub use pipeline_manager::{PipelineManager, PipelineManagerConfig};
pub use types::{PipelineError, PipelineResult};
