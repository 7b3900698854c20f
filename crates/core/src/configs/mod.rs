//! Configuration for the pipeline: presets, per-task overrides, the
//! `bmd-build.yml` file and package metadata

pub mod package;
pub mod pipeline;
pub mod preset;
pub mod recipes;
