//! Task execution module
//!
//! This module carries out the actions planned by recipes: spawning external
//! tools, removing output directories and copying files, and runs the steps of
//! a series in order with parallel groups executed concurrently.

pub mod actions;
pub mod command;
pub mod runner;

pub use actions::ActionExecutor;
pub use command::CommandExecutor;
pub use runner::TaskRunner;
