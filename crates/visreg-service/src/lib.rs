//! # visreg-service
//!
//! Scenario lifecycle coordinator and runtime command surface for the
//! visreg visual-regression bridge.
//!
//! This crate provides:
//! - [`ScenarioBridge`]: per-worker coordinator that opens/closes remote
//!   test sessions around each instrumented scenario
//! - [`CommandSurface`] and the installed command handlers test authors
//!   call during a scenario
//! - [`CommandRegistry`]: the capability through which commands are bound
//!   onto the shared browser handle
//! - [`LaunchService`]: run-preparation step that mints the run identity

mod commands;
mod coordinator;
mod launch;
mod registry;

pub use commands::{
    install_commands, install_failing_commands, BaselineExistence, CommandSurface,
    BASELINE_EXISTS_COMMAND, CHECK_COMMAND, LAST_BASELINE_COMMAND, SNAPSHOT_COMMAND,
};
pub use coordinator::ScenarioBridge;
pub use launch::LaunchService;
pub use registry::{
    CommandArgs, CommandFuture, CommandHandler, CommandRegistry, InMemoryRegistry,
};
