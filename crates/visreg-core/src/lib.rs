//! # visreg-core
//!
//! Core types for the visreg visual-regression scenario bridge.
//!
//! This crate holds the pure pieces of the bridge: configuration, run
//! identity, scenario event normalization, session parameter resolution,
//! the tag gate, and the session lifecycle state machine. Nothing in here
//! performs I/O; the remote client and the coordinator live in
//! `visreg-client` and `visreg-service`.

mod error;
mod gate;
mod identity;
mod options;
mod params;
mod scenario;
mod state;

pub use error::{Result, VisregError};
pub use gate::{should_instrument, DEFAULT_EXCLUDE_TAG};
pub use identity::{generate_run_ident, generate_run_name, RunIdentity};
pub use options::ServiceOptions;
pub use params::SessionParams;
pub use scenario::{Feature, GherkinDocument, Pickle, ScenarioContext, ScenarioEvent, Tag};
pub use state::{transition, SessionEvent, SessionState};
