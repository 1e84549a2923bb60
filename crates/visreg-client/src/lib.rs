//! # visreg-client
//!
//! Remote comparison service client for the visreg scenario bridge.
//!
//! The coordinator in `visreg-service` depends on the [`SessionClient`]
//! trait; [`HttpSessionClient`] is the JSON-over-HTTP binding. Requests
//! carry the apikey as a header and are bounded by a per-request timeout.
//! No operation is retried.

mod client;
mod http;
mod types;

pub use client::SessionClient;
pub use http::{ClientConfig, HttpSessionClient};
pub use types::{
    BaselineQuery, BaselineRecord, CheckResult, Session, SnapshotQuery, SnapshotRecord,
    BASELINE_HASH_FIELDS,
};
