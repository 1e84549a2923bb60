//! Remote session client contract
//!
//! The coordinator depends on this trait only; the concrete HTTP binding
//! lives in [`crate::http`]. Every method is a network call and must be
//! awaited fully before the coordinator advances its state.

use crate::types::{BaselineQuery, CheckResult, Session, SnapshotQuery};
use async_trait::async_trait;
use serde_json::{Map, Value};
use visreg_core::{Result, SessionParams};

/// Client contract for the remote comparison service.
///
/// Implementations own the bounded-wait behavior (request timeouts) and the
/// current-session bookkeeping; no retries are performed at any layer.
#[async_trait]
pub trait SessionClient: Send + Sync {
    /// Open a test session. Fails with `Authentication` on a bad apikey,
    /// `Unreachable` on connection failure, `Validation` on bad params.
    async fn open_session(&self, params: &SessionParams, apikey: &str) -> Result<Session>;

    /// Submit one visual check scoped to the currently open session.
    async fn submit_check(
        &self,
        check_name: &str,
        image: &[u8],
        options: &Map<String, Value>,
        dom_dump: Option<Value>,
    ) -> Result<CheckResult>;

    /// Query baselines. "Not found" is an empty result set, not an error.
    async fn query_baselines(&self, params: &Map<String, Value>) -> Result<BaselineQuery>;

    /// Query snapshots, same empty-on-not-found contract.
    async fn query_snapshots(&self, params: &Map<String, Value>) -> Result<SnapshotQuery>;

    /// Close the currently open session. Not idempotent; the caller must
    /// issue exactly one close per successful open.
    async fn close_session(&self, apikey: &str) -> Result<()>;
}
