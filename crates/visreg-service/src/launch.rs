//! Run preparation service
//!
//! Runs once in the launch phase, before any worker starts. Mints the
//! process-wide run identity that every worker's coordinator receives by
//! injection; the identity is never mutated afterwards.

use tracing::{debug, trace};
use visreg_core::RunIdentity;

#[derive(Debug, Default)]
pub struct LaunchService;

impl LaunchService {
    pub fn new() -> Self {
        Self
    }

    /// Generate the run identity for this overall test run. Call exactly
    /// once, at run preparation.
    pub fn on_prepare(&self) -> RunIdentity {
        trace!("onPrepare hook START");
        let identity = RunIdentity::generate();
        debug!(
            "generated run identity: name '{}', ident '{}'",
            identity.run_name, identity.run_ident
        );
        trace!("onPrepare hook END");
        identity
    }
}
