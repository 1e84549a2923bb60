//! Session parameter resolution

use crate::identity::RunIdentity;
use crate::options::ServiceOptions;
use crate::scenario::ScenarioContext;
use serde::{Deserialize, Serialize};

/// Payload sent to the remote service when opening a session.
///
/// `run`/`runident` resolve to the same value for every scenario within one
/// run: explicit option override first, then the process-wide
/// [`RunIdentity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParams {
    pub app: Option<String>,
    pub branch: Option<String>,
    pub tags: Vec<String>,
    pub test: String,
    pub suite: String,
    pub run: String,
    pub runident: String,
}

impl SessionParams {
    /// Build session parameters for one scenario.
    pub fn build(options: &ServiceOptions, run: &RunIdentity, ctx: &ScenarioContext) -> Self {
        Self {
            app: options.app_name().map(str::to_string),
            branch: options.branch.clone(),
            tags: ctx.tags.clone(),
            test: ctx.scenario_name.clone(),
            suite: ctx.feature_name.clone(),
            run: options
                .runname
                .clone()
                .unwrap_or_else(|| run.run_name.clone()),
            runident: options
                .runident
                .clone()
                .unwrap_or_else(|| run.run_ident.clone()),
        }
    }
}
