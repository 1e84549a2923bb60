//! Service configuration supplied at plugin construction

use crate::error::{Result, VisregError};
use crate::gate::DEFAULT_EXCLUDE_TAG;
use serde::{Deserialize, Serialize};

/// Immutable plugin configuration.
///
/// `app` overrides `project` when both are given. `runname`/`runident`
/// override the generated [`crate::RunIdentity`] when explicitly set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceOptions {
    /// Remote comparison service base address
    pub endpoint: String,
    /// Remote service credential
    pub apikey: String,
    /// Logical application name (legacy field)
    pub project: Option<String>,
    /// Logical application name, takes precedence over `project`
    pub app: Option<String>,
    /// VCS branch the run is recorded against
    pub branch: Option<String>,
    /// Explicit run name override
    pub runname: Option<String>,
    /// Explicit run identifier override
    pub runident: Option<String>,
    /// Inclusion filter: only scenarios carrying this tag are instrumented
    pub tag: Option<String>,
    /// Exclusion filter: scenarios carrying this tag are never instrumented
    #[serde(rename = "excludeTag")]
    pub exclude_tag: Option<String>,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            apikey: String::new(),
            project: None,
            app: None,
            branch: None,
            runname: None,
            runident: None,
            tag: None,
            exclude_tag: Some(DEFAULT_EXCLUDE_TAG.to_string()),
        }
    }
}

impl ServiceOptions {
    /// Validate fields required before any remote call can be made.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(VisregError::Configuration(
                "remote service endpoint is not set".to_string(),
            ));
        }
        if self.apikey.trim().is_empty() {
            return Err(VisregError::Configuration(
                "remote service apikey is not set".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolved application name: `app` wins over `project`.
    pub fn app_name(&self) -> Option<&str> {
        self.app.as_deref().or(self.project.as_deref())
    }
}
