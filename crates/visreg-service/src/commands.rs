//! Check & baseline command surface
//!
//! The runtime operations test authors call during an instrumented
//! scenario. `check` and `is_baseline_exist` are strict (their errors drive
//! pass/fail assertions); the two legacy lookups are lenient and map any
//! failure to `None`.

use crate::registry::{CommandArgs, CommandRegistry};
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha512};
use std::sync::Arc;
use tracing::{debug, warn};
use visreg_client::{BaselineRecord, CheckResult, SessionClient, SnapshotRecord};
use visreg_core::{Result, VisregError};

/// Public command names installed on the shared browser handle
pub const CHECK_COMMAND: &str = "visregCheck";
pub const BASELINE_EXISTS_COMMAND: &str = "visregIsBaselineExist";
pub const LAST_BASELINE_COMMAND: &str = "visregGetLastBaseline";
pub const SNAPSHOT_COMMAND: &str = "visregGetSnapshot";

/// Legacy field name older call sites read the snapshot identifier from.
/// The misspelling is historical and load-bearing.
const LEGACY_SNAPSHOT_ID_FIELD: &str = "snapshootId";

/// Baseline query result augmented with the hash-gated `exists` flag
#[derive(Debug, Clone, Serialize)]
pub struct BaselineExistence {
    pub results: Vec<BaselineRecord>,
    pub exists: bool,
}

/// Session-scoped command surface, bound to one open session's client.
pub struct CommandSurface {
    client: Arc<dyn SessionClient>,
}

impl CommandSurface {
    pub fn new(client: Arc<dyn SessionClient>) -> Self {
        Self { client }
    }

    /// Submit one visual check. Strict: any transport or remote error
    /// propagates to the calling test step.
    pub async fn check(
        &self,
        check_name: &str,
        image: &[u8],
        options: &Map<String, Value>,
        dom_dump: Option<Value>,
    ) -> Result<CheckResult> {
        self.client
            .submit_check(check_name, image, options, dom_dump)
            .await
    }

    /// Query whether a baseline exists for `name`, cross-checked against
    /// the image content hash when an image is supplied.
    ///
    /// A name match alone is not sufficient once image content is given: at
    /// least one returned record's stored hash must equal
    /// `sha512(image)`, otherwise `exists` is false even though records
    /// were returned.
    pub async fn is_baseline_exist(
        &self,
        name: &str,
        image: Option<&[u8]>,
        options: &Map<String, Value>,
    ) -> Result<BaselineExistence> {
        let mut params = options.clone();
        params.insert("name".to_string(), Value::String(name.to_string()));

        let query = self.client.query_baselines(&params).await?;

        let mut exists = !query.results.is_empty();
        if exists {
            if let Some(image) = image {
                let image_hash = hex::encode(Sha512::digest(image));
                exists = query
                    .results
                    .iter()
                    .any(|record| record.stored_hash() == Some(image_hash.as_str()));
                debug!(
                    "baseline existence for '{}': {} records, hash match: {}",
                    name,
                    query.results.len(),
                    exists
                );
            }
        }

        Ok(BaselineExistence {
            results: query.results,
            exists,
        })
    }

    /// Legacy accessor: first baseline matching `params`, or `None`.
    /// Lenient: errors are logged and swallowed.
    pub async fn get_last_baseline(
        &self,
        params: &Map<String, Value>,
    ) -> Option<BaselineRecord> {
        let query = match self.client.query_baselines(params).await {
            Ok(query) => query,
            Err(e) => {
                warn!("legacy baseline lookup failed: {}", e);
                return None;
            }
        };

        query.results.into_iter().next().map(|mut record| {
            // Old call sites read the snapshot id from the legacy field
            let snapshot_id = record
                .actual_snapshot_id
                .clone()
                .or_else(|| record.id.clone());
            if let Some(id) = snapshot_id {
                record
                    .extra
                    .insert(LEGACY_SNAPSHOT_ID_FIELD.to_string(), Value::String(id));
            }
            record
        })
    }

    /// Legacy accessor: snapshot matching the id in `params` (or the first
    /// one when no id is given), or `None`. Same swallow policy as
    /// [`Self::get_last_baseline`].
    pub async fn get_snapshot(&self, params: &Map<String, Value>) -> Option<SnapshotRecord> {
        let query = match self.client.query_snapshots(params).await {
            Ok(query) => query,
            Err(e) => {
                warn!("legacy snapshot lookup failed: {}", e);
                return None;
            }
        };

        let wanted_id = params
            .get("_id")
            .or_else(|| params.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string);

        match wanted_id {
            Some(id) => query
                .results
                .into_iter()
                .find(|record| record.id.as_deref() == Some(id.as_str())),
            None => query.results.into_iter().next(),
        }
    }
}

/// Install the four commands bound to one scenario's surface.
pub fn install_commands(registry: &mut dyn CommandRegistry, surface: Arc<CommandSurface>) {
    let check_surface = Arc::clone(&surface);
    registry.register(
        CHECK_COMMAND,
        Arc::new(move |args: CommandArgs| {
            let surface = Arc::clone(&check_surface);
            Box::pin(async move {
                let name = args.check_name.ok_or_else(|| {
                    VisregError::Check("check name is required".to_string())
                })?;
                let image = args.image.ok_or_else(|| {
                    VisregError::Check("image buffer is required".to_string())
                })?;
                let result = surface
                    .check(&name, &image, &args.options, args.dom_dump)
                    .await?;
                Ok(serde_json::to_value(result)?)
            })
        }),
    );

    let exists_surface = Arc::clone(&surface);
    registry.register(
        BASELINE_EXISTS_COMMAND,
        Arc::new(move |args: CommandArgs| {
            let surface = Arc::clone(&exists_surface);
            Box::pin(async move {
                let name = args.check_name.ok_or_else(|| {
                    VisregError::Check("baseline name is required".to_string())
                })?;
                let existence = surface
                    .is_baseline_exist(&name, args.image.as_deref(), &args.options)
                    .await?;
                Ok(serde_json::to_value(existence)?)
            })
        }),
    );

    let baseline_surface = Arc::clone(&surface);
    registry.register(
        LAST_BASELINE_COMMAND,
        Arc::new(move |args: CommandArgs| {
            let surface = Arc::clone(&baseline_surface);
            Box::pin(async move {
                let record = surface.get_last_baseline(&args.options).await;
                Ok(serde_json::to_value(record)?)
            })
        }),
    );

    let snapshot_surface = surface;
    registry.register(
        SNAPSHOT_COMMAND,
        Arc::new(move |args: CommandArgs| {
            let surface = Arc::clone(&snapshot_surface);
            Box::pin(async move {
                let record = surface.get_snapshot(&args.options).await;
                Ok(serde_json::to_value(record)?)
            })
        }),
    );
}

/// Install replacement commands after a failed session open.
///
/// The strict commands fail loudly with the underlying cause instead of
/// leaving stale handlers from a prior scenario bound (or surfacing a
/// confusing "command not found"). The lenient legacy lookups keep their
/// null-on-error contract.
pub fn install_failing_commands(registry: &mut dyn CommandRegistry, cause: &str) {
    for name in [CHECK_COMMAND, BASELINE_EXISTS_COMMAND] {
        let cause = cause.to_string();
        registry.register(
            name,
            Arc::new(move |_args: CommandArgs| {
                let cause = cause.clone();
                Box::pin(async move {
                    Err(VisregError::SessionOpen(format!(
                        "test session was not opened: {}",
                        cause
                    )))
                })
            }),
        );
    }

    for name in [LAST_BASELINE_COMMAND, SNAPSHOT_COMMAND] {
        let cause = cause.to_string();
        registry.register(
            name,
            Arc::new(move |_args: CommandArgs| {
                let cause = cause.clone();
                Box::pin(async move {
                    warn!("legacy lookup called without an open session: {}", cause);
                    Ok(Value::Null)
                })
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_existence_serializes_with_flag() {
        let existence = BaselineExistence {
            results: vec![],
            exists: false,
        };
        let value = serde_json::to_value(existence).unwrap();
        assert_eq!(value, json!({ "results": [], "exists": false }));
    }

    #[test]
    fn test_command_names_are_stable() {
        assert_eq!(CHECK_COMMAND, "visregCheck");
        assert_eq!(BASELINE_EXISTS_COMMAND, "visregIsBaselineExist");
        assert_eq!(LAST_BASELINE_COMMAND, "visregGetLastBaseline");
        assert_eq!(SNAPSHOT_COMMAND, "visregGetSnapshot");
    }
}
