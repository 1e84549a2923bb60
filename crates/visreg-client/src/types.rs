//! Wire types returned by the remote comparison service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names under which a baseline's content hash has been stored across
/// historical service revisions. Checked in order.
pub const BASELINE_HASH_FIELDS: &[&str] = &["imghash", "imageHash", "hash"];

/// Opaque handle for an open test session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
}

/// Result of one submitted check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    /// Identifier of the accepted baseline image, when one is linked
    #[serde(rename = "baselineId", default)]
    pub baseline_id: Option<String>,
    /// Identifier of the snapshot captured for this check
    #[serde(rename = "actualSnapshotId", default)]
    pub actual_snapshot_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One stored baseline record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineRecord {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Content hash of the baseline image (current field name)
    #[serde(default)]
    pub imghash: Option<String>,
    /// Snapshot the baseline was accepted from
    #[serde(rename = "actualSnapshotId", default)]
    pub actual_snapshot_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BaselineRecord {
    /// Stored content hash, checked across the historically-used field
    /// names. The `imghash` field wins; older revisions stored the hash
    /// under `imageHash` or `hash`.
    pub fn stored_hash(&self) -> Option<&str> {
        if let Some(hash) = self.imghash.as_deref() {
            return Some(hash);
        }
        BASELINE_HASH_FIELDS
            .iter()
            .find_map(|field| self.extra.get(*field).and_then(Value::as_str))
    }
}

/// One stored snapshot record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Baseline query response; empty `results` means "not found", never an error
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineQuery {
    #[serde(default)]
    pub results: Vec<BaselineRecord>,
}

/// Snapshot query response, same empty-on-not-found contract
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotQuery {
    #[serde(default)]
    pub results: Vec<SnapshotRecord>,
}
