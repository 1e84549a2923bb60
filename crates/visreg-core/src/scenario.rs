//! Runner lifecycle event normalization
//!
//! Older runner versions emit positional `(uri, feature, scenario,
//! sourceLocation)` hook arguments; newer versions emit one structured
//! object carrying `{gherkinDocument: {feature}, pickle}`. Both shapes are
//! modeled as one tagged union and normalized into a single canonical
//! [`ScenarioContext`] before any coordinator logic runs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tag label attached to a scenario, e.g. `@visual`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Feature node of the test hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
}

/// One concrete scenario as emitted by the runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pickle {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Structured event wrapper used by newer runner versions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GherkinDocument {
    pub feature: Feature,
}

/// Raw scenario lifecycle event, one variant per runner event shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScenarioEvent {
    /// Newer runners: one structured object
    Structured {
        #[serde(rename = "gherkinDocument")]
        gherkin_document: GherkinDocument,
        pickle: Pickle,
    },
    /// Older runners: positional hook arguments
    LegacyPositional {
        uri: String,
        feature: Feature,
        scenario: Pickle,
        #[serde(rename = "sourceLocation", default)]
        source_location: Option<Value>,
    },
}

/// Canonical per-scenario context, consumed immediately to build session
/// parameters and never retained past the hook that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioContext {
    pub feature_name: String,
    pub scenario_name: String,
    pub tags: Vec<String>,
}

impl ScenarioEvent {
    /// Normalize either event shape into one canonical context.
    pub fn normalize(&self) -> ScenarioContext {
        match self {
            ScenarioEvent::Structured {
                gherkin_document,
                pickle,
            } => ScenarioContext {
                feature_name: gherkin_document.feature.name.clone(),
                scenario_name: pickle.name.clone(),
                tags: pickle.tags.iter().map(|t| t.name.clone()).collect(),
            },
            ScenarioEvent::LegacyPositional {
                feature, scenario, ..
            } => ScenarioContext {
                feature_name: feature.name.clone(),
                scenario_name: scenario.name.clone(),
                tags: scenario.tags.iter().map(|t| t.name.clone()).collect(),
            },
        }
    }
}
