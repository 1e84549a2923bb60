//! Run identity generation
//!
//! A run identity is minted exactly once per overall test run, at run
//! preparation time, and injected read-only into every coordinator for the
//! rest of the run. The readable name shows up in the remote service UI;
//! the ident disambiguates runs that share a name.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ADJECTIVES: &[&str] = &[
    "amber", "bold", "brisk", "calm", "crimson", "eager", "fuzzy", "gentle",
    "golden", "keen", "lucid", "mellow", "nimble", "quiet", "rapid", "silver",
    "steady", "swift", "vivid", "witty",
];

const NOUNS: &[&str] = &[
    "badger", "beacon", "canyon", "comet", "falcon", "harbor", "heron",
    "lantern", "maple", "meadow", "otter", "pebble", "pine", "raven", "reef",
    "river", "sparrow", "summit", "thicket", "willow",
];

/// Process-wide run identity, shared by every scenario within one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunIdentity {
    /// Human-readable run label, e.g. `swift-falcon-4821`
    pub run_name: String,
    /// Unique run token (UUID v4)
    pub run_ident: String,
}

impl RunIdentity {
    /// Generate a fresh run identity. Call once, at run preparation.
    pub fn generate() -> Self {
        Self {
            run_name: generate_run_name(),
            run_ident: generate_run_ident(),
        }
    }
}

/// Produce a readable adjective-noun-number run name.
pub fn generate_run_name() -> String {
    let mut rng = rand::thread_rng();
    // Slices are non-empty constants, choose never returns None here
    let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("swift");
    let noun = NOUNS.choose(&mut rng).copied().unwrap_or("falcon");
    let number: u16 = rng.gen_range(0..10_000);
    format!("{}-{}-{}", adjective, noun, number)
}

/// Produce a practically-unique run identifier.
pub fn generate_run_ident() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_name_is_readable_slug() {
        let name = generate_run_name();
        assert!(!name.is_empty());
        let parts: Vec<&str> = name.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(ADJECTIVES.contains(&parts[0]));
        assert!(NOUNS.contains(&parts[1]));
        assert!(parts[2].parse::<u16>().is_ok());
    }

    #[test]
    fn test_run_ident_is_uuid() {
        let ident = generate_run_ident();
        assert!(Uuid::parse_str(&ident).is_ok());
    }

    #[test]
    fn test_run_idents_are_unique() {
        assert_ne!(generate_run_ident(), generate_run_ident());
    }

    #[test]
    fn test_generate_produces_both_fields() {
        let identity = RunIdentity::generate();
        assert!(!identity.run_name.is_empty());
        assert!(Uuid::parse_str(&identity.run_ident).is_ok());
    }
}
