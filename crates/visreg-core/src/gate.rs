//! Tag-based scenario gating
//!
//! Pure decision function with no I/O. The coordinator evaluates it with
//! identical inputs in the pre-scenario and post-scenario hooks so that a
//! scenario skipped at start is also skipped at end.

/// Default exclusion tag: scenarios marked with this tag opt out of
/// visual instrumentation even when no include filter is configured.
pub const DEFAULT_EXCLUDE_TAG: &str = "@novisual";

/// Decide whether visual instrumentation applies to a scenario.
///
/// Exclusion is checked before inclusion: a scenario carrying the exclude
/// tag is never instrumented, even if it also carries the include tag.
pub fn should_instrument(
    tags: &[String],
    exclude_tag: Option<&str>,
    include_tag: Option<&str>,
) -> bool {
    if let Some(exclude) = exclude_tag {
        if tags.iter().any(|t| t == exclude) {
            return false;
        }
    }

    if let Some(include) = include_tag {
        if !tags.iter().any(|t| t == include) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unfiltered_scenario_is_instrumented() {
        assert!(should_instrument(&tags(&["@smoke"]), None, None));
        assert!(should_instrument(&[], None, None));
    }

    #[test]
    fn test_exclude_tag_skips_scenario() {
        assert!(!should_instrument(
            &tags(&["@novisual"]),
            Some(DEFAULT_EXCLUDE_TAG),
            None
        ));
    }

    #[test]
    fn test_exclude_tag_absent_does_not_skip() {
        assert!(should_instrument(
            &tags(&["@visual"]),
            Some(DEFAULT_EXCLUDE_TAG),
            None
        ));
    }

    #[test]
    fn test_include_tag_required_when_set() {
        assert!(!should_instrument(&tags(&["@smoke"]), None, Some("@visual")));
        assert!(should_instrument(
            &tags(&["@smoke", "@visual"]),
            None,
            Some("@visual")
        ));
    }

    #[test]
    fn test_exclusion_takes_precedence_over_inclusion() {
        // Carries both the exclude and the include tag: exclusion wins.
        assert!(!should_instrument(
            &tags(&["@visual", "@novisual"]),
            Some("@novisual"),
            Some("@visual")
        ));
    }

    #[test]
    fn test_gate_is_symmetric() {
        // Same inputs always yield the same decision.
        let scenario_tags = tags(&["@visual", "@wip"]);
        let first = should_instrument(&scenario_tags, Some("@novisual"), Some("@visual"));
        let second = should_instrument(&scenario_tags, Some("@novisual"), Some("@visual"));
        assert_eq!(first, second);
    }
}
