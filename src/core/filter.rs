//! Query/reachability filtering over the snapshot node sequence.
//!
//! Filtering is stable: the result preserves the snapshot's relative node
//! order. Query strings match as literal substrings, case-insensitively;
//! regex metacharacters in the query carry no special meaning.

use super::error::{PeergraphError, Result};
use super::model::Node;
use regex::RegexBuilder;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Criteria for the node filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterCriteria {
    /// Literal substring to match against node id or alias. Empty matches
    /// everything.
    #[serde(default)]
    pub query: String,
    /// Whether to keep only reachable nodes.
    #[serde(default)]
    pub only_reachable: bool,
}

impl FilterCriteria {
    /// Creates criteria from a query and reachability flag.
    #[must_use]
    pub fn new(query: impl Into<String>, only_reachable: bool) -> Self {
        Self {
            query: query.into(),
            only_reachable,
        }
    }

    /// Whether the criteria match every node (no-op filter).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && !self.only_reachable
    }
}

/// Applies the criteria to a node sequence, preserving relative order.
///
/// A node passes when it satisfies the reachability constraint and, for a
/// non-empty query, the query appears as a case-insensitive literal
/// substring of its id or alias.
///
/// # Errors
/// Returns a `filter_query_invalid` error if the escaped query cannot be
/// compiled into a pattern. Callers recover by keeping their previous
/// filtered set.
pub fn filter_nodes(nodes: &[Node], criteria: &FilterCriteria) -> Result<Vec<Node>> {
    let pattern = if criteria.query.is_empty() {
        None
    } else {
        let escaped = regex::escape(&criteria.query);
        let compiled = RegexBuilder::new(&escaped)
            .case_insensitive(true)
            .build()
            .map_err(|err| {
                PeergraphError::filter(
                    "filter_query_invalid",
                    format!("Query could not be compiled into a pattern: {err}"),
                    "core:filter",
                )
                .with_context("query_len", criteria.query.len().to_string())
                .with_hint("Shorten or simplify the query")
            })?;
        Some(compiled)
    };

    Ok(nodes
        .iter()
        .filter(|node| {
            (!criteria.only_reachable || node.reachable)
                && pattern.as_ref().is_none_or(|re| {
                    re.is_match(&node.id)
                        || node.alias.as_deref().is_some_and(|alias| re.is_match(alias))
                })
        })
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_nodes() -> Vec<Node> {
        vec![
            Node::new("A").with_alias("Alice").reachable(true),
            Node::new("B").with_alias("Bob").reachable(false),
        ]
    }

    #[test]
    fn empty_criteria_is_a_no_op() {
        let nodes = sample_nodes();
        let filtered = filter_nodes(&nodes, &FilterCriteria::default()).expect("filter");
        assert_eq!(filtered, nodes);
    }

    #[test]
    fn reachability_filter_keeps_reachable_nodes() {
        let nodes = sample_nodes();
        let filtered =
            filter_nodes(&nodes, &FilterCriteria::new("", true)).expect("filter");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "A");
    }

    #[test]
    fn alias_match_is_case_insensitive() {
        let nodes = sample_nodes();
        let filtered =
            filter_nodes(&nodes, &FilterCriteria::new("ali", false)).expect("filter");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "A");
    }

    #[test]
    fn query_matches_id_as_well_as_alias() {
        let nodes = sample_nodes();
        let filtered = filter_nodes(&nodes, &FilterCriteria::new("b", false)).expect("filter");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "B");
    }

    #[test]
    fn metacharacters_match_literally() {
        let nodes = vec![Node::new("a.b"), Node::new("axb")];
        let filtered =
            filter_nodes(&nodes, &FilterCriteria::new("a.b", false)).expect("filter");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a.b");
    }

    #[test]
    fn filter_preserves_snapshot_order() {
        let nodes = vec![
            Node::new("n3").reachable(true),
            Node::new("n1").reachable(true),
            Node::new("n2").reachable(true),
        ];
        let filtered =
            filter_nodes(&nodes, &FilterCriteria::new("n", false)).expect("filter");
        let ids: Vec<&str> = filtered.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n3", "n1", "n2"]);
    }

    #[test]
    fn filter_result_is_a_subset() {
        let nodes = sample_nodes();
        let filtered =
            filter_nodes(&nodes, &FilterCriteria::new("a", true)).expect("filter");
        for node in &filtered {
            assert!(nodes.iter().any(|n| n.id == node.id));
        }
    }

    #[test]
    fn filter_is_idempotent() {
        let nodes = sample_nodes();
        let criteria = FilterCriteria::new("a", false);
        let once = filter_nodes(&nodes, &criteria).expect("filter");
        let twice = filter_nodes(&once, &criteria).expect("filter");
        assert_eq!(once, twice);
    }

    #[test]
    fn oversized_query_fails_recoverably() {
        // Exceeds the regex compiler's default compiled-size limit.
        let nodes = sample_nodes();
        let criteria = FilterCriteria::new("a".repeat(16 * 1024 * 1024), false);
        let err = filter_nodes(&nodes, &criteria).expect_err("should fail");
        assert_eq!(err.code, "filter_query_invalid");
        assert!(err.recoverable);
    }
}
