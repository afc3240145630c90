//! Visible-subgraph projection.
//!
//! The sole enforcement point of edge-endpoint consistency for rendering:
//! an edge survives only when both endpoints survived filtering.

use super::model::{ChannelEdge, Node};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The edge-consistent projection of a filtered node set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VisibleSubgraph {
    /// The filtered nodes, in snapshot order.
    pub nodes: Vec<Node>,
    /// Snapshot edges whose both endpoints are in `nodes`, in snapshot order.
    pub edges: Vec<ChannelEdge>,
}

impl VisibleSubgraph {
    /// Ids of the visible nodes, in order.
    #[must_use]
    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|node| node.id.clone()).collect()
    }
}

/// Projects the visible subgraph from a filtered node set.
///
/// Pure and deterministic; preserves edge order from `all_edges`.
#[must_use]
pub fn project(filtered_nodes: &[Node], all_edges: &[ChannelEdge]) -> VisibleSubgraph {
    let ids: HashSet<&str> = filtered_nodes.iter().map(|node| node.id.as_str()).collect();
    let edges = all_edges
        .iter()
        .filter(|edge| {
            ids.contains(edge.endpoint_a.as_str()) && ids.contains(edge.endpoint_b.as_str())
        })
        .cloned()
        .collect();

    VisibleSubgraph {
        nodes: filtered_nodes.to_vec(),
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_with_one_filtered_endpoint_is_dropped() {
        // Snapshot has A and B joined by a channel; only A survives filtering.
        let alice = Node::new("A").with_alias("Alice").reachable(true);
        let edges = vec![ChannelEdge::new("A", "B")];

        let subgraph = project(&[alice.clone()], &edges);

        assert_eq!(subgraph.nodes, vec![alice]);
        assert!(subgraph.edges.is_empty());
    }

    #[test]
    fn every_retained_edge_has_both_endpoints_visible() {
        let nodes = vec![Node::new("A"), Node::new("B"), Node::new("C")];
        let edges = vec![
            ChannelEdge::new("A", "B"),
            ChannelEdge::new("B", "C"),
            ChannelEdge::new("A", "C"),
        ];

        let subgraph = project(&nodes[..2], &edges);

        let ids: HashSet<&str> = subgraph.nodes.iter().map(|n| n.id.as_str()).collect();
        for edge in &subgraph.edges {
            assert!(ids.contains(edge.endpoint_a.as_str()));
            assert!(ids.contains(edge.endpoint_b.as_str()));
        }
        assert_eq!(subgraph.edges.len(), 1);
    }

    #[test]
    fn edge_order_is_preserved() {
        let nodes = vec![Node::new("A"), Node::new("B"), Node::new("C")];
        let first = ChannelEdge::new("B", "C");
        let second = ChannelEdge::new("A", "B");
        let subgraph = project(&nodes, &[first.clone(), second.clone()]);
        assert_eq!(subgraph.edges, vec![first, second]);
    }

    #[test]
    fn empty_filter_projects_nothing() {
        let subgraph = project(&[], &[ChannelEdge::new("A", "B")]);
        assert!(subgraph.nodes.is_empty());
        assert!(subgraph.edges.is_empty());
    }
}
