//! `GraphIndex` - node and adjacency indices derived from a snapshot.
//!
//! Built once per snapshot and never patched incrementally. Construction is
//! pure: the snapshot is read, never mutated.

use super::model::{ChannelEdge, GraphSnapshot, Node};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Mapping `id → Node`, built once per snapshot.
pub type NodeIndex = HashMap<String, Node>;

/// Mapping `id → incident channels` in insertion order.
pub type AdjacencyIndex = HashMap<String, Vec<ChannelEdge>>;

/// Data-integrity anomalies observed while indexing a snapshot.
///
/// The source payload is not validated or corrected: duplicate node ids keep
/// the last occurrence and duplicate/dangling edges stay indexed. The report
/// makes those conditions observable instead of silent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IndexReport {
    /// Node ids that appeared more than once (last write won).
    pub duplicate_node_ids: Vec<String>,
    /// Edges whose endpoint pair was already indexed, skipped as logical
    /// duplicates.
    pub duplicate_edges: usize,
    /// Edges with at least one endpoint id absent from the node index.
    pub dangling_edges: usize,
}

impl IndexReport {
    /// Whether the snapshot indexed without anomalies.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicate_node_ids.is_empty() && self.duplicate_edges == 0 && self.dangling_edges == 0
    }
}

/// Node and adjacency indices for one snapshot.
#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
    nodes: NodeIndex,
    adjacency: AdjacencyIndex,
    report: IndexReport,
}

impl GraphIndex {
    /// Builds both indices from a snapshot.
    ///
    /// Every edge lands in the adjacency sequence of both its endpoints.
    /// Edges are deduplicated by endpoint-pair value, not by object
    /// identity, so a logically identical channel is indexed exactly once.
    /// Edges referencing unknown node ids are still indexed.
    #[must_use]
    pub fn build(snapshot: &GraphSnapshot) -> Self {
        let mut nodes = NodeIndex::with_capacity(snapshot.nodes.len());
        let mut duplicate_node_ids = Vec::new();
        for node in &snapshot.nodes {
            if nodes.insert(node.id.clone(), node.clone()).is_some() {
                duplicate_node_ids.push(node.id.clone());
            }
        }

        let mut adjacency = AdjacencyIndex::new();
        let mut seen_pairs: HashSet<(String, String)> = HashSet::with_capacity(snapshot.edges.len());
        let mut duplicate_edges = 0_usize;
        let mut dangling_edges = 0_usize;
        for edge in &snapshot.edges {
            let (a, b) = edge.endpoint_pair();
            if !seen_pairs.insert((a.to_string(), b.to_string())) {
                duplicate_edges += 1;
                continue;
            }
            if !nodes.contains_key(&edge.endpoint_a) || !nodes.contains_key(&edge.endpoint_b) {
                dangling_edges += 1;
            }

            adjacency
                .entry(edge.endpoint_a.clone())
                .or_default()
                .push(edge.clone());
            if edge.endpoint_b != edge.endpoint_a {
                adjacency
                    .entry(edge.endpoint_b.clone())
                    .or_default()
                    .push(edge.clone());
            }
        }

        let report = IndexReport {
            duplicate_node_ids,
            duplicate_edges,
            dangling_edges,
        };
        if !report.is_clean() {
            warn!(
                duplicate_node_ids = report.duplicate_node_ids.len(),
                duplicate_edges = report.duplicate_edges,
                dangling_edges = report.dangling_edges,
                "snapshot indexed with integrity anomalies"
            );
        }

        Self {
            nodes,
            adjacency,
            report,
        }
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns the channels incident to a node id, in insertion order.
    /// Unknown ids yield an empty slice.
    #[must_use]
    pub fn channels(&self, id: &str) -> &[ChannelEdge] {
        self.adjacency.get(id).map_or(&[], Vec::as_slice)
    }

    /// Number of indexed nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Anomalies observed during the build.
    #[must_use]
    pub fn report(&self) -> &IndexReport {
        &self.report
    }
}
