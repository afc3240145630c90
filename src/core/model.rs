//! Snapshot, node, and channel-edge types.
//!
//! A snapshot is immutable once received. The core never mutates it in
//! place; everything else in the crate is derived from it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// A network peer, identified by a unique id (the source's `pub_key`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Node {
    /// Unique node id. Identity is this field alone.
    pub id: String,
    /// Optional human-readable alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Whether the peer was reachable when the snapshot was taken.
    #[serde(default)]
    pub reachable: bool,
    /// Opaque source fields carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Node {
    /// Creates a new node with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            alias: None,
            reachable: false,
            extra: BTreeMap::new(),
        }
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the reachability flag.
    #[must_use]
    pub fn reachable(mut self, reachable: bool) -> Self {
        self.reachable = reachable;
        self
    }
}

/// A channel between two node ids.
///
/// A channel has no identity beyond its endpoint pair; two edges with the
/// same (unordered) endpoints are logically the same channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChannelEdge {
    /// First endpoint node id.
    pub endpoint_a: String,
    /// Second endpoint node id.
    pub endpoint_b: String,
    /// Opaque channel fields carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ChannelEdge {
    /// Creates a new edge between two node ids.
    #[must_use]
    pub fn new(endpoint_a: impl Into<String>, endpoint_b: impl Into<String>) -> Self {
        Self {
            endpoint_a: endpoint_a.into(),
            endpoint_b: endpoint_b.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Returns the order-normalized endpoint pair, the value key under which
    /// logically identical edges collide.
    #[must_use]
    pub fn endpoint_pair(&self) -> (&str, &str) {
        if self.endpoint_a <= self.endpoint_b {
            (&self.endpoint_a, &self.endpoint_b)
        } else {
            (&self.endpoint_b, &self.endpoint_a)
        }
    }

    /// Whether the edge is incident to the given node id.
    #[must_use]
    pub fn touches(&self, id: &str) -> bool {
        self.endpoint_a == id || self.endpoint_b == id
    }
}

/// An immutable point-in-time capture of the full node/edge set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GraphSnapshot {
    /// Ordered node sequence. Ids are expected to be unique.
    pub nodes: Vec<Node>,
    /// Ordered edge sequence.
    pub edges: Vec<ChannelEdge>,
}

impl GraphSnapshot {
    /// Creates a snapshot from node and edge sequences.
    #[must_use]
    pub fn new(nodes: Vec<Node>, edges: Vec<ChannelEdge>) -> Self {
        Self { nodes, edges }
    }

    /// Computes a content fingerprint over the node/edge identity sequence.
    ///
    /// The fingerprint is order-invariant so that two snapshots carrying the
    /// same peers and channels hash identically regardless of source
    /// ordering. It tags derived state with the snapshot it came from.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut lines = Vec::with_capacity(self.nodes.len() + self.edges.len());
        for node in &self.nodes {
            lines.push(format!(
                "node|{}|{}|{}",
                node.id,
                node.alias.as_deref().unwrap_or_default(),
                node.reachable
            ));
        }
        for edge in &self.edges {
            let (a, b) = edge.endpoint_pair();
            lines.push(format!("edge|{a}|{b}"));
        }
        lines.sort();
        digest_hex(lines.join("\n").as_bytes())
    }
}

fn digest_hex(payload: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    let digest = hasher.finalize();
    format!("{digest:x}")
}
