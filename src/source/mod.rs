//! Snapshot acquisition.
//!
//! The core consumes exactly one resolved [`GraphSnapshot`] per load cycle
//! and has no transport dependency. This module defines the acquisition seam
//! ([`SnapshotSource`]) and a file-based implementation for the wire JSON
//! format (`nodes: [{pub_key, alias?, is_reachable, …}]`,
//! `edges: [{node1_pub, node2_pub, …}]`).

use crate::core::error::{PeergraphError, Result};
use crate::core::model::{ChannelEdge, GraphSnapshot, Node};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A collaborator that produces one snapshot per load cycle.
pub trait SnapshotSource {
    /// Fetches and decodes a snapshot.
    ///
    /// # Errors
    /// Returns a data error when the payload cannot be acquired or parsed.
    fn fetch(&self) -> Result<GraphSnapshot>;
}

#[derive(Debug, Deserialize)]
struct WireNode {
    pub_key: String,
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    is_reachable: bool,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct WireEdge {
    node1_pub: String,
    node2_pub: String,
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct WireGraph {
    #[serde(default)]
    nodes: Vec<WireNode>,
    #[serde(default)]
    edges: Vec<WireEdge>,
}

impl From<WireNode> for Node {
    fn from(wire: WireNode) -> Self {
        Self {
            id: wire.pub_key,
            alias: wire.alias.filter(|alias| !alias.is_empty()),
            reachable: wire.is_reachable,
            extra: wire.extra,
        }
    }
}

impl From<WireEdge> for ChannelEdge {
    fn from(wire: WireEdge) -> Self {
        Self {
            endpoint_a: wire.node1_pub,
            endpoint_b: wire.node2_pub,
            extra: wire.extra,
        }
    }
}

/// Parses the wire JSON payload into a snapshot.
///
/// # Errors
/// Returns `snapshot_parse_failed` for malformed payloads.
pub fn parse_snapshot(raw: &str) -> Result<GraphSnapshot> {
    let wire: WireGraph = serde_json::from_str(raw).map_err(|err| {
        PeergraphError::data(
            "snapshot_parse_failed",
            format!("Malformed snapshot payload: {err}"),
            "source:wire",
        )
    })?;

    let snapshot = GraphSnapshot::new(
        wire.nodes.into_iter().map(Node::from).collect(),
        wire.edges.into_iter().map(ChannelEdge::from).collect(),
    );
    debug!(
        nodes = snapshot.nodes.len(),
        edges = snapshot.edges.len(),
        "snapshot parsed"
    );
    Ok(snapshot)
}

/// A snapshot source backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source reading from the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonFileSource {
    fn fetch(&self) -> Result<GraphSnapshot> {
        let raw = fs::read_to_string(&self.path).map_err(|err| {
            PeergraphError::data(
                "snapshot_read_failed",
                format!("Failed to read snapshot file: {err}"),
                "source:json_file",
            )
            .with_context("path", self.path.display().to_string())
            .with_hint("Check that the snapshot file exists and is readable")
        })?;
        parse_snapshot(&raw).map_err(|err| err.with_context("path", self.path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "nodes": [
            {"pub_key": "A", "alias": "Alice", "is_reachable": true, "color": "#ff9900"},
            {"pub_key": "B", "is_reachable": false}
        ],
        "edges": [
            {"node1_pub": "A", "node2_pub": "B", "capacity": "120000"}
        ]
    }"##;

    #[test]
    fn parses_wire_field_names() {
        let snapshot = parse_snapshot(SAMPLE).expect("parse");
        assert_eq!(snapshot.nodes.len(), 2);
        assert_eq!(snapshot.nodes[0].id, "A");
        assert_eq!(snapshot.nodes[0].alias.as_deref(), Some("Alice"));
        assert!(snapshot.nodes[0].reachable);
        assert!(snapshot.nodes[1].alias.is_none());

        assert_eq!(snapshot.edges.len(), 1);
        assert_eq!(snapshot.edges[0].endpoint_a, "A");
        assert_eq!(snapshot.edges[0].endpoint_b, "B");
    }

    #[test]
    fn opaque_wire_fields_are_preserved() {
        let snapshot = parse_snapshot(SAMPLE).expect("parse");
        assert_eq!(
            snapshot.nodes[0].extra.get("color"),
            Some(&serde_json::json!("#ff9900"))
        );
        assert_eq!(
            snapshot.edges[0].extra.get("capacity"),
            Some(&serde_json::json!("120000"))
        );
    }

    #[test]
    fn empty_alias_is_treated_as_absent() {
        let snapshot =
            parse_snapshot(r#"{"nodes": [{"pub_key": "A", "alias": ""}], "edges": []}"#)
                .expect("parse");
        assert!(snapshot.nodes[0].alias.is_none());
    }

    #[test]
    fn malformed_payload_is_a_data_error() {
        let err = parse_snapshot("{not json").expect_err("should fail");
        assert_eq!(err.code, "snapshot_parse_failed");
    }

    #[test]
    fn missing_file_is_a_data_error() {
        let source = JsonFileSource::new("/nonexistent/graph.json");
        let err = source.fetch().expect_err("should fail");
        assert_eq!(err.code, "snapshot_read_failed");
        assert!(err.context.contains_key("path"));
    }

    #[test]
    fn file_source_round_trip() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("graph.json");
        fs::write(&path, SAMPLE).expect("write snapshot");

        let snapshot = JsonFileSource::new(&path).fetch().expect("fetch");
        assert_eq!(snapshot.nodes.len(), 2);
    }
}
