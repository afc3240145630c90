//! Command definitions and view construction.
//!
//! Each command produces a serializable view built from the scene's derived
//! state, so every output format renders from the same data.

use crate::cli::output::{create_table, OutputFormat};
use crate::core::error::{PeergraphError, Result};
use crate::core::filter::FilterCriteria;
use crate::core::index::IndexReport;
use crate::core::model::{ChannelEdge, Node};
use crate::core::scene::SceneState;
use clap::{Args, Parser, Subcommand};
use comfy_table::Table;
use serde::Serialize;
use std::path::PathBuf;

/// Peergraph - index and query a peer/channel network graph snapshot.
#[derive(Debug, Parser)]
#[command(name = "peergraph", version, about)]
pub struct Cli {
    /// Path to the snapshot JSON file.
    #[arg(long, global = true)]
    pub graph: Option<PathBuf>,

    /// Output format.
    #[arg(short = 'f', long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarize the snapshot: counts, fingerprint, index report.
    Summary,
    /// List nodes matching the filter criteria.
    Nodes(FilterArgs),
    /// Show a node and its incident channels.
    Node(NodeArgs),
    /// Project the visible subgraph for the filter criteria.
    Subgraph(FilterArgs),
}

/// Filter criteria flags shared by `nodes` and `subgraph`.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Literal substring to match against node id or alias.
    #[arg(long, default_value = "")]
    pub query: String,

    /// Keep only reachable nodes.
    #[arg(long)]
    pub only_reachable: bool,
}

impl FilterArgs {
    /// Converts the flags into filter criteria.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.query.clone(), self.only_reachable)
    }
}

/// Arguments for the `node` command.
#[derive(Debug, Args)]
pub struct NodeArgs {
    /// Node id to resolve.
    pub id: String,
}

/// Snapshot summary view.
#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub fingerprint: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub reachable_count: usize,
    pub report: IndexReport,
}

/// One row of the node list.
#[derive(Debug, Serialize)]
pub struct NodeRow {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub reachable: bool,
    pub channel_count: usize,
}

/// Filtered node list view.
#[derive(Debug, Serialize)]
pub struct NodesView {
    pub count: usize,
    pub nodes: Vec<NodeRow>,
}

/// Selection view: the node record plus incident channels.
#[derive(Debug, Serialize)]
pub struct NodeView {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<Node>,
    pub channel_count: usize,
    pub channels: Vec<ChannelEdge>,
}

/// Visible-subgraph view.
#[derive(Debug, Serialize)]
pub struct SubgraphView {
    pub node_count: usize,
    pub edge_count: usize,
    pub node_ids: Vec<String>,
    pub edges: Vec<ChannelEdge>,
}

/// Builds the summary view from a loaded scene.
///
/// # Errors
/// Returns a system error if the scene holds no snapshot.
pub fn summary_view(state: &SceneState) -> Result<SummaryView> {
    let snapshot = require_snapshot(state)?;
    let index = state
        .index()
        .ok_or_else(|| not_loaded("cli:summary"))?;

    Ok(SummaryView {
        fingerprint: snapshot.fingerprint(),
        node_count: snapshot.nodes.len(),
        edge_count: snapshot.edges.len(),
        reachable_count: snapshot.nodes.iter().filter(|n| n.reachable).count(),
        report: index.report().clone(),
    })
}

/// Builds the filtered node list view from the scene's derived state.
#[must_use]
pub fn nodes_view(state: &SceneState) -> NodesView {
    let rows = state
        .filtered_nodes()
        .iter()
        .map(|node| NodeRow {
            id: node.id.clone(),
            alias: node.alias.clone(),
            reachable: node.reachable,
            channel_count: state
                .index()
                .map_or(0, |index| index.channels(&node.id).len()),
        })
        .collect::<Vec<_>>();

    NodesView {
        count: rows.len(),
        nodes: rows,
    }
}

/// Builds the selection view from the scene's current selection.
#[must_use]
pub fn node_view(state: &SceneState) -> NodeView {
    let selection = state.selection();
    NodeView {
        found: selection.node.is_some(),
        node: selection.node.clone(),
        channel_count: selection.channels.len(),
        channels: selection.channels.clone(),
    }
}

/// Builds the subgraph view from the scene's visible subgraph.
#[must_use]
pub fn subgraph_view(state: &SceneState) -> SubgraphView {
    let subgraph = state.visible_subgraph();
    SubgraphView {
        node_count: subgraph.nodes.len(),
        edge_count: subgraph.edges.len(),
        node_ids: subgraph.node_ids(),
        edges: subgraph.edges.clone(),
    }
}

fn require_snapshot(state: &SceneState) -> Result<&crate::core::model::GraphSnapshot> {
    state.snapshot().ok_or_else(|| not_loaded("cli:summary"))
}

fn not_loaded(origin: &str) -> PeergraphError {
    PeergraphError::system("scene_not_loaded", "No snapshot is loaded", origin)
}

impl SummaryView {
    /// Renders the summary as a table.
    #[must_use]
    pub fn render_table(&self) -> Table {
        let mut table = create_table(&["Field", "Value"]);
        table.add_row(vec!["Fingerprint".to_string(), self.fingerprint.clone()]);
        table.add_row(vec!["Nodes".to_string(), self.node_count.to_string()]);
        table.add_row(vec!["Edges".to_string(), self.edge_count.to_string()]);
        table.add_row(vec![
            "Reachable nodes".to_string(),
            self.reachable_count.to_string(),
        ]);
        table.add_row(vec![
            "Duplicate node ids".to_string(),
            self.report.duplicate_node_ids.len().to_string(),
        ]);
        table.add_row(vec![
            "Duplicate edges".to_string(),
            self.report.duplicate_edges.to_string(),
        ]);
        table.add_row(vec![
            "Dangling edges".to_string(),
            self.report.dangling_edges.to_string(),
        ]);
        table
    }
}

impl NodesView {
    /// Renders the node list as a table.
    #[must_use]
    pub fn render_table(&self) -> Table {
        let mut table = create_table(&["Id", "Alias", "Reachable", "Channels"]);
        for row in &self.nodes {
            table.add_row(vec![
                row.id.clone(),
                row.alias.clone().unwrap_or_else(|| "-".to_string()),
                if row.reachable { "yes" } else { "no" }.to_string(),
                row.channel_count.to_string(),
            ]);
        }
        table
    }
}

impl NodeView {
    /// Renders the selection as a table of channels.
    #[must_use]
    pub fn render_table(&self) -> Table {
        let mut table = create_table(&["Endpoint A", "Endpoint B"]);
        for channel in &self.channels {
            table.add_row(vec![channel.endpoint_a.clone(), channel.endpoint_b.clone()]);
        }
        table
    }
}

impl SubgraphView {
    /// Renders the visible subgraph edges as a table.
    #[must_use]
    pub fn render_table(&self) -> Table {
        let mut table = create_table(&["Endpoint A", "Endpoint B"]);
        for edge in &self.edges {
            table.add_row(vec![edge.endpoint_a.clone(), edge.endpoint_b.clone()]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::SceneEvent;
    use crate::core::model::GraphSnapshot;

    fn loaded_scene() -> SceneState {
        let snapshot = GraphSnapshot::new(
            vec![
                Node::new("A").with_alias("Alice").reachable(true),
                Node::new("B").with_alias("Bob"),
            ],
            vec![ChannelEdge::new("A", "B")],
        );
        let (state, _) = SceneState::new().apply(&SceneEvent::snapshot_loaded(snapshot));
        state
    }

    #[test]
    fn summary_view_counts_snapshot_contents() {
        let view = summary_view(&loaded_scene()).expect("summary");
        assert_eq!(view.node_count, 2);
        assert_eq!(view.edge_count, 1);
        assert_eq!(view.reachable_count, 1);
        assert!(view.report.is_clean());
    }

    #[test]
    fn summary_requires_a_loaded_scene() {
        let err = summary_view(&SceneState::new()).expect_err("should fail");
        assert_eq!(err.code, "scene_not_loaded");
    }

    #[test]
    fn nodes_view_reflects_filtered_set() {
        let (state, _) = loaded_scene().apply(&SceneEvent::filter_changed(FilterCriteria::new(
            "",
            true,
        )));
        let view = nodes_view(&state);
        assert_eq!(view.count, 1);
        assert_eq!(view.nodes[0].id, "A");
        assert_eq!(view.nodes[0].channel_count, 1);
    }

    #[test]
    fn node_view_reports_missing_ids() {
        let (state, _) = loaded_scene().apply(&SceneEvent::node_selected("Z"));
        let view = node_view(&state);
        assert!(!view.found);
        assert_eq!(view.channel_count, 0);
    }
}
