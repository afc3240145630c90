//! Per-node selection resolution.
//!
//! Selection is transient, recomputed on every selection event, and
//! independent of the filter state: a node outside the filtered set can
//! still be selected.

use super::index::GraphIndex;
use super::model::{ChannelEdge, Node};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A resolved selection: the node record and its incident channels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Selection {
    /// The selected node, if the id was known.
    pub node: Option<Node>,
    /// Channels incident to the selected node, in adjacency insertion order.
    pub channels: Vec<ChannelEdge>,
}

impl Selection {
    /// Whether nothing resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node.is_none() && self.channels.is_empty()
    }
}

/// Resolves a node id against the indices.
///
/// An id absent from the node index resolves to an empty selection; this is
/// not a failure. Channels for ids absent from the adjacency index are an
/// empty sequence.
#[must_use]
pub fn resolve(id: &str, index: &GraphIndex) -> Selection {
    Selection {
        node: index.node(id).cloned(),
        channels: index.channels(id).to_vec(),
    }
}
