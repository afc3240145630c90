//! Scene events and outbound commands.
//!
//! Events drive the scene reducer; commands flow out of it. The scene never
//! calls a rendering collaborator directly: it emits [`SceneCommand`] values
//! that collaborators subscribe to, keeping the core decoupled from any
//! rendering technology.

use super::error::PeergraphError;
use super::filter::FilterCriteria;
use super::model::GraphSnapshot;
use super::projection::VisibleSubgraph;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new unique event ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata common to all scene events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub id: EventId,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
}

impl EventMetadata {
    /// Creates new metadata with current timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: EventId::new(),
            timestamp: Utc::now(),
        }
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Payload types for scene events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenePayload {
    /// The data-acquisition collaborator resolved a snapshot. Replaces any
    /// prior snapshot wholesale.
    SnapshotLoaded { snapshot: GraphSnapshot },
    /// Filter criteria changed.
    FilterChanged { criteria: FilterCriteria },
    /// A node was selected by id.
    NodeSelected { id: String },
    /// The selection was cleared.
    SelectionCleared,
}

/// A scene event: metadata plus payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event payload.
    pub payload: ScenePayload,
}

impl SceneEvent {
    /// Creates an event with fresh metadata.
    #[must_use]
    pub fn new(payload: ScenePayload) -> Self {
        Self {
            metadata: EventMetadata::new(),
            payload,
        }
    }

    /// Creates a snapshot-loaded event.
    #[must_use]
    pub fn snapshot_loaded(snapshot: GraphSnapshot) -> Self {
        Self::new(ScenePayload::SnapshotLoaded { snapshot })
    }

    /// Creates a filter-changed event.
    #[must_use]
    pub fn filter_changed(criteria: FilterCriteria) -> Self {
        Self::new(ScenePayload::FilterChanged { criteria })
    }

    /// Creates a node-selected event.
    #[must_use]
    pub fn node_selected(id: impl Into<String>) -> Self {
        Self::new(ScenePayload::NodeSelected { id: id.into() })
    }

    /// Creates a selection-cleared event.
    #[must_use]
    pub fn selection_cleared() -> Self {
        Self::new(ScenePayload::SelectionCleared)
    }

    /// When the event occurred.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.metadata.timestamp
    }
}

/// Outbound commands for rendering/presentation collaborators.
///
/// The scene treats collaborators as write-only sinks: it emits commands and
/// makes no assumption about what consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneCommand {
    /// A new snapshot is in effect; (re)initialize the rendering surface.
    Initialize {
        snapshot: GraphSnapshot,
        fingerprint: String,
    },
    /// Redraw with the given visible subgraph.
    Redraw { subgraph: VisibleSubgraph },
    /// Highlight the given node ids (the current filtered set).
    Highlight { ids: Vec<String> },
    /// Bring the given node into focus.
    Focus { id: String },
    /// A recoverable error occurred; surface it to the presentation layer.
    ReportError { error: PeergraphError },
}
