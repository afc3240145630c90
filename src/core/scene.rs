//! The scene reducer: snapshot ownership and derived state.
//!
//! All derived state is recomputed from the current snapshot by replaying
//! events. The scene is the single logical owner of the snapshot and its
//! indices; every operation is synchronous and side-effect-free beyond
//! producing new derived collections.

use super::error::PeergraphError;
use super::events::{SceneCommand, SceneEvent, ScenePayload};
use super::filter::{filter_nodes, FilterCriteria};
use super::index::GraphIndex;
use super::model::{GraphSnapshot, Node};
use super::projection::{project, VisibleSubgraph};
use super::selection::{resolve, Selection};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Scene lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenePhase {
    /// No snapshot yet; filter/select events record intent only.
    Loading,
    /// A snapshot is loaded and indexed; queries are live.
    Loaded,
}

/// The complete scene state derived from events.
#[derive(Debug, Clone)]
pub struct SceneState {
    phase: ScenePhase,
    snapshot: Option<GraphSnapshot>,
    index: Option<GraphIndex>,
    criteria: FilterCriteria,
    filtered: Vec<Node>,
    visible: VisibleSubgraph,
    selected: Option<String>,
    selection: Selection,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneState {
    /// Creates a scene in the `Loading` phase.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: ScenePhase::Loading,
            snapshot: None,
            index: None,
            criteria: FilterCriteria::default(),
            filtered: Vec::new(),
            visible: VisibleSubgraph::default(),
            selected: None,
            selection: Selection::default(),
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    /// The current snapshot, if loaded.
    #[must_use]
    pub fn snapshot(&self) -> Option<&GraphSnapshot> {
        self.snapshot.as_ref()
    }

    /// Lookup handles (node and adjacency indices), if loaded.
    #[must_use]
    pub fn index(&self) -> Option<&GraphIndex> {
        self.index.as_ref()
    }

    /// Criteria currently in effect.
    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The filtered node set, in snapshot order.
    #[must_use]
    pub fn filtered_nodes(&self) -> &[Node] {
        &self.filtered
    }

    /// The edge-consistent visible subgraph.
    #[must_use]
    pub fn visible_subgraph(&self) -> &VisibleSubgraph {
        &self.visible
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Applies an event, returning the new state and outbound commands.
    ///
    /// Each call fully supersedes the previous derived state (last call
    /// wins). Filter and select commute: either order yields the same final
    /// derived values.
    #[must_use]
    pub fn apply(mut self, event: &SceneEvent) -> (Self, Vec<SceneCommand>) {
        match &event.payload {
            ScenePayload::SnapshotLoaded { snapshot } => self.apply_snapshot(snapshot.clone()),
            ScenePayload::FilterChanged { criteria } => self.apply_filter(criteria.clone()),
            ScenePayload::NodeSelected { id } => {
                self.selected = Some(id.clone());
                let mut commands = Vec::new();
                if let Some(index) = &self.index {
                    self.selection = resolve(id, index);
                    if self.selection.node.is_some() {
                        commands.push(SceneCommand::Focus { id: id.clone() });
                    }
                }
                (self, commands)
            }
            ScenePayload::SelectionCleared => {
                self.selected = None;
                self.selection = Selection::default();
                (self, Vec::new())
            }
        }
    }

    fn apply_snapshot(mut self, snapshot: GraphSnapshot) -> (Self, Vec<SceneCommand>) {
        debug!(
            nodes = snapshot.nodes.len(),
            edges = snapshot.edges.len(),
            "snapshot loaded"
        );
        let fingerprint = snapshot.fingerprint();
        let index = GraphIndex::build(&snapshot);

        let mut commands = vec![SceneCommand::Initialize {
            snapshot: snapshot.clone(),
            fingerprint,
        }];

        // Criteria recorded before the load apply now. A failing pattern
        // falls back to the unfiltered node sequence.
        let filtered = match filter_nodes(&snapshot.nodes, &self.criteria) {
            Ok(filtered) => filtered,
            Err(error) => {
                commands.push(Self::report(error));
                snapshot.nodes.clone()
            }
        };
        let visible = project(&filtered, &snapshot.edges);

        commands.push(SceneCommand::Redraw {
            subgraph: visible.clone(),
        });
        commands.push(SceneCommand::Highlight {
            ids: filtered.iter().map(|node| node.id.clone()).collect(),
        });

        // Selection intent survives a reload; ids absent from the new
        // snapshot resolve to an empty selection.
        self.selection = match &self.selected {
            Some(id) => {
                let selection = resolve(id, &index);
                if selection.node.is_some() {
                    commands.push(SceneCommand::Focus { id: id.clone() });
                }
                selection
            }
            None => Selection::default(),
        };

        self.phase = ScenePhase::Loaded;
        self.snapshot = Some(snapshot);
        self.index = Some(index);
        self.filtered = filtered;
        self.visible = visible;
        (self, commands)
    }

    fn apply_filter(mut self, criteria: FilterCriteria) -> (Self, Vec<SceneCommand>) {
        let Some(snapshot) = &self.snapshot else {
            // Still loading: record intent, emit nothing.
            self.criteria = criteria;
            return (self, Vec::new());
        };

        match filter_nodes(&snapshot.nodes, &criteria) {
            Ok(filtered) => {
                debug!(
                    query = %criteria.query,
                    only_reachable = criteria.only_reachable,
                    matched = filtered.len(),
                    "filter applied"
                );
                let visible = project(&filtered, &snapshot.edges);
                let commands = vec![
                    SceneCommand::Redraw {
                        subgraph: visible.clone(),
                    },
                    SceneCommand::Highlight {
                        ids: filtered.iter().map(|node| node.id.clone()).collect(),
                    },
                ];
                self.criteria = criteria;
                self.filtered = filtered;
                self.visible = visible;
                (self, commands)
            }
            Err(error) => {
                // Recover locally: previous filtered set and criteria stand.
                (self, vec![Self::report(error)])
            }
        }
    }

    fn report(error: PeergraphError) -> SceneCommand {
        debug!(code = %error.code, "recoverable scene error");
        SceneCommand::ReportError { error }
    }
}
