//! Core domain types: the graph model, indices, queries, and the scene reducer.
//!
//! This module contains the heart of Peergraph's domain model. A snapshot is
//! loaded once, indexed once, and every derived value (filtered node set,
//! visible subgraph, selection) is recomputed from it synchronously.
//!
//! # Architecture
//!
//! ```text
//! Events (load/filter/select) → SceneState (derived) → Commands (emit to collaborators)
//! ```
//!
//! # Key Concepts
//!
//! ## Snapshot
//!
//! A [`GraphSnapshot`](model::GraphSnapshot) is an immutable point-in-time
//! capture of the full node/edge set. It replaces any prior snapshot
//! wholesale; the core never mutates it in place.
//!
//! ## Indices
//!
//! [`GraphIndex`](index::GraphIndex) derives two lookup structures from a
//! snapshot: `id → Node` and `id → incident channels`. Indices are rebuilt
//! whenever the snapshot changes and never patched incrementally.
//!
//! ## Queries
//!
//! - [`filter::filter_nodes`]: stable text/reachability filtering. Query
//!   strings match as literal substrings, case-insensitively.
//! - [`projection::project`]: the edge-consistent visible subgraph — only
//!   edges whose both endpoints survive filtering are retained.
//! - [`selection::resolve`]: a node id resolved to its record and incident
//!   channels. A missing id is an empty selection, never an error.
//!
//! ## Scene
//!
//! [`SceneState`](scene::SceneState) owns the snapshot and all derived state.
//! It is an immutable-state reducer: each [`SceneEvent`](events::SceneEvent)
//! produces a new state value plus outbound [`SceneCommand`](events::SceneCommand)s
//! for the rendering and presentation collaborators. The scene never talks to
//! a renderer directly.
//!
//! ## Errors
//!
//! All errors are structured with:
//! - Category (data, filter, index, user, system)
//! - Code (unique within category)
//! - Message (human-readable)
//! - Origin (component that produced the error)
//! - Recovery hint (when applicable)
//!
//! See [`error`] for [`PeergraphError`](error::PeergraphError) and
//! [`Result`](error::Result). Nothing in the core is permitted to halt the
//! process; filter failures fall back to the previous filtered set.
//!
//! # Modules
//!
//! - [`model`] - Snapshot, node, and channel-edge types
//! - [`index`] - `GraphIndex`: node and adjacency indices
//! - [`filter`] - Query/reachability filtering
//! - [`projection`] - Visible-subgraph projection
//! - [`selection`] - Per-node selection resolution
//! - [`events`] - Scene events and outbound commands
//! - [`scene`] - The scene reducer and derived state
//! - [`error`] - Structured error types

pub mod error;
pub mod events;
pub mod filter;
pub mod index;
pub mod model;
pub mod projection;
pub mod scene;
pub mod selection;
