//! CLI commands and argument parsing.
//!
//! This module provides the command-line interface for Peergraph, built on
//! [`clap`](https://docs.rs/clap). The CLI exercises the query core against
//! a snapshot JSON file.
//!
//! # Commands
//!
//! - **Snapshot inspection**: `summary`
//! - **Filtering**: `nodes --query <q> --only-reachable`
//! - **Selection**: `node <id>`
//! - **Projection**: `subgraph --query <q> --only-reachable`
//!
//! # Output Formats
//!
//! Commands support multiple output formats via the `-f`/`--format` flag:
//!
//! - `table` - Human-readable table format (default)
//! - `json` - Machine-readable JSON
//! - `yaml` - YAML output
//!
//! # Example
//!
//! ```bash,no_run
//! # Summarize a snapshot
//! peergraph --graph graph.json summary
//!
//! # Reachable nodes whose id or alias contains "ali", as JSON
//! peergraph --graph graph.json nodes --query ali --only-reachable -f json
//!
//! # A node and its channels
//! peergraph --graph graph.json node 02abc...
//! ```
//!
//! # Modules
//!
//! - [`commands`] - Command definitions and view construction
//! - [`output`] - Output formatting and table rendering

pub mod commands;
pub mod output;
