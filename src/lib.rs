//! Peergraph - indexing and interactive query core for peer/channel graphs.
//!
//! This crate provides the core library functionality for Peergraph.

pub mod cli;
pub mod core;
pub mod source;
