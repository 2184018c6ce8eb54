//! # linkplan-common
//!
//! Shared types, error definitions, build configuration, and constants
//! used across the linkplan workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and provides the primitives the resolver and the CLI
//! build upon.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
pub mod version;
