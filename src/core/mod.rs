//! core
//!
//! Core domain types and configuration for git-whence.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, Oid, commit summaries, time windows
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing keeps abbreviated ids and invalid names out of the engine
//! - Config schemas are strict and reject unknown keys

pub mod config;
pub mod types;
