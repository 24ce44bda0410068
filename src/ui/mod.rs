//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All printing goes through this module so that quiet and debug modes are
//! honored consistently.

pub mod output;
