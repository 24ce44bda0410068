//! forge
//!
//! Knowledge of the hosting service: pull request numbers in commit
//! subjects and the web URLs that point at them.
//!
//! # Modules
//!
//! - [`pull_request`]: PR number extraction from commit subjects
//! - [`github`]: URL composition and `owner/repo` discovery
//!
//! Nothing here talks to a network API; the hosting service is only ever
//! addressed through URLs handed to a browser.

pub mod github;
pub mod pull_request;

pub use github::{origin_slug, parse_origin_slug, WebHost};
pub use pull_request::{extract, PrReference};
