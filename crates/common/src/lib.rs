//! pgforge Common Library
//!
//! Shared types, configuration, and utilities for the pgforge control plane.

pub mod ansi;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use ansi::{sanitize_lines, strip_ansi};
pub use config::ServiceConfig;
pub use error::{Error, Result};
pub use types::ClusterRequest;

/// pgforge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
