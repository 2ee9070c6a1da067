//! UVLHub Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared domain types, utilities, and error handling for the UVLHub workspace.
//!
//! # Overview
//!
//! - **Types**: datasets, their metadata, authors, feature models and files
//! - **Error Handling**: the common [`HubError`] and [`Result`] alias
//! - **Logging**: `tracing` subscriber setup shared by every binary
//!
//! # Example
//!
//! ```no_run
//! use uvlhub_common::types::PublicationType;
//!
//! let kind = PublicationType::from_value("Book");
//! assert_eq!(kind, Some(PublicationType::Book));
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{HubError, Result};
