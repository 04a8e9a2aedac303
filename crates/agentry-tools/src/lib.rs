//! # Agentry Tools
//!
//! Built-in tools for Agentry agents and the [`ToolCatalog`] that exposes
//! them by name.
//!
//! ## Features
//!
//! - **I/O Tools** (`io`): `file_processor` for single-file operations
//! - **Network Tools** (`network`): `http_request` for outbound HTTP calls

/// Name-indexed tool collection with invocation preconditions.
pub mod catalog;
/// Standard tool library.
pub mod standard;

pub use agentry_core::{FailureReason, Tool, ToolError, ToolExt, ToolInput, ToolResult};
pub use catalog::{ToolCatalog, ToolInfo};
pub use standard::*;
