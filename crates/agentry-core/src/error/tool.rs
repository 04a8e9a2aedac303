//! Precondition failures around tool invocation.
//!
//! A tool's own execution problems are never reported through this type:
//! they come back as a failed [`ToolResult`](crate::tool::ToolResult).

use thiserror::Error;

/// Errors raised before a tool is executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// No tool with this name is known.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The tool exists but reports itself unavailable.
    #[error("Tool is not available: {0}")]
    Unavailable(String),

    /// The tool rejected the input during validation.
    #[error("Tool '{tool}' rejected its input: {reason}")]
    InvalidInput { tool: String, reason: String },
}

impl ToolError {
    /// Get the error code suitable for logging or reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            ToolError::NotFound(_) => "TOOL_NOT_FOUND",
            ToolError::Unavailable(_) => "TOOL_UNAVAILABLE",
            ToolError::InvalidInput { .. } => "INVALID_INPUT",
        }
    }
}
