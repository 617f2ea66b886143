//! Error types for pgforge

use thiserror::Error;

/// Result type alias using pgforge Error
pub type Result<T> = std::result::Result<T, Error>;

/// pgforge error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("{tool} failed: {detail}")]
    Tool { tool: String, detail: String },

    #[error("Failed to parse tool output: {0}")]
    OutputParse(String),
}

impl Error {
    /// Non-zero exit from an external tool, carrying its captured error text.
    pub fn tool(tool: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            detail: detail.into(),
        }
    }
}
