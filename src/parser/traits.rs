//! Parser trait definition

use crate::parser::types::UsesValue;

/// Extracts `uses:` values from a workflow document
pub trait Parser: Send + Sync {
    /// Parse the content and return the `uses:` values in document order
    fn parse(&self, content: &str) -> Result<Vec<UsesValue>, ParseError>;
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to parse the file structure
    #[error("Failed to parse file: {0}")]
    ParseFailed(String),

    /// Invalid syntax in the file
    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),

    /// Tree-sitter related error
    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),
}
