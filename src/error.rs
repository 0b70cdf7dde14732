//! Error types for nmap2json
//!
//! This module defines all error types used throughout the library.
//! Every failure is local and unrecoverable for a single run: nothing is
//! retried internally, errors carry enough context for the CLI boundary to
//! report a human-readable message and exit non-zero.

use std::fmt;
use thiserror::Error;

/// Result type alias using nmap2json Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for nmap2json operations
#[derive(Error, Debug)]
pub enum Error {
    /// The input stream is not well-formed XML, or ends unexpectedly
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// An element subtree violates the transformer's structural assumptions
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    /// Resource limit exceeded while parsing
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error (reading input or writing output)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Streaming parse error with stream context
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Byte position in the input stream where the error was observed
    pub position: Option<u64>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    /// Set the byte position
    pub fn with_position(mut self, position: u64) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(pos) = self.position {
            write!(f, " (at byte {})", pos)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Transformer error for structurally invalid subtrees
///
/// Unreachable given a well-formed parse, but surfaced defensively rather
/// than swallowed.
#[derive(Debug, Clone)]
pub struct TransformError {
    /// Error message
    pub message: String,
    /// Tag of the offending element, where known
    pub tag: Option<String>,
}

impl TransformError {
    /// Create a new transform error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tag: None,
        }
    }

    /// Set the offending tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref tag) = self.tag {
            write!(f, " (element <{}>)", tag)?;
        }

        Ok(())
    }
}

impl std::error::Error for TransformError {}
