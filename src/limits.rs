//! Limits and constraints for streaming XML processing
//!
//! This module defines limits enforced while a subtree is being built, so a
//! hostile or broken input cannot grow parser state without bound (e.g. deep
//! nesting or an element carrying thousands of attributes).

use crate::error::{Error, Result};

/// Resource limits applied by the streaming parser
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum element nesting depth
    pub max_depth: usize,

    /// Maximum number of attributes per element
    pub max_attributes: usize,

    /// Maximum number of elements in a single designated-tag subtree
    pub max_subtree_elements: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            max_attributes: 1000,
            max_subtree_elements: 1_000_000,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_depth: 100,
            max_attributes: 100,
            max_subtree_elements: 100_000,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_depth: 10000,
            max_attributes: 10000,
            max_subtree_elements: 10_000_000,
        }
    }

    /// Check if element depth is within limits
    pub fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            Err(Error::LimitExceeded(format!(
                "element depth {} exceeds maximum {}",
                depth, self.max_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if number of attributes is within limits
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        if count > self.max_attributes {
            Err(Error::LimitExceeded(format!(
                "attribute count {} exceeds maximum {}",
                count, self.max_attributes
            )))
        } else {
            Ok(())
        }
    }

    /// Check if the number of elements in the current subtree is within limits
    pub fn check_subtree_elements(&self, count: usize) -> Result<()> {
        if count > self.max_subtree_elements {
            Err(Error::LimitExceeded(format!(
                "subtree element count {} exceeds maximum {}",
                count, self.max_subtree_elements
            )))
        } else {
            Ok(())
        }
    }
}
