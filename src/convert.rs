//! Tree-to-value transformation
//!
//! Converts an [`Element`] subtree into a `serde_json::Value` following the
//! nmap-style convention:
//!
//! - the result is always `{ tag: <content> }`;
//! - a childless, attribute-free element collapses to its trimmed text, or
//!   `null` when the text is empty or whitespace-only;
//! - otherwise content is an object: child contents grouped by tag (a single
//!   child stored bare, repeats stored as a document-order array), then
//!   attributes prefixed with `@`, then trimmed text under `#text`.
//!
//! The conversion is a pure function of the subtree: no state, no side
//! effects.

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

use crate::element::Element;
use crate::error::{Result, TransformError};

/// Configuration for the transformer
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Key used for text content alongside attributes or children
    text_key: String,
    /// Prefix for attribute names
    attr_prefix: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            text_key: "#text".to_string(),
            attr_prefix: "@".to_string(),
        }
    }
}

impl ConverterConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the text key
    pub fn text_key(&self) -> &str {
        &self.text_key
    }

    /// Get the attribute prefix
    pub fn attr_prefix(&self) -> &str {
        &self.attr_prefix
    }

    /// Set the text key
    pub fn with_text_key(mut self, key: impl Into<String>) -> Self {
        self.text_key = key.into();
        self
    }

    /// Set the attribute prefix
    pub fn with_attr_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attr_prefix = prefix.into();
        self
    }
}

/// Element-to-JSON transformer
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConverterConfig,
}

impl Converter {
    /// Create a new converter with the default convention
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with configuration
    pub fn with_config(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert a subtree to `{ tag: <content> }`
    pub fn convert(&self, element: &Element) -> Result<JsonValue> {
        let content = self.content(element)?;
        let mut wrapper = Map::new();
        wrapper.insert(element.tag().to_string(), content);
        Ok(JsonValue::Object(wrapper))
    }

    /// Compute the content of an element, children before parent
    fn content(&self, element: &Element) -> Result<JsonValue> {
        if element.tag().is_empty() {
            return Err(TransformError::new("element has an empty tag name").into());
        }

        let trimmed = element.text().map(str::trim).filter(|t| !t.is_empty());

        // Simple case: bare trimmed text, or null
        if !element.has_attributes() && !element.has_children() {
            return Ok(match trimmed {
                Some(text) => JsonValue::String(text.to_string()),
                None => JsonValue::Null,
            });
        }

        let mut result = Map::new();

        // Group child contents by tag, first-occurrence order; the
        // single-vs-array decision is made on the collected count
        let mut grouped: IndexMap<String, Vec<JsonValue>> = IndexMap::new();
        for child in &element.children {
            let value = self.content(child)?;
            grouped
                .entry(child.tag().to_string())
                .or_default()
                .push(value);
        }
        for (tag, mut values) in grouped {
            if values.len() == 1 {
                result.insert(tag, values.remove(0));
            } else {
                result.insert(tag, JsonValue::Array(values));
            }
        }

        for (name, value) in &element.attributes {
            let key = format!("{}{}", self.config.attr_prefix(), name);
            if result
                .insert(key.clone(), JsonValue::String(value.clone()))
                .is_some()
            {
                return Err(TransformError::new(format!(
                    "attribute key '{}' collides with a child entry",
                    key
                ))
                .with_tag(element.tag())
                .into());
            }
        }

        if let Some(text) = trimmed {
            let key = self.config.text_key().to_string();
            if result
                .insert(key.clone(), JsonValue::String(text.to_string()))
                .is_some()
            {
                return Err(TransformError::new(format!(
                    "text key '{}' collides with a child entry",
                    key
                ))
                .with_tag(element.tag())
                .into());
            }
        }

        Ok(JsonValue::Object(result))
    }
}
