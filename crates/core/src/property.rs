//! Property paths and property maps.
//!
//! The tracker compares entities as flat maps of `path -> JSON value`. Paths
//! are dotted: a root property is `"name"`, a property of an owned sub-object
//! is `"loyalty.code"`. JSON values give every backend one uniform scalar
//! representation, including nulls.

use core::str::FromStr;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{DomainError, DomainResult};

/// Ordered map of tracked property values, keyed by path.
pub type PropertyMap = BTreeMap<PropertyPath, JsonValue>;

/// Validated dotted path into an entity's tracked property graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyPath(String);

impl PropertyPath {
    /// Parse and validate a dotted path.
    ///
    /// Every segment must be a plain identifier: leading alphabetic or `_`,
    /// then alphanumeric or `_`. Empty segments (leading/trailing/double dots)
    /// are rejected.
    pub fn parse(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::invalid_path("empty path"));
        }
        for segment in raw.split('.') {
            if !Self::is_identifier(segment) {
                return Err(DomainError::invalid_path(format!(
                    "segment '{segment}' in '{raw}'"
                )));
            }
        }
        Ok(Self(raw))
    }

    fn is_identifier(segment: &str) -> bool {
        let mut chars = segment.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First segment of the path (the root property it addresses).
    pub fn head(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Append a (validated) relative path, producing `self.rel`.
    pub fn join(&self, rel: &PropertyPath) -> PropertyPath {
        PropertyPath(format!("{}.{}", self.0, rel.0))
    }
}

impl core::fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PropertyPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for PropertyPath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
