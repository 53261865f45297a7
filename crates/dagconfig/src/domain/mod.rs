//! Domain types for deployment graphs.
//!
//! A [`GraphConfig`] owns an ordered list of [`Service`] nodes and an ordered
//! list of [`Relationship`] edges. Document order is preserved and is the
//! order lookups scan in.
//!
//! Document keys are PascalCase (`Name`, `Id`, `Services`, ...) and are
//! matched case-sensitively. Missing or null fields take their empty value,
//! and YAML merge keys (`<<: *anchor`) fill fields an entity leaves out.

mod document;
mod serde_helpers;

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

/// An untyped property value.
///
/// Property schemas are not fixed yet, so values are kept as raw YAML.
pub type Property = serde_yaml::Value;

/// Open-ended property bag attached to services and relationships.
pub type Properties = BTreeMap<String, Property>;

/// Identifier of a service, relationship, or graph
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Create a new identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_helpers::scalar_string(deserializer).map(Self)
    }
}

/// A node in the deployment graph
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "document::ServiceFields")]
pub struct Service {
    /// Display name
    pub name: String,

    /// Service identifier
    pub id: Identifier,

    /// Service kind (free-form)
    pub service_type: String,

    /// Additional properties
    pub properties: Properties,
}

/// A directed edge between two services.
///
/// `from` and `to` are expected to name service identifiers, but nothing
/// checks that those services exist.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "document::RelationshipFields")]
pub struct Relationship {
    /// Display name
    pub name: String,

    /// Relationship identifier
    pub id: Identifier,

    /// Human-readable description
    pub description: String,

    /// Identifier of the source service
    pub from: Identifier,

    /// Identifier of the target service
    pub to: Identifier,

    /// Additional properties
    pub properties: Properties,
}

/// The DAG configuration for a deployment.
///
/// Created empty, populated once by a load (see [`crate::loader`]), then
/// queried through a [`crate::Lookup`]. There is no mutation API beyond
/// replacing the whole snapshot with another load.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "document::GraphFields")]
pub struct GraphConfig {
    /// Deployment name
    pub name: String,

    /// Deployment identifier
    pub id: Identifier,

    /// Services in document order
    pub services: Vec<Service>,

    /// Relationships in document order
    pub relationships: Vec<Relationship>,
}

impl GraphConfig {
    /// Create an empty graph configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the graph has no services and no relationships.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty() && self.relationships.is_empty()
    }
}
