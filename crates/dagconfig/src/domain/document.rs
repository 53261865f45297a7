//! Document-level shapes of graph entities, before YAML merge keys
//! (`<<: *anchor`) are applied.
//!
//! Every field is `Option` so a key written on the entity can be told apart
//! from one that is missing and may be filled from a merge source. Keys
//! written on the entity win over merged ones, and earlier merge sources win
//! over later ones.

use super::serde_helpers::{merge_sources, present, present_or_default, present_scalar};
use super::{GraphConfig, Identifier, Properties, Relationship, Service};
use serde::Deserialize;

/// Resolution of `<<` merge keys on a document shape.
pub(crate) trait Merge: Sized {
    /// Detach the merge sources.
    fn take_sources(&mut self) -> Vec<Self>;

    /// Fill each missing field from `source`.
    fn fill_missing(&mut self, source: Self);

    /// Apply every merge source, nested ones included.
    fn resolve_merges(mut self) -> Self {
        for source in self.take_sources() {
            self.fill_missing(source.resolve_merges());
        }
        self
    }
}

fn fill<T>(slot: &mut Option<T>, source: Option<T>) {
    if slot.is_none() {
        *slot = source;
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ServiceFields {
    #[serde(rename = "Name", deserialize_with = "present_scalar")]
    name: Option<String>,
    #[serde(rename = "Id", deserialize_with = "present")]
    id: Option<Identifier>,
    #[serde(rename = "Type", deserialize_with = "present_scalar")]
    service_type: Option<String>,
    #[serde(rename = "Properties", deserialize_with = "present_or_default")]
    properties: Option<Properties>,
    #[serde(rename = "<<", deserialize_with = "merge_sources")]
    merge: Vec<ServiceFields>,
}

impl Merge for ServiceFields {
    fn take_sources(&mut self) -> Vec<Self> {
        std::mem::take(&mut self.merge)
    }

    fn fill_missing(&mut self, source: Self) {
        fill(&mut self.name, source.name);
        fill(&mut self.id, source.id);
        fill(&mut self.service_type, source.service_type);
        fill(&mut self.properties, source.properties);
    }
}

impl From<ServiceFields> for Service {
    fn from(fields: ServiceFields) -> Self {
        let fields = fields.resolve_merges();
        Self {
            name: fields.name.unwrap_or_default(),
            id: fields.id.unwrap_or_default(),
            service_type: fields.service_type.unwrap_or_default(),
            properties: fields.properties.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RelationshipFields {
    #[serde(rename = "Name", deserialize_with = "present_scalar")]
    name: Option<String>,
    #[serde(rename = "Id", deserialize_with = "present")]
    id: Option<Identifier>,
    #[serde(rename = "Description", deserialize_with = "present_scalar")]
    description: Option<String>,
    #[serde(rename = "From", deserialize_with = "present")]
    from: Option<Identifier>,
    #[serde(rename = "To", deserialize_with = "present")]
    to: Option<Identifier>,
    #[serde(rename = "Properties", deserialize_with = "present_or_default")]
    properties: Option<Properties>,
    #[serde(rename = "<<", deserialize_with = "merge_sources")]
    merge: Vec<RelationshipFields>,
}

impl Merge for RelationshipFields {
    fn take_sources(&mut self) -> Vec<Self> {
        std::mem::take(&mut self.merge)
    }

    fn fill_missing(&mut self, source: Self) {
        fill(&mut self.name, source.name);
        fill(&mut self.id, source.id);
        fill(&mut self.description, source.description);
        fill(&mut self.from, source.from);
        fill(&mut self.to, source.to);
        fill(&mut self.properties, source.properties);
    }
}

impl From<RelationshipFields> for Relationship {
    fn from(fields: RelationshipFields) -> Self {
        let fields = fields.resolve_merges();
        Self {
            name: fields.name.unwrap_or_default(),
            id: fields.id.unwrap_or_default(),
            description: fields.description.unwrap_or_default(),
            from: fields.from.unwrap_or_default(),
            to: fields.to.unwrap_or_default(),
            properties: fields.properties.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GraphFields {
    #[serde(rename = "Name", deserialize_with = "present_scalar")]
    name: Option<String>,
    #[serde(rename = "Id", deserialize_with = "present")]
    id: Option<Identifier>,
    #[serde(rename = "Services", deserialize_with = "present_or_default")]
    services: Option<Vec<Service>>,
    #[serde(rename = "Relationships", deserialize_with = "present_or_default")]
    relationships: Option<Vec<Relationship>>,
    #[serde(rename = "<<", deserialize_with = "merge_sources")]
    merge: Vec<GraphFields>,
}

impl Merge for GraphFields {
    fn take_sources(&mut self) -> Vec<Self> {
        std::mem::take(&mut self.merge)
    }

    fn fill_missing(&mut self, source: Self) {
        fill(&mut self.name, source.name);
        fill(&mut self.id, source.id);
        fill(&mut self.services, source.services);
        fill(&mut self.relationships, source.relationships);
    }
}

impl From<GraphFields> for GraphConfig {
    fn from(fields: GraphFields) -> Self {
        let fields = fields.resolve_merges();
        Self {
            name: fields.name.unwrap_or_default(),
            id: fields.id.unwrap_or_default(),
            services: fields.services.unwrap_or_default(),
            relationships: fields.relationships.unwrap_or_default(),
        }
    }
}
