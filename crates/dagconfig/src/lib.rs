//! Dagconfig - deployment DAG configuration.
//!
//! This crate loads a deployment's service graph (services plus the directed
//! relationships between them) from a YAML document and provides read-only
//! lookups over the loaded snapshot.
//!
//! # Example
//!
//! ```
//! use dagconfig::{GraphConfig, MatchPolicy};
//!
//! # fn main() -> dagconfig::Result<()> {
//! let graph = GraphConfig::from_yaml_str(
//!     r"
//! Name: shop
//! Id: g1
//! Services:
//!   - Name: Frontend
//!     Id: svc-front
//!     Type: web
//! Relationships: []
//! ",
//! )?;
//!
//! let lookup = graph.lookup(MatchPolicy::TolerateMiscased);
//! let service = lookup.find_service_by_name("frontend");
//! assert_eq!(service.map(|s| s.id.as_str()), Some("svc-front"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod error;
pub mod loader;
pub mod lookup;
pub mod matching;

pub use config::LookupConfig;
pub use domain::{GraphConfig, Identifier, Properties, Property, Relationship, Service};
pub use error::{Error, Result};
pub use lookup::Lookup;
pub use matching::MatchPolicy;
