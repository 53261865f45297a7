//! Loading graph configurations from YAML.
//!
//! Two forms are provided: constructors that return a fresh [`GraphConfig`]
//! and `load_*` methods that populate an existing one. Populating replaces
//! the whole snapshot on success and leaves the target untouched on failure.
//!
//! ```no_run
//! use dagconfig::GraphConfig;
//!
//! # fn main() -> dagconfig::Result<()> {
//! let mut graph = GraphConfig::new();
//! graph.load_from_file("deployment.yaml")?;
//! # Ok(())
//! # }
//! ```

use crate::domain::GraphConfig;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

impl GraphConfig {
    /// Parse a graph configuration from a YAML document.
    ///
    /// An empty (or comment-only) document yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] if the document is not valid YAML, holds more
    /// than one document, or does not have the graph structure (for example
    /// `Services` given as a scalar).
    pub fn from_yaml_str(document: &str) -> Result<Self> {
        let graph: Self = parse_document(document)?;
        tracing::debug!(
            services = graph.services.len(),
            relationships = graph.relationships.len(),
            "Loaded graph configuration"
        );
        Ok(graph)
    }

    /// Read and parse a graph configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, in which case no
    /// parsing is attempted, or [`Error::Yaml`] if its content is malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let graph: Self = parse_document(&content)?;
        tracing::debug!(
            path = %path.display(),
            services = graph.services.len(),
            relationships = graph.relationships.len(),
            "Loaded graph configuration"
        );
        Ok(graph)
    }

    /// Replace this configuration with one parsed from `document`.
    ///
    /// # Errors
    ///
    /// Same as [`GraphConfig::from_yaml_str`]. On error `self` is unchanged.
    pub fn load_from_str(&mut self, document: &str) -> Result<()> {
        *self = Self::from_yaml_str(document)?;
        Ok(())
    }

    /// Replace this configuration with one read from the file at `path`.
    ///
    /// # Errors
    ///
    /// Same as [`GraphConfig::from_file`]. On error `self` is unchanged.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        *self = Self::from_file(path)?;
        Ok(())
    }
}

/// Deserialize a single YAML document, treating an empty or null one as
/// `T::default()`.
///
/// The document is read straight into `T`, so scalars keep their source text
/// and errors keep their line and column.
pub(crate) fn parse_document<T>(document: &str) -> std::result::Result<T, serde_yaml::Error>
where
    T: DeserializeOwned + Default,
{
    serde_yaml::from_str::<Option<T>>(document).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    const SAMPLE: &str = "
Name: shop
Id: g1
Services:
  - Name: svc1
    Id: id1
    Type: t
Relationships:
  - Name: rel1
    Id: r1
    From: id1
    To: id1
";

    #[test]
    fn test_from_yaml_str() {
        let graph = GraphConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(graph.name, "shop");
        assert_eq!(graph.id, "g1");
        assert_eq!(graph.services.len(), 1);
        assert_eq!(graph.services[0].service_type, "t");
        assert_eq!(graph.relationships.len(), 1);
        assert_eq!(graph.relationships[0].description, "");
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   \n\n")]
    #[case::comment_only("# nothing here\n")]
    #[case::explicit_null("~")]
    fn test_empty_document_is_empty_graph(#[case] document: &str) {
        let graph = GraphConfig::from_yaml_str(document).unwrap();
        assert_eq!(graph, GraphConfig::new());
    }

    #[rstest]
    #[case::services_scalar("Services: 5")]
    #[case::relationships_mapping("Relationships: {a: b}")]
    #[case::service_not_mapping("Services: [just-a-string]")]
    #[case::name_sequence("Name: [a, b]")]
    #[case::bad_syntax("Services: [unclosed")]
    #[case::multiple_documents("Name: a\n---\nName: b")]
    fn test_malformed_document(#[case] document: &str) {
        let result = GraphConfig::from_yaml_str(document);
        assert!(
            matches!(result, Err(Error::Yaml(_))),
            "expected YAML error, got: {result:?}"
        );
    }

    #[test]
    fn test_malformed_document_reports_location() {
        let err = GraphConfig::from_yaml_str("Name: shop\nServices: 5").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 2"), "got: {msg}");
    }

    #[test]
    fn test_identifiers_beyond_integer_range() {
        let document = "
Services:
  - Name: big
    Id: -99999999999999999999
Relationships:
  - Name: wide
    Id: 0x1F
    From: 18446744073709551616
    To: -99999999999999999999
";
        let graph = GraphConfig::from_yaml_str(document).unwrap();
        let lookup = graph.exact_lookup();

        let service = lookup.find_service_by_id("-99999999999999999999").unwrap();
        assert_eq!(service.name, "big");

        let rel = lookup
            .find_relationship_by_from_id("18446744073709551616")
            .unwrap();
        assert_eq!(rel.name, "wide");
        assert_eq!(lookup.find_relationship_by_id("0x1F"), Some(rel));
        assert!(lookup.find_relationship_by_id("31").is_none());
    }

    #[test]
    fn test_load_from_str_replaces_contents() {
        let mut graph = GraphConfig::from_yaml_str(SAMPLE).unwrap();
        graph.load_from_str("Name: other").unwrap();
        assert_eq!(graph.name, "other");
        assert!(graph.is_empty());
    }

    #[test]
    fn test_failed_load_leaves_target_unchanged() {
        let mut graph = GraphConfig::from_yaml_str(SAMPLE).unwrap();
        let before = graph.clone();

        let result = graph.load_from_str("Name: broken\nServices: 5");
        assert!(result.is_err());
        assert_eq!(graph, before);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("graph.yaml");
        fs::write(&path, SAMPLE).unwrap();

        let mut graph = GraphConfig::new();
        graph.load_from_file(&path).unwrap();
        assert_eq!(graph, GraphConfig::from_yaml_str(SAMPLE).unwrap());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.yaml");

        let mut graph = GraphConfig::new();
        let result = graph.load_from_file(&path);

        match result {
            Err(Error::Io { path: err_path, source }) => {
                assert_eq!(err_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected IO error, got: {other:?}"),
        }
        assert!(graph.is_empty());
    }

    #[test]
    fn test_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = GraphConfig::from_file(temp_dir.path());
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_parse_document_generic() {
        let values: Vec<u32> = parse_document("[1, 2, 3]").unwrap();
        assert_eq!(values, vec![1, 2, 3]);

        let values: Vec<u32> = parse_document("").unwrap();
        assert!(values.is_empty());
    }
}
