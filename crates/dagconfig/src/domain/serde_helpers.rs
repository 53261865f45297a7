//! Lenient field deserializers for graph documents.
//!
//! Graph documents are hand-written YAML, so string fields accept any scalar
//! and keep it exactly as written (`Id: 0x1F` reads as `"0x1F"`), and an
//! explicit null reads as the field's empty value rather than failing the
//! whole load.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;
use std::marker::PhantomData;

/// Deserialize any scalar into its text as written in the document.
///
/// Null becomes the empty string. Sequences and mappings are rejected.
pub(crate) fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarStringVisitor;

    impl Visitor<'_> for ScalarStringVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or other scalar value")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(v)
        }

        // Self-describing formats that hand over typed scalars instead of text.
        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }
    }

    struct NullableScalar(String);

    impl<'de> Deserialize<'de> for NullableScalar {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            // YAML hands back the scalar's source text for `deserialize_str`,
            // which is what keeps `0x1F` or `1.0` from being normalised.
            deserializer.deserialize_str(ScalarStringVisitor).map(Self)
        }
    }

    Option::<NullableScalar>::deserialize(deserializer).map(|s| s.map(|s| s.0).unwrap_or_default())
}

/// Deserialize `T`, treating an explicit null as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// [`scalar_string`] for a key that is present, so it can be told apart from
/// a missing key when merge keys are resolved.
pub(crate) fn present_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_string(deserializer).map(Some)
}

/// `T` for a key that is present.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// [`null_as_default`] for a key that is present.
pub(crate) fn present_or_default<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    null_as_default(deserializer).map(Some)
}

/// Deserialize the value of a `<<` merge key: one mapping or a list of them.
///
/// Each mapping is read straight from the document, so aliased anchors keep
/// the same scalar handling as inline fields.
pub(crate) fn merge_sources<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct MergeSourcesVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for MergeSourcesVisitor<T> {
        type Value = Vec<T>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a mapping or a sequence of mappings to merge")
        }

        fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
            T::deserialize(de::value::MapAccessDeserializer::new(map)).map(|source| vec![source])
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut sources = Vec::new();
            while let Some(source) = seq.next_element()? {
                sources.push(source);
            }
            Ok(sources)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(MergeSourcesVisitor(PhantomData))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(rename = "Value", deserialize_with = "scalar_string")]
        value: String,
        #[serde(rename = "Items", deserialize_with = "null_as_default")]
        items: Vec<String>,
    }

    #[rstest]
    #[case::plain("Value: hello", "hello")]
    #[case::quoted_number("Value: '007'", "007")]
    #[case::leading_zeros("Value: 007", "007")]
    #[case::integer("Value: 42", "42")]
    #[case::negative("Value: -3", "-3")]
    #[case::float("Value: 1.5", "1.5")]
    #[case::float_trailing_zero("Value: 1.0", "1.0")]
    #[case::hex("Value: 0x1F", "0x1F")]
    #[case::octal("Value: 0o17", "0o17")]
    #[case::exponent("Value: 1e3", "1e3")]
    #[case::infinity("Value: .inf", ".inf")]
    #[case::beyond_u64("Value: 18446744073709551616", "18446744073709551616")]
    #[case::beyond_i64("Value: -99999999999999999999", "-99999999999999999999")]
    #[case::boolean("Value: true", "true")]
    #[case::quoted_tilde("Value: '~'", "~")]
    #[case::tilde_null("Value: ~", "")]
    #[case::word_null("Value: null", "")]
    #[case::empty_null("Value:", "")]
    #[case::missing("Items: []", "")]
    fn test_scalar_string(#[case] yaml: &str, #[case] expected: &str) {
        let sample: Sample = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(sample.value, expected);
    }

    #[rstest]
    #[case::sequence("Value: [a, b]")]
    #[case::mapping("Value: {a: b}")]
    fn test_scalar_string_rejects_collections(#[case] yaml: &str) {
        let result = serde_yaml::from_str::<Sample>(yaml);
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("invalid type"), "got: {msg}");
        assert!(msg.contains("line 1"), "got: {msg}");
    }

    #[test]
    fn test_null_as_default() {
        let sample: Sample = serde_yaml::from_str("Items:").unwrap();
        assert!(sample.items.is_empty());

        let sample: Sample = serde_yaml::from_str("Items: ~").unwrap();
        assert!(sample.items.is_empty());

        let sample: Sample = serde_yaml::from_str("Items: [x, y]").unwrap();
        assert_eq!(sample.items, vec!["x", "y"]);
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Layer {
        #[serde(rename = "Value", deserialize_with = "present_scalar")]
        value: Option<String>,
        #[serde(rename = "<<", deserialize_with = "merge_sources")]
        merge: Vec<Layer>,
    }

    #[test]
    fn test_present_scalar_distinguishes_missing_from_null() {
        let layer: Layer = serde_yaml::from_str("Value: ~").unwrap();
        assert_eq!(layer.value.as_deref(), Some(""));

        let layer: Layer = serde_yaml::from_str("Other: x").unwrap();
        assert_eq!(layer.value, None);
    }

    #[test]
    fn test_merge_sources_single_and_list() {
        let yaml = "
a: &a
  Value: 0x10
b: &b
  Value: second
one:
  <<: *a
many:
  <<: [*a, *b]
";
        #[derive(Deserialize)]
        struct Doc {
            one: Layer,
            many: Layer,
        }

        let doc: Doc = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(doc.one.merge.len(), 1);
        assert_eq!(doc.one.merge[0].value.as_deref(), Some("0x10"));

        let values: Vec<_> = doc.many.merge.iter().map(|l| l.value.as_deref()).collect();
        assert_eq!(values, vec![Some("0x10"), Some("second")]);
    }

    #[test]
    fn test_merge_sources_rejects_scalar() {
        let result = serde_yaml::from_str::<Layer>("<<: nope");
        assert!(result.is_err());
    }
}
