//! Configuration tree data model.
//!
//! Every node is explicitly either a section (`ConfigValue::Tree`) or a leaf
//! (`ConfigValue::Scalar`). The distinction is made once, when a value is
//! deserialized or constructed, and the merge engine relies on it instead of
//! probing values at runtime.

use indexmap::IndexMap;
use indexmap::map;
use serde::{Deserialize, Serialize};

/// A terminal configuration value.
///
/// `null` has no representation: documents carrying it are rejected when
/// they are parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`.
    UInteger(u64),
    Float(f64),
    Text(String),
    List(Vec<Scalar>)
}

/// A node of the configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Tree(ConfigTree),
    Scalar(Scalar)
}

impl ConfigValue {
    pub fn is_tree(&self) -> bool {
        matches!(self, Self::Tree(_))
    }

    pub fn as_tree(&self) -> Option<&ConfigTree> {
        match self {
            Self::Tree(tree) => Some(tree),
            Self::Scalar(_) => None
        }
    }
}

/// A mapping from section or setting names to values.
///
/// Keys keep the order they were inserted or parsed in, so a tree
/// serializes back in the host's order and an update document is applied in
/// the order the client wrote it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigTree(IndexMap<String, ConfigValue>);

impl ConfigTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from a JSON document.
    ///
    /// The document must be an object; nested objects become sections and
    /// `null` anywhere is an error.
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Parses a tree from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigValue> {
        self.0.get_mut(key)
    }

    /// Looks up a value by dotted path, e.g. `general.volume`.
    pub fn get_path(&self, path: &str) -> Option<&ConfigValue> {
        let mut segments = path.split('.');
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            current = current.as_tree()?.get(segment)?;
        }
        Some(current)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> map::Iter<'_, String, ConfigValue> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ConfigTree {
    type Item = (&'a String, &'a ConfigValue);
    type IntoIter = map::Iter<'a, String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for ConfigTree {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect()
        )
    }
}

impl From<ConfigTree> for ConfigValue {
    fn from(tree: ConfigTree) -> Self {
        Self::Tree(tree)
    }
}

impl From<Scalar> for ConfigValue {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }

            impl From<$ty> for ConfigValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

scalar_from! {
    bool => Bool,
    i32 => Integer,
    i64 => Integer,
    u64 => UInteger,
    f64 => Float,
    &str => Text,
    String => Text,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_objects_become_sections() {
        let tree = ConfigTree::from_json(json!({
            "general": { "volume": 80, "rate": 1 },
            "language": "en"
        }))
        .unwrap();

        assert!(tree.get("general").unwrap().is_tree());
        assert_eq!(
            tree.get("language"),
            Some(&ConfigValue::Scalar(Scalar::Text("en".to_string())))
        );
        assert_eq!(
            tree.get_path("general.volume"),
            Some(&ConfigValue::Scalar(Scalar::Integer(80)))
        );
    }

    #[test]
    fn test_scalar_variants_are_distinguished() {
        let tree = ConfigTree::from_json(json!({
            "flag": true,
            "count": 3,
            "ratio": 0.5,
            "name": "x",
            "voices": ["a", "b"]
        }))
        .unwrap();

        assert_eq!(tree.get("flag"), Some(&ConfigValue::from(true)));
        assert_eq!(tree.get("count"), Some(&ConfigValue::from(3)));
        assert_eq!(tree.get("ratio"), Some(&ConfigValue::from(0.5)));
        assert_eq!(tree.get("name"), Some(&ConfigValue::from("x")));
        assert_eq!(
            tree.get("voices"),
            Some(&ConfigValue::Scalar(Scalar::List(vec![
                Scalar::from("a"),
                Scalar::from("b")
            ])))
        );
    }

    #[test]
    fn test_large_unsigned_integers_keep_precision() {
        let tree = ConfigTree::from_slice(br#"{"id": 18446744073709551615, "small": 7}"#).unwrap();

        assert_eq!(tree.get("id"), Some(&ConfigValue::from(u64::MAX)));
        assert_eq!(tree.get("small"), Some(&ConfigValue::from(7)));
        assert_eq!(
            serde_json::to_string(&tree).unwrap(),
            r#"{"id":18446744073709551615,"small":7}"#
        );
    }

    #[test]
    fn test_null_is_rejected() {
        assert!(ConfigTree::from_json(json!({ "general": { "volume": null } })).is_err());
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        assert!(ConfigTree::from_json(json!([1, 2, 3])).is_err());
        assert!(ConfigTree::from_json(json!(42)).is_err());
        assert!(ConfigTree::from_slice(b"\"text\"").is_err());
    }

    #[test]
    fn test_serializes_back_to_plain_json() {
        let general: ConfigTree = [("volume", 50)].into_iter().collect();
        let tree: ConfigTree = [("general", general)].into_iter().collect();

        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json, json!({ "general": { "volume": 50 } }));
    }

    #[test]
    fn test_get_path_stops_at_leaves() {
        let tree = ConfigTree::from_json(json!({ "general": { "volume": 80 } })).unwrap();
        assert!(tree.get_path("general.volume.deeper").is_none());
        assert!(tree.get_path("missing").is_none());
    }
}
