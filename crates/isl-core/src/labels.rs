//! Class-index-to-label mapping.
//!
//! Persisted as a JSON object with string-encoded integer keys
//! (`{"0": "hello", "1": "thank_you"}`), matching the side file written next
//! to the trained model. Loaded once at startup and immutable thereafter.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{Deserializer, Error as DeError};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Bijection between class index and human-readable label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap(BTreeMap<usize, String>);

impl LabelMap {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, String)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    pub fn insert(&mut self, index: usize, label: impl Into<String>) {
        self.0.insert(index, label.into());
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(&index).map(String::as_str)
    }

    /// Label for `index`, or `"unknown"` when the classifier emits a class
    /// the map does not cover.
    pub fn label_or_unknown(&self, index: usize) -> &str {
        self.get(index).unwrap_or("unknown")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl fmt::Display for LabelMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, label) in self.iter() {
            writeln!(f, "{idx}: {label}")?;
        }
        Ok(())
    }
}

impl Serialize for LabelMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (index, label) in &self.0 {
            map.serialize_entry(&index.to_string(), label)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LabelMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut map = BTreeMap::new();
        for (key, label) in raw {
            let index: usize = key
                .parse()
                .map_err(|_| D::Error::custom(format!("non-integer label index: {key:?}")))?;
            map.insert(index, label);
        }
        Ok(Self(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LabelMap {
        LabelMap::from_pairs([(0, "hello".to_string()), (1, "thank_you".to_string())])
    }

    #[test]
    fn test_lookup() {
        let map = sample();
        assert_eq!(map.get(0), Some("hello"));
        assert_eq!(map.get(7), None);
        assert_eq!(map.label_or_unknown(7), "unknown");
    }

    #[test]
    fn test_json_round_trip() {
        let map = sample();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"0":"hello","1":"thank_you"}"#);

        let back: LabelMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_rejects_non_integer_keys() {
        let err = serde_json::from_str::<LabelMap>(r#"{"zero":"hello"}"#).unwrap_err();
        assert!(err.to_string().contains("non-integer label index"));
    }
}
