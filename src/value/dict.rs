//! String-keyed container of typed values.

use super::typed::TypedValue;
use crate::error::{BlueprintError, Result};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{self, Serialize, Serializer};
use std::collections::BTreeMap;

/// Maps string keys to [`TypedValue`]s.
///
/// The default value is an empty, usable container. Keys iterate in sorted
/// order, which keeps dumps and "first offending key" reporting stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dict {
    m: BTreeMap<String, TypedValue>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored value, or `None` when the key is absent.
    pub fn get(&self, k: &str) -> Option<&TypedValue> {
        self.m.get(k)
    }

    pub fn has(&self, k: &str) -> bool {
        self.m.contains_key(k)
    }

    /// Adds or overrides a value. Returns the container for chaining.
    pub fn set(&mut self, k: impl Into<String>, v: impl Into<TypedValue>) -> &mut Self {
        self.m.insert(k.into(), v.into());
        self
    }

    /// Returns a copy of the stored entries; changes to it do not affect the container.
    pub fn items(&self) -> BTreeMap<String, TypedValue> {
        self.m.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedValue)> {
        self.m.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.m.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.m.is_empty()
    }

    /// Returns the container as an object-kind value.
    pub fn as_object(&self) -> TypedValue {
        TypedValue::Object(self.items())
    }

    /// Decode a YAML mapping into a container.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(BlueprintError::from_yaml)
    }

    /// Convert every entry to its JSON-compatible form.
    ///
    /// Fails with [`BlueprintError::Marshal`] naming the first key whose value
    /// cannot be represented.
    pub fn marshal(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        let mut out = serde_json::Map::new();
        for (k, v) in &self.m {
            let json = v.to_json().map_err(|reason| BlueprintError::Marshal {
                key: k.clone(),
                reason,
            })?;
            out.insert(k.clone(), json);
        }
        Ok(out)
    }
}

impl<K: Into<String>, V: Into<TypedValue>> FromIterator<(K, V)> for Dict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            m: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Serialize for Dict {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.marshal()
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Dict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // `vars:` with no body decodes as null; treat it as empty.
        let m = Option::<BTreeMap<String, TypedValue>>::deserialize(deserializer)?;
        Ok(Self {
            m: m.unwrap_or_default(),
        })
    }
}
