//! The tagged value algebra and its YAML decoder.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, VariantAccess, Visitor};
use serde_yaml::Number;
use std::collections::BTreeMap;
use std::fmt;

/// A decoded configuration value.
///
/// YAML scalars collapse into `Null`, `Bool`, `Number` or `String` using the
/// loader's implied typing; mappings become `Object` and sequences `Tuple`.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Object(BTreeMap<String, TypedValue>),
    Tuple(Vec<TypedValue>),
}

impl TypedValue {
    /// Short name of the value's kind, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            TypedValue::Null => "null",
            TypedValue::Bool(_) => "bool",
            TypedValue::Number(_) => "number",
            TypedValue::String(_) => "string",
            TypedValue::Object(_) => "object",
            TypedValue::Tuple(_) => "tuple",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, TypedValue::Object(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert into the JSON-compatible representation.
    ///
    /// Fails only for numbers JSON cannot carry (`.inf`, `.nan`). The error
    /// names the nested path below the top-level key, if any.
    pub fn to_json(&self) -> std::result::Result<serde_json::Value, String> {
        self.to_json_at("")
    }

    fn to_json_at(&self, path: &str) -> std::result::Result<serde_json::Value, String> {
        use serde_json::Value as Json;

        Ok(match self {
            TypedValue::Null => Json::Null,
            TypedValue::Bool(b) => Json::Bool(*b),
            TypedValue::Number(n) => Json::Number(number_to_json(n).map_err(|reason| {
                if path.is_empty() {
                    reason
                } else {
                    format!("{} (at {})", reason, path)
                }
            })?),
            TypedValue::String(s) => Json::String(s.clone()),
            TypedValue::Object(fields) => {
                let mut out = serde_json::Map::new();
                for (name, value) in fields {
                    out.insert(name.clone(), value.to_json_at(&join_path(path, name))?);
                }
                Json::Object(out)
            }
            TypedValue::Tuple(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, value) in items.iter().enumerate() {
                    out.push(value.to_json_at(&join_path(path, &i.to_string()))?);
                }
                Json::Array(out)
            }
        })
    }
}

fn join_path(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", path, segment)
    }
}

fn number_to_json(n: &Number) -> std::result::Result<serde_json::Number, String> {
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .ok_or_else(|| format!("number {} has no JSON representation", n))
}

fn number_from_json(n: &serde_json::Number) -> Number {
    if let Some(u) = n.as_u64() {
        Number::from(u)
    } else if let Some(i) = n.as_i64() {
        Number::from(i)
    } else {
        Number::from(n.as_f64().unwrap_or_default())
    }
}

impl From<serde_json::Value> for TypedValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => TypedValue::Null,
            Json::Bool(b) => TypedValue::Bool(b),
            Json::Number(n) => TypedValue::Number(number_from_json(&n)),
            Json::String(s) => TypedValue::String(s),
            Json::Array(items) => TypedValue::Tuple(items.into_iter().map(Into::into).collect()),
            Json::Object(fields) => {
                TypedValue::Object(fields.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::String(s.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        TypedValue::String(s)
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        TypedValue::Bool(b)
    }
}

impl From<i64> for TypedValue {
    fn from(i: i64) -> Self {
        TypedValue::Number(Number::from(i))
    }
}

impl From<f64> for TypedValue {
    fn from(f: f64) -> Self {
        TypedValue::Number(Number::from(f))
    }
}

impl From<Vec<TypedValue>> for TypedValue {
    fn from(items: Vec<TypedValue>) -> Self {
        TypedValue::Tuple(items)
    }
}

impl From<BTreeMap<String, TypedValue>> for TypedValue {
    fn from(fields: BTreeMap<String, TypedValue>) -> Self {
        TypedValue::Object(fields)
    }
}

impl<'de> Deserialize<'de> for TypedValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TypedValueVisitor)
    }
}

struct TypedValueVisitor;

impl<'de> Visitor<'de> for TypedValueVisitor {
    type Value = TypedValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML scalar, mapping, or sequence")
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> std::result::Result<TypedValue, E> {
        Ok(TypedValue::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> std::result::Result<TypedValue, E> {
        Ok(TypedValue::Number(Number::from(i)))
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> std::result::Result<TypedValue, E> {
        Ok(TypedValue::Number(Number::from(u)))
    }

    // Integers wider than 64 bits fall back to floats.
    fn visit_i128<E: de::Error>(self, i: i128) -> std::result::Result<TypedValue, E> {
        Ok(TypedValue::Number(Number::from(i as f64)))
    }

    fn visit_u128<E: de::Error>(self, u: u128) -> std::result::Result<TypedValue, E> {
        Ok(TypedValue::Number(Number::from(u as f64)))
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> std::result::Result<TypedValue, E> {
        Ok(TypedValue::Number(Number::from(f)))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<TypedValue, E> {
        Ok(TypedValue::String(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> std::result::Result<TypedValue, E> {
        Ok(TypedValue::String(s))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<TypedValue, E> {
        Ok(TypedValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<TypedValue, E> {
        Ok(TypedValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<TypedValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        TypedValue::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<TypedValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<TypedValue>()? {
            items.push(item);
        }
        Ok(TypedValue::Tuple(items))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<TypedValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut fields = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, TypedValue>()? {
            if fields.insert(key.clone(), value).is_some() {
                return Err(de::Error::custom(format!("duplicate key '{}'", key)));
            }
        }
        Ok(TypedValue::Object(fields))
    }

    // Tagged nodes (`!custom value`) arrive as enums; the tag is dropped and
    // the node decodes as if untagged.
    fn visit_enum<A>(self, data: A) -> std::result::Result<TypedValue, A::Error>
    where
        A: de::EnumAccess<'de>,
    {
        let (_tag, node) = data.variant::<String>()?;
        node.newtype_variant::<TypedValue>()
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::String(s) => f.write_str(s),
            other => match other.to_json() {
                Ok(json) => write!(f, "{}", json),
                Err(_) => write!(f, "<{}>", other.type_name()),
            },
        }
    }
}
