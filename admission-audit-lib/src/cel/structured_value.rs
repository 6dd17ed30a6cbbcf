//! The value model shared by parsing extensions and the CEL runtime

use crate::error::ParseError;
use cel_interpreter::Value;
use cel_interpreter::objects::{Key, Map};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// A parsed document: scalar, ordered sequence, or string-keyed mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Sequence(Vec<Self>),
    Mapping(BTreeMap<String, Self>),
}

impl StructuredValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert a YAML tree, stringifying scalar mapping keys.
    ///
    /// # Errors
    ///
    /// Returns an error if a mapping key is itself a sequence or mapping, or if two
    /// distinct keys stringify to the same text (`1` and `'1'`).
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self, ParseError> {
        Ok(match value {
            serde_yaml::Value::Null => Self::Null,
            serde_yaml::Value::Bool(b) => Self::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    // every YAML number is i64, u64 or f64
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_yaml::Value::String(s) => Self::String(s),
            serde_yaml::Value::Sequence(seq) => Self::Sequence(seq.into_iter().map(Self::from_yaml).collect::<Result<_, _>>()?),
            serde_yaml::Value::Mapping(mapping) => {
                let mut entries = BTreeMap::new();
                for (k, v) in mapping {
                    let key = yaml_key(k)?;
                    if entries.contains_key(&key) {
                        return Err(ParseError::new(format!("duplicate mapping key '{key}' after key normalization"), None));
                    }
                    let _ = entries.insert(key, Self::from_yaml(v)?);
                }
                Self::Mapping(entries)
            }
            serde_yaml::Value::Tagged(tagged) => Self::from_yaml(tagged.value)?,
        })
    }

    /// Convert a JSON tree, keeping integers and floats apart.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::String(s.clone()),
            serde_json::Value::Array(items) => Self::Sequence(items.iter().map(Self::from_json).collect()),
            serde_json::Value::Object(fields) => Self::Mapping(fields.iter().map(|(k, v)| (k.clone(), Self::from_json(v))).collect()),
        }
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, ParseError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        other => Err(ParseError::new(format!("unsupported mapping key: {other:?}"), None)),
    }
}

impl From<StructuredValue> for Value {
    fn from(value: StructuredValue) -> Self {
        match value {
            StructuredValue::Null => Self::Null,
            StructuredValue::Bool(b) => Self::Bool(b),
            StructuredValue::Int(i) => Self::Int(i),
            StructuredValue::UInt(u) => Self::UInt(u),
            StructuredValue::Float(f) => Self::Float(f),
            StructuredValue::String(s) => Self::String(Arc::new(s)),
            StructuredValue::Sequence(items) => Self::List(Arc::new(items.into_iter().map(Self::from).collect())),
            StructuredValue::Mapping(entries) => {
                let fields: HashMap<Key, Self> = entries
                    .into_iter()
                    .map(|(k, v)| (Key::String(Arc::new(k)), Self::from(v)))
                    .collect();
                Self::Map(Map::from(fields))
            }
        }
    }
}
