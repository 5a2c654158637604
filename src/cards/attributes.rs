//! Untyped attribute mappings.
//!
//! Catalog and import sources hand cards over as loose key/value maps
//! ("id", "name", "card_type", "hp", "skills", ...). The card factory reads
//! these and builds typed cards; nothing else in the crate keeps them around.
//!
//! ## AttributeValue Types
//!
//! - `Int`: Numbers (cost, hp, energy)
//! - `Bool`: Flags
//! - `Text`: Strings (names, kind tags, elements)
//! - `IntList`: Number lists
//! - `TextList`: String lists (skill names, tags)
//! - `Records`: Nested mappings (skill records)

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::CardDataError;

/// Field name in a catalog record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeKey(pub String);

impl AttributeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AttributeKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for AttributeKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// One attribute value, as loosely typed as the sources deliver it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Int(i64),
    Bool(bool),
    Text(String),
    IntList(Vec<i64>),
    TextList(Vec<String>),
    Records(Vec<Attributes>),
}

impl AttributeValue {
    /// Get as integer. Numeric text ("3") is accepted too.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(v) => Some(*v),
            AttributeValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            AttributeValue::IntList(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            AttributeValue::TextList(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_records(&self) -> Option<&[Attributes]> {
        match self {
            AttributeValue::Records(v) => Some(v),
            _ => None,
        }
    }

    /// Convert a JSON value. `null` has no attribute form and yields `None`.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(AttributeValue::Bool(*b)),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => AttributeValue::Int(i),
                None => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                        AttributeValue::Int(f as i64)
                    }
                    _ => AttributeValue::Text(n.to_string()),
                },
            }),
            Value::String(s) => Some(AttributeValue::Text(s.clone())),
            Value::Object(_) => attributes_from_json(value)
                .ok()
                .map(|attrs| AttributeValue::Records(vec![attrs])),
            Value::Array(items) => Some(list_from_json(items)),
        }
    }
}

fn list_from_json(items: &[Value]) -> AttributeValue {
    if !items.is_empty() && items.iter().all(Value::is_object) {
        let records = items
            .iter()
            .filter_map(|item| attributes_from_json(item).ok())
            .collect();
        return AttributeValue::Records(records);
    }

    if !items.is_empty() && items.iter().all(Value::is_i64) {
        return AttributeValue::IntList(items.iter().filter_map(Value::as_i64).collect());
    }

    // Mixed or string lists degrade to text; nested structures are dropped.
    let texts = items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect();
    AttributeValue::TextList(texts)
}

macro_rules! attribute_from {
    ($($ty:ty => |$v:ident| $body:expr;)+) => {
        $(
            impl From<$ty> for AttributeValue {
                fn from($v: $ty) -> Self {
                    $body
                }
            }
        )+
    };
}

attribute_from! {
    i64 => |v| AttributeValue::Int(v);
    i32 => |v| AttributeValue::Int(i64::from(v));
    u32 => |v| AttributeValue::Int(i64::from(v));
    bool => |v| AttributeValue::Bool(v);
    String => |v| AttributeValue::Text(v);
    &str => |v| AttributeValue::Text(v.to_owned());
    Vec<i64> => |v| AttributeValue::IntList(v);
    Vec<String> => |v| AttributeValue::TextList(v);
    Vec<Attributes> => |v| AttributeValue::Records(v);
}

/// A catalog record: field name to value.
pub type Attributes = FxHashMap<AttributeKey, AttributeValue>;

/// Build an attribute map from a JSON object. `null` members are skipped.
pub fn attributes_from_json(value: &Value) -> Result<Attributes, CardDataError> {
    let object = value.as_object().ok_or(CardDataError::NotAnObject)?;
    Ok(object
        .iter()
        .filter_map(|(key, value)| {
            AttributeValue::from_json(value).map(|v| (AttributeKey::new(key.as_str()), v))
        })
        .collect())
}
