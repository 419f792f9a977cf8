//! Request parameters.
//!
//! The node only accepts string-valued fields, so every [`ParamValue`] is
//! rendered to text when the request body is built.

use nano_types::Amount;
use serde_json::{Map, Value};

/// A single parameter value before it is stringified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Int(u128),
    Str(String),
    Bool(bool),
}

impl ParamValue {
    /// The string the node receives for this value.
    pub fn to_wire(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Str(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl From<u128> for ParamValue {
    fn from(n: u128) -> Self {
        Self::Int(n)
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        Self::Int(n.into())
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        Self::Int(n.into())
    }
}

impl From<u16> for ParamValue {
    fn from(n: u16) -> Self {
        Self::Int(n.into())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for ParamValue {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<Amount> for ParamValue {
    fn from(amount: Amount) -> Self {
        Self::Int(amount.raw())
    }
}

/// Ordered parameter set for one action.
///
/// Setting a name twice replaces the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set `name` only when `value` is present.
    pub fn with_opt<V: Into<ParamValue>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None => self,
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Merge `other` into `self`; values from `other` win.
    pub fn extend(mut self, other: Params) -> Self {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build the request body: `action` plus every parameter as a string.
    pub fn to_body(&self, action: &str) -> Value {
        let mut body = Map::new();
        body.insert("action".to_string(), Value::String(action.to_string()));
        for (name, value) in &self.entries {
            if name == "action" {
                continue;
            }
            body.insert(name.clone(), Value::String(value.to_wire()));
        }
        Value::Object(body)
    }
}
