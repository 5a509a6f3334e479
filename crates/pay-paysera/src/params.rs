//! Payment parameter set sent to the gateway.

use std::collections::BTreeMap;
use std::fmt;

/// A single parameter value before stringification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Integer(n)
    }
}

/// Key-ordered mapping of parameter name to value.
///
/// Absent values are kept as `None` so the builder can take optional fields
/// directly; the codec drops them before encoding. Keys are unique, a later
/// `with` for the same key replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentParameters {
    entries: BTreeMap<String, Option<ParamValue>>,
}

impl PaymentParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.entries.insert(key.into(), Some(value.into()));
        self
    }

    pub fn with_optional<V: Into<ParamValue>>(
        mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        self.entries.insert(key.into(), value.map(Into::into));
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key).and_then(Option::as_ref)
    }

    /// Present entries in key order
    pub fn present(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.as_str(), v)))
    }

    /// Present entries with every value stringified
    pub fn to_string_map(&self) -> BTreeMap<String, String> {
        self.present()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.present().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
