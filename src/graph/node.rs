//! Meta-informatie die per node aan een component wordt meegegeven.

use std::collections::BTreeMap;

/// Waarde die meta-informatie over een node beschrijft (bv. tolerantie).
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Number(f64),
    Integer(i64),
    Boolean(bool),
    Text(String),
    List(Vec<MetaValue>),
}

impl MetaValue {
    /// Numerieke interpretatie; tekst wordt geparsed, lijsten met één element
    /// worden uitgepakt.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            Self::Text(text) => text.trim().parse().ok(),
            Self::List(values) if values.len() == 1 => values[0].as_number(),
            _ => None,
        }
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Alias voor een verzameling meta-informatie.
pub type MetaMap = BTreeMap<String, MetaValue>;

/// Hulpfuncties voor case-insensitieve meta-opzoekingen.
pub trait MetaLookupExt {
    /// Zoek een meta-item op zonder hoofdlettergevoeligheid.
    fn get_normalized(&self, key: &str) -> Option<&MetaValue>;
}

impl MetaLookupExt for MetaMap {
    fn get_normalized(&self, key: &str) -> Option<&MetaValue> {
        if let Some(value) = self.get(key) {
            return Some(value);
        }

        let lower = key.to_ascii_lowercase();
        if lower != key {
            if let Some(value) = self.get(&lower) {
                return Some(value);
            }
        }

        self.iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    }
}
