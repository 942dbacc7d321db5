//! Per-cycle catalog of normalized sensor records.

use crate::sensors::data::Service;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Records of one polling cycle, keyed by identity and kept in the order
/// the device first reported them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog<R> {
    records: IndexMap<String, R>,
}

impl<R> Default for Catalog<R> {
    fn default() -> Self {
        Self {
            records: IndexMap::new(),
        }
    }
}

impl<R> Catalog<R> {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, or overwrite the fields of an existing one.
    ///
    /// An existing key keeps its original position. Returns `true` when the
    /// key was already present.
    pub fn upsert(&mut self, key: String, record: R) -> bool {
        match self.records.get_mut(&key) {
            Some(existing) => {
                tracing::debug!(item = %key, "merging repeated row into existing record");
                *existing = record;
                true
            }
            None => {
                self.records.insert(key, record);
                false
            }
        }
    }

    /// Look up a record by identity key.
    pub fn get(&self, item: &str) -> Option<&R> {
        self.records.get(item)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.records.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identity keys in iteration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }

    /// Keys paired with their records in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> + '_ {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// One discoverable service per record, recomputed on every call.
    pub fn discover(&self) -> impl Iterator<Item = Service> + '_ {
        self.keys().map(Service::new)
    }
}

impl<R> FromIterator<(String, R)> for Catalog<R> {
    fn from_iter<T: IntoIterator<Item = (String, R)>>(iter: T) -> Self {
        let mut catalog = Catalog::new();
        for (key, record) in iter {
            catalog.upsert(key, record);
        }
        catalog
    }
}
