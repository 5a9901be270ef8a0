//! Resolved media items and the entry shape written to snapshots.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Key that carries the download locator in every snapshot entry.
pub const LOCATOR_KEY: &str = "download_url";

/// Metadata describing one media item. Field order is insertion order.
pub type Record = Map<String, Value>;

/// A media record together with the locator it was resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedItem {
    record: Record,
    download_url: String,
}

impl ResolvedItem {
    pub fn new(record: Record, download_url: impl Into<String>) -> Self {
        Self {
            record,
            download_url: download_url.into(),
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    /// Record fields followed by the locator. A locator already present in the
    /// record keeps its position and takes the resolved value.
    pub fn to_entry(&self) -> Record {
        let mut entry = self.record.clone();
        entry.insert(
            LOCATOR_KEY.to_string(),
            Value::String(self.download_url.clone()),
        );
        entry
    }
}

// Serialized as the merged entry, without building an intermediate map.
impl Serialize for ResolvedItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let has_locator = self.record.contains_key(LOCATOR_KEY);
        let len = self.record.len() + usize::from(!has_locator);
        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in &self.record {
            if key == LOCATOR_KEY {
                map.serialize_entry(key, &self.download_url)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        if !has_locator {
            map.serialize_entry(LOCATOR_KEY, &self.download_url)?;
        }
        map.end()
    }
}
