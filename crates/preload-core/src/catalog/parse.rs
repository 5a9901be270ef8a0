//! Catalog file format: a JSON array of objects, one per media item.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::item::{Record, LOCATOR_KEY};

#[derive(Debug, Clone)]
pub(super) struct CatalogEntry {
    pub record: Record,
}

impl CatalogEntry {
    /// Track title: `name`, else `title`.
    pub fn title(&self) -> Option<&str> {
        self.str_field("name").or_else(|| self.str_field("title"))
    }

    /// Primary artist: `artist`, else the first of `artists`.
    pub fn artist(&self) -> Option<&str> {
        self.str_field("artist").or_else(|| {
            self.record
                .get("artists")
                .and_then(Value::as_array)
                .and_then(|a| a.first())
                .and_then(Value::as_str)
        })
    }

    /// Canonical page URL of the item.
    pub fn url(&self) -> Option<&str> {
        self.str_field("url")
    }

    pub fn locator(&self) -> Option<&str> {
        self.str_field(LOCATOR_KEY)
    }

    /// Metadata without the locator field, in catalog order.
    pub fn metadata(&self) -> Record {
        self.record
            .iter()
            .filter(|(k, _)| k.as_str() != LOCATOR_KEY)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.record.get(key).and_then(Value::as_str)
    }
}

pub(super) fn load_entries(path: &Path) -> Result<Vec<CatalogEntry>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read catalog file: {}", path.display()))?;
    let records: Vec<Record> = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse catalog JSON: {}", path.display()))?;
    Ok(records
        .into_iter()
        .map(|record| CatalogEntry { record })
        .collect())
}
