//! Match queries against catalog entries.

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::item::{Record, LOCATOR_KEY};
use crate::query::{Query, QueryKind};
use crate::resolver::{Resolution, Resolver};

use super::parse::{load_entries, CatalogEntry};

/// Offline resolver backed by a JSON catalog file.
#[derive(Debug, Clone, Default)]
pub struct CatalogResolver {
    entries: Vec<CatalogEntry>,
    latency: Option<Duration>,
}

impl CatalogResolver {
    /// Load a catalog file (JSON array of objects).
    pub fn load(path: &Path) -> Result<Self> {
        let entries = load_entries(path)?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded catalog");
        Ok(Self {
            entries,
            latency: None,
        })
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            entries: records
                .into_iter()
                .map(|record| CatalogEntry { record })
                .collect(),
            latency: None,
        }
    }

    /// Delay every lookup by `latency`, standing in for a network round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, query: &Query) -> Option<&CatalogEntry> {
        match query.kind() {
            QueryKind::Url(url) => self
                .entries
                .iter()
                .find(|e| e.url().and_then(|u| Url::parse(u.trim()).ok()).as_ref() == Some(url)),
            QueryKind::Search { artist, title } => {
                let title = normalize(title);
                let artist = artist.as_deref().map(normalize);
                self.entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.title().is_some_and(|t| normalize(t) == title))
                    .max_by_key(|(i, e)| match_score(e, artist.as_deref(), *i))
                    .map(|(_, e)| e)
            }
        }
    }
}

/// Artist agreement first; then earlier catalog position.
fn match_score(entry: &CatalogEntry, artist: Option<&str>, index: usize) -> (bool, std::cmp::Reverse<usize>) {
    let artist_matches = match (artist, entry.artist()) {
        (Some(wanted), Some(have)) => normalize(have) == wanted,
        _ => false,
    };
    (artist_matches, std::cmp::Reverse(index))
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[async_trait]
impl Resolver for CatalogResolver {
    async fn resolve(&self, query: &Query) -> Result<Option<Resolution>> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let Some(entry) = self.find(query) else {
            return Ok(None);
        };
        let Some(locator) = entry.locator() else {
            anyhow::bail!("catalog entry for {query} has no `{LOCATOR_KEY}` field");
        };
        Ok(Some(Resolution {
            locator: locator.to_string(),
            record: entry.metadata(),
        }))
    }
}
