//! Query parsing: raw text lines into canonical, de-duplicated queries.
//!
//! A query is either a direct `http(s)` URL or a free-text search. Search text
//! in the `Artist - Title` form is split so resolvers can match both parts.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use url::Url;

/// Error returned when a single line cannot become a query.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("query is empty")]
    Empty,
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    /// A direct link to a track page.
    Url(Url),
    /// Free-text search, optionally split into artist and title.
    Search {
        artist: Option<String>,
        title: String,
    },
}

/// One canonical search request. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    raw: String,
    kind: QueryKind,
}

impl Query {
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let text = collapse_whitespace(raw);
        if text.is_empty() {
            return Err(QueryError::Empty);
        }

        let kind = match Url::parse(&text) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => QueryKind::Url(url),
            _ => match text.split_once(" - ") {
                Some((artist, title)) if !artist.trim().is_empty() && !title.trim().is_empty() => {
                    QueryKind::Search {
                        artist: Some(artist.trim().to_string()),
                        title: title.trim().to_string(),
                    }
                }
                _ => QueryKind::Search {
                    artist: None,
                    title: text.clone(),
                },
            },
        };

        Ok(Self { raw: text, kind })
    }

    /// Normalized input text (trimmed, inner whitespace collapsed).
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &QueryKind {
        &self.kind
    }

    /// Human-readable name used in progress messages.
    pub fn display_name(&self) -> String {
        match &self.kind {
            QueryKind::Url(url) => url.to_string(),
            QueryKind::Search {
                artist: Some(artist),
                title,
            } => format!("{artist} - {title}"),
            QueryKind::Search {
                artist: None,
                title,
            } => title.clone(),
        }
    }

    fn dedup_key(&self) -> String {
        match &self.kind {
            QueryKind::Url(url) => url.as_str().to_string(),
            QueryKind::Search { artist, title } => format!(
                "{}\u{1f}{}",
                artist.as_deref().unwrap_or_default().to_lowercase(),
                title.to_lowercase()
            ),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Parse raw lines into queries in input order.
///
/// Blank lines and `#` comments are skipped. Repeated requests (same URL, or
/// same artist/title ignoring case) are kept once, at their first position.
pub fn parse_queries<S: AsRef<str>>(raw: &[S]) -> Vec<Query> {
    let mut seen = HashSet::new();
    let mut queries = Vec::with_capacity(raw.len());
    for line in raw {
        let line = line.as_ref().trim();
        if line.starts_with('#') {
            continue;
        }
        let Ok(query) = Query::parse(line) else {
            continue;
        };
        if !seen.insert(query.dedup_key()) {
            tracing::debug!(query = %query, "skipping duplicate query");
            continue;
        }
        queries.push(query);
    }
    queries
}

/// Read one raw query per line from a text file.
pub fn read_query_file(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read query file: {}", path.display()))?;
    Ok(text.lines().map(str::to_string).collect())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
