//! Resolver interface for turning queries into download locators.
//!
//! The batch coordinator only depends on this trait and does not know about
//! the catalog or any other lookup backend.

use async_trait::async_trait;

use crate::item::Record;
use crate::query::Query;

/// A successful lookup: item metadata plus where to download it from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub locator: String,
    pub record: Record,
}

/// Implemented by lookup backends (e.g. [`crate::catalog::CatalogResolver`]).
///
/// `Ok(None)` means no match; `Err` means the lookup itself failed. Both are
/// terminal for that query only.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, query: &Query) -> anyhow::Result<Option<Resolution>>;
}
