//! Catalog resolver: resolve queries offline against a JSON catalog file.
//!
//! The catalog is an array of objects. Each object carries the item's metadata
//! (`name`/`title`, `artist`/`artists`, `url`, ...) and its locator under
//! `download_url`. URL queries match the `url` field exactly; search queries
//! need an exact (case-insensitive) title match, and prefer entries whose
//! artist also matches.

mod parse;
mod resolve;

pub use resolve::CatalogResolver;
