pub mod config;
pub mod logging;

// Batch pipeline: query → resolver → batch → snapshot
pub mod batch;
pub mod catalog;
pub mod item;
pub mod progress;
pub mod query;
pub mod resolver;
pub mod snapshot;
