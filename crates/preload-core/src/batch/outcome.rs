//! Per-query outcomes and the accumulated output of a batch run.

use crate::item::{Record, ResolvedItem};
use crate::progress::ProgressSink;
use crate::query::Query;
use crate::resolver::Resolution;

/// Result of one lookup. Produced exactly once per dispatched query.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Found { record: Record, locator: String },
    NotFound,
    /// The lookup failed (resolver error or panic); holds the error detail.
    Failed(String),
}

impl Outcome {
    pub fn from_result(result: anyhow::Result<Option<Resolution>>) -> Self {
        match result {
            Ok(Some(Resolution { locator, record })) => Outcome::Found { record, locator },
            Ok(None) => Outcome::NotFound,
            Err(e) => Outcome::Failed(format!("{e:#}")),
        }
    }
}

/// Count of outcomes by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub found: usize,
    pub not_found: usize,
    pub failed: usize,
}

impl OutcomeTally {
    pub fn total(&self) -> usize {
        self.found + self.not_found + self.failed
    }
}

/// Successfully resolved items in completion order, plus the outcome tally.
#[derive(Debug, Default)]
pub struct OutputSet {
    items: Vec<ResolvedItem>,
    tally: OutcomeTally,
}

impl OutputSet {
    pub fn items(&self) -> &[ResolvedItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ResolvedItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn tally(&self) -> OutcomeTally {
        self.tally
    }

    /// Classify one finished lookup: keep found items, report everything.
    pub(crate) fn accept(&mut self, query: &Query, outcome: Outcome, sink: &mut dyn ProgressSink) {
        match outcome {
            Outcome::Found { record, locator } => {
                sink.log(&format!("Found url for {query}: {locator}"));
                self.items.push(ResolvedItem::new(record, locator));
                self.tally.found += 1;
            }
            Outcome::NotFound => {
                sink.error(&format!("Could not find a match for {query}"));
                self.tally.not_found += 1;
            }
            Outcome::Failed(detail) => {
                sink.error(&format!("{query} failed to resolve: {detail}"));
                self.tally.failed += 1;
            }
        }
    }

    /// A task that never produced an outcome (join error).
    pub(crate) fn record_lost_task(&mut self, detail: &str, sink: &mut dyn ProgressSink) {
        sink.error(&format!("resolution task did not complete: {detail}"));
        self.tally.failed += 1;
    }
}
