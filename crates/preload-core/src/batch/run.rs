//! Run every query through the resolver with a bounded number in flight.
//!
//! Keeps up to `concurrency` lookups running at once; when one finishes, its
//! outcome is classified and the next queued query is started, until the queue
//! is empty. Outcomes are handled in completion order.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::progress::ProgressSink;
use crate::query::Query;
use crate::resolver::Resolver;

use super::outcome::{Outcome, OutputSet};

/// Resolves `queries` with at most `concurrency` lookups in flight (0 is treated as 1).
///
/// Each query is resolved exactly once. A failing or panicking lookup only
/// affects its own query; it is reported to `sink` and the batch continues.
/// The sink and the output are touched only from this function's collection
/// loop, never from the worker tasks.
pub async fn run_batch(
    queries: Vec<Query>,
    resolver: Arc<dyn Resolver>,
    concurrency: usize,
    sink: &mut dyn ProgressSink,
) -> OutputSet {
    let concurrency = concurrency.max(1);
    let total = queries.len();
    tracing::debug!(total, concurrency, "starting batch");

    let mut queue = queries.into_iter();
    let mut output = OutputSet::default();
    let mut join_set = tokio::task::JoinSet::new();

    loop {
        while join_set.len() < concurrency {
            let Some(query) = queue.next() else {
                break;
            };
            tracing::debug!(query = %query, "dispatching lookup");
            join_set.spawn(resolve_one(Arc::clone(&resolver), query));
        }

        let Some(joined) = join_set.join_next().await else {
            break;
        };
        match joined {
            Ok((query, outcome)) => output.accept(&query, outcome, sink),
            Err(e) => output.record_lost_task(&e.to_string(), sink),
        }
    }

    let tally = output.tally();
    tracing::info!(
        total,
        found = tally.found,
        not_found = tally.not_found,
        failed = tally.failed,
        "batch finished"
    );
    output
}

async fn resolve_one(resolver: Arc<dyn Resolver>, query: Query) -> (Query, Outcome) {
    let result = AssertUnwindSafe(resolver.resolve(&query))
        .catch_unwind()
        .await;
    let outcome = match result {
        Ok(result) => Outcome::from_result(result),
        Err(panic) => Outcome::Failed(format!("resolver panicked: {}", panic_message(&*panic))),
    };
    (query, outcome)
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}
