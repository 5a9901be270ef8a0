//! Batch coordinator.
//!
//! Fans a list of queries out to a [`Resolver`](crate::resolver::Resolver)
//! over a bounded set of tokio tasks and folds the outcomes into an
//! [`OutputSet`] in completion order: found items are kept, misses and
//! failures are reported through a [`ProgressSink`](crate::progress::ProgressSink).

mod outcome;
mod run;

pub use outcome::{Outcome, OutcomeTally, OutputSet};
pub use run::run_batch;
