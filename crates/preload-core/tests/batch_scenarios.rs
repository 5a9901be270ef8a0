//! Batch coordinator behavior: outcome routing, failure isolation, ordering
//! and the concurrency bound.

mod common;

use common::resolvers::{locator_for, InstrumentedResolver, Script, ScriptedResolver};
use preload_core::batch::{run_batch, OutcomeTally};
use preload_core::progress::MemorySink;
use preload_core::query::parse_queries;
use std::sync::Arc;
use std::time::Duration;

fn names(items: &[preload_core::item::ResolvedItem]) -> Vec<String> {
    let mut names: Vec<String> = items
        .iter()
        .map(|i| i.record()["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn found_and_not_found_are_routed() {
    let resolver = ScriptedResolver::new().script("song B", Script::NotFound);
    let queries = parse_queries(&["song A", "song B", "song C"]);
    let mut sink = MemorySink::new();

    let output = run_batch(queries, Arc::new(resolver), 4, &mut sink).await;

    assert_eq!(output.len(), 2);
    assert_eq!(names(output.items()), ["song A", "song C"]);
    for item in output.items() {
        let name = item.record()["name"].as_str().unwrap();
        assert_eq!(item.download_url(), locator_for(name));
    }
    assert_eq!(
        output.tally(),
        OutcomeTally {
            found: 2,
            not_found: 1,
            failed: 0
        }
    );

    let errors = sink.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("song B"));
    assert_eq!(sink.logs().len(), 2);
    assert!(sink
        .logs()
        .iter()
        .any(|m| m.contains("song A") && m.contains(&locator_for("song A"))));
}

#[tokio::test]
async fn resolver_error_is_isolated() {
    let resolver = ScriptedResolver::new().script("bad query", Script::Fail("malformed search term"));
    let queries = parse_queries(&["song A", "bad query", "song C", "song D"]);
    let mut sink = MemorySink::new();

    let output = run_batch(queries, Arc::new(resolver), 2, &mut sink).await;

    assert_eq!(names(output.items()), ["song A", "song C", "song D"]);
    assert_eq!(output.tally().failed, 1);
    let errors = sink.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("bad query"));
    assert!(errors[0].contains("malformed search term"));
}

#[tokio::test]
async fn resolver_panic_is_isolated() {
    let resolver = ScriptedResolver::new().script("song B", Script::Panic);
    let queries = parse_queries(&["song A", "song B", "song C"]);
    let mut sink = MemorySink::new();

    let output = run_batch(queries, Arc::new(resolver), 3, &mut sink).await;

    assert_eq!(names(output.items()), ["song A", "song C"]);
    assert_eq!(output.tally().failed, 1);
    let errors = sink.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("song B"));
    assert!(errors[0].contains("scripted panic"));
}

#[tokio::test]
async fn every_query_is_resolved_exactly_once() {
    let raw: Vec<String> = (0..25).map(|i| format!("track {i}")).collect();
    let resolver = Arc::new(
        ScriptedResolver::new()
            .script("track 3", Script::NotFound)
            .script("track 7", Script::Fail("timeout"))
            .script("track 11", Script::NotFound)
            .script("track 19", Script::Panic),
    );
    let mut sink = MemorySink::new();

    let output = run_batch(parse_queries(&raw), resolver.clone(), 4, &mut sink).await;

    let tally = output.tally();
    assert_eq!(tally.total(), 25);
    assert_eq!(tally.found, 21);
    assert_eq!(tally.not_found, 2);
    assert_eq!(tally.failed, 2);
    assert_eq!(output.len(), tally.found);
    assert_eq!(sink.events().len(), 25);

    let mut calls = resolver.calls();
    calls.sort();
    let mut expected = raw.clone();
    expected.sort();
    assert_eq!(calls, expected);
}

#[tokio::test]
async fn output_follows_completion_order() {
    let resolver = ScriptedResolver::new()
        .delay("slow", Duration::from_millis(200))
        .delay("medium", Duration::from_millis(50));
    let queries = parse_queries(&["slow", "medium", "fast"]);
    let mut sink = MemorySink::new();

    let output = run_batch(queries, Arc::new(resolver), 3, &mut sink).await;

    let order: Vec<&str> = output
        .items()
        .iter()
        .map(|i| i.record()["name"].as_str().unwrap())
        .collect();
    assert_eq!(order, ["fast", "medium", "slow"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrency_limit_is_respected() {
    let raw: Vec<String> = (0..20).map(|i| format!("track {i}")).collect();
    let resolver = Arc::new(InstrumentedResolver::new(Duration::from_millis(50)));
    let mut sink = MemorySink::new();

    let output = run_batch(parse_queries(&raw), resolver.clone(), 3, &mut sink).await;

    assert_eq!(output.len(), 20);
    assert_eq!(resolver.started(), 20);
    assert!(resolver.peak() <= 3, "peak was {}", resolver.peak());
    assert_eq!(resolver.peak(), 3);
}

#[tokio::test]
async fn zero_concurrency_runs_one_at_a_time() {
    let raw: Vec<String> = (0..5).map(|i| format!("track {i}")).collect();
    let resolver = Arc::new(InstrumentedResolver::new(Duration::from_millis(5)));
    let mut sink = MemorySink::new();

    let output = run_batch(parse_queries(&raw), resolver.clone(), 0, &mut sink).await;

    assert_eq!(output.len(), 5);
    assert_eq!(resolver.peak(), 1);
}

#[tokio::test]
async fn parallel_lookups_overlap() {
    let raw: Vec<String> = (0..8).map(|i| format!("track {i}")).collect();
    let resolver = Arc::new(InstrumentedResolver::new(Duration::from_millis(100)));
    let mut sink = MemorySink::new();

    let start = std::time::Instant::now();
    let output = run_batch(parse_queries(&raw), resolver, 8, &mut sink).await;

    assert_eq!(output.len(), 8);
    // Eight 100ms lookups in parallel finish well before 800ms.
    assert!(start.elapsed() < Duration::from_millis(600));
}

#[tokio::test]
async fn empty_input_dispatches_nothing() {
    let resolver = Arc::new(ScriptedResolver::new());
    let mut sink = MemorySink::new();
    let raw: [&str; 0] = [];

    let output = run_batch(parse_queries(&raw), resolver.clone(), 4, &mut sink).await;

    assert!(output.is_empty());
    assert_eq!(output.tally().total(), 0);
    assert!(sink.events().is_empty());
    assert!(resolver.calls().is_empty());
}
