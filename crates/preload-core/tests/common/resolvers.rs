//! Resolvers with scripted and instrumented behavior for batch tests.

use async_trait::async_trait;
use preload_core::item::Record;
use preload_core::query::Query;
use preload_core::resolver::{Resolution, Resolver};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// What a scripted resolver does for one query.
#[derive(Debug, Clone)]
pub enum Script {
    Found,
    NotFound,
    Fail(&'static str),
    Panic,
}

/// Resolves each query according to a per-query script (default: found).
/// Found items get `{"name": <query>, "artist": "Test Artist"}` and a locator
/// derived from the query text.
#[derive(Default)]
pub struct ScriptedResolver {
    scripts: HashMap<String, Script>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, query: &str, script: Script) -> Self {
        self.scripts.insert(query.to_string(), script);
        self
    }

    pub fn delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn locator_for(query: &str) -> String {
    format!("https://media.example.com/{}", query.replace(' ', "-"))
}

pub fn record_for(query: &str) -> Record {
    let mut record = Record::new();
    record.insert("name".to_string(), json!(query));
    record.insert("artist".to_string(), json!("Test Artist"));
    record
}

#[async_trait]
impl Resolver for ScriptedResolver {
    async fn resolve(&self, query: &Query) -> anyhow::Result<Option<Resolution>> {
        let key = query.raw().to_string();
        self.calls.lock().unwrap().push(key.clone());
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        match self.scripts.get(&key).cloned().unwrap_or(Script::Found) {
            Script::Found => Ok(Some(Resolution {
                locator: locator_for(&key),
                record: record_for(&key),
            })),
            Script::NotFound => Ok(None),
            Script::Fail(detail) => Err(anyhow::anyhow!(detail)),
            Script::Panic => panic!("scripted panic for {key}"),
        }
    }
}

/// Counts how many lookups run at the same time.
pub struct InstrumentedResolver {
    delay: Duration,
    active: AtomicUsize,
    peak: AtomicUsize,
    started: AtomicUsize,
}

impl InstrumentedResolver {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            started: AtomicUsize::new(0),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Resolver for InstrumentedResolver {
    async fn resolve(&self, query: &Query) -> anyhow::Result<Option<Resolution>> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(Some(Resolution {
            locator: locator_for(query.raw()),
            record: record_for(query.raw()),
        }))
    }
}
