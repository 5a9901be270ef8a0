//! `preload show <path>` – list the entries of a snapshot.

use anyhow::Result;
use preload_core::item::{Record, LOCATOR_KEY};
use preload_core::snapshot;
use serde_json::Value;
use std::path::Path;

pub fn run_show(path: &Path) -> Result<()> {
    let entries = snapshot::read_snapshot(path)?;
    if entries.is_empty() {
        println!("Snapshot is empty.");
        return Ok(());
    }
    for (i, entry) in entries.iter().enumerate() {
        println!("{:>3}. {}", i + 1, describe(entry));
    }
    Ok(())
}

fn describe(entry: &Record) -> String {
    let field = |key: &str| entry.get(key).and_then(Value::as_str);
    let title = field("name").or_else(|| field("title")).unwrap_or("<untitled>");
    let artist = field("artist").or_else(|| {
        entry
            .get("artists")
            .and_then(Value::as_array)
            .and_then(|a| a.first())
            .and_then(Value::as_str)
    });
    let locator = field(LOCATOR_KEY).unwrap_or("-");
    match artist {
        Some(artist) => format!("{artist} - {title}  {locator}"),
        None => format!("{title}  {locator}"),
    }
}
