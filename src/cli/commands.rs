//! CLI command implementations. Each prints one pretty JSON document.

use std::io::Write;
use std::time::Duration;

use serde::Serialize;

use crate::engine::MemoryEngine;
use crate::types::{MemResult, MemoryValue};

/// Print store statistics.
pub fn cmd_stats(engine: &MemoryEngine, out: &mut impl Write) -> MemResult<()> {
    print_json(out, &engine.memory_stats())
}

/// Remove expired entries.
pub fn cmd_gc(engine: &MemoryEngine, out: &mut impl Write) -> MemResult<()> {
    let removed = engine.gc_expired()?;
    print_json(out, &serde_json::json!({ "expired_removed": removed }))
}

/// Print the whole store.
pub fn cmd_dump(engine: &MemoryEngine, out: &mut impl Write) -> MemResult<()> {
    print_json(out, &engine.dump_all())
}

/// Store a value. `raw_value` is taken as JSON when it parses, otherwise as a
/// plain string; `tags` is a comma-separated list.
pub fn cmd_remember(
    engine: &MemoryEngine,
    namespace: &str,
    key: &str,
    raw_value: &str,
    tags: Option<&str>,
    ttl_secs: Option<u64>,
    out: &mut impl Write,
) -> MemResult<()> {
    let value = parse_value(raw_value);
    let tags = tags.map(parse_tags).unwrap_or_default();
    let ttl = ttl_secs.map(Duration::from_secs);
    let entry = engine.remember(namespace, key, value, &tags, ttl)?;
    print_json(out, &entry)
}

/// Fetch one entry.
pub fn cmd_recall(
    engine: &MemoryEngine,
    namespace: &str,
    key: &str,
    out: &mut impl Write,
) -> MemResult<()> {
    match engine.recall(namespace, key)? {
        Some(entry) => print_json(out, &entry),
        None => print_json(out, &serde_json::json!({ "found": false })),
    }
}

/// List entries carrying a tag.
pub fn cmd_recall_tag(engine: &MemoryEngine, tag: &str, out: &mut impl Write) -> MemResult<()> {
    print_json(out, &engine.recall_by_tag(tag))
}

/// List entries in a namespace.
pub fn cmd_recall_namespace(
    engine: &MemoryEngine,
    namespace: &str,
    out: &mut impl Write,
) -> MemResult<()> {
    print_json(out, &engine.recall_namespace(namespace))
}

/// Delete one entry.
pub fn cmd_forget(
    engine: &MemoryEngine,
    namespace: &str,
    key: &str,
    out: &mut impl Write,
) -> MemResult<()> {
    let forgotten = engine.forget(namespace, key)?;
    print_json(out, &serde_json::json!({ "forgotten": forgotten }))
}

/// Delete a whole namespace.
pub fn cmd_forget_namespace(
    engine: &MemoryEngine,
    namespace: &str,
    out: &mut impl Write,
) -> MemResult<()> {
    let forgotten = engine.forget_namespace(namespace)?;
    print_json(out, &serde_json::json!({ "forgotten": forgotten }))
}

/// Interpret a command-line value: JSON if it parses, else a string.
pub fn parse_value(raw: &str) -> MemoryValue {
    serde_json::from_str(raw).unwrap_or_else(|_| MemoryValue::String(raw.to_string()))
}

/// Split a comma-separated tag list, dropping blanks.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> MemResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
