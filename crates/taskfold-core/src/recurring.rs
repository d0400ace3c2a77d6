//! Recurring-task marker lines: `~rec <name> <value>` unconsumed,
//! `~rec <name> <value>~` once the value has been folded into the ledger.
//! The trailing `~` is the only record of consumption, so the active note
//! itself is the durable "already counted" state.

use std::collections::HashMap;

pub const MARKER_PREFIX: &str = "~rec";
pub const CONSUMED_SUFFIX: char = '~';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Task name, case-normalized to lowercase.
    pub name: String,
    pub value: i64,
}

/// Parse an unconsumed marker line. Consumed lines and anything malformed
/// (missing tokens, non-integer value) yield `None` and must pass through
/// a scan untouched — a malformed marker is never partially consumed.
pub fn parse_marker(line: &str) -> Option<Marker> {
    if !line.starts_with(MARKER_PREFIX) || line.ends_with(CONSUMED_SUFFIX) {
        return None;
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 3 {
        return None;
    }
    let value = tokens[2].parse::<i64>().ok()?;
    Some(Marker {
        name: tokens[1].to_lowercase(),
        value,
    })
}

/// Per-name totals for one scan, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct TaskTotals {
    order: Vec<String>,
    values: HashMap<String, i64>,
}

impl TaskTotals {
    pub fn add(&mut self, name: &str, value: i64) {
        if !self.values.contains_key(name) {
            self.order.push(name.to_string());
        }
        *self.values.entry(name.to_string()).or_insert(0) += value;
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of distinct task names.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.values[name]))
    }
}

#[derive(Debug, Clone)]
pub struct MarkerScan {
    /// The note content with every aggregated marker rewritten in place
    /// with a trailing consumption mark.
    pub content: String,
    pub totals: TaskTotals,
}

/// Scan note content for unconsumed markers, summing values per name and
/// marking each aggregated line consumed. Markers stay in the note; only
/// the suffix changes.
pub fn scan_markers(content: &str) -> MarkerScan {
    let mut totals = TaskTotals::default();
    let mut out: Vec<String> = Vec::new();
    for line in content.split('\n') {
        match parse_marker(line) {
            Some(marker) => {
                totals.add(&marker.name, marker.value);
                out.push(format!("{line}{CONSUMED_SUFFIX}"));
            }
            None => out.push(line.to_string()),
        }
    }
    MarkerScan {
        content: out.join("\n"),
        totals,
    }
}
