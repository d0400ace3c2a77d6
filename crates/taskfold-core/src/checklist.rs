//! Line classifiers for checklist items. Deliberately substring-based: no
//! Markdown parsing beyond the literal markers.

pub const OPEN_MARKER: &str = "- [ ]";
pub const COMPLETED_MARKER: &str = "- [x]";
const CREATED_TAG: &str = "Created";

pub fn is_open_item(line: &str) -> bool {
    line.contains(OPEN_MARKER)
}

pub fn is_completed_item(line: &str) -> bool {
    line.contains(COMPLETED_MARKER)
}

/// Presence of `Created` anywhere in the line suppresses re-stamping,
/// regardless of exact stamp format.
pub fn has_created_stamp(line: &str) -> bool {
    line.contains(CREATED_TAG)
}

/// Append a creation stamp to every unstamped open item. Idempotent: a
/// second pass with any timestamp leaves the content unchanged.
pub fn stamp_open_items(content: &str, stamp: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in content.split('\n') {
        if is_open_item(line) && !has_created_stamp(line) {
            out.push(format!("{line} | Created: {stamp}"));
        } else {
            out.push(line.to_string());
        }
    }
    out.join("\n")
}

/// Split content into (retained, completed) line sets, preserving relative
/// order within each.
pub fn partition_completed(content: &str) -> (Vec<String>, Vec<String>) {
    let mut retained = Vec::new();
    let mut completed = Vec::new();
    for line in content.split('\n') {
        if is_completed_item(line) {
            completed.push(line.to_string());
        } else {
            retained.push(line.to_string());
        }
    }
    (retained, completed)
}
