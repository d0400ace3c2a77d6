//! Ledger note rewriting. The ledger is a flat text document of sections:
//! a `# <name>` heading, one `Total: <n>` running sum, then `<timestamp> |
//! <delta>` history lines recording each aggregation's contribution.

use crate::recurring::TaskTotals;

pub const TOTAL_PREFIX: &str = "Total: ";

fn is_heading(line: &str) -> bool {
    line.contains('#')
}

fn heading_name(line: &str) -> String {
    line.replacen('#', "", 1).trim().to_string()
}

fn history_line(stamp: &str, delta: i64) -> String {
    format!("{stamp} | {delta}")
}

/// Fold one scan's per-name totals into ledger content.
///
/// Existing sections get their `Total:` bumped by the scan's delta and a
/// history line appended at the end of the section (flushed when the next
/// heading, or end of file, is reached). Names with no existing section are
/// appended as new sections. Sections the scan did not touch pass through
/// byte-for-byte.
pub fn merge_totals(content: &str, totals: &TaskTotals, stamp: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut current_section: Option<String> = None;
    let mut seen_sections: Vec<String> = Vec::new();
    // Delta owed to the current section's history, set when its Total line
    // is rewritten.
    let mut pending: Option<i64> = None;

    for line in content.split('\n') {
        if is_heading(line) {
            // Close out the previous section's history before starting the
            // next one.
            if let Some(delta) = pending {
                out.push(history_line(stamp, delta));
            }
            let name = heading_name(line);
            seen_sections.push(name.clone());
            current_section = Some(name);
            pending = None;
            out.push(line.to_string());
            continue;
        }
        if let Some(rest) = line.strip_prefix(TOTAL_PREFIX) {
            let Some(section) = current_section.as_deref() else {
                out.push(line.to_string());
                continue;
            };
            // A Total line that does not hold an integer is plain text.
            let Ok(current_value) = rest.trim().parse::<i64>() else {
                out.push(line.to_string());
                continue;
            };
            pending = totals.get(section);
            match pending {
                Some(delta) => out.push(format!("{TOTAL_PREFIX}{}", current_value + delta)),
                None => out.push(line.to_string()),
            }
            continue;
        }
        out.push(line.to_string());
    }
    if let Some(delta) = pending {
        out.push(history_line(stamp, delta));
    }

    for (name, value) in totals.iter() {
        if seen_sections.iter().any(|seen| seen == name) {
            continue;
        }
        out.push(format!("# {name}"));
        out.push(format!("{TOTAL_PREFIX}{value}"));
        out.push(history_line(stamp, value));
    }

    out.join("\n")
}
