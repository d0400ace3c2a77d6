use crate::clock::Clock;
use crate::config::Settings;
use crate::ledger::merge_totals;
use crate::recurring::scan_markers;
use crate::vault::{EntryKind, Vault, VaultError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateOutcome {
    /// No ledger note configured; nothing was touched.
    LedgerNotConfigured,
    /// The active note does not exist (or is not a note).
    NoActiveNote,
    /// The scan found no unconsumed markers; nothing was touched.
    NoMarkers,
    /// The ledger path resolves to something that is not a writable note;
    /// nothing was touched.
    LedgerUnavailable,
    /// Count of distinct task names aggregated (not marker lines).
    Aggregated { tasks: usize },
}

/// Fold every unconsumed `~rec` marker in the active note into the ledger.
///
/// Aggregated markers are rewritten in place with a consumption mark, so
/// re-running without new markers is a no-op. The active note is written
/// before the ledger; a failure in between leaves the markers consumed but
/// uncounted (single best-effort pass, no transaction).
pub fn aggregate_recurring_tasks<V: Vault>(
    vault: &mut V,
    settings: &Settings,
    clock: &dyn Clock,
    active: &str,
) -> Result<AggregateOutcome, VaultError> {
    let Some(ledger) = settings.ledger_note() else {
        return Ok(AggregateOutcome::LedgerNotConfigured);
    };
    if vault.resolve(active) != Some(EntryKind::Note) {
        return Ok(AggregateOutcome::NoActiveNote);
    }

    let scan = scan_markers(&vault.read(active)?);
    if scan.totals.is_empty() {
        return Ok(AggregateOutcome::NoMarkers);
    }

    match vault.resolve(&ledger) {
        None => vault.create(&ledger, "")?,
        Some(EntryKind::Folder) => return Ok(AggregateOutcome::LedgerUnavailable),
        Some(EntryKind::Note) => {}
    }
    let merged = merge_totals(&vault.read(&ledger)?, &scan.totals, &clock.now_stamp());

    vault.write(active, &scan.content)?;
    vault.write(&ledger, &merged)?;

    Ok(AggregateOutcome::Aggregated {
        tasks: scan.totals.len(),
    })
}
