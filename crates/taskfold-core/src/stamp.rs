use crate::checklist::stamp_open_items;
use crate::clock::Clock;
use crate::vault::{EntryKind, Vault, VaultError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampOutcome {
    /// The active note does not exist (or is not a note).
    NoActiveNote,
    /// Count of open items that received a creation stamp.
    Stamped { tasks: usize },
}

/// Append ` | Created: <timestamp>` to every unstamped open checklist item
/// in the active note and write the result back in one operation.
pub fn stamp_tasks<V: Vault>(
    vault: &mut V,
    clock: &dyn Clock,
    active: &str,
) -> Result<StampOutcome, VaultError> {
    if vault.resolve(active) != Some(EntryKind::Note) {
        return Ok(StampOutcome::NoActiveNote);
    }
    let content = vault.read(active)?;
    let stamped = stamp_open_items(&content, &clock.now_stamp());
    let tasks = stamped
        .split('\n')
        .zip(content.split('\n'))
        .filter(|(new, old)| new != old)
        .count();
    if tasks > 0 {
        vault.write(active, &stamped)?;
    }
    Ok(StampOutcome::Stamped { tasks })
}
