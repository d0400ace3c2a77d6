use std::collections::HashSet;

use crate::checklist::partition_completed;
use crate::clock::Clock;
use crate::config::Settings;
use crate::vault::{EntryKind, Vault, VaultError};

pub const ARCHIVE_HEADER: &str = "# Task Archive";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// A self-triggered notification for a note this engine just rewrote.
    Suppressed,
    /// Outside the todo scope, or the archive note itself.
    OutOfScope,
    /// No completed items found (also covers folders and missing notes).
    NothingCompleted,
    Archived { tasks: usize },
    /// The source note was rewritten but the archive path resolves to
    /// something that is not a writable note. Known asymmetry: the
    /// completed lines are gone from the source and were not archived.
    ArchiveUnavailable { tasks: usize },
}

/// Archival engine. The host registers [`Archiver::on_note_changed`] as its
/// content-change handler; the engine moves completed checklist lines from
/// the changed note into the archive note.
///
/// Rewriting the source fires a change notification of its own, so the
/// engine keeps a per-path suppression set: the exact path about to be
/// rewritten is registered before the write and the entry is consumed only
/// by the next notification for that same path. Notifications for other
/// notes are never swallowed.
#[derive(Debug, Default)]
pub struct Archiver {
    suppressed: HashSet<String>,
}

impl Archiver {
    pub fn new() -> Self {
        Archiver::default()
    }

    pub fn on_note_changed<V: Vault>(
        &mut self,
        vault: &mut V,
        settings: &Settings,
        clock: &dyn Clock,
        path: &str,
    ) -> Result<ArchiveOutcome, VaultError> {
        if self.suppressed.remove(path) {
            return Ok(ArchiveOutcome::Suppressed);
        }
        if path == settings.archive_note() || !settings.in_todo_scope(path) {
            return Ok(ArchiveOutcome::OutOfScope);
        }
        if vault.resolve(path) != Some(EntryKind::Note) {
            return Ok(ArchiveOutcome::NothingCompleted);
        }

        let content = vault.read(path)?;
        let (retained, completed) = partition_completed(&content);
        if completed.is_empty() {
            return Ok(ArchiveOutcome::NothingCompleted);
        }

        // Remove the completed lines from the source first. A failure past
        // this point loses completed tasks rather than duplicating them;
        // there is no multi-note transaction.
        self.suppressed.insert(path.to_string());
        vault.write(path, &retained.join("\n"))?;

        let archive = settings.archive_note();
        match vault.resolve(&archive) {
            None => vault.create(&archive, ARCHIVE_HEADER)?,
            Some(EntryKind::Folder) => {
                return Ok(ArchiveOutcome::ArchiveUnavailable {
                    tasks: completed.len(),
                });
            }
            Some(EntryKind::Note) => {}
        }

        let mut archive_content = vault.read(&archive)?;
        let stamp = clock.now_stamp();
        for line in &completed {
            archive_content.push('\n');
            archive_content.push_str(line);
            if settings.with_timestamp {
                archive_content.push_str(&format!(" | Completed: {stamp}"));
            }
        }
        vault.write(&archive, &archive_content)?;

        Ok(ArchiveOutcome::Archived {
            tasks: completed.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::vault::FsVault;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn fixed_clock() -> FixedClock {
        FixedClock("2024-01-01 12:00:00".to_string())
    }

    fn vault_with_todo(content: &str) -> (TempDir, FsVault) {
        let temp = TempDir::new().expect("tempdir");
        std::fs::write(temp.path().join("Todo.md"), content).expect("write");
        let vault = FsVault::new(temp.path());
        (temp, vault)
    }

    #[test]
    fn moves_completed_lines_into_a_fresh_archive() {
        let (_temp, mut vault) = vault_with_todo("# Todo\n- [x] clean desk\n- [ ] water plants");
        let mut archiver = Archiver::new();
        let outcome = archiver
            .on_note_changed(&mut vault, &Settings::default(), &fixed_clock(), "Todo.md")
            .expect("sweep");
        assert_eq!(outcome, ArchiveOutcome::Archived { tasks: 1 });
        assert_eq!(
            vault.read("Todo.md").expect("todo"),
            "# Todo\n- [ ] water plants"
        );
        assert_eq!(
            vault.read("Archive.md").expect("archive"),
            "# Task Archive\n- [x] clean desk | Completed: 2024-01-01 12:00:00"
        );
    }

    #[test]
    fn appends_after_existing_archive_content() {
        let (temp, mut vault) = vault_with_todo("- [x] one\n- [x] two");
        std::fs::write(temp.path().join("Archive.md"), "# Task Archive\n- [x] old")
            .expect("archive");
        let settings = Settings {
            with_timestamp: false,
            ..Settings::default()
        };
        let mut archiver = Archiver::new();
        let outcome = archiver
            .on_note_changed(&mut vault, &settings, &fixed_clock(), "Todo.md")
            .expect("sweep");
        assert_eq!(outcome, ArchiveOutcome::Archived { tasks: 2 });
        assert_eq!(
            vault.read("Archive.md").expect("archive"),
            "# Task Archive\n- [x] old\n- [x] one\n- [x] two"
        );
        assert_eq!(vault.read("Todo.md").expect("todo"), "");
    }

    #[test]
    fn no_completed_items_means_no_writes() {
        let (_temp, mut vault) = vault_with_todo("- [ ] open\nnotes");
        let mut archiver = Archiver::new();
        let outcome = archiver
            .on_note_changed(&mut vault, &Settings::default(), &fixed_clock(), "Todo.md")
            .expect("sweep");
        assert_eq!(outcome, ArchiveOutcome::NothingCompleted);
        assert_eq!(vault.resolve("Archive.md"), None);
        assert_eq!(vault.read("Todo.md").expect("todo"), "- [ ] open\nnotes");
    }

    #[test]
    fn archive_note_and_out_of_scope_notes_are_skipped() {
        let (temp, mut vault) = vault_with_todo("- [x] done");
        std::fs::write(temp.path().join("Scratch.md"), "- [x] done").expect("write");
        let mut archiver = Archiver::new();
        let clock = fixed_clock();
        let settings = Settings::default();
        assert_eq!(
            archiver
                .on_note_changed(&mut vault, &settings, &clock, "Archive.md")
                .expect("sweep"),
            ArchiveOutcome::OutOfScope
        );
        assert_eq!(
            archiver
                .on_note_changed(&mut vault, &settings, &clock, "Scratch.md")
                .expect("sweep"),
            ArchiveOutcome::OutOfScope
        );
    }

    #[test]
    fn empty_scope_watches_every_note() {
        let temp = TempDir::new().expect("tempdir");
        std::fs::write(temp.path().join("Scratch.md"), "- [x] done").expect("write");
        let mut vault = FsVault::new(temp.path());
        let settings = Settings {
            todo_path: String::new(),
            ..Settings::default()
        };
        let mut archiver = Archiver::new();
        let outcome = archiver
            .on_note_changed(&mut vault, &settings, &fixed_clock(), "Scratch.md")
            .expect("sweep");
        assert_eq!(outcome, ArchiveOutcome::Archived { tasks: 1 });
    }

    #[test]
    fn folder_change_is_a_no_op() {
        let temp = TempDir::new().expect("tempdir");
        std::fs::create_dir(temp.path().join("Todo.md")).expect("dir");
        let mut vault = FsVault::new(temp.path());
        let mut archiver = Archiver::new();
        let outcome = archiver
            .on_note_changed(&mut vault, &Settings::default(), &fixed_clock(), "Todo.md")
            .expect("sweep");
        assert_eq!(outcome, ArchiveOutcome::NothingCompleted);
    }

    #[test]
    fn folder_at_archive_path_aborts_after_source_rewrite() {
        let (temp, mut vault) = vault_with_todo("- [x] done\n- [ ] open");
        std::fs::create_dir(temp.path().join("Archive.md")).expect("dir");
        let mut archiver = Archiver::new();
        let outcome = archiver
            .on_note_changed(&mut vault, &Settings::default(), &fixed_clock(), "Todo.md")
            .expect("sweep");
        assert_eq!(outcome, ArchiveOutcome::ArchiveUnavailable { tasks: 1 });
        // Documented asymmetry: the source has already been rewritten.
        assert_eq!(vault.read("Todo.md").expect("todo"), "- [ ] open");
    }

    #[test]
    fn suppression_consumes_only_the_rewritten_path() {
        let (temp, mut vault) = vault_with_todo("- [x] done\n- [ ] open");
        std::fs::write(temp.path().join("Other.md"), "- [x] elsewhere").expect("write");
        let settings = Settings {
            todo_path: String::new(),
            ..Settings::default()
        };
        let clock = fixed_clock();
        let mut archiver = Archiver::new();

        let first = archiver
            .on_note_changed(&mut vault, &settings, &clock, "Todo.md")
            .expect("sweep");
        assert_eq!(first, ArchiveOutcome::Archived { tasks: 1 });

        // A notification for a different note is not swallowed by the
        // pending suppression entry for Todo.md.
        let other = archiver
            .on_note_changed(&mut vault, &settings, &clock, "Other.md")
            .expect("sweep");
        assert_eq!(other, ArchiveOutcome::Archived { tasks: 1 });

        // The self-triggered notification for Todo.md is swallowed once.
        let echo = archiver
            .on_note_changed(&mut vault, &settings, &clock, "Todo.md")
            .expect("sweep");
        assert_eq!(echo, ArchiveOutcome::Suppressed);
        let again = archiver
            .on_note_changed(&mut vault, &settings, &clock, "Todo.md")
            .expect("sweep");
        assert_eq!(again, ArchiveOutcome::NothingCompleted);
    }
}
