use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;

use taskfold_core::aggregate::{aggregate_recurring_tasks, AggregateOutcome};
use taskfold_core::archive::{ArchiveOutcome, Archiver};
use taskfold_core::clock::SystemClock;
use taskfold_core::config::{load_settings, save_settings, Settings};
use taskfold_core::stamp::{stamp_tasks, StampOutcome};
use taskfold_core::vault::FsVault;

mod version;

#[derive(Parser)]
#[command(
    name = "taskfold",
    version = version::FULL,
    about = "Archive, stamp, and aggregate tasks in plain-text notes"
)]
struct Cli {
    /// Vault root directory
    #[arg(long, global = true, default_value = ".")]
    vault: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Move completed checklist items from a note into the archive note
    Sweep {
        /// Changed note, relative to the vault root (e.g. Todo.md)
        note: String,
        #[arg(long)]
        json: bool,
    },
    /// Fold ~rec markers from a note into the recurring-task ledger
    Aggregate {
        /// Active note, relative to the vault root
        note: String,
        #[arg(long)]
        json: bool,
    },
    /// Add a Created timestamp to open checklist items in a note
    Stamp {
        /// Active note, relative to the vault root
        note: String,
        #[arg(long)]
        json: bool,
    },
    /// Show or update vault settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print version information
    Version,
}

#[derive(Subcommand)]
enum ConfigAction {
    Show {
        #[arg(long)]
        json: bool,
    },
    Set {
        /// Logical name of the archive note (suffix-free)
        #[arg(long)]
        archive_path: Option<String>,
        /// Logical name of the watched todo note; empty watches all notes
        #[arg(long)]
        todo_path: Option<String>,
        /// Stamp archived tasks with a completion time
        #[arg(long)]
        with_timestamp: Option<bool>,
        /// Logical name of the recurring-task ledger; empty disables it
        #[arg(long)]
        recurring_task_path: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(&cli.vault);
    let mut vault = FsVault::new(&cli.vault);
    let clock = SystemClock;

    match cli.command {
        Command::Sweep { note, json } => {
            let mut archiver = Archiver::new();
            let outcome = archiver.on_note_changed(&mut vault, &settings, &clock, &note)?;
            report_sweep(&outcome, json);
        }
        Command::Aggregate { note, json } => {
            let outcome = aggregate_recurring_tasks(&mut vault, &settings, &clock, &note)?;
            report_aggregate(&outcome, json);
        }
        Command::Stamp { note, json } => {
            let outcome = stamp_tasks(&mut vault, &clock, &note)?;
            report_stamp(&outcome, json);
        }
        Command::Config { action } => run_config(&cli.vault, settings, action)?,
        Command::Version => {
            println!("taskfold {}", version::FULL);
        }
    }
    Ok(())
}

fn report_sweep(outcome: &ArchiveOutcome, json: bool) {
    if json {
        let value = match outcome {
            ArchiveOutcome::Suppressed => json!({"ok": true, "outcome": "suppressed"}),
            ArchiveOutcome::OutOfScope => json!({"ok": true, "outcome": "out_of_scope"}),
            ArchiveOutcome::NothingCompleted => {
                json!({"ok": true, "outcome": "nothing_completed"})
            }
            ArchiveOutcome::Archived { tasks } => {
                json!({"ok": true, "outcome": "archived", "tasks": tasks})
            }
            ArchiveOutcome::ArchiveUnavailable { tasks } => {
                json!({"ok": false, "outcome": "archive_unavailable", "tasks": tasks})
            }
        };
        println!("{value}");
        return;
    }
    match outcome {
        ArchiveOutcome::Suppressed => println!("Change suppressed"),
        ArchiveOutcome::OutOfScope => println!("Note is out of scope"),
        ArchiveOutcome::NothingCompleted => println!("No completed tasks found"),
        ArchiveOutcome::Archived { tasks } => println!("{tasks} tasks archived"),
        ArchiveOutcome::ArchiveUnavailable { tasks } => {
            eprintln!("Archive path is not a note; {tasks} completed tasks were removed but not archived");
        }
    }
}

fn report_aggregate(outcome: &AggregateOutcome, json: bool) {
    if json {
        let value = match outcome {
            AggregateOutcome::LedgerNotConfigured => {
                json!({"ok": false, "outcome": "ledger_not_configured", "tasks": 0})
            }
            AggregateOutcome::NoActiveNote => {
                json!({"ok": false, "outcome": "no_active_note", "tasks": 0})
            }
            AggregateOutcome::NoMarkers => {
                json!({"ok": true, "outcome": "no_markers", "tasks": 0})
            }
            AggregateOutcome::LedgerUnavailable => {
                json!({"ok": false, "outcome": "ledger_unavailable", "tasks": 0})
            }
            AggregateOutcome::Aggregated { tasks } => {
                json!({"ok": true, "outcome": "aggregated", "tasks": tasks})
            }
        };
        println!("{value}");
        return;
    }
    match outcome {
        AggregateOutcome::LedgerNotConfigured => {
            println!("You must set Recurring Task File to use this feature");
        }
        AggregateOutcome::Aggregated { tasks } => println!("{tasks} Recurring Tasks updated"),
        AggregateOutcome::NoActiveNote
        | AggregateOutcome::NoMarkers
        | AggregateOutcome::LedgerUnavailable => println!("No Recurring Tasks found"),
    }
}

fn report_stamp(outcome: &StampOutcome, json: bool) {
    if json {
        let value = match outcome {
            StampOutcome::NoActiveNote => {
                json!({"ok": false, "outcome": "no_active_note", "tasks": 0})
            }
            StampOutcome::Stamped { tasks } => {
                json!({"ok": true, "outcome": "stamped", "tasks": tasks})
            }
        };
        println!("{value}");
        return;
    }
    match outcome {
        StampOutcome::NoActiveNote => println!("No note to stamp"),
        StampOutcome::Stamped { tasks } => println!("{tasks} tasks stamped"),
    }
}

fn run_config(vault_root: &Path, mut settings: Settings, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                println!("archive_path = {}", settings.archive_path);
                println!("todo_path = {}", settings.todo_path);
                println!("with_timestamp = {}", settings.with_timestamp);
                println!("recurring_task_path = {}", settings.recurring_task_path);
            }
        }
        ConfigAction::Set {
            archive_path,
            todo_path,
            with_timestamp,
            recurring_task_path,
        } => {
            if let Some(value) = archive_path {
                settings.archive_path = value;
            }
            if let Some(value) = todo_path {
                settings.todo_path = value;
            }
            if let Some(value) = with_timestamp {
                settings.with_timestamp = value;
            }
            if let Some(value) = recurring_task_path {
                settings.recurring_task_path = value;
            }
            let path = save_settings(vault_root, &settings)?;
            println!("Settings written to {}", path.display());
        }
    }
    Ok(())
}
