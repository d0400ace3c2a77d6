//! Core rewrite engines for taskfold.

pub mod aggregate;
pub mod archive;
pub mod checklist;
pub mod clock;
pub mod config;
pub mod ledger;
pub mod recurring;
pub mod stamp;
pub mod vault;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
