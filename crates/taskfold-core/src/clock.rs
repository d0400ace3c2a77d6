use chrono::Local;

pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp provider for `Created:`/`Completed:` stamps and ledger history
/// lines.
pub trait Clock {
    fn now_stamp(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_stamp(&self) -> String {
        Local::now().format(STAMP_FORMAT).to_string()
    }
}

/// Clock pinned to a fixed stamp, for deterministic tests.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now_stamp(&self) -> String {
        self.0.clone()
    }
}
