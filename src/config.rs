//! Run configuration
//!
//! [`Config`] carries the operational limits of a run. The defaults suit
//! interactive use; the command line overrides them field by field.

/// Default step budget: generous for real programs, finite for runaway loops
pub const DEFAULT_MAX_STEPS: u64 = 10_000_000;

/// Default snapshot history budget (256 MiB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 256 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Steps after which a still-running program is stopped (`None` = unbounded)
    pub max_steps: Option<u64>,
    /// Bytes of snapshot history to keep before the run is stopped
    pub snapshot_memory_limit: usize,
    /// Snapshot every step; when off only the first and final states are kept
    pub record_history: bool,
}

impl Config {
    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_snapshot_memory_limit(mut self, limit: usize) -> Self {
        self.snapshot_memory_limit = limit;
        self
    }

    pub fn with_history(mut self, record_history: bool) -> Self {
        self.record_history = record_history;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_steps: Some(DEFAULT_MAX_STEPS),
            snapshot_memory_limit: DEFAULT_SNAPSHOT_LIMIT,
            record_history: true,
        }
    }
}
