// Execution engine with snapshot history

use crate::config::Config;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::executor::{Executor, Outcome, State, UnmatchedBracket};
use crate::interpreter::stats::ExecutionStats;
use crate::machine::Machine;
use crate::parser::{Instruction, ParseError};
use crate::snapshot::{Snapshot, SnapshotManager};
use tracing::{debug, info, warn};

/// Runs a program to completion, recording a snapshot after every step so the
/// run can be replayed forward and backward
pub struct Interpreter {
    /// Executor as of the current history position
    executor: Executor,

    /// Statistics as of the current history position
    stats: ExecutionStats,

    /// Snapshot manager for reverse execution
    snapshot_manager: SnapshotManager,

    /// Index of the snapshot currently shown
    history_position: usize,

    config: Config,

    /// Whether `run` has returned
    finished: bool,

    /// How the run ended, if it halted
    outcome: Option<Outcome>,
}

impl Interpreter {
    /// Create an interpreter positioned at the machine's first instruction
    pub fn new(machine: Machine, config: Config) -> Self {
        Interpreter {
            executor: Executor::new(machine),
            stats: ExecutionStats::new(),
            snapshot_manager: SnapshotManager::new(config.snapshot_memory_limit),
            history_position: 0,
            config,
            finished: false,
            outcome: None,
        }
    }

    pub fn from_source(source: &str, config: Config) -> Result<Self, ParseError> {
        Ok(Self::new(Machine::from_source(source)?, config))
    }

    /// Run the program until it halts or a limit is hit
    ///
    /// On error the history recorded so far stays available for navigation.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        if self.finished {
            return Ok(());
        }

        info!(
            program_len = self.executor.machine().program().len(),
            max_steps = ?self.config.max_steps,
            record_history = self.config.record_history,
            "run starting"
        );

        let mut executor = self.executor.clone();
        if self.snapshot_manager.is_empty() {
            self.take_snapshot(&executor)?;
        }

        let result = loop {
            if executor.is_halted() {
                break Ok(());
            }

            if let Some(limit) = self.config.max_steps {
                if self.stats.steps >= limit {
                    warn!(limit, "step limit reached, stopping run");
                    break Err(RuntimeError::StepLimitExceeded { limit });
                }
            }

            let State { instruction, .. } = executor.state();
            let jumped = executor.branch_pending();
            executor = executor.step();
            self.stats.record(instruction, jumped, executor.machine());

            if self.config.record_history {
                if let Err(e) = self.take_snapshot(&executor) {
                    break Err(e);
                }
            }
        };

        // Without per-step history the final state still has to be reachable
        let result = match result {
            Ok(()) if !self.config.record_history && self.stats.steps > 0 => {
                self.take_snapshot(&executor)
            }
            other => other,
        };

        // A state that did not fit in history is dropped; stop on the last recorded one
        if let Err(RuntimeError::SnapshotLimitExceeded { current, limit }) = &result {
            warn!(
                current,
                limit,
                steps = self.stats.steps,
                "snapshot limit reached, stopping run"
            );
            if let Some(last) = self.snapshot_manager.last().cloned() {
                self.restore_snapshot(&last);
                executor = self.executor.clone();
            }
        }

        self.outcome = executor.outcome();
        self.executor = executor;
        self.finished = true;

        match &self.outcome {
            Some(Outcome::Completed(machine)) => info!(
                steps = self.stats.steps,
                jumps = self.stats.jumps,
                output_bytes = machine.output().len(),
                snapshots = self.snapshot_manager.len(),
                "program completed"
            ),
            Some(Outcome::Malformed { bracket, .. }) => warn!(
                steps = self.stats.steps,
                %bracket,
                "program malformed"
            ),
            None => debug!(steps = self.stats.steps, "run stopped before halting"),
        }

        result
    }

    /// Take a snapshot of the given execution state
    fn take_snapshot(&mut self, executor: &Executor) -> Result<(), RuntimeError> {
        let index = self.snapshot_manager.len();
        let snapshot = Snapshot::new(executor.clone(), self.stats.clone(), index);

        self.snapshot_manager
            .push(snapshot)
            .map_err(|_| RuntimeError::SnapshotLimitExceeded {
                current: self.snapshot_manager.memory_usage(),
                limit: self.snapshot_manager.memory_limit(),
            })?;

        self.history_position = index;
        Ok(())
    }

    /// Restore execution state from a snapshot
    fn restore_snapshot(&mut self, snapshot: &Snapshot) {
        self.executor = snapshot.executor.clone();
        self.stats = snapshot.stats.clone();
        self.history_position = snapshot.history_index;
    }

    fn restore_at(&mut self, index: usize) -> Result<(), RuntimeError> {
        match self.snapshot_manager.get(index).cloned() {
            Some(snapshot) => {
                self.restore_snapshot(&snapshot);
                Ok(())
            }
            None => Err(RuntimeError::HistoryOperationFailed {
                message: format!("Snapshot {} not found in history", index),
            }),
        }
    }

    /// Step backward in execution (restore previous snapshot)
    pub fn step_backward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position == 0 {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "Already at the beginning of execution".to_string(),
            });
        }

        self.restore_at(self.history_position - 1)
    }

    /// Step forward in execution (restore next snapshot)
    pub fn step_forward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position + 1 >= self.snapshot_manager.len() {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "No more snapshots available (execution finished)".to_string(),
            });
        }

        self.restore_at(self.history_position + 1)
    }

    /// Rewind to the beginning of execution history
    pub fn rewind_to_start(&mut self) -> Result<(), RuntimeError> {
        if self.snapshot_manager.is_empty() {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "No snapshots available".to_string(),
            });
        }

        self.restore_at(0)
    }

    /// Jump to the last recorded snapshot
    pub fn jump_to_end(&mut self) -> Result<(), RuntimeError> {
        match self.snapshot_manager.len() {
            0 => Err(RuntimeError::HistoryOperationFailed {
                message: "No snapshots available".to_string(),
            }),
            len => self.restore_at(len - 1),
        }
    }

    // ========== Getter methods for UI ==========

    /// The machine at the current history position
    pub fn machine(&self) -> &Machine {
        self.executor.machine()
    }

    /// Executor state at the current history position
    pub fn state(&self) -> State {
        self.executor.state()
    }

    /// Set once the current position is the malformed end state
    pub fn fault(&self) -> Option<UnmatchedBracket> {
        self.executor.fault()
    }

    /// The instruction whose execution produced the current history position
    ///
    /// `None` at the start of history.
    pub fn last_executed(&self) -> Option<Instruction> {
        let previous = self.history_position.checked_sub(1)?;
        self.snapshot_manager
            .get(previous)
            .map(|snapshot| snapshot.executor.state().instruction)
    }

    /// Statistics at the current history position
    pub fn stats(&self) -> &ExecutionStats {
        &self.stats
    }

    /// How the run ended; `None` before `run` or when a limit stopped it
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Get the current history position
    pub fn history_position(&self) -> usize {
        self.history_position
    }

    /// Get the total number of snapshots
    pub fn total_snapshots(&self) -> usize {
        self.snapshot_manager.len()
    }

    /// Check if execution has finished
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Bytes of history currently retained
    pub fn snapshot_memory_usage(&self) -> usize {
        self.snapshot_manager.memory_usage()
    }
}
