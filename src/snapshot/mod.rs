// Snapshot management for reverse execution

use crate::interpreter::executor::Executor;
use crate::interpreter::stats::ExecutionStats;

/// Snapshot of execution state
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub executor: Executor,
    pub stats: ExecutionStats,
    pub history_index: usize, // Index into the snapshot list
}

impl Snapshot {
    pub fn new(executor: Executor, stats: ExecutionStats, history_index: usize) -> Self {
        Snapshot {
            executor,
            stats,
            history_index,
        }
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        let machine = self.executor.machine();

        // One instruction is a tagged char: assume 8 bytes each
        let program_size = machine.program().len() * 8;
        let memory_size = machine.memory().len();
        let output_size = machine.output().len();

        std::mem::size_of::<Self>()
            + program_size
            + memory_size
            + output_size
            + self.stats.estimated_size()
    }
}

/// Manages execution history for reverse execution
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// The most recent snapshot
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Machine;

    fn snapshot(source: &str, index: usize) -> Snapshot {
        let executor = Executor::new(Machine::from_source(source).unwrap());
        Snapshot::new(executor, ExecutionStats::new(), index)
    }

    #[test]
    fn test_push_and_get() {
        let mut manager = SnapshotManager::new(1024 * 1024);
        assert!(manager.is_empty());
        manager.push(snapshot("+", 0)).unwrap();
        manager.push(snapshot("+-", 1)).unwrap();

        assert_eq!(manager.len(), 2);
        assert_eq!(manager.get(1).map(|s| s.history_index), Some(1));
        assert_eq!(manager.last().map(|s| s.history_index), Some(1));
        assert!(manager.memory_usage() > 0);
    }

    #[test]
    fn test_memory_limit() {
        let first = snapshot("+", 0);
        let limit = first.estimated_size();
        let mut manager = SnapshotManager::new(limit);
        manager.push(first).unwrap();
        assert!(manager.push(snapshot("+", 1)).is_err());
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.memory_limit(), limit);
    }
}
