//! Execution statistics

use crate::machine::Machine;
use crate::parser::Instruction;
use rustc_hash::FxHashMap;

/// Counters collected while a program runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Instructions executed
    pub steps: u64,
    /// Executions per instruction (comment characters are counted per character)
    pub counts: FxHashMap<Instruction, u64>,
    /// Bracket searches that moved the program counter
    pub jumps: u64,
    /// Most memory cells materialized at any point
    pub peak_cells: usize,
}

impl ExecutionStats {
    pub fn new() -> Self {
        ExecutionStats {
            peak_cells: 1,
            ..Default::default()
        }
    }

    /// Account for one executed instruction and the machine it produced
    pub fn record(&mut self, executed: Instruction, jumped: bool, after: &Machine) {
        self.steps += 1;
        *self.counts.entry(executed).or_insert(0) += 1;
        if jumped {
            self.jumps += 1;
        }
        self.peak_cells = self.peak_cells.max(after.memory().len());
    }

    pub fn count(&self, instruction: Instruction) -> u64 {
        self.counts.get(&instruction).copied().unwrap_or(0)
    }

    /// Instruction counts, most frequent first (ties broken by symbol)
    pub fn ranked(&self) -> Vec<(Instruction, u64)> {
        let mut ranked: Vec<(Instruction, u64)> =
            self.counts.iter().map(|(i, n)| (*i, *n)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.symbol().cmp(&b.0.symbol())));
        ranked
    }

    /// Rough heap footprint, used for snapshot accounting
    pub fn estimated_size(&self) -> usize {
        std::mem::size_of::<Self>() + self.counts.len() * 24
    }
}
