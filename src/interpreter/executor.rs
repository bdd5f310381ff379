//! Fetch / decode / execute loop
//!
//! An [`Executor`] pairs a [`Machine`] with the executor [`State`]: the
//! instruction under the program counter and whether the machine has halted.
//! [`Executor::step`] consumes one executor and returns the next.
//!
//! # Step
//!
//! 1. A halted executor is returned unchanged.
//! 2. The current instruction is applied to the machine. `[` on a zero cell
//!    searches forward for its matching `]`; `]` on a non-zero cell searches
//!    backward for its matching `[`. Both searches leave the program counter
//!    on the matching bracket.
//! 3. If the program counter now sits on the last instruction the executor
//!    halts there; otherwise it advances one instruction.
//!
//! Halting is decided after the effect is applied, so the last instruction of
//! a program always runs exactly once.
//!
//! # Malformed programs
//!
//! A bracket search that runs off either end of the program replaces the
//! machine with [`Machine::invalid`] and halts. The result is reported as
//! [`Outcome::Malformed`], never as a panic or an endless loop.

use crate::machine::Machine;
use crate::parser::Instruction;
use std::fmt;

/// Executor state carried alongside the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Instruction under the program counter
    pub instruction: Instruction,
    pub halted: bool,
}

/// The bracket whose partner could not be found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedBracket {
    /// A `[` on a zero cell with no `]` to its right
    Open { position: usize },
    /// A `]` on a non-zero cell with no `[` to its left
    Close { position: usize },
}

impl UnmatchedBracket {
    /// Program position of the bracket the search started from
    pub fn position(&self) -> usize {
        match self {
            UnmatchedBracket::Open { position } | UnmatchedBracket::Close { position } => {
                *position
            }
        }
    }
}

impl fmt::Display for UnmatchedBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedBracket::Open { position } => {
                write!(f, "`[` at position {} has no matching `]`", position)
            }
            UnmatchedBracket::Close { position } => {
                write!(f, "`]` at position {} has no matching `[`", position)
            }
        }
    }
}

/// How a finished run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The program ran off its last instruction
    Completed(Machine),
    /// A bracket search failed; `machine` is always [`Machine::invalid`]
    Malformed {
        machine: Machine,
        bracket: UnmatchedBracket,
    },
}

impl Outcome {
    pub fn machine(&self) -> &Machine {
        match self {
            Outcome::Completed(machine) | Outcome::Malformed { machine, .. } => machine,
        }
    }

    pub fn into_machine(self) -> Machine {
        match self {
            Outcome::Completed(machine) | Outcome::Malformed { machine, .. } => machine,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Outcome::Malformed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executor {
    machine: Machine,
    state: State,
    fault: Option<UnmatchedBracket>,
}

impl Executor {
    /// Start executing at the machine's current instruction
    pub fn new(machine: Machine) -> Self {
        let state = State {
            instruction: machine.program().current(),
            halted: false,
        };
        Executor {
            machine,
            state,
            fault: None,
        }
    }

    /// Execute one instruction
    pub fn step(self) -> Self {
        if self.state.halted {
            return self;
        }

        let Executor { machine, state, .. } = self;

        let machine = match state.instruction {
            Instruction::MoveRight => machine.next_cell(),
            Instruction::MoveLeft => machine.prev_cell(),
            Instruction::Increment => machine.increment(),
            Instruction::Decrement => machine.decrement(),
            Instruction::Print => machine.print(),
            Instruction::LoopStart if machine.memory().current() == 0 => {
                match seek_loop_end(machine) {
                    Ok(machine) => machine,
                    Err(bracket) => return Self::malformed(bracket),
                }
            }
            Instruction::LoopEnd if machine.memory().current() != 0 => {
                match seek_loop_start(machine) {
                    Ok(machine) => machine,
                    Err(bracket) => return Self::malformed(bracket),
                }
            }
            Instruction::LoopStart | Instruction::LoopEnd | Instruction::Other(_) => machine,
        };

        match machine.advance_pc() {
            Ok(machine) => Executor {
                state: State {
                    instruction: machine.program().current(),
                    halted: false,
                },
                machine,
                fault: None,
            },
            Err(machine) => Executor {
                state: State {
                    instruction: machine.program().current(),
                    halted: true,
                },
                machine,
                fault: None,
            },
        }
    }

    /// Step until halted
    ///
    /// Programs that loop forever never return; use the
    /// [`Interpreter`](super::engine::Interpreter) for a bounded run.
    pub fn run(self) -> Outcome {
        let mut executor = self;
        while !executor.is_halted() {
            executor = executor.step();
        }
        executor.finish()
    }

    /// The outcome of a halted executor; `Err` returns a running one unchanged
    pub fn into_outcome(self) -> Result<Outcome, Self> {
        if self.is_halted() {
            Ok(self.finish())
        } else {
            Err(self)
        }
    }

    /// The outcome, if halted
    pub fn outcome(&self) -> Option<Outcome> {
        self.is_halted().then(|| self.clone().finish())
    }

    /// Whether the next step moves the program counter through a bracket search
    pub fn branch_pending(&self) -> bool {
        if self.state.halted {
            return false;
        }
        match self.state.instruction {
            Instruction::LoopStart => self.machine.memory().current() == 0,
            Instruction::LoopEnd => self.machine.memory().current() != 0,
            _ => false,
        }
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state.halted
    }

    /// The unmatched bracket, once a search has failed
    pub fn fault(&self) -> Option<UnmatchedBracket> {
        self.fault
    }

    fn malformed(bracket: UnmatchedBracket) -> Self {
        let machine = Machine::invalid();
        Executor {
            state: State {
                instruction: machine.program().current(),
                halted: true,
            },
            machine,
            fault: Some(bracket),
        }
    }

    fn finish(self) -> Outcome {
        match self.fault {
            Some(bracket) => Outcome::Malformed {
                machine: self.machine,
                bracket,
            },
            None => Outcome::Completed(self.machine),
        }
    }
}

/// From a `[`, move right onto its matching `]`
///
/// A `]` seen at depth 0 is the match; nested `[` / `]` raise / lower the depth.
fn seek_loop_end(machine: Machine) -> Result<Machine, UnmatchedBracket> {
    let origin = machine.program().position();
    let mut machine = machine;
    let mut depth: isize = 0;

    loop {
        machine = machine
            .advance_pc()
            .map_err(|_| UnmatchedBracket::Open { position: origin })?;

        match machine.program().current() {
            Instruction::LoopEnd if depth == 0 => return Ok(machine),
            Instruction::LoopEnd => depth -= 1,
            Instruction::LoopStart => depth += 1,
            _ => {}
        }
    }
}

/// From a `]`, move left onto its matching `[`
///
/// A `[` seen at depth 0 is the match; nested `]` / `[` raise / lower the depth.
fn seek_loop_start(machine: Machine) -> Result<Machine, UnmatchedBracket> {
    let origin = machine.program().position();
    let mut machine = machine;
    let mut depth: isize = 0;

    loop {
        machine = machine
            .rewind_pc()
            .map_err(|_| UnmatchedBracket::Close { position: origin })?;

        match machine.program().current() {
            Instruction::LoopStart if depth == 0 => return Ok(machine),
            Instruction::LoopStart => depth -= 1,
            Instruction::LoopEnd => depth += 1,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executor(source: &str) -> Executor {
        Executor::new(Machine::from_source(source).unwrap())
    }

    #[test]
    fn test_initial_state() {
        let executor = executor("+-");
        assert_eq!(
            executor.state(),
            State {
                instruction: Instruction::Increment,
                halted: false,
            }
        );
    }

    #[test]
    fn test_single_instruction_halts_after_one_step() {
        let executor = executor("+").step();
        assert!(executor.is_halted());
        assert_eq!(executor.machine().memory().current(), 1);
        assert!(executor.machine().output().is_empty());
    }

    #[test]
    fn test_halted_step_is_identity() {
        let halted = executor("+.").run_to_halt();
        assert_eq!(halted.clone().step(), halted);
    }

    #[test]
    fn test_last_instruction_runs_once() {
        let outcome = executor("++.").run();
        assert_eq!(outcome.machine().output().as_slice(), &[2]);
    }

    #[test]
    fn test_comments_are_no_ops() {
        let outcome = executor("+ add one\n+ and another").run();
        assert!(!outcome.is_malformed());
        assert_eq!(outcome.machine().memory().current(), 2);
    }

    #[test]
    fn test_skip_loop_on_zero_cell() {
        let outcome = executor("[+++]+").run();
        assert_eq!(outcome.machine().memory().current(), 1);
    }

    #[test]
    fn test_skip_nested_loops() {
        let outcome = executor("[[+][+]]+").run();
        assert!(!outcome.is_malformed());
        assert_eq!(outcome.machine().memory().current(), 1);
    }

    #[test]
    fn test_nested_loop_directly_after_open_bracket() {
        let outcome = executor("++[[-]]+").run();
        assert!(!outcome.is_malformed());
        assert_eq!(outcome.machine().memory().current(), 1);
    }

    #[test]
    fn test_matching_close_bracket_at_end_halts() {
        let outcome = executor("[+]").run();
        assert!(!outcome.is_malformed());
        assert_eq!(outcome.machine().program().position(), 2);
        assert_eq!(outcome.machine().memory().current(), 0);
    }

    #[test]
    fn test_loop_repeats_until_zero() {
        let outcome = executor("+++++[-]").run();
        assert!(!outcome.is_malformed());
        assert_eq!(outcome.machine().memory().current(), 0);
    }

    #[test]
    fn test_open_bracket_at_end_is_malformed() {
        let outcome = executor("+-[").run();
        assert_eq!(
            outcome,
            Outcome::Malformed {
                machine: Machine::invalid(),
                bracket: UnmatchedBracket::Open { position: 2 },
            }
        );
    }

    #[test]
    fn test_unclosed_loop_is_malformed() {
        let outcome = executor("[+[++]-").run();
        assert!(outcome.is_malformed());
        assert_eq!(outcome.machine().output_text(), "Error!");
    }

    #[test]
    fn test_stray_close_bracket_is_malformed() {
        let outcome = executor("+]").run();
        assert_eq!(
            outcome,
            Outcome::Malformed {
                machine: Machine::invalid(),
                bracket: UnmatchedBracket::Close { position: 1 },
            }
        );
    }

    #[test]
    fn test_close_bracket_on_zero_cell_is_ignored() {
        let outcome = executor("]+").run();
        assert!(!outcome.is_malformed());
        assert_eq!(outcome.machine().memory().current(), 1);
    }

    #[test]
    fn test_branch_pending() {
        let e = executor("[-]");
        assert!(e.branch_pending());
        let e = executor("+[-]").step();
        assert!(!e.branch_pending());
    }

    #[test]
    fn test_into_outcome_requires_halt() {
        let running = executor("++");
        let running = running.into_outcome().unwrap_err();
        let halted = running.step().step();
        assert!(halted.into_outcome().is_ok());
    }

    impl Executor {
        fn run_to_halt(self) -> Self {
            let mut executor = self;
            while !executor.is_halted() {
                executor = executor.step();
            }
            executor
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn balanced() -> impl Strategy<Value = String> {
        let leaf = prop::sample::select(vec!["+", "-", ">", "<", ".", "#"]).prop_map(String::from);
        leaf.prop_recursive(5, 64, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 1..6).prop_map(|parts| parts.concat()),
                inner.prop_map(|body| format!("[{}]", body)),
            ]
        })
    }

    fn at(source: &str, position: usize) -> Machine {
        let mut machine = Machine::from_source(source).unwrap();
        for _ in 0..position {
            machine = machine.advance_pc().unwrap();
        }
        machine
    }

    proptest! {
        #[test]
        fn bracket_searches_round_trip(source in balanced()) {
            for (position, c) in source.chars().enumerate() {
                if c != '[' {
                    continue;
                }
                let end = seek_loop_end(at(&source, position)).unwrap();
                prop_assert_eq!(end.program().current(), Instruction::LoopEnd);

                let start = seek_loop_start(end).unwrap();
                prop_assert_eq!(start.program().position(), position);
            }
        }
    }
}
