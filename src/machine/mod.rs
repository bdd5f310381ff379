//! Machine state
//!
//! A [`Machine`] is the aggregate of a [`ProgramStore`], a [`MemoryStore`] and
//! the output emitted so far. Machines are values: every transition consumes a
//! machine and returns the next one, and nothing else can observe the old
//! value changing. Keeping a copy of a machine (as the snapshot history does)
//! is therefore always safe.
//!
//! # Transitions
//!
//! | Method                        | Effect                                    |
//! |-------------------------------|-------------------------------------------|
//! | [`Machine::advance_pc`]       | program cursor one step right             |
//! | [`Machine::rewind_pc`]        | program cursor one step left              |
//! | [`Machine::next_cell`]        | memory cursor right, zero-extending       |
//! | [`Machine::prev_cell`]        | memory cursor left, zero-extending        |
//! | [`Machine::increment`]        | current cell + 1, wrapping                |
//! | [`Machine::decrement`]        | current cell - 1, wrapping                |
//! | [`Machine::print`]            | append current cell to the output         |
//!
//! # Invalid machine
//!
//! [`Machine::invalid`] is the sentinel a malformed program ends in: a
//! one-symbol program (`X`), a single zero cell, and the output `Error!`.

use crate::memory::{MemoryStore, ProgramStore};
use crate::parser::{Instruction, ParseError};
use crate::tape::{bytes_as_chars, Tape};
use std::fmt;

/// Output of the invalid machine
pub const ERROR_OUTPUT: &[u8] = b"Error!";

/// Program symbol of the invalid machine
pub const INVALID_PROGRAM_SYMBOL: char = 'X';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    program: ProgramStore,
    memory: MemoryStore,
    output: Tape<u8>,
}

impl Machine {
    /// A fresh machine: program on its first instruction, one zero cell, no output
    pub fn new(program: ProgramStore) -> Self {
        Machine {
            program,
            memory: MemoryStore::new(),
            output: Tape::empty(),
        }
    }

    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        Ok(Self::new(ProgramStore::from_source(source)?))
    }

    /// The sentinel a program with an unmatched bracket ends in
    pub fn invalid() -> Self {
        Machine {
            program: ProgramStore::single(Instruction::Other(INVALID_PROGRAM_SYMBOL)),
            memory: MemoryStore::new(),
            output: ERROR_OUTPUT.iter().copied().collect(),
        }
    }

    /// Structural comparison against [`Machine::invalid`]
    pub fn is_invalid(&self) -> bool {
        *self == Self::invalid()
    }

    /// `Err` carries the unchanged machine when the program is on its last instruction
    pub fn advance_pc(self) -> Result<Self, Self> {
        let Machine {
            program,
            memory,
            output,
        } = self;
        match program.advance() {
            Ok(program) => Ok(Machine {
                program,
                memory,
                output,
            }),
            Err(program) => Err(Machine {
                program,
                memory,
                output,
            }),
        }
    }

    /// `Err` carries the unchanged machine when the program is on its first instruction
    pub fn rewind_pc(self) -> Result<Self, Self> {
        let Machine {
            program,
            memory,
            output,
        } = self;
        match program.rewind() {
            Ok(program) => Ok(Machine {
                program,
                memory,
                output,
            }),
            Err(program) => Err(Machine {
                program,
                memory,
                output,
            }),
        }
    }

    pub fn next_cell(self) -> Self {
        Machine {
            memory: self.memory.next_cell(),
            ..self
        }
    }

    pub fn prev_cell(self) -> Self {
        Machine {
            memory: self.memory.prev_cell(),
            ..self
        }
    }

    pub fn increment(self) -> Self {
        Machine {
            memory: self.memory.increment(),
            ..self
        }
    }

    pub fn decrement(self) -> Self {
        Machine {
            memory: self.memory.decrement(),
            ..self
        }
    }

    pub fn print(self) -> Self {
        let byte = self.memory.current();
        Machine {
            output: self.output.push(byte),
            ..self
        }
    }

    pub fn program(&self) -> &ProgramStore {
        &self.program
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    pub fn output(&self) -> &Tape<u8> {
        &self.output
    }

    /// Output bytes as text (lossy for invalid UTF-8)
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(self.output.as_slice()).into_owned()
    }

    /// `PRG:<program>\nMEM:<memory>\nOUT:<output>`
    pub fn debug_tape(&self) -> Tape<char> {
        Tape::concat([
            Tape::from("PRG:"),
            self.program.debug_tape(),
            Tape::from("\nMEM:"),
            self.memory.debug_tape(),
            Tape::from("\nOUT:"),
            bytes_as_chars(&self.output),
        ])
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.debug_tape())
    }
}
