//! Fixed program tape

use super::cursor::{Boundary, Cursor};
use crate::parser::{parse_program, Instruction, ParseError};
use crate::tape::Tape;

/// The instruction tape: content fixed at construction, only the position moves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramStore {
    cursor: Cursor<Instruction>,
}

impl ProgramStore {
    /// Build a store positioned on the first instruction
    pub fn new(instructions: Vec<Instruction>) -> Result<Self, ParseError> {
        Cursor::from_vec(instructions, Boundary::Fixed)
            .map(|cursor| ProgramStore { cursor })
            .ok_or(ParseError::EmptyProgram)
    }

    /// A one-instruction program
    pub fn single(instruction: Instruction) -> Self {
        ProgramStore {
            cursor: Cursor::new(instruction, Boundary::Fixed),
        }
    }

    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        Self::new(parse_program(source)?)
    }

    /// Move to the next instruction; `Err` (unchanged) when already on the last
    pub fn advance(self) -> Result<Self, Self> {
        self.cursor
            .move_right()
            .map(|cursor| ProgramStore { cursor })
            .map_err(|cursor| ProgramStore { cursor })
    }

    /// Move to the previous instruction; `Err` (unchanged) when already on the first
    pub fn rewind(self) -> Result<Self, Self> {
        self.cursor
            .move_left()
            .map(|cursor| ProgramStore { cursor })
            .map_err(|cursor| ProgramStore { cursor })
    }

    pub fn current(&self) -> Instruction {
        *self.cursor.current()
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    pub fn is_first(&self) -> bool {
        self.cursor.is_first()
    }

    pub fn is_last(&self) -> bool {
        self.cursor.is_last()
    }

    /// All instructions in program order
    pub fn as_tape(&self) -> Tape<Instruction> {
        self.cursor.as_tape()
    }

    /// Program text with the current instruction wrapped in `|`
    pub fn debug_tape(&self) -> Tape<char> {
        self.cursor
            .debug_tape(|instruction| Tape::empty().push(instruction.symbol()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_program_is_rejected() {
        assert_eq!(ProgramStore::new(Vec::new()), Err(ParseError::EmptyProgram));
        assert_eq!(ProgramStore::from_source(""), Err(ParseError::EmptyProgram));
    }

    #[test]
    fn test_advance_stops_at_last_instruction() {
        let store = ProgramStore::from_source("+-").unwrap();
        assert!(store.is_first());
        let store = store.advance().unwrap();
        assert_eq!(store.current(), Instruction::Decrement);
        assert!(store.is_last());
        let store = store.advance().unwrap_err();
        assert_eq!(store.position(), 1);
    }

    #[test]
    fn test_rewind_stops_at_first_instruction() {
        let store = ProgramStore::from_source("[]").unwrap();
        let store = store.rewind().unwrap_err();
        assert_eq!(store.current(), Instruction::LoopStart);
    }

    #[test]
    fn test_debug_tape() {
        let store = ProgramStore::from_source("+[-]").unwrap().advance().unwrap();
        assert_eq!(store.debug_tape().to_string(), "+|[|-]");
    }
}
