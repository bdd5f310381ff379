//! Program text → instruction sequence

use super::instruction::Instruction;
use thiserror::Error;

/// Errors raised before a machine can be built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A machine needs at least one instruction to stand on
    #[error("program is empty: at least one instruction is required")]
    EmptyProgram,
}

/// Parse program text, one instruction per character
///
/// Unknown characters become [`Instruction::Other`]; only an empty program is
/// rejected.
pub fn parse_program(source: &str) -> Result<Vec<Instruction>, ParseError> {
    let instructions: Vec<Instruction> = source.chars().map(Instruction::from_char).collect();

    if instructions.is_empty() {
        return Err(ParseError::EmptyProgram);
    }

    Ok(instructions)
}
