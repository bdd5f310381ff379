//! Program text parser
//!
//! This module turns program text into the instruction sequence the machine
//! executes:
//! - [`instruction`]: the [`Instruction`] enum, one variant per symbol
//! - [`parse`]: [`parse_program`] and its [`ParseError`]
//!
//! # Instruction Set
//!
//! | Symbol | Effect                                        |
//! |--------|-----------------------------------------------|
//! | `>`    | move to the next memory cell                  |
//! | `<`    | move to the previous memory cell              |
//! | `+`    | increment the current cell (wrapping)         |
//! | `-`    | decrement the current cell (wrapping)         |
//! | `.`    | emit the current cell as an output byte       |
//! | `[`    | skip past the matching `]` if the cell is 0   |
//! | `]`    | jump back to the matching `[` unless it is 0  |
//!
//! Every other character is kept as [`Instruction::Other`] and executes as a
//! no-op, so whitespace and comments can sit anywhere in a program.
//! Brackets are not checked here: a mismatch is discovered by the executor
//! when a jump actually needs the missing partner.

pub mod instruction;
pub mod parse;

pub use instruction::Instruction;
pub use parse::{parse_program, ParseError};
