//! # Introduction
//!
//! tapevm runs programs written in an eight-symbol, bracket-structured byte
//! language on a machine made of two zipper tapes, capturing a snapshot of the
//! full machine after each instruction. The snapshot history is then
//! navigated forward and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Parser → ProgramStore → Machine → Executor → Snapshots → TUI
//! ```
//!
//! 1. [`parser`] — maps program text to [`parser::Instruction`]s.
//! 2. [`tape`] — the immutable sequence type debug views are built from.
//! 3. [`memory`] — the zipper [`memory::Cursor`] and the program and memory
//!    stores built on it.
//! 4. [`machine`] — the [`machine::Machine`] value and its transitions.
//! 5. [`interpreter`] — the step function, bracket search, statistics and the
//!    history-recording [`interpreter::engine::Interpreter`].
//! 6. [`snapshot`] — snapshot history with a configurable memory limit.
//! 7. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Quick run
//!
//! ```
//! let outcome = tapevm::execute("++++++++[>++<-]>").unwrap();
//! assert_eq!(outcome.machine().memory().current(), 16);
//! ```

pub mod config;
pub mod interpreter;
pub mod machine;
pub mod memory;
pub mod parser;
pub mod snapshot;
pub mod tape;
pub mod ui;

pub use config::Config;
pub use interpreter::executor::{Executor, Outcome};
pub use machine::Machine;

/// Parse and run a program to completion with no step limit
///
/// A program that never halts makes this loop forever; use
/// [`interpreter::engine::Interpreter`] with a [`Config`] step limit instead
/// when the program is untrusted.
pub fn execute(source: &str) -> Result<Outcome, parser::ParseError> {
    Ok(Executor::new(Machine::from_source(source)?).run())
}
