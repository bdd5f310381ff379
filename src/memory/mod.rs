//! Zipper-backed storage for the machine
//!
//! This module provides the two tapes a machine works on:
//! - [`cursor`]: the generic zipper [`Cursor`] and its [`Boundary`] policy
//! - [`program`]: [`ProgramStore`], the fixed instruction tape
//! - [`cells`]: [`MemoryStore`], the self-extending byte tape
//!
//! # Layout
//!
//! A cursor splits its sequence into three parts:
//!
//! ```text
//!   left (nearest first)   current   right
//!   [l2, l1, l0]             c       [r0, r1]
//!   full tape = reverse(left) ++ [c] ++ right = l0 l1 l2 c r0 r1
//! ```
//!
//! Moving one step shifts a single element between the parts, so both moves
//! are O(1) no matter how long the tape is.
//!
//! # Boundaries
//!
//! The program tape never grows: moving past either end is refused and the
//! caller has to check [`ProgramStore::is_first`] / [`ProgramStore::is_last`].
//! The memory tape grows instead: moving past either end materializes a new
//! zero cell. There is no cap on how many cells may be materialized.

pub mod cells;
pub mod cursor;
pub mod program;

pub use cells::MemoryStore;
pub use cursor::{Boundary, Cursor};
pub use program::ProgramStore;
