//! Self-extending byte tape

use super::cursor::{Boundary, Cursor};
use crate::tape::{decimal, Tape};

/// Memory cells: starts as one zero cell and grows with zero cells at
/// whichever end the cursor walks past
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    cursor: Cursor<u8>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            cursor: Cursor::new(0, Boundary::Extend(0)),
        }
    }

    pub fn next_cell(self) -> Self {
        match self.cursor.move_right() {
            Ok(cursor) | Err(cursor) => MemoryStore { cursor },
        }
    }

    pub fn prev_cell(self) -> Self {
        match self.cursor.move_left() {
            Ok(cursor) | Err(cursor) => MemoryStore { cursor },
        }
    }

    /// 255 wraps to 0
    pub fn increment(self) -> Self {
        MemoryStore {
            cursor: self.cursor.map_current(|value| value.wrapping_add(1)),
        }
    }

    /// 0 wraps to 255
    pub fn decrement(self) -> Self {
        MemoryStore {
            cursor: self.cursor.map_current(|value| value.wrapping_sub(1)),
        }
    }

    pub fn current(&self) -> u8 {
        *self.cursor.current()
    }

    /// Index of the current cell among the materialized cells
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Number of materialized cells
    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    /// Every materialized cell, leftmost first
    pub fn cells(&self) -> Tape<u8> {
        self.cursor.as_tape()
    }

    /// Cell values in decimal, with the current cell wrapped in `|`
    pub fn debug_tape(&self) -> Tape<char> {
        self.cursor.debug_tape(|value| decimal(*value))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
