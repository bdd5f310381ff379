//! Generic zipper over a sequence

use crate::tape::Tape;

/// What a cursor does when asked to move past one of its ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary<T> {
    /// Refuse the move; the cursor stays where it is
    Fixed,
    /// Materialize a new element holding this value, then move onto it
    Extend(T),
}

/// A zipper: left context, current element, right context
///
/// Both contexts are stored with the element nearest to `current` at the end
/// of their `Vec`, which makes every move a single `pop` + `push`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor<T> {
    left: Vec<T>,
    current: T,
    right: Vec<T>,
    boundary: Boundary<T>,
}

impl<T: Clone> Cursor<T> {
    /// A cursor over a single element
    pub fn new(current: T, boundary: Boundary<T>) -> Self {
        Cursor {
            left: Vec::new(),
            current,
            right: Vec::new(),
            boundary,
        }
    }

    /// A cursor on the first element of `items`, or `None` if there is none
    pub fn from_vec(items: Vec<T>, boundary: Boundary<T>) -> Option<Self> {
        let mut right = items;
        right.reverse();
        let current = right.pop()?;
        Some(Cursor {
            left: Vec::new(),
            current,
            right,
            boundary,
        })
    }

    /// Move one element to the right
    ///
    /// `Err` carries the unchanged cursor when a [`Boundary::Fixed`] end was hit.
    pub fn move_right(mut self) -> Result<Self, Self> {
        let next = match self.right.pop() {
            Some(next) => next,
            None => match &self.boundary {
                Boundary::Fixed => return Err(self),
                Boundary::Extend(fill) => fill.clone(),
            },
        };
        let previous = std::mem::replace(&mut self.current, next);
        self.left.push(previous);
        Ok(self)
    }

    /// Move one element to the left
    ///
    /// `Err` carries the unchanged cursor when a [`Boundary::Fixed`] end was hit.
    pub fn move_left(mut self) -> Result<Self, Self> {
        let next = match self.left.pop() {
            Some(next) => next,
            None => match &self.boundary {
                Boundary::Fixed => return Err(self),
                Boundary::Extend(fill) => fill.clone(),
            },
        };
        let previous = std::mem::replace(&mut self.current, next);
        self.right.push(previous);
        Ok(self)
    }

    /// Replace the current element with `f(current)`
    pub fn map_current<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&T) -> T,
    {
        self.current = f(&self.current);
        self
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    /// True iff nothing is left of the cursor
    pub fn is_first(&self) -> bool {
        self.left.is_empty()
    }

    /// True iff nothing is right of the cursor
    pub fn is_last(&self) -> bool {
        self.right.is_empty()
    }

    /// Index of the current element within the materialized tape
    pub fn position(&self) -> usize {
        self.left.len()
    }

    /// Number of materialized elements
    pub fn len(&self) -> usize {
        self.left.len() + 1 + self.right.len()
    }

    /// Left context, nearest element first
    pub fn left(&self) -> Tape<T> {
        self.left.iter().rev().cloned().collect()
    }

    /// Right context, nearest element first
    pub fn right(&self) -> Tape<T> {
        self.right.iter().rev().cloned().collect()
    }

    /// The full tape: `reverse(left) ++ [current] ++ right`
    pub fn as_tape(&self) -> Tape<T> {
        Tape::concat([
            self.left().reverse(),
            Tape::empty().push(self.current.clone()),
            self.right(),
        ])
    }

    /// The full tape rendered through `render`, with the current element
    /// wrapped in `|` delimiters
    pub fn debug_tape<F>(&self, mut render: F) -> Tape<char>
    where
        F: FnMut(&T) -> Tape<char>,
    {
        let current = render(&self.current);
        Tape::concat([
            self.left().reverse().flat_map(&mut render),
            Tape::empty().push('|'),
            current,
            Tape::empty().push('|'),
            self.right().flat_map(&mut render),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(text: &str) -> Cursor<char> {
        Cursor::from_vec(text.chars().collect(), Boundary::Fixed).unwrap()
    }

    #[test]
    fn test_from_vec_starts_at_first_element() {
        let cursor = letters("abc");
        assert_eq!(*cursor.current(), 'a');
        assert!(cursor.is_first());
        assert!(!cursor.is_last());
        assert_eq!(cursor.len(), 3);
    }

    #[test]
    fn test_from_empty_vec() {
        assert!(Cursor::<u8>::from_vec(Vec::new(), Boundary::Extend(0)).is_none());
    }

    #[test]
    fn test_moves_shift_between_contexts() {
        let cursor = letters("abcd").move_right().unwrap().move_right().unwrap();
        assert_eq!(*cursor.current(), 'c');
        assert_eq!(cursor.left().to_string(), "ba");
        assert_eq!(cursor.right().to_string(), "d");
        assert_eq!(cursor.as_tape().to_string(), "abcd");
        assert_eq!(cursor.position(), 2);

        let cursor = cursor.move_left().unwrap();
        assert_eq!(*cursor.current(), 'b');
        assert_eq!(cursor.as_tape().to_string(), "abcd");
    }

    #[test]
    fn test_fixed_boundary_refuses_moves() {
        let cursor = letters("ab");
        let cursor = cursor.move_left().unwrap_err();
        assert_eq!(*cursor.current(), 'a');

        let cursor = cursor.move_right().unwrap();
        assert!(cursor.is_last());
        let cursor = cursor.move_right().unwrap_err();
        assert_eq!(*cursor.current(), 'b');
        assert_eq!(cursor.as_tape().to_string(), "ab");
    }

    #[test]
    fn test_extend_boundary_materializes_cells() {
        let cursor = Cursor::new(7u8, Boundary::Extend(0));
        let cursor = cursor.move_right().unwrap();
        assert_eq!(*cursor.current(), 0);
        assert_eq!(cursor.as_tape().into_vec(), vec![7, 0]);

        let cursor = cursor.move_left().unwrap().move_left().unwrap();
        assert_eq!(*cursor.current(), 0);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.as_tape().into_vec(), vec![0, 7, 0]);
    }

    #[test]
    fn test_debug_tape_marks_current() {
        let cursor = letters("xyz").move_right().unwrap();
        let rendered = cursor.debug_tape(|c| Tape::empty().push(*c));
        assert_eq!(rendered.to_string(), "x|y|z");
    }

    #[test]
    fn test_map_current() {
        let cursor = Cursor::new(1u8, Boundary::Extend(0)).map_current(|v| v + 41);
        assert_eq!(*cursor.current(), 42);
    }
}
