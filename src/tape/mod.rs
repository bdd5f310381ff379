//! Immutable, append-style sequences
//!
//! [`Tape`] is the small sequence type the rest of the crate builds its
//! debug views from. Every operation consumes the tape and returns a new one,
//! so a tape that has been handed to someone else is never changed behind
//! their back.
//!
//! # Operations
//!
//! - [`Tape::empty`], [`Tape::push`]: build a tape element by element
//! - [`Tape::concat`], [`Tape::append`]: join tapes in order
//! - [`Tape::reverse`]: reverse the element order
//! - [`Tape::flat_map`]: expand every element into a tape and join the results
//! - [`decimal`]: render a byte as its decimal digits
//!
//! A `Tape<char>` renders as text through its [`Display`](fmt::Display) impl.

use std::fmt;

/// An ordered, immutable sequence of elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tape<T> {
    items: Vec<T>,
}

impl<T> Tape<T> {
    /// The empty tape
    pub fn empty() -> Self {
        Tape { items: Vec::new() }
    }

    /// Append one element at the end
    pub fn push(mut self, item: T) -> Self {
        self.items.push(item);
        self
    }

    /// Append every element of `other` at the end
    pub fn append(mut self, other: Tape<T>) -> Self {
        self.items.extend(other.items);
        self
    }

    /// Concatenate any number of tapes, in order
    pub fn concat<I>(tapes: I) -> Self
    where
        I: IntoIterator<Item = Tape<T>>,
    {
        tapes.into_iter().fold(Tape::empty(), Tape::append)
    }

    /// The same elements in reverse order
    pub fn reverse(mut self) -> Self {
        self.items.reverse();
        self
    }

    /// Map every element to a tape and concatenate the results
    pub fn flat_map<U, F>(&self, f: F) -> Tape<U>
    where
        F: FnMut(&T) -> Tape<U>,
    {
        Tape::concat(self.items.iter().map(f))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for Tape<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for Tape<T> {
    fn from(items: Vec<T>) -> Self {
        Tape { items }
    }
}

impl<T> FromIterator<T> for Tape<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Tape {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Tape<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Tape<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<&str> for Tape<char> {
    fn from(text: &str) -> Self {
        text.chars().collect()
    }
}

impl fmt::Display for Tape<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.items.iter().try_for_each(|c| write!(f, "{}", c))
    }
}

/// Decimal digits of a byte, most significant first (`0` renders as `"0"`)
pub fn decimal(value: u8) -> Tape<char> {
    let mut digits = Tape::empty();
    let mut rest = value;
    loop {
        digits = digits.push(char::from(b'0' + rest % 10));
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    digits.reverse()
}

/// Bytes shown as characters, one char per byte (Latin-1)
pub fn bytes_as_chars(bytes: &Tape<u8>) -> Tape<char> {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_reverse() {
        let tape = Tape::empty().push(1).push(2).push(3);
        assert_eq!(tape.as_slice(), &[1, 2, 3]);
        assert_eq!(tape.reverse().as_slice(), &[3, 2, 1]);
    }

    #[test]
    fn test_concat_keeps_order() {
        let joined = Tape::concat([
            Tape::from("PRG"),
            Tape::from(":"),
            Tape::empty(),
            Tape::from("+|"),
            Tape::from("-"),
        ]);
        assert_eq!(joined.to_string(), "PRG:+|-");
    }

    #[test]
    fn test_decimal_digits() {
        assert_eq!(decimal(0).to_string(), "0");
        assert_eq!(decimal(7).to_string(), "7");
        assert_eq!(decimal(16).to_string(), "16");
        assert_eq!(decimal(100).to_string(), "100");
        assert_eq!(decimal(255).to_string(), "255");
    }

    #[test]
    fn test_flat_map_concatenates_without_separator() {
        let cells: Tape<u8> = vec![72, 0, 5].into();
        assert_eq!(cells.flat_map(|&c| decimal(c)).to_string(), "7205");
    }

    #[test]
    fn test_bytes_as_chars() {
        let out: Tape<u8> = b"Hi!".to_vec().into();
        assert_eq!(bytes_as_chars(&out).to_string(), "Hi!");
    }
}
