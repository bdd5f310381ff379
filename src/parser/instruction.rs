//! Instruction symbols

use std::fmt;

/// One program symbol
///
/// The catch-all [`Instruction::Other`] keeps the original character so the
/// program tape can be displayed exactly as it was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `>`
    MoveRight,
    /// `<`
    MoveLeft,
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `.`
    Print,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
    /// Any other character, executed as a no-op
    Other(char),
}

impl Instruction {
    pub fn from_char(c: char) -> Self {
        match c {
            '>' => Instruction::MoveRight,
            '<' => Instruction::MoveLeft,
            '+' => Instruction::Increment,
            '-' => Instruction::Decrement,
            '.' => Instruction::Print,
            '[' => Instruction::LoopStart,
            ']' => Instruction::LoopEnd,
            other => Instruction::Other(other),
        }
    }

    /// The character this instruction was parsed from
    pub fn symbol(self) -> char {
        match self {
            Instruction::MoveRight => '>',
            Instruction::MoveLeft => '<',
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::Print => '.',
            Instruction::LoopStart => '[',
            Instruction::LoopEnd => ']',
            Instruction::Other(c) => c,
        }
    }

    /// Short name used in statistics and logs
    pub fn name(self) -> &'static str {
        match self {
            Instruction::MoveRight => "next",
            Instruction::MoveLeft => "prev",
            Instruction::Increment => "inc",
            Instruction::Decrement => "dec",
            Instruction::Print => "print",
            Instruction::LoopStart => "loop",
            Instruction::LoopEnd => "end",
            Instruction::Other(_) => "nop",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_round_trip() {
        for c in "><+-.[]".chars() {
            let instruction = Instruction::from_char(c);
            assert!(!matches!(instruction, Instruction::Other(_)));
            assert_eq!(instruction.symbol(), c);
        }
    }

    #[test]
    fn test_unknown_characters_are_kept() {
        assert_eq!(Instruction::from_char('x'), Instruction::Other('x'));
        assert_eq!(Instruction::from_char(',').symbol(), ',');
        assert_eq!(Instruction::from_char(' ').name(), "nop");
    }
}
