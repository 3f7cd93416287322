//! Source location tracking
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// A position in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
    /// Byte offset from the start of the source
    pub offset: usize,
}

impl Position {
    /// Create a new position
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// The position of the first character of a source buffer
    pub fn start() -> Self {
        Self { line: 1, column: 1, offset: 0 }
    }

    /// Advance past one character, handling line breaks
    pub fn advance(&mut self, c: char) {
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span represents a range in the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    /// Create a new span
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A zero-width span at the given position
    pub fn at(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    /// Create a dummy span (for testing)
    pub fn dummy() -> Self {
        Self::at(Position::start())
    }

    /// Merge two spans
    pub fn merge(&self, other: &Span) -> Span {
        let start = if self.start.offset <= other.start.offset {
            self.start
        } else {
            other.start
        };
        let end = if self.end.offset >= other.end.offset {
            self.end
        } else {
            other.end
        };
        Span { start, end }
    }

    /// Get the byte length of the span
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::dummy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tracks_lines() {
        let mut pos = Position::start();
        pos.advance('a');
        assert_eq!(pos, Position::new(1, 2, 1));
        pos.advance('\n');
        assert_eq!(pos, Position::new(2, 1, 2));
        pos.advance('b');
        assert_eq!(pos, Position::new(2, 2, 3));
    }

    #[test]
    fn test_advance_multibyte() {
        let mut pos = Position::start();
        pos.advance('é');
        assert_eq!(pos.offset, 2);
        assert_eq!(pos.column, 2);
    }

    #[test]
    fn test_merge() {
        let a = Span::new(Position::new(1, 1, 0), Position::new(1, 3, 2));
        let b = Span::new(Position::new(1, 2, 1), Position::new(1, 5, 4));
        let m = a.merge(&b);
        assert_eq!(m.start.offset, 0);
        assert_eq!(m.end.offset, 4);
        assert_eq!(m.len(), 4);
    }
}
