//! Character-level cursor over a source buffer
//!
//! The scanner knows nothing about tokens; it only moves a cursor, keeps
//! line/column/offset bookkeeping, and supports nested backtracking marks.
#![allow(dead_code)]

use crate::utils::Position;

pub struct Scanner {
    /// Source code as characters
    chars: Vec<char>,
    /// Current index into `chars`
    index: usize,
    /// Position of the character at `index`
    position: Position,
    /// Backtracking mark stack
    marks: Vec<(usize, Position)>,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            index: 0,
            position: Position::start(),
            marks: Vec::new(),
        }
    }

    /// Get the character at cursor + offset without advancing
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).copied()
    }

    /// Return and consume the current character
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.index += 1;
        self.position.advance(c);
        Some(c)
    }

    /// Consume exactly one character if it equals `expected`
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.peek(0) == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// All-or-nothing multi-character match; consumes only on full match
    pub fn match_str(&mut self, expected: &str) -> bool {
        for (i, c) in expected.chars().enumerate() {
            if self.peek(i) != Some(c) {
                return false;
            }
        }
        for _ in expected.chars() {
            self.advance();
        }
        true
    }

    /// Greedily consume the longest run satisfying `pred`
    pub fn match_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek(0) {
            if !pred(c) {
                break;
            }
            out.push(c);
            self.advance();
        }
        out
    }

    /// Push a backtracking mark at the current cursor
    pub fn mark(&mut self) {
        self.marks.push((self.index, self.position));
    }

    /// Rewind to the most recent mark, consuming it
    pub fn reset_to_mark(&mut self) {
        if let Some((index, position)) = self.marks.pop() {
            self.index = index;
            self.position = position;
        }
    }

    /// Discard the most recent mark without rewinding
    pub fn pop_mark(&mut self) {
        self.marks.pop();
    }

    pub fn at_end(&self) -> bool {
        self.index >= self.chars.len()
    }

    /// Position of the next character to be consumed
    pub fn position(&self) -> Position {
        self.position
    }

    /// Rewind everything to the start of the buffer
    pub fn reset(&mut self) {
        self.index = 0;
        self.position = Position::start();
        self.marks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_advance() {
        let mut s = Scanner::new("ab");
        assert_eq!(s.peek(0), Some('a'));
        assert_eq!(s.peek(1), Some('b'));
        assert_eq!(s.peek(2), None);
        assert_eq!(s.advance(), Some('a'));
        assert_eq!(s.advance(), Some('b'));
        assert_eq!(s.advance(), None);
        assert!(s.at_end());
    }

    #[test]
    fn test_position_tracking() {
        let mut s = Scanner::new("a\nb");
        s.advance();
        assert_eq!(s.position(), Position::new(1, 2, 1));
        s.advance();
        assert_eq!(s.position(), Position::new(2, 1, 2));
        s.advance();
        assert_eq!(s.position(), Position::new(2, 2, 3));
    }

    #[test]
    fn test_match_str_is_all_or_nothing() {
        let mut s = Scanner::new("->x");
        assert!(!s.match_str("->->"));
        assert_eq!(s.position().offset, 0);
        assert!(s.match_str("->"));
        assert_eq!(s.peek(0), Some('x'));
    }

    #[test]
    fn test_match_while() {
        let mut s = Scanner::new("abc123");
        assert_eq!(s.match_while(|c| c.is_ascii_alphabetic()), "abc");
        assert_eq!(s.match_while(|c| c.is_ascii_digit()), "123");
        assert!(s.at_end());
    }

    #[test]
    fn test_nested_marks() {
        let mut s = Scanner::new("abcdef");
        s.advance();
        s.mark();
        s.advance();
        s.mark();
        s.advance();
        s.reset_to_mark();
        assert_eq!(s.peek(0), Some('c'));
        s.reset_to_mark();
        assert_eq!(s.peek(0), Some('b'));
        assert_eq!(s.position(), Position::new(1, 2, 1));
    }

    #[test]
    fn test_pop_mark_keeps_cursor() {
        let mut s = Scanner::new("ab");
        s.mark();
        s.advance();
        s.pop_mark();
        assert_eq!(s.peek(0), Some('b'));
        s.reset_to_mark();
        assert_eq!(s.peek(0), Some('b'));
    }
}
