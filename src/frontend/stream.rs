//! Sequential/lookahead view over a finished token array
//!
//! The parser consumes tokens through this type; lookahead past the end is
//! clamped to the terminal EOF token so it can never run off the array.
#![allow(dead_code)]

use crate::frontend::token::{Token, TokenType};
use crate::utils::Position;
use thiserror::Error;

/// A `expect` mismatch, returned instead of thrown
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}: expected {expected}, found {found} at {position}")]
pub struct ExpectError {
    pub expected: TokenType,
    pub found: TokenType,
    pub position: Position,
    pub message: String,
}

pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    /// Wrap a finished token array. The lexer guarantees an EOF terminator;
    /// an empty array still gets one so lookahead stays total.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.is_empty() {
            tokens.push(Token::eof(Position::start()));
        }
        Self { tokens, cursor: 0 }
    }

    /// Token at cursor + offset, clamped to the final token
    pub fn peek(&self, offset: usize) -> &Token {
        let index = (self.cursor + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Return the current token and move forward, unless already at the end
    pub fn advance(&mut self) -> Token {
        let token = self.peek(0).clone();
        if self.cursor < self.tokens.len() - 1 {
            self.cursor += 1;
        }
        token
    }

    /// Consume and return the current token if it has the given type
    pub fn matches(&mut self, token_type: TokenType) -> Option<Token> {
        if self.check(token_type) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume and return the current token if it has any of the given types
    pub fn match_any(&mut self, token_types: &[TokenType]) -> Option<Token> {
        if self.check_any(token_types) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume a token of the given type or describe the mismatch
    pub fn expect(&mut self, token_type: TokenType, message: &str) -> Result<Token, ExpectError> {
        if self.check(token_type) {
            Ok(self.advance())
        } else {
            let found = self.peek(0);
            Err(ExpectError {
                expected: token_type,
                found: found.token_type,
                position: found.position,
                message: message.to_string(),
            })
        }
    }

    /// Non-consuming type test on the current token
    pub fn check(&self, token_type: TokenType) -> bool {
        self.peek(0).token_type == token_type
    }

    /// Non-consuming test against several types
    pub fn check_any(&self, token_types: &[TokenType]) -> bool {
        token_types.iter().any(|&t| self.check(t))
    }

    /// True exactly when the cursor sits on the EOF token
    pub fn at_end(&self) -> bool {
        self.peek(0).is_eof()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The underlying token array
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
