//! Frontend module - Scanner, Lexer, Token Stream

pub mod lexer;
pub mod scanner;
pub mod stream;
pub mod token;
