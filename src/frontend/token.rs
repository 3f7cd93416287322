//! Token definitions for Whisker Script
#![allow(dead_code)]

use crate::utils::Position;
use serde::{Deserialize, Serialize};

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    /// The exact source text this token was produced from
    pub lexeme: String,
    /// Decoded value for number, string, identifier and variable tokens
    pub literal: Option<Literal>,
    pub position: Position,
}

impl Token {
    pub fn new(
        token_type: TokenType,
        lexeme: impl Into<String>,
        literal: Option<Literal>,
        position: Position,
    ) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            literal,
            position,
        }
    }

    pub fn eof(position: Position) -> Self {
        Self::new(TokenType::Eof, "", None, position)
    }

    pub fn is_eof(&self) -> bool {
        self.token_type == TokenType::Eof
    }

    /// Numeric literal value, if this is a number token
    pub fn number(&self) -> Option<f64> {
        match self.literal {
            Some(Literal::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Text literal value, if this token carries one
    pub fn text(&self) -> Option<&str> {
        match &self.literal {
            Some(Literal::Text(s)) => Some(s),
            _ => None,
        }
    }
}

/// Decoded literal payload of a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Number(f64),
    Text(String),
}

/// Token types
///
/// A closed enumeration: the parser can rely on every lexeme mapping to
/// exactly one of these, including the `Error` placeholder emitted on
/// recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    // ============ Layout ============
    /// End of file
    Eof,
    /// Line break
    Newline,
    /// Start of an indented block
    Indent,
    /// End of an indented block
    Dedent,
    /// `//` or `#` line comment
    Comment,

    // ============ Literals ============
    /// Identifier (passage name, macro name, etc.)
    Identifier,
    /// Numeric literal
    Number,
    /// `"..."` string literal
    String,
    /// `$name` variable reference
    Variable,
    /// Placeholder emitted where a lexical error was recovered
    Error,

    // ============ Keywords ============
    If,
    Elseif,
    Else,
    While,
    For,
    In,
    And,
    Or,
    Not,
    True,
    False,
    Nil,
    Function,
    Return,
    End,
    Local,

    // ============ Structural ============
    /// `::` passage declaration
    PassageDecl,
    /// `->` divert
    Divert,
    /// `->->` tunnel
    Tunnel,
    /// `<-` thread
    Thread,
    /// `@@` metadata
    Metadata,
    /// `>>` include
    Include,

    // ============ Operators ============
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `~` assignment
    Assign,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `!=`
    NotEqual,
    /// `!`
    Bang,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `+=`
    PlusEqual,
    /// `-=`
    MinusEqual,
    /// `*=`
    StarEqual,
    /// `/=`
    SlashEqual,

    // ============ Punctuation ============
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `|`
    Pipe,
    /// `.`
    Dot,
    /// `:`
    Colon,
}

impl TokenType {
    /// Try to convert an identifier to a keyword
    pub fn keyword_from_str(s: &str) -> Option<TokenType> {
        match s {
            "if" => Some(TokenType::If),
            "elseif" => Some(TokenType::Elseif),
            "else" => Some(TokenType::Else),
            "while" => Some(TokenType::While),
            "for" => Some(TokenType::For),
            "in" => Some(TokenType::In),
            "and" => Some(TokenType::And),
            "or" => Some(TokenType::Or),
            "not" => Some(TokenType::Not),
            "true" => Some(TokenType::True),
            "false" => Some(TokenType::False),
            "nil" => Some(TokenType::Nil),
            "function" => Some(TokenType::Function),
            "return" => Some(TokenType::Return),
            "end" => Some(TokenType::End),
            "local" => Some(TokenType::Local),
            _ => None,
        }
    }

    /// Check if this token type is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenType::If
                | TokenType::Elseif
                | TokenType::Else
                | TokenType::While
                | TokenType::For
                | TokenType::In
                | TokenType::And
                | TokenType::Or
                | TokenType::Not
                | TokenType::True
                | TokenType::False
                | TokenType::Nil
                | TokenType::Function
                | TokenType::Return
                | TokenType::End
                | TokenType::Local
        )
    }

    /// Single-character punctuation table
    pub fn punctuation(c: char) -> Option<TokenType> {
        match c {
            '{' => Some(TokenType::LBrace),
            '}' => Some(TokenType::RBrace),
            '[' => Some(TokenType::LBracket),
            ']' => Some(TokenType::RBracket),
            '(' => Some(TokenType::LParen),
            ')' => Some(TokenType::RParen),
            ',' => Some(TokenType::Comma),
            '|' => Some(TokenType::Pipe),
            '.' => Some(TokenType::Dot),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TokenType::Eof => "end of file",
            TokenType::Newline => "newline",
            TokenType::Indent => "indent",
            TokenType::Dedent => "dedent",
            TokenType::Comment => "comment",
            TokenType::Identifier => "identifier",
            TokenType::Number => "number",
            TokenType::String => "string",
            TokenType::Variable => "variable",
            TokenType::Error => "error",
            TokenType::If => "`if`",
            TokenType::Elseif => "`elseif`",
            TokenType::Else => "`else`",
            TokenType::While => "`while`",
            TokenType::For => "`for`",
            TokenType::In => "`in`",
            TokenType::And => "`and`",
            TokenType::Or => "`or`",
            TokenType::Not => "`not`",
            TokenType::True => "`true`",
            TokenType::False => "`false`",
            TokenType::Nil => "`nil`",
            TokenType::Function => "`function`",
            TokenType::Return => "`return`",
            TokenType::End => "`end`",
            TokenType::Local => "`local`",
            TokenType::PassageDecl => "`::`",
            TokenType::Divert => "`->`",
            TokenType::Tunnel => "`->->`",
            TokenType::Thread => "`<-`",
            TokenType::Metadata => "`@@`",
            TokenType::Include => "`>>`",
            TokenType::Plus => "`+`",
            TokenType::Minus => "`-`",
            TokenType::Star => "`*`",
            TokenType::Slash => "`/`",
            TokenType::Percent => "`%`",
            TokenType::Assign => "`~`",
            TokenType::Equal => "`=`",
            TokenType::EqualEqual => "`==`",
            TokenType::NotEqual => "`!=`",
            TokenType::Bang => "`!`",
            TokenType::Less => "`<`",
            TokenType::LessEqual => "`<=`",
            TokenType::Greater => "`>`",
            TokenType::GreaterEqual => "`>=`",
            TokenType::PlusEqual => "`+=`",
            TokenType::MinusEqual => "`-=`",
            TokenType::StarEqual => "`*=`",
            TokenType::SlashEqual => "`/=`",
            TokenType::LBrace => "`{`",
            TokenType::RBrace => "`}`",
            TokenType::LBracket => "`[`",
            TokenType::RBracket => "`]`",
            TokenType::LParen => "`(`",
            TokenType::RParen => "`)`",
            TokenType::Comma => "`,`",
            TokenType::Pipe => "`|`",
            TokenType::Dot => "`.`",
            TokenType::Colon => "`:`",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenType::keyword_from_str("if"), Some(TokenType::If));
        assert_eq!(TokenType::keyword_from_str("elseif"), Some(TokenType::Elseif));
        assert_eq!(TokenType::keyword_from_str("gold"), None);
        assert!(TokenType::If.is_keyword());
        assert!(!TokenType::Identifier.is_keyword());
    }

    #[test]
    fn test_punctuation_table() {
        assert_eq!(TokenType::punctuation('{'), Some(TokenType::LBrace));
        assert_eq!(TokenType::punctuation('|'), Some(TokenType::Pipe));
        assert_eq!(TokenType::punctuation(';'), None);
    }

    #[test]
    fn test_literal_accessors() {
        let tok = Token::new(
            TokenType::Number,
            "42",
            Some(Literal::Number(42.0)),
            Position::start(),
        );
        assert_eq!(tok.number(), Some(42.0));
        assert_eq!(tok.text(), None);
    }
}
