//! Lexical error collection and diagnostic rendering
//!
//! Errors are accumulated, never thrown: the lexer reports a failure here,
//! emits a placeholder token, and keeps scanning. Collection is bounded by
//! `max_errors` so pathological input cannot grow the list without limit.
#![allow(dead_code)]

use crate::utils::span::{Position, Span};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of lexical error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    UnexpectedCharacter,
    UnterminatedString,
    InvalidNumber,
    InvalidEscape,
    UnexpectedEof,
    InvalidVariable,
    TooManyErrors,
}

impl ErrorCode {
    /// Stable diagnostic code, shown in headers and machine output
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UnexpectedCharacter => "L0001",
            ErrorCode::UnterminatedString => "L0002",
            ErrorCode::InvalidNumber => "L0003",
            ErrorCode::InvalidEscape => "L0004",
            ErrorCode::UnexpectedEof => "L0005",
            ErrorCode::InvalidVariable => "L0006",
            ErrorCode::TooManyErrors => "L0007",
        }
    }

    /// Canonical message template; `{}` is replaced by the offending lexeme
    fn template(&self) -> &'static str {
        match self {
            ErrorCode::UnexpectedCharacter => "unexpected character `{}`",
            ErrorCode::UnterminatedString => "unterminated string literal",
            ErrorCode::InvalidNumber => "invalid number format `{}`",
            ErrorCode::InvalidEscape => "invalid escape sequence `{}`",
            ErrorCode::UnexpectedEof => "unexpected end of input",
            ErrorCode::InvalidVariable => "expected a variable name after `$`",
            ErrorCode::TooManyErrors => "too many errors, giving up",
        }
    }

    /// Fix-it suggestion attached to every error of this category
    fn suggestion(&self) -> Option<&'static str> {
        match self {
            ErrorCode::UnexpectedCharacter => {
                Some("remove this character or check for a typo")
            }
            ErrorCode::UnterminatedString => {
                Some("add a closing `\"` before the end of the line")
            }
            ErrorCode::InvalidNumber => Some("use digits like `42` or `3.14`"),
            ErrorCode::InvalidEscape => {
                Some("supported escapes are \\n, \\t, \\\\ and \\\"")
            }
            ErrorCode::InvalidVariable => {
                Some("variables look like `$name`, starting with a letter or `_`")
            }
            ErrorCode::UnexpectedEof | ErrorCode::TooManyErrors => None,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A structured lexical diagnostic; immutable once constructed
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{severity}[{code}]: {message} at {position}")]
pub struct LexerError {
    pub code: ErrorCode,
    pub message: String,
    pub severity: Severity,
    pub position: Position,
    pub end_position: Position,
    pub suggestion: Option<String>,
    pub lexeme: Option<String>,
}

impl LexerError {
    fn new(code: ErrorCode, span: Span, lexeme: Option<String>) -> Self {
        let message = match &lexeme {
            Some(text) => code.template().replace("{}", text),
            None => code.template().to_string(),
        };
        Self {
            code,
            message,
            severity: Severity::Error,
            position: span.start,
            end_position: span.end,
            suggestion: code.suggestion().map(str::to_string),
            lexeme,
        }
    }

    /// Span covered by this diagnostic
    pub fn span(&self) -> Span {
        Span::new(self.position, self.end_position)
    }
}

/// Default ceiling on collected errors
pub const DEFAULT_MAX_ERRORS: usize = 100;

/// Bounded, append-only accumulator of lexical diagnostics
#[derive(Debug, Clone)]
pub struct ErrorCollector {
    errors: Vec<LexerError>,
    max_errors: usize,
    limit_reached: bool,
    file_path: Option<String>,
}

impl ErrorCollector {
    pub fn new(max_errors: usize, file_path: Option<String>) -> Self {
        Self {
            errors: Vec::new(),
            max_errors,
            limit_reached: false,
            file_path,
        }
    }

    /// Record one error. Returns whether further collection is permitted;
    /// the call that hits the ceiling appends the sentinel and flips the flag.
    pub fn report(&mut self, code: ErrorCode, span: Span, lexeme: Option<String>) -> bool {
        if self.limit_reached {
            return false;
        }
        if self.errors.len() >= self.max_errors {
            log::debug!("error limit of {} reached, appending sentinel", self.max_errors);
            self.errors.push(LexerError::new(ErrorCode::TooManyErrors, span, None));
            self.limit_reached = true;
            return false;
        }
        log::debug!("lex error {} at {}", code, span.start);
        self.errors.push(LexerError::new(code, span, lexeme));
        true
    }

    /// True once the `max_errors` ceiling has been hit
    pub fn limit_reached(&self) -> bool {
        self.limit_reached
    }

    pub fn errors(&self) -> &[LexerError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Move the collected errors out, leaving the collector empty
    pub fn take(&mut self) -> Vec<LexerError> {
        std::mem::take(&mut self.errors)
    }

    /// Reset to the construction-time state
    pub fn reset(&mut self) {
        self.errors.clear();
        self.limit_reached = false;
    }

    /// Render one diagnostic with a source-line snippet and caret underline
    pub fn format(&self, error: &LexerError, source: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{}[{}]: {}\n",
            error.severity, error.code, error.message
        ));
        let file = self.file_path.as_deref().unwrap_or("<input>");
        out.push_str(&format!(
            " --> {}:{}:{}\n",
            file, error.position.line, error.position.column
        ));

        if let Some(line_text) = source.lines().nth(error.position.line as usize - 1) {
            let line_no = error.position.line.to_string();
            let gutter = " ".repeat(line_no.len());
            out.push_str(&format!("{} |\n", gutter));
            out.push_str(&format!("{} | {}\n", line_no, line_text));

            let pad = " ".repeat(error.position.column as usize - 1);
            let width = if error.end_position.line == error.position.line {
                (error.end_position.column.saturating_sub(error.position.column)).max(1)
            } else {
                1
            };
            out.push_str(&format!(
                "{} | {}{}\n",
                gutter,
                pad,
                "^".repeat(width as usize)
            ));
        }

        if let Some(suggestion) = &error.suggestion {
            out.push_str(&format!("  = help: {}\n", suggestion));
        }
        out
    }

    /// Render every collected diagnostic, in collection order
    pub fn format_all(&self, source: &str) -> String {
        self.errors
            .iter()
            .map(|e| self.format(e, source))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ERRORS, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_at(line: u32, column: u32, offset: usize, width: usize) -> Span {
        Span::new(
            Position::new(line, column, offset),
            Position::new(line, column + width as u32, offset + width),
        )
    }

    #[test]
    fn test_report_builds_message_from_template() {
        let mut collector = ErrorCollector::default();
        assert!(collector.report(
            ErrorCode::UnexpectedCharacter,
            span_at(1, 1, 0, 1),
            Some("?".to_string()),
        ));
        let err = &collector.errors()[0];
        assert_eq!(err.message, "unexpected character `?`");
        assert_eq!(err.code, ErrorCode::UnexpectedCharacter);
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_limit_appends_sentinel_once() {
        let mut collector = ErrorCollector::new(3, None);
        for i in 0..5 {
            collector.report(
                ErrorCode::UnexpectedCharacter,
                span_at(1, i + 1, i as usize, 1),
                Some("?".to_string()),
            );
        }
        assert_eq!(collector.len(), 4);
        assert!(collector.limit_reached());
        assert_eq!(collector.errors()[3].code, ErrorCode::TooManyErrors);
    }

    #[test]
    fn test_format_renders_snippet_and_caret() {
        let source = "let x = ?\n";
        let mut collector = ErrorCollector::new(10, Some("story.wsk".to_string()));
        collector.report(
            ErrorCode::UnexpectedCharacter,
            span_at(1, 9, 8, 1),
            Some("?".to_string()),
        );
        let rendered = collector.format(&collector.errors()[0], source);
        assert!(rendered.contains("error[L0001]"));
        assert!(rendered.contains("story.wsk:1:9"));
        assert!(rendered.contains("let x = ?"));
        assert!(rendered.contains("        ^"));
        assert!(rendered.contains("help:"));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut collector = ErrorCollector::new(1, None);
        collector.report(ErrorCode::UnexpectedEof, span_at(1, 1, 0, 0), None);
        collector.report(ErrorCode::UnexpectedEof, span_at(1, 1, 0, 0), None);
        assert!(collector.limit_reached());
        collector.reset();
        assert!(collector.is_empty());
        assert!(!collector.limit_reached());
    }
}
