//! Lexer for Whisker Script
//!
//! Converts source code into a stream of tokens. Block structure is
//! indentation-based: the lexer keeps a stack of open indentation widths and
//! synthesizes INDENT/DEDENT tokens at line starts, queueing bursts so that
//! each `next_token` call still returns exactly one token. Lexical failures
//! never abort the scan; they are recorded in the error collector and a
//! placeholder `Error` token keeps the stream well formed.
#![allow(dead_code)]

use std::collections::VecDeque;

use crate::frontend::scanner::Scanner;
use crate::frontend::stream::TokenStream;
use crate::frontend::token::{Literal, Token, TokenType};
use crate::utils::{ErrorCode, ErrorCollector, LexerError, Position, Span, DEFAULT_MAX_ERRORS};

/// Per-compilation-unit lexer options
#[derive(Debug, Clone)]
pub struct LexerOptions {
    /// Ceiling on collected diagnostics
    pub max_errors: usize,
    /// Source label used in rendered diagnostics
    pub file_path: Option<String>,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            max_errors: DEFAULT_MAX_ERRORS,
            file_path: None,
        }
    }
}

/// The lexer state
pub struct Lexer {
    scanner: Scanner,
    /// Full source text, kept for lexeme extraction and snippet rendering
    source: String,
    errors: ErrorCollector,
    /// Open indentation widths, strictly ascending, base always 0
    indent_stack: Vec<usize>,
    /// Tokens produced but not yet handed to the caller
    pending: VecDeque<Token>,
    at_line_start: bool,
    options: LexerOptions,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str, options: LexerOptions) -> Self {
        Self {
            scanner: Scanner::new(source),
            source: source.to_string(),
            errors: ErrorCollector::new(options.max_errors, options.file_path.clone()),
            indent_stack: vec![0],
            pending: VecDeque::new(),
            at_line_start: true,
            options,
        }
    }

    /// Tokenize the entire source into a stream; errors stay on the lexer
    pub fn tokenize(&mut self) -> TokenStream {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        log::debug!(
            "tokenized {} tokens, {} errors",
            tokens.len(),
            self.errors.len()
        );
        TokenStream::new(tokens)
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Token {
        if let Some(token) = self.pending.pop_front() {
            return token;
        }
        // Past the error cap there is no point scanning further; close out
        // the stream so the caller still gets a finite, EOF-terminated array.
        if self.errors.limit_reached() {
            return self.finish();
        }
        if self.at_line_start {
            self.handle_line_start();
            if let Some(token) = self.pending.pop_front() {
                return token;
            }
        }
        if self.scanner.at_end() {
            return self.finish();
        }
        // Inline whitespace between tokens carries no meaning
        self.scanner.match_while(|c| c == ' ' || c == '\t');
        if self.scanner.at_end() {
            return self.finish();
        }
        self.scan_token()
    }

    /// Diagnostics collected so far
    pub fn errors(&self) -> &[LexerError] {
        self.errors.errors()
    }

    /// True once the error ceiling was hit
    pub fn limit_reached(&self) -> bool {
        self.errors.limit_reached()
    }

    /// Move the collected diagnostics out of the lexer
    pub fn take_errors(&mut self) -> Vec<LexerError> {
        self.errors.take()
    }

    /// Render all collected diagnostics against the source text
    pub fn format_errors(&self) -> String {
        self.errors.format_all(&self.source)
    }

    /// Return the lexer to its construction-time state for reuse
    pub fn reset(&mut self) {
        self.scanner.reset();
        self.errors.reset();
        self.indent_stack.clear();
        self.indent_stack.push(0);
        self.pending.clear();
        self.at_line_start = true;
    }

    // ==================== Line structure ====================

    /// Handle indentation at the start of a line, queueing INDENT/DEDENT
    /// tokens. Blank lines are swallowed entirely; comment-only lines leave
    /// the indentation stack untouched.
    fn handle_line_start(&mut self) {
        loop {
            let mut width = 0usize;
            // Each tab counts as one unit, same as a single space
            while matches!(self.scanner.peek(0), Some(' ') | Some('\t')) {
                self.scanner.advance();
                width += 1;
            }
            match self.scanner.peek(0) {
                Some('\n') | Some('\r') => {
                    self.consume_line_break();
                    continue;
                }
                None => {
                    self.at_line_start = false;
                    return;
                }
                Some('#') => {
                    self.at_line_start = false;
                    return;
                }
                Some('/') if self.scanner.peek(1) == Some('/') => {
                    self.at_line_start = false;
                    return;
                }
                _ => {}
            }

            self.at_line_start = false;
            let pos = self.scanner.position();
            let top = self.indent_stack.last().copied().unwrap_or(0);
            if width > top {
                log::debug!("indent {} -> {} at {}", top, width, pos);
                self.indent_stack.push(width);
                self.pending
                    .push_back(Token::new(TokenType::Indent, "", None, pos));
            } else if width < top {
                // Pop every level above the new width. Landing on a width
                // that was never pushed is left for the parser to diagnose.
                while self.indent_stack.last().copied().unwrap_or(0) > width {
                    self.indent_stack.pop();
                    self.pending
                        .push_back(Token::new(TokenType::Dedent, "", None, pos));
                }
                log::debug!("dedent to {} at {}", width, pos);
            }
            return;
        }
    }

    /// Consume one line break, folding CRLF pairs
    fn consume_line_break(&mut self) {
        if self.scanner.match_char('\r') {
            self.scanner.match_char('\n');
        } else if self.scanner.match_char('\n') {
            self.scanner.match_char('\r');
        }
    }

    /// Queue any trailing DEDENTs plus the terminal EOF, then drain one
    fn finish(&mut self) -> Token {
        if self.pending.is_empty() {
            let pos = self.scanner.position();
            while self.indent_stack.last().copied().unwrap_or(0) > 0 {
                self.indent_stack.pop();
                self.pending
                    .push_back(Token::new(TokenType::Dedent, "", None, pos));
            }
            self.pending.push_back(Token::eof(pos));
        }
        self.pending
            .pop_front()
            .unwrap_or_else(|| Token::eof(self.scanner.position()))
    }

    // ==================== Token dispatch ====================

    fn scan_token(&mut self) -> Token {
        let start = self.scanner.position();
        let c = match self.scanner.peek(0) {
            Some(c) => c,
            None => return self.finish(),
        };

        match c {
            '\n' | '\r' => {
                self.consume_line_break();
                self.at_line_start = true;
                self.make_token(TokenType::Newline, start, None)
            }
            '/' if self.scanner.peek(1) == Some('/') => self.read_comment(start),
            '#' => self.read_comment(start),
            ':' => {
                self.scanner.advance();
                if self.scanner.match_char(':') {
                    self.make_token(TokenType::PassageDecl, start, None)
                } else {
                    self.make_token(TokenType::Colon, start, None)
                }
            }
            '-' => {
                // Longest match first: ->-> before -> before -=
                if self.scanner.match_str("->->") {
                    self.make_token(TokenType::Tunnel, start, None)
                } else if self.scanner.match_str("->") {
                    self.make_token(TokenType::Divert, start, None)
                } else {
                    self.scanner.advance();
                    if self.scanner.match_char('=') {
                        self.make_token(TokenType::MinusEqual, start, None)
                    } else {
                        self.make_token(TokenType::Minus, start, None)
                    }
                }
            }
            '<' => {
                self.scanner.advance();
                if self.scanner.match_char('-') {
                    self.make_token(TokenType::Thread, start, None)
                } else if self.scanner.match_char('=') {
                    self.make_token(TokenType::LessEqual, start, None)
                } else {
                    self.make_token(TokenType::Less, start, None)
                }
            }
            '>' => {
                self.scanner.advance();
                if self.scanner.match_char('>') {
                    self.make_token(TokenType::Include, start, None)
                } else if self.scanner.match_char('=') {
                    self.make_token(TokenType::GreaterEqual, start, None)
                } else {
                    self.make_token(TokenType::Greater, start, None)
                }
            }
            '@' => {
                if self.scanner.match_str("@@") {
                    self.make_token(TokenType::Metadata, start, None)
                } else {
                    self.scanner.advance();
                    self.error_token(ErrorCode::UnexpectedCharacter, start)
                }
            }
            '~' => {
                self.scanner.advance();
                self.make_token(TokenType::Assign, start, None)
            }
            '+' => {
                self.scanner.advance();
                if self.scanner.match_char('=') {
                    self.make_token(TokenType::PlusEqual, start, None)
                } else {
                    self.make_token(TokenType::Plus, start, None)
                }
            }
            '*' => {
                self.scanner.advance();
                if self.scanner.match_char('=') {
                    self.make_token(TokenType::StarEqual, start, None)
                } else {
                    self.make_token(TokenType::Star, start, None)
                }
            }
            '/' => {
                self.scanner.advance();
                if self.scanner.match_char('=') {
                    self.make_token(TokenType::SlashEqual, start, None)
                } else {
                    self.make_token(TokenType::Slash, start, None)
                }
            }
            '%' => {
                self.scanner.advance();
                self.make_token(TokenType::Percent, start, None)
            }
            '=' => {
                self.scanner.advance();
                if self.scanner.match_char('=') {
                    self.make_token(TokenType::EqualEqual, start, None)
                } else {
                    self.make_token(TokenType::Equal, start, None)
                }
            }
            '!' => {
                self.scanner.advance();
                if self.scanner.match_char('=') {
                    self.make_token(TokenType::NotEqual, start, None)
                } else {
                    self.make_token(TokenType::Bang, start, None)
                }
            }
            '"' => self.read_string(start),
            '$' => self.read_variable(start),
            c if c.is_ascii_alphabetic() || c == '_' => self.read_identifier(start),
            c if c.is_ascii_digit() => self.read_number(start),
            c => {
                if let Some(tt) = TokenType::punctuation(c) {
                    self.scanner.advance();
                    self.make_token(tt, start, None)
                } else {
                    // Consume exactly one character so the scan can continue
                    self.scanner.advance();
                    self.error_token(ErrorCode::UnexpectedCharacter, start)
                }
            }
        }
    }

    /// Read a `//` or `#` comment up to (not including) the line break
    fn read_comment(&mut self, start: Position) -> Token {
        self.scanner
            .match_while(|c| c != '\n' && c != '\r');
        self.make_token(TokenType::Comment, start, None)
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self, start: Position) -> Token {
        let name = self
            .scanner
            .match_while(|c| c.is_ascii_alphanumeric() || c == '_');
        match TokenType::keyword_from_str(&name) {
            Some(keyword) => self.make_token(keyword, start, None),
            None => self.make_token(TokenType::Identifier, start, Some(Literal::Text(name))),
        }
    }

    /// Read a number literal: integer digits, optionally `.` and a fraction
    fn read_number(&mut self, start: Position) -> Token {
        self.scanner.match_while(|c| c.is_ascii_digit());
        if self.scanner.peek(0) == Some('.')
            && self.scanner.peek(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.scanner.advance();
            self.scanner.match_while(|c| c.is_ascii_digit());
        }

        // Digits running straight into a name is a malformed number, not two
        // tokens; consume the whole run so recovery resumes cleanly after it.
        if self
            .scanner
            .peek(0)
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.scanner
                .match_while(|c| c.is_ascii_alphanumeric() || c == '_');
            return self.error_token(ErrorCode::InvalidNumber, start);
        }

        let text = self.lexeme_from(start);
        match text.parse::<f64>() {
            Ok(value) => self.make_token(TokenType::Number, start, Some(Literal::Number(value))),
            Err(_) => self.error_token(ErrorCode::InvalidNumber, start),
        }
    }

    /// Read a string literal, decoding `\n`, `\t`, `\\` and `\"` escapes.
    /// A raw line break or end of input before the closing quote is an
    /// unterminated-string error; the line break itself is left unconsumed.
    fn read_string(&mut self, start: Position) -> Token {
        self.scanner.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.scanner.peek(0) {
                None => {
                    return self.error_token(ErrorCode::UnterminatedString, start);
                }
                Some('\n') | Some('\r') => {
                    return self.error_token(ErrorCode::UnterminatedString, start);
                }
                Some('"') => {
                    self.scanner.advance();
                    return self.make_token(TokenType::String, start, Some(Literal::Text(value)));
                }
                Some('\\') => {
                    let escape_start = self.scanner.position();
                    self.scanner.advance();
                    match self.scanner.peek(0) {
                        Some('n') => {
                            value.push('\n');
                            self.scanner.advance();
                        }
                        Some('t') => {
                            value.push('\t');
                            self.scanner.advance();
                        }
                        Some('\\') => {
                            value.push('\\');
                            self.scanner.advance();
                        }
                        Some('"') => {
                            value.push('"');
                            self.scanner.advance();
                        }
                        Some(other) => {
                            // Unknown escape: diagnose, keep the character
                            // verbatim, and keep scanning the string
                            self.scanner.advance();
                            let span = Span::new(escape_start, self.scanner.position());
                            self.errors.report(
                                ErrorCode::InvalidEscape,
                                span,
                                Some(format!("\\{}", other)),
                            );
                            value.push(other);
                        }
                        None => {
                            let span = Span::new(escape_start, self.scanner.position());
                            self.errors.report(ErrorCode::UnexpectedEof, span, None);
                            return self.error_token(ErrorCode::UnterminatedString, start);
                        }
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.scanner.advance();
                }
            }
        }
    }

    /// Read a `$name` variable reference; the literal is the bare name
    fn read_variable(&mut self, start: Position) -> Token {
        self.scanner.advance(); // `$`
        if !self
            .scanner
            .peek(0)
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        {
            return self.error_token(ErrorCode::InvalidVariable, start);
        }
        let name = self
            .scanner
            .match_while(|c| c.is_ascii_alphanumeric() || c == '_');
        self.make_token(TokenType::Variable, start, Some(Literal::Text(name)))
    }

    // ==================== Construction helpers ====================

    /// Exact source text from `start` to the current cursor
    fn lexeme_from(&self, start: Position) -> String {
        let end = self.scanner.position().offset;
        self.source[start.offset..end].to_string()
    }

    fn make_token(&self, token_type: TokenType, start: Position, literal: Option<Literal>) -> Token {
        Token::new(token_type, self.lexeme_from(start), literal, start)
    }

    /// Record a diagnostic and produce the placeholder token for it
    fn error_token(&mut self, code: ErrorCode, start: Position) -> Token {
        let lexeme = self.lexeme_from(start);
        let span = Span::new(start, self.scanner.position());
        self.errors.report(code, span, Some(lexeme.clone()));
        Token::new(TokenType::Error, lexeme, None, start)
    }
}
