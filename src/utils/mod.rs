//! Utility module

mod error;
mod span;

pub use error::{ErrorCode, ErrorCollector, LexerError, Severity, DEFAULT_MAX_ERRORS};
pub use span::{Position, Span};
