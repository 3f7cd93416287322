//! Whisker Script compiler front end
//!
//! Tokenizes Whisker Script source into an EOF-terminated token stream plus
//! a bounded list of structured diagnostics. Tokenization is a pure function
//! of the source text and options; it never aborts on malformed input.
//!
//! ```
//! use whisker_lang::{Lexer, LexerOptions, TokenType};
//!
//! let mut lexer = Lexer::new("::Start\n-> Cellar\n", LexerOptions::default());
//! let stream = lexer.tokenize();
//! assert_eq!(stream.peek(0).token_type, TokenType::PassageDecl);
//! assert!(lexer.errors().is_empty());
//! ```

pub mod frontend;
pub mod utils;

pub use frontend::lexer::{Lexer, LexerOptions};
pub use frontend::scanner::Scanner;
pub use frontend::stream::{ExpectError, TokenStream};
pub use frontend::token::{Literal, Token, TokenType};
pub use utils::{ErrorCode, ErrorCollector, LexerError, Position, Severity, Span};
