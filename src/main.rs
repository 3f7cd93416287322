//! Whisker Script tokenizer CLI
//!
//! Host driver for the lexer front end: reads a story file, tokenizes it,
//! and prints tokens and/or diagnostics.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::process;

use whisker_lang::{Lexer, LexerOptions, TokenType};

/// Whisker Script tokenizer
#[derive(Parser, Debug)]
#[command(name = "whiskerc")]
#[command(version = "0.1.0")]
#[command(about = "Tokenizer for the Whisker interactive fiction language")]
struct Cli {
    /// Input source file (.wsk)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print one token per line
    #[arg(long)]
    dump_tokens: bool,

    /// Emit tokens and diagnostics as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Maximum number of diagnostics to collect
    #[arg(long, default_value_t = whisker_lang::utils::DEFAULT_MAX_ERRORS)]
    max_errors: usize,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(had_errors) => {
            if had_errors {
                process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("error: {:#}", err);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    log::info!("tokenizing {}", cli.input.display());

    let options = LexerOptions {
        max_errors: cli.max_errors,
        file_path: Some(cli.input.display().to_string()),
    };
    let mut lexer = Lexer::new(&source, options);
    let stream = lexer.tokenize();

    if cli.json {
        let payload = json!({
            "tokens": stream.tokens(),
            "errors": lexer.errors(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if cli.dump_tokens {
        for token in stream.tokens() {
            if token.token_type == TokenType::Eof {
                println!("{:>4}:{:<3} eof", token.position.line, token.position.column);
            } else {
                println!(
                    "{:>4}:{:<3} {:?} {:?}",
                    token.position.line,
                    token.position.column,
                    token.token_type,
                    token.lexeme
                );
            }
        }
    }

    let had_errors = !lexer.errors().is_empty();
    if had_errors && !cli.json {
        eprint!("{}", lexer.format_errors());
        eprintln!(
            "{} error{} found",
            lexer.errors().len(),
            if lexer.errors().len() == 1 { "" } else { "s" }
        );
    }
    Ok(had_errors)
}
