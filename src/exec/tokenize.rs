// src/exec/tokenize.rs

//! Quote-aware command-line tokenizer.
//!
//! Rules:
//! - unquoted whitespace separates tokens;
//! - `"..."` groups text, `""` inside it is a literal `"`;
//! - `'...'` groups text verbatim, `''` inside it is a literal `'`;
//! - a backtick outside single quotes takes the next character literally;
//! - backslashes are ordinary characters, so `C:\Program Files\...` needs no
//!   escaping;
//! - an unquoted `;` ends the command line, the rest is a comment;
//! - adjoining quoted and unquoted text forms a single token.
//!
//! An unclosed quote is an error rather than being consumed verbatim.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

const ESCAPE: char = '`';
const COMMENT: char = ';';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("command line is empty once comments are stripped")]
    Empty,

    #[error("unterminated {quote} quote opened at byte {offset}")]
    UnterminatedQuote { quote: char, offset: usize },
}

/// A tokenized command line: program path plus verbatim arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn parse(raw: &str) -> Result<Self, TokenizeError> {
        let mut tokens = tokenize(raw)?.into_iter();
        let program = tokens.next().ok_or(TokenizeError::Empty)?;
        Ok(Self {
            program,
            args: tokens.collect(),
        })
    }
}

/// Renders a command line that [`CommandLine::parse`] reads back to the same
/// value. Tokens that need it are wrapped in single quotes.
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_token(f, &self.program)?;
        for arg in &self.args {
            f.write_str(" ")?;
            write_token(f, arg)?;
        }
        Ok(())
    }
}

fn write_token(f: &mut fmt::Formatter<'_>, token: &str) -> fmt::Result {
    let needs_quotes = token.is_empty()
        || token
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | ESCAPE | COMMENT));

    if needs_quotes {
        write!(f, "'{}'", token.replace('\'', "''"))
    } else {
        f.write_str(token)
    }
}

/// Split `raw` into tokens. Fails if nothing is left or a quote is unclosed.
pub fn tokenize(raw: &str) -> Result<Vec<String>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // Tracks whether a token has started, so `""` still yields an argument.
    let mut in_token = false;
    let mut chars = raw.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            COMMENT => break,
            ESCAPE => {
                in_token = true;
                match chars.next() {
                    Some((_, escaped)) => current.push(escaped),
                    None => current.push(ESCAPE),
                }
            }
            '"' | '\'' => {
                in_token = true;
                read_quoted(&mut chars, ch, offset, &mut current)?;
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    if tokens.is_empty() {
        return Err(TokenizeError::Empty);
    }
    Ok(tokens)
}

/// Consume a quoted segment whose opening `quote` sat at `offset`.
fn read_quoted(
    chars: &mut Peekable<CharIndices<'_>>,
    quote: char,
    offset: usize,
    out: &mut String,
) -> Result<(), TokenizeError> {
    while let Some((_, ch)) = chars.next() {
        if ch == quote {
            if chars.next_if(|&(_, next)| next == quote).is_some() {
                out.push(quote);
                continue;
            }
            return Ok(());
        }

        if ch == ESCAPE && quote == '"' {
            match chars.next() {
                Some((_, escaped)) => {
                    out.push(escaped);
                    continue;
                }
                None => break,
            }
        }

        out.push(ch);
    }

    Err(TokenizeError::UnterminatedQuote { quote, offset })
}
