//! Source code representation and error management.

use thiserror::Error;

/// Represents source code.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    /// Returns the text of the 1-based `line`, without its terminator.
    /// Returns an empty string if the source has fewer lines.
    pub fn line_text(&self, line: usize) -> &'a str {
        let mut current_line = 1;
        let mut line_start = 0;
        let mut chars = self.content.char_indices().peekable();

        while let Some((index, c)) = chars.next() {
            if !is_line_terminator(c) {
                continue;
            }
            if current_line == line {
                return &self.content[line_start..index];
            }

            let mut next_start = index + c.len_utf8();
            if c == '\r' {
                if let Some(&(_, '\n')) = chars.peek() {
                    chars.next();
                    next_start += 1;
                }
            }
            line_start = next_start;
            current_line += 1;
        }

        if current_line == line {
            &self.content[line_start..]
        } else {
            ""
        }
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// LF, CR, LINE SEPARATOR and PARAGRAPH SEPARATOR.
/// CR LF counts as a single terminator, callers handle the pairing.
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn caret_indent(col: &usize) -> String {
    " ".repeat(col.saturating_sub(1))
}

/// A lexical error: the scanner met a character it cannot classify.
/// Rendering prints the offending line and a caret under the column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{line_text}\n{}^\nUncaught SyntaxError: Invalid or unexpected token",
    caret_indent(.col)
)]
pub struct LexError {
    /// Full text of the line holding the offending character.
    pub line_text: String,
    pub line: usize,
    pub col: usize,
}

impl LexError {
    pub fn new(line_text: impl ToString, line: usize, col: usize) -> Self {
        Self {
            line_text: line_text.to_string(),
            line,
            col,
        }
    }
}

/// Represents a syntax error (unexpected token while parsing).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("SyntaxError: unexpected token {token}")]
pub struct SyntaxError {
    /// The offending token's literal, or `end of input`.
    pub token: String,
    pub line: usize,
    pub col: usize,
}

impl SyntaxError {
    /// Create a new syntax error for `token` found at `line`:`col`.
    pub fn new(token: impl ToString, line: usize, col: usize) -> Self {
        Self {
            token: token.to_string(),
            line,
            col,
        }
    }
}

/// Any error that aborts parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    /// 1-based line and column of the error.
    pub fn position(&self) -> (usize, usize) {
        match self {
            ParseError::Lex(err) => (err.line, err.col),
            ParseError::Syntax(err) => (err.line, err.col),
        }
    }
}
