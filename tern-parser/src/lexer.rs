//! Hand written scanner.
//!
//! Punctuators are resolved with maximal munch by peeking one or two
//! characters ahead. Trivia (spaces, newlines, comments) is emitted as tokens,
//! the parser decides where it is irrelevant.

use crate::token::{Token, TokenKind};
use tern_source::{is_line_terminator, LexError, Source};

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

pub fn is_identifier_continue(c: char) -> bool {
    is_identifier_start(c) || is_digit(c)
}

/// Space, TAB, VT, FF, NO-BREAK SPACE and ZERO WIDTH NO-BREAK SPACE.
pub fn is_space(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | '\u{FEFF}'
    )
}

pub struct Lexer<'a> {
    source: &'a Source<'a>,
    /// Byte offset of the first character of the current lexeme.
    start: usize,
    /// Byte offset of the next character.
    current: usize,
    line: usize,
    col: usize,
    start_line: usize,
    start_col: usize,
    /// Set once the iterator has yielded `Eof` or an error.
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            col: 1,
            start_line: 1,
            start_col: 1,
            finished: false,
        }
    }

    /// Scans the next token. Once the input is exhausted, every call returns an
    /// `Eof` token positioned after the last character.
    pub fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        self.start = self.current;
        self.start_line = self.line;
        self.start_col = self.col;

        let c = match self.advance() {
            Some(c) => c,
            None => return Ok(self.create_token(TokenKind::Eof)),
        };

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '&' => {
                if self.eat('&') {
                    if self.eat('=') {
                        TokenKind::AndAndEqual
                    } else {
                        TokenKind::AndAnd
                    }
                } else if self.eat('=') {
                    TokenKind::AndEqual
                } else {
                    TokenKind::And
                }
            }
            '!' => {
                if self.eat('=') {
                    if self.eat('=') {
                        TokenKind::BangEqualEqual
                    } else {
                        TokenKind::BangEqual
                    }
                } else {
                    TokenKind::Bang
                }
            }
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '.' => {
                if self.peek() == Some('.') && self.peek_next() == Some('.') {
                    self.advance();
                    self.advance();
                    TokenKind::DotDotDot
                } else {
                    TokenKind::Dot
                }
            }
            '=' => {
                if self.eat('=') {
                    if self.eat('=') {
                        TokenKind::EqualEqualEqual
                    } else {
                        TokenKind::EqualEqual
                    }
                } else {
                    TokenKind::Equal
                }
            }
            '>' => {
                if self.eat('=') {
                    TokenKind::GreaterEqual
                } else if self.eat('>') {
                    if self.eat('=') {
                        TokenKind::GreaterGreaterEqual
                    } else if self.eat('>') {
                        if self.eat('=') {
                            TokenKind::GreaterGreaterGreaterEqual
                        } else {
                            TokenKind::GreaterGreaterGreater
                        }
                    } else {
                        TokenKind::GreaterGreater
                    }
                } else {
                    TokenKind::Greater
                }
            }
            '#' => {
                if self.eat('!') {
                    self.skip_to_line_end();
                    return Ok(self.create_token_with_literal(
                        TokenKind::HashBang,
                        &self.source.content[self.start + 2..self.current],
                    ));
                } else {
                    TokenKind::Hash
                }
            }
            '^' => {
                if self.eat('=') {
                    TokenKind::HatEqual
                } else {
                    TokenKind::Hat
                }
            }
            '<' => {
                if self.eat('=') {
                    TokenKind::LessEqual
                } else if self.eat('<') {
                    if self.eat('=') {
                        TokenKind::LessLessEqual
                    } else {
                        TokenKind::LessLess
                    }
                } else {
                    TokenKind::Less
                }
            }
            '-' => {
                if self.eat('-') {
                    TokenKind::MinusMinus
                } else if self.eat('=') {
                    TokenKind::MinusEqual
                } else {
                    TokenKind::Minus
                }
            }
            '%' => {
                if self.eat('=') {
                    TokenKind::PercentEqual
                } else {
                    TokenKind::Percent
                }
            }
            '|' => {
                if self.eat('|') {
                    if self.eat('=') {
                        TokenKind::PipePipeEqual
                    } else {
                        TokenKind::PipePipe
                    }
                } else if self.eat('=') {
                    TokenKind::PipeEqual
                } else {
                    TokenKind::Pipe
                }
            }
            '+' => {
                if self.eat('+') {
                    TokenKind::PlusPlus
                } else if self.eat('=') {
                    TokenKind::PlusEqual
                } else {
                    TokenKind::Plus
                }
            }
            '?' => {
                if self.eat('?') {
                    if self.eat('=') {
                        TokenKind::QuestionQuestionEqual
                    } else {
                        TokenKind::QuestionQuestion
                    }
                } else if self.eat('.') {
                    TokenKind::QuestionDot
                } else {
                    TokenKind::Question
                }
            }
            ';' => TokenKind::Semicolon,
            '/' => {
                if self.eat('/') {
                    self.skip_to_line_end();
                    TokenKind::SingleLineComment
                } else if self.eat('*') {
                    self.lex_multi_line_comment()?
                } else if self.eat('=') {
                    TokenKind::SlashEqual
                } else {
                    TokenKind::Slash
                }
            }
            '*' => {
                if self.eat('*') {
                    if self.eat('=') {
                        TokenKind::StarStarEqual
                    } else {
                        TokenKind::StarStar
                    }
                } else if self.eat('=') {
                    TokenKind::StarEqual
                } else {
                    TokenKind::Star
                }
            }
            '~' => TokenKind::Tilde,
            '"' | '\'' | '`' => return self.lex_string(c),
            _ if is_line_terminator(c) => {
                if c == '\r' {
                    self.eat('\n');
                }
                let token = self.create_token(TokenKind::Newline);
                self.new_line();
                return Ok(token);
            }
            _ if is_space(c) => {
                while self.peek().map_or(false, is_space) {
                    self.advance();
                }
                TokenKind::Space
            }
            _ if is_digit(c) => self.lex_number()?,
            _ if is_identifier_start(c) => self.lex_identifier(),
            _ => return Err(self.error_at(self.start_line, self.start_col)),
        };

        Ok(self.create_token(kind))
    }

    fn lex_number(&mut self) -> Result<TokenKind, LexError> {
        while self.peek().map_or(false, is_digit) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().map_or(false, is_digit) {
            self.advance(); // the '.'
            while self.peek().map_or(false, is_digit) {
                self.advance();
            }
        }

        // `3in` and friends
        if self.peek().map_or(false, is_identifier_start) {
            return Err(self.error_at(self.line, self.col));
        }

        Ok(TokenKind::Number)
    }

    fn lex_identifier(&mut self) -> TokenKind {
        while self.peek().map_or(false, is_identifier_continue) {
            self.advance();
        }

        let lexeme = &self.source.content[self.start..self.current];
        TokenKind::from_keyword_str(lexeme).unwrap_or(TokenKind::Identifier)
    }

    fn lex_string(&mut self, quote: char) -> Result<Token<'a>, LexError> {
        loop {
            match self.peek() {
                None => return Err(self.error_at(self.start_line, self.start_col)),
                Some(c) if is_line_terminator(c) => {
                    return Err(self.error_at(self.start_line, self.start_col))
                }
                Some('\\') => {
                    self.advance();
                    // the escaped character is taken verbatim
                    match self.advance() {
                        None => return Err(self.error_at(self.start_line, self.start_col)),
                        Some(c) if is_line_terminator(c) => {
                            if c == '\r' {
                                self.eat('\n');
                            }
                            self.new_line();
                        }
                        Some(_) => {}
                    }
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        // quotes are single byte characters
        let body = &self.source.content[self.start + 1..self.current - 1];
        Ok(self.create_token_with_literal(TokenKind::String, body))
    }

    /// Called after the opening `/*` has been consumed.
    fn lex_multi_line_comment(&mut self) -> Result<TokenKind, LexError> {
        loop {
            match self.advance() {
                None => return Err(self.error_at(self.start_line, self.start_col)),
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return Ok(TokenKind::MultiLineComment);
                }
                Some(c) if is_line_terminator(c) => {
                    if c == '\r' {
                        self.eat('\n');
                    }
                    self.new_line();
                }
                Some(_) => {}
            }
        }
    }

    /// Consumes everything up to, but not including, the next line terminator.
    fn skip_to_line_end(&mut self) {
        while self.peek().map_or(false, |c| !is_line_terminator(c)) {
            self.advance();
        }
    }
}

/// Scan utilities
impl<'a> Lexer<'a> {
    fn peek(&self) -> Option<char> {
        self.source.content[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.source.content[self.current..].chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        self.col += 1;
        Some(c)
    }

    /// Consumes the next character if it is `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn new_line(&mut self) {
        self.line += 1;
        self.col = 1;
    }

    fn create_token(&self, kind: TokenKind) -> Token<'a> {
        let lexeme = &self.source.content[self.start..self.current];
        self.create_token_with_literal(kind, lexeme)
    }

    fn create_token_with_literal(&self, kind: TokenKind, literal: &'a str) -> Token<'a> {
        Token {
            kind,
            lexeme: &self.source.content[self.start..self.current],
            literal,
            line: self.start_line,
            col: self.start_col,
        }
    }

    fn error_at(&self, line: usize, col: usize) -> LexError {
        LexError::new(self.source.line_text(line), line, col)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    /// Yields every token up to and including `Eof`, or the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = !matches!(token, Ok(Token { kind, .. }) if kind != TokenKind::Eof);
        Some(token)
    }
}

/// Scans the whole `source` eagerly. The last token is always `Eof`.
pub fn tokenize<'a>(source: &'a Source<'a>) -> Result<Vec<Token<'a>>, LexError> {
    Lexer::new(source).collect()
}
