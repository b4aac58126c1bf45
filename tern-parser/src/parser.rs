use crate::ast::{Expr, Program};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use tern_source::{is_line_terminator, LexError, ParseError, Source};
use tracing::trace;

mod expr;
mod stmt;

pub struct Parser<'a> {
    /// Cached token for peeking. Never trivia.
    current_token: Token<'a>,
    lexer: Lexer<'a>,
    /// The last line break skipped before `current_token`, if any.
    line_break: Option<Token<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a Source<'a>) -> Result<Self, LexError> {
        let mut parser = Self {
            current_token: Token {
                kind: TokenKind::Eof,
                lexeme: "",
                literal: "",
                line: 1,
                col: 1,
            },
            lexer: Lexer::new(source),
            line_break: None,
        };
        parser.next()?;
        Ok(parser)
    }
}

impl<'a> Parser<'a> {
    /// Parses statements until the end of input.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut body = Vec::new();
        while self.current_token.kind != TokenKind::Eof {
            let stmt = self.parse_stmt()?;
            trace!(%stmt, "parsed statement");
            body.push(stmt);
        }
        Ok(Program { body })
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    /// Advances to the next significant token and returns the previous one.
    /// Trivia is skipped, line breaks are remembered in `line_break`.
    fn next(&mut self) -> Result<Token<'a>, LexError> {
        let prev = self.current_token;
        self.line_break = None;
        loop {
            let token = self.lexer.next_token()?;
            match token.kind {
                TokenKind::Newline => self.line_break = Some(token),
                TokenKind::MultiLineComment if token.lexeme.contains(is_line_terminator) => {
                    self.line_break = Some(token)
                }
                kind if kind.is_trivia() => {}
                _ => {
                    self.current_token = token;
                    return Ok(prev);
                }
            }
        }
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    /// Predicate that tests whether the current token has the specified kind and eats it if yes as a side effect.
    fn eat(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.at(kind) {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, ParseError> {
        if self.at(kind) {
            Ok(self.next()?)
        } else {
            self.unexpected()
        }
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        Ok(self.expect(TokenKind::Identifier)?.lexeme.to_string())
    }

    /// Ends a statement. The `;` is optional.
    fn consume_semicolon(&mut self) -> Result<(), ParseError> {
        self.eat(TokenKind::Semicolon)?;
        Ok(())
    }

    /// Returns `true` if an operand may follow on the same line (`return x`, `break label`).
    fn has_operand(&self) -> bool {
        self.line_break.is_none()
            && !matches!(
                self.current_token.kind,
                TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::Eof
            )
    }

    /// Raises an unexpected token error at the current token.
    fn unexpected<T>(&self) -> Result<T, ParseError> {
        Err(self.current_token.error_at().into())
    }
}

/// Parses a standalone expression, rejecting trailing input.
pub fn parse_expr(source: &Source) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(source)?;
    let expr = parser.parse_expr()?;
    parser.expect(TokenKind::Eof)?;
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    pub(super) fn program(source: &str) -> String {
        let source = source.into();
        match Parser::new(&source).map_err(ParseError::from).and_then(|mut p| p.parse_program()) {
            Ok(program) => program.to_string(),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn test_empty_program() {
        assert_snapshot!(program(""), @"");
        assert_snapshot!(program("  // nothing\n/* here */ \n"), @"");
    }

    #[test]
    fn test_statement_termination() {
        assert_eq!(program("a\nb"), "a;\nb;");
        assert_eq!(program("a /*\n*/ b"), "a;\nb;");
        assert_eq!(program("{ a }"), "{ a; }");
        assert_eq!(program("a b"), "a;\nb;");
        assert_eq!(program("a /* */ b"), "a;\nb;");
        assert_eq!(program("var a = 1 var b = 2; b"), "var a = 1;\nvar b = 2;\nb;");
        assert_snapshot!(program("if (a) 1 else 0"), @"if (a) 1; else 0;");
        assert_snapshot!(program("a +"), @"SyntaxError: unexpected token end of input");
    }

    #[test]
    fn test_hashbang_is_skipped() {
        assert_snapshot!(program("#!/usr/bin/env tern\n1;"), @"1;");
    }

    #[test]
    fn test_lex_error_aborts_parse() {
        assert_eq!(
            program("var s = 'abc"),
            "var s = 'abc\n        ^\nUncaught SyntaxError: Invalid or unexpected token"
        );
    }

    #[test]
    fn test_error_position() {
        let source = "var a = 1;\nvar = 2;".into();
        let err = Parser::new(&source).unwrap().parse_program().unwrap_err();
        assert_eq!(err.position(), (2, 5));
        assert_eq!(err.to_string(), "SyntaxError: unexpected token =");
    }

    #[test]
    fn test_parse_determinism() {
        let source = "var a = [1, , ...b]; if (a) x = -a ? 1 : 2; else { y++; }".into();
        let first = Parser::new(&source).unwrap().parse_program().unwrap();
        let second = Parser::new(&source).unwrap().parse_program().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rendering_reparses() {
        for source in [
            "a = b = c ? d : e || f && g;",
            "var x = typeof -y, z; new Foo;",
            "x = [, 1, ...rest, ,];",
            "for (var i = 0; i < 10; i++) { continue; }",
            "switch (a) { case 1: b; default: c; case 2: }",
            "try { a; } catch (e) { b; } finally { c; }",
            "outer: while (1) break outer;",
            "do x--; while (x > 0);",
            "'it\\'s' + \"ok\" + `\"t\"`;",
        ] {
            let once = program(source);
            assert_eq!(program(&once), once, "{}", source);
        }
    }

    #[test]
    fn test_parse_expr() {
        let source = "1 + 2".into();
        assert_eq!(parse_expr(&source).unwrap().to_string(), "(1 + 2)");
        let source = "1 + 2;".into();
        assert_eq!(
            parse_expr(&source).unwrap_err().to_string(),
            "SyntaxError: unexpected token ;"
        );
    }
}
