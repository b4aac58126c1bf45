use super::*;
use crate::ast::{CatchClause, ForInit, Stmt, SwitchCase, VarDeclarator};
use tern_source::SyntaxError;

impl<'a> Parser<'a> {
    /// Parses a statement, dispatching on its first token.
    pub fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.current_token.kind {
            TokenKind::Break => {
                self.next()?;
                Ok(Stmt::Break(self.parse_label()?))
            }
            TokenKind::Continue => {
                self.next()?;
                Ok(Stmt::Continue(self.parse_label()?))
            }
            TokenKind::Debugger => {
                self.next()?;
                self.consume_semicolon()?;
                Ok(Stmt::Debugger)
            }
            TokenKind::Do => self.parse_do_while_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::LeftBrace => Ok(Stmt::Block(self.parse_block()?)),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Semicolon => {
                self.next()?;
                Ok(Stmt::Empty)
            }
            TokenKind::Switch => self.parse_switch_stmt(),
            TokenKind::Throw => self.parse_throw_stmt(),
            TokenKind::Try => self.parse_try_stmt(),
            TokenKind::Var => {
                self.next()?;
                let declarators = self.parse_var_declarators()?;
                self.consume_semicolon()?;
                Ok(Stmt::Var(declarators))
            }
            TokenKind::While => self.parse_while_stmt(),
            _ => self.parse_expr_stmt(),
        }
    }

    /// Parses `{ ... }` and returns its statements.
    pub fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(TokenKind::LeftBrace)?;

        let mut body = Vec::new();
        while !self.eat(TokenKind::RightBrace)? {
            if self.at(TokenKind::Eof) {
                return self.unexpected();
            }
            body.push(self.parse_stmt()?);
        }

        Ok(body)
    }

    fn parse_expr_stmt(&mut self) -> Result<Stmt, ParseError> {
        // `(a): x` is not a label, so decide from the first token.
        let bare_identifier = self.at(TokenKind::Identifier);
        let expr = self.parse_expr()?;

        if let (true, Expr::Identifier(label)) = (bare_identifier, &expr) {
            if self.eat(TokenKind::Colon)? {
                return Ok(Stmt::Labelled {
                    label: label.clone(),
                    body: Box::new(self.parse_stmt()?),
                });
            }
        }

        self.consume_semicolon()?;
        Ok(Stmt::Expr(expr))
    }

    /// Parses `a = 1, b` after the `var` keyword. Terminators are left to the caller.
    fn parse_var_declarators(&mut self) -> Result<Vec<VarDeclarator>, ParseError> {
        let mut declarators = Vec::new();
        loop {
            let ident = self.expect_identifier()?;
            let init = if self.eat(TokenKind::Equal)? {
                Some(self.parse_assignment_expr()?)
            } else {
                None
            };
            declarators.push(VarDeclarator { ident, init });

            if !self.eat(TokenKind::Comma)? {
                break;
            }
        }
        Ok(declarators)
    }

    /// Parses the `( expr )` head of `if`, `while`, `switch` and `do ... while`.
    fn parse_paren_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect(TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::RightParen)?;
        Ok(expr)
    }

    fn parse_label(&mut self) -> Result<Option<String>, ParseError> {
        let label = if self.has_operand() && self.at(TokenKind::Identifier) {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(label)
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::If)?;
        let cond = self.parse_paren_expr()?;
        let then = Box::new(self.parse_stmt()?);
        let otherwise = if self.eat(TokenKind::Else)? {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then,
            otherwise,
        })
    }

    fn parse_for_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::LeftParen)?;

        let init = match self.current_token.kind {
            TokenKind::Semicolon => None,
            TokenKind::Var => {
                self.next()?;
                Some(ForInit::Var(self.parse_var_declarators()?))
            }
            _ => Some(ForInit::Expr(self.parse_expr()?)),
        };
        self.expect(TokenKind::Semicolon)?;

        let cond = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon)?;

        let update = if self.at(TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::RightParen)?;

        Ok(Stmt::For {
            init,
            cond,
            update,
            body: Box::new(self.parse_stmt()?),
        })
    }

    fn parse_while_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::While)?;
        let cond = self.parse_paren_expr()?;
        Ok(Stmt::While {
            cond,
            body: Box::new(self.parse_stmt()?),
        })
    }

    fn parse_do_while_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::Do)?;
        let body = Box::new(self.parse_stmt()?);
        self.expect(TokenKind::While)?;
        let cond = self.parse_paren_expr()?;
        self.eat(TokenKind::Semicolon)?;
        Ok(Stmt::DoWhile { body, cond })
    }

    fn parse_return_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::Return)?;
        let arg = if self.has_operand() {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(Stmt::Return(arg))
    }

    fn parse_throw_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::Throw)?;
        if let Some(line_break) = self.line_break {
            return Err(
                SyntaxError::new(TokenKind::Newline, line_break.line, line_break.col).into(),
            );
        }
        let arg = self.parse_expr()?;
        self.consume_semicolon()?;
        Ok(Stmt::Throw(arg))
    }

    fn parse_switch_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::Switch)?;
        let discriminant = self.parse_paren_expr()?;
        self.expect(TokenKind::LeftBrace)?;

        let mut cases = Vec::new();
        let mut has_default = false;
        while !self.eat(TokenKind::RightBrace)? {
            let test = match self.current_token.kind {
                TokenKind::Case => {
                    self.next()?;
                    Some(self.parse_expr()?)
                }
                TokenKind::Default if !has_default => {
                    has_default = true;
                    self.next()?;
                    None
                }
                _ => return self.unexpected(),
            };
            self.expect(TokenKind::Colon)?;

            let mut body = Vec::new();
            while !matches!(
                self.current_token.kind,
                TokenKind::Case | TokenKind::Default | TokenKind::RightBrace | TokenKind::Eof
            ) {
                body.push(self.parse_stmt()?);
            }
            cases.push(SwitchCase { test, body });
        }

        Ok(Stmt::Switch {
            discriminant,
            cases,
        })
    }

    fn parse_try_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::Try)?;
        let block = self.parse_block()?;

        let handler = if self.eat(TokenKind::Catch)? {
            let param = if self.eat(TokenKind::LeftParen)? {
                let param = self.expect_identifier()?;
                self.expect(TokenKind::RightParen)?;
                Some(param)
            } else {
                None
            };
            Some(CatchClause {
                param,
                body: self.parse_block()?,
            })
        } else {
            None
        };

        let finalizer = if self.eat(TokenKind::Finally)? {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return self.unexpected();
        }

        Ok(Stmt::Try {
            block,
            handler,
            finalizer,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::tests::program;
    use insta::assert_snapshot;

    #[test]
    fn test_var_stmt() {
        assert_snapshot!(program("var a = 1, b;"), @"var a = 1, b;");
        assert_snapshot!(program("var a = b = 2"), @"var a = (b = 2);");
        assert_snapshot!(program("var 1;"), @"SyntaxError: unexpected token 1");
        assert_snapshot!(program("var if = 1;"), @"SyntaxError: unexpected token if");
    }

    #[test]
    fn test_if_stmt() {
        assert_snapshot!(program("if (1 < 2) 42; else 0;"), @"if ((1 < 2)) 42; else 0;");
        assert_snapshot!(program("if (a) { b }"), @"if (a) { b; }");
        assert_snapshot!(program("if a;"), @"SyntaxError: unexpected token a");
    }

    #[test]
    fn test_loops() {
        assert_snapshot!(program("for (;;) {}"), @"for (;;) {}");
        assert_snapshot!(
            program("for (var i = 0, j; i < j; i = i + 1) x;"),
            @"for (var i = 0, j; (i < j); (i = (i + 1))) x;"
        );
        assert_snapshot!(program("for (i = 0; ; ) ;"), @"for ((i = 0);;) ;");
        assert_snapshot!(program("while (x) x = x - 1;"), @"while (x) (x = (x - 1));");
        assert_snapshot!(program("do {} while (false)"), @"do {} while (false);");
        assert_snapshot!(program("while x;"), @"SyntaxError: unexpected token x");
        assert_snapshot!(program("for (;) x;"), @"SyntaxError: unexpected token )");
    }

    #[test]
    fn test_jumps() {
        assert_snapshot!(program("break;"), @"break;");
        assert_snapshot!(program("continue outer;"), @"continue outer;");
        assert_eq!(program("break\nouter;"), "break;\nouter;");
        assert_snapshot!(program("return;"), @"return;");
        assert_snapshot!(program("{ return 1 + 1 }"), @"{ return (1 + 1); }");
        assert_eq!(program("return\n1;"), "return;\n1;");
    }

    #[test]
    fn test_throw_stmt() {
        assert_snapshot!(program("throw 'oops';"), @r#"throw "oops";"#);
        assert_snapshot!(program("throw\n1;"), @"SyntaxError: unexpected token newline");
        assert_snapshot!(program("throw;"), @"SyntaxError: unexpected token ;");
    }

    #[test]
    fn test_block_stmt() {
        assert_snapshot!(program("{}"), @"{}");
        assert_snapshot!(program("{ ; { a; } }"), @"{ ; { a; } }");
        assert_snapshot!(program("{ a;"), @"SyntaxError: unexpected token end of input");
    }

    #[test]
    fn test_switch_stmt() {
        assert_snapshot!(program("switch (x) {}"), @"switch (x) { }");
        assert_snapshot!(
            program("switch (x) { case 1: case 2: a; b; default: c }"),
            @"switch (x) { case 1: case 2: a; b; default: c; }"
        );
        assert_snapshot!(
            program("switch (x) { default: default: }"),
            @"SyntaxError: unexpected token default"
        );
        assert_snapshot!(program("switch (x) { a; }"), @"SyntaxError: unexpected token a");
    }

    #[test]
    fn test_try_stmt() {
        assert_snapshot!(program("try {} catch {}"), @"try {} catch {}");
        assert_snapshot!(
            program("try { a } catch (e) { b } finally {}"),
            @"try { a; } catch (e) { b; } finally {}"
        );
        assert_snapshot!(program("try {} finally { c }"), @"try {} finally { c; }");
        assert_snapshot!(program("try {}"), @"SyntaxError: unexpected token end of input");
    }

    #[test]
    fn test_labelled_stmt() {
        assert_snapshot!(program("loop: for (;;) break loop;"), @"loop: for (;;) break loop;");
        assert_snapshot!(program("a ? b : c;"), @"(a ? b : c);");
        assert_snapshot!(program("(a): 1"), @"SyntaxError: unexpected token :");
        assert_snapshot!(program("((a)): 1"), @"SyntaxError: unexpected token :");
    }

    #[test]
    fn test_optional_semicolon() {
        assert_snapshot!(program("if (1 < 2) 42 else 0"), @"if ((1 < 2)) 42; else 0;");
        assert_eq!(program("var a = 1 var b"), "var a = 1;\nvar b;");
        assert_eq!(program("return 1 2"), "return 1;\n2;");
    }

    #[test]
    fn test_misc_stmts() {
        assert_snapshot!(program(";"), @";");
        assert_snapshot!(program("debugger"), @"debugger;");
        assert_snapshot!(program("function f() {}"), @"SyntaxError: unexpected token function");
    }
}
