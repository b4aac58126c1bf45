use super::*;
use crate::ast::{ArrayElement, Literal};

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    /// This is equivalent to calling [`Self::parse_assignment_expr`].
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment_expr()
    }

    /// Parses `target = value`, right associative. Falls through to the conditional level.
    pub fn parse_assignment_expr(&mut self) -> Result<Expr, ParseError> {
        let target = self.parse_conditional_expr()?;
        if !self.at(TokenKind::Equal) {
            return Ok(target);
        }
        if !target.is_assignment_target() {
            return self.unexpected();
        }
        self.next()?;

        Ok(Expr::Assign {
            target: Box::new(target),
            value: Box::new(self.parse_assignment_expr()?),
        })
    }

    fn parse_conditional_expr(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_expr_bp(0)?; // 0 to accept any binary expression
        if !self.eat(TokenKind::Question)? {
            return Ok(cond);
        }

        let then = self.parse_assignment_expr()?;
        self.expect(TokenKind::Colon)?;
        let otherwise = self.parse_assignment_expr()?;

        Ok(Expr::Ternary {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    /// Parses a binary expression with the specified `min_bp`.
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary_expr()?;

        loop {
            let (l_bp, r_bp) = match self.current_token.kind.binop_bp() {
                Some(bp) => bp,
                None => break, // not a valid binop, stop parsing
            };
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }

            // self.current_token is a valid binop
            let op = self.next()?.kind;
            let rhs = self.parse_expr_bp(r_bp)?;

            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            }
        }

        Ok(lhs)
    }

    /// Parses prefix operators (`!`, `typeof`, `++`, ...).
    fn parse_unary_expr(&mut self) -> Result<Expr, ParseError> {
        let op = self.current_token;
        if op.kind.is_unary_op() {
            self.next()?;
            return Ok(Expr::Unary {
                op: op.kind,
                arg: Box::new(self.parse_unary_expr()?),
            });
        }

        if op.kind.is_update_op() {
            self.next()?;
            let arg = self.parse_unary_expr()?;
            if !arg.is_assignment_target() {
                return Err(op.error_at().into());
            }
            return Ok(Expr::Update {
                op: op.kind,
                prefix: true,
                arg: Box::new(arg),
            });
        }

        self.parse_postfix_expr()
    }

    /// Parses `x++` and `x--`. The operator must be on the operand's line.
    fn parse_postfix_expr(&mut self) -> Result<Expr, ParseError> {
        let arg = self.parse_new_expr()?;
        if !self.current_token.kind.is_update_op() || self.line_break.is_some() {
            return Ok(arg);
        }
        if !arg.is_assignment_target() {
            return self.unexpected();
        }

        let op = self.next()?.kind;
        Ok(Expr::Update {
            op,
            prefix: false,
            arg: Box::new(arg),
        })
    }

    fn parse_new_expr(&mut self) -> Result<Expr, ParseError> {
        if !self.eat(TokenKind::New)? {
            return self.parse_primary_expr();
        }
        Ok(Expr::Unary {
            op: TokenKind::New,
            arg: Box::new(self.parse_new_expr()?),
        })
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> Result<Expr, ParseError> {
        let literal = match self.current_token.kind {
            TokenKind::Identifier => Expr::Identifier(self.current_token.lexeme.to_string()),
            TokenKind::Number => {
                Expr::Literal(Literal::Number(self.current_token.lexeme.to_string()))
            }
            TokenKind::String => {
                Expr::Literal(Literal::String(self.current_token.literal.to_string()))
            }
            TokenKind::True => Expr::Literal(Literal::Bool(true)),
            TokenKind::False => Expr::Literal(Literal::Bool(false)),
            TokenKind::Null => Expr::Literal(Literal::Null),
            TokenKind::Undefined => Expr::Literal(Literal::Undefined),
            TokenKind::LeftBracket => return self.parse_array_expr(),
            TokenKind::LeftParen => {
                self.next()?;
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RightParen)?;
                return Ok(expr);
            }
            _ => return self.unexpected(),
        };
        self.next()?;
        Ok(literal)
    }

    /* Expressions.Array */
    /// Parses `[a, , ...b]`. A comma where an element is expected leaves a hole.
    fn parse_array_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect(TokenKind::LeftBracket)?;

        let mut elements = Vec::new();
        loop {
            let element = match self.current_token.kind {
                TokenKind::RightBracket => break,
                TokenKind::Comma => {
                    self.next()?;
                    elements.push(ArrayElement::Hole);
                    continue;
                }
                TokenKind::DotDotDot => {
                    self.next()?;
                    ArrayElement::Spread(self.parse_assignment_expr()?)
                }
                _ => ArrayElement::Expr(self.parse_assignment_expr()?),
            };
            elements.push(element);

            if !self.at(TokenKind::RightBracket) {
                self.expect(TokenKind::Comma)?;
            }
        }
        self.next()?; // eat `]`

        Ok(Expr::Array(elements))
    }
}
