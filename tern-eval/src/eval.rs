use std::rc::Rc;

use tern_parser::ast::{Expr, Literal, Program, Stmt};
use tern_parser::token::TokenKind;
use tern_value::{Value, ValueKind};
use tracing::debug;

use crate::scope::Scope;

/// Returns early from the enclosing function if the value is an error value.
macro_rules! try_value {
    ($value:expr) => {{
        let value = $value;
        if value.is_error() {
            return value;
        }
        value
    }};
}

fn runtime_error(message: String) -> Value {
    debug!(%message, "runtime error");
    Value::error(message)
}

/// Tree walking evaluator. The scope outlives each evaluated program, so
/// bindings made by one input are visible to the next.
pub struct Evaluator {
    scope: Rc<Scope>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_scope(Scope::new())
    }

    pub fn with_scope(scope: Rc<Scope>) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &Rc<Scope> {
        &self.scope
    }

    /// Evaluates statements in order and returns the last value, or the first
    /// error value. Returns `None` for a program without statements.
    pub fn eval_program(&mut self, program: &Program) -> Option<Value> {
        if program.body.is_empty() {
            return None;
        }
        Some(self.eval_stmts(&program.body))
    }

    fn eval_stmts(&mut self, stmts: &[Stmt]) -> Value {
        let mut result = Value::Undefined;
        for stmt in stmts {
            result = try_value!(self.eval_stmt(stmt));
        }
        result
    }

    pub fn eval_stmt(&mut self, stmt: &Stmt) -> Value {
        match stmt {
            Stmt::Block(body) => self.eval_stmts(body),
            Stmt::Empty | Stmt::Debugger => Value::Undefined,
            Stmt::Expr(expr) => self.eval_expr(expr),
            Stmt::Var(declarators) => {
                for declarator in declarators {
                    match &declarator.init {
                        Some(init) => {
                            let value = try_value!(self.eval_expr(init));
                            self.scope.set(&declarator.ident, value);
                        }
                        None if !self.scope.has_own(&declarator.ident) => {
                            self.scope.set(&declarator.ident, Value::Undefined)
                        }
                        None => {}
                    }
                }
                Value::Undefined
            }
            Stmt::If {
                cond,
                then,
                otherwise,
            } => {
                let cond = try_value!(self.eval_expr(cond));
                if cond.is_truthy() {
                    self.eval_stmt(then)
                } else if let Some(otherwise) = otherwise {
                    self.eval_stmt(otherwise)
                } else {
                    Value::Null
                }
            }
            Stmt::Return(arg) => match arg {
                Some(arg) => self.eval_expr(arg),
                None => Value::Undefined,
            },
            Stmt::Throw(arg) => {
                let value = try_value!(self.eval_expr(arg));
                runtime_error(format!("Uncaught {}", value))
            }
            Stmt::For { .. }
            | Stmt::While { .. }
            | Stmt::DoWhile { .. }
            | Stmt::Continue(_)
            | Stmt::Break(_)
            | Stmt::Switch { .. }
            | Stmt::Labelled { .. }
            | Stmt::Try { .. } => runtime_error(format!("unsupported syntax: {}", stmt.kind_name())),
        }
    }

    pub fn eval_expr(&mut self, expr: &Expr) -> Value {
        match expr {
            Expr::Identifier(ident) => match self.scope.get(ident) {
                Some(value) => value,
                None => runtime_error(format!("identifier not found: {}", ident)),
            },
            Expr::Literal(literal) => eval_literal(literal),
            Expr::Array(_) => runtime_error("unsupported syntax: array literal".to_string()),
            Expr::Unary { op, arg } => {
                let arg = try_value!(self.eval_expr(arg));
                eval_unary(*op, arg)
            }
            Expr::Update { op, prefix, arg } => {
                let arg = try_value!(self.eval_expr(arg));
                if *prefix {
                    runtime_error(format!("unknown operator: {}{}", op, arg.kind()))
                } else {
                    runtime_error(format!("unknown operator: {}{}", arg.kind(), op))
                }
            }
            Expr::Binary { lhs, op, rhs } => {
                let lhs = try_value!(self.eval_expr(lhs));
                let rhs = try_value!(self.eval_expr(rhs));
                eval_binary(*op, lhs, rhs)
            }
            Expr::Assign { target, value } => {
                let value = try_value!(self.eval_expr(value));
                match target.as_ref() {
                    Expr::Identifier(ident) => {
                        self.scope.assign(ident, value.clone());
                        value
                    }
                    _ => runtime_error(format!("invalid assignment target: {}", target)),
                }
            }
            Expr::Ternary {
                cond,
                then,
                otherwise,
            } => {
                let cond = try_value!(self.eval_expr(cond));
                if cond.is_truthy() {
                    self.eval_expr(then)
                } else {
                    self.eval_expr(otherwise)
                }
            }
        }
    }
}

fn eval_literal(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Undefined => Value::Undefined,
        Literal::Bool(val) => Value::Boolean(*val),
        Literal::Number(raw) => match raw.parse::<f64>() {
            Ok(val) => Value::Number(val),
            Err(_) => runtime_error(format!("could not parse {:?} as number", raw)),
        },
        Literal::String(body) => Value::from(body.as_str()),
    }
}

fn eval_unary(op: TokenKind, arg: Value) -> Value {
    match (op, &arg) {
        (TokenKind::Bang, _) => Value::Boolean(!arg.is_truthy()),
        (TokenKind::Minus, Value::Number(val)) => Value::Number(-val),
        (TokenKind::Minus, _) => runtime_error(format!("unknown operator: -{}", arg.kind())),
        _ if op.is_keyword() => runtime_error(format!("unknown operator: {} {}", op, arg.kind())),
        _ => runtime_error(format!("unknown operator: {}{}", op, arg.kind())),
    }
}

fn eval_binary(op: TokenKind, lhs: Value, rhs: Value) -> Value {
    if let (Value::Number(l), Value::Number(r)) = (&lhs, &rhs) {
        return eval_number_binary(op, *l, *r);
    }
    match op {
        TokenKind::EqualEqual => Value::Boolean(lhs.same(&rhs)),
        TokenKind::BangEqual => Value::Boolean(!lhs.same(&rhs)),
        _ if lhs.kind() != rhs.kind() => runtime_error(format!(
            "type mismatch: {} {} {}",
            lhs.kind(),
            op,
            rhs.kind()
        )),
        _ => unknown_binary(op, lhs.kind(), rhs.kind()),
    }
}

fn eval_number_binary(op: TokenKind, l: f64, r: f64) -> Value {
    match op {
        TokenKind::Plus => Value::Number(l + r),
        TokenKind::Minus => Value::Number(l - r),
        TokenKind::Star => Value::Number(l * r),
        TokenKind::Slash => Value::Number(l / r),
        TokenKind::Less => Value::Boolean(l < r),
        TokenKind::Greater => Value::Boolean(l > r),
        TokenKind::EqualEqual => Value::Boolean(l == r),
        TokenKind::BangEqual => Value::Boolean(l != r),
        _ => unknown_binary(op, ValueKind::Number, ValueKind::Number),
    }
}

fn unknown_binary(op: TokenKind, lhs: ValueKind, rhs: ValueKind) -> Value {
    runtime_error(format!("unknown operator: {} {} {}", lhs, op, rhs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_parser::parse;
    use tern_source::Source;

    fn eval_with(evaluator: &mut Evaluator, source: &str) -> Option<Value> {
        let source = Source::new(source);
        let program = parse(&source).unwrap();
        evaluator.eval_program(&program)
    }

    fn eval(source: &str) -> String {
        match eval_with(&mut Evaluator::new(), source) {
            Some(value) => value.to_string(),
            None => "<none>".to_string(),
        }
    }

    fn error(source: &str) -> String {
        let value = eval_with(&mut Evaluator::new(), source).unwrap();
        value.error_message().unwrap().to_string()
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(eval(""), "<none>");
        assert_eq!(eval("// only a comment\n"), "<none>");
        assert_eq!(eval(";"), "undefined");
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("1 + 2 * 3;"), "7");
        assert_eq!(eval("(1 + 2) * 3;"), "9");
        assert_eq!(eval("10 / 4 - 1;"), "1.5");
        assert_eq!(eval("-5 + 2;"), "-3");
        assert_eq!(eval("1 / 0;"), "Infinity");
        assert_eq!(eval("0 / 0;"), "NaN");
    }

    #[test]
    fn test_comparison() {
        assert_eq!(eval("1 < 2;"), "true");
        assert_eq!(eval("1 > 2;"), "false");
        assert_eq!(eval("1 == 1;"), "true");
        assert_eq!(eval("1 != 1;"), "false");
        assert_eq!(eval("true == true;"), "true");
        assert_eq!(eval("null == null;"), "true");
        assert_eq!(eval("null != undefined;"), "true");
        assert_eq!(eval("!!0 == false;"), "true");
    }

    #[test]
    fn test_string_identity() {
        assert_eq!(eval("'a' == 'a';"), "false");
        assert_eq!(eval("var s = 'a'; s == s;"), "true");
        assert_eq!(eval("var s = 'a'; var t = s; s != t;"), "false");
    }

    #[test]
    fn test_bang() {
        assert_eq!(eval("!true;"), "false");
        assert_eq!(eval("!null;"), "true");
        assert_eq!(eval("!0;"), "true");
        assert_eq!(eval("!'';"), "true");
        assert_eq!(eval("!'a';"), "false");
        assert_eq!(eval("!undefined;"), "false");
    }

    #[test]
    fn test_var() {
        assert_eq!(eval("var a = 10; a - 4;"), "6");
        assert_eq!(eval("var a = 1, b = a + 1; b;"), "2");
        assert_eq!(eval("var a;"), "undefined");
        assert_eq!(eval("var a; a;"), "undefined");
        assert_eq!(eval("var a = 5; var a; a;"), "5");
        assert_eq!(eval("var s = \"hi\"; s;"), "hi");
    }

    #[test]
    fn test_assignment() {
        assert_eq!(eval("var a = 1; a = a + 1; a;"), "2");
        assert_eq!(eval("a = b = 3; a + b;"), "6");
    }

    #[test]
    fn test_if() {
        assert_eq!(eval("if (1 < 2) 42; else 0;"), "42");
        assert_eq!(eval("if (1 > 2) 42; else 0;"), "0");
        assert_eq!(eval("if (1 > 2) 42;"), "null");
        assert_eq!(eval("if ('') { 1; } else { 2; 3; }"), "3");
        assert_eq!(eval("if (1) {}"), "undefined");
    }

    #[test]
    fn test_ternary() {
        assert_eq!(eval("1 ? 'yes' : 'no';"), "yes");
        assert_eq!(eval("0 ? 'yes' : 'no';"), "no");
        assert_eq!(eval("null ? missing : 1;"), "1");
    }

    #[test]
    fn test_misc_statements() {
        assert_eq!(eval("return;"), "undefined");
        assert_eq!(eval("return 1 + 1;"), "2");
        assert_eq!(eval("debugger;"), "undefined");
        assert_eq!(eval("{}"), "undefined");
    }

    #[test]
    fn test_errors() {
        assert_eq!(error("x;"), "identifier not found: x");
        assert_eq!(error("-'a';"), "unknown operator: -string");
        assert_eq!(error("typeof 1;"), "unknown operator: typeof number");
        assert_eq!(error("~1;"), "unknown operator: ~number");
        assert_eq!(error("1 + 'a';"), "type mismatch: number + string");
        assert_eq!(error("'a' + 'b';"), "unknown operator: string + string");
        assert_eq!(error("1 % 2;"), "unknown operator: number % number");
        assert_eq!(error("var i = 0; i++;"), "unknown operator: number++");
        assert_eq!(error("throw 'boom';"), "Uncaught boom");
        assert_eq!(error("while (1) {}"), "unsupported syntax: while");
        assert_eq!(error("[1];"), "unsupported syntax: array literal");
    }

    #[test]
    fn test_error_short_circuits() {
        let mut evaluator = Evaluator::new();
        let value = eval_with(&mut evaluator, "var a = missing; var b = 1; b;").unwrap();
        assert_eq!(value.error_message(), Some("identifier not found: missing"));
        assert!(evaluator.scope().get("a").is_none());
        assert!(evaluator.scope().get("b").is_none());

        assert_eq!(error("-(1 + 'a') + x;"), "type mismatch: number + string");
        assert_eq!(error("if (x) 1; else 2;"), "identifier not found: x");
        assert_eq!(error("{ x; 1; }"), "identifier not found: x");
    }

    #[test]
    fn test_error_is_a_value() {
        assert_eq!(eval("x;"), "{ message: identifier not found: x }");
    }

    #[test]
    fn test_bad_number_literal() {
        let value = eval_literal(&Literal::Number("1x".to_string()));
        assert_eq!(
            value.error_message(),
            Some("could not parse \"1x\" as number")
        );
    }

    #[test]
    fn test_scope_persists() {
        let mut evaluator = Evaluator::new();
        eval_with(&mut evaluator, "var a = 10;");
        let value = eval_with(&mut evaluator, "a * 2;").unwrap();
        assert_eq!(value.to_string(), "20");
        assert_eq!(
            evaluator.scope().get("a").and_then(|a| a.cast_to_number()),
            Some(10.0)
        );
    }

    #[test]
    fn test_enclosed_scope() {
        let root = Scope::new();
        root.set("x", Value::from(1.0));
        let mut evaluator = Evaluator::with_scope(Scope::with_parent(Some(root.clone())));
        assert_eq!(eval_with(&mut evaluator, "x;").unwrap().to_string(), "1");
        eval_with(&mut evaluator, "x = 2;");
        assert_eq!(root.get("x").unwrap().to_string(), "2");
    }

    #[test]
    fn test_determinism() {
        let source = Source::new("var a = 2; if (a > 1) a * 21; else 0;");
        let program = parse(&source).unwrap();
        let first = Evaluator::new().eval_program(&program).unwrap();
        let second = Evaluator::new().eval_program(&program).unwrap();
        assert!(first.same(&second));
    }
}
