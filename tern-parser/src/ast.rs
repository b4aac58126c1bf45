//! Abstract syntax tree.
//!
//! Every node implements [`fmt::Display`], rendering source text that parses
//! back to the same tree. Compound expressions are fully parenthesized.

use crate::token::TokenKind;
use std::fmt;

/// A parsed program: its top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `{ ... }`
    Block(Vec<Stmt>),
    /// `;`
    Empty,
    /// An expression followed by an optional `;`.
    Expr(Expr),
    /// `var a = 1, b;`
    Var(Vec<VarDeclarator>),
    If {
        cond: Expr,
        then: Box<Stmt>,
        otherwise: Option<Box<Stmt>>,
    },
    For {
        init: Option<ForInit>,
        cond: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        cond: Expr,
    },
    Continue(Option<String>),
    Break(Option<String>),
    Return(Option<Expr>),
    Switch {
        discriminant: Expr,
        cases: Vec<SwitchCase>,
    },
    Labelled {
        label: String,
        body: Box<Stmt>,
    },
    Throw(Expr),
    Try {
        block: Vec<Stmt>,
        handler: Option<CatchClause>,
        finalizer: Option<Vec<Stmt>>,
    },
    Debugger,
}

impl Stmt {
    /// Short name of the statement kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Block(_) => "block",
            Stmt::Empty => "empty statement",
            Stmt::Expr(_) => "expression statement",
            Stmt::Var(_) => "var",
            Stmt::If { .. } => "if",
            Stmt::For { .. } => "for",
            Stmt::While { .. } => "while",
            Stmt::DoWhile { .. } => "do-while",
            Stmt::Continue(_) => "continue",
            Stmt::Break(_) => "break",
            Stmt::Return(_) => "return",
            Stmt::Switch { .. } => "switch",
            Stmt::Labelled { .. } => "labelled statement",
            Stmt::Throw(_) => "throw",
            Stmt::Try { .. } => "try",
            Stmt::Debugger => "debugger",
        }
    }
}

/// A single `name` or `name = init` in a `var` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclarator {
    pub ident: String,
    pub init: Option<Expr>,
}

/// The first slot of a `for` header.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Var(Vec<VarDeclarator>),
    Expr(Expr),
}

/// `case test:` or, without a test, `default:`.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub param: Option<String>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Undefined,
    Bool(bool),
    /// Decimal source text, converted when evaluated.
    Number(String),
    /// String body without quotes, escapes kept verbatim.
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayElement {
    /// An elision (`[1, , 2]`).
    Hole,
    /// `...expr`
    Spread(Expr),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An identifier (e.g. `foo`).
    Identifier(String),
    Literal(Literal),
    Array(Vec<ArrayElement>),
    /// A prefix operator (`!`, `-`, `typeof`, `new`, ...).
    Unary { op: TokenKind, arg: Box<Expr> },
    /// `++x`, `x--`, ...
    Update {
        op: TokenKind,
        prefix: bool,
        arg: Box<Expr>,
    },
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: TokenKind,
        rhs: Box<Expr>,
    },
    /// `target = value`
    Assign { target: Box<Expr>, value: Box<Expr> },
    /// `cond ? then : otherwise`
    Ternary {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
}

impl Expr {
    /// Returns `true` if the expression may appear left of `=`.
    pub fn is_assignment_target(&self) -> bool {
        matches!(self, Expr::Identifier(_))
    }
}

fn write_stmts(f: &mut fmt::Formatter<'_>, stmts: &[Stmt]) -> fmt::Result {
    for stmt in stmts {
        write!(f, " {}", stmt)?;
    }
    Ok(())
}

fn write_block(f: &mut fmt::Formatter<'_>, stmts: &[Stmt]) -> fmt::Result {
    if stmts.is_empty() {
        return f.write_str("{}");
    }
    f.write_str("{")?;
    write_stmts(f, stmts)?;
    f.write_str(" }")
}

fn write_declarators(f: &mut fmt::Formatter<'_>, declarators: &[VarDeclarator]) -> fmt::Result {
    f.write_str("var ")?;
    for (i, declarator) in declarators.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&declarator.ident)?;
        if let Some(init) = &declarator.init {
            write!(f, " = {}", init)?;
        }
    }
    Ok(())
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.body.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Block(body) => write_block(f, body),
            Stmt::Empty => f.write_str(";"),
            Stmt::Expr(expr) => write!(f, "{};", expr),
            Stmt::Var(declarators) => {
                write_declarators(f, declarators)?;
                f.write_str(";")
            }
            Stmt::If {
                cond,
                then,
                otherwise,
            } => {
                write!(f, "if ({}) {}", cond, then)?;
                if let Some(otherwise) = otherwise {
                    write!(f, " else {}", otherwise)?;
                }
                Ok(())
            }
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => {
                f.write_str("for (")?;
                match init {
                    Some(ForInit::Var(declarators)) => write_declarators(f, declarators)?,
                    Some(ForInit::Expr(expr)) => write!(f, "{}", expr)?,
                    None => {}
                }
                f.write_str(";")?;
                if let Some(cond) = cond {
                    write!(f, " {}", cond)?;
                }
                f.write_str(";")?;
                if let Some(update) = update {
                    write!(f, " {}", update)?;
                }
                write!(f, ") {}", body)
            }
            Stmt::While { cond, body } => write!(f, "while ({}) {}", cond, body),
            Stmt::DoWhile { body, cond } => write!(f, "do {} while ({});", body, cond),
            Stmt::Continue(Some(label)) => write!(f, "continue {};", label),
            Stmt::Continue(None) => f.write_str("continue;"),
            Stmt::Break(Some(label)) => write!(f, "break {};", label),
            Stmt::Break(None) => f.write_str("break;"),
            Stmt::Return(Some(arg)) => write!(f, "return {};", arg),
            Stmt::Return(None) => f.write_str("return;"),
            Stmt::Switch {
                discriminant,
                cases,
            } => {
                write!(f, "switch ({}) {{", discriminant)?;
                for case in cases {
                    match &case.test {
                        Some(test) => write!(f, " case {}:", test)?,
                        None => f.write_str(" default:")?,
                    }
                    write_stmts(f, &case.body)?;
                }
                f.write_str(" }")
            }
            Stmt::Labelled { label, body } => write!(f, "{}: {}", label, body),
            Stmt::Throw(arg) => write!(f, "throw {};", arg),
            Stmt::Try {
                block,
                handler,
                finalizer,
            } => {
                f.write_str("try ")?;
                write_block(f, block)?;
                if let Some(handler) = handler {
                    match &handler.param {
                        Some(param) => write!(f, " catch ({}) ", param)?,
                        None => f.write_str(" catch ")?,
                    }
                    write_block(f, &handler.body)?;
                }
                if let Some(finalizer) = finalizer {
                    f.write_str(" finally ")?;
                    write_block(f, finalizer)?;
                }
                Ok(())
            }
            Stmt::Debugger => f.write_str("debugger;"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Undefined => f.write_str("undefined"),
            Literal::Bool(val) => write!(f, "{}", val),
            Literal::Number(raw) => f.write_str(raw),
            Literal::String(body) => {
                // Re-quote with `"`, escaping bare double quotes from `'` and `` ` `` strings.
                let mut quoted = String::with_capacity(body.len() + 2);
                quoted.push('"');
                let mut chars = body.chars();
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => {
                            quoted.push(c);
                            if let Some(escaped) = chars.next() {
                                quoted.push(escaped);
                            }
                        }
                        '"' => quoted.push_str("\\\""),
                        _ => quoted.push(c),
                    }
                }
                quoted.push('"');
                f.write_str(&quoted)
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(ident) => f.write_str(ident),
            Expr::Literal(literal) => write!(f, "{}", literal),
            Expr::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match element {
                        ArrayElement::Hole => {}
                        ArrayElement::Spread(expr) => write!(f, "...{}", expr)?,
                        ArrayElement::Expr(expr) => write!(f, "{}", expr)?,
                    }
                }
                // a trailing hole needs its own comma to survive a reparse
                if let Some(ArrayElement::Hole) = elements.last() {
                    f.write_str(",")?;
                }
                f.write_str("]")
            }
            Expr::Unary { op, arg } if op.is_keyword() => write!(f, "({} {})", op, arg),
            Expr::Unary { op, arg } => write!(f, "({}{})", op, arg),
            Expr::Update {
                op,
                prefix: true,
                arg,
            } => write!(f, "({}{})", op, arg),
            Expr::Update {
                op,
                prefix: false,
                arg,
            } => write!(f, "({}{})", arg, op),
            Expr::Binary { lhs, op, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
            Expr::Assign { target, value } => write!(f, "({} = {})", target, value),
            Expr::Ternary {
                cond,
                then,
                otherwise,
            } => write!(f, "({} ? {} : {})", cond, then, otherwise),
        }
    }
}
