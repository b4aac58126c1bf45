use std::rc::Rc;

use tern_eval::{Evaluator, Scope};
use tern_parser::ast::Program;
use tern_source::{ParseError, Source};
use tern_value::Value;
use tracing::debug;

/// An interpreter session. Bindings persist from one input to the next.
#[derive(Default)]
pub struct Session {
    evaluator: Evaluator,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&self, input: &str) -> Result<Program, ParseError> {
        let source = Source::new(input);
        let program = tern_parser::parse(&source)?;
        debug!(%program, "parsed program");
        Ok(program)
    }

    /// Evaluates `program`, returning `None` if it has no statements.
    pub fn run(&mut self, program: &Program) -> Option<Value> {
        self.evaluator.eval_program(program)
    }

    /// Parses and evaluates `input`.
    pub fn eval(&mut self, input: &str) -> Result<Option<Value>, ParseError> {
        let program = self.parse(input)?;
        Ok(self.run(&program))
    }

    pub fn scope(&self) -> &Rc<Scope> {
        self.evaluator.scope()
    }
}
