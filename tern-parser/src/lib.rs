//! Scanner and recursive descent parser.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

use tern_source::{ParseError, Source};

/// Parses a whole program.
pub fn parse(source: &Source) -> Result<ast::Program, ParseError> {
    parser::Parser::new(source)?.parse_program()
}
