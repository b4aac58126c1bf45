//! Tree walking evaluation over the `tern-parser` AST.

pub mod eval;
pub mod scope;

pub use eval::Evaluator;
pub use scope::Scope;
