//! Arithmetic expression evaluation
//!
//! Input is restricted to digits, `+ - * / ( ) .` and whitespace, and is
//! parsed by a small recursive-descent parser. Nothing is ever executed.

pub mod error;
pub mod evaluator;
pub mod format;
pub mod number;
mod parser;

pub use error::EvalError;
pub use evaluator::{evaluate, EvaluationOutcome, Evaluator, DEFAULT_MAX_DIGITS};
pub use format::{count_digits, format_number, DisplayText};
pub use number::Number;
