//! Evaluation errors

/// Why an expression produced no displayable value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EvalError {
    /// Character outside the accepted alphabet
    UnsupportedCharacter(char),
    /// Division by zero, literal (`/0`) or computed
    DivisionByZero,
    /// Empty, unbalanced or otherwise ill-formed expression
    MalformedExpression,
    /// Expression evaluated to something that is not a finite number
    NonNumericResult,
}

impl EvalError {
    /// Short description for console output
    pub fn as_str(&self) -> &'static str {
        match self {
            EvalError::UnsupportedCharacter(_) => "unsupported character",
            EvalError::DivisionByZero => "division by zero",
            EvalError::MalformedExpression => "malformed expression",
            EvalError::NonNumericResult => "result is not a number",
        }
    }
}

impl core::fmt::Display for EvalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EvalError::UnsupportedCharacter(c) => write!(f, "{} {:?}", self.as_str(), c),
            _ => f.write_str(self.as_str()),
        }
    }
}
