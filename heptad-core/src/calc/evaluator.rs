//! Expression evaluator
//!
//! Gates run in a fixed order: character whitelist, the literal `/0`
//! guard, parsing, numeric check, then the display digit budget.

use super::error::EvalError;
use super::format::{count_digits, format_number, DisplayText};
use super::number::Number;
use super::parser::{self, Value};

/// Default display digit budget
pub const DEFAULT_MAX_DIGITS: usize = 6;

/// Outcome of evaluating one line
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationOutcome {
    /// Result fits the display
    Display { value: Number, text: DisplayText },
    /// Result is valid but has too many digits to show
    TooLongForDisplay { value: Number },
    /// No result
    Failed(EvalError),
}

impl EvaluationOutcome {
    /// The computed value, if there is one
    pub fn value(&self) -> Option<Number> {
        match self {
            EvaluationOutcome::Display { value, .. } => Some(*value),
            EvaluationOutcome::TooLongForDisplay { value } => Some(*value),
            EvaluationOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<EvalError> {
        match self {
            EvaluationOutcome::Failed(e) => Some(*e),
            _ => None,
        }
    }
}

/// Stateless evaluator with a display digit budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    max_digits: usize,
}

impl Evaluator {
    pub fn new(max_digits: usize) -> Self {
        Self { max_digits }
    }

    pub fn max_digits(&self) -> usize {
        self.max_digits
    }

    /// Evaluate one line of input
    pub fn evaluate(&self, raw: &str) -> EvaluationOutcome {
        match compute(raw) {
            Ok(value) => match format_number(value) {
                Some(text) if count_digits(&text) <= self.max_digits => {
                    EvaluationOutcome::Display { value, text }
                }
                _ => EvaluationOutcome::TooLongForDisplay { value },
            },
            Err(e) => EvaluationOutcome::Failed(e),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DIGITS)
    }
}

/// Evaluate with the default digit budget
pub fn evaluate(raw: &str) -> EvaluationOutcome {
    Evaluator::default().evaluate(raw)
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.')
}

fn compute(raw: &str) -> Result<Number, EvalError> {
    let mut prev = None;
    let mut slash_zero = false;
    let mut empty = true;

    for c in raw.chars().filter(|c| !c.is_whitespace()) {
        if !is_allowed(c) {
            return Err(EvalError::UnsupportedCharacter(c));
        }
        // Textual guard: any `/0` once whitespace is gone, even `1/0.5`
        if prev == Some('/') && c == '0' {
            slash_zero = true;
        }
        prev = Some(c);
        empty = false;
    }

    if slash_zero {
        return Err(EvalError::DivisionByZero);
    }
    if empty {
        return Err(EvalError::MalformedExpression);
    }

    match parser::parse(raw)? {
        Value::Num(n) if n.is_finite() => Ok(n),
        _ => Err(EvalError::NonNumericResult),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn shows(raw: &str) -> std::string::String {
        match evaluate(raw) {
            EvaluationOutcome::Display { text, .. } => text.as_str().into(),
            other => panic!("{raw:?} -> {other:?}"),
        }
    }

    fn fails(raw: &str) -> EvalError {
        match evaluate(raw) {
            EvaluationOutcome::Failed(e) => e,
            other => panic!("{raw:?} -> {other:?}"),
        }
    }

    #[test]
    fn test_reference_expressions() {
        assert_eq!(shows("3+5"), "8");
        assert_eq!(shows("6*7"), "42");
        assert_eq!(shows("15/3"), "5");
        assert_eq!(shows("(2+3)*4"), "20");
        assert_eq!(shows("1/3"), "0.33");
        assert_eq!(shows("10 - 3"), "7");
        assert_eq!(fails("10/0"), EvalError::DivisionByZero);
    }

    #[test]
    fn test_too_long_for_display() {
        assert_eq!(
            evaluate("999999*999999"),
            EvaluationOutcome::TooLongForDisplay {
                value: Number::Int(999_998_000_001)
            }
        );
        assert_eq!(shows("999999"), "999999");
        assert_eq!(shows("-999999"), "-999999");
        assert!(matches!(
            evaluate("1000000"),
            EvaluationOutcome::TooLongForDisplay { .. }
        ));
    }

    #[test]
    fn test_digit_budget_is_configurable() {
        let wide = Evaluator::new(12);
        assert!(matches!(
            wide.evaluate("999999*999999"),
            EvaluationOutcome::Display { .. }
        ));
        // Does not fit a render job regardless of the budget
        assert!(matches!(
            Evaluator::new(64).evaluate("10000000000*10000000000"),
            EvaluationOutcome::TooLongForDisplay { .. }
        ));
    }

    #[test]
    fn test_unsupported_character_is_first_offender() {
        assert_eq!(fails("2^3"), EvalError::UnsupportedCharacter('^'));
        assert_eq!(fails("abs(1)"), EvalError::UnsupportedCharacter('a'));
        assert_eq!(fails("1e5"), EvalError::UnsupportedCharacter('e'));
        assert_eq!(fails("1,2"), EvalError::UnsupportedCharacter(','));
    }

    #[test]
    fn test_unsupported_wins_over_slash_zero() {
        assert_eq!(fails("x/0"), EvalError::UnsupportedCharacter('x'));
    }

    #[test]
    fn test_slash_zero_guard_is_textual() {
        assert_eq!(fails("1/0.5"), EvalError::DivisionByZero);
        assert_eq!(fails("1 / 0"), EvalError::DivisionByZero);
        assert_eq!(fails("4/05"), EvalError::DivisionByZero);
        assert_eq!(shows("1/(0.5)"), "2");
    }

    #[test]
    fn test_computed_zero_divisor() {
        assert_eq!(fails("1/(3-3)"), EvalError::DivisionByZero);
    }

    #[test]
    fn test_non_numeric() {
        assert_eq!(fails("()"), EvalError::NonNumericResult);
        assert_eq!(fails(" ( ) "), EvalError::NonNumericResult);
    }

    #[test]
    fn test_malformed_and_empty() {
        assert_eq!(fails(""), EvalError::MalformedExpression);
        assert_eq!(fails("   "), EvalError::MalformedExpression);
        assert_eq!(fails("3+"), EvalError::MalformedExpression);
        assert_eq!(fails("(1+2"), EvalError::MalformedExpression);
        assert_eq!(fails("2**3"), EvalError::MalformedExpression);
        assert_eq!(fails("007+1"), EvalError::MalformedExpression);
    }

    #[test]
    fn test_zero_prefixed_literals() {
        assert_eq!(shows("00+7"), "7");
        assert_eq!(shows("05.5*2"), "11");
    }

    #[test]
    fn test_formatting() {
        assert_eq!(shows("7/2"), "3.5");
        assert_eq!(shows("2/3"), "0.67");
        assert_eq!(shows("-1/4"), "-0.25");
        assert_eq!(shows("0.1+0.2"), "0.3");
        assert_eq!(shows("1.5*2"), "3");
        assert_eq!(shows("3-5"), "-2");
    }

    #[test]
    fn test_whitespace_everywhere() {
        assert_eq!(shows(" 3 \t+\u{3000}5 "), "8");
    }

    #[test]
    fn test_outcome_accessors() {
        assert_eq!(evaluate("2+2").value(), Some(Number::Int(4)));
        assert_eq!(evaluate("2+").value(), None);
        assert_eq!(evaluate("2+").error(), Some(EvalError::MalformedExpression));
    }

    proptest! {
        #[test]
        fn prop_evaluate_is_idempotent(raw in "[0-9+\\-*/(). ]{0,24}") {
            prop_assert_eq!(evaluate(&raw), evaluate(&raw));
        }

        #[test]
        fn prop_arbitrary_input_never_panics(raw in "\\PC{0,32}") {
            let _ = evaluate(&raw);
        }

        #[test]
        fn prop_small_sums_are_exact(a in -999i64..999, b in -999i64..999) {
            let raw = std::format!("{a}+({b})");
            let expected = std::format!("{}", a + b);
            prop_assert_eq!(shows(&raw), expected);
        }
    }
}
