//! Replay errors

use thiserror::Error;

/// Checked-replay result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the checked evaluator.
///
/// The lenient evaluator never produces these: a missing operand skips the
/// step and a domain violation falls through to IEEE arithmetic. Unknown
/// tokens and unbound variables are not errors in either mode.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("operation {token} requires an operand")]
    MissingOperand { token: String },

    #[error("division by zero: {dividend}{token}0")]
    DivisionByZero { token: String, dividend: f64 },

    #[error("operand {operand} out of domain for {token}")]
    OutOfDomain { token: String, operand: f64 },
}
