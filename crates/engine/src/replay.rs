//! Replay evaluator
//!
//! Recomputes result, pending state, and the expression description by
//! folding the tape from the beginning on every call. The fold carries no
//! state between calls, which is what makes undo a pure truncation: the
//! remaining prefix is simply folded again.
//!
//! Operators have no precedence. Every binary operator immediately folds
//! against whatever is pending, left to right, so `7 + 7 × 7` resolves as
//! `(7 + 7) × 7`.

use indexmap::IndexMap;
use tracing::trace;

use tally_registry::rng::RngStream;
use tally_registry::{BinaryFn, Domain, Operation, OperationDescriptor, Registry};

use crate::error::{Error, Result};
use crate::format::format_number;
use crate::tape::Step;

/// Caller-supplied variable bindings, consulted only at replay time.
///
/// A referenced name that is absent resolves to `0.0`; this is policy, not
/// an error.
pub type Bindings = IndexMap<String, f64>;

/// Outcome of one replay pass
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Evaluation {
    /// Current accumulator, absent until a first operand is replayed
    pub result: Option<f64>,
    /// Whether a binary operation is still waiting for its right operand
    pub pending: bool,
    /// Human-readable rendering of the recorded expression
    pub description: String,
}

/// A binary operator waiting for its right operand.
///
/// Exists only for the duration of a single replay pass; it is never
/// persisted between evaluations.
struct PendingBinary {
    apply: BinaryFn,
    first_operand: f64,
    token: &'static str,
    domain: Domain,
}

impl PendingBinary {
    fn resolve(&self, second_operand: f64) -> f64 {
        (self.apply)(self.first_operand, second_operand)
    }
}

/// Kind of the most recently replayed operation.
///
/// Drives the description rules: a binary operation renders its right
/// operand itself, and a resolved variable (`Memory`) is rendered by name
/// only. `Number` steps never update this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastKind {
    Constant,
    Unary,
    Binary,
    Equals,
    Custom,
    Memory,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Lenient,
    Checked,
}

/// Replay a tape snapshot, skipping steps that lack an operand.
pub fn replay(
    registry: &Registry,
    steps: &[Step],
    bindings: Option<&Bindings>,
    rng: &mut RngStream,
) -> Evaluation {
    match fold(registry, steps, bindings, rng, Mode::Lenient) {
        Ok(evaluation) => evaluation,
        // Every Err path in the fold is gated on Mode::Checked.
        Err(_) => unreachable!("lenient replay has no failing paths"),
    }
}

/// Replay a tape snapshot, reporting domain violations and missing operands.
///
/// Aborts on the first violation; the tape itself is never mutated by
/// evaluation in either mode.
pub fn replay_checked(
    registry: &Registry,
    steps: &[Step],
    bindings: Option<&Bindings>,
    rng: &mut RngStream,
) -> Result<Evaluation> {
    fold(registry, steps, bindings, rng, Mode::Checked)
}

fn fold(
    registry: &Registry,
    steps: &[Step],
    bindings: Option<&Bindings>,
    rng: &mut RngStream,
    mode: Mode,
) -> Result<Evaluation> {
    trace!(steps = steps.len(), "replay");

    let mut accumulator: Option<f64> = None;
    let mut pending: Option<PendingBinary> = None;
    let mut last: Option<LastKind> = None;
    let mut description = String::new();

    for step in steps {
        match step {
            Step::Number(value) => {
                accumulator = Some(*value);
                // A binary operation renders this operand as part of its own
                // output; rendering it here as well would duplicate it.
                if last != Some(LastKind::Binary) {
                    if pending.is_some() {
                        description.push_str(&format_number(*value));
                    } else {
                        description = format_number(*value);
                    }
                }
            }
            Step::OperationSymbol(token) => {
                // Unregistered tokens are skipped, never raised.
                let Some(descriptor) = registry.lookup(token) else {
                    continue;
                };
                match descriptor.operation {
                    Operation::Constant(value) => {
                        accumulator = Some(value);
                        if pending.is_some() {
                            description.push_str(&format_number(value));
                        } else {
                            description = format_number(value);
                        }
                        last = Some(LastKind::Constant);
                    }
                    Operation::Unary(apply) => {
                        let Some(operand) = accumulator else {
                            if mode == Mode::Checked {
                                return Err(missing_operand(descriptor));
                            }
                            last = Some(LastKind::Unary);
                            continue;
                        };
                        if mode == Mode::Checked {
                            check_unary_domain(descriptor, operand)?;
                        }
                        if pending.is_some() {
                            description.push_str(descriptor.token);
                            description.push('(');
                            description.push_str(&format_number(operand));
                            description.push(')');
                        } else {
                            description = format!("{}({})", descriptor.token, description);
                        }
                        accumulator = Some(apply(operand));
                        last = Some(LastKind::Unary);
                    }
                    Operation::Binary(apply) => {
                        let Some(operand) = accumulator else {
                            if mode == Mode::Checked {
                                return Err(missing_operand(descriptor));
                            }
                            last = Some(LastKind::Binary);
                            continue;
                        };
                        if let Some(waiting) = pending.take() {
                            // A resolved variable is already rendered by
                            // name; its numeric value never appears.
                            if last != Some(LastKind::Memory) {
                                description.push_str(&format_number(operand));
                            }
                            description.push_str(descriptor.token);
                            let folded = resolve(waiting, operand, mode)?;
                            accumulator = Some(folded);
                            pending = Some(PendingBinary {
                                apply,
                                first_operand: folded,
                                token: descriptor.token,
                                domain: descriptor.domain,
                            });
                        } else {
                            pending = Some(PendingBinary {
                                apply,
                                first_operand: operand,
                                token: descriptor.token,
                                domain: descriptor.domain,
                            });
                            description.push_str(descriptor.token);
                            accumulator = None;
                        }
                        last = Some(LastKind::Binary);
                    }
                    Operation::Equals => {
                        let Some(operand) = accumulator else {
                            if mode == Mode::Checked {
                                return Err(missing_operand(descriptor));
                            }
                            last = Some(LastKind::Equals);
                            continue;
                        };
                        // Close the dangling right operand of a chain.
                        if last == Some(LastKind::Binary) {
                            description.push_str(&format_number(operand));
                        }
                        if let Some(waiting) = pending.take() {
                            accumulator = Some(resolve(waiting, operand, mode)?);
                        }
                        last = Some(LastKind::Equals);
                    }
                    Operation::Custom(generate) => {
                        let value = generate(rng);
                        accumulator = Some(value);
                        if pending.is_some() {
                            description.push_str(&format_number(value));
                        } else {
                            description = format_number(value);
                        }
                        last = Some(LastKind::Custom);
                    }
                }
            }
            Step::Variable(name) => {
                let value = bindings
                    .and_then(|bindings| bindings.get(name.as_str()))
                    .copied()
                    .unwrap_or(0.0);
                accumulator = Some(value);
                if pending.is_some() {
                    description.push_str(name);
                } else {
                    description.clone_from(name);
                }
                last = Some(LastKind::Memory);
            }
        }
    }

    Ok(Evaluation {
        result: accumulator,
        pending: pending.is_some(),
        description,
    })
}

fn resolve(waiting: PendingBinary, second_operand: f64, mode: Mode) -> Result<f64> {
    if mode == Mode::Checked && waiting.domain == Domain::NonZeroRhs && second_operand == 0.0 {
        return Err(Error::DivisionByZero {
            token: waiting.token.to_string(),
            dividend: waiting.first_operand,
        });
    }
    Ok(waiting.resolve(second_operand))
}

fn check_unary_domain(descriptor: &OperationDescriptor, operand: f64) -> Result<()> {
    let in_domain = match descriptor.domain {
        Domain::Any | Domain::NonZeroRhs => true,
        Domain::NonNegative => operand >= 0.0,
        Domain::Positive => operand > 0.0,
        Domain::NonZero => operand != 0.0,
    };
    if in_domain {
        Ok(())
    } else {
        Err(Error::OutOfDomain {
            token: descriptor.token.to_string(),
            operand,
        })
    }
}

fn missing_operand(descriptor: &OperationDescriptor) -> Error {
    Error::MissingOperand {
        token: descriptor.token.to_string(),
    }
}
