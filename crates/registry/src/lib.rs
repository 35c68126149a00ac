//! Operation Registry.
//!
//! Maps a keypad token (e.g. `√`, `×`, `Rand`) to the operation it performs.
//! The table is built once at engine construction and is read-only for the
//! engine's lifetime. Lookup misses are not an error: a recorded token that
//! is not registered is skipped during replay, so a mistyped key can never
//! crash a session.
//!
//! # Operation Kinds
//!
//! - **Constant** - pushes a fixed value, e.g. `π`
//! - **Unary** - transforms the current operand, e.g. `√`
//! - **Binary** - combines two operands, folded left to right, e.g. `+`
//! - **Equals** - forces resolution of a pending binary operation
//! - **Custom** - draws a fresh value from the generator stream, e.g. `Rand`;
//!   re-evaluating a tape re-invokes it, so results are not stable across
//!   replays
//!
//! # Example Lookup
//!
//! ```
//! use tally_registry::Registry;
//!
//! let registry = Registry::builtin();
//! assert!(registry.is_known("√"));
//! assert!(!registry.is_known("fnord"));
//! ```

pub mod rng;

use std::f64::consts::{E, PI};

use indexmap::IndexMap;

use crate::rng::RngStream;

/// Signature for unary operations
pub type UnaryFn = fn(f64) -> f64;

/// Signature for binary operations
pub type BinaryFn = fn(f64, f64) -> f64;

/// Signature for generator operations; draws from the engine's RNG stream
pub type CustomFn = fn(&mut RngStream) -> f64;

/// What a token does when it is replayed
#[derive(Clone, Copy)]
pub enum Operation {
    /// A fixed value
    Constant(f64),
    /// A function of the current operand
    Unary(UnaryFn),
    /// A function of two operands
    Binary(BinaryFn),
    /// Resolves the pending binary operation
    Equals,
    /// A zero-argument generator; not pure, advances the stream on every draw
    Custom(CustomFn),
}

/// Operand constraint checked by the fallible evaluator.
///
/// The lenient evaluator ignores these and lets IEEE arithmetic produce
/// `NaN`/`inf`; the checked evaluator reports a domain error instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Domain {
    /// No constraint
    #[default]
    Any,
    /// Operand must be non-negative (`√`)
    NonNegative,
    /// Operand must be strictly positive (`㏑`, `㏒₁₀`)
    Positive,
    /// Operand must be non-zero (`x⁻¹`)
    NonZero,
    /// Right operand must be non-zero (`÷`)
    NonZeroRhs,
}

/// Descriptor for a registered operation
pub struct OperationDescriptor {
    /// Keypad token (e.g. `√`, `×`, `Rand`)
    pub token: &'static str,
    /// One-line documentation string
    pub doc: &'static str,
    /// Operand constraint for checked evaluation
    pub domain: Domain,
    /// The operation itself
    pub operation: Operation,
}

/// Builtin keypad operations, in keypad order.
pub static BUILTIN: &[OperationDescriptor] = &[
    OperationDescriptor {
        token: "π",
        doc: "Archimedes' constant",
        domain: Domain::Any,
        operation: Operation::Constant(PI),
    },
    OperationDescriptor {
        token: "e",
        doc: "Euler's number",
        domain: Domain::Any,
        operation: Operation::Constant(E),
    },
    OperationDescriptor {
        token: "eˣ",
        doc: "natural exponential",
        domain: Domain::Any,
        operation: Operation::Unary(f64::exp),
    },
    OperationDescriptor {
        token: "10ˣ",
        doc: "base-10 exponential",
        domain: Domain::Any,
        operation: Operation::Unary(|x| 10.0_f64.powf(x)),
    },
    OperationDescriptor {
        token: "√",
        doc: "square root",
        domain: Domain::NonNegative,
        operation: Operation::Unary(f64::sqrt),
    },
    OperationDescriptor {
        token: "sin",
        doc: "sine (radians)",
        domain: Domain::Any,
        operation: Operation::Unary(f64::sin),
    },
    OperationDescriptor {
        token: "cos",
        doc: "cosine (radians)",
        domain: Domain::Any,
        operation: Operation::Unary(f64::cos),
    },
    OperationDescriptor {
        token: "tan",
        doc: "tangent (radians)",
        domain: Domain::Any,
        operation: Operation::Unary(f64::tan),
    },
    OperationDescriptor {
        token: "㏑",
        doc: "natural logarithm",
        domain: Domain::Positive,
        operation: Operation::Unary(f64::ln),
    },
    OperationDescriptor {
        token: "㏒₁₀",
        doc: "base-10 logarithm",
        domain: Domain::Positive,
        operation: Operation::Unary(f64::log10),
    },
    OperationDescriptor {
        token: "±",
        doc: "sign change",
        domain: Domain::Any,
        operation: Operation::Unary(|x| -x),
    },
    OperationDescriptor {
        token: "x⁻¹",
        doc: "reciprocal",
        domain: Domain::NonZero,
        operation: Operation::Unary(|x| x.recip()),
    },
    OperationDescriptor {
        token: "x²",
        doc: "square",
        domain: Domain::Any,
        operation: Operation::Unary(|x| x * x),
    },
    OperationDescriptor {
        token: "x³",
        doc: "cube",
        domain: Domain::Any,
        operation: Operation::Unary(|x| x * x * x),
    },
    OperationDescriptor {
        token: "+",
        doc: "addition",
        domain: Domain::Any,
        operation: Operation::Binary(|a, b| a + b),
    },
    OperationDescriptor {
        token: "−",
        doc: "subtraction",
        domain: Domain::Any,
        operation: Operation::Binary(|a, b| a - b),
    },
    OperationDescriptor {
        token: "×",
        doc: "multiplication",
        domain: Domain::Any,
        operation: Operation::Binary(|a, b| a * b),
    },
    OperationDescriptor {
        token: "÷",
        doc: "division",
        domain: Domain::NonZeroRhs,
        operation: Operation::Binary(|a, b| a / b),
    },
    OperationDescriptor {
        token: "=",
        doc: "resolve the pending operation",
        domain: Domain::Any,
        operation: Operation::Equals,
    },
    OperationDescriptor {
        token: "Rand",
        doc: "uniform random value in [0, 1)",
        domain: Domain::Any,
        operation: Operation::Custom(|rng| rng.uniform()),
    },
];

/// Token lookup table, built once at engine construction.
pub struct Registry {
    table: IndexMap<&'static str, &'static OperationDescriptor>,
}

impl Registry {
    /// Build a registry over the builtin operation set.
    pub fn builtin() -> Self {
        Self::from_descriptors(BUILTIN)
    }

    /// Build a registry over a caller-supplied descriptor table.
    ///
    /// Later descriptors shadow earlier ones with the same token.
    pub fn from_descriptors(descriptors: &'static [OperationDescriptor]) -> Self {
        let table = descriptors.iter().map(|d| (d.token, d)).collect();
        Self { table }
    }

    /// Look up a token. Returns `None` for unregistered tokens.
    pub fn lookup(&self, token: &str) -> Option<&'static OperationDescriptor> {
        self.table.get(token).copied()
    }

    /// Check if a token is registered.
    pub fn is_known(&self, token: &str) -> bool {
        self.table.contains_key(token)
    }

    /// Registered tokens, in registration order.
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }
}
