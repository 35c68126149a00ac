//! Input tape
//!
//! The ordered record of keypad input, and the engine's single source of
//! truth: no accumulated value survives outside it. Append-only except for
//! undo, which removes exactly the most recently recorded step. Every
//! evaluation re-folds the remaining prefix from scratch.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One recorded unit of input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Step {
    /// A literal operand
    Number(f64),
    /// An operation token, resolved against the registry at replay time
    OperationSymbol(String),
    /// A named variable, resolved against caller bindings at replay time
    Variable(String),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Number(value) => write!(f, "{value}"),
            Step::OperationSymbol(token) => write!(f, "{token}"),
            Step::Variable(name) => write!(f, "{name}"),
        }
    }
}

/// Ordered record of input steps
#[derive(Debug, Default, Clone)]
pub struct Tape {
    steps: Vec<Step>,
}

impl Tape {
    /// Append a step to the end of the tape. Always succeeds.
    pub fn record(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Remove and return the most recently recorded step.
    ///
    /// Returns `None` on an empty tape.
    pub fn undo(&mut self) -> Option<Step> {
        self.steps.pop()
    }

    /// Drop every recorded step, returning to the initial state.
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Read-only view for the evaluator.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the tape is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
