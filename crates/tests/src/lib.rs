//! Integration test harness for the tally engine.
//!
//! Drives the engine exactly the way a keypad layer would: typed calls in,
//! `(result, pending, description)` out. Tests script input as a flat key
//! sequence instead of hand-wiring engine calls.

use tally_engine::{Bindings, Engine, Evaluation, Result};

/// One scripted keypad input.
#[derive(Debug, Clone, Copy)]
pub enum Key {
    /// A literal operand
    Num(f64),
    /// An operation token
    Op(&'static str),
    /// A variable reference
    Var(&'static str),
}

/// Test harness wrapping an engine and a set of variable bindings.
pub struct TestHarness {
    engine: Engine,
    bindings: Bindings,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a harness with a fixed generator seed.
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Create a harness whose `Rand` stream starts from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            engine: Engine::with_seed(seed),
            bindings: Bindings::new(),
        }
    }

    /// Record one key.
    pub fn press(&mut self, key: Key) -> &mut Self {
        match key {
            Key::Num(value) => self.engine.record_operand(value),
            Key::Op(token) => self.engine.record_operation(token),
            Key::Var(name) => self.engine.record_variable(name),
        }
        self
    }

    /// Record a key sequence in order.
    pub fn sequence(&mut self, keys: &[Key]) -> &mut Self {
        for key in keys {
            self.press(*key);
        }
        self
    }

    /// Bind a variable for subsequent evaluations.
    pub fn bind(&mut self, name: &str, value: f64) -> &mut Self {
        self.bindings.insert(name.to_string(), value);
        self
    }

    /// Discard the most recently recorded key.
    pub fn undo(&mut self) -> &mut Self {
        self.engine.undo();
        self
    }

    /// Clear the tape.
    pub fn reset(&mut self) -> &mut Self {
        self.engine.reset();
        self
    }

    /// Replay the tape leniently.
    pub fn evaluate(&mut self) -> Evaluation {
        if self.bindings.is_empty() {
            self.engine.evaluate(None)
        } else {
            self.engine.evaluate(Some(&self.bindings))
        }
    }

    /// Replay the tape with domain checking.
    pub fn try_evaluate(&mut self) -> Result<Evaluation> {
        if self.bindings.is_empty() {
            self.engine.try_evaluate(None)
        } else {
            self.engine.try_evaluate(Some(&self.bindings))
        }
    }

    /// Current lenient result.
    pub fn result(&mut self) -> Option<f64> {
        self.evaluate().result
    }

    /// Current expression description.
    pub fn description(&mut self) -> String {
        self.evaluate().description
    }

    /// Whether a binary operation is still pending.
    pub fn pending(&mut self) -> bool {
        self.evaluate().pending
    }
}
