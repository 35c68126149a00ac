//! Engine facade
//!
//! Owns the tape, the operation registry, and the generator stream, and
//! replays the tape on demand. The facade holds no numeric state between
//! calls: the observable states (empty, operand-only, operation-pending,
//! resolved) are all projections of [`Engine::evaluate`]'s
//! `(result, pending)` pair.

use tracing::{debug, trace};

use tally_registry::Registry;
use tally_registry::rng::RngStream;

use crate::error::Result;
use crate::replay::{self, Bindings, Evaluation};
use crate::tape::{Step, Tape};

/// Recorded-step calculator engine.
///
/// Intended to be owned and driven by a single caller (the keypad event
/// loop); all operations are synchronous and complete in time proportional
/// to the tape length.
pub struct Engine {
    registry: Registry,
    tape: Tape,
    rng: RngStream,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with the builtin operation set.
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Create an engine whose generator stream starts from `seed`.
    ///
    /// Two engines built from the same seed replay identical `Rand` values
    /// in identical order.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_registry(Registry::builtin(), seed)
    }

    /// Create an engine over a caller-supplied registry.
    pub fn with_registry(registry: Registry, seed: u64) -> Self {
        debug!(seed, "engine created");
        Self {
            registry,
            tape: Tape::default(),
            rng: RngStream::new(seed),
        }
    }

    /// Record a literal operand.
    pub fn record_operand(&mut self, value: f64) {
        trace!(value, "operand recorded");
        self.tape.record(Step::Number(value));
    }

    /// Record an operation token.
    ///
    /// Unknown tokens are recorded verbatim; typo tolerance lives in the
    /// evaluator, which skips them.
    pub fn record_operation(&mut self, token: impl Into<String>) {
        let token = token.into();
        trace!(%token, "operation recorded");
        self.tape.record(Step::OperationSymbol(token));
    }

    /// Record a reference to a named variable, resolved at evaluation time.
    pub fn record_variable(&mut self, name: impl Into<String>) {
        let name = name.into();
        trace!(%name, "variable recorded");
        self.tape.record(Step::Variable(name));
    }

    /// Discard the most recently recorded step. No-op on an empty tape.
    pub fn undo(&mut self) {
        match self.tape.undo() {
            Some(step) => debug!(%step, "step undone"),
            None => debug!("undo on empty tape"),
        }
    }

    /// Clear the tape. A fresh engine and a just-reset engine are
    /// observably identical.
    pub fn reset(&mut self) {
        debug!(steps = self.tape.len(), "tape cleared");
        self.tape.clear();
    }

    /// Replay the tape, skipping steps that lack an operand.
    ///
    /// Takes `&mut self` because a `Rand` step advances the generator
    /// stream; everything else about evaluation is a pure fold.
    pub fn evaluate(&mut self, bindings: Option<&Bindings>) -> Evaluation {
        replay::replay(&self.registry, self.tape.steps(), bindings, &mut self.rng)
    }

    /// Replay the tape, reporting domain violations and missing operands.
    ///
    /// The tape is left untouched on error; the caller decides whether to
    /// [`reset`](Engine::reset) or [`undo`](Engine::undo).
    pub fn try_evaluate(&mut self, bindings: Option<&Bindings>) -> Result<Evaluation> {
        replay::replay_checked(&self.registry, self.tape.steps(), bindings, &mut self.rng)
    }

    /// Number of recorded steps.
    pub fn recorded_steps(&self) -> usize {
        self.tape.len()
    }
}
