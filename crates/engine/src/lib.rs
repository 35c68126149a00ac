//! Tally Engine
//!
//! Records keypad input as an ordered tape of steps and defers all
//! computation to an on-demand replay pass over it. Undo is a structural
//! truncation of the tape, never a numeric rollback.

pub mod engine;
pub mod error;
pub mod format;
pub mod replay;
pub mod tape;

pub use engine::Engine;
pub use error::{Error, Result};
pub use replay::{Bindings, Evaluation};
pub use tape::{Step, Tape};
