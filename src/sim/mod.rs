//! Game simulation module
//!
//! All gameplay logic lives here. It must stay pure:
//! - Randomness only through an injected `Rng`
//! - No rendering or platform dependencies

pub mod command;
pub mod state;

pub use command::{Command, apply};
pub use state::{GameError, GameEvent, GameState, Guess, Outcome, StateError};
