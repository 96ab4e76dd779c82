//!
//! A crate containing finite automata related functionality. This includes the
//! automaton model with its builder operations, and the simulation of
//! deterministic and nondeterministic automata on input strings.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod automaton;
mod error;
mod random_automaton;
mod simulation;
mod symbol;
mod transition_index;

pub use automaton::*;
pub use error::*;
pub use random_automaton::*;
pub use simulation::*;
pub use symbol::*;
pub use transition_index::*;
