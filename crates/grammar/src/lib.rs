//!
//! A crate containing right-linear (regular) grammars, the validation of their
//! productions, and the translation of a grammar into an equivalent
//! nondeterministic finite automaton.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod error;
mod grammar;
mod translate;
mod validate;

pub use error::*;
pub use grammar::*;
pub use translate::*;
pub use validate::*;
