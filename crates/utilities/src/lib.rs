//!
//! This crate defines general utility functions shared by the automaton and
//! grammar crates.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

pub mod id_counter;
pub mod test_utility;

pub use id_counter::*;
pub use test_utility::*;
