use log::trace;
use serde::Deserialize;
use serde::Serialize;

/// A monotonic counter that hands out identifiers for a single automaton or
/// grammar instance.
///
/// The counter is part of the value it belongs to, so cloning a snapshot and
/// applying the same sequence of operations yields the same identifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdCounter(u64);

impl IdCounter {
    /// Creates a counter that has not handed out any identifier yet.
    pub fn new() -> IdCounter {
        IdCounter(0)
    }

    /// Returns the number of identifiers handed out so far.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Advances the counter and returns the new value, starting at one.
    pub fn next_value(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    /// Returns `<prefix><n>` for the next value `n` for which `in_use` does not
    /// hold. Values that are skipped are consumed.
    pub fn fresh(&mut self, prefix: &str, in_use: impl Fn(&str) -> bool) -> String {
        loop {
            let id = format!("{prefix}{}", self.next_value());
            if !in_use(&id) {
                return id;
            }

            trace!("Identifier {id} is already taken");
        }
    }
}
