use std::collections::BTreeSet;

use log::debug;
use log::trace;
use rustc_hash::FxHashSet;

use crate::Automaton;
use crate::StateId;
use crate::Transition;
use crate::TransitionIndex;

/// The set of states that are active after reading a prefix of the input.
pub type Configuration = BTreeSet<StateId>;

/// Returns the set of states reachable from `states` using only the epsilon
/// transitions in `transitions`.
pub fn epsilon_closure(states: &Configuration, transitions: &[Transition]) -> Configuration {
    TransitionIndex::new(transitions).epsilon_closure(states)
}

/// Returns the configuration after reading `input` in the given configuration.
/// An empty configuration stays empty.
pub fn step(configuration: &Configuration, input: char, transitions: &[Transition]) -> Configuration {
    TransitionIndex::new(transitions).step(configuration, input)
}

/// Returns the epsilon closure of all the start states.
pub fn initial_configuration(automaton: &Automaton) -> Configuration {
    initial_configuration_indexed(automaton, &TransitionIndex::new(automaton.transitions()))
}

/// Returns true iff the automaton accepts the given input.
///
/// The determinism label is ignored, every automaton is simulated as a
/// nondeterministic one.
pub fn accepts(automaton: &Automaton, input: &str) -> bool {
    let index = TransitionIndex::new(automaton.transitions());
    let mut configuration = initial_configuration_indexed(automaton, &index);

    for symbol in input.chars() {
        if configuration.is_empty() {
            trace!("No active states left before reading {symbol}");
            return false;
        }

        configuration = index.step(&configuration, symbol);
    }

    let accepted = configuration
        .iter()
        .any(|id| automaton.state(id).is_some_and(|state| state.is_accept));

    debug!("Input {input:?} is {}", if accepted { "accepted" } else { "rejected" });
    accepted
}

fn initial_configuration_indexed(automaton: &Automaton, index: &TransitionIndex) -> Configuration {
    let start: Configuration = automaton.start_states().map(|state| state.id.clone()).collect();
    index.epsilon_closure(&start)
}

/// A step-by-step simulation of an automaton on a fixed input, exposing the
/// intermediate configurations.
///
/// The simulation is finished when the input is exhausted or no state is
/// active anymore, after which [Simulation::verdict] is the same as the result
/// of [accepts].
#[derive(Clone, Debug)]
pub struct Simulation {
    index: TransitionIndex,
    accepting: FxHashSet<StateId>,

    input: Vec<char>,
    position: usize,
    configuration: Configuration,

    verdict: Option<bool>,
}

impl Simulation {
    pub fn new(automaton: &Automaton, input: &str) -> Simulation {
        let index = TransitionIndex::new(automaton.transitions());
        let configuration = initial_configuration_indexed(automaton, &index);

        let mut simulation = Simulation {
            index,
            accepting: automaton.accept_states().map(|state| state.id.clone()).collect(),
            input: input.chars().collect(),
            position: 0,
            configuration,
            verdict: None,
        };

        simulation.update_verdict();
        simulation
    }

    /// Returns the currently active states.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Returns the index of the next symbol to read.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the next symbol to read, if any.
    pub fn current_symbol(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.verdict.is_some()
    }

    /// Returns whether the input is accepted, once the simulation is finished.
    pub fn verdict(&self) -> Option<bool> {
        self.verdict
    }

    /// Returns true iff one of the active states is accepting.
    pub fn is_accepting(&self) -> bool {
        self.configuration.iter().any(|id| self.accepting.contains(id))
    }

    /// Reads a single symbol and returns the verdict when the simulation has
    /// finished. Does nothing once finished.
    pub fn advance(&mut self) -> Option<bool> {
        if self.verdict.is_some() {
            return self.verdict;
        }

        if let Some(symbol) = self.current_symbol() {
            self.configuration = self.index.step(&self.configuration, symbol);
            self.position += 1;
        }

        self.update_verdict();
        self.verdict
    }

    /// Reads the remaining input and returns whether it is accepted.
    pub fn run(mut self) -> bool {
        loop {
            if let Some(verdict) = self.advance() {
                return verdict;
            }
        }
    }

    fn update_verdict(&mut self) {
        if self.configuration.is_empty() || self.position >= self.input.len() {
            let verdict = self.is_accepting();
            trace!("Simulation finished at position {} with verdict {verdict}", self.position);
            self.verdict = Some(verdict);
        }
    }
}

/// Yields the configuration after every symbol that is read.
impl Iterator for Simulation {
    type Item = Configuration;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_finished() {
            return None;
        }

        self.advance();
        Some(self.configuration.clone())
    }
}
