use std::fmt;

use log::debug;
use log::trace;
use regular_utilities::IdCounter;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use serde::Serialize;

use crate::AutomatonError;
use crate::Symbol;

/// The identifier of a state.
pub type StateId = String;

/// The identifier of a transition.
pub type TransitionId = String;

/// A single state of an automaton.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: StateId,
    /// Display name, not required to be unique.
    pub label: String,
    pub is_start: bool,
    pub is_accept: bool,
}

/// A transition between two states, referring to them by identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub id: TransitionId,
    pub from: StateId,
    pub to: StateId,
    pub input: Symbol,
}

/// A structured edit request for a single state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateEdit {
    Remove,
    ToggleAccept,
    ToggleStart,
    Rename(String),
}

/// A finite automaton consisting of states and labelled transitions.
///
/// Automata are values: every edit operation leaves `self` untouched and
/// returns the edited snapshot. When `is_deterministic` holds the builder
/// operations maintain that every state has at most one transition for every
/// terminal symbol, and no epsilon transitions can be added.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Automaton {
    states: Vec<State>,
    transitions: Vec<Transition>,
    is_deterministic: bool,

    /// Source of fresh state and transition identifiers.
    #[serde(default)]
    ids: IdCounter,
}

impl Automaton {
    /// Creates an automaton without states.
    pub fn new(is_deterministic: bool) -> Automaton {
        Automaton {
            states: Vec::new(),
            transitions: Vec::new(),
            is_deterministic,
            ids: IdCounter::new(),
        }
    }

    /// Creates an automaton from its parts, checking all the invariants.
    pub fn from_parts(
        states: Vec<State>,
        transitions: Vec<Transition>,
        is_deterministic: bool,
    ) -> Result<Automaton, AutomatonError> {
        let automaton = Automaton {
            states,
            transitions,
            is_deterministic,
            ids: IdCounter::new(),
        };

        automaton.check_invariants()?;
        Ok(automaton)
    }

    /// Returns the states in insertion order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns the transitions in insertion order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns whether the automaton is labelled as deterministic.
    pub fn is_deterministic(&self) -> bool {
        self.is_deterministic
    }

    /// Returns the state with the given identifier.
    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.iter().find(|state| state.id == id)
    }

    /// Returns the transition with the given identifier.
    pub fn transition(&self, id: &str) -> Option<&Transition> {
        self.transitions.iter().find(|transition| transition.id == id)
    }

    pub fn start_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.iter().filter(|state| state.is_start)
    }

    pub fn accept_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.iter().filter(|state| state.is_accept)
    }

    /// Returns the outgoing transitions of the given state.
    pub fn transitions_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Transition> + 'a {
        self.transitions.iter().filter(move |transition| transition.from == id)
    }

    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }

    pub fn num_of_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Appends a new state with a fresh identifier that is neither a start nor
    /// an accepting state.
    pub fn add_state(&self, label: impl Into<String>) -> Automaton {
        let mut result = self.clone();
        let Automaton { states, ids, .. } = &mut result;

        let id = ids.fresh("state_", |id| states.iter().any(|state| state.id == id));
        let label = label.into();
        trace!("Adding state {id} with label {label}");

        states.push(State {
            id,
            label,
            is_start: false,
            is_accept: false,
        });
        result
    }

    /// Appends a new state labelled `q<n>`, where `n` is the number of states
    /// after insertion.
    pub fn add_state_default(&self) -> Automaton {
        self.add_state(format!("q{}", self.states.len() + 1))
    }

    /// Removes the state together with every transition from or to it. Does
    /// nothing when the state does not exist.
    pub fn remove_state(&self, id: &str) -> Automaton {
        let mut result = self.clone();
        result.states.retain(|state| state.id != id);
        result
            .transitions
            .retain(|transition| transition.from != id && transition.to != id);

        trace!(
            "Removed state {id} and {} transitions",
            self.transitions.len() - result.transitions.len()
        );
        result
    }

    /// Flips whether the given state is accepting. Does nothing when the state
    /// does not exist.
    pub fn toggle_accept(&self, id: &str) -> Automaton {
        self.update_state(id, |state| state.is_accept = !state.is_accept)
    }

    /// Flips whether the given state is a start state. Does nothing when the
    /// state does not exist.
    pub fn toggle_start(&self, id: &str) -> Automaton {
        self.update_state(id, |state| state.is_start = !state.is_start)
    }

    /// Replaces the label of the given state.
    pub fn rename_state(&self, id: &str, label: impl Into<String>) -> Automaton {
        let label = label.into();
        self.update_state(id, move |state| state.label = label)
    }

    /// Applies a structured edit request to the given state.
    pub fn apply_edit(&self, id: &str, edit: StateEdit) -> Automaton {
        match edit {
            StateEdit::Remove => self.remove_state(id),
            StateEdit::ToggleAccept => self.toggle_accept(id),
            StateEdit::ToggleStart => self.toggle_start(id),
            StateEdit::Rename(label) => self.rename_state(id, label),
        }
    }

    /// Adds one transition from `from` to `to` for every given symbol.
    ///
    /// Either all transitions are added or, on error, none of them. Terminals
    /// that are whitespace or the epsilon character are rejected. For a
    /// deterministic automaton this fails when `from` already has a transition
    /// on one of the symbols, or when one of the symbols is epsilon.
    pub fn add_transition(
        &self,
        from: &str,
        to: &str,
        symbols: impl IntoIterator<Item = Symbol>,
    ) -> Result<Automaton, AutomatonError> {
        let mut unique: Vec<Symbol> = Vec::new();
        for symbol in symbols {
            if !symbol.is_valid() {
                return Err(AutomatonError::InvalidSymbol {
                    symbol: symbol.to_string(),
                });
            }

            if !unique.contains(&symbol) {
                unique.push(symbol);
            }
        }

        if unique.is_empty() {
            return Err(AutomatonError::NoSymbols);
        }

        for id in [from, to] {
            if self.state(id).is_none() {
                return Err(AutomatonError::UnknownState { id: id.to_string() });
            }
        }

        if self.is_deterministic {
            for symbol in &unique {
                if symbol.is_epsilon() {
                    return Err(AutomatonError::EpsilonInDeterministic { from: from.to_string() });
                }

                if self.transitions_from(from).any(|transition| transition.input == *symbol) {
                    debug!("Rejected second transition on {symbol} from {from}");
                    return Err(AutomatonError::DuplicateDeterministicTransition {
                        from: from.to_string(),
                        symbol: *symbol,
                    });
                }
            }
        }

        let mut result = self.clone();
        let Automaton { transitions, ids, .. } = &mut result;
        for input in unique {
            let id = ids.fresh("t_", |id| transitions.iter().any(|transition| transition.id == id));
            trace!("Adding transition {id}: {from} --[{input}]-> {to}");

            transitions.push(Transition {
                id,
                from: from.to_string(),
                to: to.to_string(),
                input,
            });
        }

        Ok(result)
    }

    /// Removes the transition with the given identifier. Does nothing when the
    /// transition does not exist.
    pub fn remove_transition(&self, id: &str) -> Automaton {
        let mut result = self.clone();
        result.transitions.retain(|transition| transition.id != id);
        result
    }

    /// Changes the determinism label. Existing transitions are kept as is, only
    /// subsequent calls to [Automaton::add_transition] are affected.
    pub fn set_deterministic(&self, is_deterministic: bool) -> Automaton {
        Automaton {
            is_deterministic,
            ..self.clone()
        }
    }

    /// Returns true iff the transitions do not contain epsilon transitions and
    /// at most one transition for every state and symbol.
    pub fn is_structurally_deterministic(&self) -> bool {
        let mut seen: FxHashSet<(&str, Symbol)> = FxHashSet::default();

        self.transitions
            .iter()
            .all(|transition| !transition.input.is_epsilon() && seen.insert((transition.from.as_str(), transition.input)))
    }

    /// Checks the invariants of a snapshot that was not produced by the builder
    /// operations, for example one that was deserialized.
    ///
    /// Epsilon transitions are tolerated in a deterministic automaton, they can
    /// only not be added through [Automaton::add_transition].
    pub fn check_invariants(&self) -> Result<(), AutomatonError> {
        let mut state_ids: FxHashSet<&str> = FxHashSet::default();
        for state in &self.states {
            if !state_ids.insert(state.id.as_str()) {
                return Err(AutomatonError::DuplicateId { id: state.id.clone() });
            }
        }

        let mut transition_ids: FxHashSet<&str> = FxHashSet::default();
        let mut outgoing: FxHashSet<(&str, Symbol)> = FxHashSet::default();
        for transition in &self.transitions {
            if !transition_ids.insert(transition.id.as_str()) {
                return Err(AutomatonError::DuplicateId {
                    id: transition.id.clone(),
                });
            }

            if !transition.input.is_valid() {
                return Err(AutomatonError::InvalidSymbol {
                    symbol: transition.input.to_string(),
                });
            }

            for state in [&transition.from, &transition.to] {
                if !state_ids.contains(state.as_str()) {
                    return Err(AutomatonError::DanglingTransition {
                        transition: transition.id.clone(),
                        state: state.clone(),
                    });
                }
            }

            if self.is_deterministic
                && !transition.input.is_epsilon()
                && !outgoing.insert((transition.from.as_str(), transition.input))
            {
                return Err(AutomatonError::DuplicateDeterministicTransition {
                    from: transition.from.clone(),
                    symbol: transition.input,
                });
            }
        }

        Ok(())
    }

    fn update_state(&self, id: &str, update: impl FnOnce(&mut State)) -> Automaton {
        let mut result = self.clone();
        if let Some(state) = result.states.iter_mut().find(|state| state.id == id) {
            update(state);
        }
        result
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of states: {}", self.states.len())?;
        writeln!(f, "Number of transitions: {}", self.transitions.len())?;
        writeln!(f, "Deterministic: {}", self.is_deterministic)?;

        for state in &self.states {
            let start = if state.is_start { " (start)" } else { "" };
            let accept = if state.is_accept { " (accept)" } else { "" };
            writeln!(f, "{} [{}]{start}{accept}", state.id, state.label)?;
        }

        for transition in &self.transitions {
            writeln!(f, "{} --[{}]-> {}", transition.from, transition.input, transition.to)?;
        }

        Ok(())
    }
}
