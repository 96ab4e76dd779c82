use log::debug;
use log::warn;
use regular_automaton::Automaton;
use regular_automaton::State;
use regular_automaton::Symbol;
use regular_automaton::Transition;
use regular_utilities::IdCounter;

use crate::validate_grammar;
use crate::Alternative;
use crate::Grammar;
use crate::GrammarError;

/// The identifier and label of the state receiving terminal-only alternatives.
pub const ACCEPT_STATE: &str = "ACCEPT";

/// Validates the grammar and translates it into a nondeterministic automaton
/// recognizing the same language.
pub fn grammar_to_automaton(grammar: &Grammar) -> Result<Automaton, GrammarError> {
    validate_grammar(grammar)?;
    translate_unchecked(grammar)
}

/// Translates a grammar into a nondeterministic automaton without validating
/// it first. Alternatives that are not right-linear are skipped.
///
/// Every nonterminal becomes a state identified by the nonterminal itself,
/// with the start symbol as the only start state. An alternative `aB` of `A`
/// becomes a transition `A --a-> B`, an alternative `a` a transition to the
/// accepting [ACCEPT_STATE], and an alternative ε makes `A` accepting.
pub fn translate_unchecked(grammar: &Grammar) -> Result<Automaton, GrammarError> {
    let mut states: Vec<State> = Vec::new();
    for non_terminal in grammar.non_terminals() {
        ensure_state(&mut states, *non_terminal, grammar.start_symbol());
    }

    states.push(State {
        id: ACCEPT_STATE.to_string(),
        label: ACCEPT_STATE.to_string(),
        is_start: false,
        is_accept: true,
    });

    let mut ids = IdCounter::new();
    let mut transitions: Vec<Transition> = Vec::new();
    for production in grammar.productions() {
        let head = production.head;
        ensure_state(&mut states, head, grammar.start_symbol());

        for alternative in &production.body {
            let (input, to) = match Alternative::classify(alternative) {
                Some(Alternative::Terminal(input)) => (input, ACCEPT_STATE.to_string()),
                Some(Alternative::Step(input, to)) => {
                    ensure_state(&mut states, to, grammar.start_symbol());
                    (input, to.to_string())
                }
                Some(Alternative::Epsilon) => {
                    if let Some(state) = states.iter_mut().find(|state| state.id == head.to_string()) {
                        state.is_accept = true;
                    }
                    continue;
                }
                None => {
                    warn!("Skipping alternative {alternative:?} of {head}, it is not right-linear");
                    continue;
                }
            };

            transitions.push(Transition {
                id: format!("t_{head}_{alternative}_{}", ids.next_value()),
                from: head.to_string(),
                to,
                input: Symbol::Terminal(input),
            });
        }
    }

    debug!(
        "Translated grammar with {} productions into {} states and {} transitions",
        grammar.productions().len(),
        states.len(),
        transitions.len()
    );

    Ok(Automaton::from_parts(states, transitions, false)?)
}

/// Adds a state for the given nonterminal unless it already exists.
fn ensure_state(states: &mut Vec<State>, non_terminal: char, start_symbol: char) {
    let id = non_terminal.to_string();
    if states.iter().all(|state| state.id != id) {
        states.push(State {
            label: id.clone(),
            id,
            is_start: non_terminal == start_symbol,
            is_accept: false,
        });
    }
}
