use thiserror::Error;

use crate::StateId;
use crate::Symbol;
use crate::TransitionId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("State {from} already has a transition on {symbol} in a deterministic automaton")]
    DuplicateDeterministicTransition { from: StateId, symbol: Symbol },

    #[error("Epsilon transitions from state {from} are not allowed in a deterministic automaton")]
    EpsilonInDeterministic { from: StateId },

    #[error("State {id} does not exist")]
    UnknownState { id: StateId },

    #[error("A transition requires at least one symbol")]
    NoSymbols,

    #[error("Invalid symbol {symbol:?}, expected a single character or ε")]
    InvalidSymbol { symbol: String },

    #[error("Identifier {id} is used more than once")]
    DuplicateId { id: String },

    #[error("Transition {transition} refers to state {state} which does not exist")]
    DanglingTransition { transition: TransitionId, state: StateId },
}
