use regular_automaton::AutomatonError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("Alternative {alternative:?} of {head} is not a terminal, a terminal followed by a nonterminal, or ε")]
    MalformedProduction { head: char, alternative: String },

    #[error("Start symbol {symbol} is not one of the nonterminals")]
    MissingStartSymbol { symbol: char },

    #[error("The head {head} of a production must be a nonterminal")]
    InvalidHead { head: char },

    #[error("Cannot parse production {text:?}, expected <head> -> <alternative> | ...")]
    InvalidProductionSyntax { text: String },

    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}
