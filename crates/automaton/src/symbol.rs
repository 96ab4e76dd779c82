//! Symbol types for automaton transitions.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::AutomatonError;

/// The textual marker of the empty word.
pub const EPSILON: &str = "ε";

/// The character form of [EPSILON].
pub const EPSILON_CHAR: char = 'ε';

/// The input of a transition, either a single terminal character or epsilon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Symbol {
    Terminal(char),
    Epsilon,
}

impl Symbol {
    /// Returns true iff this is the epsilon symbol.
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        *self == Symbol::Epsilon
    }

    /// Returns true iff the symbol has a textual form that parses back to
    /// itself. Whitespace and the epsilon character are not valid terminals.
    pub fn is_valid(&self) -> bool {
        match self {
            Symbol::Terminal(c) => !c.is_whitespace() && *c != EPSILON_CHAR,
            Symbol::Epsilon => true,
        }
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        if value == EPSILON_CHAR {
            Symbol::Epsilon
        } else {
            Symbol::Terminal(value)
        }
    }
}

impl FromStr for Symbol {
    type Err = AutomatonError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => Ok(Symbol::from(c)),
            _ => Err(AutomatonError::InvalidSymbol {
                symbol: text.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Symbol {
    type Error = AutomatonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(c) => write!(f, "{c}"),
            Symbol::Epsilon => write!(f, "{EPSILON}"),
        }
    }
}

/// Parses a comma separated list of symbols, for example `"a, b,ε"`.
///
/// Entries are trimmed and empty entries are ignored. Duplicates are removed
/// while keeping the order of first occurrence.
pub fn parse_symbols(text: &str) -> Result<Vec<Symbol>, AutomatonError> {
    let mut result: Vec<Symbol> = Vec::new();

    for entry in text.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let symbol: Symbol = entry.parse()?;
        if !result.contains(&symbol) {
            result.push(symbol);
        }
    }

    Ok(result)
}
