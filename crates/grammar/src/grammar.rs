use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use log::trace;
use regular_automaton::EPSILON;
use regular_automaton::EPSILON_CHAR;
use serde::Deserialize;
use serde::Serialize;

use crate::GrammarError;

/// Returns true iff the symbol is a nonterminal, i.e. an upper case letter.
pub fn is_nonterminal(symbol: char) -> bool {
    symbol.is_ascii_uppercase()
}

/// Returns true iff the symbol can be used as a terminal.
pub fn is_terminal(symbol: char) -> bool {
    !is_nonterminal(symbol) && !symbol.is_whitespace() && symbol != EPSILON_CHAR
}

/// The shape of a single alternative in the body of a right-linear production.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alternative {
    /// A single terminal, `a`.
    Terminal(char),
    /// A terminal followed by a nonterminal, `aB`.
    Step(char, char),
    /// The empty word.
    Epsilon,
}

impl Alternative {
    /// Classifies the given alternative, returns `None` when it is not in
    /// right-linear form.
    pub fn classify(alternative: &str) -> Option<Alternative> {
        if alternative == EPSILON {
            return Some(Alternative::Epsilon);
        }

        let mut chars = alternative.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(a), None, None) if is_terminal(a) => Some(Alternative::Terminal(a)),
            (Some(a), Some(b), None) if is_terminal(a) && is_nonterminal(b) => Some(Alternative::Step(a, b)),
            _ => None,
        }
    }
}

/// A production `head -> alternative | ... | alternative`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    pub head: char,
    pub body: Vec<String>,
}

impl Production {
    pub fn new<S: Into<String>>(head: char, body: impl IntoIterator<Item = S>) -> Production {
        Production {
            head,
            body: body.into_iter().map(Into::into).collect(),
        }
    }
}

impl FromStr for Production {
    type Err = GrammarError;

    /// Parses the textual form `S -> aA | b | ε`, where `→` can be used instead
    /// of `->`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || GrammarError::InvalidProductionSyntax { text: text.to_string() };

        let (head, body) = text
            .split_once("->")
            .or_else(|| text.split_once('→'))
            .ok_or_else(invalid)?;

        let mut head_chars = head.trim().chars();
        let head = match (head_chars.next(), head_chars.next()) {
            (Some(head), None) => head,
            _ => return Err(invalid()),
        };

        let body: Vec<String> = body.split('|').map(|alternative| alternative.trim().to_string()).collect();
        if body.iter().any(String::is_empty) {
            return Err(invalid());
        }

        Ok(Production { head, body })
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.head, self.body.join(" | "))
    }
}

/// A right-linear grammar.
///
/// Like automata, grammars are values and every edit returns a new grammar.
/// The nonterminals and terminals are derived from the productions: the heads
/// and the symbols occurring in the bodies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grammar {
    start_symbol: char,
    non_terminals: BTreeSet<char>,
    terminals: BTreeSet<char>,
    productions: Vec<Production>,
}

impl Grammar {
    /// Creates a grammar without productions.
    pub fn new(start_symbol: char) -> Grammar {
        Grammar {
            start_symbol,
            non_terminals: BTreeSet::new(),
            terminals: BTreeSet::new(),
            productions: Vec::new(),
        }
    }

    /// Creates a grammar with the given productions.
    pub fn with_productions(start_symbol: char, productions: Vec<Production>) -> Grammar {
        let mut grammar = Grammar {
            productions,
            ..Grammar::new(start_symbol)
        };
        grammar.update_symbols();
        grammar
    }

    /// Parses one production per non-empty line.
    pub fn parse(start_symbol: char, text: &str) -> Result<Grammar, GrammarError> {
        let productions = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::parse::<Production>)
            .collect::<Result<Vec<Production>, GrammarError>>()?;

        Ok(Grammar::with_productions(start_symbol, productions))
    }

    pub fn start_symbol(&self) -> char {
        self.start_symbol
    }

    pub fn non_terminals(&self) -> &BTreeSet<char> {
        &self.non_terminals
    }

    pub fn terminals(&self) -> &BTreeSet<char> {
        &self.terminals
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn set_start_symbol(&self, start_symbol: char) -> Grammar {
        Grammar {
            start_symbol,
            ..self.clone()
        }
    }

    pub fn add_production(&self, production: Production) -> Grammar {
        let mut result = self.clone();
        result.productions.push(production);
        result.update_symbols();
        result
    }

    /// Removes the production at the given index, does nothing when it is out
    /// of range.
    pub fn remove_production(&self, index: usize) -> Grammar {
        let mut result = self.clone();
        if index < result.productions.len() {
            result.productions.remove(index);
            result.update_symbols();
        }
        result
    }

    /// Replaces the production at the given index, does nothing when it is out
    /// of range.
    pub fn update_production(&self, index: usize, production: Production) -> Grammar {
        let mut result = self.clone();
        if let Some(entry) = result.productions.get_mut(index) {
            *entry = production;
            result.update_symbols();
        }
        result
    }

    /// Recomputes the nonterminals and terminals from the productions.
    fn update_symbols(&mut self) {
        self.non_terminals.clear();
        self.terminals.clear();

        for production in &self.productions {
            self.non_terminals.insert(production.head);

            for alternative in production.body.iter().filter(|alternative| *alternative != EPSILON) {
                for symbol in alternative.chars() {
                    if is_nonterminal(symbol) {
                        self.non_terminals.insert(symbol);
                    } else if is_terminal(symbol) {
                        self.terminals.insert(symbol);
                    }
                }
            }
        }

        trace!(
            "Nonterminals {:?}, terminals {:?}",
            self.non_terminals,
            self.terminals
        );
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start symbol: {}", self.start_symbol)?;
        for production in &self.productions {
            writeln!(f, "{production}")?;
        }

        Ok(())
    }
}
