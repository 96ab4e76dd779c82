use log::trace;
use rustc_hash::FxHashMap;

use crate::Configuration;
use crate::StateId;
use crate::Symbol;
use crate::Transition;

/// Outgoing transitions grouped by source state and symbol, such that a
/// simulation step does not have to scan all transitions.
#[derive(Clone, Debug, Default)]
pub struct TransitionIndex {
    outgoing: FxHashMap<StateId, FxHashMap<Symbol, Vec<StateId>>>,
}

impl TransitionIndex {
    pub fn new(transitions: &[Transition]) -> TransitionIndex {
        let mut outgoing: FxHashMap<StateId, FxHashMap<Symbol, Vec<StateId>>> = FxHashMap::default();

        for transition in transitions {
            let targets = outgoing
                .entry(transition.from.clone())
                .or_default()
                .entry(transition.input)
                .or_default();

            if !targets.contains(&transition.to) {
                targets.push(transition.to.clone());
            }
        }

        TransitionIndex { outgoing }
    }

    /// Returns the targets of the transitions from `from` labelled with `symbol`.
    pub fn targets(&self, from: &str, symbol: Symbol) -> &[StateId] {
        self.outgoing
            .get(from)
            .and_then(|by_symbol| by_symbol.get(&symbol))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the set of states reachable from the given states using only
    /// epsilon transitions, including the given states themselves.
    pub fn epsilon_closure(&self, states: &Configuration) -> Configuration {
        let mut closure = Configuration::new();
        let mut stack: Vec<&str> = states.iter().map(String::as_str).collect();

        while let Some(state) = stack.pop() {
            if closure.contains(state) {
                continue;
            }
            closure.insert(state.to_string());

            for target in self.targets(state, Symbol::Epsilon) {
                if !closure.contains(target) {
                    stack.push(target);
                }
            }
        }

        closure
    }

    /// Returns the epsilon closure of all states reachable from the given
    /// configuration with a transition labelled `input`.
    pub fn step(&self, configuration: &Configuration, input: char) -> Configuration {
        let symbol = Symbol::Terminal(input);

        let reached: Configuration = configuration
            .iter()
            .flat_map(|state| self.targets(state, symbol))
            .cloned()
            .collect();

        trace!("Reading {input} from {configuration:?} reaches {reached:?}");
        self.epsilon_closure(&reached)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn transition(from: &str, input: Symbol, to: &str) -> Transition {
        Transition {
            id: format!("{from}{input}{to}"),
            from: from.to_string(),
            to: to.to_string(),
            input,
        }
    }

    fn configuration(states: &[&str]) -> Configuration {
        states.iter().map(|state| state.to_string()).collect()
    }

    #[test]
    fn test_epsilon_closure() {
        // 0 -ε-> 1 -ε-> 2
        let index = TransitionIndex::new(&[
            transition("0", Symbol::Epsilon, "1"),
            transition("1", Symbol::Epsilon, "2"),
        ]);

        assert_eq!(index.epsilon_closure(&configuration(&["0"])), configuration(&["0", "1", "2"]));
        assert_eq!(index.epsilon_closure(&configuration(&["2"])), configuration(&["2"]));
    }

    #[test]
    fn test_epsilon_cycle_terminates() {
        let index = TransitionIndex::new(&[
            transition("0", Symbol::Epsilon, "1"),
            transition("1", Symbol::Epsilon, "0"),
            transition("1", Symbol::Epsilon, "1"),
        ]);

        assert_eq!(index.epsilon_closure(&configuration(&["1"])), configuration(&["0", "1"]));
    }

    #[test]
    fn test_step() {
        // 0 -a-> 1, 0 -a-> 2, 1 -ε-> 3
        let index = TransitionIndex::new(&[
            transition("0", Symbol::Terminal('a'), "1"),
            transition("0", Symbol::Terminal('a'), "2"),
            transition("1", Symbol::Epsilon, "3"),
        ]);

        let start = configuration(&["0"]);
        assert_eq!(index.step(&start, 'a'), configuration(&["1", "2", "3"]));
        assert!(index.step(&start, 'b').is_empty());
        assert!(index.step(&Configuration::new(), 'a').is_empty());
    }

    #[test]
    fn test_targets_are_unique() {
        let index = TransitionIndex::new(&[
            transition("0", Symbol::Terminal('a'), "1"),
            transition("0", Symbol::Terminal('a'), "1"),
        ]);

        assert_eq!(index.targets("0", Symbol::Terminal('a')), &["1".to_string()]);
        assert!(index.targets("1", Symbol::Terminal('a')).is_empty());
    }
}
