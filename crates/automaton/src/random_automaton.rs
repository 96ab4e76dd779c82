use rand::Rng;

use crate::Automaton;
use crate::State;
use crate::Symbol;
use crate::Transition;

/// Generates a nondeterministic automaton with the desired number of states,
/// using symbols from the given alphabet and at most `outdegree` outgoing
/// transitions per state. Every transition is an epsilon transition with the
/// given probability.
///
/// Roughly a third of the states are start states and a third are accepting.
/// Characters of the alphabet that are not valid terminals are ignored, and a
/// NaN probability is treated as zero.
pub fn random_automaton<R: Rng>(
    rng: &mut R,
    num_of_states: usize,
    alphabet: &[char],
    outdegree: usize,
    epsilon_probability: f64,
) -> Automaton {
    let mut automaton = Automaton::new(false);
    for _ in 0..num_of_states {
        automaton = automaton.add_state_default();
    }

    let mut states: Vec<State> = automaton.states().to_vec();
    for state in &mut states {
        state.is_start = rng.random_bool(1.0 / 3.0);
        state.is_accept = rng.random_bool(1.0 / 3.0);
    }

    let alphabet: Vec<char> = alphabet
        .iter()
        .copied()
        .filter(|c| Symbol::Terminal(*c).is_valid())
        .collect();
    let epsilon_probability = if epsilon_probability.is_nan() {
        0.0
    } else {
        epsilon_probability.clamp(0.0, 1.0)
    };

    let mut transitions: Vec<Transition> = Vec::new();
    for from in 0..num_of_states {
        // Introduce outgoing transitions for this state based on the desired out degree.
        for _ in 0..rng.random_range(0..=outdegree) {
            let input = if alphabet.is_empty() || rng.random_bool(epsilon_probability) {
                Symbol::Epsilon
            } else {
                Symbol::Terminal(alphabet[rng.random_range(0..alphabet.len())])
            };
            let to = rng.random_range(0..num_of_states);

            transitions.push(Transition {
                id: format!("t_{}", transitions.len() + 1),
                from: states[from].id.clone(),
                to: states[to].id.clone(),
                input,
            });
        }
    }

    Automaton::from_parts(states, transitions, false)
        .expect("Generated transitions use unique ids, existing states and valid symbols")
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_log::test;

    use crate::EPSILON_CHAR;

    use super::*;

    #[test]
    fn test_random_automaton() {
        let mut rng = StdRng::seed_from_u64(3);
        let automaton = random_automaton(&mut rng, 10, &['a', 'b'], 3, 0.2);

        assert_eq!(automaton.num_of_states(), 10);
        assert!(!automaton.is_deterministic());
        assert!(automaton.check_invariants().is_ok());
    }

    #[test]
    fn test_random_automaton_without_alphabet() {
        let mut rng = StdRng::seed_from_u64(5);
        let automaton = random_automaton(&mut rng, 4, &[], 2, 0.0);

        assert!(automaton.transitions().iter().all(|transition| transition.input.is_epsilon()));
    }

    #[test]
    fn test_random_automaton_degenerate_parameters() {
        let mut rng = StdRng::seed_from_u64(11);
        let automaton = random_automaton(&mut rng, 6, &[' ', EPSILON_CHAR, 'a'], 4, f64::NAN);

        assert!(automaton
            .transitions()
            .iter()
            .all(|transition| transition.input == Symbol::Terminal('a')));
        assert!(automaton.check_invariants().is_ok());
    }
}
