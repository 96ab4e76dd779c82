use regular_automaton::accepts;
use regular_automaton::Simulation;
use regular_grammar::grammar_to_automaton;
use regular_grammar::validate_grammar;
use regular_grammar::Grammar;
use regular_grammar::GrammarError;
use regular_grammar::Production;
use regular_grammar::ACCEPT_STATE;
use test_case::test_case;
use test_log::test;

fn sample() -> Grammar {
    Grammar::parse('S', "S -> aA | b\nA -> b").unwrap()
}

#[test_case("ab", true ; "terminal then nonterminal")]
#[test_case("b", true ; "single terminal")]
#[test_case("a", false ; "incomplete")]
#[test_case("", false ; "empty")]
#[test_case("ba", false ; "trailing symbol")]
fn test_sample_grammar(input: &str, expected: bool) {
    let automaton = grammar_to_automaton(&sample()).unwrap();

    assert_eq!(accepts(&automaton, input), expected);
    assert_eq!(Simulation::new(&automaton, input).run(), expected);
}

#[test_case("", true ; "empty")]
#[test_case("a", true ; "one")]
#[test_case("aa", true ; "two")]
#[test_case("aaa", true ; "three")]
#[test_case("b", false ; "other terminal")]
fn test_epsilon_production(input: &str, expected: bool) {
    let grammar = Grammar::parse('S', "S -> aS | ε").unwrap();
    let automaton = grammar_to_automaton(&grammar).unwrap();

    assert!(automaton.state("S").unwrap().is_accept);
    assert_eq!(accepts(&automaton, input), expected);
}

#[test]
fn test_validator_rejections() {
    let three = Grammar::new('S').add_production(Production::new('S', ["abc"]));
    assert_eq!(
        validate_grammar(&three),
        Err(GrammarError::MalformedProduction {
            head: 'S',
            alternative: "abc".to_string()
        })
    );

    let reversed = Grammar::new('S').add_production(Production::new('S', ["Ab"]));
    assert!(matches!(
        grammar_to_automaton(&reversed),
        Err(GrammarError::MalformedProduction { .. })
    ));
}

#[test]
fn test_undeclared_nonterminal_gets_a_state() {
    // A snapshot as an external editor could store it, where B is used but not declared.
    let json = r#"{
        "startSymbol": "S",
        "nonTerminals": ["S"],
        "terminals": ["a", "b"],
        "productions": [
            { "head": "S", "body": ["aB"] },
            { "head": "B", "body": ["b"] }
        ]
    }"#;

    let grammar: Grammar = serde_json::from_str(json).unwrap();
    let automaton = grammar_to_automaton(&grammar).unwrap();

    assert!(automaton.state("B").is_some());
    assert!(automaton.check_invariants().is_ok());
    assert!(accepts(&automaton, "ab"));
    assert!(!accepts(&automaton, "a"));
}

#[test]
fn test_grammar_round_trip() {
    let grammar = sample();

    let json = serde_json::to_string(&grammar).unwrap();
    let result: Grammar = serde_json::from_str(&json).unwrap();
    assert_eq!(result, grammar);

    let automaton = grammar_to_automaton(&grammar).unwrap();
    let json = serde_json::to_string(&automaton).unwrap();
    assert_eq!(serde_json::from_str::<regular_automaton::Automaton>(&json).unwrap(), automaton);
}

#[test]
fn test_edited_automaton_after_translation() {
    // The translated automaton can be edited like any other automaton.
    let automaton = grammar_to_automaton(&sample())
        .unwrap()
        .remove_state(ACCEPT_STATE)
        .add_state("final")
        .toggle_accept("state_1");

    assert!(!accepts(&automaton, "b"));
    let automaton = automaton
        .add_transition("S", "state_1", [regular_automaton::Symbol::Terminal('b')])
        .unwrap();
    assert!(accepts(&automaton, "b"));
}
