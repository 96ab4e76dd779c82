use log::debug;

use crate::is_nonterminal;
use crate::Alternative;
use crate::Grammar;
use crate::GrammarError;

/// Checks that every alternative of the production is a single terminal, a
/// terminal followed by a nonterminal, or ε.
pub fn validate_production(head: char, body: &[String]) -> Result<(), GrammarError> {
    if !is_nonterminal(head) {
        return Err(GrammarError::InvalidHead { head });
    }

    for alternative in body {
        if Alternative::classify(alternative).is_none() {
            debug!("Alternative {alternative:?} of {head} is not right-linear");
            return Err(GrammarError::MalformedProduction {
                head,
                alternative: alternative.clone(),
            });
        }
    }

    Ok(())
}

/// Checks that the start symbol is a nonterminal of the grammar and that all
/// productions are right-linear, returning the first violation.
pub fn validate_grammar(grammar: &Grammar) -> Result<(), GrammarError> {
    if !grammar.non_terminals().contains(&grammar.start_symbol()) {
        return Err(GrammarError::MissingStartSymbol {
            symbol: grammar.start_symbol(),
        });
    }

    for production in grammar.productions() {
        validate_production(production.head, &production.body)?;
    }

    Ok(())
}

/// Same as [validate_grammar], but reports every violation instead of only
/// the first one.
pub fn validate_grammar_all(grammar: &Grammar) -> Result<(), Vec<GrammarError>> {
    let mut errors = Vec::new();

    if !grammar.non_terminals().contains(&grammar.start_symbol()) {
        errors.push(GrammarError::MissingStartSymbol {
            symbol: grammar.start_symbol(),
        });
    }

    for production in grammar.productions() {
        if !is_nonterminal(production.head) {
            errors.push(GrammarError::InvalidHead { head: production.head });
            continue;
        }

        errors.extend(
            production
                .body
                .iter()
                .filter(|alternative| Alternative::classify(alternative).is_none())
                .map(|alternative| GrammarError::MalformedProduction {
                    head: production.head,
                    alternative: alternative.clone(),
                }),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;
    use test_log::test;

    use crate::Production;

    use super::*;

    fn body(alternatives: &[&str]) -> Vec<String> {
        alternatives.iter().map(|alternative| alternative.to_string()).collect()
    }

    #[test]
    fn test_valid_production() {
        assert_eq!(validate_production('S', &body(&["aA", "b", "ε"])), Ok(()));
        assert_eq!(validate_production('S', &[]), Ok(()));
    }

    #[test_case("abc" ; "three characters")]
    #[test_case("Ab" ; "reversed order")]
    #[test_case("aBC" ; "two nonterminals")]
    fn test_malformed_production(alternative: &str) {
        assert_eq!(
            validate_production('S', &body(&["a", alternative])),
            Err(GrammarError::MalformedProduction {
                head: 'S',
                alternative: alternative.to_string()
            })
        );
    }

    #[test]
    fn test_invalid_head() {
        assert_eq!(
            validate_production('s', &body(&["a"])),
            Err(GrammarError::InvalidHead { head: 's' })
        );
    }

    #[test]
    fn test_missing_start_symbol() {
        let grammar = Grammar::new('S').add_production(Production::new('A', ["a"]));

        assert_eq!(
            validate_grammar(&grammar),
            Err(GrammarError::MissingStartSymbol { symbol: 'S' })
        );
    }

    #[test]
    fn test_first_error_is_reported() {
        let grammar = Grammar::new('S')
            .add_production(Production::new('S', ["abc"]))
            .add_production(Production::new('A', ["Ab"]));

        assert_eq!(
            validate_grammar(&grammar),
            Err(GrammarError::MalformedProduction {
                head: 'S',
                alternative: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_all_errors_are_reported() {
        let grammar = Grammar::new('X')
            .add_production(Production::new('S', ["abc", "a", "Ab"]))
            .add_production(Production::new('a', ["b"]));

        let errors = validate_grammar_all(&grammar).unwrap_err();
        assert_eq!(
            errors,
            vec![
                GrammarError::MissingStartSymbol { symbol: 'X' },
                GrammarError::MalformedProduction {
                    head: 'S',
                    alternative: "abc".to_string()
                },
                GrammarError::MalformedProduction {
                    head: 'S',
                    alternative: "Ab".to_string()
                },
                GrammarError::InvalidHead { head: 'a' },
            ]
        );

        let valid = Grammar::new('S').add_production(Production::new('S', ["a"]));
        assert_eq!(validate_grammar_all(&valid), Ok(()));
    }
}
