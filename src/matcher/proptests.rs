//! Property-based tests for the rule table

use super::*;
use proptest::prelude::*;

/// Filler drawn from characters that cannot complete any builtin trigger
fn arb_filler() -> impl Strategy<Value = String> {
    "[jqxz0-9 ]{0,12}"
}

fn arb_rule_index() -> impl Strategy<Value = usize> {
    0..RuleTable::builtin().len() - 1
}

/// Randomly upper-case ASCII letters
fn arb_case_mix(text: String) -> impl Strategy<Value = String> {
    let len = text.chars().count();
    proptest::collection::vec(any::<bool>(), len).prop_map(move |flags| {
        text.chars()
            .zip(flags)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_every_input_gets_a_non_empty_reply(input in any::<String>()) {
        let table = RuleTable::builtin();
        prop_assert!(!table.respond(&input).is_empty());
        prop_assert!(table.match_index(&input) < table.len());
    }

    #[test]
    fn prop_filler_only_input_falls_back(input in arb_filler()) {
        let table = RuleTable::builtin();
        prop_assert_eq!(table.respond(&input), table.fallback().response());
    }

    #[test]
    fn prop_trigger_match_never_later_than_its_rule(
        index in arb_rule_index(),
        pick in any::<prop::sample::Index>(),
        prefix in arb_filler(),
        suffix in arb_filler(),
    ) {
        let table = RuleTable::builtin();
        let rule = &table.rules()[index];
        let trigger = pick.get(rule.triggers());
        let input = format!("{prefix}{trigger}{suffix}");

        let matched = table.match_index(&input);
        prop_assert!(matched <= index, "{input:?} matched rule {matched}, expected <= {index}");
    }

    #[test]
    fn prop_lone_trigger_matches_first_rule_containing_it(
        index in arb_rule_index(),
        pick in any::<prop::sample::Index>(),
    ) {
        let table = RuleTable::builtin();
        let trigger = pick.get(table.rules()[index].triggers()).clone();

        let expected = table
            .rules()
            .iter()
            .position(|r| r.triggers().iter().any(|t| trigger.contains(t.as_str())))
            .unwrap();
        prop_assert_eq!(table.match_index(&trigger), expected);
    }

    #[test]
    fn prop_ascii_case_does_not_matter(
        input in "[a-z ]{0,40}".prop_flat_map(arb_case_mix),
    ) {
        let table = RuleTable::builtin();
        prop_assert_eq!(
            table.match_index(&input),
            table.match_index(&input.to_lowercase())
        );
    }
}
