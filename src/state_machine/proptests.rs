//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::*;
use crate::matcher::{Rule, RuleTable, Script};
use crate::transcript::{Speaker, Turn};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

/// Short replies so random tick runs actually finish reveals
fn short_script_context() -> SessionContext {
    let script = Script {
        welcome: "hey\n!".to_string(),
        rules: RuleTable::new(vec![
            Rule::new(["rust", "cargo"], "R\nok"),
            Rule::new(["go"], "G"),
            Rule::fallback("??"),
        ])
        .unwrap(),
    };
    SessionContext::new("prop-session", Arc::new(script), Timing::default())
}

fn at(secs: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_submit_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("I like Rust".to_string()),
        Just("  GO  ".to_string()),
        Just("hello".to_string()),
        "[a-zA-Z ]{0,12}",
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        2 => (arb_submit_text(), 0i64..1000).prop_map(|(text, s)| Event::UserSubmit { text, at: at(s) }),
        1 => (0i64..1000).prop_map(|s| Event::WelcomeDue { at: at(s) }),
        2 => (0i64..1000).prop_map(|s| Event::ThinkingElapsed { at: at(s) }),
        8 => Just(Event::RevealTick),
    ]
}

/// Everything observable from applying a sequence of events
#[derive(Default)]
struct Trace {
    turns: Vec<Turn>,
    ticker_active: bool,
    pending: bool,
}

fn apply_all(context: &SessionContext, events: Vec<Event>) -> Result<Trace, TestCaseError> {
    let boot = boot(context);
    let mut state = boot.new_state;
    let mut trace = Trace {
        pending: true,
        ..Trace::default()
    };

    for event in events {
        let before = state.clone();
        let Ok(result) = transition(&state, context, event) else {
            continue;
        };

        for effect in result.effects {
            match effect {
                Effect::AppendTurn { turn } => {
                    if turn.speaker == Speaker::User {
                        prop_assert_eq!(&before, &SessionState::Idle, "user turn appended while pending");
                        prop_assert_eq!(turn.text.trim(), turn.text.as_str());
                        prop_assert!(!turn.text.is_empty());
                    }
                    trace.turns.push(turn);
                }
                Effect::StartRevealTicker { .. } => {
                    prop_assert!(!trace.ticker_active, "second reveal started while one is active");
                    trace.ticker_active = true;
                }
                Effect::StopRevealTicker => {
                    prop_assert!(trace.ticker_active);
                    trace.ticker_active = false;
                }
                Effect::NotifyRevealStep { partial_text, .. } => {
                    if let SessionState::Revealing { reveal, .. } = &result.new_state {
                        prop_assert!(reveal.text().starts_with(&partial_text));
                    } else {
                        prop_assert!(false, "reveal step outside Revealing");
                    }
                }
                Effect::NotifyPending { pending } => trace.pending = pending,
                Effect::ScheduleTimer { .. } | Effect::NotifyRevealStarted { .. } => {}
            }
        }

        state = result.new_state;
        prop_assert_eq!(state.is_pending(), trace.pending);
        prop_assert_eq!(
            trace.ticker_active,
            matches!(state, SessionState::Revealing { .. })
        );
    }

    Ok(trace)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_invariants_hold_for_any_event_sequence(
        events in proptest::collection::vec(arb_event(), 0..120)
    ) {
        let context = short_script_context();
        apply_all(&context, events)?;
    }

    #[test]
    fn prop_welcome_is_first_turn(
        events in proptest::collection::vec(arb_event(), 0..120)
    ) {
        let context = short_script_context();
        let trace = apply_all(&context, events)?;
        if let Some(first) = trace.turns.first() {
            prop_assert_eq!(first.speaker, Speaker::Bot);
            prop_assert_eq!(first.text.as_str(), context.script.welcome.as_str());
        }
    }

    #[test]
    fn prop_bot_turn_answers_preceding_user_turn(
        events in proptest::collection::vec(arb_event(), 0..200)
    ) {
        let context = short_script_context();
        let trace = apply_all(&context, events)?;

        for pair in trace.turns.windows(2) {
            if pair[0].speaker == Speaker::User {
                prop_assert_eq!(pair[1].speaker, Speaker::Bot);
                prop_assert_eq!(
                    pair[1].text.as_str(),
                    context.script.rules.respond(&pair[0].text)
                );
            }
        }
    }

    #[test]
    fn prop_full_exchange_reveals_exact_response(text in "[a-zA-Z ]{1,20}") {
        prop_assume!(!text.trim().is_empty());
        let context = short_script_context();

        let mut events = vec![Event::WelcomeDue { at: at(0) }];
        events.extend(std::iter::repeat(Event::RevealTick).take(16));
        events.push(Event::UserSubmit { text: text.clone(), at: at(5) });
        events.push(Event::ThinkingElapsed { at: at(6) });
        events.extend(std::iter::repeat(Event::RevealTick).take(16));

        let trace = apply_all(&context, events)?;
        prop_assert!(!trace.pending);
        prop_assert_eq!(trace.turns.len(), 3);
        prop_assert_eq!(trace.turns[1].text.as_str(), text.trim());
        prop_assert_eq!(
            trace.turns[2].text.as_str(),
            context.script.rules.respond(text.trim())
        );
        prop_assert_eq!(trace.turns[2].timestamp, at(6));
    }
}
