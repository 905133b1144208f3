//! Tests for the comparison engine

use super::{Decision, Engine, EngineError, InputLists, Outcome};
use mtg_common::Card;

fn cards(names: &[&str]) -> Vec<Card> {
    names.iter().map(|name| Card::named(*name)).collect()
}

fn names(cards: &[Card]) -> Vec<&str> {
    cards.iter().map(|card| card.name.as_str()).collect()
}

fn engine(considering: &[&str], current: &[&str]) -> Engine {
    Engine::new(
        cards(considering),
        cards(current),
        InputLists::new(considering.iter(), current.iter()),
    )
    .unwrap()
}

// ── construction ─────────────────────────────────────────────────────

#[test]
fn test_new_starts_with_empty_cut_and_zeroed_counters() {
    let engine = engine(&["Z"], &["X", "Y"]);
    assert_eq!(engine.cut_len(), 0);
    assert_eq!(engine.cursor(), 0);
    assert_eq!(engine.loss_count(), 0);
    assert_eq!(engine.decisions(), 0);
    assert!(!engine.is_terminal());
    assert_eq!(engine.inputs().considering, vec!["Z"]);
}

#[test]
fn test_new_with_nothing_to_consider_is_configuration_error() {
    let result = Engine::new(Vec::new(), cards(&["X"]), InputLists::default());
    assert_eq!(result.unwrap_err(), EngineError::NothingToCompare);

    let result = Engine::new(Vec::new(), Vec::new(), InputLists::default());
    assert_eq!(result.unwrap_err(), EngineError::NothingToCompare);
}

#[test]
fn test_new_without_current_cards_is_configuration_error() {
    let result = Engine::new(cards(&["Z"]), Vec::new(), InputLists::default());
    assert_eq!(result.unwrap_err(), EngineError::NoCurrentCards);
}

#[test]
fn test_from_parts_rejects_duplicate_cards() {
    let result = Engine::from_parts(
        cards(&["Z"]),
        cards(&["X", "z"]),
        Vec::new(),
        0,
        0,
        InputLists::default(),
    );
    assert!(matches!(result, Err(EngineError::InvariantViolated(_))));
}

#[test]
fn test_from_parts_rejects_out_of_range_counters() {
    let cursor = Engine::from_parts(cards(&["Z"]), cards(&["X"]), Vec::new(), 1, 0, InputLists::default());
    assert!(matches!(cursor, Err(EngineError::InvariantViolated(_))));

    let losses = Engine::from_parts(cards(&["Z"]), cards(&["X"]), Vec::new(), 0, 2, InputLists::default());
    assert!(matches!(losses, Err(EngineError::InvariantViolated(_))));
}

#[test]
fn test_from_parts_accepts_terminal_state() {
    let engine = Engine::from_parts(Vec::new(), cards(&["A", "B"]), cards(&["C"]), 1, 0, InputLists::default())
        .unwrap();
    assert!(engine.is_terminal());
    assert!(engine.trial_card().is_none());
}

#[test]
fn test_input_lists_drop_blank_names() {
    let lists = InputLists::new(["  Sol Ring ", "", "   "], ["Mox Pearl", "\t"]);
    assert_eq!(lists.considering, vec!["Sol Ring"]);
    assert_eq!(lists.current, vec!["Mox Pearl"]);
    assert!(!lists.is_empty());
    assert!(InputLists::new([""], [" "]).is_empty());
}

#[test]
fn test_demo_lists() {
    let demo = InputLists::demo();
    assert_eq!(demo.considering.len(), 3);
    assert_eq!(demo.current.len(), 6);
    assert_eq!(demo.considering[0], "Beast Whisperer");
}

// ── scenarios ────────────────────────────────────────────────────────

#[test]
fn test_reject_through_full_round_cuts_trial_card() {
    let mut engine = engine(&["Z"], &["X", "Y"]);

    let outcome = engine.reject().unwrap();
    assert_eq!(
        outcome,
        Outcome::NextOpponent {
            opponent: "Y".to_string(),
            losses: 1
        }
    );
    assert_eq!(engine.loss_count(), 1);
    assert_eq!(engine.cursor(), 1);
    assert_eq!(engine.opponent().unwrap().name, "Y");

    let outcome = engine.reject().unwrap();
    assert_eq!(
        outcome,
        Outcome::Cut {
            card: "Z".to_string(),
            forced: false
        }
    );
    assert_eq!(names(engine.cut()), vec!["Z"]);
    assert!(engine.considering().is_empty());
    assert_eq!(engine.loss_count(), 0);
    assert!(engine.is_terminal());
}

#[test]
fn test_promote_swaps_trial_card_and_opponent() {
    let mut engine = engine(&["Z"], &["X", "Y"]);

    let outcome = engine.promote().unwrap();
    assert_eq!(
        outcome,
        Outcome::Promoted {
            winner: "Z".to_string(),
            displaced: "X".to_string()
        }
    );
    assert_eq!(names(engine.current()), vec!["Y", "Z"]);
    assert_eq!(names(engine.considering()), vec!["X"]);
    assert_eq!(engine.cursor(), 0);
    assert_eq!(engine.opponent().unwrap().name, "Y");
    assert_eq!(engine.loss_count(), 0);
}

#[test]
fn test_single_opponent_loss_is_a_full_round() {
    let mut engine = engine(&["Z"], &["X"]);

    let outcome = engine.reject().unwrap();
    assert!(matches!(outcome, Outcome::Cut { ref card, forced: false } if card == "Z"));
    assert!(engine.is_terminal());
    assert_eq!(engine.cursor(), 0);
}

#[test]
fn test_force_cut_leaves_current_and_cursor_alone() {
    let mut engine = engine(&["Z", "W"], &["X", "Y"]);
    engine.reject().unwrap();
    assert_eq!(engine.cursor(), 1);

    let outcome = engine.force_cut().unwrap();
    assert_eq!(
        outcome,
        Outcome::Cut {
            card: "Z".to_string(),
            forced: true
        }
    );
    assert_eq!(names(engine.cut()), vec!["Z"]);
    assert_eq!(names(engine.considering()), vec!["W"]);
    assert_eq!(names(engine.current()), vec!["X", "Y"]);
    assert_eq!(engine.cursor(), 1);
}

#[test]
fn test_force_cut_starts_next_card_with_fresh_round() {
    let mut engine = engine(&["Z", "W"], &["X", "Y", "V"]);
    engine.reject().unwrap();
    engine.reject().unwrap();
    assert_eq!(engine.loss_count(), 2);

    engine.force_cut().unwrap();
    assert_eq!(engine.loss_count(), 0);

    // W must lose to all three current cards before it is cut
    assert!(matches!(engine.reject().unwrap(), Outcome::NextOpponent { .. }));
    assert!(matches!(engine.reject().unwrap(), Outcome::NextOpponent { .. }));
    assert!(matches!(engine.reject().unwrap(), Outcome::Cut { .. }));
}

#[test]
fn test_cursor_carries_over_between_trial_cards() {
    let mut engine = engine(&["Z", "W"], &["X", "Y", "V"]);
    engine.reject().unwrap(); // Z vs X -> cursor 1
    engine.reject().unwrap(); // Z vs Y -> cursor 2
    engine.reject().unwrap(); // Z vs V -> cut, cursor stays 2

    assert_eq!(engine.cursor(), 2);
    assert_eq!(engine.trial_card().unwrap().name, "W");
    assert_eq!(engine.opponent().unwrap().name, "V");

    engine.reject().unwrap(); // W vs V -> wraps to X
    assert_eq!(engine.cursor(), 0);
    assert_eq!(engine.opponent().unwrap().name, "X");
}

#[test]
fn test_promote_at_last_position_keeps_cursor_in_range() {
    let mut engine = engine(&["Z"], &["X", "Y"]);
    engine.reject().unwrap(); // cursor -> 1 (Y)

    engine.promote().unwrap();
    assert_eq!(names(engine.current()), vec!["X", "Z"]);
    assert_eq!(names(engine.considering()), vec!["Y"]);
    assert_eq!(engine.cursor(), 1);
    // The displaced card now faces the card that displaced it
    assert_eq!(engine.opponent().unwrap().name, "Z");
}

#[test]
fn test_displaced_card_gets_a_second_trial() {
    let mut engine = engine(&["Z", "W"], &["X"]);
    engine.promote().unwrap(); // Z displaces X

    assert_eq!(names(engine.considering()), vec!["W", "X"]);
    engine.reject().unwrap(); // W cut
    assert_eq!(engine.trial_card().unwrap().name, "X");
    engine.promote().unwrap(); // X wins its place back
    assert_eq!(names(engine.current()), vec!["X"]);
    assert_eq!(names(engine.considering()), vec!["Z"]);
}

#[test]
fn test_promote_resets_loss_count() {
    let mut engine = engine(&["Z"], &["X", "Y", "V"]);
    engine.reject().unwrap();
    engine.reject().unwrap();
    assert_eq!(engine.loss_count(), 2);

    engine.promote().unwrap();
    assert_eq!(engine.loss_count(), 0);
}

// ── terminal and failure paths ───────────────────────────────────────

#[test]
fn test_decisions_after_terminal_fail_without_changing_state() {
    let mut engine = engine(&["Z"], &["X"]);
    engine.reject().unwrap();
    let snapshot = engine.clone();

    assert_eq!(engine.promote().unwrap_err(), EngineError::Finished);
    assert_eq!(engine.reject().unwrap_err(), EngineError::Finished);
    assert_eq!(engine.force_cut().unwrap_err(), EngineError::Finished);
    assert_eq!(engine.opponent().unwrap_err(), EngineError::Finished);
    assert_eq!(engine, snapshot);
}

#[test]
fn test_apply_dispatches_decisions() {
    let mut engine = engine(&["Z", "W"], &["X", "Y"]);

    assert!(matches!(engine.apply(Decision::Reject).unwrap(), Outcome::NextOpponent { .. }));
    assert!(matches!(engine.apply(Decision::Promote).unwrap(), Outcome::Promoted { .. }));
    assert!(matches!(engine.apply(Decision::ForceCut).unwrap(), Outcome::Cut { forced: true, .. }));
    assert_eq!(engine.decisions(), 3);
}

#[test]
fn test_engine_survives_json_round_trip_mid_session() {
    let mut engine = engine(&["Z", "W"], &["X", "Y"]);
    engine.reject().unwrap();

    let json = serde_json::to_string(&engine).unwrap();
    assert!(json.contains("\"current_card_index\":1"));

    let restored: Engine = serde_json::from_str(&json).unwrap();
    restored.validate().unwrap();
    assert_eq!(restored, engine);
}
