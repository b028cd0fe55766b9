//! End-to-end matches between two greedy seats
//!
//! Verifies that full matches run to a decision under the turn cap, hold
//! the board invariants throughout, and replay identically from the same
//! seed.

use std::sync::Arc;
use warfront::core::{CardId, PlayerId};
use warfront::game::{
    FatiguePolicy, GreedyController, MatchConfig, MatchEndReason, MatchOutcome, MatchRunner,
    MatchState,
};
use warfront::loader::CardCatalog;

const CARDS: &str = r#"[
    {"id": "1", "name": "Rifleman", "type": "Unit", "cost": 1, "atk": 1, "maxHp": 2},
    {"id": "2", "name": "Grenadier", "type": "Unit", "cost": 2, "atk": 2, "maxHp": 2},
    {"id": "3", "name": "Sentry Post", "type": "Unit", "cost": 2, "atk": 1, "maxHp": 4,
     "traits": ["guard"]},
    {"id": "4", "name": "Raider", "type": "Unit", "cost": 2, "atk": 2, "maxHp": 1,
     "traits": ["ambush"]},
    {"id": "5", "name": "Heavy Tank", "type": "Unit", "cost": 5, "atk": 5, "maxHp": 6,
     "traits": ["vehicle", "armor-1"]},
    {"id": "6", "name": "Lance Gunner", "type": "Unit", "cost": 3, "atk": 3, "maxHp": 2,
     "traits": ["piercing"]},
    {"id": "7", "name": "Resupply", "type": "Order", "cost": 1,
     "orderEffect": "draw_cards", "orderValue": 1},
    {"id": "8", "name": "Demolition Rig", "type": "Unit", "cost": 3, "atk": 2, "maxHp": 2,
     "destroyedEffect": "damage_all", "destroyedValue": 1}
]"#;

fn catalog() -> Arc<CardCatalog> {
    Arc::new(CardCatalog::from_json_str(CARDS).unwrap())
}

/// Two copies of every card plus rifleman filler: 20 cards
fn test_deck() -> Vec<CardId> {
    let mut cards: Vec<CardId> = (1..=8)
        .flat_map(|n| {
            let id = CardId::from(n.to_string());
            [id.clone(), id]
        })
        .collect();
    while cards.len() < 20 {
        cards.push(CardId::from("1"));
    }
    cards
}

fn run_match(seed: u64, max_turns: u32) -> MatchState {
    // Escalating fatigue guarantees every match terminates once the
    // decks run dry
    let config = MatchConfig {
        seed,
        fatigue: FatiguePolicy::Escalating,
        ..MatchConfig::default()
    };
    let mut state =
        MatchState::start_match(catalog(), test_deck(), test_deck(), config).unwrap();
    let mut seat0 = GreedyController::new(PlayerId::new(0));
    let mut seat1 = GreedyController::new(PlayerId::new(1));
    MatchRunner::new(&mut state, max_turns).run_match(&mut seat0, &mut seat1);
    state
}

#[test]
fn test_match_reaches_a_decision() {
    let state = run_match(42, 100);

    // With all-attack decks and no fatigue this should never stall to
    // the turn limit
    assert_ne!(state.outcome, MatchOutcome::InProgress);
}

#[test]
fn test_board_invariants_hold_at_the_end() {
    for seed in [1, 7, 42, 1234] {
        let state = run_match(seed, 100);

        for player in &state.players {
            // Cleanup never leaves a dead unit on the battlefield
            assert!(player.battlefield.iter().all(|u| u.health > 0));
            assert!(player
                .battlefield
                .iter()
                .all(|u| u.health <= u.max_health));
            assert!(player.supply >= 0);
            assert!(player.max_supply <= warfront::core::MAX_SUPPLY);
        }

        match state.outcome {
            MatchOutcome::Winner(winner) => {
                assert!(state.players[winner.opponent().idx()].life <= 0);
                assert!(state.players[winner.idx()].life > 0);
            }
            MatchOutcome::Draw => {
                assert!(state.players.iter().all(|p| p.life <= 0));
            }
            MatchOutcome::InProgress => {}
        }
    }
}

#[test]
fn test_same_seed_replays_identically() {
    let a = run_match(42, 100);
    let b = run_match(42, 100);

    assert_eq!(a.logger.messages(), b.logger.messages());
    assert_eq!(
        serde_json::to_string(&a.snapshot()).unwrap(),
        serde_json::to_string(&b.snapshot()).unwrap()
    );
}

#[test]
fn test_different_seeds_diverge() {
    let a = run_match(1, 100);
    let b = run_match(2, 100);

    // Different shuffles; the logs should differ somewhere
    assert_ne!(a.logger.messages(), b.logger.messages());
}

#[test]
fn test_turn_limit_stops_a_stalled_match() {
    let config = MatchConfig {
        seed: 42,
        ..MatchConfig::default()
    };
    let mut state =
        MatchState::start_match(catalog(), test_deck(), test_deck(), config).unwrap();
    let mut seat0 = GreedyController::new(PlayerId::new(0));
    let mut seat1 = GreedyController::new(PlayerId::new(1));
    let result = MatchRunner::new(&mut state, 3).run_match(&mut seat0, &mut seat1);

    if state.outcome == MatchOutcome::InProgress {
        assert_eq!(result.end_reason, MatchEndReason::TurnLimit);
        assert!(result.winner.is_none());
        assert!(result.turns_played >= 3);
    }
}

#[test]
fn test_knockout_reason_names_the_winner() {
    let config = MatchConfig {
        seed: 42,
        fatigue: FatiguePolicy::Escalating,
        ..MatchConfig::default()
    };
    let mut state =
        MatchState::start_match(catalog(), test_deck(), test_deck(), config).unwrap();
    let mut seat0 = GreedyController::new(PlayerId::new(0));
    let mut seat1 = GreedyController::new(PlayerId::new(1));
    let result = MatchRunner::new(&mut state, 100).run_match(&mut seat0, &mut seat1);

    if let MatchOutcome::Winner(winner) = state.outcome {
        assert_eq!(result.winner, Some(winner));
        assert_eq!(result.end_reason, MatchEndReason::Knockout { winner });
    }
}

#[test]
fn test_event_log_records_the_whole_match() {
    let state = run_match(42, 100);
    let log = state.logger.messages();

    assert!(log.iter().any(|m| m.contains("--- Turn 1")));
    assert!(log.iter().any(|m| m.contains("GAME OVER")));
    // Turn headers appear in order
    let first_turn = log.iter().position(|m| m.contains("--- Turn 1")).unwrap();
    let game_over = log.iter().position(|m| m.contains("GAME OVER")).unwrap();
    assert!(first_turn < game_over);
}
