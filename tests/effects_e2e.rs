//! Deploy, Destroyed, and Order effect resolution

use std::sync::Arc;
use warfront::core::{CardId, InstanceId, PlayerId};
use warfront::game::{AttackTarget, Command, MatchConfig, MatchState};
use warfront::loader::CardCatalog;

const CARDS: &str = r#"[
    {"id": "201", "name": "Field Medic", "type": "Unit", "cost": 2, "atk": 1, "maxHp": 3,
     "deployEffect": "heal_friendly", "deployValue": 2, "deployTarget": "other_friendly_unit"},
    {"id": "202", "name": "Line Infantry", "type": "Unit", "cost": 1, "atk": 2, "maxHp": 4},
    {"id": "203", "name": "Armorer", "type": "Unit", "cost": 2, "atk": 1, "maxHp": 2,
     "deployEffect": "improve_unit", "deployValue": {"atk": 1, "hp": 1},
     "deployTarget": "random_friendly_vehicle"},
    {"id": "204", "name": "Scout Car", "type": "Unit", "cost": 2, "atk": 2, "maxHp": 2,
     "traits": ["vehicle"]},
    {"id": "205", "name": "Demolition Rig", "type": "Unit", "cost": 3, "atk": 2, "maxHp": 2,
     "destroyedEffect": "damage_all", "destroyedValue": 2},
    {"id": "206", "name": "Resupply", "type": "Order", "cost": 1,
     "orderEffect": "draw_cards", "orderValue": 2},
    {"id": "207", "name": "Smoke Screen", "type": "Order", "cost": 1,
     "orderEffect": "deploy_smoke"},
    {"id": "208", "name": "Saboteur", "type": "Unit", "cost": 1, "atk": 1, "maxHp": 1,
     "deployEffect": "sabotage"}
]"#;

fn new_state(seed: u64) -> MatchState {
    let catalog = Arc::new(CardCatalog::from_json_str(CARDS).unwrap());
    let config = MatchConfig {
        seed,
        ..MatchConfig::default()
    };
    MatchState::new(catalog, config)
}

fn field_unit(state: &mut MatchState, seat: usize, card_id: &str) -> InstanceId {
    let unit = state
        .instantiate(&CardId::from(card_id), PlayerId::from_idx(seat))
        .unwrap();
    let id = unit.id;
    state.players[seat].battlefield.push(unit);
    id
}

fn put_in_hand(state: &mut MatchState, seat: usize, card_id: &str) {
    let card = state
        .instantiate(&CardId::from(card_id), PlayerId::from_idx(seat))
        .unwrap();
    state.players[seat].hand.push(card);
}

fn play_first(state: &mut MatchState) {
    let idx = state.players[0].hand.len() - 1;
    state
        .execute(PlayerId::new(0), Command::PlayCard { hand_index: idx })
        .unwrap();
}

#[test]
fn test_heal_targets_a_damaged_friendly_unit() {
    let mut state = new_state(0);
    state.players[0].supply = 5;
    let wounded = field_unit(&mut state, 0, "202"); // 2/4
    state.players[0].battlefield[0].health = 1;
    put_in_hand(&mut state, 0, "201");

    play_first(&mut state);

    let unit = &state.players[0].battlefield[0];
    assert_eq!(unit.id, wounded);
    assert_eq!(unit.health, 3);
    assert_eq!(unit.max_health, 4);
}

#[test]
fn test_heal_is_capped_at_max_health() {
    let mut state = new_state(0);
    state.players[0].supply = 5;
    field_unit(&mut state, 0, "202");
    state.players[0].battlefield[0].health = 3; // one point down
    put_in_hand(&mut state, 0, "201");

    play_first(&mut state);

    assert_eq!(state.players[0].battlefield[0].health, 4);
}

#[test]
fn test_heal_with_no_target_is_a_logged_noop() {
    let mut state = new_state(0);
    state.players[0].supply = 5;
    put_in_hand(&mut state, 0, "201");

    play_first(&mut state);

    assert!(state
        .logger
        .messages()
        .iter()
        .any(|m| m.contains("no valid target found for healing")));
}

#[test]
fn test_improve_only_targets_vehicles() {
    let mut state = new_state(7);
    state.players[0].supply = 5;
    field_unit(&mut state, 0, "202"); // infantry, not a vehicle
    field_unit(&mut state, 0, "204"); // vehicle 2/2
    put_in_hand(&mut state, 0, "203");

    play_first(&mut state);

    let infantry = &state.players[0].battlefield[0];
    let vehicle = &state.players[0].battlefield[1];
    assert_eq!((infantry.attack, infantry.max_health), (2, 4));
    assert_eq!((vehicle.attack, vehicle.health, vehicle.max_health), (3, 3, 3));
}

#[test]
fn test_improve_with_no_vehicle_is_a_logged_noop() {
    let mut state = new_state(0);
    state.players[0].supply = 5;
    field_unit(&mut state, 0, "202");
    put_in_hand(&mut state, 0, "203");

    play_first(&mut state);

    assert!(state
        .logger
        .messages()
        .iter()
        .any(|m| m.contains("no valid target found to improve")));
}

#[test]
fn test_improve_target_choice_is_seed_deterministic() {
    let run = |seed: u64| -> Vec<i32> {
        let mut state = new_state(seed);
        state.players[0].supply = 5;
        for _ in 0..4 {
            field_unit(&mut state, 0, "204");
        }
        put_in_hand(&mut state, 0, "203");
        play_first(&mut state);
        state.players[0]
            .battlefield
            .iter()
            .map(|u| u.attack)
            .collect()
    };

    assert_eq!(run(42), run(42));
    // Exactly one vehicle got the buff
    assert_eq!(run(42).iter().filter(|&&atk| atk == 3).count(), 1);
}

#[test]
fn test_destroyed_effect_cascades_through_cleanup() {
    let mut state = new_state(0);
    let attacker = field_unit(&mut state, 0, "202"); // 2/4
    state.players[0].battlefield[0].can_attack = true;
    let rig = field_unit(&mut state, 1, "205"); // 2/2, detonates for 2
    field_unit(&mut state, 1, "208"); // 1/1 bystander

    state
        .execute(
            PlayerId::new(0),
            Command::Attack {
                attacker,
                target: AttackTarget::Unit(rig),
            },
        )
        .unwrap();

    // Combat kills the rig (2 HP vs 2 attack); its detonation hits the
    // attacker (4 - 2 combat - 2 blast = 0) and the 1 HP bystander
    assert!(state.players[0].battlefield.is_empty());
    assert!(state.players[1].battlefield.is_empty());
    assert!(state
        .logger
        .messages()
        .iter()
        .any(|m| m.contains("detonates")));
}

#[test]
fn test_order_draws_and_leaves_no_battlefield_presence() {
    let mut state = new_state(0);
    state.players[0].supply = 5;
    state.players[0].deck = vec![CardId::from("202"), CardId::from("204")];
    put_in_hand(&mut state, 0, "206");

    play_first(&mut state);

    assert_eq!(state.players[0].hand.len(), 2);
    assert!(state.players[0].deck.is_empty());
    assert!(state.players[0].battlefield.is_empty());
    assert_eq!(state.players[0].supply, 4);
}

#[test]
fn test_unknown_order_effect_is_a_logged_noop() {
    let mut state = new_state(0);
    state.players[0].supply = 5;
    put_in_hand(&mut state, 0, "207");

    play_first(&mut state);

    assert!(state
        .logger
        .messages()
        .iter()
        .any(|m| m.contains("is not implemented")));
    assert!(state.players[0].battlefield.is_empty());
}

#[test]
fn test_unknown_deploy_effect_still_fields_the_unit() {
    let mut state = new_state(0);
    state.players[0].supply = 5;
    put_in_hand(&mut state, 0, "208");

    play_first(&mut state);

    assert_eq!(state.players[0].battlefield.len(), 1);
    assert!(state
        .logger
        .messages()
        .iter()
        .any(|m| m.contains("Unknown deploy effect")));
}
