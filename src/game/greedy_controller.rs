//! Greedy scripted opponent
//!
//! The deterministic policy the engine ships for the non-human seat:
//! dump the hand front-to-back (Units before Orders), then swing with
//! everything, honoring the Guard rule. One command per call; the policy
//! is a pure function of the view, so presentation delays are entirely
//! the caller's concern.

use crate::core::{CardKind, PlayerId};
use crate::game::controller::{AttackTarget, Command, MatchView, PlayerController};

/// Greedy policy controller
///
/// Priorities per call:
/// 1. First affordable Unit in hand.
/// 2. First affordable Order in hand.
/// 3. For the first eligible unit with attack > 0: the first enemy Guard
///    unit, else the first enemy unit, else the enemy player.
/// 4. End the turn.
pub struct GreedyController {
    seat: PlayerId,
}

impl GreedyController {
    pub fn new(seat: PlayerId) -> Self {
        GreedyController { seat }
    }
}

impl PlayerController for GreedyController {
    fn seat(&self) -> PlayerId {
        self.seat
    }

    fn choose_command(&mut self, view: &MatchView) -> Command {
        let supply = view.supply();

        if let Some(hand_index) = view
            .hand()
            .iter()
            .position(|c| c.kind == CardKind::Unit && c.cost <= supply)
        {
            return Command::PlayCard { hand_index };
        }
        if let Some(hand_index) = view
            .hand()
            .iter()
            .position(|c| c.kind == CardKind::Order && c.cost <= supply)
        {
            return Command::PlayCard { hand_index };
        }

        if let Some(attacker) = view
            .battlefield()
            .iter()
            .find(|u| u.can_attack && u.attack > 0)
        {
            let enemy = view.opponent_battlefield();
            let target = if let Some(guard) = enemy.iter().find(|u| u.has_guard()) {
                AttackTarget::Unit(guard.id)
            } else if let Some(first) = enemy.first() {
                AttackTarget::Unit(first.id)
            } else {
                AttackTarget::Player(view.opponent())
            };
            return Command::Attack {
                attacker: attacker.id,
                target,
            };
        }

        Command::EndTurn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;
    use crate::game::state::{MatchConfig, MatchState};
    use crate::loader::CardCatalog;
    use std::sync::Arc;

    fn state_with_cards() -> MatchState {
        let json = r#"[
            {"id": "1", "name": "Rifleman", "type": "Unit", "cost": 1, "atk": 2, "maxHp": 2},
            {"id": "2", "name": "Sentry", "type": "Unit", "cost": 1, "atk": 1, "maxHp": 3, "traits": ["guard"]},
            {"id": "3", "name": "Resupply", "type": "Order", "cost": 1,
             "orderEffect": "draw_cards", "orderValue": 1}
        ]"#;
        let catalog = Arc::new(CardCatalog::from_json_str(json).unwrap());
        MatchState::new(catalog, MatchConfig::default())
    }

    #[test]
    fn test_prefers_units_over_orders() {
        let mut state = state_with_cards();
        state.players[0].supply = 2;
        let order = state.instantiate(&CardId::from("3"), PlayerId::new(0)).unwrap();
        let unit = state.instantiate(&CardId::from("1"), PlayerId::new(0)).unwrap();
        state.players[0].hand.push(order);
        state.players[0].hand.push(unit);

        let mut ai = GreedyController::new(PlayerId::new(0));
        let view = MatchView::new(&state, PlayerId::new(0));
        // The unit at position 1 wins over the order at position 0
        assert_eq!(ai.choose_command(&view), Command::PlayCard { hand_index: 1 });
    }

    #[test]
    fn test_attacks_guard_first() {
        let mut state = state_with_cards();
        let mut attacker = state.instantiate(&CardId::from("1"), PlayerId::new(0)).unwrap();
        attacker.can_attack = true;
        let attacker_id = attacker.id;
        state.players[0].battlefield.push(attacker);

        let plain = state.instantiate(&CardId::from("1"), PlayerId::new(1)).unwrap();
        let guard = state.instantiate(&CardId::from("2"), PlayerId::new(1)).unwrap();
        let guard_id = guard.id;
        state.players[1].battlefield.push(plain);
        state.players[1].battlefield.push(guard);

        let mut ai = GreedyController::new(PlayerId::new(0));
        let view = MatchView::new(&state, PlayerId::new(0));
        assert_eq!(
            ai.choose_command(&view),
            Command::Attack {
                attacker: attacker_id,
                target: AttackTarget::Unit(guard_id)
            }
        );
    }

    #[test]
    fn test_attacks_player_when_board_is_empty() {
        let mut state = state_with_cards();
        let mut attacker = state.instantiate(&CardId::from("1"), PlayerId::new(0)).unwrap();
        attacker.can_attack = true;
        let attacker_id = attacker.id;
        state.players[0].battlefield.push(attacker);

        let mut ai = GreedyController::new(PlayerId::new(0));
        let view = MatchView::new(&state, PlayerId::new(0));
        assert_eq!(
            ai.choose_command(&view),
            Command::Attack {
                attacker: attacker_id,
                target: AttackTarget::Player(PlayerId::new(1))
            }
        );
    }

    #[test]
    fn test_ends_turn_when_nothing_to_do() {
        let state = state_with_cards();
        let mut ai = GreedyController::new(PlayerId::new(0));
        let view = MatchView::new(&state, PlayerId::new(0));
        assert_eq!(ai.choose_command(&view), Command::EndTurn);
    }
}
