//! The command API: play-card, attack, end-turn, and the turn machinery
//!
//! Every command runs to completion (including cascading cleanup) before
//! another can be accepted, and every command that can change life totals
//! ends with a win-condition check. Illegal commands are recovered
//! locally: logged, no state change, selection reset.

use crate::core::{CardKind, InstanceId, OrderEffect, Player, PlayerId};
use crate::game::combat;
use crate::game::controller::{AttackTarget, Command};
use crate::game::phase::TurnPhase;
use crate::game::state::{FatiguePolicy, MatchState};
use crate::Result;

impl MatchState {
    /// Dispatch a command from a controller or input layer
    pub fn execute(&mut self, seat: PlayerId, command: Command) -> Result<()> {
        match command {
            Command::PlayCard { hand_index } => self.play_card(seat, hand_index),
            Command::Attack { attacker, target } => self.attack(attacker, target),
            Command::EndTurn => self.end_turn(),
        }
    }

    /// Turn start for the active player: supply accrual, draw,
    /// attack-eligibility reset
    pub(crate) fn start_turn(&mut self) {
        self.turn.phase = TurnPhase::TurnStart;
        let idx = self.turn.active_player_idx;

        let header = format!(
            "--- Turn {} ({}) ---",
            self.turn.turn_number, self.players[idx].name
        );
        self.logger.log(header);

        self.players[idx].refresh_supply();
        self.draw_card(idx);
        for unit in self.players[idx].battlefield.iter_mut() {
            unit.can_attack = true;
        }
        self.selection.clear();

        // Fatigue (when configured) can decide the match on the draw
        self.check_win_condition();
        self.turn.phase = TurnPhase::Main;
    }

    /// Draw one card: pop the top of the deck and put the instance in hand
    ///
    /// An empty deck is a logged event; whether it also hurts is governed
    /// by the configured fatigue policy. A catalog miss on the popped
    /// identifier is fatal to the draw only.
    pub(crate) fn draw_card(&mut self, player_idx: usize) {
        let Some(card_id) = self.players[player_idx].deck.pop() else {
            let name = self.players[player_idx].name.clone();
            self.logger.log(format!("{}'s deck is empty!", name));
            if self.config.fatigue == FatiguePolicy::Escalating {
                self.fatigue_counters[player_idx] += 1;
                let damage = self.fatigue_counters[player_idx];
                self.players[player_idx].life -= damage;
                self.logger.log(format!(
                    "{} takes {} fatigue damage (HP: {}).",
                    name, damage, self.players[player_idx].life
                ));
            }
            return;
        };

        let owner = PlayerId::from_idx(player_idx);
        match self.instantiate(&card_id, owner) {
            Ok(instance) => {
                self.players[player_idx].hand.push(instance);
                let name = &self.players[player_idx].name;
                self.logger.log(format!("{} drew a card.", name));
            }
            Err(err) => {
                // The identifier is lost with the draw; the match goes on
                self.logger
                    .log(format!("Draw failed for card id {}: {}", card_id, err));
            }
        }
    }

    /// Play a card from the active player's hand
    ///
    /// Units enter the battlefield (with Ambush bypassing summoning
    /// delay) and fire their Deploy effect; Orders resolve their effect
    /// and never occupy a zone.
    pub fn play_card(&mut self, player: PlayerId, hand_index: usize) -> Result<()> {
        self.ensure_in_progress()?;
        let idx = player.idx();
        if idx != self.turn.active_player_idx {
            return self.illegal(format!("It is not {}'s turn.", self.players[idx].name));
        }
        if hand_index >= self.players[idx].hand.len() {
            return self.illegal(format!(
                "{} has no card at hand position {}.",
                self.players[idx].name, hand_index
            ));
        }
        let cost = self.players[idx].hand[hand_index].cost;
        if cost > self.players[idx].supply {
            let msg = format!(
                "{} cannot afford {}. Needs {}, has {}.",
                self.players[idx].name,
                self.players[idx].hand[hand_index].name,
                cost,
                self.players[idx].supply
            );
            return self.illegal(msg);
        }

        self.players[idx].supply -= cost;
        let mut card = self.players[idx].hand.remove(hand_index);
        let player_name = self.players[idx].name.clone();

        match card.kind {
            CardKind::Unit => {
                let ambush = card.has_ambush();
                card.can_attack = ambush;
                card.owner = player;
                let name = card.name.clone();
                let source = card.id;
                let has_deploy = card.deploy_effect.is_some();
                self.players[idx].battlefield.push(card);

                if ambush {
                    self.logger
                        .log(format!("{} played {} with Ambush!", player_name, name));
                } else {
                    self.logger.log(format!("{} played {}.", player_name, name));
                }
                if has_deploy {
                    self.dispatch_deploy_effect(idx, source);
                }
                // Deploy effects must never leave a dead unit behind
                self.cleanup_battlefield();
            }
            CardKind::Order => match card.order_effect.clone() {
                Some(effect) => {
                    self.logger.log(format!("{} played {}.", player_name, card.name));
                    self.dispatch_order_effect(idx, effect);
                }
                None => {
                    self.logger.log(format!(
                        "{} played {} (no effect defined).",
                        player_name, card.name
                    ));
                }
            },
        }

        self.selection.clear();
        self.check_win_condition();
        Ok(())
    }

    fn dispatch_order_effect(&mut self, player_idx: usize, effect: OrderEffect) {
        match effect {
            OrderEffect::DrawCards { count } => {
                for _ in 0..count {
                    self.draw_card(player_idx);
                }
            }
            OrderEffect::Unknown { kind } => {
                self.logger
                    .log(format!("Order effect \"{}\" is not implemented.", kind));
            }
        }
    }

    /// Attack with a battlefield unit against an enemy unit or the enemy
    /// player
    ///
    /// Preconditions (attacker present and eligible, Guard rule, target
    /// present) fail without consuming the attack.
    pub fn attack(&mut self, attacker_id: InstanceId, target: AttackTarget) -> Result<()> {
        self.ensure_in_progress()?;
        let active = self.turn.active_player_idx;
        let defending = 1 - active;

        let Some(attacker_pos) = self.players[active].find_battlefield(attacker_id) else {
            return self.illegal("Invalid attacker: not on the active battlefield.");
        };
        if !self.players[active].battlefield[attacker_pos].can_attack {
            let name = self.players[active].battlefield[attacker_pos].name.clone();
            return self.illegal(format!("{} cannot attack this turn.", name));
        }

        let defender_has_guard = self.players[defending].has_guard();

        match target {
            AttackTarget::Unit(target_id) => {
                let Some(target_pos) = self.players[defending].find_battlefield(target_id) else {
                    return self.illegal("Invalid target: not on the defending battlefield.");
                };
                if combat::guard_blocks_unit_target(
                    defender_has_guard,
                    &self.players[defending].battlefield[target_pos],
                ) {
                    let name = self.players[defending].battlefield[target_pos].name.clone();
                    return self.illegal(format!(
                        "Cannot attack {}. Must target a unit with Guard.",
                        name
                    ));
                }

                self.logger.log(format!(
                    "{}'s {} attacks {}'s {}.",
                    self.players[active].name,
                    self.players[active].battlefield[attacker_pos].name,
                    self.players[defending].name,
                    self.players[defending].battlefield[target_pos].name
                ));

                let (attacker_player, defender_player) =
                    two_players_mut(&mut self.players, active, defending);
                combat::resolve_unit_combat(
                    &mut attacker_player.battlefield[attacker_pos],
                    &mut defender_player.battlefield[target_pos],
                    &mut self.logger,
                );

                self.cleanup_battlefield();
            }
            AttackTarget::Player(target_player) => {
                if target_player.idx() != defending {
                    return self.illegal("Invalid target: can only attack the opposing player.");
                }
                if defender_has_guard {
                    return self.illegal(
                        "Cannot attack the player directly while units with Guard are on the battlefield.",
                    );
                }

                // Player life does not benefit from Armor
                let amount = self.players[active].battlefield[attacker_pos].attack;
                let attacker_name = self.players[active].battlefield[attacker_pos].name.clone();
                self.players[active].battlefield[attacker_pos].can_attack = false;
                self.players[defending].life -= amount;
                self.logger.log(format!(
                    "{}'s {} attacks {} directly! {} takes {} damage (HP: {}).",
                    self.players[active].name,
                    attacker_name,
                    self.players[defending].name,
                    self.players[defending].name,
                    amount,
                    self.players[defending].life
                ));
            }
        }

        self.selection.clear();
        self.check_win_condition();
        Ok(())
    }

    /// End the active player's turn and start the other player's
    pub fn end_turn(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        self.turn.phase = TurnPhase::TurnEnd;
        let name = self.players[self.turn.active_player_idx].name.clone();
        self.logger.log(format!("{} ends their turn.", name));
        self.selection.clear();
        self.turn.pass_turn();
        self.start_turn();
        Ok(())
    }
}

/// Disjoint mutable borrows of two different players
fn two_players_mut(players: &mut [Player], a: usize, b: usize) -> (&mut Player, &mut Player) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = players.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = players.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
