//! Player controller trait and read-only match view
//!
//! The interface between the engine and whoever makes decisions for a
//! seat (scripted opponent, tests, or a UI adapter). Controllers inspect
//! a read-only view and answer with commands; the engine is the only
//! thing that mutates state.

use crate::core::{CardInstance, InstanceId, PlayerId};
use crate::game::state::MatchState;

/// A decision a seat can submit to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play the card at this position of the seat's hand
    PlayCard { hand_index: usize },

    /// Attack with a battlefield unit
    Attack {
        attacker: InstanceId,
        target: AttackTarget,
    },

    /// Hand the turn over
    EndTurn,
}

/// Target of an attack command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackTarget {
    Unit(InstanceId),
    Player(PlayerId),
}

/// Read-only view of the match from one seat's perspective
pub struct MatchView<'a> {
    state: &'a MatchState,
    seat: PlayerId,
}

impl<'a> MatchView<'a> {
    pub fn new(state: &'a MatchState, seat: PlayerId) -> Self {
        MatchView { state, seat }
    }

    pub fn seat(&self) -> PlayerId {
        self.seat
    }

    pub fn opponent(&self) -> PlayerId {
        self.seat.opponent()
    }

    pub fn is_active(&self) -> bool {
        self.state.turn.active_player_idx == self.seat.idx()
    }

    pub fn turn_number(&self) -> u32 {
        self.state.turn.turn_number
    }

    pub fn supply(&self) -> i32 {
        self.state.players[self.seat.idx()].supply
    }

    pub fn life(&self) -> i32 {
        self.state.players[self.seat.idx()].life
    }

    pub fn opponent_life(&self) -> i32 {
        self.state.players[self.opponent().idx()].life
    }

    pub fn hand(&self) -> &[CardInstance] {
        &self.state.players[self.seat.idx()].hand
    }

    pub fn battlefield(&self) -> &[CardInstance] {
        &self.state.players[self.seat.idx()].battlefield
    }

    pub fn opponent_battlefield(&self) -> &[CardInstance] {
        &self.state.players[self.opponent().idx()].battlefield
    }

    pub fn deck_count(&self) -> usize {
        self.state.players[self.seat.idx()].deck.len()
    }
}

/// Decision-maker for one seat
///
/// The match runner calls `choose_command` repeatedly during the seat's
/// Main phase until it returns [`Command::EndTurn`] (or the match ends).
pub trait PlayerController {
    /// The seat this controller plays
    fn seat(&self) -> PlayerId;

    /// Pick the next command for the current state
    fn choose_command(&mut self, view: &MatchView) -> Command;

    /// Called when the match ends (for cleanup/logging)
    fn on_match_end(&mut self, _view: &MatchView, _won: bool) {}
}
