//! Turn phases and turn structure
//!
//! The phase machine is deliberately small: `TurnStart -> Main -> TurnEnd`,
//! looping between the two seats. There is no combat sub-phase; attacks
//! are legal at any point of `Main`, gated only by per-unit eligibility.
//! The machine never halts on its own - only the win-condition check
//! disables further commands.

use serde::{Deserialize, Serialize};

/// Phases of one player turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Supply accrual, draw, attack-eligibility reset
    TurnStart,
    /// Accepts Play and Attack commands in any order and count
    Main,
    /// Handover to the other seat
    TurnEnd,
}

/// Current turn bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStructure {
    /// Starts at 1 and increments only when control returns to seat 0
    pub turn_number: u32,

    /// Seat whose turn it is (0 or 1)
    pub active_player_idx: usize,

    pub phase: TurnPhase,
}

impl TurnStructure {
    /// Initial state: seat 0, turn 1, about to run its turn start
    pub fn new() -> Self {
        TurnStructure {
            turn_number: 1,
            active_player_idx: 0,
            phase: TurnPhase::TurnStart,
        }
    }

    /// Hand the turn to the other seat; a full round (control back at
    /// seat 0) advances the turn number
    pub fn pass_turn(&mut self) {
        self.active_player_idx = 1 - self.active_player_idx;
        if self.active_player_idx == 0 {
            self.turn_number += 1;
        }
        self.phase = TurnPhase::TurnStart;
    }
}

impl Default for TurnStructure {
    fn default() -> Self {
        Self::new()
    }
}
