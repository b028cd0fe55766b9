//! Match runner: drives scripted seats until the match is decided
//!
//! The runner is the cooperative scheduler the engine's contract asks
//! for: after a seat's turn start completes, its controller is consulted
//! for one command at a time until it ends the turn. Commands never
//! interleave; any presentation delay between them belongs to the
//! consumer, not here.

use crate::core::PlayerId;
use crate::game::controller::{Command, MatchView, PlayerController};
use crate::game::state::{MatchOutcome, MatchState};

/// Ceiling on commands in one turn; a controller stuck re-issuing
/// rejected commands gets its turn ended for it
const MAX_COMMANDS_PER_TURN: u32 = 200;

/// Result of running a match to completion
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Winner (None on a draw or turn-limit stop)
    pub winner: Option<PlayerId>,
    /// Turn counter when the match ended
    pub turns_played: u32,
    pub end_reason: MatchEndReason,
}

/// Why the match ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEndReason {
    /// A player's life reached zero; carries the winning seat
    Knockout { winner: PlayerId },
    /// Both players fell in the same resolution
    Draw,
    /// The configured turn limit was reached
    TurnLimit,
}

/// Drives controllers against a match state
pub struct MatchRunner<'a> {
    pub state: &'a mut MatchState,
    max_turns: u32,
}

impl<'a> MatchRunner<'a> {
    pub fn new(state: &'a mut MatchState, max_turns: u32) -> Self {
        MatchRunner { state, max_turns }
    }

    /// Run both seats to completion (or the turn limit)
    pub fn run_match(
        &mut self,
        seat0: &mut dyn PlayerController,
        seat1: &mut dyn PlayerController,
    ) -> MatchResult {
        while self.state.outcome == MatchOutcome::InProgress
            && self.state.turn.turn_number <= self.max_turns
        {
            let active = self.state.turn.active_player_idx;
            if active == 0 {
                self.run_turn(seat0);
            } else {
                self.run_turn(seat1);
            }
        }

        let result = self.result();
        let view0 = MatchView::new(self.state, PlayerId::new(0));
        seat0.on_match_end(&view0, result.winner == Some(PlayerId::new(0)));
        let view1 = MatchView::new(self.state, PlayerId::new(1));
        seat1.on_match_end(&view1, result.winner == Some(PlayerId::new(1)));
        result
    }

    /// Run one seat's turn: consult the controller until it ends the
    /// turn, an error forces the issue, or the match is decided
    pub fn run_turn(&mut self, controller: &mut dyn PlayerController) {
        let seat = controller.seat();
        for _ in 0..MAX_COMMANDS_PER_TURN {
            if self.state.outcome != MatchOutcome::InProgress {
                return;
            }

            let command = {
                let view = MatchView::new(self.state, seat);
                controller.choose_command(&view)
            };
            let ends_turn = command == Command::EndTurn;
            let result = self.state.execute(seat, command);

            if ends_turn {
                return;
            }
            if result.is_err() {
                // Already logged; force the handover so the match moves on
                let _ = self.state.end_turn();
                return;
            }
        }
        let _ = self.state.end_turn();
    }

    fn result(&self) -> MatchResult {
        let (winner, end_reason) = match self.state.outcome {
            MatchOutcome::Winner(player) => (
                Some(player),
                MatchEndReason::Knockout { winner: player },
            ),
            MatchOutcome::Draw => (None, MatchEndReason::Draw),
            MatchOutcome::InProgress => (None, MatchEndReason::TurnLimit),
        };
        MatchResult {
            winner,
            turns_played: self.state.turn.turn_number,
            end_reason,
        }
    }
}
