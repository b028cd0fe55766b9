//! Read-only match snapshots for rendering and logging
//!
//! The snapshot is the engine's only outward-facing surface besides the
//! command API: a serializable copy of everything a renderer or log
//! consumer may show. It is detached from the live state - taking one
//! never holds a borrow across consumer code.

use crate::core::{CardInstance, CardKind};
use crate::game::state::{MatchOutcome, MatchState};
use serde::{Deserialize, Serialize};

/// Display form of one card instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardView {
    pub instance_id: u32,
    pub card_id: String,
    pub name: String,
    pub kind: CardKind,
    pub cost: i32,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub can_attack: bool,
    pub traits: Vec<String>,
}

impl CardView {
    fn from_instance(instance: &CardInstance) -> Self {
        CardView {
            instance_id: instance.id.as_u32(),
            card_id: instance.card_id.to_string(),
            name: instance.name.clone(),
            kind: instance.kind,
            cost: instance.cost,
            attack: instance.attack,
            health: instance.health,
            max_health: instance.max_health,
            can_attack: instance.can_attack,
            traits: instance.traits.iter().map(|t| t.tag()).collect(),
        }
    }
}

/// Display form of one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub life: i32,
    pub supply: i32,
    pub max_supply: i32,
    /// Deck contents stay hidden; only the count is exposed
    pub deck_count: usize,
    pub hand: Vec<CardView>,
    pub battlefield: Vec<CardView>,
}

/// Match outcome as exposed to consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeView {
    InProgress,
    Winner(u8),
    Draw,
}

/// A complete read-only view of the match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub players: Vec<PlayerSnapshot>,
    pub active_player_idx: usize,
    pub turn_number: u32,
    pub outcome: OutcomeView,
    /// Append-only event log, oldest first
    pub log: Vec<String>,
}

impl MatchState {
    /// Produce a fresh snapshot of the current state
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    name: p.name.clone(),
                    life: p.life,
                    supply: p.supply,
                    max_supply: p.max_supply,
                    deck_count: p.deck.len(),
                    hand: p.hand.iter().map(CardView::from_instance).collect(),
                    battlefield: p.battlefield.iter().map(CardView::from_instance).collect(),
                })
                .collect(),
            active_player_idx: self.turn.active_player_idx,
            turn_number: self.turn.turn_number,
            outcome: match self.outcome {
                MatchOutcome::InProgress => OutcomeView::InProgress,
                MatchOutcome::Winner(p) => OutcomeView::Winner(p.idx() as u8),
                MatchOutcome::Draw => OutcomeView::Draw,
            },
            log: self.logger.messages(),
        }
    }
}
