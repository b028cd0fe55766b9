//! Player representation

use crate::core::card::{CardId, CardInstance};
use crate::core::entity::{InstanceId, PlayerId};

/// Life total each player starts with
pub const STARTING_LIFE: i32 = 30;

/// Ceiling on `max_supply`
pub const MAX_SUPPLY: i32 = 10;

/// A player record: life, supply pool, and the three zones it owns
///
/// The deck holds bare catalog identifiers until drawn; hand and
/// battlefield hold owned [`CardInstance`]s. Draw-from-top pops from the
/// end of the deck Vec.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,

    /// Life total (terminal at <= 0)
    pub life: i32,

    /// Supply spendable this turn
    pub supply: i32,

    /// Supply cap; grows by one per own turn up to [`MAX_SUPPLY`]
    pub max_supply: i32,

    /// Ordered deck of card identifiers; the end of the Vec is the top
    pub deck: Vec<CardId>,

    pub hand: Vec<CardInstance>,

    pub battlefield: Vec<CardInstance>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Player {
            id,
            name: name.into(),
            life: STARTING_LIFE,
            supply: 0,
            max_supply: 0,
            deck: Vec::new(),
            hand: Vec::new(),
            battlefield: Vec::new(),
        }
    }

    /// Turn-start supply accrual: raise the cap (to the ceiling), refill
    pub fn refresh_supply(&mut self) {
        if self.max_supply < MAX_SUPPLY {
            self.max_supply += 1;
        }
        self.supply = self.max_supply;
    }

    /// Any Guard unit on this player's battlefield forces attacks against
    /// this side onto Guard targets
    pub fn has_guard(&self) -> bool {
        self.battlefield.iter().any(|u| u.has_guard())
    }

    pub fn find_battlefield(&self, id: InstanceId) -> Option<usize> {
        self.battlefield.iter().position(|u| u.id == id)
    }
}
