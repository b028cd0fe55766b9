//! Deck lists and construction-rule validation

use crate::core::CardId;
use crate::loader::CardCatalog;
use crate::{EngineError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const MIN_DECK_SIZE: usize = 20;
pub const MAX_DECK_SIZE: usize = 40;
pub const MAX_CARD_COPIES: usize = 2;

/// A named list of card identifiers
///
/// Order is the list's own business; shuffling happens at match setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    pub name: String,
    pub cards: Vec<CardId>,
}

impl DeckList {
    pub fn new(name: impl Into<String>, cards: Vec<CardId>) -> Self {
        DeckList {
            name: name.into(),
            cards,
        }
    }

    pub fn load_from_file(path: &Path) -> Result<DeckList> {
        let content = fs::read_to_string(path).map_err(EngineError::IoError)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<DeckList> {
        serde_json::from_str(content).map_err(|e| EngineError::InvalidCardFormat(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check the construction rules against a catalog: 20-40 cards, at
    /// most 2 copies of any one card, no templates, no unknown ids
    pub fn validate(&self, catalog: &CardCatalog) -> Result<()> {
        if self.cards.len() < MIN_DECK_SIZE {
            return Err(EngineError::InvalidDeck(format!(
                "deck '{}' has {} cards, minimum is {}",
                self.name,
                self.cards.len(),
                MIN_DECK_SIZE
            )));
        }
        if self.cards.len() > MAX_DECK_SIZE {
            return Err(EngineError::InvalidDeck(format!(
                "deck '{}' has {} cards, maximum is {}",
                self.name,
                self.cards.len(),
                MAX_DECK_SIZE
            )));
        }

        let mut copies: FxHashMap<&CardId, usize> = FxHashMap::default();
        for id in &self.cards {
            let def = catalog
                .get(id)
                .map_err(|_| EngineError::InvalidDeck(format!(
                    "deck '{}' references unknown card '{}'",
                    self.name, id
                )))?;
            if def.is_template {
                return Err(EngineError::InvalidDeck(format!(
                    "deck '{}' contains template card '{}'",
                    self.name, def.name
                )));
            }
            let count = copies.entry(id).or_insert(0);
            *count += 1;
            if *count > MAX_CARD_COPIES {
                return Err(EngineError::InvalidDeck(format!(
                    "deck '{}' has more than {} copies of '{}'",
                    self.name, MAX_CARD_COPIES, def.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardDefinition, CardKind};
    use smallvec::SmallVec;

    fn simple_def(id: &str, is_template: bool) -> CardDefinition {
        CardDefinition {
            id: CardId::from(id),
            name: format!("Card {}", id),
            kind: CardKind::Unit,
            cost: 1,
            attack: 1,
            max_health: 1,
            rarity: "Common".to_string(),
            faction: String::new(),
            country: String::new(),
            traits: SmallVec::new(),
            deploy_effect: None,
            destroyed_effect: None,
            order_effect: None,
            description: String::new(),
            is_template,
        }
    }

    fn test_catalog() -> CardCatalog {
        CardCatalog::from_definitions(
            (1..=15)
                .map(|n| simple_def(&n.to_string(), false))
                .chain(std::iter::once(simple_def("99", true))),
        )
    }

    fn two_of_each(ids: impl IntoIterator<Item = u32>) -> Vec<CardId> {
        ids.into_iter()
            .flat_map(|n| {
                let id = CardId::from(n.to_string());
                [id.clone(), id]
            })
            .collect()
    }

    #[test]
    fn test_valid_deck() {
        let deck = DeckList::new("Standard Issue", two_of_each(1..=10));
        assert_eq!(deck.len(), 20);
        assert!(deck.validate(&test_catalog()).is_ok());
    }

    #[test]
    fn test_deck_too_small() {
        let deck = DeckList::new("Skeleton", two_of_each(1..=9));
        assert!(matches!(
            deck.validate(&test_catalog()),
            Err(EngineError::InvalidDeck(_))
        ));
    }

    #[test]
    fn test_deck_too_large() {
        let mut cards = two_of_each(1..=15);
        cards.extend(two_of_each(1..=15));
        let deck = DeckList::new("Bloated", cards);
        assert!(deck.validate(&test_catalog()).is_err());
    }

    #[test]
    fn test_too_many_copies() {
        let mut cards = two_of_each(1..=10);
        // Third copy of "1" displaces one copy of "2"
        cards[2] = CardId::from("1");
        let deck = DeckList::new("Triples", cards);
        assert!(deck.validate(&test_catalog()).is_err());
    }

    #[test]
    fn test_unknown_and_template_cards_rejected() {
        let mut cards = two_of_each(1..=10);
        cards[0] = CardId::from("404");
        assert!(DeckList::new("Ghost", cards).validate(&test_catalog()).is_err());

        let mut cards = two_of_each(1..=10);
        cards[0] = CardId::from("99");
        assert!(DeckList::new("Scaffold", cards)
            .validate(&test_catalog())
            .is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let deck = DeckList::new("Standard Issue", two_of_each(1..=10));
        let json = serde_json::to_string(&deck).unwrap();
        assert_eq!(DeckList::from_json_str(&json).unwrap(), deck);
    }
}
