//! Persisted player profile: owned collection and saved decks

use crate::core::CardId;
use crate::loader::{CardCatalog, DeckList};
use crate::{EngineError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A player's owned cards and saved deck lists
///
/// The collection maps card id to owned-copy count. Saved decks are not
/// re-validated on load; validation runs when a deck enters a match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerProfile {
    #[serde(default)]
    pub collection: FxHashMap<CardId, u32>,
    #[serde(default)]
    pub decks: Vec<DeckList>,
}

impl PlayerProfile {
    /// Starter profile: two copies of every non-template Common
    pub fn starter(catalog: &CardCatalog) -> PlayerProfile {
        let collection = catalog
            .iter()
            .filter(|d| !d.is_template && d.rarity == "Common")
            .map(|d| (d.id.clone(), 2))
            .collect();
        PlayerProfile {
            collection,
            decks: Vec::new(),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<PlayerProfile> {
        let content = fs::read_to_string(path).map_err(EngineError::IoError)?;
        serde_json::from_str(&content).map_err(|e| EngineError::SerializationError(e.to_string()))
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::SerializationError(e.to_string()))?;
        fs::write(path, content).map_err(EngineError::IoError)?;
        Ok(())
    }

    pub fn owned_copies(&self, id: &CardId) -> u32 {
        self.collection.get(id).copied().unwrap_or(0)
    }

    pub fn add_copies(&mut self, id: CardId, count: u32) {
        *self.collection.entry(id).or_insert(0) += count;
    }

    /// Whether the collection covers every copy a deck list uses
    pub fn owns_deck(&self, deck: &DeckList) -> bool {
        let mut needed: FxHashMap<&CardId, u32> = FxHashMap::default();
        for id in &deck.cards {
            *needed.entry(id).or_insert(0) += 1;
        }
        needed.iter().all(|(id, n)| self.owned_copies(id) >= *n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardDefinition, CardKind};
    use smallvec::SmallVec;

    fn def(id: &str, rarity: &str, is_template: bool) -> CardDefinition {
        CardDefinition {
            id: CardId::from(id),
            name: format!("Card {}", id),
            kind: CardKind::Unit,
            cost: 1,
            attack: 1,
            max_health: 1,
            rarity: rarity.to_string(),
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

    #[test]
    fn test_starter_collection() {
        let catalog = CardCatalog::from_definitions([
            def("1", "Common", false),
            def("2", "Common", false),
            def("3", "Rare", false),
            def("4", "Common", true),
        ]);
        let profile = PlayerProfile::starter(&catalog);

        assert_eq!(profile.owned_copies(&CardId::from("1")), 2);
        assert_eq!(profile.owned_copies(&CardId::from("2")), 2);
        assert_eq!(profile.owned_copies(&CardId::from("3")), 0);
        assert_eq!(profile.owned_copies(&CardId::from("4")), 0);
    }

    #[test]
    fn test_owns_deck() {
        let catalog = CardCatalog::from_definitions([
            def("1", "Common", false),
            def("2", "Common", false),
        ]);
        let mut profile = PlayerProfile::starter(&catalog);

        let within = DeckList::new(
            "ok",
            vec![CardId::from("1"), CardId::from("1"), CardId::from("2")],
        );
        assert!(profile.owns_deck(&within));

        let beyond = DeckList::new(
            "over",
            vec![CardId::from("1"), CardId::from("1"), CardId::from("1")],
        );
        assert!(!profile.owns_deck(&beyond));

        profile.add_copies(CardId::from("1"), 1);
        assert!(profile.owns_deck(&beyond));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let catalog = CardCatalog::from_definitions([def("1", "Common", false)]);
        let mut profile = PlayerProfile::starter(&catalog);
        profile.decks.push(DeckList::new(
            "saved",
            vec![CardId::from("1"), CardId::from("1")],
        ));

        let dir = std::env::temp_dir().join("warfront_profile_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("profile.json");

        profile.save_to_file(&path).unwrap();
        let loaded = PlayerProfile::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.owned_copies(&CardId::from("1")), 2);
        assert_eq!(loaded.decks.len(), 1);
        assert_eq!(loaded.decks[0].name, "saved");
    }
}
