//! Content loading: card catalog, deck lists, and player profiles

pub mod catalog;
pub mod deck;
pub mod profile;

pub use catalog::{CardCatalog, LoreData, LoreEntry, TraitInfo, TraitTable};
pub use deck::{DeckList, MAX_CARD_COPIES, MAX_DECK_SIZE, MIN_DECK_SIZE};
pub use profile::PlayerProfile;
