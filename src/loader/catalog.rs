//! Card catalog and display-table loaders
//!
//! The content format is JSON: an array of card objects (the shape the
//! upstream card maker produces), plus companion trait-description and
//! faction/country lore tables. The lore and trait tables are consumed
//! only for display and are never required for rules logic.

use crate::core::{CardDefinition, CardId, DeployEffect, DestroyedEffect, OrderEffect, UnitTrait};
use crate::{EngineError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;
use std::fs;
use std::path::Path;

/// Raw card object as it appears in `cards.json`
///
/// Effects arrive as loose `kind`/`value`/`target` fields and are parsed
/// into typed variants on load.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCard {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: crate::core::CardKind,
    cost: i32,
    #[serde(default)]
    atk: Option<i32>,
    #[serde(default)]
    max_hp: Option<i32>,
    #[serde(default)]
    rarity: Option<String>,
    #[serde(default)]
    faction: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    traits: Vec<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_template: bool,
    #[serde(default)]
    deploy_effect: Option<String>,
    #[serde(default)]
    deploy_value: Option<Value>,
    #[serde(default)]
    deploy_target: Option<String>,
    #[serde(default)]
    destroyed_effect: Option<String>,
    #[serde(default)]
    destroyed_value: Option<Value>,
    #[serde(default)]
    order_effect: Option<String>,
    #[serde(default)]
    order_value: Option<Value>,
}

impl RawCard {
    fn into_definition(self) -> CardDefinition {
        let deploy_effect = self.deploy_effect.as_deref().map(|kind| {
            DeployEffect::from_descriptor(kind, self.deploy_value.as_ref(), self.deploy_target.as_deref())
        });
        let destroyed_effect = self
            .destroyed_effect
            .as_deref()
            .map(|kind| DestroyedEffect::from_descriptor(kind, self.destroyed_value.as_ref()));
        let order_effect = self
            .order_effect
            .as_deref()
            .map(|kind| OrderEffect::from_descriptor(kind, self.order_value.as_ref()));

        CardDefinition {
            id: CardId::new(self.id),
            name: self.name,
            kind: self.kind,
            cost: self.cost,
            attack: self.atk.unwrap_or(0),
            max_health: self.max_hp.unwrap_or(0),
            rarity: self.rarity.unwrap_or_default(),
            faction: self.faction.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            traits: self
                .traits
                .iter()
                .map(|t| UnitTrait::parse(t))
                .collect::<SmallVec<[UnitTrait; 4]>>(),
            deploy_effect,
            destroyed_effect,
            order_effect,
            description: self.description.unwrap_or_default(),
            is_template: self.is_template,
        }
    }
}

/// Immutable card catalog, keyed by identifier
///
/// Keeps the content file's insertion order for deterministic iteration.
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardDefinition>,
    order: Vec<CardId>,
}

impl CardCatalog {
    /// Load a catalog from a `cards.json` file
    pub fn load_from_file(path: &Path) -> Result<CardCatalog> {
        let content = fs::read_to_string(path).map_err(EngineError::IoError)?;
        Self::from_json_str(&content)
    }

    /// Parse a catalog from JSON content
    pub fn from_json_str(content: &str) -> Result<CardCatalog> {
        let raw: Vec<RawCard> = serde_json::from_str(content)
            .map_err(|e| EngineError::InvalidCardFormat(e.to_string()))?;
        Ok(Self::from_definitions(
            raw.into_iter().map(RawCard::into_definition),
        ))
    }

    /// Build a catalog from already-typed definitions (tests, tools)
    pub fn from_definitions(defs: impl IntoIterator<Item = CardDefinition>) -> CardCatalog {
        let mut catalog = CardCatalog::default();
        for def in defs {
            if !catalog.cards.contains_key(&def.id) {
                catalog.order.push(def.id.clone());
            }
            catalog.cards.insert(def.id.clone(), def);
        }
        catalog
    }

    /// Look up a definition, failing with `UnknownCard` on a miss
    pub fn get(&self, id: &CardId) -> Result<&CardDefinition> {
        self.cards
            .get(id)
            .ok_or_else(|| EngineError::UnknownCard(id.to_string()))
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    /// Definitions in content-file order
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }

    /// Identifiers legal in gameplay pools (templates excluded)
    pub fn playable_ids(&self) -> Vec<CardId> {
        self.iter()
            .filter(|d| !d.is_template)
            .map(|d| d.id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Display name and description for a trait tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Trait-description table (`traits.json`), display-only
#[derive(Debug, Clone, Default)]
pub struct TraitTable(FxHashMap<String, TraitInfo>);

impl TraitTable {
    pub fn load_from_file(path: &Path) -> Result<TraitTable> {
        let content = fs::read_to_string(path).map_err(EngineError::IoError)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<TraitTable> {
        let map: FxHashMap<String, TraitInfo> = serde_json::from_str(content)
            .map_err(|e| EngineError::InvalidCardFormat(e.to_string()))?;
        Ok(TraitTable(map))
    }

    pub fn get(&self, tag: &str) -> Option<&TraitInfo> {
        self.0.get(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One faction or country lore entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoreEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Factions carry a display color; countries usually do not
    #[serde(default)]
    pub color: Option<String>,
}

/// Faction/country lore tables (`lore.json`), display-only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoreData {
    #[serde(default)]
    pub factions: FxHashMap<String, LoreEntry>,
    #[serde(default)]
    pub countries: FxHashMap<String, LoreEntry>,
}

impl LoreData {
    pub fn load_from_file(path: &Path) -> Result<LoreData> {
        let content = fs::read_to_string(path).map_err(EngineError::IoError)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<LoreData> {
        serde_json::from_str(content).map_err(|e| EngineError::InvalidCardFormat(e.to_string()))
    }
}
