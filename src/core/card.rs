//! Card definitions and per-match card instances

use crate::core::effects::{DeployEffect, DestroyedEffect, OrderEffect};
use crate::core::entity::{InstanceId, PlayerId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Catalog identifier for a card (e.g. "5008")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    pub fn new(s: impl Into<String>) -> Self {
        CardId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        CardId(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        CardId(s)
    }
}

/// Card kinds: Units occupy the battlefield, Orders resolve immediately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Unit,
    Order,
}

/// Typed combat trait, parsed from catalog tag strings
///
/// Tags the rules engine does not know stay around as `Other` so they can
/// still be displayed, but they never affect combat math.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UnitTrait {
    /// Attacks on this side must target a Guard unit while one exists
    Guard,
    /// Can attack the turn it is played
    Ambush,
    /// Damage dealt by this unit ignores the target's Armor
    Piercing,
    /// Combat damage resolves before the opposing side's
    FirstStrike,
    /// Any opposing unit this side damages is destroyed
    Deadly,
    /// Reduces incoming non-pierced damage by N, floored at 0
    Armor(i32),
    Vehicle,
    /// Display-only tag with no rules meaning
    Other(String),
}

impl UnitTrait {
    /// Parse a catalog tag such as "first-strike" or "armor-2"
    pub fn parse(tag: &str) -> Self {
        match tag {
            "guard" => UnitTrait::Guard,
            "ambush" => UnitTrait::Ambush,
            "piercing" => UnitTrait::Piercing,
            "first-strike" => UnitTrait::FirstStrike,
            "deadly" => UnitTrait::Deadly,
            "vehicle" => UnitTrait::Vehicle,
            _ => {
                if let Some(suffix) = tag.strip_prefix("armor-") {
                    // Malformed suffix degrades to 0, same as the content format
                    UnitTrait::Armor(suffix.parse().unwrap_or(0))
                } else {
                    UnitTrait::Other(tag.to_string())
                }
            }
        }
    }

    /// The catalog tag string for this trait
    pub fn tag(&self) -> String {
        match self {
            UnitTrait::Guard => "guard".to_string(),
            UnitTrait::Ambush => "ambush".to_string(),
            UnitTrait::Piercing => "piercing".to_string(),
            UnitTrait::FirstStrike => "first-strike".to_string(),
            UnitTrait::Deadly => "deadly".to_string(),
            UnitTrait::Armor(n) => format!("armor-{}", n),
            UnitTrait::Vehicle => "vehicle".to_string(),
            UnitTrait::Other(tag) => tag.clone(),
        }
    }
}

impl From<String> for UnitTrait {
    fn from(s: String) -> Self {
        UnitTrait::parse(&s)
    }
}

impl From<UnitTrait> for String {
    fn from(t: UnitTrait) -> String {
        t.tag()
    }
}

impl fmt::Display for UnitTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Immutable catalog entry for a card
///
/// Shared read-only between matches; gameplay state lives on
/// [`CardInstance`] copies produced by the instance factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub kind: CardKind,
    pub cost: i32,
    /// Attack value (Units; 0 for Orders)
    pub attack: i32,
    /// Maximum health (Units; 0 for Orders)
    pub max_health: i32,
    pub rarity: String,
    pub faction: String,
    pub country: String,
    pub traits: SmallVec<[UnitTrait; 4]>,
    pub deploy_effect: Option<DeployEffect>,
    pub destroyed_effect: Option<DestroyedEffect>,
    pub order_effect: Option<OrderEffect>,
    pub description: String,
    /// Templates are authoring scaffolding, excluded from gameplay pools
    pub is_template: bool,
}

impl CardDefinition {
    pub fn has_trait_tag(&self, tag: &str) -> bool {
        self.traits.iter().any(|t| t.tag() == tag)
    }
}

/// A mutable per-match copy of a card definition
///
/// Owned exclusively by the zone Vec that holds it (hand or battlefield);
/// moving between zones transfers the value. Stat buffs mutate the
/// instance and never touch the catalog entry it was copied from.
#[derive(Debug, Clone, PartialEq)]
pub struct CardInstance {
    /// Unique for the lifetime of the match, never reused
    pub id: InstanceId,
    /// Catalog identifier this instance was created from
    pub card_id: CardId,
    pub name: String,
    pub kind: CardKind,
    pub cost: i32,
    pub attack: i32,
    /// Current health; an instance at health <= 0 is removed by cleanup
    pub health: i32,
    pub max_health: i32,
    pub traits: SmallVec<[UnitTrait; 4]>,
    pub deploy_effect: Option<DeployEffect>,
    pub destroyed_effect: Option<DestroyedEffect>,
    pub order_effect: Option<OrderEffect>,
    /// Attack eligibility this turn (summoning delay, once per turn)
    pub can_attack: bool,
    pub owner: PlayerId,
}

impl CardInstance {
    /// Deep, independent copy of a definition with a fresh instance id.
    /// Units start at full health.
    pub fn from_definition(def: &CardDefinition, id: InstanceId, owner: PlayerId) -> Self {
        CardInstance {
            id,
            card_id: def.id.clone(),
            name: def.name.clone(),
            kind: def.kind,
            cost: def.cost,
            attack: def.attack,
            health: def.max_health,
            max_health: def.max_health,
            traits: def.traits.clone(),
            deploy_effect: def.deploy_effect.clone(),
            destroyed_effect: def.destroyed_effect.clone(),
            order_effect: def.order_effect.clone(),
            can_attack: false,
            owner,
        }
    }

    pub fn has_guard(&self) -> bool {
        self.traits.contains(&UnitTrait::Guard)
    }

    pub fn has_ambush(&self) -> bool {
        self.traits.contains(&UnitTrait::Ambush)
    }

    pub fn has_piercing(&self) -> bool {
        self.traits.contains(&UnitTrait::Piercing)
    }

    pub fn has_first_strike(&self) -> bool {
        self.traits.contains(&UnitTrait::FirstStrike)
    }

    pub fn has_deadly(&self) -> bool {
        self.traits.contains(&UnitTrait::Deadly)
    }

    pub fn is_vehicle(&self) -> bool {
        self.traits.contains(&UnitTrait::Vehicle)
    }

    /// Armor value, 0 when the unit carries no armor tag
    pub fn armor(&self) -> i32 {
        self.traits
            .iter()
            .find_map(|t| match t {
                UnitTrait::Armor(n) => Some(*n),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn is_damaged(&self) -> bool {
        self.health < self.max_health
    }
}
