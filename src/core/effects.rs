//! Typed triggered-effect descriptors
//!
//! The content format carries effects as loose `{kind, value, target}`
//! descriptors. They are parsed once, at catalog load, into exhaustive
//! tagged variants; unrecognized kinds become explicit no-op variants that
//! the dispatcher logs and skips, so new content degrades gracefully
//! instead of failing the load.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which friendly units qualify as a Deploy-effect target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetSelector {
    /// Another friendly unit (not the effect's source)
    OtherFriendlyUnit,
    /// Uniformly random friendly Vehicle unit other than the source
    RandomFriendlyVehicle,
    /// Any friendly unit other than the source
    AnyOtherFriendly,
}

impl TargetSelector {
    fn parse(raw: Option<&str>, default: TargetSelector) -> TargetSelector {
        match raw {
            Some("other_friendly_unit") => TargetSelector::OtherFriendlyUnit,
            Some("random_friendly_vehicle") => TargetSelector::RandomFriendlyVehicle,
            _ => default,
        }
    }
}

/// Effect fired once when a Unit enters the battlefield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeployEffect {
    /// Restore health to one qualifying damaged friendly unit, capped at
    /// its maximum health
    HealFriendly {
        amount: i32,
        target: TargetSelector,
    },
    /// Permanently buff a random qualifying friendly unit; the health buff
    /// raises maximum health as well
    ImproveUnit {
        attack: i32,
        health: i32,
        target: TargetSelector,
    },
    /// Unrecognized descriptor kind; dispatches as a logged no-op
    Unknown { kind: String },
}

impl DeployEffect {
    /// Build from a raw content descriptor
    pub fn from_descriptor(kind: &str, value: Option<&Value>, target: Option<&str>) -> Self {
        match kind {
            "heal_friendly" => DeployEffect::HealFriendly {
                amount: scalar_value(value, 1),
                target: TargetSelector::parse(target, TargetSelector::OtherFriendlyUnit),
            },
            "improve_unit" => DeployEffect::ImproveUnit {
                attack: field_value(value, "atk"),
                health: field_value(value, "hp"),
                target: TargetSelector::parse(target, TargetSelector::AnyOtherFriendly),
            },
            _ => DeployEffect::Unknown {
                kind: kind.to_string(),
            },
        }
    }
}

/// Effect fired during cleanup when a Unit leaves the battlefield dead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DestroyedEffect {
    /// Deal a fixed amount of damage to every unit on either battlefield
    DamageAll { amount: i32 },
    /// Unrecognized descriptor kind; dispatches as a logged no-op
    Unknown { kind: String },
}

impl DestroyedEffect {
    pub fn from_descriptor(kind: &str, value: Option<&Value>) -> Self {
        match kind {
            "damage_all" => DestroyedEffect::DamageAll {
                amount: scalar_value(value, 1),
            },
            _ => DestroyedEffect::Unknown {
                kind: kind.to_string(),
            },
        }
    }
}

/// Effect resolved when an Order card is played
///
/// Orders never occupy a zone: the instance resolves its effect and is
/// discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderEffect {
    /// Draw cards for the player of the Order
    DrawCards { count: u32 },
    /// Unrecognized descriptor kind; dispatches as a logged no-op
    Unknown { kind: String },
}

impl OrderEffect {
    pub fn from_descriptor(kind: &str, value: Option<&Value>) -> Self {
        match kind {
            "draw_cards" => OrderEffect::DrawCards {
                count: scalar_value(value, 1).max(0) as u32,
            },
            _ => OrderEffect::Unknown {
                kind: kind.to_string(),
            },
        }
    }
}

fn scalar_value(value: Option<&Value>, default: i32) -> i32 {
    value
        .and_then(|v| v.as_i64())
        .map(|v| v as i32)
        .unwrap_or(default)
}

fn field_value(value: Option<&Value>, field: &str) -> i32 {
    value
        .and_then(|v| v.get(field))
        .and_then(|v| v.as_i64())
        .map(|v| v as i32)
        .unwrap_or(0)
}
