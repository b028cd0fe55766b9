//! Core game types and entities

pub mod entity;
pub mod card;
pub mod effects;
pub mod player;

pub use entity::{InstanceId, PlayerId};
pub use card::{CardDefinition, CardId, CardInstance, CardKind, UnitTrait};
pub use effects::{DeployEffect, DestroyedEffect, OrderEffect, TargetSelector};
pub use player::{Player, MAX_SUPPLY, STARTING_LIFE};
