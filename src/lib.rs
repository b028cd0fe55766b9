//! Warfront - a two-player collectible-card battle engine
//!
//! The engine owns turn/phase progression, supply accrual, card-play and
//! combat resolution (including trait interactions such as Armor, Piercing,
//! First Strike, Deadly, Guard and Ambush), triggered Deploy/Destroyed
//! effects, win-condition detection, and a scripted greedy opponent.
//!
//! Rendering, input capture, deck building and persistence are external
//! collaborators: they drive the engine through the command API
//! (`play_card` / `attack` / `end_turn`) and observe it through read-only
//! [`game::MatchSnapshot`]s.

pub mod core;
pub mod game;
pub mod loader;
pub mod error;

pub use error::{EngineError, Result};
