//! Match state, turn machinery, and the command API

pub mod actions;
pub mod combat;
pub mod controller;
pub mod effects;
pub mod greedy_controller;
pub mod logger;
pub mod match_loop;
pub mod phase;
pub mod snapshot;
pub mod state;

pub use controller::{AttackTarget, Command, MatchView, PlayerController};
pub use effects::MAX_CLEANUP_PASSES;
pub use greedy_controller::GreedyController;
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use match_loop::{MatchEndReason, MatchResult, MatchRunner};
pub use phase::{TurnPhase, TurnStructure};
pub use snapshot::{CardView, MatchSnapshot, OutcomeView, PlayerSnapshot};
pub use state::{FatiguePolicy, MatchConfig, MatchOutcome, MatchState, Selection, SelectionMode};
