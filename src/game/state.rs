//! Match state: the two players, turn structure, and shared services
//!
//! All mutation happens synchronously inside one command handler at a
//! time (single logical thread of control); the catalog is shared
//! read-only and instances are deep copies, so nothing aliases it.

use crate::core::{CardId, CardInstance, InstanceId, Player, PlayerId};
use crate::game::logger::{GameLogger, VerbosityLevel};
use crate::game::phase::TurnStructure;
use crate::loader::CardCatalog;
use crate::{EngineError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::cell::RefCell;
use std::sync::Arc;

/// What an empty-deck draw does
///
/// The reference behavior is a logged no-op; escalating fatigue damage is
/// kept behind configuration instead of guessed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FatiguePolicy {
    /// Log the empty deck and draw nothing (default)
    #[default]
    None,
    /// Deal 1, 2, 3, ... damage per successive empty draw
    Escalating,
}

/// Match-level configuration supplied at start
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Seed for the match RNG (deck shuffles, random effect targets)
    pub seed: u64,
    pub fatigue: FatiguePolicy,
    pub player_names: [String; 2],
    pub verbosity: VerbosityLevel,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            seed: 0,
            fatigue: FatiguePolicy::default(),
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
            verbosity: VerbosityLevel::default(),
        }
    }
}

/// Terminal state of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    InProgress,
    Winner(PlayerId),
    /// Both players at zero or less life from the same resolution
    Draw,
}

/// Input-routing selection state, owned by the command layer
///
/// Tracks which unit a consumer has picked while it chooses a target.
/// This is presentation plumbing, not match rules: every command clears
/// it, and it never appears in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub selected: Option<InstanceId>,
    pub mode: SelectionMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Idle,
    AwaitingTarget,
}

impl Selection {
    pub fn select(&mut self, instance: InstanceId) {
        self.selected = Some(instance);
        self.mode = SelectionMode::AwaitingTarget;
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.mode = SelectionMode::Idle;
    }
}

/// Complete match state
///
/// Central structure owned by whoever drives the match. External
/// consumers interact only through the command API and
/// [`snapshot`](MatchState::snapshot).
#[derive(Debug)]
pub struct MatchState {
    /// The two players, indexed by seat (always length 2)
    pub players: Vec<Player>,

    pub turn: TurnStructure,

    pub outcome: MatchOutcome,

    pub selection: Selection,

    pub config: MatchConfig,

    /// Append-only event log
    pub logger: GameLogger,

    /// Shared, read-only card catalog; never mutated after load
    pub catalog: Arc<CardCatalog>,

    /// Match RNG (seeded from config for reproducible games)
    ///
    /// RefCell so random effect resolution can draw numbers while player
    /// zones are mutably borrowed.
    pub rng: RefCell<ChaCha12Rng>,

    /// Monotonic instance-id counter; ids are never reused
    next_instance_id: u32,

    /// Per-seat escalating fatigue counters (only under
    /// `FatiguePolicy::Escalating`)
    pub(crate) fatigue_counters: [i32; 2],
}

impl MatchState {
    /// Create an empty two-player match (no decks, no turn started)
    pub fn new(catalog: Arc<CardCatalog>, config: MatchConfig) -> Self {
        let players = vec![
            Player::new(PlayerId::new(0), config.player_names[0].clone()),
            Player::new(PlayerId::new(1), config.player_names[1].clone()),
        ];
        let seed = config.seed;
        let verbosity = config.verbosity;
        MatchState {
            players,
            turn: TurnStructure::new(),
            outcome: MatchOutcome::InProgress,
            selection: Selection::default(),
            config,
            logger: GameLogger::with_verbosity(verbosity),
            catalog,
            rng: RefCell::new(ChaCha12Rng::seed_from_u64(seed)),
            next_instance_id: 0,
            fatigue_counters: [0, 0],
        }
    }

    /// Reseed the match RNG (normally done once via the config seed)
    pub fn seed_rng(&mut self, seed: u64) {
        *self.rng.borrow_mut() = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Start a match from two deck lists
    ///
    /// Fails with `InvalidDeck` if either list is empty. Deck-size and
    /// copy-limit validation is a collaborator responsibility performed
    /// before this call (see `loader::deck`). Shuffles both decks, deals
    /// the opening four cards to each hand, then runs seat 0's first
    /// turn start (which draws the fifth card).
    pub fn start_match(
        catalog: Arc<CardCatalog>,
        deck_a: Vec<CardId>,
        deck_b: Vec<CardId>,
        config: MatchConfig,
    ) -> Result<MatchState> {
        if deck_a.is_empty() || deck_b.is_empty() {
            return Err(EngineError::InvalidDeck(
                "both players need a non-empty deck".to_string(),
            ));
        }

        let mut state = MatchState::new(catalog, config);
        state.logger.log("Starting match with selected decks...");

        state.players[0].deck = deck_a;
        state.players[1].deck = deck_b;
        for idx in 0..2 {
            state.shuffle_deck(idx);
        }

        // Opening hands: both players draw 4
        for idx in 0..2 {
            for _ in 0..4 {
                state.draw_card(idx);
            }
        }

        state.start_turn();
        Ok(state)
    }

    /// Shuffle a player's deck using the match RNG
    pub fn shuffle_deck(&mut self, player_idx: usize) {
        use rand::seq::SliceRandom;
        self.players[player_idx]
            .deck
            .shuffle(&mut *self.rng.borrow_mut());
    }

    fn next_instance_id(&mut self) -> InstanceId {
        let id = InstanceId::new(self.next_instance_id);
        self.next_instance_id += 1;
        id
    }

    /// Instance factory: deep, independent copy of the catalog entry with
    /// a fresh monotonic instance id; Units start at full health
    ///
    /// Fails with `UnknownCard` if the identifier is not in the catalog.
    pub fn instantiate(&mut self, card_id: &CardId, owner: PlayerId) -> Result<CardInstance> {
        let catalog = Arc::clone(&self.catalog);
        let def = catalog.get(card_id)?;
        let id = self.next_instance_id();
        Ok(CardInstance::from_definition(def, id, owner))
    }

    pub fn active_player_idx(&self) -> usize {
        self.turn.active_player_idx
    }

    pub fn active_player(&self) -> &Player {
        &self.players[self.turn.active_player_idx]
    }

    pub fn opponent_idx(&self) -> usize {
        1 - self.turn.active_player_idx
    }

    /// Locate an instance on either battlefield
    pub fn find_on_battlefield(&self, id: InstanceId) -> Option<(usize, usize)> {
        for (player_idx, player) in self.players.iter().enumerate() {
            if let Some(pos) = player.find_battlefield(id) {
                return Some((player_idx, pos));
            }
        }
        None
    }

    /// Command-layer selection: remember a unit while the consumer picks
    /// a target
    pub fn select_attacker(&mut self, id: InstanceId) {
        self.selection.select(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Scan both players and settle the outcome; simultaneous knockout is
    /// a draw
    pub(crate) fn check_win_condition(&mut self) {
        if self.outcome != MatchOutcome::InProgress {
            return;
        }
        let dead = [self.players[0].life <= 0, self.players[1].life <= 0];
        match dead {
            [true, true] => {
                self.outcome = MatchOutcome::Draw;
                self.logger
                    .log_minimal("--- GAME OVER --- Both players fall. The match is a draw. ---");
            }
            [true, false] => self.declare_winner(PlayerId::new(1)),
            [false, true] => self.declare_winner(PlayerId::new(0)),
            [false, false] => {}
        }
    }

    fn declare_winner(&mut self, winner: PlayerId) {
        self.outcome = MatchOutcome::Winner(winner);
        let name = self.players[winner.idx()].name.clone();
        self.logger
            .log_minimal(format!("--- GAME OVER --- {} wins! ---", name));
    }

    /// Reject commands once the match has been decided
    pub(crate) fn ensure_in_progress(&mut self) -> Result<()> {
        if self.outcome == MatchOutcome::InProgress {
            Ok(())
        } else {
            self.logger
                .log("The match is over; no further commands are accepted.");
            Err(EngineError::IllegalAction("match is over".to_string()))
        }
    }

    /// Log an illegal action, reset selection, leave state untouched
    pub(crate) fn illegal(&mut self, message: impl Into<String>) -> Result<()> {
        let message = message.into();
        self.logger.log(&message);
        self.selection.clear();
        Err(EngineError::IllegalAction(message))
    }
}
