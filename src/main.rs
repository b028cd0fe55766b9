//! Warfront - Main Binary
//!
//! Text-based two-player card battle engine with a scripted opponent

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use warfront::{
    game::{
        FatiguePolicy, GreedyController, MatchConfig, MatchEndReason, MatchRunner, MatchState,
        OutputMode, VerbosityLevel,
    },
    loader::{CardCatalog, DeckList, LoreData, PlayerProfile, TraitTable, MAX_DECK_SIZE},
};

/// Parse a verbosity argument; accepts names or the 0-3 numeric levels
fn parse_verbosity(s: &str) -> std::result::Result<VerbosityLevel, String> {
    match s.to_lowercase().as_str() {
        "silent" | "0" => Ok(VerbosityLevel::Silent),
        "minimal" | "1" => Ok(VerbosityLevel::Minimal),
        "normal" | "2" => Ok(VerbosityLevel::Normal),
        "verbose" | "3" => Ok(VerbosityLevel::Verbose),
        _ => Err(format!(
            "unknown verbosity '{s}' (use silent, minimal, normal, verbose or 0-3)"
        )),
    }
}

#[derive(Parser)]
#[command(name = "warfront")]
#[command(about = "Warfront - Card Battle Engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a match between two scripted seats
    Play {
        /// Card catalog file (cards.json)
        #[arg(long, default_value = "data/cards.json")]
        cards: PathBuf,

        /// Deck list file for player 1 (default: starter deck from the catalog)
        #[arg(long, value_name = "DECK_FILE")]
        deck_a: Option<PathBuf>,

        /// Deck list file for player 2 (default: starter deck from the catalog)
        #[arg(long, value_name = "DECK_FILE")]
        deck_b: Option<PathBuf>,

        /// Player 1 name
        #[arg(long, default_value = "Player 1")]
        p1_name: String,

        /// Player 2 name
        #[arg(long, default_value = "Player 2")]
        p2_name: String,

        /// Set random seed for deterministic matches
        #[arg(long)]
        seed: Option<u64>,

        /// Turn limit before the match is called off
        #[arg(long, default_value_t = 100)]
        max_turns: u32,

        /// Deal escalating damage on empty-deck draws
        #[arg(long)]
        fatigue: bool,

        /// Verbosity level for match output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, short = 'v', default_value = "normal", value_parser = parse_verbosity)]
        verbosity: VerbosityLevel,
    },

    /// List the card catalog
    Cards {
        /// Card catalog file (cards.json)
        #[arg(long, default_value = "data/cards.json")]
        cards: PathBuf,

        /// Trait description table (traits.json)
        #[arg(long, value_name = "TRAITS_FILE")]
        traits: Option<PathBuf>,

        /// Faction/country lore tables (lore.json)
        #[arg(long, value_name = "LORE_FILE")]
        lore: Option<PathBuf>,

        /// Include authoring templates in the listing
        #[arg(long)]
        include_templates: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            cards,
            deck_a,
            deck_b,
            p1_name,
            p2_name,
            seed,
            max_turns,
            fatigue,
            verbosity,
        } => run_match(
            cards, deck_a, deck_b, p1_name, p2_name, seed, max_turns, fatigue, verbosity,
        ),
        Commands::Cards {
            cards,
            traits,
            lore,
            include_templates,
        } => list_cards(cards, traits, lore, include_templates),
    }
}

/// Load a deck list from a file, or cut a starter deck from the catalog
fn resolve_deck(
    path: Option<&Path>,
    catalog: &CardCatalog,
    seat_label: &str,
) -> Result<DeckList> {
    let deck = match path {
        Some(path) => DeckList::load_from_file(path)
            .with_context(|| format!("loading deck file {}", path.display()))?,
        None => starter_deck(catalog),
    };
    deck.validate(catalog)
        .with_context(|| format!("deck for {seat_label} failed validation"))?;
    Ok(deck)
}

/// Default deck: every copy in the starter collection, capped at the
/// deck-size maximum
fn starter_deck(catalog: &CardCatalog) -> DeckList {
    let profile = PlayerProfile::starter(catalog);
    let mut cards = Vec::new();
    for def in catalog.iter() {
        let copies = profile.owned_copies(&def.id);
        for _ in 0..copies {
            cards.push(def.id.clone());
        }
    }
    cards.truncate(MAX_DECK_SIZE);
    DeckList::new("Standard Issue", cards)
}

#[allow(clippy::too_many_arguments)] // CLI parameters naturally map to function args
fn run_match(
    cards_path: PathBuf,
    deck_a_path: Option<PathBuf>,
    deck_b_path: Option<PathBuf>,
    p1_name: String,
    p2_name: String,
    seed: Option<u64>,
    max_turns: u32,
    fatigue: bool,
    verbosity: VerbosityLevel,
) -> Result<()> {
    println!("=== Warfront ===\n");

    println!("Loading card catalog...");
    let catalog = CardCatalog::load_from_file(&cards_path)
        .with_context(|| format!("loading card catalog {}", cards_path.display()))?;
    println!("  Loaded {} cards", catalog.len());

    let deck_a = resolve_deck(deck_a_path.as_deref(), &catalog, &p1_name)?;
    let deck_b = resolve_deck(deck_b_path.as_deref(), &catalog, &p2_name)?;
    println!("  {}: {} ({} cards)", p1_name, deck_a.name, deck_a.len());
    println!("  {}: {} ({} cards)\n", p2_name, deck_b.name, deck_b.len());

    let seed = seed.unwrap_or_else(rand::random);
    println!("Using random seed: {seed}");

    let config = MatchConfig {
        seed,
        fatigue: if fatigue {
            FatiguePolicy::Escalating
        } else {
            FatiguePolicy::None
        },
        player_names: [p1_name.clone(), p2_name.clone()],
        verbosity,
    };

    if verbosity >= VerbosityLevel::Minimal {
        println!("=== Starting Match ===\n");
    }

    let catalog = std::sync::Arc::new(catalog);
    let mut state = MatchState::start_match(catalog, deck_a.cards, deck_b.cards, config)?;

    // Setup ran with the logger in memory-only mode; echo what it
    // buffered, then switch to live output for the rest of the match
    for entry in state.logger.entries() {
        if entry.level <= verbosity {
            println!("{}", entry.message);
        }
    }
    state.logger.set_output_mode(OutputMode::Both);

    let mut seat0 = GreedyController::new(warfront::core::PlayerId::new(0));
    let mut seat1 = GreedyController::new(warfront::core::PlayerId::new(1));
    let result = MatchRunner::new(&mut state, max_turns).run_match(&mut seat0, &mut seat1);

    if verbosity >= VerbosityLevel::Minimal {
        println!("\n=== Match Over ===");
        match result.winner {
            Some(winner) => println!("Winner: {}", state.players[winner.idx()].name),
            None => match result.end_reason {
                MatchEndReason::TurnLimit => {
                    println!("No winner: turn limit ({max_turns}) reached")
                }
                _ => println!("The match ended in a draw"),
            },
        }
        println!("Turns played: {}", result.turns_played);

        println!("\n=== Final State ===");
        for player in state.players.iter() {
            println!(
                "  {}: {} life, {} units fielded",
                player.name,
                player.life,
                player.battlefield.len()
            );
        }
    }

    Ok(())
}

fn list_cards(
    cards_path: PathBuf,
    traits_path: Option<PathBuf>,
    lore_path: Option<PathBuf>,
    include_templates: bool,
) -> Result<()> {
    let catalog = CardCatalog::load_from_file(&cards_path)
        .with_context(|| format!("loading card catalog {}", cards_path.display()))?;
    if catalog.is_empty() {
        bail!("card catalog {} is empty", cards_path.display());
    }

    let trait_table = match traits_path {
        Some(path) => TraitTable::load_from_file(&path)
            .with_context(|| format!("loading trait table {}", path.display()))?,
        None => TraitTable::default(),
    };
    let lore = match lore_path {
        Some(path) => LoreData::load_from_file(&path)
            .with_context(|| format!("loading lore tables {}", path.display()))?,
        None => LoreData::default(),
    };

    for def in catalog.iter() {
        if def.is_template && !include_templates {
            continue;
        }

        print!("[{}] {} - {:?}, cost {}", def.id, def.name, def.kind, def.cost);
        if def.max_health > 0 {
            print!(", {}/{}", def.attack, def.max_health);
        }
        println!();

        if !def.rarity.is_empty() {
            let faction = lore
                .factions
                .get(&def.faction)
                .map(|f| f.name.as_str())
                .unwrap_or(def.faction.as_str());
            println!("    {} | {}", def.rarity, faction);
        }
        for t in &def.traits {
            let tag = t.tag();
            match trait_table.get(&tag) {
                Some(info) => println!("    {}: {}", info.name, info.description),
                None => println!("    {}", tag),
            }
        }
        if !def.description.is_empty() {
            println!("    \"{}\"", def.description);
        }
    }

    Ok(())
}
