//! Plays command - list every legal play of a roll
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_game(), choose_dice(), report_plays()
//! - Level 4: dice parsing, RNG, formatting

use anyhow::{bail, Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use backgammon_core::{decode_match, generate, Dice, GameId, Play};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlaysArgs {
    /// Position ID, or `position:match` game ID
    #[arg(long, value_name = "ID")]
    pub position: String,

    /// Dice to play, e.g. `3,2` or `3-2`
    #[arg(long, value_name = "A,B", conflicts_with = "roll")]
    pub dice: Option<String>,

    /// Match ID to take the dice from
    #[arg(long = "match", value_name = "ID")]
    pub match_id: Option<String>,

    /// Roll the dice (use --seed for a reproducible roll)
    #[arg(long)]
    pub roll: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run plays command
///
/// 1. Decode the position (and match)
/// 2. Decide which dice to play
/// 3. Generate and report the plays
pub fn run(args: PlaysArgs, seed: Option<u64>) -> Result<()> {
    let game = load_game(&args)?;
    let dice = choose_dice(&args, &game, seed)?;

    let plays = generate(&game.position, dice);

    tracing::info!("{} legal plays of {} from {}", plays.len(), dice, game.position.id());

    report_plays(&game, dice, &plays, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Decode `--position`, letting `--match` override any match part it carries
fn load_game(args: &PlaysArgs) -> Result<GameId> {
    let mut game = args
        .position
        .parse::<GameId>()
        .with_context(|| format!("Failed to decode position: {}", args.position))?;

    if let Some(match_id) = &args.match_id {
        game.match_state =
            decode_match(match_id).with_context(|| format!("Failed to decode match ID: {}", match_id))?;
    }

    Ok(game)
}

/// Dice from `--dice`, then `--roll`, then the match ID
fn choose_dice(args: &PlaysArgs, game: &GameId, seed: Option<u64>) -> Result<Dice> {
    if let Some(text) = &args.dice {
        return parse_dice(text);
    }
    if args.roll {
        let mut rng = create_rng(seed);
        let dice = Dice::roll(&mut rng);
        tracing::debug!("Rolled {}", dice);
        return Ok(dice);
    }
    match game.dice() {
        Some(dice) => Ok(dice),
        None => bail!("No dice: pass --dice, --roll, or a match ID with the dice rolled"),
    }
}

fn report_plays(game: &GameId, dice: Dice, plays: &[Play], json: bool) -> Result<()> {
    if json {
        print_json_plays(game, dice, plays)
    } else {
        print_text_plays(game, dice, plays);
        Ok(())
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Parse `A,B` or `A-B`
pub(crate) fn parse_dice(text: &str) -> Result<Dice> {
    let (a, b) = text
        .split_once([',', '-'])
        .with_context(|| format!("Dice must look like 3,2 (got {:?})", text))?;
    let a: u8 = a.trim().parse().with_context(|| format!("Bad die value: {:?}", a))?;
    let b: u8 = b.trim().parse().with_context(|| format!("Bad die value: {:?}", b))?;
    Ok(Dice::new(a, b)?)
}

/// Create RNG from seed or random
pub(crate) fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn print_json_plays(game: &GameId, dice: Dice, plays: &[Play]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonPlay {
        moves: String,
        position_id: String,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        position_id: String,
        dice: [u8; 2],
        play_count: usize,
        plays: Vec<JsonPlay>,
    }

    let (a, b) = dice.values();
    let output = JsonOutput {
        position_id: game.position.id(),
        dice: [a, b],
        play_count: plays.len(),
        plays: plays
            .iter()
            .map(|p| JsonPlay {
                moves: p.to_string(),
                position_id: p.position.id(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output)?;
    println!("{}", json);
    Ok(())
}

fn print_text_plays(game: &GameId, dice: Dice, plays: &[Play]) {
    println!("Position {} to play {}", game.position.id(), dice);

    if plays.is_empty() {
        println!("No legal play");
        return;
    }

    let width = plays.iter().map(|p| p.to_string().len()).max().unwrap_or(0);
    for (i, play) in plays.iter().enumerate() {
        println!(
            "{:>3}. {:<width$}  {}",
            i + 1,
            play.to_string(),
            play.position.id(),
            width = width
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
