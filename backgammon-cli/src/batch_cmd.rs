//! Batch command - generate plays for a file of game IDs
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_requests(), generate_all(), report_results()
//! - Level 3: parse_lines()
//! - Level 4: formatting utilities

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use rand_chacha::ChaCha8Rng;

use backgammon_core::{generate_many, Dice, GameId, Position};

use crate::plays_cmd::create_rng;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BatchArgs {
    /// File with one game ID per line (`#` starts a comment)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One line of the input file, ready to generate
#[derive(Clone, Debug)]
struct Request {
    line: usize,
    game: GameId,
    dice: Dice,
    rolled: bool,
}

/// Plays found for one request
#[derive(Clone, Debug)]
struct Outcome {
    request: Request,
    play_count: usize,
    dice_used: usize,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run batch command
///
/// 1. Read and decode every game ID
/// 2. Generate plays for all of them in parallel
/// 3. Report counts per line
pub fn run(args: BatchArgs, seed: Option<u64>) -> Result<()> {
    let requests = load_requests(&args, seed)?;

    tracing::info!("Generating plays for {} game IDs", requests.len());

    let start = Instant::now();
    let outcomes = generate_all(requests);
    tracing::info!("Finished in {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);

    report_results(&outcomes, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_requests(args: &BatchArgs, seed: Option<u64>) -> Result<Vec<Request>> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let mut rng = create_rng(seed);
    parse_lines(&content, &mut rng).with_context(|| format!("In {}", args.file.display()))
}

fn generate_all(requests: Vec<Request>) -> Vec<Outcome> {
    let jobs: Vec<(Position, Dice)> = requests.iter().map(|r| (r.game.position, r.dice)).collect();
    let results = generate_many(&jobs);

    requests
        .into_iter()
        .zip(results)
        .map(|(request, plays)| Outcome {
            request,
            play_count: plays.len(),
            dice_used: plays.first().map_or(0, |p| p.moves.len()),
        })
        .collect()
}

fn report_results(outcomes: &[Outcome], json: bool) -> Result<()> {
    if json {
        print_json_results(outcomes)
    } else {
        print_text_results(outcomes);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Decode each non-empty, non-comment line. Lines whose match ID has no dice
/// rolled get a roll from `rng`.
fn parse_lines(content: &str, rng: &mut ChaCha8Rng) -> Result<Vec<Request>> {
    let mut requests = Vec::new();

    for (i, raw) in content.lines().enumerate() {
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        let game: GameId = text
            .parse()
            .with_context(|| format!("line {}: cannot decode {:?}", i + 1, text))?;

        let (dice, rolled) = match game.dice() {
            Some(dice) => (dice, false),
            None => (Dice::roll(rng), true),
        };

        requests.push(Request {
            line: i + 1,
            game,
            dice,
            rolled,
        });
    }

    Ok(requests)
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_json_results(outcomes: &[Outcome]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonLine {
        line: usize,
        game_id: String,
        dice: [u8; 2],
        rolled: bool,
        play_count: usize,
        dice_used: usize,
    }

    let output: Vec<JsonLine> = outcomes
        .iter()
        .map(|o| {
            let (a, b) = o.request.dice.values();
            JsonLine {
                line: o.request.line,
                game_id: o.request.game.to_string(),
                dice: [a, b],
                rolled: o.request.rolled,
                play_count: o.play_count,
                dice_used: o.dice_used,
            }
        })
        .collect();

    let json = serde_json::to_string_pretty(&output)?;
    println!("{}", json);
    Ok(())
}

fn print_text_results(outcomes: &[Outcome]) {
    println!("| Line | Game ID | Dice | Plays | Dice used |");
    println!("|------|---------|------|-------|-----------|");
    for o in outcomes {
        println!(
            "| {} | {} | {}{} | {} | {} |",
            o.request.line,
            o.request.game,
            o.request.dice,
            if o.request.rolled { " (rolled)" } else { "" },
            o.play_count,
            o.dice_used
        );
    }

    let total: usize = outcomes.iter().map(|o| o.play_count).sum();
    println!("\n{} positions, {} plays", outcomes.len(), total);
}

// ============================================================================
// TESTS
// ============================================================================
