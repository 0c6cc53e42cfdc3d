//! Decode command - show the board and match behind an identifier
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: parse_game(), report()
//! - Level 4: board drawing and formatting

use anyhow::{Context, Result};
use clap::Args;

use backgammon_core::{CubeOwner, GameId, MatchState, Player, Position, POINTS};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct DecodeArgs {
    /// Position ID, or `position:match` game ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: DecodeArgs) -> Result<()> {
    let game = parse_game(&args.id)?;

    tracing::info!("Decoded {}", game);

    report(&game, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn parse_game(id: &str) -> Result<GameId> {
    id.parse::<GameId>()
        .with_context(|| format!("Failed to decode identifier: {}", id))
}

fn report(game: &GameId, json: bool) -> Result<()> {
    if json {
        let output = serde_json::to_string_pretty(game)?;
        println!("{}", output);
    } else {
        print!("{}", draw_position(&game.position));
        print!("{}", describe_match(&game.match_state));
        println!("Game ID: {}", game);
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Text board, point 24 down to point 1 for the player on roll
fn draw_position(position: &Position) -> String {
    let mut out = String::new();
    let (player_pips, opponent_pips) = position.pip_count();

    out.push_str("Point  Checkers\n");
    for index in (0..POINTS).rev() {
        let count = position.point(index);
        let cell = match count {
            0 => String::new(),
            c if c > 0 => format!("{} X", c),
            c => format!("{} O", c.unsigned_abs()),
        };
        out.push_str(&format!("{:>5}  {}\n", index + 1, cell));
    }
    out.push_str(&format!(
        "Bar:   X {}  O {}\n",
        position.player_bar(),
        position.opponent_bar()
    ));
    out.push_str(&format!(
        "Off:   X {}  O {}\n",
        position.player_off(),
        position.opponent_off()
    ));
    out.push_str(&format!("Pips:  X {}  O {}\n", player_pips, opponent_pips));
    out
}

fn describe_match(state: &MatchState) -> String {
    let owner = match state.cube_owner() {
        CubeOwner::Centered => "centered".to_string(),
        CubeOwner::Owned(player) => format!("{:?}", player),
    };
    let length = if state.length() == 0 {
        "money game".to_string()
    } else {
        format!("{}-point match", state.length())
    };
    let dice = match state.dice_roll() {
        Some(dice) => dice.to_string(),
        None => "not rolled".to_string(),
    };

    let mut out = String::new();
    out.push_str(&format!("Match:  {} ({:?})\n", length, state.game_state()));
    out.push_str(&format!(
        "Score:  Zero {} - One {}{}\n",
        state.score(Player::Zero),
        state.score(Player::One),
        if state.crawford() { " (Crawford)" } else { "" }
    ));
    out.push_str(&format!("Cube:   {} ({})\n", state.cube_value(), owner));
    out.push_str(&format!(
        "On roll: {:?}, to act: {:?}, dice {}\n",
        state.player(),
        state.turn(),
        dice
    ));
    out
}

// ============================================================================
// TESTS
// ============================================================================
