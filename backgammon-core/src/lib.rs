//! Backgammon Core - positions, identifiers and legal plays
//!
//! This crate provides the rules layer of a backgammon program:
//! - Board geometry and the Position value type
//! - Match state (cube, score, dice, turn)
//! - Position ID / match ID codecs compatible with GNU Backgammon
//! - Legal play generation for a dice roll
//!
//! Everything here is a pure function over immutable values. Evaluation,
//! cube decisions and turn management live elsewhere.

pub mod board;
pub mod codec;
pub mod error;
pub mod match_state;
pub mod movegen;
pub mod position;

// Re-exports for convenient access
pub use board::{Destination, Source, CHECKERS, POINTS};
pub use codec::{
    decode_match, decode_match_with, decode_position, encode_match, encode_position, GameId,
    MATCH_ID_LEN, POSITION_ID_LEN,
};
pub use error::{Error, Result};
pub use match_state::{CubeOwner, CubeSide, GameState, MatchBuilder, MatchLimits, MatchState, Player, Resign};
pub use movegen::{generate, generate_many, validate_play, Dice, Move, Play};
pub use position::Position;
