//! Combined `<position id>:<match id>` identifier for a whole game

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{decode_match, decode_position, encode_match, encode_position};
use crate::error::{Error, Result};
use crate::match_state::MatchState;
use crate::movegen::Dice;
use crate::position::Position;

/// A board and the match it belongs to
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId {
    pub position: Position,
    pub match_state: MatchState,
}

impl GameId {
    pub fn new(position: Position, match_state: MatchState) -> Self {
        Self {
            position,
            match_state,
        }
    }

    /// Dice rolled in the match, if any
    pub fn dice(&self) -> Option<Dice> {
        self.match_state.dice_roll()
    }

    /// Hand the board and the dice to the other player
    pub fn end_turn(&self) -> Self {
        Self {
            position: self.position.swap_players(),
            match_state: self.match_state.swap_players(),
        }
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new(Position::starting(), MatchState::default())
    }
}

impl FromStr for GameId {
    type Err = Error;

    /// Accepts `position:match` or a bare position ID (default match state)
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (position_id, match_id) = match s.split_once(':') {
            Some((position_id, match_id)) => (position_id, Some(match_id)),
            None => (s, None),
        };

        let position = decode_position(position_id)?;
        let match_state = match match_id {
            Some(id) => decode_match(id)?,
            None => MatchState::default(),
        };

        Ok(Self::new(position, match_state))
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            encode_position(&self.position),
            encode_match(&self.match_state)
        )
    }
}
