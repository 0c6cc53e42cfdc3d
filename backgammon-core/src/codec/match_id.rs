//! Match ID: 72-bit field layout rendered as 12 base64 characters
//!
//! | bits  | field                                   |
//! |-------|-----------------------------------------|
//! | 0-3   | log2 of the cube value                  |
//! | 4-5   | cube owner (0, 1, or 3 for centered)    |
//! | 6     | player on roll                          |
//! | 7     | crawford game                           |
//! | 8-10  | game state                              |
//! | 11    | turn                                    |
//! | 12    | double offered                          |
//! | 13-14 | resignation offered                     |
//! | 15-20 | dice                                    |
//! | 21-35 | match length                            |
//! | 36-65 | score of player 0, then player 1        |
//!
//! The remaining six bits are written as zero and ignored when reading.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;

use super::bits::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::match_state::{CubeOwner, GameState, MatchLimits, MatchState, Player, Resign};

/// Characters in a match ID
pub const MATCH_ID_LEN: usize = 12;

const KEY_BYTES: usize = 9;
const CENTERED: u32 = 0b11;

fn player_bit(player: Player) -> u32 {
    player as u32
}

fn player_from_bit(bit: u32) -> Player {
    if bit == 0 {
        Player::Zero
    } else {
        Player::One
    }
}

/// Encode a match state as its 12-character ID
pub fn encode_match(state: &MatchState) -> String {
    let (d1, d2) = state.dice();
    let cube_owner = match state.cube_owner() {
        CubeOwner::Centered => CENTERED,
        CubeOwner::Owned(player) => player_bit(player),
    };
    let fields = [
        (state.cube_value().trailing_zeros(), 4),
        (cube_owner, 2),
        (player_bit(state.player()), 1),
        (state.crawford() as u32, 1),
        (state.game_state() as u32, 3),
        (player_bit(state.turn()), 1),
        (state.doubled() as u32, 1),
        (state.resign() as u32, 2),
        (d1 as u32, 3),
        (d2 as u32, 3),
        (state.length() as u32, 15),
        (state.score(Player::Zero) as u32, 15),
        (state.score(Player::One) as u32, 15),
    ];

    let mut writer = BitWriter::<KEY_BYTES>::new();
    for (value, width) in fields {
        // Construction keeps every field inside its width
        debug_assert!(value >> width == 0, "match field {} wider than {} bits", value, width);
        let written = writer.push_bits(value, width);
        debug_assert!(written, "match key overflow");
    }

    STANDARD_NO_PAD.encode(writer.into_bytes())
}

/// Decode a 12-character match ID with the default limits
pub fn decode_match(id: &str) -> Result<MatchState> {
    decode_match_with(id, &MatchLimits::default())
}

/// Decode a 12-character match ID, checking the cube against `limits`
pub fn decode_match_with(id: &str, limits: &MatchLimits) -> Result<MatchState> {
    if id.len() != MATCH_ID_LEN {
        return Err(Error::malformed(
            id,
            format!("expected {} characters, found {}", MATCH_ID_LEN, id.len()),
        ));
    }

    let bytes = STANDARD_NO_PAD
        .decode(id)
        .map_err(|e| Error::malformed(id, e.to_string()))?;
    let mut reader = BitReader::new(&bytes);
    let mut field = |width: u32| {
        reader
            .read_bits(width)
            .ok_or_else(|| Error::malformed(id, "identifier too short"))
    };

    let cube_log = field(4)?;
    let cube_owner = match field(2)? {
        CENTERED => CubeOwner::Centered,
        2 => return Err(Error::malformed(id, "cube owner 2 is undefined")),
        bit => CubeOwner::Owned(player_from_bit(bit)),
    };
    let player = player_from_bit(field(1)?);
    let crawford = field(1)? == 1;
    let game_state_bits = field(3)?;
    let game_state = GameState::from_bits(game_state_bits as u8)
        .ok_or_else(|| Error::malformed(id, format!("game state {} is undefined", game_state_bits)))?;
    let turn = player_from_bit(field(1)?);
    let doubled = field(1)? == 1;
    let resign = Resign::from_bits(field(2)? as u8);
    let d1 = field(3)? as u8;
    let d2 = field(3)? as u8;
    let length = field(15)? as u16;
    let score_zero = field(15)? as u16;
    let score_one = field(15)? as u16;

    MatchState::builder()
        .with_cube(1 << cube_log, cube_owner)
        .with_player(player)
        .with_turn(turn)
        .with_crawford(crawford)
        .with_game_state(game_state)
        .with_doubled(doubled)
        .with_resign(resign)
        .with_dice(d1, d2)
        .with_length(length)
        .with_score(score_zero, score_one)
        .with_limits(limits.clone())
        .build()
        .map_err(|e| match e {
            Error::InvalidMatchState(reason) => Error::malformed(id, reason),
            other => other,
        })
}
