//! Position ID: 80-bit unary checker key rendered as 14 base64 characters
//!
//! The key holds 50 slots: the opponent's points 1..24 and bar (in the
//! opponent's own numbering), then the same 25 slots for the player on roll.
//! Each slot is a run of one-bits, one per checker, closed by a zero-bit.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;

use super::bits::{BitReader, BitWriter};
use crate::board::{mirror, CHECKERS, POINTS};
use crate::error::{Error, Result};
use crate::position::Position;

/// Characters in a position ID
pub const POSITION_ID_LEN: usize = 14;

const KEY_BYTES: usize = 10;
const SLOTS_PER_SIDE: usize = POINTS + 1;
const SLOTS: usize = 2 * SLOTS_PER_SIDE;

/// Checker counts in key order
fn slot_counts(position: &Position) -> [u8; SLOTS] {
    let mut slots = [0u8; SLOTS];

    for (slot, count) in slots[..POINTS].iter_mut().enumerate() {
        *count = (-position.point(mirror(slot))).max(0) as u8;
    }
    slots[POINTS] = position.opponent_bar();

    for (index, count) in slots[SLOTS_PER_SIDE..SLOTS_PER_SIDE + POINTS].iter_mut().enumerate() {
        *count = position.point(index).max(0) as u8;
    }
    slots[SLOTS - 1] = position.player_bar();

    slots
}

/// Encode a position as its 14-character ID
pub fn encode_position(position: &Position) -> String {
    let mut writer = BitWriter::<KEY_BYTES>::new();
    // A run of `count` ones closed by a zero; 30 checkers and 50 terminators
    // fill the key exactly
    let complete = slot_counts(position)
        .into_iter()
        .all(|count| writer.push_bits((1 << count) - 1, count as u32 + 1));
    debug_assert!(complete, "position key overflow");
    STANDARD_NO_PAD.encode(writer.into_bytes())
}

/// Decode a 14-character position ID
pub fn decode_position(id: &str) -> Result<Position> {
    if id.len() != POSITION_ID_LEN {
        return Err(Error::malformed(
            id,
            format!("expected {} characters, found {}", POSITION_ID_LEN, id.len()),
        ));
    }

    let bytes = STANDARD_NO_PAD
        .decode(id)
        .map_err(|e| Error::malformed(id, e.to_string()))?;
    let mut reader = BitReader::new(&bytes);

    let mut slots = [0u8; SLOTS];
    for (slot, count) in slots.iter_mut().enumerate() {
        loop {
            match reader.read_bit() {
                Some(true) => {
                    *count += 1;
                    if *count > CHECKERS {
                        return Err(Error::malformed(
                            id,
                            format!("slot {} holds more than {} checkers", slot, CHECKERS),
                        ));
                    }
                }
                Some(false) => break,
                None => return Err(Error::malformed(id, "unterminated checker run")),
            }
        }
    }

    while let Some(bit) = reader.read_bit() {
        if bit {
            return Err(Error::malformed(id, "non-zero bits after the last slot"));
        }
    }

    let (opponent, player) = slots.split_at(SLOTS_PER_SIDE);
    let opponent_total: u32 = opponent.iter().map(|&c| c as u32).sum();
    let player_total: u32 = player.iter().map(|&c| c as u32).sum();
    if opponent_total > CHECKERS as u32 || player_total > CHECKERS as u32 {
        return Err(Error::malformed(
            id,
            format!(
                "{} player and {} opponent checkers, at most {} each",
                player_total, opponent_total, CHECKERS
            ),
        ));
    }

    let mut points = [0i8; POINTS];
    for (index, point) in points.iter_mut().enumerate() {
        let mine = player[index];
        let theirs = opponent[mirror(index)];
        if mine > 0 && theirs > 0 {
            return Err(Error::InvalidPosition(format!(
                "both sides occupy point {}",
                index + 1
            )));
        }
        *point = mine as i8 - theirs as i8;
    }

    Position::new(
        points,
        player[POINTS],
        CHECKERS - player_total as u8,
        opponent[POINTS],
        CHECKERS - opponent_total as u8,
    )
}
