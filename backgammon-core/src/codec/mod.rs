//! Position and match identifiers
//!
//! Both identifiers are fixed-width bit layouts packed low bit first and
//! rendered as unpadded standard base64. They are compatible with the IDs
//! GNU Backgammon prints.

mod bits;
mod game_id;
mod match_id;
mod position_id;

pub use game_id::GameId;
pub use match_id::{decode_match, decode_match_with, encode_match, MATCH_ID_LEN};
pub use position_id::{decode_position, encode_position, POSITION_ID_LEN};
