//! Error types shared by the codec, board model and move generator

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong when decoding identifiers or building values.
///
/// An unplayable roll is not an error: the generator returns an empty list.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("malformed identifier {id:?}: {reason}")]
    MalformedIdentifier { id: String, reason: String },

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("invalid dice roll: {0}-{1}")]
    InvalidDiceRoll(u8, u8),

    #[error("invalid match state: {0}")]
    InvalidMatchState(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("illegal play: {0}")]
    IllegalPlay(String),
}

impl Error {
    pub(crate) fn malformed(id: &str, reason: impl Into<String>) -> Self {
        Error::MalformedIdentifier {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
