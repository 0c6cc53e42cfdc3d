//! Board geometry: points, bar and bear-off tray
//!
//! Points are indexed from the point of view of the player on roll. Index `i`
//! is the player's point `i + 1`, so index 0 is next to the bear-off tray and
//! index 23 is the far end where checkers enter from the bar. The player moves
//! towards lower indices.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of points on the board
pub const POINTS: usize = 24;

/// Checkers per side
pub const CHECKERS: u8 = 15;

/// Points in a home board (indices 0..HOME_POINTS)
pub const HOME_POINTS: usize = 6;

/// Pip distance of a checker on the bar
pub const BAR_PIPS: u32 = 25;

/// Where a checker starts a move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Source {
    /// Point index 0..24
    Point(u8),
    Bar,
}

/// Where a checker ends a move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Destination {
    Off,
    /// Point index 0..24
    Point(u8),
}

/// Index a checker lands on when entering from the bar with `die`
pub fn entry_index(die: u8) -> usize {
    POINTS - die as usize
}

/// Whether `index` lies in the player's home board
pub fn is_home(index: usize) -> bool {
    index < HOME_POINTS
}

/// Index of the same point seen from the other side of the board
pub fn mirror(index: usize) -> usize {
    POINTS - 1 - index
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Point(index) => write!(f, "{}", index + 1),
            Source::Bar => write!(f, "bar"),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Off => write!(f, "off"),
            Destination::Point(index) => write!(f, "{}", index + 1),
        }
    }
}
