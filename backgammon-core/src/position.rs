//! Board position from the perspective of the player on roll

use serde::{Deserialize, Serialize};

use crate::board::{entry_index, is_home, mirror, Destination, Source, BAR_PIPS, CHECKERS, HOME_POINTS, POINTS};
use crate::error::{Error, Result};

/// Opening layout, index 0 = the player's 1-point
const STARTING_POINTS: [i8; POINTS] = [
    -2, 0, 0, 0, 0, 5, 0, 3, 0, 0, 0, -5, 5, 0, 0, 0, -3, 0, -5, 0, 0, 0, 0, 2,
];

/// Immutable snapshot of checker placement.
///
/// Positive point values are checkers of the player on roll, negative values
/// the opponent's. Both sides always account for exactly 15 checkers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    points: [i8; POINTS],
    player_bar: u8,
    player_off: u8,
    opponent_bar: u8,
    opponent_off: u8,
}

/// Serialized form, checked by `Position::new` on the way in
#[derive(Deserialize)]
struct RawPosition {
    points: [i8; POINTS],
    player_bar: u8,
    player_off: u8,
    opponent_bar: u8,
    opponent_off: u8,
}

impl TryFrom<RawPosition> for Position {
    type Error = Error;

    fn try_from(raw: RawPosition) -> Result<Self> {
        Position::new(
            raw.points,
            raw.player_bar,
            raw.player_off,
            raw.opponent_bar,
            raw.opponent_off,
        )
    }
}

impl Position {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Build a position, refusing anything that breaks checker conservation
    pub fn new(
        points: [i8; POINTS],
        player_bar: u8,
        player_off: u8,
        opponent_bar: u8,
        opponent_off: u8,
    ) -> Result<Self> {
        let position = Self {
            points,
            player_bar,
            player_off,
            opponent_bar,
            opponent_off,
        };
        position.validate()?;
        Ok(position)
    }

    /// Standard opening position
    pub fn starting() -> Self {
        Self {
            points: STARTING_POINTS,
            player_bar: 0,
            player_off: 0,
            opponent_bar: 0,
            opponent_off: 0,
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some((index, count)) = self
            .points
            .iter()
            .enumerate()
            .find(|(_, count)| count.unsigned_abs() > CHECKERS)
        {
            return Err(Error::InvalidPosition(format!(
                "point {} holds {} checkers",
                index + 1,
                count.unsigned_abs()
            )));
        }

        let player = self.player_checkers();
        if player != CHECKERS as u32 {
            return Err(Error::InvalidPosition(format!(
                "player has {} checkers, expected {}",
                player, CHECKERS
            )));
        }

        let opponent = self.opponent_checkers();
        if opponent != CHECKERS as u32 {
            return Err(Error::InvalidPosition(format!(
                "opponent has {} checkers, expected {}",
                opponent, CHECKERS
            )));
        }

        Ok(())
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// 14-character position ID
    pub fn id(&self) -> String {
        crate::codec::encode_position(self)
    }

    pub fn points(&self) -> &[i8; POINTS] {
        &self.points
    }

    /// Signed checker count at point index `index`
    pub fn point(&self, index: usize) -> i8 {
        self.points[index]
    }

    pub fn player_bar(&self) -> u8 {
        self.player_bar
    }

    pub fn player_off(&self) -> u8 {
        self.player_off
    }

    pub fn opponent_bar(&self) -> u8 {
        self.opponent_bar
    }

    pub fn opponent_off(&self) -> u8 {
        self.opponent_off
    }

    /// All checkers the player owns, wherever they are
    pub fn player_checkers(&self) -> u32 {
        let on_board: u32 = self.points.iter().filter(|&&c| c > 0).map(|&c| c as u32).sum();
        on_board + self.player_bar as u32 + self.player_off as u32
    }

    /// All checkers the opponent owns, wherever they are
    pub fn opponent_checkers(&self) -> u32 {
        let on_board: u32 = self
            .points
            .iter()
            .filter(|&&c| c < 0)
            .map(|&c| c.unsigned_abs() as u32)
            .sum();
        on_board + self.opponent_bar as u32 + self.opponent_off as u32
    }

    /// Player checkers on the six home points, 1-point first
    pub fn player_home(&self) -> [u8; HOME_POINTS] {
        let mut home = [0u8; HOME_POINTS];
        for (slot, &count) in home.iter_mut().zip(&self.points[..HOME_POINTS]) {
            *slot = count.max(0) as u8;
        }
        home
    }

    /// True when every player checker is home or already borne off
    pub fn can_bear_off(&self) -> bool {
        self.player_bar == 0
            && self
                .points
                .iter()
                .enumerate()
                .all(|(index, &count)| count <= 0 || is_home(index))
    }

    /// Pips each side needs to bear everything off: (player, opponent)
    pub fn pip_count(&self) -> (u32, u32) {
        let mut player = self.player_bar as u32 * BAR_PIPS;
        let mut opponent = self.opponent_bar as u32 * BAR_PIPS;
        for (index, &count) in self.points.iter().enumerate() {
            if count > 0 {
                player += count as u32 * (index as u32 + 1);
            } else if count < 0 {
                opponent += count.unsigned_abs() as u32 * (POINTS - index) as u32;
            }
        }
        (player, opponent)
    }

    /// Whether the point at `index` holds two or more opponent checkers
    pub fn is_blocked(&self, index: usize) -> bool {
        self.points[index] <= -2
    }

    // ========================================================================
    // TRANSFORMATIONS
    // ========================================================================

    /// The same board seen by the opponent
    pub fn swap_players(&self) -> Self {
        let mut points = [0i8; POINTS];
        for (index, slot) in points.iter_mut().enumerate() {
            *slot = -self.points[mirror(index)];
        }
        Self {
            points,
            player_bar: self.opponent_bar,
            player_off: self.opponent_off,
            opponent_bar: self.player_bar,
            opponent_off: self.player_off,
        }
    }

    /// Move one player checker from `source` to `destination`, hitting a blot.
    ///
    /// Dice are not consulted; use the move generator to decide whether a
    /// sequence of such moves is a legal play.
    pub fn apply_move(&self, source: Source, destination: Destination) -> Result<Self> {
        match source {
            Source::Bar => {
                if self.player_bar == 0 {
                    return Err(Error::IllegalMove("no checker on the bar".to_string()));
                }
                match destination {
                    Destination::Point(to) if (to as usize) < POINTS && (to as usize) >= entry_index(6) => {}
                    _ => {
                        return Err(Error::IllegalMove(format!(
                            "cannot enter from the bar to {}",
                            destination
                        )))
                    }
                }
            }
            Source::Point(from) => {
                let from = from as usize;
                if from >= POINTS || self.points[from] <= 0 {
                    return Err(Error::IllegalMove(format!("no checker on {}", source)));
                }
                if self.player_bar > 0 {
                    return Err(Error::IllegalMove(
                        "checkers on the bar must enter first".to_string(),
                    ));
                }
                if let Destination::Point(to) = destination {
                    if to as usize >= from {
                        return Err(Error::IllegalMove(format!(
                            "{}/{} moves backwards",
                            source, destination
                        )));
                    }
                }
            }
        }

        if let Destination::Point(to) = destination {
            if self.is_blocked(to as usize) {
                return Err(Error::IllegalMove(format!("{} is blocked", destination)));
            }
        }

        Ok(self.relocate(source, destination))
    }

    /// Unchecked relocation; callers guarantee the move is possible
    pub(crate) fn relocate(&self, source: Source, destination: Destination) -> Self {
        let mut next = *self;

        match source {
            Source::Bar => next.player_bar -= 1,
            Source::Point(from) => next.points[from as usize] -= 1,
        }

        match destination {
            Destination::Off => next.player_off += 1,
            Destination::Point(to) => {
                let to = to as usize;
                if next.points[to] == -1 {
                    next.points[to] = 0;
                    next.opponent_bar += 1;
                }
                next.points[to] += 1;
            }
        }

        next
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

// ============================================================================
// TESTS
// ============================================================================
