//! Match state: cube, score, dice and whose turn it is
//!
//! Plain data with validation on construction. Players are absolute
//! (`Zero` / `One`), matching how the match ID stores them.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::movegen::Dice;

/// Largest cube the match ID can carry (4-bit logarithm)
pub const MAX_ENCODABLE_CUBE: u32 = 1 << 15;

/// Largest match length or score the match ID can carry (15 bits)
pub const MAX_SCORE: u16 = (1 << 15) - 1;

/// Player identity as stored in the match ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Zero = 0,
    One = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Zero => Player::One,
            Player::One => Player::Zero,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Who holds the doubling cube
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CubeOwner {
    Centered,
    Owned(Player),
}

/// Cube ownership relative to the player on roll
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CubeSide {
    Centered,
    OnRoll,
    Opponent,
}

/// Lifecycle of the current game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    NotStarted = 0,
    Playing = 1,
    GameOver = 2,
    Resigned = 3,
    DroppedCube = 4,
}

impl GameState {
    pub(crate) fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(GameState::NotStarted),
            1 => Some(GameState::Playing),
            2 => Some(GameState::GameOver),
            3 => Some(GameState::Resigned),
            4 => Some(GameState::DroppedCube),
            _ => None,
        }
    }

    /// The game has ended one way or another
    pub fn is_over(self) -> bool {
        matches!(self, GameState::GameOver | GameState::Resigned | GameState::DroppedCube)
    }
}

/// Resignation on offer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resign {
    None = 0,
    Single = 1,
    Gammon = 2,
    Backgammon = 3,
}

impl Resign {
    pub(crate) fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            1 => Resign::Single,
            2 => Resign::Gammon,
            3 => Resign::Backgammon,
            _ => Resign::None,
        }
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Limits applied when building or decoding a match state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchLimits {
    /// Highest cube value accepted
    pub max_cube: u32,
}

impl Default for MatchLimits {
    fn default() -> Self {
        Self { max_cube: 1024 }
    }
}

impl MatchLimits {
    /// Accept every cube value the match ID can represent
    pub fn unrestricted() -> Self {
        Self {
            max_cube: MAX_ENCODABLE_CUBE,
        }
    }

    /// Set the highest accepted cube value
    pub fn with_max_cube(mut self, max_cube: u32) -> Self {
        self.max_cube = max_cube;
        self
    }
}

// ============================================================================
// MATCH STATE
// ============================================================================

/// Everything about a match except the board
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMatchState")]
pub struct MatchState {
    cube_value: u32,
    cube_owner: CubeOwner,
    player: Player,
    crawford: bool,
    game_state: GameState,
    turn: Player,
    doubled: bool,
    resign: Resign,
    dice: (u8, u8),
    length: u16,
    score: [u16; 2],
}

/// Serialized form; accepted if the match ID can carry it
#[derive(Deserialize)]
struct RawMatchState {
    cube_value: u32,
    cube_owner: CubeOwner,
    player: Player,
    crawford: bool,
    game_state: GameState,
    turn: Player,
    doubled: bool,
    resign: Resign,
    dice: (u8, u8),
    length: u16,
    score: [u16; 2],
}

impl TryFrom<RawMatchState> for MatchState {
    type Error = Error;

    fn try_from(raw: RawMatchState) -> Result<Self> {
        let state = MatchState {
            cube_value: raw.cube_value,
            cube_owner: raw.cube_owner,
            player: raw.player,
            crawford: raw.crawford,
            game_state: raw.game_state,
            turn: raw.turn,
            doubled: raw.doubled,
            resign: raw.resign,
            dice: raw.dice,
            length: raw.length,
            score: raw.score,
        };
        state.validate(&MatchLimits::unrestricted())?;
        Ok(state)
    }
}

impl Default for MatchState {
    /// Start of a money game: cube 1 in the middle, nothing rolled
    fn default() -> Self {
        Self {
            cube_value: 1,
            cube_owner: CubeOwner::Centered,
            player: Player::One,
            crawford: false,
            game_state: GameState::NotStarted,
            turn: Player::One,
            doubled: false,
            resign: Resign::None,
            dice: (0, 0),
            length: 0,
            score: [0, 0],
        }
    }
}

impl MatchState {
    pub fn builder() -> MatchBuilder {
        MatchBuilder::default()
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// 12-character match ID
    pub fn id(&self) -> String {
        crate::codec::encode_match(self)
    }

    pub fn cube_value(&self) -> u32 {
        self.cube_value
    }

    pub fn cube_owner(&self) -> CubeOwner {
        self.cube_owner
    }

    /// Cube ownership seen from the player on roll
    pub fn cube_side(&self) -> CubeSide {
        match self.cube_owner {
            CubeOwner::Centered => CubeSide::Centered,
            CubeOwner::Owned(owner) if owner == self.player => CubeSide::OnRoll,
            CubeOwner::Owned(_) => CubeSide::Opponent,
        }
    }

    /// The player holding the dice
    pub fn player(&self) -> Player {
        self.player
    }

    pub fn crawford(&self) -> bool {
        self.crawford
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    /// The player who has to act next (differs from `player` while a double
    /// or resignation is pending)
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn doubled(&self) -> bool {
        self.doubled
    }

    pub fn resign(&self) -> Resign {
        self.resign
    }

    /// Raw dice, `(0, 0)` when not rolled
    pub fn dice(&self) -> (u8, u8) {
        self.dice
    }

    /// The rolled dice, if any
    pub fn dice_roll(&self) -> Option<Dice> {
        Dice::new(self.dice.0, self.dice.1).ok()
    }

    /// Match length in points, 0 for a money game
    pub fn length(&self) -> u16 {
        self.length
    }

    pub fn score(&self, player: Player) -> u16 {
        self.score[player.index()]
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    /// Hand dice and turn to the other player, clearing the roll
    pub fn swap_players(&self) -> Self {
        Self {
            player: self.player.opponent(),
            turn: self.turn.opponent(),
            dice: (0, 0),
            ..self.clone()
        }
    }

    /// Clear the dice without changing players
    pub fn reset_dice(&self) -> Self {
        Self {
            dice: (0, 0),
            ..self.clone()
        }
    }

    pub(crate) fn validate(&self, limits: &MatchLimits) -> Result<()> {
        if !self.cube_value.is_power_of_two() {
            return Err(Error::InvalidMatchState(format!(
                "cube value {} is not a power of two",
                self.cube_value
            )));
        }
        if self.cube_value > limits.max_cube.min(MAX_ENCODABLE_CUBE) {
            return Err(Error::InvalidMatchState(format!(
                "cube value {} exceeds {}",
                self.cube_value, limits.max_cube
            )));
        }

        let (d1, d2) = self.dice;
        if d1 > 6 || d2 > 6 {
            return Err(Error::InvalidMatchState(format!("die value out of range: {}-{}", d1, d2)));
        }
        if (d1 == 0) != (d2 == 0) {
            return Err(Error::InvalidMatchState(format!("only one die rolled: {}-{}", d1, d2)));
        }

        if self.length > MAX_SCORE || self.score.iter().any(|&s| s > MAX_SCORE) {
            return Err(Error::InvalidMatchState("length or score exceeds 15 bits".to_string()));
        }
        if self.length > 0 && !self.game_state.is_over() {
            if let Some(&score) = self.score.iter().find(|&&s| s >= self.length) {
                return Err(Error::InvalidMatchState(format!(
                    "score {} already reaches match length {}",
                    score, self.length
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Validating builder for [`MatchState`]
#[derive(Clone, Debug, Default)]
pub struct MatchBuilder {
    state: MatchState,
    limits: MatchLimits,
}

impl MatchBuilder {
    pub fn with_cube(mut self, value: u32, owner: CubeOwner) -> Self {
        self.state.cube_value = value;
        self.state.cube_owner = owner;
        self
    }

    /// Player on roll; also hands them the turn
    pub fn with_player(mut self, player: Player) -> Self {
        self.state.player = player;
        self.state.turn = player;
        self
    }

    pub fn with_turn(mut self, turn: Player) -> Self {
        self.state.turn = turn;
        self
    }

    pub fn with_crawford(mut self, crawford: bool) -> Self {
        self.state.crawford = crawford;
        self
    }

    pub fn with_game_state(mut self, game_state: GameState) -> Self {
        self.state.game_state = game_state;
        self
    }

    pub fn with_doubled(mut self, doubled: bool) -> Self {
        self.state.doubled = doubled;
        self
    }

    pub fn with_resign(mut self, resign: Resign) -> Self {
        self.state.resign = resign;
        self
    }

    pub fn with_dice(mut self, d1: u8, d2: u8) -> Self {
        self.state.dice = (d1, d2);
        self
    }

    pub fn with_length(mut self, length: u16) -> Self {
        self.state.length = length;
        self
    }

    pub fn with_score(mut self, zero: u16, one: u16) -> Self {
        self.state.score = [zero, one];
        self
    }

    pub fn with_limits(mut self, limits: MatchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn build(self) -> Result<MatchState> {
        self.state.validate(&self.limits)?;
        Ok(self.state)
    }
}
