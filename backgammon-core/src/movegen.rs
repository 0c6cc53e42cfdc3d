//! Dice, moves and legal play generation
//!
//! A play is every die of the roll applied in turn (four times for doubles).
//! The generator walks every order the dice can be used in, keeps only the
//! plays that use as many dice as possible (and the larger die when only one
//! of two can be played), and collapses plays that reach the same position.

use std::collections::hash_map::Entry;
use std::fmt;

use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{entry_index, Destination, Source, HOME_POINTS, POINTS};
use crate::error::{Error, Result};
use crate::position::Position;

// ============================================================================
// CORE TYPES
// ============================================================================

/// A roll of two dice
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDice")]
pub struct Dice {
    first: u8,
    second: u8,
}

#[derive(Deserialize)]
struct RawDice {
    first: u8,
    second: u8,
}

impl TryFrom<RawDice> for Dice {
    type Error = Error;

    fn try_from(raw: RawDice) -> Result<Self> {
        Dice::new(raw.first, raw.second)
    }
}

impl Dice {
    pub fn new(first: u8, second: u8) -> Result<Self> {
        if !(1..=6).contains(&first) || !(1..=6).contains(&second) {
            return Err(Error::InvalidDiceRoll(first, second));
        }
        Ok(Self { first, second })
    }

    /// Roll two dice
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            first: rng.gen_range(1..=6),
            second: rng.gen_range(1..=6),
        }
    }

    /// Roll for the first move of a game: doubles are rolled again
    pub fn opening<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let dice = Self::roll(rng);
            if !dice.is_double() {
                return dice;
            }
        }
    }

    pub fn values(&self) -> (u8, u8) {
        (self.first, self.second)
    }

    pub fn is_double(&self) -> bool {
        self.first == self.second
    }

    pub fn high(&self) -> u8 {
        self.first.max(self.second)
    }

    /// Die sequences to try: both orders, or four of a kind for doubles
    pub fn orders(&self) -> Vec<Vec<u8>> {
        if self.is_double() {
            vec![vec![self.first; 4]]
        } else {
            vec![vec![self.first, self.second], vec![self.second, self.first]]
        }
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

/// One checker moved by one die.
///
/// Field order gives the canonical ordering: source, then destination, then
/// pips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub source: Source,
    pub destination: Destination,
    pub pips: u8,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.source, self.destination)
    }
}

/// A complete legal use of a roll and the position it leads to
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Play {
    pub moves: Vec<Move>,
    pub position: Position,
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.moves.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", mv)?;
        }
        Ok(())
    }
}

// ============================================================================
// SINGLE DIE
// ============================================================================

/// Every way to use one die from `position`
fn single_die_moves(position: &Position, die: u8) -> Vec<(Move, Position)> {
    let mut moves = Vec::new();

    // Nothing else moves while a checker is on the bar
    if position.player_bar() > 0 {
        let to = entry_index(die);
        if !position.is_blocked(to) {
            let mv = Move {
                source: Source::Bar,
                destination: Destination::Point(to as u8),
                pips: die,
            };
            moves.push((mv, position.relocate(mv.source, mv.destination)));
        }
        return moves;
    }

    let bearing_off = position.can_bear_off();
    let die = die as usize;

    for from in 0..POINTS {
        if position.point(from) <= 0 {
            continue;
        }

        let destination = if from >= die {
            let to = from - die;
            if position.is_blocked(to) {
                continue;
            }
            Destination::Point(to as u8)
        } else {
            // Overshooting dice only bear off from the highest occupied point
            let exact = from + 1 == die;
            let highest = (from + 1..HOME_POINTS).all(|i| position.point(i) <= 0);
            if !bearing_off || !(exact || highest) {
                continue;
            }
            Destination::Off
        };

        let mv = Move {
            source: Source::Point(from as u8),
            destination,
            pips: die as u8,
        };
        moves.push((mv, position.relocate(mv.source, mv.destination)));
    }

    moves
}

// ============================================================================
// PLAY GENERATION
// ============================================================================

/// Depth-first walk over the remaining dice, recording every dead end
fn search(position: &Position, dice: &[u8], path: &mut Vec<Move>, leaves: &mut Vec<Play>) {
    if let Some((&die, rest)) = dice.split_first() {
        let options = single_die_moves(position, die);
        if !options.is_empty() {
            for (mv, next) in options {
                path.push(mv);
                search(&next, rest, path, leaves);
                path.pop();
            }
            return;
        }
    }

    if !path.is_empty() {
        leaves.push(Play {
            moves: path.clone(),
            position: *position,
        });
    }
}

/// All distinct legal plays of `dice` from `position`.
///
/// Each resulting position appears once, witnessed by its smallest move
/// sequence; plays are sorted by that sequence. An empty result means the
/// roll cannot be played.
pub fn generate(position: &Position, dice: Dice) -> Vec<Play> {
    let mut leaves = Vec::new();
    let mut path = Vec::with_capacity(4);
    for order in dice.orders() {
        search(position, &order, &mut path, &mut leaves);
    }

    let longest = leaves.iter().map(|p| p.moves.len()).max().unwrap_or(0);
    leaves.retain(|p| p.moves.len() == longest);

    // Either die alone but not both: the larger one must be played if it can
    if longest == 1 && !dice.is_double() && leaves.iter().any(|p| p.moves[0].pips == dice.high()) {
        leaves.retain(|p| p.moves[0].pips == dice.high());
    }

    let mut distinct: FxHashMap<Position, Vec<Move>> = FxHashMap::default();
    for play in leaves {
        match distinct.entry(play.position) {
            Entry::Occupied(mut best) => {
                if play.moves < *best.get() {
                    best.insert(play.moves);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(play.moves);
            }
        }
    }

    let mut plays: Vec<Play> = distinct
        .into_iter()
        .map(|(position, moves)| Play { moves, position })
        .collect();
    plays.sort_by(|a, b| a.moves.cmp(&b.moves));

    tracing::trace!(dice = %dice, plays = plays.len(), dice_used = longest, "generated plays");
    plays
}

/// Generate plays for many independent positions
#[cfg(feature = "parallel")]
pub fn generate_many(requests: &[(Position, Dice)]) -> Vec<Vec<Play>> {
    use rayon::prelude::*;

    requests
        .par_iter()
        .map(|(position, dice)| generate(position, *dice))
        .collect()
}

/// Generate plays for many independent positions
#[cfg(not(feature = "parallel"))]
pub fn generate_many(requests: &[(Position, Dice)]) -> Vec<Vec<Play>> {
    requests
        .iter()
        .map(|(position, dice)| generate(position, *dice))
        .collect()
}

/// Check a proposed sequence of checker moves against the legal plays.
///
/// The returned play carries the canonical move sequence for the resulting
/// position. An empty sequence is only legal when the roll cannot be played.
pub fn validate_play(
    position: &Position,
    dice: Dice,
    moves: &[(Source, Destination)],
) -> Result<Play> {
    let plays = generate(position, dice);

    if moves.is_empty() {
        return if plays.is_empty() {
            Ok(Play {
                moves: Vec::new(),
                position: *position,
            })
        } else {
            Err(Error::IllegalPlay(format!(
                "{} can be played in {} ways",
                dice,
                plays.len()
            )))
        };
    }

    let mut current = *position;
    for &(source, destination) in moves {
        current = current.apply_move(source, destination)?;
    }

    plays
        .into_iter()
        .find(|play| play.position == current)
        .ok_or_else(|| {
            let proposed: Vec<String> = moves.iter().map(|(s, d)| format!("{}/{}", s, d)).collect();
            Error::IllegalPlay(format!("{} is not a legal play of {}", proposed.join(" "), dice))
        })
}

// ============================================================================
// TESTS
// ============================================================================
