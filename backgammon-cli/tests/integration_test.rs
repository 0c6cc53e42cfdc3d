//! Integration tests for the backgammon identifiers and play generator
//!
//! Tests the full stack: codec, board model, move generator and match state

use backgammon_core::{
    decode_match, decode_position, encode_match, encode_position, generate, validate_play,
    CubeOwner, Destination, Dice, GameId, GameState, MatchState, Player, Position, Resign, Source,
    CHECKERS, POINTS,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn dice(a: u8, b: u8) -> Dice {
    Dice::new(a, b).unwrap()
}

/// Positions reached by random legal plays from the opening, with the roll
/// that will be played next
fn random_positions(count: usize, seed: u64) -> Vec<(Position, Dice)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut samples = Vec::with_capacity(count);
    let mut position = Position::starting();

    while samples.len() < count {
        let roll = Dice::roll(&mut rng);
        samples.push((position, roll));

        let plays = generate(&position, roll);
        let next = plays.choose(&mut rng).map_or(position, |p| p.position);
        position = if next.player_off() == CHECKERS {
            Position::starting()
        } else {
            next.swap_players()
        };
    }

    samples
}

fn dice_count(roll: Dice) -> usize {
    if roll.is_double() {
        4
    } else {
        2
    }
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn test_checker_conservation() {
    for (position, roll) in random_positions(400, 1) {
        for play in generate(&position, roll) {
            assert_eq!(play.position.player_checkers(), 15, "{} {}", position.id(), play);
            assert_eq!(play.position.opponent_checkers(), 15, "{} {}", position.id(), play);
        }
    }
}

#[test]
fn test_plays_replay_through_apply_move() {
    // apply_move refuses blocked points, so a successful replay also shows
    // no play lands on a point held by two or more opponent checkers
    for (position, roll) in random_positions(400, 2) {
        let (a, b) = roll.values();
        for play in generate(&position, roll) {
            let mut current = position;
            for mv in &play.moves {
                assert!(mv.pips == a || mv.pips == b);
                if let Destination::Point(to) = mv.destination {
                    assert!(!current.is_blocked(to as usize));
                }
                current = current.apply_move(mv.source, mv.destination).unwrap();
            }
            assert_eq!(current, play.position);
        }
    }
}

#[test]
fn test_plays_are_maximal() {
    for (position, roll) in random_positions(400, 3) {
        let plays = generate(&position, roll);
        let Some(longest) = plays.iter().map(|p| p.moves.len()).max() else {
            continue;
        };
        assert!(plays.iter().all(|p| p.moves.len() == longest));

        if longest < dice_count(roll) {
            // No die left over could still have been played
            let (a, b) = roll.values();
            for play in &plays {
                let used: Vec<u8> = play.moves.iter().map(|m| m.pips).collect();
                let unused: Vec<u8> = if roll.is_double() {
                    vec![a]
                } else {
                    [a, b].into_iter().filter(|d| !used.contains(d)).collect()
                };
                for d in unused {
                    assert!(
                        generate(&play.position, dice(d, d)).is_empty(),
                        "{} {} could continue with {}",
                        position.id(),
                        play,
                        d
                    );
                }
            }
        }
    }
}

#[test]
fn test_bar_priority() {
    let mut seen_bar = 0;
    for (position, roll) in random_positions(1500, 4) {
        if position.player_bar() == 0 {
            continue;
        }
        seen_bar += 1;
        for play in generate(&position, roll) {
            let entering = (position.player_bar() as usize).min(play.moves.len());
            assert!(play.moves[..entering].iter().all(|m| m.source == Source::Bar));
        }
    }
    assert!(seen_bar > 0);
}

#[test]
fn test_distinct_positions_and_validation() {
    for (position, roll) in random_positions(200, 5) {
        let plays = generate(&position, roll);
        for (i, play) in plays.iter().enumerate() {
            assert!(plays[i + 1..].iter().all(|other| other.position != play.position));

            let proposed: Vec<(Source, Destination)> =
                play.moves.iter().map(|m| (m.source, m.destination)).collect();
            let validated = validate_play(&position, roll, &proposed).unwrap();
            assert_eq!(validated, *play);
        }
        assert!(plays.windows(2).all(|w| w[0].moves < w[1].moves));
    }
}

#[test]
fn test_position_round_trip() {
    for (position, _) in random_positions(500, 6) {
        let id = encode_position(&position);
        assert_eq!(id.len(), 14);
        assert_eq!(decode_position(&id).unwrap(), position);
        assert_eq!(position.swap_players().swap_players(), position);
    }
}

#[test]
fn test_match_round_trip() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..500 {
        let length: u16 = rng.gen_range(0..=25);
        let cap = if length == 0 { 60 } else { length - 1 };
        let owner = match rng.gen_range(0..3) {
            0 => CubeOwner::Centered,
            1 => CubeOwner::Owned(Player::Zero),
            _ => CubeOwner::Owned(Player::One),
        };
        let rolled = rng.gen_bool(0.5);
        let (d1, d2) = if rolled {
            (rng.gen_range(1..=6), rng.gen_range(1..=6))
        } else {
            (0, 0)
        };

        let state = MatchState::builder()
            .with_cube(1u32 << rng.gen_range(0..=10u32), owner)
            .with_player(if rng.gen_bool(0.5) { Player::Zero } else { Player::One })
            .with_crawford(rng.gen_bool(0.2))
            .with_game_state(GameState::Playing)
            .with_doubled(rng.gen_bool(0.1))
            .with_resign(Resign::None)
            .with_dice(d1, d2)
            .with_length(length)
            .with_score(rng.gen_range(0..=cap), rng.gen_range(0..=cap))
            .build()
            .unwrap();

        let id = encode_match(&state);
        assert_eq!(id.len(), 12);
        assert_eq!(decode_match(&id).unwrap(), state);
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_scenario_opening_three_two() {
    let plays = generate(&Position::starting(), dice(3, 2));
    assert!(plays.len() > 1);
    for play in &plays {
        assert_eq!(play.moves.len(), 2);
        assert_eq!(play.position.player_checkers(), 15);
        assert_eq!(play.position.opponent_checkers(), 15);
    }
    // 13/10 13/11 is among them
    assert!(plays.iter().any(|p| p.to_string() == "13/10 13/11"));
}

#[test]
fn test_scenario_closed_entry() {
    let mut points = [0i8; POINTS];
    for index in 18..POINTS {
        points[index] = -2;
    }
    points[5] = 13;
    let position = Position::new(points, 2, 0, 0, 3).unwrap();

    assert!(generate(&position, dice(6, 6)).is_empty());
    let pass = validate_play(&position, dice(6, 6), &[]).unwrap();
    assert_eq!(pass.position, position);
}

#[test]
fn test_scenario_bear_off_fives() {
    // One checker on the 6-point, two on the 2-point: the 6-point checker
    // must move down before anything can bear off with a 5.
    let mut points = [0i8; POINTS];
    points[5] = 1;
    points[1] = 2;
    points[23] = -15;
    let position = Position::new(points, 0, 12, 0, 0).unwrap();

    let plays = generate(&position, dice(5, 5));
    assert_eq!(plays.len(), 1);
    assert_eq!(plays[0].to_string(), "6/1 2/off 2/off 1/off");
    assert_eq!(plays[0].position.player_off(), 15);
}

#[test]
fn test_scenario_bear_off_from_highest() {
    let mut points = [0i8; POINTS];
    points[3] = 4;
    points[1] = 3;
    points[23] = -15;
    let position = Position::new(points, 0, 8, 0, 0).unwrap();

    let plays = generate(&position, dice(5, 5));
    assert_eq!(plays.len(), 1);
    assert!(plays[0].moves.iter().all(|m| m.source == Source::Point(3)));
    assert_eq!(plays[0].position.player_off(), 12);
    assert_eq!(plays[0].position.point(1), 3);
}

#[test]
fn test_scenario_starting_position_id() {
    assert_eq!(encode_position(&Position::starting()), "4HPwATDgc/ABMA");
    assert_eq!(decode_position("4HPwATDgc/ABMA").unwrap(), Position::starting());
}

#[test]
fn test_game_id_full_turn() {
    let start = GameId::default();
    assert_eq!(start.to_string(), "4HPwATDgc/ABMA:cAgAAAAAAAAA");

    // Play an opening 3-1 and hand over the dice
    let roll = dice(3, 1);
    let play = validate_play(
        &start.position,
        roll,
        &[
            (Source::Point(7), Destination::Point(4)),
            (Source::Point(5), Destination::Point(4)),
        ],
    )
    .unwrap();
    let next = GameId::new(play.position, start.match_state.clone()).end_turn();

    assert_eq!(next.position.opponent_checkers(), 15);
    assert_eq!(next.position.point(mirror_index(4)), -2);
    assert_eq!(next.match_state.player(), Player::Zero);
    assert_eq!(next.to_string().parse::<GameId>().unwrap(), next);
}

fn mirror_index(index: usize) -> usize {
    POINTS - 1 - index
}
