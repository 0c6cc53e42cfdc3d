//! Move generator throughput benchmark
//!
//! Measures:
//! 1. Plays per second from the opening position for every roll
//! 2. Throughput over positions sampled from random self-play
//! 3. Position ID encode/decode speed

use std::time::Instant;

use backgammon_core::{decode_position, encode_position, generate, generate_many, Dice, Position};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST POSITIONS
// ============================================================================

/// Positions reached by picking random legal plays from the opening
fn sampled_positions(count: usize, seed: u64) -> Vec<Position> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut positions = Vec::with_capacity(count);
    let mut position = Position::starting();

    while positions.len() < count {
        positions.push(position);
        let plays = generate(&position, Dice::roll(&mut rng));
        let next = match plays.choose(&mut rng) {
            Some(play) => play.position,
            None => position,
        };
        // Restart once someone has borne everything off
        position = if next.player_off() == 15 {
            Position::starting()
        } else {
            next.swap_players()
        };
    }

    positions
}

fn all_rolls() -> Vec<Dice> {
    let mut rolls = Vec::with_capacity(21);
    for a in 1..=6 {
        for b in a..=6 {
            if let Ok(dice) = Dice::new(a, b) {
                rolls.push(dice);
            }
        }
    }
    rolls
}

// ============================================================================
// BENCHMARKS
// ============================================================================

#[derive(Clone, Debug)]
struct BenchmarkResult {
    name: String,
    iterations: usize,
    total_time_ms: f64,
}

impl BenchmarkResult {
    fn to_table_row(&self) -> String {
        let per_second = self.iterations as f64 / (self.total_time_ms / 1000.0).max(1e-9);
        format!(
            "| {} | {} | {:.1}ms | {:.0}/s |",
            self.name, self.iterations, self.total_time_ms, per_second
        )
    }
}

fn bench_opening_rolls(repeats: usize) -> Vec<BenchmarkResult> {
    let start_pos = Position::starting();
    all_rolls()
        .into_iter()
        .map(|dice| {
            let start = Instant::now();
            let mut plays = 0;
            for _ in 0..repeats {
                plays = generate(&start_pos, dice).len();
            }
            BenchmarkResult {
                name: format!("opening {} ({} plays)", dice, plays),
                iterations: repeats,
                total_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            }
        })
        .collect()
}

fn bench_sampled(positions: &[Position], seed: u64) -> Vec<BenchmarkResult> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let requests: Vec<(Position, Dice)> = positions
        .iter()
        .map(|&pos| (pos, Dice::roll(&mut rng)))
        .collect();

    let start = Instant::now();
    let sequential: usize = requests.iter().map(|(pos, dice)| generate(pos, *dice).len()).sum();
    let sequential_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let batched: usize = generate_many(&requests).iter().map(Vec::len).sum();
    let batched_ms = start.elapsed().as_secs_f64() * 1000.0;

    assert_eq!(sequential, batched);

    vec![
        BenchmarkResult {
            name: "sampled positions, sequential".to_string(),
            iterations: requests.len(),
            total_time_ms: sequential_ms,
        },
        BenchmarkResult {
            name: "sampled positions, generate_many".to_string(),
            iterations: requests.len(),
            total_time_ms: batched_ms,
        },
    ]
}

fn bench_codec(positions: &[Position]) -> Vec<BenchmarkResult> {
    let start = Instant::now();
    let ids: Vec<String> = positions.iter().map(encode_position).collect();
    let encode_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let decoded = ids.iter().filter(|id| decode_position(id).is_ok()).count();
    let decode_ms = start.elapsed().as_secs_f64() * 1000.0;

    assert_eq!(decoded, positions.len());

    vec![
        BenchmarkResult {
            name: "position id encode".to_string(),
            iterations: positions.len(),
            total_time_ms: encode_ms,
        },
        BenchmarkResult {
            name: "position id decode".to_string(),
            iterations: positions.len(),
            total_time_ms: decode_ms,
        },
    ]
}

fn main() {
    println!("# Move Generator Benchmark\n");

    let positions = sampled_positions(5_000, 7);

    let mut results = bench_opening_rolls(200);
    results.extend(bench_sampled(&positions, 11));
    results.extend(bench_codec(&positions));

    println!("| Benchmark | Iterations | Total | Rate |");
    println!("|-----------|------------|-------|------|");
    for result in &results {
        println!("{}", result.to_table_row());
    }
}
