//! Generate a pipe puzzle with specified size and seed.
//!
//! Prints the scrambled board, the solved board and the planted route.
//!
//! Usage: cargo run --release --example generate -- <size> [seed] [--decoys] [--staircase]
//!
//! Example:
//!   RUST_LOG=debug cargo run --release --example generate -- 7 42

use pipe_connect::{GeneratorParams, PathStrategy, find_path, generate, validate_size};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    let size = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .map(validate_size)
        .unwrap_or_else(|| {
            eprintln!("Usage: {} <size> [seed] [--decoys] [--staircase]", args[0]);
            std::process::exit(1);
        })
        .unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        });

    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(0);

    let params = GeneratorParams {
        strategy: if args.iter().any(|s| s == "--staircase") {
            PathStrategy::staircase(size)
        } else {
            PathStrategy::RandomWalk
        },
        fill_decoys: args.iter().any(|s| s == "--decoys"),
    };

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let level = generate(size, &mut rng, &params);

    println!("Puzzle:");
    print!("{}", level.grid);
    println!("connected: {}", find_path(&level.grid).connected);
    println!();

    let solved = level.solved_grid();
    println!("Solution:");
    print!("{}", solved);
    let route: Vec<String> = find_path(&solved)
        .path
        .iter()
        .map(|c| format!("({},{})", c.row, c.col))
        .collect();
    println!("route: {}", route.join(" "));
}
