//! Match simulator CLI: plays complete matches in memory with random bots.
//!
//! Every match runs through the real coordinator with one thread per player,
//! so this doubles as a soak test for the setup barriers and turn handoff.

mod output;
mod simulator;

use std::time::{Duration, Instant};

use clap::Parser;
use codex_backend::{EndReason, MatchConfig};
use output::OutputWriter;
use simulator::{GameResult, Simulator};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "match-simulator")]
#[command(about = "In-memory match simulator driven by random players")]
struct Args {
    /// Number of matches to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Players per match
    #[arg(short, long, default_value = "2", value_parser = clap::value_parser!(u8).range(2..=4))]
    players: u8,

    /// Base seed; match N uses seed + N. Overrides CODEX_RNG_SEED.
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Compress the JSONL output
    #[arg(long)]
    compress: bool,

    /// Emit structured JSON logs instead of plain text
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.json_logs {
        codex_backend::telemetry::init_tracing();
    } else {
        let filter = if args.verbose {
            "debug"
        } else if args.show_output {
            "info"
        } else {
            "warn"
        };
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = MatchConfig::from_env()?;
    let base_seed = args.seed.or(config.rng_seed).unwrap_or_else(rand::random);
    if args.show_output {
        info!(
            games = args.games,
            players = args.players,
            base_seed,
            winning_score = config.winning_score,
            "starting match simulator"
        );
    }

    let mut output_writer = OutputWriter::new(&args.output_dir, args.compress)?;

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let seed = base_seed.wrapping_add(u64::from(game_num));
        let simulator = Simulator::new(game_num, seed, config.clone(), usize::from(args.players));

        match simulator.simulate_game() {
            Ok(result) => {
                if let Err(e) = output_writer.write_game(&result) {
                    warn!("Failed to write results for game {}: {}", game_num, e);
                }
                if args.verbose {
                    info!(game = game_num, winners = ?result.winners, turns = result.turns, "game completed");
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game_num, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (jsonl_path, csv_path) = output_writer.output_paths();
    let (jsonl_path, csv_path) = (jsonl_path.clone(), csv_path.clone());
    output_writer.finish()?;

    if args.show_output {
        info!("Detailed results written to: {}", jsonl_path.display());
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, errors, elapsed, args.games);
    }

    Ok(())
}

fn print_summary(results: &[GameResult], errors: u32, elapsed: Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / results.len() as u32
    );

    let completed = results
        .iter()
        .filter(|r| r.reason == EndReason::Completed)
        .count();
    let ties = results.iter().filter(|r| r.winners_count > 1).count();
    let avg_turns =
        results.iter().map(|r| f64::from(r.turns)).sum::<f64>() / results.len() as f64;

    println!("\n=== Outcomes ===");
    println!("Completed normally: {}", completed);
    println!("Ended by disconnection: {}", results.len() - completed);
    println!("Shared wins: {}", ties);
    println!("Average turns per game: {:.1}", avg_turns);

    let seats = results.iter().map(|r| r.players.len()).max().unwrap_or(0);
    let mut wins = vec![0u32; seats];
    let mut totals = vec![0u64; seats];
    for result in results {
        for (seat, player) in result.players.iter().enumerate() {
            if result.winners.contains(player) {
                wins[seat] += 1;
            }
            if let Some(ranked) = result.ranking.iter().find(|r| &r.player == player) {
                totals[seat] += u64::from(ranked.score);
            }
        }
    }

    println!("\n=== Results by Seat ===");
    for seat in 0..seats {
        let avg_score = totals[seat] as f64 / results.len() as f64;
        let win_rate = (f64::from(wins[seat]) / results.len() as f64) * 100.0;
        println!(
            "Seat {}: avg={:.1}, wins={} ({:.1}%)",
            seat, avg_score, wins[seat], win_rate
        );
    }
}
