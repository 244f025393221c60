//! Perft - counts move-generation tree nodes to validate the board.

mod suite;

use anyhow::{bail, Context};
use chess_board::perft::{perft, perft_divide};
use chess_board::Board;
use chess_types::Fen;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use suite::Suite;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "perft")]
#[command(about = "Counts legal move tree nodes for chess positions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count leaf nodes at a depth
    Count {
        /// Search depth in plies
        depth: u32,
        /// Position to search
        #[arg(long, default_value = Fen::STARTPOS)]
        fen: String,
    },
    /// Count leaf nodes below each root move
    Divide {
        /// Search depth in plies
        depth: u32,
        /// Position to search
        #[arg(long, default_value = Fen::STARTPOS)]
        fen: String,
    },
    /// Check a TOML suite of positions against expected counts
    Suite {
        /// Path to the suite file
        path: PathBuf,
        /// Override the suite's maximum depth
        #[arg(long)]
        max_depth: Option<u32>,
    },
}

fn load(fen: &str) -> anyhow::Result<Board> {
    Board::from_fen(fen).with_context(|| format!("Invalid position: {fen}"))
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Count { depth, fen } => {
            let mut board = load(&fen)?;
            tracing::debug!("Counting {} to depth {}", fen, depth);

            let start = Instant::now();
            let nodes = perft(&mut board, depth);
            let elapsed = start.elapsed();

            let nps = nodes as f64 / elapsed.as_secs_f64().max(1e-9);
            tracing::info!(
                depth,
                nodes,
                elapsed_ms = elapsed.as_millis() as u64,
                nps = nps as u64,
                "perft finished"
            );
            println!("{nodes}");
        }
        Commands::Divide { depth, fen } => {
            let mut board = load(&fen)?;
            let results = perft_divide(&mut board, depth);
            let total: u64 = results.iter().map(|(_, n)| n).sum();
            for (uci, nodes) in &results {
                println!("{uci}: {nodes}");
            }
            println!();
            println!("Moves: {}", results.len());
            println!("Nodes: {total}");
        }
        Commands::Suite { path, max_depth } => {
            let suite = Suite::load(&path)
                .with_context(|| format!("Failed to load suite {}", path.display()))?;
            tracing::info!(
                "Running {} positions from {}",
                suite.positions.len(),
                path.display()
            );

            let report = suite.run(max_depth);
            if !report.is_success() {
                for m in &report.mismatches {
                    eprintln!(
                        "{} depth {}: expected {}, got {}",
                        m.name, m.depth, m.expected, m.actual
                    );
                }
                bail!(
                    "{} of {} counts mismatched",
                    report.mismatches.len(),
                    report.passed + report.mismatches.len()
                );
            }
            println!("All {} counts match", report.passed);
        }
    }

    Ok(())
}
