use anyhow::{Context, Result};
use clap::Parser;
use npuzzle_solver::heuristics::Algorithm;
use npuzzle_solver::solver::{solve, SearchOutcome};
use npuzzle_solver::utils::{sample_board, SAMPLE_PUZZLES};
use std::collections::HashMap;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare the search algorithms on the built-in samples", long_about = None)]
struct Args {
    /// Only evaluate samples up to and including this index
    #[clap(long, default_value_t = SAMPLE_PUZZLES.len() - 1)]
    max_sample: usize,

    /// Enable debug logging on stderr
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let last = args.max_sample.min(SAMPLE_PUZZLES.len() - 1);
    info!(samples = last + 1, "starting algorithm evaluation");

    let mut totals: HashMap<Algorithm, Vec<usize>> = HashMap::new();

    for index in 0..=last {
        let board = sample_board(index).with_context(|| format!("sample {} is invalid", index))?;
        println!("\nSample {}:\n{}", index, board);

        for algorithm in Algorithm::ALL {
            match solve(board.clone(), algorithm) {
                SearchOutcome::Success(stats) => {
                    println!(
                        "  {:<38} depth: {:<4} expanded: {:<8} max frontier: {}",
                        algorithm.description(),
                        stats.depth,
                        stats.nodes_expanded,
                        stats.max_frontier_size
                    );
                    totals.entry(algorithm).or_default().push(stats.nodes_expanded);
                }
                SearchOutcome::Failure => {
                    println!("  {:<38} FAILURE", algorithm.description());
                }
            }
        }
    }

    println!("\n--- Average Nodes Expanded ---");
    for algorithm in Algorithm::ALL {
        match totals.get(&algorithm) {
            Some(counts) if !counts.is_empty() => {
                let average = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
                println!("{:<38}: {:.2}", algorithm.description(), average);
            }
            _ => println!("{:<38}: no successful runs", algorithm.description()),
        }
    }
    Ok(())
}
