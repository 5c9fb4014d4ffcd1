use anyhow::{bail, Context, Result};
use clap::Parser;
use npuzzle_solver::engine::Board;
use npuzzle_solver::heuristics::Algorithm;
use npuzzle_solver::solver::{solve_with, SearchOutcome};
use npuzzle_solver::utils::{
    board_from_str, board_from_str_array, dim_for_size, parse_tiles, sample_from_selection,
};
use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve sliding-tile N-puzzles with best-first search", long_about = None)]
struct Args {
    /// Puzzle size (8, 15, 24, ...). Inferred from --tiles when omitted
    #[clap(short, long)]
    size: Option<usize>,

    /// Row-major tiles separated by commas or spaces, 0 for the blank
    #[clap(short, long, conflicts_with_all = ["sample", "scramble"])]
    tiles: Option<String>,

    /// Use built-in sample puzzle 0-7 (out-of-range values select sample 0)
    #[clap(long, conflicts_with = "scramble", allow_hyphen_values = true)]
    sample: Option<String>,

    /// Generate a puzzle by making this many random blank moves from the goal
    #[clap(long)]
    scramble: Option<u32>,

    /// Seed for --scramble
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Algorithm: 1 (uniform cost), 2 (misplaced tiles) or 3 (Manhattan distance)
    #[clap(short, long)]
    algorithm: Option<String>,

    /// Do not print every popped board
    #[clap(short, long)]
    quiet: bool,

    /// Print the final report as JSON
    #[clap(long)]
    json: bool,

    /// Enable debug logging on stderr
    #[clap(short, long)]
    verbose: bool,
}

/// Reads whitespace-separated tokens from stdin, printing a prompt whenever more
/// input is needed.
struct Prompter<R> {
    input: R,
    pending: Vec<String>,
}

impl<R: BufRead> Prompter<R> {
    fn new(input: R) -> Self {
        Prompter {
            input,
            pending: Vec::new(),
        }
    }

    fn next_token(&mut self, prompt: &str) -> Result<String> {
        while self.pending.is_empty() {
            print!("{}", prompt);
            io::stdout().flush().context("failed to flush stdout")?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read from stdin")?;
            if read == 0 {
                bail!("unexpected end of input");
            }
            self.pending = line.split_whitespace().rev().map(str::to_string).collect();
        }
        Ok(self.pending.pop().unwrap_or_default())
    }

    fn read_size(&mut self) -> Result<usize> {
        let mut prompt = "Enter the puzzle's size (8, 15, 24, etc.): ";
        loop {
            let token = self.next_token(prompt)?;
            if let Ok(size) = token.parse::<usize>() {
                if dim_for_size(size).is_ok() {
                    return Ok(size);
                }
            }
            prompt = "Invalid Input! Enter a valid size (8, 15, 24, etc.): ";
        }
    }

    fn read_board(&mut self, dim: usize) -> Result<Board> {
        let mut rows = Vec::with_capacity(dim);
        for r in 0..dim {
            let prompt = format!(
                "Enter Row {} (Use spaces in-between numbers)(Press enter when done): ",
                r + 1
            );
            let mut row = Vec::with_capacity(dim);
            for _ in 0..dim {
                row.push(self.next_token(&prompt)?);
            }
            rows.push(row.join(" "));
        }
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        Ok(board_from_str_array(&rows)?)
    }

    fn read_algorithm(&mut self) -> Result<Algorithm> {
        for algorithm in Algorithm::ALL {
            println!("{}) {}", algorithm.selection(), algorithm);
        }
        let token = self.next_token("Select an algorithm (1, 2 or 3): ")?;
        Ok(token.parse::<Algorithm>()?)
    }
}

fn initial_board<R: BufRead>(args: &Args, prompter: &mut Prompter<R>) -> Result<Board> {
    if let Some(tiles) = &args.tiles {
        let size = match args.size {
            Some(size) => size,
            None => parse_tiles(tiles)?.len().saturating_sub(1),
        };
        return board_from_str(tiles, size).context("invalid --tiles");
    }
    if let Some(selection) = &args.sample {
        return Ok(sample_from_selection(selection)?);
    }
    if let Some(moves) = args.scramble {
        let dim = dim_for_size(args.size.unwrap_or(8)).context("invalid --size")?;
        return Ok(Board::scrambled(dim, moves, args.seed)?);
    }

    let size = match args.size {
        Some(size) => size,
        None => prompter.read_size()?,
    };
    let dim = dim_for_size(size).context("invalid --size")?;
    prompter.read_board(dim)
}

fn print_report(outcome: &SearchOutcome, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(outcome).context("failed to encode report")?;
        println!("{}", text);
        return Ok(());
    }

    match outcome {
        SearchOutcome::Success(stats) => {
            println!("SUCCESS");
            println!("Solution depth: {}", stats.depth);
            println!("Nodes expanded: {}", stats.nodes_expanded);
            println!("Max queue size: {}", stats.max_frontier_size);
        }
        SearchOutcome::Failure => println!("FAILURE"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock());

    let board = initial_board(&args, &mut prompter)?;
    let algorithm = match &args.algorithm {
        Some(selection) => selection.parse::<Algorithm>()?,
        None => prompter.read_algorithm()?,
    };

    println!("Initial board:\n{}", board);
    info!(%algorithm, dim = board.dim(), "solving");

    let quiet = args.quiet;
    let outcome = solve_with(board, algorithm, |popped| {
        if !quiet {
            println!("g = {}\n{}", popped.cost(), popped);
        }
    });

    print_report(&outcome, args.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompter_reads_size_rows_and_algorithm() {
        let input = "10\n8\n1 2 3\n4 5 6 7\n0 8\n3\n";
        let mut prompter = Prompter::new(Cursor::new(input));
        let size = prompter.read_size().unwrap();
        assert_eq!(size, 8);
        let board = prompter.read_board(3).unwrap();
        assert_eq!(board.tiles(), &[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert_eq!(prompter.read_algorithm().unwrap(), Algorithm::ManhattanDistance);
    }

    #[test]
    fn test_prompter_rejects_bad_algorithm() {
        let mut prompter = Prompter::new(Cursor::new("7\n"));
        assert!(prompter.read_algorithm().is_err());
    }

    #[test]
    fn test_prompter_end_of_input() {
        let mut prompter = Prompter::new(Cursor::new(""));
        assert!(prompter.read_size().is_err());
    }

    #[test]
    fn test_initial_board_from_tiles_infers_size() {
        let args = Args::parse_from(["npuzzle", "--tiles", "1,2,3,0", "-a", "1"]);
        let mut prompter = Prompter::new(Cursor::new(""));
        let board = initial_board(&args, &mut prompter).unwrap();
        assert_eq!(board.dim(), 2);
    }

    #[test]
    fn test_initial_board_from_sample_and_scramble() {
        let args = Args::parse_from(["npuzzle", "--sample", "3"]);
        let mut prompter = Prompter::new(Cursor::new(""));
        let board = initial_board(&args, &mut prompter).unwrap();
        assert_eq!(board.tiles(), &[1, 3, 6, 5, 0, 2, 4, 7, 8]);

        let args = Args::parse_from(["npuzzle", "--scramble", "20", "--size", "15", "--seed", "9"]);
        let board = initial_board(&args, &mut prompter).unwrap();
        assert_eq!(board.dim(), 4);
        assert_eq!(board, Board::scrambled(4, 20, 9).unwrap());
    }

    #[test]
    fn test_invalid_sample_selection_falls_back() {
        let mut prompter = Prompter::new(Cursor::new(""));
        for selection in ["x", "-1", "42"] {
            let args = Args::parse_from(["npuzzle", "--sample", selection]);
            let board = initial_board(&args, &mut prompter).unwrap();
            assert!(board.is_goal(), "{}", selection);
        }
    }

    #[test]
    fn test_tiles_conflict_with_sample() {
        assert!(Args::try_parse_from(["npuzzle", "--tiles", "1,2,3,0", "--sample", "1"]).is_err());
    }
}
