//! Cost functions used to order the search frontier.
//!
//! A search is configured with one [`Algorithm`]. Each algorithm supplies a
//! heuristic `h` and the frontier is ordered by `f = g + h`, where `g` is the
//! board's path cost.
use crate::engine::{goal_value, Board, BLANK};
use crate::error::PuzzleError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The three supported search strategies, numbered as in the selection menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// `h = 0`: frontier ordered by path cost alone.
    UniformCost,
    /// A* with the number of cells whose value differs from the solved board.
    MisplacedTiles,
    /// A* with the summed grid distance of every tile from its solved cell.
    ManhattanDistance,
}

impl Algorithm {
    /// All algorithms in menu order.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::UniformCost,
        Algorithm::MisplacedTiles,
        Algorithm::ManhattanDistance,
    ];

    /// The menu number (`1`, `2` or `3`) of this algorithm.
    pub fn selection(&self) -> u32 {
        match self {
            Algorithm::UniformCost => 1,
            Algorithm::MisplacedTiles => 2,
            Algorithm::ManhattanDistance => 3,
        }
    }

    /// The label shown in the selection menu.
    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::UniformCost => "Uniform Cost Search",
            Algorithm::MisplacedTiles => "A* with Misplaced Tile Heuristic",
            Algorithm::ManhattanDistance => "A* with Manhattan Distance Heuristic",
        }
    }

    /// Estimated number of moves from `board` to the goal.
    pub fn heuristic(&self, board: &Board) -> u32 {
        match self {
            Algorithm::UniformCost => 0,
            Algorithm::MisplacedTiles => misplaced_tiles(board),
            Algorithm::ManhattanDistance => manhattan_distance(board),
        }
    }

    /// The frontier priority `f = g + h` of `board`.
    pub fn evaluate(&self, board: &Board) -> u32 {
        board.cost() + self.heuristic(board)
    }
}

impl TryFrom<u32> for Algorithm {
    type Error = PuzzleError;

    fn try_from(selection: u32) -> Result<Self, Self::Error> {
        match selection {
            1 => Ok(Algorithm::UniformCost),
            2 => Ok(Algorithm::MisplacedTiles),
            3 => Ok(Algorithm::ManhattanDistance),
            other => Err(PuzzleError::InvalidAlgorithmSelection(other.to_string())),
        }
    }
}

impl FromStr for Algorithm {
    type Err = PuzzleError;

    /// Parses a menu number, or one of the short names `ucs`, `misplaced`, `manhattan`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "ucs" | "uniform" | "uniform_cost" => Ok(Algorithm::UniformCost),
            "misplaced" | "misplaced_tiles" => Ok(Algorithm::MisplacedTiles),
            "manhattan" | "manhattan_distance" => Ok(Algorithm::ManhattanDistance),
            _ => trimmed
                .parse::<u32>()
                .map_err(|_| PuzzleError::InvalidAlgorithmSelection(trimmed.to_string()))
                .and_then(Algorithm::try_from),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Counts the cells whose value differs from the solved board.
///
/// The blank's cell is compared like any other, so a board with the blank out of
/// place counts it as misplaced. The solved board scores zero.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::heuristics::misplaced_tiles;
///
/// let board = Board::make_initial(vec![1, 2, 3, 4, 5, 6, 7, 0, 8], 3).unwrap();
/// // Both the 8 and the blank are out of place.
/// assert_eq!(misplaced_tiles(&board), 2);
/// ```
pub fn misplaced_tiles(board: &Board) -> u32 {
    let len = board.tiles().len();
    let misplaced = board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(i, &t)| t != goal_value(i, len))
        .count();
    misplaced as u32
}

/// Sums, over every non-blank tile, the row and column distance to its solved cell.
///
/// Tile `v` belongs at row `(v - 1) / dim`, column `(v - 1) % dim`. The blank
/// contributes nothing.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::heuristics::manhattan_distance;
///
/// let board = Board::make_initial(vec![1, 2, 3, 4, 5, 6, 0, 7, 8], 3).unwrap();
/// assert_eq!(manhattan_distance(&board), 2);
/// ```
pub fn manhattan_distance(board: &Board) -> u32 {
    let dim = board.dim();
    board
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &t)| t != BLANK)
        .map(|(i, &t)| {
            let (row, col) = (i / dim, i % dim);
            let home = usize::from(t) - 1;
            let (goal_row, goal_col) = (home / dim, home % dim);
            (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32
        })
        .sum()
}
