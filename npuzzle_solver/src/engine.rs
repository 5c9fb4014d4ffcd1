//! Core puzzle model for the sliding-tile N-puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Board`: an immutable tile arrangement plus the number of moves taken to reach it.
//! - `BoardKey`: the cost-independent identity of a board, used for duplicate detection.
//! - `Move`: the four directions the blank can travel.
//!
//! Boards are only ever created through [`Board::make_initial`], [`Board::goal`],
//! [`Board::scrambled`] or by expanding an existing board, so every `Board` in the
//! program holds a valid permutation with exactly one blank.
use crate::error::{PuzzleError, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// The value representing the blank cell.
pub const BLANK: u16 = 0;

/// Largest grid side supported. Tile values are stored as `u16`.
pub const MAX_DIM: usize = 256;

/// A direction the blank travels when it swaps with a neighbouring tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Blank swaps with the tile above it.
    Up,
    /// Blank swaps with the tile below it.
    Down,
    /// Blank swaps with the tile to its left.
    Left,
    /// Blank swaps with the tile to its right.
    Right,
}

impl Move {
    /// All moves in the order successors are generated.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Row and column offset applied to the blank.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    /// The move that undoes this one.
    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// The identity of a board for duplicate detection: its tiles, without the cost.
///
/// Two boards reached by paths of different length share the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardKey(Box<[u16]>);

impl BoardKey {
    /// The row-major tiles this key was built from.
    pub fn tiles(&self) -> &[u16] {
        &self.0
    }
}

/// One puzzle configuration together with the path cost (`g`) used to reach it.
///
/// Tiles are stored row-major; `0` is the blank. A `Board` is never mutated after
/// creation: moving the blank produces a new board with `cost + 1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: Vec<u16>,
    dim: usize,
    blank: usize,
    cost: u32,
}

/// Value found at row-major `index` of the solved board with `len` cells.
pub(crate) fn goal_value(index: usize, len: usize) -> u16 {
    if index + 1 == len {
        BLANK
    } else {
        // `len <= MAX_DIM * MAX_DIM`, so `index + 1 < len` fits in a u16.
        (index + 1) as u16
    }
}

fn check_dim(dim: usize) -> Result<()> {
    if dim == 0 || dim > MAX_DIM {
        return Err(PuzzleError::invalid_puzzle(format!(
            "grid side must be between 1 and {}, found {}",
            MAX_DIM, dim
        )));
    }
    Ok(())
}

impl Board {
    /// Builds the starting board of a search from user or built-in input.
    ///
    /// The tiles must be a permutation of `0..dim*dim` in row-major order with
    /// exactly one blank (`0`). The returned board has a cost of zero.
    ///
    /// # Arguments
    /// * `tiles`: The row-major tile values.
    /// * `dim`: The side length of the grid.
    ///
    /// # Returns
    /// * `Ok(Board)` if the tiles form a valid puzzle.
    /// * `Err(PuzzleError::InvalidPuzzle)` if the length is wrong, a value is out of
    ///   range or repeated, or the number of blanks is not exactly one.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    ///
    /// let board = Board::make_initial(vec![1, 2, 3, 4, 5, 6, 7, 0, 8], 3).unwrap();
    /// assert_eq!(board.cost(), 0);
    /// assert_eq!(board.blank_position(), (2, 1));
    ///
    /// assert!(Board::make_initial(vec![1, 1, 2, 3, 4, 5, 6, 7, 8], 3).is_err());
    /// ```
    pub fn make_initial(tiles: Vec<u16>, dim: usize) -> Result<Self> {
        check_dim(dim)?;
        let len = dim * dim;
        if tiles.len() != len {
            return Err(PuzzleError::invalid_puzzle(format!(
                "a {}x{} puzzle needs {} tiles, found {}",
                dim,
                dim,
                len,
                tiles.len()
            )));
        }

        let blanks = tiles.iter().filter(|&&t| t == BLANK).count();
        if blanks != 1 {
            return Err(PuzzleError::invalid_puzzle(format!(
                "expected exactly one blank (0), found {}",
                blanks
            )));
        }

        let mut present = vec![false; len];
        for (index, &tile) in tiles.iter().enumerate() {
            let value = usize::from(tile);
            if value >= len {
                return Err(PuzzleError::invalid_puzzle(format!(
                    "tile {} at position {} is out of range 0..{}",
                    tile, index, len
                )));
            }
            if present[value] {
                return Err(PuzzleError::invalid_puzzle(format!(
                    "tile {} appears more than once",
                    tile
                )));
            }
            present[value] = true;
        }

        let blank = tiles.iter().position(|&t| t == BLANK).unwrap_or_default();
        Ok(Board {
            tiles,
            dim,
            blank,
            cost: 0,
        })
    }

    /// Returns the solved board `[1, 2, ..., dim*dim-1, 0]` with a cost of zero.
    pub fn goal(dim: usize) -> Result<Self> {
        check_dim(dim)?;
        let len = dim * dim;
        Ok(Board {
            tiles: (0..len).map(|i| goal_value(i, len)).collect(),
            dim,
            blank: len - 1,
            cost: 0,
        })
    }

    /// Creates a solvable board by walking the blank `moves` steps away from the goal.
    ///
    /// The walk is driven by a `SmallRng` seeded with `seed`, so the same arguments
    /// always produce the same board. The walk never immediately undoes its previous
    /// step unless that is the only move available. The result has a cost of zero.
    ///
    /// # Arguments
    /// * `dim`: The side length of the grid.
    /// * `moves`: Number of random blank moves to apply.
    /// * `seed`: Seed for the random number generator.
    pub fn scrambled(dim: usize, moves: u32, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::goal(dim)?;
        let mut last: Option<Move> = None;

        for _ in 0..moves {
            let mut options = board.successors_with_moves();
            if options.len() > 1 {
                if let Some(undo) = last.map(|m| m.opposite()) {
                    options.retain(|(m, _)| *m != undo);
                }
            }
            if options.is_empty() {
                break;
            }
            let (mv, next) = options.swap_remove(rng.gen_range(0..options.len()));
            last = Some(mv);
            board = next;
        }

        board.cost = 0;
        Ok(board)
    }

    /// The row-major tiles.
    pub fn tiles(&self) -> &[u16] {
        &self.tiles
    }

    /// The side length of the grid.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of moves taken from the initial board (`g`).
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Returns the tile at the specified row (`r`) and column (`c`).
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the grid.
    pub fn tile(&self, r: usize, c: usize) -> u16 {
        assert!(r < self.dim && c < self.dim, "({}, {}) is outside the grid", r, c);
        self.tiles[r * self.dim + c]
    }

    /// The (row, column) of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.dim, self.blank % self.dim)
    }

    /// The cost-independent identity of this board.
    pub fn canonical_key(&self) -> BoardKey {
        BoardKey(self.tiles.clone().into_boxed_slice())
    }

    /// Checks whether the tiles are exactly `[1, 2, ..., dim*dim-1, 0]`.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    ///
    /// assert!(Board::goal(4).unwrap().is_goal());
    /// let board = Board::make_initial(vec![1, 2, 0, 3], 2).unwrap();
    /// assert!(!board.is_goal());
    /// ```
    pub fn is_goal(&self) -> bool {
        let len = self.tiles.len();
        self.tiles
            .iter()
            .enumerate()
            .all(|(i, &t)| t == goal_value(i, len))
    }

    /// Returns the board reached by moving the blank in `mv`, or `None` if that
    /// would leave the grid.
    pub fn apply_move(&self, mv: Move) -> Option<Board> {
        let (row, col) = self.blank_position();
        let (dr, dc) = mv.offset();
        let new_row = row.checked_add_signed(dr).filter(|&r| r < self.dim)?;
        let new_col = col.checked_add_signed(dc).filter(|&c| c < self.dim)?;
        let target = new_row * self.dim + new_col;

        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Some(Board {
            tiles,
            dim: self.dim,
            blank: target,
            cost: self.cost + 1,
        })
    }

    /// All boards one blank move away, paired with the move that produced them.
    ///
    /// Children appear in `Up`, `Down`, `Left`, `Right` order and each carries
    /// `cost + 1`. A corner blank yields two children, an edge blank three and an
    /// interior blank four.
    pub fn successors_with_moves(&self) -> Vec<(Move, Board)> {
        Move::ALL
            .iter()
            .filter_map(|&mv| self.apply_move(mv).map(|child| (mv, child)))
            .collect()
    }

    /// All boards one blank move away, in `Up`, `Down`, `Left`, `Right` order.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::engine::Board;
    ///
    /// let board = Board::make_initial(vec![1, 2, 3, 4, 0, 5, 6, 7, 8], 3).unwrap();
    /// let children = board.successors();
    /// assert_eq!(children.len(), 4);
    /// assert!(children.iter().all(|c| c.cost() == 1));
    /// assert_eq!(children[0].tiles(), &[1, 0, 3, 4, 2, 5, 6, 7, 8]);
    /// ```
    pub fn successors(&self) -> Vec<Board> {
        self.successors_with_moves()
            .into_iter()
            .map(|(_, child)| child)
            .collect()
    }
}

impl fmt::Display for Board {
    /// Formats the board as a `dim x dim` grid with right-aligned numbers and the
    /// blank shown as `0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.tiles.len() - 1).to_string().len();
        for row in self.tiles.chunks(self.dim) {
            let line: Vec<String> = row.iter().map(|t| format!("{:>width$}", t)).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
