//! Input helpers: deriving the grid side from a puzzle size, parsing boards from
//! text, and the built-in sample puzzles.
use crate::engine::Board;
use crate::error::{PuzzleError, Result};
use tracing::warn;

/// Built-in 8-puzzles, ordered by the length of their shortest solution
/// (0, 2, 4, 8, 12, 16, 20 and 24 moves).
pub const SAMPLE_PUZZLES: [[u16; 9]; 8] = [
    [1, 2, 3, 4, 5, 6, 7, 8, 0],
    [1, 2, 3, 4, 5, 6, 0, 7, 8],
    [1, 2, 3, 5, 0, 6, 4, 7, 8],
    [1, 3, 6, 5, 0, 2, 4, 7, 8],
    [1, 3, 6, 5, 0, 7, 4, 8, 2],
    [1, 6, 7, 5, 0, 3, 4, 8, 2],
    [7, 1, 2, 4, 8, 5, 6, 3, 0],
    [0, 7, 2, 4, 6, 1, 3, 5, 8],
];

/// Grid side of the built-in samples.
pub const SAMPLE_DIM: usize = 3;

/// Derives the grid side from a puzzle size (8, 15, 24, ...).
///
/// # Returns
/// * `Ok(dim)` where `dim * dim == size + 1`.
/// * `Err(PuzzleError::InvalidPuzzle)` if `size + 1` is not a perfect square.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::dim_for_size;
///
/// assert_eq!(dim_for_size(8).unwrap(), 3);
/// assert_eq!(dim_for_size(15).unwrap(), 4);
/// assert!(dim_for_size(10).is_err());
/// ```
pub fn dim_for_size(size: usize) -> Result<usize> {
    let cells = size
        .checked_add(1)
        .ok_or_else(|| PuzzleError::invalid_puzzle(format!("size {} is too large", size)))?;

    let mut dim = (cells as f64).sqrt() as usize;
    while dim.checked_mul(dim).map_or(true, |square| square > cells) {
        dim -= 1;
    }
    while (dim + 1).checked_mul(dim + 1).is_some_and(|square| square <= cells) {
        dim += 1;
    }

    if dim * dim != cells {
        return Err(PuzzleError::invalid_puzzle(format!(
            "size {} is not one less than a perfect square (8, 15, 24, ...)",
            size
        )));
    }
    Ok(dim)
}

/// Splits a row-major tile list on commas and/or whitespace.
///
/// # Returns
/// * `Ok(Vec<u16>)` with the tiles in input order.
/// * `Err(PuzzleError::InvalidPuzzle)` naming the first token that is not a tile number.
pub fn parse_tiles(input: &str) -> Result<Vec<u16>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u16>().map_err(|_| {
                PuzzleError::invalid_puzzle(format!("unrecognized tile '{}'", token))
            })
        })
        .collect()
}

/// Parses a board from one string per row, top row first.
///
/// The grid side is the number of rows and every row must hold exactly that many
/// tiles, separated by spaces or commas.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["1 2 3", "4 5 6", "7 0 8"]).unwrap();
/// assert_eq!(board.dim(), 3);
/// assert_eq!(board.tile(2, 2), 8);
///
/// assert!(board_from_str_array(&["1 2", "3"]).is_err());
/// ```
pub fn board_from_str_array(rows: &[&str]) -> Result<Board> {
    let dim = rows.len();
    let mut tiles = Vec::with_capacity(dim * dim);

    for (r, row) in rows.iter().enumerate() {
        let parsed = parse_tiles(row)?;
        if parsed.len() != dim {
            return Err(PuzzleError::invalid_puzzle(format!(
                "row {} has {} tiles (expected {})",
                r + 1,
                parsed.len(),
                dim
            )));
        }
        tiles.extend(parsed);
    }

    Board::make_initial(tiles, dim)
}

/// Parses a flat, row-major tile list for a puzzle of the given size.
pub fn board_from_str(input: &str, size: usize) -> Result<Board> {
    let dim = dim_for_size(size)?;
    Board::make_initial(parse_tiles(input)?, dim)
}

/// Returns built-in sample `index`, falling back to sample 0 when the index is
/// outside `0..SAMPLE_PUZZLES.len()`.
pub fn sample_board(index: usize) -> Result<Board> {
    let tiles = match SAMPLE_PUZZLES.get(index) {
        Some(tiles) => tiles,
        None => {
            warn!(index, "no such sample puzzle, using sample 0");
            &SAMPLE_PUZZLES[0]
        }
    };
    Board::make_initial(tiles.to_vec(), SAMPLE_DIM)
}

/// Returns the built-in sample named by a user-typed selection.
///
/// Anything that is not an index in `0..SAMPLE_PUZZLES.len()`, including
/// non-numeric or negative text, selects sample 0.
pub fn sample_from_selection(selection: &str) -> Result<Board> {
    match selection.trim().parse::<usize>() {
        Ok(index) => sample_board(index),
        Err(_) => {
            warn!(selection, "sample selection is not a number, using sample 0");
            sample_board(0)
        }
    }
}
