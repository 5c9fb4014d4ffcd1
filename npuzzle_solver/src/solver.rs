//! Best-first search over sliding-tile boards.
//!
//! A [`Search`] owns the frontier (a min-heap keyed by `f = g + h`) and the set of
//! already expanded configurations. Each call to [`Iterator::next`] performs one
//! iteration: pop the cheapest board, goal-test it, and if it is not solved push
//! every child whose configuration has not been expanded yet. The popped board is
//! yielded so callers can display the order of exploration.
//!
//! Children are only checked against the expanded set, never against the
//! frontier, so the frontier can hold several copies of one configuration. A copy
//! popped after its configuration was already expanded is still yielded and
//! goal-tested, but is not expanded again.
//!
//! Boards with equal `f` leave the heap in an unspecified order. For a given
//! input the order is the same on every run, but it is not part of the contract.
use crate::engine::{Board, BoardKey};
use crate::heuristics::Algorithm;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Statistics reported when a search reaches the goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Largest path cost of any popped board.
    pub depth: u32,
    /// Boards ever pushed onto the frontier, counting the initial board.
    pub nodes_expanded: usize,
    /// Largest frontier size observed.
    pub max_frontier_size: usize,
}

/// How a finished search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchOutcome {
    /// The goal board was popped.
    Success(SearchStats),
    /// The frontier emptied without reaching the goal.
    Failure,
}

impl SearchOutcome {
    /// Returns the statistics of a successful search.
    pub fn stats(&self) -> Option<&SearchStats> {
        match self {
            SearchOutcome::Success(stats) => Some(stats),
            SearchOutcome::Failure => None,
        }
    }

    /// Returns `true` if the goal was reached.
    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Success(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SearchState {
    Running,
    Succeeded,
    Failed,
}

/// A frontier entry. `f` is computed once when the board is pushed.
#[derive(Debug)]
struct FrontierEntry {
    f: u32,
    board: Board,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    // Reversed so that `BinaryHeap` pops the smallest `f` first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f)
    }
}

/// A single best-first search, driven one expansion at a time.
///
/// `Search` is an iterator over the popped boards in pop order. The sequence is
/// finite and cannot be restarted; once it ends, [`Search::outcome`] reports
/// whether the goal was reached.
///
/// # Examples
/// ```
/// use npuzzle_solver::engine::Board;
/// use npuzzle_solver::heuristics::Algorithm;
/// use npuzzle_solver::solver::{Search, SearchOutcome};
///
/// let board = Board::make_initial(vec![1, 2, 3, 4, 5, 6, 7, 0, 8], 3).unwrap();
/// let mut search = Search::new(board, Algorithm::ManhattanDistance);
/// let popped: Vec<Board> = search.by_ref().collect();
///
/// assert!(popped.last().unwrap().is_goal());
/// match search.outcome() {
///     Some(SearchOutcome::Success(stats)) => assert_eq!(stats.depth, 1),
///     other => panic!("unexpected outcome {:?}", other),
/// }
/// ```
#[derive(Debug)]
pub struct Search {
    algorithm: Algorithm,
    frontier: BinaryHeap<FrontierEntry>,
    seen: HashSet<BoardKey>,
    depth: u32,
    nodes_expanded: usize,
    max_frontier_size: usize,
    state: SearchState,
}

impl Search {
    /// Starts a search from `initial` using `algorithm` to order the frontier.
    pub fn new(initial: Board, algorithm: Algorithm) -> Self {
        debug!(
            algorithm = %algorithm,
            dim = initial.dim(),
            h = algorithm.heuristic(&initial),
            "starting search"
        );
        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry {
            f: algorithm.evaluate(&initial),
            board: initial,
        });
        Search {
            algorithm,
            frontier,
            seen: HashSet::new(),
            depth: 0,
            nodes_expanded: 1,
            max_frontier_size: 1,
            state: SearchState::Running,
        }
    }

    /// Number of boards currently waiting in the frontier.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Number of distinct configurations expanded so far.
    pub fn expanded_len(&self) -> usize {
        self.seen.len()
    }

    /// Statistics gathered so far, whether or not the search has finished.
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            depth: self.depth,
            nodes_expanded: self.nodes_expanded,
            max_frontier_size: self.max_frontier_size,
        }
    }

    /// The final report, or `None` while the search is still running.
    pub fn outcome(&self) -> Option<SearchOutcome> {
        match self.state {
            SearchState::Running => None,
            SearchState::Succeeded => Some(SearchOutcome::Success(self.stats())),
            SearchState::Failed => Some(SearchOutcome::Failure),
        }
    }

    /// Runs one iteration of the search and returns the board it popped.
    ///
    /// Returns `None` once the search has succeeded or the frontier is empty.
    pub fn step(&mut self) -> Option<Board> {
        if self.state != SearchState::Running {
            return None;
        }

        let Some(FrontierEntry { f, board: current }) = self.frontier.pop() else {
            self.state = SearchState::Failed;
            debug!(
                expanded = self.seen.len(),
                nodes_expanded = self.nodes_expanded,
                "frontier exhausted without reaching the goal"
            );
            return None;
        };

        self.depth = self.depth.max(current.cost());

        if current.is_goal() {
            self.state = SearchState::Succeeded;
            debug!(
                depth = self.depth,
                nodes_expanded = self.nodes_expanded,
                max_frontier_size = self.max_frontier_size,
                "goal reached"
            );
            return Some(current);
        }

        if self.seen.insert(current.canonical_key()) {
            for child in current.successors() {
                if !self.seen.contains(&child.canonical_key()) {
                    self.frontier.push(FrontierEntry {
                        f: self.algorithm.evaluate(&child),
                        board: child,
                    });
                    self.nodes_expanded += 1;
                }
            }
            self.max_frontier_size = self.max_frontier_size.max(self.frontier.len());
        }

        trace!(
            g = current.cost(),
            f,
            frontier = self.frontier.len(),
            expanded = self.seen.len(),
            "expanded board"
        );
        Some(current)
    }
}

impl Iterator for Search {
    type Item = Board;

    fn next(&mut self) -> Option<Board> {
        self.step()
    }
}

impl FusedIterator for Search {}

/// Runs a search to completion, calling `on_pop` with every popped board.
///
/// # Arguments
/// * `initial`: The starting board.
/// * `algorithm`: The cost function ordering the frontier.
/// * `on_pop`: Called once per iteration with the board just popped, in pop order.
///
/// # Returns
/// The terminal [`SearchOutcome`].
pub fn solve_with<F>(initial: Board, algorithm: Algorithm, mut on_pop: F) -> SearchOutcome
where
    F: FnMut(&Board),
{
    let mut search = Search::new(initial, algorithm);
    for board in search.by_ref() {
        on_pop(&board);
    }
    search.outcome().unwrap_or(SearchOutcome::Failure)
}

/// Runs a search to completion and returns only the terminal report.
pub fn solve(initial: Board, algorithm: Algorithm) -> SearchOutcome {
    solve_with(initial, algorithm, |_| {})
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(tiles: &[u16], dim: usize) -> Board {
        Board::make_initial(tiles.to_vec(), dim).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let search = Search::new(board(&[1, 2, 3, 4, 5, 6, 0, 7, 8], 3), Algorithm::UniformCost);
        assert_eq!(search.outcome(), None);
        assert_eq!(search.frontier_len(), 1);
        assert_eq!(search.expanded_len(), 0);
        assert_eq!(
            search.stats(),
            SearchStats {
                depth: 0,
                nodes_expanded: 1,
                max_frontier_size: 1
            }
        );
    }

    #[test]
    fn test_already_solved() {
        for algorithm in Algorithm::ALL {
            let mut search = Search::new(Board::goal(3).unwrap(), algorithm);
            let popped: Vec<Board> = search.by_ref().collect();
            assert_eq!(popped.len(), 1);
            assert_eq!(
                search.outcome(),
                Some(SearchOutcome::Success(SearchStats {
                    depth: 0,
                    nodes_expanded: 1,
                    max_frontier_size: 1
                }))
            );
        }
    }

    #[test]
    fn test_one_move_manhattan_exact_stats() {
        // The goal child has f = 1; the other two children have f = 3.
        let outcome = solve(board(&[1, 2, 3, 4, 5, 6, 7, 0, 8], 3), Algorithm::ManhattanDistance);
        assert_eq!(
            outcome,
            SearchOutcome::Success(SearchStats {
                depth: 1,
                nodes_expanded: 4,
                max_frontier_size: 3
            })
        );
    }

    #[test]
    fn test_first_step_expands_initial() {
        let mut search = Search::new(board(&[1, 2, 3, 4, 0, 5, 6, 7, 8], 3), Algorithm::UniformCost);
        let first = search.step().unwrap();
        assert_eq!(first.cost(), 0);
        assert_eq!(search.frontier_len(), 4);
        assert_eq!(search.expanded_len(), 1);
        assert_eq!(search.stats().nodes_expanded, 5);
        assert_eq!(search.stats().max_frontier_size, 4);
    }

    #[test]
    fn test_pop_order_respects_f() {
        let mut search = Search::new(
            board(&[1, 3, 6, 5, 0, 2, 4, 7, 8], 3),
            Algorithm::ManhattanDistance,
        );
        let mut last_f = 0;
        while let Some(b) = search.step() {
            let f = Algorithm::ManhattanDistance.evaluate(&b);
            assert!(f >= last_f, "popped f went from {} to {}", last_f, f);
            last_f = f;
        }
        assert!(search.outcome().unwrap().is_success());
    }

    #[test]
    fn test_uniform_cost_depth_is_shortest_path() {
        let outcome = solve(board(&[1, 2, 3, 4, 5, 6, 0, 7, 8], 3), Algorithm::UniformCost);
        assert_eq!(outcome.stats().map(|s| s.depth), Some(2));
    }

    #[test]
    fn test_unsolvable_exhausts_reachable_half() {
        // A swapped pair on a 2x2 grid cannot be solved; 12 configurations are reachable.
        let mut search = Search::new(board(&[2, 1, 3, 0], 2), Algorithm::ManhattanDistance);
        let popped: Vec<Board> = search.by_ref().collect();
        assert_eq!(search.outcome(), Some(SearchOutcome::Failure));
        assert_eq!(search.expanded_len(), 12);
        assert_eq!(search.frontier_len(), 0);
        assert!(popped.iter().all(|b| !b.is_goal()));
    }

    #[test]
    fn test_frontier_keeps_duplicate_configurations() {
        // The 12 reachable configurations form one cycle. Both branches push the
        // configuration opposite the start before either copy is expanded, so it is
        // pushed and popped twice.
        for algorithm in Algorithm::ALL {
            let mut search = Search::new(board(&[2, 1, 3, 0], 2), algorithm);
            let popped: Vec<Board> = search.by_ref().collect();

            assert_eq!(search.outcome(), Some(SearchOutcome::Failure), "{}", algorithm);
            assert_eq!(popped.len(), 13, "{}", algorithm);
            assert_eq!(search.expanded_len(), 12, "{}", algorithm);
            assert_eq!(
                search.stats(),
                SearchStats {
                    depth: 6,
                    nodes_expanded: 13,
                    max_frontier_size: 2
                },
                "{}",
                algorithm
            );

            let keys: HashSet<BoardKey> = popped.iter().map(Board::canonical_key).collect();
            assert_eq!(keys.len(), 12, "{}", algorithm);
            let repeated: Vec<&Board> = popped
                .iter()
                .filter(|b| popped.iter().filter(|o| o.tiles() == b.tiles()).count() == 2)
                .collect();
            assert_eq!(repeated.len(), 2, "{}", algorithm);
            assert!(repeated.iter().all(|b| b.cost() == 6), "{}", algorithm);
        }
    }

    #[test]
    fn test_search_is_fused() {
        let mut search = Search::new(Board::goal(2).unwrap(), Algorithm::UniformCost);
        assert!(search.next().is_some());
        assert!(search.next().is_none());
        assert!(search.next().is_none());
        assert!(search.outcome().unwrap().is_success());
    }

    #[test]
    fn test_solve_with_reports_every_pop() {
        let mut count = 0;
        let mut last = None;
        let outcome = solve_with(
            board(&[1, 2, 3, 4, 5, 6, 0, 7, 8], 3),
            Algorithm::MisplacedTiles,
            |b| {
                count += 1;
                last = Some(b.clone());
            },
        );
        assert!(outcome.is_success());
        assert!(count >= 3);
        assert!(last.unwrap().is_goal());
    }

    #[test]
    fn test_outcome_serialization() {
        let success = SearchOutcome::Success(SearchStats {
            depth: 2,
            nodes_expanded: 7,
            max_frontier_size: 5,
        });
        let json = serde_json::to_value(success).unwrap();
        assert_eq!(json["result"], "SUCCESS");
        assert_eq!(json["depth"], 2);
        assert_eq!(json["nodes_expanded"], 7);
        assert_eq!(json["max_frontier_size"], 5);

        let failure = serde_json::to_value(SearchOutcome::Failure).unwrap();
        assert_eq!(failure, serde_json::json!({ "result": "FAILURE" }));
    }
}
