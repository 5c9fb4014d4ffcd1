//! Compares the heuristics and search depths against exact distances computed by
//! breadth-first search over the whole 8-puzzle state space.

use npuzzle_solver::engine::{Board, BoardKey};
use npuzzle_solver::heuristics::{manhattan_distance, Algorithm};
use npuzzle_solver::solver::solve;
use std::collections::{HashMap, VecDeque};

/// Exact move count to the goal for every configuration reachable from it.
fn distances_to_goal(dim: usize) -> HashMap<BoardKey, u32> {
    let goal = Board::goal(dim).unwrap();
    let mut distances = HashMap::new();
    distances.insert(goal.canonical_key(), 0);
    let mut queue = VecDeque::from([goal]);

    while let Some(board) = queue.pop_front() {
        for child in board.successors() {
            let key = child.canonical_key();
            if !distances.contains_key(&key) {
                // Moves are reversible, so distance from the goal equals distance to it.
                distances.insert(key, child.cost());
                queue.push_back(child);
            }
        }
    }
    distances
}

#[test]
fn manhattan_never_overestimates_on_the_8_puzzle() {
    let distances = distances_to_goal(3);
    assert_eq!(distances.len(), 181_440);

    for (key, &distance) in &distances {
        let board = Board::make_initial(key.tiles().to_vec(), 3).unwrap();
        assert!(
            manhattan_distance(&board) <= distance,
            "{:?}: h = {} but true distance is {}",
            key.tiles(),
            manhattan_distance(&board),
            distance
        );
    }
}

#[test]
fn manhattan_never_overestimates_on_the_3_puzzle() {
    let distances = distances_to_goal(2);
    assert_eq!(distances.len(), 12);
    for (key, &distance) in &distances {
        let board = Board::make_initial(key.tiles().to_vec(), 2).unwrap();
        assert!(manhattan_distance(&board) <= distance);
    }
}

#[test]
fn search_depth_matches_breadth_first_distance() {
    let distances = distances_to_goal(3);

    for seed in 0..12 {
        let start = Board::scrambled(3, 40, seed).unwrap();
        let expected = distances[&start.canonical_key()];

        let manhattan = solve(start.clone(), Algorithm::ManhattanDistance);
        assert_eq!(manhattan.stats().map(|s| s.depth), Some(expected), "seed {}", seed);

        if expected <= 12 {
            let ucs = solve(start, Algorithm::UniformCost);
            assert_eq!(ucs.stats().map(|s| s.depth), Some(expected), "seed {}", seed);
        }
    }
}
