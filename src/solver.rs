//! Generic breadth-first shortest-path search over puzzle states.
//!
//! The engine explores the implicit graph whose nodes are states and
//! whose edges are legal moves, in increasing move-count order. The
//! first solved state dequeued therefore ends a shortest solution; ties
//! between equally short solutions are broken by the state's fixed
//! move-enumeration order. Exhausting the reachable component without
//! finding a solved state is a normal outcome, not an error.

use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use log::debug;

use crate::puzzle::PuzzleState;

/// Bounds on a search run. Both limits are checked once per dequeued
/// state, so a run over an unsolvable or very large space still
/// terminates promptly once a bound trips.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Maximum number of states to expand before giving up.
    pub max_states: Option<usize>,
    /// Maximum wall-clock time to search.
    pub timeout: Option<Duration>,
}

/// How a search run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<M> {
    /// A minimum-length move sequence from the initial state to a
    /// solved state.
    Solved(Vec<M>),
    /// The reachable component holds no solved state.
    Unsolvable,
    /// A configured bound tripped before the search could decide.
    OutOfBudget,
}

/// Search outcome plus traversal metrics.
#[derive(Debug, Clone)]
pub struct SearchReport<M> {
    pub outcome: SearchOutcome<M>,
    /// States dequeued and expanded.
    pub states_expanded: usize,
    /// Successor states produced, including duplicates that were
    /// discarded against the visited set.
    pub states_generated: usize,
    pub time_elapsed_ms: u64,
}

/// Parent link for path reconstruction.
struct Node<M> {
    parent: Option<usize>,
    mv: Option<M>,
}

/// Searches for a shortest solution from `start`.
///
/// The initial state is never mutated; every expansion works on an
/// independent clone. The visited set is keyed by state equality, so a
/// state is expanded at most once.
pub fn solve<S: PuzzleState>(start: &S, config: &SolverConfig) -> SearchReport<S::Move> {
    let start_time = Instant::now();
    let deadline = config.timeout.map(|timeout| start_time + timeout);

    let mut states_expanded: usize = 0;
    let mut states_generated: usize = 0;

    let mut nodes: Vec<Node<S::Move>> = vec![Node {
        parent: None,
        mv: None,
    }];
    let mut visited: HashSet<S> = HashSet::new();
    visited.insert(start.clone());

    let mut frontier: VecDeque<(S, usize)> = VecDeque::new();
    frontier.push_back((start.clone(), 0));

    while let Some((state, index)) = frontier.pop_front() {
        if state.is_solved() {
            let path = reconstruct_path(&nodes, index);
            debug!(
                "solved in {} moves after expanding {} states",
                path.len(),
                states_expanded
            );
            return SearchReport {
                outcome: SearchOutcome::Solved(path),
                states_expanded,
                states_generated,
                time_elapsed_ms: start_time.elapsed().as_millis() as u64,
            };
        }

        let budget_exceeded = config
            .max_states
            .is_some_and(|max| states_expanded >= max)
            || deadline.is_some_and(|deadline| Instant::now() > deadline);
        if budget_exceeded {
            return SearchReport {
                outcome: SearchOutcome::OutOfBudget,
                states_expanded,
                states_generated,
                time_elapsed_ms: start_time.elapsed().as_millis() as u64,
            };
        }

        states_expanded += 1;
        for mv in state.legal_moves() {
            let mut successor = state.clone();
            successor.make_move(mv);
            states_generated += 1;
            if visited.insert(successor.clone()) {
                nodes.push(Node {
                    parent: Some(index),
                    mv: Some(mv),
                });
                frontier.push_back((successor, nodes.len() - 1));
            }
        }
    }

    debug!(
        "reachable component exhausted after {} states, no solution",
        states_expanded
    );
    SearchReport {
        outcome: SearchOutcome::Unsolvable,
        states_expanded,
        states_generated,
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    }
}

fn reconstruct_path<M: Copy>(nodes: &[Node<M>], index: usize) -> Vec<M> {
    let mut path = Vec::new();
    let mut current = index;
    while let Some(parent) = nodes[current].parent {
        if let Some(mv) = nodes[current].mv {
            path.push(mv);
        }
        current = parent;
    }
    path.reverse();
    path
}
