//! The abstract contract between a puzzle and the search engine.
//!
//! Any state type implementing [`PuzzleState`] can be explored by the
//! solver; the engine never sees the concrete board rules.

use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

/// A puzzle state with a finite set of legal moves.
///
/// Equality and hashing must cover everything that affects future
/// legality and solvedness, since the solver deduplicates states by
/// identity. Two states that compare equal but allow different
/// continuations would make a search silently drop reachable positions.
pub trait PuzzleState: Clone + Eq + Hash {
    /// The label attached to each edge of the state graph.
    type Move: Copy + Eq + Debug;

    /// Whether this state satisfies the goal condition.
    fn is_solved(&self) -> bool;

    /// The moves legal from this state, in a fixed enumeration order.
    fn legal_moves(&self) -> SmallVec<[Self::Move; 4]>;

    /// Applies a move. Callers must check legality first; applying an
    /// illegal move leaves the state unchanged.
    fn make_move(&mut self, mv: Self::Move);

    /// Whether a single move is legal from this state.
    fn is_legal_move(&self, mv: Self::Move) -> bool {
        self.legal_moves().iter().any(|&m| m == mv)
    }
}
