//! The soldier vs. cannons board state and its move-legality rule.
//!
//! A lone soldier crosses a 15x15 field from the top-left corner to the
//! goal in the bottom-right corner. Two cannon batteries overlook the
//! field: one along the top edge covering columns, one along the left
//! edge covering rows. The batteries fire alternately, and only one of
//! them is active at a time; every accepted move hands the turn to the
//! other battery. A cell may be entered when at least one of the lines
//! through it belongs to the active battery, or when no cannon covers it
//! at all. Two fixed black blocks occupy cells the soldier can never
//! enter.

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Direction, Position};
use crate::error::{PuzzleError, PuzzleResult};
use crate::puzzle::PuzzleState;

/// Cannon group covering each column, fired from the battery along the
/// top edge. Indexed by column 0..=14; 0 means no cannon covers the
/// column.
pub const COLUMN_COVERAGE: [u8; 15] = [0, 2, 1, 0, 2, 0, 0, 1, 2, 0, 2, 0, 2, 0, 0];

/// Cannon group covering each row, fired from the battery along the left
/// edge. Indexed by row 0..=14; 0 means no cannon covers the row.
pub const ROW_COVERAGE: [u8; 15] = [0, 1, 2, 0, 1, 0, 2, 1, 2, 0, 2, 1, 2, 0, 0];

/// Which of the two alternating cannon batteries is currently firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Cannon {
    One = 1,
    Two = 2,
}

impl Cannon {
    /// The battery that fires after this one.
    pub fn other(self) -> Cannon {
        match self {
            Cannon::One => Cannon::Two,
            Cannon::Two => Cannon::One,
        }
    }
}

impl Default for Cannon {
    fn default() -> Self {
        Cannon::One
    }
}

impl From<Cannon> for u8 {
    fn from(cannon: Cannon) -> u8 {
        cannon as u8
    }
}

impl TryFrom<u8> for Cannon {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Cannon::One),
            2 => Ok(Cannon::Two),
            other => Err(format!("active cannon must be 1 or 2, got {other}")),
        }
    }
}

/// The complete board state: four piece positions and the active battery.
///
/// Only the soldier ever moves. The black blocks and the goal are fixed
/// at construction; the goal position doubles as the effective board
/// extent for the boundary checks, so in the canonical layout the
/// soldier can never leave the 15x15 field.
///
/// Equality and hashing cover the four positions and the active battery.
/// The battery flag determines which moves are legal next, so two
/// layouts that differ only in the flag are distinct states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldierState {
    soldier: Position,
    black_block1: Position,
    black_block2: Position,
    goal: Position,
    #[serde(default)]
    active_cannon: Cannon,
}

impl SoldierState {
    /// Piece role of the soldier, the only mobile piece.
    pub const SOLDIER: usize = 0;
    /// Piece role of the first black block.
    pub const BLACK_BLOCK1: usize = 1;
    /// Piece role of the second black block.
    pub const BLACK_BLOCK2: usize = 2;
    /// Piece role of the goal cell.
    pub const GOAL: usize = 3;

    /// Board side length; the coverage tables index lines 0..=14.
    pub const BOARD_SIZE: i32 = 15;

    /// Creates the canonical start layout: soldier at the top-left
    /// corner, goal at the bottom-right, battery one firing first.
    pub fn new() -> Self {
        Self::with_layout(
            Position::new(0, 0),
            Position::new(13, 13),
            Position::new(14, 6),
            Position::new(14, 14),
            Cannon::One,
        )
    }

    /// Creates a state from an explicit layout. All positions must lie
    /// on the board.
    pub fn with_layout(
        soldier: Position,
        black_block1: Position,
        black_block2: Position,
        goal: Position,
        active_cannon: Cannon,
    ) -> Self {
        Self {
            soldier,
            black_block1,
            black_block2,
            goal,
            active_cannon,
        }
    }

    /// Returns the position of the piece with the given role.
    pub fn position(&self, role: usize) -> PuzzleResult<Position> {
        match role {
            Self::SOLDIER => Ok(self.soldier),
            Self::BLACK_BLOCK1 => Ok(self.black_block1),
            Self::BLACK_BLOCK2 => Ok(self.black_block2),
            Self::GOAL => Ok(self.goal),
            other => Err(PuzzleError::InvalidRole(other)),
        }
    }

    pub fn soldier(&self) -> Position {
        self.soldier
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn active_cannon(&self) -> Cannon {
        self.active_cannon
    }

    /// A cell can be entered unless a black block occupies it. The goal
    /// cell is a regular destination, not an obstacle.
    fn can_enter(&self, target: Position) -> bool {
        target != self.black_block1 && target != self.black_block2
    }

    /// Whether the soldier would stay within the board moving this way.
    /// The lower and right limits come from the goal position.
    fn within_bounds(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.soldier.row > 0,
            Direction::Right => self.soldier.col < self.goal.col,
            Direction::Down => self.soldier.row < self.goal.row,
            Direction::Left => self.soldier.col > 0,
        }
    }

    /// Whether the target cell is safe from the cannons this turn.
    ///
    /// The cell's row and column each belong to a cannon group (or to
    /// no cannon). The cell is safe when either group matches the
    /// active battery, or when both are neutral. A cell covered only by
    /// the idle battery is unsafe: the soldier would be standing on its
    /// line when it fires next.
    fn safe_to_enter(&self, target: Position, direction: Direction) -> bool {
        let row_group = ROW_COVERAGE[target.row as usize];
        let col_group = COLUMN_COVERAGE[target.col as usize];
        let (a, b) = match direction {
            Direction::Up | Direction::Down => (row_group, col_group),
            Direction::Right | Direction::Left => (col_group, row_group),
        };
        let active = self.active_cannon as u8;
        a == active || b == active || (a == 0 && b == 0)
    }
}

impl Default for SoldierState {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleState for SoldierState {
    type Move = Direction;

    fn is_solved(&self) -> bool {
        self.soldier == self.goal
    }

    fn legal_moves(&self) -> SmallVec<[Direction; 4]> {
        Direction::ALL
            .into_iter()
            .filter(|&direction| self.is_legal_move(direction))
            .collect()
    }

    fn is_legal_move(&self, direction: Direction) -> bool {
        let target = self.soldier.moved(direction);
        self.within_bounds(direction)
            && self.can_enter(target)
            && self.safe_to_enter(target, direction)
    }

    fn make_move(&mut self, direction: Direction) {
        if !self.is_legal_move(direction) {
            warn!("ignoring illegal move {:?} from {}", direction, self.soldier);
            return;
        }
        self.soldier = self.soldier.moved(direction);
        self.active_cannon = self.active_cannon.other();
    }
}

impl fmt::Display for SoldierState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{},{},{}]",
            self.soldier, self.black_block1, self.black_block2, self.goal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dead_end_state() -> SoldierState {
        // Boxed in at the top-left corner: blocks on both exits.
        SoldierState::with_layout(
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(0, 1),
            Position::new(2, 2),
            Cannon::One,
        )
    }

    #[test]
    fn test_coverage_tables_span_the_board() {
        assert_eq!(COLUMN_COVERAGE.len(), SoldierState::BOARD_SIZE as usize);
        assert_eq!(ROW_COVERAGE.len(), SoldierState::BOARD_SIZE as usize);
        assert!(COLUMN_COVERAGE.iter().all(|&group| group <= 2));
        assert!(ROW_COVERAGE.iter().all(|&group| group <= 2));
    }

    #[test]
    fn test_canonical_layout() {
        let state = SoldierState::new();
        assert_eq!(state.position(SoldierState::SOLDIER), Ok(Position::new(0, 0)));
        assert_eq!(
            state.position(SoldierState::BLACK_BLOCK1),
            Ok(Position::new(13, 13))
        );
        assert_eq!(
            state.position(SoldierState::BLACK_BLOCK2),
            Ok(Position::new(14, 6))
        );
        assert_eq!(state.position(SoldierState::GOAL), Ok(Position::new(14, 14)));
        assert_eq!(state.active_cannon(), Cannon::One);
    }

    #[test]
    fn test_position_rejects_unknown_role() {
        let state = SoldierState::new();
        assert_eq!(state.position(4), Err(PuzzleError::InvalidRole(4)));
        assert_eq!(state.position(99), Err(PuzzleError::InvalidRole(99)));
    }

    #[test]
    fn test_canonical_start_legality() {
        let state = SoldierState::new();
        // Up and Left leave the board.
        assert!(!state.is_legal_move(Direction::Up));
        assert!(!state.is_legal_move(Direction::Left));
        // (0,1) sits on column group 2 while battery one fires.
        assert!(!state.is_legal_move(Direction::Right));
        // (1,0) sits on row group 1, which matches the active battery.
        assert!(state.is_legal_move(Direction::Down));
    }

    #[test]
    fn test_cell_covered_only_by_idle_battery_is_unsafe() {
        // Target (3,1): row 3 is neutral, column 1 belongs to battery two.
        let state = SoldierState::with_layout(
            Position::new(2, 1),
            Position::new(13, 13),
            Position::new(14, 6),
            Position::new(14, 14),
            Cannon::One,
        );
        assert!(!state.is_legal_move(Direction::Down));

        let mut with_two_active = state.clone();
        with_two_active.active_cannon = Cannon::Two;
        assert!(with_two_active.is_legal_move(Direction::Down));
    }

    #[test]
    fn test_black_blocks_block_entry() {
        let state = dead_end_state();
        assert!(!state.is_legal_move(Direction::Down));
        assert!(!state.is_legal_move(Direction::Right));
    }

    #[test]
    fn test_goal_cell_is_not_an_obstacle() {
        // One step above the goal; both lines through (14,14) are neutral.
        let mut state = SoldierState::with_layout(
            Position::new(13, 14),
            Position::new(13, 13),
            Position::new(14, 6),
            Position::new(14, 14),
            Cannon::One,
        );
        assert!(state.is_legal_move(Direction::Down));
        state.make_move(Direction::Down);
        assert!(state.is_solved());
    }

    #[test]
    fn test_make_move_updates_soldier_and_battery_only() {
        let mut state = SoldierState::new();
        state.make_move(Direction::Down);
        assert_eq!(state.soldier(), Position::new(1, 0));
        assert_eq!(state.active_cannon(), Cannon::Two);
        assert_eq!(
            state.position(SoldierState::BLACK_BLOCK1),
            Ok(Position::new(13, 13))
        );
        assert_eq!(
            state.position(SoldierState::BLACK_BLOCK2),
            Ok(Position::new(14, 6))
        );
        assert_eq!(state.goal(), Position::new(14, 14));
    }

    #[test]
    fn test_illegal_move_is_ignored() {
        let mut state = SoldierState::new();
        let before = state.clone();
        state.make_move(Direction::Up);
        assert_eq!(state, before);
        assert_eq!(state.active_cannon(), Cannon::One);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = SoldierState::new();
        let mut copy = original.clone();
        assert_eq!(copy, original);
        copy.make_move(Direction::Down);
        assert_ne!(copy, original);
        assert_eq!(original.soldier(), Position::new(0, 0));
        assert_eq!(original.active_cannon(), Cannon::One);
    }

    #[test]
    fn test_solved_depends_only_on_soldier_and_goal() {
        let solved = SoldierState::with_layout(
            Position::new(14, 14),
            Position::new(13, 13),
            Position::new(14, 6),
            Position::new(14, 14),
            Cannon::Two,
        );
        assert!(solved.is_solved());

        // Solved even when boxed in by blocks.
        let boxed_in = SoldierState::with_layout(
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(0, 1),
            Position::new(0, 0),
            Cannon::One,
        );
        assert!(boxed_in.is_solved());
        assert!(boxed_in.legal_moves().is_empty());

        assert!(!SoldierState::new().is_solved());
    }

    #[test]
    fn test_equality_includes_active_battery() {
        let one = SoldierState::with_layout(
            Position::new(1, 0),
            Position::new(13, 13),
            Position::new(14, 6),
            Position::new(14, 14),
            Cannon::One,
        );
        let two = SoldierState::with_layout(
            Position::new(1, 0),
            Position::new(13, 13),
            Position::new(14, 6),
            Position::new(14, 14),
            Cannon::Two,
        );
        assert_ne!(one, two);

        // The same layout reached by a move compares equal.
        let mut moved = SoldierState::new();
        moved.make_move(Direction::Down);
        assert_eq!(moved, two);
    }

    #[test]
    fn test_equality_covers_every_position() {
        let base = SoldierState::new();
        let other_goal = SoldierState::with_layout(
            Position::new(0, 0),
            Position::new(13, 13),
            Position::new(14, 6),
            Position::new(14, 13),
            Cannon::One,
        );
        assert_ne!(base, other_goal);
        let other_block = SoldierState::with_layout(
            Position::new(0, 0),
            Position::new(12, 13),
            Position::new(14, 6),
            Position::new(14, 14),
            Cannon::One,
        );
        assert_ne!(base, other_block);
    }

    #[test]
    fn test_legal_moves_matches_per_direction_predicate() {
        let mut sampled = vec![SoldierState::new(), dead_end_state()];
        let mut walked = SoldierState::new();
        walked.make_move(Direction::Down);
        sampled.push(walked);

        for state in sampled {
            let from_set: Vec<Direction> = state.legal_moves().to_vec();
            let from_predicate: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|&d| state.is_legal_move(d))
                .collect();
            assert_eq!(from_set, from_predicate);
        }
    }

    #[test]
    fn test_state_json_round_trip() {
        let state = SoldierState::new();
        let json = serde_json::to_string(&state).unwrap();
        let back: SoldierState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_layout_json_defaults_to_battery_one() {
        let json = r#"{
            "soldier": {"row": 0, "col": 0},
            "blackBlock1": {"row": 13, "col": 13},
            "blackBlock2": {"row": 14, "col": 6},
            "goal": {"row": 14, "col": 14}
        }"#;
        let state: SoldierState = serde_json::from_str(json).unwrap();
        assert_eq!(state, SoldierState::new());
    }

    #[test]
    fn test_layout_json_rejects_bad_battery() {
        let json = r#"{
            "soldier": {"row": 0, "col": 0},
            "blackBlock1": {"row": 13, "col": 13},
            "blackBlock2": {"row": 14, "col": 6},
            "goal": {"row": 14, "col": 14},
            "activeCannon": 3
        }"#;
        assert!(serde_json::from_str::<SoldierState>(json).is_err());
    }
}
