use crate::engine::move_list::MoveList;
use crate::engine::Move;
use crate::logic::board::{unit_kind, unit_side, Board, Cell, Coord, Side, UnitKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("square is outside the board")]
    OutOfBounds,
    #[error("there is no unit on that square")]
    NoUnitAtSource,
    #[error("that unit belongs to the other side")]
    NotYourUnit,
    #[error("a unit has to leave its square")]
    NullMove,
    #[error("walls cannot be captured")]
    WallTarget,
    #[error("diagonal movers move along diagonals only")]
    NotDiagonal,
    #[error("orthogonal movers move along a row or column only")]
    NotStraight,
    #[error("the path is blocked")]
    PathBlocked,
    #[error("cannot capture your own piece")]
    OwnPieceTarget,
    #[error("cannot move backwards without capturing")]
    BackwardWithoutCapture,
    #[error("cannot move sideways two turns in a row")]
    LateralCooldown,
    #[error("the objective can only be taken from the squares in front of it")]
    ObjectiveOutOfReach,
    #[error("the game is over")]
    GameOver,
}

impl TryFrom<(usize, usize)> for Coord {
    type Error = MoveError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(row, col).ok_or(MoveError::OutOfBounds)
    }
}

/// Per-side cooldown of the orthogonal movers' sideways moves.
///
/// Every turn of a side, real or searched, starts with [`LateralMemory::begin_turn`].
/// A lateral move sets the counter to 2, so it is still blocked on the side's
/// next turn and free again on the one after.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateralMemory {
    cooldown: [u8; 2],
}

impl LateralMemory {
    pub const fn new() -> Self {
        Self { cooldown: [0; 2] }
    }

    pub fn begin_turn(&mut self, side: Side) {
        let counter = &mut self.cooldown[side.index()];
        *counter = counter.saturating_sub(1);
    }

    pub const fn is_blocked(&self, side: Side) -> bool {
        self.cooldown[side.index()] >= 1
    }

    pub fn mark_lateral(&mut self, side: Side) {
        self.cooldown[side.index()] = 2;
    }

    pub const fn cooldown(&self, side: Side) -> u8 {
        self.cooldown[side.index()]
    }
}

/// Walks from the unit on `from` towards `to`, recording every admissible stop
/// into `list`, and returns the verdict for `to` itself.
///
/// `Ok` does not guarantee that `to` was recorded: a walk that captures before
/// reaching `to` stops there. Use [`check_move`] for an exact answer.
pub fn submit(
    board: &Board,
    memory: &LateralMemory,
    from: Coord,
    to: Coord,
    list: &mut MoveList,
) -> Result<(), MoveError> {
    let unit = board.unit_at(from).ok_or(MoveError::NoUnitAtSource)?;
    submit_unit(board, memory, unit, to, list)
}

pub(crate) fn submit_unit(
    board: &Board,
    memory: &LateralMemory,
    unit: usize,
    to: Coord,
    list: &mut MoveList,
) -> Result<(), MoveError> {
    let from = board.position_of(unit).ok_or(MoveError::NoUnitAtSource)?;
    if from == to {
        return Err(MoveError::NullMove);
    }
    if matches!(board.cell(to), Cell::Wall(_)) {
        return Err(MoveError::WallTarget);
    }

    let walk = Walk {
        board,
        side: unit_side(unit),
        kind: unit_kind(unit),
        unit,
        from,
        to,
    };
    match walk.kind {
        UnitKind::TypeOne => walk.diagonal(list),
        UnitKind::TypeTwo if from.row == to.row => {
            if memory.is_blocked(walk.side) {
                return Err(MoveError::LateralCooldown);
            }
            walk.lateral(list)
        }
        UnitKind::TypeTwo if from.col == to.col => walk.vertical(list),
        UnitKind::TypeTwo => Err(MoveError::NotStraight),
    }
}

/// Full legality check of a single move for `side`, with `memory` already
/// advanced to the start of that side's turn.
pub fn check_move(
    board: &Board,
    memory: &LateralMemory,
    side: Side,
    from: Coord,
    to: Coord,
) -> Result<(), MoveError> {
    let unit = board.unit_at(from).ok_or(MoveError::NoUnitAtSource)?;
    if unit_side(unit) != side {
        return Err(MoveError::NotYourUnit);
    }
    let mut scratch = MoveList::new();
    submit_unit(board, memory, unit, to, &mut scratch)?;
    scratch
        .find(from, to)
        .map(|_| ())
        .ok_or(MoveError::PathBlocked)
}

/// True when a unit of `kind` standing on `from` may strike the enemy objective.
pub fn can_take_objective(side: Side, kind: UnitKind, from: Coord) -> bool {
    let objective = side.opposite().objective();
    from.row == side.siege_row()
        && match kind {
            UnitKind::TypeOne => from.col.abs_diff(objective.col) == 1,
            UnitKind::TypeTwo => from.col == objective.col,
        }
}

struct Walk<'a> {
    board: &'a Board,
    side: Side,
    kind: UnitKind,
    unit: usize,
    from: Coord,
    to: Coord,
}

impl Walk<'_> {
    fn record(&self, at: Coord, list: &mut MoveList) {
        list.push(Move::new(self.from, at, self.unit));
    }

    fn diagonal(&self, list: &mut MoveList) -> Result<(), MoveError> {
        let rows = i16::from(self.to.row) - i16::from(self.from.row);
        let cols = i16::from(self.to.col) - i16::from(self.from.col);
        if rows.abs() != cols.abs() {
            return Err(MoveError::NotDiagonal);
        }
        self.straight_line(step_of(rows), step_of(cols), list)
    }

    fn vertical(&self, list: &mut MoveList) -> Result<(), MoveError> {
        let rows = i16::from(self.to.row) - i16::from(self.from.row);
        self.straight_line(step_of(rows), 0, list)
    }

    /// Shared walk of diagonal and vertical moves. Vacant squares are stops
    /// unless the walk goes backwards; the first enemy ends the walk with a
    /// capture.
    fn straight_line(
        &self,
        row_step: i8,
        col_step: i8,
        list: &mut MoveList,
    ) -> Result<(), MoveError> {
        let backward = row_step == self.side.backward_step();
        let mut at = self
            .from
            .step(row_step, col_step)
            .ok_or(MoveError::OutOfBounds)?;

        while at != self.to {
            let cell = self.board.cell(at);
            if cell.is_vacant() {
                if !backward {
                    self.record(at, list);
                }
            } else if cell.is_enemy_unit(self.side) {
                self.record(at, list);
                return Ok(());
            } else if cell.is_enemy_objective(self.side) {
                return self.take_objective(at, list);
            } else {
                return Err(MoveError::PathBlocked);
            }
            at = at.step(row_step, col_step).ok_or(MoveError::OutOfBounds)?;
        }

        let cell = self.board.cell(self.to);
        if cell.is_friendly(self.side) {
            Err(MoveError::OwnPieceTarget)
        } else if cell.is_enemy_objective(self.side) {
            self.take_objective(self.to, list)
        } else if backward && !cell.is_enemy_unit(self.side) {
            Err(MoveError::BackwardWithoutCapture)
        } else {
            self.record(self.to, list);
            Ok(())
        }
    }

    fn lateral(&self, list: &mut MoveList) -> Result<(), MoveError> {
        let col_step = step_of(i16::from(self.to.col) - i16::from(self.from.col));
        let mut at = self.from.step(0, col_step).ok_or(MoveError::OutOfBounds)?;

        while at != self.to {
            let cell = self.board.cell(at);
            if cell.is_vacant() {
                list.push_lateral(Move::new(self.from, at, self.unit));
            } else if cell.is_enemy_unit(self.side) {
                list.push_lateral(Move::new(self.from, at, self.unit));
                return Ok(());
            } else {
                return Err(MoveError::PathBlocked);
            }
            at = at.step(0, col_step).ok_or(MoveError::OutOfBounds)?;
        }

        let cell = self.board.cell(self.to);
        if cell.is_friendly(self.side) {
            Err(MoveError::OwnPieceTarget)
        } else if cell.is_enemy_objective(self.side) {
            Err(MoveError::ObjectiveOutOfReach)
        } else {
            list.push_lateral(Move::new(self.from, self.to, self.unit));
            Ok(())
        }
    }

    // Capturing the objective ends the walk either way.
    fn take_objective(&self, at: Coord, list: &mut MoveList) -> Result<(), MoveError> {
        if can_take_objective(self.side, self.kind, self.from) {
            self.record(at, list);
            Ok(())
        } else {
            Err(MoveError::ObjectiveOutOfReach)
        }
    }
}

const fn step_of(delta: i16) -> i8 {
    if delta < 0 {
        -1
    } else {
        1
    }
}
