use crate::engine::move_list::MoveList;
use crate::logic::board::{unit_kind, Board, Coord, Side, UnitKind, BOARD_SIZE};
use crate::logic::rules::{submit_unit, LateralMemory};

const LAST: u8 = (BOARD_SIZE - 1) as u8;

/// Fills `list` with every legal move of `side`.
///
/// Each unit submits the far ends of its rays; the rules record every stop
/// along the way, so four submissions cover a unit's full reach. `memory` must
/// already be advanced to the start of the side's turn.
pub fn generate_moves(board: &Board, memory: &LateralMemory, side: Side, list: &mut MoveList) {
    list.clear();
    for unit in side.units() {
        let Some(from) = board.position_of(unit) else {
            continue;
        };
        let endpoints = match unit_kind(unit) {
            UnitKind::TypeOne => diagonal_endpoints(from),
            UnitKind::TypeTwo => straight_endpoints(from),
        };
        for to in endpoints {
            // Rejections only mean the ray ended early.
            let _ = submit_unit(board, memory, unit, to, list);
        }
    }
}

pub fn has_moves(board: &Board, memory: &LateralMemory, side: Side) -> bool {
    let mut list = MoveList::new();
    generate_moves(board, memory, side, &mut list);
    !list.is_empty()
}

/// Where the four diagonals through `at` leave the board, in the order
/// up-left, down-right, up-right, down-left.
///
/// An endpoint equals `at` itself when the unit stands on that edge.
pub const fn diagonal_endpoints(at: Coord) -> [Coord; 4] {
    let (r, c) = (at.row, at.col);
    let (up_left, down_right) = if c <= r {
        (Coord::at(r - c, 0), Coord::at(LAST, c + (LAST - r)))
    } else {
        (Coord::at(0, c - r), Coord::at(r + (LAST - c), LAST))
    };
    let (up_right, down_left) = if c <= LAST - r {
        (Coord::at(0, c + r), Coord::at(r + c, 0))
    } else {
        (Coord::at(r - (LAST - c), LAST), Coord::at(LAST, c - (LAST - r)))
    };
    [up_left, down_right, up_right, down_left]
}

const fn straight_endpoints(at: Coord) -> [Coord; 4] {
    [
        Coord::at(at.row, 0),
        Coord::at(at.row, LAST),
        Coord::at(0, at.col),
        Coord::at(LAST, at.col),
    ]
}
