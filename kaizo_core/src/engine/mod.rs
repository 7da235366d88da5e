use crate::logic::board::{Board, Coord};
use crate::logic::game::GameState;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod eval;
pub mod move_list;
pub mod search;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Move {
    pub from_row: u8,
    pub from_col: u8,
    pub to_row: u8,
    pub to_col: u8,
    /// Stable index of the moving unit.
    pub unit: u8,
}

impl Move {
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(from: Coord, to: Coord, unit: usize) -> Self {
        Self {
            from_row: from.row,
            from_col: from.col,
            to_row: to.row,
            to_col: to.col,
            unit: unit as u8,
        }
    }

    pub const fn origin(&self) -> Coord {
        Coord {
            row: self.from_row,
            col: self.from_col,
        }
    }

    pub const fn destination(&self) -> Coord {
        Coord {
            row: self.to_row,
            col: self.to_col,
        }
    }

    pub const fn unit(&self) -> usize {
        self.unit as usize
    }

    pub const fn is_lateral(&self) -> bool {
        self.from_row == self.to_row
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin(), self.destination())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
}

/// A move chosen by the search and the score it was backed up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub mv: Move,
    pub score: i32,
    pub stats: SearchStats,
}

pub trait Evaluator {
    fn evaluate(&self, board: &Board) -> i32;
}

pub trait Searcher {
    /// Picks a move for the side to move, `None` when it has no moves.
    fn search(&mut self, game_state: &GameState) -> Option<SearchOutcome>;
}
