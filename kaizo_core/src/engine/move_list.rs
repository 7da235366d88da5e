use crate::engine::Move;
use crate::logic::board::Coord;
use std::ops::Index;

// 4 diagonal movers reach at most 8 squares each and 4 orthogonal movers
// at most 13 each. 84 is the exact worst case.
pub const MAX_MOVES: usize = 84;
// Orthogonal movers have at most 6 lateral stops each.
pub const MAX_LATERAL: usize = 24;

/// Candidate moves for one side at one search depth, plus the indices of the
/// candidates that are lateral orthogonal moves.
#[derive(Debug, Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    count: usize,
    lateral: [u8; MAX_LATERAL],
    lateral_count: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self {
            moves: [Move::default(); MAX_MOVES],
            count: 0,
            lateral: [0; MAX_LATERAL],
            lateral_count: 0,
        }
    }
}

impl MoveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn clear(&mut self) {
        self.count = 0;
        self.lateral_count = 0;
    }

    pub fn push(&mut self, mv: Move) {
        if let Some(slot) = self.moves.get_mut(self.count) {
            *slot = mv;
            self.count += 1;
        } else {
            debug_assert!(false, "MoveList overflow! Max moves: {MAX_MOVES}");
        }
    }

    /// Pushes a sideways orthogonal move and remembers its index.
    pub fn push_lateral(&mut self, mv: Move) {
        let index = self.count;
        self.push(mv);
        if let Some(slot) = self.lateral.get_mut(self.lateral_count) {
            *slot = u8::try_from(index).unwrap_or(u8::MAX);
            self.lateral_count += 1;
        } else {
            debug_assert!(false, "lateral list overflow! Max: {MAX_LATERAL}");
        }
    }

    pub fn is_lateral(&self, index: usize) -> bool {
        self.lateral
            .get(0..self.lateral_count)
            .unwrap_or(&[])
            .iter()
            .any(|&i| usize::from(i) == index)
    }

    pub const fn len(&self) -> usize {
        self.count
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn get(&self, index: usize) -> Option<Move> {
        self.as_slice().get(index).copied()
    }

    pub fn as_slice(&self) -> &[Move] {
        self.moves.get(0..self.count).unwrap_or(&[])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Index of the candidate going from `from` to `to`.
    pub fn find(&self, from: Coord, to: Coord) -> Option<usize> {
        self.iter()
            .position(|mv| mv.origin() == from && mv.destination() == to)
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    // Out-of-range reads land on slot 0 rather than panicking.
    fn index(&self, index: usize) -> &Self::Output {
        self.as_slice()
            .get(index)
            .unwrap_or(&self.moves[0])
    }
}
