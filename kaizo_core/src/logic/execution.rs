use crate::engine::Move;
use crate::logic::board::{unit_cell, Board, Cell, UNIT_COUNT};
use serde::{Deserialize, Serialize};

/// Everything [`Board::undo`] needs to take a move back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub origin_cell: Cell,
    pub dest_cell: Cell,
    pub captured: Option<u8>,
    pub prev_capture_seq: u32,
}

impl Board {
    /// Moves a unit without any legality check and returns the undo record.
    pub fn apply(&mut self, mv: &Move) -> MoveRecord {
        let (from, to) = (mv.origin(), mv.destination());
        let mut record = MoveRecord {
            mv: *mv,
            origin_cell: self.cell(from),
            dest_cell: self.cell(to),
            captured: None,
            prev_capture_seq: self.captures().next_order(),
        };

        self.relocate(mv.unit(), to);
        let victim = (0..UNIT_COUNT)
            .find(|&unit| unit != mv.unit() && self.position_of(unit) == Some(to));
        if let Some(victim) = victim {
            self.captures_mut().capture(victim);
            record.captured = u8::try_from(victim).ok();
        }

        self.set_cell(to, record.origin_cell);
        self.set_cell(from, Cell::Empty);
        record
    }

    pub fn undo(&mut self, record: &MoveRecord) {
        let (from, to) = (record.mv.origin(), record.mv.destination());
        self.relocate(record.mv.unit(), from);

        match record.captured.map(usize::from) {
            Some(victim) => {
                debug_assert!(
                    !self.captures().is_sealed(victim),
                    "undo would revive a committed capture"
                );
                self.captures_mut().release(victim);
                self.set_cell(to, unit_cell(victim));
            }
            None => self.set_cell(to, record.dest_cell),
        }

        self.set_cell(from, record.origin_cell);
        self.captures_mut().rewind(record.prev_capture_seq);
        self.restore_objectives();
    }
}
