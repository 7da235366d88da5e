use kaizo_core::engine::SearchOutcome;
use kaizo_core::logic::board::{Coord, BOARD_SIZE};
use serde::Serialize;
use std::fmt;

/// What the computer tells the player after it moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputerMoveReport {
    pub notation: String,
    /// The same move named from the computer's side of the board.
    pub mirrored: String,
    pub score: i32,
    pub nodes: u64,
    pub depth: u8,
}

fn mirrored_square(at: Coord) -> String {
    let file = char::from(b'G' - at.col);
    let rank = usize::from(at.row) + 1;
    debug_assert!(rank <= BOARD_SIZE);
    format!("{file}{rank}")
}

impl ComputerMoveReport {
    pub fn new(outcome: &SearchOutcome) -> Self {
        let mv = outcome.mv;
        Self {
            notation: mv.to_string(),
            mirrored: format!(
                "{}{}",
                mirrored_square(mv.origin()),
                mirrored_square(mv.destination())
            ),
            score: outcome.score,
            nodes: outcome.stats.nodes,
            depth: outcome.stats.depth,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for ComputerMoveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Computer moves {} ({}) [score {}, {} nodes, depth {}]",
            self.notation, self.mirrored, self.score, self.nodes, self.depth
        )
    }
}
