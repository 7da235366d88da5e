use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Side};
use std::sync::Arc;

/// Scores a position from the computer's point of view by counting captures.
///
/// Positional and mobility terms were tried and played worse, so material is
/// all there is.
pub struct MaterialEvaluator {
    config: Arc<EngineConfig>,
}

impl MaterialEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }
}

impl Evaluator for MaterialEvaluator {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn evaluate(&self, board: &Board) -> i32 {
        let human_lost = board.captured_count(Side::Human) as i32;
        let computer_lost = board.captured_count(Side::Computer) as i32;
        human_lost * self.config.human_capture_value
            - computer_lost * self.config.computer_capture_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::Coord;

    #[test]
    fn test_material_balance() {
        let evaluator = MaterialEvaluator::new(Arc::new(EngineConfig::default()));
        assert_eq!(evaluator.evaluate(&Board::new()), 0);

        // Empty board: all sixteen units are off the board.
        assert_eq!(evaluator.evaluate(&Board::empty()), 8 - 16);

        let mut board = Board::empty();
        for unit in 0..7 {
            board.place_unit(unit, Coord::new(6, unit).unwrap());
        }
        // Units 0..=6 are back, unit 7 plus every computer unit is still missing.
        assert_eq!(evaluator.evaluate(&board), 1 - 16);
    }

    #[test]
    fn test_custom_weights() {
        let config = EngineConfig {
            human_capture_value: 3,
            computer_capture_value: 5,
            ..EngineConfig::default()
        };
        let evaluator = MaterialEvaluator::new(Arc::new(config));
        let mut board = Board::new();
        let mv = crate::engine::Move::new(
            Coord::new(4, 1).unwrap(),
            Coord::new(2, 1).unwrap(),
            1,
        );
        // Drop a human unit onto a computer unit's square to force a capture.
        board.apply(&mv);
        assert_eq!(evaluator.evaluate(&board), -5);
    }
}
