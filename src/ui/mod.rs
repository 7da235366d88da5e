pub mod board;
pub mod report;

use kaizo_core::logic::board::Side;
use kaizo_core::logic::game::GameStatus;

pub fn announce(status: GameStatus) -> Option<String> {
    let (reason, winner) = match status {
        GameStatus::Playing => return None,
        GameStatus::ObjectiveCaptured { winner } => ("the objective has fallen", winner),
        GameStatus::NoMoves { winner } => ("no more pieces to move", winner),
    };
    let verdict = match winner {
        Side::Human => "You win",
        Side::Computer => "I win",
    };
    Some(format!("Game Over: {reason}. {verdict}!"))
}
