use kaizo_core::engine::move_list::MoveList;
use kaizo_core::logic::board::Board;
use std::fmt::Write;

const MOVES_PER_LINE: usize = 8;

/// Board diagram, with the destinations in `hints` marked when given.
pub fn render(board: &Board, hints: Option<&MoveList>) -> String {
    hints.map_or_else(
        || board.render(),
        |moves| {
            let mut overlay = board.clone();
            overlay.show_hints(moves);
            overlay.render()
        },
    )
}

pub fn move_listing(moves: &MoveList) -> String {
    let mut out = format!("Legal moves ({}):", moves.len());
    for (i, mv) in moves.iter().enumerate() {
        out.push(if i % MOVES_PER_LINE == 0 { '\n' } else { ' ' });
        let _ = write!(out, "{mv}");
    }
    out.push('\n');
    out
}
