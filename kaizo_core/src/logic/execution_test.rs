#[cfg(test)]
mod tests {
    use crate::engine::move_list::MoveList;
    use crate::engine::Move;
    use crate::logic::board::{Board, Cell, CaptureLedger, Coord, Side, UnitKind};
    use crate::logic::generator::generate_moves;
    use crate::logic::rules::LateralMemory;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn test_apply_undo_every_opening_move() {
        let board = Board::new();
        for side in [Side::Human, Side::Computer] {
            let mut list = MoveList::new();
            generate_moves(&board, &LateralMemory::new(), side, &mut list);
            for mv in &list {
                let mut scratch = board.clone();
                let record = scratch.apply(mv);
                assert_eq!(scratch.position_of(mv.unit()), Some(mv.destination()));
                assert_eq!(scratch.cell(mv.origin()), Cell::Empty);
                assert_eq!(record.captured, None);
                scratch.undo(&record);
                assert_eq!(scratch, board, "{mv:?}");
            }
        }
    }

    #[test]
    fn test_capture_and_resurrect() {
        let mut board = Board::empty();
        board.place_unit(0, c(3, 3));
        board.place_unit(13, c(2, 2));
        let before = board.clone();

        let record = board.apply(&Move::new(c(3, 3), c(2, 2), 0));
        assert_eq!(record.captured, Some(13));
        assert!(!board.is_alive(13));
        assert_eq!(board.captures().order(13), 1);
        assert_eq!(board.cell(c(2, 2)), Cell::Unit(Side::Human, UnitKind::TypeOne));
        assert_eq!(board.unit_at(c(2, 2)), Some(0));
        // Units never placed on an empty board already count as captured.
        assert_eq!(
            board.captured_count(Side::Computer),
            before.captured_count(Side::Computer) + 1
        );
        assert_eq!(board.captured_count(Side::Computer), 8);

        board.undo(&record);
        assert_eq!(board, before);
        assert_eq!(board.cell(c(2, 2)), Cell::Unit(Side::Computer, UnitKind::TypeTwo));
        assert_eq!(board.captures().next_order(), 1);
    }

    #[test]
    fn test_objective_capture_is_undone() {
        let mut board = Board::empty();
        board.place_unit(4, c(0, 3));
        let before = board.clone();

        let record = board.apply(&Move::new(c(0, 3), c(1, 3), 4));
        assert!(board.objective_captured(Side::Computer));
        assert!(!board.objective_captured(Side::Human));
        assert_eq!(record.dest_cell, Cell::Objective(Side::Computer));
        assert_eq!(record.captured, None);

        board.undo(&record);
        assert_eq!(board, before);
        assert!(!board.any_objective_captured());
    }

    #[test]
    fn test_hint_cells_survive_undo() {
        let mut board = Board::new();
        let mut list = MoveList::new();
        generate_moves(&board, &LateralMemory::new(), Side::Human, &mut list);
        board.show_hints(&list);
        let before = board.clone();

        let mv = list[0];
        assert_eq!(board.cell(mv.destination()), Cell::Hint);
        let record = board.apply(&mv);
        board.undo(&record);
        assert_eq!(board, before);
    }

    #[test]
    fn test_committed_captures_are_sealed() {
        let mut board = Board::empty();
        board.place_unit(0, c(3, 3));
        board.place_unit(13, c(2, 2));
        board.place_unit(9, c(0, 0));
        board.apply(&Move::new(c(3, 3), c(2, 2), 0));
        board.seal_captures();
        assert!(board.captures().is_sealed(13));

        // A later speculative capture gets a fresh, unsealed order.
        let before = board.clone();
        let record = board.apply(&Move::new(c(0, 0), c(2, 2), 9));
        assert_eq!(record.captured, Some(0));
        assert!(board.captures().order(0) < CaptureLedger::SEAL_FACTOR);
        assert!(!board.is_alive(13));
        board.undo(&record);
        assert_eq!(board, before);
    }

    #[test]
    fn test_random_walks_unwind_exactly() {
        let mut rng = StdRng::seed_from_u64(0x4b41_495a);
        for _ in 0..50 {
            let mut board = Board::new();
            let mut memory = LateralMemory::new();
            let mut side = Side::Human;
            let mut trail = Vec::new();
            let mut list = MoveList::new();

            for _ in 0..40 {
                memory.begin_turn(side);
                generate_moves(&board, &memory, side, &mut list);
                if list.is_empty() {
                    break;
                }
                let index = rng.gen_range(0..list.len());
                if list.is_lateral(index) {
                    memory.mark_lateral(side);
                }
                let snapshot = board.clone();
                let record = board.apply(&list[index]);
                trail.push((snapshot, record));
                if board.any_objective_captured() {
                    break;
                }
                side = side.opposite();
            }

            while let Some((snapshot, record)) = trail.pop() {
                board.undo(&record);
                assert_eq!(board, snapshot);
            }
            assert_eq!(board, Board::new());
        }
    }
}
