use crate::engine::config::{EngineConfig, MAX_SEARCH_DEPTH};
use crate::engine::eval::MaterialEvaluator;
use crate::engine::move_list::MoveList;
use crate::engine::{Evaluator, SearchOutcome, SearchStats, Searcher};
use crate::logic::board::{Board, Side};
use crate::logic::game::{GameState, GameStatus};
use crate::logic::generator::generate_moves;
use crate::logic::rules::LateralMemory;
use log::{debug, trace};
use std::sync::Arc;

/// The mutable state a search walks: the board plus the lateral memory.
///
/// Every node restores both before returning, so the position a search ends
/// with is the one it started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub memory: LateralMemory,
}

impl Position {
    pub fn from_state(game_state: &GameState) -> Self {
        Self {
            board: game_state.board.clone(),
            memory: game_state.memory,
        }
    }
}

/// Fixed-depth minimax with alpha-beta pruning. The computer maximizes.
pub struct MinimaxEngine {
    config: Arc<EngineConfig>,
    evaluator: MaterialEvaluator,
    // One move list per ply, reused across the whole search.
    arena: Vec<MoveList>,
    nodes_searched: u64,
}

impl MinimaxEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: MaterialEvaluator::new(config.clone()),
            config,
            arena: vec![MoveList::new(); usize::from(MAX_SEARCH_DEPTH) + 1],
            nodes_searched: 0,
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        self.evaluator = MaterialEvaluator::new(config.clone());
        self.config = config;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub const fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    fn ceiling(&self) -> u8 {
        self.config.max_depth.min(MAX_SEARCH_DEPTH)
    }

    fn win_score(&self, depth: u8) -> i32 {
        self.config.above_best - (1 + i32::from(depth))
    }

    fn loss_score(&self, depth: u8) -> i32 {
        self.config.below_worst + 1 + i32::from(depth)
    }

    /// Picks the move for the side to move. Scores are always from the
    /// computer's point of view, so a human root minimizes.
    pub fn best_move(&mut self, game_state: &GameState) -> Option<SearchOutcome> {
        self.nodes_searched = 0;
        if game_state.status != GameStatus::Playing {
            return None;
        }

        let side = game_state.turn;
        let mut pos = Position::from_state(game_state);
        pos.memory.begin_turn(side);
        let turn_memory = pos.memory;
        generate_moves(&pos.board, &turn_memory, side, &mut self.arena[0]);

        let count = self.arena[0].len();
        let mut best_score = match side {
            Side::Computer => self.config.below_worst,
            Side::Human => self.config.above_best,
        };
        let mut best_index = None;

        for index in 0..count {
            let Some(mv) = self.arena[0].get(index) else {
                break;
            };
            if self.arena[0].is_lateral(index) {
                pos.memory.mark_lateral(side);
            }

            let record = pos.board.apply(&mv);
            let score = match side {
                Side::Computer => self.min_node(&mut pos, 1, best_score),
                Side::Human => self.max_node(&mut pos, 1, best_score),
            };
            pos.board.undo(&record);
            pos.memory = turn_memory;
            trace!("root {mv} scored {score}");

            let better = match side {
                Side::Computer => score > best_score,
                Side::Human => score < best_score,
            };
            if better || best_index.is_none() {
                best_score = score;
                best_index = Some(index);
            }
        }
        debug_assert_eq!(pos.board, game_state.board);

        let mv = self.arena[0].get(best_index?)?;
        let stats = SearchStats {
            depth: self.ceiling(),
            nodes: self.nodes_searched,
        };
        debug!(
            "{side:?} picks {mv} (score {best_score}, {count} candidates, {} nodes)",
            stats.nodes
        );
        Some(SearchOutcome {
            mv,
            score: best_score,
            stats,
        })
    }

    /// Computer to move. Stops exploring siblings once `beta` is reached.
    pub fn max_node(&mut self, pos: &mut Position, depth: u8, beta: i32) -> i32 {
        self.nodes_searched += 1;
        if depth >= self.ceiling() {
            return self.evaluator.evaluate(&pos.board);
        }
        if pos.board.any_objective_captured() {
            return self.loss_score(depth);
        }

        let saved = pos.memory;
        pos.memory.begin_turn(Side::Computer);
        let turn_memory = pos.memory;
        let slot = usize::from(depth);
        generate_moves(&pos.board, &turn_memory, Side::Computer, &mut self.arena[slot]);

        let count = self.arena[slot].len();
        trace!("max node at depth {depth}: {count} moves");
        if count == 0 {
            pos.memory = saved;
            return self.loss_score(depth);
        }

        let mut best = self.config.below_worst;
        for index in 0..count {
            let Some(mv) = self.arena[slot].get(index) else {
                break;
            };
            if self.arena[slot].is_lateral(index) {
                pos.memory.mark_lateral(Side::Computer);
            }

            let record = pos.board.apply(&mv);
            let score = self.min_node(pos, depth + 1, best);
            pos.board.undo(&record);
            pos.memory = turn_memory;

            best = best.max(score);
            if best >= beta {
                break;
            }
        }

        pos.memory = saved;
        best
    }

    /// Human to move. Stops exploring siblings once `alpha` is reached.
    pub fn min_node(&mut self, pos: &mut Position, depth: u8, alpha: i32) -> i32 {
        self.nodes_searched += 1;
        if depth >= self.ceiling() {
            return self.evaluator.evaluate(&pos.board);
        }
        if pos.board.any_objective_captured() {
            return self.win_score(depth);
        }

        let saved = pos.memory;
        pos.memory.begin_turn(Side::Human);
        let turn_memory = pos.memory;
        let slot = usize::from(depth);
        generate_moves(&pos.board, &turn_memory, Side::Human, &mut self.arena[slot]);

        let count = self.arena[slot].len();
        trace!("min node at depth {depth}: {count} moves");
        if count == 0 {
            pos.memory = saved;
            return self.win_score(depth);
        }

        let mut worst = self.config.above_best;
        for index in 0..count {
            let Some(mv) = self.arena[slot].get(index) else {
                break;
            };
            if self.arena[slot].is_lateral(index) {
                pos.memory.mark_lateral(Side::Human);
            }

            let record = pos.board.apply(&mv);
            let score = self.max_node(pos, depth + 1, worst);
            pos.board.undo(&record);
            pos.memory = turn_memory;

            worst = worst.min(score);
            if worst <= alpha {
                break;
            }
        }

        pos.memory = saved;
        worst
    }
}

impl Searcher for MinimaxEngine {
    fn search(&mut self, game_state: &GameState) -> Option<SearchOutcome> {
        self.best_move(game_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::Coord;

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col).unwrap()
    }

    fn engine(depth: u8) -> MinimaxEngine {
        MinimaxEngine::new(Arc::new(EngineConfig::default().with_depth(depth)))
    }

    #[test]
    fn test_search_leaves_game_untouched() {
        let game = GameState::new(Side::Computer);
        let mut engine = engine(3);
        let outcome = engine.search(&game).unwrap();

        assert_eq!(game.board, Board::new());
        assert!(game
            .legal_moves()
            .find(outcome.mv.origin(), outcome.mv.destination())
            .is_some());
        assert_eq!(outcome.stats.depth, 3);
        assert!(outcome.stats.nodes > 16);
        assert_eq!(outcome.stats.nodes, engine.nodes_searched());
    }

    #[test]
    fn test_takes_last_enemy_unit() {
        let mut board = Board::empty();
        board.place_unit(12, c(0, 0));
        board.place_unit(4, c(0, 6));
        let game = GameState::from_board(board, Side::Computer);

        let outcome = engine(3).best_move(&game).unwrap();
        assert_eq!(outcome.mv.origin(), c(0, 0));
        assert_eq!(outcome.mv.destination(), c(0, 6));
        // The human is left without moves one ply down.
        assert_eq!(outcome.score, 256 - 2);
    }

    #[test]
    fn test_takes_the_objective() {
        let mut board = Board::empty();
        board.place_unit(12, c(6, 3));
        board.place_unit(4, c(0, 0));
        let game = GameState::from_board(board, Side::Computer);

        let outcome = engine(4).best_move(&game).unwrap();
        assert_eq!(outcome.mv.destination(), c(5, 3));
        assert_eq!(outcome.score, 256 - 2);
    }

    #[test]
    fn test_human_root_minimizes() {
        let mut board = Board::empty();
        board.place_unit(4, c(0, 3));
        board.place_unit(15, c(6, 6));
        let game = GameState::from_board(board, Side::Human);

        let outcome = engine(4).best_move(&game).unwrap();
        assert_eq!(outcome.mv.destination(), c(1, 3));
        assert_eq!(outcome.score, -256 + 2);
    }

    #[test]
    fn test_finished_game_has_no_move() {
        let mut board = Board::empty();
        board.place_unit(0, c(4, 0));
        let game = GameState::from_board(board, Side::Computer);
        assert!(engine(2).best_move(&game).is_none());
    }

    #[test]
    fn test_update_config_changes_ceiling() {
        let mut engine = engine(1);
        let game = GameState::new(Side::Computer);
        let shallow = engine.best_move(&game).unwrap();
        assert_eq!(shallow.stats.depth, 1);
        assert_eq!(shallow.stats.nodes, 16);

        engine.update_config(Arc::new(EngineConfig::default().with_depth(2)));
        let deeper = engine.best_move(&game).unwrap();
        assert_eq!(engine.config().max_depth, 2);
        assert_eq!(deeper.stats.depth, 2);
        assert!(deeper.stats.nodes > shallow.stats.nodes);
    }

    #[test]
    fn test_inner_nodes_are_traced() {
        crate::log_capture::install();
        engine(3).best_move(&GameState::new(Side::Computer)).unwrap();
        assert!(crate::log_capture::contains(
            log::Level::Trace,
            "min node at depth 1: "
        ));
        assert!(crate::log_capture::contains(
            log::Level::Trace,
            "max node at depth 2: "
        ));
    }

    #[test]
    fn test_leaf_is_material() {
        let mut engine = engine(1);
        let mut pos = Position::from_state(&GameState::default());
        // Depth 1 is already the ceiling.
        assert_eq!(engine.min_node(&mut pos, 1, i32::MIN), 0);
        assert_eq!(engine.nodes_searched(), 1);
    }
}
