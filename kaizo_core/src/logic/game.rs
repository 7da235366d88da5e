use crate::engine::move_list::MoveList;
use crate::engine::Move;
use crate::logic::board::{unit_side, Board, Coord, Side};
use crate::logic::execution::MoveRecord;
use crate::logic::generator::generate_moves;
use crate::logic::rules::{check_move, LateralMemory, MoveError};
use log::{debug, info};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    ObjectiveCaptured { winner: Side },
    NoMoves { winner: Side },
}

impl GameStatus {
    pub const fn winner(self) -> Option<Side> {
        match self {
            Self::Playing => None,
            Self::ObjectiveCaptured { winner } | Self::NoMoves { winner } => Some(winner),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Side,
    pub status: GameStatus,
    pub memory: LateralMemory,
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Side::Human)
    }
}

impl GameState {
    #[must_use]
    pub fn new(first: Side) -> Self {
        Self {
            board: Board::new(),
            turn: first,
            status: GameStatus::Playing,
            memory: LateralMemory::new(),
            history: Vec::new(),
        }
    }

    /// Starts a game from an arbitrary position.
    #[must_use]
    pub fn from_board(board: Board, turn: Side) -> Self {
        let mut state = Self {
            board,
            turn,
            ..Self::new(turn)
        };
        state.update_status();
        state
    }

    /// Lateral memory as it stands at the start of the side to move's turn.
    pub fn turn_memory(&self) -> LateralMemory {
        let mut memory = self.memory;
        memory.begin_turn(self.turn);
        memory
    }

    pub fn legal_moves(&self) -> MoveList {
        let mut list = MoveList::new();
        generate_moves(&self.board, &self.turn_memory(), self.turn, &mut list);
        list
    }

    pub fn make_move(&mut self, from: Coord, to: Coord) -> Result<Move, MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::GameOver);
        }

        let memory = self.turn_memory();
        let mut list = MoveList::new();
        generate_moves(&self.board, &memory, self.turn, &mut list);
        debug!("{:?} has {} legal moves", self.turn, list.len());

        let Some(index) = list.find(from, to) else {
            let reason = check_move(&self.board, &memory, self.turn, from, to)
                .err()
                .unwrap_or(MoveError::PathBlocked);
            debug!("{:?} rejected {from}{to}: {reason}", self.turn);
            return Err(reason);
        };

        let mv = list[index];
        self.commit_turn(memory, mv, list.is_lateral(index));
        Ok(mv)
    }

    /// Plays a move picked by the engine.
    pub fn commit(&mut self, mv: &Move) -> Result<Move, MoveError> {
        self.make_move(mv.origin(), mv.destination())
    }

    fn commit_turn(&mut self, mut memory: LateralMemory, mv: Move, lateral: bool) {
        debug_assert_eq!(unit_side(mv.unit()), self.turn);
        if lateral {
            memory.mark_lateral(self.turn);
        }
        self.memory = memory;

        let record = self.board.apply(&mv);
        self.board.seal_captures();
        match record.captured {
            Some(victim) => info!("{:?} plays {mv}, capturing unit {victim}", self.turn),
            None => info!("{:?} plays {mv}", self.turn),
        }
        self.history.push(record);
        self.turn = self.turn.opposite();
        self.update_status();
    }

    fn update_status(&mut self) {
        for side in [Side::Human, Side::Computer] {
            if self.board.objective_captured(side) {
                self.status = GameStatus::ObjectiveCaptured {
                    winner: side.opposite(),
                };
                info!("{:?} objective captured", side);
                return;
            }
        }

        if self.legal_moves().is_empty() {
            self.status = GameStatus::NoMoves {
                winner: self.turn.opposite(),
            };
            info!("{:?} has no moves left", self.turn);
        }
    }
}
