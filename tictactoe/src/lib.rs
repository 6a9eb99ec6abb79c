#![warn(clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::missing_errors_doc)]
use board::Board;
use mcts::{policies::UCTPolicy, search::SearchError, GameState, MCTS};
use thiserror::Error;
use ttt_types::{MoveList, Player, Square, N_GRIDS};

pub mod agent;
pub mod board;
pub mod history;
pub mod movegen;
pub mod negamax;
pub mod outcome;
pub mod transposition;

pub use agent::{Agent, MctsAgent, MoveStat, SearchStats};
pub use negamax::Negamax;
pub use outcome::GameResult;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("search failed: {0}")]
    Search(#[from] SearchError),
    #[error("no legal moves left")]
    NoLegalMoves,
    #[error("the round is already decided")]
    GameOver,
    #[error("malformed board: {0}")]
    ParseBoard(String),
}

/// Search configuration for tic-tac-toe.
#[derive(Debug, Clone)]
pub struct TicTacToeAI {
    pub iterations: u64,
}

impl Default for TicTacToeAI {
    fn default() -> Self {
        Self {
            iterations: 100_000,
        }
    }
}

impl MCTS for TicTacToeAI {
    type State = Board;
    type Select = UCTPolicy;

    fn iterations(&self) -> u64 {
        self.iterations
    }

    fn max_playout_length(&self) -> usize {
        N_GRIDS
    }
}

impl GameState for Board {
    type Move = Square;
    type Player = Player;
    type MoveList = MoveList;

    fn legal_moves(&self) -> Self::MoveList {
        self.legal_moves()
    }

    fn make_move(&mut self, mv: Self::Move, player: Self::Player) {
        self.play(mv, player);
    }

    fn opponent(player: Self::Player) -> Self::Player {
        player.other()
    }

    fn outcome(&self, perspective: Self::Player) -> Option<f64> {
        self.winner().map(|result| result.value_for(perspective))
    }
}
