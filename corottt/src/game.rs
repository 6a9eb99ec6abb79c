use std::io;

use enum_map::EnumMap;
use thiserror::Error;
use tictactoe::{
    board::Board,
    history::{History, RoundRecord},
    AgentError, GameResult, SearchStats,
};
use tracing::{debug, info, warn};
use ttt_types::{Player, Square};

use crate::{input::InputSource, screen::Screen};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("{player} agent failed: {source}")]
    Agent {
        player: Player,
        #[source]
        source: AgentError,
    },
    #[error("reading the keyboard failed: {0}")]
    Input(#[source] io::Error),
    #[error("drawing the board failed: {0}")]
    Draw(#[source] io::Error),
}

/// What a [`Screen`] gets to show.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub board: Board,
    pub to_move: Player,
    pub round: u32,
    pub rounds_left: u32,
    pub history: History,
    /// Set on the frame that ends a round.
    pub result: Option<GameResult>,
    pub wins: EnumMap<Player, u32>,
    pub draws: u32,
    pub stats: Option<SearchStats>,
    pub popup: Option<String>,
}

/// Everything the game tasks share. Owned by the scheduler; only the
/// running task touches it.
pub struct Game {
    pub board: Board,
    pub to_move: Player,
    /// 1-based number of the round being played.
    pub round: u32,
    pub rounds_left: u32,
    pub history: History,
    pub finished: Vec<RoundRecord>,
    pub wins: EnumMap<Player, u32>,
    pub draws: u32,
    pub round_ended: bool,
    pub last_result: Option<GameResult>,
    pub paused: bool,
    pause_drawn: bool,
    pub last_stats: Option<SearchStats>,
    pub fault: Option<GameError>,
    input: Box<dyn InputSource>,
    screen: Box<dyn Screen>,
}

impl Game {
    pub fn new(rounds: u32, input: Box<dyn InputSource>, screen: Box<dyn Screen>) -> Self {
        Self {
            board: Board::new(),
            to_move: Player::X,
            round: 1,
            rounds_left: rounds,
            history: History::new(),
            finished: Vec::new(),
            wins: EnumMap::default(),
            draws: 0,
            round_ended: false,
            last_result: None,
            paused: false,
            pause_drawn: false,
            last_stats: None,
            fault: None,
            input,
            screen,
        }
    }

    pub fn is_over(&self) -> bool {
        self.rounds_left == 0
    }

    pub fn quit(&mut self) {
        info!(rounds_left = self.rounds_left, "quit requested");
        self.rounds_left = 0;
    }

    /// Keeps the first fault and stops the run.
    pub fn fail(&mut self, err: GameError) {
        warn!(%err, "stopping");
        if self.fault.is_none() {
            self.fault = Some(err);
        }
        self.rounds_left = 0;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.pause_drawn = false;
        debug!(paused = self.paused, "pause toggled");
    }

    /// Marks `square` for the player to move and passes the turn.
    pub fn apply_move(&mut self, square: Square) {
        self.board.play(square, self.to_move);
        self.history.record(square);
        self.to_move = self.to_move.other();
    }

    pub fn finish_round(&mut self, result: GameResult) {
        match result {
            GameResult::Win(p) => self.wins[p] += 1,
            GameResult::Draw => self.draws += 1,
        }
        info!(round = self.round, %result, moves = %self.history, "round over");
        self.finished.push(RoundRecord {
            history: self.history.clone(),
            result,
        });
        self.last_result = Some(result);
        self.rounds_left = self.rounds_left.saturating_sub(1);
        self.round_ended = true;
    }

    /// Clears the board for the next round. X opens every round.
    pub fn reset_round(&mut self) {
        self.board.clear();
        self.history.clear();
        self.to_move = Player::X;
        self.round_ended = false;
        self.round += 1;
    }

    pub fn poll_key(&mut self) -> Option<u8> {
        match self.input.poll_byte() {
            Ok(byte) => byte,
            Err(err) => {
                self.fail(GameError::Input(err));
                None
            }
        }
    }

    /// Draws the current state unless paused. The first frame after pausing
    /// still goes out, with a popup saying so.
    pub fn render(&mut self) {
        let popup = if self.paused {
            if self.pause_drawn {
                return;
            }
            self.pause_drawn = true;
            Some("Paused. Ctrl+P resumes, Ctrl+Q quits.".to_owned())
        } else {
            None
        };
        let snapshot = self.snapshot(popup);
        if let Err(err) = self.screen.draw(&snapshot) {
            self.fail(GameError::Draw(err));
        }
    }

    pub fn snapshot(&self, popup: Option<String>) -> Snapshot {
        Snapshot {
            board: self.board,
            to_move: self.to_move,
            round: self.round,
            rounds_left: self.rounds_left,
            history: self.history.clone(),
            result: self.round_ended.then_some(self.last_result).flatten(),
            wins: self.wins,
            draws: self.draws,
            stats: self.last_stats.clone(),
            popup,
        }
    }
}
