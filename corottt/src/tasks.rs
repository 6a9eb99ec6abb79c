//! The game's cooperative tasks. Registration order is the turn order:
//! `ai(X), keyboard, ai(O), keyboard, judge, keyboard`.

use coro::{Scheduler, Step, Task, TaskArg};
use tictactoe::Agent;
use tracing::trace;
use ttt_types::Player;

use crate::{
    game::{Game, GameError},
    input::{CTRL_P, CTRL_Q},
};

fn keep_going(game: &Game) -> Step {
    if game.is_over() {
        Step::Finish
    } else {
        Step::Yield
    }
}

/// Plays one move for `player` whenever it is that player's turn in an
/// undecided round.
pub struct AiTask {
    player: Player,
    agent: Box<dyn Agent>,
}

impl AiTask {
    pub fn new(player: Player, agent: Box<dyn Agent>) -> Self {
        Self { player, agent }
    }
}

impl Task<Game> for AiTask {
    fn resume(&mut self, game: &mut Game) -> Step {
        if game.is_over() {
            return Step::Finish;
        }
        if game.to_move == self.player && !game.round_ended && game.board.winner().is_none() {
            match self.agent.select_move(&game.board, self.player) {
                Ok(square) => {
                    trace!(player = %self.player, %square, agent = self.agent.name(), "move");
                    game.apply_move(square);
                    game.last_stats = self.agent.last_stats().cloned();
                }
                Err(source) => game.fail(GameError::Agent {
                    player: self.player,
                    source,
                }),
            }
        }
        Step::Yield
    }
}

/// Polls one key: Ctrl+P toggles pause, Ctrl+Q ends the run.
pub struct KeyboardTask;

impl Task<Game> for KeyboardTask {
    fn resume(&mut self, game: &mut Game) -> Step {
        if game.is_over() {
            return Step::Finish;
        }
        match game.poll_key() {
            Some(CTRL_P) => game.toggle_pause(),
            Some(CTRL_Q) => game.quit(),
            _ => {}
        }
        keep_going(game)
    }
}

/// Checks for a decided board, draws, and starts the next round.
pub struct JudgeTask;

impl Task<Game> for JudgeTask {
    fn resume(&mut self, game: &mut Game) -> Step {
        if game.is_over() {
            return Step::Finish;
        }
        if let Some(result) = game.board.winner() {
            game.finish_round(result);
        }
        game.render();
        if game.round_ended {
            game.reset_round();
        }
        keep_going(game)
    }
}

fn keyboard(_: &TaskArg) -> Box<dyn Task<Game>> {
    Box::new(KeyboardTask)
}

fn judge(_: &TaskArg) -> Box<dyn Task<Game>> {
    Box::new(JudgeTask)
}

pub fn register(sched: &mut Scheduler<Game>, x: Box<dyn Agent>, o: Box<dyn Agent>) {
    sched.register(TaskArg::new("ai_x"), move |_: &TaskArg| -> Box<dyn Task<Game>> {
        Box::new(AiTask::new(Player::X, x))
    });
    sched.register(TaskArg::new("keyboard"), keyboard);
    sched.register(TaskArg::new("ai_o"), move |_: &TaskArg| -> Box<dyn Task<Game>> {
        Box::new(AiTask::new(Player::O, o))
    });
    sched.register(TaskArg::new("keyboard"), keyboard);
    sched.register(TaskArg::new("judge"), judge);
    sched.register(TaskArg::new("keyboard"), keyboard);
}
