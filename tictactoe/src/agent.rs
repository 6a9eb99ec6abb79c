use mcts::{manager::Manager, policies::PlayoutRng, policies::UCTPolicy};
use tracing::debug;
use ttt_types::{Player, Square};

use crate::{board::Board, AgentError, TicTacToeAI};

/// Something that picks a cell for `player`. Either side of a game can be
/// driven by any agent.
pub trait Agent {
    fn name(&self) -> &'static str;

    fn select_move(&mut self, board: &Board, player: Player) -> Result<Square, AgentError>;

    /// Numbers behind the most recent decision, for display.
    fn last_stats(&self) -> Option<&SearchStats> {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveStat {
    pub square: Square,
    /// Playouts through this move, or positions searched below it.
    pub visits: u64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchStats {
    pub agent: String,
    pub player: Player,
    pub chosen: Square,
    pub nodes: u64,
    pub moves: Vec<MoveStat>,
}

pub struct MctsAgent {
    manager: Manager<TicTacToeAI>,
    last: Option<SearchStats>,
}

impl MctsAgent {
    #[must_use]
    pub fn new(iterations: u64, exploration: f64, rng: PlayoutRng) -> Self {
        let manager = Manager::new(
            Player::X,
            TicTacToeAI { iterations },
            UCTPolicy(exploration),
            rng,
        );
        Self {
            manager,
            last: None,
        }
    }

    #[must_use]
    pub fn manager(&self) -> &Manager<TicTacToeAI> {
        &self.manager
    }
}

impl Agent for MctsAgent {
    fn name(&self) -> &'static str {
        "mcts"
    }

    fn select_move(&mut self, board: &Board, player: Player) -> Result<Square, AgentError> {
        let chosen = self.manager.select_move(board, player)?;
        let moves = self
            .manager
            .stats()
            .into_iter()
            .map(|info| MoveStat {
                square: info.mv,
                visits: info.visits,
                value: info.mean_action_value(),
            })
            .collect();
        let stats = SearchStats {
            agent: self.name().to_owned(),
            player,
            chosen,
            nodes: self.manager.tree().num_nodes() as u64,
            moves,
        };
        debug!(%player, square = %chosen, nodes = stats.nodes, "mcts move");
        self.last = Some(stats);
        Ok(chosen)
    }

    fn last_stats(&self) -> Option<&SearchStats> {
        self.last.as_ref()
    }
}
