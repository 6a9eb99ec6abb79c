use tracing::debug;

use crate::{
    node::NodeId,
    policies::PlayoutRng,
    search::{MoveInfo, SearchError, SearchTree},
    GameState, Move, Player, MCTS,
};

/// Owns the search tree and the playout randomness across decisions. Every
/// decision starts from a fresh tree; the arena is reused.
pub struct Manager<M: MCTS> {
    search_tree: SearchTree<M>,
    rng: PlayoutRng,
}

impl<M: MCTS> Manager<M> {
    pub fn new(player: Player<M>, manager: M, policy: M::Select, rng: PlayoutRng) -> Self {
        Self {
            search_tree: SearchTree::new(player, manager, policy),
            rng,
        }
    }

    /// Runs the configured number of playouts from `state` with `player` to
    /// move and returns the most visited move.
    pub fn select_move(
        &mut self,
        state: &M::State,
        player: Player<M>,
    ) -> Result<Move<M>, SearchError> {
        self.new_root(state, player)?;
        let iterations = self.search_tree.spec().iterations();
        self.playout_n(state, iterations)?;
        let best = self.best_move().ok_or(SearchError::NoLegalMoves)?;
        debug!(
            ?player,
            ?best,
            iterations,
            nodes = self.search_tree.num_nodes(),
            "search finished"
        );
        Ok(best)
    }

    /// Discards the previous tree and expands a new root for `state`.
    pub fn new_root(&mut self, state: &M::State, player: Player<M>) -> Result<(), SearchError> {
        if state.outcome(player).is_some() {
            return Err(SearchError::Terminal);
        }
        self.search_tree.reset(player);
        self.search_tree.expand(NodeId::ROOT, state)?;
        if self.search_tree.root().num_children() == 0 {
            return Err(SearchError::NoLegalMoves);
        }
        Ok(())
    }

    pub fn playout(&mut self, state: &M::State) -> Result<(), SearchError> {
        self.search_tree.playout(state, &mut self.rng)
    }

    pub fn playout_n(&mut self, state: &M::State, n: u64) -> Result<(), SearchError> {
        (0..n).try_for_each(|_| self.playout(state))
    }

    pub fn tree(&self) -> &SearchTree<M> {
        &self.search_tree
    }

    pub fn pv(&self, num_moves: usize) -> Vec<Move<M>> {
        self.search_tree.pv(num_moves)
    }

    pub fn best_move(&self) -> Option<Move<M>> {
        self.search_tree.best_move()
    }

    pub fn stats(&self) -> Vec<MoveInfo<Move<M>>> {
        self.search_tree.root_moves()
    }
}
