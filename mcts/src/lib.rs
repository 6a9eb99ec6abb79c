//! Single-threaded Monte Carlo Tree Search over an index arena.
//!
//! A [`manager::Manager`] builds a fresh [`search::SearchTree`] for every
//! decision, runs a fixed number of playouts (selection, expansion, random
//! simulation, backpropagation) and answers with the most visited root move.

use std::fmt::Debug;

use node::{Node, NodeId};
use search::{MoveInfo, SearchTree};

pub mod manager;
pub mod node;
pub mod policies;
pub mod search;

pub trait MCTS: Sized {
    type State: GameState;
    type Select: Policy<Self>;

    /// Playouts per decision.
    fn iterations(&self) -> u64 {
        100_000
    }

    fn node_limit(&self) -> usize {
        usize::MAX
    }

    /// Random moves played before a simulation is scored as a draw.
    fn max_playout_length(&self) -> usize {
        1_000
    }

    /// Most visited child; ties go to the earliest generated move.
    fn select_child_after_search<'a>(
        &self,
        children: &'a [MoveInfo<Move<Self>>],
    ) -> Option<&'a MoveInfo<Move<Self>>> {
        // `max_by_key` keeps the last maximum, so walk backwards.
        children.iter().rev().max_by_key(|child| child.visits)
    }
}

pub type Move<M> = <<M as MCTS>::State as GameState>::Move;
pub type MoveList<M> = <<M as MCTS>::State as GameState>::MoveList;
pub type Player<M> = <<M as MCTS>::State as GameState>::Player;

pub trait GameState: Clone {
    type Move: Copy + PartialEq + Debug;
    type Player: Copy + PartialEq + Debug;
    type MoveList: IntoIterator<Item = Self::Move>;

    /// Legal moves in a stable generation order.
    fn legal_moves(&self) -> Self::MoveList;
    fn make_move(&mut self, mv: Self::Move, player: Self::Player);
    fn opponent(player: Self::Player) -> Self::Player;
    /// `1.0` win, `0.0` loss, `0.5` draw for `perspective`, or `None` while
    /// the game is still running.
    fn outcome(&self, perspective: Self::Player) -> Option<f64>;
}

pub trait Policy<M: MCTS<Select = Self>>: Sized {
    fn score(&self, parent_visits: u64, child: &Node<M>) -> f64;

    /// Highest scoring child of `parent`, the first one on ties.
    fn choose(&self, tree: &SearchTree<M>, parent: NodeId) -> Option<NodeId> {
        let parent_visits = tree.get(parent).visits();
        let mut choice = None;
        let mut best_so_far = f64::NEG_INFINITY;
        for (id, child) in tree.children(parent) {
            let score = self.score(parent_visits, child);
            if choice.is_none() || score > best_so_far {
                choice = Some(id);
                best_so_far = score;
            }
        }
        choice
    }
}
