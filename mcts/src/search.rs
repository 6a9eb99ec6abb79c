use std::collections::TryReserveError;

use itertools::Itertools;
use thiserror::Error;
use tracing::trace;

use crate::{
    node::{Node, NodeId},
    policies::PlayoutRng,
    GameState, Move, Player, Policy, MCTS,
};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("the game is already over")]
    Terminal,

    #[error("search tree exceeded the node limit of {0}")]
    NodeLimit(usize),

    #[error("failed to grow the search tree: {0}")]
    Alloc(#[from] TryReserveError),
}

/// Visit statistics of one root move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveInfo<Mv> {
    pub mv: Mv,
    pub visits: u64,
    pub sum_rewards: f64,
}

impl<Mv> MoveInfo<Mv> {
    pub fn mean_action_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.sum_rewards / self.visits as f64
        }
    }
}

pub struct SearchTree<M: MCTS> {
    nodes: Vec<Node<M>>,
    policy: M::Select,
    manager: M,
}

impl<M: MCTS> SearchTree<M> {
    pub fn new(player: Player<M>, manager: M, policy: M::Select) -> Self {
        Self {
            nodes: vec![Node::new_root(player)],
            policy,
            manager,
        }
    }

    /// Drops every node and starts over from a bare root, keeping the
    /// arena's allocation.
    pub fn reset(&mut self, player: Player<M>) {
        self.nodes.clear();
        self.nodes.push(Node::new_root(player));
    }

    pub fn spec(&self) -> &M {
        &self.manager
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<M> {
        &self.nodes[id.index()]
    }

    pub fn root(&self) -> &Node<M> {
        self.get(NodeId::ROOT)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Node<M>)> + '_ {
        self.get(id).children().map(move |child| (child, self.get(child)))
    }

    /// Creates one child per legal move of `state`, which must be the state
    /// at `id`.
    pub fn expand(&mut self, id: NodeId, state: &M::State) -> Result<(), SearchError> {
        let player = self.get(id).player();
        let next = M::State::opponent(player);
        let moves = state.legal_moves().into_iter().collect_vec();

        let limit = self.manager.node_limit();
        if self.nodes.len() + moves.len() > limit {
            return Err(SearchError::NodeLimit(limit));
        }
        self.nodes.try_reserve(moves.len())?;

        let first_child = self.nodes.len() as u32;
        let num_children = moves.len() as u32;
        self.nodes
            .extend(moves.into_iter().map(|mv| Node::new_child(id, mv, next)));
        self.nodes[id.index()].set_children(first_child, num_children);
        trace!(node = id.0, children = num_children, "expanded");
        Ok(())
    }

    /// Runs one select, expand, simulate, backpropagate iteration from
    /// `root_state`.
    pub fn playout(
        &mut self,
        root_state: &M::State,
        rng: &mut PlayoutRng,
    ) -> Result<(), SearchError> {
        let mut state = root_state.clone();
        let mut current = NodeId::ROOT;
        loop {
            let node = self.get(current);
            let player = node.player();
            let mover = M::State::opponent(player);

            if let Some(value) = state.outcome(mover) {
                self.backpropagation(current, value);
                return Ok(());
            }

            if node.visits() == 0 {
                let value = self.simulate(&state, player, mover, rng);
                self.backpropagation(current, value);
                return Ok(());
            }

            if !node.is_expanded() {
                self.expand(current, &state)?;
            }

            let child = self
                .policy
                .choose(self, current)
                .ok_or(SearchError::NoLegalMoves)?;
            if let Some(mv) = self.get(child).get_move() {
                state.make_move(mv, player);
            }
            current = child;
        }
    }

    /// Plays uniformly random moves until the game ends and scores the end
    /// position for `perspective`.
    fn simulate(
        &self,
        state: &M::State,
        to_move: Player<M>,
        perspective: Player<M>,
        rng: &mut PlayoutRng,
    ) -> f64 {
        let mut state = state.clone();
        let mut player = to_move;
        for _ in 0..self.manager.max_playout_length() {
            if let Some(value) = state.outcome(perspective) {
                return value;
            }
            let Some(mv) = rng.pick(state.legal_moves()) else {
                break;
            };
            state.make_move(mv, player);
            player = M::State::opponent(player);
        }
        state.outcome(perspective).unwrap_or(0.5)
    }

    /// Walks from `leaf` to the root, flipping the outcome's perspective at
    /// every level.
    fn backpropagation(&mut self, leaf: NodeId, mut value: f64) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = &mut self.nodes[id.index()];
            node.update(value);
            value = 1.0 - value;
            current = node.parent();
        }
    }

    pub fn root_moves(&self) -> Vec<MoveInfo<Move<M>>> {
        self.move_infos(NodeId::ROOT)
    }

    fn move_infos(&self, id: NodeId) -> Vec<MoveInfo<Move<M>>> {
        self.children(id)
            .filter_map(|(_, child)| {
                child.get_move().map(|mv| MoveInfo {
                    mv,
                    visits: child.visits(),
                    sum_rewards: child.score(),
                })
            })
            .collect_vec()
    }

    pub fn best_move(&self) -> Option<Move<M>> {
        let moves = self.root_moves();
        self.manager
            .select_child_after_search(&moves)
            .map(|info| info.mv)
    }

    /// Principal variation: follows the most visited child from the root.
    pub fn pv(&self, num_moves: usize) -> Vec<Move<M>> {
        let mut res = Vec::new();
        let mut current = NodeId::ROOT;
        while res.len() < num_moves {
            let Some((id, child)) = self
                .children(current)
                .filter(|(_, child)| child.visits() > 0)
                .collect_vec()
                .into_iter()
                .rev()
                .max_by_key(|(_, child)| child.visits())
            else {
                break;
            };
            let Some(mv) = child.get_move() else {
                break;
            };
            res.push(mv);
            current = id;
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::UCTPolicy;

    /// Take one or two counters from a pile; whoever takes the last one wins.
    #[derive(Clone, Debug)]
    struct Nim {
        pile: u8,
        last: Option<bool>,
    }

    impl GameState for Nim {
        type Move = u8;
        type Player = bool;
        type MoveList = Vec<u8>;

        fn legal_moves(&self) -> Self::MoveList {
            (1..=2).filter(|&n| n <= self.pile).collect()
        }

        fn make_move(&mut self, mv: Self::Move, player: Self::Player) {
            self.pile -= mv;
            self.last = Some(player);
        }

        fn opponent(player: Self::Player) -> Self::Player {
            !player
        }

        fn outcome(&self, perspective: Self::Player) -> Option<f64> {
            if self.pile > 0 {
                return None;
            }
            self.last.map(|p| if p == perspective { 1.0 } else { 0.0 })
        }
    }

    struct NimAI;

    impl MCTS for NimAI {
        type State = Nim;
        type Select = UCTPolicy;
    }

    fn tree() -> SearchTree<NimAI> {
        SearchTree::new(true, NimAI, UCTPolicy::default())
    }

    #[test]
    fn root_visits_match_iterations() {
        let state = Nim { pile: 7, last: None };
        let mut tree = tree();
        let mut rng = PlayoutRng::seeded(3);
        for n in 1..=250 {
            tree.playout(&state, &mut rng).unwrap();
            assert_eq!(tree.root().visits(), n);
        }
        let child_visits: u64 = tree.children(NodeId::ROOT).map(|(_, c)| c.visits()).sum();
        // The first iteration simulates from the root itself.
        assert_eq!(child_visits, 249);
    }

    #[test]
    fn children_are_contiguous_and_point_back() {
        let state = Nim { pile: 5, last: None };
        let mut tree = tree();
        tree.expand(NodeId::ROOT, &state).unwrap();
        let children = tree.children(NodeId::ROOT).collect_vec();
        assert_eq!(children.len(), 2);
        for (idx, (id, child)) in children.iter().enumerate() {
            assert_eq!(id.0, idx as u32 + 1);
            assert_eq!(child.parent(), Some(NodeId::ROOT));
            assert_eq!(child.get_move(), Some(idx as u8 + 1));
            assert!(!child.player());
        }
    }

    #[test]
    fn equal_children_prefer_generation_order() {
        let state = Nim { pile: 5, last: None };
        let mut tree = tree();
        tree.expand(NodeId::ROOT, &state).unwrap();
        let ids = tree.children(NodeId::ROOT).map(|(id, _)| id).collect_vec();
        for id in ids {
            tree.backpropagation(id, 0.5);
            tree.backpropagation(id, 1.0);
        }
        assert_eq!(tree.root().visits(), 4);
        assert_eq!(tree.best_move(), Some(1));
        assert_eq!(tree.policy.choose(&tree, NodeId::ROOT), Some(NodeId(1)));
    }

    #[test]
    fn unvisited_child_beats_visited_ones() {
        let state = Nim { pile: 5, last: None };
        let mut tree = tree();
        tree.expand(NodeId::ROOT, &state).unwrap();
        for _ in 0..10 {
            tree.backpropagation(NodeId(1), 1.0);
        }
        assert_eq!(tree.policy.choose(&tree, NodeId::ROOT), Some(NodeId(2)));
    }

    #[test]
    fn finds_the_winning_take() {
        // From a pile of 4 the only winning move is to leave a multiple of 3.
        let state = Nim { pile: 4, last: None };
        let mut tree = tree();
        let mut rng = PlayoutRng::seeded(11);
        tree.expand(NodeId::ROOT, &state).unwrap();
        for _ in 0..3_000 {
            tree.playout(&state, &mut rng).unwrap();
        }
        assert_eq!(tree.best_move(), Some(1));
        assert_eq!(tree.pv(1), vec![1]);
    }

    #[test]
    fn node_limit_fails_the_expansion() {
        struct Tiny;
        impl MCTS for Tiny {
            type State = Nim;
            type Select = UCTPolicy;
            fn node_limit(&self) -> usize {
                2
            }
        }
        let state = Nim { pile: 5, last: None };
        let mut tree = SearchTree::new(true, Tiny, UCTPolicy::default());
        assert!(matches!(
            tree.expand(NodeId::ROOT, &state),
            Err(SearchError::NodeLimit(2))
        ));
    }

    #[test]
    fn reset_keeps_only_the_root() {
        let state = Nim { pile: 6, last: None };
        let mut tree = tree();
        let mut rng = PlayoutRng::seeded(1);
        for _ in 0..50 {
            tree.playout(&state, &mut rng).unwrap();
        }
        assert!(tree.num_nodes() > 1);
        tree.reset(false);
        assert_eq!(tree.num_nodes(), 1);
        assert_eq!(tree.root().visits(), 0);
        assert!(!tree.root().player());
    }
}
