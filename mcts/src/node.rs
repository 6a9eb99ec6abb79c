use crate::{Move, Player, MCTS};

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One reachable game state. Children of a node are allocated in one block
/// when it is expanded, so they are addressed by a contiguous id range.
pub struct Node<M: MCTS> {
    mv: Option<Move<M>>,
    player: Player<M>,
    parent: Option<NodeId>,
    visits: u64,
    score: f64,
    first_child: u32,
    num_children: u32,
    expanded: bool,
}

impl<M: MCTS> Node<M> {
    pub fn new_root(player: Player<M>) -> Self {
        Self {
            mv: None,
            player,
            parent: None,
            visits: 0,
            score: 0.0,
            first_child: 0,
            num_children: 0,
            expanded: false,
        }
    }

    pub fn new_child(parent: NodeId, mv: Move<M>, player: Player<M>) -> Self {
        Self {
            mv: Some(mv),
            parent: Some(parent),
            ..Self::new_root(player)
        }
    }

    /// Move that produced this state, `None` at the root.
    #[inline]
    pub fn get_move(&self) -> Option<Move<M>> {
        self.mv
    }

    /// Player to move from this state.
    #[inline]
    pub fn player(&self) -> Player<M> {
        self.player
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Accumulated outcome from the point of view of the player who moved
    /// into this node.
    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[inline]
    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score / self.visits as f64
        }
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    #[inline]
    pub fn num_children(&self) -> usize {
        self.num_children as usize
    }

    pub fn children(&self) -> impl Iterator<Item = NodeId> {
        (self.first_child..self.first_child + self.num_children).map(NodeId)
    }

    pub(crate) fn set_children(&mut self, first_child: u32, num_children: u32) {
        self.first_child = first_child;
        self.num_children = num_children;
        self.expanded = true;
    }

    pub(crate) fn update(&mut self, value: f64) {
        self.visits += 1;
        self.score += value;
    }
}
