use ttt_types::MoveList;

use crate::board::Board;

impl Board {
    /// Empty cells in ascending order. Does not look at whether the game is
    /// already decided.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        self.empty_squares().iter().collect()
    }
}
