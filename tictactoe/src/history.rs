use std::fmt;

use itertools::Itertools;
use ttt_types::{Player, Square};

use crate::{board::Board, outcome::GameResult};

/// Moves of one round in the order they were played. X always opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    pub moves: Vec<Square>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, square: Square) {
        self.moves.push(square);
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Replays the moves, alternating from X.
    #[must_use]
    pub fn board_with_history(&self) -> Board {
        let mut board = Board::new();
        let mut player = Player::X;
        for sq in &self.moves {
            board.play(*sq, player);
            player = player.other();
        }
        board
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Moves: {}", self.moves.iter().join(" -> "))
    }
}

/// A finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    pub history: History,
    pub result: GameResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_square_names() {
        let history = History {
            moves: vec![Square(0), Square(4), Square(8)],
        };
        assert_eq!(history.to_string(), "Moves: A1 -> B2 -> C3");
        assert_eq!(History::new().to_string(), "Moves: ");
    }

    #[test]
    fn replay() {
        let mut history = History::new();
        for sq in [4, 0, 8] {
            history.record(Square(sq));
        }
        let board = history.board_with_history();
        assert_eq!(board.compact(), "O   X   X");
        history.clear();
        assert!(history.is_empty());
    }
}
