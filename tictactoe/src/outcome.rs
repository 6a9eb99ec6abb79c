use std::fmt;

use ttt_types::{BitBoard, Player};

use crate::board::Board;

/// Every row, column and diagonal.
pub const LINES: [BitBoard; 8] = [
    BitBoard(0b000_000_111),
    BitBoard(0b000_111_000),
    BitBoard(0b111_000_000),
    BitBoard(0b001_001_001),
    BitBoard(0b010_010_010),
    BitBoard(0b100_100_100),
    BitBoard(0b100_010_001),
    BitBoard(0b001_010_100),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Win(Player),
    Draw,
}

impl GameResult {
    /// `1.0` if `perspective` won, `0.0` if it lost, `0.5` for a draw.
    #[must_use]
    pub fn value_for(self, perspective: Player) -> f64 {
        match self {
            GameResult::Win(p) if p == perspective => 1.0,
            GameResult::Win(_) => 0.0,
            GameResult::Draw => 0.5,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win(p) => write!(f, "{p} won!"),
            GameResult::Draw => write!(f, "It is a draw!"),
        }
    }
}

impl Board {
    /// `None` while the game is still running.
    #[must_use]
    pub fn winner(&self) -> Option<GameResult> {
        for player in [Player::X, Player::O] {
            let marks = self.marks(player);
            if LINES.iter().any(|line| line.is_subset(marks)) {
                return Some(GameResult::Win(player));
            }
        }
        self.is_full().then_some(GameResult::Draw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(text: &str) -> Option<GameResult> {
        text.parse::<Board>().unwrap().winner()
    }

    #[test]
    fn lines() {
        assert_eq!(result("XXX OO   "), Some(GameResult::Win(Player::X)));
        assert_eq!(result("XO XO  O "), Some(GameResult::Win(Player::O)));
        assert_eq!(result("OX XOX  O"), Some(GameResult::Win(Player::O)));
        assert_eq!(result("XXO O O X"), Some(GameResult::Win(Player::O)));
    }

    #[test]
    fn running_and_drawn() {
        assert_eq!(result("         "), None);
        assert_eq!(result("XXO OO  X"), None);
        assert_eq!(result("XOXXOOOXX"), Some(GameResult::Draw));
    }

    #[test]
    fn full_board_with_a_line_is_a_win() {
        assert_eq!(result("XXXOOXXOO"), Some(GameResult::Win(Player::X)));
    }

    #[test]
    fn values() {
        let win = GameResult::Win(Player::X);
        assert_eq!(win.value_for(Player::X), 1.0);
        assert_eq!(win.value_for(Player::O), 0.0);
        assert_eq!(GameResult::Draw.value_for(Player::O), 0.5);
        assert_eq!(win.to_string(), "X won!");
    }
}
