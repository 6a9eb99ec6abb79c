use std::fmt::Display;

use enum_map::Enum;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Enum)]
pub enum Player {
    X,
    O,
}

pub const ALL_PLAYERS: [Player; 2] = [Player::X, Player::O];

impl Player {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'X' | 'x' => Some(Player::X),
            'O' | 'o' => Some(Player::O),
            _ => None,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_is_an_involution() {
        for p in ALL_PLAYERS {
            assert_ne!(p, p.other());
            assert_eq!(p, p.other().other());
        }
    }

    #[test]
    fn symbols() {
        assert_eq!(Player::from_symbol('x'), Some(Player::X));
        assert_eq!(Player::from_symbol('O'), Some(Player::O));
        assert_eq!(Player::from_symbol(' '), None);
        assert_eq!(Player::O.to_string(), "O");
    }
}
