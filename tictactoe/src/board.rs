use std::{fmt, str::FromStr};

use ttt_types::{BitBoard, Player, Square, BOARD_SIZE, N_GRIDS};

use crate::AgentError;

/// Row-major 3x3 grid of marks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Option<Player>; N_GRIDS],
}

impl Board {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [None; N_GRIDS],
        }
    }

    #[must_use]
    pub fn get(&self, square: Square) -> Option<Player> {
        self.cells[square.index()]
    }

    /// Puts `player`'s mark on `square`, which must be empty.
    pub fn play(&mut self, square: Square, player: Player) {
        debug_assert!(
            self.cells[square.index()].is_none(),
            "{square} is already taken"
        );
        self.cells[square.index()] = Some(player);
    }

    /// Takes a mark back off the board.
    pub fn unplay(&mut self, square: Square) {
        self.cells[square.index()] = None;
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    #[must_use]
    pub fn marks(&self, player: Player) -> BitBoard {
        Square::all()
            .filter(|sq| self.get(*sq) == Some(player))
            .collect()
    }

    #[must_use]
    pub fn occupied(&self) -> BitBoard {
        Square::all().filter(|sq| self.get(*sq).is_some()).collect()
    }

    #[must_use]
    pub fn empty_squares(&self) -> BitBoard {
        !self.occupied()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// One character per cell, space for empty.
    #[must_use]
    pub fn compact(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.map_or(' ', Player::symbol))
            .collect()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.compact())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "  {}", (b'A' + col as u8) as char)?;
        }
        writeln!(f)?;
        for row in 0..BOARD_SIZE {
            if row > 0 {
                writeln!(f, "   ---+---+---")?;
            }
            write!(f, "{} ", row + 1)?;
            for col in 0..BOARD_SIZE {
                let mark = self
                    .get(Square::from_coords(row, col))
                    .map_or(' ', Player::symbol);
                let sep = if col + 1 < BOARD_SIZE { " |" } else { "" };
                write!(f, " {mark}{sep}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the [`Board::compact`] form. Line breaks are ignored so a board
/// can also be written one row per line.
impl FromStr for Board {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<char> = s.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if cells.len() != N_GRIDS {
            return Err(AgentError::ParseBoard(format!(
                "expected {N_GRIDS} cells, found {}",
                cells.len()
            )));
        }
        let mut board = Self::new();
        for (idx, c) in cells.into_iter().enumerate() {
            board.cells[idx] = match c {
                ' ' | '.' => None,
                c => Some(
                    Player::from_symbol(c)
                        .ok_or_else(|| AgentError::ParseBoard(format!("unknown mark {c:?}")))?,
                ),
            };
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_query() {
        let board: Board = "XXO OO  X".parse().unwrap();
        assert_eq!(board.get(Square(0)), Some(Player::X));
        assert_eq!(board.get(Square(2)), Some(Player::O));
        assert_eq!(board.get(Square(3)), None);
        assert_eq!(board.occupied().len(), 6);
        assert_eq!(board.marks(Player::O), BitBoard(0b000_110_100));
        assert_eq!(board.compact(), "XXO OO  X");
        assert!(!board.is_full());
    }

    #[test]
    fn parse_rejects_bad_text() {
        assert!("XXO".parse::<Board>().is_err());
        assert!("XXO ZO  X".parse::<Board>().is_err());
        assert!("XXO\n OO\n  X".parse::<Board>().is_ok());
    }

    #[test]
    fn play_and_unplay() {
        let mut board = Board::new();
        assert!(board.is_empty());
        board.play(Square(4), Player::X);
        assert_eq!(board.get(Square(4)), Some(Player::X));
        board.unplay(Square(4));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn render() {
        let board: Board = "X   O   X".parse().unwrap();
        let expected = "    A  B  C\n\
                        1  X |   |  \n   ---+---+---\n\
                        2    | O |  \n   ---+---+---\n\
                        3    |   | X\n";
        assert_eq!(board.to_string(), expected);
    }
}
