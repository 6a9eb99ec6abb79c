use std::fmt::Display;

use crate::{bitboard::BitBoard, BOARD_SIZE, N_GRIDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Square(pub u8);

impl Square {
    #[must_use]
    #[inline(always)]
    pub const fn bitboard(self) -> BitBoard {
        BitBoard(1 << self.0)
    }

    #[must_use]
    #[inline(always)]
    pub const fn from_coords(row: usize, col: usize) -> Self {
        Self((row * BOARD_SIZE + col) as u8)
    }

    #[must_use]
    #[inline(always)]
    pub const fn row(self) -> usize {
        self.0 as usize / BOARD_SIZE
    }

    #[must_use]
    #[inline(always)]
    pub const fn col(self) -> usize {
        self.0 as usize % BOARD_SIZE
    }

    #[must_use]
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        (self.0 as usize) < N_GRIDS
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..N_GRIDS as u8).map(Square)
    }
}

// Column letter followed by the 1-based row, e.g. `B3`.
impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let col = (b'A' + self.col() as u8) as char;
        write!(f, "{}{}", col, self.row() + 1)
    }
}
