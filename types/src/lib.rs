pub mod bitboard;
pub mod player;
pub mod square;

pub use bitboard::*;
pub use player::*;
pub use square::*;

use smallvec::SmallVec;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;
/// Number of cells on the board.
pub const N_GRIDS: usize = BOARD_SIZE * BOARD_SIZE;

/// Legal moves in ascending cell order.
pub type MoveList = SmallVec<Square, N_GRIDS>;
