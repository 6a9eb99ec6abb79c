//! Depth-limited negamax with alpha-beta pruning and a transposition table.

use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use tracing::debug;
use ttt_types::{Player, Square, N_GRIDS};

use crate::{
    agent::{Agent, MoveStat, SearchStats},
    board::Board,
    outcome::{GameResult, LINES},
    transposition::{Bound, QuadraticProbingHashTable},
    AgentError,
};

pub const DEFAULT_DEPTH: u32 = 6;

const ZOBRIST_SEED: u64 = 0x2545_f491_4f6c_dd1d;
/// Legal tic-tac-toe positions number a little under 6000.
const TABLE_POSITIONS: usize = 6_000;

/// Base score of a decided game; empty cells left are added so quicker
/// wins rank higher.
const WIN_SCORE: i32 = 1_000;
const INF: i32 = 2 * WIN_SCORE;
/// Line value by number of marks of a single player in it.
const LINE_WEIGHTS: [i32; 4] = [0, 1, 10, 100];

struct Zobrist {
    base: u64,
    cells: [[u64; 2]; N_GRIDS],
    o_to_move: u64,
}

impl Zobrist {
    fn new(seed: u64) -> Self {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let mut cells = [[0; 2]; N_GRIDS];
        for keys in &mut cells {
            *keys = [rng.gen(), rng.gen()];
        }
        Self {
            // Never zero: the table uses zero for empty slots.
            base: rng.gen::<u64>() | 1,
            cells,
            o_to_move: rng.gen(),
        }
    }

    fn cell(&self, square: Square, player: Player) -> u64 {
        self.cells[square.index()][player as usize]
    }

    fn hash(&self, board: &Board, to_move: Player) -> u64 {
        let mut hash = self.base;
        for sq in Square::all() {
            if let Some(player) = board.get(sq) {
                hash ^= self.cell(sq, player);
            }
        }
        if to_move == Player::O {
            hash ^= self.o_to_move;
        }
        hash
    }

    /// Hash after `player` marks `square` and the turn passes.
    fn after(&self, hash: u64, square: Square, player: Player) -> u64 {
        hash ^ self.cell(square, player) ^ self.o_to_move
    }
}

#[derive(Debug, Clone, Copy)]
struct TableValue {
    depth: u32,
    score: i32,
    bound: Bound,
    best: Option<Square>,
}

pub struct Negamax {
    zobrist: Zobrist,
    table: QuadraticProbingHashTable<TableValue>,
    depth: u32,
    nodes: u64,
    last: Option<SearchStats>,
}

impl Default for Negamax {
    fn default() -> Self {
        Self::init()
    }
}

impl Negamax {
    /// Fresh keys and an empty table, searching [`DEFAULT_DEPTH`] plies.
    #[must_use]
    pub fn init() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }

    #[must_use]
    pub fn with_depth(depth: u32) -> Self {
        Self {
            zobrist: Zobrist::new(ZOBRIST_SEED),
            table: QuadraticProbingHashTable::enough_to_hold(TABLE_POSITIONS),
            depth: depth.max(1),
            nodes: 0,
            last: None,
        }
    }

    /// Best cell for `player`; the first one in cell order on ties.
    pub fn predict(&mut self, board: &Board, player: Player) -> Result<Square, AgentError> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(AgentError::NoLegalMoves);
        }
        if board.winner().is_some() {
            return Err(AgentError::GameOver);
        }

        self.nodes = 0;
        let mut work = *board;
        let hash = self.zobrist.hash(board, player);
        let mut best: Option<(Square, i32)> = None;
        let mut stats = Vec::with_capacity(moves.len());
        for mv in moves {
            let before = self.nodes;
            work.play(mv, player);
            let child = self.zobrist.after(hash, mv, player);
            // Full window so every root move gets an exact score.
            let score = -self.search(&mut work, player.other(), self.depth - 1, -INF, INF, child);
            work.unplay(mv);
            stats.push(MoveStat {
                square: mv,
                visits: self.nodes - before,
                value: f64::from(score),
            });
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        let (chosen, score) = best.ok_or(AgentError::NoLegalMoves)?;
        debug!(%player, square = %chosen, score, nodes = self.nodes, "negamax move");
        self.last = Some(SearchStats {
            agent: self.name().to_owned(),
            player,
            chosen,
            nodes: self.nodes,
            moves: stats,
        });
        Ok(chosen)
    }

    fn search(
        &mut self,
        board: &mut Board,
        player: Player,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        hash: u64,
    ) -> i32 {
        self.nodes += 1;
        if let Some(result) = board.winner() {
            return terminal_score(board, result, player);
        }
        if depth == 0 {
            return evaluate(board, player);
        }

        let alpha_orig = alpha;
        let mut table_move = None;
        if let Some(entry) = self.table.lookup(hash) {
            table_move = entry.best;
            if entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => return entry.score,
                    Bound::Lower => alpha = alpha.max(entry.score),
                    Bound::Upper => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    return entry.score;
                }
            }
        }

        let mut moves = board.legal_moves();
        // Stable, so the rest keep cell order.
        moves.sort_by_key(|mv| Some(*mv) != table_move);

        let mut best_score = -INF;
        let mut best_move = None;
        for mv in moves {
            board.play(mv, player);
            let child = self.zobrist.after(hash, mv, player);
            let score = -self.search(board, player.other(), depth - 1, -beta, -alpha, child);
            board.unplay(mv);
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        let bound = if best_score <= alpha_orig {
            Bound::Upper
        } else if best_score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.table.insert(
            hash,
            TableValue {
                depth,
                score: best_score,
                bound,
                best: best_move,
            },
        );
        best_score
    }
}

impl Agent for Negamax {
    fn name(&self) -> &'static str {
        "negamax"
    }

    fn select_move(&mut self, board: &Board, player: Player) -> Result<Square, AgentError> {
        self.predict(board, player)
    }

    fn last_stats(&self) -> Option<&SearchStats> {
        self.last.as_ref()
    }
}

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn terminal_score(board: &Board, result: GameResult, to_move: Player) -> i32 {
    let empty = board.empty_squares().len() as i32;
    match result {
        GameResult::Win(p) if p == to_move => WIN_SCORE + empty,
        GameResult::Win(_) => -(WIN_SCORE + empty),
        GameResult::Draw => 0,
    }
}

/// Sums open lines: each line only one side has marked counts for that
/// side.
fn evaluate(board: &Board, to_move: Player) -> i32 {
    let mine = board.marks(to_move);
    let theirs = board.marks(to_move.other());
    LINES
        .iter()
        .map(|line| {
            match ((*line & mine).len(), (*line & theirs).len()) {
                (n, 0) => LINE_WEIGHTS[n],
                (0, n) => -LINE_WEIGHTS[n],
                _ => 0,
            }
        })
        .sum()
}
