use mcts::policies::PlayoutRng;
use rand::{seq::IteratorRandom, Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use tictactoe::{board::Board, Agent, MctsAgent, Negamax};
use ttt_types::{Player, Square};

fn mcts(iterations: u64, seed: u64) -> MctsAgent {
    MctsAgent::new(iterations, std::f64::consts::SQRT_2, PlayoutRng::seeded(seed))
}

/// Plays a few random moves from the empty board, keeping the game open.
fn random_open_board(rng: &mut XorShiftRng) -> (Board, Player) {
    loop {
        let mut board = Board::new();
        let mut player = Player::X;
        for _ in 0..rng.gen_range(0..8) {
            let Some(mv) = board.legal_moves().into_iter().choose(rng) else {
                break;
            };
            board.play(mv, player);
            player = player.other();
        }
        if board.winner().is_none() {
            return (board, player);
        }
    }
}

#[test]
fn mcts_never_picks_a_taken_cell() {
    let mut rng = XorShiftRng::seed_from_u64(3);
    let mut agent = mcts(200, 11);
    for _ in 0..50 {
        let (board, player) = random_open_board(&mut rng);
        let mv = agent.select_move(&board, player).unwrap();
        assert!(board.get(mv).is_none(), "{mv} taken on {board:?}");
        let stats = agent.last_stats().unwrap();
        assert_eq!(stats.chosen, mv);
        assert_eq!(stats.moves.len(), board.legal_moves().len());
    }
}

#[test]
fn single_empty_cell_is_chosen() {
    let board: Board = "XOXXOOOX ".parse().unwrap();
    assert_eq!(mcts(100, 1).select_move(&board, Player::X).unwrap(), Square(8));
    assert_eq!(Negamax::init().select_move(&board, Player::X).unwrap(), Square(8));
}

#[test]
fn fixed_seed_is_reproducible() {
    let board = Board::new();
    let first = mcts(1_000, 99).select_move(&board, Player::X).unwrap();
    let second = mcts(1_000, 99).select_move(&board, Player::X).unwrap();
    assert_eq!(first, second);
}

#[test]
fn mcts_completes_a_line() {
    let board: Board = "XXO OO  X".parse().unwrap();
    let mv = mcts(1_000, 5).select_move(&board, Player::O).unwrap();
    assert!(mv == Square(3) || mv == Square(6), "picked {mv}");
}

#[test]
fn root_visits_match_iterations() {
    let mut agent = mcts(500, 2);
    agent.select_move(&Board::new(), Player::X).unwrap();
    let tree = agent.manager().tree();
    assert_eq!(tree.root().visits(), 500);
    assert_eq!(tree.root().num_children(), 9);
}

#[test]
fn decided_boards_are_rejected() {
    let won: Board = "XXX OO   ".parse().unwrap();
    assert!(mcts(10, 0).select_move(&won, Player::O).is_err());
    assert!(Negamax::init().select_move(&won, Player::O).is_err());
}

#[test]
fn agents_finish_a_game() {
    let mut x = mcts(2_000, 8);
    let mut o = Negamax::init();
    let mut board = Board::new();
    let mut player = Player::X;
    let mut plies = 0;
    while board.winner().is_none() {
        let agent: &mut dyn Agent = match player {
            Player::X => &mut x,
            Player::O => &mut o,
        };
        let mv = agent.select_move(&board, player).unwrap();
        board.play(mv, player);
        player = player.other();
        plies += 1;
    }
    assert!((5..=9).contains(&plies));
}
