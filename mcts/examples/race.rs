use mcts::{manager::Manager, policies::PlayoutRng, policies::UCTPolicy, *};

/// Players alternately add 1, 2 or 3 to a running total; whoever reaches the
/// goal wins.
#[derive(Clone, Debug)]
struct Race {
    total: u32,
    goal: u32,
    last: Option<Side>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Side {
    First,
    Second,
}

impl GameState for Race {
    type Move = u32;
    type Player = Side;
    type MoveList = Vec<Self::Move>;

    fn legal_moves(&self) -> Self::MoveList {
        (1..=3).filter(|step| self.total + step <= self.goal).collect()
    }

    fn make_move(&mut self, mv: Self::Move, player: Self::Player) {
        self.total += mv;
        self.last = Some(player);
    }

    fn opponent(player: Self::Player) -> Self::Player {
        match player {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    fn outcome(&self, perspective: Self::Player) -> Option<f64> {
        if self.total < self.goal {
            return None;
        }
        self.last.map(|p| if p == perspective { 1.0 } else { 0.0 })
    }
}

struct RaceAI;

impl MCTS for RaceAI {
    type State = Race;
    type Select = UCTPolicy;

    fn iterations(&self) -> u64 {
        20_000
    }
}

fn main() -> Result<(), search::SearchError> {
    let mut game = Race {
        total: 0,
        goal: 21,
        last: None,
    };
    let mut player = Side::First;
    let mut mcts = Manager::new(player, RaceAI, UCTPolicy::default(), PlayoutRng::seeded(7));
    while game.outcome(player).is_none() {
        let mv = mcts.select_move(&game, player)?;
        println!("{player:?} adds {mv} (pv {:?})", mcts.pv(4));
        for info in mcts.stats() {
            println!("  +{}: {} visits, {:.3}", info.mv, info.visits, info.mean_action_value());
        }
        game.make_move(mv, player);
        player = Race::opponent(player);
        println!("total {}", game.total);
    }
    println!("{:?} wins", game.last);
    Ok(())
}
