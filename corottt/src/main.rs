use std::{fs::File, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use coro::Scheduler;
use mcts::policies::PlayoutRng;
use tictactoe::{Agent, MctsAgent, Negamax};
use tracing::info;
use ttt_types::Player;

use config::{AgentKind, Cli, Config};
use game::Game;
use input::{NoInput, TerminalInput};
use screen::PlainScreen;
use tui::TuiScreen;

pub mod ai_debug;
pub mod board;
pub mod config;
pub mod game;
pub mod input;
pub mod moves;
pub mod popup;
pub mod screen;
pub mod tasks;
pub mod tui;

/// Logs go to a file so they do not tear up the terminal UI.
fn init_tracing(level: &str, path: &Path) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();

    Ok(())
}

fn build_agent(config: &Config, player: Player) -> Result<Box<dyn Agent>> {
    Ok(match config.agent(player) {
        AgentKind::Mcts => {
            let rng = match config.seed {
                // Distinct streams when both sides search.
                Some(seed) => PlayoutRng::seeded(seed.wrapping_add(player as u64)),
                None => PlayoutRng::from_entropy().context("failed to seed playouts")?,
            };
            Box::new(MctsAgent::new(config.iterations, config.exploration, rng))
        }
        AgentKind::Negamax => Box::new(Negamax::with_depth(config.depth)),
    })
}

fn run(game: Game, x: Box<dyn Agent>, o: Box<dyn Agent>) -> Result<Game> {
    let mut sched = Scheduler::new(game);
    tasks::register(&mut sched, x, o);
    let summary = sched.run().context("scheduler failed")?;
    info!(
        dispatches = summary.dispatches,
        finished = ?summary.finished,
        "scheduler returned"
    );
    Ok(sched.into_context())
}

fn report(game: &Game) {
    for (idx, record) in game.finished.iter().enumerate() {
        println!("Round {}: {}", idx + 1, record.result);
        println!("{}", record.history);
    }
    println!(
        "X won {}, O won {}, draws {}",
        game.wins[Player::X],
        game.wins[Player::O],
        game.draws
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli)?;
    init_tracing(&config.log_level, &config.log_file)?;
    info!(?config, "starting");

    let x = build_agent(&config, Player::X)?;
    let o = build_agent(&config, Player::O)?;

    let game = if config.headless {
        let game = Game::new(
            config.rounds,
            Box::new(NoInput),
            Box::new(PlainScreen::stdout()),
        );
        run(game, x, o)?
    } else {
        let terminal = ratatui::init();
        let game = Game::new(
            config.rounds,
            Box::new(TerminalInput),
            Box::new(TuiScreen::new(terminal)),
        );
        let result = run(game, x, o);
        ratatui::restore();
        result?
    };

    report(&game);
    info!(rounds = game.finished.len(), "done");
    if let Some(fault) = game.fault {
        return Err(anyhow::Error::new(fault).context("the game stopped early"));
    }
    Ok(())
}
