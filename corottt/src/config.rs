//! Settings come from built-in defaults, then an optional RON file, then
//! command line flags, each overriding the one before.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tictactoe::negamax::DEFAULT_DEPTH;
use tracing::level_filters::LevelFilter;
use ttt_types::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Mcts,
    Negamax,
}

#[derive(Parser, Debug, Default)]
#[command(name = "corottt")]
#[command(about = "Two tic-tac-toe engines taking turns under a cooperative scheduler")]
#[command(long_about = "Runs MCTS and negamax engines against each other for a number of \
rounds. Ctrl+P pauses drawing, Ctrl+Q quits.

Settings are read from an optional RON file; flags override it.")]
pub struct Cli {
    /// RON file with settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rounds to play
    #[arg(long)]
    pub rounds: Option<u32>,

    /// MCTS playouts per move
    #[arg(long)]
    pub iterations: Option<u64>,

    /// UCT exploration constant
    #[arg(long)]
    pub exploration: Option<f64>,

    /// Seed for the MCTS playouts (OS entropy when absent)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Engine playing X
    #[arg(long, value_enum)]
    pub x: Option<AgentKind>,

    /// Engine playing O
    #[arg(long, value_enum)]
    pub o: Option<AgentKind>,

    /// Negamax search depth in plies
    #[arg(long)]
    pub depth: Option<u32>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins over it
    #[arg(long)]
    pub log_level: Option<String>,

    /// File the log is written to
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print boards as text instead of the terminal UI; no keyboard
    #[arg(long)]
    pub headless: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rounds: u32,
    pub iterations: u64,
    pub exploration: f64,
    pub seed: Option<u64>,
    pub agent_x: AgentKind,
    pub agent_o: AgentKind,
    pub depth: u32,
    pub log_level: String,
    pub log_file: PathBuf,
    pub headless: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rounds: 1,
            iterations: 100_000,
            exploration: std::f64::consts::SQRT_2,
            seed: None,
            agent_x: AgentKind::Mcts,
            agent_o: AgentKind::Negamax,
            depth: DEFAULT_DEPTH,
            log_level: "info".into(),
            log_file: PathBuf::from("corottt.log"),
            headless: false,
        }
    }
}

impl Config {
    /// Defaults, overridden by `--config`, overridden by the other flags.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_ron(&text)
    }

    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    fn apply(&mut self, cli: &Cli) {
        if let Some(rounds) = cli.rounds {
            self.rounds = rounds;
        }
        if let Some(iterations) = cli.iterations {
            self.iterations = iterations;
        }
        if let Some(exploration) = cli.exploration {
            self.exploration = exploration;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(kind) = cli.x {
            self.agent_x = kind;
        }
        if let Some(kind) = cli.o {
            self.agent_o = kind;
        }
        if let Some(depth) = cli.depth {
            self.depth = depth;
        }
        if let Some(level) = &cli.log_level {
            self.log_level.clone_from(level);
        }
        if let Some(path) = &cli.log_file {
            self.log_file.clone_from(path);
        }
        self.headless |= cli.headless;
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::Invalid(
                "iterations must be greater than 0".into(),
            ));
        }
        if self.depth == 0 {
            return Err(ConfigError::Invalid("depth must be greater than 0".into()));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "exploration must be a non-negative number, got {}",
                self.exploration
            )));
        }
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn agent(&self, player: Player) -> AgentKind {
        match player {
            Player::X => self.agent_x,
            Player::O => self.agent_o,
        }
    }
}
