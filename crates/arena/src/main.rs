//! Head-to-head matches and round-robin tournaments between game-playing
//! agents.
//!
//! Plays nested tic-tac-toe or Havannah between MCTS and random agents and
//! reports each agent's wins, losses and draws.

mod arena;

use anyhow::{bail, Context, Result};
use arena::{AgentKind, Entrant, MatchSummary, TournamentSummary};
use clap::{Args, Parser, Subcommand, ValueEnum};
use duel_core::Game;
use duel_havannah::Havannah;
use duel_mcts::games::NestedTicTacToe;
use duel_mcts::MctsConfig;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Game-playing agent arena.
#[derive(Parser)]
#[command(name = "duel-arena")]
#[command(about = "Play MCTS and random agents against each other")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match between two agents.
    Play {
        /// Agent that moves first in the first game.
        #[arg(long, value_enum, default_value = "mcts")]
        first: AgentKind,

        /// Agent that moves second in the first game.
        #[arg(long, value_enum, default_value = "random")]
        second: AgentKind,

        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Alternate which agent moves first.
        #[arg(long)]
        swap_seats: bool,

        #[command(flatten)]
        options: ArenaOptions,
    },

    /// Play every agent against every other.
    Tournament {
        /// Comma-separated agent kinds.
        #[arg(long, value_enum, value_delimiter = ',', default_value = "mcts,random")]
        agents: Vec<AgentKind>,

        /// Games per pairing and seat order.
        #[arg(short, long, default_value = "5")]
        games: usize,

        #[command(flatten)]
        options: ArenaOptions,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum GameKind {
    NestedTtt,
    Havannah,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::NestedTtt => write!(f, "nested-ttt"),
            GameKind::Havannah => write!(f, "havannah"),
        }
    }
}

#[derive(Args, Clone, Debug)]
struct ArenaOptions {
    /// Game to play.
    #[arg(long, value_enum, default_value = "havannah")]
    game: GameKind,

    /// Havannah side length (defaults to the standard board).
    #[arg(long)]
    board_size: Option<usize>,

    /// Seconds of search per MCTS move.
    #[arg(short, long, default_value = "1.0")]
    time_per_move: f64,

    /// Cap on MCTS iterations per move (unbounded if not set).
    #[arg(long)]
    iterations: Option<usize>,

    /// UCB1 exploration constant.
    #[arg(long, default_value_t = std::f64::consts::SQRT_2)]
    exploration: f64,

    /// Reward credited for a drawn playout.
    #[arg(long, default_value = "0.5")]
    draw_reward: f64,

    /// Rebuild the MCTS tree from scratch on every move.
    #[arg(long)]
    no_reuse: bool,

    /// Random seed for reproducibility.
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    /// Log filter, overriding RUST_LOG (e.g. "debug" or "duel_mcts=trace").
    #[arg(long)]
    log_level: Option<String>,
}

impl ArenaOptions {
    fn mcts_config(&self) -> Result<MctsConfig> {
        let time_budget = Duration::try_from_secs_f64(self.time_per_move)
            .with_context(|| format!("invalid time per move: {}", self.time_per_move))?;

        let config = MctsConfig {
            time_budget,
            max_iterations: self.iterations,
            exploration_constant: self.exploration,
            draw_reward: self.draw_reward,
            reuse_tree: !self.no_reuse,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }
}

/// A match or tournament as reported on stdout.
#[derive(Serialize)]
struct Report<T> {
    game: String,
    seed: u64,
    elapsed_secs: f64,
    #[serde(flatten)]
    results: T,
}

fn init_tracing(level: Option<&str>) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log filter: {}", level))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

/// Run `f` on the game selected by `options`.
///
/// Havannah is the only game with a size; passing one for nested
/// tic-tac-toe is ignored with a warning.
fn with_game<T>(options: &ArenaOptions, f: impl GameRunner<Output = T>) -> Result<T> {
    match options.game {
        GameKind::NestedTtt => {
            if options.board_size.is_some() {
                warn!("--board-size has no effect on nested tic-tac-toe");
            }
            f.run(&NestedTicTacToe)
        }
        GameKind::Havannah => {
            let game = match options.board_size {
                Some(size) => Havannah::new(size)?,
                None => Havannah::standard(),
            };
            f.run(&game)
        }
    }
}

/// Something to do with a concrete game type.
trait GameRunner {
    type Output;

    fn run<G>(self, game: &G) -> Result<Self::Output>
    where
        G: Game + 'static,
        G::State: fmt::Display + 'static,
        G::Action: 'static;
}

struct Play<'a> {
    entrants: &'a [Entrant],
    config: &'a MctsConfig,
    games: usize,
    swap_seats: bool,
}

impl GameRunner for Play<'_> {
    type Output = MatchSummary;

    fn run<G>(self, game: &G) -> Result<MatchSummary>
    where
        G: Game + 'static,
        G::State: fmt::Display + 'static,
        G::Action: 'static,
    {
        arena::run_match(
            game,
            [&self.entrants[0], &self.entrants[1]],
            self.config,
            self.games,
            self.swap_seats,
        )
    }
}

struct Tournament<'a> {
    entrants: &'a [Entrant],
    config: &'a MctsConfig,
    games_per_seat: usize,
}

impl GameRunner for Tournament<'_> {
    type Output = TournamentSummary;

    fn run<G>(self, game: &G) -> Result<TournamentSummary>
    where
        G: Game + 'static,
        G::State: fmt::Display + 'static,
        G::Action: 'static,
    {
        arena::run_tournament(game, self.entrants, self.config, self.games_per_seat)
    }
}

fn json_report<T: Serialize>(options: &ArenaOptions, elapsed: Duration, results: T) -> Result<String> {
    let report = Report {
        game: options.game.to_string(),
        seed: options.seed,
        elapsed_secs: elapsed.as_secs_f64(),
        results,
    };
    serde_json::to_string_pretty(&report).context("failed to serialize results")
}

fn print_report<T: Serialize>(
    options: &ArenaOptions,
    elapsed: Duration,
    results: T,
    table: impl FnOnce(&T) -> String,
) -> Result<()> {
    if options.json {
        println!("{}", json_report(options, elapsed, results)?);
    } else {
        println!("{}", table(&results));
        println!("Completed in {:.2}s", elapsed.as_secs_f64());
    }
    Ok(())
}

fn cmd_play(
    first: AgentKind,
    second: AgentKind,
    games: usize,
    swap_seats: bool,
    options: &ArenaOptions,
) -> Result<()> {
    let config = options.mcts_config()?;
    let entrants = Entrant::lineup(&[first, second], options.seed);
    info!(
        game = %options.game,
        first = %entrants[0].name,
        second = %entrants[1].name,
        games,
        "Starting match"
    );

    let start = Instant::now();
    let summary = with_game(
        options,
        Play {
            entrants: &entrants,
            config: &config,
            games,
            swap_seats,
        },
    )?;

    print_report(options, start.elapsed(), summary, |summary| {
        let average = if summary.games == 0 {
            0.0
        } else {
            summary.total_moves as f64 / summary.games as f64
        };
        format!(
            "{}\nGames: {}  First seat wins: {}  Average length: {:.1} moves",
            arena::standings_table(&summary.standings),
            summary.games,
            summary.first_seat_wins,
            average
        )
    })
}

fn cmd_tournament(agents: &[AgentKind], games: usize, options: &ArenaOptions) -> Result<()> {
    if agents.len() < 2 {
        bail!("a tournament needs at least two agents, got {}", agents.len());
    }
    let config = options.mcts_config()?;
    let entrants = Entrant::lineup(agents, options.seed);
    info!(game = %options.game, entrants = entrants.len(), games, "Starting tournament");

    let start = Instant::now();
    let summary = with_game(
        options,
        Tournament {
            entrants: &entrants,
            config: &config,
            games_per_seat: games,
        },
    )?;

    print_report(options, start.elapsed(), summary, |summary| {
        arena::standings_table(&summary.standings)
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            first,
            second,
            games,
            swap_seats,
            options,
        } => {
            init_tracing(options.log_level.as_deref())?;
            cmd_play(first, second, games, swap_seats, &options)
        }

        Commands::Tournament {
            agents,
            games,
            options,
        } => {
            init_tracing(options.log_level.as_deref())?;
            cmd_tournament(&agents, games, &options)
        }
    }
}
