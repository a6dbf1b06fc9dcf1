//! Matches between agents: single games, seat-swapping matches and
//! round-robin tournaments, with per-agent tallies.

use anyhow::{Context, Result};
use clap::ValueEnum;
use duel_core::{Game, Outcome, Player};
use duel_mcts::{Agent, MctsAgent, MctsConfig, RandomAgent, RandomRollout};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// The kinds of agent the arena can seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Mcts,
    Random,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Mcts => write!(f, "mcts"),
            AgentKind::Random => write!(f, "random"),
        }
    }
}

/// A participant in a match or tournament.
#[derive(Clone, Debug)]
pub struct Entrant {
    pub name: String,
    pub kind: AgentKind,
    pub seed: u64,
}

impl Entrant {
    /// Entrants named after their kind and position, each with its own seed.
    pub fn lineup(kinds: &[AgentKind], seed: u64) -> Vec<Entrant> {
        kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| Entrant {
                name: format!("{}-{}", kind, i + 1),
                kind,
                seed: seed.wrapping_add(i as u64 * 1000),
            })
            .collect()
    }

    /// Build a fresh agent for this entrant.
    pub fn build<G>(&self, config: &MctsConfig) -> Box<dyn Agent<G>>
    where
        G: Game + 'static,
        G::State: 'static,
        G::Action: 'static,
    {
        let rng = ChaCha8Rng::seed_from_u64(self.seed);
        match self.kind {
            AgentKind::Mcts => Box::new(MctsAgent::new(
                self.name.clone(),
                config.clone(),
                RandomRollout,
                rng,
            )),
            AgentKind::Random => Box::new(RandomAgent::new(self.name.clone(), rng)),
        }
    }
}

/// Wins, losses and draws of one agent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub agent: String,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl Standing {
    pub fn new(agent: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            ..Default::default()
        }
    }

    pub fn games(&self) -> usize {
        self.wins + self.losses + self.draws
    }

    /// One point per win and half a point per draw.
    pub fn points(&self) -> f64 {
        self.wins as f64 + self.draws as f64 / 2.0
    }

    fn record(&mut self, outcome: Outcome, seat: Player) {
        match outcome {
            Outcome::Win(winner) if winner == seat => self.wins += 1,
            Outcome::Win(_) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    fn absorb(&mut self, other: &Standing) {
        self.wins += other.wins;
        self.losses += other.losses;
        self.draws += other.draws;
    }
}

/// A finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub moves: usize,
}

/// Results of a head-to-head match.
#[derive(Clone, Debug, Serialize)]
pub struct MatchSummary {
    pub games: usize,
    pub total_moves: usize,
    pub first_seat_wins: usize,
    pub standings: [Standing; 2],
}

/// Results of a round-robin tournament.
#[derive(Clone, Debug, Serialize)]
pub struct TournamentSummary {
    pub matches: Vec<MatchSummary>,
    pub standings: Vec<Standing>,
}

/// Play one game to the end.
///
/// `seats[0]` moves first. Every action is passed to both agents.
pub fn play_game<G: Game>(game: &G, mut seats: [&mut dyn Agent<G>; 2]) -> Result<GameRecord>
where
    G::State: fmt::Display,
{
    for agent in seats.iter_mut() {
        agent.reset();
    }

    let mut state = game.initial_state();
    let mut moves = 0;

    while !game.is_terminal(&state) {
        let player = game.current_player(&state);
        let agent = &mut seats[player.index()];
        let action = agent
            .choose_action(game, &state)
            .with_context(|| format!("{} failed to choose an action", agent.name()))?;
        debug!(agent = agent.name(), %player, ?action, "Move");

        state = game
            .apply(&state, action)
            .with_context(|| format!("{} played an illegal action", agent.name()))?;
        for agent in seats.iter_mut() {
            agent.observe_action(game, action);
        }
        moves += 1;
    }

    let outcome = game
        .outcome(&state)
        .context("terminal position reported no outcome")?;
    debug!("Final position:\n{}", state);

    Ok(GameRecord { outcome, moves })
}

/// Play `games` games between two entrants.
///
/// With `swap_seats` the entrants alternate who moves first, starting with
/// `entrants[0]`.
pub fn run_match<G>(
    game: &G,
    entrants: [&Entrant; 2],
    config: &MctsConfig,
    games: usize,
    swap_seats: bool,
) -> Result<MatchSummary>
where
    G: Game + 'static,
    G::State: fmt::Display + 'static,
    G::Action: 'static,
{
    let mut agents: [Box<dyn Agent<G>>; 2] = [entrants[0].build(config), entrants[1].build(config)];
    let mut standings = [
        Standing::new(entrants[0].name.clone()),
        Standing::new(entrants[1].name.clone()),
    ];
    let mut total_moves = 0;
    let mut first_seat_wins = 0;

    for i in 0..games {
        // Index into `agents` of the entrant moving first.
        let first = if swap_seats { i % 2 } else { 0 };
        let [a, b] = &mut agents;
        let seats: [&mut dyn Agent<G>; 2] = if first == 0 {
            [a.as_mut(), b.as_mut()]
        } else {
            [b.as_mut(), a.as_mut()]
        };

        let record = play_game(game, seats)
            .with_context(|| format!("game {} of {}", i + 1, games))?;

        standings[first].record(record.outcome, Player::One);
        standings[1 - first].record(record.outcome, Player::Two);
        if record.outcome == Outcome::Win(Player::One) {
            first_seat_wins += 1;
        }
        total_moves += record.moves;

        info!(
            game = i + 1,
            first = %standings[first].agent,
            second = %standings[1 - first].agent,
            moves = record.moves,
            "{}",
            describe(record.outcome, &standings[first].agent, &standings[1 - first].agent)
        );
    }

    Ok(MatchSummary {
        games,
        total_moves,
        first_seat_wins,
        standings,
    })
}

/// Every entrant plays every other, `games_per_seat` games with each seat
/// order.
pub fn run_tournament<G>(
    game: &G,
    entrants: &[Entrant],
    config: &MctsConfig,
    games_per_seat: usize,
) -> Result<TournamentSummary>
where
    G: Game + 'static,
    G::State: fmt::Display + 'static,
    G::Action: 'static,
{
    let mut standings: Vec<Standing> = entrants.iter().map(|e| Standing::new(e.name.clone())).collect();
    let mut matches = Vec::new();

    for i in 0..entrants.len() {
        for j in i + 1..entrants.len() {
            info!(first = %entrants[i].name, second = %entrants[j].name, "Starting pairing");
            let summary = run_match(
                game,
                [&entrants[i], &entrants[j]],
                config,
                games_per_seat * 2,
                true,
            )?;
            standings[i].absorb(&summary.standings[0]);
            standings[j].absorb(&summary.standings[1]);
            matches.push(summary);
        }
    }

    // Stable sort keeps entry order among equal scores.
    standings.sort_by(|a, b| b.points().total_cmp(&a.points()));

    Ok(TournamentSummary { matches, standings })
}

fn describe(outcome: Outcome, first: &str, second: &str) -> String {
    match outcome {
        Outcome::Win(Player::One) => format!("{} wins", first),
        Outcome::Win(Player::Two) => format!("{} wins", second),
        Outcome::Draw => "Draw".to_string(),
    }
}

/// Render standings as a plain-text table.
pub fn standings_table(standings: &[Standing]) -> String {
    let width = standings
        .iter()
        .map(|s| s.agent.len())
        .max()
        .unwrap_or(0)
        .max("Agent".len());

    let mut out = format!(
        "{:<width$}  {:>5}  {:>6}  {:>5}  {:>6}\n",
        "Agent", "Wins", "Losses", "Draws", "Points"
    );
    for s in standings {
        out.push_str(&format!(
            "{:<width$}  {:>5}  {:>6}  {:>5}  {:>6.1}\n",
            s.agent,
            s.wins,
            s.losses,
            s.draws,
            s.points()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_mcts::games::NestedTicTacToe;

    fn quick_config() -> MctsConfig {
        MctsConfig::with_iterations(30)
    }

    #[test]
    fn test_lineup_names_and_seeds() {
        let entrants = Entrant::lineup(&[AgentKind::Mcts, AgentKind::Random, AgentKind::Mcts], 7);
        let names: Vec<_> = entrants.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["mcts-1", "random-2", "mcts-3"]);
        assert_eq!(entrants[0].seed, 7);
        assert_eq!(entrants[2].seed, 2007);
    }

    #[test]
    fn test_play_game_finishes() {
        let game = NestedTicTacToe;
        let entrants = Entrant::lineup(&[AgentKind::Random, AgentKind::Random], 3);
        let mut a = entrants[0].build::<NestedTicTacToe>(&quick_config());
        let mut b = entrants[1].build::<NestedTicTacToe>(&quick_config());

        let record = play_game(&game, [a.as_mut(), b.as_mut()]).unwrap();
        // Nobody can win a sub-board, let alone three, in fewer moves
        assert!(record.moves >= 17);
        assert!(record.moves <= 81);
    }

    #[test]
    fn test_match_tallies_add_up() {
        let game = NestedTicTacToe;
        let entrants = Entrant::lineup(&[AgentKind::Mcts, AgentKind::Random], 11);
        let summary = run_match(&game, [&entrants[0], &entrants[1]], &quick_config(), 4, true).unwrap();

        assert_eq!(summary.games, 4);
        for standing in &summary.standings {
            assert_eq!(standing.games(), 4);
        }
        assert_eq!(summary.standings[0].wins, summary.standings[1].losses);
        assert_eq!(summary.standings[0].draws, summary.standings[1].draws);
        assert!(summary.first_seat_wins <= summary.standings[0].wins + summary.standings[1].wins);
    }

    #[test]
    fn test_match_is_reproducible() {
        let game = NestedTicTacToe;
        let entrants = Entrant::lineup(&[AgentKind::Mcts, AgentKind::Random], 5);
        let run = || run_match(&game, [&entrants[0], &entrants[1]], &quick_config(), 2, true).unwrap();

        let (first, second) = (run(), run());
        assert_eq!(first.standings, second.standings);
        assert_eq!(first.total_moves, second.total_moves);
    }

    #[test]
    fn test_tournament_plays_every_pairing() {
        let game = NestedTicTacToe;
        let entrants = Entrant::lineup(&[AgentKind::Random, AgentKind::Random, AgentKind::Random], 1);
        let summary = run_tournament(&game, &entrants, &quick_config(), 1).unwrap();

        assert_eq!(summary.matches.len(), 3);
        for standing in &summary.standings {
            assert_eq!(standing.games(), 4);
        }
        let points: Vec<f64> = summary.standings.iter().map(Standing::points).collect();
        assert!(points.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(points.iter().sum::<f64>(), 6.0);
    }

    #[test]
    fn test_standings_table() {
        let mut standing = Standing::new("mcts-1");
        standing.wins = 3;
        standing.draws = 1;
        let table = standings_table(&[standing]);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Agent"));
        assert!(lines[1].starts_with("mcts-1"));
        assert!(lines[1].ends_with("3.5"));
    }
}
