//! Match driver: alternates two strategies on a live board

use std::{
    path::Path,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    Error, Result,
    ports::{Decision, Observer, Strategy, Turn},
    tictactoe::{Board, Forfeit, GameRecord, GameResult, Play, Player},
};

/// Match configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Board side length
    pub dim: usize,

    /// Which player opens every game
    pub first_player: Player,

    /// Number of games to play
    pub games: usize,

    /// Random seed; X is seeded with `seed`, O with `seed + 1`
    pub seed: Option<u64>,

    /// Wall-clock budget per decision in milliseconds. A strategy that
    /// overruns it forfeits the game.
    pub move_time_limit_ms: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            dim: 3,
            first_player: Player::X,
            games: 1,
            seed: None,
            move_time_limit_ms: None,
        }
    }
}

impl MatchConfig {
    pub fn with_dim(mut self, dim: usize) -> Self {
        self.dim = dim;
        self
    }

    pub fn with_first_player(mut self, player: Player) -> Self {
        self.first_player = player;
        self
    }

    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    /// Set the random seed for deterministic matches
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_move_time_limit(mut self, limit: Duration) -> Self {
        self.move_time_limit_ms = Some(limit.as_millis() as u64);
        self
    }

    pub fn move_time_limit(&self) -> Option<Duration> {
        self.move_time_limit_ms.map(Duration::from_millis)
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.dim == 0 {
            return Err(Error::InvalidDimension { dim: self.dim });
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open match config '{}'", path.display()),
            source,
        })?;
        let config: MatchConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }
}

/// Aggregate result of a match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    /// Games decided by resignation or an illegal turn (also counted as wins)
    pub forfeits: usize,
}

impl MatchSummary {
    /// Fold a finished game into the totals
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        match game.result {
            GameResult::Win(Player::X) => self.x_wins += 1,
            GameResult::Win(Player::O) => self.o_wins += 1,
            GameResult::Draw | GameResult::InProgress => self.draws += 1,
        }
        if game.forfeit.is_some() {
            self.forfeits += 1;
        }
    }

    pub fn draw_rate(&self) -> f64 {
        if self.games > 0 {
            self.draws as f64 / self.games as f64
        } else {
            0.0
        }
    }

    /// Save summary to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Runs games between two strategies, validating every decision
pub struct MatchRunner {
    config: MatchConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl MatchRunner {
    /// Create a runner for a validated configuration
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the runner
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play `config.games` games between `x` and `o`
    pub fn run(&mut self, x: &mut dyn Strategy, o: &mut dyn Strategy) -> Result<MatchSummary> {
        if let Some(seed) = self.config.seed {
            x.set_rng_seed(seed)?;
            o.set_rng_seed(seed.wrapping_add(1))?;
        }

        for observer in &mut self.observers {
            observer.on_match_start(self.config.games)?;
        }

        let mut summary = MatchSummary::default();
        for game_num in 0..self.config.games {
            let record = self.play_game(game_num, x, o)?;
            summary.record(&record);
        }

        for observer in &mut self.observers {
            observer.on_match_end(&summary)?;
        }

        info!(
            x = x.name(),
            o = o.name(),
            games = summary.games,
            x_wins = summary.x_wins,
            o_wins = summary.o_wins,
            draws = summary.draws,
            forfeits = summary.forfeits,
            "match finished"
        );
        Ok(summary)
    }

    /// Play a single game from an empty board.
    ///
    /// A resignation or illegal turn ends the game immediately with the
    /// opponent as winner; the live board is never touched by an invalid move.
    pub fn play_game(
        &mut self,
        game_num: usize,
        x: &mut dyn Strategy,
        o: &mut dyn Strategy,
    ) -> Result<GameRecord> {
        let mut board = Board::new(self.config.dim)?;
        let mut record = GameRecord::new(self.config.dim, self.config.first_player);
        let mut player = self.config.first_player;
        let limit = self.config.move_time_limit();

        for observer in &mut self.observers {
            observer.on_game_start(game_num)?;
        }

        let mut step_num = 0;
        while !board.terminal_result().is_terminal() {
            let turn = match player {
                Player::X => take_turn(&board, player, x, limit),
                Player::O => take_turn(&board, player, o, limit),
            };

            for observer in &mut self.observers {
                observer.on_turn(game_num, step_num, &board, player, &turn)?;
            }

            match turn {
                Turn::Move(mv) => {
                    board.place(mv, player)?;
                    record.plays.push(Play { player, mv });
                }
                forfeited => {
                    let reason = forfeited.forfeit_reason().unwrap_or_default();
                    warn!(game = game_num, %player, %reason, "game forfeited");
                    record.forfeit = Some(Forfeit { player, reason });
                    break;
                }
            }

            player = player.opponent();
            step_num += 1;
        }

        record.result = match &record.forfeit {
            Some(forfeit) => GameResult::Win(forfeit.player.opponent()),
            None => board.terminal_result(),
        };

        for observer in &mut self.observers {
            observer.on_game_end(game_num, &record)?;
        }
        Ok(record)
    }
}

/// Ask `strategy` for a decision and validate it against `board`
fn take_turn(
    board: &Board,
    player: Player,
    strategy: &mut dyn Strategy,
    limit: Option<Duration>,
) -> Turn {
    let started = Instant::now();
    let decision = strategy.decide(board, player);
    let elapsed = started.elapsed();

    let decision = match decision {
        Ok(decision) => decision,
        Err(err) => {
            return Turn::Illegal {
                attempted: None,
                reason: format!("{} failed: {err}", strategy.name()),
            };
        }
    };

    if let Some(limit) = limit.filter(|&limit| elapsed > limit) {
        return Turn::Illegal {
            attempted: match decision {
                Decision::Move(mv) => Some(mv),
                Decision::Resign => None,
            },
            reason: format!(
                "{} took {} ms, over the {} ms limit",
                strategy.name(),
                elapsed.as_millis(),
                limit.as_millis()
            ),
        };
    }

    match decision {
        Decision::Resign => Turn::Resign,
        Decision::Move(mv) if board.is_empty(mv) => Turn::Move(mv),
        Decision::Move(mv) => {
            let reason = if mv.row >= board.dim() || mv.col >= board.dim() {
                format!("square {mv} is off the {0}x{0} board", board.dim())
            } else {
                format!("square {mv} is already occupied")
            };
            Turn::Illegal {
                attempted: Some(mv),
                reason,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        strategy::{MinimaxStrategy, RandomStrategy},
        tictactoe::Move,
    };

    /// Always plays the same square
    struct Stubborn(Move);

    impl Strategy for Stubborn {
        fn decide(&mut self, _board: &Board, _player: Player) -> Result<Decision> {
            Ok(Decision::Move(self.0))
        }

        fn name(&self) -> &str {
            "stubborn"
        }
    }

    struct Quitter;

    impl Strategy for Quitter {
        fn decide(&mut self, _board: &Board, _player: Player) -> Result<Decision> {
            Ok(Decision::Resign)
        }

        fn name(&self) -> &str {
            "quitter"
        }
    }

    struct Slow;

    impl Strategy for Slow {
        fn decide(&mut self, board: &Board, _player: Player) -> Result<Decision> {
            std::thread::sleep(Duration::from_millis(30));
            Ok(Decision::Move(board.empty_cells()[0]))
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    #[test]
    fn test_minimax_self_play_is_a_draw() {
        let mut runner = MatchRunner::new(MatchConfig::default()).unwrap();
        let mut x = MinimaxStrategy::new("x");
        let mut o = MinimaxStrategy::new("o");
        let record = runner.play_game(0, &mut x, &mut o).unwrap();
        assert_eq!(record.result, GameResult::Draw);
        assert_eq!(record.plays.len(), 9);
        assert_eq!(record.replay().unwrap().encode(), "XOXXOOOXX");
    }

    #[test]
    fn test_occupied_square_forfeits() {
        let mut runner = MatchRunner::new(MatchConfig::default()).unwrap();
        let mut x = Stubborn(Move::new(0, 0));
        let mut o = Stubborn(Move::new(0, 0));
        let record = runner.play_game(0, &mut x, &mut o).unwrap();

        assert_eq!(record.plays.len(), 1);
        assert_eq!(record.result, GameResult::Win(Player::X));
        let forfeit = record.forfeit.unwrap();
        assert_eq!(forfeit.player, Player::O);
        assert!(forfeit.reason.contains("occupied"));
    }

    #[test]
    fn test_off_board_move_forfeits() {
        let mut runner = MatchRunner::new(MatchConfig::default()).unwrap();
        let mut x = Stubborn(Move::new(5, 5));
        let mut o = RandomStrategy::with_seed("r", 1);
        let record = runner.play_game(0, &mut x, &mut o).unwrap();
        assert!(record.plays.is_empty());
        assert_eq!(record.result, GameResult::Win(Player::O));
        assert!(record.forfeit.unwrap().reason.contains("off the 3x3 board"));
    }

    #[test]
    fn test_resignation() {
        let config = MatchConfig::default().with_first_player(Player::O);
        let mut runner = MatchRunner::new(config).unwrap();
        let mut x = RandomStrategy::with_seed("r", 1);
        let mut o = Quitter;
        let record = runner.play_game(0, &mut x, &mut o).unwrap();
        assert_eq!(record.result, GameResult::Win(Player::X));
        assert_eq!(record.forfeit.unwrap().reason, "resigned");
    }

    #[test]
    fn test_time_limit_forfeits() {
        let config = MatchConfig::default().with_move_time_limit(Duration::from_millis(1));
        let mut runner = MatchRunner::new(config).unwrap();
        let mut x = Slow;
        let mut o = RandomStrategy::with_seed("r", 1);
        let record = runner.play_game(0, &mut x, &mut o).unwrap();
        assert_eq!(record.result, GameResult::Win(Player::O));
        assert!(record.forfeit.unwrap().reason.contains("limit"));
    }

    #[test]
    fn test_summary_counts() {
        let config = MatchConfig::default().with_games(4).with_seed(9);
        let mut runner = MatchRunner::new(config).unwrap();
        let mut x = MinimaxStrategy::new("x");
        let mut o = RandomStrategy::new("o");
        let summary = runner.run(&mut x, &mut o).unwrap();
        assert_eq!(summary.games, 4);
        assert_eq!(summary.o_wins, 0);
        assert_eq!(summary.x_wins + summary.draws, 4);
        assert_eq!(summary.forfeits, 0);
    }

    #[test]
    fn test_invalid_dimension_rejected() {
        assert!(MatchRunner::new(MatchConfig::default().with_dim(0)).is_err());
    }
}
