use std::{
    fs,
    sync::{Arc, Mutex},
};

use tempfile::tempdir;
use ttt_minimax::{
    Board, GameResult, Player,
    pipeline::{JsonlObserver, MatchConfig, MatchRunner, MetricsObserver},
    ports::{Decision, Observer, Strategy, Turn},
    strategy::{MinimaxStrategy, MonteCarloConfig, MonteCarloStrategy, RandomStrategy},
    tictactoe::GameRecord,
};

/// Shares the turns it sees with the test
#[derive(Clone, Default)]
struct TurnLog(Arc<Mutex<Vec<(usize, Player, Turn)>>>);

impl Observer for TurnLog {
    fn on_turn(
        &mut self,
        _game_num: usize,
        step_num: usize,
        _board: &Board,
        player: Player,
        turn: &Turn,
    ) -> ttt_minimax::Result<()> {
        self.0.lock().unwrap().push((step_num, player, turn.clone()));
        Ok(())
    }
}

/// Returns an error instead of a move
struct Broken;

impl Strategy for Broken {
    fn decide(&mut self, _board: &Board, _player: Player) -> ttt_minimax::Result<Decision> {
        Err(ttt_minimax::Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        "broken"
    }
}

#[test]
fn minimax_never_loses_to_monte_carlo() {
    let config = MatchConfig::default().with_games(6).with_seed(17);
    let mut runner = MatchRunner::new(config).unwrap();
    let mut x = MonteCarloStrategy::new("mc", MonteCarloConfig::default());
    let mut o = MinimaxStrategy::new("mm");

    let summary = runner.run(&mut x, &mut o).unwrap();
    assert_eq!(summary.games, 6);
    assert_eq!(summary.x_wins, 0);
    assert_eq!(summary.forfeits, 0);
}

#[test]
fn seeded_matches_are_reproducible() {
    let play = || {
        let config = MatchConfig::default()
            .with_games(3)
            .with_seed(5)
            .with_first_player(Player::O);
        let log = TurnLog::default();
        let mut runner = MatchRunner::new(config)
            .unwrap()
            .with_observer(Box::new(log.clone()));
        let mut x = RandomStrategy::new("x");
        let mut o = MonteCarloStrategy::new("o", MonteCarloConfig::default());
        runner.run(&mut x, &mut o).unwrap();
        let turns = log.0.lock().unwrap().clone();
        turns
    };

    let first = play();
    let second = play();
    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(first[0].1, Player::O, "O opens every game");
}

#[test]
fn strategy_errors_become_illegal_turns() {
    let log = TurnLog::default();
    let mut runner = MatchRunner::new(MatchConfig::default())
        .unwrap()
        .with_observer(Box::new(log.clone()));
    let mut x = Broken;
    let mut o = RandomStrategy::with_seed("o", 1);

    let record = runner.play_game(0, &mut x, &mut o).unwrap();
    assert_eq!(record.result, GameResult::Win(Player::O));
    assert!(record.plays.is_empty());

    let turns = log.0.lock().unwrap();
    assert_eq!(turns.len(), 1);
    assert!(matches!(
        &turns[0].2,
        Turn::Illegal { attempted: None, reason } if reason.contains("broken failed")
    ));
}

#[test]
fn jsonl_export_writes_one_game_per_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("games.jsonl");

    let config = MatchConfig::default().with_games(3).with_seed(2);
    let mut runner = MatchRunner::new(config)
        .unwrap()
        .with_observer(Box::new(JsonlObserver::new(&path).unwrap()))
        .with_observer(Box::new(MetricsObserver::new()));
    let mut x = MinimaxStrategy::new("x");
    let mut o = RandomStrategy::new("o");
    let summary = runner.run(&mut x, &mut o).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let records: Vec<GameRecord> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), summary.games);
    for record in &records {
        let board = record.replay().unwrap();
        assert_eq!(board.terminal_result(), record.result);
        assert_ne!(record.result, GameResult::Win(Player::O));
    }
}

#[test]
fn match_config_loads_from_json_with_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("match.json");
    fs::write(&path, r#"{ "games": 4, "first_player": "O", "move_time_limit_ms": 500 }"#).unwrap();

    let config = MatchConfig::load(&path).unwrap();
    assert_eq!(config.dim, 3);
    assert_eq!(config.games, 4);
    assert_eq!(config.first_player, Player::O);
    assert_eq!(
        config.move_time_limit(),
        Some(std::time::Duration::from_millis(500))
    );

    fs::write(&path, r#"{ "dim": 0 }"#).unwrap();
    assert!(MatchConfig::load(&path).is_err());
}

#[test]
fn summary_round_trips_through_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("summary.json");

    let mut runner = MatchRunner::new(MatchConfig::default().with_games(2)).unwrap();
    let mut x = MinimaxStrategy::new("x");
    let mut o = MinimaxStrategy::new("o");
    let summary = runner.run(&mut x, &mut o).unwrap();
    assert_eq!(summary.draws, 2);

    summary.save(&path).unwrap();
    let loaded: ttt_minimax::pipeline::MatchSummary =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded, summary);
}
