//! Observer implementations for match monitoring

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use super::driver::MatchSummary;
use crate::{
    Result,
    ports::{Observer, Turn},
    tictactoe::{Board, GameRecord, GameResult, Player},
};

/// Structured logging observer. Emits one `tracing` event per turn at
/// debug level and one per game at info level.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Observer for TracingObserver {
    fn on_match_start(&mut self, total_games: usize) -> Result<()> {
        info!(total_games, "match started");
        Ok(())
    }

    fn on_turn(
        &mut self,
        game_num: usize,
        step_num: usize,
        board: &Board,
        player: Player,
        turn: &Turn,
    ) -> Result<()> {
        debug!(
            game = game_num,
            step = step_num,
            %player,
            board = %board.encode(),
            %turn,
            "turn"
        );
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, record: &GameRecord) -> Result<()> {
        info!(
            game = game_num,
            result = ?record.result,
            plays = record.plays.len(),
            forfeit = record.forfeit.as_ref().map(|f| f.reason.as_str()),
            "game finished"
        );
        Ok(())
    }
}

/// Metrics observer - tracks results and game lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    summary: MatchSummary,
    game_lengths: Vec<usize>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals so far
    pub fn summary(&self) -> &MatchSummary {
        &self.summary
    }

    /// Number of placements in each finished game
    pub fn game_lengths(&self) -> &[usize] {
        &self.game_lengths
    }

    /// Mean number of placements per game
    pub fn average_game_length(&self) -> f64 {
        if self.game_lengths.is_empty() {
            0.0
        } else {
            self.game_lengths.iter().sum::<usize>() as f64 / self.game_lengths.len() as f64
        }
    }
}

impl Observer for MetricsObserver {
    fn on_match_start(&mut self, _total_games: usize) -> Result<()> {
        self.summary = MatchSummary::default();
        self.game_lengths.clear();
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, record: &GameRecord) -> Result<()> {
        self.summary.record(record);
        self.game_lengths.push(record.plays.len());
        Ok(())
    }
}

/// Progress bar observer
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    draws: usize,
    o_wins: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            draws: 0,
            o_wins: 0,
        }
    }

    fn message(&self) -> String {
        format!("X:{} D:{} O:{}", self.x_wins, self.draws, self.o_wins)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_match_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, record: &GameRecord) -> Result<()> {
        match record.result {
            GameResult::Win(Player::X) => self.x_wins += 1,
            GameResult::Win(Player::O) => self.o_wins += 1,
            GameResult::Draw | GameResult::InProgress => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_match_end(&mut self, _summary: &MatchSummary) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Writes every finished game as one JSON line
pub struct JsonlObserver {
    writer: BufWriter<File>,
}

impl JsonlObserver {
    /// Create a new JSONL observer, truncating `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| crate::Error::Io {
            operation: format!("create '{}'", path.display()),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_game_end(&mut self, _game_num: usize, record: &GameRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn on_match_end(&mut self, _summary: &MatchSummary) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
