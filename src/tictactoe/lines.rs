//! Winning line analysis for N×N Tic-Tac-Toe

use std::collections::BTreeSet;

use super::{Cell, Player};

/// A winning line, described as an arithmetic run of `dim` cell indices
/// into the row-major cell vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    pub start: usize,
    pub step: usize,
}

impl Line {
    /// Row-major indices covered by this line
    pub fn cells(self, dim: usize) -> impl Iterator<Item = usize> {
        (0..dim).map(move |i| self.start + i * self.step)
    }
}

/// All winning lines on a `dim`×`dim` board: rows, then columns, then the
/// main diagonal and the anti-diagonal.
pub fn winning_lines(dim: usize) -> impl Iterator<Item = Line> {
    let rows = (0..dim).map(move |row| Line {
        start: row * dim,
        step: 1,
    });
    let cols = (0..dim).map(move |col| Line {
        start: col,
        step: dim,
    });
    let diagonals = [
        Line {
            start: 0,
            step: dim + 1,
        },
        Line {
            start: dim.saturating_sub(1),
            step: dim.saturating_sub(1),
        },
    ];
    rows.chain(cols).chain(diagonals)
}

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player owns a complete line
    pub fn has_won(cells: &[Cell], dim: usize, player: Player) -> bool {
        let target = player.to_cell();
        winning_lines(dim).any(|line| line.cells(dim).all(|idx| cells[idx] == target))
    }

    /// Find all cell indices that would immediately complete a line for the player
    pub fn winning_moves(cells: &[Cell], dim: usize, player: Player) -> BTreeSet<usize> {
        winning_lines(dim)
            .filter_map(|line| Self::winning_move_in_line(cells, dim, player, line))
            .collect()
    }

    /// Check if a player has an immediate winning move available
    pub fn has_immediate_win(cells: &[Cell], dim: usize, player: Player) -> bool {
        winning_lines(dim).any(|line| Self::winning_move_in_line(cells, dim, player, line).is_some())
    }

    /// The single empty cell of a line whose other cells all belong to `player`
    fn winning_move_in_line(
        cells: &[Cell],
        dim: usize,
        player: Player,
        line: Line,
    ) -> Option<usize> {
        let target = player.to_cell();
        let mut count = 0;
        let mut empty_pos = None;

        for idx in line.cells(dim) {
            match cells[idx] {
                Cell::Empty => {
                    if empty_pos.is_some() {
                        return None;
                    }
                    empty_pos = Some(idx);
                }
                c if c == target => count += 1,
                _ => return None,
            }
        }

        if count + 1 == dim { empty_pos } else { None }
    }
}
