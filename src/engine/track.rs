//! Track - Immutable grid of cells
//!
//! Parsed once from a textual description and never mutated afterwards.
//! Load-time validation guarantees the grid is rectangular and that a
//! finish cell is reachable from every start cell.

use std::collections::VecDeque;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::error::TrackFormatError;
use crate::engine::vehicle::Coord;

/// One cell's fixed type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Road,
    Wall,
    Start,
    Finish,
}

impl CellKind {
    fn from_symbol(symbol: char) -> Option<CellKind> {
        match symbol {
            '.' => Some(CellKind::Road),
            '#' => Some(CellKind::Wall),
            'S' => Some(CellKind::Start),
            'F' => Some(CellKind::Finish),
            _ => None,
        }
    }

    pub fn is_drivable(self) -> bool {
        !matches!(self, CellKind::Wall)
    }
}

/// Immutable rectangular track grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    width: usize,
    height: usize,
    /// Row-major cell types
    cells: Vec<CellKind>,
    /// Start cells in row-major discovery order
    starts: Vec<Coord>,
}

impl Track {
    /// Parse a track from its textual grid description.
    ///
    /// One line per row, one symbol per cell: `.` road, `#` wall,
    /// `S` start, `F` finish. All rows must have equal length.
    pub fn parse(text: &str) -> Result<Track, TrackFormatError> {
        let mut cells = Vec::new();
        let mut starts = Vec::new();
        let mut width = 0;
        let mut height = 0;

        for (row, line) in text.lines().enumerate() {
            if row == 0 {
                width = line.chars().count();
            } else if line.chars().count() != width {
                return Err(TrackFormatError::RaggedRow {
                    line: row + 1,
                    expected: width,
                    got: line.chars().count(),
                });
            }

            for (col, symbol) in line.chars().enumerate() {
                let kind = CellKind::from_symbol(symbol).ok_or(
                    TrackFormatError::UnknownSymbol {
                        symbol,
                        line: row + 1,
                    },
                )?;
                if kind == CellKind::Start {
                    starts.push(Coord::new(row as i32, col as i32));
                }
                cells.push(kind);
            }
            height += 1;
        }

        if width == 0 || height == 0 {
            return Err(TrackFormatError::EmptyGrid);
        }
        if starts.is_empty() {
            return Err(TrackFormatError::NoStart);
        }
        if !cells.iter().any(|&k| k == CellKind::Finish) {
            return Err(TrackFormatError::NoFinish);
        }

        let track = Track {
            width,
            height,
            cells,
            starts,
        };
        track.check_reachability()?;

        log::info!(
            "track loaded: {}x{}, {} start cells",
            track.width,
            track.height,
            track.starts.len()
        );
        Ok(track)
    }

    /// Load a track description from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Track, TrackFormatError> {
        let text = std::fs::read_to_string(path)?;
        Track::parse(&text)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row >= 0
            && (coord.row as usize) < self.height
            && coord.col >= 0
            && (coord.col as usize) < self.width
    }

    /// The cell type at a coordinate, or `None` outside the grid.
    pub fn cell_at(&self, coord: Coord) -> Option<CellKind> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(self.cells[coord.row as usize * self.width + coord.col as usize])
    }

    /// True for in-bounds Road, Start, and Finish cells.
    pub fn is_drivable(&self, coord: Coord) -> bool {
        self.cell_at(coord).is_some_and(CellKind::is_drivable)
    }

    pub fn is_finish(&self, coord: Coord) -> bool {
        self.cell_at(coord) == Some(CellKind::Finish)
    }

    /// Start cells in row-major order; roster start indices point here.
    pub fn start_positions(&self) -> &[Coord] {
        &self.starts
    }

    /// Flood-fill over drivable cells from each start, failing on the
    /// first start that cannot reach any finish cell.
    fn check_reachability(&self) -> Result<(), TrackFormatError> {
        for &start in &self.starts {
            if !self.reaches_finish(start) {
                return Err(TrackFormatError::UnreachableFinish {
                    row: start.row,
                    col: start.col,
                });
            }
        }
        Ok(())
    }

    fn reaches_finish(&self, start: Coord) -> bool {
        let mut seen = vec![false; self.width * self.height];
        let mut queue = VecDeque::from([start]);
        seen[start.row as usize * self.width + start.col as usize] = true;

        while let Some(coord) = queue.pop_front() {
            if self.is_finish(coord) {
                return true;
            }
            for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                let next = Coord::new(coord.row + dr, coord.col + dc);
                if !self.is_drivable(next) {
                    continue;
                }
                let index = next.row as usize * self.width + next.col as usize;
                if !seen[index] {
                    seen[index] = true;
                    queue.push_back(next);
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: &str = "\
#######
#S...F#
#S...F#
#######";

    #[test]
    fn parses_dimensions_and_starts() {
        let track = Track::parse(TRACK).unwrap();
        assert_eq!(track.width(), 7);
        assert_eq!(track.height(), 4);
        assert_eq!(
            track.start_positions(),
            &[Coord::new(1, 1), Coord::new(2, 1)]
        );
    }

    #[test]
    fn classifies_cells() {
        let track = Track::parse(TRACK).unwrap();
        assert_eq!(track.cell_at(Coord::new(0, 0)), Some(CellKind::Wall));
        assert_eq!(track.cell_at(Coord::new(1, 2)), Some(CellKind::Road));
        assert!(track.is_finish(Coord::new(1, 5)));
        assert!(track.is_drivable(Coord::new(1, 1)));
        assert!(!track.is_drivable(Coord::new(0, 0)));
    }

    #[test]
    fn out_of_bounds_is_neither_present_nor_drivable() {
        let track = Track::parse(TRACK).unwrap();
        assert!(!track.in_bounds(Coord::new(-1, 0)));
        assert!(!track.in_bounds(Coord::new(0, 7)));
        assert_eq!(track.cell_at(Coord::new(4, 0)), None);
        assert!(!track.is_drivable(Coord::new(-1, -1)));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Track::parse("###\n##").unwrap_err();
        assert!(matches!(
            err,
            TrackFormatError::RaggedRow {
                line: 2,
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn rejects_unknown_symbols() {
        let err = Track::parse("S?F").unwrap_err();
        assert!(matches!(
            err,
            TrackFormatError::UnknownSymbol { symbol: '?', line: 1 }
        ));
    }

    #[test]
    fn rejects_empty_description() {
        assert!(matches!(Track::parse(""), Err(TrackFormatError::EmptyGrid)));
    }

    #[test]
    fn rejects_missing_start_or_finish() {
        assert!(matches!(
            Track::parse("..F"),
            Err(TrackFormatError::NoStart)
        ));
        assert!(matches!(
            Track::parse("S.."),
            Err(TrackFormatError::NoFinish)
        ));
    }

    #[test]
    fn rejects_walled_off_finish() {
        let err = Track::parse("S.#F").unwrap_err();
        assert!(matches!(
            err,
            TrackFormatError::UnreachableFinish { row: 0, col: 0 }
        ));
    }

    #[test]
    fn reachability_follows_corridors() {
        // Finish is reachable only by going around the inner wall.
        let text = "\
#######
#S....#
###.###
#F....#
#######";
        assert!(Track::parse(text).is_ok());
    }
}
