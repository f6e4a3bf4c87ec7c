//! Error types for track loading, roster loading, and move validation.
//!
//! Crashes and retirements are *not* errors; they are ordinary status
//! transitions recorded in the race report.

use thiserror::Error;

/// A track description that cannot be parsed or cannot host a race.
///
/// Fatal at load time; no race is ever started on a malformed track.
#[derive(Debug, Error)]
pub enum TrackFormatError {
    #[error("failed to read track file: {0}")]
    Io(#[from] std::io::Error),

    #[error("track has no cells")]
    EmptyGrid,

    #[error("row {line} has {got} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("unknown track symbol '{symbol}' at line {line}")]
    UnknownSymbol { symbol: char, line: usize },

    #[error("track has no start cell")]
    NoStart,

    #[error("track has no finish cell")]
    NoFinish,

    #[error("no finish cell reachable from start at row {row}, column {col}")]
    UnreachableFinish { row: i32, col: i32 },
}

/// A driver roster that cannot be parsed or placed on the track.
#[derive(Debug, Error)]
pub enum RosterFormatError {
    #[error("failed to read roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("roster contains no drivers")]
    Empty,

    #[error("roster line {line} is malformed: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("unknown strategy '{strategy}' at roster line {line}")]
    UnknownStrategy { strategy: String, line: usize },

    #[error("start index {index} is out of range ({count} start cells available)")]
    StartIndexOutOfRange { index: usize, count: usize },

    #[error("start index {index} assigned to more than one driver")]
    DuplicateStartIndex { index: usize },
}

/// A strategy produced an acceleration outside the legal neighborhood.
///
/// For Automated strategies this is a defect in the policy and aborts
/// the race; the engine never clamps the value, so seeded replays stay
/// verifiable. Human input is re-prompted before it can reach this.
#[derive(Debug, Error)]
#[error("vehicle {vehicle_id} chose acceleration ({dx}, {dy}) outside the legal bound {bound}")]
pub struct InvalidMoveError {
    pub vehicle_id: u32,
    pub dx: i32,
    pub dy: i32,
    pub bound: i32,
}
