//! Race Engine Module
//!
//! Turn-based vector race simulation: an immutable track grid, per-turn
//! movement resolution, pluggable driver strategies, and a race
//! controller that sequences turns and produces the final standings.
//! Rendering and input collection live outside this module.

pub mod controller;
pub mod error;
pub mod race;
pub mod resolver;
pub mod roster;
pub mod strategy;
pub mod track;
pub mod vehicle;

pub use controller::{Driver, RaceController};
pub use error::{InvalidMoveError, RosterFormatError, TrackFormatError};
pub use race::{NonFinisher, Race, RaceConfig, RacePhase, RaceReport, RaceResult, RaceSnapshot};
pub use resolver::{path_cells, resolve_move, Resolution};
pub use roster::{parse_roster, roster_from_file, DriverKind, DriverSpec};
pub use strategy::{AutomatedPolicy, InputSource, Strategy};
pub use track::{CellKind, Track};
pub use vehicle::{Coord, Vec2, Vehicle, VehicleSnapshot, VehicleStatus};
