//! Gridrace - turn-based vector race engine
//!
//! Drivers move discrete vehicles across a track grid under
//! acceleration and collision rules until they finish, crash, or
//! retire. The engine owns the track model, the per-turn movement
//! rules, the driver decision seam, and the race state machine; it
//! hands read-only per-turn snapshots to whatever renders or records
//! the race.

pub mod engine;

pub use engine::{
    parse_roster, path_cells, resolve_move, roster_from_file, AutomatedPolicy, CellKind, Coord,
    Driver, DriverKind, DriverSpec, InputSource, InvalidMoveError, NonFinisher, Race, RaceConfig,
    RaceController, RacePhase, RaceReport, RaceResult, RaceSnapshot, Resolution, RosterFormatError,
    Strategy, Track, TrackFormatError, Vec2, Vehicle, VehicleSnapshot, VehicleStatus,
};
