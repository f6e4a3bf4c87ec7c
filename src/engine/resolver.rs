//! Movement resolver - validates and applies one vehicle's move
//!
//! Implements the per-turn movement rules: velocity update, discrete
//! path traversal, wall and collision crashes, and finish detection.
//! The resolver touches nothing but the inputs it is handed; the race
//! controller applies the returned resolution to the vehicle.

use std::collections::HashSet;

use crate::engine::error::InvalidMoveError;
use crate::engine::track::Track;
use crate::engine::vehicle::{Coord, Vec2};

/// Outcome of resolving one proposed acceleration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Legal move; the vehicle advances and keeps racing.
    Advanced { position: Coord, velocity: Vec2 },
    /// The path left the drivable area or the destination was taken.
    /// The vehicle stops at the given cell with zero velocity.
    Crashed { position: Coord },
    /// A finish cell was reached on the path.
    Finished { position: Coord },
}

/// Cells on the discrete path from `from` to `to`, excluding `from`.
///
/// Horizontal steps are taken before vertical ones, one cell per step,
/// so a vehicle cannot jump over a wall or an occupied cell between
/// turns.
pub fn path_cells(from: Coord, to: Coord) -> Vec<Coord> {
    let step_col = (to.col - from.col).signum();
    let step_row = (to.row - from.row).signum();

    let mut cells = Vec::with_capacity(from.walk_distance(to) as usize);
    let mut cursor = from;
    while cursor != to {
        if cursor.col != to.col {
            cursor.col += step_col;
        } else {
            cursor.row += step_row;
        }
        cells.push(cursor);
    }
    cells
}

/// Resolve one vehicle's proposed acceleration.
///
/// `occupied` holds the cells of Racing vehicles already resolved this
/// turn; the destination is checked against it, intermediate cells are
/// not. Reaching a finish cell anywhere on the path finishes the
/// vehicle and takes precedence over the occupancy check.
pub fn resolve_move(
    track: &Track,
    vehicle_id: u32,
    from: Coord,
    velocity: Vec2,
    accel: Vec2,
    bound: i32,
    occupied: &HashSet<Coord>,
) -> Result<Resolution, InvalidMoveError> {
    if !accel.within_bound(bound) {
        return Err(InvalidMoveError {
            vehicle_id,
            dx: accel.dx,
            dy: accel.dy,
            bound,
        });
    }

    let new_velocity = velocity + accel;
    let destination = from.offset(new_velocity);
    let path = path_cells(from, destination);

    // Standing still: the only occupancy hazard is a vehicle that moved
    // onto this cell earlier in the turn.
    if path.is_empty() {
        if occupied.contains(&from) {
            return Ok(Resolution::Crashed { position: from });
        }
        return Ok(Resolution::Advanced {
            position: from,
            velocity: new_velocity,
        });
    }

    let mut last_drivable = from;
    for &cell in &path {
        if !track.is_drivable(cell) {
            return Ok(Resolution::Crashed {
                position: last_drivable,
            });
        }
        if track.is_finish(cell) {
            return Ok(Resolution::Finished { position: cell });
        }
        if cell == destination && occupied.contains(&cell) {
            return Ok(Resolution::Crashed {
                position: last_drivable,
            });
        }
        last_drivable = cell;
    }

    Ok(Resolution::Advanced {
        position: destination,
        velocity: new_velocity,
    })
}
