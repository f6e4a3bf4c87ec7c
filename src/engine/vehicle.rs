//! Vehicle - Individual vehicle state
//!
//! Each vehicle has a grid position, an integer velocity, and a race
//! status. The race controller owns all vehicles and mutates them
//! through the movement resolver; everyone else sees snapshots.

use serde::{Deserialize, Serialize};

/// A grid coordinate (row, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The coordinate reached by applying a displacement vector.
    pub fn offset(self, v: Vec2) -> Coord {
        Coord {
            row: self.row + v.dy,
            col: self.col + v.dx,
        }
    }

    /// Walk length of the axis-ordered path between two coordinates.
    pub fn walk_distance(self, other: Coord) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Integer 2D vector used for both velocity and acceleration.
///
/// `dx` is the column delta, `dy` the row delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vec2 {
    pub dx: i32,
    pub dy: i32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { dx: 0, dy: 0 };

    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// True if both components are within the per-axis magnitude bound.
    pub fn within_bound(self, bound: i32) -> bool {
        self.dx.abs() <= bound && self.dy.abs() <= bound
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            dx: self.dx + rhs.dx,
            dy: self.dy + rhs.dy,
        }
    }
}

/// Vehicle race status. Transitions out of `Racing` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    Racing,
    Crashed,
    Finished,
    Retired,
}

impl VehicleStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, VehicleStatus::Racing)
    }
}

/// Complete state for a single vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique vehicle ID (roster index)
    pub id: u32,
    /// Driver name
    pub name: String,
    /// Current cell
    pub position: Coord,
    /// Current velocity, applied and re-validated every turn
    pub velocity: Vec2,
    /// Race status
    pub status: VehicleStatus,
    /// Cells traversed since the start
    pub progress: u32,
    /// Turn on which the vehicle finished, if it did
    pub finished_turn: Option<u32>,
}

impl Vehicle {
    /// Create a vehicle at rest on its start cell.
    pub fn new(id: u32, name: String, start: Coord) -> Self {
        Self {
            id,
            name,
            position: start,
            velocity: Vec2::ZERO,
            status: VehicleStatus::Racing,
            progress: 0,
            finished_turn: None,
        }
    }

    pub fn is_racing(&self) -> bool {
        self.status == VehicleStatus::Racing
    }
}

/// Compact vehicle state for the per-turn snapshot hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    pub id: u32,
    pub name: String,
    pub position: Coord,
    pub velocity: Vec2,
    pub status: VehicleStatus,
    pub progress: u32,
}

impl From<&Vehicle> for VehicleSnapshot {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name.clone(),
            position: vehicle.position,
            velocity: vehicle.velocity,
            status: vehicle.status,
            progress: vehicle.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_applies_column_and_row_deltas() {
        let c = Coord::new(2, 3).offset(Vec2::new(1, -2));
        assert_eq!(c, Coord::new(0, 4));
    }

    #[test]
    fn within_bound_checks_each_axis() {
        assert!(Vec2::new(1, -1).within_bound(1));
        assert!(!Vec2::new(2, 0).within_bound(1));
        assert!(!Vec2::new(0, -2).within_bound(1));
    }
}
