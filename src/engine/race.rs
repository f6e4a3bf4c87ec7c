//! Race - Race configuration, state, results, and snapshots
//!
//! The `Race` value holds everything one race session mutates: the
//! vehicles in roster order, the turn counter, and the finish order.
//! Only the race controller writes to it; observers get snapshots.

use serde::{Deserialize, Serialize};

use crate::engine::track::Track;
use crate::engine::vehicle::{Vehicle, VehicleSnapshot, VehicleStatus};

/// Race configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RaceConfig {
    /// Per-axis acceleration magnitude bound (legal neighborhood radius)
    pub acceleration_bound: i32,
    /// Turn limit; vehicles still racing when it is reached are retired
    pub max_turns: u32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            acceleration_bound: 1,
            max_turns: 500,
        }
    }
}

/// Race lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacePhase {
    Setup,
    Running,
    Finished,
}

/// One finisher entry, in finish order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    pub vehicle_id: u32,
    pub name: String,
    /// Turn on which the finish cell was reached (first turn is 1)
    pub finished_turn: u32,
    /// Final standing, 1-based
    pub position: u32,
}

/// Terminal record for a vehicle that never finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonFinisher {
    pub vehicle_id: u32,
    pub name: String,
    pub status: VehicleStatus,
}

/// Final race report: ordered finishers plus everyone else's fate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceReport {
    pub finishers: Vec<RaceResult>,
    pub non_finishers: Vec<NonFinisher>,
    pub turns: u32,
}

/// Complete race state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    /// Race configuration
    pub config: RaceConfig,
    /// The immutable track
    pub track: Track,
    /// All vehicles, in roster order
    pub vehicles: Vec<Vehicle>,
    /// Turns executed so far
    pub turn: u32,
    /// Finish order (by finishing turn, ties by roster order)
    pub finish_order: Vec<RaceResult>,
}

impl Race {
    /// Create an empty race on a track; the controller places vehicles.
    pub fn new(track: Track, config: RaceConfig) -> Self {
        Self {
            config,
            track,
            vehicles: Vec::new(),
            turn: 0,
            finish_order: Vec::new(),
        }
    }

    /// Get a vehicle by ID
    pub fn vehicle(&self, id: u32) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// Record a finisher; standing and tie-break follow append order.
    pub(crate) fn record_finish(&mut self, id: u32) {
        let Some(vehicle) = self.vehicles.iter().find(|v| v.id == id) else {
            return;
        };
        self.finish_order.push(RaceResult {
            vehicle_id: vehicle.id,
            name: vehicle.name.clone(),
            finished_turn: self.turn,
            position: (self.finish_order.len() + 1) as u32,
        });
    }

    /// Get a compact snapshot for observers
    pub fn snapshot(&self, phase: RacePhase) -> RaceSnapshot {
        RaceSnapshot {
            phase,
            turn: self.turn,
            vehicles: self.vehicles.iter().map(VehicleSnapshot::from).collect(),
            finisher_count: self.finish_order.len() as u32,
        }
    }

    /// Final report; meaningful once the race has ended.
    pub fn report(&self) -> RaceReport {
        RaceReport {
            finishers: self.finish_order.clone(),
            non_finishers: self
                .vehicles
                .iter()
                .filter(|v| v.status != VehicleStatus::Finished)
                .map(|v| NonFinisher {
                    vehicle_id: v.id,
                    name: v.name.clone(),
                    status: v.status,
                })
                .collect(),
            turns: self.turn,
        }
    }
}

/// Compact race snapshot handed to external observers each turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub phase: RacePhase,
    pub turn: u32,
    pub vehicles: Vec<VehicleSnapshot>,
    pub finisher_count: u32,
}

impl RaceSnapshot {
    pub fn vehicle(&self, id: u32) -> Option<&VehicleSnapshot> {
        self.vehicles.iter().find(|v| v.id == id)
    }
}
