//! Race controller - owns the turn loop and the race state machine
//!
//! Setup -> Running -> Finished. Each turn iterates vehicles in fixed
//! roster order: ask the driver's strategy for an acceleration, hand
//! it to the movement resolver, apply the outcome, then evaluate
//! termination once every vehicle has been processed.

use std::collections::HashSet;

use crate::engine::error::{InvalidMoveError, RosterFormatError};
use crate::engine::race::{Race, RaceConfig, RacePhase, RaceReport, RaceSnapshot};
use crate::engine::resolver::{resolve_move, Resolution};
use crate::engine::strategy::Strategy;
use crate::engine::track::Track;
use crate::engine::vehicle::{Coord, Vec2, Vehicle, VehicleStatus};

/// One driver: a name, a start cell index, and a decision strategy.
pub struct Driver {
    pub name: String,
    pub start_index: usize,
    pub strategy: Strategy,
}

/// Owns a race from setup to its final report.
pub struct RaceController {
    phase: RacePhase,
    race: Race,
    /// Strategies in roster order, parallel to `race.vehicles`
    strategies: Vec<Strategy>,
}

impl std::fmt::Debug for RaceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaceController")
            .field("phase", &self.phase)
            .field("race", &self.race)
            .finish_non_exhaustive()
    }
}

impl RaceController {
    /// Place the drivers on the track's start cells and enter Setup.
    ///
    /// Fails if the roster is empty or a start index is out of range
    /// or used twice; the race itself cannot fail to set up once the
    /// placement is valid.
    pub fn new(
        track: Track,
        drivers: Vec<Driver>,
        config: RaceConfig,
    ) -> Result<Self, RosterFormatError> {
        if drivers.is_empty() {
            return Err(RosterFormatError::Empty);
        }

        let starts = track.start_positions().to_vec();
        let mut taken: HashSet<usize> = HashSet::new();
        let mut race = Race::new(track, config);
        let mut strategies = Vec::with_capacity(drivers.len());

        for (id, driver) in drivers.into_iter().enumerate() {
            let &start = starts.get(driver.start_index).ok_or(
                RosterFormatError::StartIndexOutOfRange {
                    index: driver.start_index,
                    count: starts.len(),
                },
            )?;
            if !taken.insert(driver.start_index) {
                return Err(RosterFormatError::DuplicateStartIndex {
                    index: driver.start_index,
                });
            }
            race.vehicles.push(Vehicle::new(id as u32, driver.name, start));
            strategies.push(driver.strategy);
        }

        log::info!(
            "race initialized with {} vehicles on a {}x{} track",
            race.vehicles.len(),
            race.track.width(),
            race.track.height()
        );
        Ok(Self {
            phase: RacePhase::Setup,
            race,
            strategies,
        })
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    /// Read-only view of the race state.
    pub fn race(&self) -> &Race {
        &self.race
    }

    /// Get the current snapshot without advancing the race.
    pub fn snapshot(&self) -> RaceSnapshot {
        self.race.snapshot(self.phase)
    }

    /// Setup -> Running. A no-op in any other phase.
    pub fn start(&mut self) {
        if self.phase == RacePhase::Setup {
            self.phase = RacePhase::Running;
            log::info!("race started");
        }
    }

    /// Execute one full turn and return the post-turn snapshot.
    ///
    /// Outside the Running phase this returns the current snapshot
    /// unchanged. The only error is a strategy handing back an
    /// out-of-bound acceleration, which aborts the race.
    pub fn run_turn(&mut self) -> Result<RaceSnapshot, InvalidMoveError> {
        if self.phase != RacePhase::Running {
            return Ok(self.snapshot());
        }

        self.race.turn += 1;
        let bound = self.race.config.acceleration_bound;

        // Cells of racing vehicles already resolved this turn; the
        // collision rule checks destinations against exactly this set.
        let mut occupied: HashSet<Coord> = HashSet::new();

        for index in 0..self.race.vehicles.len() {
            if !self.race.vehicles[index].is_racing() {
                continue;
            }

            let snapshot = self.race.snapshot(self.phase);
            let id = self.race.vehicles[index].id;
            let accel = self.strategies[index].choose_acceleration(
                &self.race.track,
                &snapshot,
                id,
                bound,
            );

            let (from, velocity) = {
                let v = &self.race.vehicles[index];
                (v.position, v.velocity)
            };
            let resolution = resolve_move(
                &self.race.track,
                id,
                from,
                velocity,
                accel,
                bound,
                &occupied,
            )?;
            self.apply_resolution(index, from, resolution, &mut occupied);
        }

        self.evaluate_termination();
        Ok(self.snapshot())
    }

    fn apply_resolution(
        &mut self,
        index: usize,
        from: Coord,
        resolution: Resolution,
        occupied: &mut HashSet<Coord>,
    ) {
        let turn = self.race.turn;
        let vehicle = &mut self.race.vehicles[index];
        match resolution {
            Resolution::Advanced { position, velocity } => {
                vehicle.progress += from.walk_distance(position);
                vehicle.position = position;
                vehicle.velocity = velocity;
                occupied.insert(position);
            }
            Resolution::Crashed { position } => {
                vehicle.progress += from.walk_distance(position);
                vehicle.position = position;
                vehicle.velocity = Vec2::ZERO;
                vehicle.status = VehicleStatus::Crashed;
                log::info!(
                    "turn {}: vehicle {} ({}) crashed at row {}, column {}",
                    turn,
                    vehicle.id,
                    vehicle.name,
                    position.row,
                    position.col
                );
            }
            Resolution::Finished { position } => {
                vehicle.progress += from.walk_distance(position);
                vehicle.position = position;
                vehicle.velocity = Vec2::ZERO;
                vehicle.status = VehicleStatus::Finished;
                vehicle.finished_turn = Some(turn);
                let id = vehicle.id;
                log::info!("turn {}: vehicle {} finished", turn, id);
                self.race.record_finish(id);
            }
        }
    }

    fn evaluate_termination(&mut self) {
        if self.race.turn >= self.race.config.max_turns {
            for vehicle in &mut self.race.vehicles {
                if vehicle.is_racing() {
                    vehicle.status = VehicleStatus::Retired;
                    log::info!(
                        "turn limit {} reached: vehicle {} ({}) retired",
                        self.race.config.max_turns,
                        vehicle.id,
                        vehicle.name
                    );
                }
            }
        }

        if self.race.vehicles.iter().all(|v| v.status.is_terminal()) {
            self.phase = RacePhase::Finished;
            log::info!(
                "race over after {} turns: {} finisher(s)",
                self.race.turn,
                self.race.finish_order.len()
            );
        }
    }

    /// Drive the race until it ends, handing each post-turn snapshot
    /// to the observer, then return the final report.
    pub fn run_to_completion(
        &mut self,
        mut observer: impl FnMut(&RaceSnapshot),
    ) -> Result<RaceReport, InvalidMoveError> {
        self.start();
        while self.phase == RacePhase::Running {
            let snapshot = self.run_turn()?;
            observer(&snapshot);
        }
        Ok(self.report())
    }

    /// Final ordered results; stable once the phase is Finished.
    pub fn report(&self) -> RaceReport {
        self.race.report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bot(name: &str, start_index: usize, seed: u64) -> Driver {
        Driver {
            name: name.to_string(),
            start_index,
            strategy: Strategy::automated(seed),
        }
    }

    fn two_lane_track() -> Track {
        Track::parse(
            "\
########
#S....F#
#S....F#
########",
        )
        .unwrap()
    }

    #[test]
    fn setup_rejects_bad_start_indices() {
        let track = two_lane_track();
        let err = RaceController::new(
            track.clone(),
            vec![bot("A", 5, 0)],
            RaceConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RosterFormatError::StartIndexOutOfRange { index: 5, count: 2 }
        ));

        let err = RaceController::new(
            track,
            vec![bot("A", 0, 0), bot("B", 0, 1)],
            RaceConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RosterFormatError::DuplicateStartIndex { index: 0 }));
    }

    #[test]
    fn setup_rejects_empty_roster() {
        let err =
            RaceController::new(two_lane_track(), Vec::new(), RaceConfig::default()).unwrap_err();
        assert!(matches!(err, RosterFormatError::Empty));
    }

    #[test]
    fn turns_do_not_advance_before_start() {
        let mut controller = RaceController::new(
            two_lane_track(),
            vec![bot("A", 0, 1)],
            RaceConfig::default(),
        )
        .unwrap();
        assert_eq!(controller.phase(), RacePhase::Setup);

        let snapshot = controller.run_turn().unwrap();
        assert_eq!(snapshot.turn, 0);
        assert_eq!(controller.phase(), RacePhase::Setup);
    }

    #[test]
    fn every_racing_vehicle_sits_on_a_distinct_drivable_cell() {
        let track = Track::parse(
            "\
##########
#S.......#
#S...#...#
#S...#..F#
##########",
        )
        .unwrap();
        let drivers = vec![bot("A", 0, 3), bot("B", 1, 14), bot("C", 2, 59)];
        let mut controller =
            RaceController::new(track.clone(), drivers, RaceConfig::default()).unwrap();
        controller.start();

        while controller.phase() == RacePhase::Running {
            let snapshot = controller.run_turn().unwrap();
            let racing: Vec<_> = snapshot
                .vehicles
                .iter()
                .filter(|v| v.status == VehicleStatus::Racing)
                .collect();
            for v in &racing {
                assert!(track.is_drivable(v.position));
            }
            for (i, a) in racing.iter().enumerate() {
                for b in &racing[i + 1..] {
                    assert_ne!(a.position, b.position);
                }
            }
        }
    }
}
