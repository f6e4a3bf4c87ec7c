//! Decision strategies - how a driver picks an acceleration each turn
//!
//! The strategy set is closed: a Human strategy wrapping an external
//! input source, and an Automated strategy driven by a seeded rng.
//! Both answer the same question: given the track, the current race
//! snapshot, and a vehicle ID, which acceleration does that vehicle
//! take this turn?

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::race::RaceSnapshot;
use crate::engine::resolver::path_cells;
use crate::engine::track::Track;
use crate::engine::vehicle::{Coord, Vec2, VehicleStatus};

/// External supplier of Human accelerations.
///
/// The turn loop blocks on one prompt at a time; out-of-bound values
/// are rejected by the strategy and prompted again without advancing
/// the turn. Timeouts and cancellation are the caller's business.
pub trait InputSource {
    fn next_acceleration(&mut self, snapshot: &RaceSnapshot, vehicle_id: u32, bound: i32) -> Vec2;
}

/// A driver's decision strategy.
pub enum Strategy {
    /// Suspends on the input source until a legal acceleration arrives.
    Human(Box<dyn InputSource>),
    /// Seeded policy biased toward paths that stay on drivable cells.
    Automated(AutomatedPolicy),
}

impl Strategy {
    pub fn human(source: Box<dyn InputSource>) -> Self {
        Strategy::Human(source)
    }

    pub fn automated(seed: u64) -> Self {
        Strategy::Automated(AutomatedPolicy::new(seed))
    }

    /// Choose an acceleration for one vehicle.
    ///
    /// Human input outside the legal neighborhood is re-prompted here;
    /// a correct Automated policy never produces one, and the
    /// controller treats it as fatal if it does.
    pub fn choose_acceleration(
        &mut self,
        track: &Track,
        snapshot: &RaceSnapshot,
        vehicle_id: u32,
        bound: i32,
    ) -> Vec2 {
        match self {
            Strategy::Human(source) => loop {
                let accel = source.next_acceleration(snapshot, vehicle_id, bound);
                if accel.within_bound(bound) {
                    return accel;
                }
                log::warn!(
                    "vehicle {}: acceleration ({}, {}) outside bound {}, asking again",
                    vehicle_id,
                    accel.dx,
                    accel.dy,
                    bound
                );
            },
            Strategy::Automated(policy) => policy.choose(track, snapshot, vehicle_id, bound),
        }
    }
}

/// Deterministic automated driver.
///
/// Enumerates the legal neighborhood in fixed order and picks
/// uniformly among accelerations whose whole path stays drivable and
/// whose destination is not on another racing vehicle. When boxed in,
/// it picks any legal acceleration and accepts the crash.
pub struct AutomatedPolicy {
    rng: StdRng,
}

impl AutomatedPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn choose(
        &mut self,
        track: &Track,
        snapshot: &RaceSnapshot,
        vehicle_id: u32,
        bound: i32,
    ) -> Vec2 {
        let Some(me) = snapshot.vehicle(vehicle_id) else {
            log::warn!("vehicle {} missing from snapshot, holding course", vehicle_id);
            return Vec2::ZERO;
        };

        let occupied: HashSet<Coord> = snapshot
            .vehicles
            .iter()
            .filter(|v| v.status == VehicleStatus::Racing && v.id != vehicle_id)
            .map(|v| v.position)
            .collect();

        let mut legal = Vec::with_capacity(((2 * bound + 1) * (2 * bound + 1)) as usize);
        let mut safe = Vec::new();
        for dy in -bound..=bound {
            for dx in -bound..=bound {
                let accel = Vec2::new(dx, dy);
                legal.push(accel);

                let destination = me.position.offset(me.velocity + accel);
                let path = path_cells(me.position, destination);
                let drivable = path.iter().all(|&cell| track.is_drivable(cell));
                if drivable && !occupied.contains(&destination) {
                    safe.push(accel);
                }
            }
        }

        let pool = if safe.is_empty() { &legal } else { &safe };
        pool[self.rng.gen_range(0..pool.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::race::{Race, RaceConfig, RacePhase};
    use crate::engine::vehicle::Vehicle;

    fn snapshot_with_vehicle(track: &Track, position: Coord, velocity: Vec2) -> RaceSnapshot {
        let mut race = Race::new(track.clone(), RaceConfig::default());
        let mut vehicle = Vehicle::new(0, "Solo".into(), position);
        vehicle.velocity = velocity;
        race.vehicles.push(vehicle);
        race.snapshot(RacePhase::Running)
    }

    struct Scripted(Vec<Vec2>);

    impl InputSource for Scripted {
        fn next_acceleration(&mut self, _: &RaceSnapshot, _: u32, _: i32) -> Vec2 {
            self.0.remove(0)
        }
    }

    #[test]
    fn automated_choice_stays_in_bound_and_is_seed_deterministic() {
        let track = Track::parse("#####\n#S.F#\n#####").unwrap();
        let snapshot = snapshot_with_vehicle(&track, Coord::new(1, 1), Vec2::ZERO);

        let mut a = Strategy::automated(42);
        let mut b = Strategy::automated(42);
        for _ in 0..20 {
            let left = a.choose_acceleration(&track, &snapshot, 0, 1);
            let right = b.choose_acceleration(&track, &snapshot, 0, 1);
            assert!(left.within_bound(1));
            assert_eq!(left, right);
        }
    }

    #[test]
    fn automated_avoids_walls_when_a_safe_path_exists() {
        // A one-cell-wide corridor: every safe acceleration keeps the
        // vehicle on row 1.
        let track = Track::parse("#######\n#S...F#\n#######").unwrap();
        let snapshot = snapshot_with_vehicle(&track, Coord::new(1, 2), Vec2::new(1, 0));

        let mut policy = AutomatedPolicy::new(7);
        for _ in 0..50 {
            let accel = policy.choose(&track, &snapshot, 0, 1);
            let destination = Coord::new(1, 2).offset(Vec2::new(1, 0) + accel);
            assert!(
                path_cells(Coord::new(1, 2), destination)
                    .iter()
                    .all(|&c| track.is_drivable(c)),
                "unsafe acceleration {:?}",
                accel
            );
        }
    }

    #[test]
    fn human_reprompts_until_input_is_legal() {
        let track = Track::parse("#####\n#S.F#\n#####").unwrap();
        let snapshot = snapshot_with_vehicle(&track, Coord::new(1, 1), Vec2::ZERO);

        let mut strategy = Strategy::human(Box::new(Scripted(vec![
            Vec2::new(3, 0),
            Vec2::new(0, -9),
            Vec2::new(1, 0),
        ])));
        let accel = strategy.choose_acceleration(&track, &snapshot, 0, 1);
        assert_eq!(accel, Vec2::new(1, 0));
    }
}
