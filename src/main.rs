//! Gridrace CLI - runs a race from track and roster files
//!
//! An external collaborator around the engine: it renders each turn's
//! snapshot as text (or JSON lines with `--json`) and feeds stdin
//! input to Human drivers. No race rules live here.

use std::error::Error;
use std::io::Write;

use gridrace::{
    roster_from_file, CellKind, Coord, Driver, DriverKind, InputSource, RaceConfig, RaceController,
    RaceSnapshot, Strategy, Track, Vec2, VehicleStatus,
};

/// Reads one `dx dy` pair per prompt from stdin. Unparsable lines are
/// asked again here; out-of-bound values are re-prompted by the engine.
struct StdinInput;

impl InputSource for StdinInput {
    fn next_acceleration(&mut self, snapshot: &RaceSnapshot, vehicle_id: u32, bound: i32) -> Vec2 {
        let name = snapshot
            .vehicle(vehicle_id)
            .map(|v| v.name.as_str())
            .unwrap_or("?");
        loop {
            print!("{} (vehicle {}), acceleration dx dy in [-{}, {}]: ", name, vehicle_id, bound, bound);
            let _ = std::io::stdout().flush();

            let mut line = String::new();
            if std::io::stdin().read_line(&mut line).is_err() || line.is_empty() {
                // Input channel is gone; coast instead of wedging the race.
                return Vec2::ZERO;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if let [dx, dy] = fields[..] {
                if let (Ok(dx), Ok(dy)) = (dx.parse(), dy.parse()) {
                    return Vec2::new(dx, dy);
                }
            }
            println!("expected two integers, e.g. '1 0'");
        }
    }
}

fn render(track: &Track, snapshot: &RaceSnapshot) {
    let mut rows: Vec<Vec<char>> = (0..track.height())
        .map(|row| {
            (0..track.width())
                .map(|col| {
                    match track.cell_at(Coord::new(row as i32, col as i32)) {
                        Some(CellKind::Road) => '.',
                        Some(CellKind::Wall) => '#',
                        Some(CellKind::Start) => 'S',
                        Some(CellKind::Finish) => 'F',
                        None => ' ',
                    }
                })
                .collect()
        })
        .collect();

    for vehicle in &snapshot.vehicles {
        let Coord { row, col } = vehicle.position;
        if row < 0 || col < 0 || row as usize >= track.height() || col as usize >= track.width() {
            continue;
        }
        rows[row as usize][col as usize] = match vehicle.status {
            VehicleStatus::Crashed => 'x',
            _ => char::from_digit(vehicle.id % 10, 10).unwrap_or('?'),
        };
    }

    println!("-- turn {} --", snapshot.turn);
    for row in rows {
        println!("{}", row.into_iter().collect::<String>());
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    args.retain(|a| a != "--json");

    let [track_path, roster_path] = &args[..] else {
        eprintln!("usage: gridrace [--json] <track-file> <roster-file>");
        std::process::exit(2);
    };

    let track = Track::from_file(track_path)?;
    let roster = roster_from_file(roster_path)?;

    let drivers: Vec<Driver> = roster
        .into_iter()
        .map(|spec| Driver {
            name: spec.name,
            start_index: spec.start_index,
            strategy: match spec.kind {
                DriverKind::Human => Strategy::human(Box::new(StdinInput)),
                DriverKind::Bot { seed } => Strategy::automated(seed),
            },
        })
        .collect();

    let mut controller = RaceController::new(track.clone(), drivers, RaceConfig::default())?;
    let report = controller.run_to_completion(|snapshot| {
        if json {
            match serde_json::to_string(snapshot) {
                Ok(line) => println!("{}", line),
                Err(e) => log::error!("snapshot serialization failed: {}", e),
            }
        } else {
            render(&track, snapshot);
        }
    })?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    println!("\n== results after {} turns ==", report.turns);
    for result in &report.finishers {
        println!(
            "{:>2}. {} (vehicle {}) finished on turn {}",
            result.position, result.name, result.vehicle_id, result.finished_turn
        );
    }
    for other in &report.non_finishers {
        println!(
            " -- {} (vehicle {}): {:?}",
            other.name, other.vehicle_id, other.status
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("gridrace: {}", e);
        std::process::exit(1);
    }
}
