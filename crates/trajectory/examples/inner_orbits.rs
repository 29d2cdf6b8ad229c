//! Inner solar system over one year
//!
//! Populates a year of Sun, Earth and Venus trajectories and ticks through
//! them a month at a time, checking energy along the way.
//!
//! Run with: cargo run --package trajectory --example inner_orbits

use trajectory::forces::PairwiseGravity;
use trajectory::input::PopulationSettings;
use trajectory::scenario::inner_planets;
use trajectory::timeline::{TickOutcome, Timeline};
use units::{Length, Time};

fn total_energy(timeline: &Timeline) -> f64 {
    let bodies = timeline.current_epoch().bodies();
    let kinetic: f64 = bodies.iter().map(|b| b.kinetic_energy()).sum();
    let y: Vec<f64> = bodies
        .iter()
        .flat_map(|b| {
            let s = b.current();
            [s.position.x, s.position.y, s.velocity.x, s.velocity.y]
        })
        .collect();
    kinetic + PairwiseGravity::from_bodies(bodies).potential_energy(&y)
}

fn main() {
    println!("Trajectory engine: inner solar system\n");
    println!("{}", "=".repeat(60));

    let mut timeline = match Timeline::from_scenario(&inner_planets()) {
        Ok(timeline) => timeline,
        Err(err) => {
            eprintln!("bad scenario: {err}");
            return;
        }
    };

    let day = Time::from_days(1.0).to_seconds();
    let year = Time::from_days(365.256).to_seconds();
    let settings = PopulationSettings::new(day, year).with_tolerance(1e-8);

    let report = match timeline.populate_trajectories(&settings, None, false) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("population failed: {err}");
            return;
        }
    };

    println!("\nPopulated one year:");
    println!("  Accepted steps: {}", report.accepted_steps);
    println!("  Rejected steps: {}", report.rejected_steps);
    println!("  Collisions: {}", report.collisions);

    let initial_energy = total_energy(&timeline);
    let start = timeline
        .current_epoch()
        .find("Earth")
        .map(|earth| earth.current().position);

    println!("\n  Month    Earth-Sun (AU)    Energy drift");
    for month in 1..=12 {
        match timeline.tick(year / 12.0) {
            Ok(TickOutcome::HorizonReached) => {
                println!("  horizon reached");
                break;
            }
            Ok(_) => {}
            Err(err) => {
                eprintln!("tick failed: {err}");
                return;
            }
        }

        let epoch = timeline.current_epoch();
        if let (Some(earth), Some(sun)) = (epoch.find("Earth"), epoch.find("Sun")) {
            let distance = Length::from_m(earth.distance_to(sun)).to_au();
            let drift = (total_energy(&timeline) - initial_energy) / initial_energy.abs();
            println!("  {:>5}    {:>14.6}    {:>12.3e}", month, distance, drift);
        }
    }

    if let (Some(start), Some(earth)) = (start, timeline.current_epoch().find("Earth")) {
        let miss = Length::from_m((earth.current().position - start).magnitude());
        println!("\nEarth returned within {:.4} AU of its start", miss.to_au());
    }
}
