//! Head-on collision example
//!
//! Two equal bodies fall into each other. Population predicts the merge and
//! opens a second epoch; ticking through the collision makes it real.
//!
//! Run with: cargo run --package trajectory --example collision_demo

use trajectory::input::PopulationSettings;
use trajectory::scenario::{head_on_pair, BodyConfig};
use trajectory::timeline::{TickOutcome, Timeline};

fn main() {
    println!("Trajectory engine: head-on collision\n");
    println!("{}", "=".repeat(60));

    let mut scenario = head_on_pair();
    scenario.bodies.push(BodyConfig::new(
        "Observer",
        1.0e10,
        1.0e3,
        [0.0, 1.0e9],
        [0.0, 0.0],
    ));

    println!("\nInitial bodies:");
    for body in &scenario.bodies {
        println!(
            "  {:<9} m={:.3e} kg  r={:.3e} m  p=({:+.3e}, {:+.3e}) m  v=({:+.1}, {:+.1}) m/s",
            body.name,
            body.mass,
            body.radius,
            body.position[0],
            body.position[1],
            body.velocity[0],
            body.velocity[1]
        );
    }

    let mut timeline = match Timeline::from_scenario(&scenario) {
        Ok(timeline) => timeline,
        Err(err) => {
            eprintln!("bad scenario: {err}");
            return;
        }
    };

    let settings = PopulationSettings::new(10.0, 2_000.0);
    match timeline.populate_trajectories(&settings, None, false) {
        Ok(report) => println!(
            "\nPopulated {:.0} s: {} collision(s), {} steps",
            settings.lookahead, report.collisions, report.accepted_steps
        ),
        Err(err) => {
            eprintln!("population failed: {err}");
            return;
        }
    }

    for (i, epoch) in timeline.epochs().enumerate() {
        let names: Vec<&str> = epoch.bodies().iter().map(|b| b.name.as_str()).collect();
        println!(
            "  Epoch {}: t={:7.1} s .. {:7.1} s  [{}]",
            i,
            epoch.current_time(),
            epoch.latest_time(),
            names.join(", ")
        );
    }
    for (removed, merged) in timeline.collisions().iter() {
        println!("  {removed} -> {merged}");
    }

    println!("\nTicking 100 s at a time, following A:");
    loop {
        let outcome = match timeline.tick(100.0) {
            Ok(outcome) => outcome,
            Err(err) => {
                eprintln!("tick failed: {err}");
                return;
            }
        };

        if let Some(body) = timeline.resolve_follow("A") {
            let s = body.current();
            println!(
                "  t={:7.1} s  following {:<6} x={:+.4e} m  vx={:+.2} m/s",
                s.time, body.name, s.position.x, s.velocity.x
            );
        }

        match outcome {
            TickOutcome::EpochsPromoted(n) => println!("    {n} epoch(s) promoted"),
            TickOutcome::HorizonReached => break,
            TickOutcome::Advanced => {}
        }
    }

    let epoch = timeline.current_epoch();
    println!("\n{}", "=".repeat(60));
    println!(
        "Final: {} bodies, total mass {:.3e} kg, momentum ({:+.3e}, {:+.3e}) kg m/s",
        epoch.len(),
        epoch.total_mass(),
        epoch.total_momentum().x,
        epoch.total_momentum().y
    );
}
