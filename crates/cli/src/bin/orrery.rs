use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use stellar_orrery::config::{SimulationConfig, load_body_catalog, load_config};
use stellar_orrery::export::snapshot::{self as export_snapshot, Metadata};
use stellar_orrery::export::trace as export_trace;
use stellar_orrery::sim::headless::{self, RunPlan};
use stellar_orrery::sim::SimEvent;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Headless stellar orrery run (age playback, engulfment, explosion)"
)]
struct Cli {
    /// Simulation configuration (YAML or TOML); built-in system when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replace the body catalog (YAML list, TOML file, or directory of TOML files)
    #[arg(long)]
    bodies: Option<PathBuf>,

    /// Initial stellar mass in solar masses (clamped to 0.5..=15)
    #[arg(long)]
    mass: Option<f64>,

    /// Initial age in billions of years (clamped to 0..=15)
    #[arg(long)]
    age: Option<f64>,

    /// Real seconds to simulate
    #[arg(long, default_value_t = 20.0)]
    seconds: f64,

    /// Frames per second fed to the simulation
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Keep the clock paused (age only changes through --age)
    #[arg(long, default_value_t = false)]
    paused: bool,

    /// Trigger an explosion after this many real seconds
    #[arg(long)]
    explode_at: Option<f64>,

    /// Seed for belt generation (overrides the configuration)
    #[arg(long)]
    seed: Option<u64>,

    /// Select this body before the run and report whether the selection survives
    #[arg(long)]
    focus: Option<String>,

    /// Write the age trace as CSV (use '-' for stdout)
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Write the final snapshot and event log as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(path) = &cli.bodies {
        config.bodies = load_body_catalog(path)?;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if !(cli.fps.is_finite() && cli.fps > 0.0) {
        return Err(anyhow::anyhow!("--fps must be positive"));
    }

    let plan = RunPlan {
        mass: cli.mass,
        age: cli.age,
        duration: seconds_arg("--seconds", cli.seconds)?,
        frame: seconds_arg("--fps", 1.0 / cli.fps)?,
        play: !cli.paused,
        explode_at: cli
            .explode_at
            .map(|s| seconds_arg("--explode-at", s))
            .transpose()?,
        focus: cli.focus.clone(),
    };

    let report = headless::run(config.clone(), &plan)?;
    let last = &report.final_snapshot;

    println!("=== Orrery Run ===");
    println!(
        "Star           : mass = {:.2} Msun, lifespan = {:.3} BY, red giant end = {:.3} BY",
        last.star.mass, last.star.lifespan, last.star.red_giant_end
    );
    println!(
        "Playback       : {:.2} s real time, {} frames, seed {}",
        last.elapsed_s, report.frames, last.seed
    );
    println!("--- Timeline ---");
    for timed in &report.events {
        match &timed.event {
            SimEvent::StageChanged { from, to, age } => println!(
                "  t = {:>7.2} s : {} -> {} (age {:.2} BY)",
                timed.elapsed_s, from, to, age
            ),
            SimEvent::Engulfed { name, age, .. } => println!(
                "  t = {:>7.2} s : {} engulfed (age {:.2} BY)",
                timed.elapsed_s, name, age
            ),
            SimEvent::BeltEngulfed { class, count } => println!(
                "  t = {:>7.2} s : {} {:?} particle(s) engulfed",
                timed.elapsed_s, count, class
            ),
            SimEvent::ExplosionStarted => {
                println!("  t = {:>7.2} s : explosion started", timed.elapsed_s)
            }
            SimEvent::ExplosionEnded => {
                println!("  t = {:>7.2} s : explosion ended", timed.elapsed_s)
            }
            SimEvent::PlaybackStopped { age } => println!(
                "  t = {:>7.2} s : playback stopped at age {:.2} BY",
                timed.elapsed_s, age
            ),
            SimEvent::FocusCleared { .. } | SimEvent::Reset { .. } => {}
        }
    }
    println!("--- Final state ---");
    println!(
        "Stage          : {} (age {:.2} BY) - {}",
        last.star.stage, last.star.age, last.star.description
    );
    println!(
        "Star           : scale = {:.3}, color = {}",
        last.star.scale,
        last.star.color.to_hex()
    );
    println!(
        "Orbits         : current mass = {:.3} Msun, expansion = {:.3}",
        last.scaling.current_mass, last.scaling.expansion_factor
    );
    println!(
        "Bodies         : {} of {} engulfed",
        last.inert_bodies(),
        last.bodies.len()
    );
    println!(
        "Belts          : inner {}/{} engulfed, outer {}/{} engulfed",
        last.inner_belt.inert, last.inner_belt.total, last.outer_belt.inert, last.outer_belt.total
    );
    if let Some(focus) = &report.focus {
        match focus.cleared_at_age {
            Some(age) => println!(
                "Focus          : {} engulfed at age {:.2} BY, selection cleared",
                focus.name, age
            ),
            None => println!(
                "Focus          : {} still selected at the end of the run",
                focus.name
            ),
        }
    }

    if let Some(path) = &cli.trace {
        let mut writer = export_trace::writer_for_path(path)?;
        export_trace::write_header(writer.as_mut())?;
        for sample in &report.trace {
            export_trace::TraceRecord {
                elapsed_s: sample.elapsed_s,
                age: sample.age,
                stage: sample.stage.label(),
                star_scale: sample.star_scale,
                displayed_star_scale: sample.displayed_star_scale,
                lifespan: sample.lifespan,
                red_giant_end: sample.red_giant_end,
                current_mass: sample.current_mass,
                expansion_factor: sample.expansion_factor,
                inert_bodies: sample.inert_bodies,
                exploding: sample.exploding,
            }
            .write_to(writer.as_mut())?;
        }
        writer.flush()?;
    }

    if let Some(path) = &cli.snapshot {
        let config_label = cli
            .config
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string());
        let meta = Metadata {
            config: &config_label,
            seed: last.seed,
            initial_mass: cli.mass.unwrap_or(config.star.initial_mass),
            initial_age: cli.age.unwrap_or(config.star.initial_age),
            frames: report.frames,
        };
        export_snapshot::write_snapshot(path, &meta, &report.events, last)?;
    }

    Ok(())
}

/// Convert a seconds flag, rejecting negative, non-finite and overflowing values.
fn seconds_arg(flag: &str, seconds: f64) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(seconds)
        .map_err(|err| anyhow::anyhow!("{flag} out of range ({seconds}): {err}"))
}
