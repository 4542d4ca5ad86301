//! daytrace: segment a synthetic day of GPS traces into staypoints and
//! triplegs, then label every tripleg with a coarse transport mode.
//!
//! Usage: `daytrace [OUT_DIR]` (default `output/daytrace`).  `RUST_LOG`
//! controls log verbosity, `info` by default.

mod synth;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing_subscriber::EnvFilter;

use tm_core::{Crs, Dispatch, Positionfixes};
use tm_modes::{LengthPolicy, ModeConfig, predict_transport_mode, tripleg_speed_kmh};
use tm_staypoints::{StaypointConfig, generate_staypoints};
use tm_triplegs::{TriplegConfig, generate_triplegs};

// ── Constants ─────────────────────────────────────────────────────────────────

const USER_COUNT: u64 = 6;
const SEED:       u64 = 42;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let out_dir = std::env::args().nth(1).map_or_else(|| PathBuf::from("output/daytrace"), PathBuf::from);

    println!("=== daytrace: trajectory segmentation ===");
    println!("Users: {USER_COUNT}  |  Seed: {SEED}");
    println!();

    // 1. Synthesize positionfixes.
    let day_start = Utc
        .with_ymd_and_hms(2024, 3, 4, 7, 0, 0)
        .single()
        .context("invalid day start")?;
    let mut rng = SmallRng::seed_from_u64(SEED);
    let pfs = Positionfixes::new(Some(Crs::WGS84), synth::generate(USER_COUNT, day_start, &mut rng));
    println!("Positionfixes: {}", pfs.len());

    // All logical cores.
    let dispatch = Dispatch::new(0, false);

    // 2. Staypoints.  The last stay of the day has no following fix, so
    // include it explicitly.
    let t0 = Instant::now();
    let sp_config = StaypointConfig { include_last: true, dispatch, ..Default::default() };
    let sp = generate_staypoints(&pfs, &sp_config)?;

    // 3. Triplegs between the labelled staypoints.
    let tpl_config = TriplegConfig { dispatch, ..Default::default() };
    let tpl = generate_triplegs(&sp.positionfixes, None, &tpl_config)?;

    // 4. Transport modes.
    let modes = predict_transport_mode(&tpl.triplegs, &ModeConfig::default())?;
    let elapsed = t0.elapsed();

    let warnings = sp.warnings.len() + tpl.warnings.len() + modes.warnings.len();
    println!("Segmentation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  staypoints : {}", sp.staypoints.len());
    println!("  triplegs   : {}", modes.triplegs.len());
    println!("  warnings   : {warnings}");
    println!();

    // 5. Write tables.
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    tm_io::write_positionfixes(&out_dir.join("positionfixes.csv"), &tpl.positionfixes)?;
    tm_io::write_staypoints(&out_dir.join("staypoints.csv"), &sp.staypoints)?;
    tm_io::write_triplegs(&out_dir.join("triplegs.csv"), &modes.triplegs)?;
    println!("Tables written to {}", out_dir.display());
    println!();

    // 6. Tripleg table, with speeds measured the way the classifier did.
    let (policy, _) = LengthPolicy::for_crs(modes.triplegs.crs.as_ref())?;
    println!("{:<8} {:<6} {:<8} {:>8} {:>10}  {:<20}", "Tripleg", "User", "Start", "Minutes", "km/h", "Mode");
    println!("{}", "-".repeat(66));
    for t in &modes.triplegs.items {
        let minutes = (t.finished_at - t.started_at).num_seconds() as f64 / 60.0;
        println!(
            "{:<8} {:<6} {:<8} {:>8.1} {:>10.1}  {:<20}",
            t.id.0,
            t.user_id.0,
            t.started_at.format("%H:%M").to_string(),
            minutes,
            tripleg_speed_kmh(t, policy),
            t.mode.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
