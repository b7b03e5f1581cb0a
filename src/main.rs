// src/main.rs

//! Small driver around the library.
//!
//! 1. Load the TOML config (defaults when the file is absent)
//! 2. Set up the working directory and console/file logging
//! 3. Open the record store
//! 4. Print the highest-priority queued records
//!
//! Usage: `buried-point [CONFIG] [LIMIT]`

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use buried_point::{config, BuriedPoint};

const DEFAULT_LIMIT: i32 = 10;

/// `default.toml` next to the executable.
fn default_config_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("cannot determine exe path")?;
    let dir = exe.parent().unwrap_or(Path::new("."));
    Ok(dir.join("default.toml"))
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let cfg_path = match args.next() {
        Some(p) => PathBuf::from(p),
        None => default_config_path()?,
    };
    let limit: i32 = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid limit '{raw}'"))?,
        None => DEFAULT_LIMIT,
    };

    let cfg = config::load_or_default(&cfg_path)
        .with_context(|| format!("loading config {}", cfg_path.display()))?;

    let bp = BuriedPoint::new(&cfg.logging).context("logging setup failed")?;
    bp.install_global()?;

    let db = bp.open_database(&cfg.database).context("opening database")?;
    let pending = db.query(limit)?;
    log::info!("{} record(s) in the top-{} window", pending.len(), limit);
    for data in &pending {
        println!(
            "id={} priority={} timestamp={} content={}",
            data.id, data.priority, data.timestamp, data.content
        );
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!(
            "[{}][ERROR][main] {:#}",
            chrono::Local::now().to_rfc3339(),
            e
        );
        std::process::exit(1);
    }
}
