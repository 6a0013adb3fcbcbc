//! File logging
//!
//! The terminal belongs to the UI, so log lines go to a file in the temp dir.
//! `RUST_LOG` selects the level, default `info`.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("meter-registry-tui.log")
}

pub fn init_tracing() -> Result<PathBuf> {
    let path = log_path();
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| eyre!("Failed to initialize logging: {e}"))?;

    Ok(path)
}
