//! # Descent Walk
//!
//! Seeded random walk through a blueprint catalog. Prints the run summary as
//! JSON, or writes it to a file.
//!
//! ```text
//! descent_walk [CATALOG] [CONFIG] [TICKS] [SUMMARY_OUT]
//! ```
//!
//! Defaults to the sample data under `data/` and 500 ticks. Log level comes
//! from `RUST_LOG` (default `info`).

use std::path::PathBuf;

use catacomb::{ExplorationRun, RunError};
use tracing_subscriber::EnvFilter;

const DEFAULT_CATALOG: &str = "data/catalog/chambers.toml";
const DEFAULT_CONFIG: &str = "data/config/graph.toml";
const DEFAULT_TICKS: u64 = 500;

fn main() -> Result<(), RunError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let catalog = args.next().unwrap_or_else(|| DEFAULT_CATALOG.to_string());
    let config = args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let ticks = match args.next() {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(%raw, "tick count is not a number, using default");
            DEFAULT_TICKS
        }),
        None => DEFAULT_TICKS,
    };
    let output = args.next().map(PathBuf::from);

    let mut run = ExplorationRun::from_files(&catalog, &config)?;
    let summary = run.run(ticks)?;
    let json = summary.to_json()?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            tracing::info!(path = %path.display(), "summary written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
