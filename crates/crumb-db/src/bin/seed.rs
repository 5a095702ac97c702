//! # Seed Data Generator
//!
//! Writes the starter ledger snapshot for development: three products,
//! two ingredients, default settings, empty histories.
//!
//! ## Usage
//! ```bash
//! # Seed the default platform database
//! cargo run -p crumb-db --bin seed
//!
//! # Specify database path
//! cargo run -p crumb-db --bin seed -- --db ./data/crumb.db
//! ```
//!
//! An existing snapshot is overwritten - this tool resets the store.

use std::env;
use std::path::PathBuf;

use crumb_core::ledger::Ledger;
use crumb_db::{Database, DbConfig, LEDGER_SNAPSHOT_KEY};
use directories::ProjectDirs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = database_path()?;
    println!("Seeding ledger snapshot at {}", path.display());

    let db = Database::new(DbConfig::new(&path)).await?;

    let ledger = Ledger::seed();
    db.snapshots().save(LEDGER_SNAPSHOT_KEY, &ledger).await?;

    println!(
        "Done: {} products, {} ingredients, threshold {}",
        ledger.products().len(),
        ledger.ingredients().len(),
        ledger.settings().low_stock_threshold
    );

    db.close().await;
    Ok(())
}

/// Resolves the target database path.
///
/// Priority: `--db <path>` argument, then `CRUMB_DB_PATH`, then the
/// platform data directory.
fn database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if let Some(index) = args.iter().position(|a| a == "--db") {
        let path = args
            .get(index + 1)
            .ok_or("--db requires a path argument")?;
        return Ok(PathBuf::from(path));
    }

    if let Ok(path) = env::var("CRUMB_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs =
        ProjectDirs::from("com", "crumb", "pos").ok_or("Could not determine app data directory")?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("crumb.db"))
}
