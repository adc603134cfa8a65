//! Connection doctor for the spreadsheet leaderboard.
//!
//! Probes the configured worksheet in three steps (read, column check, and an
//! append of a throwaway test row) and reports each result. Exits non-zero
//! when any step fails, so it can gate deployments.

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use detroit_anomaly::leaderboard::{SheetsClient, SheetsConfig, SHEET_URL_ENV};

pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(config) = SheetsConfig::from_env() else {
        bail!("{SHEET_URL_ENV} is not set; point it at the worksheet rows endpoint");
    };
    println!("Checking worksheet {:?} at {}", config.worksheet, config.endpoint);

    let client = SheetsClient::new(config).context("building HTTP client")?;
    let report = client.doctor();

    for step in &report.steps {
        let mark = if step.passed { "PASS" } else { "FAIL" };
        println!("[{mark}] {:<8} {}", step.name, step.detail);
    }

    if !report.all_passed() {
        bail!("one or more checks failed");
    }
    println!("All checks passed.");
    Ok(())
}
