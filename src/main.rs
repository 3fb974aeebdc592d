pub mod cli;
pub mod error;
pub mod pipeline;
pub mod powo;
pub mod table;
pub mod taxon;
pub mod throttle;

use clap::Parser;
use cli::Cli;
use error::{CrateError, LookupFailure, Result};
use log::{error, info};
use pipeline::RunSummary;
use powo::client::PowoClient;
use std::time::{Duration, Instant};
use throttle::IntervalThrottle;

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG still overrides the default level.
    env_logger::Builder::new()
        .format_target(false)
        .format_timestamp_secs()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()
        .map_err(|e| CrateError::LoggerInit(e.to_string()))?;

    let cli = Cli::parse();
    info!("Starting POWO name check...");
    info!("Input file: {:?}", cli.input_file);
    info!("Output file: {:?}", cli.output_file);

    let start_time = Instant::now();

    // 1. Load names
    let names = match table::source::load(&cli.input_file) {
        Ok(names) => names,
        Err(e) => {
            error!("{}", e);
            return Err(e);
        }
    };

    // 2. Resolve each name against POWO
    let client = PowoClient::new()?;
    let throttle = IntervalThrottle::new(Duration::from_millis(cli.delay_ms));
    let rows = pipeline::run(names, &client, &throttle).await;

    // 3. Write the augmented table
    if let Err(e) = table::sink::save(&rows, &cli.output_file) {
        error!("{}", e);
        error!(
            "{} checked names were not saved; fix the destination and rerun.",
            rows.len()
        );
        return Err(e);
    }

    let summary = RunSummary::from_rows(&rows);
    let duration = start_time.elapsed();
    print_summary(&summary, &cli, duration);

    Ok(())
}

fn print_summary(summary: &RunSummary, cli: &Cli, duration: Duration) {
    println!("\n--- Summary Report ---");
    println!("Names read: {}", summary.total);
    println!("Exact genus+species matches: {}", summary.exact);
    println!("Fallback (first result) matches: {}", summary.fallback);
    println!("Names without an accepted name: {}", summary.failed());
    for failure in [
        LookupFailure::HttpStatus(0),
        LookupFailure::Parse(String::new()),
        LookupFailure::EmptyResults,
        LookupFailure::Transport(String::new()),
    ] {
        let count = summary.failures_for(&failure);
        if count > 0 {
            println!("  {}: {}", failure.category(), count);
        }
    }
    println!("Done! Saved as {}", cli.output_file.display());
    println!("Execution time: {:.2?}", duration);
}
