//! Command-line front-end: `boost_events <INPUT_FILE>...`
//!
//! Exit status is 0 on success and 1 on failure, be it a usage error (which
//! is reported before touching any file) or a file that could not be boosted.
//! Files are processed in order, and the first failure stops the run.

use boost_events::{
    boost::BeamBoost,
    config::Configuration,
    logging,
    rewrite::{self, RewriteSummary},
};

use clap::error::ErrorKind;
use eyre::WrapErr;
use tracing::info;

use std::{process, time::Instant};

/// We'll use eyre's type-erased result type throughout the application
type Result<T> = eyre::Result<T>;

/// Exit status for command-line usage errors
const USAGE_ERROR_STATUS: i32 = 1;

fn main() -> Result<()> {
    // ### CONFIGURATION READOUT ###

    let cfg = match Configuration::from_args(std::env::args_os()) {
        Ok(cfg) => cfg,
        Err(e) => match e.kind() {
            // These are not errors, and clap knows how to exit after them
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                // Printing can only fail if stderr is gone, nothing to do then
                let _ = e.print();
                process::exit(USAGE_ERROR_STATUS);
            }
        },
    };
    logging::setup_logging().wrap_err("Failed to set up logging")?;
    cfg.print();

    // ### BOOST COMPUTATION ###

    // The boost only depends on the beams, so it is computed once for all files
    let boost = BeamBoost::new(cfg.beams, cfg.direction)
        .wrap_err("Failed to compute the beam boost")?;
    info!("Boost velocity : {}", boost.transform().velocity().transpose());

    // ### FILE PROCESSING ###

    let saved_time = Instant::now();
    let summaries: Vec<RewriteSummary> =
        rewrite::rewrite_files(&cfg.inputs, &boost).wrap_err("Failed to boost event files")?;

    let total_events: usize = summaries.iter().map(|s| s.events).sum();
    info!(
        "Boosted {} events from {} file(s) in {:.3?}",
        total_events,
        summaries.len(),
        saved_time.elapsed()
    );

    // ...and we're done
    Ok(())
}
