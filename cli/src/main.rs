//! Tokes payments command line tool.
//!
//! Runs a single API call and prints the JSON response to stdout.
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `TOKES_PAYMENTS_HOST`, `TOKES_PAYMENTS_API_KEY` and `TOKES_PAYMENTS_SERVICE_KEY`
//!   configure the client
//! - `RUST_LOG` controls log output on stderr

mod config;
mod run;
mod telemetry;

use std::error::Error;
use std::process;

use crate::run::run;

#[tokio::main]
async fn main() {
    let result = run().await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        process::exit(1)
    }
}
