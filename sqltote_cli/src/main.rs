//! sqltote CLI
//!
//! Entry point for the sqltote command-line tool. Reads a directory tree of
//! SQL files and writes the items of a Rust module exposing each query as a
//! constant.
//!
//! Typically run from a build step:
//!
//! ```text
//! sqltote --in=resources/sql/tote --out=src/totepkg
//! sqltote --in=other/sql/tote --out=src/totepkg --prefix=other --file=other.rs
//! ```
//!
//! and included into one module:
//!
//! ```text
//! pub mod totepkg {
//!     include!("totepkg/sqltote.rs");
//!     include!("totepkg/other.rs");
//! }
//! ```

mod args;

use std::process::ExitCode;

use clap::Parser;
use sqltote_core::MODULE_ENV_VAR;
use tracing::info;

use args::Args;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Executes the generator.
///
/// This function:
/// 1. Resolves the configuration
/// 2. Collects, renders and writes the module
fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = args
        .to_options()
        .resolve(std::env::var(MODULE_ENV_VAR).ok())?;

    info!("Input: {}", config.input_dir().display());
    info!("Output: {}", config.output_path().display());

    let generated = sqltote_core::generate(&config)?;

    info!(
        "Generated {} queries in {} namespaces into {}",
        generated.table.entry_count(),
        generated.table.len(),
        generated.path.display()
    );

    Ok(())
}
