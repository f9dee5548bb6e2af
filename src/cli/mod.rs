//! CLI module for the pdfrag binaries
//!
//! This module contains all CLI-related functionality including:
//! - Command line argument parsing
//! - Command handlers (one per entry point in handlers/)
//! - Console output in the user's language

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::*;
pub use handlers::*;

use tracing_appender::non_blocking::WorkerGuard;

use crate::config::AppConfig;
use crate::Result;

/// Load configuration and start logging
///
/// Logging problems are reported on stderr but never stop the program. The
/// returned guard must be kept alive until exit.
pub fn init(verbose: bool) -> Result<(AppConfig, Option<WorkerGuard>)> {
    let config = AppConfig::load()?;

    let guard = match crate::logging::init_logging(&config.logging, verbose) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: {e}");
            None
        }
    };
    tracing::info!("Configuration loaded successfully");

    Ok((config, guard))
}
