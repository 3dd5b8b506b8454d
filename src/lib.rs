//! # dupsweep
//!
//! Finds visually duplicate images in a folder and keeps the best copy.
//!
//! ## Core Philosophy
//! - **Preview by default** - nothing is deleted or moved unless asked
//! - **Deterministic** - same folder, same flags, same output, every run
//! - **One bad file never kills a batch** - decode failures are reported
//!   per file and skipped
//!
//! ## Architecture
//! The library is split into a core engine (GUI-agnostic) and the CLI:
//! - `core` - scanning, fingerprinting, grouping, selection, planning
//! - `error` - error types per pipeline stage
//! - `cli` (binary) - argument parsing and console output

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use error::{Result, SweepError};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
