//! # Error Module
//!
//! Error types for the duplicate image sweeper, one enum per pipeline stage.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - A single file's failure is reported and skipped; it never aborts the run

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while scanning the target folder
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{path} is not a valid directory")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory entry {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while decoding and fingerprinting a single image.
///
/// These are always per-file: the file is excluded from the descriptor
/// set and the batch continues.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to open image file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Skipping {path}: no {codec} decoder in this build")]
    UnsupportedCodec { path: PathBuf, codec: &'static str },
}

/// Errors that occur while planning actions
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("No free destination name for {path} after {attempts} attempts")]
    ConflictExhausted { path: PathBuf, attempts: u32 },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SweepError>;
