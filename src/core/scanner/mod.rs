//! # Scanner Module
//!
//! Lists candidate image files in the target folder.
//!
//! The tool operates on a single flat folder: entries are walked at depth 1
//! and sorted by file name, so scan order (and everything derived from it)
//! is reproducible across runs. Subdirectories, including a previous run's
//! `Duplicates/` folder, are not descended into.

mod filter;

pub use filter::{is_heif, ImageFilter};

use crate::error::ScanError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A candidate image file found by the scanner
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub path: PathBuf,
    pub byte_size: u64,
}

/// Result of scanning a folder
#[derive(Debug)]
pub struct ScanOutcome {
    /// Candidate files in name order
    pub files: Vec<ImageFile>,
    /// Per-entry errors; the scan continues past them
    pub errors: Vec<ScanError>,
}

/// Configuration for the folder scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to include hidden files
    pub include_hidden: bool,
}

/// Scanner for a single folder of images
pub struct FolderScanner {
    filter: ImageFilter,
}

impl FolderScanner {
    /// Create a scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        Self {
            filter: ImageFilter::new().with_hidden(config.include_hidden),
        }
    }

    /// List the image files directly inside `folder`.
    ///
    /// A missing or non-directory path is fatal; unreadable individual
    /// entries are collected as errors and skipped.
    pub fn scan(&self, folder: &Path) -> Result<ScanOutcome, ScanError> {
        if !folder.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: folder.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        let mut errors = Vec::new();

        let walker = WalkDir::new(folder).max_depth(1).sort_by_file_name();

        for entry_result in walker {
            match entry_result {
                Ok(entry) => {
                    let path = entry.path();

                    if entry.file_type().is_dir() {
                        continue;
                    }

                    if !self.filter.should_include(path) {
                        continue;
                    }

                    match fs::metadata(path) {
                        Ok(metadata) => files.push(ImageFile {
                            path: path.to_path_buf(),
                            byte_size: metadata.len(),
                        }),
                        Err(source) => errors.push(ScanError::ReadEntry {
                            path: path.to_path_buf(),
                            source,
                        }),
                    }
                }
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();

                    let error = if e.io_error().map(|e| e.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path }
                    } else {
                        ScanError::ReadEntry {
                            path,
                            source: std::io::Error::new(
                                std::io::ErrorKind::Other,
                                e.to_string(),
                            ),
                        }
                    };

                    errors.push(error);
                }
            }
        }

        Ok(ScanOutcome { files, errors })
    }
}
