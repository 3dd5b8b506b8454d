//! # Descriptor Loader
//!
//! Turns candidate files into [`ImageDescriptor`]s: decode, record pixel
//! dimensions and byte size, compute the perceptual fingerprint.
//!
//! Decode + hash of each file is an independent unit of work, fanned out
//! across a rayon pool. Results land in one slot per input index, so the
//! descriptor list preserves scan order regardless of completion order.
//! A failure on one file never aborts the batch.

use crate::core::fingerprint::{Fingerprint, FingerprintHasher};
use crate::core::scanner::ImageFile;
use crate::error::DecodeError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Whether this build can decode HEIF/HEIC containers.
///
/// The `image` crate does not ship a HEIF decoder, so this is false.
/// Builds that link one flip the capability in this single place.
pub const HEIF_SUPPORT: bool = false;

/// Codec capability configuration for the loader.
///
/// Capability is explicit construction-time configuration rather than
/// ambient state, so a GUI or test can override what the loader believes
/// it can decode.
#[derive(Debug, Clone, Copy)]
pub struct LoaderConfig {
    /// Attempt to decode `.heic`/`.heif` files
    pub heif: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { heif: HEIF_SUPPORT }
    }
}

/// Everything the grouping pipeline needs to know about one image.
///
/// Created once per decodable file; immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub byte_size: u64,
    pub fingerprint: Fingerprint,
}

impl ImageDescriptor {
    /// Resolution in pixels, the primary quality-ranking key.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Base name for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// A file that could not be decoded, reported and skipped
#[derive(Debug)]
pub struct DecodeFailure {
    pub path: PathBuf,
    pub error: DecodeError,
}

/// Result of loading a batch of files
#[derive(Debug)]
pub struct LoadOutcome {
    /// Descriptors in scan order
    pub descriptors: Vec<ImageDescriptor>,
    /// Per-file failures in scan order
    pub failures: Vec<DecodeFailure>,
}

/// Loads image descriptors from candidate files
pub struct DescriptorLoader {
    config: LoaderConfig,
    hasher: FingerprintHasher,
}

impl DescriptorLoader {
    /// Create a loader with the given codec capabilities
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            hasher: FingerprintHasher::new(),
        }
    }

    /// Load every file, collecting failures instead of aborting.
    pub fn load(&self, files: &[ImageFile]) -> LoadOutcome {
        self.load_with_progress(files, |_| {})
    }

    /// Load every file, calling `progress` with the completed count.
    pub fn load_with_progress(
        &self,
        files: &[ImageFile],
        progress: impl Fn(usize) + Sync,
    ) -> LoadOutcome {
        let completed = AtomicUsize::new(0);

        let results: Vec<Result<ImageDescriptor, DecodeFailure>> = files
            .par_iter()
            .map(|file| {
                let result = self.load_one(file).map_err(|error| {
                    tracing::warn!(
                        path = %file.path.display(),
                        error = %error,
                        "failed to load image"
                    );
                    DecodeFailure {
                        path: file.path.clone(),
                        error,
                    }
                });
                progress(completed.fetch_add(1, Ordering::SeqCst) + 1);
                result
            })
            .collect();

        let mut descriptors = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(descriptor) => descriptors.push(descriptor),
                Err(failure) => failures.push(failure),
            }
        }

        LoadOutcome {
            descriptors,
            failures,
        }
    }

    fn load_one(&self, file: &ImageFile) -> Result<ImageDescriptor, DecodeError> {
        if super::scanner::is_heif(&file.path) && !self.config.heif {
            return Err(DecodeError::UnsupportedCodec {
                path: file.path.clone(),
                codec: "HEIF",
            });
        }

        // The image crate picks the codec itself; the loader never
        // branches on format.
        let image = image::open(&file.path).map_err(|e| match e {
            image::ImageError::IoError(source) => DecodeError::Open {
                path: file.path.clone(),
                source,
            },
            other => DecodeError::Decode {
                path: file.path.clone(),
                reason: other.to_string(),
            },
        })?;

        let fingerprint = self.hasher.fingerprint(&image);

        Ok(ImageDescriptor {
            path: file.path.clone(),
            width: image.width(),
            height: image.height(),
            byte_size: file.byte_size,
            fingerprint,
        })
    }
}
