//! Perceptual fingerprint type and the hasher that produces it.
//!
//! A fingerprint is a 64-bit vector derived from an 8x8 DCT reduction of
//! the image (classic pHash, via the `image_hasher` crate). Re-encoding,
//! resizing, and format conversion of the same visual content produce
//! fingerprints with small Hamming distance.

use image::DynamicImage;
use image_hasher::{HashAlg, HasherConfig};
use serde::{Deserialize, Serialize};

/// A 64-bit perceptual fingerprint, compared by Hamming distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Total number of bits in a fingerprint.
    pub const BITS: u32 = 64;

    /// Build a fingerprint from raw bits.
    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Hamming distance to another fingerprint: the number of differing
    /// bits, 0..=64. Lower distance = more similar images.
    pub fn distance(&self, other: &Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    /// Hexadecimal rendering, 16 lowercase digits.
    pub fn to_hex(&self) -> String {
        format!("{:016x}", self.0)
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Computes fingerprints from decoded images.
///
/// Deterministic: the same pixel data always yields the same fingerprint.
pub struct FingerprintHasher {
    hasher: image_hasher::Hasher,
}

impl FingerprintHasher {
    /// Create a hasher with the fixed 8x8 DCT configuration.
    pub fn new() -> Self {
        let hasher = HasherConfig::new()
            .hash_size(8, 8)
            .preproc_dct()
            .hash_alg(HashAlg::Mean)
            .to_hasher();

        Self { hasher }
    }

    /// Fingerprint an already-decoded image.
    pub fn fingerprint(&self, image: &DynamicImage) -> Fingerprint {
        let hash = self.hasher.hash_image(image);

        let mut bits = 0u64;
        for (i, byte) in hash.as_bytes().iter().take(8).enumerate() {
            bits |= (*byte as u64) << (56 - 8 * i);
        }
        Fingerprint(bits)
    }
}

impl Default for FingerprintHasher {
    fn default() -> Self {
        Self::new()
    }
}
