//! # Similarity Grouper
//!
//! Partitions image descriptors into duplicate groups.
//!
//! Every unordered pair of fingerprints is compared by Hamming distance;
//! pairs within the threshold are unioned, and each connected component of
//! size >= 2 becomes a group. Grouping is transitive: if A matches B and
//! B matches C, then {A, B, C} is one group even when A and C are not
//! within threshold of each other.
//!
//! The O(n^2) pairwise comparison is a deliberate choice for the target
//! scale (hundreds to low thousands of files). A coarse pre-filter could
//! cut comparisons for larger collections, but it must not change which
//! groups come out.
//!
//! ## Threshold scale
//! The user-facing similarity value (0-10) is used directly as the maximum
//! Hamming distance in bits over the 64-bit fingerprint: similarity 5
//! admits pairs up to 5 differing bits. The factor is fixed; it is visible
//! in output and test fixtures.

use crate::core::loader::ImageDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Map a user-facing similarity value (0-10) to a maximum Hamming
/// distance in bits. The scale factor is 1 and must stay fixed.
pub fn max_distance_for_similarity(similarity: u8) -> u32 {
    similarity as u32
}

/// A group of visually duplicate images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Unique identifier for this group
    pub id: Uuid,
    /// Members in original scan order, always >= 2
    pub members: Vec<ImageDescriptor>,
    /// Index of the member to keep, set by the representative selector
    pub keep_index: usize,
}

impl DuplicateGroup {
    /// The member designated to keep
    pub fn keeper(&self) -> &ImageDescriptor {
        &self.members[self.keep_index]
    }

    /// Number of duplicates (excluding the keeper)
    pub fn duplicate_count(&self) -> usize {
        self.members.len().saturating_sub(1)
    }

    /// Total byte size of the duplicates (excluding the keeper)
    pub fn duplicate_bytes(&self) -> u64 {
        self.members
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != self.keep_index)
            .map(|(_, m)| m.byte_size)
            .sum()
    }
}

/// Groups descriptors whose fingerprints are within a maximum Hamming
/// distance of each other, transitively.
pub struct SimilarityGrouper {
    max_distance: u32,
}

impl SimilarityGrouper {
    /// Create a grouper with a threshold in fingerprint bits
    pub fn new(max_distance: u32) -> Self {
        Self { max_distance }
    }

    /// Create a grouper from a user-facing similarity value (0-10)
    pub fn from_similarity(similarity: u8) -> Self {
        Self::new(max_distance_for_similarity(similarity))
    }

    /// Partition descriptors into duplicate groups.
    ///
    /// Groups are reported in the order their first member was scanned;
    /// members within a group keep their scan order. Components of size 1
    /// are dropped silently.
    pub fn group(&self, descriptors: &[ImageDescriptor]) -> Vec<DuplicateGroup> {
        let n = descriptors.len();
        let mut forest = UnionFind::new(n);

        for i in 0..n {
            for j in (i + 1)..n {
                let distance = descriptors[i]
                    .fingerprint
                    .distance(&descriptors[j].fingerprint);
                if distance <= self.max_distance {
                    forest.union(i, j);
                }
            }
        }

        // Collect components keyed by root, in first-seen order
        let mut roots_in_order = Vec::new();
        let mut components: HashMap<usize, Vec<usize>> = HashMap::new();
        for i in 0..n {
            let root = forest.find(i);
            components
                .entry(root)
                .or_insert_with(|| {
                    roots_in_order.push(root);
                    Vec::new()
                })
                .push(i);
        }

        roots_in_order
            .into_iter()
            .filter_map(|root| {
                let indices = &components[&root];
                if indices.len() < 2 {
                    return None;
                }
                Some(DuplicateGroup {
                    id: Uuid::new_v4(),
                    members: indices.iter().map(|&i| descriptors[i].clone()).collect(),
                    keep_index: 0,
                })
            })
            .collect()
    }
}

/// Union-find over descriptor indices, with path compression
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Compress the path walked
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            // Attach the later-seen root under the earlier one
            let (keep, absorb) = if root_a < root_b {
                (root_a, root_b)
            } else {
                (root_b, root_a)
            };
            self.parent[absorb] = keep;
        }
    }
}
