//! # Representative Selector
//!
//! Picks the member of each group worth keeping: highest resolution first,
//! largest file second. Ties keep the first-scanned member, so repeated
//! runs on unchanged input always pick the same keeper.

use crate::core::grouper::DuplicateGroup;
use crate::core::loader::ImageDescriptor;

/// Index of the best member: (resolution, byte size) descending,
/// scan order as the final tie-break.
pub fn select_keeper(members: &[ImageDescriptor]) -> usize {
    let mut best = 0;
    for (i, candidate) in members.iter().enumerate().skip(1) {
        let current = &members[best];
        // Strictly-greater keeps the earlier member on full ties
        if (candidate.pixel_count(), candidate.byte_size)
            > (current.pixel_count(), current.byte_size)
        {
            best = i;
        }
    }
    best
}

/// Set `keep_index` on every group
pub fn assign_keepers(groups: &mut [DuplicateGroup]) {
    for group in groups {
        group.keep_index = select_keeper(&group.members);
    }
}
