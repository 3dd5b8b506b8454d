//! # Action Planner
//!
//! Converts duplicate groups into a keep/action list for one run.
//!
//! The planner only decides; it never touches the filesystem beyond
//! read-only existence checks when resolving Move destinations. Collision
//! suffixes are resolved against both the names already claimed earlier in
//! this run and files already on disk, so two duplicates sharing a
//! basename get distinct destinations before either is actually moved.

use crate::core::grouper::DuplicateGroup;
use crate::core::loader::ImageDescriptor;
use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Name of the folder duplicates are moved into, directly under the
/// scanned folder.
pub const DUPLICATES_DIR_NAME: &str = "Duplicates";

/// Upper bound on the `_1`, `_2`, ... suffix search for one file.
const MAX_SUFFIX_ATTEMPTS: u32 = 10_000;

/// What a run does with the duplicates it finds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    /// Report only; no file is touched
    Preview,
    /// Delete every non-keeper
    Delete,
    /// Move every non-keeper into the Duplicates folder
    Move,
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Preview => write!(f, "Dry run (preview only)"),
            RunMode::Delete => write!(f, "Delete duplicates"),
            RunMode::Move => write!(f, "Move duplicates to 'Duplicates' folder"),
        }
    }
}

/// Placement decision for one group member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// The group's keeper; no side effect
    Keep,
    /// Remove the original file
    Delete,
    /// Move the original file to `dest`
    Move { dest: PathBuf },
}

impl ActionKind {
    /// Tag rendered in the console report
    pub fn tag(&self) -> &'static str {
        match self {
            ActionKind::Keep => "KEEP",
            ActionKind::Delete => "DELETE",
            ActionKind::Move { .. } => "MOVE",
        }
    }
}

/// One planned placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub descriptor: ImageDescriptor,
    pub kind: ActionKind,
}

/// Planned actions for one duplicate group, keeper included
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupPlan {
    /// Total members in the group (actions may be fewer if planning
    /// failed for a member)
    pub member_count: usize,
    pub actions: Vec<Action>,
}

/// The full plan for one run
#[derive(Debug)]
pub struct ActionPlan {
    pub mode: RunMode,
    pub groups: Vec<GroupPlan>,
    /// Number of non-Keep actions
    pub pending_files: usize,
    /// Total byte size of non-Keep actions
    pub pending_bytes: u64,
    /// Per-file planning failures; the rest of the plan stands
    pub failures: Vec<PlanError>,
}

/// Plans actions for duplicate groups
pub struct ActionPlanner {
    mode: RunMode,
    dest_root: PathBuf,
}

impl ActionPlanner {
    /// Create a planner. `dest_root` is only consulted in Move mode.
    pub fn new(mode: RunMode, dest_root: PathBuf) -> Self {
        Self { mode, dest_root }
    }

    /// Convert groups into a run plan.
    ///
    /// Preview plans carry Delete-shaped records so the report can show
    /// what an `--execute` run would do; the executor ignores them.
    pub fn plan(&self, groups: &[DuplicateGroup]) -> ActionPlan {
        let mut group_plans = Vec::with_capacity(groups.len());
        let mut pending_files = 0;
        let mut pending_bytes = 0;
        let mut failures = Vec::new();
        let mut claimed: HashSet<PathBuf> = HashSet::new();

        for group in groups {
            let mut actions = Vec::with_capacity(group.members.len());

            for (i, member) in group.members.iter().enumerate() {
                if i == group.keep_index {
                    actions.push(Action {
                        descriptor: member.clone(),
                        kind: ActionKind::Keep,
                    });
                    continue;
                }

                let kind = match self.mode {
                    RunMode::Preview | RunMode::Delete => ActionKind::Delete,
                    RunMode::Move => {
                        match self.resolve_destination(&member.path, &claimed) {
                            Ok(dest) => {
                                claimed.insert(dest.clone());
                                ActionKind::Move { dest }
                            }
                            Err(e) => {
                                failures.push(e);
                                continue;
                            }
                        }
                    }
                };

                pending_files += 1;
                pending_bytes += member.byte_size;
                actions.push(Action {
                    descriptor: member.clone(),
                    kind,
                });
            }

            group_plans.push(GroupPlan {
                member_count: group.members.len(),
                actions,
            });
        }

        ActionPlan {
            mode: self.mode,
            groups: group_plans,
            pending_files,
            pending_bytes,
            failures,
        }
    }

    /// Pick a free destination name for `path` inside the Duplicates
    /// folder, appending `_1`, `_2`, ... before the extension until one
    /// is neither claimed this run nor present on disk.
    fn resolve_destination(
        &self,
        path: &Path,
        claimed: &HashSet<PathBuf>,
    ) -> Result<PathBuf, PlanError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");

        let candidate = self.dest_root.join(file_name);
        if !claimed.contains(&candidate) && !candidate.exists() {
            return Ok(candidate);
        }

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("file");
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        for counter in 1..=MAX_SUFFIX_ATTEMPTS {
            let name = if ext.is_empty() {
                format!("{}_{}", stem, counter)
            } else {
                format!("{}_{}.{}", stem, counter, ext)
            };
            let candidate = self.dest_root.join(name);
            if !claimed.contains(&candidate) && !candidate.exists() {
                return Ok(candidate);
            }
        }

        Err(PlanError::ConflictExhausted {
            path: path.to_path_buf(),
            attempts: MAX_SUFFIX_ATTEMPTS,
        })
    }
}
