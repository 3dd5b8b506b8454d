//! # Plan Executor
//!
//! Carries out the Move/Delete actions of a plan. Preview plans are a
//! no-op by construction. A failure on one file is recorded and the
//! remaining actions still run.

use crate::core::planner::{ActionKind, ActionPlan, RunMode};
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to one non-Keep action
#[derive(Debug)]
pub enum ActionOutcome {
    Moved { from: PathBuf, to: PathBuf },
    Deleted { path: PathBuf },
    Failed { path: PathBuf, message: String },
}

/// Result of executing a plan
#[derive(Debug, Default)]
pub struct ExecutionResult {
    /// Per-action outcomes in plan order
    pub outcomes: Vec<ActionOutcome>,
    /// Actions that completed
    pub completed: usize,
    /// Bytes moved or deleted
    pub bytes_processed: u64,
    /// Actions that failed
    pub failed: usize,
    /// Set when the Duplicates folder was created by this run
    pub created_folder: Option<PathBuf>,
}

/// Executes action plans
pub struct PlanExecutor;

impl PlanExecutor {
    /// Execute every Move/Delete action in the plan.
    ///
    /// The Duplicates folder is created on the first Move action, never
    /// for Preview or Delete runs.
    pub fn execute(plan: &ActionPlan) -> ExecutionResult {
        let mut result = ExecutionResult::default();

        if plan.mode == RunMode::Preview {
            return result;
        }

        for group in &plan.groups {
            for action in &group.actions {
                let path = &action.descriptor.path;
                let outcome = match &action.kind {
                    ActionKind::Keep => continue,
                    ActionKind::Delete => fs::remove_file(path)
                        .map(|()| ActionOutcome::Deleted { path: path.clone() }),
                    ActionKind::Move { dest } => {
                        Self::ensure_destination(dest, &mut result).and_then(|()| {
                            move_file(path, dest).map(|()| ActionOutcome::Moved {
                                from: path.clone(),
                                to: dest.clone(),
                            })
                        })
                    }
                };

                match outcome {
                    Ok(outcome) => {
                        result.completed += 1;
                        result.bytes_processed += action.descriptor.byte_size;
                        result.outcomes.push(outcome);
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "action failed"
                        );
                        result.failed += 1;
                        result.outcomes.push(ActionOutcome::Failed {
                            path: path.clone(),
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        result
    }

    fn ensure_destination(
        dest: &Path,
        result: &mut ExecutionResult,
    ) -> std::io::Result<()> {
        if let Some(parent) = dest.parent() {
            if result.created_folder.is_none() && !parent.exists() {
                fs::create_dir_all(parent)?;
                result.created_folder = Some(parent.to_path_buf());
            }
        }
        Ok(())
    }
}

/// Move a file, falling back to copy + verify + delete when rename fails
/// (rename does not cross filesystems).
fn move_file(source: &Path, dest: &Path) -> std::io::Result<()> {
    fs::rename(source, dest).or_else(|_| {
        let source_size = fs::metadata(source)?.len();
        fs::copy(source, dest)?;

        // Verify destination size matches source before deleting
        let dest_size = fs::metadata(dest)?.len();
        if dest_size != source_size {
            let _ = fs::remove_file(dest);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!(
                    "Copy verification failed: source {} bytes, dest {} bytes",
                    source_size, dest_size
                ),
            ));
        }

        fs::remove_file(source)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fingerprint::Fingerprint;
    use crate::core::loader::ImageDescriptor;
    use crate::core::planner::{Action, GroupPlan};
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(path: &Path, contents: &[u8]) {
        let mut f = fs::File::create(path).unwrap();
        f.write_all(contents).unwrap();
    }

    fn desc(path: PathBuf, byte_size: u64) -> ImageDescriptor {
        ImageDescriptor {
            path,
            width: 100,
            height: 100,
            byte_size,
            fingerprint: Fingerprint::from_bits(0),
        }
    }

    fn single_action_plan(mode: RunMode, action: Action) -> ActionPlan {
        ActionPlan {
            mode,
            groups: vec![GroupPlan {
                member_count: 2,
                actions: vec![action],
            }],
            pending_files: 1,
            pending_bytes: 0,
            failures: Vec::new(),
        }
    }

    #[test]
    fn preview_plan_is_a_no_op() {
        let temp_dir = TempDir::new().unwrap();
        let victim = temp_dir.path().join("photo.jpg");
        write_file(&victim, b"pixels");

        let plan = single_action_plan(
            RunMode::Preview,
            Action {
                descriptor: desc(victim.clone(), 6),
                kind: ActionKind::Delete,
            },
        );

        let result = PlanExecutor::execute(&plan);

        assert!(victim.exists());
        assert_eq!(result.completed, 0);
        assert!(result.created_folder.is_none());
    }

    #[test]
    fn delete_removes_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let victim = temp_dir.path().join("photo.jpg");
        write_file(&victim, b"pixels");

        let plan = single_action_plan(
            RunMode::Delete,
            Action {
                descriptor: desc(victim.clone(), 6),
                kind: ActionKind::Delete,
            },
        );

        let result = PlanExecutor::execute(&plan);

        assert!(!victim.exists());
        assert_eq!(result.completed, 1);
        assert_eq!(result.bytes_processed, 6);
        assert_eq!(result.failed, 0);
    }

    #[test]
    fn move_creates_folder_and_relocates() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("photo.jpg");
        write_file(&source, b"pixels");
        let dest = temp_dir.path().join("Duplicates").join("photo.jpg");

        let plan = single_action_plan(
            RunMode::Move,
            Action {
                descriptor: desc(source.clone(), 6),
                kind: ActionKind::Move { dest: dest.clone() },
            },
        );

        let result = PlanExecutor::execute(&plan);

        assert!(!source.exists());
        assert!(dest.exists());
        assert_eq!(result.completed, 1);
        assert_eq!(
            result.created_folder.as_deref(),
            Some(temp_dir.path().join("Duplicates").as_path())
        );
    }

    #[test]
    fn missing_source_is_recorded_and_run_continues() {
        let temp_dir = TempDir::new().unwrap();
        let survivor = temp_dir.path().join("real.jpg");
        write_file(&survivor, b"pixels");

        let plan = ActionPlan {
            mode: RunMode::Delete,
            groups: vec![GroupPlan {
                member_count: 3,
                actions: vec![
                    Action {
                        descriptor: desc(PathBuf::from("/nonexistent/gone.jpg"), 10),
                        kind: ActionKind::Delete,
                    },
                    Action {
                        descriptor: desc(survivor.clone(), 6),
                        kind: ActionKind::Delete,
                    },
                ],
            }],
            pending_files: 2,
            pending_bytes: 16,
            failures: Vec::new(),
        };

        let result = PlanExecutor::execute(&plan);

        assert_eq!(result.failed, 1);
        assert_eq!(result.completed, 1);
        assert!(!survivor.exists());
        assert!(matches!(result.outcomes[0], ActionOutcome::Failed { .. }));
    }

    #[test]
    fn move_file_relocates_contents() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("a.bin");
        write_file(&source, b"0123456789");
        let dest = temp_dir.path().join("b.bin");

        move_file(&source, &dest).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"0123456789");
    }
}
