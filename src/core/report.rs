//! # Report Module
//!
//! Renders the console report as plain text. The format is part of the
//! tool's observable behavior and is covered by golden tests, so changes
//! here are user-visible.

use crate::core::pipeline::RunOutcome;
use crate::core::planner::RunMode;

/// Tool title printed at the top of every run
const TITLE: &str = "Image Duplicate Sweeper";

/// Render the run header: title, separator, codec capability note.
pub fn render_header(heif: bool) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');
    out.push_str(&"=".repeat(40));
    out.push('\n');
    if heif {
        out.push_str("HEIC/HEIF support enabled\n");
    } else {
        out.push_str("HEIC/HEIF support not available; .heic/.heif files will be skipped\n");
    }
    out
}

/// Render the mode line.
pub fn render_mode(mode: RunMode) -> String {
    format!("Mode: {}\n\n", mode)
}

/// Render everything below the header: scan count, per-file decode
/// failures, group blocks, summary, and the mode-specific trailer.
pub fn render_run(outcome: &RunOutcome) -> String {
    let mut out = String::new();

    out.push_str(&format!("Scanning folder: {}\n", outcome.folder.display()));
    out.push_str(&format!("Found {} image files\n", outcome.total_files));

    for error in &outcome.scan_errors {
        out.push_str(&format!("{}\n", error));
    }
    for failure in &outcome.decode_failures {
        out.push_str(&format!("{}\n", failure.error));
    }

    if outcome.groups.is_empty() {
        out.push_str("\nNo duplicates found!\n");
        return out;
    }

    out.push_str(&format!(
        "\nFound {} groups of duplicates:\n",
        outcome.plan.groups.len()
    ));

    for (i, group_plan) in outcome.plan.groups.iter().enumerate() {
        out.push_str(&format!(
            "\nGroup {} ({} duplicates):\n",
            i + 1,
            group_plan.member_count
        ));
        for action in &group_plan.actions {
            let d = &action.descriptor;
            out.push_str(&format!(
                "  [{}] {} - {}x{} - {:.2}MB\n",
                action.kind.tag(),
                d.file_name(),
                d.width,
                d.height,
                mb(d.byte_size)
            ));
        }
    }

    out.push_str("\nSummary:\n");
    match outcome.plan.mode {
        RunMode::Preview | RunMode::Delete => {
            out.push_str(&format!("Files to delete: {}\n", outcome.plan.pending_files));
            out.push_str(&format!(
                "Space to save: {:.2} MB\n",
                mb(outcome.plan.pending_bytes)
            ));
        }
        RunMode::Move => {
            out.push_str(&format!(
                "Files to move to Duplicates folder: {}\n",
                outcome.plan.pending_files
            ));
            out.push_str(&format!(
                "Space to organize: {:.2} MB\n",
                mb(outcome.plan.pending_bytes)
            ));
        }
    }

    match outcome.plan.mode {
        RunMode::Preview => {
            out.push_str("\n*** DRY RUN MODE - No files were actually processed ***\n");
            out.push_str("Run with --execute to actually remove the duplicates\n");
            out.push_str("Or use --move-duplicates to move them to 'Duplicates' folder instead\n");
        }
        RunMode::Delete => out.push_str("\nDeleting duplicates...\n"),
        RunMode::Move => out.push_str("\nMoving duplicates to 'Duplicates' folder...\n"),
    }

    out
}

fn mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fingerprint::Fingerprint;
    use crate::core::grouper::DuplicateGroup;
    use crate::core::loader::ImageDescriptor;
    use crate::core::planner::{ActionPlanner, DUPLICATES_DIR_NAME};
    use std::path::PathBuf;
    use uuid::Uuid;

    fn desc(name: &str, width: u32, height: u32, byte_size: u64) -> ImageDescriptor {
        ImageDescriptor {
            path: PathBuf::from(format!("/photos/{name}")),
            width,
            height,
            byte_size,
            fingerprint: Fingerprint::from_bits(0),
        }
    }

    fn outcome_with_one_group(mode: RunMode) -> RunOutcome {
        let groups = vec![DuplicateGroup {
            id: Uuid::new_v4(),
            members: vec![
                desc("big.jpg", 4032, 3024, 2_202_009), // 2.10 MB
                desc("small.jpg", 2048, 1536, 891_289), // 0.85 MB
            ],
            keep_index: 0,
        }];
        let planner = ActionPlanner::new(
            mode,
            PathBuf::from("/photos").join(DUPLICATES_DIR_NAME),
        );
        let plan = planner.plan(&groups);
        RunOutcome {
            folder: PathBuf::from("/photos"),
            total_files: 2,
            scan_errors: Vec::new(),
            decode_failures: Vec::new(),
            groups,
            plan,
        }
    }

    #[test]
    fn header_without_heif_mentions_skipping() {
        let header = render_header(false);
        assert_eq!(
            header,
            "Image Duplicate Sweeper\n\
             ========================================\n\
             HEIC/HEIF support not available; .heic/.heif files will be skipped\n"
        );
    }

    #[test]
    fn mode_lines_are_stable() {
        assert_eq!(render_mode(RunMode::Preview), "Mode: Dry run (preview only)\n\n");
        assert_eq!(render_mode(RunMode::Delete), "Mode: Delete duplicates\n\n");
        assert_eq!(
            render_mode(RunMode::Move),
            "Mode: Move duplicates to 'Duplicates' folder\n\n"
        );
    }

    #[test]
    fn preview_report_matches_golden_output() {
        let outcome = outcome_with_one_group(RunMode::Preview);
        let report = render_run(&outcome);

        assert_eq!(
            report,
            "Scanning folder: /photos\n\
             Found 2 image files\n\
             \n\
             Found 1 groups of duplicates:\n\
             \n\
             Group 1 (2 duplicates):\n\
             \x20 [KEEP] big.jpg - 4032x3024 - 2.10MB\n\
             \x20 [DELETE] small.jpg - 2048x1536 - 0.85MB\n\
             \n\
             Summary:\n\
             Files to delete: 1\n\
             Space to save: 0.85 MB\n\
             \n\
             *** DRY RUN MODE - No files were actually processed ***\n\
             Run with --execute to actually remove the duplicates\n\
             Or use --move-duplicates to move them to 'Duplicates' folder instead\n"
        );
    }

    #[test]
    fn move_report_uses_move_wording() {
        let outcome = outcome_with_one_group(RunMode::Move);
        let report = render_run(&outcome);

        assert!(report.contains("[MOVE] small.jpg - 2048x1536 - 0.85MB"));
        assert!(report.contains("Files to move to Duplicates folder: 1"));
        assert!(report.contains("Space to organize: 0.85 MB"));
        assert!(report.contains("Moving duplicates to 'Duplicates' folder..."));
    }

    #[test]
    fn no_duplicates_short_circuits() {
        let outcome = RunOutcome {
            folder: PathBuf::from("/photos"),
            total_files: 3,
            scan_errors: Vec::new(),
            decode_failures: Vec::new(),
            groups: Vec::new(),
            plan: ActionPlanner::new(RunMode::Preview, PathBuf::from("/x")).plan(&[]),
        };

        let report = render_run(&outcome);

        assert_eq!(
            report,
            "Scanning folder: /photos\n\
             Found 3 image files\n\
             \n\
             No duplicates found!\n"
        );
    }

    #[test]
    fn decode_failures_are_listed_per_file() {
        use crate::core::loader::DecodeFailure;
        use crate::error::DecodeError;

        let mut outcome = outcome_with_one_group(RunMode::Preview);
        outcome.decode_failures.push(DecodeFailure {
            path: PathBuf::from("/photos/broken.jpg"),
            error: DecodeError::Decode {
                path: PathBuf::from("/photos/broken.jpg"),
                reason: "invalid JPEG".to_string(),
            },
        });

        let report = render_run(&outcome);

        assert!(report.contains("Failed to decode image /photos/broken.jpg: invalid JPEG"));
    }
}
