//! # CLI Module
//!
//! Command-line interface for the duplicate image sweeper.
//!
//! ## Usage
//! ```bash
//! # Preview duplicates (nothing is touched)
//! dupsweep ~/Photos
//!
//! # Stricter matching
//! dupsweep ~/Photos --similarity 2
//!
//! # Delete the lower-quality copies
//! dupsweep ~/Photos --execute
//!
//! # Move them into ~/Photos/Duplicates instead
//! dupsweep ~/Photos --move-duplicates
//! ```

use clap::Parser;
use dupsweep::core::executor::{ActionOutcome, ExecutionResult, PlanExecutor};
use dupsweep::core::loader::LoaderConfig;
use dupsweep::core::pipeline::Pipeline;
use dupsweep::core::planner::RunMode;
use dupsweep::core::report;
use dupsweep::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Find visually duplicate images in a folder and keep the best copy
#[derive(Parser, Debug)]
#[command(name = "dupsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder containing the images to scan
    pub folder: PathBuf,

    /// Actually delete duplicate files (default is dry-run)
    #[arg(long, conflicts_with = "move_duplicates")]
    pub execute: bool,

    /// Move duplicates to a "Duplicates" folder instead of deleting them
    #[arg(long)]
    pub move_duplicates: bool,

    /// Similarity threshold (0-10, lower = more strict)
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub similarity: u8,

    /// Include hidden files in the scan
    #[arg(long)]
    pub include_hidden: bool,
}

impl Cli {
    fn mode(&self) -> RunMode {
        if self.move_duplicates {
            RunMode::Move
        } else if self.execute {
            RunMode::Delete
        } else {
            RunMode::Preview
        }
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    dupsweep::init_tracing();

    let mode = cli.mode();
    let loader = LoaderConfig::default();

    print!("{}", report::render_header(loader.heif));
    print!("{}", report::render_mode(mode));

    let pipeline = Pipeline::builder()
        .folder(cli.folder.clone())
        .similarity(cli.similarity)
        .mode(mode)
        .include_hidden(cli.include_hidden)
        .loader(loader)
        .build();

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );
    progress.set_message("fingerprinting");

    let outcome = pipeline.run_with_progress(|done, total| {
        progress.set_length(total as u64);
        progress.set_position(done as u64);
    })?;
    progress.finish_and_clear();

    print!("{}", report::render_run(&outcome));

    for failure in &outcome.plan.failures {
        println!("Error planning action: {}", failure);
    }

    if mode != RunMode::Preview && outcome.plan.pending_files > 0 {
        let result = PlanExecutor::execute(&outcome.plan);
        print_execution(&result, &cli.folder);
    }

    Ok(())
}

fn print_execution(result: &ExecutionResult, folder: &Path) {
    if let Some(created) = &result.created_folder {
        println!("Created folder: {}", created.display());
    }

    for outcome in &result.outcomes {
        match outcome {
            ActionOutcome::Moved { from, to } => {
                println!("Moved: {} -> {}", base_name(from), relative_dest(to, folder));
            }
            ActionOutcome::Deleted { path } => {
                println!("Deleted: {}", base_name(path));
            }
            ActionOutcome::Failed { path, message } => {
                println!("Error processing {}: {}", path.display(), message);
            }
        }
    }

    println!(
        "Completed: {} files processed, {} failed",
        result.completed, result.failed
    );
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn relative_dest(dest: &Path, folder: &Path) -> String {
    dest.strip_prefix(folder)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| dest.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_preview_with_similarity_5() {
        let cli = Cli::try_parse_from(["dupsweep", "/photos"]).unwrap();
        assert_eq!(cli.similarity, 5);
        assert_eq!(cli.mode(), RunMode::Preview);
    }

    #[test]
    fn execute_selects_delete_mode() {
        let cli = Cli::try_parse_from(["dupsweep", "/photos", "--execute"]).unwrap();
        assert_eq!(cli.mode(), RunMode::Delete);
    }

    #[test]
    fn move_duplicates_selects_move_mode() {
        let cli = Cli::try_parse_from(["dupsweep", "/photos", "--move-duplicates"]).unwrap();
        assert_eq!(cli.mode(), RunMode::Move);
    }

    #[test]
    fn execute_and_move_are_mutually_exclusive() {
        let result =
            Cli::try_parse_from(["dupsweep", "/photos", "--execute", "--move-duplicates"]);
        assert!(result.is_err());
    }

    #[test]
    fn similarity_out_of_range_is_a_usage_error() {
        let result = Cli::try_parse_from(["dupsweep", "/photos", "--similarity", "11"]);
        assert!(result.is_err());
    }

    #[test]
    fn similarity_bounds_are_accepted() {
        for value in ["0", "10"] {
            let cli =
                Cli::try_parse_from(["dupsweep", "/photos", "--similarity", value]).unwrap();
            assert!(cli.similarity <= 10);
        }
    }
}
