//! # Pipeline Module
//!
//! Orchestrates one run: scan -> load -> group -> select -> plan.
//!
//! Execution of the resulting plan is a separate step (see
//! [`crate::core::executor`]) so callers can show the plan before any
//! file is touched.

use crate::core::grouper::{DuplicateGroup, SimilarityGrouper};
use crate::core::loader::{DecodeFailure, DescriptorLoader, LoaderConfig};
use crate::core::planner::{ActionPlan, ActionPlanner, RunMode, DUPLICATES_DIR_NAME};
use crate::core::scanner::{FolderScanner, ScanConfig};
use crate::core::selector;
use crate::error::{Result, ScanError};
use std::path::PathBuf;

/// Configuration for one run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Folder to scan
    pub folder: PathBuf,
    /// Similarity threshold, 0-10 (lower = more strict)
    pub similarity: u8,
    /// What to do with duplicates
    pub mode: RunMode,
    /// Scanner configuration
    pub scan: ScanConfig,
    /// Loader codec capabilities
    pub loader: LoaderConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::new(),
            similarity: 5,
            mode: RunMode::Preview,
            scan: ScanConfig::default(),
            loader: LoaderConfig::default(),
        }
    }
}

/// Builder for pipeline configuration
#[derive(Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the folder to scan
    pub fn folder(mut self, folder: PathBuf) -> Self {
        self.config.folder = folder;
        self
    }

    /// Set the similarity threshold (0-10)
    pub fn similarity(mut self, similarity: u8) -> Self {
        self.config.similarity = similarity;
        self
    }

    /// Set the run mode
    pub fn mode(mut self, mode: RunMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Include hidden files in the scan
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.config.scan.include_hidden = include;
        self
    }

    /// Set the loader codec capabilities
    pub fn loader(mut self, loader: LoaderConfig) -> Self {
        self.config.loader = loader;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            config: self.config,
        }
    }
}

/// Everything a run produced, ready for reporting and execution
#[derive(Debug)]
pub struct RunOutcome {
    /// The scanned folder
    pub folder: PathBuf,
    /// Number of candidate image files found
    pub total_files: usize,
    /// Non-fatal scanner errors
    pub scan_errors: Vec<ScanError>,
    /// Files that could not be decoded
    pub decode_failures: Vec<DecodeFailure>,
    /// Duplicate groups with keepers assigned
    pub groups: Vec<DuplicateGroup>,
    /// The action plan for this run's mode
    pub plan: ActionPlan,
}

/// The duplicate detection pipeline
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Run the pipeline without progress reporting
    pub fn run(&self) -> Result<RunOutcome> {
        self.run_with_progress(|_, _| {})
    }

    /// Run the pipeline, reporting `(completed, total)` while
    /// fingerprints are computed.
    pub fn run_with_progress(
        &self,
        progress: impl Fn(usize, usize) + Sync,
    ) -> Result<RunOutcome> {
        let scanner = FolderScanner::new(self.config.scan.clone());
        let scan = scanner.scan(&self.config.folder)?;
        let total_files = scan.files.len();
        tracing::debug!(total_files, "scan complete");

        let loader = DescriptorLoader::new(self.config.loader);
        let load = loader.load_with_progress(&scan.files, |done| progress(done, total_files));
        tracing::debug!(
            descriptors = load.descriptors.len(),
            failures = load.failures.len(),
            "fingerprinting complete"
        );

        let grouper = SimilarityGrouper::from_similarity(self.config.similarity);
        let mut groups = grouper.group(&load.descriptors);
        selector::assign_keepers(&mut groups);
        tracing::debug!(groups = groups.len(), "grouping complete");

        let planner = ActionPlanner::new(
            self.config.mode,
            self.config.folder.join(DUPLICATES_DIR_NAME),
        );
        let plan = planner.plan(&groups);

        Ok(RunOutcome {
            folder: self.config.folder.clone(),
            total_files,
            scan_errors: scan.errors,
            decode_failures: load.failures,
            groups,
            plan,
        })
    }
}
