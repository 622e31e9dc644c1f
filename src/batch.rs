//! Directory batch processing.
//!
//! Every supported file in an input directory becomes one outline JSON
//! artifact in the output directory. Documents are processed independently;
//! a failing document is recorded in the [`BatchReport`] and never stops the
//! rest of the batch.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossbeam_channel::RecvTimeoutError;
use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::OutlineConfig;
use crate::builder::OutlineBuilder;
use crate::error::{Error, Result};
use crate::model::Document;
use crate::provider::{document_id, ProviderRegistry};
use crate::render::{to_json, JsonFormat};

/// Process exit code when every document succeeded.
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit code when the batch could not run at all.
pub const EXIT_FATAL: i32 = 1;

/// Process exit code when at least one document failed.
pub const EXIT_PARTIAL: i32 = 2;

/// Options for batch processing.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Process documents in parallel
    pub parallel: bool,

    /// Upper bound on loading a single document
    pub document_timeout: Option<Duration>,

    /// Output JSON format
    pub json_format: JsonFormat,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            document_timeout: Some(Duration::from_secs(60)),
            json_format: JsonFormat::Pretty,
        }
    }
}

impl BatchOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the per-document timeout; `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.document_timeout = timeout;
        self
    }

    /// Set the output JSON format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

/// A document whose outline was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSuccess {
    /// Document identifier (file name)
    pub document: String,
    /// Written artifact
    pub output: PathBuf,
    /// Extracted title
    pub title: String,
    /// Number of outline entries
    pub headings: usize,
}

/// A document that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    /// Document identifier (file name)
    pub document: String,
    /// Error kind, see [`Error::kind`]
    pub kind: String,
    /// Human-readable cause
    pub message: String,
}

/// Outcome of one document.
pub type DocumentOutcome = std::result::Result<BatchSuccess, BatchFailure>;

/// Summary of a batch run. Both lists are in document-id order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// When the batch finished
    pub processed_at: DateTime<Utc>,
    /// Number of documents found
    pub total: usize,
    /// Processed documents
    pub succeeded: Vec<BatchSuccess>,
    /// Failed documents
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    /// Check whether every document succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Process exit code for this report.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            EXIT_SUCCESS
        } else {
            EXIT_PARTIAL
        }
    }
}

/// One scheduled document.
struct Job {
    input: PathBuf,
    output: PathBuf,
}

/// Documents scheduled for a batch, each with its own output path.
pub struct BatchPlan {
    input_dir: PathBuf,
    output_dir: PathBuf,
    jobs: Vec<Job>,
}

impl BatchPlan {
    /// Number of scheduled documents.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Check whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Input and output path of each document, in processing order.
    pub fn outputs(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.jobs
            .iter()
            .map(|job| (job.input.as_path(), job.output.as_path()))
    }
}

/// Pick an unused artifact name and mark it taken.
fn output_name(taken: &mut HashSet<String>, stem: String, file_name: &str) -> String {
    let name = format!("{}.json", stem);
    if taken.insert(name.clone()) {
        return name;
    }

    let name = format!("{}.json", file_name);
    if taken.insert(name.clone()) {
        return name;
    }

    let mut n = 1;
    loop {
        let name = format!("{}-{}.json", file_name, n);
        if taken.insert(name.clone()) {
            return name;
        }
        n += 1;
    }
}

/// Runs outline extraction over a directory.
///
/// # Example
///
/// ```no_run
/// use unoutline::batch::{BatchOptions, BatchRunner};
/// use unoutline::OutlineConfig;
/// use std::path::Path;
///
/// let runner = BatchRunner::new(OutlineConfig::default(), BatchOptions::default());
/// let report = runner.run(Path::new("input"), Path::new("output"))?;
/// println!("{} ok, {} failed", report.succeeded.len(), report.failed.len());
/// std::process::exit(report.exit_code());
/// # Ok::<(), unoutline::Error>(())
/// ```
pub struct BatchRunner {
    registry: Arc<ProviderRegistry>,
    builder: OutlineBuilder,
    options: BatchOptions,
}

impl BatchRunner {
    /// Create a runner with the default providers.
    pub fn new(config: OutlineConfig, options: BatchOptions) -> Self {
        Self {
            registry: Arc::new(ProviderRegistry::with_defaults()),
            builder: OutlineBuilder::new(config),
            options,
        }
    }

    /// Replace the provider registry.
    pub fn with_registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Get the batch options.
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// List the supported files of a directory, sorted by file name.
    pub fn scan(&self, input_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(input_dir)? {
            let path = entry?.path();
            if path.is_file() && self.registry.supports_path(&path) {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Process every supported file of `input_dir` into `output_dir`.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchReport> {
        self.run_with_progress(input_dir, output_dir, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_document` as each document
    /// finishes (in completion order).
    pub fn run_with_progress<F>(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        on_document: F,
    ) -> Result<BatchReport>
    where
        F: Fn(&DocumentOutcome) + Sync,
    {
        let plan = self.plan(input_dir, output_dir)?;
        self.execute(&plan, on_document)
    }

    /// Validate the options, scan `input_dir` and assign every input a
    /// distinct output path.
    ///
    /// The first file with a given stem writes `<stem>.json`. Later files
    /// with the same stem write `<file name>.json`, and a `-N` suffix is
    /// added while that name is still taken.
    pub fn plan(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchPlan> {
        self.builder.config().validate()?;
        if self.options.document_timeout == Some(Duration::ZERO) {
            return Err(Error::InvalidConfig("document timeout must be positive".into()));
        }

        let mut taken = HashSet::new();
        let jobs = self
            .scan(input_dir)?
            .into_iter()
            .map(|input| {
                let file_name = document_id(&input);
                let stem = input
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| file_name.clone());
                let name = output_name(&mut taken, stem, &file_name);
                let output = output_dir.join(name);
                Job { input, output }
            })
            .collect();

        Ok(BatchPlan {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            jobs,
        })
    }

    /// Process a plan made by [`plan`](Self::plan).
    pub fn execute<F>(&self, plan: &BatchPlan, on_document: F) -> Result<BatchReport>
    where
        F: Fn(&DocumentOutcome) + Sync,
    {
        fs::create_dir_all(&plan.output_dir).map_err(|source| Error::Write {
            path: plan.output_dir.clone(),
            source,
        })?;
        log::info!(
            "processing {} documents from {}",
            plan.len(),
            plan.input_dir.display()
        );

        let run_job = |job: &Job| {
            let outcome = self.process(job);
            on_document(&outcome);
            outcome
        };

        // Indexed collection keeps the sorted job order
        let outcomes: Vec<DocumentOutcome> = if self.options.parallel {
            plan.jobs.par_iter().map(run_job).collect()
        } else {
            plan.jobs.iter().map(run_job).collect()
        };

        let total = outcomes.len();
        let mut succeeded = Vec::new();
        let mut failed = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(success) => succeeded.push(success),
                Err(failure) => failed.push(failure),
            }
        }

        log::info!(
            "batch finished: {} succeeded, {} failed",
            succeeded.len(),
            failed.len()
        );

        Ok(BatchReport {
            processed_at: Utc::now(),
            total,
            succeeded,
            failed,
        })
    }

    fn process(&self, job: &Job) -> DocumentOutcome {
        let id = document_id(&job.input);
        self.write_outline(&id, job).map_err(|e| {
            log::warn!("{}: {}", id, e);
            BatchFailure {
                document: id.clone(),
                kind: e.kind().to_string(),
                message: e.to_string(),
            }
        })
    }

    fn write_outline(&self, id: &str, job: &Job) -> Result<BatchSuccess> {
        let doc = self.load(id, &job.input)?;
        let outline = self.builder.build(&doc);
        let json = to_json(&outline, self.options.json_format)?;

        fs::write(&job.output, json).map_err(|source| Error::Write {
            path: job.output.clone(),
            source,
        })?;

        Ok(BatchSuccess {
            document: id.to_string(),
            output: job.output.clone(),
            title: outline.title,
            headings: outline.entries.len(),
        })
    }

    /// Load a document, giving up after the configured timeout. A timed-out
    /// loader thread is left to finish on its own.
    fn load(&self, id: &str, path: &Path) -> Result<Document> {
        let Some(timeout) = self.options.document_timeout else {
            return self.registry.load(path);
        };

        let (tx, rx) = crossbeam_channel::bounded(1);
        let registry = Arc::clone(&self.registry);
        let owned = path.to_path_buf();
        std::thread::Builder::new()
            .name(format!("load-{}", id))
            .spawn(move || {
                // receiver is gone after a timeout
                let _ = tx.send(registry.load(&owned));
            })?;

        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(Error::Timeout {
                document: id.to_string(),
                seconds: timeout.as_secs_f64().ceil() as u64,
            }),
            Err(RecvTimeoutError::Disconnected) => {
                Err(Error::extraction(id, "provider panicked while loading"))
            }
        }
    }
}
