//! Batch generation: fetch details, generate modules, persist them.
//!
//! Failures are contained at the smallest granularity possible. A failed
//! fetch degrades that one interface, an unparseable schema drops one
//! declaration, and a failed write drops one module. Only directory creation
//! aborts the batch.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use futures_util::future::BoxFuture;
use futures_util::stream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{BatchError, FetchError};
use crate::generator::{GeneratedModule, generate_module};
use crate::interface::{InterfaceDetail, InterfaceSummary};
use crate::store::ModuleStore;
use crate::typegen::Emit;

/// Default number of in-flight detail fetches.
pub const DEFAULT_CONCURRENCY: usize = 8;

const CANCELLED_REASON: &str = "cancelled";

/// Source of full interface definitions.
pub trait DetailSource: Send + Sync {
    /// Fetch the full definition of interface `id`.
    fn fetch_detail(&self, id: u64) -> BoxFuture<'_, Result<InterfaceDetail, FetchError>>;
}

/// What to do when two modules in one run map to the same file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionStrategy {
    /// The later module replaces the earlier file.
    #[default]
    Overwrite,
    /// The later module is written to `<name>_<id>.ts`.
    QualifyById,
    /// The later module is not written and is reported as a failure.
    Reject,
}

/// Tuning for one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Maximum in-flight detail fetches. `0` means no limit.
    pub concurrency: usize,
    /// Policy for modules that map to an already written file name
    pub collision: CollisionStrategy,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            collision: CollisionStrategy::default(),
        }
    }
}

/// An interface that did not make it through cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Interface the entry is about
    pub interface_id: u64,
    /// Human-readable cause
    pub reason: String,
}

impl BatchFailure {
    fn new(interface_id: u64, reason: impl Into<String>) -> Self {
        Self {
            interface_id,
            reason: reason.into(),
        }
    }

    /// Whether this failure came from cancellation rather than an error.
    pub fn is_cancelled(&self) -> bool {
        self.reason == CANCELLED_REASON
    }
}

/// Aggregated outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// Number of modules written
    pub succeeded_count: usize,
    /// Modules that were not written
    pub failures: Vec<BatchFailure>,
    /// Fetches that fell back to a degraded detail; their modules still count
    /// as written when persisted
    pub degraded: Vec<BatchFailure>,
    /// Written modules, in write order
    pub outputs: Vec<GeneratedModule>,
    /// Written file paths, parallel to `outputs`
    pub files: Vec<PathBuf>,
}

impl BatchResult {
    /// A batch succeeds when at least one module was written.
    pub fn is_success(&self) -> bool {
        self.succeeded_count > 0
    }
}

/// Drives one generation run over a caller selection.
pub struct BatchCoordinator<'a> {
    source: &'a dyn DetailSource,
    store: &'a dyn ModuleStore,
    options: BatchOptions,
    cancel: Option<CancellationToken>,
}

impl std::fmt::Debug for BatchCoordinator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCoordinator")
            .field("options", &self.options)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a> BatchCoordinator<'a> {
    /// Coordinator with default options and no cancellation.
    pub fn new(source: &'a dyn DetailSource, store: &'a dyn ModuleStore) -> Self {
        Self {
            source,
            store,
            options: BatchOptions::default(),
            cancel: None,
        }
    }

    /// Replace the default options.
    #[must_use]
    pub fn with_options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Stop the run early once `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Generate and persist one module per selected interface.
    pub async fn run(
        &self,
        selection: &[InterfaceSummary],
        destination: &Path,
    ) -> Result<BatchResult, BatchError> {
        if selection.is_empty() {
            return Err(BatchError::EmptySelection);
        }
        if destination.as_os_str().is_empty() {
            return Err(BatchError::UnresolvedDestination);
        }
        if self.is_cancelled() {
            return Err(BatchError::Cancelled);
        }

        self.store
            .ensure_dir(destination)
            .await
            .map_err(BatchError::CreateDirectory)?;

        info!(
            count = selection.len(),
            destination = %destination.display(),
            "Generating interface modules."
        );

        let limit = match self.options.concurrency {
            0 => selection.len(),
            n => n,
        };
        let fetched: Vec<(InterfaceDetail, Option<String>)> = stream::iter(selection)
            .map(|summary| self.fetch_or_degrade(summary))
            .buffered(limit)
            .collect()
            .await;

        let mut result = BatchResult::default();
        let mut written: HashMap<String, u64> = HashMap::new();

        for (index, (detail, degraded_reason)) in fetched.into_iter().enumerate() {
            if self.is_cancelled() {
                if result.succeeded_count == 0 {
                    return Err(BatchError::Cancelled);
                }
                warn!(remaining = selection.len() - index, "Generation cancelled.");
                result.failures.extend(
                    selection[index..]
                        .iter()
                        .map(|summary| BatchFailure::new(summary.id, CANCELLED_REASON)),
                );
                break;
            }

            if let Some(reason) = degraded_reason {
                result.degraded.push(BatchFailure::new(detail.id, reason));
            }

            let module = generate_module(&detail);
            let Some(file_name) = self.pick_file_name(&module, &written, &mut result) else {
                continue;
            };

            let path = destination.join(&file_name);
            match self.store.write_text(&path, module.emit()).await {
                Ok(()) => {
                    written.insert(file_name, module.source_interface_id);
                    result.succeeded_count += 1;
                    result.outputs.push(module);
                    result.files.push(path);
                }
                Err(err) => {
                    warn!(interface_id = detail.id, error = %err, "Failed to write module.");
                    result.failures.push(BatchFailure::new(detail.id, err.to_string()));
                }
            }
        }

        info!(
            succeeded = result.succeeded_count,
            failed = result.failures.len(),
            degraded = result.degraded.len(),
            "Generation finished."
        );
        Ok(result)
    }

    async fn fetch_or_degrade(&self, summary: &InterfaceSummary) -> (InterfaceDetail, Option<String>) {
        if self.is_cancelled() {
            return (
                InterfaceDetail::degraded(summary),
                Some(CANCELLED_REASON.to_string()),
            );
        }

        match self.source.fetch_detail(summary.id).await {
            Ok(detail) => {
                debug!(interface_id = summary.id, "Fetched interface detail.");
                (detail, None)
            }
            Err(err) => {
                warn!(
                    interface_id = summary.id,
                    error = %err,
                    "Detail fetch failed, generating from summary."
                );
                (InterfaceDetail::degraded(summary), Some(err.to_string()))
            }
        }
    }

    /// File name for `module` under the collision strategy, or `None` when the
    /// module must be skipped (recorded in `result.failures`).
    fn pick_file_name(
        &self,
        module: &GeneratedModule,
        written: &HashMap<String, u64>,
        result: &mut BatchResult,
    ) -> Option<String> {
        let file_name = module.file_name();
        let Some(&earlier) = written.get(&file_name) else {
            return Some(file_name);
        };
        let interface_id = module.source_interface_id;

        match self.options.collision {
            CollisionStrategy::Overwrite => {
                warn!(
                    interface_id,
                    earlier, file = %file_name,
                    "Module file name already used in this run, overwriting."
                );
                Some(file_name)
            }
            CollisionStrategy::QualifyById => {
                let qualified = qualified_file_name(&module.interface_name, interface_id, written);
                debug!(interface_id, file = %qualified, "Qualified colliding module file name.");
                Some(qualified)
            }
            CollisionStrategy::Reject => {
                warn!(interface_id, earlier, file = %file_name, "Rejected colliding module.");
                result.failures.push(BatchFailure::new(
                    interface_id,
                    format!("{file_name} was already written for interface {earlier}"),
                ));
                None
            }
        }
    }
}

/// `<name>_<id>.ts`, with a counter appended while that name is also taken.
fn qualified_file_name(name: &str, interface_id: u64, written: &HashMap<String, u64>) -> String {
    let base = format!("{name}_{interface_id}");
    let mut candidate = format!("{base}.ts");
    let mut counter = 2;
    while written.contains_key(&candidate) {
        candidate = format!("{base}_{counter}.ts");
        counter += 1;
    }
    candidate
}
