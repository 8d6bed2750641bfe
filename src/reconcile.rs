use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::api::types::{BatchResponse, Side};
use crate::error::FetchError;

/// Where missing file contents come from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_content(&self, path: &str) -> Result<String, FetchError>;
}

/// Outcome counts for one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub fetched: usize,
    pub failed: usize,
}

/// One missing side of one result.
struct FetchJob {
    result_pos: usize,
    side: Side,
    path: String,
}

/// Fills in missing file contents for non-identical results.
pub struct Reconciler<'a, S: ContentSource + ?Sized> {
    source: &'a S,
    max_concurrent: usize,
}

impl<'a, S: ContentSource + ?Sized> Reconciler<'a, S> {
    pub fn new(source: &'a S, max_concurrent: usize) -> Self {
        Self {
            source,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Fetch every missing side concurrently and apply whatever arrives.
    ///
    /// A failed fetch leaves its field empty and is only logged. Only the
    /// content fields are ever written.
    pub async fn reconcile(&self, batch: &mut BatchResponse) -> ReconcileReport {
        let jobs: Vec<FetchJob> = batch
            .results
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.identical && !r.has_both_contents())
            .flat_map(|(pos, r)| {
                r.missing_sides()
                    .into_iter()
                    .map(move |(side, path)| FetchJob {
                        result_pos: pos,
                        side,
                        path: path.to_string(),
                    })
            })
            .collect();

        if jobs.is_empty() {
            return ReconcileReport::default();
        }
        debug!(jobs = jobs.len(), "fetching missing contents");

        let source = self.source;
        let outcomes: Vec<(FetchJob, Result<String, FetchError>)> = stream::iter(jobs)
            .map(move |job| async move {
                let outcome = source.fetch_content(&job.path).await;
                (job, outcome)
            })
            .buffer_unordered(self.max_concurrent)
            .collect()
            .await;

        let mut report = ReconcileReport::default();
        for (job, outcome) in outcomes {
            match outcome {
                Ok(content) => {
                    if let Some(result) = batch.results.get_mut(job.result_pos) {
                        *result.content_mut(job.side) = Some(content);
                        report.fetched += 1;
                    }
                }
                Err(e) => {
                    warn!(
                        path = %job.path,
                        side = job.side.label(),
                        "could not fetch content: {e}"
                    );
                    report.failed += 1;
                }
            }
        }
        report
    }
}
