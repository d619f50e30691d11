//! Bounded fan-out of independent work across a fixed set of workers
//!
//! Work items are dealt round-robin into one bucket per worker. Each bucket
//! runs sequentially on a single thread of a dedicated rayon pool, and the
//! caller blocks until every bucket has finished. Nothing is shared between
//! buckets except what the work closure borrows immutably.

use crate::io::error::{PuzzleError, Result, invalid_parameter, require_positive};
use crate::io::progress::ProgressManager;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{debug, warn};

/// One input image and where its puzzle should be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Target image to tile
    pub input: PathBuf,
    /// Destination of the finished canvas
    pub output: PathBuf,
}

impl Job {
    /// Pair an input with its output path
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Inputs that produced an output
    pub succeeded: Vec<PathBuf>,
    /// Inputs that failed, with the reason
    pub failed: Vec<(PathBuf, PuzzleError)>,
}

impl BatchReport {
    /// Number of jobs attempted
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// True when no job failed
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    fn absorb(&mut self, other: Self) {
        self.succeeded.extend(other.succeeded);
        self.failed.extend(other.failed);
    }
}

/// Deal items into `workers` buckets: item `n` goes to bucket `n % workers`
///
/// Always returns exactly `workers` buckets (some may be empty); a worker
/// count of zero yields no buckets.
pub fn partition_round_robin<T>(items: impl IntoIterator<Item = T>, workers: usize) -> Vec<Vec<T>> {
    let mut buckets: Vec<Vec<T>> = (0..workers).map(|_| Vec::new()).collect();
    if workers == 0 {
        return buckets;
    }
    for (n, item) in items.into_iter().enumerate() {
        if let Some(bucket) = buckets.get_mut(n % workers) {
            bucket.push(item);
        }
    }
    buckets
}

/// Build a thread pool with exactly `workers` threads
///
/// # Errors
///
/// Returns `InvalidParameter` if `workers` is zero or the pool cannot start
pub fn worker_pool(workers: usize) -> Result<rayon::ThreadPool> {
    let workers = require_positive("workers", workers)?;
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("puzzletile-worker-{index}"))
        .build()
        .map_err(|e| invalid_parameter("workers", &workers, &e))
}

/// Run `work` once per round-robin bucket and collect the results
///
/// Results come back in bucket order regardless of completion order.
///
/// # Errors
///
/// Returns an error if the worker pool cannot be built
pub fn run_buckets<T, R, F>(items: Vec<T>, workers: usize, work: F) -> Result<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(Vec<T>) -> R + Sync,
{
    let pool = worker_pool(workers)?;
    let buckets = partition_round_robin(items, workers);
    Ok(pool.install(|| buckets.into_par_iter().map(&work).collect()))
}

/// Process every job, isolating failures to the job that caused them
///
/// A failing job is logged and recorded in the report; the remaining jobs in
/// its bucket and every other bucket still run.
///
/// # Errors
///
/// Returns an error only if the worker pool cannot be built
pub fn run_jobs<F>(
    jobs: Vec<Job>,
    workers: usize,
    progress: Option<&ProgressManager>,
    process: F,
) -> Result<BatchReport>
where
    F: Fn(&Job) -> Result<()> + Sync,
{
    let partials = run_buckets(jobs, workers, |bucket| {
        let mut report = BatchReport::default();
        for job in bucket {
            debug!(
                input = %job.input.display(),
                output = %job.output.display(),
                "processing"
            );
            match process(&job) {
                Ok(()) => report.succeeded.push(job.input),
                Err(error) => {
                    warn!(input = %job.input.display(), %error, "job failed");
                    report.failed.push((job.input, error));
                }
            }
            if let Some(progress) = progress {
                progress.complete_job();
            }
        }
        report
    })?;

    let mut report = BatchReport::default();
    for partial in partials {
        report.absorb(partial);
    }
    Ok(report)
}
