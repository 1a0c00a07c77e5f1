//! Page-parallel batch execution
//!
//! Pages are independent: each task reads one page and writes only into
//! that page's own directory, so tasks share nothing and take no locks. A
//! failing page is recorded in the [`BatchReport`] and never stops its
//! siblings, and neither does a task that panics. Cancellation stops new tasks from starting; a task already
//! running finishes.

use crate::{PipelineError, PipelineResult};
use log::{info, warn};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag telling a batch to stop launching tasks
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// True once cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of one successful task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The item was processed
    Done,
    /// The item needed no work
    Skipped,
}

/// Page-scoped outcomes of a batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Items processed successfully
    pub processed: usize,
    /// Items that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
    /// Items skipped, including those not started after cancellation
    pub skipped: usize,
}

impl BatchReport {
    /// True if no item failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of items seen
    pub fn total(&self) -> usize {
        self.processed + self.failed.len() + self.skipped
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Bounded worker pool running one task per page
pub struct BatchRunner {
    pool: rayon::ThreadPool,
    cancel: CancelToken,
}

impl BatchRunner {
    /// Build a pool of `jobs` workers, or rayon's default when `None`
    pub fn new(jobs: Option<usize>) -> PipelineResult<Self> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(jobs) = jobs {
            builder = builder.num_threads(jobs);
        }
        let pool = builder
            .build()
            .map_err(|e| PipelineError::ThreadPool(e.to_string()))?;
        Ok(Self {
            pool,
            cancel: CancelToken::new(),
        })
    }

    /// Use `token` for cancellation
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// The runner's cancellation token
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Number of worker threads
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `task` on every item
    pub fn run<F>(&self, stage: &str, items: &[PathBuf], task: F) -> BatchReport
    where
        F: Fn(&Path) -> PipelineResult<TaskOutcome> + Sync,
    {
        let results: Vec<Option<PipelineResult<TaskOutcome>>> = self.pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    if self.cancel.is_cancelled() {
                        return None;
                    }
                    let result = panic::catch_unwind(AssertUnwindSafe(|| task(item)));
                    Some(result.unwrap_or_else(|payload| {
                        Err(PipelineError::Panicked(panic_message(payload.as_ref())))
                    }))
                })
                .collect()
        });

        let mut report = BatchReport::default();
        for (item, result) in items.iter().zip(results) {
            match result {
                Some(Ok(TaskOutcome::Done)) => report.processed += 1,
                Some(Ok(TaskOutcome::Skipped)) | None => report.skipped += 1,
                Some(Err(e)) => {
                    warn!("{}: {} failed: {}", stage, item.display(), e);
                    report.failed.push((item.clone(), e.to_string()));
                }
            }
        }

        info!(
            "{}: {} processed, {} failed, {} skipped",
            stage,
            report.processed,
            report.failed.len(),
            report.skipped
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn items(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("{}.png", i))).collect()
    }

    #[test]
    fn test_failures_are_page_scoped() {
        let runner = BatchRunner::new(Some(2)).unwrap();
        let report = runner.run("test", &items(6), |p| {
            match p.to_str() {
                Some("3.png") => Err(PipelineError::InvalidPath(p.to_path_buf())),
                Some("4.png") => Ok(TaskOutcome::Skipped),
                _ => Ok(TaskOutcome::Done),
            }
        });
        assert_eq!(report.processed, 4);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, PathBuf::from("3.png"));
        assert_eq!(report.total(), 6);
        assert!(!report.is_success());
    }

    #[test]
    fn test_panicking_task_is_page_scoped() {
        let runner = BatchRunner::new(Some(2)).unwrap();
        let report = runner.run("test", &items(4), |p| {
            if p == Path::new("2.png") {
                panic!("corrupt page");
            }
            Ok(TaskOutcome::Done)
        });
        assert_eq!(report.processed, 3);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, PathBuf::from("2.png"));
        assert!(report.failed[0].1.contains("corrupt page"));
    }

    #[test]
    fn test_cancelled_runner_starts_nothing() {
        let token = CancelToken::new();
        let runner = BatchRunner::new(Some(1)).unwrap().with_cancel(token.clone());
        token.cancel();
        let calls = AtomicUsize::new(0);
        let report = runner.run("test", &items(5), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(TaskOutcome::Done)
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(report.skipped, 5);
        assert!(report.is_success());
    }

    #[test]
    fn test_cancel_during_batch() {
        let runner = BatchRunner::new(Some(1)).unwrap();
        let token = runner.cancel_token().clone();
        let report = runner.run("test", &items(50), |_| {
            token.cancel();
            Ok(TaskOutcome::Done)
        });
        assert!(report.processed >= 1);
        assert!(report.processed < 50);
        assert_eq!(report.total(), 50);
    }
}
