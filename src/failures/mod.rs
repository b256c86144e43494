//! Failure discovery and sampling for a job's task attempts
//!
//! The tracker only hands out completion events a page at a time, and a fully
//! successful job may have a very large number of them. The sampler pages
//! through events in increasing offset order, starting each page right after
//! the last event returned, and stops at the first page
//! that contains any `FAILED` attempt, at the end of the stream, or (unless
//! the caller insists on a complete search) once the search budget is spent.
//! The budget is only checked between page fetches.
//!
//! Failures found on the stopping page are shuffled and at most
//! `sample_limit` of them get their diagnostics fetched.

use crate::error::{JobScopeError, Result};
use crate::tracker::{JobHandle, TaskAttemptId, TaskCompletionEvent};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Tunables for failure sampling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Maximum number of failed attempts whose diagnostics are fetched
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    /// Wall-clock budget for paging when the caller does not require a
    /// complete search
    #[serde(default = "default_search_budget", with = "humantime_serde")]
    pub search_budget: Duration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            sample_limit: default_sample_limit(),
            search_budget: default_search_budget(),
        }
    }
}

impl SamplerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sample_limit == 0 {
            return Err(JobScopeError::config_with_code(
                crate::error::ErrorCode::CONFIG_INVALID_VALUE,
                "sampler.sample_limit must be at least 1",
            ));
        }
        Ok(())
    }
}

fn default_sample_limit() -> usize {
    3
}

fn default_search_budget() -> Duration {
    Duration::from_millis(5000)
}

/// One diagnostic message recorded for a failed task attempt.
///
/// An attempt with several messages yields several records sharing its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub attempt_id: TaskAttemptId,
    pub message: String,
}

impl FailureRecord {
    pub fn new(attempt_id: TaskAttemptId, message: impl Into<String>) -> Self {
        Self {
            attempt_id,
            message: message.into(),
        }
    }
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.attempt_id, self.message)
    }
}

/// Why a failure scan stopped paging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStop {
    /// A page contained at least one failed attempt
    FailuresFound,
    /// The tracker returned an empty page
    Exhausted,
    /// The search budget ran out before any failure was seen
    BudgetExpired,
}

/// Result of paging through completion events
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Failed events from the stopping page, in event order
    pub candidates: Vec<TaskCompletionEvent>,
    pub pages_scanned: usize,
    pub stop: ScanStop,
}

/// Discovers failed task attempts and samples their diagnostics
#[derive(Debug, Clone, Default)]
pub struct FailureSampler {
    config: SamplerConfig,
}

impl FailureSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Find a sample of failure diagnostics for a job.
    ///
    /// With `search_until_found` the scan ignores the search budget and runs
    /// until the first failure-bearing page or the end of the event stream.
    /// Any collaborator error is returned as-is; no partial result is kept.
    pub async fn find_failures(
        &self,
        job: &dyn JobHandle,
        search_until_found: bool,
    ) -> Result<Vec<FailureRecord>> {
        let outcome = self.scan_for_failures(job, search_until_found).await?;
        if outcome.candidates.is_empty() {
            return Ok(Vec::new());
        }

        let sampled = {
            let mut rng = rand::rng();
            self.sample_candidates(outcome.candidates, &mut rng)
        };

        self.fetch_diagnostics(job, &sampled).await
    }

    /// Page through completion events until a failure-bearing page, an empty
    /// page, or budget expiry
    pub async fn scan_for_failures(
        &self,
        job: &dyn JobHandle,
        search_until_found: bool,
    ) -> Result<ScanOutcome> {
        let start = Instant::now();
        let mut offset = 0;
        let mut pages_scanned = 0;
        let mut page = job.completion_events(offset).await?;

        let stop = loop {
            if page.is_empty() {
                break ScanStop::Exhausted;
            }
            if !search_until_found && start.elapsed() >= self.config.search_budget {
                warn!(
                    job_id = %job.job_id(),
                    offset,
                    budget_ms = self.config.search_budget.as_millis() as u64,
                    "Search budget exhausted before any task failure was found"
                );
                break ScanStop::BudgetExpired;
            }

            pages_scanned += 1;
            let page_len = page.len();
            let failed: Vec<TaskCompletionEvent> =
                page.into_iter().filter(|event| event.is_failed()).collect();
            debug!(
                job_id = %job.job_id(),
                offset,
                failed = failed.len(),
                "Scanned completion event page"
            );

            if !failed.is_empty() {
                info!(
                    job_id = %job.job_id(),
                    offset,
                    failed = failed.len(),
                    "Found failed task attempts"
                );
                return Ok(ScanOutcome {
                    candidates: failed,
                    pages_scanned,
                    stop: ScanStop::FailuresFound,
                });
            }

            offset += page_len;
            page = job.completion_events(offset).await?;
        };

        Ok(ScanOutcome {
            candidates: Vec::new(),
            pages_scanned,
            stop,
        })
    }

    /// Choose up to `sample_limit` candidates uniformly without replacement
    pub fn sample_candidates<R: Rng + ?Sized>(
        &self,
        mut candidates: Vec<TaskCompletionEvent>,
        rng: &mut R,
    ) -> Vec<TaskAttemptId> {
        candidates.shuffle(rng);
        candidates
            .into_iter()
            .take(self.config.sample_limit)
            .map(|event| event.attempt_id)
            .collect()
    }

    /// Fetch diagnostics for each sampled attempt, preserving sample order
    pub async fn fetch_diagnostics(
        &self,
        job: &dyn JobHandle,
        sampled: &[TaskAttemptId],
    ) -> Result<Vec<FailureRecord>> {
        let mut records = Vec::new();
        for attempt_id in sampled {
            let messages = job.task_diagnostics(attempt_id).await?;
            debug!(
                attempt_id = %attempt_id,
                messages = messages.len(),
                "Fetched task diagnostics"
            );
            records.extend(
                messages
                    .into_iter()
                    .map(|message| FailureRecord::new(attempt_id.clone(), message)),
            );
        }
        Ok(records)
    }
}
