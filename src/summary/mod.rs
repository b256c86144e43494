//! Job summaries: runtime statistics per phase plus sampled failures
//!
//! Building a summary is fail-fast. Any error from the job tracker aborts the
//! whole request; no partially populated summary is ever returned.

use crate::error::Result;
use crate::failures::{FailureRecord, FailureSampler, SamplerConfig};
use crate::stats::{compute_statistics, RuntimeStatistics};
use crate::tracker::{JobId, JobTrackingClient};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Post-hoc execution summary of one job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub job_id: JobId,
    pub map_stats: RuntimeStatistics,
    pub reduce_stats: RuntimeStatistics,
    /// Sampled failure diagnostics, grouped by sampled attempt
    pub failures: Vec<FailureRecord>,
}

impl JobSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of distinct attempts represented in `failures`
    pub fn sampled_attempts(&self) -> usize {
        let mut attempts: Vec<_> = self.failures.iter().map(|f| &f.attempt_id).collect();
        attempts.sort();
        attempts.dedup();
        attempts.len()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Composes runtime statistics and failure samples into a [`JobSummary`]
#[derive(Debug, Clone, Default)]
pub struct SummaryBuilder {
    sampler: FailureSampler,
}

impl SummaryBuilder {
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            sampler: FailureSampler::new(config),
        }
    }

    pub fn sampler(&self) -> &FailureSampler {
        &self.sampler
    }

    /// Build a summary for `job_id`.
    ///
    /// Map reports, reduce reports and the failure sample are fetched one
    /// after another.
    pub async fn build_summary(
        &self,
        client: &dyn JobTrackingClient,
        job_id: &JobId,
        search_until_found: bool,
    ) -> Result<JobSummary> {
        debug!(job_id = %job_id, search_until_found, "Building job summary");

        let map_stats = compute_statistics(&client.map_task_reports(job_id).await?);
        let reduce_stats = compute_statistics(&client.reduce_task_reports(job_id).await?);

        let job = client.job(job_id).await?;
        let failures = self
            .sampler
            .find_failures(job.as_ref(), search_until_found)
            .await?;

        let summary = JobSummary {
            job_id: job_id.clone(),
            map_stats,
            reduce_stats,
            failures,
        };

        info!(
            job_id = %job_id,
            map = %summary.map_stats,
            reduce = %summary.reduce_stats,
            failures = summary.failures.len(),
            "Job summary ready"
        );

        Ok(summary)
    }
}

/// Build a job summary with the default sampling configuration
pub async fn get_summary(
    client: &dyn JobTrackingClient,
    job_id: &JobId,
    search_until_found: bool,
) -> Result<JobSummary> {
    SummaryBuilder::default()
        .build_summary(client, job_id, search_until_found)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::mock::MockFailure;
    use crate::tracker::{
        CompletionStatus, MockJobHandle, MockJobTrackingClient, TaskAttemptId,
        TaskCompletionEvent, TaskId, TaskReport, TaskStatus, TaskType,
    };
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;

    fn job_id() -> JobId {
        JobId::new("201401011200", 42).unwrap()
    }

    fn report(task_type: TaskType, n: u32, runtime_ms: i64) -> Option<TaskReport> {
        let start = Utc.timestamp_millis_opt(1_400_000_000_000).unwrap();
        Some(TaskReport::new(
            TaskId::new(job_id(), task_type, n),
            TaskStatus::Complete,
            start,
            start + Duration::milliseconds(runtime_ms),
        ))
    }

    fn client_with_handle(handle: MockJobHandle) -> MockJobTrackingClient {
        MockJobTrackingClient::new()
            .with_map_reports(vec![
                report(TaskType::Map, 0, 100),
                None,
                report(TaskType::Map, 1, 300),
            ])
            .with_reduce_reports(vec![report(TaskType::Reduce, 0, 1_000)])
            .with_job(Arc::new(handle))
    }

    #[tokio::test]
    async fn test_build_summary_without_failures() {
        let client = client_with_handle(MockJobHandle::new(job_id()));

        let summary = get_summary(&client, &job_id(), false).await.unwrap();

        assert_eq!(summary.job_id, job_id());
        assert_eq!(summary.map_stats.mean_ms, 200);
        assert_eq!(summary.map_stats.sample_count, 2);
        assert_eq!(summary.reduce_stats.median_ms, 1_000);
        assert!(!summary.has_failures());
        assert_eq!(
            client.get_called_operations().await,
            vec![
                "map_task_reports job_201401011200_0042",
                "reduce_task_reports job_201401011200_0042",
                "job job_201401011200_0042",
            ]
        );
    }

    #[tokio::test]
    async fn test_build_summary_with_failures() {
        let attempt = TaskAttemptId::new(TaskId::new(job_id(), TaskType::Reduce, 3), 1);
        let handle = MockJobHandle::new(job_id())
            .with_events(vec![TaskCompletionEvent::new(
                attempt.clone(),
                CompletionStatus::Failed,
            )])
            .with_diagnostics(attempt.clone(), vec!["OutOfMemoryError".to_string()]);
        let client = client_with_handle(handle);

        let summary = SummaryBuilder::new(SamplerConfig::default())
            .build_summary(&client, &job_id(), true)
            .await
            .unwrap();

        assert_eq!(
            summary.failures,
            vec![FailureRecord::new(attempt, "OutOfMemoryError")]
        );
        assert_eq!(summary.sampled_attempts(), 1);
    }

    #[tokio::test]
    async fn test_collaborator_failures_propagate() {
        for failure in [
            MockFailure::MapReports,
            MockFailure::ReduceReports,
            MockFailure::Job,
        ] {
            let client =
                client_with_handle(MockJobHandle::new(job_id())).with_failure(failure);
            let err = get_summary(&client, &job_id(), false).await.unwrap_err();
            assert!(err.is_communication(), "{:?}", failure);
        }
    }

    #[tokio::test]
    async fn test_unknown_job_fails() {
        let client = MockJobTrackingClient::new();
        let err = get_summary(&client, &job_id(), false).await.unwrap_err();
        assert_eq!(
            err.code(),
            crate::error::ErrorCode::COMM_JOB_NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_summary_serializes() {
        let client = client_with_handle(MockJobHandle::new(job_id()));
        let summary = get_summary(&client, &job_id(), false).await.unwrap();

        let json = summary.to_json_pretty().unwrap();
        assert!(json.contains("\"job_id\": \"job_201401011200_0042\""));
        let back: JobSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }
}
