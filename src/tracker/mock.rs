//! In-memory job tracker for tests and offline tooling

use super::{
    JobHandle, JobId, JobTrackingClient, TaskAttemptId, TaskCompletionEvent, TaskReport,
    DEFAULT_EVENT_PAGE_SIZE,
};
use crate::error::{ErrorCode, JobScopeError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Mock implementation of JobHandle serving a fixed event stream
pub struct MockJobHandle {
    job_id: JobId,
    events: Vec<TaskCompletionEvent>,
    page_size: usize,
    diagnostics: HashMap<TaskAttemptId, Vec<String>>,
    page_delays: HashMap<usize, Duration>,
    fail_events_at: Option<usize>,
    fail_diagnostics: bool,
    /// Offsets requested, in call order
    pub requested_offsets: Arc<Mutex<Vec<usize>>>,
    /// Attempts whose diagnostics were requested, in call order
    pub diagnostic_requests: Arc<Mutex<Vec<TaskAttemptId>>>,
}

impl MockJobHandle {
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            events: Vec::new(),
            page_size: DEFAULT_EVENT_PAGE_SIZE,
            diagnostics: HashMap::new(),
            page_delays: HashMap::new(),
            fail_events_at: None,
            fail_diagnostics: false,
            requested_offsets: Arc::new(Mutex::new(Vec::new())),
            diagnostic_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Use `events` as the full completion event stream
    pub fn with_events(mut self, events: Vec<TaskCompletionEvent>) -> Self {
        self.events = events;
        self
    }

    /// Serve pages of at most `page_size` events
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_diagnostics(mut self, attempt_id: TaskAttemptId, messages: Vec<String>) -> Self {
        self.diagnostics.insert(attempt_id, messages);
        self
    }

    /// Sleep for `delay` before answering the page request at `offset`
    pub fn with_page_delay(mut self, offset: usize, delay: Duration) -> Self {
        self.page_delays.insert(offset, delay);
        self
    }

    /// Fail the page request at `offset` with a communication error
    pub fn with_event_failure_at(mut self, offset: usize) -> Self {
        self.fail_events_at = Some(offset);
        self
    }

    /// Fail every diagnostics request with a communication error
    pub fn with_diagnostics_failure(mut self) -> Self {
        self.fail_diagnostics = true;
        self
    }

    pub async fn get_requested_offsets(&self) -> Vec<usize> {
        self.requested_offsets.lock().await.clone()
    }

    pub async fn get_diagnostic_requests(&self) -> Vec<TaskAttemptId> {
        self.diagnostic_requests.lock().await.clone()
    }
}

#[async_trait]
impl JobHandle for MockJobHandle {
    fn job_id(&self) -> &JobId {
        &self.job_id
    }

    async fn completion_events(&self, offset: usize) -> Result<Vec<TaskCompletionEvent>> {
        self.requested_offsets.lock().await.push(offset);

        if let Some(delay) = self.page_delays.get(&offset) {
            tokio::time::sleep(*delay).await;
        }

        if self.fail_events_at == Some(offset) {
            return Err(JobScopeError::communication_with_code(
                ErrorCode::COMM_EVENTS_UNAVAILABLE,
                "fetch completion events",
                format!("mock tracker refused offset {}", offset),
            ));
        }

        let start = offset.min(self.events.len());
        let end = offset.saturating_add(self.page_size).min(self.events.len());
        Ok(self.events[start..end].to_vec())
    }

    async fn task_diagnostics(&self, attempt_id: &TaskAttemptId) -> Result<Vec<String>> {
        self.diagnostic_requests.lock().await.push(attempt_id.clone());

        if self.fail_diagnostics {
            return Err(JobScopeError::communication_with_code(
                ErrorCode::COMM_DIAGNOSTICS_UNAVAILABLE,
                "fetch task diagnostics",
                format!("mock tracker refused {}", attempt_id),
            ));
        }

        Ok(self.diagnostics.get(attempt_id).cloned().unwrap_or_default())
    }
}

/// Collaborator call that a [`MockJobTrackingClient`] can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    MapReports,
    ReduceReports,
    Job,
}

/// Mock implementation of JobTrackingClient
pub struct MockJobTrackingClient {
    map_reports: Vec<Option<TaskReport>>,
    reduce_reports: Vec<Option<TaskReport>>,
    handles: HashMap<JobId, Arc<MockJobHandle>>,
    failure: Option<MockFailure>,
    /// Operations invoked, in call order
    pub called_operations: Arc<Mutex<Vec<String>>>,
}

impl MockJobTrackingClient {
    pub fn new() -> Self {
        Self {
            map_reports: Vec::new(),
            reduce_reports: Vec::new(),
            handles: HashMap::new(),
            failure: None,
            called_operations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_map_reports(mut self, reports: Vec<Option<TaskReport>>) -> Self {
        self.map_reports = reports;
        self
    }

    pub fn with_reduce_reports(mut self, reports: Vec<Option<TaskReport>>) -> Self {
        self.reduce_reports = reports;
        self
    }

    /// Register a job handle; it is served for its own job id
    pub fn with_job(mut self, handle: Arc<MockJobHandle>) -> Self {
        self.handles.insert(handle.job_id().clone(), handle);
        self
    }

    pub fn with_failure(mut self, failure: MockFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub async fn get_called_operations(&self) -> Vec<String> {
        self.called_operations.lock().await.clone()
    }

    async fn record(&self, operation: &str, job_id: &JobId) {
        self.called_operations
            .lock()
            .await
            .push(format!("{} {}", operation, job_id));
    }

    fn check_failure(&self, failure: MockFailure, operation: &str) -> Result<()> {
        if self.failure == Some(failure) {
            let code = match failure {
                MockFailure::Job => ErrorCode::COMM_GENERIC,
                MockFailure::MapReports | MockFailure::ReduceReports => {
                    ErrorCode::COMM_REPORTS_UNAVAILABLE
                }
            };
            return Err(JobScopeError::communication_with_code(
                code,
                operation,
                "mock tracker unavailable",
            ));
        }
        Ok(())
    }
}

impl Default for MockJobTrackingClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobTrackingClient for MockJobTrackingClient {
    async fn map_task_reports(&self, job_id: &JobId) -> Result<Vec<Option<TaskReport>>> {
        self.record("map_task_reports", job_id).await;
        self.check_failure(MockFailure::MapReports, "list map task reports")?;
        Ok(self.map_reports.clone())
    }

    async fn reduce_task_reports(&self, job_id: &JobId) -> Result<Vec<Option<TaskReport>>> {
        self.record("reduce_task_reports", job_id).await;
        self.check_failure(MockFailure::ReduceReports, "list reduce task reports")?;
        Ok(self.reduce_reports.clone())
    }

    async fn job(&self, job_id: &JobId) -> Result<Arc<dyn JobHandle>> {
        self.record("job", job_id).await;
        self.check_failure(MockFailure::Job, "get job")?;
        match self.handles.get(job_id) {
            Some(handle) => Ok(handle.clone() as Arc<dyn JobHandle>),
            None => Err(JobScopeError::communication_with_code(
                ErrorCode::COMM_JOB_NOT_FOUND,
                "get job",
                format!("{} is unknown to the mock tracker", job_id),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{CompletionStatus, TaskId, TaskType};

    fn event(n: u32, status: CompletionStatus) -> TaskCompletionEvent {
        let task = TaskId::new(JobId::new("1", 1).unwrap(), TaskType::Map, n);
        TaskCompletionEvent::new(TaskAttemptId::new(task, 0), status)
    }

    #[tokio::test]
    async fn test_mock_handle_pages_events() {
        let events: Vec<_> = (0..12)
            .map(|n| event(n, CompletionStatus::Succeeded))
            .collect();
        let handle = MockJobHandle::new(JobId::new("1", 1).unwrap()).with_events(events);

        assert_eq!(handle.completion_events(0).await.unwrap().len(), 10);
        assert_eq!(handle.completion_events(10).await.unwrap().len(), 2);
        assert!(handle.completion_events(20).await.unwrap().is_empty());
        assert_eq!(handle.get_requested_offsets().await, vec![0, 10, 20]);
    }

    #[tokio::test]
    async fn test_mock_handle_missing_diagnostics_are_empty() {
        let handle = MockJobHandle::new(JobId::new("1", 1).unwrap());
        let attempt = event(1, CompletionStatus::Failed).attempt_id;
        assert!(handle.task_diagnostics(&attempt).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_client_unknown_job() {
        let client = MockJobTrackingClient::new();
        let result = client.job(&JobId::new("1", 9).unwrap()).await;
        let err = result.err().unwrap();
        assert_eq!(err.code(), ErrorCode::COMM_JOB_NOT_FOUND);
        assert_eq!(client.get_called_operations().await, vec!["job job_1_0009"]);
    }

    #[tokio::test]
    async fn test_mock_client_failure_injection() {
        let client = MockJobTrackingClient::new().with_failure(MockFailure::ReduceReports);
        let job = JobId::new("1", 1).unwrap();
        assert!(client.map_task_reports(&job).await.is_ok());
        assert!(client.reduce_task_reports(&job).await.unwrap_err().is_communication());
    }
}
