//! Job tracker abstraction layer
//!
//! Provides trait-based abstraction over the distributed job-tracking
//! service so that summaries can be built and tested without a cluster.
//! Every call is read-only and may block for an arbitrary amount of time;
//! failures surface as [`JobScopeError::Communication`](crate::error::JobScopeError).

pub mod ids;
pub mod mock;
pub mod types;

pub use ids::{JobId, TaskAttemptId, TaskId, TaskType};
pub use mock::{MockJobHandle, MockJobTrackingClient};
pub use types::{CompletionStatus, TaskCompletionEvent, TaskReport, TaskStatus};

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Number of completion events a stock tracker returns per page
pub const DEFAULT_EVENT_PAGE_SIZE: usize = 10;

/// Client for the cluster's job-tracking service
#[async_trait]
pub trait JobTrackingClient: Send + Sync {
    /// List report snapshots for every map task of a job.
    ///
    /// Slots the tracker could not fill are `None`.
    async fn map_task_reports(&self, job_id: &JobId) -> Result<Vec<Option<TaskReport>>>;

    /// List report snapshots for every reduce task of a job
    async fn reduce_task_reports(&self, job_id: &JobId) -> Result<Vec<Option<TaskReport>>>;

    /// Obtain a handle on a submitted job
    async fn job(&self, job_id: &JobId) -> Result<Arc<dyn JobHandle>>;
}

/// Handle on one running or finished job
#[async_trait]
pub trait JobHandle: Send + Sync {
    fn job_id(&self) -> &JobId;

    /// Fetch the page of completion events starting at `offset`.
    ///
    /// Pages may hold any number of events; the next page starts right after
    /// the last event returned. An empty page means there are no events at or
    /// beyond `offset`.
    async fn completion_events(&self, offset: usize) -> Result<Vec<TaskCompletionEvent>>;

    /// Fetch the diagnostic messages recorded for a task attempt
    async fn task_diagnostics(&self, attempt_id: &TaskAttemptId) -> Result<Vec<String>>;
}
