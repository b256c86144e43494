//! Data reported by the job tracker

use super::ids::{TaskAttemptId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a task as seen in its report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    Running,
    Complete,
    Killed,
    Failed,
}

/// Snapshot of one map or reduce task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskReport {
    pub task_id: TaskId,
    pub status: TaskStatus,
    pub start_time: DateTime<Utc>,
    pub finish_time: DateTime<Utc>,
}

impl TaskReport {
    pub fn new(
        task_id: TaskId,
        status: TaskStatus,
        start_time: DateTime<Utc>,
        finish_time: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id,
            status,
            start_time,
            finish_time,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == TaskStatus::Complete
    }

    /// Wall-clock runtime in whole milliseconds
    ///
    /// Not clamped: a tracker reporting a finish before the start yields a
    /// negative value.
    pub fn runtime_millis(&self) -> i64 {
        (self.finish_time - self.start_time).num_milliseconds()
    }
}

/// Outcome carried by a task completion event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompletionStatus {
    Failed,
    Killed,
    Succeeded,
    Obsolete,
    TipFailed,
}

/// One event emitted when a task attempt finishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCompletionEvent {
    pub attempt_id: TaskAttemptId,
    pub status: CompletionStatus,
}

impl TaskCompletionEvent {
    pub fn new(attempt_id: TaskAttemptId, status: CompletionStatus) -> Self {
        Self { attempt_id, status }
    }

    /// Only `FAILED` attempts are failure candidates; killed or obsolete
    /// attempts are not.
    pub fn is_failed(&self) -> bool {
        self.status == CompletionStatus::Failed
    }
}
