//! Job, task and task-attempt identifiers
//!
//! Identifiers use the job tracker's canonical underscore-separated form,
//! e.g. `job_201401011200_0001`, `task_201401011200_0001_m_000005` and
//! `attempt_201401011200_0001_m_000005_0`. They serialize as those strings.

use crate::error::{ErrorCode, JobScopeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const JOB_PREFIX: &str = "job";
const TASK_PREFIX: &str = "task";
const ATTEMPT_PREFIX: &str = "attempt";

/// Kind of task within a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskType {
    Map,
    Reduce,
    JobSetup,
    JobCleanup,
    TaskCleanup,
}

impl TaskType {
    pub fn as_char(&self) -> char {
        match self {
            TaskType::Map => 'm',
            TaskType::Reduce => 'r',
            TaskType::JobSetup => 's',
            TaskType::JobCleanup => 'c',
            TaskType::TaskCleanup => 't',
        }
    }

    fn from_field(field: &str, whole: &str) -> Result<Self, JobScopeError> {
        match field {
            "m" => Ok(TaskType::Map),
            "r" => Ok(TaskType::Reduce),
            "s" => Ok(TaskType::JobSetup),
            "c" => Ok(TaskType::JobCleanup),
            "t" => Ok(TaskType::TaskCleanup),
            other => Err(JobScopeError::invalid_id(
                ErrorCode::ID_BAD_TASK_TYPE,
                whole,
                format!("unknown task type '{}'", other),
            )),
        }
    }
}

/// Identifier of a job on a particular tracker instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JobId {
    tracker: String,
    id: u32,
}

impl JobId {
    /// The tracker identifier must be non-empty and free of `_` so the id
    /// parses back from its displayed form.
    pub fn new(tracker: impl Into<String>, id: u32) -> Result<Self, JobScopeError> {
        let tracker = tracker.into();
        if tracker.is_empty() || tracker.contains('_') {
            return Err(JobScopeError::invalid_id(
                ErrorCode::ID_BAD_TRACKER,
                format!("{}_{}_{:04}", JOB_PREFIX, tracker, id),
                "tracker identifier must be non-empty and contain no '_'",
            ));
        }
        Ok(Self { tracker, id })
    }

    /// Tracker start identifier (usually its start timestamp)
    pub fn tracker(&self) -> &str {
        &self.tracker
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    fn write_fields(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{:04}", self.tracker, self.id)
    }
}

/// Identifier of a single map or reduce task
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId {
    job: JobId,
    task_type: TaskType,
    id: u32,
}

impl TaskId {
    pub fn new(job: JobId, task_type: TaskType, id: u32) -> Self {
        Self { job, task_type, id }
    }

    pub fn job(&self) -> &JobId {
        &self.job
    }

    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    fn write_fields(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.job.write_fields(f)?;
        write!(f, "_{}_{:06}", self.task_type.as_char(), self.id)
    }
}

/// Identifier of one execution attempt of a task
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskAttemptId {
    task: TaskId,
    attempt: u32,
}

impl TaskAttemptId {
    pub fn new(task: TaskId, attempt: u32) -> Self {
        Self { task, attempt }
    }

    pub fn task(&self) -> &TaskId {
        &self.task
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_", JOB_PREFIX)?;
        self.write_fields(f)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_", TASK_PREFIX)?;
        self.write_fields(f)
    }
}

impl fmt::Display for TaskAttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_", ATTEMPT_PREFIX)?;
        self.task.write_fields(f)?;
        write!(f, "_{}", self.attempt)
    }
}

/// Split an identifier into its fields after checking the prefix and arity
fn split_fields<'a>(
    value: &'a str,
    prefix: &str,
    expected: usize,
) -> Result<Vec<&'a str>, JobScopeError> {
    let fields: Vec<&str> = value.split('_').collect();
    if fields.first() != Some(&prefix) {
        return Err(JobScopeError::invalid_id(
            ErrorCode::ID_BAD_PREFIX,
            value,
            format!("expected prefix '{}_'", prefix),
        ));
    }
    if fields.len() != expected {
        return Err(JobScopeError::invalid_id(
            ErrorCode::ID_BAD_FIELD_COUNT,
            value,
            format!("expected {} fields, found {}", expected, fields.len()),
        ));
    }
    Ok(fields)
}

fn parse_number(field: &str, whole: &str) -> Result<u32, JobScopeError> {
    field.parse().map_err(|_| {
        JobScopeError::invalid_id(
            ErrorCode::ID_BAD_NUMBER,
            whole,
            format!("'{}' is not a number", field),
        )
    })
}

impl FromStr for JobId {
    type Err = JobScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = split_fields(s, JOB_PREFIX, 3)?;
        Ok(JobId::new(fields[1], parse_number(fields[2], s)?)?)
    }
}

impl FromStr for TaskId {
    type Err = JobScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = split_fields(s, TASK_PREFIX, 5)?;
        let job = JobId::new(fields[1], parse_number(fields[2], s)?)?;
        let task_type = TaskType::from_field(fields[3], s)?;
        Ok(TaskId::new(job, task_type, parse_number(fields[4], s)?))
    }
}

impl FromStr for TaskAttemptId {
    type Err = JobScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = split_fields(s, ATTEMPT_PREFIX, 6)?;
        let job = JobId::new(fields[1], parse_number(fields[2], s)?)?;
        let task_type = TaskType::from_field(fields[3], s)?;
        let task = TaskId::new(job, task_type, parse_number(fields[4], s)?);
        Ok(TaskAttemptId::new(task, parse_number(fields[5], s)?))
    }
}

macro_rules! string_conversions {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = JobScopeError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.to_string()
                }
            }
        )*
    };
}

string_conversions!(JobId, TaskId, TaskAttemptId);
