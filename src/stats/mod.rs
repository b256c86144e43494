//! Runtime statistics for the tasks of one job phase
//!
//! Aggregation is a pure function of the reports it is given: only reports
//! that are present and whose status is `COMPLETE` contribute a runtime.
//! Absent slots and unfinished, killed or failed tasks are skipped, never
//! counted as zero.

pub mod descriptive;

pub use descriptive::DescriptiveStats;

use crate::tracker::TaskReport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Descriptive statistics over completed task runtimes, in milliseconds.
///
/// Values are truncated toward zero from the floating-point statistics.
///
/// # Degenerate case
///
/// When no task in the phase completed, `sample_count` is 0 and every
/// statistic is 0. That zero is a sentinel, not a measurement; check
/// [`RuntimeStatistics::is_degenerate`] before interpreting the values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeStatistics {
    pub sample_count: usize,
    pub mean_ms: i64,
    pub median_ms: i64,
    pub max_ms: i64,
    pub min_ms: i64,
    pub std_dev_ms: i64,
}

impl RuntimeStatistics {
    /// Statistics for a phase without any completed task
    pub fn degenerate() -> Self {
        Self::from_stats(&DescriptiveStats::new())
    }

    /// Truncate an accumulator's statistics to whole milliseconds.
    ///
    /// `NaN` statistics of an empty accumulator become 0.
    pub fn from_stats(stats: &DescriptiveStats) -> Self {
        Self {
            sample_count: stats.count(),
            mean_ms: stats.mean() as i64,
            median_ms: stats.percentile(50.0) as i64,
            max_ms: stats.max() as i64,
            min_ms: stats.min() as i64,
            std_dev_ms: stats.standard_deviation() as i64,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.sample_count == 0
    }
}

impl fmt::Display for RuntimeStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_degenerate() {
            return write!(f, "no completed tasks");
        }
        write!(
            f,
            "mean={}ms median={}ms max={}ms min={}ms stddev={}ms (n={})",
            self.mean_ms,
            self.median_ms,
            self.max_ms,
            self.min_ms,
            self.std_dev_ms,
            self.sample_count
        )
    }
}

/// Feed the runtime of every completed report into an accumulator
pub fn collect_runtimes(reports: &[Option<TaskReport>]) -> DescriptiveStats {
    reports
        .iter()
        .flatten()
        .filter(|report| report.is_complete())
        .map(|report| report.runtime_millis() as f64)
        .collect()
}

/// Compute runtime statistics for one phase's task reports
pub fn compute_statistics(reports: &[Option<TaskReport>]) -> RuntimeStatistics {
    RuntimeStatistics::from_stats(&collect_runtimes(reports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{JobId, TaskId, TaskStatus, TaskType};
    use chrono::{TimeZone, Utc};

    fn report(n: u32, status: TaskStatus, runtime_ms: i64) -> Option<TaskReport> {
        let start = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let finish = start + chrono::Duration::milliseconds(runtime_ms);
        let task = TaskId::new(JobId::new("1", 1).unwrap(), TaskType::Map, n);
        Some(TaskReport::new(task, status, start, finish))
    }

    #[test]
    fn test_statistics_over_completed_reports() {
        let reports: Vec<_> = [10, 20, 30, 40, 50]
            .iter()
            .enumerate()
            .map(|(i, ms)| report(i as u32, TaskStatus::Complete, *ms))
            .collect();

        let stats = compute_statistics(&reports);
        assert_eq!(stats.sample_count, 5);
        assert_eq!(stats.mean_ms, 30);
        assert_eq!(stats.median_ms, 30);
        assert_eq!(stats.max_ms, 50);
        assert_eq!(stats.min_ms, 10);
        assert_eq!(stats.std_dev_ms, 15);
        assert!(!stats.is_degenerate());
    }

    #[test]
    fn test_skips_absent_and_unfinished_reports() {
        let reports = vec![
            None,
            report(1, TaskStatus::Running, 999),
            report(2, TaskStatus::Complete, 100),
            report(3, TaskStatus::Failed, 5),
            None,
            report(4, TaskStatus::Killed, 7),
            report(5, TaskStatus::Complete, 300),
        ];

        let runtimes = collect_runtimes(&reports);
        assert_eq!(runtimes.count(), 2);

        let stats = compute_statistics(&reports);
        assert_eq!(stats.min_ms, 100);
        assert_eq!(stats.max_ms, 300);
        assert_eq!(stats.mean_ms, 200);
    }

    #[test]
    fn test_no_completed_reports_is_degenerate() {
        let reports = vec![None, report(1, TaskStatus::Pending, 0), None];
        let stats = compute_statistics(&reports);
        assert!(stats.is_degenerate());
        assert_eq!(stats, RuntimeStatistics::degenerate());
        assert_eq!(stats.mean_ms, 0);
        assert_eq!(stats.to_string(), "no completed tasks");
    }

    #[test]
    fn test_empty_input_is_degenerate() {
        assert!(compute_statistics(&[]).is_degenerate());
    }

    #[test]
    fn test_display() {
        let reports = vec![report(1, TaskStatus::Complete, 1_500)];
        assert_eq!(
            compute_statistics(&reports).to_string(),
            "mean=1500ms median=1500ms max=1500ms min=1500ms stddev=0ms (n=1)"
        );
    }
}
