//! Benchmarks for runtime aggregation and failure scanning
//! Measures statistics over large phases and paging through clean event streams

use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use jobscope::tracker::{
    CompletionStatus, JobId, MockJobHandle, TaskAttemptId, TaskCompletionEvent, TaskId,
    TaskReport, TaskStatus, TaskType,
};
use jobscope::{compute_statistics, FailureSampler};
use std::hint::black_box;
use tokio::runtime::Runtime;

fn create_reports(count: usize) -> Vec<Option<TaskReport>> {
    let start = Utc.timestamp_millis_opt(1_400_000_000_000).unwrap();
    (0..count)
        .map(|i| {
            // Every tenth slot is missing, every seventh task is still running
            if i % 10 == 9 {
                return None;
            }
            let status = if i % 7 == 0 {
                TaskStatus::Running
            } else {
                TaskStatus::Complete
            };
            Some(TaskReport::new(
                TaskId::new(JobId::new("bench", 1).unwrap(), TaskType::Map, i as u32),
                status,
                start,
                start + Duration::milliseconds((i * 37 % 10_000) as i64),
            ))
        })
        .collect()
}

fn create_clean_stream(count: usize) -> Vec<TaskCompletionEvent> {
    (0..count)
        .map(|i| {
            let task = TaskId::new(JobId::new("bench", 1).unwrap(), TaskType::Map, i as u32);
            TaskCompletionEvent::new(TaskAttemptId::new(task, 0), CompletionStatus::Succeeded)
        })
        .collect()
}

fn bench_compute_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_statistics");

    for count in [100, 10_000, 100_000] {
        let reports = create_reports(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &reports, |b, reports| {
            b.iter(|| black_box(compute_statistics(black_box(reports))));
        });
    }

    group.finish();
}

fn bench_scan_clean_stream(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("scan_clean_stream");

    for count in [1_000, 20_000] {
        let handle = MockJobHandle::new(JobId::new("bench", 1).unwrap()).with_events(create_clean_stream(count));
        let sampler = FailureSampler::default();
        group.bench_with_input(BenchmarkId::from_parameter(count), &handle, |b, handle| {
            b.to_async(&rt)
                .iter(|| async { black_box(sampler.scan_for_failures(handle, true).await.unwrap()) });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_statistics, bench_scan_clean_stream);
criterion_main!(benches);
