//! # jobscope
//!
//! Post-hoc execution statistics and failure diagnostics for map/reduce jobs.
//!
//! ## Usage
//!
//! ```no_run
//! # async fn run(client: &dyn jobscope::tracker::JobTrackingClient) -> jobscope::Result<()> {
//! let job_id = "job_201401011200_0042".parse()?;
//! let summary = jobscope::get_summary(client, &job_id, false).await?;
//! println!("map: {}", summary.map_stats);
//! for failure in &summary.failures {
//!     println!("{}", failure);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - `tracker` - Trait-based abstraction over the job-tracking service, with mocks
//! - `stats` - Runtime statistics over completed task reports
//! - `failures` - Bounded failure discovery and diagnostics sampling
//! - `summary` - Job summary composition
//! - `flow` - Planner decorator that logs failures of failed flows
//! - `config` - TOML configuration
//! - `error` - Error types and codes
pub mod config;
pub mod error;
pub mod failures;
pub mod flow;
pub mod logging;
pub mod stats;
pub mod summary;
pub mod tracker;


pub use error::{JobScopeError, Result};
pub use failures::{FailureRecord, FailureSampler, SamplerConfig};
pub use stats::{compute_statistics, RuntimeStatistics};
pub use summary::{get_summary, JobSummary, SummaryBuilder};
