//! Flow planning hook
//!
//! A [`LoggingPlanner`] decorates another planner: every flow it builds gets
//! the caller's [`StepStrategy`] attached and is wrapped in a
//! [`LoggingFlow`]. When a wrapped flow fails, the failed steps' jobs are
//! summarized and their sampled task diagnostics are logged before the
//! original error is handed back.

use crate::summary::SummaryBuilder;
use crate::tracker::{JobId, JobTrackingClient};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Definition of a pipeline handed to a planner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowDef {
    pub name: String,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl FlowDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: HashMap::new(),
        }
    }
}

/// One cluster job within a planned flow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowStep {
    pub name: String,
    pub ordinal: usize,
    /// Job configuration submitted with the step
    pub config: HashMap<String, String>,
    /// Set once the step has been submitted
    pub job_id: Option<JobId>,
}

/// Caller-supplied adjustment applied to each step before submission
pub trait StepStrategy: Send + Sync {
    fn apply(&self, flow_name: &str, predecessors: &[FlowStep], step: &mut FlowStep);
}

/// An executable flow produced by a planner
#[async_trait]
pub trait Flow: Send + Sync {
    fn name(&self) -> &str;

    fn set_step_strategy(&mut self, strategy: Arc<dyn StepStrategy>);

    /// Job ids of the steps submitted so far
    fn step_job_ids(&self) -> Vec<JobId>;

    /// Run the flow to completion
    async fn complete(&mut self) -> Result<()>;
}

/// Turns flow definitions into executable flows
pub trait FlowPlanner: Send + Sync {
    fn build_flow(&self, def: &FlowDef) -> Result<Box<dyn Flow>>;
}

/// Planner decorator attaching a step strategy and failure logging
pub struct LoggingPlanner<P> {
    inner: P,
    strategy: Arc<dyn StepStrategy>,
    client: Arc<dyn JobTrackingClient>,
    summaries: SummaryBuilder,
}

impl<P: FlowPlanner> LoggingPlanner<P> {
    pub fn new(
        inner: P,
        strategy: Arc<dyn StepStrategy>,
        client: Arc<dyn JobTrackingClient>,
    ) -> Self {
        Self {
            inner,
            strategy,
            client,
            summaries: SummaryBuilder::default(),
        }
    }

    /// Use `summaries` when logging failed flows
    pub fn with_summary_builder(mut self, summaries: SummaryBuilder) -> Self {
        self.summaries = summaries;
        self
    }
}

impl<P: FlowPlanner> FlowPlanner for LoggingPlanner<P> {
    fn build_flow(&self, def: &FlowDef) -> Result<Box<dyn Flow>> {
        let mut flow = self.inner.build_flow(def)?;
        flow.set_step_strategy(self.strategy.clone());
        Ok(Box::new(LoggingFlow::new(
            flow,
            self.client.clone(),
            self.summaries.clone(),
        )))
    }
}

/// Flow wrapper that logs task failures of a failed run
pub struct LoggingFlow {
    inner: Box<dyn Flow>,
    client: Arc<dyn JobTrackingClient>,
    summaries: SummaryBuilder,
}

impl LoggingFlow {
    pub fn new(
        inner: Box<dyn Flow>,
        client: Arc<dyn JobTrackingClient>,
        summaries: SummaryBuilder,
    ) -> Self {
        Self {
            inner,
            client,
            summaries,
        }
    }

    /// Summarize every submitted step and log its sampled failures.
    ///
    /// Summary errors are logged and swallowed.
    async fn log_step_failures(&self) {
        for job_id in self.inner.step_job_ids() {
            match self
                .summaries
                .build_summary(self.client.as_ref(), &job_id, true)
                .await
            {
                Ok(summary) => {
                    for failure in &summary.failures {
                        error!(
                            flow = self.inner.name(),
                            job_id = %job_id,
                            attempt_id = %failure.attempt_id,
                            "Task failure: {}",
                            failure.message
                        );
                    }
                }
                Err(e) => {
                    warn!(
                        flow = self.inner.name(),
                        job_id = %job_id,
                        "Unable to summarize failed step: {}",
                        e
                    );
                }
            }
        }
    }
}

#[async_trait]
impl Flow for LoggingFlow {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn set_step_strategy(&mut self, strategy: Arc<dyn StepStrategy>) {
        self.inner.set_step_strategy(strategy);
    }

    fn step_job_ids(&self) -> Vec<JobId> {
        self.inner.step_job_ids()
    }

    async fn complete(&mut self) -> Result<()> {
        match self.inner.complete().await {
            Ok(()) => {
                info!(flow = self.inner.name(), "Flow completed");
                Ok(())
            }
            Err(e) => {
                error!(flow = self.inner.name(), "Flow failed: {}", e);
                self.log_step_failures().await;
                Err(e)
            }
        }
    }
}
