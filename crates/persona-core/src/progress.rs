//! Progress reporting sink passed into each pipeline stage

use std::fmt;

/// Pipeline stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Aggregate,
    Infer,
    Evidence,
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Aggregate => "aggregate",
            Stage::Infer => "infer",
            Stage::Evidence => "evidence",
            Stage::Render => "render",
        };
        f.write_str(name)
    }
}

/// Receives progress from the pipeline; default methods do nothing
pub trait ProgressSink: Send + Sync {
    /// Called when a stage begins
    fn stage(&self, _stage: Stage) {}

    /// Informational progress within a stage
    fn info(&self, _stage: Stage, _message: &str) {}

    /// Degraded-but-continuing condition
    fn warn(&self, _stage: Stage, _message: &str) {}
}

/// Forwards progress to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn stage(&self, stage: Stage) {
        tracing::info!(%stage, "stage started");
    }

    fn info(&self, stage: Stage, message: &str) {
        tracing::info!(%stage, "{}", message);
    }

    fn warn(&self, stage: Stage, message: &str) {
        tracing::warn!(%stage, "{}", message);
    }
}

/// Drops everything (quiet mode)
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {}
