//! Observability: runtime telemetry (metrics), the sink boundary and a
//! timing wrapper for external callers.
//!
//! Evaluation functions never call into this module; only the executor
//! emits events, and only through `sink`.

pub(crate) mod measure;
pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use measure::{Measured, measure};
pub use metrics::{
    EvalKind, EventOps, EventPerf, EventReport, EventState, KindCounters, KindSummary,
};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
