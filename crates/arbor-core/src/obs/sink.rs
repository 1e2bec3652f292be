//! Metrics sink boundary.
//!
//! Evaluation logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between the executor and the
//! thread-local metrics state.
use crate::obs::metrics::{self, EvalKind, KindCounters};
use std::{cell::RefCell, time::Instant};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = const { RefCell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    EvalStart {
        kind: EvalKind,
    },
    EvalFinish {
        kind: EvalKind,
        rows_in: u64,
        rows_out: u64,
        elapsed_micros: u64,
    },
    NodesVisited {
        kind: EvalKind,
        visited: u64,
    },
    BranchPruned {
        kind: EvalKind,
        pruned: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into global metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::EvalStart { kind } => {
                metrics::with_state_mut(|m| {
                    match kind {
                        EvalKind::Filter => {
                            m.ops.filter_calls = m.ops.filter_calls.saturating_add(1);
                        }
                        EvalKind::FlattenConcat => {
                            m.ops.flatten_calls = m.ops.flatten_calls.saturating_add(1);
                        }
                        EvalKind::ExistsMatch => {
                            m.ops.exists_calls = m.ops.exists_calls.saturating_add(1);
                        }
                    }

                    let entry = m.kinds.entry(kind).or_default();
                    entry.calls = entry.calls.saturating_add(1);
                });
            }

            MetricsEvent::EvalFinish {
                kind,
                rows_in,
                rows_out,
                elapsed_micros,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_in = m.ops.rows_in.saturating_add(rows_in);
                    m.ops.rows_out = m.ops.rows_out.saturating_add(rows_out);
                    metrics::add_micros(
                        &mut m.perf.eval_micros_total,
                        &mut m.perf.eval_micros_max,
                        elapsed_micros,
                    );

                    let entry: &mut KindCounters = m.kinds.entry(kind).or_default();
                    entry.rows_in = entry.rows_in.saturating_add(rows_in);
                    entry.rows_out = entry.rows_out.saturating_add(rows_out);
                });
            }

            MetricsEvent::NodesVisited { kind, visited } => {
                metrics::with_state_mut(|m| {
                    m.ops.nodes_visited = m.ops.nodes_visited.saturating_add(visited);
                    let entry = m.kinds.entry(kind).or_default();
                    entry.nodes_visited = entry.nodes_visited.saturating_add(visited);
                });
            }

            MetricsEvent::BranchPruned { kind, pruned } => {
                metrics::with_state_mut(|m| {
                    m.ops.branches_pruned = m.ops.branches_pruned.saturating_add(pruned);
                    let entry = m.kinds.entry(kind).or_default();
                    entry.branches_pruned = entry.branches_pruned.saturating_add(pruned);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // Preconditions:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` always restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        //
        // Aliasing:
        // - Only a shared reference is materialized, matching the shared borrow
        //   used to install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current metrics state.
///
/// `window_start_ms` filters by window start (`EventState::window_start_ms`),
/// not by per-event timestamps.
#[must_use]
pub fn metrics_report(window_start_ms: Option<u64>) -> metrics::EventReport {
    metrics::report_window_start(window_start_ms)
}

/// Reset all metrics state (counters + perf).
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // Preconditions:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` always restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    //
    // What would break this:
    // - Any deferred use of `sink_ptr` beyond this scope.
    // - Any path that bypasses Guard restoration.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink_ptr));
    let _guard = Guard(prev);

    f()
}

/// Span
/// RAII guard that emits start/finish metrics events for one executor call.
/// Ensures finish accounting happens even on unwind.

pub(crate) struct Span {
    kind: EvalKind,
    start: Instant,
    rows_in: u64,
    rows_out: u64,
    finished: bool,
}

impl Span {
    #[must_use]
    /// Start a metrics span for one evaluation kind.
    pub(crate) fn new(kind: EvalKind) -> Self {
        record(MetricsEvent::EvalStart { kind });

        Self {
            kind,
            start: Instant::now(),
            rows_in: 0,
            rows_out: 0,
            finished: false,
        }
    }

    pub(crate) const fn set_rows(&mut self, rows_in: u64, rows_out: u64) {
        self.rows_in = rows_in;
        self.rows_out = rows_out;
    }

    pub(crate) const fn kind(&self) -> EvalKind {
        self.kind
    }

    fn finish_inner(&self) {
        let elapsed_micros = u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX);

        record(MetricsEvent::EvalFinish {
            kind: self.kind,
            rows_in: self.rows_in,
            rows_out: self.rows_out,
            elapsed_micros,
        });
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        if !self.finished {
            self.finish_inner();
            self.finished = true;
        }
    }
}
