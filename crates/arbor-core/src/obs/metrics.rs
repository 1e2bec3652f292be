use serde::{Deserialize, Serialize};
use std::{
    cell::RefCell,
    collections::BTreeMap,
    fmt,
    time::{SystemTime, UNIX_EPOCH},
};

///
/// EvalKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalKind {
    Filter,
    FlattenConcat,
    ExistsMatch,
}

impl EvalKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Filter => "filter",
            Self::FlattenConcat => "flatten_concat",
            Self::ExistsMatch => "exists_match",
        }
    }
}

impl fmt::Display for EvalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// EventState
/// Ephemeral, in-memory counters and simple perf totals for evaluations.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub perf: EventPerf,
    pub kinds: BTreeMap<EvalKind, KindCounters>,
    pub window_start_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            perf: EventPerf::default(),
            kinds: BTreeMap::new(),
            window_start_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Executor entrypoints
    pub filter_calls: u64,
    pub flatten_calls: u64,
    pub exists_calls: u64,

    // Rows
    pub rows_in: u64,
    pub rows_out: u64,

    // Traversal
    pub nodes_visited: u64,
    pub branches_pruned: u64,
}

///
/// KindCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct KindCounters {
    pub calls: u64,
    pub rows_in: u64,
    pub rows_out: u64,
    pub nodes_visited: u64,
    pub branches_pruned: u64,
}

///
/// EventPerf
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventPerf {
    // Wall-clock totals in microseconds
    pub eval_micros_total: u128,

    // Maximum observed single evaluation
    pub eval_micros_max: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters and start a new window.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

/// Accumulate a duration total and track a max.
pub(crate) fn add_micros(total: &mut u128, max: &mut u64, delta: u64) {
    *total = total.saturating_add(u128::from(delta));
    if delta > *max {
        *max = delta;
    }
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Ephemeral runtime counters since `window_start_ms`.
    pub counters: Option<EventState>,
    /// Per-kind counters and averages.
    pub kind_summaries: Vec<KindSummary>,
}

///
/// KindSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct KindSummary {
    pub kind: Option<EvalKind>,
    pub calls: u64,
    pub rows_in: u64,
    pub rows_out: u64,
    pub nodes_visited: u64,
    pub branches_pruned: u64,
    pub avg_rows_out: f64,
}

/// Build a metrics report from in-memory counters.
///
/// `window_start_ms` filters by window start (`EventState::window_start_ms`),
/// not by per-event timestamps: a requested start later than the current
/// window yields an empty report.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub(crate) fn report_window_start(window_start_ms: Option<u64>) -> EventReport {
    let snap = with_state(Clone::clone);

    if window_start_ms.is_some_and(|start| start > snap.window_start_ms) {
        return EventReport::default();
    }

    let kind_summaries = snap
        .kinds
        .iter()
        .map(|(kind, counters)| KindSummary {
            kind: Some(*kind),
            calls: counters.calls,
            rows_in: counters.rows_in,
            rows_out: counters.rows_out,
            nodes_visited: counters.nodes_visited,
            branches_pruned: counters.branches_pruned,
            avg_rows_out: if counters.calls > 0 {
                counters.rows_out as f64 / counters.calls as f64
            } else {
                0.0
            },
        })
        .collect();

    EventReport {
        counters: Some(snap),
        kind_summaries,
    }
}
