use crate::{node::Node, obs::EvalKind, path::TraversalStats};
use derive_more::Deref;

///
/// Response
///
/// Ordered references into the evaluated roots, plus traversal counters.
/// Dereferences to the matched nodes.
///

#[derive(Clone, Debug, Deref)]
pub struct Response<'a> {
    kind: EvalKind,
    #[deref]
    rows: Vec<&'a Node>,
    rows_in: u64,
    stats: TraversalStats,
}

impl<'a> Response<'a> {
    #[must_use]
    pub(crate) const fn new(
        kind: EvalKind,
        rows: Vec<&'a Node>,
        rows_in: u64,
        stats: TraversalStats,
    ) -> Self {
        Self {
            kind,
            rows,
            rows_in,
            stats,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> EvalKind {
        self.kind
    }

    /// Number of roots considered after the prefilter.
    #[must_use]
    pub const fn rows_in(&self) -> u64 {
        self.rows_in
    }

    #[must_use]
    pub const fn stats(&self) -> TraversalStats {
        self.stats
    }

    /// Clone the matched nodes out of the borrowed input.
    #[must_use]
    pub fn to_owned_rows(&self) -> Vec<Node> {
        self.rows.iter().map(|node| (*node).clone()).collect()
    }

    /// Render the matched nodes as a JSON array.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.rows.iter().map(|node| node.to_json()).collect())
    }
}
