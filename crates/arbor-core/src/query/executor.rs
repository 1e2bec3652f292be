use crate::{
    evaluator::{evaluate_filter, exists_with_stats, reduce_flatten_with_stats},
    node::Node,
    obs::{
        MetricsEvent,
        sink::{Span, record},
    },
    path::{LevelPath, TraversalStats},
    predicate::{Predicate, eval, eval_anchored, normalize},
    query::{Query, QueryMode, Response},
};
use std::borrow::Cow;

///
/// Executor
///
/// Runs a `Query` against borrowed roots by composing the evaluator
/// operations. Each call is wrapped in a metrics span; the evaluator
/// functions themselves stay free of instrumentation.
///

#[derive(Clone, Copy, Debug)]
pub struct Executor {
    normalize: bool,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor {
    #[must_use]
    pub const fn new() -> Self {
        Self { normalize: true }
    }

    /// Toggle normalization of the prefilter, the predicate and the path
    /// guards before evaluation (on by default).
    #[must_use]
    pub const fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    fn prepare<'p>(&self, predicate: &'p Predicate) -> Cow<'p, Predicate> {
        if self.normalize {
            Cow::Owned(normalize(predicate))
        } else {
            Cow::Borrowed(predicate)
        }
    }

    fn prepare_path<'p>(&self, path: &'p LevelPath) -> Cow<'p, LevelPath> {
        if self.normalize && path.has_guards() {
            Cow::Owned(path.normalized())
        } else {
            Cow::Borrowed(path)
        }
    }

    /// Evaluate `query` against `roots`.
    ///
    /// Never fails: malformed paths and missing attributes degrade to
    /// "no match".
    #[must_use]
    pub fn execute<'a>(&self, query: &Query, roots: &'a [Node]) -> Response<'a> {
        let mut span = Span::new(query.mode());
        log::debug!(target: "arbor::executor", "execute {query} over {} roots", roots.len());

        let candidates = match query.prefilter() {
            Some(prefilter) => {
                let prefilter = self.prepare(prefilter);
                evaluate_filter(roots, |root| eval(root, &prefilter))
            }
            None => roots.iter().collect(),
        };
        let rows_in = candidates.len() as u64;
        let predicate = self.prepare(query.predicate());
        let path = self.prepare_path(query.path());

        let (rows, stats) = match query.mode() {
            QueryMode::Filter => (
                evaluate_filter(candidates, |node| eval(node, &predicate)),
                TraversalStats::default(),
            ),
            QueryMode::FlattenConcat => {
                reduce_flatten_with_stats(candidates, &path, |leaf| eval(leaf, &predicate))
            }
            QueryMode::ExistsMatch => {
                exists_with_stats(candidates, &path, |descendant, root| {
                    eval_anchored(descendant, Some(root), &predicate)
                })
            }
        };

        if stats.visited > 0 {
            record(MetricsEvent::NodesVisited {
                kind: span.kind(),
                visited: stats.visited,
            });
        }
        if stats.pruned > 0 {
            log::trace!(
                target: "arbor::executor",
                "{} branches lacked a field on path '{}'",
                stats.pruned,
                query.path()
            );
            record(MetricsEvent::BranchPruned {
                kind: span.kind(),
                pruned: stats.pruned,
            });
        }

        span.set_rows(rows_in, rows.len() as u64);
        log::debug!(
            target: "arbor::executor",
            "{} matched {} of {rows_in} rows",
            query.mode(),
            rows.len()
        );

        Response::new(query.mode(), rows, rows_in, stats)
    }
}
