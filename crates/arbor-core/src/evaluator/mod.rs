//! The three pure evaluation operations.
//!
//! Every function borrows its input and returns a freshly allocated vector
//! of references into it; nothing is cloned and nothing is mutated. Missing
//! child fields read as empty branches, so none of these can fail.


use crate::{
    node::Node,
    path::{LevelPath, TraversalStats},
};

/// Keep `nodes` for which `predicate` holds, in input order.
#[must_use]
pub fn evaluate_filter<'a, I, F>(nodes: I, predicate: F) -> Vec<&'a Node>
where
    I: IntoIterator<Item = &'a Node>,
    F: Fn(&Node) -> bool,
{
    nodes.into_iter().filter(|node| predicate(node)).collect()
}

/// Keep the roots with at least one descendant at the end of `path` for
/// which `matches(descendant, root)` holds.
#[must_use]
pub fn evaluate_exists<'a, I, F>(roots: I, path: &LevelPath, matches: F) -> Vec<&'a Node>
where
    I: IntoIterator<Item = &'a Node>,
    F: Fn(&Node, &Node) -> bool,
{
    exists_with_stats(roots, path, matches).0
}

/// Concatenate the nodes reached at the end of `path` across all roots and
/// keep the leaves for which `predicate` holds.
///
/// Output order is depth-first in source order: roots in input order, then
/// each level's children in their original order.
#[must_use]
pub fn evaluate_reduce_flatten<'a, I, F>(roots: I, path: &LevelPath, predicate: F) -> Vec<&'a Node>
where
    I: IntoIterator<Item = &'a Node>,
    F: Fn(&Node) -> bool,
{
    reduce_flatten_with_stats(roots, path, predicate).0
}

pub(crate) fn exists_with_stats<'a, I, F>(
    roots: I,
    path: &LevelPath,
    matches: F,
) -> (Vec<&'a Node>, TraversalStats)
where
    I: IntoIterator<Item = &'a Node>,
    F: Fn(&Node, &Node) -> bool,
{
    let mut stats = TraversalStats::default();

    let found = roots
        .into_iter()
        .filter(|root| {
            let (reached, root_stats) = path.descend_with_stats(root);
            stats.merge(root_stats);

            reached.iter().any(|descendant| matches(descendant, root))
        })
        .collect();

    (found, stats)
}

pub(crate) fn reduce_flatten_with_stats<'a, I, F>(
    roots: I,
    path: &LevelPath,
    predicate: F,
) -> (Vec<&'a Node>, TraversalStats)
where
    I: IntoIterator<Item = &'a Node>,
    F: Fn(&Node) -> bool,
{
    let (leaves, stats) = roots.into_iter().fold(
        (Vec::new(), TraversalStats::default()),
        |(mut acc, mut stats), root| {
            let (reached, root_stats) = path.descend_with_stats(root);
            stats.merge(root_stats);
            acc.extend(reached);
            (acc, stats)
        },
    );

    (evaluate_filter(leaves, predicate), stats)
}
