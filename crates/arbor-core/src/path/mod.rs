
use crate::{
    node::Node,
    predicate::{Predicate, eval, normalize},
};
use derive_more::Deref;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// PathError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PathError {
    #[error("level path '{path}' has an empty segment at position {position}")]
    EmptySegment { path: String, position: usize },
}

///
/// LevelStep
///
/// One child-field traversal. An optional guard restricts which nodes
/// reached by this step are kept (and therefore descended further).
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LevelStep {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<Predicate>,
}

impl LevelStep {
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            guard: None,
        }
    }

    #[must_use]
    pub fn with_guard(mut self, guard: Predicate) -> Self {
        self.guard = Some(guard);
        self
    }

    /// True when the guard compares against the anchor node. Guards are
    /// evaluated without one, so such a step can never resolve it.
    #[must_use]
    pub fn references_anchor(&self) -> bool {
        self.guard.as_ref().is_some_and(Predicate::references_anchor)
    }

    fn admits(&self, node: &Node) -> bool {
        self.guard.as_ref().is_none_or(|guard| eval(node, guard))
    }
}

///
/// TraversalStats
///
/// Counters gathered while descending. `pruned` counts nodes that lacked
/// the stepped field and were read as having zero children.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TraversalStats {
    pub visited: u64,
    pub pruned: u64,
}

impl TraversalStats {
    pub const fn merge(&mut self, other: Self) {
        self.visited = self.visited.saturating_add(other.visited);
        self.pruned = self.pruned.saturating_add(other.pruned);
    }
}

///
/// LevelPath
///
/// Ordered sequence of child-field steps from a root to a target level.
/// An empty path targets the root itself.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "PathRepr", into = "Vec<LevelStep>")]
pub struct LevelPath(Vec<LevelStep>);

///
/// PathRepr
///
/// Accepted serialized forms: a dotted string or a list of step tables.
///

#[derive(Deserialize)]
#[serde(untagged)]
enum PathRepr {
    Dotted(String),
    Steps(Vec<LevelStep>),
}

impl TryFrom<PathRepr> for LevelPath {
    type Error = PathError;

    fn try_from(repr: PathRepr) -> Result<Self, Self::Error> {
        match repr {
            PathRepr::Dotted(s) => s.parse(),
            PathRepr::Steps(steps) => {
                if let Some(position) = steps.iter().position(|step| step.field.trim().is_empty()) {
                    return Err(PathError::EmptySegment {
                        path: Self(steps).to_string(),
                        position,
                    });
                }
                Ok(Self(steps))
            }
        }
    }
}

impl From<LevelPath> for Vec<LevelStep> {
    fn from(path: LevelPath) -> Self {
        path.0
    }
}

impl LevelPath {
    #[must_use]
    pub const fn new(steps: Vec<LevelStep>) -> Self {
        Self(steps)
    }

    /// Build a path of unguarded steps.
    #[must_use]
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(fields.into_iter().map(LevelStep::new).collect())
    }

    /// True when any step carries a guard.
    #[must_use]
    pub fn has_guards(&self) -> bool {
        self.0.iter().any(|step| step.guard.is_some())
    }

    /// Position of the first step whose guard references the anchor.
    #[must_use]
    pub fn anchored_step(&self) -> Option<usize> {
        self.0.iter().position(LevelStep::references_anchor)
    }

    /// Copy of this path with every guard normalized.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self(
            self.0
                .iter()
                .map(|step| LevelStep {
                    field: step.field.clone(),
                    guard: step.guard.as_ref().map(normalize),
                })
                .collect(),
        )
    }

    /// Append a step.
    #[must_use]
    pub fn then(mut self, step: LevelStep) -> Self {
        self.0.push(step);
        self
    }

    ///
    /// Collect every node reached at the final level, level by level.
    ///
    /// The accumulator for level `n + 1` is folded from level `n` by
    /// concatenating each node's children in source order, which yields the
    /// same sequence as a depth-first walk.
    ///
    #[must_use]
    pub fn descend<'a>(&self, root: &'a Node) -> Vec<&'a Node> {
        self.descend_with_stats(root).0
    }

    /// Level-by-level descent that also reports traversal counters.
    #[must_use]
    pub fn descend_with_stats<'a>(&self, root: &'a Node) -> (Vec<&'a Node>, TraversalStats) {
        let mut stats = TraversalStats::default();

        let reached = self.0.iter().fold(vec![root], |level, step| {
            level.into_iter().fold(Vec::new(), |mut next, node| {
                match node.collection(&step.field) {
                    Some(children) => {
                        stats.visited = stats.visited.saturating_add(children.len() as u64);
                        next.extend(children.iter().filter(|child| step.admits(child)));
                    }
                    None => stats.pruned = stats.pruned.saturating_add(1),
                }
                next
            })
        });

        (reached, stats)
    }

    /// Single-pass recursive descent; yields the same sequence as `descend`.
    #[must_use]
    pub fn descend_depth_first<'a>(&self, root: &'a Node) -> Vec<&'a Node> {
        let mut out = Vec::new();
        walk(&self.0, root, &mut out);
        out
    }
}

fn walk<'a>(steps: &[LevelStep], node: &'a Node, out: &mut Vec<&'a Node>) {
    let Some((step, rest)) = steps.split_first() else {
        out.push(node);
        return;
    };

    for child in node.children(&step.field) {
        if step.admits(child) {
            walk(rest, child, out);
        }
    }
}

impl FromStr for LevelPath {
    type Err = PathError;

    /// Parse a dotted path such as `company.departments.teams.projects`.
    /// The empty string parses to the empty path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::default());
        }

        s.split('.')
            .enumerate()
            .map(|(position, segment)| {
                let segment = segment.trim();
                if segment.is_empty() {
                    Err(PathError::EmptySegment {
                        path: s.to_string(),
                        position,
                    })
                } else {
                    Ok(LevelStep::new(segment))
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for LevelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&step.field)?;
            if let Some(guard) = &step.guard {
                write!(f, "[{guard}]")?;
            }
        }
        Ok(())
    }
}
