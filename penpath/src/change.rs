//! Geometric deltas returned by every mutating call, consumed by the history layer.

use crate::model::{LinkType, Point, Side};
use crate::PathGraph;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeState {
    pub x: f64,
    pub y: f64,
    pub link: LinkType,
    pub prev_handle: Option<Point>,
    pub next_handle: Option<Point>,
}

/// Full structural state of a path, used for edits that renumber nodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSnapshot {
    pub nodes: Vec<NodeState>,
    pub closed: bool,
    pub first_seg: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    NodeMoved {
        node: usize,
        from: Point,
        to: Point,
    },
    HandleSet {
        node: usize,
        side: Side,
        from: Option<Point>,
        to: Option<Point>,
    },
    LinkTypeSet {
        node: usize,
        from: LinkType,
        to: LinkType,
    },
    Restructure {
        before: PathSnapshot,
        after: PathSnapshot,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub changes: Vec<Change>,
}

impl ChangeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub(crate) fn push(&mut self, change: Change) {
        let noop = match &change {
            Change::NodeMoved { from, to, .. } => from == to,
            Change::HandleSet { from, to, .. } => from == to,
            Change::LinkTypeSet { from, to, .. } => from == to,
            Change::Restructure { before, after } => before == after,
        };
        if !noop {
            self.changes.push(change);
        }
    }

    /// Appends `other`, coalescing consecutive moves of the same node or handle
    /// so a whole drag gesture collapses to one entry per point.
    pub fn merge(&mut self, other: ChangeRecord) {
        for change in other.changes {
            if !self.coalesce(&change) {
                self.changes.push(change);
            }
        }
    }

    // Folds `change` into an earlier entry for the same point. Never looks
    // past a restructure, since node indices may differ on either side of it.
    fn coalesce(&mut self, change: &Change) -> bool {
        for prev in self.changes.iter_mut().rev() {
            match (prev, change) {
                (Change::Restructure { .. }, _) => return false,
                (Change::NodeMoved { node: a, to, .. }, Change::NodeMoved { node: b, to: new_to, .. })
                    if a == b =>
                {
                    *to = *new_to;
                    return true;
                }
                (
                    Change::HandleSet { node: a, side: sa, to, .. },
                    Change::HandleSet { node: b, side: sb, to: new_to, .. },
                ) if a == b && sa == sb => {
                    *to = *new_to;
                    return true;
                }
                _ => {}
            }
        }
        false
    }

    /// Re-applies the edit (redo).
    pub fn apply(&self, graph: &mut PathGraph) {
        for change in &self.changes {
            apply_one(graph, change, false);
        }
        graph.init();
    }

    /// Reverses the edit (undo).
    pub fn revert(&self, graph: &mut PathGraph) {
        for change in self.changes.iter().rev() {
            apply_one(graph, change, true);
        }
        graph.init();
    }
}

fn apply_one(graph: &mut PathGraph, change: &Change, backwards: bool) {
    match change {
        Change::NodeMoved { node, from, to } => {
            let target = if backwards { *from } else { *to };
            match graph.nodes.get_mut(*node) {
                Some(n) => n.pos = target,
                None => tracing::warn!(node, "change record references a missing node"),
            }
        }
        Change::HandleSet { node, side, from, to } => {
            let target = if backwards { *from } else { *to };
            match graph.nodes.get_mut(*node) {
                Some(n) => n.set_handle_pos(*side, target),
                None => tracing::warn!(node, "change record references a missing node"),
            }
        }
        Change::LinkTypeSet { node, from, to } => {
            let target = if backwards { *from } else { *to };
            match graph.nodes.get_mut(*node) {
                Some(n) => n.link = target,
                None => tracing::warn!(node, "change record references a missing node"),
            }
        }
        Change::Restructure { before, after } => {
            graph.restore(if backwards { before } else { after });
        }
    }
}

/// One undoable step handed to the history layer by `end_changes`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub label: String,
    pub before: String,
    pub after: String,
    pub record: ChangeRecord,
}

impl HistoryEntry {
    pub fn is_noop(&self) -> bool {
        self.before == self.after && self.record.is_empty()
    }
}
