use crate::change::{Change, ChangeRecord, PathSnapshot};
use crate::error::EditError;
use crate::model::{LinkType, NodePoint, Side};
use crate::PathGraph;

/// Result of a connect or disconnect.
#[derive(Clone, Debug)]
pub struct TopologyOutcome {
    /// Index of the merged node, or of the cut node's second copy.
    pub index: usize,
    pub record: ChangeRecord,
    /// Second half of an open path split by `disconnect_node`.
    pub detached: Option<PathGraph>,
    /// State of the other path before `connect_paths` drained it.
    pub absorbed: Option<PathSnapshot>,
}

impl TopologyOutcome {
    fn new(index: usize, record: ChangeRecord) -> Self {
        TopologyOutcome { index, record, detached: None, absorbed: None }
    }
}

impl PathGraph {
    fn restructured(&mut self, before: PathSnapshot) -> ChangeRecord {
        self.clear_selection();
        self.init();
        let mut record = ChangeRecord::new();
        record.push(Change::Restructure { before, after: self.snapshot() });
        record
    }

    fn reverse_in_place(&mut self) {
        self.nodes.reverse();
        for n in self.nodes.iter_mut() {
            n.handles.swap(Side::Prev.index(), Side::Next.index());
        }
        if self.closed && !self.nodes.is_empty() {
            // keep node 0 first, and start traversal on the same node
            let n = self.nodes.len();
            self.nodes.rotate_right(1);
            self.first_seg = (n - self.first_seg % n) % n;
        }
    }

    /// Reverses traversal direction. Handles swap sides so the geometry is
    /// unchanged.
    pub fn reverse(&mut self) -> ChangeRecord {
        if self.nodes.len() < 2 {
            return ChangeRecord::new();
        }
        let before = self.snapshot();
        self.reverse_in_place();
        self.restructured(before)
    }

    /// Joins the two ends of this open path, closing it.
    ///
    /// Ends that already coincide are fused into one node that keeps the
    /// incoming handle of the old last node.
    pub fn connect_nodes(&mut self, index1: usize, index2: usize) -> Result<TopologyOutcome, EditError> {
        let n = self.nodes.len();
        for i in [index1, index2] {
            if i >= n {
                return Err(EditError::node(i, n));
            }
        }
        if self.closed {
            return Err(EditError::InvalidTopology("path is already closed"));
        }
        if n < 2 || index1 == index2 {
            return Err(EditError::InvalidTopology("connect needs two distinct nodes"));
        }
        let (lo, hi) = (index1.min(index2), index1.max(index2));
        if lo != 0 || hi != n - 1 {
            return Err(EditError::InvalidTopology("only path endpoints can be connected"));
        }
        let before = self.snapshot();
        let first = self.nodes[0].pos;
        let last = self.nodes[n - 1].pos;
        if n >= 3 && first.distance(last) <= self.config.coincide_tolerance {
            let incoming = self.nodes[n - 1].handle_pos(Side::Prev);
            self.nodes.pop();
            let head = &mut self.nodes[0];
            head.set_handle_pos(Side::Prev, incoming);
            head.link = LinkType::Corner;
        }
        self.closed = true;
        let record = self.restructured(before);
        tracing::debug!(nodes = self.nodes.len(), "path closed");
        Ok(TopologyOutcome::new(0, record))
    }

    /// Appends `other` to this path by joining endpoint `index1` here to
    /// endpoint `index2` there. Both paths are reoriented as needed. All of
    /// `other`'s nodes move into `self`, leaving `other` empty.
    ///
    /// The returned index is the node at the junction.
    pub fn connect_paths(
        &mut self,
        index1: usize,
        other: &mut PathGraph,
        index2: usize,
    ) -> Result<TopologyOutcome, EditError> {
        let (n1, n2) = (self.nodes.len(), other.nodes.len());
        if index1 >= n1 {
            return Err(EditError::node(index1, n1));
        }
        if index2 >= n2 {
            return Err(EditError::node(index2, n2));
        }
        if self.closed || other.closed {
            return Err(EditError::InvalidTopology("closed paths have no endpoints"));
        }
        let is_end = |i: usize, len: usize| i == 0 || i + 1 == len;
        if !is_end(index1, n1) || !is_end(index2, n2) {
            return Err(EditError::InvalidTopology("only path endpoints can be connected"));
        }

        let before = self.snapshot();
        let absorbed = other.snapshot();
        if n1 > 1 && index1 == 0 {
            self.reverse_in_place();
        }
        if n2 > 1 && index2 != 0 {
            other.reverse_in_place();
        }
        let mut incoming: Vec<NodePoint> = std::mem::take(&mut other.nodes);
        other.clear_selection();
        other.init();

        let junction = self.nodes.len() - 1;
        let tail = self.nodes[junction].pos;
        if tail.distance(incoming[0].pos) <= self.config.coincide_tolerance {
            let head = incoming.remove(0);
            let t = &mut self.nodes[junction];
            t.set_handle_pos(Side::Next, head.handle_pos(Side::Next));
            t.link = LinkType::Corner;
        }
        self.nodes.extend(incoming);
        let record = self.restructured(before);
        tracing::debug!(junction, nodes = self.nodes.len(), "paths joined");
        let mut outcome = TopologyOutcome::new(junction, record);
        outcome.absorbed = Some(absorbed);
        Ok(outcome)
    }

    /// Cuts the path at a node.
    ///
    /// A closed path opens there: the node is duplicated so the path starts
    /// and ends on it, the first copy keeping the outgoing handle and the
    /// last the incoming one. An open path splits in two at an interior node;
    /// the tail half comes back in `detached`.
    pub fn disconnect_node(&mut self, index: usize) -> Result<TopologyOutcome, EditError> {
        let n = self.nodes.len();
        if index >= n {
            return Err(EditError::node(index, n));
        }
        let before = self.snapshot();

        if self.closed {
            self.nodes.rotate_left(index);
            let mut tail = self.nodes[0].clone();
            tail.set_handle_pos(Side::Next, None);
            tail.link = LinkType::Corner;
            let head = &mut self.nodes[0];
            head.set_handle_pos(Side::Prev, None);
            head.link = LinkType::Corner;
            self.nodes.push(tail);
            self.closed = false;
            let record = self.restructured(before);
            tracing::debug!(index, "closed path opened");
            return Ok(TopologyOutcome::new(n, record));
        }

        if index == 0 || index + 1 == n {
            return Err(EditError::InvalidTopology("cannot split an open path at its endpoint"));
        }
        let mut rest = self.nodes.split_off(index);
        let mut cut = rest[0].clone();
        cut.set_handle_pos(Side::Next, None);
        cut.link = LinkType::Corner;
        self.nodes.push(cut);
        rest[0].set_handle_pos(Side::Prev, None);
        rest[0].link = LinkType::Corner;

        let mut detached = PathGraph::with_config(self.config);
        detached.nodes = rest;
        detached.matrix = self.matrix;
        detached.init();
        detached.store_outline();

        let record = self.restructured(before);
        tracing::debug!(index, detached = detached.node_count(), "open path split");
        let mut outcome = TopologyOutcome::new(index, record);
        outcome.detached = Some(detached);
        Ok(outcome)
    }

    /// Picks the segment where traversal and serialization of a closed path
    /// begin. Open paths always start at segment 0.
    pub fn set_first_segment(&mut self, index: usize) -> Result<ChangeRecord, EditError> {
        if index >= self.segments.len() {
            return Err(EditError::segment(index, self.segments.len()));
        }
        if !self.closed {
            return Err(EditError::InvalidTopology("open paths start at their first node"));
        }
        let before = self.snapshot();
        self.first_seg = index;
        let mut record = ChangeRecord::new();
        record.push(Change::Restructure { before, after: self.snapshot() });
        Ok(record)
    }
}
