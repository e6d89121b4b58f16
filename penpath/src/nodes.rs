use crate::algorithms::coupling::align_pair;
use crate::change::{Change, ChangeRecord};
use crate::model::{LinkType, Point, Side};
use crate::PathGraph;

impl PathGraph {
    /// Translates a node; its handles move rigidly with it.
    pub fn move_node(&mut self, index: usize, dx: f64, dy: f64) -> ChangeRecord {
        let mut record = ChangeRecord::new();
        let delta = Point::new(dx, dy);
        if !delta.is_finite() {
            return record;
        }
        let Some(n) = self.nodes.get_mut(index) else {
            tracing::debug!(index, "move of a missing node ignored");
            return record;
        };
        let from = n.pos;
        n.pos = from + delta;
        record.push(Change::NodeMoved { node: index, from, to: n.pos });
        for side in [Side::Prev, Side::Next] {
            if let Some(h) = self.nodes[index].handle_pos(side) {
                self.set_handle_recorded(index, side, Some(h + delta), &mut record);
            }
        }
        self.init();
        record
    }

    pub fn move_node_abs(&mut self, index: usize, x: f64, y: f64) -> ChangeRecord {
        match self.nodes.get(index) {
            Some(n) => {
                let pos = n.pos;
                self.move_node(index, x - pos.x, y - pos.y)
            }
            None => ChangeRecord::new(),
        }
    }

    /// Moves every selected node by the same delta.
    pub fn move_selected(&mut self, dx: f64, dy: f64) -> ChangeRecord {
        let mut record = ChangeRecord::new();
        let selected: Vec<usize> = self.selected_pts.iter().copied().collect();
        for index in selected {
            record.merge(self.move_node(index, dx, dy));
        }
        record
    }

    /// Unit tangent through a node: the average of the incoming and outgoing
    /// segment directions at the node.
    pub(crate) fn tangent_direction(&self, index: usize) -> Option<Point> {
        let node = self.nodes.get(index)?;
        let incoming = node.prev_seg.and_then(|s| {
            let curve = self.segment_curve(s)?;
            curve
                .tangent(1.0)
                .normalized()
                .or_else(|| (curve.p3 - curve.p0).normalized())
        });
        let outgoing = node.next_seg.and_then(|s| {
            let curve = self.segment_curve(s)?;
            curve
                .tangent(0.0)
                .normalized()
                .or_else(|| (curve.p3 - curve.p0).normalized())
        });
        match (incoming, outgoing) {
            (Some(a), Some(b)) => (a + b).normalized().or(Some(b)),
            (a, b) => a.or(b),
        }
    }

    fn neighbor_distance(&self, index: usize, side: Side) -> Option<f64> {
        let node = self.nodes.get(index)?;
        let seg = self.segments.get(node.segment(side)?)?;
        let other = match side {
            Side::Prev => seg.start,
            Side::Next => seg.end,
        };
        Some(node.pos.distance(self.nodes.get(other)?.pos))
    }

    /// Changes a node's link type and brings its handles into line.
    ///
    /// Becoming Smooth or Symmetric synthesizes missing handles along the
    /// node tangent, keeps the incoming handle's direction and turns the
    /// outgoing one opposite to it. Symmetric also stretches the shorter
    /// handle to the longer one. Becoming Corner changes no geometry.
    pub fn set_node_type(&mut self, index: usize, link: LinkType) -> ChangeRecord {
        let mut record = ChangeRecord::new();
        let Some(node) = self.nodes.get(index) else {
            tracing::debug!(index, "node type change on a missing node ignored");
            return record;
        };
        let pos = node.pos;
        let prev = node.handle_pos(Side::Prev);
        let next = node.handle_pos(Side::Next);
        let (has_prev, has_next) = (node.prev_seg.is_some(), node.next_seg.is_some());
        self.set_link_recorded(index, link, &mut record);

        if link != LinkType::Corner {
            let dir = prev
                .and_then(|p| (pos - p).normalized())
                .or_else(|| next.and_then(|p| (p - pos).normalized()))
                .or_else(|| self.tangent_direction(index));
            if let Some(dir) = dir {
                let ratio = self.config.handle_ratio;
                let len = |h: Option<Point>, has_seg: bool, side: Side| -> Option<f64> {
                    if !has_seg {
                        return None;
                    }
                    match h {
                        Some(p) => Some(p.distance(pos)),
                        None => self.neighbor_distance(index, side).map(|d| d * ratio),
                    }
                };
                let prev_len = len(prev, has_prev, Side::Prev);
                let next_len = len(next, has_next, Side::Next);
                let (new_prev, new_next) = align_pair(pos, dir, prev_len, next_len, link);
                if new_prev.is_some() {
                    self.set_handle_recorded(index, Side::Prev, new_prev, &mut record);
                }
                if new_next.is_some() {
                    self.set_handle_recorded(index, Side::Next, new_next, &mut record);
                }
            }
        }
        self.init();
        record
    }

    /// Materializes handles on every side of the node that has a segment but
    /// no handle yet, a third of the way toward the neighbor, then re-applies
    /// the node's link type.
    pub fn create_control_points(&mut self, index: usize) -> ChangeRecord {
        let mut record = ChangeRecord::new();
        let Some(node) = self.nodes.get(index) else {
            tracing::debug!(index, "create control points on a missing node ignored");
            return record;
        };
        let pos = node.pos;
        let link = node.link;
        let ratio = self.config.handle_ratio;
        for side in [Side::Prev, Side::Next] {
            let node = &self.nodes[index];
            if node.handle(side).is_some() {
                continue;
            }
            let Some(seg) = node.segment(side).and_then(|s| self.segments.get(s)) else {
                continue;
            };
            let other = match side {
                Side::Prev => seg.start,
                Side::Next => seg.end,
            };
            let target = self.nodes[other].pos;
            self.set_handle_recorded(index, side, Some(pos + (target - pos) * ratio), &mut record);
        }
        self.init();
        if link != LinkType::Corner {
            record.merge(self.set_node_type(index, link));
        }
        record
    }

    /// Removes a node, joining its neighbors with one segment that keeps the
    /// neighbors' handles. Removing an open end shortens the path; a path
    /// left with fewer than two nodes collapses to empty.
    pub fn delete_node(&mut self, index: usize) -> ChangeRecord {
        self.delete_nodes(&[index])
    }

    pub fn delete_nodes(&mut self, indices: &[usize]) -> ChangeRecord {
        let mut record = ChangeRecord::new();
        let mut sorted: Vec<usize> = indices.iter().copied().filter(|i| *i < self.nodes.len()).collect();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        if sorted.is_empty() {
            tracing::debug!(?indices, "delete of missing nodes ignored");
            return record;
        }
        let before = self.snapshot();
        for index in sorted {
            self.nodes.remove(index);
            if self.closed && self.first_seg > index {
                self.first_seg -= 1;
            }
        }
        if self.nodes.len() < 2 {
            self.nodes.clear();
            self.closed = false;
        }
        self.clear_selection();
        self.init();
        tracing::debug!(remaining = self.nodes.len(), "nodes deleted");
        record.push(Change::Restructure { before, after: self.snapshot() });
        record
    }
}
