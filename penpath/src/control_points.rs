use crate::algorithms::coupling::couple_sibling;
use crate::change::{Change, ChangeRecord};
use crate::geometry::tolerance::EPS_LEN;
use crate::model::{ControlPointRef, LinkType, Point, Side};
use crate::PathGraph;

impl PathGraph {
    // Low-level setters that log into a record. They skip sub-epsilon moves so
    // re-enforcing an already consistent pair yields no entries.
    pub(crate) fn set_handle_recorded(
        &mut self,
        node: usize,
        side: Side,
        to: Option<Point>,
        record: &mut ChangeRecord,
    ) {
        let Some(n) = self.nodes.get_mut(node) else { return };
        let from = n.handle_pos(side);
        let unchanged = match (from, to) {
            (Some(a), Some(b)) => a.distance(b) <= EPS_LEN,
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }
        n.set_handle_pos(side, to);
        record.push(Change::HandleSet { node, side, from, to });
    }

    pub(crate) fn set_link_recorded(&mut self, node: usize, to: LinkType, record: &mut ChangeRecord) {
        let Some(n) = self.nodes.get_mut(node) else { return };
        let from = n.link;
        n.link = to;
        record.push(Change::LinkTypeSet { node, from, to });
    }

    /// Translates a handle by a delta, re-coupling its sibling.
    pub fn move_control_point(&mut self, cp: ControlPointRef, dx: f64, dy: f64) -> ChangeRecord {
        match self.control_point(cp) {
            Some(h) => {
                let target = h.pos + Point::new(dx, dy);
                self.move_control_point_abs(cp, target.x, target.y)
            }
            None => {
                tracing::debug!(node = cp.node, side = ?cp.side, "move of a missing control point ignored");
                ChangeRecord::new()
            }
        }
    }

    /// Moves a handle to an absolute position. For Smooth and Symmetric nodes
    /// the opposite handle is recomputed and included in the record.
    pub fn move_control_point_abs(&mut self, cp: ControlPointRef, x: f64, y: f64) -> ChangeRecord {
        let mut record = ChangeRecord::new();
        let target = Point::new(x, y);
        if !target.is_finite() || self.control_point(cp).is_none() {
            tracing::debug!(node = cp.node, side = ?cp.side, "control point move rejected");
            return record;
        }
        self.set_handle_recorded(cp.node, cp.side, Some(target), &mut record);
        self.couple_from(cp, &mut record);
        self.init();
        record
    }

    /// Re-applies the link-type rule to the sibling of `cp`.
    pub(crate) fn couple_from(&mut self, cp: ControlPointRef, record: &mut ChangeRecord) {
        let Some(n) = self.nodes.get(cp.node) else { return };
        if n.link == LinkType::Corner {
            return;
        }
        let other = cp.side.opposite();
        let (Some(moved), Some(sibling)) = (n.handle_pos(cp.side), n.handle_pos(other)) else {
            return;
        };
        let coupled = couple_sibling(n.pos, moved, sibling, n.link);
        tracing::trace!(node = cp.node, ?coupled, "sibling handle recoupled");
        self.set_handle_recorded(cp.node, other, Some(coupled), record);
    }

    /// Detaches a handle from its node. The node falls back to Corner since
    /// a lone handle has nothing to couple with.
    pub fn delete_control_point(&mut self, cp: ControlPointRef) -> ChangeRecord {
        let mut record = ChangeRecord::new();
        if self.control_point(cp).is_none() {
            tracing::debug!(node = cp.node, side = ?cp.side, "delete of a missing control point ignored");
            return record;
        }
        self.remove_from_node_point(cp, &mut record);
        if self.selected_ctrl == Some(cp) {
            self.selected_ctrl = None;
        }
        self.init();
        record
    }

    pub(crate) fn remove_from_node_point(&mut self, cp: ControlPointRef, record: &mut ChangeRecord) {
        self.set_handle_recorded(cp.node, cp.side, None, record);
        if self.nodes.get(cp.node).map_or(false, |n| n.link != LinkType::Corner) {
            self.set_link_recorded(cp.node, LinkType::Corner, record);
        }
    }

    pub fn move_selected_control_point(&mut self, dx: f64, dy: f64) -> ChangeRecord {
        match self.selected_ctrl {
            Some(cp) => self.move_control_point(cp, dx, dy),
            None => ChangeRecord::new(),
        }
    }
}
