use crate::change::ChangeRecord;
use crate::model::{ControlPointRef, LinkType, NodeTypeSelection};
use crate::PathGraph;

impl PathGraph {
    // Drops selection entries that no longer resolve and mirrors the rest
    // onto the per-node and per-handle flags.
    pub(crate) fn sync_selection(&mut self) {
        let n = self.nodes.len();
        self.selected_pts.retain(|i| *i < n);
        if let Some(cp) = self.selected_ctrl {
            if self.control_point(cp).is_none() {
                self.selected_ctrl = None;
            }
        }
        let ctrl = self.selected_ctrl;
        for node in self.nodes.iter_mut() {
            node.selected = self.selected_pts.contains(&node.index);
            for (slot, h) in node.handles.iter_mut().enumerate() {
                if let Some(h) = h {
                    h.selected = ctrl.map_or(false, |cp| cp.node == node.index && cp.side.index() == slot);
                }
            }
        }
    }

    pub fn add_pts_to_selection(&mut self, indices: &[usize]) {
        let n = self.nodes.len();
        self.selected_pts.extend(indices.iter().copied().filter(|i| *i < n));
        self.selected_ctrl = None;
        self.sync_selection();
    }

    pub fn remove_pt_from_selection(&mut self, index: usize) {
        self.selected_pts.remove(&index);
        if self.selected_ctrl.map_or(false, |cp| cp.node == index) {
            self.selected_ctrl = None;
        }
        self.sync_selection();
    }

    pub fn clear_selection(&mut self) {
        self.selected_pts.clear();
        self.selected_ctrl = None;
        self.sync_selection();
    }

    /// Replaces the selection with a single node.
    pub fn select_pt(&mut self, index: usize) -> bool {
        if index >= self.nodes.len() {
            return false;
        }
        self.selected_pts.clear();
        self.selected_pts.insert(index);
        self.selected_ctrl = None;
        self.sync_selection();
        true
    }

    /// Selects one handle. Its node becomes the only selected node and any
    /// previously selected handle is released.
    pub fn select_control_point(&mut self, cp: ControlPointRef) -> bool {
        if self.control_point(cp).is_none() {
            return false;
        }
        self.selected_pts.clear();
        self.selected_pts.insert(cp.node);
        self.selected_ctrl = Some(cp);
        self.sync_selection();
        true
    }

    pub fn set_control_point_selected(&mut self, cp: ControlPointRef, selected: bool) -> bool {
        if selected {
            return self.select_control_point(cp);
        }
        if self.selected_ctrl == Some(cp) {
            self.selected_ctrl = None;
            self.sync_selection();
        }
        self.control_point(cp).is_some()
    }

    pub fn selected_points(&self) -> Vec<usize> {
        self.selected_pts.iter().copied().collect()
    }

    pub fn selected_control_point(&self) -> Option<ControlPointRef> {
        self.selected_ctrl
    }

    /// Link type shared by all selected nodes, for the type selector.
    pub fn selected_node_types(&self) -> NodeTypeSelection {
        let mut types = self.selected_pts.iter().filter_map(|i| self.nodes.get(*i)).map(|n| n.link);
        let Some(first) = types.next() else {
            return NodeTypeSelection::None;
        };
        if types.all(|t| t == first) {
            NodeTypeSelection::Single(first)
        } else {
            NodeTypeSelection::Mixed
        }
    }

    pub fn set_selected_node_type(&mut self, link: LinkType) -> ChangeRecord {
        let mut record = ChangeRecord::new();
        for index in self.selected_points() {
            record.merge(self.set_node_type(index, link));
        }
        record
    }

    /// Deletes the selected handle if there is one, otherwise every selected node.
    pub fn delete_selected(&mut self) -> ChangeRecord {
        if let Some(cp) = self.selected_ctrl {
            return self.delete_control_point(cp);
        }
        let selected = self.selected_points();
        if selected.is_empty() {
            return ChangeRecord::new();
        }
        self.delete_nodes(&selected)
    }
}
