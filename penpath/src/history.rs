use crate::change::{ChangeRecord, HistoryEntry};
use crate::model::Point;
use crate::PathGraph;

/// Moves accumulated since `begin_drag`.
#[derive(Clone, Debug, Default)]
pub(crate) struct DragState {
    pub(crate) pending: ChangeRecord,
    pub(crate) delta: Point,
}

impl PathGraph {
    /// Regenerates the outline string and keeps it as the baseline for the
    /// next history entry.
    pub fn store_outline(&mut self) -> &str {
        self.last_outline = self.to_outline();
        &self.last_outline
    }

    /// Outline as of the last `store_outline` / `end_changes`.
    pub fn stored_outline(&self) -> &str {
        &self.last_outline
    }

    /// Opens a drag gesture. Subsequent `drag_by` calls are batched until
    /// `end_changes`.
    pub fn begin_drag(&mut self) {
        self.store_outline();
        self.drag = Some(DragState::default());
        tracing::trace!(selected = self.selected_pts.len(), "drag started");
    }

    /// Moves the selected handle, or the selected nodes when no handle is
    /// selected. Outside a gesture this is a single unbatched move.
    pub fn drag_by(&mut self, dx: f64, dy: f64) -> ChangeRecord {
        let record = match self.selected_ctrl {
            Some(cp) => self.move_control_point(cp, dx, dy),
            None => self.move_selected(dx, dy),
        };
        if let Some(drag) = self.drag.as_mut() {
            if !record.is_empty() {
                drag.delta = drag.delta + Point::new(dx, dy);
            }
            drag.pending.merge(record.clone());
        }
        record
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Total translation applied during the current gesture.
    pub fn drag_delta(&self) -> Point {
        self.drag.as_ref().map_or(Point::ZERO, |d| d.delta)
    }

    /// Abandons the current gesture, putting every dragged point back.
    pub fn cancel_drag(&mut self) -> bool {
        match self.drag.take() {
            Some(drag) => {
                drag.pending.revert(self);
                tracing::debug!("drag cancelled");
                true
            }
            None => false,
        }
    }

    /// Closes the current batch. The returned entry carries the outline
    /// before and after, and the coalesced record of the gesture if one was
    /// open.
    pub fn end_changes(&mut self, label: &str) -> HistoryEntry {
        let before = std::mem::take(&mut self.last_outline);
        let record = self.drag.take().map(|d| d.pending).unwrap_or_default();
        let after = self.store_outline().to_string();
        tracing::debug!(label, changes = record.len(), "changes committed");
        HistoryEntry { label: label.to_string(), before, after, record }
    }
}
