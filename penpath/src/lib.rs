pub mod change;
pub mod config;
pub mod error;
pub mod model;
pub mod geometry {
    pub mod cubic;
    pub mod limits;
    pub mod math;
    pub mod tolerance;
    pub mod transform;
}
pub mod algorithms {
    pub mod coupling;
    pub mod picking;
}
mod control_points;
mod history;
mod json;
mod nodes;
mod outline;
mod segments;
mod selection;
mod topology;

pub use change::{Change, ChangeRecord, HistoryEntry, NodeState, PathSnapshot};
pub use config::EditConfig;
pub use error::{EditError, OutlineError};
pub use geometry::cubic::CubicBezier;
pub use geometry::transform::Transform;
pub use model::{
    ControlPoint, ControlPointRef, LinkType, NodePoint, NodeTypeSelection, Point, Segment,
    SegmentKind, Side,
};
pub use outline::parse_outline;
pub use topology::TopologyOutcome;

use history::DragState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Pick {
    #[serde(rename = "node")]
    Node { index: usize, dist: f64 },
    #[serde(rename = "handle")]
    Handle { node: usize, side: Side, dist: f64 },
    #[serde(rename = "segment")]
    Segment { index: usize, t: f64, dist: f64 },
}

/// Editable anchor/handle graph of a single path.
///
/// Nodes are stored in traversal order; segment `i` runs from node `i` to
/// node `i + 1` (wrapping to node 0 for the closing segment of a closed
/// path). Segments, indices and back-links are derived state rebuilt by
/// [`PathGraph::init`], which every mutating call runs before returning.
#[derive(Clone, Debug)]
pub struct PathGraph {
    pub(crate) nodes: Vec<NodePoint>,
    pub(crate) segments: Vec<Segment>,
    pub(crate) closed: bool,
    pub(crate) first_seg: usize,
    pub(crate) selected_pts: BTreeSet<usize>,
    pub(crate) selected_ctrl: Option<ControlPointRef>,
    pub(crate) drag: Option<DragState>,
    pub(crate) matrix: Option<Transform>,
    pub(crate) visible: bool,
    pub(crate) last_outline: String,
    pub(crate) config: EditConfig,
}

impl Default for PathGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl PathGraph {
    pub fn new() -> Self {
        Self::with_config(EditConfig::default())
    }

    pub fn with_config(config: EditConfig) -> Self {
        PathGraph {
            nodes: Vec::new(),
            segments: Vec::new(),
            closed: false,
            first_seg: 0,
            selected_pts: BTreeSet::new(),
            selected_ctrl: None,
            drag: None,
            matrix: None,
            visible: true,
            last_outline: String::new(),
            config,
        }
    }

    /// Straight-edged path through `points`.
    pub fn from_points(points: &[Point], closed: bool) -> Self {
        let mut g = Self::new();
        g.nodes = points.iter().map(|p| NodePoint::new(*p)).collect();
        g.closed = closed;
        g.init();
        g.store_outline();
        g
    }

    pub fn from_snapshot(snapshot: &PathSnapshot) -> Self {
        let mut g = Self::new();
        g.restore(snapshot);
        g.store_outline();
        g
    }

    /// Recomputes derived state: node indices, segment list and links,
    /// handle visibility and selection flags. Handles facing a missing
    /// segment (open-path ends) are dropped.
    pub fn init(&mut self) -> &mut Self {
        let n = self.nodes.len();
        if n < 2 {
            self.closed = false;
        }
        let seg_count = match n {
            0 | 1 => 0,
            _ if self.closed => n,
            _ => n - 1,
        };
        let closed = self.closed;
        for (i, node) in self.nodes.iter_mut().enumerate() {
            node.index = i;
            node.prev_seg = if closed { Some((i + n - 1) % n) } else { i.checked_sub(1) };
            node.next_seg = if i < seg_count { Some(i) } else { None };
            if node.prev_seg.is_none() {
                node.handles[Side::Prev.index()] = None;
            }
            if node.next_seg.is_none() {
                node.handles[Side::Next.index()] = None;
            }
            let (pos, link) = (node.pos, node.link);
            for h in node.handles.iter_mut().flatten() {
                let degenerate = h.pos.distance(pos) <= geometry::tolerance::EPS_LEN;
                h.visible = !(link == LinkType::Corner && degenerate);
            }
        }

        self.segments.clear();
        for i in 0..seg_count {
            let end = (i + 1) % n;
            let curved = self.nodes[i].handles[Side::Next.index()].is_some()
                || self.nodes[end].handles[Side::Prev.index()].is_some();
            self.segments.push(Segment {
                kind: if curved { SegmentKind::Cubic } else { SegmentKind::Line },
                start: i,
                end,
                index: i,
                prev: if closed { Some((i + seg_count - 1) % seg_count) } else { i.checked_sub(1) },
                next: if closed {
                    Some((i + 1) % seg_count)
                } else if i + 1 < seg_count {
                    Some(i + 1)
                } else {
                    None
                },
            });
        }

        if !self.closed || self.first_seg >= seg_count {
            self.first_seg = 0;
        }
        self.sync_selection();
        self
    }

    pub fn snapshot(&self) -> PathSnapshot {
        PathSnapshot {
            nodes: self
                .nodes
                .iter()
                .map(|n| NodeState {
                    x: n.pos.x,
                    y: n.pos.y,
                    link: n.link,
                    prev_handle: n.handle_pos(Side::Prev),
                    next_handle: n.handle_pos(Side::Next),
                })
                .collect(),
            closed: self.closed,
            first_seg: self.first_seg,
        }
    }

    /// Replaces the whole geometry. Selection does not survive, since node
    /// indices may now refer to different anchors.
    pub(crate) fn restore(&mut self, snapshot: &PathSnapshot) {
        self.nodes = snapshot
            .nodes
            .iter()
            .map(|s| {
                let mut n = NodePoint::new(Point::new(s.x, s.y));
                n.link = s.link;
                n.set_handle_pos(Side::Prev, s.prev_handle);
                n.set_handle_pos(Side::Next, s.next_handle);
                n
            })
            .collect();
        self.closed = snapshot.closed;
        self.first_seg = snapshot.first_seg;
        self.selected_pts.clear();
        self.selected_ctrl = None;
        self.init();
    }

    // Accessors
    pub fn nodes(&self) -> &[NodePoint] {
        &self.nodes
    }
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
    pub fn node(&self, index: usize) -> Option<&NodePoint> {
        self.nodes.get(index)
    }
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
    pub fn is_closed(&self) -> bool {
        self.closed
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn first_segment(&self) -> usize {
        self.first_seg
    }
    pub fn config(&self) -> &EditConfig {
        &self.config
    }
    pub fn set_config(&mut self, config: EditConfig) {
        self.config = config;
    }

    pub fn control_point(&self, cp: ControlPointRef) -> Option<&ControlPoint> {
        self.nodes.get(cp.node).and_then(|n| n.handle(cp.side))
    }

    /// The segment as a four-point cubic; absent handles collapse onto their node.
    pub fn segment_curve(&self, index: usize) -> Option<CubicBezier> {
        let seg = self.segments.get(index)?;
        let a = self.nodes.get(seg.start)?;
        let b = self.nodes.get(seg.end)?;
        Some(CubicBezier::new(
            a.pos,
            a.handle_pos(Side::Next).unwrap_or(a.pos),
            b.handle_pos(Side::Prev).unwrap_or(b.pos),
            b.pos,
        ))
    }

    // Display
    pub fn transform(&self) -> Option<Transform> {
        self.matrix
    }
    pub fn set_transform(&mut self, matrix: Option<Transform>) {
        self.matrix = matrix;
    }
    pub fn to_display(&self, p: Point) -> Point {
        match &self.matrix {
            Some(m) => m.apply(p),
            None => p,
        }
    }
    /// Maps a display-space point back to path coordinates. A singular
    /// transform leaves the point unchanged.
    pub fn from_display(&self, p: Point) -> Point {
        match self.matrix.as_ref().and_then(|m| m.inverse()) {
            Some(inv) => inv.apply(p),
            None => p,
        }
    }
    pub fn get_display_position(&self, index: usize) -> Option<Point> {
        self.nodes.get(index).map(|n| self.to_display(n.pos))
    }
    pub fn is_visible(&self) -> bool {
        self.visible
    }
    /// Toggles visibility of the edit overlay; geometry and selection are kept.
    pub fn show(&mut self, display: bool) -> &mut Self {
        self.visible = display;
        self
    }

    // Picking
    pub fn pick(&self, p: Point, tol: f64) -> Option<Pick> {
        algorithms::picking::pick_impl(self, p, tol)
    }
    pub fn pick_display(&self, p: Point, tol: f64) -> Option<Pick> {
        let local = self.from_display(p);
        // tolerance is given in display units
        let scale = self
            .matrix
            .map(|m| m.determinant().abs().sqrt())
            .filter(|s| *s > geometry::tolerance::EPS_DENOM)
            .unwrap_or(1.0);
        algorithms::picking::pick_impl(self, local, tol / scale)
    }
}
