use crate::change::{Change, ChangeRecord};
use crate::error::EditError;
use crate::geometry::cubic::CubicBezier;
use crate::geometry::tolerance::{clamp01, EPS_DENOM, EPS_LEN, EPS_POS};
use crate::model::{ControlPointRef, LinkType, NodePoint, Point, SegmentKind, Side};
use crate::PathGraph;

impl PathGraph {
    /// Splits segment `index` at `interpolation` (measured from its start),
    /// inserting a node at `index + 1`.
    ///
    /// Lines get a Corner node on the chord. Cubics are split with de
    /// Casteljau so both halves trace the original curve exactly, and the
    /// new node is Smooth with the construction's inner points as handles.
    pub fn add_seg(&mut self, index: usize, interpolation: f64) -> Result<ChangeRecord, EditError> {
        if !(0.0..=1.0).contains(&interpolation) {
            return Err(EditError::InvalidParameter { param: "interpolation", got: interpolation });
        }
        let seg = *self
            .segments
            .get(index)
            .ok_or_else(|| EditError::segment(index, self.segments.len()))?;
        let before = self.snapshot();
        let t = interpolation;

        let new_node = match seg.kind {
            SegmentKind::Line => {
                let a = self.nodes[seg.start].pos;
                let b = self.nodes[seg.end].pos;
                NodePoint::new(a.lerp(b, t))
            }
            SegmentKind::Cubic => {
                let curve = self
                    .segment_curve(index)
                    .ok_or_else(|| EditError::segment(index, self.segments.len()))?;
                let (first, second) = curve.split_at(t);
                // Shortened handles keep their direction but no longer
                // mirror the far side, so Symmetric relaxes to Smooth.
                for (node, side, pos) in [(seg.start, Side::Next, first.p1), (seg.end, Side::Prev, second.p2)] {
                    let n = &mut self.nodes[node];
                    if n.handle(side).is_some() {
                        n.set_handle_pos(side, Some(pos));
                        if n.link == LinkType::Symmetric {
                            n.link = LinkType::Smooth;
                        }
                    }
                }
                let mut n = NodePoint::new(first.p3);
                n.link = LinkType::Smooth;
                n.set_handle_pos(Side::Prev, Some(first.p2));
                n.set_handle_pos(Side::Next, Some(second.p1));
                n
            }
        };

        self.nodes.insert(seg.start + 1, new_node);
        if self.closed && self.first_seg > index {
            self.first_seg += 1;
        }
        self.clear_selection();
        self.init();
        tracing::debug!(index, t, new_node = seg.start + 1, "segment split");
        let mut record = ChangeRecord::new();
        record.push(Change::Restructure { before, after: self.snapshot() });
        Ok(record)
    }

    /// Turns a cubic segment into a line by dropping the two handles that
    /// face it. The handles on the far side of each endpoint are kept.
    pub fn strip_curve_from_segment(&mut self, index: usize) -> ChangeRecord {
        let mut record = ChangeRecord::new();
        let Some(seg) = self.segments.get(index).copied() else {
            tracing::debug!(index, "strip curve on a missing segment ignored");
            return record;
        };
        if seg.kind == SegmentKind::Line {
            return record;
        }
        for cp in [ControlPointRef::new(seg.start, Side::Next), ControlPointRef::new(seg.end, Side::Prev)] {
            self.set_handle_recorded(cp.node, cp.side, None, &mut record);
            if self.selected_ctrl == Some(cp) {
                self.selected_ctrl = None;
            }
        }
        self.init();
        record
    }

    /// Drags the point at parameter `t` of a segment toward `target`.
    ///
    /// The two inner control points take a least-squares step weighted by
    /// their Bernstein influence at `t`; `stiffness` above 1 makes the end
    /// handle resist more. Lines are first promoted to cubics with handles
    /// at the thirds of the chord. Coupled siblings on both endpoints follow.
    pub fn bend_segment(&mut self, index: usize, t: f64, target: Point, stiffness: f64) -> ChangeRecord {
        let mut record = ChangeRecord::new();
        if !target.is_finite() || !t.is_finite() {
            return record;
        }
        let Some(seg) = self.segments.get(index).copied() else {
            tracing::debug!(index, "bend on a missing segment ignored");
            return record;
        };
        let a = self.nodes[seg.start].pos;
        let b = self.nodes[seg.end].pos;
        if a.distance(b) < EPS_LEN {
            return record; // no-op on zero-length
        }
        let t = clamp01(t);
        let curve = match seg.kind {
            SegmentKind::Cubic => match self.segment_curve(index) {
                Some(c) => c,
                None => return record,
            },
            SegmentKind::Line => CubicBezier::from_line(a, b),
        };
        let d = target - curve.eval(t);
        let c1 = 3.0 * (1.0 - t).powi(2) * t;
        let c2 = 3.0 * (1.0 - t) * t.powi(2);
        let l2 = stiffness.max(EPS_LEN);
        let denom = c1 * c1 + c2 * c2 / l2;
        if denom <= EPS_DENOM {
            return record;
        }
        let step = d * (1.0 / denom);
        let p1 = curve.p1 + step * c1;
        let p2 = curve.p2 + step * (c2 / l2);
        if p1.distance(curve.p1) <= EPS_POS && p2.distance(curve.p2) <= EPS_POS {
            return record;
        }
        let start = ControlPointRef::new(seg.start, Side::Next);
        let end = ControlPointRef::new(seg.end, Side::Prev);
        self.set_handle_recorded(start.node, start.side, Some(p1), &mut record);
        self.set_handle_recorded(end.node, end.side, Some(p2), &mut record);
        self.couple_from(start, &mut record);
        self.couple_from(end, &mut record);
        self.init();
        record
    }
}
