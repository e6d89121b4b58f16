use crate::geometry::math::{cubic_distance_sq, seg_distance_sq};
use crate::geometry::tolerance::clamp01;
use crate::model::{Point, SegmentKind};
use crate::{PathGraph, Pick};

/// Nearest node within `tol`, else the nearest visible handle of a selected
/// node, else the nearest segment (with the parameter of the closest point).
pub fn pick_impl(g: &PathGraph, p: Point, tol: f64) -> Option<Pick> {
    let tol2 = tol * tol;
    // Nodes first
    let mut best_node: Option<(usize, f64)> = None;
    for n in g.nodes.iter() {
        let d = n.pos - p;
        let d2 = d.dot(d);
        if d2 <= tol2 && best_node.map_or(true, |(_, bd)| d2 < bd) {
            best_node = Some((n.index, d2));
        }
    }
    if let Some((index, d2)) = best_node {
        return Some(Pick::Node { index, dist: d2.sqrt() });
    }
    // Handles, only where the overlay shows them
    let mut best_handle: Option<(usize, crate::Side, f64)> = None;
    for n in g.nodes.iter().filter(|n| n.selected) {
        for side in [crate::Side::Prev, crate::Side::Next] {
            let Some(h) = n.handle(side) else { continue };
            if !h.visible {
                continue;
            }
            let d = h.pos - p;
            let d2 = d.dot(d);
            if d2 <= tol2 && best_handle.map_or(true, |(_, _, bd)| d2 < bd) {
                best_handle = Some((n.index, side, d2));
            }
        }
    }
    if let Some((node, side, d2)) = best_handle {
        return Some(Pick::Handle { node, side, dist: d2.sqrt() });
    }
    // Segments
    let mut best_seg: Option<(usize, f64, f64)> = None;
    for seg in g.segments.iter() {
        let (d2, t) = match seg.kind {
            SegmentKind::Line => {
                let a = g.nodes[seg.start].pos;
                let b = g.nodes[seg.end].pos;
                seg_distance_sq(p, a, b)
            }
            SegmentKind::Cubic => match g.segment_curve(seg.index) {
                Some(curve) => {
                    let (d2, t) = cubic_distance_sq(p, &curve);
                    (d2, clamp01(t))
                }
                None => continue,
            },
        };
        if d2 <= tol2 && best_seg.map_or(true, |(_, bd, _)| d2 < bd) {
            best_seg = Some((seg.index, d2, t));
        }
    }
    best_seg.map(|(index, d2, t)| Pick::Segment { index, t, dist: d2.sqrt() })
}
