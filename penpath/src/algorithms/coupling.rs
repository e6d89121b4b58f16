//! Continuity rules between the two handles of a node.
//!
//! Everything here is a pure function of positions so the rules can be
//! applied on every drag step and re-applied without drift.

use crate::config::EditConfig;
use crate::model::{LinkType, Point};

/// Position of the handle opposite `moved` so the pair obeys `link`.
///
/// Smooth keeps the sibling's own length, Symmetric mirrors `moved` through
/// the node. A handle dragged onto the node gives no direction, so a Smooth
/// sibling stays where it is.
pub fn couple_sibling(node: Point, moved: Point, sibling: Point, link: LinkType) -> Point {
    match link {
        LinkType::Corner => sibling,
        LinkType::Smooth => match (moved - node).normalized() {
            Some(u) => node - u * sibling.distance(node),
            None => sibling,
        },
        LinkType::Symmetric => node - (moved - node),
    }
}

/// Aligns a full handle pair to `link`, used when a node changes type.
///
/// `dir` is the unit direction of the outgoing (`next`) handle. `prev_len`
/// and `next_len` are the desired lengths; Symmetric uses the longer of the
/// two for both sides.
pub fn align_pair(
    node: Point,
    dir: Point,
    prev_len: Option<f64>,
    next_len: Option<f64>,
    link: LinkType,
) -> (Option<Point>, Option<Point>) {
    let (lp, ln) = match link {
        LinkType::Symmetric => {
            let l = match (prev_len, next_len) {
                (Some(a), Some(b)) => Some(a.max(b)),
                (a, b) => a.or(b),
            };
            (prev_len.and(l), next_len.and(l))
        }
        _ => (prev_len, next_len),
    };
    (lp.map(|l| node - dir * l), ln.map(|l| node + dir * l))
}

/// Link type implied by handle geometry alone, for outlines that carry no
/// node-type metadata. Collinear opposite handles are Smooth, and also equal
/// in length makes them Symmetric; anything else, including a node with fewer
/// than two handles, is a Corner.
pub fn derive_link_type(node: Point, prev: Option<Point>, next: Option<Point>, config: &EditConfig) -> LinkType {
    let (Some(a), Some(b)) = (prev, next) else {
        return LinkType::Corner;
    };
    let va = a - node;
    let vb = b - node;
    let la = va.length();
    let lb = vb.length();
    if la <= crate::geometry::tolerance::EPS_LEN || lb <= crate::geometry::tolerance::EPS_LEN {
        return LinkType::Corner;
    }
    let sin = va.cross(vb).abs() / (la * lb);
    if sin > config.collinear_tolerance || va.dot(vb) >= 0.0 {
        return LinkType::Corner;
    }
    if (la - lb).abs() <= config.length_tolerance * la.max(lb).max(1.0) {
        LinkType::Symmetric
    } else {
        LinkType::Smooth
    }
}

/// Whether a handle pair currently satisfies `link` within `tol`.
pub fn satisfies(node: Point, prev: Point, next: Point, link: LinkType, tol: f64) -> bool {
    let va = prev - node;
    let vb = next - node;
    let la = va.length();
    let lb = vb.length();
    match link {
        LinkType::Corner => true,
        _ if la <= tol || lb <= tol => link != LinkType::Symmetric || (la - lb).abs() <= tol,
        LinkType::Smooth => va.cross(vb).abs() <= tol * la * lb && va.dot(vb) < 0.0,
        LinkType::Symmetric => {
            va.cross(vb).abs() <= tol * la * lb && va.dot(vb) < 0.0 && (la - lb).abs() <= tol * la.max(lb).max(1.0)
        }
    }
}
