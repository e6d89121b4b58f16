use crate::model::Point;
use super::cubic::CubicBezier;
use super::tolerance::EPS_POS;

/// Squared distance from `p` to the segment `a..b` and the clamped projection parameter.
pub fn seg_distance_sq(p: Point, a: Point, b: Point) -> (f64, f64) {
    let v = b - a;
    let w = p - a;
    let vv = v.dot(v);
    let mut t = if vv > 0.0 { w.dot(v) / vv } else { 0.0 };
    if t < 0.0 { t = 0.0; } else if t > 1.0 { t = 1.0; }
    let proj = a + v * t;
    let d = p - proj;
    (d.dot(d), t)
}

pub fn cubic_distance_sq(p: Point, curve: &CubicBezier) -> (f64, f64) {
    // Degenerate: all control points coincident
    if curve.p0.distance(curve.p1) <= EPS_POS
        && curve.p1.distance(curve.p2) <= EPS_POS
        && curve.p2.distance(curve.p3) <= EPS_POS
    {
        let d = p - curve.p0;
        return (d.dot(d), 0.0);
    }
    let mut best_d2 = f64::INFINITY;
    let mut best_t = 0.0;
    let n = 32;
    for i in 0..=n {
        let t = i as f64 / n as f64;
        let d = p - curve.eval(t);
        let d2 = d.dot(d);
        if d2 < best_d2 { best_d2 = d2; best_t = t; }
    }
    // Refine around the coarse hit
    let mut lo = (best_t - 1.0 / n as f64).max(0.0);
    let mut hi = (best_t + 1.0 / n as f64).min(1.0);
    for _ in 0..24 {
        let m1 = lo + (hi - lo) / 3.0;
        let m2 = hi - (hi - lo) / 3.0;
        let d1 = p - curve.eval(m1);
        let d2 = p - curve.eval(m2);
        if d1.dot(d1) < d2.dot(d2) { hi = m2; } else { lo = m1; }
    }
    let t = 0.5 * (lo + hi);
    let d = p - curve.eval(t);
    if d.dot(d) < best_d2 { (d.dot(d), t) } else { (best_d2, best_t) }
}
