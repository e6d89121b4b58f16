use crate::model::Point;
use serde::{Deserialize, Serialize};

/// 2D affine matrix in `[a c e; b d f]` column order, mapping path-local
/// coordinates to display coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Transform { a, b, c, d, e, f }
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Transform { e: tx, f: ty, ..Self::IDENTITY }
    }

    pub fn scale(s: f64) -> Self {
        Transform { a: s, d: s, ..Self::IDENTITY }
    }

    pub fn rotate(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Transform { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 }
    }

    /// `self` followed by `other`.
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            a: other.a * self.a + other.c * self.b,
            b: other.b * self.a + other.d * self.b,
            c: other.a * self.c + other.c * self.d,
            d: other.b * self.c + other.d * self.d,
            e: other.a * self.e + other.c * self.f + other.e,
            f: other.b * self.e + other.d * self.f + other.f,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    pub fn inverse(&self) -> Option<Transform> {
        let det = self.determinant();
        if det.abs() <= super::tolerance::EPS_DENOM || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Transform {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_round_trips() {
        let m = Transform::rotate(0.7).then(&Transform::scale(2.5)).then(&Transform::translate(10.0, -4.0));
        let inv = m.inverse().expect("invertible");
        let p = Point::new(3.0, 7.0);
        let q = inv.apply(m.apply(p));
        assert!(p.distance(q) < 1e-9);
    }

    #[test]
    fn singular_has_no_inverse() {
        assert!(Transform::scale(0.0).inverse().is_none());
    }

    #[test]
    fn composition_order() {
        let m = Transform::scale(2.0).then(&Transform::translate(1.0, 0.0));
        assert_eq!(m.apply(Point::new(1.0, 1.0)), Point::new(3.0, 2.0));
    }
}
