use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }

    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
        }
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector.
    pub fn normalized(self) -> Option<Point> {
        let len = self.length();
        if len > crate::geometry::tolerance::EPS_LEN {
            Some(Point::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// How the two handles of a node are coupled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    #[default]
    Corner = 0,
    Smooth = 1,
    Symmetric = 2,
}

impl LinkType {
    /// Integer code used by the node-type selector widget.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<LinkType> {
        match code {
            0 => Some(LinkType::Corner),
            1 => Some(LinkType::Smooth),
            2 => Some(LinkType::Symmetric),
            _ => None,
        }
    }
}

/// Which side of a node a handle sits on. `Prev` shapes the incoming segment,
/// `Next` the outgoing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Prev = 0,
    Next = 1,
}

impl Side {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Prev => Side::Next,
            Side::Next => Side::Prev,
        }
    }
}

/// Addresses a handle by its owning node and side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlPointRef {
    pub node: usize,
    pub side: Side,
}

impl ControlPointRef {
    pub fn new(node: usize, side: Side) -> Self {
        ControlPointRef { node, side }
    }
}

/// A bezier handle. Stored in absolute path coordinates inline in its node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub pos: Point,
    pub selected: bool,
    pub visible: bool,
}

impl ControlPoint {
    pub fn at(pos: Point) -> Self {
        ControlPoint {
            pos,
            selected: false,
            visible: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodePoint {
    pub pos: Point,
    pub link: LinkType,
    pub index: usize,
    pub prev_seg: Option<usize>,
    pub next_seg: Option<usize>,
    pub handles: [Option<ControlPoint>; 2],
    pub selected: bool,
}

impl NodePoint {
    pub fn new(pos: Point) -> Self {
        NodePoint {
            pos,
            link: LinkType::Corner,
            index: 0,
            prev_seg: None,
            next_seg: None,
            handles: [None, None],
            selected: false,
        }
    }

    #[inline]
    pub fn handle(&self, side: Side) -> Option<&ControlPoint> {
        self.handles[side.index()].as_ref()
    }

    #[inline]
    pub fn handle_pos(&self, side: Side) -> Option<Point> {
        self.handles[side.index()].map(|h| h.pos)
    }

    /// Sets (or clears) a handle position, keeping the selection flag.
    pub fn set_handle_pos(&mut self, side: Side, pos: Option<Point>) {
        let slot = &mut self.handles[side.index()];
        *slot = match (pos, slot.take()) {
            (Some(p), Some(mut h)) => {
                h.pos = p;
                Some(h)
            }
            (Some(p), None) => Some(ControlPoint::at(p)),
            (None, _) => None,
        };
    }

    pub fn handle_count(&self) -> usize {
        self.handles.iter().filter(|h| h.is_some()).count()
    }

    #[inline]
    pub fn segment(&self, side: Side) -> Option<usize> {
        match side {
            Side::Prev => self.prev_seg,
            Side::Next => self.next_seg,
        }
    }

    /// A corner whose handles are all absent or collapsed onto the node.
    pub fn is_sharp(&self) -> bool {
        use crate::geometry::tolerance::EPS_LEN;
        self.link == LinkType::Corner
            && self
                .handles
                .iter()
                .flatten()
                .all(|h| h.pos.distance(self.pos) <= EPS_LEN)
    }

    pub fn is_round(&self) -> bool {
        !self.is_sharp()
    }

    /// Endpoint of an open path (at most one adjacent segment).
    pub fn is_endpoint(&self) -> bool {
        self.prev_seg.is_none() || self.next_seg.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Line,
    Cubic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub start: usize,
    pub end: usize,
    pub index: usize,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

/// Node-type summary of the current selection, for the type selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeTypeSelection {
    None,
    Single(LinkType),
    Mixed,
}
