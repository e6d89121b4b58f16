use crate::algorithms::coupling::derive_link_type;
use crate::config::EditConfig;
use crate::error::OutlineError;
use crate::geometry::cubic::CubicBezier;
use crate::geometry::limits;
use crate::geometry::tolerance::EPS_POS;
use crate::model::{NodePoint, Point, SegmentKind, Side};
use crate::PathGraph;
use std::fmt::Write;

impl PathGraph {
    /// Serializes the path as an outline string, starting at the first
    /// segment. Closed paths spell out their closing segment before `Z` so
    /// curved closings survive.
    pub fn to_outline(&self) -> String {
        let Some(first) = self.nodes.first() else {
            return String::new();
        };
        let start = match self.segments.get(self.first_seg) {
            Some(seg) if self.closed => &self.nodes[seg.start],
            _ => first,
        };
        let mut d = format!("M {} {}", start.pos.x, start.pos.y);
        let count = self.segments.len();
        for k in 0..count {
            let index = (self.first_seg + k) % count;
            let seg = &self.segments[index];
            let end = self.nodes[seg.end].pos;
            // write! into a String cannot fail
            let _ = match (seg.kind, self.segment_curve(index)) {
                (SegmentKind::Cubic, Some(c)) => {
                    write!(d, " C {} {} {} {} {} {}", c.p1.x, c.p1.y, c.p2.x, c.p2.y, end.x, end.y)
                }
                _ => write!(d, " L {} {}", end.x, end.y),
            };
        }
        if self.closed {
            d.push_str(" Z");
        }
        d
    }

    /// Loads a single-subpath outline. Link types are guessed from handle
    /// geometry since the outline does not carry them.
    pub fn from_outline(d: &str) -> Result<PathGraph, OutlineError> {
        Self::from_outline_with_config(d, EditConfig::default())
    }

    pub fn from_outline_with_config(d: &str, config: EditConfig) -> Result<PathGraph, OutlineError> {
        let mut paths = parse_outline_with_config(d, config)?;
        match paths.len() {
            0 => Ok(PathGraph::with_config(config)),
            1 => Ok(paths.remove(0)),
            n => Err(OutlineError::MultipleSubpaths(n)),
        }
    }
}

/// Parses every subpath of an outline into its own graph.
pub fn parse_outline(d: &str) -> Result<Vec<PathGraph>, OutlineError> {
    parse_outline_with_config(d, EditConfig::default())
}

pub(crate) fn parse_outline_with_config(d: &str, config: EditConfig) -> Result<Vec<PathGraph>, OutlineError> {
    if d.len() > limits::MAX_OUTLINE_LEN {
        return Err(OutlineError::TooLong(limits::MAX_OUTLINE_LEN));
    }
    let subpaths = scan(d)?;
    let mut out = Vec::with_capacity(subpaths.len());
    for (nodes, closed) in subpaths {
        let mut g = PathGraph::with_config(config);
        g.nodes = nodes;
        g.closed = closed;
        g.init();
        for n in g.nodes.iter_mut() {
            n.link = derive_link_type(n.pos, n.handle_pos(Side::Prev), n.handle_pos(Side::Next), &config);
        }
        g.init();
        g.store_outline();
        out.push(g);
    }
    tracing::debug!(subpaths = out.len(), "outline parsed");
    Ok(out)
}

struct Scanner<'a> {
    bytes: &'a [u8],
    i: usize,
}

impl<'a> Scanner<'a> {
    fn skip_ws(&mut self) {
        while self.i < self.bytes.len() {
            match self.bytes[self.i] {
                b' ' | b'\n' | b'\r' | b'\t' | b',' => self.i += 1,
                _ => break,
            }
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.bytes.get(self.i).copied()
    }

    fn at_number(&mut self) -> bool {
        matches!(self.peek(), Some(c) if c.is_ascii_digit() || matches!(c, b'.' | b'-' | b'+'))
    }

    fn number(&mut self, cmd: u8) -> Result<f64, OutlineError> {
        self.skip_ws();
        let bytes = self.bytes;
        let start = self.i;
        let missing = OutlineError::MissingNumber { command: cmd as char, offset: start };
        let mut i = start;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let mut digits = false;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            digits = true;
        }
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
                digits = true;
            }
        }
        if !digits {
            return Err(missing);
        }
        if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
            let mut j = i + 1;
            if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
                j += 1;
            }
            if j < bytes.len() && bytes[j].is_ascii_digit() {
                while j < bytes.len() && bytes[j].is_ascii_digit() {
                    j += 1;
                }
                i = j;
            }
        }
        let v = std::str::from_utf8(&bytes[start..i])
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or(missing)?;
        self.i = i;
        if !limits::in_coord_bounds(v) {
            return Err(OutlineError::CoordOutOfBounds { offset: start });
        }
        Ok(v)
    }

    fn point(&mut self, cmd: u8, base: Point) -> Result<Point, OutlineError> {
        let offset = self.i;
        let x = self.number(cmd)?;
        let y = self.number(cmd)?;
        checked(base + Point::new(x, y), offset)
    }
}

fn checked(p: Point, offset: usize) -> Result<Point, OutlineError> {
    if limits::in_coord_bounds(p.x) && limits::in_coord_bounds(p.y) {
        Ok(p)
    } else {
        Err(OutlineError::CoordOutOfBounds { offset })
    }
}

fn close_subpath(mut nodes: Vec<NodePoint>) -> (Vec<NodePoint>, bool) {
    if nodes.len() > 2 {
        let last = nodes.len() - 1;
        if nodes[last].pos.distance(nodes[0].pos) <= EPS_POS {
            let incoming = nodes[last].handle_pos(Side::Prev);
            nodes.pop();
            nodes[0].set_handle_pos(Side::Prev, incoming);
        }
    }
    (nodes, true)
}

// Splits the outline into raw node lists, one per subpath, with handles
// attached but link types not yet derived.
fn scan(d: &str) -> Result<Vec<(Vec<NodePoint>, bool)>, OutlineError> {
    let mut s = Scanner { bytes: d.as_bytes(), i: 0 };
    let mut done: Vec<(Vec<NodePoint>, bool)> = Vec::new();
    let mut current: Option<Vec<NodePoint>> = None;
    let mut started = false;
    let mut cur = Point::ZERO;
    let mut start_sub = Point::ZERO;
    let mut last_cmd: Option<u8> = None;
    let mut commands = 0usize;
    let mut node_total = 0usize;

    while let Some(c) = s.peek() {
        let offset = s.i;
        let cmd = if c.is_ascii_alphabetic() {
            if !matches!(c.to_ascii_uppercase(), b'M' | b'L' | b'H' | b'V' | b'C' | b'Q' | b'Z') {
                return Err(OutlineError::UnexpectedCommand { command: c as char, offset });
            }
            s.i += 1;
            c
        } else if s.at_number() {
            // implicit repetition; extra moveto pairs are linetos
            match last_cmd {
                Some(b'M') => b'L',
                Some(b'm') => b'l',
                Some(l) if !matches!(l, b'Z' | b'z') => l,
                _ => return Err(OutlineError::UnexpectedCommand { command: c as char, offset }),
            }
        } else {
            return Err(OutlineError::UnexpectedCommand { command: c as char, offset });
        };
        last_cmd = Some(cmd);
        commands += 1;
        if commands > limits::MAX_COMMANDS {
            return Err(OutlineError::TooManyCommands(limits::MAX_COMMANDS));
        }

        let upper = cmd.to_ascii_uppercase();
        let base = if cmd.is_ascii_lowercase() { cur } else { Point::ZERO };
        if upper == b'M' {
            let p = s.point(cmd, base)?;
            if let Some(nodes) = current.take() {
                done.push((nodes, false));
            }
            current = Some(vec![NodePoint::new(p)]);
            node_total += 1;
            started = true;
            cur = p;
            start_sub = p;
            continue;
        }
        if !started {
            return Err(OutlineError::MissingMoveTo);
        }
        if upper == b'Z' {
            if let Some(nodes) = current.take() {
                done.push(close_subpath(nodes));
            }
            cur = start_sub;
            continue;
        }

        let nodes = current.get_or_insert_with(|| {
            node_total += 1;
            vec![NodePoint::new(start_sub)]
        });
        let next = match upper {
            b'L' => NodePoint::new(s.point(cmd, base)?),
            b'H' => {
                let x = s.number(cmd)?;
                let x = if cmd == b'h' { cur.x + x } else { x };
                NodePoint::new(checked(Point::new(x, cur.y), offset)?)
            }
            b'V' => {
                let y = s.number(cmd)?;
                let y = if cmd == b'v' { cur.y + y } else { y };
                NodePoint::new(checked(Point::new(cur.x, y), offset)?)
            }
            b'C' => {
                let c1 = s.point(cmd, base)?;
                let c2 = s.point(cmd, base)?;
                let p = s.point(cmd, base)?;
                attach_curve(nodes, CubicBezier::new(cur, c1, c2, p))
            }
            _ => {
                let q = s.point(cmd, base)?;
                let p = s.point(cmd, base)?;
                attach_curve(nodes, CubicBezier::from_quadratic(cur, q, p))
            }
        };
        cur = next.pos;
        nodes.push(next);
        node_total += 1;
        if node_total > limits::MAX_NODES {
            return Err(OutlineError::TooManyNodes(limits::MAX_NODES));
        }
    }
    if let Some(nodes) = current.take() {
        done.push((nodes, false));
    }
    Ok(done)
}

fn attach_curve(nodes: &mut [NodePoint], curve: CubicBezier) -> NodePoint {
    if let Some(last) = nodes.last_mut() {
        last.set_handle_pos(Side::Next, Some(curve.p1));
    }
    let mut n = NodePoint::new(curve.p3);
    n.set_handle_pos(Side::Prev, Some(curve.p2));
    n
}
