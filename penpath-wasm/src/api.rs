use crate::error;
use crate::interop::{arr_f64, arr_u32, arr_u8, new_obj, set_kv, to_js};
use crate::PathEditor;
use penpath::{
    ChangeRecord, ControlPointRef, EditConfig, LinkType, NodeTypeSelection, PathGraph, Point,
    SegmentKind, Side, Transform,
};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn side_from(code: u8) -> Option<Side> {
    match code {
        0 => Some(Side::Prev),
        1 => Some(Side::Next),
        _ => None,
    }
}

fn record(r: &ChangeRecord) -> JsValue {
    to_js(r)
}

#[wasm_bindgen]
impl PathEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PathEditor {
        crate::PathEditor::rs_new()
    }

    /// Straight-edged path through interleaved `[x0, y0, x1, y1, ...]`.
    /// A trailing unpaired coordinate is ignored; use `load_points_res` to
    /// have it rejected.
    pub fn from_points(coords: &[f64], closed: bool) -> PathEditor {
        let pts: Vec<Point> = coords.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect();
        crate::PathEditor::rs_from_graph(PathGraph::from_points(&pts, closed))
    }
    /// Replaces the path with straight edges through interleaved coordinates.
    pub fn load_points_res(&mut self, coords: &[f64], closed: bool) -> JsValue {
        if coords.len() % 2 != 0 {
            let d = new_obj();
            set_kv(&d, "len", &JsValue::from_f64(coords.len() as f64));
            return error::err("invalid_length", "coordinates must come in x, y pairs", Some(d.into()));
        }
        if coords.iter().any(|v| !v.is_finite()) {
            return error::non_finite("coords");
        }
        let pts: Vec<Point> = coords.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect();
        let mut g = PathGraph::from_points(&pts, closed);
        g.set_config(*self.inner.config());
        g.set_transform(self.inner.transform());
        self.inner = g;
        error::ok(JsValue::from_f64(self.inner.node_count() as f64))
    }

    // Outline I/O
    pub fn load_outline_res(&mut self, d: &str) -> JsValue {
        let config = *self.inner.config();
        match PathGraph::from_outline_with_config(d, config) {
            Ok(mut g) => {
                g.set_transform(self.inner.transform());
                self.inner = g;
                error::ok(JsValue::from_f64(self.inner.node_count() as f64))
            }
            Err(e) => error::from_outline(&e),
        }
    }
    pub fn load_with_node_types_res(&mut self, d: &str, types_json: &str) -> JsValue {
        let types: serde_json::Value = match serde_json::from_str(types_json) {
            Ok(v) => v,
            Err(e) => return error::err("invalid_document", e.to_string(), None),
        };
        match PathGraph::from_outline_with_config(d, *self.inner.config()) {
            Ok(mut g) => {
                g.apply_node_types(&types);
                g.store_outline();
                g.set_transform(self.inner.transform());
                self.inner = g;
                error::ok(JsValue::from_f64(self.inner.node_count() as f64))
            }
            Err(e) => error::from_outline(&e),
        }
    }
    pub fn outline(&self) -> String {
        self.inner.to_outline()
    }
    pub fn store_outline(&mut self) -> String {
        self.inner.store_outline().to_string()
    }
    pub fn stored_outline(&self) -> String {
        self.inner.stored_outline().to_string()
    }
    pub fn node_types_json(&self) -> String {
        self.inner.node_types_json().to_string()
    }
    pub fn to_json(&self) -> String {
        self.inner.to_json_value().to_string()
    }
    pub fn from_json_res(&mut self, json: &str) -> JsValue {
        let v: serde_json::Value = match serde_json::from_str(json) {
            Ok(v) => v,
            Err(e) => return error::err("invalid_document", e.to_string(), None),
        };
        match PathGraph::from_json_value(v) {
            Ok(mut g) => {
                g.set_config(*self.inner.config());
                g.set_transform(self.inner.transform());
                self.inner = g;
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::from_outline(&e),
        }
    }
    pub fn set_config_res(&mut self, json: &str) -> JsValue {
        match EditConfig::from_json_str(json) {
            Ok(c) => {
                self.inner.set_config(c);
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::err("invalid_document", e.to_string(), None),
        }
    }

    // Read access
    pub fn node_count(&self) -> u32 {
        self.inner.node_count() as u32
    }
    pub fn segment_count(&self) -> u32 {
        self.inner.segment_count() as u32
    }
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
    pub fn first_segment(&self) -> u32 {
        self.inner.first_segment() as u32
    }
    pub fn get_node(&self, index: u32) -> JsValue {
        match self.inner.node(index as usize) {
            Some(n) => {
                let o = new_obj();
                set_kv(&o, "x", &JsValue::from_f64(n.pos.x));
                set_kv(&o, "y", &JsValue::from_f64(n.pos.y));
                set_kv(&o, "link", &JsValue::from_f64(n.link.code() as f64));
                set_kv(&o, "prev", &to_js(&n.handle_pos(Side::Prev)));
                set_kv(&o, "next", &to_js(&n.handle_pos(Side::Next)));
                set_kv(&o, "selected", &JsValue::from_bool(n.selected));
                o.into()
            }
            None => JsValue::NULL,
        }
    }
    pub fn get_node_res(&self, index: u32) -> JsValue {
        if self.inner.node(index as usize).is_none() {
            return error::invalid_id("node", index);
        }
        error::ok(self.get_node(index))
    }
    /// Flat buffers for rendering: positions, link codes, handle positions
    /// (NaN where a handle is absent) and selection flags.
    pub fn get_node_data(&self) -> JsValue {
        let nodes = self.inner.nodes();
        let mut pos = Vec::with_capacity(nodes.len() * 2);
        let mut links = Vec::with_capacity(nodes.len());
        let mut handles = Vec::with_capacity(nodes.len() * 4);
        let mut selected = Vec::with_capacity(nodes.len());
        for n in nodes {
            let p = self.inner.to_display(n.pos);
            pos.extend_from_slice(&[p.x, p.y]);
            links.push(n.link.code());
            for side in [Side::Prev, Side::Next] {
                match n.handle(side).filter(|h| h.visible) {
                    Some(h) => {
                        let q = self.inner.to_display(h.pos);
                        handles.extend_from_slice(&[q.x, q.y]);
                    }
                    None => handles.extend_from_slice(&[f64::NAN, f64::NAN]),
                }
            }
            selected.push(n.selected as u8);
        }
        let o = new_obj();
        set_kv(&o, "positions", &arr_f64(&pos).into());
        set_kv(&o, "links", &arr_u8(&links).into());
        set_kv(&o, "handles", &arr_f64(&handles).into());
        set_kv(&o, "selected", &arr_u8(&selected).into());
        o.into()
    }
    /// Segment endpoints as `[start, end]` pairs plus kinds (0 line, 1 cubic).
    pub fn get_segment_data(&self) -> JsValue {
        let segs = self.inner.segments();
        let mut ends = Vec::with_capacity(segs.len() * 2);
        let mut kinds = Vec::with_capacity(segs.len());
        for s in segs {
            ends.extend_from_slice(&[s.start as u32, s.end as u32]);
            kinds.push(match s.kind {
                SegmentKind::Line => 0u8,
                SegmentKind::Cubic => 1u8,
            });
        }
        let o = new_obj();
        set_kv(&o, "endpoints", &arr_u32(&ends).into());
        set_kv(&o, "kinds", &arr_u8(&kinds).into());
        o.into()
    }

    // Node edits
    pub fn move_node_res(&mut self, index: u32, dx: f64, dy: f64) -> JsValue {
        if !dx.is_finite() {
            return error::non_finite("dx");
        }
        if !dy.is_finite() {
            return error::non_finite("dy");
        }
        if self.inner.node(index as usize).is_none() {
            return error::invalid_id("node", index);
        }
        error::ok(record(&self.inner.move_node(index as usize, dx, dy)))
    }
    pub fn move_node_abs_res(&mut self, index: u32, x: f64, y: f64) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        if self.inner.node(index as usize).is_none() {
            return error::invalid_id("node", index);
        }
        error::ok(record(&self.inner.move_node_abs(index as usize, x, y)))
    }
    pub fn set_node_type_res(&mut self, index: u32, code: u8) -> JsValue {
        let Some(link) = LinkType::from_code(code) else {
            return error::invalid_mode(code);
        };
        if self.inner.node(index as usize).is_none() {
            return error::invalid_id("node", index);
        }
        error::ok(record(&self.inner.set_node_type(index as usize, link)))
    }
    pub fn create_control_points_res(&mut self, index: u32) -> JsValue {
        if self.inner.node(index as usize).is_none() {
            return error::invalid_id("node", index);
        }
        error::ok(record(&self.inner.create_control_points(index as usize)))
    }
    pub fn delete_node_res(&mut self, index: u32) -> JsValue {
        if self.inner.node(index as usize).is_none() {
            return error::invalid_id("node", index);
        }
        error::ok(record(&self.inner.delete_node(index as usize)))
    }

    // Handle edits
    pub fn move_control_point_res(&mut self, node: u32, side: u8, dx: f64, dy: f64) -> JsValue {
        let Some(side) = side_from(side) else {
            return error::invalid_side(side);
        };
        if !dx.is_finite() {
            return error::non_finite("dx");
        }
        if !dy.is_finite() {
            return error::non_finite("dy");
        }
        let cp = ControlPointRef::new(node as usize, side);
        if self.inner.control_point(cp).is_none() {
            return error::invalid_id("control_point", node);
        }
        error::ok(record(&self.inner.move_control_point(cp, dx, dy)))
    }
    pub fn delete_control_point_res(&mut self, node: u32, side: u8) -> JsValue {
        let Some(side) = side_from(side) else {
            return error::invalid_side(side);
        };
        let cp = ControlPointRef::new(node as usize, side);
        if self.inner.control_point(cp).is_none() {
            return error::invalid_id("control_point", node);
        }
        error::ok(record(&self.inner.delete_control_point(cp)))
    }

    // Segment edits
    pub fn add_seg_res(&mut self, index: u32, interpolation: f64) -> JsValue {
        match self.inner.add_seg(index as usize, interpolation) {
            Ok(r) => error::ok(record(&r)),
            Err(e) => error::from_edit(&e),
        }
    }
    pub fn strip_curve_res(&mut self, index: u32) -> JsValue {
        if self.inner.segment(index as usize).is_none() {
            return error::invalid_id("segment", index);
        }
        error::ok(record(&self.inner.strip_curve_from_segment(index as usize)))
    }
    pub fn bend_segment_res(&mut self, index: u32, t: f64, x: f64, y: f64, stiffness: f64) -> JsValue {
        for (name, v) in [("t", t), ("x", x), ("y", y), ("stiffness", stiffness)] {
            if !v.is_finite() {
                return error::non_finite(name);
            }
        }
        if self.inner.segment(index as usize).is_none() {
            return error::invalid_id("segment", index);
        }
        let target = self.inner.from_display(Point::new(x, y));
        error::ok(record(&self.inner.bend_segment(index as usize, t, target, stiffness)))
    }

    // Topology
    pub fn reverse(&mut self) -> JsValue {
        record(&self.inner.reverse())
    }
    pub fn connect_nodes_res(&mut self, index1: u32, index2: u32) -> JsValue {
        match self.inner.connect_nodes(index1 as usize, index2 as usize) {
            Ok(out) => error::ok(JsValue::from_f64(out.index as f64)),
            Err(e) => error::from_edit(&e),
        }
    }
    /// Appends `other` onto this path; `other` is left empty on success.
    pub fn connect_paths_res(&mut self, index1: u32, other: &mut PathEditor, index2: u32) -> JsValue {
        match self.inner.connect_paths(index1 as usize, &mut other.inner, index2 as usize) {
            Ok(out) => error::ok(JsValue::from_f64(out.index as f64)),
            Err(e) => error::from_edit(&e),
        }
    }
    /// On an open path the second half comes back as `value.detached`.
    pub fn disconnect_node_res(&mut self, index: u32) -> JsValue {
        match self.inner.disconnect_node(index as usize) {
            Ok(out) => {
                let o = new_obj();
                set_kv(&o, "index", &JsValue::from_f64(out.index as f64));
                let detached = match out.detached {
                    Some(g) => JsValue::from(crate::PathEditor::rs_from_graph(g)),
                    None => JsValue::NULL,
                };
                set_kv(&o, "detached", &detached);
                error::ok(o.into())
            }
            Err(e) => error::from_edit(&e),
        }
    }
    pub fn set_first_segment_res(&mut self, index: u32) -> JsValue {
        match self.inner.set_first_segment(index as usize) {
            Ok(r) => error::ok(record(&r)),
            Err(e) => error::from_edit(&e),
        }
    }

    // Selection
    pub fn select_pt(&mut self, index: u32) -> bool {
        self.inner.select_pt(index as usize)
    }
    pub fn add_pts_to_selection(&mut self, indices: &[u32]) {
        let idx: Vec<usize> = indices.iter().map(|i| *i as usize).collect();
        self.inner.add_pts_to_selection(&idx);
    }
    pub fn remove_pt_from_selection(&mut self, index: u32) {
        self.inner.remove_pt_from_selection(index as usize);
    }
    pub fn clear_selection(&mut self) {
        self.inner.clear_selection();
    }
    pub fn select_control_point(&mut self, node: u32, side: u8) -> bool {
        match side_from(side) {
            Some(s) => self.inner.select_control_point(ControlPointRef::new(node as usize, s)),
            None => false,
        }
    }
    pub fn selected_points(&self) -> Vec<u32> {
        self.inner.selected_points().into_iter().map(|i| i as u32).collect()
    }
    /// Link code shared by the selection, `null` when nothing is selected,
    /// `"mixed"` when the selected nodes disagree.
    pub fn selected_node_type(&self) -> JsValue {
        match self.inner.selected_node_types() {
            NodeTypeSelection::None => JsValue::NULL,
            NodeTypeSelection::Single(link) => JsValue::from_f64(link.code() as f64),
            NodeTypeSelection::Mixed => JsValue::from_str("mixed"),
        }
    }
    pub fn set_selected_node_type_res(&mut self, code: u8) -> JsValue {
        match LinkType::from_code(code) {
            Some(link) => error::ok(record(&self.inner.set_selected_node_type(link))),
            None => error::invalid_mode(code),
        }
    }
    pub fn delete_selected(&mut self) -> JsValue {
        record(&self.inner.delete_selected())
    }

    // Gestures and history
    pub fn begin_drag(&mut self) {
        self.inner.begin_drag();
    }
    pub fn drag_by_res(&mut self, dx: f64, dy: f64) -> JsValue {
        if !dx.is_finite() {
            return error::non_finite("dx");
        }
        if !dy.is_finite() {
            return error::non_finite("dy");
        }
        error::ok(record(&self.inner.drag_by(dx, dy)))
    }
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }
    pub fn cancel_drag(&mut self) -> bool {
        self.inner.cancel_drag()
    }
    pub fn end_changes(&mut self, label: &str) -> JsValue {
        to_js(&self.inner.end_changes(label))
    }
    /// Undoes a record previously returned by an edit call.
    pub fn revert_res(&mut self, rec: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<ChangeRecord>(rec) {
            Ok(r) => {
                r.revert(&mut self.inner);
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::err("invalid_document", e.to_string(), None),
        }
    }
    pub fn apply_res(&mut self, rec: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<ChangeRecord>(rec) {
            Ok(r) => {
                r.apply(&mut self.inner);
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::err("invalid_document", e.to_string(), None),
        }
    }

    // Display
    pub fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.inner.set_transform(Some(Transform::new(a, b, c, d, e, f)));
    }
    pub fn clear_transform(&mut self) {
        self.inner.set_transform(None);
    }
    pub fn show(&mut self, display: bool) {
        self.inner.show(display);
    }
    pub fn is_visible(&self) -> bool {
        self.inner.is_visible()
    }
    /// Hit test in display coordinates. A negative tolerance uses the
    /// configured default.
    pub fn pick_res(&self, x: f64, y: f64, tol: f64) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        let tol = if tol.is_finite() && tol >= 0.0 { tol } else { self.inner.config().pick_tolerance };
        match self.inner.pick_display(Point::new(x, y), tol) {
            Some(hit) => error::ok(to_js(&hit)),
            None => error::ok(JsValue::NULL),
        }
    }
}

impl Default for PathEditor {
    fn default() -> Self {
        Self::new()
    }
}
