#![cfg(target_arch = "wasm32")]
use js_sys::{Float64Array, Reflect, Uint8Array};
use penpath_wasm::PathEditor;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn get(v: &JsValue, k: &str) -> JsValue {
    Reflect::get(v, &JsValue::from_str(k)).unwrap()
}
fn is_ok(v: &JsValue) -> bool {
    get(v, "ok").as_bool().unwrap_or(false)
}
fn square() -> PathEditor {
    PathEditor::from_points(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0], true)
}

#[wasm_bindgen_test]
fn outline_load_and_export() {
    let mut p = PathEditor::new();
    assert_eq!(p.outline(), "");
    let r = p.load_outline_res("M 0 0 L 10 0 L 10 10 Z");
    assert!(is_ok(&r));
    assert_eq!(get(&r, "value").as_f64(), Some(3.0));
    assert!(p.is_closed());
    assert_eq!(p.segment_count(), 3);
    assert_eq!(p.outline(), "M 0 0 L 10 0 L 10 10 L 0 0 Z");
    assert_eq!(p.stored_outline(), p.outline());
}

#[wasm_bindgen_test]
fn node_data_buffers() {
    let mut p = square();
    p.select_pt(2);
    let data = p.get_node_data();
    let pos = Float64Array::from(get(&data, "positions")).to_vec();
    assert_eq!(pos, vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]);
    let links = Uint8Array::from(get(&data, "links")).to_vec();
    assert_eq!(links, vec![0, 0, 0, 0]);
    let handles = Float64Array::from(get(&data, "handles")).to_vec();
    assert_eq!(handles.len(), 16);
    assert!(handles.iter().all(|h| h.is_nan()));
    let sel = Uint8Array::from(get(&data, "selected")).to_vec();
    assert_eq!(sel, vec![0, 0, 1, 0]);

    p.set_transform(2.0, 0.0, 0.0, 2.0, 5.0, 0.0);
    let pos = Float64Array::from(get(&p.get_node_data(), "positions")).to_vec();
    assert_eq!(&pos[2..4], &[25.0, 0.0]);
}

#[wasm_bindgen_test]
fn node_type_and_handles() {
    let mut p = square();
    let r = p.set_node_type_res(0, 1);
    assert!(is_ok(&r));
    let n = p.get_node(0);
    assert_eq!(get(&n, "link").as_f64(), Some(1.0));
    assert!(!get(&n, "prev").is_null());
    assert!(!get(&n, "next").is_null());
    p.select_pt(0);
    assert_eq!(p.selected_node_type().as_f64(), Some(1.0));
    p.add_pts_to_selection(&[1]);
    assert_eq!(p.selected_node_type().as_string().as_deref(), Some("mixed"));
    p.clear_selection();
    assert!(p.selected_node_type().is_null());
}

#[wasm_bindgen_test]
fn split_connect_disconnect() {
    let mut p = PathEditor::from_points(&[-10.0, 0.0, 0.0, 0.0, 10.0, 0.0], false);
    assert!(is_ok(&p.add_seg_res(1, 0.5)));
    assert_eq!(p.node_count(), 4);
    assert_eq!(get(&p.get_node(2), "x").as_f64(), Some(5.0));

    let r = p.connect_nodes_res(0, 3);
    assert!(is_ok(&r));
    assert!(p.is_closed());
    assert_eq!(p.segment_count(), 4);

    let r = p.disconnect_node_res(1);
    assert!(is_ok(&r));
    assert!(!p.is_closed());
    assert!(get(&get(&r, "value"), "detached").is_null());
    assert_eq!(p.node_count(), 5);
    assert_eq!(p.segment_count(), 4);
}

#[wasm_bindgen_test]
fn drag_gesture_and_undo() {
    let mut p = square();
    p.select_pt(1);
    p.begin_drag();
    assert!(p.is_dragging());
    assert!(is_ok(&p.drag_by_res(1.0, 0.0)));
    assert!(is_ok(&p.drag_by_res(2.0, 1.0)));
    let entry = p.end_changes("move");
    assert!(!p.is_dragging());
    assert_eq!(get(&entry, "label").as_string().as_deref(), Some("move"));
    assert_eq!(get(&entry, "before").as_string().as_deref(), Some("M 0 0 L 10 0 L 10 10 L 0 10 Z"));
    assert_eq!(get(&entry, "after").as_string().as_deref(), Some("M 0 0 L 13 1 L 10 10 L 0 10 Z"));

    let record = get(&entry, "record");
    assert!(is_ok(&p.revert_res(record.clone())));
    assert_eq!(get(&p.get_node(1), "x").as_f64(), Some(10.0));
    assert!(is_ok(&p.apply_res(record)));
    assert_eq!(get(&p.get_node(1), "x").as_f64(), Some(13.0));
}

#[wasm_bindgen_test]
fn pick_in_display_space() {
    let mut p = square();
    p.set_transform(2.0, 0.0, 0.0, 2.0, 0.0, 0.0);
    let r = p.pick_res(20.5, 0.5, 2.0);
    assert!(is_ok(&r));
    let hit = get(&r, "value");
    assert!(!hit.is_null());
    let r = p.pick_res(500.0, 500.0, 2.0);
    assert!(get(&r, "value").is_null());
}

#[wasm_bindgen_test]
fn node_types_sidecar_restores_corners() {
    let mut p = PathEditor::new();
    let d = "M 0 0 C 0 0 30 -8 30 0 C 30 8 60 0 60 0";
    assert!(is_ok(&p.load_outline_res(d)));
    p.set_node_type_res(1, 0);
    let types = p.node_types_json();
    let outline = p.outline();
    let mut q = PathEditor::new();
    assert!(is_ok(&q.load_with_node_types_res(&outline, &types)));
    assert_eq!(get(&q.get_node(1), "link").as_f64(), Some(0.0));
}

#[wasm_bindgen_test]
fn json_document_round_trip() {
    let mut p = square();
    p.set_node_type_res(2, 2);
    let doc = p.to_json();
    let mut q = PathEditor::new();
    assert!(is_ok(&q.from_json_res(&doc)));
    assert_eq!(q.outline(), p.outline());
    assert_eq!(get(&q.get_node(2), "link").as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn sidecar_load_guesses_missing_types_with_editor_tolerances() {
    // handles at node 1 bend by about 0.002 rad
    let d = "M 0 0 C 0 0 20 0 30 0 C 40 0.02 60 0 60 0";
    let mut loose = PathEditor::new();
    assert!(is_ok(&loose.set_config_res("{\"collinear_tolerance\": 0.01}")));
    assert!(is_ok(&loose.load_with_node_types_res(d, "{}")));
    assert_eq!(get(&loose.get_node(1), "link").as_f64(), Some(2.0));

    let mut strict = PathEditor::new();
    assert!(is_ok(&strict.load_with_node_types_res(d, "{}")));
    assert_eq!(get(&strict.get_node(1), "link").as_f64(), Some(0.0));
}

#[wasm_bindgen_test]
fn points_load_checks_pairs() {
    let mut p = PathEditor::new();
    let r = p.load_points_res(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0], true);
    assert!(is_ok(&r));
    assert_eq!(p.node_count(), 3);
    assert!(p.is_closed());
}
