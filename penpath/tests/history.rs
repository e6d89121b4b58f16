use penpath::{Change, ControlPointRef, LinkType, PathGraph, Point, Side};
use std::sync::Once;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn triangle() -> PathGraph {
    PathGraph::from_points(
        &[Point::new(0.0, 0.0), Point::new(40.0, 0.0), Point::new(20.0, 30.0)],
        true,
    )
}

#[test]
fn revert_and_apply_handle_coupling() {
    init_tracing();
    let mut g = triangle();
    g.set_node_type(1, LinkType::Symmetric);
    let before = g.snapshot();
    let rec = g.move_control_point(ControlPointRef::new(1, Side::Next), 5.0, 5.0);
    let after = g.snapshot();
    rec.revert(&mut g);
    assert_eq!(g.snapshot(), before);
    rec.apply(&mut g);
    assert_eq!(g.snapshot(), after);
}

#[test]
fn structural_edits_undo_wholesale() {
    init_tracing();
    let mut g = triangle();
    let before = g.snapshot();
    let rec = g.add_seg(2, 0.5).unwrap();
    assert!(matches!(rec.changes[0], Change::Restructure { .. }));
    assert_eq!(g.node_count(), 4);
    rec.revert(&mut g);
    assert_eq!(g.snapshot(), before);

    let rec = g.disconnect_node(0).unwrap().record;
    rec.revert(&mut g);
    assert!(g.is_closed());
    rec.apply(&mut g);
    assert!(!g.is_closed());
}

#[test]
fn drag_gesture_collapses_to_one_entry() {
    init_tracing();
    let mut g = triangle();
    g.select_pt(2);
    g.begin_drag();
    assert!(g.is_dragging());
    for _ in 0..5 {
        g.drag_by(1.0, -2.0);
    }
    assert_eq!(g.drag_delta(), Point::new(5.0, -10.0));
    let entry = g.end_changes("move node");
    assert!(!g.is_dragging());
    assert_eq!(entry.label, "move node");
    assert_eq!(
        entry.record.changes,
        vec![Change::NodeMoved { node: 2, from: Point::new(20.0, 30.0), to: Point::new(25.0, 20.0) }]
    );
    assert_ne!(entry.before, entry.after);
    assert_eq!(entry.after, g.to_outline());

    entry.record.revert(&mut g);
    assert_eq!(g.to_outline(), entry.before);
}

#[test]
fn handle_drag_moves_selected_control_point() {
    init_tracing();
    let mut g = triangle();
    g.set_node_type(0, LinkType::Smooth);
    let cp = ControlPointRef::new(0, Side::Next);
    assert!(g.select_control_point(cp));
    g.begin_drag();
    g.drag_by(0.0, 3.0);
    g.drag_by(0.0, 3.0);
    let entry = g.end_changes("move handle");
    // the handle and its coupled sibling
    assert_eq!(entry.record.len(), 2);
    assert_eq!(g.selected_control_point(), Some(cp));
}

#[test]
fn cancel_puts_points_back() {
    init_tracing();
    let mut g = triangle();
    let before = g.snapshot();
    g.add_pts_to_selection(&[0, 1]);
    g.begin_drag();
    g.drag_by(7.0, 7.0);
    assert!(g.cancel_drag());
    assert_eq!(g.snapshot(), before);
    assert!(!g.cancel_drag());
}

#[test]
fn idle_commit_is_noop() {
    let mut g = triangle();
    g.store_outline();
    let entry = g.end_changes("nothing");
    assert!(entry.is_noop());
}

#[test]
fn records_serialize_for_the_history_layer() {
    let mut g = triangle();
    let rec = g.move_node(0, 1.0, 1.0);
    let v = serde_json::to_value(&rec).unwrap();
    assert_eq!(v["changes"][0]["kind"], "node_moved");
    let back: penpath::ChangeRecord = serde_json::from_value(v).unwrap();
    assert_eq!(back, rec);
}
