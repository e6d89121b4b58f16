use penpath::{EditError, LinkType, PathGraph, Point, SegmentKind, Side};

fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn assert_topology(g: &PathGraph) {
    let n = g.node_count();
    let expected = match n {
        0 | 1 => 0,
        _ if g.is_closed() => n,
        _ => n - 1,
    };
    assert_eq!(g.segment_count(), expected);
}

#[test]
fn add_seg_on_line_inserts_corner() {
    let mut g = PathGraph::from_points(&pts(&[(-10.0, 0.0), (0.0, 0.0), (10.0, 0.0)]), false);
    let rec = g.add_seg(1, 0.5).unwrap();
    assert_eq!(rec.len(), 1);
    assert_eq!(g.node_count(), 4);
    let n = g.node(2).unwrap();
    assert_eq!(n.pos, Point::new(5.0, 0.0));
    assert_eq!(n.link, LinkType::Corner);
    assert_eq!(g.segment(1).unwrap().kind, SegmentKind::Line);
    assert_eq!(g.segment(2).unwrap().kind, SegmentKind::Line);
    assert_topology(&g);
}

#[test]
fn add_seg_rejects_bad_input_without_mutation() {
    let mut g = PathGraph::from_points(&pts(&[(0.0, 0.0), (10.0, 0.0)]), false);
    let before = g.snapshot();
    assert!(matches!(g.add_seg(0, 1.5), Err(EditError::InvalidParameter { .. })));
    assert!(matches!(g.add_seg(0, f64::NAN), Err(EditError::InvalidParameter { .. })));
    let err = g.add_seg(4, 0.5).unwrap_err();
    assert_eq!(err.code(), "index_out_of_range");
    assert_eq!(g.snapshot(), before);
}

#[test]
fn cubic_split_reproduces_curve() {
    let mut g = PathGraph::from_outline("M 0 0 C 10 20 30 20 40 0").unwrap();
    let original = g.segment_curve(0).unwrap();
    let t0 = 0.3;
    g.add_seg(0, t0).unwrap();
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.node(1).unwrap().link, LinkType::Smooth);
    let left = g.segment_curve(0).unwrap();
    let right = g.segment_curve(1).unwrap();
    for k in 0..=20 {
        let t = k as f64 / 20.0;
        let expect = original.eval(t);
        let got = if t <= t0 { left.eval(t / t0) } else { right.eval((t - t0) / (1.0 - t0)) };
        assert!(expect.distance(got) < 1e-9, "t={} {:?} vs {:?}", t, expect, got);
    }
}

#[test]
fn connecting_ends_closes_path() {
    let mut g = PathGraph::from_points(&pts(&[(0.0, 0.0), (10.0, 0.0), (5.0, 8.0)]), false);
    let out = g.connect_nodes(2, 0).unwrap();
    assert!(g.is_closed());
    assert_eq!(g.segment_count(), 3);
    assert_eq!(out.index, 0);
    assert!(out.detached.is_none());
}

#[test]
fn connecting_coincident_ends_fuses_them() {
    let mut g = PathGraph::from_points(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]), false);
    g.connect_nodes(0, 3).unwrap();
    assert!(g.is_closed());
    assert_eq!(g.node_count(), 3);
    assert_topology(&g);
}

#[test]
fn connecting_interior_node_is_rejected() {
    let mut g = PathGraph::from_points(&pts(&[(0.0, 0.0), (10.0, 0.0), (5.0, 8.0)]), false);
    let before = g.snapshot();
    assert!(matches!(g.connect_nodes(0, 1), Err(EditError::InvalidTopology(_))));
    assert!(matches!(g.connect_nodes(0, 0), Err(EditError::InvalidTopology(_))));
    assert_eq!(g.snapshot(), before);
    g.connect_nodes(0, 2).unwrap();
    assert!(matches!(g.connect_nodes(0, 2), Err(EditError::InvalidTopology(_))));
}

#[test]
fn disconnecting_closed_path_duplicates_cut_node() {
    let mut g = PathGraph::from_points(
        &pts(&[(0.0, 0.0), (10.0, 0.0), (15.0, 8.0), (5.0, 14.0), (-5.0, 8.0)]),
        true,
    );
    let out = g.disconnect_node(2).unwrap();
    assert!(!g.is_closed());
    assert_eq!(out.index, 5);
    // geometry is kept: five distinct anchors, the cut one at both ends
    assert_eq!(g.node_count(), 6);
    assert_eq!(g.segment_count(), 5);
    let first = g.node(0).unwrap();
    let last = g.node(5).unwrap();
    assert_eq!(first.pos, Point::new(15.0, 8.0));
    assert_eq!(last.pos, first.pos);
    assert_eq!(g.node(1).unwrap().pos, Point::new(5.0, 14.0));
    assert_topology(&g);
}

#[test]
fn disconnect_keeps_cut_node_curvature_split() {
    let mut g = PathGraph::from_points(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]), true);
    g.set_node_type(1, LinkType::Smooth);
    let (prev, next) = {
        let n = g.node(1).unwrap();
        (n.handle_pos(Side::Prev), n.handle_pos(Side::Next))
    };
    g.disconnect_node(1).unwrap();
    let head = g.node(0).unwrap();
    let tail = g.node(3).unwrap();
    assert_eq!(head.handle_pos(Side::Next), next);
    assert_eq!(tail.handle_pos(Side::Prev), prev);
    assert_eq!(head.link, LinkType::Corner);
}

#[test]
fn disconnecting_open_path_splits_it() {
    let mut g = PathGraph::from_points(&pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)]), false);
    let out = g.disconnect_node(1).unwrap();
    let rest = out.detached.expect("second half");
    assert_eq!(out.index, 1);
    assert_eq!(g.node_count(), 2);
    assert_eq!(rest.node_count(), 3);
    assert_eq!(rest.node(0).unwrap().pos, g.node(1).unwrap().pos);
    assert_topology(&g);
    assert_topology(&rest);
    assert!(matches!(g.disconnect_node(0), Err(EditError::InvalidTopology(_))));
}

#[test]
fn deleting_interior_node_joins_neighbors() {
    let mut g = PathGraph::from_points(&pts(&[(0.0, 0.0), (10.0, 5.0), (20.0, 0.0)]), false);
    let rec = g.delete_node(1);
    assert_eq!(rec.len(), 1);
    assert_eq!(g.node_count(), 2);
    let seg = g.segment(0).unwrap();
    assert_eq!(g.node(seg.start).unwrap().pos, Point::new(0.0, 0.0));
    assert_eq!(g.node(seg.end).unwrap().pos, Point::new(20.0, 0.0));
    assert_eq!(seg.kind, SegmentKind::Line);
}

#[test]
fn deleting_endpoint_shortens_and_last_two_collapse() {
    let mut g = PathGraph::from_points(&pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]), false);
    g.delete_node(2);
    assert_eq!(g.node_count(), 2);
    assert!(!g.is_closed());
    g.delete_node(0);
    assert!(g.is_empty());
    assert_eq!(g.segment_count(), 0);
    assert_eq!(g.to_outline(), "");
}

#[test]
fn delete_keeps_neighbor_curvature() {
    let mut g = PathGraph::from_outline("M 0 0 C 0 10 10 10 10 0 L 20 0 C 20 -10 30 -10 30 0").unwrap();
    g.delete_node(2);
    let seg = g.segment(1).unwrap();
    assert_eq!(seg.kind, SegmentKind::Cubic);
    let c = g.segment_curve(1).unwrap();
    assert_eq!(c.p1, Point::new(10.0, 0.0));
    assert_eq!(c.p2, Point::new(30.0, -10.0));
}

#[test]
fn joining_two_paths_moves_all_nodes() {
    let mut a = PathGraph::from_points(&pts(&[(0.0, 0.0), (10.0, 0.0)]), false);
    let mut b = PathGraph::from_points(&pts(&[(20.0, 0.0), (30.0, 0.0)]), false);
    let out = a.connect_paths(1, &mut b, 0).unwrap();
    assert_eq!(out.index, 1);
    assert_eq!(a.node_count(), 4);
    assert!(b.is_empty());
    assert_eq!(out.absorbed.unwrap().nodes.len(), 2);
    assert_topology(&a);
}

#[test]
fn joining_reorients_and_fuses_shared_endpoint() {
    let mut a = PathGraph::from_points(&pts(&[(0.0, 0.0), (10.0, 0.0)]), false);
    let mut b = PathGraph::from_points(&pts(&[(30.0, 0.0), (0.0, 0.0)]), false);
    let out = a.connect_paths(0, &mut b, 1).unwrap();
    let xs: Vec<f64> = a.nodes().iter().map(|n| n.pos.x).collect();
    assert_eq!(xs, vec![10.0, 0.0, 30.0]);
    assert_eq!(out.index, 1);
}

#[test]
fn joining_interior_node_fails_untouched() {
    let mut a = PathGraph::from_points(&pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]), false);
    let mut b = PathGraph::from_points(&pts(&[(30.0, 0.0), (40.0, 0.0)]), false);
    let (sa, sb) = (a.snapshot(), b.snapshot());
    assert!(a.connect_paths(1, &mut b, 0).is_err());
    assert_eq!((a.snapshot(), b.snapshot()), (sa, sb));
}

#[test]
fn reverse_swaps_handle_sides() {
    let mut g = PathGraph::from_outline("M 0 0 C 5 10 15 10 20 0 L 30 0").unwrap();
    let c = g.segment_curve(0).unwrap();
    g.reverse();
    let r = g.segment_curve(1).unwrap();
    assert_eq!((r.p0, r.p1, r.p2, r.p3), (c.p3, c.p2, c.p1, c.p0));
    g.reverse();
    assert_eq!(g.segment_curve(0).unwrap(), c);
}

#[test]
fn strip_curve_keeps_far_handles() {
    let mut g = PathGraph::from_outline("M 0 0 C 0 10 10 10 10 0 C 10 -10 20 -10 20 0").unwrap();
    g.strip_curve_from_segment(1);
    assert_eq!(g.segment(1).unwrap().kind, SegmentKind::Line);
    assert_eq!(g.segment(0).unwrap().kind, SegmentKind::Cubic);
    let n = g.node(1).unwrap();
    assert_eq!(n.handle_pos(Side::Prev), Some(Point::new(10.0, 10.0)));
    assert!(n.handle(Side::Next).is_none());
    assert!(g.strip_curve_from_segment(1).is_empty());
}

#[test]
fn bend_turns_line_into_curve_through_target() {
    let mut g = PathGraph::from_points(&pts(&[(0.0, 0.0), (100.0, 0.0)]), false);
    let target = Point::new(40.0, 25.0);
    let rec = g.bend_segment(0, 0.4, target, 1.0);
    assert!(!rec.is_empty());
    let c = g.segment_curve(0).unwrap();
    assert_eq!(g.segment(0).unwrap().kind, SegmentKind::Cubic);
    assert!(c.eval(0.4).distance(target) < 1e-9);
    // the straight chord is evaluated with handles at its thirds, so a
    // perpendicular pull only moves them sideways
    assert!((c.p1.x - 100.0 / 3.0).abs() < 1e-9);
    assert!((c.p2.x - 200.0 / 3.0).abs() < 1e-9);
    assert!(c.p1.y > 0.0 && c.p2.y > 0.0);
}

#[test]
fn first_segment_moves_outline_start() {
    let mut g = PathGraph::from_points(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]), true);
    g.set_first_segment(1).unwrap();
    assert_eq!(g.first_segment(), 1);
    assert_eq!(g.to_outline(), "M 10 0 L 10 10 L 0 0 L 10 0 Z");
    assert!(g.set_first_segment(3).is_err());
}

#[test]
fn reverse_keeps_outline_start_node() {
    let mut g = PathGraph::from_points(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]), true);
    g.set_first_segment(1).unwrap();
    let rec = g.reverse();
    assert!(!rec.is_empty());
    assert_eq!(g.first_segment(), 2);
    assert_eq!(g.to_outline(), "M 10 0 L 0 0 L 10 10 L 10 0 Z");
    rec.revert(&mut g);
    assert_eq!(g.to_outline(), "M 10 0 L 10 10 L 0 0 L 10 0 Z");
}
