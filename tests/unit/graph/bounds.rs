use super::*;
use crate::foundation::core::{Point, Size};

fn node(id: u64, x: f64, y: f64, w: f64, h: f64) -> Node {
    Node::new(id, Point::new(x, y), Size::new(w, h))
}

#[test]
fn single_node_bounds_match_footprint() {
    let b = calculate_node_bounds(&[node(1, 100.0, 100.0, 50.0, 50.0)]).unwrap();
    assert_eq!(
        b,
        Bounds {
            min_x: 100.0,
            min_y: 100.0,
            width: 50.0,
            height: 50.0,
        }
    );
}

#[test]
fn union_covers_full_footprints_not_anchors() {
    let b = calculate_node_bounds(&[
        node(1, -20.0, 10.0, 40.0, 30.0),
        node(2, 100.0, -50.0, 60.0, 20.0),
    ])
    .unwrap();
    assert_eq!(b.min_x, -20.0);
    assert_eq!(b.min_y, -50.0);
    assert_eq!(b.width, 180.0);
    assert_eq!(b.height, 90.0);
}

#[test]
fn empty_or_degenerate_sets_have_no_bounds() {
    assert!(calculate_node_bounds(&[]).is_none());
    assert!(calculate_node_bounds(&[node(1, f64::NAN, 0.0, 10.0, 10.0)]).is_none());
    assert!(calculate_node_bounds(&[node(1, 0.0, 0.0, f64::INFINITY, 10.0)]).is_none());
    assert!(calculate_node_bounds(&[node(1, 0.0, 0.0, -5.0, 10.0)]).is_none());
}

#[test]
fn collapsed_nodes_contribute_their_full_size() {
    let mut n = node(1, 100.0, 100.0, 120.0, 60.0);
    n.collapsed = true;
    let b = calculate_node_bounds(&[n]).unwrap();
    assert_eq!((b.width, b.height), (120.0, 60.0));
}

#[test]
fn closures_act_as_calculators() {
    let fixed = |_: &[Node]| {
        Some(Bounds {
            min_x: 0.0,
            min_y: 0.0,
            width: 1.0,
            height: 1.0,
        })
    };
    assert_eq!(fixed.calculate(&[]).map(|b| b.width), Some(1.0));
    assert!(FootprintBounds.calculate(&[]).is_none());
}
