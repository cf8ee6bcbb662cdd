use super::*;
use serde_json::json;

fn two_nodes() -> Graph {
    Graph {
        nodes: vec![
            Node::new(1, Point::new(0.0, 0.0), Size::new(100.0, 60.0)).with_slots(0, 2),
            Node::new(2, Point::new(200.0, 0.0), Size::new(100.0, 60.0)).with_slots(1, 0),
        ],
        links: vec![Link {
            id: 7,
            origin: NodeId(1),
            origin_slot: 1,
            target: NodeId(2),
            target_slot: 0,
            kind: Some("IMAGE".to_string()),
        }],
    }
}

#[test]
fn deserializes_litegraph_style_arrays() {
    let g: Graph = serde_json::from_value(json!({
        "nodes": [
            {"id": 3, "title": "Load", "pos": [10.0, 20.0], "size": [140.0, 80.0], "outputs": 1},
            {"id": 4, "pos": {"x": 5.0, "y": 6.0}, "size": {"width": 7.0, "height": 8.0},
             "collapsed": true, "color": "#223344"}
        ],
        "links": [{"id": 1, "origin": 3, "target": 4}]
    }))
    .unwrap();

    assert_eq!(g.nodes.len(), 2);
    assert_eq!(g.nodes[0].title, "Load");
    assert_eq!(g.nodes[0].pos, Point::new(10.0, 20.0));
    assert_eq!(g.nodes[0].size, Size::new(140.0, 80.0));
    assert!(g.nodes[1].collapsed);
    assert_eq!(g.nodes[1].color, Some(Rgba8::rgb(0x22, 0x33, 0x44)));
    assert_eq!(g.links[0].origin_slot, 0);
    assert_eq!(g.links[0].kind, None);
}

#[test]
fn serialize_then_parse_keeps_nodes() {
    let g = two_nodes();
    let s = serde_json::to_string(&g).unwrap();
    let back: Graph = serde_json::from_str(&s).unwrap();
    assert_eq!(back, g);
}

#[test]
fn footprint_is_position_plus_size() {
    let n = Node::new(1, Point::new(100.0, 100.0), Size::new(50.0, 50.0));
    assert_eq!(n.footprint(), Rect::new(100.0, 100.0, 150.0, 150.0));
}

#[test]
fn collapsed_footprint_keeps_stored_size() {
    let mut n = Node::new(1, Point::new(10.0, 20.0), Size::new(300.0, 200.0));
    n.collapsed = true;
    assert_eq!(n.footprint(), Rect::new(10.0, 20.0, 310.0, 220.0));
    assert_eq!(n.output_anchor(0).x, NODE_COLLAPSED_WIDTH);
}

#[test]
fn slot_anchors_sit_on_node_edges() {
    let n = Node::new(1, Point::new(0.0, 0.0), Size::new(120.0, 80.0)).with_slots(2, 2);
    assert_eq!(n.input_anchor(0).x, 0.0);
    assert_eq!(n.output_anchor(1).x, 120.0);
    assert!(n.input_anchor(1).y > n.input_anchor(0).y);
}

#[test]
fn validate_accepts_consistent_graph() {
    two_nodes().validate().unwrap();
}

#[test]
fn validate_rejects_duplicates_and_dangling_links() {
    let mut g = two_nodes();
    g.nodes[1].id = NodeId(1);
    assert!(g.validate().is_err());

    let mut g = two_nodes();
    g.links[0].target = NodeId(99);
    let err = g.validate().unwrap_err();
    assert!(err.to_string().contains("missing target"));

    let mut g = two_nodes();
    g.links[0].origin_slot = 5;
    assert!(g.validate().is_err());
}

#[test]
fn node_lookup_by_id() {
    let g = two_nodes();
    assert_eq!(g.node(NodeId(2)).map(|n| n.pos.x), Some(200.0));
    assert!(g.node(NodeId(3)).is_none());
}
