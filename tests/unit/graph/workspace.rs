use super::*;
use crate::foundation::core::{Point, Size};
use crate::graph::model::Node;

fn ws() -> Workspace {
    let mut ws = Workspace::new(Graph::from_nodes(vec![Node::new(
        1,
        Point::new(0.0, 0.0),
        Size::new(10.0, 10.0),
    )]));
    ws.subgraphs.insert(
        "inner".to_string(),
        Graph::from_nodes(vec![
            Node::new(10, Point::new(5.0, 5.0), Size::new(10.0, 10.0)),
            Node::new(11, Point::new(50.0, 5.0), Size::new(10.0, 10.0)),
        ]),
    );
    ws
}

#[test]
fn active_graph_defaults_to_root() {
    let ws = ws();
    assert!(ws.focused_subgraph().is_none());
    assert_eq!(ws.active_graph().nodes.len(), 1);
}

#[test]
fn focused_subgraph_wins_over_root() {
    let mut ws = ws();
    ws.focus(Some("inner")).unwrap();
    assert_eq!(ws.active_graph().nodes.len(), 2);
    assert_eq!(ws.root().nodes.len(), 1);

    ws.focus(None).unwrap();
    assert_eq!(ws.active_graph().nodes.len(), 1);
}

#[test]
fn unknown_focus_is_rejected_and_dangling_focus_falls_back() {
    let mut ws = ws();
    assert!(ws.focus(Some("missing")).is_err());

    ws.focused = Some("missing".to_string());
    assert_eq!(ws.active_graph().nodes.len(), 1);
}

#[test]
fn validate_reports_subgraph_id() {
    let mut ws = ws();
    ws.subgraphs.get_mut("inner").unwrap().nodes[1].id = crate::graph::model::NodeId(10);
    let err = ws.validate().unwrap_err();
    assert!(err.to_string().contains("subgraph 'inner'"));
}
