use super::*;
use crate::render::painter::SilhouettePainter;
use serde_json::json;

fn graph() -> Graph {
    Graph::from_nodes(vec![
        Node::new(1, Point::new(100.0, 100.0), Size::new(50.0, 50.0)),
        Node::new(2, Point::new(5000.0, 5000.0), Size::new(50.0, 50.0)),
    ])
}

fn canvas() -> LiveCanvas {
    let mut c = LiveCanvas::new(
        CanvasConfig {
            size: Size::new(800.0, 600.0),
            ..CanvasConfig::default()
        },
        Arc::new(SilhouettePainter {
            colour: Rgba8::rgb(255, 0, 0),
        }),
    );
    c.pan(Vec2::new(-40.0, 25.0));
    c.set_zoom(2.0);
    c.select(NodeId(1));
    c.config.flags.render_execution_order = true;
    c.config.flags.editor_alpha = 0.3;
    c.config.link_mode = LinkRenderMode::Straight;
    c.config.subgraph = Some("inner".to_string());
    c
}

fn bounds() -> Bounds {
    Bounds {
        min_x: 100.0,
        min_y: 100.0,
        width: 50.0,
        height: 50.0,
    }
}

#[test]
fn live_scope_culls_and_keeps_selection() {
    let c = canvas();
    let g = graph();
    let scope = PaintScope::live(&c, &g);

    assert_eq!(scope.visible_nodes.len(), 1);
    assert_eq!(scope.visible_nodes[0].id, NodeId(1));
    assert!(scope.is_selected(NodeId(1)));
    assert_eq!(scope.view.scale, 2.0);
    assert_eq!(scope.view.offset, Vec2::new(-40.0, 25.0));
    assert_eq!(scope.view.translation, Vec2::ZERO);
}

#[test]
fn live_scope_goes_low_quality_when_zoomed_out() {
    let mut c = canvas();
    c.set_zoom(0.5);
    let g = graph();
    assert!(PaintScope::live(&c, &g).flags.low_quality);
}

#[test]
fn snapshot_scope_overrides_viewport_selection_and_quality() {
    let c = canvas();
    let g = graph();
    let scope = PaintScope::snapshot(&c, &g, bounds(), 50.0);

    assert_eq!(scope.view.scale, 1.0);
    assert_eq!(scope.view.offset, Vec2::ZERO);
    assert_eq!(scope.view.translation, Vec2::new(-50.0, -50.0));
    assert_eq!(scope.visible_nodes.len(), 2);
    assert!(scope.selection.is_empty());
    assert!(!scope.is_selected(NodeId(1)));
    assert_eq!(scope.flags, RenderFlags::snapshot());
    assert!(!scope.flags.render_execution_order);
    assert_eq!(scope.flags.editor_alpha, 1.0);
}

#[test]
fn snapshot_scope_carries_configuration_through() {
    let c = canvas();
    let g = graph();
    let scope = PaintScope::snapshot(&c, &g, bounds(), 50.0);

    assert_eq!(scope.link_mode, LinkRenderMode::Straight);
    assert_eq!(scope.subgraph, Some("inner"));
    assert!(std::ptr::eq(scope.colours, &c.config.colours));
    assert!(std::ptr::eq(
        scope.painter() as *const dyn GraphPainter as *const u8,
        c.painter() as *const dyn GraphPainter as *const u8,
    ));
}

#[test]
fn snapshot_view_maps_bounds_corner_to_padding() {
    let c = canvas();
    let g = graph();
    let scope = PaintScope::snapshot(&c, &g, bounds(), 50.0);
    assert_eq!(
        scope.view.graph_to_surface(Point::new(100.0, 100.0)),
        Point::new(50.0, 50.0)
    );
}

#[test]
fn view_transform_apply_matches_affine() {
    let v = ViewTransform {
        scale: 2.0,
        offset: Vec2::new(10.0, 0.0),
        translation: Vec2::new(1.0, 2.0),
    };
    let mut ctx = DrawContext::allocate(4, 4).unwrap();
    v.apply(&mut ctx);
    assert_eq!(ctx.transform(), v.to_affine());
    assert_eq!(v.graph_to_surface(Point::ZERO), Point::new(21.0, 2.0));
}

#[test]
fn link_colour_lookup_falls_back_to_default() {
    let mut colours = ColourConfig::default();
    colours
        .link_types
        .insert("IMAGE".to_string(), Rgba8::rgb(1, 2, 3));
    assert_eq!(colours.link_colour(Some("IMAGE")), Rgba8::rgb(1, 2, 3));
    assert_eq!(colours.link_colour(Some("LATENT")), colours.link_default);
    assert_eq!(colours.link_colour(None), colours.link_default);
}

#[test]
fn canvas_config_parses_partial_json() {
    let cfg: CanvasConfig = serde_json::from_value(json!({
        "viewport": {"scale": 0.75, "offset": [12.0, -4.0]},
        "selection": [1, 2],
        "link_mode": "linear",
        "colours": {"background": "#000000"}
    }))
    .unwrap();
    assert_eq!(cfg.viewport.scale, 0.75);
    assert_eq!(cfg.viewport.offset, Vec2::new(12.0, -4.0));
    assert_eq!(cfg.selection.len(), 2);
    assert_eq!(cfg.link_mode, LinkRenderMode::Linear);
    assert_eq!(cfg.colours.background, Rgba8::rgb(0, 0, 0));
    assert_eq!(cfg.colours.node_title, ColourConfig::default().node_title);
    assert_eq!(cfg.device_pixel_ratio, 1.0);
}

#[test]
fn paint_graph_draws_nodes_at_their_positions() {
    let c = canvas();
    let g = Graph::from_nodes(vec![Node::new(
        1,
        Point::new(2.0, 2.0),
        Size::new(2.0, 2.0),
    )]);
    let scope = PaintScope::snapshot(&c, &g, bounds(), 0.0);

    let mut ctx = DrawContext::allocate(8, 8).unwrap();
    scope.paint_graph(&mut ctx);
    let pm = ctx.into_pixmap();
    let d = pm.data_as_u8_slice();
    let at = |x: usize, y: usize| d[(y * 8 + x) * 4 + 3];
    assert_eq!(at(3, 3), 255);
    assert_eq!(at(0, 0), 0);
    assert_eq!(at(5, 5), 0);
}

#[test]
fn selection_edits_reach_the_live_scope() {
    let mut c = canvas();
    c.select(NodeId(2));
    c.deselect(NodeId(1));
    let g = graph();
    let scope = PaintScope::live(&c, &g);
    assert!(!scope.is_selected(NodeId(1)));
    assert!(scope.is_selected(NodeId(2)));

    c.clear_selection();
    assert!(c.config.selection.is_empty());
}

#[test]
fn replaced_painter_draws_the_next_pass() {
    let mut c = canvas();
    c.set_painter(Arc::new(SilhouettePainter {
        colour: Rgba8::rgb(0, 0, 255),
    }));
    let g = Graph::from_nodes(vec![Node::new(
        1,
        Point::new(1.0, 1.0),
        Size::new(2.0, 2.0),
    )]);
    let scope = PaintScope::snapshot(&c, &g, bounds(), 0.0);

    let mut ctx = DrawContext::allocate(4, 4).unwrap();
    scope.paint_graph(&mut ctx);
    let pm = ctx.into_pixmap();
    let d = pm.data_as_u8_slice();
    let i = (2 * 4 + 2) * 4;
    assert_eq!(&d[i..i + 4], &[0, 0, 255, 255]);
}
