use crate::foundation::core::{BezPath, Point, Rect, Rgba8, Vec2};
use crate::graph::model::{NODE_COLLAPSED_WIDTH, NODE_TITLE_HEIGHT, Node};
use crate::render::context::DrawContext;
use crate::render::surface::{LinkRenderMode, PaintScope};

/// Drawing capability supplied by the host renderer.
///
/// `draw_connections`, `draw_snap_guide` and `draw_execution_order` draw in graph space;
/// `draw_node` draws in node-local space with the origin at the node's position. The optional
/// routines default to no-ops.
pub trait GraphPainter: Send + Sync {
    /// Draw every link between visible nodes.
    fn draw_connections(&self, scope: &PaintScope<'_>, ctx: &mut DrawContext);

    /// Draw a single node.
    fn draw_node(&self, scope: &PaintScope<'_>, node: &Node, ctx: &mut DrawContext);

    /// Draw the grid-snapped outline a dragged node would land on.
    fn draw_snap_guide(&self, _scope: &PaintScope<'_>, _node: &Node, _ctx: &mut DrawContext) {}

    /// Draw the execution-order overlay.
    fn draw_execution_order(&self, _scope: &PaintScope<'_>, _ctx: &mut DrawContext) {}
}

/// Built-in node/link renderer: flat boxes with a title bar, slot dots and routed links.
#[derive(Clone, Debug)]
pub struct DefaultPainter {
    /// Link stroke width.
    pub link_width: f64,
    /// Node corner radius.
    pub corner_radius: f64,
    /// Slot dot radius.
    pub slot_radius: f64,
    /// Grid used by snap guides.
    pub snap_grid: f64,
}

impl Default for DefaultPainter {
    fn default() -> Self {
        Self {
            link_width: 3.0,
            corner_radius: 6.0,
            slot_radius: 4.0,
            snap_grid: 10.0,
        }
    }
}

const SHADOW_OFFSET: Vec2 = Vec2::new(3.0, 3.0);
const LINK_STUB: f64 = 15.0;

impl GraphPainter for DefaultPainter {
    fn draw_connections(&self, scope: &PaintScope<'_>, ctx: &mut DrawContext) {
        let width = if scope.flags.low_quality {
            (self.link_width * 0.5).max(1.0)
        } else {
            self.link_width
        };

        for link in &scope.graph.links {
            let (Some(origin), Some(target)) =
                (scope.visible_node(link.origin), scope.visible_node(link.target))
            else {
                continue;
            };
            let start = origin.pos + origin.output_anchor(link.origin_slot).to_vec2();
            let end = target.pos + target.input_anchor(link.target_slot).to_vec2();
            let colour = scope
                .colours
                .link_colour(link.kind.as_deref())
                .with_alpha_mul(f64::from(scope.flags.editor_alpha));
            ctx.stroke_path(&link_path(scope.link_mode, start, end), width, colour);
        }
    }

    fn draw_node(&self, scope: &PaintScope<'_>, node: &Node, ctx: &mut DrawContext) {
        let flags = scope.flags;
        ctx.with_opacity(flags.editor_alpha, |ctx| {
            let width = if node.collapsed {
                node.size.width.min(NODE_COLLAPSED_WIDTH)
            } else {
                node.size.width
            };
            let title = Rect::new(0.0, -NODE_TITLE_HEIGHT, width, 0.0);
            let shape = if node.collapsed {
                title
            } else {
                title.union(Rect::new(0.0, 0.0, width, node.size.height))
            };
            let radius = if flags.low_quality {
                0.0
            } else {
                self.corner_radius
            };

            if flags.render_shadows && !flags.low_quality {
                ctx.fill_rounded_rect(shape + SHADOW_OFFSET, radius, scope.colours.shadow);
            }

            ctx.fill_rounded_rect(shape, radius, scope.colours.body_colour(node));
            ctx.fill_rounded_rect(title, radius, scope.colours.title_colour(node));

            if node.collapsed {
                if flags.render_collapsed_slots {
                    if node.inputs > 0 {
                        ctx.fill_circle(
                            node.input_anchor(0),
                            self.slot_radius,
                            scope.colours.slot_input,
                        );
                    }
                    if node.outputs > 0 {
                        ctx.fill_circle(
                            node.output_anchor(0),
                            self.slot_radius,
                            scope.colours.slot_output,
                        );
                    }
                }
            } else {
                for i in 0..node.inputs {
                    ctx.fill_circle(node.input_anchor(i), self.slot_radius, scope.colours.slot_input);
                }
                for i in 0..node.outputs {
                    ctx.fill_circle(
                        node.output_anchor(i),
                        self.slot_radius,
                        scope.colours.slot_output,
                    );
                }
            }

            if node.subgraph.is_some() {
                let badge = Rect::new(width - 18.0, -NODE_TITLE_HEIGHT + 8.0, width - 6.0, -8.0);
                ctx.fill_rect(badge, scope.colours.subgraph_badge);
            }

            if scope.is_selected(node.id) && !flags.skip_border {
                ctx.stroke_rect(shape.inflate(3.0, 3.0), 2.0, scope.colours.selection);
            } else if !flags.low_quality {
                ctx.stroke_rect(shape, 1.0, scope.colours.node_outline);
            }
        });
    }

    fn draw_snap_guide(&self, scope: &PaintScope<'_>, node: &Node, ctx: &mut DrawContext) {
        if self.snap_grid <= 0.0 {
            return;
        }
        let snap = |v: f64| (v / self.snap_grid).round() * self.snap_grid;
        let fp = node.footprint();
        let origin = Point::new(snap(fp.x0), snap(fp.y0));
        let guide = Rect::from_origin_size(origin, fp.size());
        ctx.stroke_rect(guide, 1.0, scope.colours.selection.with_alpha_mul(0.5));
    }

    fn draw_execution_order(&self, scope: &PaintScope<'_>, ctx: &mut DrawContext) {
        let mut path = BezPath::new();
        for (i, node) in scope.visible_nodes.iter().enumerate() {
            let c = node.footprint().center();
            if i == 0 {
                path.move_to(c);
            } else {
                path.line_to(c);
            }
        }
        if scope.visible_nodes.len() > 1 {
            ctx.stroke_path(&path, 1.5, scope.colours.selection.with_alpha_mul(0.6));
        }
        for node in &scope.visible_nodes {
            ctx.fill_circle(node.footprint().center(), 3.0, scope.colours.selection);
        }
    }
}

/// Route a link from an output anchor to an input anchor.
pub fn link_path(mode: LinkRenderMode, start: Point, end: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(start);
    match mode {
        LinkRenderMode::Spline => {
            let handle = (start.distance(end) * 0.25).max(LINK_STUB);
            path.curve_to(
                start + Vec2::new(handle, 0.0),
                end - Vec2::new(handle, 0.0),
                end,
            );
        }
        LinkRenderMode::Linear => {
            path.line_to(start + Vec2::new(LINK_STUB, 0.0));
            path.line_to(end - Vec2::new(LINK_STUB, 0.0));
            path.line_to(end);
        }
        LinkRenderMode::Straight => {
            let start_x = start.x + LINK_STUB * 0.5;
            let end_x = end.x - LINK_STUB * 0.5;
            let mid_x = (start_x + end_x) * 0.5;
            path.line_to(Point::new(start_x, start.y));
            path.line_to(Point::new(mid_x, start.y));
            path.line_to(Point::new(mid_x, end.y));
            path.line_to(Point::new(end_x, end.y));
            path.line_to(end);
        }
    }
    path
}

/// Colour-only painter drawing each node's footprint as a solid block and nothing else.
///
/// Useful as a deterministic capability for hosts that only need silhouettes.
#[derive(Clone, Copy, Debug)]
pub struct SilhouettePainter {
    /// Fill colour.
    pub colour: Rgba8,
}

impl GraphPainter for SilhouettePainter {
    fn draw_connections(&self, _scope: &PaintScope<'_>, _ctx: &mut DrawContext) {}

    fn draw_node(&self, _scope: &PaintScope<'_>, node: &Node, ctx: &mut DrawContext) {
        let fp = node.footprint();
        ctx.fill_rect(Rect::from_origin_size(Point::ZERO, fp.size()), self.colour);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
