use crate::foundation::core::{Affine, Bounds, Point, Rect, Rgba8, Size, Vec2, vec2_repr};
use crate::graph::model::{Graph, NODE_TITLE_HEIGHT, Node, NodeId};
use crate::render::context::DrawContext;
use crate::render::painter::{DefaultPainter, GraphPainter};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Zoom level below which the live canvas switches to low-quality drawing.
pub const LOW_QUALITY_SCALE: f64 = 0.6;

static NO_SELECTION: BTreeSet<NodeId> = BTreeSet::new();

/// Pan and zoom of the live canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Zoom factor (1 = 100%).
    pub scale: f64,
    /// Pan offset in graph units, applied after scaling.
    #[serde(with = "vec2_repr")]
    pub offset: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

/// Quality and decoration switches read by painters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderFlags {
    /// Skip shadows and outlines.
    pub low_quality: bool,
    /// Global opacity applied to every node.
    pub editor_alpha: f32,
    /// Draw drop shadows under nodes.
    pub render_shadows: bool,
    /// Overlay the execution order.
    pub render_execution_order: bool,
    /// Draw slot dots on collapsed nodes.
    pub render_collapsed_slots: bool,
    /// Suppress the selection border.
    pub skip_border: bool,
}

impl Default for RenderFlags {
    fn default() -> Self {
        Self {
            low_quality: false,
            editor_alpha: 1.0,
            render_shadows: true,
            render_execution_order: false,
            render_collapsed_slots: true,
            skip_border: false,
        }
    }
}

impl RenderFlags {
    /// Flags forced for offscreen snapshots: high quality, shadows on, no overlays.
    pub fn snapshot() -> Self {
        Self {
            low_quality: false,
            editor_alpha: 1.0,
            render_shadows: true,
            render_execution_order: false,
            render_collapsed_slots: true,
            skip_border: false,
        }
    }
}

/// How links are routed between slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkRenderMode {
    /// Cubic curve with horizontal handles.
    #[default]
    Spline,
    /// Short horizontal stubs joined by a straight segment.
    Linear,
    /// Orthogonal steps.
    Straight,
}

/// Colour palette, including per-type link colours.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColourConfig {
    /// Canvas background for live frames.
    pub background: Rgba8,
    /// Default title bar colour.
    pub node_title: Rgba8,
    /// Default body colour.
    pub node_body: Rgba8,
    /// Thin outline around unselected nodes.
    pub node_outline: Rgba8,
    /// Selection border.
    pub selection: Rgba8,
    /// Drop shadow.
    pub shadow: Rgba8,
    /// Input slot dots.
    pub slot_input: Rgba8,
    /// Output slot dots.
    pub slot_output: Rgba8,
    /// Sub-graph badge.
    pub subgraph_badge: Rgba8,
    /// Links without a typed colour.
    pub link_default: Rgba8,
    /// Link colours keyed by link kind.
    pub link_types: BTreeMap<String, Rgba8>,
}

impl Default for ColourConfig {
    fn default() -> Self {
        Self {
            background: Rgba8::rgb(0x20, 0x20, 0x20),
            node_title: Rgba8::rgb(0x33, 0x33, 0x33),
            node_body: Rgba8::rgb(0x35, 0x35, 0x35),
            node_outline: Rgba8::rgb(0x66, 0x66, 0x66),
            selection: Rgba8::rgb(0xff, 0xff, 0xff),
            shadow: Rgba8::rgba(0, 0, 0, 0x80),
            slot_input: Rgba8::rgb(0x77, 0x88, 0x99),
            slot_output: Rgba8::rgb(0x99, 0xaa, 0x77),
            subgraph_badge: Rgba8::rgb(0x55, 0x88, 0xcc),
            link_default: Rgba8::rgb(0x9a, 0x9a, 0xa9),
            link_types: BTreeMap::new(),
        }
    }
}

impl ColourConfig {
    /// Colour for a link of the given kind.
    pub fn link_colour(&self, kind: Option<&str>) -> Rgba8 {
        kind.and_then(|k| self.link_types.get(k))
            .copied()
            .unwrap_or(self.link_default)
    }

    /// Title bar colour for `node`.
    pub fn title_colour(&self, node: &Node) -> Rgba8 {
        node.color.unwrap_or(self.node_title)
    }

    /// Body colour for `node`.
    pub fn body_colour(&self, node: &Node) -> Rgba8 {
        node.bgcolor.unwrap_or(self.node_body)
    }
}

/// Serializable state of a live canvas (everything except the painter).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// On-screen size in logical pixels.
    #[serde(with = "crate::foundation::core::size_repr")]
    pub size: Size,
    /// Physical pixels per logical pixel.
    pub device_pixel_ratio: f64,
    /// Current pan and zoom.
    pub viewport: Viewport,
    /// Selected nodes.
    pub selection: BTreeSet<NodeId>,
    /// Quality flags.
    pub flags: RenderFlags,
    /// Palette.
    pub colours: ColourConfig,
    /// Link routing.
    pub link_mode: LinkRenderMode,
    /// Sub-graph currently shown, if any.
    pub subgraph: Option<String>,
    /// Draw snap guides for selected nodes.
    pub snap_guides: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: Size::new(1280.0, 720.0),
            device_pixel_ratio: 1.0,
            viewport: Viewport::default(),
            selection: BTreeSet::new(),
            flags: RenderFlags::default(),
            colours: ColourConfig::default(),
            link_mode: LinkRenderMode::default(),
            subgraph: None,
            snap_guides: false,
        }
    }
}

/// The live, stateful editor canvas: pan, zoom, selection and a drawing capability.
#[derive(Clone)]
pub struct LiveCanvas {
    /// Viewport, selection, flags and palette.
    pub config: CanvasConfig,
    painter: Arc<dyn GraphPainter>,
}

impl std::fmt::Debug for LiveCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveCanvas")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for LiveCanvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default(), Arc::new(DefaultPainter::default()))
    }
}

impl LiveCanvas {
    /// Canvas with an explicit configuration and painter.
    pub fn new(config: CanvasConfig, painter: Arc<dyn GraphPainter>) -> Self {
        Self { config, painter }
    }

    /// Drawing capability bound to this canvas.
    pub fn painter(&self) -> &dyn GraphPainter {
        self.painter.as_ref()
    }

    /// Replace the drawing capability.
    pub fn set_painter(&mut self, painter: Arc<dyn GraphPainter>) {
        self.painter = painter;
    }

    /// Pan by `delta` graph units.
    pub fn pan(&mut self, delta: Vec2) {
        self.config.viewport.offset += delta;
    }

    /// Set the zoom factor.
    pub fn set_zoom(&mut self, scale: f64) {
        self.config.viewport.scale = scale;
    }

    /// Add `id` to the selection.
    pub fn select(&mut self, id: NodeId) {
        self.config.selection.insert(id);
    }

    /// Remove `id` from the selection.
    pub fn deselect(&mut self, id: NodeId) {
        self.config.selection.remove(&id);
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.config.selection.clear();
    }

    /// Live paint scope over `graph`; see [`PaintScope::live`].
    pub fn paint_scope<'a>(&'a self, graph: &'a Graph) -> PaintScope<'a> {
        PaintScope::live(self, graph)
    }

    /// Live view transform: viewport pan and zoom, no extra translation.
    pub fn view_transform(&self) -> ViewTransform {
        ViewTransform {
            scale: self.config.viewport.scale,
            offset: self.config.viewport.offset,
            translation: Vec2::ZERO,
        }
    }
}

/// Value form of the view transform hook.
///
/// Painters that need to re-enter view space call [`ViewTransform::apply`]; it translates by
/// `translation`, then scales, then applies the pan `offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Zoom factor.
    pub scale: f64,
    /// Pan offset in graph units.
    pub offset: Vec2,
    /// Extra translation applied before zoom.
    pub translation: Vec2,
}

impl ViewTransform {
    /// Identity scale and zero offset with a fixed content translation.
    pub fn translated(translation: Vec2) -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
            translation,
        }
    }

    /// Graph space to surface space.
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translation)
            * Affine::scale(self.scale)
            * Affine::translate(self.offset)
    }

    /// Apply this transform to `ctx`.
    pub fn apply(self, ctx: &mut DrawContext) {
        ctx.translate(self.translation);
        ctx.scale(self.scale);
        ctx.translate(self.offset);
    }

    /// Map a graph-space point to surface space.
    pub fn graph_to_surface(self, p: Point) -> Point {
        self.to_affine() * p
    }
}

/// Everything a painter sees while drawing one pass.
///
/// Built either from the live canvas ([`PaintScope::live`]) or as a shallow copy of it with the
/// viewport, visibility, selection and quality fields replaced ([`PaintScope::snapshot`]).
/// Drawing routines and palette are borrowed from the canvas either way.
#[derive(Clone)]
pub struct PaintScope<'a> {
    /// Graph being drawn.
    pub graph: &'a Graph,
    /// Nodes to draw, in graph order.
    pub visible_nodes: Vec<&'a Node>,
    /// Highlighted nodes.
    pub selection: &'a BTreeSet<NodeId>,
    /// View transform hook.
    pub view: ViewTransform,
    /// Quality flags.
    pub flags: RenderFlags,
    /// Palette, copied through.
    pub colours: &'a ColourConfig,
    /// Link routing, copied through.
    pub link_mode: LinkRenderMode,
    /// Sub-graph shown, copied through.
    pub subgraph: Option<&'a str>,
    painter: &'a dyn GraphPainter,
}

impl std::fmt::Debug for PaintScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintScope")
            .field("visible_nodes", &self.visible_nodes.len())
            .field("selection", &self.selection)
            .field("view", &self.view)
            .field("flags", &self.flags)
            .field("link_mode", &self.link_mode)
            .field("subgraph", &self.subgraph)
            .finish_non_exhaustive()
    }
}

impl<'a> PaintScope<'a> {
    /// Scope for the on-screen canvas: viewport transform, culled nodes, live selection.
    pub fn live(canvas: &'a LiveCanvas, graph: &'a Graph) -> Self {
        let view = canvas.view_transform();
        let mut flags = canvas.config.flags;
        if view.scale < LOW_QUALITY_SCALE {
            flags.low_quality = true;
        }

        let visible_rect = visible_graph_rect(view, canvas.config.size);
        let visible_nodes = graph
            .nodes
            .iter()
            .filter(|n| {
                visible_rect.is_some_and(|r| {
                    let chrome = n.footprint().union(Rect::new(
                        n.pos.x,
                        n.pos.y - NODE_TITLE_HEIGHT,
                        n.pos.x,
                        n.pos.y,
                    ));
                    overlaps(r, chrome)
                })
            })
            .collect();

        Self {
            graph,
            visible_nodes,
            selection: &canvas.config.selection,
            view,
            flags,
            colours: &canvas.config.colours,
            link_mode: canvas.config.link_mode,
            subgraph: canvas.config.subgraph.as_deref(),
            painter: canvas.painter(),
        }
    }

    /// Offscreen counterpart of the live scope, built from the same canvas.
    ///
    /// Scale 1, zero offset, content translated so `bounds`' minimum corner lands at
    /// `(padding, padding)`; every node visible; nothing selected; quality forced high.
    pub fn snapshot(
        canvas: &'a LiveCanvas,
        graph: &'a Graph,
        bounds: Bounds,
        padding: f64,
    ) -> Self {
        Self {
            graph,
            visible_nodes: graph.nodes.iter().collect(),
            selection: &NO_SELECTION,
            view: ViewTransform::translated(Vec2::new(
                padding - bounds.min_x,
                padding - bounds.min_y,
            )),
            flags: RenderFlags::snapshot(),
            colours: &canvas.config.colours,
            link_mode: canvas.config.link_mode,
            subgraph: canvas.config.subgraph.as_deref(),
            painter: canvas.painter(),
        }
    }

    /// Drawing capability carried over from the canvas.
    pub fn painter(&self) -> &'a dyn GraphPainter {
        self.painter
    }

    /// `true` if `id` is highlighted in this scope.
    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selection.contains(&id)
    }

    /// Visible node by id.
    pub fn visible_node(&self, id: NodeId) -> Option<&'a Node> {
        self.visible_nodes.iter().copied().find(|n| n.id == id)
    }

    /// Draw all connections between visible nodes (graph space).
    pub fn draw_connections(&self, ctx: &mut DrawContext) {
        self.painter.draw_connections(self, ctx);
    }

    /// Draw one node (node-local space).
    pub fn draw_node(&self, node: &Node, ctx: &mut DrawContext) {
        self.painter.draw_node(self, node, ctx);
    }

    /// Draw a snap guide for one node (graph space).
    pub fn draw_snap_guide(&self, node: &Node, ctx: &mut DrawContext) {
        self.painter.draw_snap_guide(self, node, ctx);
    }

    /// Draw the execution-order overlay (graph space).
    pub fn draw_execution_order(&self, ctx: &mut DrawContext) {
        self.painter.draw_execution_order(self, ctx);
    }

    /// Connections first, then each visible node translated to its position, in list order.
    pub fn paint_graph(&self, ctx: &mut DrawContext) {
        self.draw_connections(ctx);
        for node in &self.visible_nodes {
            ctx.save();
            ctx.translate(node.pos.to_vec2());
            self.draw_node(node, ctx);
            ctx.restore();
        }
    }
}

fn visible_graph_rect(view: ViewTransform, size: Size) -> Option<Rect> {
    let affine = view.to_affine();
    if affine.determinant() == 0.0 || !affine.is_finite() {
        return None;
    }
    let inv = affine.inverse();
    let screen = Rect::from_origin_size(Point::ZERO, size);
    Some(inv.transform_rect_bbox(screen))
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
