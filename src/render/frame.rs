use crate::encode::png::pixmap_to_rgba8;
use crate::foundation::error::GraphshotResult;
use crate::graph::model::Graph;
use crate::render::context::DrawContext;
use crate::render::surface::LiveCanvas;

/// A rendered frame as RGBA8 pixels.
///
/// Frames handed out by graphshot use straight alpha; the flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA bytes of the pixel at `(x, y)`, if in range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }
}

impl LiveCanvas {
    /// Render what the on-screen canvas currently shows: background, viewport transform, culled
    /// nodes, selection, overlays.
    #[tracing::instrument(skip(self, graph), fields(nodes = graph.nodes.len()))]
    pub fn render_frame(&self, graph: &Graph) -> GraphshotResult<FrameRGBA> {
        let dpr = sanitize_device_pixel_ratio(self.config.device_pixel_ratio);
        let width = (self.config.size.width * dpr).max(0.0) as u32;
        let height = (self.config.size.height * dpr).max(0.0) as u32;

        let mut ctx = DrawContext::allocate(width, height)?;
        ctx.clear(self.config.colours.background);
        ctx.scale(dpr);

        let scope = self.paint_scope(graph);
        ctx.save();
        scope.view.apply(&mut ctx);
        scope.paint_graph(&mut ctx);
        if self.config.snap_guides {
            for node in scope.visible_nodes.iter().filter(|n| scope.is_selected(n.id)) {
                scope.draw_snap_guide(node, &mut ctx);
            }
        }
        if scope.flags.render_execution_order {
            scope.draw_execution_order(&mut ctx);
        }
        ctx.restore();

        let pixmap = ctx.into_pixmap();
        Ok(FrameRGBA {
            width,
            height,
            data: pixmap_to_rgba8(&pixmap),
            premultiplied: false,
        })
    }
}

/// Device pixel ratio with non-finite or non-positive values replaced by 1.
pub(crate) fn sanitize_device_pixel_ratio(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
