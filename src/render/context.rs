use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8, Vec2};
use crate::foundation::error::{GraphshotError, GraphshotResult};
use kurbo::Shape;
use std::sync::Arc;

const PATH_TOLERANCE: f64 = 0.1;

/// A 2D drawing surface with canvas-style transform state.
///
/// Wraps a `vello_cpu` render context. `save`/`restore` push and pop the current transform;
/// `translate`/`scale` post-multiply it, so later calls act in the already-transformed space.
pub struct DrawContext {
    ctx: vello_cpu::RenderContext,
    transform: Affine,
    stack: Vec<Affine>,
}

impl std::fmt::Debug for DrawContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawContext")
            .field("width", &self.ctx.width())
            .field("height", &self.ctx.height())
            .field("transform", &self.transform)
            .field("depth", &self.stack.len())
            .finish()
    }
}

impl DrawContext {
    /// Allocate a surface of `width x height` device pixels.
    ///
    /// Fails when either extent is zero or does not fit the rasterizer's `u16` limit.
    pub fn allocate(width: u32, height: u32) -> GraphshotResult<Self> {
        if width == 0 || height == 0 {
            return Err(GraphshotError::render(format!(
                "surface extent must be non-zero (got {width}x{height})"
            )));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| GraphshotError::render(format!("surface width exceeds u16: {width}")))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| GraphshotError::render(format!("surface height exceeds u16: {height}")))?;

        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            transform: Affine::IDENTITY,
            stack: Vec::new(),
        })
    }

    /// Surface width in device pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.ctx.width())
    }

    /// Surface height in device pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.ctx.height())
    }

    /// Current transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Push the current transform.
    pub fn save(&mut self) {
        self.stack.push(self.transform);
    }

    /// Pop the last saved transform. Unbalanced calls are ignored.
    pub fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    /// Translate subsequent drawing by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.transform = self.transform * Affine::translate(delta);
    }

    /// Uniformly scale subsequent drawing.
    pub fn scale(&mut self, factor: f64) {
        self.transform = self.transform * Affine::scale(factor);
    }

    /// Fill `rect` (current space) with a solid colour.
    pub fn fill_rect(&mut self, rect: Rect, colour: Rgba8) {
        self.prepare(colour);
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Fill a rounded rectangle.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, colour: Rgba8) {
        let path = rect.to_rounded_rect(radius).to_path(PATH_TOLERANCE);
        self.fill_path(&path, colour);
    }

    /// Fill a circle.
    pub fn fill_circle(&mut self, center: Point, radius: f64, colour: Rgba8) {
        let path = kurbo::Circle::new(center, radius).to_path(PATH_TOLERANCE);
        self.fill_path(&path, colour);
    }

    /// Fill an arbitrary path (non-zero winding).
    pub fn fill_path(&mut self, path: &BezPath, colour: Rgba8) {
        self.prepare(colour);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Stroke a path with the given line width.
    pub fn stroke_path(&mut self, path: &BezPath, width: f64, colour: Rgba8) {
        self.prepare(colour);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    /// Stroke the outline of a rectangle.
    pub fn stroke_rect(&mut self, rect: Rect, width: f64, colour: Rgba8) {
        self.stroke_path(&rect.to_path(PATH_TOLERANCE), width, colour);
    }

    /// Run `f` inside an opacity layer. Opacity `>= 1` draws directly.
    pub fn with_opacity(&mut self, opacity: f32, f: impl FnOnce(&mut Self)) {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity >= 1.0 {
            f(self);
            return;
        }
        self.ctx.push_opacity_layer(opacity);
        f(self);
        self.ctx.pop_layer();
    }

    /// Fill the whole surface, ignoring the current transform.
    pub fn clear(&mut self, colour: Rgba8) {
        let full = Rect::new(0.0, 0.0, f64::from(self.width()), f64::from(self.height()));
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(to_cpu_colour(colour));
        self.ctx.fill_rect(&rect_to_cpu(full));
    }

    /// Draw a rendered pixmap with its top-left at `origin`, one pixmap pixel per unit of the
    /// current space. Sampling is nearest-neighbour so scaling adds no smoothing.
    pub fn draw_pixmap(&mut self, pixmap: vello_cpu::Pixmap, origin: Point) {
        let w = f64::from(pixmap.width());
        let h = f64::from(pixmap.height());
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default()
                .with_quality(vello_cpu::peniko::ImageQuality::Low),
        };

        self.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx
            .set_transform(affine_to_cpu(self.transform * Affine::translate(origin.to_vec2())));
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
    }

    /// Flush pending work and rasterize into a fresh premultiplied pixmap.
    pub fn into_pixmap(mut self) -> vello_cpu::Pixmap {
        let mut pixmap = vello_cpu::Pixmap::new(self.ctx.width(), self.ctx.height());
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap
    }

    fn prepare(&mut self, colour: Rgba8) {
        self.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx.set_paint(to_cpu_colour(colour));
    }
}

fn to_cpu_colour(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
