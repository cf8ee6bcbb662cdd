use crate::encode::png::{encode_pixmap_png, png_data_url};
use crate::foundation::core::{Bounds, Point, Rgba8, Vec2};
use crate::foundation::error::{GraphshotError, GraphshotResult};
use crate::graph::bounds::{BoundsCalculator, FootprintBounds};
use crate::graph::model::Graph;
use crate::render::context::DrawContext;
use crate::render::frame::sanitize_device_pixel_ratio;
use crate::render::surface::{LiveCanvas, PaintScope};
use anyhow::Context as _;
use std::path::Path;

/// Default margin around the node bounds, in logical units.
pub const DEFAULT_PADDING: f64 = 50.0;

/// Options for [`compose`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposeOpts {
    /// Margin around the bounds on every side. The drawing pass shifts content down by a
    /// further `padding / 2`.
    pub padding: f64,
    /// Physical pixels per logical unit. Non-finite or non-positive values mean 1.
    pub device_pixel_ratio: f64,
    /// If set, the final surface is cleared to this colour before compositing.
    pub clear_rgba: Option<Rgba8>,
}

impl Default for ComposeOpts {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            device_pixel_ratio: 1.0,
            clear_rgba: None,
        }
    }
}

impl ComposeOpts {
    /// Return options with a different padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Return options with a different device pixel ratio.
    pub fn with_device_pixel_ratio(mut self, dpr: f64) -> Self {
        self.device_pixel_ratio = dpr;
        self
    }

    /// Return options with a configured clear colour for the final surface.
    pub fn with_clear_rgba(mut self, clear: Option<Rgba8>) -> Self {
        self.clear_rgba = clear;
        self
    }
}

/// An encoded snapshot of a graph region.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Physical width in pixels.
    pub width: u32,
    /// Physical height in pixels.
    pub height: u32,
    /// Logical width (`bounds.width + 2 * padding`, truncated).
    pub logical_width: u32,
    /// Logical height (`bounds.height + 2 * padding`, truncated).
    pub logical_height: u32,
    /// Ratio the final surface was scaled by.
    pub device_pixel_ratio: f64,
    /// Node bounds the snapshot was framed around.
    pub bounds: Bounds,
    /// Padding used.
    pub padding: f64,
    /// PNG-encoded image.
    pub png: Vec<u8>,
}

impl Snapshot {
    /// The PNG as a `data:image/png;base64,` URL.
    pub fn to_data_url(&self) -> String {
        png_data_url(&self.png)
    }

    /// Write the PNG to `path`, creating parent directories.
    pub fn save_png(&self, path: impl AsRef<Path>) -> GraphshotResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(path, &self.png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    /// Decode the PNG payload back to straight-alpha RGBA8.
    pub fn decode_rgba(&self) -> GraphshotResult<image::RgbaImage> {
        let img = image::load_from_memory_with_format(&self.png, image::ImageFormat::Png)
            .map_err(|e| GraphshotError::encode(format!("png decode failed: {e}")))?;
        Ok(img.to_rgba8())
    }
}

#[derive(thiserror::Error, Debug)]
enum Unavailable {
    #[error("graph has no nodes")]
    EmptyGraph,
    #[error("padding must be finite and non-negative (got {0})")]
    InvalidPadding(f64),
    #[error("bounds calculation yielded no result")]
    NoBounds,
    #[error("final surface: {0}")]
    FinalSurface(GraphshotError),
    #[error("staging surface: {0}")]
    StagingSurface(GraphshotError),
    #[error("encode: {0}")]
    Encode(GraphshotError),
}

/// Renders graph snapshots independent of the live viewport.
///
/// Holds the bounds calculator; everything else is passed per call.
#[derive(Clone, Debug, Default)]
pub struct SnapshotComposer<B = FootprintBounds> {
    bounds: B,
}

impl SnapshotComposer<FootprintBounds> {
    /// Composer using node footprints for bounds.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: BoundsCalculator> SnapshotComposer<B> {
    /// Composer using a custom bounds calculator.
    pub fn with_bounds(bounds: B) -> Self {
        Self { bounds }
    }

    /// Compose `graph` as drawn by `canvas`'s painter into an encoded image.
    ///
    /// Returns `None` for an empty graph, invalid padding, missing bounds, a surface that
    /// cannot be allocated, or an encoding failure. The reason is logged, not returned.
    #[tracing::instrument(skip(self, graph, canvas), fields(nodes = graph.nodes.len()))]
    pub fn compose(
        &self,
        graph: &Graph,
        canvas: &LiveCanvas,
        opts: &ComposeOpts,
    ) -> Option<Snapshot> {
        match self.try_compose(graph, canvas, opts) {
            Ok(snapshot) => Some(snapshot),
            Err(reason) => {
                tracing::debug!(%reason, "no screenshot available");
                None
            }
        }
    }

    fn try_compose(
        &self,
        graph: &Graph,
        canvas: &LiveCanvas,
        opts: &ComposeOpts,
    ) -> Result<Snapshot, Unavailable> {
        if graph.is_empty() {
            return Err(Unavailable::EmptyGraph);
        }
        let padding = opts.padding;
        if !(padding.is_finite() && padding >= 0.0) {
            return Err(Unavailable::InvalidPadding(padding));
        }

        let bounds = self
            .bounds
            .calculate(&graph.nodes)
            .filter(|b| b.is_well_defined())
            .ok_or(Unavailable::NoBounds)?;

        let width = bounds.width + padding * 2.0;
        let height = bounds.height + padding * 2.0;
        let dpr = sanitize_device_pixel_ratio(opts.device_pixel_ratio);

        let mut out =
            DrawContext::allocate(surface_extent(width * dpr), surface_extent(height * dpr))
                .map_err(Unavailable::FinalSurface)?;
        out.scale(dpr);

        let mut staging = DrawContext::allocate(surface_extent(width), surface_extent(height))
            .map_err(Unavailable::StagingSurface)?;

        let scope = PaintScope::snapshot(canvas, graph, bounds, padding);
        paint_staging(&scope, padding, &mut staging);

        if let Some(clear) = opts.clear_rgba {
            out.clear(clear);
        }
        out.draw_pixmap(staging.into_pixmap(), Point::ZERO);

        let (phys_w, phys_h) = (out.width(), out.height());
        let pixmap = out.into_pixmap();
        let png = encode_pixmap_png(&pixmap).map_err(Unavailable::Encode)?;

        tracing::debug!(
            width = phys_w,
            height = phys_h,
            bytes = png.len(),
            "composed snapshot"
        );

        Ok(Snapshot {
            width: phys_w,
            height: phys_h,
            logical_width: surface_extent(width),
            logical_height: surface_extent(height),
            device_pixel_ratio: dpr,
            bounds,
            padding,
            png,
        })
    }
}

/// Compose with the default footprint bounds calculator.
pub fn compose(graph: &Graph, canvas: &LiveCanvas, opts: &ComposeOpts) -> Option<Snapshot> {
    SnapshotComposer::new().compose(graph, canvas, opts)
}

/// Connections, then nodes, with content shifted so the bounds corner sits at
/// `(padding, padding + padding / 2)`.
fn paint_staging(scope: &PaintScope<'_>, padding: f64, ctx: &mut DrawContext) {
    ctx.save();
    ctx.translate(scope.view.translation + Vec2::new(0.0, padding * 0.5));
    scope.paint_graph(ctx);
    ctx.restore();
}

fn surface_extent(v: f64) -> u32 {
    // `as` saturates and maps NaN to 0, which allocation rejects.
    v.trunc() as u32
}

#[cfg(test)]
#[path = "../../tests/unit/compose/snapshot.rs"]
mod tests;
