//! graphshot renders node-graph editor canvases into standalone images.
//!
//! The snapshot is independent of the live viewport: pan, zoom and selection never leak into
//! the output. The public API is a single composition call:
//!
//! - Describe the graph as a [`Graph`] (or load a [`Workspace`])
//! - Hold a [`LiveCanvas`] carrying the host's [`GraphPainter`]
//! - Call [`compose`] (or [`capture_canvas_screenshot`]) and receive a PNG [`Snapshot`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Snapshot composition.
pub mod compose;
/// Image payload encoding.
pub mod encode;
/// Node-graph model.
pub mod graph;
/// Drawing surfaces and painters.
pub mod render;

pub use crate::foundation::core::{Affine, BezPath, Bounds, Point, Rect, Rgba8, Size, Vec2};
pub use crate::foundation::error::{GraphshotError, GraphshotResult};

pub use crate::compose::adapter::capture_canvas_screenshot;
pub use crate::compose::snapshot::{
    ComposeOpts, DEFAULT_PADDING, Snapshot, SnapshotComposer, compose,
};
pub use crate::encode::png::{decode_png_data_url, encode_png, png_data_url};
pub use crate::graph::bounds::{BoundsCalculator, FootprintBounds, calculate_node_bounds};
pub use crate::graph::model::{Graph, Link, Node, NodeId};
pub use crate::graph::workspace::Workspace;
pub use crate::render::context::DrawContext;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::painter::{DefaultPainter, GraphPainter, SilhouettePainter};
pub use crate::render::surface::{
    CanvasConfig, ColourConfig, LinkRenderMode, LiveCanvas, PaintScope, RenderFlags,
    ViewTransform, Viewport,
};
