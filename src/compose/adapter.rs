use crate::compose::snapshot::{ComposeOpts, Snapshot, compose};
use crate::graph::workspace::Workspace;
use crate::render::surface::LiveCanvas;

/// Snapshot whatever graph the editor currently shows.
///
/// Resolves the focused sub-graph (falling back to the root graph) and the canvas's device pixel
/// ratio, then defers to [`compose`]. Any missing piece yields `None`.
#[tracing::instrument(skip(workspace, canvas))]
pub fn capture_canvas_screenshot(
    workspace: Option<&Workspace>,
    canvas: Option<&LiveCanvas>,
    padding: f64,
) -> Option<Snapshot> {
    let (Some(workspace), Some(canvas)) = (workspace, canvas) else {
        tracing::debug!("no active workspace or canvas");
        return None;
    };

    let graph = workspace.active_graph();
    if graph.is_empty() {
        tracing::debug!("active graph has no nodes");
        return None;
    }

    let opts = ComposeOpts::default()
        .with_padding(padding)
        .with_device_pixel_ratio(canvas.config.device_pixel_ratio);
    compose(graph, canvas, &opts)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/adapter.rs"]
mod tests;
