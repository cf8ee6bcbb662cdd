//! Node-graph model consumed by the renderer.

/// Bounds calculation over node footprints.
pub mod bounds;
/// Graph, node and link types.
pub mod model;
/// Root graph, sub-graphs and focus.
pub mod workspace;
