//! Offscreen snapshot composition.

/// Editor-state adapter resolving the active graph.
pub mod adapter;
/// Viewport-independent composition of a graph into an image.
pub mod snapshot;
