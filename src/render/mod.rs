//! Drawing surfaces, the painter capability and the live canvas.

/// Canvas-style drawing context over the CPU rasterizer.
pub mod context;
/// Live viewport frames.
pub mod frame;
/// Node and link drawing routines.
pub mod painter;
/// Live canvas state and paint scopes.
pub mod surface;
