//! Image payload encoding.
//!
//! Snapshots are delivered as PNG bytes, optionally wrapped in a base64 `data:` URL.

/// PNG encoding and data URLs.
pub mod png;
