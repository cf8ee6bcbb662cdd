use crate::foundation::error::{GraphshotError, GraphshotResult};
use base64::Engine as _;
use std::io::Cursor;

/// MIME prefix of PNG data URLs.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode tightly packed straight-alpha RGBA8 pixels as PNG.
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> GraphshotResult<Vec<u8>> {
    encode_png_owned(width, height, rgba.to_vec())
}

fn encode_png_owned(width: u32, height: u32, rgba: Vec<u8>) -> GraphshotResult<Vec<u8>> {
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if rgba.len() != expected {
        return Err(GraphshotError::encode(format!(
            "rgba byte len mismatch: expected {expected}, got {}",
            rgba.len()
        )));
    }
    let img = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| GraphshotError::encode("rgba buffer does not match dimensions"))?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| GraphshotError::encode(format!("png encode failed: {e}")))?;
    Ok(buf)
}

/// Encode a rendered pixmap as PNG.
pub(crate) fn encode_pixmap_png(pixmap: &vello_cpu::Pixmap) -> GraphshotResult<Vec<u8>> {
    encode_png_owned(
        u32::from(pixmap.width()),
        u32::from(pixmap.height()),
        pixmap_to_rgba8(pixmap),
    )
}

/// Wrap PNG bytes in a `data:` URL.
pub fn png_data_url(png: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(png);
    format!("{PNG_DATA_URL_PREFIX}{b64}")
}

/// Decode a PNG `data:` URL back to bytes.
pub fn decode_png_data_url(url: &str) -> GraphshotResult<Vec<u8>> {
    let b64 = url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or_else(|| GraphshotError::validation("not a PNG data URL"))?;
    base64::engine::general_purpose::STANDARD
        .decode(b64)
        .map_err(|e| GraphshotError::encode(format!("invalid base64 payload: {e}")))
}

/// Copy a premultiplied pixmap out as straight-alpha RGBA8.
pub(crate) fn pixmap_to_rgba8(pixmap: &vello_cpu::Pixmap) -> Vec<u8> {
    let mut out = pixmap.data_as_u8_slice().to_vec();
    unpremultiply_rgba8_in_place(&mut out);
    out
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
