//! Guarded pixel-buffer primitives.
//!
//! Every intermediate image in the pipeline is a premultiplied RGBA
//! `tiny_skia::Pixmap`. Straight-alpha RGBA appears only at the decode and
//! encode boundaries. Allocations are size-guarded so a hostile input
//! cannot abort the process on OOM.

use crate::color::Rgba;
use crate::error::RenderError;
use image::RgbaImage;
use tiny_skia::ColorU8;
use tiny_skia::FilterQuality;
use tiny_skia::IntSize;
use tiny_skia::Pixmap;
use tiny_skia::PixmapPaint;
use tiny_skia::Transform;

const BYTES_PER_PIXEL: u64 = 4;
/// Upper bound on a single pixmap allocation.
pub(crate) const MAX_PIXMAP_BYTES: u64 = 256 * 1024 * 1024;

fn guard_dimensions(width: u32, height: u32, context: &str) -> Result<usize, RenderError> {
  if width == 0 || height == 0 {
    return Err(RenderError::InvalidParameters {
      message: format!("{context}: pixmap size is zero ({width}x{height})"),
    });
  }

  let pixels = (width as u64)
    .checked_mul(height as u64)
    .ok_or(RenderError::InvalidParameters {
      message: format!("{context}: pixmap dimensions overflow ({width}x{height})"),
    })?;
  let bytes = pixels
    .checked_mul(BYTES_PER_PIXEL)
    .ok_or(RenderError::InvalidParameters {
      message: format!("{context}: pixmap byte size overflow ({width}x{height})"),
    })?;
  if bytes > MAX_PIXMAP_BYTES {
    return Err(RenderError::InvalidParameters {
      message: format!(
        "{context}: pixmap {}x{} would allocate {} bytes (limit {})",
        width, height, bytes, MAX_PIXMAP_BYTES
      ),
    });
  }

  Ok(bytes as usize)
}

fn allocate_pixmap_bytes(bytes: usize) -> Result<Vec<u8>, RenderError> {
  let mut buffer = Vec::new();
  if let Err(err) = buffer.try_reserve_exact(bytes) {
    return Err(RenderError::InvalidParameters {
      message: format!("pixmap allocation failed: {err}"),
    });
  }
  buffer.resize(bytes, 0);
  Ok(buffer)
}

/// Allocates a transparent pixmap with dimension and size guards applied.
pub(crate) fn new_pixmap(width: u32, height: u32, context: &str) -> Result<Pixmap, RenderError> {
  let bytes = guard_dimensions(width, height, context)?;
  let buffer = allocate_pixmap_bytes(bytes)?;
  let size = IntSize::from_wh(width, height).ok_or(RenderError::InvalidParameters {
    message: format!("{context}: pixmap dimensions out of range ({width}x{height})"),
  })?;
  Pixmap::from_vec(buffer, size).ok_or(RenderError::InvalidParameters {
    message: format!("{context}: pixmap creation failed for {width}x{height} ({bytes} bytes)"),
  })
}

/// Allocates a pixmap uniformly filled with `color`.
pub(crate) fn new_filled_pixmap(
  width: u32,
  height: u32,
  color: Rgba,
  context: &str,
) -> Result<Pixmap, RenderError> {
  let mut pixmap = new_pixmap(width, height, context)?;
  pixmap.fill(color.to_color());
  Ok(pixmap)
}

/// Converts straight-alpha RGBA pixels into a premultiplied pixmap.
pub(crate) fn pixmap_from_rgba(image: &RgbaImage) -> Result<Pixmap, RenderError> {
  let (width, height) = image.dimensions();
  let mut pixmap = new_pixmap(width, height, "decoded image")?;
  for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
    let [r, g, b, a] = src.0;
    *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
  }
  Ok(pixmap)
}

/// Height of an aspect-preserving scale of `width x height` to `target_width`.
pub fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
  let exact = target_width as f64 * height as f64 / width as f64;
  (exact.round() as u32).max(1)
}

/// Scales `src` to `target_width`, preserving the aspect ratio exactly.
///
/// The new height is `round(target_width * height / width)`; nothing is
/// cropped. Sampling is bilinear.
pub fn scale_to_width(src: &Pixmap, target_width: u32, context: &str) -> Result<Pixmap, RenderError> {
  if src.width() == target_width {
    return Ok(src.clone());
  }
  let target_height = scaled_height(src.width(), src.height(), target_width);
  let mut out = new_pixmap(target_width, target_height, context)?;

  let mut paint = PixmapPaint::default();
  paint.quality = FilterQuality::Bilinear;
  let sx = target_width as f32 / src.width() as f32;
  let sy = target_height as f32 / src.height() as f32;
  out.draw_pixmap(0, 0, src.as_ref(), &paint, Transform::from_scale(sx, sy), None);
  Ok(out)
}
