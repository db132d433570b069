//! Rounded-rectangle alpha masks.

use crate::error::RenderError;
use crate::pixmap::new_pixmap;
use tiny_skia::FillRule;
use tiny_skia::Mask;
use tiny_skia::MaskType;
use tiny_skia::Paint;
use tiny_skia::Path;
use tiny_skia::PathBuilder;
use tiny_skia::Pixmap;
use tiny_skia::Rect;
use tiny_skia::Transform;

/// Cubic bezier circle approximation constant: 4/3 * tan(pi/8).
const KAPPA: f32 = 0.552_284_8;

/// Builds an 8-bit coverage mask shaped as a rounded rectangle.
///
/// Coverage is 255 inside the rectangle, 0 outside, with each corner
/// replaced by a quarter circle of the given radius; edges are antialiased.
/// The radius is clamped to `min(width, height) / 2` rather than rejected,
/// and a radius of zero yields a fully opaque rectangle.
pub fn rounded_mask(width: u32, height: u32, radius: u32) -> Result<Mask, RenderError> {
  let mut scratch = new_pixmap(width, height, "rounded mask")?;
  let radius = (radius as f32).min(width.min(height) as f32 / 2.0);
  let path =
    rounded_rect_path(width as f32, height as f32, radius).ok_or(RenderError::InvalidParameters {
      message: format!("degenerate mask geometry ({width}x{height}, radius {radius})"),
    })?;

  let mut paint = Paint::default();
  paint.set_color_rgba8(255, 255, 255, 255);
  paint.anti_alias = true;
  scratch.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

  Ok(Mask::from_pixmap(scratch.as_ref(), MaskType::Alpha))
}

fn rounded_rect_path(width: f32, height: f32, radius: f32) -> Option<Path> {
  if radius <= 0.0 {
    return Some(PathBuilder::from_rect(Rect::from_xywh(
      0.0, 0.0, width, height,
    )?));
  }

  let (w, h, r) = (width, height, radius);
  let k = r * KAPPA;
  let mut pb = PathBuilder::new();
  pb.move_to(r, 0.0);
  pb.line_to(w - r, 0.0);
  pb.cubic_to(w - r + k, 0.0, w, r - k, w, r);
  pb.line_to(w, h - r);
  pb.cubic_to(w, h - r + k, w - r + k, h, w - r, h);
  pb.line_to(r, h);
  pb.cubic_to(r - k, h, 0.0, h - r + k, 0.0, h - r);
  pb.line_to(0.0, r);
  pb.cubic_to(0.0, r - k, r - k, 0.0, r, 0.0);
  pb.close();
  pb.finish()
}

/// Multiplies a pixmap's pixels by the mask's coverage in place.
///
/// Pixels are premultiplied, so every channel is scaled by the same factor
/// and the premultiplication invariant survives.
pub fn apply_mask(pixmap: &mut Pixmap, mask: &Mask) {
  if pixmap.width() != mask.width() || pixmap.height() != mask.height() {
    return;
  }

  for (chunk, coverage) in pixmap.data_mut().chunks_exact_mut(4).zip(mask.data().iter()) {
    if *coverage == 255 {
      continue;
    }
    for channel in chunk.iter_mut() {
      *channel = ((*channel as u16 * *coverage as u16 + 127) / 255) as u8;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn radius_zero_path_is_plain_rect() {
    let path = rounded_rect_path(40.0, 20.0, 0.0).expect("path");
    let bounds = path.bounds();
    assert_eq!(bounds.width(), 40.0);
    assert_eq!(bounds.height(), 20.0);
  }

  #[test]
  fn mask_matches_requested_dimensions() {
    let mask = rounded_mask(64, 32, 8).expect("mask");
    assert_eq!((mask.width(), mask.height()), (64, 32));
  }

  #[test]
  fn apply_mask_scales_all_channels() {
    let mut pixmap = Pixmap::new(1, 1).expect("pixmap");
    pixmap.data_mut().copy_from_slice(&[200, 100, 50, 200]);
    let mut scratch = Pixmap::new(1, 1).expect("scratch");
    scratch.data_mut().copy_from_slice(&[0, 0, 0, 128]);
    let mask = Mask::from_pixmap(scratch.as_ref(), MaskType::Alpha);

    apply_mask(&mut pixmap, &mask);
    let data = pixmap.data();
    assert_eq!(data[3], ((200u32 * 128 + 127) / 255) as u8);
    assert_eq!(data[0], ((200u32 * 128 + 127) / 255) as u8);
    assert_eq!(data[1], ((100u32 * 128 + 127) / 255) as u8);
  }

  #[test]
  fn mismatched_mask_leaves_pixels_untouched() {
    let mut pixmap = Pixmap::new(2, 2).expect("pixmap");
    pixmap.data_mut().fill(255);
    let before = pixmap.data().to_vec();
    let scratch = Pixmap::new(1, 1).expect("scratch");
    let mask = Mask::from_pixmap(scratch.as_ref(), MaskType::Alpha);

    apply_mask(&mut pixmap, &mask);
    assert_eq!(pixmap.data(), &before[..]);
  }
}
