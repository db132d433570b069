//! Solid-background placement.

use crate::color::Rgba;
use crate::error::Result;
use crate::pixmap;
use tiny_skia::Pixmap;
use tiny_skia::PixmapPaint;
use tiny_skia::Transform;

/// Places `image` on a solid canvas of exactly `canvas_width` x
/// `canvas_height`, horizontally centered and bottom-aligned `padding`
/// pixels above the lower edge.
///
/// An image wider than the canvas, or pushed past its top edge by the
/// padding, is clipped by the paste; the output dimensions never change.
pub fn place_on_background(
  image: &Pixmap,
  canvas_width: u32,
  canvas_height: u32,
  background: Rgba,
  padding: u32,
) -> Result<Pixmap> {
  let mut canvas =
    pixmap::new_filled_pixmap(canvas_width, canvas_height, background, "background canvas")?;

  let x = (canvas_width as i32 - image.width() as i32).div_euclid(2);
  let y = canvas_height as i32 - image.height() as i32 - padding as i32;
  canvas.draw_pixmap(
    x,
    y,
    image.as_ref(),
    &PixmapPaint::default(),
    Transform::identity(),
    None,
  );

  Ok(canvas)
}
