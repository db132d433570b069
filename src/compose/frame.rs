//! Device-frame overlay compositing.

use crate::compose::mask;
use crate::error::Result;
use crate::pixmap;
use tiny_skia::Pixmap;
use tiny_skia::PixmapPaint;
use tiny_skia::Transform;

/// Scales a screenshot into the device frame and composites the frame over
/// it.
///
/// The screenshot is scaled to `target_width` (aspect preserved, no
/// cropping), its corners are rounded with `radius`, and it is centered on a
/// transparent canvas the size of the frame asset. The frame is then
/// source-over composited on top, so its transparent cutout reveals the
/// screenshot. The result always has the frame asset's dimensions; a
/// screenshot that overshoots the frame is clipped by the paste.
pub fn overlay_screenshot(
  screenshot: &Pixmap,
  frame: &Pixmap,
  target_width: u32,
  radius: u32,
) -> Result<Pixmap> {
  let mut scaled = pixmap::scale_to_width(screenshot, target_width, "scaled screenshot")?;
  let corner_mask = mask::rounded_mask(scaled.width(), scaled.height(), radius)?;
  mask::apply_mask(&mut scaled, &corner_mask);

  let mut canvas = pixmap::new_pixmap(frame.width(), frame.height(), "frame canvas")?;
  let offset_x = (frame.width() as i32 - scaled.width() as i32).div_euclid(2);
  let offset_y = (frame.height() as i32 - scaled.height() as i32).div_euclid(2);

  // The rounded screenshot's own alpha is the paste mask: transparent
  // corners never overwrite canvas pixels.
  let paint = PixmapPaint::default();
  canvas.draw_pixmap(
    offset_x,
    offset_y,
    scaled.as_ref(),
    &paint,
    Transform::identity(),
    None,
  );
  canvas.draw_pixmap(0, 0, frame.as_ref(), &paint, Transform::identity(), None);

  Ok(canvas)
}
