//! Caption measurement and rendering.
//!
//! Layout is a pen-advance walk over the string's glyphs: outlines are
//! recorded in font design units (y-up) and mapped to device pixels at fill
//! time with a scale + y-flip transform. Captions are short single-line
//! strings, so there is no shaping, wrapping or truncation; text wider than
//! the canvas clips silently.

use crate::color::Rgba;
use crate::fonts::ResolvedFont;
use log::warn;
use tiny_skia::FillRule;
use tiny_skia::Paint;
use tiny_skia::Path;
use tiny_skia::PathBuilder;
use tiny_skia::Pixmap;
use tiny_skia::Transform;
use ttf_parser::Face;
use ttf_parser::GlyphId;

/// Vertical gap in pixels between the caption's bounding box and the top of
/// the framed image.
pub const CAPTION_GAP: u32 = 150;

/// Converts ttf-parser glyph outlines to tiny-skia paths.
///
/// Outlines are recorded in font design units with no positioning or
/// scaling; the caller applies the device transform when rasterizing.
struct GlyphOutlineBuilder {
  builder: PathBuilder,
}

impl GlyphOutlineBuilder {
  fn new() -> Self {
    Self {
      builder: PathBuilder::new(),
    }
  }

  fn finish(self) -> Option<Path> {
    self.builder.finish()
  }
}

impl ttf_parser::OutlineBuilder for GlyphOutlineBuilder {
  fn move_to(&mut self, x: f32, y: f32) {
    self.builder.move_to(x, y);
  }

  fn line_to(&mut self, x: f32, y: f32) {
    self.builder.line_to(x, y);
  }

  fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
    self.builder.quad_to(x1, y1, x, y);
  }

  fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
    self.builder.cubic_to(x1, y1, x2, y2, x, y);
  }

  fn close(&mut self) {
    self.builder.close();
  }
}

/// Maps font design units to device pixels: scale, flip Y to match
/// tiny-skia's Y-down coordinate system, then translate.
fn glyph_transform(scale: f32, x: f32, y: f32) -> Transform {
  Transform::from_row(scale, 0.0, 0.0, -scale, x, y)
}

/// A glyph positioned on the baseline, outline still in design units.
struct PositionedGlyph {
  path: Path,
  /// Pen offset from the line origin, device pixels.
  pen_x: f32,
}

/// A measured single-line caption ready to draw.
struct CaptionLayout {
  glyphs: Vec<PositionedGlyph>,
  /// Tight outline bounds relative to the pen origin and baseline,
  /// device pixels, y-down.
  min_x: f32,
  min_y: f32,
  max_x: f32,
  max_y: f32,
}

impl CaptionLayout {
  fn width(&self) -> f32 {
    self.max_x - self.min_x
  }

  fn height(&self) -> f32 {
    self.max_y - self.min_y
  }
}

fn layout_caption(face: &Face, size: f32, text: &str) -> Option<CaptionLayout> {
  let scale = size / face.units_per_em() as f32;
  let mut glyphs = Vec::new();
  let mut bounds: Option<(f32, f32, f32, f32)> = None;
  let mut pen_x = 0.0f32;

  for ch in text.chars() {
    let glyph = face.glyph_index(ch).unwrap_or(GlyphId(0));
    let mut builder = GlyphOutlineBuilder::new();
    if let Some(bbox) = face.outline_glyph(glyph, &mut builder) {
      if let Some(path) = builder.finish() {
        let x0 = pen_x + bbox.x_min as f32 * scale;
        let x1 = pen_x + bbox.x_max as f32 * scale;
        let y0 = -(bbox.y_max as f32) * scale;
        let y1 = -(bbox.y_min as f32) * scale;
        bounds = Some(match bounds {
          None => (x0, y0, x1, y1),
          Some((bx0, by0, bx1, by1)) => (bx0.min(x0), by0.min(y0), bx1.max(x1), by1.max(y1)),
        });
        glyphs.push(PositionedGlyph { path, pen_x });
      }
    }
    pen_x += face.glyph_hor_advance(glyph).unwrap_or(0) as f32 * scale;
  }

  let (min_x, min_y, max_x, max_y) = bounds?;
  Some(CaptionLayout {
    glyphs,
    min_x,
    min_y,
    max_x,
    max_y,
  })
}

/// Draws `text` horizontally centered, its bounding box a fixed gap above
/// `image_top`, mutating the canvas in place.
///
/// Text pushed above row zero or past the canvas edges clips silently.
/// Whitespace-only or unmeasurable text draws nothing.
pub fn draw_caption(
  canvas: &mut Pixmap,
  text: &str,
  font: &ResolvedFont,
  color: Rgba,
  image_top: i32,
) {
  let data = font.font().data.clone();
  let face = match Face::parse(data.as_slice(), font.font().index) {
    Ok(face) => face,
    Err(err) => {
      warn!("caption skipped: font face unreadable: {err}");
      return;
    }
  };

  let Some(layout) = layout_caption(&face, font.size(), text) else {
    return;
  };

  let centered_x = (canvas.width() as i32 - layout.width().round() as i32).div_euclid(2);
  let origin_x = centered_x as f32 - layout.min_x;
  let top = image_top as f32 - layout.height() - CAPTION_GAP as f32;
  let baseline_y = top - layout.min_y;

  let mut paint = Paint::default();
  paint.set_color_rgba8(color.r, color.g, color.b, color.a);
  paint.anti_alias = true;

  let scale = font.size() / face.units_per_em() as f32;
  for glyph in &layout.glyphs {
    let transform = glyph_transform(scale, origin_x + glyph.pen_x, baseline_y);
    canvas.fill_path(&glyph.path, &paint, FillRule::Winding, transform, None);
  }
}
