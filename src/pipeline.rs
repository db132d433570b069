//! Pipeline orchestration
//!
//! # Pipeline
//!
//! One composition runs:
//! 1. **Decode**: screenshot bytes → premultiplied pixmap
//! 2. **Frame**: scale to the frame's target width, round corners,
//!    composite the device frame over the screenshot
//! 3. **Scale**: shrink the framed image to its on-canvas width
//! 4. **Place**: center bottom-aligned on the solid background canvas
//! 5. **Caption**: optionally draw centered text above the framed image
//!
//! Compositions are independent and deterministic: identical inputs produce
//! byte-identical output, and a batch shares only the read-only frame asset
//! and parameters.

use crate::color::Rgba;
use crate::compose::background;
use crate::compose::caption;
use crate::compose::frame;
use crate::error::Result;
use crate::fonts;
use crate::image_input;
use crate::pixmap;
use log::debug;
use log::warn;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Default screenshot width inside the device frame.
pub const DEFAULT_FRAME_TARGET_WIDTH: u32 = 1590;
/// Default output canvas width.
pub const DEFAULT_CANVAS_WIDTH: u32 = 1320;
/// Default output canvas height.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 2868;
/// Default on-canvas width of the framed image.
pub const DEFAULT_SCALE_WIDTH: u32 = 1240;
/// Default caption size, honored for custom fonts only.
pub const DEFAULT_FONT_SIZE: f32 = 80.0;

/// Value object describing one composition variant.
///
/// Color, caption, scale and padding variants all collapse into this one
/// struct; optional features default off. Range validation beyond the
/// corner-radius clamp is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct CompositionParameters {
  /// Width the screenshot is scaled to inside the frame.
  pub frame_target_width: u32,
  /// Corner radius applied to the screenshot (clamped during masking).
  pub corner_radius: u32,
  /// Output canvas dimensions.
  pub canvas_width: u32,
  pub canvas_height: u32,
  /// Distance between the framed image and the canvas bottom edge.
  pub bottom_padding: u32,
  /// Width of the framed image once placed on the canvas.
  pub scale_width: u32,
  pub background_color: Rgba,
  /// Caption text; `None` skips the caption stage entirely.
  pub caption: Option<String>,
  pub caption_color: Rgba,
  /// Caption font file; a system fallback substitutes when unusable.
  pub font_path: Option<PathBuf>,
  pub font_size: f32,
}

impl Default for CompositionParameters {
  fn default() -> Self {
    Self {
      frame_target_width: DEFAULT_FRAME_TARGET_WIDTH,
      corner_radius: 150,
      canvas_width: DEFAULT_CANVAS_WIDTH,
      canvas_height: DEFAULT_CANVAS_HEIGHT,
      bottom_padding: 50,
      scale_width: DEFAULT_SCALE_WIDTH,
      background_color: Rgba::BLACK,
      caption: None,
      caption_color: Rgba::WHITE,
      font_path: None,
      font_size: DEFAULT_FONT_SIZE,
    }
  }
}

impl CompositionParameters {
  pub fn builder() -> CompositionParametersBuilder {
    CompositionParametersBuilder::new()
  }
}

/// Builder for [`CompositionParameters`].
pub struct CompositionParametersBuilder {
  params: CompositionParameters,
}

impl CompositionParametersBuilder {
  pub fn new() -> Self {
    Self {
      params: CompositionParameters::default(),
    }
  }

  pub fn frame_target_width(mut self, width: u32) -> Self {
    self.params.frame_target_width = width;
    self
  }

  pub fn corner_radius(mut self, radius: u32) -> Self {
    self.params.corner_radius = radius;
    self
  }

  pub fn canvas_size(mut self, width: u32, height: u32) -> Self {
    self.params.canvas_width = width;
    self.params.canvas_height = height;
    self
  }

  pub fn bottom_padding(mut self, padding: u32) -> Self {
    self.params.bottom_padding = padding;
    self
  }

  pub fn scale_width(mut self, width: u32) -> Self {
    self.params.scale_width = width;
    self
  }

  pub fn background_color(mut self, color: Rgba) -> Self {
    self.params.background_color = color;
    self
  }

  pub fn caption(mut self, text: impl Into<String>) -> Self {
    self.params.caption = Some(text.into());
    self
  }

  pub fn caption_color(mut self, color: Rgba) -> Self {
    self.params.caption_color = color;
    self
  }

  pub fn font_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.params.font_path = Some(path.into());
    self
  }

  pub fn font_size(mut self, size: f32) -> Self {
    self.params.font_size = size;
    self
  }

  pub fn build(self) -> CompositionParameters {
    self.params
  }
}

impl Default for CompositionParametersBuilder {
  fn default() -> Self {
    Self::new()
  }
}

/// Composes screenshots into framed marketing images.
///
/// The frame asset is shared read-only across compositions; each
/// [`compose`](Composer::compose) call is independent.
#[derive(Debug, Clone)]
pub struct Composer {
  frame: Arc<Pixmap>,
  params: CompositionParameters,
}

impl Composer {
  pub fn new(frame: Arc<Pixmap>, params: CompositionParameters) -> Self {
    Self { frame, params }
  }

  pub fn params(&self) -> &CompositionParameters {
    &self.params
  }

  /// Runs one screenshot through the full pipeline.
  pub fn compose(&self, screenshot_bytes: &[u8]) -> Result<Pixmap> {
    let screenshot = image_input::decode_image(screenshot_bytes)?;
    debug!(
      "decoded screenshot {}x{}",
      screenshot.width(),
      screenshot.height()
    );

    let framed = frame::overlay_screenshot(
      &screenshot,
      &self.frame,
      self.params.frame_target_width,
      self.params.corner_radius,
    )?;
    let placed = pixmap::scale_to_width(&framed, self.params.scale_width, "framed image")?;
    debug!("framed image scaled to {}x{}", placed.width(), placed.height());

    let mut canvas = background::place_on_background(
      &placed,
      self.params.canvas_width,
      self.params.canvas_height,
      self.params.background_color,
      self.params.bottom_padding,
    )?;

    if let Some(text) = self.params.caption.as_deref() {
      match fonts::resolve_caption_font(self.params.font_path.as_deref(), self.params.font_size) {
        Some(font) => {
          let image_top = self.params.canvas_height as i32
            - placed.height() as i32
            - self.params.bottom_padding as i32;
          caption::draw_caption(&mut canvas, text, &font, self.params.caption_color, image_top);
        }
        None => warn!("caption skipped: no usable font on this host"),
      }
    }

    Ok(canvas)
  }

  /// Composes a batch in parallel, preserving input order.
  ///
  /// Every element fails or succeeds on its own; a bad input leaves its
  /// neighbors unaffected. No retries.
  pub fn compose_batch(&self, screenshots: &[Vec<u8>]) -> Vec<Result<Pixmap>> {
    screenshots
      .par_iter()
      .map(|bytes| self.compose(bytes))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builder_defaults_match_base_pipeline() {
    let params = CompositionParameters::builder().build();
    assert_eq!(params.frame_target_width, 1590);
    assert_eq!(params.canvas_width, 1320);
    assert_eq!(params.canvas_height, 2868);
    assert_eq!(params.scale_width, 1240);
    assert_eq!(params.font_size, 80.0);
    assert!(params.caption.is_none());
  }

  #[test]
  fn builder_overrides_apply() {
    let params = CompositionParameters::builder()
      .canvas_size(640, 480)
      .corner_radius(20)
      .caption("Hello")
      .build();
    assert_eq!(params.canvas_width, 640);
    assert_eq!(params.canvas_height, 480);
    assert_eq!(params.corner_radius, 20);
    assert_eq!(params.caption.as_deref(), Some("Hello"));
  }
}
