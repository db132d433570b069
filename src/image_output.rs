//! Encoding finished pixmaps for persistence.
//!
//! Encoding is a thin pass-through at the pipeline boundary: premultiplied
//! pixels are converted back to straight RGBA and handed to the `image`
//! crate.

use crate::error::RenderError;
use crate::error::Result;
use image::ImageFormat;
use image::RgbImage;
use image::RgbaImage;
use std::io::Cursor;
use tiny_skia::Pixmap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
  Png,
  Jpeg(u8), // quality 0-100
}

impl Default for OutputFormat {
  fn default() -> Self {
    OutputFormat::Png
  }
}

/// Encodes a composed pixmap into the requested format.
pub fn encode_image(pixmap: &Pixmap, format: OutputFormat) -> Result<Vec<u8>> {
  let width = pixmap.width();
  let height = pixmap.height();

  // Convert from premultiplied RGBA to straight RGBA.
  let mut rgba_data = Vec::with_capacity(pixmap.data().len());
  for pixel in pixmap.pixels() {
    let color = pixel.demultiply();
    rgba_data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
  }

  let mut buffer = Vec::new();

  match format {
    OutputFormat::Png => {
      let img = RgbaImage::from_raw(width, height, rgba_data).ok_or_else(|| {
        RenderError::EncodeFailed {
          format: "PNG".to_string(),
          reason: "failed to create RGBA image".to_string(),
        }
      })?;
      img
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|err| RenderError::EncodeFailed {
          format: "PNG".to_string(),
          reason: err.to_string(),
        })?;
    }
    OutputFormat::Jpeg(quality) => {
      // JPEG has no alpha channel.
      let rgb_data: Vec<u8> = rgba_data
        .chunks_exact(4)
        .flat_map(|chunk| [chunk[0], chunk[1], chunk[2]])
        .collect();
      let img = RgbImage::from_raw(width, height, rgb_data).ok_or_else(|| {
        RenderError::EncodeFailed {
          format: "JPEG".to_string(),
          reason: "failed to create RGB image".to_string(),
        }
      })?;
      let mut cursor = Cursor::new(&mut buffer);
      let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);
      img
        .write_with_encoder(encoder)
        .map_err(|err| RenderError::EncodeFailed {
          format: "JPEG".to_string(),
          reason: err.to_string(),
        })?;
    }
  }

  Ok(buffer)
}

/// Encodes a composed pixmap as PNG, the pipeline's persistence format.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
  encode_image(pixmap, OutputFormat::Png)
}
