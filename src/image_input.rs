//! Decoding input bytes and shared assets into premultiplied pixmaps.
//!
//! Inputs arrive as raw JPEG/PNG bytes from the caller; whatever the source
//! channel layout, everything is normalized to premultiplied RGBA here.

use crate::error::AssetError;
use crate::error::ImageError;
use crate::error::Result;
use crate::pixmap;
use std::io::ErrorKind;
use std::path::Path;
use tiny_skia::Pixmap;

/// Decodes raw image bytes into a premultiplied RGBA pixmap.
///
/// Undecodable bytes and zero-dimension images are rejected; they are the
/// only input errors a composition can produce.
pub fn decode_image(bytes: &[u8]) -> Result<Pixmap> {
  let decoded = image::load_from_memory(bytes).map_err(|err| ImageError::InvalidFormat {
    reason: err.to_string(),
  })?;
  let rgba = decoded.to_rgba8();
  let (width, height) = rgba.dimensions();
  if width == 0 || height == 0 {
    return Err(ImageError::ZeroDimension { width, height }.into());
  }
  Ok(pixmap::pixmap_from_rgba(&rgba)?)
}

/// Loads the device-frame asset from disk.
///
/// The frame is loaded once at startup and shared read-only across every
/// composition; a missing or unreadable file is fatal.
pub fn load_frame_asset(path: &Path) -> Result<Pixmap> {
  let bytes = std::fs::read(path).map_err(|err| match err.kind() {
    ErrorKind::NotFound => AssetError::Missing {
      path: path.display().to_string(),
    },
    _ => AssetError::Unreadable {
      path: path.display().to_string(),
      reason: err.to_string(),
    },
  })?;
  decode_image(&bytes)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::Error;
  use image::ImageFormat;
  use image::RgbaImage;
  use std::io::Cursor;

  #[test]
  fn rejects_undecodable_bytes() {
    let result = decode_image(b"definitely not an image");
    assert!(matches!(
      result,
      Err(Error::Image(ImageError::InvalidFormat { .. }))
    ));
  }

  #[test]
  fn decodes_png_bytes() {
    let img = RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
    let mut bytes = Vec::new();
    img
      .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
      .expect("encode png");

    let pixmap = decode_image(&bytes).expect("decode");
    assert_eq!((pixmap.width(), pixmap.height()), (3, 2));
    let pixel = pixmap.pixels()[0].demultiply();
    assert_eq!((pixel.red(), pixel.green(), pixel.blue()), (10, 20, 30));
  }

  #[test]
  fn missing_frame_asset_is_fatal() {
    let result = load_frame_asset(Path::new("/nonexistent/frame.png"));
    assert!(matches!(
      result,
      Err(Error::Asset(AssetError::Missing { .. }))
    ));
  }
}
