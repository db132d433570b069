//! Caption behavior through the full pipeline

use image::ImageFormat;
use image::RgbaImage;
use shotframe::fonts;
use shotframe::image_output::encode_png;
use shotframe::pipeline::Composer;
use shotframe::pipeline::CompositionParameters;
use shotframe::Pixmap;
use std::io::Cursor;
use std::sync::Arc;

fn screenshot_png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
  let img = RgbaImage::from_pixel(width, height, image::Rgba(color));
  let mut out = Vec::new();
  img
    .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
    .expect("encode png");
  out
}

fn composer_with_caption(caption: Option<&str>, font_path: Option<&str>) -> Composer {
  let frame = Arc::new(Pixmap::new(1590, 3050).expect("frame"));
  let mut builder = CompositionParameters::builder();
  if let Some(caption) = caption {
    builder = builder.caption(caption);
  }
  if let Some(path) = font_path {
    builder = builder.font_path(path);
  }
  Composer::new(frame, builder.build())
}

#[test]
fn missing_font_file_still_produces_output() {
  let composer = composer_with_caption(Some("Hello"), Some("/nonexistent/font.ttf"));
  let output = composer
    .compose(&screenshot_png(390, 844, [255, 0, 0, 255]))
    .expect("composition must survive a missing font");
  assert_eq!((output.width(), output.height()), (1320, 2868));
}

#[test]
fn whitespace_caption_draws_nothing() {
  let input = screenshot_png(390, 844, [0, 0, 255, 255]);
  let with_blank_caption = composer_with_caption(Some("   "), None)
    .compose(&input)
    .expect("compose");
  let without_caption = composer_with_caption(None, None)
    .compose(&input)
    .expect("compose");

  assert_eq!(
    encode_png(&with_blank_caption).expect("encode"),
    encode_png(&without_caption).expect("encode")
  );
}

#[test]
fn caption_is_drawn_when_a_fallback_font_exists() {
  if fonts::fallback_font().is_none() {
    // Host has no usable fonts; the caption is skipped by design.
    return;
  }

  let input = screenshot_png(390, 844, [255, 0, 0, 255]);
  let with_caption = composer_with_caption(Some("Hello"), None)
    .compose(&input)
    .expect("compose");
  let without_caption = composer_with_caption(None, None)
    .compose(&input)
    .expect("compose");

  assert_ne!(
    encode_png(&with_caption).expect("encode"),
    encode_png(&without_caption).expect("encode"),
    "a rendered caption must change the output"
  );
}
