//! End-to-end pipeline properties

use image::ImageFormat;
use image::RgbaImage;
use shotframe::error::ImageError;
use shotframe::image_output::encode_png;
use shotframe::pipeline::Composer;
use shotframe::pipeline::CompositionParameters;
use shotframe::Error;
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

fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
  let color = pixmap.pixels()[(y * pixmap.width() + x) as usize].demultiply();
  (color.red(), color.green(), color.blue(), color.alpha())
}

fn base_composer() -> Composer {
  let frame = Arc::new(Pixmap::new(1590, 3050).expect("frame"));
  Composer::new(frame, CompositionParameters::default())
}

#[test]
fn identical_inputs_produce_byte_identical_output() {
  let composer = base_composer();
  let input = screenshot_png(390, 844, [255, 0, 0, 255]);

  let first = composer.compose(&input).expect("first");
  let second = composer.compose(&input).expect("second");
  assert_eq!(
    encode_png(&first).expect("encode"),
    encode_png(&second).expect("encode")
  );
}

#[test]
fn undecodable_input_reports_invalid_format() {
  let composer = base_composer();
  let result = composer.compose(b"not an image at all");
  assert!(matches!(
    result,
    Err(Error::Image(ImageError::InvalidFormat { .. }))
  ));
}

#[test]
fn batch_preserves_input_order() {
  let composer = base_composer();
  let inputs = vec![
    screenshot_png(390, 844, [255, 0, 0, 255]),
    screenshot_png(390, 844, [0, 255, 0, 255]),
    screenshot_png(390, 844, [0, 0, 255, 255]),
  ];

  let results = composer.compose_batch(&inputs);
  assert_eq!(results.len(), 3);

  // The framed screenshot fills the canvas center-bottom; sample inside it.
  let expected = [(255, 0, 0, 255), (0, 255, 0, 255), (0, 0, 255, 255)];
  for (result, expected) in results.into_iter().zip(expected) {
    let canvas = result.expect("composition");
    assert_eq!(pixel(&canvas, 660, 2800), expected);
  }
}

#[test]
fn one_bad_input_leaves_the_rest_of_the_batch_intact() {
  let composer = base_composer();
  let inputs = vec![
    screenshot_png(390, 844, [255, 0, 0, 255]),
    b"garbage".to_vec(),
    screenshot_png(390, 844, [0, 0, 255, 255]),
  ];

  let results = composer.compose_batch(&inputs);
  assert!(results[0].is_ok());
  assert!(results[1].is_err());
  assert!(results[2].is_ok());
}

#[test]
fn marketing_scenario_matches_expected_geometry() {
  // 390x844 screenshot, 1590x3050 frame, radius 150, canvas 1320x2868,
  // padding 50, opaque black background, no caption.
  let composer = base_composer();
  let canvas = composer
    .compose(&screenshot_png(390, 844, [255, 0, 0, 255]))
    .expect("compose");

  assert_eq!((canvas.width(), canvas.height()), (1320, 2868));

  // The screenshot overshoots the frame, so the framed image is a solid
  // 1240x2379 rectangle placed at x in [40, 1280), y in [439, 2818).
  assert_eq!(pixel(&canvas, 660, 2817), (255, 0, 0, 255), "bottom image row");
  assert_eq!(pixel(&canvas, 660, 2818), (0, 0, 0, 255), "padding band");
  assert_eq!(pixel(&canvas, 660, 2867), (0, 0, 0, 255), "canvas bottom");
  assert_eq!(pixel(&canvas, 660, 438), (0, 0, 0, 255), "above the image");
  assert_eq!(pixel(&canvas, 660, 445), (255, 0, 0, 255), "top image rows");
  assert_eq!(pixel(&canvas, 39, 1600), (0, 0, 0, 255), "left of the image");
  assert_eq!(pixel(&canvas, 45, 1600), (255, 0, 0, 255), "inside left edge");

  // Background and image are both fully opaque.
  assert_eq!(pixel(&canvas, 0, 0).3, 255);
  assert_eq!(pixel(&canvas, 1319, 2867).3, 255);
}
