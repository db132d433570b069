//! Batch screenshot framing CLI.
//!
//! Composes every input screenshot into a framed marketing image and writes
//! the results as PNGs, numbered in input order. Compositions run in
//! parallel; one bad input fails alone without aborting the batch.

use clap::Parser;
use log::error;
use log::info;
use shotframe::error::RenderError;
use shotframe::image_input;
use shotframe::image_output;
use shotframe::pipeline::Composer;
use shotframe::pipeline::CompositionParameters;
use shotframe::AssetError;
use shotframe::Rgba;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Compose screenshots into framed marketing images
#[derive(Parser, Debug)]
#[command(name = "shotframe", version, about)]
struct Args {
  /// Screenshot files (JPEG or PNG)
  #[arg(required = true)]
  inputs: Vec<PathBuf>,

  /// Device frame image with a transparent cutout
  #[arg(long)]
  frame: PathBuf,

  /// Output directory
  #[arg(long, default_value = "out")]
  out_dir: PathBuf,

  /// Corner radius applied to the screenshot
  #[arg(long, default_value_t = 150)]
  radius: u32,

  /// Screenshot width inside the frame
  #[arg(long, default_value_t = 1590)]
  frame_width: u32,

  /// Output canvas width
  #[arg(long, default_value_t = 1320)]
  canvas_width: u32,

  /// Output canvas height
  #[arg(long, default_value_t = 2868)]
  canvas_height: u32,

  /// Padding between the framed image and the canvas bottom edge
  #[arg(long, default_value_t = 50)]
  padding: u32,

  /// Width of the framed image on the canvas
  #[arg(long, default_value_t = 1240)]
  scale_width: u32,

  /// Canvas background color (#rgb, #rrggbb or #rrggbbaa)
  #[arg(long, default_value = "#000000", value_parser = parse_color)]
  background: Rgba,

  /// Caption drawn centered above the framed image
  #[arg(long)]
  caption: Option<String>,

  /// Caption color
  #[arg(long, default_value = "#ffffff", value_parser = parse_color)]
  caption_color: Rgba,

  /// Caption font file (a system font substitutes if it cannot be loaded)
  #[arg(long)]
  font: Option<PathBuf>,

  /// Caption font size (custom fonts only)
  #[arg(long, default_value_t = 80.0)]
  font_size: f32,

  /// Number of parallel compositions
  #[arg(long, short, default_value_t = num_cpus::get())]
  jobs: usize,
}

fn parse_color(raw: &str) -> Result<Rgba, String> {
  Rgba::parse_hex(raw)
}

fn main() -> ExitCode {
  env_logger::init();
  let args = Args::parse();

  match run(args) {
    Ok(0) => ExitCode::SUCCESS,
    Ok(failed) => {
      error!("{failed} image(s) failed");
      ExitCode::FAILURE
    }
    Err(err) => {
      eprintln!("error: {err}");
      ExitCode::FAILURE
    }
  }
}

fn run(args: Args) -> shotframe::Result<usize> {
  // Startup asset checks: a missing frame or configured font file is fatal
  // before any composition begins.
  let frame = image_input::load_frame_asset(&args.frame)?;
  if let Some(font) = &args.font {
    if !font.exists() {
      return Err(
        AssetError::Missing {
          path: font.display().to_string(),
        }
        .into(),
      );
    }
  }

  let mut builder = CompositionParameters::builder()
    .frame_target_width(args.frame_width)
    .corner_radius(args.radius)
    .canvas_size(args.canvas_width, args.canvas_height)
    .bottom_padding(args.padding)
    .scale_width(args.scale_width)
    .background_color(args.background)
    .caption_color(args.caption_color)
    .font_size(args.font_size);
  if let Some(caption) = &args.caption {
    builder = builder.caption(caption.clone());
  }
  if let Some(font) = &args.font {
    builder = builder.font_path(font.clone());
  }
  let composer = Composer::new(Arc::new(frame), builder.build());

  std::fs::create_dir_all(&args.out_dir).map_err(|err| AssetError::Unreadable {
    path: args.out_dir.display().to_string(),
    reason: err.to_string(),
  })?;

  // Read inputs up front; an unreadable input fails that one image only.
  let mut failed = 0usize;
  let mut meta: Vec<(usize, &PathBuf)> = Vec::with_capacity(args.inputs.len());
  let mut batch: Vec<Vec<u8>> = Vec::with_capacity(args.inputs.len());
  for (index, path) in args.inputs.iter().enumerate() {
    match std::fs::read(path) {
      Ok(bytes) => {
        meta.push((index, path));
        batch.push(bytes);
      }
      Err(err) => {
        error!("{}: {err}", path.display());
        failed += 1;
      }
    }
  }

  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(args.jobs.max(1))
    .build()
    .map_err(|err| RenderError::InvalidParameters {
      message: format!("thread pool: {err}"),
    })?;

  let results = pool.install(|| composer.compose_batch(&batch));

  for ((index, path), result) in meta.iter().zip(results) {
    let png = match result.and_then(|pixmap| image_output::encode_png(&pixmap)) {
      Ok(png) => png,
      Err(err) => {
        error!("{}: {err}", path.display());
        failed += 1;
        continue;
      }
    };
    let out_path = args.out_dir.join(format!("final_image_{}.png", index + 1));
    if let Err(err) = std::fs::write(&out_path, png) {
      error!("{}: {err}", out_path.display());
      failed += 1;
      continue;
    }
    info!("wrote {}", out_path.display());
  }

  info!(
    "composed {} of {} image(s)",
    args.inputs.len() - failed,
    args.inputs.len()
  );
  Ok(failed)
}
