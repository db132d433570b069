//! Error types for shotframe
//!
//! Composition failures are grouped per subsystem:
//! - Asset errors (frame asset or configured font file missing at startup)
//! - Image errors (undecodable or degenerate input screenshots)
//! - Render errors (guarded allocations, output encoding)
//!
//! Font-load problems never appear here: a caption font that cannot be
//! loaded is substituted with a system fallback, not surfaced to the caller.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations.

use thiserror::Error;

/// Result type alias for shotframe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for shotframe
///
/// Each variant wraps the more specific error type for that subsystem.
#[derive(Error, Debug)]
pub enum Error {
  /// Startup asset error (frame asset, configured font file)
  #[error("Asset error: {0}")]
  Asset(#[from] AssetError),

  /// Input image error
  #[error("Image error: {0}")]
  Image(#[from] ImageError),

  /// Compositing or encoding error
  #[error("Render error: {0}")]
  Render(#[from] RenderError),
}

/// Errors loading shared assets at startup.
///
/// These are fatal: the frame asset is loaded once before any composition
/// begins, and a batch never starts without it.
#[derive(Error, Debug)]
pub enum AssetError {
  #[error("asset not found: {path}")]
  Missing { path: String },

  #[error("failed to read asset {path}: {reason}")]
  Unreadable { path: String, reason: String },
}

/// Errors decoding input screenshots.
#[derive(Error, Debug)]
pub enum ImageError {
  /// The input bytes are not a decodable raster image.
  #[error("invalid image format: {reason}")]
  InvalidFormat { reason: String },

  /// The decoded image has a zero dimension.
  #[error("image has a zero dimension ({width}x{height})")]
  ZeroDimension { width: u32, height: u32 },
}

/// Errors during compositing and output encoding.
#[derive(Error, Debug)]
pub enum RenderError {
  #[error("invalid parameters: {message}")]
  InvalidParameters { message: String },

  #[error("failed to encode {format} output: {reason}")]
  EncodeFailed { format: String, reason: String },
}
