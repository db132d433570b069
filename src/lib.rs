//! Composes app screenshots into framed, captioned marketing images.

pub mod color;
pub mod compose;
pub mod error;
pub mod fonts;
pub mod image_input;
pub mod image_output;
pub mod pipeline;
pub mod pixmap;

pub use color::Rgba;
pub use error::{AssetError, Error, ImageError, RenderError, Result};
pub use image_output::OutputFormat;
pub use pipeline::{Composer, CompositionParameters, CompositionParametersBuilder};

// Re-export the pixel-buffer type callers receive from the pipeline.
pub use tiny_skia::Pixmap;
