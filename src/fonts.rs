//! Caption font resolution.
//!
//! A caption is drawn with either the configured font file at the requested
//! size, or a system sans-serif substitute at a fixed size when that file
//! cannot be loaded. The choice is a closed two-branch variant resolved once
//! per composition; a load failure is a logged substitution, never an error.

use log::warn;
use std::path::Path;
use std::sync::Arc;
use std::sync::OnceLock;

/// Size used when the fallback face is substituted. The requested caption
/// size only applies to successfully loaded custom fonts.
pub const FALLBACK_FONT_SIZE: f32 = 40.0;

/// Font file bytes shared across compositions.
#[derive(Debug, Clone)]
pub struct LoadedFont {
  /// Raw font file data.
  pub data: Arc<Vec<u8>>,
  /// Face index within the file (0 for plain TTF/OTF files).
  pub index: u32,
}

/// The font a caption will be drawn with.
#[derive(Debug, Clone)]
pub enum ResolvedFont {
  /// The configured font file at the requested size.
  Custom { font: LoadedFont, size: f32 },
  /// System sans-serif substitute at [`FALLBACK_FONT_SIZE`].
  Fallback { font: LoadedFont },
}

impl ResolvedFont {
  pub fn font(&self) -> &LoadedFont {
    match self {
      ResolvedFont::Custom { font, .. } | ResolvedFont::Fallback { font } => font,
    }
  }

  pub fn size(&self) -> f32 {
    match self {
      ResolvedFont::Custom { size, .. } => *size,
      ResolvedFont::Fallback { .. } => FALLBACK_FONT_SIZE,
    }
  }
}

/// Resolves the caption font.
///
/// Returns `None` only when no configured font loads and the host has no
/// usable sans-serif face either; callers then skip the caption.
pub fn resolve_caption_font(path: Option<&Path>, size: f32) -> Option<ResolvedFont> {
  if let Some(path) = path {
    match load_font_file(path) {
      Ok(font) => return Some(ResolvedFont::Custom { font, size }),
      Err(reason) => warn!(
        "font {} unusable ({reason}), substituting system fallback",
        path.display()
      ),
    }
  }
  fallback_font().map(|font| ResolvedFont::Fallback { font })
}

fn load_font_file(path: &Path) -> std::result::Result<LoadedFont, String> {
  let data = std::fs::read(path).map_err(|err| err.to_string())?;
  ttf_parser::Face::parse(&data, 0).map_err(|err| format!("not a valid font file: {err}"))?;
  Ok(LoadedFont {
    data: Arc::new(data),
    index: 0,
  })
}

/// System sans-serif face, scanned once per process.
pub fn fallback_font() -> Option<LoadedFont> {
  static FALLBACK: OnceLock<Option<LoadedFont>> = OnceLock::new();
  FALLBACK
    .get_or_init(|| {
      let mut db = fontdb::Database::new();
      db.load_system_fonts();
      let families = [fontdb::Family::SansSerif];
      let query = fontdb::Query {
        families: &families,
        ..fontdb::Query::default()
      };
      let id = db.query(&query)?;
      db.with_face_data(id, |data, index| LoadedFont {
        data: Arc::new(data.to_vec()),
        index,
      })
    })
    .clone()
}
