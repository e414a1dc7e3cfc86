//! Font faces: loading a monospace font and drawing single glyphs.
//!
//! The rasterizer only needs to draw one character at a pixel origin; all
//! cursor arithmetic stays in [`crate::cursor`]. Faces are obtained through
//! [`FaceProvider`] so the font source can be swapped (or faked in tests).

use std::path::Path;

use ab_glyph::{point, Font, FontRef, PxScale};
use image::{Pixel, Rgba, RgbaImage};

use crate::error::{Error, Result};

/// Glyph coverage above which a pixel is painted.
const COVERAGE_THRESHOLD: f32 = 0.3;

/// Monospace fonts tried, in order, by [`AbGlyphProvider::system`].
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/JetBrainsMonoNLNerdFontMono-Regular.ttf",
    "/usr/share/fonts/truetype/jetbrains-mono/JetBrainsMono-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/gnu-free/FreeMono.otf",
    "/usr/share/fonts/truetype/freefont/FreeMono.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "/Library/Fonts/Courier New.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
];

/// A font loaded at a fixed size that can draw one character.
pub trait GlyphFace {
    /// Draw `c` with its pen origin (baseline) at `(x, y)`. Pixels outside
    /// the buffer are clipped.
    fn draw_char(&self, buf: &mut RgbaImage, x: i32, y: i32, c: char, colour: Rgba<u8>);
}

/// Source of [`GlyphFace`]s.
pub trait FaceProvider {
    fn load(&self, point_size: u32) -> Result<Box<dyn GlyphFace + '_>>;
}

/// Face provider backed by an in-memory TTF/OTF parsed with `ab_glyph`.
pub struct AbGlyphProvider {
    data: Vec<u8>,
    source: String,
}

impl AbGlyphProvider {
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            data,
            source: "<memory>".to_string(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            Error::FontUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(Self {
            data,
            source: path.display().to_string(),
        })
    }

    /// First readable font from [`FONT_CANDIDATES`].
    pub fn system() -> Result<Self> {
        for path in FONT_CANDIDATES {
            if let Ok(data) = std::fs::read(path) {
                log::debug!("using font {}", path);
                return Ok(Self {
                    data,
                    source: path.to_string(),
                });
            }
        }
        Err(Error::FontUnavailable(
            "no suitable monospace font found; pass one explicitly".to_string(),
        ))
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl FaceProvider for AbGlyphProvider {
    fn load(&self, point_size: u32) -> Result<Box<dyn GlyphFace + '_>> {
        let font = FontRef::try_from_slice(&self.data).map_err(|_| {
            Error::FontUnavailable(format!("invalid font data for {}", self.source))
        })?;
        let size = point_size as f32;
        let scale = font.pt_to_px_scale(size).unwrap_or(PxScale::from(size));
        Ok(Box::new(AbGlyphFace { font, scale }))
    }
}

struct AbGlyphFace<'a> {
    font: FontRef<'a>,
    scale: PxScale,
}

impl GlyphFace for AbGlyphFace<'_> {
    fn draw_char(&self, buf: &mut RgbaImage, x: i32, y: i32, c: char, colour: Rgba<u8>) {
        let glyph = self
            .font
            .glyph_id(c)
            .with_scale_and_position(self.scale, point(x as f32, y as f32));
        let Some(outlined) = self.font.outline_glyph(glyph) else {
            return;
        };
        let bounds = outlined.px_bounds();
        let (w, h) = (buf.width() as i32, buf.height() as i32);
        outlined.draw(|gx, gy, v| {
            let px = (bounds.min.x as i32).saturating_add(gx as i32);
            let py = (bounds.min.y as i32).saturating_add(gy as i32);
            if px >= 0 && py >= 0 && px < w && py < h && v > COVERAGE_THRESHOLD {
                paint(buf, px as u32, py as u32, colour);
            }
        });
    }
}

/// Composite `colour` over the existing pixel so translucent colours keep the
/// canvas opaque.
fn paint(buf: &mut RgbaImage, x: u32, y: u32, colour: Rgba<u8>) {
    buf.get_pixel_mut(x, y).blend(&colour);
}
