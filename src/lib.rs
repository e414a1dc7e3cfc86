//! `code2png` - render syntax-highlighted source code into a PNG "screenshot".
//!
//! The pipeline is one-way and synchronous:
//!
//! 1. [`canvas::estimate`] predicts the canvas from the raw text;
//! 2. a [`lexer::Tokenizer`] classifies the text into [`Token`]s;
//! 3. [`raster::Rasterizer`] fills the background, draws the optional gutter
//!    and walks the tokens, resolving colours from the [`Theme`] and placing
//!    every glyph through a [`font::GlyphFace`].
//!
//! ```no_run
//! let image = code2png::render("fn main() {}\n", "rs", "monokai", true)?;
//! code2png::output::save_png(&image, "main.png")?;
//! # Ok::<(), code2png::Error>(())
//! ```

pub mod canvas;
pub mod colour;
pub mod config;
pub mod cursor;
pub mod error;
pub mod font;
pub mod gutter;
pub mod lexer;
pub mod output;
pub mod raster;
pub mod theme;
pub mod token;

pub use canvas::CanvasSpec;
pub use config::RenderConfig;
pub use error::{Error, Result};
pub use raster::Rasterizer;
pub use theme::Theme;
pub use token::{Token, TokenClass};

use image::RgbaImage;

use font::{AbGlyphProvider, FaceProvider};
use lexer::{RegexLexer, Tokenizer};

/// Full source-to-pixels pipeline with explicit collaborators.
pub struct Renderer<P, T> {
    rasterizer: Rasterizer<P>,
    tokenizer: T,
}

impl<P: FaceProvider, T: Tokenizer> Renderer<P, T> {
    /// Fails with [`Error::Config`] when `config` is out of range.
    pub fn new(provider: P, tokenizer: T, config: RenderConfig) -> Result<Self> {
        Ok(Self {
            rasterizer: Rasterizer::new(provider, config)?,
            tokenizer,
        })
    }

    /// Estimate, tokenize and rasterize `source`.
    pub fn render_source(&self, source: &str, language_hint: &str, theme: &Theme) -> Result<RgbaImage> {
        let canvas = canvas::estimate(source, self.rasterizer.config());
        let tokens = self.tokenizer.tokenize(source, language_hint);
        self.rasterizer.render(&tokens, theme, &canvas)
    }
}

/// Render `source` with the default configuration, built-in lexer and themes,
/// and the first monospace system font found.
pub fn render(
    source: &str,
    language_hint: &str,
    theme_name: &str,
    show_line_numbers: bool,
) -> Result<RgbaImage> {
    let provider = AbGlyphProvider::system()?;
    let config = RenderConfig::default().with_line_numbers(show_line_numbers);
    Renderer::new(provider, RegexLexer, config)?.render_source(
        source,
        language_hint,
        theme::lookup(theme_name),
    )
}
