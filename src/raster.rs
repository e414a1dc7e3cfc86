//! Rasterizer: turns a token stream into an RGBA pixel buffer.

use image::{Rgba, RgbaImage};

use crate::canvas::CanvasSpec;
use crate::colour::{opaque, ColourResolver};
use crate::config::RenderConfig;
use crate::cursor::{GridCursor, Step};
use crate::error::Result;
use crate::font::FaceProvider;
use crate::gutter::draw_gutter;
use crate::theme::Theme;
use crate::token::Token;

/// Draws tokens onto a canvas using an injected face provider.
pub struct Rasterizer<P> {
    provider: P,
    config: RenderConfig,
}

impl<P: FaceProvider> Rasterizer<P> {
    /// Fails with [`crate::Error::Config`] when `config` is out of range.
    pub fn new(provider: P, config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `tokens` in order onto a fresh `canvas`-sized buffer.
    ///
    /// The face is loaded before anything is allocated, so a missing font
    /// aborts with [`crate::Error::FontUnavailable`] and no image.
    pub fn render(&self, tokens: &[Token], theme: &Theme, canvas: &CanvasSpec) -> Result<RgbaImage> {
        let face = self.provider.load(self.config.font_size)?;

        let mut buf = RgbaImage::from_pixel(canvas.width, canvas.height, opaque(theme.background));
        let resolver = ColourResolver::new(theme, self.config.fallback);

        if self.config.show_line_numbers {
            draw_gutter(&mut buf, face.as_ref(), canvas, &self.config, resolver.gutter_colour());
        }

        let mut cursor = GridCursor::new(
            self.config.code_origin(canvas.gutter_width),
            self.config.vertical_padding,
            canvas,
            self.config.tab_cell_width,
            self.config.width_policy,
        );

        let mut drawn = 0usize;
        for token in tokens {
            let colour: Rgba<u8> = resolver.token_colour(token.class);
            for c in token.text.chars() {
                if let Step::Draw { x, y } = cursor.advance(c) {
                    face.draw_char(&mut buf, x, y, c, colour);
                    drawn += 1;
                }
            }
        }

        log::debug!(
            "rasterized {} tokens ({} glyphs) onto {}x{} with theme {}",
            tokens.len(),
            drawn,
            canvas.width,
            canvas.height,
            theme.name
        );
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::estimate;
    use crate::error::Error;
    use crate::font::GlyphFace;
    use crate::token::TokenClass;
    use image::Rgb;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(i32, i32, char, Rgba<u8>)>>>;

    struct RecordingFace(Log);

    impl GlyphFace for RecordingFace {
        fn draw_char(&self, _buf: &mut RgbaImage, x: i32, y: i32, c: char, colour: Rgba<u8>) {
            self.0.borrow_mut().push((x, y, c, colour));
        }
    }

    struct RecordingProvider(Log);

    impl FaceProvider for RecordingProvider {
        fn load(&self, _point_size: u32) -> Result<Box<dyn GlyphFace + '_>> {
            Ok(Box::new(RecordingFace(self.0.clone())))
        }
    }

    struct NoFont;

    impl FaceProvider for NoFont {
        fn load(&self, _point_size: u32) -> Result<Box<dyn GlyphFace + '_>> {
            Err(Error::FontUnavailable("test".to_string()))
        }
    }

    fn theme() -> Theme {
        Theme::new("t", Rgb([0, 0, 0])).with(TokenClass::Keyword, Rgb([255, 0, 0]))
    }

    #[test]
    fn tab_then_newline_scenario() {
        let log: Log = Default::default();
        let cfg = RenderConfig::default();
        let r = Rasterizer::new(RecordingProvider(log.clone()), cfg).unwrap();
        let canvas = estimate("a\tb\n", &cfg);
        let tokens = vec![Token::new("a\tb\n", TokenClass::Text)];
        let buf = r.render(&tokens, &theme(), &canvas).unwrap();
        assert_eq!(buf.height(), 4 * 20);

        let calls = log.borrow();
        let white = Rgba([255, 255, 255, 255]);
        assert_eq!(
            *calls,
            vec![(0, 40, 'a', white), (50, 40, 'b', white)]
        );
    }

    #[test]
    fn colours_follow_tokens_in_order() {
        let log: Log = Default::default();
        let cfg = RenderConfig::default();
        let r = Rasterizer::new(RecordingProvider(log.clone()), cfg).unwrap();
        let src = "if x";
        let tokens = vec![
            Token::new("if", TokenClass::Keyword),
            Token::new(" ", TokenClass::Whitespace),
            Token::new("x", TokenClass::Name),
        ];
        r.render(&tokens, &theme(), &estimate(src, &cfg)).unwrap();
        let calls = log.borrow();
        let chars: String = calls.iter().map(|c| c.2).collect();
        assert_eq!(chars, "if x");
        assert_eq!(calls[0].3, Rgba([255, 0, 0, 255]));
        assert_eq!(calls[3].3, Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn empty_stream_is_background_only() {
        let log: Log = Default::default();
        let cfg = RenderConfig::default();
        let r = Rasterizer::new(RecordingProvider(log.clone()), cfg).unwrap();
        let canvas = estimate("", &cfg);
        let buf = r.render(&[], &theme(), &canvas).unwrap();
        assert!(log.borrow().is_empty());
        assert!(buf.pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn gutter_runs_before_code() {
        let log: Log = Default::default();
        let cfg = RenderConfig::default().with_line_numbers(true);
        let r = Rasterizer::new(RecordingProvider(log.clone()), cfg).unwrap();
        let src = "x";
        r.render(&[Token::new(src, TokenClass::Text)], &theme(), &estimate(src, &cfg))
            .unwrap();
        let calls = log.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].2, '1');
        assert_eq!(calls[0].3, Rgba([200, 200, 200, 200]));
        // Code starts after gutter width (1) + gap (3).
        assert_eq!((calls[1].0, calls[1].1, calls[1].2), (40, 40, 'x'));
    }

    #[test]
    fn newline_returns_to_left_edge_without_gutter() {
        let log: Log = Default::default();
        let cfg = RenderConfig::default();
        let r = Rasterizer::new(RecordingProvider(log.clone()), cfg).unwrap();
        let src = "ab\n\tc\nd";
        r.render(&[Token::new(src, TokenClass::Text)], &theme(), &estimate(src, &cfg))
            .unwrap();
        let at: Vec<(i32, i32)> = log.borrow().iter().map(|c| (c.0, c.1)).collect();
        assert_eq!(at, vec![(0, 40), (10, 40), (40, 60), (0, 80)]);
    }

    #[test]
    fn out_of_range_config_is_rejected_up_front() {
        let cfg = RenderConfig {
            tab_cell_width: u32::MAX,
            ..RenderConfig::default()
        };
        assert!(matches!(Rasterizer::new(NoFont, cfg), Err(Error::Config(_))));
    }

    #[test]
    fn missing_font_aborts() {
        let cfg = RenderConfig::default();
        let r = Rasterizer::new(NoFont, cfg).unwrap();
        let res = r.render(&[Token::new("x", TokenClass::Text)], &theme(), &estimate("x", &cfg));
        assert!(matches!(res, Err(Error::FontUnavailable(_))));
    }
}
