//! Per-token fill colour and gutter colour selection.

use image::{Rgb, Rgba};

use crate::theme::Theme;
use crate::token::TokenClass;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const GUTTER_LIGHT: Rgba<u8> = Rgba([200, 200, 200, 200]);
const GUTTER_DARK: Rgba<u8> = Rgba([50, 50, 50, 255]);

/// Which colour the legibility fallback measures when a class has no
/// explicit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Contrast against the canvas background.
    #[default]
    Background,
    /// Measure the class's own (unset, hence black) colour. This always
    /// picks white and is kept for output compatibility with older renders.
    TokenColour,
}

/// Perceived brightness in `[0, 1]`: the mean of the three channels.
pub fn brightness(c: Rgb<u8>) -> f32 {
    (c[0] as f32 + c[1] as f32 + c[2] as f32) / 255.0 / 3.0
}

pub fn opaque(c: Rgb<u8>) -> Rgba<u8> {
    Rgba([c[0], c[1], c[2], 255])
}

/// Resolves the colour glyphs are drawn with.
pub struct ColourResolver<'a> {
    theme: &'a Theme,
    fallback: FallbackPolicy,
}

impl<'a> ColourResolver<'a> {
    pub fn new(theme: &'a Theme, fallback: FallbackPolicy) -> Self {
        Self { theme, fallback }
    }

    pub fn token_colour(&self, class: TokenClass) -> Rgba<u8> {
        if let Some(c) = self.theme.colour(class) {
            return opaque(c);
        }
        let reference = match self.fallback {
            FallbackPolicy::Background => self.theme.background,
            FallbackPolicy::TokenColour => Rgb([0, 0, 0]),
        };
        if brightness(reference) < 0.5 {
            WHITE
        } else {
            BLACK
        }
    }

    /// Line-number colour, chosen against the background only.
    pub fn gutter_colour(&self) -> Rgba<u8> {
        if brightness(self.theme.background) < 0.5 {
            GUTTER_LIGHT
        } else {
            GUTTER_DARK
        }
    }
}
