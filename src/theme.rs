//! Built-in colour themes and lookup by name.

use std::collections::HashMap;

use image::Rgb;
use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::token::TokenClass;

/// Theme used when a requested name is unknown.
pub const DEFAULT_THEME: &str = "monokai";

/// A named palette: one mandatory background plus optional per-class colours.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Rgb<u8>,
    styles: HashMap<TokenClass, Rgb<u8>>,
}

impl Theme {
    pub fn new(name: impl Into<String>, background: Rgb<u8>) -> Self {
        Self {
            name: name.into(),
            background,
            styles: HashMap::new(),
        }
    }

    /// Builder-style helper to set the colour of one class.
    pub fn with(mut self, class: TokenClass, colour: Rgb<u8>) -> Self {
        self.styles.insert(class, colour);
        self
    }

    /// Explicit colour for `class`, inherited from the nearest parent that
    /// defines one.
    pub fn colour(&self, class: TokenClass) -> Option<Rgb<u8>> {
        let mut cur = Some(class);
        while let Some(c) = cur {
            if let Some(colour) = self.styles.get(&c) {
                return Some(*colour);
            }
            cur = c.parent();
        }
        None
    }
}

const fn hex(v: u32) -> Rgb<u8> {
    Rgb([(v >> 16) as u8, (v >> 8) as u8, v as u8])
}

static THEMES: Lazy<Vec<Theme>> = Lazy::new(|| {
    use TokenClass::*;
    vec![
        Theme::new("monokai", hex(0x272822))
            .with(Text, hex(0xf8f8f2))
            .with(Error, hex(0x960050))
            .with(Comment, hex(0x75715e))
            .with(Keyword, hex(0x66d9ef))
            .with(Name, hex(0xf8f8f2))
            .with(NameFunction, hex(0xa6e22e))
            .with(NameAttribute, hex(0xa6e22e))
            .with(Literal, hex(0xae81ff))
            .with(LiteralString, hex(0xe6db74))
            .with(LiteralStringEscape, hex(0xae81ff))
            .with(Operator, hex(0xf92672))
            .with(Punctuation, hex(0xf8f8f2)),
        Theme::new("native", hex(0x202020))
            .with(Text, hex(0xd0d0d0))
            .with(Error, hex(0xa61717))
            .with(Comment, hex(0x999999))
            .with(CommentPreproc, hex(0xcd2828))
            .with(Keyword, hex(0x6ab825))
            .with(NameBuiltin, hex(0x24909d))
            .with(NameFunction, hex(0x447fcf))
            .with(NameAttribute, hex(0xbbbbbb))
            .with(LiteralString, hex(0xed9d13))
            .with(LiteralNumber, hex(0x3677a9)),
        // No Text colour: plain text relies on the legibility fallback.
        Theme::new("github", hex(0xffffff))
            .with(Error, hex(0xa61717))
            .with(Comment, hex(0x999988))
            .with(CommentPreproc, hex(0x999999))
            .with(Keyword, hex(0x000000))
            .with(KeywordType, hex(0x445588))
            .with(NameBuiltin, hex(0x0086b3))
            .with(NameFunction, hex(0x990000))
            .with(NameAttribute, hex(0x008080))
            .with(LiteralString, hex(0xdd1144))
            .with(LiteralNumber, hex(0x009999))
            .with(Operator, hex(0x000000)),
        Theme::new("solarized-dark", hex(0x002b36))
            .with(Text, hex(0x93a1a1))
            .with(Error, hex(0xdc322f))
            .with(Comment, hex(0x586e75))
            .with(CommentPreproc, hex(0x719e07))
            .with(Keyword, hex(0x719e07))
            .with(KeywordConstant, hex(0x2aa198))
            .with(KeywordType, hex(0xb58900))
            .with(NameBuiltin, hex(0xb58900))
            .with(NameFunction, hex(0x268bd2))
            .with(Literal, hex(0x2aa198))
            .with(LiteralStringEscape, hex(0xcb4b16)),
        Theme::new("solarized-light", hex(0xfdf6e3))
            .with(Text, hex(0x657b83))
            .with(Error, hex(0xdc322f))
            .with(Comment, hex(0x93a1a1))
            .with(CommentPreproc, hex(0x719e07))
            .with(Keyword, hex(0x719e07))
            .with(KeywordConstant, hex(0x2aa198))
            .with(KeywordType, hex(0xb58900))
            .with(NameBuiltin, hex(0xb58900))
            .with(NameFunction, hex(0x268bd2))
            .with(Literal, hex(0x2aa198))
            .with(LiteralStringEscape, hex(0xcb4b16)),
        Theme::new("dracula", hex(0x282a36))
            .with(Text, hex(0xf8f8f2))
            .with(Comment, hex(0x6272a4))
            .with(Keyword, hex(0xff79c6))
            .with(KeywordType, hex(0x8be9fd))
            .with(NameBuiltin, hex(0x8be9fd))
            .with(NameFunction, hex(0x50fa7b))
            .with(NameAttribute, hex(0x50fa7b))
            .with(LiteralString, hex(0xf1fa8c))
            .with(LiteralNumber, hex(0xbd93f9))
            .with(Operator, hex(0xff79c6)),
    ]
});

/// Find a built-in theme by name (case-insensitive).
pub fn find(name: &str) -> Result<&'static Theme> {
    let wanted = name.to_lowercase();
    THEMES
        .iter()
        .find(|t| t.name == wanted)
        .ok_or_else(|| Error::UnknownTheme(name.to_string()))
}

/// Find a built-in theme by name, substituting [`DEFAULT_THEME`] when the
/// name is unknown.
pub fn lookup(name: &str) -> &'static Theme {
    match find(name) {
        Ok(theme) => theme,
        Err(err) => {
            log::warn!("{}; falling back to {}", err, DEFAULT_THEME);
            default_theme()
        }
    }
}

pub fn default_theme() -> &'static Theme {
    THEMES
        .iter()
        .find(|t| t.name == DEFAULT_THEME)
        .unwrap_or(&THEMES[0])
}

/// Names of all built-in themes, in table order.
pub fn names() -> Vec<&'static str> {
    THEMES.iter().map(|t| t.name.as_str()).collect()
}
