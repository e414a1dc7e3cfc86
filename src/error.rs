//! Error types for the code renderer

use thiserror::Error;

/// Result type alias for render operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning source code into an image
#[derive(Error, Debug)]
pub enum Error {
    /// No usable font could be loaded; the render is aborted
    #[error("Font unavailable: {0}")]
    FontUnavailable(String),

    /// Theme name not present in the built-in table
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// Language hint that no lexer recognises
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// The image encoder rejected the buffer
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// Clipboard delivery failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Invalid render configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
