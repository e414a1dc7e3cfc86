//! `code2png` - convert a source file (or piped source) into a highlighted PNG.
//!
//! Reads a file or stdin, picks a lexer from the extension (or sniffs the
//! content), and writes the rendered image to disk or the clipboard.

use std::fs::{self, File};
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use chrono::Local;
use clap::Parser;
use log::{Level, LevelFilter, Log, Metadata, Record};

use code2png::colour::FallbackPolicy;
use code2png::cursor::WidthPolicy;
use code2png::font::AbGlyphProvider;
use code2png::lexer::RegexLexer;
use code2png::{output, theme, Error, RenderConfig, Renderer, Result};

/// Command-line arguments for `code2png`.
#[derive(Parser, Debug)]
#[command(
    name = "code2png",
    version,
    about = "Convert source code to a syntax-highlighted PNG image",
    long_about = "Convert source code to a syntax-highlighted PNG image.\n\n\
                  Examples:\n  code2png -t monokai main.go main.png\n  \
                  echo 'fmt.Println(\"Hello World\")' | code2png --ext go -t native -o sample.png"
)]
struct Cli {
    /// Source file to render (stdin is read when piped)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output image path, takes precedence over --out
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[arg(short, long, value_name = "FILE", default_value = "out.png")]
    out: PathBuf,

    /// Color theme
    #[arg(short, long, default_value = theme::DEFAULT_THEME)]
    theme: String,

    /// Language or file extension used to pick a lexer
    #[arg(long, value_name = "EXT")]
    ext: Option<String>,

    /// Copy the image to the clipboard instead of writing OUTPUT
    #[arg(short, long, action)]
    clipboard: bool,

    /// Draw a line-number gutter
    #[arg(short = 'n', long, action)]
    line_numbers: bool,

    /// Font file to use instead of searching the system
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    #[arg(long, default_value_t = 20)]
    font_size: u32,

    /// Cells a tab advances by
    #[arg(long, default_value_t = 4)]
    tab_width: u32,

    /// Use Unicode East Asian width instead of the UTF-8 length heuristic
    #[arg(long, action)]
    unicode_width: bool,

    /// Draw unstyled text white regardless of the background
    #[arg(long, action)]
    legacy_fallback: bool,

    /// List built-in themes and exit
    #[arg(long, action)]
    list_themes: bool,

    /// Write debug logs to file
    #[arg(long, value_name = "FILE")]
    debug_log: Option<PathBuf>,
}

/// Appends timestamped records to the debug log file, or reports warnings on
/// stderr when no file was requested.
struct DebugLog {
    file: Option<Mutex<File>>,
}

impl Log for DebugLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.file.is_some() || metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match &self.file {
            Some(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(
                        file,
                        "[{}] {} {}",
                        Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.level(),
                        record.args()
                    );
                }
            }
            None => eprintln!("{}: {}", record.level().as_str().to_lowercase(), record.args()),
        }
    }

    fn flush(&self) {
        if let Some(Ok(mut file)) = self.file.as_ref().map(|f| f.lock()) {
            let _ = file.flush();
        }
    }
}

fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let file = match path {
        Some(p) => Some(Mutex::new(
            fs::OpenOptions::new().append(true).create(true).open(p)?,
        )),
        None => None,
    };
    let level = if file.is_some() {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if log::set_boxed_logger(Box::new(DebugLog { file })).is_ok() {
        log::set_max_level(level);
    }
    Ok(())
}

/// Invalid UTF-8 is replaced with U+FFFD rather than rejected.
fn decode_source(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("input is not valid UTF-8; replacing undecodable bytes");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

impl Cli {
    fn config(&self) -> RenderConfig {
        RenderConfig {
            tab_cell_width: self.tab_width,
            show_line_numbers: self.line_numbers,
            font_size: self.font_size,
            width_policy: if self.unicode_width {
                WidthPolicy::UnicodeWidth
            } else {
                WidthPolicy::Utf8Length
            },
            fallback: if self.legacy_fallback {
                FallbackPolicy::TokenColour
            } else {
                FallbackPolicy::Background
            },
            ..RenderConfig::default()
        }
    }

    /// Source text plus the language hint for the lexer.
    fn read_source(&self) -> Result<(String, String)> {
        if let Some(path) = &self.file {
            log::debug!("reading source file {}", path.display());
            let source = decode_source(fs::read(path)?);
            let hint = self.ext.clone().unwrap_or_else(|| {
                path.extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string_lossy().into_owned())
            });
            return Ok((source, hint));
        }

        if io::stdin().is_terminal() {
            return Err(Error::Config(
                "no input: pass a FILE or pipe source on stdin (see --help)".to_string(),
            ));
        }
        log::debug!("using stdin pipe input");
        let mut bytes = Vec::new();
        io::stdin().read_to_end(&mut bytes)?;
        let source = decode_source(bytes);
        let hint = self.ext.clone().unwrap_or_else(|| {
            log::warn!("no --ext given for stdin; guessing the language from content");
            String::new()
        });
        Ok((source, hint))
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.list_themes {
        for name in theme::names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let (source, hint) = cli.read_source()?;
    let config = cli.config();
    let provider = match &cli.font {
        Some(path) => AbGlyphProvider::from_path(path)?,
        None => AbGlyphProvider::system()?,
    };
    log::debug!("font {}, theme {}, hint {:?}", provider.source(), cli.theme, hint);

    let renderer = Renderer::new(provider, RegexLexer, config)?;
    let image = renderer.render_source(&source, &hint, theme::lookup(&cli.theme))?;

    if cli.clipboard {
        let tmp = std::env::temp_dir().join(format!("code2png-{}.png", std::process::id()));
        output::save_png(&image, &tmp)?;
        let copied = output::copy_png_to_clipboard(&tmp);
        let _ = fs::remove_file(&tmp);
        copied?;
        log::debug!("image copied to clipboard");
    } else {
        let target = cli.output.as_ref().unwrap_or(&cli.out);
        output::save_png(&image, target)?;
        log::debug!("image saved to {}", target.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.debug_log.as_deref()) {
        eprintln!("cannot open debug log: {}", err);
    }
    log::debug!("starting code2png");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("failed: {}", err);
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let source = decode_source(b"let s = \"caf\xe9\";\n".to_vec());
        assert_eq!(source, "let s = \"caf\u{fffd}\";\n");
    }

    #[test]
    fn valid_utf8_passes_through() {
        assert_eq!(decode_source("日本 é\n".as_bytes().to_vec()), "日本 é\n");
    }

    #[test]
    fn cli_flags_map_to_config() {
        let cli = Cli::parse_from(["code2png", "--tab-width", "8", "-n", "--unicode-width", "in.rs"]);
        let cfg = cli.config();
        assert_eq!(cfg.tab_cell_width, 8);
        assert!(cfg.show_line_numbers);
        assert_eq!(cfg.width_policy, WidthPolicy::UnicodeWidth);
        assert_eq!(cfg.fallback, FallbackPolicy::Background);
    }
}
