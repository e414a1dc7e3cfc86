//! Delivering a finished buffer: PNG encoding, files and the clipboard.

use std::io::{Cursor, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use image::{ImageFormat, RgbaImage};

use crate::error::{Error, Result};

/// Encode `image` as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Encode `image` as PNG and write it to `path`.
pub fn save_png(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let bytes = encode_png(image)?;
    std::fs::write(path.as_ref(), bytes)?;
    log::debug!("wrote {}", path.as_ref().display());
    Ok(())
}

fn run(cmd: &mut Command) -> Result<()> {
    let output = cmd
        .output()
        .map_err(|e| Error::Clipboard(format!("{:?}: {}", cmd.get_program(), e)))?;
    if !output.status.success() {
        return Err(Error::Clipboard(format!(
            "{}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}

/// Place the PNG file at `path` on the system clipboard as an image.
pub fn copy_png_to_clipboard(path: &Path) -> Result<()> {
    let file = path.display().to_string();
    match std::env::consts::OS {
        "macos" => run(Command::new("osascript").args([
            "-e",
            format!("set the clipboard to (read \"{}\" as TIFF picture)", file).as_str(),
        ])),
        "linux" => {
            let bytes = std::fs::read(path)?;
            let mut child = Command::new("xclip")
                .args(["-selection", "clipboard", "-t", "image/png"])
                .stdin(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .map_err(|e| Error::Clipboard(format!("xclip: {}", e)))?;
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(&bytes)?;
            }
            let status = child.wait()?;
            if !status.success() {
                return Err(Error::Clipboard(format!("xclip exited with {}", status)));
            }
            Ok(())
        }
        "windows" => run(Command::new("PowerShell").args([
            "-Command",
            "Add-Type",
            "-AssemblyName",
            format!(
                "System.Windows.Forms;[Windows.Forms.Clipboard]::SetImage([System.Drawing.Image]::FromFile('{}'));",
                file
            )
            .as_str(),
        ])),
        other => Err(Error::Clipboard(format!("unsupported os: {}", other))),
    }
}
