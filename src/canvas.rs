//! Canvas size prediction from raw source text.

use crate::config::RenderConfig;

/// Pixel dimensions and cell metrics for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub cell_advance: u32,
    pub line_height: u32,
    /// Gutter width in grid cells, 0 when line numbers are off.
    pub gutter_width: u32,
}

/// Number of lines in `source`; a trailing newline opens one more, empty line.
pub fn line_count(source: &str) -> u32 {
    source.split('\n').count() as u32
}

/// Decimal digit count of `n` (`0` has one digit).
pub fn decimal_digits(mut n: u32) -> u32 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Cells charged for one line. Tabs cost a flat `tab_cell_width`.
fn line_weight(line: &str, tab_cell_width: u32) -> u32 {
    let chars = line.chars().count() as u32;
    let tabs = line.chars().filter(|&c| c == '\t').count() as u32;
    chars.saturating_add(tabs.saturating_mul(tab_cell_width - 1))
}

/// Predict the canvas for `source` without tokenizing it or loading a font.
pub fn estimate(source: &str, config: &RenderConfig) -> CanvasSpec {
    let mut max_width_cells: u32 = 0;
    let mut lines: u32 = 0;
    for line in source.split('\n') {
        max_width_cells = max_width_cells.max(line_weight(line, config.tab_cell_width.max(1)));
        lines += 1;
    }

    let gutter_width = if config.show_line_numbers {
        decimal_digits(lines)
    } else {
        0
    };
    max_width_cells = max_width_cells.saturating_add(gutter_width);

    let cell_advance = config.cell_advance();
    let line_height = config.line_height();
    let spec = CanvasSpec {
        width: max_width_cells
            .saturating_add(config.horizontal_padding)
            .saturating_mul(cell_advance),
        height: lines
            .saturating_add(config.vertical_padding)
            .saturating_mul(line_height),
        cell_advance,
        line_height,
        gutter_width,
    };
    log::debug!(
        "estimated canvas {}x{} for {} lines ({} cells wide)",
        spec.width,
        spec.height,
        lines,
        max_width_cells
    );
    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_tracks_line_count() {
        let cfg = RenderConfig::default();
        for src in ["", "a", "a\n", "a\nb\nc", "\n\n\n"] {
            let spec = estimate(src, &cfg);
            assert_eq!(spec.height, (line_count(src) + 2) * 20, "{:?}", src);
        }
    }

    #[test]
    fn gutter_width_is_digit_count() {
        let cfg = RenderConfig::default().with_line_numbers(true);
        let nine = "x\n".repeat(8) + "x";
        let ten = "x\n".repeat(9) + "x";
        assert_eq!(line_count(&nine), 9);
        assert_eq!(estimate(&nine, &cfg).gutter_width, 1);
        assert_eq!(estimate(&ten, &cfg).gutter_width, 2);
        assert_eq!(estimate(&ten, &RenderConfig::default()).gutter_width, 0);
    }

    #[test]
    fn tabs_charged_flat_width() {
        let cfg = RenderConfig::default();
        // 'a' + tab(4) + 'b' = 6 cells, plus 5 padding cells.
        let spec = estimate("a\tb\n", &cfg);
        assert_eq!(spec.width, (6 + 5) * 10);
        assert_eq!(spec.height, (2 + 2) * 20);
    }

    #[test]
    fn widest_line_wins_and_gutter_adds_width() {
        let cfg = RenderConfig::default().with_line_numbers(true);
        let spec = estimate("ab\nabcdef\nabc", &cfg);
        assert_eq!(spec.width, (6 + 1 + 5) * 10);
    }

    #[test]
    fn empty_source_is_one_line() {
        let cfg = RenderConfig::default().with_line_numbers(true);
        let spec = estimate("", &cfg);
        assert_eq!(spec.gutter_width, 1);
        assert_eq!(spec.height, 3 * 20);
        assert_eq!(spec.width, (1 + 5) * 10);
    }

    #[test]
    fn unvalidated_extremes_saturate() {
        let cfg = RenderConfig {
            tab_cell_width: u32::MAX,
            ..RenderConfig::default()
        };
        assert_eq!(estimate("\t\t", &cfg).width, u32::MAX);
        let cfg = RenderConfig {
            font_size: 2_000_000_000,
            ..RenderConfig::default()
        };
        let spec = estimate("abc", &cfg);
        assert_eq!((spec.width, spec.height), (u32::MAX, u32::MAX));
    }

    #[test]
    fn digits() {
        assert_eq!(decimal_digits(0), 1);
        assert_eq!(decimal_digits(9), 1);
        assert_eq!(decimal_digits(10), 2);
        assert_eq!(decimal_digits(1000), 4);
    }
}
