//! Line-number column drawn to the left of the code.

use image::{Rgba, RgbaImage};

use crate::canvas::CanvasSpec;
use crate::config::{RenderConfig, GUTTER_INSET};
use crate::font::GlyphFace;

/// Rows of the canvas that hold code, derived from the canvas height alone.
pub fn usable_rows(canvas: &CanvasSpec, config: &RenderConfig) -> u32 {
    (canvas.height / canvas.line_height.max(1)).saturating_sub(config.vertical_padding)
}

/// Draw right-aligned line numbers `1..=usable_rows` on the code baselines.
pub fn draw_gutter(
    buf: &mut RgbaImage,
    face: &dyn GlyphFace,
    canvas: &CanvasSpec,
    config: &RenderConfig,
    colour: Rgba<u8>,
) {
    let rows = usable_rows(canvas, config);
    let field = canvas.gutter_width as usize;
    for line in 1..=rows {
        let label = format!("{:>width$}", line, width = field);
        let y = ((line - 1 + config.vertical_padding) * canvas.line_height) as i32;
        let mut column = GUTTER_INSET;
        for c in label.chars() {
            if c != ' ' {
                face.draw_char(buf, (column * canvas.cell_advance) as i32, y, c, colour);
            }
            column += 1;
        }
    }
    log::debug!("drew gutter for {} rows", rows);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::estimate;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(i32, i32, char)>>,
    }

    impl GlyphFace for Recorder {
        fn draw_char(&self, _buf: &mut RgbaImage, x: i32, y: i32, c: char, _colour: Rgba<u8>) {
            self.calls.borrow_mut().push((x, y, c));
        }
    }

    #[test]
    fn numbers_are_right_aligned_on_code_baselines() {
        let cfg = RenderConfig::default().with_line_numbers(true);
        let src = "x\n".repeat(10);
        let canvas = estimate(&src, &cfg);
        assert_eq!(canvas.gutter_width, 2);
        let mut buf = RgbaImage::new(canvas.width, canvas.height);
        let face = Recorder::default();
        draw_gutter(&mut buf, &face, &canvas, &cfg, Rgba([0, 0, 0, 255]));

        let calls = face.calls.borrow();
        // 1..=9 one glyph each, 10 and 11 two glyphs each.
        assert_eq!(calls.len(), 9 + 4);
        // "1" sits in the second cell of the field, on the first code row.
        assert_eq!(calls[0], (30, 40, '1'));
        assert_eq!(calls[9], (20, 40 + 9 * 20, '1'));
        assert_eq!(calls[10], (30, 40 + 9 * 20, '0'));
    }

    #[test]
    fn empty_source_numbers_single_line() {
        let cfg = RenderConfig::default().with_line_numbers(true);
        let canvas = estimate("", &cfg);
        assert_eq!(usable_rows(&canvas, &cfg), 1);
        let mut buf = RgbaImage::new(canvas.width, canvas.height);
        let face = Recorder::default();
        draw_gutter(&mut buf, &face, &canvas, &cfg, Rgba([0, 0, 0, 255]));
        assert_eq!(*face.calls.borrow(), vec![(20, 40, '1')]);
    }
}
