//! Grid cursor: maps characters to pixel origins in raster order.

use unicode_width::UnicodeWidthChar;

use crate::canvas::CanvasSpec;

/// How many grid cells a drawn character occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthPolicy {
    /// Two cells when the UTF-8 encoding is longer than two bytes.
    #[default]
    Utf8Length,
    /// East Asian width from the Unicode tables, at least one cell.
    UnicodeWidth,
}

impl WidthPolicy {
    pub fn cells(self, c: char) -> u32 {
        match self {
            WidthPolicy::Utf8Length => {
                if c.len_utf8() > 2 {
                    2
                } else {
                    1
                }
            }
            WidthPolicy::UnicodeWidth => c.width().unwrap_or(1).max(1) as u32,
        }
    }
}

/// Pixel offset of a cell index, clamped so it stays off-canvas rather than
/// wrapping.
fn pixel(cells: u32, size: u32) -> i32 {
    i32::try_from(cells.saturating_mul(size)).unwrap_or(i32::MAX)
}

/// What the rasterizer should do with one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Draw the glyph with its baseline origin at `(x, y)`.
    Draw { x: i32, y: i32 },
    /// Control character; nothing to draw.
    Skip,
}

/// Current cell of the code area.
#[derive(Debug, Clone)]
pub struct GridCursor {
    column: u32,
    row: u32,
    origin_column: u32,
    tab_cell_width: u32,
    cell_advance: u32,
    line_height: u32,
    width_policy: WidthPolicy,
}

impl GridCursor {
    pub fn new(
        origin_column: u32,
        first_row: u32,
        canvas: &CanvasSpec,
        tab_cell_width: u32,
        width_policy: WidthPolicy,
    ) -> Self {
        Self {
            column: origin_column,
            row: first_row,
            origin_column,
            tab_cell_width,
            cell_advance: canvas.cell_advance,
            line_height: canvas.line_height,
            width_policy,
        }
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn advance(&mut self, c: char) -> Step {
        match c {
            '\n' => {
                self.row = self.row.saturating_add(1);
                self.column = self.origin_column;
                Step::Skip
            }
            '\t' => {
                self.column = self.column.saturating_add(self.tab_cell_width);
                Step::Skip
            }
            '\r' => Step::Skip,
            _ => {
                let step = Step::Draw {
                    x: pixel(self.column, self.cell_advance),
                    y: pixel(self.row, self.line_height),
                };
                self.column = self.column.saturating_add(self.width_policy.cells(c));
                step
            }
        }
    }
}
