//! Render configuration shared by every stage of the pipeline.

use crate::colour::FallbackPolicy;
use crate::cursor::WidthPolicy;
use crate::error::{Error, Result};

/// Cells between the gutter's start and the code, on top of the gutter width.
pub const GUTTER_CODE_GAP: u32 = 3;
/// Cells between the left edge and the line numbers.
pub const GUTTER_INSET: u32 = 2;

pub const MAX_FONT_SIZE: u32 = 512;
pub const MAX_TAB_WIDTH: u32 = 64;
pub const MAX_PADDING: u32 = 64;

/// Knobs for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Cells a tab advances the cursor by (and is charged in size estimates).
    pub tab_cell_width: u32,
    /// Extra rows added to the canvas height.
    pub vertical_padding: u32,
    /// Extra cells added to the canvas width.
    pub horizontal_padding: u32,
    pub show_line_numbers: bool,
    /// Font point size; cell metrics are derived from it.
    pub font_size: u32,
    pub width_policy: WidthPolicy,
    pub fallback: FallbackPolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tab_cell_width: 4,
            vertical_padding: 2,
            horizontal_padding: 5,
            show_line_numbers: false,
            font_size: 20,
            width_policy: WidthPolicy::Utf8Length,
            fallback: FallbackPolicy::Background,
        }
    }
}

impl RenderConfig {
    pub fn with_line_numbers(mut self, on: bool) -> Self {
        self.show_line_numbers = on;
        self
    }

    /// Horizontal pixel advance of one grid cell.
    pub fn cell_advance(&self) -> u32 {
        self.font_size / 2
    }

    /// Vertical pixel distance between baselines.
    pub fn line_height(&self) -> u32 {
        self.font_size
    }

    /// First code column for a given gutter width (in cells). Without a
    /// gutter, code starts at the left edge.
    pub fn code_origin(&self, gutter_width: u32) -> u32 {
        if self.show_line_numbers {
            gutter_width + GUTTER_CODE_GAP
        } else {
            0
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_FONT_SIZE).contains(&self.font_size) {
            return Err(Error::Config(format!(
                "font size {} is outside 2..={}",
                self.font_size, MAX_FONT_SIZE
            )));
        }
        if !(1..=MAX_TAB_WIDTH).contains(&self.tab_cell_width) {
            return Err(Error::Config(format!(
                "tab width {} is outside 1..={}",
                self.tab_cell_width, MAX_TAB_WIDTH
            )));
        }
        if self.vertical_padding > MAX_PADDING || self.horizontal_padding > MAX_PADDING {
            return Err(Error::Config(format!("padding is limited to {} cells", MAX_PADDING)));
        }
        Ok(())
    }
}
