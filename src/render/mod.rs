//! Terminal presentation of scan results
//!
//! Everything here is a pure function from data to text. Colors come from
//! `console` styles and are only emitted when [`RenderOptions::color`] is set.

pub mod card;
pub mod meter;

use console::Style;

pub use card::{render_list_row, render_place_card, render_results, render_sources};
pub use meter::{MeterTone, active_segments, render_meter};

pub const TOTAL_SEGMENTS: u8 = 10;
pub const CARD_WIDTH: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
}

impl RenderOptions {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }

    /// Apply `style` when color is on, otherwise return the text unchanged
    pub fn paint(&self, text: &str, style: &Style) -> String {
        if self.color {
            style.clone().force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}
