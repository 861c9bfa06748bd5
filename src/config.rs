//! Board configuration: font bounds, zoom limits, object defaults.
//!
//! The host may hand the engine a JSON document at start-up. Every field is
//! optional; anything missing falls back to the defaults below, which match
//! the stock board page.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

const DEFAULT_PADDING: f64 = 10.0;
const DEFAULT_MIN_FONT_SIZE: u32 = 8;
const DEFAULT_MAX_FONT_SIZE: u32 = 75;
const DEFAULT_MAX_TEXT_WIDTH: f64 = 500.0;
const DEFAULT_MIN_SCALE: f64 = 0.05;
const DEFAULT_MAX_SCALE: f64 = 8.0;
const DEFAULT_SCALE_BY: f64 = 1.1;
const DEFAULT_STICKER_SIZE: f64 = 200.0;
const DEFAULT_PLATE_HEIGHT: f64 = 30.0;
const DEFAULT_PLATE_FONT_SIZE: f64 = 14.0;
const DEFAULT_PLATE_MARGIN: f64 = 5.0;
const DEFAULT_STICKER_COLOR: &str = "#ffffcc";
const DEFAULT_BRUSH_COLOR: &str = "#000000";
const DEFAULT_BRUSH_SIZE: f64 = 2.0;
const DEFAULT_ERASER_SIZE: f64 = 20.0;
const DEFAULT_TEXT_FONT_SIZE: f64 = 30.0;
const DEFAULT_TEXT_WIDTH: f64 = 200.0;

/// Tunables for the board engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Inner padding between a container edge and its label, in world units.
    pub padding: f64,
    /// Smallest font size the text fitter may choose.
    pub min_font_size: u32,
    /// Largest font size the text fitter may choose.
    pub max_font_size: u32,
    /// Widest a free text field may grow while typing.
    pub max_text_width: f64,
    /// Lower zoom bound.
    pub min_scale: f64,
    /// Upper zoom bound.
    pub max_scale: f64,
    /// Multiplicative zoom step per wheel notch.
    pub scale_by: f64,
    /// Side of a freshly placed sticker or reminder body.
    pub sticker_size: f64,
    /// Reminder date plate height at base sticker size.
    pub plate_height: f64,
    /// Reminder date plate font size at base sticker size.
    pub plate_font_size: f64,
    /// Gap between the date plate and the reminder body at base size.
    pub plate_margin: f64,
    /// Fill color for new stickers and reminders.
    pub sticker_color: String,
    /// Initial pen/highlighter color.
    pub brush_color: String,
    /// Initial pen/highlighter width in screen pixels.
    pub brush_size: f64,
    /// Initial eraser width in screen pixels.
    pub eraser_size: f64,
    /// Font size of a new text field.
    pub text_font_size: f64,
    /// Width of a new text field.
    pub text_width: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            min_font_size: DEFAULT_MIN_FONT_SIZE,
            max_font_size: DEFAULT_MAX_FONT_SIZE,
            max_text_width: DEFAULT_MAX_TEXT_WIDTH,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            scale_by: DEFAULT_SCALE_BY,
            sticker_size: DEFAULT_STICKER_SIZE,
            plate_height: DEFAULT_PLATE_HEIGHT,
            plate_font_size: DEFAULT_PLATE_FONT_SIZE,
            plate_margin: DEFAULT_PLATE_MARGIN,
            sticker_color: DEFAULT_STICKER_COLOR.to_owned(),
            brush_color: DEFAULT_BRUSH_COLOR.to_owned(),
            brush_size: DEFAULT_BRUSH_SIZE,
            eraser_size: DEFAULT_ERASER_SIZE,
            text_font_size: DEFAULT_TEXT_FONT_SIZE,
            text_width: DEFAULT_TEXT_WIDTH,
        }
    }
}

impl BoardConfig {
    /// Parse a config document, filling gaps with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Json`] for malformed JSON and
    /// [`BoardError::Config`] when the values fail [`BoardConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that bounds are ordered and sizes are positive.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.min_font_size == 0 || self.min_font_size > self.max_font_size {
            return Err(BoardError::Config(format!(
                "font bounds must satisfy 0 < min <= max, got {}..{}",
                self.min_font_size, self.max_font_size
            )));
        }
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(BoardError::Config(format!(
                "scale bounds must satisfy 0 < min <= max, got {}..{}",
                self.min_scale, self.max_scale
            )));
        }
        if self.scale_by <= 1.0 {
            return Err(BoardError::Config(format!("scale_by must exceed 1.0, got {}", self.scale_by)));
        }
        if self.padding < 0.0 || self.sticker_size <= self.padding * 2.0 {
            return Err(BoardError::Config(format!(
                "sticker_size {} leaves no room inside padding {}",
                self.sticker_size, self.padding
            )));
        }
        if self.brush_size <= 0.0 || self.eraser_size <= 0.0 {
            return Err(BoardError::Config("brush and eraser sizes must be positive".to_owned()));
        }
        Ok(())
    }

    /// Ratio of a reminder body side to the base sticker size.
    #[must_use]
    pub fn reminder_scale(&self, side: f64) -> f64 {
        side / self.sticker_size
    }
}
