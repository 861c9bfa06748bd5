//! Text layout: word wrapping and the binary-search font fitter.
//!
//! Stickers and reminders show a label that must always use the largest font
//! size that fits inside their padded body. Fitting needs two measurements at
//! each candidate size: the widest single word (words are never broken when a
//! size is accepted) and the height of the fully wrapped text. Measurement is
//! abstracted behind [`TextMeasure`] so the same code runs against the browser
//! canvas and against deterministic metrics in tests.

#[cfg(test)]
#[path = "textfit_test.rs"]
mod textfit_test;

use crate::consts::LINE_HEIGHT;

/// Source of rendered text widths.
pub trait TextMeasure {
    /// Rendered width of `text` on a single line at `font_size`.
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

/// Metrics where every character advances by `font_size * advance`.
///
/// Used when no canvas is available (headless engine, tests).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance(pub f64);

impl Default for FixedAdvance {
    fn default() -> Self {
        Self(0.55)
    }
}

impl TextMeasure for FixedAdvance {
    #[allow(clippy::cast_precision_loss)]
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * self.0
    }
}

/// Inclusive integer font-size range searched by [`fit_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontBounds {
    pub min: u32,
    pub max: u32,
}

/// Outcome of fitting a label into a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFit {
    /// Chosen font size.
    pub font_size: u32,
    /// Height of the wrapped text at `font_size`.
    pub text_height: f64,
    /// Top offset of the label inside the container that centers it vertically.
    pub offset_y: f64,
    /// `false` when the text overflows the interior height even at the minimum size.
    pub fits: bool,
}

/// Break `text` into lines no wider than `max_width`.
///
/// Explicit newlines start new paragraphs. Words are placed greedily; a word
/// that is wider than the line on its own is split between characters.
#[must_use]
pub fn wrap_lines(measure: &dyn TextMeasure, text: &str, max_width: f64, font_size: f64) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() { word.to_owned() } else { format!("{current} {word}") };
            if measure.text_width(&candidate, font_size) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if measure.text_width(word, font_size) <= max_width {
                current = word.to_owned();
            } else {
                current = break_word(measure, word, max_width, font_size, &mut lines);
            }
        }
        lines.push(current);
    }
    lines
}

/// Split an over-wide word into full lines, returning the unfinished tail.
fn break_word(
    measure: &dyn TextMeasure,
    word: &str,
    max_width: f64,
    font_size: f64,
    lines: &mut Vec<String>,
) -> String {
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        if measure.text_width(&piece, font_size) > max_width && piece.chars().count() > 1 {
            piece.pop();
            lines.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    piece
}

/// Height of `line_count` lines at `font_size`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn lines_height(line_count: usize, font_size: f64) -> f64 {
    line_count as f64 * font_size * LINE_HEIGHT
}

/// Height of `text` wrapped at `max_width`.
#[must_use]
pub fn wrapped_height(measure: &dyn TextMeasure, text: &str, max_width: f64, font_size: f64) -> f64 {
    lines_height(wrap_lines(measure, text, max_width, font_size).len(), font_size)
}

/// Width of the widest whitespace-delimited word at `font_size`.
#[must_use]
pub fn widest_word(measure: &dyn TextMeasure, text: &str, font_size: f64) -> f64 {
    text.split_whitespace()
        .map(|w| measure.text_width(w, font_size))
        .fold(0.0, f64::max)
}

/// Pick the largest font size in `bounds` that fits `text` inside a
/// `container_w × container_h` box with `padding` on every side.
///
/// A size is accepted only when the widest word fits the interior width
/// unbroken and the wrapped text fits the interior height. When nothing fits,
/// the minimum size is returned with `fits == false` if the height overflows.
#[must_use]
pub fn fit_text(
    measure: &dyn TextMeasure,
    text: &str,
    container_w: f64,
    container_h: f64,
    padding: f64,
    bounds: FontBounds,
) -> TextFit {
    let max_width = container_w - padding * 2.0;
    let max_height = container_h - padding * 2.0;

    let mut low = i64::from(bounds.min);
    let mut high = i64::from(bounds.max);
    let mut best = bounds.min;

    while low <= high {
        let mid = (low + high) / 2;
        let size = f64::from(u32::try_from(mid).unwrap_or(bounds.min));
        if widest_word(measure, text, size) > max_width {
            high = mid - 1;
            continue;
        }
        if wrapped_height(measure, text, max_width, size) > max_height {
            high = mid - 1;
        } else {
            best = u32::try_from(mid).unwrap_or(bounds.min);
            low = mid + 1;
        }
    }

    let text_height = wrapped_height(measure, text, max_width, f64::from(best));
    TextFit {
        font_size: best,
        text_height,
        offset_y: (container_h - text_height) / 2.0,
        fits: text_height <= max_height,
    }
}
