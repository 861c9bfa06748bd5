#![allow(clippy::float_cmp)]

use super::*;

const MEASURE: FixedAdvance = FixedAdvance(0.5);
const BOUNDS: FontBounds = FontBounds { min: 8, max: 75 };

fn satisfies(text: &str, w: f64, h: f64, padding: f64, size: u32) -> bool {
    let size = f64::from(size);
    let inner_w = w - padding * 2.0;
    let inner_h = h - padding * 2.0;
    widest_word(&MEASURE, text, size) <= inner_w && wrapped_height(&MEASURE, text, inner_w, size) <= inner_h
}

// =============================================================
// wrap_lines
// =============================================================

#[test]
fn wrap_keeps_short_text_on_one_line() {
    let lines = wrap_lines(&MEASURE, "hello world", 1000.0, 10.0);
    assert_eq!(lines, vec!["hello world"]);
}

#[test]
fn wrap_breaks_between_words() {
    // Each char is 5px wide at size 10; "hello world" is 55px.
    let lines = wrap_lines(&MEASURE, "hello world", 40.0, 10.0);
    assert_eq!(lines, vec!["hello", "world"]);
}

#[test]
fn wrap_collapses_repeated_whitespace() {
    let lines = wrap_lines(&MEASURE, "a   b\tc", 1000.0, 10.0);
    assert_eq!(lines, vec!["a b c"]);
}

#[test]
fn wrap_honors_explicit_newlines() {
    let lines = wrap_lines(&MEASURE, "a\n\nb", 1000.0, 10.0);
    assert_eq!(lines, vec!["a", "", "b"]);
}

#[test]
fn wrap_splits_over_wide_word_by_characters() {
    let lines = wrap_lines(&MEASURE, "abcdefghij", 20.0, 10.0);
    assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
}

#[test]
fn wrap_flushes_line_before_splitting_word() {
    let lines = wrap_lines(&MEASURE, "hi abcdefghij", 20.0, 10.0);
    assert_eq!(lines, vec!["hi", "abcd", "efgh", "ij"]);
}

#[test]
fn wrap_of_empty_text_is_one_blank_line() {
    assert_eq!(wrap_lines(&MEASURE, "", 100.0, 10.0), vec![String::new()]);
}

// =============================================================
// Measurements
// =============================================================

#[test]
fn lines_height_uses_line_height_factor() {
    assert!((lines_height(3, 10.0) - 36.0).abs() < 1e-12);
}

#[test]
fn widest_word_picks_the_widest() {
    assert_eq!(widest_word(&MEASURE, "a bbb cc", 10.0), 15.0);
    assert_eq!(widest_word(&MEASURE, "   ", 10.0), 0.0);
}

// =============================================================
// fit_text
// =============================================================

#[test]
fn short_text_gets_max_font() {
    let fit = fit_text(&MEASURE, "Hi", 200.0, 200.0, 10.0, BOUNDS);
    assert_eq!(fit.font_size, 75);
    assert!(fit.fits);
}

#[test]
fn label_is_vertically_centered() {
    let fit = fit_text(&MEASURE, "Hi", 200.0, 200.0, 10.0, BOUNDS);
    // One line at 75px with 1.2 line height is 90px tall.
    assert!((fit.text_height - 90.0).abs() < 1e-9);
    assert!((fit.offset_y - 55.0).abs() < 1e-9);
}

#[test]
fn long_word_shrinks_to_interior_width() {
    let word = "supercalifragilisticexpialidocious";
    let fit = fit_text(&MEASURE, word, 200.0, 200.0, 10.0, BOUNDS);
    // 34 chars at 0.5em must fit 180px: size <= 10.58.
    assert_eq!(fit.font_size, 10);
    assert!(widest_word(&MEASURE, word, f64::from(fit.font_size)) <= 180.0);
    assert_eq!(wrap_lines(&MEASURE, word, 180.0, f64::from(fit.font_size)).len(), 1);
    assert!(fit.fits);
}

#[test]
fn overflow_at_min_size_reports_not_fitting() {
    let fit = fit_text(&MEASURE, "a a a a a a a a a a", 40.0, 40.0, 10.0, BOUNDS);
    assert_eq!(fit.font_size, 8);
    assert!(!fit.fits);
}

#[test]
fn chosen_size_is_maximal() {
    let texts = [
        "Hi",
        "Buy milk",
        "Call the plumber about the kitchen sink before Friday",
        "supercalifragilisticexpialidocious and more",
        "one\ntwo\nthree\nfour",
        "x",
    ];
    let boxes = [(200.0, 200.0), (120.0, 300.0), (400.0, 90.0), (64.0, 64.0)];
    for text in texts {
        for (w, h) in boxes {
            let fit = fit_text(&MEASURE, text, w, h, 10.0, BOUNDS);
            assert!((BOUNDS.min..=BOUNDS.max).contains(&fit.font_size));
            if fit.fits && satisfies(text, w, h, 10.0, fit.font_size) {
                if fit.font_size < BOUNDS.max {
                    assert!(
                        !satisfies(text, w, h, 10.0, fit.font_size + 1),
                        "{text:?} in {w}x{h}: {} is not maximal",
                        fit.font_size
                    );
                }
            } else {
                assert_eq!(fit.font_size, BOUNDS.min, "{text:?} in {w}x{h}");
            }
        }
    }
}

#[test]
fn fitting_is_idempotent() {
    let text = "Quarterly planning: review roadmap and staffing";
    let a = fit_text(&MEASURE, text, 180.0, 240.0, 10.0, BOUNDS);
    let b = fit_text(&MEASURE, text, 180.0, 240.0, 10.0, BOUNDS);
    assert_eq!(a, b);
}

#[test]
fn inverted_bounds_fall_back_to_min() {
    let fit = fit_text(&MEASURE, "Hi", 200.0, 200.0, 10.0, FontBounds { min: 20, max: 10 });
    assert_eq!(fit.font_size, 20);
}

#[test]
fn fixed_advance_counts_chars_not_bytes() {
    assert_eq!(FixedAdvance(1.0).text_width("дедлайн", 2.0), 14.0);
}
