//! Text measurement from Adobe Font Metrics advance widths.
//!
//! Only the Helvetica family is tabulated. Arial shares its metrics, and the oblique faces
//! share the widths of their upright counterparts. Requests for any other family are
//! measured with the same tables.

use std::collections::HashSet;
use std::sync::Mutex;

use lazy_static::lazy_static;
use log::debug;

use super::{TextBounds, TextMeasurementConfig, TextMeasurer};

/// Family names measured without fallback
pub const SUPPORTED_FAMILIES: [&str; 4] = ["helvetica", "arial", "sans-serif", "sans serif"];

const UNITS_PER_EM: f32 = 1000.0;
const ASCENDER: f32 = 718.0;
const DESCENDER: f32 = 207.0;
const LINE_GAP: f32 = 275.0;

/// Width used for codepoints outside the table
const DEFAULT_WIDTH: u16 = 556;
const MINUS_SIGN_WIDTH: u16 = 584;

/// Helvetica advance widths for ASCII 32..=126
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ASCII 32..=126
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

lazy_static! {
    static ref REPORTED_FALLBACKS: Mutex<HashSet<String>> = Mutex::new(HashSet::new());
}

fn report_fallback(font: &str) {
    // Poisoned lock only loses the dedup, never the measurement
    if let Ok(mut reported) = REPORTED_FALLBACKS.lock() {
        if reported.insert(font.to_string()) {
            debug!("font family `{font}` has no metrics table, measuring as Helvetica");
        }
    }
}

pub fn is_supported_family(font: &str) -> bool {
    let font = font.trim().to_lowercase();
    SUPPORTED_FAMILIES.contains(&font.as_str())
}

/// Advance width of one character in font units
pub fn char_width(ch: char, bold: bool) -> u16 {
    let table = if bold {
        &HELVETICA_BOLD_WIDTHS
    } else {
        &HELVETICA_WIDTHS
    };
    match ch {
        ' '..='~' => table[ch as usize - 32],
        '\u{2212}' => MINUS_SIGN_WIDTH,
        _ => DEFAULT_WIDTH,
    }
}

#[derive(Debug, Default, Clone)]
pub struct AfmTextMeasurer {}

impl AfmTextMeasurer {
    pub fn new() -> Self {
        Self {}
    }
}

impl TextMeasurer for AfmTextMeasurer {
    fn measure_text_bounds(&self, config: &TextMeasurementConfig) -> TextBounds {
        if config.text.is_empty() {
            return TextBounds::empty();
        }
        if !is_supported_family(config.font) {
            report_fallback(config.font);
        }

        let bold = config.font_weight.is_bold();
        let units: u32 = config
            .text
            .chars()
            .map(|ch| char_width(ch, bold) as u32)
            .sum();

        let scale = config.font_size / UNITS_PER_EM;
        let ascent = ASCENDER * scale;
        let descent = DESCENDER * scale;

        TextBounds {
            width: units as f32 * scale,
            height: (ASCENDER + DESCENDER) * scale,
            ascent,
            descent,
            line_height: (ASCENDER + DESCENDER + LINE_GAP) * scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FontStyle, FontWeight, FontWeightNameSpec};
    use float_cmp::assert_approx_eq;

    fn measure(text: &str, font: &str, size: f32, weight: FontWeightNameSpec) -> TextBounds {
        AfmTextMeasurer::new().measure_text_bounds(&TextMeasurementConfig {
            text,
            font,
            font_size: size,
            font_weight: &FontWeight::Name(weight),
            font_style: &FontStyle::Normal,
        })
    }

    #[test]
    fn test_digits_share_one_width() {
        let bounds = measure("10", "Helvetica", 12.0, FontWeightNameSpec::Normal);
        assert_approx_eq!(f32, bounds.width, 13.344);
        assert_approx_eq!(f32, bounds.height, 11.1);
        assert_approx_eq!(f32, bounds.ascent + bounds.descent, bounds.height);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = measure("Title", "Helvetica", 10.0, FontWeightNameSpec::Normal);
        let bold = measure("Title", "Helvetica", 10.0, FontWeightNameSpec::Bold);
        assert!(bold.width > regular.width);
        assert_eq!(bold.height, regular.height);
    }

    #[test]
    fn test_empty_text_has_no_extent() {
        let bounds = measure("", "Helvetica", 12.0, FontWeightNameSpec::Normal);
        assert_eq!(bounds, TextBounds::empty());
    }

    #[test]
    fn test_unknown_family_degrades_to_helvetica() {
        let helvetica = measure("Voltage (V)", "Helvetica", 9.0, FontWeightNameSpec::Normal);
        let other = measure("Voltage (V)", "Comic Sans", 9.0, FontWeightNameSpec::Normal);
        assert_eq!(helvetica, other);
    }

    #[test]
    fn test_non_ascii_uses_default_width() {
        assert_eq!(char_width('\u{00b5}', false), DEFAULT_WIDTH);
        assert_eq!(char_width('\u{2212}', false), char_width('+', false));
    }

    #[test]
    fn test_deterministic() {
        let a = measure("Independent Variable t (s)", "Arial", 8.0, FontWeightNameSpec::Normal);
        let b = measure("Independent Variable t (s)", "Arial", 8.0, FontWeightNameSpec::Normal);
        assert_eq!(a, b);
    }
}
