use crate::types::{FontStyle, FontWeight, TextAlign, TextBaseline};

pub mod afm;
pub mod cache;

/// Core trait for text measurement functionality
///
/// Implementations must be pure: the same configuration always yields the same bounds.
pub trait TextMeasurer: Send + Sync {
    /// Measures the bounding dimensions for a text string with given configuration
    fn measure_text_bounds(&self, config: &TextMeasurementConfig) -> TextBounds;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure_text_bounds(&self, config: &TextMeasurementConfig) -> TextBounds {
        (**self).measure_text_bounds(config)
    }
}

/// Configuration needed for text measurement
#[derive(Debug, Clone)]
pub struct TextMeasurementConfig<'a> {
    /// The text string to measure
    pub text: &'a str,
    /// Font family name
    pub font: &'a str,
    /// Font size in points
    pub font_size: f32,
    /// Font weight (normal, bold, or numeric)
    pub font_weight: &'a FontWeight,
    /// Font style (normal or italic)
    pub font_style: &'a FontStyle,
}

/// Results from text measurement, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBounds {
    /// Total width of the text
    pub width: f32,
    /// Total height from top to bottom
    pub height: f32,
    /// Distance from top to baseline
    pub ascent: f32,
    /// Distance from bottom to baseline
    pub descent: f32,
    /// Distance from top to where the top of the next line would be
    pub line_height: f32,
}

impl TextBounds {
    /// Bottom-left corner of the unrotated text box anchored at `position`.
    ///
    /// Page coordinates grow upward, so a `Top` baseline hangs the box below the anchor.
    pub fn calculate_origin(
        &self,
        position: [f32; 2],
        align: &TextAlign,
        baseline: &TextBaseline,
    ) -> [f32; 2] {
        let x = match align {
            TextAlign::Left => position[0],
            TextAlign::Center => position[0] - self.width / 2.0,
            TextAlign::Right => position[0] - self.width,
        };

        let y = match baseline {
            TextBaseline::Alphabetic => position[1] - self.descent,
            TextBaseline::Top => position[1] - self.height,
            TextBaseline::Middle => position[1] - self.height / 2.0,
            TextBaseline::Bottom => position[1],
        };

        [x, y]
    }

    pub fn empty() -> Self {
        TextBounds {
            width: 0.0,
            height: 0.0,
            ascent: 0.0,
            descent: 0.0,
            line_height: 0.0,
        }
    }
}

pub fn default_text_measurer() -> impl TextMeasurer {
    cache::CachedTextMeasurer::new(afm::AfmTextMeasurer::new())
}
