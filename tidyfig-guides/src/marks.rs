use serde::{Deserialize, Serialize};
use tidyfig_layout::figure::Rect;
use tidyfig_text::measurement::{TextMeasurementConfig, TextMeasurer};
use tidyfig_text::types::{FontStyle, FontWeight, TextAlign, TextBaseline};

/// What a placed text stands in for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementRole {
    XTick,
    YTick,
    XLabel,
    YLabel,
    Title,
}

/// A text primitive positioned in page space, replacing host-rendered text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TextPlacement {
    pub role: PlacementRole,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    /// Counter-clockwise rotation in degrees
    pub angle: f32,
    pub font: String,
    pub font_size: f32,
    pub font_weight: FontWeight,
}

impl TextPlacement {
    pub fn position(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Page-space box the text covers once aligned and rotated about its anchor
    pub fn extent<M: TextMeasurer>(&self, measurer: &M) -> Rect {
        let bounds = measurer.measure_text_bounds(&TextMeasurementConfig {
            text: &self.text,
            font: &self.font,
            font_size: self.font_size,
            font_weight: &self.font_weight,
            font_style: &FontStyle::Normal,
        });
        let [ox, oy] = bounds.calculate_origin([0.0, 0.0], &self.align, &self.baseline);
        let corners = [
            [ox, oy],
            [ox + bounds.width, oy],
            [ox, oy + bounds.height],
            [ox + bounds.width, oy + bounds.height],
        ];

        let (sin, cos) = self.angle.to_radians().sin_cos();
        let [x, y] = self.position();
        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for [u, v] in corners {
            let px = x + u * cos - v * sin;
            let py = y + u * sin + v * cos;
            min_x = min_x.min(px);
            min_y = min_y.min(py);
            max_x = max_x.max(px);
            max_y = max_y.max(py);
        }
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}
