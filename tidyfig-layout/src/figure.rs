//! Figure model handed over by the host renderer

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AXIS_FONT_SIZE, DEFAULT_AXIS_LINE_WIDTH, DEFAULT_FONT, DEFAULT_FONT_SIZE,
    DEFAULT_SPACING, DEFAULT_TICK_LENGTH,
};
use crate::error::TidyfigLayoutError;

/// Axis-aligned rectangle in points, origin at the bottom-left of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Whether `other` lies within this rectangle, allowing `tolerance` points of slack
    pub fn contains_rect(&self, other: &Rect, tolerance: f32) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.right() <= self.right() + tolerance
            && other.top() <= self.top() + tolerance
    }
}

/// Distance between a panel's cell boundary and its plot rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Margins {
    pub fn sides(&self) -> [f32; 4] {
        [self.left, self.right, self.top, self.bottom]
    }
}

/// One axis of a panel as rendered by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Axis {
    /// Data limits `[min, max]`
    pub limits: [f32; 2],
    pub ticks: Vec<f32>,
    pub tick_labels: Vec<String>,
    /// Axis label; empty means none
    pub label: String,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            limits: [0.0, 1.0],
            ticks: Vec::new(),
            tick_labels: Vec::new(),
            label: String::new(),
        }
    }
}

impl Axis {
    pub fn new(limits: [f32; 2]) -> Self {
        Self {
            limits,
            ..Default::default()
        }
    }

    pub fn with_ticks<S: Into<String>>(
        mut self,
        ticks: impl IntoIterator<Item = (f32, S)>,
    ) -> Self {
        let (ticks, labels): (Vec<f32>, Vec<String>) =
            ticks.into_iter().map(|(t, l)| (t, l.into())).unzip();
        self.ticks = ticks;
        self.tick_labels = labels;
        self
    }

    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = label.into();
        self
    }

    pub fn min(&self) -> f32 {
        self.limits[0]
    }

    pub fn max(&self) -> f32 {
        self.limits[1]
    }

    pub fn span(&self) -> f32 {
        self.limits[1] - self.limits[0]
    }

    /// The last tick and its label, if any
    pub fn last_tick(&self) -> Option<(f32, &str)> {
        let tick = *self.ticks.last()?;
        let label = self.tick_labels.last().map(String::as_str).unwrap_or("");
        Some((tick, label))
    }

    fn validate(&self, panel: usize, name: &str) -> Result<(), TidyfigLayoutError> {
        let [min, max] = self.limits;
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(TidyfigLayoutError::InvalidPanel {
                panel,
                reason: format!("{name} limits [{min}, {max}] must satisfy min < max"),
            });
        }
        if self.ticks.len() != self.tick_labels.len() {
            return Err(TidyfigLayoutError::InvalidPanel {
                panel,
                reason: format!(
                    "{name} axis has {} ticks but {} tick labels",
                    self.ticks.len(),
                    self.tick_labels.len()
                ),
            });
        }
        Ok(())
    }
}

/// Font and spacing settings a panel is laid out with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelStyle {
    pub font: String,
    /// Size of axis labels and title
    pub font_size: f32,
    /// Size of tick labels
    pub axis_font_size: f32,
    pub axis_line_width: f32,
    /// Base whitespace increment all margins derive from
    pub spacing: f32,
    /// `[length, sub-length]` of tick marks
    pub tick_length: [f32; 2],
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            axis_font_size: DEFAULT_AXIS_FONT_SIZE,
            axis_line_width: DEFAULT_AXIS_LINE_WIDTH,
            spacing: DEFAULT_SPACING,
            tick_length: DEFAULT_TICK_LENGTH,
        }
    }
}

/// One plotted coordinate system
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Panel {
    pub x: Axis,
    pub y: Axis,
    /// Present only for 3D panels, which are rejected
    pub z_limits: Option<[f32; 2]>,
    pub title: String,
    /// Host-assigned rectangle
    pub rect: Rect,
    pub style: PanelStyle,
}

impl Panel {
    pub fn new(x: Axis, y: Axis) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_style(mut self, style: PanelStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self, index: usize) -> Result<(), TidyfigLayoutError> {
        if self.z_limits.is_some() {
            return Err(TidyfigLayoutError::UnsupportedDimension { panel: index });
        }
        self.x.validate(index, "x")?;
        self.y.validate(index, "y")?;
        let style = &self.style;
        let sizes_ok = style.font_size > 0.0 && style.axis_font_size > 0.0;
        if style.spacing.is_nan() || style.spacing < 0.0 || !sizes_ok {
            return Err(TidyfigLayoutError::InvalidPanel {
                panel: index,
                reason: "spacing must be non-negative and font sizes positive".to_string(),
            });
        }
        Ok(())
    }
}

/// An already rendered figure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Figure {
    /// Canvas width in points
    pub width: f32,
    /// Canvas height in points
    pub height: f32,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            panels: Vec::new(),
        }
    }

    pub fn with_panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }

    pub fn canvas(&self) -> [f32; 2] {
        [self.width, self.height]
    }

    /// Checks everything layout relies on before any geometry is computed
    pub fn validate(&self) -> Result<(), TidyfigLayoutError> {
        if self.panels.is_empty() {
            return Err(TidyfigLayoutError::NoPanels);
        }
        for (index, panel) in self.panels.iter().enumerate() {
            panel.validate(index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> Panel {
        Panel::new(
            Axis::new([0.0, 10.0]).with_ticks([(0.0, "0"), (10.0, "10")]),
            Axis::new([0.0, 1.0]),
        )
    }

    #[test]
    fn test_empty_figure_rejected() {
        let figure = Figure::new(252.0, 235.0);
        assert_eq!(figure.validate(), Err(TidyfigLayoutError::NoPanels));
    }

    #[test]
    fn test_third_axis_rejected() {
        let mut three_d = panel();
        three_d.z_limits = Some([0.0, 1.0]);
        let figure = Figure::new(252.0, 235.0).with_panel(panel()).with_panel(three_d);
        assert_eq!(
            figure.validate(),
            Err(TidyfigLayoutError::UnsupportedDimension { panel: 1 })
        );
    }

    #[test]
    fn test_inverted_limits_rejected() {
        let mut bad = panel();
        bad.y.limits = [1.0, 1.0];
        let err = Figure::new(252.0, 235.0).with_panel(bad).validate().unwrap_err();
        assert!(matches!(err, TidyfigLayoutError::InvalidPanel { panel: 0, .. }));
    }

    #[test]
    fn test_tick_label_count_must_match() {
        let mut bad = panel();
        bad.x.tick_labels.pop();
        let err = Figure::new(252.0, 235.0).with_panel(bad).validate().unwrap_err();
        assert!(err.to_string().contains("2 ticks but 1 tick labels"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let figure: Figure = serde_json::from_str(
            r#"{"width": 252, "height": 235, "panels": [{"x": {"limits": [0, 5]}, "title": "A"}]}"#,
        )
        .unwrap();
        assert_eq!(figure.panels[0].x.limits, [0.0, 5.0]);
        assert_eq!(figure.panels[0].y.limits, [0.0, 1.0]);
        assert_eq!(figure.panels[0].style, PanelStyle::default());
        assert!(figure.validate().is_ok());
    }
}
