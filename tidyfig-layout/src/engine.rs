//! Margin computation from measured text
//!
//! Every margin is derived from the spacing unit `s` and the measured extents of the labels
//! that must fit beside the plot rectangle:
//!
//! - left: `3s + y label height + widest y tick label + tick length`
//! - bottom: `3s + x label height + tallest x tick label + tick length`
//! - right/top: `s`, widened when the last tick label would spill out of the cell or the
//!   axis stroke is wider than `s`
//!
//! All margins land on the quarter-point grid.

use log::debug;
use serde::{Deserialize, Serialize};
use tidyfig_text::measurement::{TextBounds, TextMeasurementConfig, TextMeasurer};
use tidyfig_text::types::{FontFace, FontStyle, FontWeight, FontWeightNameSpec};

use crate::constants::{ceil_quarter, round_quarter};
use crate::error::TidyfigLayoutError;
use crate::figure::{Axis, Figure, Margins, Panel, PanelStyle, Rect};
use crate::grid::GridSpec;

/// Measured text extents of one panel, in points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelExtents {
    pub x_label_height: f32,
    /// Height of the y label, which becomes its width once rotated
    pub y_label_height: f32,
    pub x_tick_height: f32,
    pub y_tick_width: f32,
    pub last_x_tick_width: f32,
    pub last_y_tick_height: f32,
    pub title_height: f32,
}

/// Final geometry of one panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelGeometry {
    pub cell: Rect,
    pub margins: Margins,
    pub plot: Rect,
    pub extents: PanelExtents,
}

/// Which text of a panel is being measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    TickLabel,
    AxisLabel,
    Title,
}

impl TextRole {
    pub fn face(&self) -> FontFace {
        match self {
            TextRole::Title => FontFace::Bold,
            TextRole::TickLabel | TextRole::AxisLabel => FontFace::Regular,
        }
    }

    pub fn font_size(&self, style: &PanelStyle) -> f32 {
        match self {
            TextRole::TickLabel => style.axis_font_size,
            TextRole::AxisLabel | TextRole::Title => style.font_size,
        }
    }
}

pub struct LayoutEngine<M: TextMeasurer> {
    measurer: M,
}

impl<M: TextMeasurer> LayoutEngine<M> {
    pub fn new(measurer: M) -> Self {
        Self { measurer }
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Measure `text` in the font the panel renders `role` with
    pub fn measure(&self, text: &str, role: TextRole, style: &PanelStyle) -> TextBounds {
        if text.is_empty() {
            return TextBounds::empty();
        }
        let face = role.face();
        let weight = if face.is_bold() {
            FontWeight::Name(FontWeightNameSpec::Bold)
        } else {
            FontWeight::Name(FontWeightNameSpec::Normal)
        };
        self.measurer.measure_text_bounds(&TextMeasurementConfig {
            text,
            font: &style.font,
            font_size: role.font_size(style),
            font_weight: &weight,
            font_style: &FontStyle::Normal,
        })
    }

    pub fn measure_extents(&self, panel: &Panel) -> PanelExtents {
        let style = &panel.style;
        let tick_bounds = |axis: &Axis| -> Vec<TextBounds> {
            axis.tick_labels
                .iter()
                .map(|label| self.measure(label, TextRole::TickLabel, style))
                .collect()
        };
        let x_ticks = tick_bounds(&panel.x);
        let y_ticks = tick_bounds(&panel.y);

        PanelExtents {
            x_label_height: self.measure(&panel.x.label, TextRole::AxisLabel, style).height,
            y_label_height: self.measure(&panel.y.label, TextRole::AxisLabel, style).height,
            x_tick_height: x_ticks.iter().map(|b| b.height).fold(0.0, f32::max),
            y_tick_width: y_ticks.iter().map(|b| b.width).fold(0.0, f32::max),
            last_x_tick_width: x_ticks.last().map(|b| b.width).unwrap_or(0.0),
            last_y_tick_height: y_ticks.last().map(|b| b.height).unwrap_or(0.0),
            title_height: self.measure(&panel.title, TextRole::Title, style).height,
        }
    }

    pub fn compute_margins(&self, panel: &Panel, cell: &Rect, extents: &PanelExtents) -> Margins {
        let style = &panel.style;
        let s = style.spacing;
        let tick_length = style.tick_length[0];

        let left = round_quarter(
            3.0 * s + extents.y_label_height + extents.y_tick_width + tick_length,
        );
        let bottom = round_quarter(
            3.0 * s + extents.x_label_height + extents.x_tick_height + tick_length,
        );

        let right = far_margin(
            &panel.x,
            left,
            cell.width,
            extents.last_x_tick_width / 2.0,
            s,
            style.axis_line_width,
        );
        let mut top = far_margin(
            &panel.y,
            bottom,
            cell.height,
            extents.last_y_tick_height / 2.0,
            s,
            style.axis_line_width,
        );
        if extents.title_height > 0.0 {
            top += extents.title_height + s;
        }

        Margins {
            left,
            right,
            top: round_quarter(top),
            bottom,
        }
    }

    pub fn layout_panel(
        &self,
        index: usize,
        panel: &Panel,
        cell: Rect,
    ) -> Result<PanelGeometry, TidyfigLayoutError> {
        let extents = self.measure_extents(panel);
        let margins = self.compute_margins(panel, &cell, &extents);

        let width = cell.width - margins.left - margins.right;
        let height = cell.height - margins.bottom - margins.top;
        if width < 0.0 || height < 0.0 {
            return Err(TidyfigLayoutError::NegativeExtent {
                panel: index,
                width,
                height,
                cell_width: cell.width,
                cell_height: cell.height,
            });
        }

        debug!(
            "panel {index}: margins l={} r={} t={} b={}, plot {width}x{height}",
            margins.left, margins.right, margins.top, margins.bottom
        );

        Ok(PanelGeometry {
            cell,
            margins,
            plot: Rect::new(cell.x + margins.left, cell.y + margins.bottom, width, height),
            extents,
        })
    }

    /// Lay out every panel of `figure` on `grid`.
    ///
    /// The figure is validated up front; afterwards only a negative plot extent can fail,
    /// and it fails the whole figure.
    pub fn layout(
        &self,
        figure: &Figure,
        grid: &GridSpec,
    ) -> Result<Vec<PanelGeometry>, TidyfigLayoutError> {
        figure.validate()?;
        if grid.capacity() < figure.panels.len() {
            return Err(TidyfigLayoutError::InvalidGrid(format!(
                "{}x{} grid cannot hold {} panels",
                grid.rows,
                grid.cols,
                figure.panels.len()
            )));
        }

        figure
            .panels
            .iter()
            .enumerate()
            .map(|(index, panel)| {
                self.layout_panel(index, panel, grid.cell(index, figure.canvas()))
            })
            .collect()
    }
}

/// Right or top margin.
///
/// Starts at `s`. Overflow of the last tick label wins over a wide axis stroke.
fn far_margin(
    axis: &Axis,
    near_margin: f32,
    cell_extent: f32,
    half_last_label: f32,
    s: f32,
    axis_line_width: f32,
) -> f32 {
    let overflows = axis.last_tick().is_some_and(|(tick, _)| {
        let available = cell_extent - near_margin - s;
        let position = available / axis.span() * (tick - axis.min());
        near_margin + position + half_last_label > cell_extent
    });

    let margin = if overflows {
        s + ceil_quarter(half_last_label)
    } else if axis_line_width > s {
        s + ceil_quarter(axis_line_width)
    } else {
        s
    };
    round_quarter(margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidyfig_text::measurement::afm::AfmTextMeasurer;

    struct FixedMeasurer;

    // Every character is 5pt wide and every line 10pt tall
    impl TextMeasurer for FixedMeasurer {
        fn measure_text_bounds(&self, config: &TextMeasurementConfig) -> TextBounds {
            TextBounds {
                width: 5.0 * config.text.chars().count() as f32,
                height: 10.0,
                ascent: 8.0,
                descent: 2.0,
                line_height: 12.0,
            }
        }
    }

    fn panel() -> Panel {
        Panel::new(
            Axis::new([0.0, 10.0]).with_ticks([(0.0, "0"), (5.0, "5"), (10.0, "10")]),
            Axis::new([0.0, 1.0]).with_ticks([(0.0, "0"), (0.5, "0.5"), (1.0, "1")]),
        )
        .with_style(PanelStyle {
            spacing: 1.0,
            tick_length: [3.0, 1.5],
            axis_line_width: 0.5,
            ..Default::default()
        })
    }

    #[test]
    fn test_left_and_bottom_margins() {
        let engine = LayoutEngine::new(FixedMeasurer);
        let mut panel = panel();
        panel.x.label = "Time (s)".to_string();
        panel.y.label = "Voltage".to_string();
        let cell = Rect::new(0.0, 0.0, 252.0, 235.0);
        let extents = engine.measure_extents(&panel);
        let margins = engine.compute_margins(&panel, &cell, &extents);

        // 3 + 10 (rotated label) + 15 ("0.5") + 3
        assert_eq!(margins.left, 31.0);
        // 3 + 10 (label) + 10 (tick labels) + 3
        assert_eq!(margins.bottom, 26.0);
    }

    #[test]
    fn test_last_tick_label_overflow_widens_right_margin() {
        let engine = LayoutEngine::new(FixedMeasurer);
        let panel = panel();
        let cell = Rect::new(0.0, 0.0, 252.0, 235.0);
        let extents = engine.measure_extents(&panel);
        let margins = engine.compute_margins(&panel, &cell, &extents);

        // "10" is 10pt wide, half of it hangs past the plot edge
        assert_eq!(margins.right, 1.0 + 5.0);
        // "1" is 10pt tall, half of it hangs past the top
        assert_eq!(margins.top, 1.0 + 5.0);
    }

    #[test]
    fn test_wide_axis_stroke_widens_margin() {
        let engine = LayoutEngine::new(FixedMeasurer);
        let mut panel = panel();
        // Last ticks well inside the limits, so no label overflows
        panel.x.limits = [0.0, 20.0];
        panel.y.limits = [0.0, 2.0];
        panel.style.axis_line_width = 1.6;
        let cell = Rect::new(0.0, 0.0, 252.0, 235.0);
        let extents = engine.measure_extents(&panel);
        let margins = engine.compute_margins(&panel, &cell, &extents);

        assert_eq!(margins.right, 1.0 + 1.75);
        assert_eq!(margins.top, 1.0 + 1.75);
    }

    #[test]
    fn test_overflow_takes_precedence_over_stroke() {
        let engine = LayoutEngine::new(FixedMeasurer);
        let mut panel = panel();
        panel.style.axis_line_width = 1.6;
        let cell = Rect::new(0.0, 0.0, 252.0, 235.0);
        let extents = engine.measure_extents(&panel);
        let margins = engine.compute_margins(&panel, &cell, &extents);

        assert_eq!(margins.right, 6.0);
    }

    #[test]
    fn test_title_widens_top_margin() {
        let engine = LayoutEngine::new(FixedMeasurer);
        let mut panel = panel();
        panel.y.limits = [0.0, 2.0];
        panel.title = "Response".to_string();
        let cell = Rect::new(0.0, 0.0, 252.0, 235.0);
        let extents = engine.measure_extents(&panel);
        let margins = engine.compute_margins(&panel, &cell, &extents);

        assert_eq!(margins.top, 1.0 + 10.0 + 1.0);
    }

    #[test]
    fn test_margins_are_quarter_points() {
        let engine = LayoutEngine::new(AfmTextMeasurer::new());
        for spacing in [0.3, 0.8, 1.1, 2.35] {
            let mut panel = panel();
            panel.style.spacing = spacing;
            panel.style.axis_line_width = 1.37;
            panel.x.label = "Independent Variable t (s)".to_string();
            let geometry = engine
                .layout_panel(0, &panel, Rect::new(0.0, 0.0, 252.0, 235.0))
                .unwrap();
            for side in geometry.margins.sides() {
                assert_eq!((side * 4.0).fract(), 0.0, "margin {side} off the quarter grid");
            }
        }
    }

    #[test]
    fn test_negative_extent() {
        let engine = LayoutEngine::new(FixedMeasurer);
        let mut panel = panel();
        panel.y.tick_labels[1] = "a very long tick label indeed".to_string();
        let result = engine.layout_panel(3, &panel, Rect::new(0.0, 0.0, 100.0, 235.0));
        assert!(matches!(
            result,
            Err(TidyfigLayoutError::NegativeExtent { panel: 3, .. })
        ));
    }

    #[test]
    fn test_empty_labels_contribute_nothing() {
        let engine = LayoutEngine::new(FixedMeasurer);
        let extents = engine.measure_extents(&panel());
        assert_eq!(extents.x_label_height, 0.0);
        assert_eq!(extents.y_label_height, 0.0);
        assert_eq!(extents.title_height, 0.0);
    }
}
