use serde::{Deserialize, Serialize};
use tidyfig_layout::engine::{PanelGeometry, TextRole};
use tidyfig_layout::figure::Panel;
use tidyfig_text::types::{FontWeight, FontWeightNameSpec, TextAlign, TextBaseline};

use super::mapping::AxisMapping;
use crate::marks::{PlacementRole, TextPlacement};

/// Text and tick settings that replace the host's automatic axis decoration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelGuides {
    pub apparent_width: f32,
    pub apparent_height: f32,
    pub texts: Vec<TextPlacement>,
    /// Tick `[length, sub-length]` relative to the longer plot side, as the host expects it
    pub tick_length: [f32; 2],
}

/// Places tick labels, axis labels, and the title around a laid out panel
#[derive(Debug, Default, Clone, Copy)]
pub struct TickLabelPlacer;

impl TickLabelPlacer {
    pub fn new() -> Self {
        Self
    }

    pub fn place(&self, panel: &Panel, geometry: &PanelGeometry) -> PanelGuides {
        let style = &panel.style;
        let s = style.spacing;
        let tick_length = style.tick_length[0];
        let plot = geometry.plot;
        let margins = geometry.margins;
        let extents = geometry.extents;

        let x_map = AxisMapping::new(&panel.x, plot.width, s);
        let y_map = AxisMapping::new(&panel.y, plot.height, s);

        let text = |role: PlacementRole, text_role: TextRole, content: &str| TextPlacement {
            role,
            text: content.to_string(),
            x: 0.0,
            y: 0.0,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            angle: 0.0,
            font: style.font.clone(),
            font_size: text_role.font_size(style),
            font_weight: if text_role.face().is_bold() {
                FontWeight::Name(FontWeightNameSpec::Bold)
            } else {
                FontWeight::Name(FontWeightNameSpec::Normal)
            },
        };

        let mut texts = Vec::new();

        // Tick labels hang s + tick length under the plot
        let x_tick_y = plot.y - (margins.bottom - 2.0 * s - extents.x_label_height);
        for (tick, label) in panel.x.ticks.iter().zip(&panel.x.tick_labels) {
            if label.is_empty() {
                continue;
            }
            texts.push(TextPlacement {
                x: plot.x + x_map.page_pos(*tick),
                y: x_tick_y,
                baseline: TextBaseline::Bottom,
                ..text(PlacementRole::XTick, TextRole::TickLabel, label)
            });
        }

        let y_tick_x = plot.x - (s + tick_length);
        for (tick, label) in panel.y.ticks.iter().zip(&panel.y.tick_labels) {
            if label.is_empty() {
                continue;
            }
            texts.push(TextPlacement {
                x: y_tick_x,
                y: plot.y + y_map.page_pos(*tick),
                align: TextAlign::Right,
                ..text(PlacementRole::YTick, TextRole::TickLabel, label)
            });
        }

        if !panel.x.label.is_empty() {
            texts.push(TextPlacement {
                x: plot.x + x_map.apparent_extent / 2.0,
                y: plot.y - (margins.bottom - s),
                baseline: TextBaseline::Bottom,
                ..text(PlacementRole::XLabel, TextRole::AxisLabel, &panel.x.label)
            });
        }

        // Rotated a quarter turn, the label's top faces away from the plot
        if !panel.y.label.is_empty() {
            texts.push(TextPlacement {
                x: plot.x - (margins.left - s),
                y: plot.y + y_map.apparent_extent / 2.0,
                baseline: TextBaseline::Top,
                angle: 90.0,
                ..text(PlacementRole::YLabel, TextRole::AxisLabel, &panel.y.label)
            });
        }

        if !panel.title.is_empty() {
            texts.push(TextPlacement {
                x: plot.x + x_map.apparent_extent / 2.0,
                y: geometry.cell.top() - s - extents.title_height / 2.0,
                ..text(PlacementRole::Title, TextRole::Title, &panel.title)
            });
        }

        let longest = f32::max(x_map.apparent_extent, y_map.apparent_extent);
        let tick_length = if longest > 0.0 {
            [style.tick_length[0] / longest, style.tick_length[1] / longest]
        } else {
            [0.0, 0.0]
        };

        PanelGuides {
            apparent_width: x_map.apparent_extent,
            apparent_height: y_map.apparent_extent,
            texts,
            tick_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use tidyfig_layout::engine::PanelExtents;
    use tidyfig_layout::figure::{Axis, Margins, PanelStyle, Rect};

    fn panel() -> Panel {
        Panel::new(
            Axis::new([0.0, 10.0])
                .with_ticks([(0.0, "0"), (5.0, "5"), (10.0, "10")])
                .with_label("Time (s)"),
            Axis::new([-1.0, 1.0])
                .with_ticks([(-1.0, "-1"), (0.0, "0"), (1.0, "1")])
                .with_label("Signal"),
        )
        .with_title("Step response")
        .with_style(PanelStyle {
            spacing: 1.0,
            tick_length: [3.0, 1.5],
            ..Default::default()
        })
    }

    fn geometry() -> PanelGeometry {
        let margins = Margins {
            left: 30.0,
            right: 8.0,
            top: 20.0,
            bottom: 28.0,
        };
        PanelGeometry {
            cell: Rect::new(0.0, 0.0, 252.0, 235.0),
            margins,
            plot: Rect::new(30.0, 28.0, 214.0, 187.0),
            extents: PanelExtents {
                x_label_height: 9.25,
                y_label_height: 9.25,
                x_tick_height: 7.4,
                y_tick_width: 7.0,
                last_x_tick_width: 8.9,
                last_y_tick_height: 7.4,
                title_height: 9.25,
            },
        }
    }

    fn find(guides: &PanelGuides, role: PlacementRole) -> Vec<&TextPlacement> {
        guides.texts.iter().filter(|t| t.role == role).collect()
    }

    #[test]
    fn test_apparent_extent_correction() {
        let guides = TickLabelPlacer::new().place(&panel(), &geometry());
        // spacing 1pt is 4 quarter points, 4 mod 3 = 1
        assert_eq!(guides.apparent_width, 214.25);
        assert_eq!(guides.apparent_height, 187.25);
    }

    #[test]
    fn test_x_tick_labels() {
        let guides = TickLabelPlacer::new().place(&panel(), &geometry());
        let ticks = find(&guides, PlacementRole::XTick);
        assert_eq!(ticks.len(), 3);

        let expected_x: Vec<f32> = [0.0f32, 5.0, 10.0]
            .iter()
            .map(|v| 30.0 + 214.25 / 10.0 * v)
            .collect();
        for (tick, x) in ticks.iter().zip(expected_x) {
            assert_eq!(tick.x, x);
            assert_eq!(tick.y, 28.0 - (28.0 - 2.0 - 9.25));
            assert_eq!(tick.align, TextAlign::Center);
            assert_eq!(tick.baseline, TextBaseline::Bottom);
        }
    }

    #[test]
    fn test_y_tick_labels() {
        let guides = TickLabelPlacer::new().place(&panel(), &geometry());
        let ticks = find(&guides, PlacementRole::YTick);
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[0].y, 28.0);
        assert_eq!(ticks[1].y, 28.0 + 187.25 / 2.0 * 1.0);
        assert_eq!(ticks[2].y, 28.0 + 187.25 / 2.0 * 2.0);
        for tick in ticks {
            assert_eq!(tick.x, 30.0 - 4.0);
            assert_eq!(tick.align, TextAlign::Right);
            assert_eq!(tick.baseline, TextBaseline::Middle);
        }
    }

    #[test]
    fn test_axis_labels_and_title() {
        let guides = TickLabelPlacer::new().place(&panel(), &geometry());

        let x_label = find(&guides, PlacementRole::XLabel)[0];
        assert_eq!(x_label.x, 30.0 + 214.25 / 2.0);
        assert_eq!(x_label.y, 28.0 - 27.0);

        let y_label = find(&guides, PlacementRole::YLabel)[0];
        assert_eq!(y_label.angle, 90.0);
        assert_eq!(y_label.x, 30.0 - 29.0);
        assert_eq!(y_label.y, 28.0 + 187.25 / 2.0);

        let title = find(&guides, PlacementRole::Title)[0];
        assert_eq!(title.x, x_label.x);
        assert_eq!(title.y, 235.0 - 1.0 - 9.25 / 2.0);
        assert!(title.font_weight.is_bold());
    }

    #[test]
    fn test_tick_length_normalized_to_longer_side() {
        let guides = TickLabelPlacer::new().place(&panel(), &geometry());
        assert_approx_eq!(f32, guides.tick_length[0], 3.0 / 214.25);
        assert_approx_eq!(f32, guides.tick_length[1], 1.5 / 214.25);
    }

    #[test]
    fn test_empty_labels_emit_nothing() {
        let mut panel = panel();
        panel.x.label.clear();
        panel.y.label.clear();
        panel.title.clear();
        let guides = TickLabelPlacer::new().place(&panel, &geometry());
        assert!(find(&guides, PlacementRole::XLabel).is_empty());
        assert!(find(&guides, PlacementRole::YLabel).is_empty());
        assert!(find(&guides, PlacementRole::Title).is_empty());
        assert_eq!(guides.texts.len(), 6);
    }
}
