use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tidyfig_guides::axis::numeric::{PanelGuides, TickLabelPlacer};
use tidyfig_layout::engine::{LayoutEngine, PanelGeometry};
use tidyfig_layout::figure::Figure;
use tidyfig_layout::grid::GridSpec;
use tidyfig_text::measurement::TextMeasurer;

use crate::error::TidyfigError;
use crate::options::{choice, ExportOptions, Interpreter, ToolBar};

/// Figure-wide styling the host applies along with the geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDirectives {
    pub line_width: f32,
    pub marker_size: f32,
    pub axis_line_width: f32,
    pub font_color: [f32; 3],
    pub axis_color: [f32; 3],
    pub box_color: [f32; 3],
    pub grid: bool,
    pub grid_line_width: f32,
    pub grid_color: [f32; 3],
    #[serde(with = "choice")]
    pub interpreter: Interpreter,
    #[serde(with = "choice")]
    pub tool_bar: ToolBar,
    /// The host's own tick labels are replaced by the placed texts
    pub hide_host_tick_labels: bool,
}

impl From<&ExportOptions> for StyleDirectives {
    fn from(options: &ExportOptions) -> Self {
        Self {
            line_width: options.line_width,
            marker_size: options.marker_size,
            axis_line_width: options.axis_line_width,
            font_color: options.font_color,
            axis_color: options.axis_color,
            box_color: options.box_color,
            grid: options.grid.is_on(),
            grid_line_width: options.grid_line_width,
            grid_color: options.grid_color,
            interpreter: options.interpreter,
            tool_bar: options.tool_bar,
            hide_host_tick_labels: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    #[serde(flatten)]
    pub geometry: PanelGeometry,
    pub guides: PanelGuides,
}

/// Everything the host needs to restyle a figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureLayout {
    pub canvas: [f32; 2],
    pub grid: GridSpec,
    pub panels: Vec<PanelLayout>,
    pub style: StyleDirectives,
}

/// Slack in points before placed text counts as spilling out of its cell
pub const TEXT_OVERFLOW_TOLERANCE: f32 = 0.5;

/// Read a figure description from a JSON file
pub fn read_figure(path: &Path) -> Result<Figure, TidyfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| TidyfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| TidyfigError::Format {
        path: path.to_path_buf(),
        source,
    })
}

/// Copy of `figure` sized to the options' canvas, with their text and tick style on every panel
pub fn apply_options(figure: &Figure, options: &ExportOptions) -> Figure {
    let [width, height] = options.canvas();
    let style = options.panel_style();
    Figure {
        width,
        height,
        panels: figure
            .panels
            .iter()
            .map(|panel| panel.clone().with_style(style.clone()))
            .collect(),
    }
}

/// Lay out `figure` under `options`.
///
/// Options, figure and grid are all validated before any text is measured. Nothing about
/// the input is modified.
pub fn layout_figure<M: TextMeasurer>(
    figure: &Figure,
    options: &ExportOptions,
    measurer: M,
) -> Result<FigureLayout, TidyfigError> {
    options.validate()?;
    let figure = apply_options(figure, options);
    figure.validate()?;
    let grid = GridSpec::for_panels(options.tiled_layout.as_deref(), figure.panels.len())?;
    debug!(
        "{} panels on a {}x{} grid, canvas {}x{}",
        figure.panels.len(),
        grid.rows,
        grid.cols,
        figure.width,
        figure.height
    );

    let engine = LayoutEngine::new(measurer);
    let geometries = engine.layout(&figure, &grid)?;

    let placer = TickLabelPlacer::new();
    let panels = figure
        .panels
        .iter()
        .zip(geometries)
        .enumerate()
        .map(|(index, (panel, geometry))| {
            let guides = placer.place(panel, &geometry);
            for text in &guides.texts {
                let extent = text.extent(engine.measurer());
                if !geometry.cell.contains_rect(&extent, TEXT_OVERFLOW_TOLERANCE) {
                    warn!(
                        "panel {index}: {:?} `{}` extends outside its cell",
                        text.role, text.text
                    );
                }
            }
            PanelLayout { geometry, guides }
        })
        .collect();

    info!(
        "laid out {} panels for {} {} column",
        figure.panels.len(),
        options.journal,
        options.width
    );

    Ok(FigureLayout {
        canvas: figure.canvas(),
        grid,
        panels,
        style: StyleDirectives::from(options),
    })
}
