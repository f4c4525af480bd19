use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TidyfigLayoutError {
    #[error("Figure has no plot panels")]
    NoPanels,

    #[error("Panel {panel} has a third axis; only 2D Cartesian panels are supported")]
    UnsupportedDimension { panel: usize },

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid panel {panel}: {reason}")]
    InvalidPanel { panel: usize, reason: String },

    #[error(
        "Panel {panel} has a negative plot extent ({width} x {height}); labels are too large for the {cell_width} x {cell_height} cell"
    )]
    NegativeExtent {
        panel: usize,
        width: f32,
        height: f32,
        cell_width: f32,
        cell_height: f32,
    },
}
