//! Publication figure post-processing
//!
//! [`pipeline::layout_figure`] turns an already rendered [`Figure`] into a whitespace
//! minimized [`pipeline::FigureLayout`]; [`export::export_vector_file`] then fixes the
//! fonts and bounding box of the EPS file the host exported from it.

pub mod error;
pub mod export;
pub mod options;
pub mod pipeline;

pub use tidyfig_layout::figure::{Axis, Figure, Panel, PanelStyle, Rect};
pub use tidyfig_layout::grid::GridSpec;
