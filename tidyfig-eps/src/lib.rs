//! Rewrites EPS files exported by a chart renderer so design tools resolve their fonts.
//!
//! The rewrite is a single forward pass over the file's lines, driven by a handful of
//! DSC comment markers (see [`markers::MarkerSet`]).

pub mod document;
pub mod error;
pub mod markers;
pub mod rewriter;
