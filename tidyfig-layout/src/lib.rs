//! Panel layout for publication figures
//!
//! Resolves the subplot grid, then shrinks every panel's plot rectangle to the margins its
//! measured labels actually need.

pub mod constants;
pub mod engine;
pub mod error;
pub mod figure;
pub mod grid;
