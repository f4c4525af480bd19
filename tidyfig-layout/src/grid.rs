//! Subplot grid resolution

use serde::{Deserialize, Serialize};

use crate::error::TidyfigLayoutError;
use crate::figure::Rect;

/// Rows × cols arrangement of panels, filled row-major from the top of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
}

impl GridSpec {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Infer the most square grid holding exactly `panel_count` panels.
    ///
    /// Divisor pairs `(r, c)` are scored by `|r - c|`. Ties go to the pair whose `r` is
    /// larger, and the winner is emitted as `rows = c, cols = r`. The swap is a fixed
    /// convention: ambiguous layouts always come out wider than tall, so 6 panels give
    /// 2×3 and a prime count gives a single row.
    pub fn resolve(panel_count: usize) -> Result<Self, TidyfigLayoutError> {
        if panel_count == 0 {
            return Err(TidyfigLayoutError::NoPanels);
        }

        let mut best: Option<(usize, usize)> = None;
        for r in 1..=panel_count {
            if panel_count % r != 0 {
                continue;
            }
            let c = panel_count / r;
            let score = r.abs_diff(c);
            best = match best {
                Some((best_r, best_c)) => {
                    let best_score = best_r.abs_diff(best_c);
                    if score < best_score || (score == best_score && r > best_r) {
                        Some((r, c))
                    } else {
                        Some((best_r, best_c))
                    }
                }
                None => Some((r, c)),
            };
        }

        // r = panel_count always divides, so a pair was found
        let (r, c) = best.unwrap_or((panel_count, 1));
        Ok(Self { rows: c, cols: r })
    }

    /// Validate a caller-supplied `[rows, cols]` pair
    pub fn explicit(dims: &[i64], panel_count: usize) -> Result<Self, TidyfigLayoutError> {
        let [rows, cols] = dims else {
            return Err(TidyfigLayoutError::InvalidGrid(format!(
                "expected [rows, cols], got {} values",
                dims.len()
            )));
        };
        if *rows < 1 || *cols < 1 {
            return Err(TidyfigLayoutError::InvalidGrid(format!(
                "rows and cols must be positive, got [{rows}, {cols}]"
            )));
        }
        let too_large =
            || TidyfigLayoutError::InvalidGrid(format!("{rows}x{cols} grid is too large"));
        let grid = Self::new(
            usize::try_from(*rows).map_err(|_| too_large())?,
            usize::try_from(*cols).map_err(|_| too_large())?,
        );
        let capacity = grid.rows.checked_mul(grid.cols).ok_or_else(too_large)?;
        if capacity < panel_count {
            return Err(TidyfigLayoutError::InvalidGrid(format!(
                "{rows}x{cols} grid cannot hold {panel_count} panels"
            )));
        }
        Ok(grid)
    }

    /// Explicit grid when given, otherwise the resolved one
    pub fn for_panels(
        explicit: Option<&[i64]>,
        panel_count: usize,
    ) -> Result<Self, TidyfigLayoutError> {
        match explicit {
            Some(dims) => Self::explicit(dims, panel_count),
            None => Self::resolve(panel_count),
        }
    }

    /// Number of cells, saturating at `usize::MAX`
    pub fn capacity(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// `(row, col)` of the panel at `index`
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Cell allotted to the panel at `index` on a `[width, height]` canvas
    pub fn cell(&self, index: usize, canvas: [f32; 2]) -> Rect {
        let (row, col) = self.position(index);
        let cell_width = canvas[0] / self.cols as f32;
        let cell_height = canvas[1] / self.rows as f32;
        Rect::new(
            col as f32 * cell_width,
            canvas[1] - (row + 1) as f32 * cell_height,
            cell_width,
            cell_height,
        )
    }
}
