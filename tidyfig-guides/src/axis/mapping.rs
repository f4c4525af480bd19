use tidyfig_layout::figure::Axis;

/// Corrective offset the back end needs on the plot extent, cycling through 0, +¼ and -¼
/// point with the spacing expressed in quarter points
pub fn subpixel_correction(spacing: f32) -> f32 {
    match ((spacing * 4.0).round() as i64).rem_euclid(3) {
        0 => 0.0,
        1 => 0.25,
        _ => -0.25,
    }
}

/// Linear map from data values to page offsets along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMapping {
    pub min: f32,
    pub max: f32,
    /// Plot extent along this axis after correction
    pub apparent_extent: f32,
}

impl AxisMapping {
    pub fn new(axis: &Axis, extent: f32, spacing: f32) -> Self {
        Self {
            min: axis.min(),
            max: axis.max(),
            apparent_extent: extent + subpixel_correction(spacing),
        }
    }

    /// Offset of `value` from the start of the plot rectangle
    pub fn page_pos(&self, value: f32) -> f32 {
        self.apparent_extent / (self.max - self.min) * (value - self.min)
    }
}
