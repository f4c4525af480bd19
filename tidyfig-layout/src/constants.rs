// Shared layout constants, in points

// Margins and offsets snap to this grid
pub const QUARTER_POINT: f32 = 0.25;

pub const DEFAULT_SPACING: f32 = 1.0;
pub const DEFAULT_TICK_LENGTH: [f32; 2] = [3.0, 1.5];
pub const DEFAULT_FONT: &str = "Helvetica";
pub const DEFAULT_FONT_SIZE: f32 = 10.0;
pub const DEFAULT_AXIS_FONT_SIZE: f32 = 8.0;
pub const DEFAULT_AXIS_LINE_WIDTH: f32 = 0.5;

/// Round to the nearest quarter point
pub fn round_quarter(value: f32) -> f32 {
    (value / QUARTER_POINT).round() * QUARTER_POINT
}

/// Round up to the next quarter point
pub fn ceil_quarter(value: f32) -> f32 {
    (value / QUARTER_POINT).ceil() * QUARTER_POINT
}
