//! Default sizes and settings (pixels, minutes and radians)

/// Radius of the horizon circle
pub const RADIUS: f64 = 270.0;
/// Space kept around the circle inside the overlay layer
pub const PADDING: f64 = 10.0;
/// Simulated time between two samples of a sun track
pub const CURVE_INTERVAL_MINUTES: i64 = 20;
/// Rays toward a sun lower than this are not drawn (about -1°, refraction near the horizon)
pub const RAY_HORIZON_THRESHOLD: f64 = -0.018;

pub const HORIZON_COLOR: &str = "#000000";
pub const SUNRISE_COLOR: &str = "#ffd700";
pub const SUNSET_COLOR: &str = "#ff4500";
pub const CURRENT_COLOR: &str = "#ffa500";
