//! Diagram configuration: size, sampling and per-primitive styles.
//!
//! Everything here is fixed for the lifetime of an overlay. Styles are plain records
//! keyed by attribute name so that a surface can map them onto its own styling model.

use chrono::TimeDelta;

use crate::errors::ConfigError;
use crate::render::defaults;
use crate::render::geometry::Diagram;
use crate::types::Point;

/// Stroke styling for lines, curves and the horizon circle
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: String,
    pub opacity: f64,
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: impl Into<String>, opacity: f64, width: f64) -> Self {
        Self {
            color: color.into(),
            opacity,
            width,
        }
    }
}

/// Fill styling for filled regions; fills are drawn without a stroke
#[derive(Debug, Clone, PartialEq)]
pub struct FillStyle {
    pub color: String,
    pub opacity: f64,
}

impl FillStyle {
    pub fn new(color: impl Into<String>, opacity: f64) -> Self {
        Self {
            color: color.into(),
            opacity,
        }
    }
}

/// Styles for every primitive of the diagram
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramStyles {
    pub horizon: StrokeStyle,
    pub solstice_curve: StrokeStyle,
    pub sunrise_ray: StrokeStyle,
    pub sunrise_sector: FillStyle,
    pub sunset_ray: StrokeStyle,
    pub sunset_sector: FillStyle,
    pub sunlight_fill: FillStyle,
    pub current_curve: StrokeStyle,
    pub sun_ray: StrokeStyle,
}

impl Default for DiagramStyles {
    fn default() -> Self {
        Self {
            horizon: StrokeStyle::new(defaults::HORIZON_COLOR, 0.5, 1.0),
            solstice_curve: StrokeStyle::new(defaults::HORIZON_COLOR, 0.4, 1.0),
            sunrise_ray: StrokeStyle::new(defaults::SUNRISE_COLOR, 0.9, 6.0),
            sunrise_sector: FillStyle::new(defaults::SUNRISE_COLOR, 0.15),
            sunset_ray: StrokeStyle::new(defaults::SUNSET_COLOR, 0.6, 6.0),
            sunset_sector: FillStyle::new(defaults::SUNSET_COLOR, 0.12),
            sunlight_fill: FillStyle::new(defaults::SUNRISE_COLOR, 0.2),
            current_curve: StrokeStyle::new(defaults::CURRENT_COLOR, 0.7, 4.0),
            sun_ray: StrokeStyle::new(defaults::CURRENT_COLOR, 0.9, 7.0),
        }
    }
}

impl DiagramStyles {
    fn validate(&self) -> Result<(), ConfigError> {
        let strokes = [
            ("horizon", &self.horizon),
            ("solstice_curve", &self.solstice_curve),
            ("sunrise_ray", &self.sunrise_ray),
            ("sunset_ray", &self.sunset_ray),
            ("current_curve", &self.current_curve),
            ("sun_ray", &self.sun_ray),
        ];
        for (field, stroke) in strokes {
            check_color(field, &stroke.color)?;
            check_opacity(field, stroke.opacity)?;
            if !stroke.width.is_finite() || stroke.width < 0.0 {
                return Err(ConfigError::InvalidStrokeWidth {
                    field,
                    value: stroke.width,
                });
            }
        }

        let fills = [
            ("sunrise_sector", &self.sunrise_sector),
            ("sunset_sector", &self.sunset_sector),
            ("sunlight_fill", &self.sunlight_fill),
        ];
        for (field, fill) in fills {
            check_color(field, &fill.color)?;
            check_opacity(field, fill.opacity)?;
        }
        Ok(())
    }
}

fn check_opacity(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidOpacity { field, value });
    }
    Ok(())
}

/// Accepts `#rgb`, `#rrggbb` or an alphabetic color name.
fn check_color(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let valid = match value.strip_prefix('#') {
        Some(hex) => {
            (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic()),
    };
    if !valid {
        return Err(ConfigError::InvalidColor {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Size, sampling and styling of a sun path diagram
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramConfig {
    pub radius: f64,
    pub padding: f64,
    /// Simulated time between consecutive samples of a sun track
    pub curve_interval: TimeDelta,
    /// Altitude (radians) below which a direction ray is suppressed
    pub ray_horizon_threshold: f64,
    pub styles: DiagramStyles,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            radius: defaults::RADIUS,
            padding: defaults::PADDING,
            curve_interval: TimeDelta::minutes(defaults::CURVE_INTERVAL_MINUTES),
            ray_horizon_threshold: defaults::RAY_HORIZON_THRESHOLD,
            styles: DiagramStyles::default(),
        }
    }
}

impl DiagramConfig {
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_curve_interval(mut self, interval: TimeDelta) -> Self {
        self.curve_interval = interval;
        self
    }

    pub fn with_ray_horizon_threshold(mut self, threshold: f64) -> Self {
        self.ray_horizon_threshold = threshold;
        self
    }

    pub fn with_styles(mut self, styles: DiagramStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Check that the configuration describes a drawable diagram.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ConfigError::InvalidRadius { value: self.radius });
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(ConfigError::InvalidPadding {
                value: self.padding,
            });
        }
        if self.curve_interval <= TimeDelta::zero() {
            return Err(ConfigError::InvalidInterval {
                seconds: self.curve_interval.num_seconds(),
            });
        }
        if !self.ray_horizon_threshold.is_finite() {
            return Err(ConfigError::InvalidThreshold {
                value: self.ray_horizon_threshold,
            });
        }
        self.styles.validate()
    }

    /// Center of the circle within the overlay layer
    pub fn center(&self) -> Point {
        Point::splat(self.radius + self.padding)
    }

    /// Width and height of the overlay layer
    pub fn size(&self) -> Point {
        self.center() * 2.0
    }

    /// Projection geometry derived from this configuration
    pub fn diagram(&self) -> Diagram {
        Diagram {
            center: self.center(),
            radius: self.radius,
            curve_interval: self.curve_interval,
            ray_horizon_threshold: self.ray_horizon_threshold,
        }
    }
}
