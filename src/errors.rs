//! Error types with diagnostics using miette
//!
//! Geometry never fails: a sun that does not rise or set only produces empty paths.
//! These errors cover the API edges, where callers hand us coordinates and settings.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Coordinate Errors
// ============================================================================

/// Errors raised when building a geographic position
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("invalid latitude {value}° (must be between -90° and +90°)")]
    #[diagnostic(code(sunpath::coord::invalid_latitude))]
    InvalidLatitude { value: f64 },

    #[error("invalid longitude {value}° (must be between -180° and +180°)")]
    #[diagnostic(code(sunpath::coord::invalid_longitude))]
    InvalidLongitude { value: f64 },
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised by [`crate::DiagramConfig::validate`]
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid radius: {value}")]
    #[diagnostic(
        code(sunpath::config::invalid_radius),
        help("the diagram radius must be a positive, finite number of pixels")
    )]
    InvalidRadius { value: f64 },

    #[error("invalid padding: {value}")]
    #[diagnostic(
        code(sunpath::config::invalid_padding),
        help("padding must be zero or a positive, finite number of pixels")
    )]
    InvalidPadding { value: f64 },

    #[error("invalid curve sampling interval: {seconds}s")]
    #[diagnostic(
        code(sunpath::config::invalid_interval),
        help("sun tracks are sampled forward in time, so the interval must be positive")
    )]
    InvalidInterval { seconds: i64 },

    #[error("invalid ray horizon threshold: {value} rad")]
    #[diagnostic(code(sunpath::config::invalid_threshold))]
    InvalidThreshold { value: f64 },

    #[error("invalid opacity {value} for {field}")]
    #[diagnostic(
        code(sunpath::config::invalid_opacity),
        help("opacity is a fraction between 0 and 1")
    )]
    InvalidOpacity { field: &'static str, value: f64 },

    #[error("invalid stroke width {value} for {field}")]
    #[diagnostic(code(sunpath::config::invalid_stroke_width))]
    InvalidStrokeWidth { field: &'static str, value: f64 },

    #[error("invalid color {value:?} for {field}")]
    #[diagnostic(
        code(sunpath::config::invalid_color),
        help("use a hex color such as `#ffa500` or a plain color name")
    )]
    InvalidColor { field: &'static str, value: String },
}

// ============================================================================
// Overlay Errors
// ============================================================================

/// Errors raised by [`crate::SunDiagramOverlay`] lifecycle calls
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum OverlayError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("overlay is not attached to a host")]
    #[diagnostic(
        code(sunpath::overlay::not_attached),
        help("call `attach()` before detaching")
    )]
    NotAttached,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoordinateError::InvalidLatitude { value: 95.0 };
        assert_eq!(
            err.to_string(),
            "invalid latitude 95° (must be between -90° and +90°)"
        );

        let err = ConfigError::InvalidColor {
            field: "sun_ray",
            value: "#12".to_string(),
        };
        assert_eq!(err.to_string(), "invalid color \"#12\" for sun_ray");
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err = OverlayError::from(ConfigError::InvalidRadius { value: -1.0 });
        assert_eq!(err.to_string(), "invalid radius: -1");
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("sunpath::config::invalid_radius".to_string())
        );
    }
}
