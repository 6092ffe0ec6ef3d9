//! Core value types shared by the overlay, its geometry and its collaborators.

use std::fmt;

use crate::errors::CoordinateError;

/// A point in diagram or viewport pixel space (y grows downward)
pub type Point = glam::DVec2;

/// Geographic position in degrees.
///
/// Construction validates the ranges, so every `LatLng` held by the overlay is a
/// position the astronomy model can evaluate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    /// Create a position, rejecting out-of-range or non-finite coordinates.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::InvalidLatitude { value: lat });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::InvalidLongitude { value: lng });
        }
        Ok(Self { lat, lng })
    }

    /// Latitude in degrees, north positive
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees, east positive
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lng)
    }
}
