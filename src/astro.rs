//! Sun position and day timing.
//!
//! The overlay only depends on the [`Astronomy`] trait. [`Spa`] adapts the
//! `solar-positioning` crate (NREL's Solar Position Algorithm) to it.
//!
//! ## Conventions
//!
//! - **Azimuth**: radians, 0 = south, positive toward west (north is ±π)
//! - **Altitude**: radians above the horizon, negative below it
//! - Events that do not happen on a given day (polar day or night) are `None`

use std::f64::consts::PI;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use solar_positioning::time::DeltaT;
use solar_positioning::{Horizon, SunriseResult, spa};

use crate::types::LatLng;

/// Apparent sun direction for an observer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Radians from south, positive westward
    pub azimuth: f64,
    /// Radians above the horizon
    pub altitude: f64,
}

/// Start and end of a sunrise or sunset (the sun's disc crossing the horizon)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Twilight {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Solar events of one day at one place.
///
/// `sunrise.start` is the first contact of the sun's upper limb with the horizon and
/// `sunset.end` the last; `dawn` and `dusk` are the civil twilight boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayInfo {
    pub dawn: Option<DateTime<Utc>>,
    pub sunrise: Twilight,
    pub transit: DateTime<Utc>,
    pub sunset: Twilight,
    pub dusk: Option<DateTime<Utc>>,
}

/// Source of sun positions and day timings.
///
/// Implementations must be total: any instant and any valid position yields an
/// answer, with undefined events reported as `None`.
pub trait Astronomy {
    fn sun_position(&self, at: DateTime<Utc>, position: LatLng) -> SunPosition;

    fn day_info(&self, at: DateTime<Utc>, position: LatLng) -> DayInfo;
}

impl<A: Astronomy + ?Sized> Astronomy for &A {
    fn sun_position(&self, at: DateTime<Utc>, position: LatLng) -> SunPosition {
        (**self).sun_position(at, position)
    }

    fn day_info(&self, at: DateTime<Utc>, position: LatLng) -> DayInfo {
        (**self).day_info(at, position)
    }
}

/// Altitude (degrees) at which the sun's disc has fully risen: the sunrise horizon
/// raised by the apparent solar diameter
pub const SUNRISE_END_ALTITUDE: f64 = -0.3;

/// ΔT used if the estimate for a date is unavailable, in seconds
const FALLBACK_DELTA_T: f64 = 69.0;

/// [`Astronomy`] backed by NREL SPA from `solar-positioning`.
///
/// Positions are geometric (no refraction correction); the sunrise horizon already
/// accounts for refraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spa;

impl Spa {
    pub fn new() -> Self {
        Self
    }
}

/// Convert a north-based, clockwise azimuth in degrees to radians from south,
/// positive westward
fn south_based_azimuth(degrees: f64) -> f64 {
    degrees.to_radians().rem_euclid(2.0 * PI) - PI
}

fn delta_t(at: DateTime<Utc>) -> f64 {
    DeltaT::estimate_from_date_like(at).unwrap_or(FALLBACK_DELTA_T)
}

/// `at` in local mean solar time, so the day whose events are computed is the
/// solar day containing `at` rather than its UTC calendar day
fn solar_local(at: DateTime<Utc>, position: LatLng) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt((position.lng() * 240.0).round() as i32)
        .unwrap_or_else(|| Utc.fix());
    at.with_timezone(&offset)
}

/// Rising, transit and setting instants for one horizon
#[derive(Debug, Clone, Copy, Default)]
struct Crossing {
    rise: Option<DateTime<Utc>>,
    transit: Option<DateTime<Utc>>,
    set: Option<DateTime<Utc>>,
}

fn crossing(
    day: DateTime<FixedOffset>,
    position: LatLng,
    delta_t: f64,
    horizon: Horizon,
) -> Crossing {
    let utc = |t: DateTime<FixedOffset>| Some(t.with_timezone(&Utc));
    let (lat, lng) = (position.lat(), position.lng());
    match spa::sunrise_sunset_for_horizon(day, lat, lng, delta_t, horizon) {
        Ok(SunriseResult::RegularDay {
            sunrise,
            transit,
            sunset,
        }) => Crossing {
            rise: utc(sunrise),
            transit: utc(transit),
            set: utc(sunset),
        },
        Ok(SunriseResult::AllDay { transit } | SunriseResult::AllNight { transit }) => Crossing {
            transit: utc(transit),
            ..Crossing::default()
        },
        Err(err) => {
            crate::log::warn!(%position, ?horizon, %err, "sunrise/sunset computation failed");
            Crossing::default()
        }
    }
}

impl Astronomy for Spa {
    fn sun_position(&self, at: DateTime<Utc>, position: LatLng) -> SunPosition {
        let (lat, lng) = (position.lat(), position.lng());
        match spa::solar_position(at, lat, lng, 0.0, delta_t(at), None) {
            Ok(sun) => SunPosition {
                azimuth: south_based_azimuth(sun.azimuth()),
                altitude: sun.elevation_angle().to_radians(),
            },
            Err(err) => {
                crate::log::warn!(%position, %at, %err, "sun position computation failed");
                SunPosition {
                    azimuth: f64::NAN,
                    altitude: f64::NAN,
                }
            }
        }
    }

    fn day_info(&self, at: DateTime<Utc>, position: LatLng) -> DayInfo {
        let day = solar_local(at, position);
        let delta_t = delta_t(at);

        let sun = crossing(day, position, delta_t, Horizon::SunriseSunset);
        let disc = crossing(day, position, delta_t, Horizon::Custom(SUNRISE_END_ALTITUDE));
        let civil = crossing(day, position, delta_t, Horizon::CivilTwilight);

        crate::log::trace!(%position, %day, "computed day info");

        DayInfo {
            dawn: civil.rise,
            sunrise: Twilight {
                start: sun.rise,
                end: disc.rise,
            },
            transit: sun.transit.unwrap_or(at),
            sunset: Twilight {
                start: disc.set,
                end: sun.set,
            },
            dusk: civil.set,
        }
    }
}
