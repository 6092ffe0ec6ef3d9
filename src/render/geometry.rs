//! Diagram geometry: projecting sun positions onto the circle and building paths.
//!
//! The projection is orthographic. Azimuth sets the rotation around the center and
//! altitude flattens the distance from it, so the horizon lies on the circle and the
//! zenith at the center.

use std::f64::consts::FRAC_PI_2;

use chrono::{DateTime, TimeDelta, Utc};

use crate::astro::{Astronomy, DayInfo, SunPosition};
use crate::types::{LatLng, Point};

use super::path::{PathCommand, PathData};

/// Fixed geometry of a diagram, in layer pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagram {
    pub center: Point,
    pub radius: f64,
    pub curve_interval: TimeDelta,
    pub ray_horizon_threshold: f64,
}

/// A sun position projected into the diagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub point: Point,
    /// Altitude the point was projected from, in radians
    pub altitude: f64,
}

impl ProjectedPoint {
    pub fn is_finite(&self) -> bool {
        self.point.is_finite()
    }
}

impl Diagram {
    /// Project an azimuth/altitude pair onto the diagram.
    ///
    /// `angle = π/2 + azimuth` turns the south-based azimuth into a screen rotation:
    /// south lands at the bottom of the circle and north at the top.
    pub fn project(&self, sun: SunPosition) -> ProjectedPoint {
        let angle = FRAC_PI_2 + sun.azimuth;
        let flatten = self.radius * sun.altitude.cos();
        ProjectedPoint {
            point: self.center + Point::new(angle.cos(), angle.sin()) * flatten,
            altitude: sun.altitude,
        }
    }

    /// Wedge from the center to `from`, clockwise along the circle to `to`, and back.
    ///
    /// Empty if either end is not a finite point.
    pub fn sector(&self, from: Option<Point>, to: Option<Point>) -> PathData {
        let (Some(from), Some(to)) = (from, to) else {
            return PathData::new();
        };
        if !from.is_finite() || !to.is_finite() {
            return PathData::new();
        }
        let r = self.radius;
        PathData::new()
            .m(self.center.x, self.center.y)
            .l(from.x, from.y)
            .a(r, r, 0.0, false, true, to.x, to.y)
            .z()
    }

    /// Segment from the center to a projected point, suppressed below the threshold
    pub fn ray(&self, target: Option<ProjectedPoint>) -> PathData {
        let Some(target) = target else {
            return PathData::new();
        };
        // NaN altitude never compares below the threshold, so check finiteness too
        if target.altitude < self.ray_horizon_threshold || !target.is_finite() {
            return PathData::new();
        }
        PathData::new()
            .m(self.center.x, self.center.y)
            .l(target.point.x, target.point.y)
    }

    /// Area between the two solstice curves.
    ///
    /// Follows the winter curve, arcs along the horizon to the end of the summer
    /// curve, walks the summer curve backwards, then arcs back to the start. Empty if
    /// either curve is empty.
    pub fn sunlight_fill(&self, summer: &PathData, winter: &PathData) -> PathData {
        let Some(start) = winter.points().first().copied() else {
            return PathData::new();
        };
        let summer_points = summer.points();
        if summer_points.is_empty() {
            return PathData::new();
        }

        let r = self.radius;
        let mut commands = winter.commands().to_vec();
        for (i, p) in summer_points.iter().rev().enumerate() {
            commands.push(if i == 0 {
                PathCommand::ArcTo {
                    rx: r,
                    ry: r,
                    rotation: 0.0,
                    large_arc: false,
                    sweep: true,
                    to: *p,
                }
            } else {
                PathCommand::LineTo(*p)
            });
        }

        commands
            .into_iter()
            .fold(PathData::new(), append)
            .a(r, r, 0.0, false, true, start.x, start.y)
    }
}

fn append(path: PathData, command: PathCommand) -> PathData {
    match command {
        PathCommand::MoveTo(p) => path.m(p.x, p.y),
        PathCommand::LineTo(p) => path.l(p.x, p.y),
        PathCommand::ArcTo {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            to,
        } => path.a(rx, ry, rotation, large_arc, sweep, to.x, to.y),
        PathCommand::Close => path.z(),
    }
}

/// Projects the sun for one position through an [`Astronomy`] model.
pub struct SunProjector<'a, A: Astronomy + ?Sized> {
    astronomy: &'a A,
    position: LatLng,
    diagram: Diagram,
}

impl<'a, A: Astronomy + ?Sized> SunProjector<'a, A> {
    pub fn new(astronomy: &'a A, position: LatLng, diagram: Diagram) -> Self {
        Self {
            astronomy,
            position,
            diagram,
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn day_info(&self, at: DateTime<Utc>) -> DayInfo {
        self.astronomy.day_info(at, self.position)
    }

    /// Where the sun sits on the diagram at `at`
    pub fn point(&self, at: DateTime<Utc>) -> ProjectedPoint {
        self.diagram
            .project(self.astronomy.sun_position(at, self.position))
    }

    /// Direction ray toward the sun at `at`; empty when `at` is undefined or the sun
    /// is clearly below the horizon
    pub fn ray(&self, at: Option<DateTime<Utc>>) -> PathData {
        self.diagram.ray(at.map(|at| self.point(at)))
    }

    /// Wedge between the sun directions at two instants
    pub fn sector(&self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> PathData {
        let from = from.map(|at| self.point(at).point);
        let to = to.map(|at| self.point(at).point);
        self.diagram.sector(from, to)
    }

    /// Instants at which the sun track of a day is sampled.
    ///
    /// From sunrise (or `reference` when the sun never rises) to sunset (or one day
    /// after `reference` when it never sets), every `curve_interval`, always ending
    /// on the exact end instant.
    pub fn sample_times(&self, info: &DayInfo, reference: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let start = info.sunrise.start.unwrap_or(reference);
        let end = info
            .sunset
            .end
            .unwrap_or_else(|| reference + TimeDelta::days(1));

        let mut times = Vec::new();
        let mut t = start;
        while t < end {
            times.push(t);
            t += self.diagram.curve_interval;
        }
        times.push(end);
        times
    }

    /// Track of the sun across the sky for one day.
    ///
    /// Empty when every sample is below the horizon, as in polar night.
    pub fn sun_track(&self, info: &DayInfo, reference: DateTime<Utc>) -> PathData {
        let samples: Vec<ProjectedPoint> = self
            .sample_times(info, reference)
            .into_iter()
            .map(|at| self.point(at))
            .collect();

        // An unknown altitude counts as below the horizon
        if samples.iter().all(|s| s.altitude < 0.0 || s.altitude.is_nan()) {
            crate::log::debug!(position = %self.position, %reference, "sun track below horizon");
            return PathData::new();
        }

        let points: Vec<Point> = samples.iter().map(|s| s.point).collect();
        PathData::polyline(&points)
    }
}
