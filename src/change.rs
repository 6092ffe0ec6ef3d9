//! Change classification between two overlay states.
//!
//! The overlay keeps the last position and date it was given. Each update is compared
//! against them to decide how much of the diagram has to be recomputed.

use std::ops::{BitOr, BitOrAssign};

use chrono::{DateTime, Datelike, FixedOffset};

use crate::types::LatLng;

/// Position and date the diagram is (or will be) drawn for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub position: LatLng,
    pub date: DateTime<FixedOffset>,
}

impl Snapshot {
    pub fn new(position: LatLng, date: DateTime<FixedOffset>) -> Self {
        Self { position, date }
    }
}

/// Which inputs changed between two snapshots.
///
/// The three flags are independent; a position change never implies anything about
/// the date and vice versa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub position: bool,
    pub day: bool,
    pub time: bool,
}

impl ChangeSet {
    pub const NONE: Self = Self {
        position: false,
        day: false,
        time: false,
    };

    /// Classify `next` against `previous`.
    ///
    /// With nothing cached yet, position and day both count as changed.
    pub fn classify(previous: Option<&Snapshot>, next: &Snapshot) -> Self {
        let Some(previous) = previous else {
            return Self {
                position: true,
                day: true,
                time: false,
            };
        };

        let position = previous.position != next.position;
        let (day, time) = if previous.date == next.date {
            (false, false)
        } else if same_calendar_day(&previous.date, &next.date) {
            (false, true)
        } else {
            (true, false)
        };

        Self {
            position,
            day,
            time,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.position || self.day || self.time)
    }

    /// The cheapest redraw that covers every flag in this set
    pub fn tier(&self) -> RedrawTier {
        if self.position {
            RedrawTier::Year
        } else if self.day {
            RedrawTier::Day
        } else if self.time {
            RedrawTier::Time
        } else {
            RedrawTier::Anchor
        }
    }
}

impl BitOr for ChangeSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            position: self.position || rhs.position,
            day: self.day || rhs.day,
            time: self.time || rhs.time,
        }
    }
}

impl BitOrAssign for ChangeSet {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// Calendar day comparison in each timestamp's own offset
fn same_calendar_day(a: &DateTime<FixedOffset>, b: &DateTime<FixedOffset>) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// How much of the diagram a draw recomputed, cheapest first.
///
/// Each tier includes everything below it: `Year` also redraws the day and time
/// primitives, `Day` also redraws the time primitive. Every tier re-anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RedrawTier {
    /// Only the layer position was refreshed
    Anchor,
    /// The current sun ray
    Time,
    /// Sunrise/sunset rays and the current day's track
    Day,
    /// Solstice curves, sunlight fill and sunrise/sunset sectors
    Year,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(offset_hours: i32, y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_hours * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
    }

    fn snap(lat: f64, lng: f64, date: DateTime<FixedOffset>) -> Snapshot {
        Snapshot::new(LatLng::new(lat, lng).unwrap(), date)
    }

    #[test]
    fn test_first_snapshot_is_position_and_day() {
        let next = snap(10.0, 20.0, at(0, 2024, 3, 20, 12, 0));
        let change = ChangeSet::classify(None, &next);
        assert_eq!(
            change,
            ChangeSet {
                position: true,
                day: true,
                time: false
            }
        );
        assert_eq!(change.tier(), RedrawTier::Year);
    }

    #[test]
    fn test_identical_is_empty() {
        let a = snap(10.0, 20.0, at(0, 2024, 3, 20, 12, 0));
        let change = ChangeSet::classify(Some(&a), &a);
        assert!(change.is_empty());
        assert_eq!(change.tier(), RedrawTier::Anchor);
    }

    #[test]
    fn test_same_day_is_time_only() {
        let a = snap(10.0, 20.0, at(0, 2024, 3, 20, 0, 0));
        let b = snap(10.0, 20.0, at(0, 2024, 3, 20, 23, 59));
        assert_eq!(
            ChangeSet::classify(Some(&a), &b),
            ChangeSet {
                time: true,
                ..ChangeSet::NONE
            }
        );
    }

    #[test]
    fn test_crossing_midnight_is_day_only() {
        let a = snap(10.0, 20.0, at(0, 2024, 3, 20, 23, 59));
        let b = snap(10.0, 20.0, at(0, 2024, 3, 21, 0, 1));
        assert_eq!(
            ChangeSet::classify(Some(&a), &b),
            ChangeSet {
                day: true,
                ..ChangeSet::NONE
            }
        );
    }

    #[test]
    fn test_same_month_day_different_year_is_day() {
        let a = snap(10.0, 20.0, at(0, 2023, 3, 20, 12, 0));
        let b = snap(10.0, 20.0, at(0, 2024, 3, 20, 12, 0));
        assert!(ChangeSet::classify(Some(&a), &b).day);
    }

    #[test]
    fn test_calendar_day_uses_local_offset() {
        // 23:30 at +02:00 and 00:30 the next day at +02:00 are both on 2024-03-20 in UTC
        let a = snap(10.0, 20.0, at(2, 2024, 3, 20, 23, 30));
        let b = snap(10.0, 20.0, at(2, 2024, 3, 21, 0, 30));
        assert_eq!(ChangeSet::classify(Some(&a), &b).tier(), RedrawTier::Day);
    }

    #[test]
    fn test_position_change_regardless_of_date() {
        let a = snap(10.0, 20.0, at(0, 2024, 3, 20, 12, 0));
        let b = snap(10.5, 20.0, at(0, 2024, 3, 20, 12, 0));
        let c = snap(10.5, 20.0, at(0, 2024, 7, 1, 8, 0));
        assert_eq!(
            ChangeSet::classify(Some(&a), &b),
            ChangeSet {
                position: true,
                ..ChangeSet::NONE
            }
        );
        let change = ChangeSet::classify(Some(&a), &c);
        assert!(change.position && change.day && !change.time);
    }

    #[test]
    fn test_accumulate() {
        let mut pending = ChangeSet::NONE;
        pending |= ChangeSet {
            time: true,
            ..ChangeSet::NONE
        };
        pending |= ChangeSet {
            day: true,
            ..ChangeSet::NONE
        };
        assert_eq!(pending.tier(), RedrawTier::Day);
        assert!(pending.time);
    }
}
