use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use sunpath::render::SunProjector;
use sunpath::{Astronomy, DiagramConfig, LatLng, Spa};

fn utc(m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, m, d, h, min, 0).unwrap()
}

fn assert_near(actual: Option<DateTime<Utc>>, expected: DateTime<Utc>, tolerance: TimeDelta) {
    let actual = actual.unwrap_or_else(|| panic!("expected an instant near {expected}"));
    assert!(
        (actual - expected).abs() <= tolerance,
        "{actual} is not within {tolerance} of {expected}"
    );
}

#[test]
fn london_midsummer_sunrise_and_sunset() {
    let london = LatLng::new(51.5074, -0.1278).unwrap();
    let info = Spa.day_info(utc(6, 21, 12, 0), london);
    assert_near(info.sunrise.start, utc(6, 21, 3, 43), TimeDelta::minutes(10));
    assert_near(info.sunset.end, utc(6, 21, 20, 21), TimeDelta::minutes(10));
}

#[test]
fn equator_equinox_sunrise() {
    let origin = LatLng::new(0.0, 0.0).unwrap();
    let info = Spa.day_info(utc(3, 20, 12, 0), origin);
    assert_near(info.sunrise.start, utc(3, 20, 6, 0), TimeDelta::minutes(20));
    assert_near(info.sunset.end, utc(3, 20, 18, 0), TimeDelta::minutes(20));
}

#[test]
fn equator_equinox_track_peaks_at_transit() {
    let origin = LatLng::new(0.0, 0.0).unwrap();
    let config = DiagramConfig::default();
    let projector = SunProjector::new(&Spa, origin, config.diagram());
    let reference = utc(3, 20, 12, 0);
    let info = projector.day_info(reference);

    let track = projector.sun_track(&info, reference);
    let times = projector.sample_times(&info, reference);
    assert_eq!(track.len(), times.len());
    assert_eq!(track.letters().chars().next(), Some('M'));
    assert!(track.letters()[1..].chars().all(|c| c == 'L'));

    // The sample closest to transit is as high as any, and passes near the zenith
    let nearest = times
        .iter()
        .min_by_key(|t| (**t - info.transit).abs())
        .copied()
        .unwrap();
    let highest = times
        .iter()
        .map(|t| projector.point(*t).altitude)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(highest - projector.point(nearest).altitude < 1f64.to_radians());
    assert!(projector.point(nearest).altitude > 80f64.to_radians());
    let offset = projector.point(nearest).point - config.center();
    assert!(offset.length() < config.radius * 0.2);
}

#[test]
fn samples_cover_daylight_every_interval() {
    let london = LatLng::new(51.5074, -0.1278).unwrap();
    let projector = SunProjector::new(&Spa, london, DiagramConfig::default().diagram());
    let reference = utc(6, 21, 12, 0);
    let info = projector.day_info(reference);
    let times = projector.sample_times(&info, reference);

    assert_eq!(times.first().copied(), info.sunrise.start);
    assert_eq!(times.last().copied(), info.sunset.end);
    for pair in times.windows(2) {
        assert!(pair[1] - pair[0] <= TimeDelta::minutes(20));
        assert!(pair[1] > pair[0]);
    }
}

#[test]
fn polar_day_and_night_tracks() {
    let tromso = LatLng::new(69.6496, 18.956).unwrap();
    let projector = SunProjector::new(&Spa, tromso, DiagramConfig::default().diagram());

    let june = utc(6, 21, 12, 0);
    let info = projector.day_info(june);
    assert!(info.sunrise.start.is_none());
    // Without a sunrise the track covers a full day from the reference
    let times = projector.sample_times(&info, june);
    assert_eq!(times.first().copied(), Some(june));
    assert_eq!(times.last().copied(), Some(june + TimeDelta::days(1)));
    assert!(!projector.sun_track(&info, june).is_empty());

    let december = utc(12, 21, 12, 0);
    let info = projector.day_info(december);
    assert!(projector.sun_track(&info, december).is_empty());
    assert!(projector.ray(info.sunrise.start).is_empty());
    assert!(projector.sector(info.sunrise.start, info.sunset.end).is_empty());
}

#[test]
fn coarser_interval_samples_less() {
    let london = LatLng::new(51.5074, -0.1278).unwrap();
    let reference = utc(6, 21, 12, 0);
    let fine = DiagramConfig::default();
    let coarse = DiagramConfig::default().with_curve_interval(TimeDelta::hours(1));

    let fine = SunProjector::new(&Spa, london, fine.diagram());
    let coarse = SunProjector::new(&Spa, london, coarse.diagram());
    let info = fine.day_info(reference);

    let fine = fine.sun_track(&info, reference);
    let coarse = coarse.sun_track(&info, reference);
    assert!(coarse.len() < fine.len());
    assert_eq!(coarse.points().first(), fine.points().first());
    assert_eq!(coarse.points().last(), fine.points().last());
}
