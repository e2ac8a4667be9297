use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use super::{assert_close_instant, utc};
use crate::{
    ephemeris::quarter_ephemeris_day,
    geo::{calculate_illuminated_fraction, calculate_phase_angle, MoonPosition, SunPosition},
    math::angular_distance_degrees,
    time::julian_century_from_julian_day,
    CalendarError, Ephemeris, MajorPhase, MeeusEphemeris,
};

/// 1992 April 12, 0h TD
const WORKED_EXAMPLE_JDE: f64 = 2_448_724.5;

#[test]
fn moon_position_matches_worked_example() {
    let moon = MoonPosition::new(julian_century_from_julian_day(WORKED_EXAMPLE_JDE));
    assert!((moon.longitude - 133.162_655).abs() < 1e-5, "λ = {}", moon.longitude);
    assert!((moon.latitude - -3.229_126).abs() < 1e-5, "β = {}", moon.latitude);
    assert!((moon.distance_km - 368_409.7).abs() < 0.1, "Δ = {}", moon.distance_km);
}

#[test]
fn illuminated_fraction_matches_worked_example() {
    let t = julian_century_from_julian_day(WORKED_EXAMPLE_JDE);
    let moon = MoonPosition::new(t);
    let sun = SunPosition::new(t);
    let fraction = calculate_illuminated_fraction(&moon, &sun);
    assert!((fraction - 0.6786).abs() < 1e-3, "k = {fraction}");
    // Waxing gibbous a few days after First Quarter
    let angle = calculate_phase_angle(&moon, &sun);
    assert!((100.0..120.0).contains(&angle), "phase angle = {angle}");
}

#[test]
fn new_moon_series_matches_worked_example() {
    // 1977 February 18, lunation k = -283
    let jde = quarter_ephemeris_day(-283 * 4);
    assert!((jde - 2_443_192.651_18).abs() < 1e-4, "JDE = {jde}");
}

#[test]
fn delta_t_override_is_validated() {
    assert!(MeeusEphemeris::new(Some(69.0)).is_ok());
    assert!(MeeusEphemeris::new(None).is_ok());
    assert_eq!(MeeusEphemeris::new(Some(9000.0)), Err(CalendarError::DeltaTOutOfRange));
    assert_eq!(MeeusEphemeris::new(Some(-8000.5)), Err(CalendarError::DeltaTOutOfRange));
    assert_eq!(MeeusEphemeris::new(Some(f64::NAN)), Err(CalendarError::DeltaTOutOfRange));
}

#[test]
fn delta_t_override_replaces_estimate() {
    let instant = utc(2025, 6, 1, 0, 0);
    let fixed = MeeusEphemeris::new(Some(10.0)).unwrap();
    assert_eq!(fixed.delta_t(&instant), 10.0);
    let estimated = MeeusEphemeris::default().delta_t(&instant);
    assert!((70.0..80.0).contains(&estimated), "ΔT = {estimated}");
}

#[test]
fn instants_outside_validity_are_rejected() {
    let ephemeris = MeeusEphemeris::default();
    let far_future = Utc.with_ymd_and_hms(7000, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(
        ephemeris.phase_angle_degrees(&far_future),
        Err(CalendarError::EphemerisUnavailable(far_future))
    );
    assert_eq!(
        ephemeris.next_quarter_event(&far_future),
        Err(CalendarError::EphemerisUnavailable(far_future))
    );
    let far_past = Utc.with_ymd_and_hms(-2500, 1, 1, 0, 0, 0).unwrap();
    assert!(ephemeris.sample(&far_past).is_err());
}

#[test]
fn first_quarter_event_of_2025() {
    let event = MeeusEphemeris::default()
        .next_quarter_event(&utc(2025, 1, 1, 0, 0))
        .unwrap();
    assert_eq!(event.kind, MajorPhase::FirstQuarter);
    assert_close_instant(event.instant_utc, utc(2025, 1, 6, 23, 56), 60);
}

#[test]
fn quarter_search_is_strictly_after_start() {
    let ephemeris = MeeusEphemeris::default();
    let full_moon = ephemeris.next_quarter_event(&utc(2025, 1, 10, 0, 0)).unwrap();
    assert_eq!(full_moon.kind, MajorPhase::FullMoon);

    let next = ephemeris.next_quarter_event(&full_moon.instant_utc).unwrap();
    assert_eq!(next.kind, MajorPhase::LastQuarter);

    let just_before = full_moon.instant_utc - Duration::milliseconds(1);
    assert_eq!(ephemeris.next_quarter_event(&just_before).unwrap(), full_moon);
}

#[test]
fn sample_agrees_with_individual_queries() {
    let ephemeris = MeeusEphemeris::default();
    let instant = utc(2025, 3, 14, 6, 55);
    let sample = ephemeris.sample(&instant).unwrap();
    assert_eq!(sample.phase_angle, ephemeris.phase_angle_degrees(&instant).unwrap());
    assert_eq!(sample.illuminated_fraction, ephemeris.illuminated_fraction(&instant).unwrap());
    // Full Moon of 14 March 2025 (a total lunar eclipse)
    assert!(angular_distance_degrees(sample.phase_angle, 180.0) < 0.1);
    assert!(sample.illuminated_fraction > 0.999);
}

#[test]
fn new_moon_is_dark() {
    let sample = MeeusEphemeris::default().sample(&utc(2025, 1, 29, 12, 36)).unwrap();
    assert!(angular_distance_degrees(sample.phase_angle, 0.0) < 0.1);
    assert!(sample.illuminated_fraction < 0.01);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn quarter_events_land_on_quarter_angles(timestamp in -2_208_988_800i64..=4_102_444_800i64) {
        let ephemeris = MeeusEphemeris::default();
        let start = Utc.timestamp_opt(timestamp, 0).single().unwrap();
        let event = ephemeris.next_quarter_event(&start).unwrap();

        prop_assert!(event.instant_utc > start);
        prop_assert!(event.instant_utc - start < Duration::hours(8 * 24 + 12));

        let angle = ephemeris.phase_angle_degrees(&event.instant_utc).unwrap();
        prop_assert!(
            angular_distance_degrees(angle, event.kind.phase_angle()) < 0.05,
            "{:?} at {} has angle {}", event.kind, event.instant_utc, angle
        );
    }

    #[test]
    fn samples_stay_in_range(timestamp in -2_208_988_800i64..=4_102_444_800i64) {
        let instant = Utc.timestamp_opt(timestamp, 0).single().unwrap();
        let sample = MeeusEphemeris::default().sample(&instant).unwrap();
        prop_assert!((0.0..360.0).contains(&sample.phase_angle));
        prop_assert!((0.0..=1.0).contains(&sample.illuminated_fraction));
    }
}
