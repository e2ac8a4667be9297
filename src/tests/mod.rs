#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

use chrono::{DateTime, TimeZone, Utc};

use crate::{CalendarError, Ephemeris, MajorPhase, MeeusEphemeris, QuarterEvent};

mod ephemeris_tests;
mod registry_tests;
mod series_tests;

pub(crate) fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

/// Asserts two instants are within `seconds` of each other.
pub(crate) fn assert_close_instant(actual: DateTime<Utc>, expected: DateTime<Utc>, seconds: i64) {
    let diff = (actual - expected).num_seconds().abs();
    assert!(
        diff <= seconds,
        "expected {expected}, got {actual} ({diff}s apart, tolerance {seconds}s)"
    );
}

/// Reports NaN phase angles but valid quarter events.
pub(crate) struct NanPhaseEphemeris;

impl Ephemeris for NanPhaseEphemeris {
    fn phase_angle_degrees(&self, _instant: &DateTime<Utc>) -> Result<f64, CalendarError> {
        Ok(f64::NAN)
    }

    fn illuminated_fraction(&self, _instant: &DateTime<Utc>) -> Result<f64, CalendarError> {
        Ok(0.5)
    }

    fn next_quarter_event(&self, after: &DateTime<Utc>) -> Result<QuarterEvent, CalendarError> {
        MeeusEphemeris::default().next_quarter_event(after)
    }
}

/// Always answers with the same quarter event, no matter the start.
pub(crate) struct StuckEphemeris;

impl Ephemeris for StuckEphemeris {
    fn phase_angle_degrees(&self, _instant: &DateTime<Utc>) -> Result<f64, CalendarError> {
        Ok(45.0)
    }

    fn illuminated_fraction(&self, _instant: &DateTime<Utc>) -> Result<f64, CalendarError> {
        Ok(0.25)
    }

    fn next_quarter_event(&self, _after: &DateTime<Utc>) -> Result<QuarterEvent, CalendarError> {
        Ok(QuarterEvent {
            kind: MajorPhase::NewMoon,
            instant_utc: utc(2025, 1, 10, 0, 0),
        })
    }
}

/// Delegates to [`MeeusEphemeris`] and counts quarter searches.
#[derive(Default)]
pub(crate) struct CountingEphemeris {
    pub(crate) searches: core::cell::Cell<usize>,
}

impl Ephemeris for CountingEphemeris {
    fn phase_angle_degrees(&self, instant: &DateTime<Utc>) -> Result<f64, CalendarError> {
        MeeusEphemeris::default().phase_angle_degrees(instant)
    }

    fn illuminated_fraction(&self, instant: &DateTime<Utc>) -> Result<f64, CalendarError> {
        MeeusEphemeris::default().illuminated_fraction(instant)
    }

    fn next_quarter_event(&self, after: &DateTime<Utc>) -> Result<QuarterEvent, CalendarError> {
        self.searches.set(self.searches.get() + 1);
        MeeusEphemeris::default().next_quarter_event(after)
    }
}
