use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
#[allow(unused_imports)]
use core_maths::CoreFloat;
use julian_day_converter::{julian_day_to_unix_millis, unix_millis_to_julian_day};

use crate::math::polynomial;
use crate::CalendarError;

/// Reference Julian Day for the J2000.0 epoch
pub(crate) const J2000_EPOCH_JD: f64 = 2_451_545.0;

/// Days in a Julian century
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Seconds in a day
pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Day (UT) of a UTC instant, including fractional days.
pub(crate) fn julian_day(instant: &DateTime<Utc>) -> f64 {
    unix_millis_to_julian_day(instant.timestamp_millis())
}

/// Converts a Julian Day (UT) back into a UTC instant, to millisecond precision.
pub(crate) fn instant_from_julian_day(julian_day: f64) -> Result<DateTime<Utc>, CalendarError> {
    if !julian_day.is_finite() {
        return Err(CalendarError::TimeConversionError);
    }
    Utc.timestamp_millis_opt(julian_day_to_unix_millis(julian_day))
        .single()
        .ok_or(CalendarError::TimeConversionError)
}

/// Julian century (T) from the given Julian Day (JD),
/// measured in Julian centuries since the J2000.0 epoch.
pub(crate) fn julian_century_from_julian_day(julian_day: f64) -> f64 {
    (julian_day - J2000_EPOCH_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Julian Ephemeris Day (JDE) from Julian Day (JD) and ΔT `delta_t`.
///
/// - `julian_day`: Julian Day in UT.
/// - `delta_t`: Difference TT − UT in **seconds** (ΔT).
pub(crate) fn julian_ephemeris_day_from_julian_day(julian_day: f64, delta_t: f64) -> f64 {
    julian_day + delta_t / SECONDS_PER_DAY
}

/// Julian Day (UT) from a Julian Ephemeris Day and ΔT in seconds.
pub(crate) fn julian_day_from_julian_ephemeris_day(ephemeris_day: f64, delta_t: f64) -> f64 {
    ephemeris_day - delta_t / SECONDS_PER_DAY
}

/// Decimal year of an instant, taken at the middle of its month.
pub(crate) fn decimal_year(instant: &DateTime<Utc>) -> f64 {
    f64::from(instant.year()) + (f64::from(instant.month()) - 0.5) / 12.0
}

/// Estimate ΔT (TT − UT) in seconds for a decimal year.
///
/// Uses the piecewise polynomial fit by Espenak and Meeus. Outside the fitted
/// interval (-500 to 2150) the long-term parabola `-20 + 32u²` is used, with
/// `u` in centuries from 1820.
pub(crate) fn delta_t_seconds(year: f64) -> f64 {
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };
    match year {
        y if y < -500.0 => long_term(y),
        y if y < 500.0 => polynomial(
            &[
                10583.6,
                -1014.41,
                33.78311,
                -5.952053,
                -0.1798452,
                0.022174192,
                0.0090316521,
            ],
            y / 100.0,
        ),
        y if y < 1600.0 => polynomial(
            &[
                1574.2,
                -556.01,
                71.23472,
                0.319781,
                -0.8503463,
                -0.005050998,
                0.0083572073,
            ],
            (y - 1000.0) / 100.0,
        ),
        y if y < 1700.0 => polynomial(&[120.0, -0.9808, -0.01532, 1.0 / 7129.0], y - 1600.0),
        y if y < 1800.0 => polynomial(
            &[8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1_174_000.0],
            y - 1700.0,
        ),
        y if y < 1860.0 => polynomial(
            &[
                13.72,
                -0.332447,
                0.0068612,
                0.0041116,
                -0.00037436,
                0.0000121272,
                -0.0000001699,
                0.000000000875,
            ],
            y - 1800.0,
        ),
        y if y < 1900.0 => polynomial(
            &[7.62, 0.5737, -0.251754, 0.01680668, -0.0004473624, 1.0 / 233_174.0],
            y - 1860.0,
        ),
        y if y < 1920.0 => polynomial(&[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197], y - 1900.0),
        y if y < 1941.0 => polynomial(&[21.20, 0.84493, -0.076100, 0.0020936], y - 1920.0),
        y if y < 1961.0 => polynomial(&[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0], y - 1950.0),
        y if y < 1986.0 => polynomial(&[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0], y - 1975.0),
        y if y < 2005.0 => polynomial(
            &[63.86, 0.3345, -0.060374, 0.0017275, 0.000651814, 0.00002373599],
            y - 2000.0,
        ),
        y if y < 2050.0 => polynomial(&[62.92, 0.32217, 0.005589], y - 2000.0),
        y if y < 2150.0 => long_term(y) - 0.5628 * (2150.0 - y),
        y => long_term(y),
    }
}

/// Parses a compact `YYYYMMDD` calendar date.
///
/// Exactly eight ASCII digits are accepted; anything else, or a date that
/// does not exist in the proleptic Gregorian calendar, is an
/// [`CalendarError::InvalidRange`].
pub(crate) fn parse_compact_date(text: &str) -> Result<NaiveDate, CalendarError> {
    let malformed = || CalendarError::InvalidRange(alloc::format!("malformed date {text:?}, expected YYYYMMDD"));
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    NaiveDate::parse_from_str(text, "%Y%m%d").map_err(|_| malformed())
}

/// `instant` moved by `days` whole days, or `None` outside chrono's range.
pub(crate) fn shift_days(instant: &DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    instant.checked_add_signed(TimeDelta::try_days(days)?)
}

/// The instant at which a UTC calendar day starts (00:00:00 UTC).
pub(crate) fn day_start_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Calendar date of a UTC instant as observed in `timezone`.
pub(crate) fn local_date(instant: &DateTime<Utc>, timezone: Tz) -> NaiveDate {
    instant.with_timezone(&timezone).date_naive()
}
