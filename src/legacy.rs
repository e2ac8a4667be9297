//! Low-precision, observer-relative phase naming.
//!
//! A simplified approximation kept for compatibility with older clients. It
//! uses two-term mean lunar elements and local sidereal time, and is not
//! authoritative: use [`crate::MoonCalendar`] for calendar data.

use alloc::vec::Vec;
use core::fmt;

use chrono::{DateTime, NaiveDate, Utc};
#[allow(unused_imports)]
use core_maths::CoreFloat;
use serde::{Deserialize, Serialize};

use crate::{
    math::{angular_distance_degrees, cos_deg, normalize_degrees_360, sin_deg},
    phases::MajorPhase,
    time::day_start_utc,
    CalendarError,
};

/// Legacy day count origin: 2000-01-01 00:00:00 UTC, in Unix milliseconds.
const LEGACY_EPOCH_MILLIS: i64 = 946_684_800_000;

/// Milliseconds in a day
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// A day counts as a major phase when within this many degrees of it.
const MAJOR_PHASE_THRESHOLD: f64 = 7.0;

/// Repeats of the same phase closer than this many days are dropped.
const MIN_DAYS_BETWEEN_SAME_PHASE: i64 = 10;

/// Eight-way phase naming, each bucket 45° wide and centered on its phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseName {
    #[serde(rename = "New Moon")]
    NewMoon,
    #[serde(rename = "Waxing Crescent")]
    WaxingCrescent,
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    #[serde(rename = "Waxing Gibbous")]
    WaxingGibbous,
    #[serde(rename = "Full Moon")]
    FullMoon,
    #[serde(rename = "Waning Gibbous")]
    WaningGibbous,
    #[serde(rename = "Last Quarter")]
    LastQuarter,
    #[serde(rename = "Waning Crescent")]
    WaningCrescent,
}

impl PhaseName {
    /// Buckets an angle: boundaries at 22.5°, 67.5°, …, 337.5°.
    pub fn from_angle(degrees: f64) -> Self {
        let angle = normalize_degrees_360(degrees);
        match angle {
            a if !(22.5..337.5).contains(&a) => PhaseName::NewMoon,
            a if a < 67.5 => PhaseName::WaxingCrescent,
            a if a < 112.5 => PhaseName::FirstQuarter,
            a if a < 157.5 => PhaseName::WaxingGibbous,
            a if a < 202.5 => PhaseName::FullMoon,
            a if a < 247.5 => PhaseName::WaningGibbous,
            a if a < 292.5 => PhaseName::LastQuarter,
            _ => PhaseName::WaningCrescent,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PhaseName::NewMoon => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::FullMoon => "Full Moon",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        }
    }
}

impl From<MajorPhase> for PhaseName {
    fn from(phase: MajorPhase) -> Self {
        match phase {
            MajorPhase::NewMoon => PhaseName::NewMoon,
            MajorPhase::FirstQuarter => PhaseName::FirstQuarter,
            MajorPhase::FullMoon => PhaseName::FullMoon,
            MajorPhase::LastQuarter => PhaseName::LastQuarter,
        }
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Observer-relative "phase angle" from the simplified lunar elements.
///
/// The angle between the local zenith and the Moon's direction, computed from
/// mean longitude and anomaly with a single equation-of-center term. Being an
/// arccosine it only spans [0°, 180°].
///
/// # Arguments
///
/// * `latitude` - Observer latitude in degrees
/// * `longitude` - Observer longitude in degrees east
/// * `instant` - UTC instant
///
/// # Returns
///
/// Angle in degrees, [0, 180]
pub fn observer_phase_angle(latitude: f64, longitude: f64, instant: &DateTime<Utc>) -> f64 {
    let days = (instant.timestamp_millis() - LEGACY_EPOCH_MILLIS) as f64 / MILLIS_PER_DAY;

    let mean_longitude = normalize_degrees_360(218.316 + 13.176_396 * days);
    let mean_anomaly = normalize_degrees_360(134.963 + 13.064_993 * days);
    let ecliptic_longitude = mean_longitude + 6.289 * sin_deg(mean_anomaly);
    let distance = 385_001.0 - 20_905.0 * cos_deg(mean_anomaly);
    let obliquity = 23.439 - 0.000_000_4 * days;

    let x = distance * cos_deg(ecliptic_longitude);
    let y = distance * cos_deg(obliquity) * sin_deg(ecliptic_longitude);
    let z = distance * sin_deg(obliquity) * sin_deg(ecliptic_longitude);
    let right_ascension = y.atan2(x).to_degrees();
    let declination = (z / distance).clamp(-1.0, 1.0).asin().to_degrees();

    let local_sidereal_time = 100.46 + 0.985_647_352 * days + longitude;
    let hour_angle = normalize_degrees_360(local_sidereal_time - right_ascension);

    (sin_deg(latitude) * sin_deg(declination) + cos_deg(latitude) * cos_deg(declination) * cos_deg(hour_angle))
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees()
}

/// Eight-way phase name from the legacy observer-relative angle.
pub fn nearest_phase_name(latitude: f64, longitude: f64, instant: &DateTime<Utc>) -> PhaseName {
    PhaseName::from_angle(observer_phase_angle(latitude, longitude, instant))
}

/// The major phase whose angle is closest to `angle`, and the distance to it.
pub fn nearest_major_phase(angle: f64) -> (MajorPhase, f64) {
    MajorPhase::ALL
        .iter()
        .map(|&phase| (phase, angular_distance_degrees(angle, phase.phase_angle())))
        .fold((MajorPhase::NewMoon, f64::INFINITY), |best, candidate| {
            if candidate.1 < best.1 {
                candidate
            } else {
                best
            }
        })
}

/// A day flagged by [`legacy_major_phase_days`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegacyPhaseDay {
    pub date: NaiveDate,
    pub phase: MajorPhase,
    pub phase_angle: f64,
}

/// Scans each UTC day start of `year` and flags days whose legacy angle lies
/// within 7° of a major phase, skipping repeats of the same phase within 10
/// days.
///
/// # Errors
///
/// [`CalendarError::InvalidRange`] if `year` is not representable.
pub fn legacy_major_phase_days(latitude: f64, longitude: f64, year: i32) -> Result<Vec<LegacyPhaseDay>, CalendarError> {
    let invalid = || CalendarError::InvalidRange(alloc::format!("year {year} is not representable"));
    let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(invalid)?;

    let mut days: Vec<LegacyPhaseDay> = Vec::new();
    for date in first.iter_days().take_while(|date| *date <= last) {
        let angle = observer_phase_angle(latitude, longitude, &day_start_utc(date));
        let (phase, distance) = nearest_major_phase(angle);
        if distance >= MAJOR_PHASE_THRESHOLD {
            continue;
        }
        let repeated = days
            .iter()
            .rev()
            .find(|day| day.phase == phase)
            .is_some_and(|day| (date - day.date).num_days() <= MIN_DAYS_BETWEEN_SAME_PHASE);
        if !repeated {
            days.push(LegacyPhaseDay {
                date,
                phase,
                phase_angle: angle,
            });
        }
    }
    Ok(days)
}
