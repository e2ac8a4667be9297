//! # Lunar Calendar
//!
//! Daily moon phase calendars for a fixed set of cities.
//!
//! For every UTC day in a range the library reports the Moon's illuminated
//! fraction, its age since New Moon, whether it is waxing, the major phase
//! (New Moon, First Quarter, Full Moon, Last Quarter) that falls on that day
//! in the city's local calendar, and the next major phase to come.
//!
//! ## Basic Usage
//!
//! ```
//! use lunar_calendar::{generate_daily_series, MajorPhase};
//!
//! let records = generate_daily_series("Melbourne", "20250101", "20250131").unwrap();
//! assert_eq!(records.len(), 31);
//!
//! for record in &records {
//!     if let Some(phase) = record.major_phase {
//!         println!("{}: {}", record.local_date, phase);
//!     }
//! }
//!
//! // The first record's next phase is the First Quarter of 7 January (local time).
//! assert_eq!(records[0].next_major_phase.name, Some(MajorPhase::FirstQuarter));
//! ```
//!
//! ## Custom ephemeris
//!
//! [`MoonCalendar`] is generic over the [`Ephemeris`] trait. The bundled
//! [`MeeusEphemeris`] estimates ΔT from the date; a fixed value can be given
//! instead:
//!
//! ```
//! use lunar_calendar::{MeeusEphemeris, MoonCalendar, SeriesOptions};
//!
//! let calendar = MoonCalendar::new(MeeusEphemeris::new(Some(69.0)).unwrap())
//!     .with_options(SeriesOptions { lookahead_days: 31 });
//! let records = calendar.generate_daily_series("Tokyo", "20251220", "20251231").unwrap();
//! assert!(records.iter().all(|r| r.next_major_phase.name.is_some()));
//! ```
#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod cities;
mod classify;
mod ephemeris;
mod geo;
mod legacy;
mod math;
mod phases;
mod series;
mod terms;
mod time;

#[cfg(test)]
mod tests;

use alloc::string::String;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::cities::{city_names, lookup_city, City, Locale, CITIES};
pub use crate::classify::{EphemerisClassifier, LegacyClassifier, PhaseClassifier};
pub use crate::ephemeris::{Ephemeris, MeeusEphemeris, MoonSample};
pub use crate::legacy::{
    legacy_major_phase_days, nearest_major_phase, nearest_phase_name, observer_phase_angle, LegacyPhaseDay, PhaseName,
};
pub use crate::phases::{events_between, MajorPhase, MajorPhaseIndex, QuarterEvent, QuarterEvents};
pub use crate::series::{DailyMoonRecord, NextMajorPhase, SeriesOptions};

use crate::cities::AvailableCities;
use crate::series::{checked_sample, moon_age_days};
use crate::time::{local_date, parse_compact_date, shift_days};

/// Mean length of the synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530588;

/// Half-width of the window searched for the New Moons around a snapshot.
const SNAPSHOT_WINDOW_DAYS: i64 = 35;

/// Errors that can occur while building a calendar.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalendarError {
    /// City name not in the registry
    #[error("City not found: {0}. Available cities: {}", AvailableCities)]
    UnknownCity(String),

    /// Inverted or malformed date range
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// The ephemeris could not produce a valid value for this instant
    #[error("Ephemeris unavailable at {0}")]
    EphemerisUnavailable(DateTime<Utc>),

    /// Latitude out of valid range [-90, 90] degrees
    #[error("Latitude out of range")]
    LatitudeOutOfRange,

    /// Longitude out of valid range [-180, 180] degrees
    #[error("Longitude out of range")]
    LongitudeOutOfRange,

    /// Not an IANA timezone name
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// ΔT override out of valid range [-8000, 8000] seconds
    #[error("ΔT out of range")]
    DeltaTOutOfRange,

    /// Error converting between time representations
    #[error("Time conversion error")]
    TimeConversionError,
}

/// The Moon at a single instant, as seen from one city.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoonSnapshot {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "date_utc")]
    pub instant_utc: DateTime<Utc>,
    #[serde(rename = "date_local")]
    pub local_date: NaiveDate,
    pub illuminated_fraction: f64,
    pub is_waxing: bool,
    pub moon_age_days: f64,
    pub major_phase: Option<MajorPhase>,
    pub next_major_phase: NextMajorPhase,
    #[serde(rename = "previous_new_moon_utc")]
    pub previous_new_moon: Option<DateTime<Utc>>,
    #[serde(rename = "next_new_moon_utc")]
    pub next_new_moon: Option<DateTime<Utc>>,
}

/// Calendar engine over an [`Ephemeris`].
///
/// Holds no per-query state; every call locates the quarter events it needs
/// and discards them afterwards.
#[derive(Clone, Debug, Default)]
pub struct MoonCalendar<E = MeeusEphemeris> {
    ephemeris: E,
    options: SeriesOptions,
}

impl<E: Ephemeris> MoonCalendar<E> {
    pub fn new(ephemeris: E) -> Self {
        Self {
            ephemeris,
            options: SeriesOptions::default(),
        }
    }

    pub fn with_options(self, options: SeriesOptions) -> Self {
        Self { options, ..self }
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    /// Daily records for a registered city.
    ///
    /// # Arguments
    ///
    /// * `city` - Registry name, e.g. `"Cape Town"`
    /// * `date_from` - First day, `YYYYMMDD`
    /// * `date_to` - Last day (inclusive), `YYYYMMDD`
    ///
    /// # Errors
    ///
    /// [`CalendarError::UnknownCity`], [`CalendarError::InvalidRange`] for a
    /// malformed or inverted range, or the first ephemeris failure.
    pub fn generate_daily_series(
        &self,
        city: &str,
        date_from: &str,
        date_to: &str,
    ) -> Result<alloc::vec::Vec<DailyMoonRecord>, CalendarError> {
        let locale = lookup_city(city)?;
        let from = parse_compact_date(date_from)?;
        let to = parse_compact_date(date_to)?;
        self.daily_series_for_locale(city, &locale, from, to)
    }

    /// Daily records for an arbitrary locale; `label` is echoed as the city.
    pub fn daily_series_for_locale(
        &self,
        label: &str,
        locale: &Locale,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<alloc::vec::Vec<DailyMoonRecord>, CalendarError> {
        series::generate(&self.ephemeris, label, locale, from, to, &self.options)
    }

    /// Quarter events of the UTC years `first_year..=last_year`, indexed by
    /// their local date in `timezone`.
    pub fn major_phases(&self, timezone: Tz, first_year: i32, last_year: i32) -> Result<MajorPhaseIndex, CalendarError> {
        MajorPhaseIndex::build(&self.ephemeris, timezone, first_year, last_year)
    }

    /// The Moon at `instant` for a registered city, with the surrounding New Moons.
    pub fn snapshot(&self, city: &str, instant: &DateTime<Utc>) -> Result<MoonSnapshot, CalendarError> {
        let locale = lookup_city(city)?;
        let sample = checked_sample(&self.ephemeris, instant)?;

        let unavailable = || CalendarError::EphemerisUnavailable(*instant);
        let start = shift_days(instant, -SNAPSHOT_WINDOW_DAYS).ok_or_else(unavailable)?;
        let end = shift_days(instant, SNAPSHOT_WINDOW_DAYS).ok_or_else(unavailable)?;
        let events = events_between(&self.ephemeris, start, end)?;
        let index = MajorPhaseIndex::from_events(locale.timezone, events);
        let local_date = local_date(instant, locale.timezone);
        let next = index.next_after(instant);

        let new_moons = || index.events().iter().filter(|event| event.kind == MajorPhase::NewMoon);
        let previous_new_moon = new_moons()
            .filter(|event| event.instant_utc <= *instant)
            .last()
            .map(|event| event.instant_utc);
        let next_new_moon = new_moons()
            .find(|event| event.instant_utc > *instant)
            .map(|event| event.instant_utc);

        Ok(MoonSnapshot {
            city: city.into(),
            latitude: locale.latitude,
            longitude: locale.longitude,
            instant_utc: *instant,
            local_date,
            illuminated_fraction: sample.illuminated_fraction,
            is_waxing: sample.phase_angle < 180.0,
            moon_age_days: moon_age_days(sample.phase_angle),
            major_phase: index.phase_on(local_date),
            next_major_phase: NextMajorPhase {
                name: next.map(|event| event.kind),
                instant_utc: next.map(|event| event.instant_utc),
            },
            previous_new_moon,
            next_new_moon,
        })
    }
}

/// Daily records for a registered city using [`MeeusEphemeris`] with
/// estimated ΔT and no lookahead.
///
/// # Example
///
/// ```
/// use lunar_calendar::{generate_daily_series, CalendarError};
///
/// assert!(matches!(
///     generate_daily_series("Atlantis", "20250101", "20250102"),
///     Err(CalendarError::UnknownCity(_))
/// ));
/// ```
pub fn generate_daily_series(
    city: &str,
    date_from: &str,
    date_to: &str,
) -> Result<alloc::vec::Vec<DailyMoonRecord>, CalendarError> {
    MoonCalendar::<MeeusEphemeris>::default().generate_daily_series(city, date_from, date_to)
}
