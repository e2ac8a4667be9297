//! Daily moon records over a date range.
//!
//! Records are keyed by UTC day: each one describes the Moon at 00:00:00 UTC
//! of its day. The major phase attached to a record is matched on the
//! locale-local calendar date of that instant instead, so a quarter that
//! occurs late in the UTC day can show up on the following local day.

use alloc::{string::String, vec::Vec};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::{
    cities::Locale,
    ephemeris::{Ephemeris, MoonSample},
    phases::{MajorPhase, MajorPhaseIndex},
    time::{day_start_utc, local_date, shift_days},
    CalendarError, SYNODIC_MONTH_DAYS,
};

/// The nearest quarter event after a record's instant.
///
/// Both fields are `None` when no event lies inside the precomputed horizon.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextMajorPhase {
    pub name: Option<MajorPhase>,
    #[serde(rename = "date_utc")]
    pub instant_utc: Option<DateTime<Utc>>,
}

/// The Moon on one UTC calendar day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyMoonRecord {
    pub city: String,
    /// 00:00:00 UTC of the day, not the observer's local midnight
    #[serde(rename = "date_utc")]
    pub instant_utc: DateTime<Utc>,
    /// Calendar date of `instant_utc` in the locale's timezone
    #[serde(rename = "date_local")]
    pub local_date: NaiveDate,
    pub illuminated_fraction: f64,
    pub is_waxing: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub major_phase: Option<MajorPhase>,
    pub moon_age_days: f64,
    pub next_major_phase: NextMajorPhase,
}

/// Tuning for series generation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SeriesOptions {
    /// Extra days of quarter events located past the last requested day.
    ///
    /// With 0, events are only located within the UTC years the range
    /// touches, so the last days of a December range may have no next phase.
    pub lookahead_days: u32,
}

/// Days since the last New Moon implied by a phase angle.
pub(crate) fn moon_age_days(phase_angle: f64) -> f64 {
    phase_angle / 360.0 * SYNODIC_MONTH_DAYS
}

/// Rejects samples outside their documented ranges.
pub(crate) fn checked_sample<E: Ephemeris>(ephemeris: &E, instant: &DateTime<Utc>) -> Result<MoonSample, CalendarError> {
    let sample = ephemeris.sample(instant)?;
    if !(0.0..360.0).contains(&sample.phase_angle) || !(0.0..=1.0).contains(&sample.illuminated_fraction) {
        return Err(CalendarError::EphemerisUnavailable(*instant));
    }
    Ok(sample)
}

/// Builds the major-phase index covering `from..=to` plus the lookahead.
pub(crate) fn phase_index_for_range<E: Ephemeris>(
    ephemeris: &E,
    locale: &Locale,
    from: NaiveDate,
    to: NaiveDate,
    options: &SeriesOptions,
) -> Result<MajorPhaseIndex, CalendarError> {
    let mut index = MajorPhaseIndex::build(ephemeris, locale.timezone, from.year(), to.year())?;
    if options.lookahead_days > 0 {
        let horizon = shift_days(&day_start_utc(to), i64::from(options.lookahead_days)).ok_or_else(|| {
            CalendarError::InvalidRange(alloc::format!("lookahead of {} days is out of range", options.lookahead_days))
        })?;
        index.extend_through(ephemeris, horizon)?;
    }
    Ok(index)
}

/// Generates one record per UTC day in `from..=to`.
///
/// # Errors
///
/// [`CalendarError::InvalidRange`] if `from > to`, checked before any
/// ephemeris evaluation; otherwise the first provider failure.
pub(crate) fn generate<E: Ephemeris>(
    ephemeris: &E,
    city: &str,
    locale: &Locale,
    from: NaiveDate,
    to: NaiveDate,
    options: &SeriesOptions,
) -> Result<Vec<DailyMoonRecord>, CalendarError> {
    if from > to {
        return Err(CalendarError::InvalidRange(alloc::format!(
            "date_from {from} is after date_to {to}"
        )));
    }

    let index = phase_index_for_range(ephemeris, locale, from, to, options)?;

    let mut records = Vec::with_capacity(usize::try_from((to - from).num_days() + 1).unwrap_or_default());
    let mut missing_next = 0usize;
    for day in from.iter_days().take_while(|day| *day <= to) {
        let instant_utc = day_start_utc(day);
        let sample = checked_sample(ephemeris, &instant_utc)?;
        let local_date = local_date(&instant_utc, locale.timezone);
        let next = index.next_after(&instant_utc);
        if next.is_none() {
            missing_next += 1;
        }

        let record = DailyMoonRecord {
            city: city.into(),
            instant_utc,
            local_date,
            illuminated_fraction: sample.illuminated_fraction,
            is_waxing: sample.phase_angle < 180.0,
            latitude: locale.latitude,
            longitude: locale.longitude,
            major_phase: index.phase_on(local_date),
            moon_age_days: moon_age_days(sample.phase_angle),
            next_major_phase: NextMajorPhase {
                name: next.map(|event| event.kind),
                instant_utc: next.map(|event| event.instant_utc),
            },
        };
        trace!(
            "{city} {day}: angle {:.3}, illuminated {:.4}, major {:?}",
            sample.phase_angle,
            record.illuminated_fraction,
            record.major_phase
        );
        records.push(record);
    }

    if missing_next > 0 {
        warn!("{city}: last {missing_next} day(s) up to {to} have no next major phase inside the horizon");
    }
    debug!(
        "{city}: generated {} daily records {from}..={to} against {} quarter events",
        records.len(),
        index.events().len()
    );
    Ok(records)
}
