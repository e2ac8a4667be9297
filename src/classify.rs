//! Interchangeable strategies for naming the phase at an instant.

use chrono::{DateTime, Utc};

use crate::{
    cities::Locale,
    ephemeris::Ephemeris,
    legacy::{nearest_phase_name, PhaseName},
    phases::events_between,
    time::{local_date, shift_days},
    CalendarError,
};

/// Names the lunar phase seen from a locale at an instant.
pub trait PhaseClassifier {
    fn classify(&self, locale: &Locale, instant: &DateTime<Utc>) -> Result<PhaseName, CalendarError>;
}

/// Ephemeris-backed naming: a quarter name on the local day of a quarter
/// event, otherwise the intermediate name for the current phase angle.
#[derive(Copy, Clone, Debug, Default)]
pub struct EphemerisClassifier<E> {
    ephemeris: E,
}

impl<E: Ephemeris> EphemerisClassifier<E> {
    pub fn new(ephemeris: E) -> Self {
        Self { ephemeris }
    }
}

impl<E: Ephemeris> PhaseClassifier for EphemerisClassifier<E> {
    fn classify(&self, locale: &Locale, instant: &DateTime<Utc>) -> Result<PhaseName, CalendarError> {
        // Any event on the same local date lies within two days of the instant.
        let unavailable = || CalendarError::EphemerisUnavailable(*instant);
        let start = shift_days(instant, -2).ok_or_else(unavailable)?;
        let end = shift_days(instant, 2).ok_or_else(unavailable)?;
        let today = local_date(instant, locale.timezone);
        let quarter = events_between(&self.ephemeris, start, end)?
            .into_iter()
            .rev()
            .find(|event| local_date(&event.instant_utc, locale.timezone) == today);
        if let Some(event) = quarter {
            return Ok(event.kind.into());
        }

        let angle = self.ephemeris.phase_angle_degrees(instant)?;
        Ok(match angle {
            a if a < 90.0 => PhaseName::WaxingCrescent,
            a if a < 180.0 => PhaseName::WaxingGibbous,
            a if a < 270.0 => PhaseName::WaningGibbous,
            _ => PhaseName::WaningCrescent,
        })
    }
}

/// The simplified observer-relative classifier.
#[derive(Copy, Clone, Debug, Default)]
pub struct LegacyClassifier;

impl PhaseClassifier for LegacyClassifier {
    fn classify(&self, locale: &Locale, instant: &DateTime<Utc>) -> Result<PhaseName, CalendarError> {
        Ok(nearest_phase_name(locale.latitude, locale.longitude, instant))
    }
}
