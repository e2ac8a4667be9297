//! Lunar ephemeris provider.
//!
//! [`Ephemeris`] is the seam between the calendar logic and the astronomy.
//! [`MeeusEphemeris`] implements it with the lunar and solar series from
//! Meeus, *Astronomical Algorithms* (chapters 25, 47, 48 and 49).

use core::cell::OnceCell;

use chrono::{DateTime, Datelike, Utc};
#[allow(unused_imports)]
use core_maths::CoreFloat;
use serde::{Deserialize, Serialize};

use crate::{
    geo::{calculate_illuminated_fraction, calculate_phase_angle, MoonPosition, SunPosition},
    math::{normalize_degrees_360, polynomial, sin_deg, cos_deg},
    phases::{MajorPhase, QuarterEvent},
    terms::{PhaseTerm, FULL_MOON_TERMS, NEW_MOON_TERMS, PLANETARY_TERMS, QUARTER_TERMS, QUARTER_W_TERMS},
    time::{
        decimal_year, delta_t_seconds, instant_from_julian_day, julian_century_from_julian_day, julian_day,
        julian_day_from_julian_ephemeris_day, julian_ephemeris_day_from_julian_day,
    },
    CalendarError,
};

/// Years over which the series are considered usable.
const VALID_YEARS: core::ops::RangeInclusive<i32> = -2000..=6000;

/// Largest accepted ΔT override in seconds.
const MAX_DELTA_T: f64 = 8000.0;

/// JDE of the mean New Moon of 2000 January 6 (lunation k = 0).
const MEAN_PHASE_EPOCH_JDE: f64 = 2_451_550.097_66;

/// Mean synodic month in days, as used by the mean-phase series.
const MEAN_SYNODIC_MONTH: f64 = 29.530_588_861;

/// Lunations per Julian century.
const LUNATIONS_PER_CENTURY: f64 = 1236.85;

/// Upper bound on candidate quarters inspected per search.
const MAX_QUARTER_CANDIDATES: usize = 8;

/// Phase angle and illuminated fraction of the Moon at one instant.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoonSample {
    /// Moon − Sun geocentric ecliptic longitude in degrees, [0, 360)
    pub phase_angle: f64,
    /// Sunlit fraction of the visible disk, [0, 1]
    pub illuminated_fraction: f64,
}

/// Source of lunar phase data.
///
/// Implementations must be deterministic: the same instant always yields
/// the same values. `next_quarter_event` must be monotonic (the returned
/// event is strictly after `after`) and exhaustive (no quarter is skipped).
pub trait Ephemeris {
    /// Moon − Sun ecliptic longitude difference in degrees, in [0, 360).
    fn phase_angle_degrees(&self, instant: &DateTime<Utc>) -> Result<f64, CalendarError>;

    /// Illuminated fraction of the lunar disk, in [0, 1].
    fn illuminated_fraction(&self, instant: &DateTime<Utc>) -> Result<f64, CalendarError>;

    /// The first quarter-phase event strictly after `after`.
    fn next_quarter_event(&self, after: &DateTime<Utc>) -> Result<QuarterEvent, CalendarError>;

    /// Phase angle and illuminated fraction together.
    fn sample(&self, instant: &DateTime<Utc>) -> Result<MoonSample, CalendarError> {
        Ok(MoonSample {
            phase_angle: self.phase_angle_degrees(instant)?,
            illuminated_fraction: self.illuminated_fraction(instant)?,
        })
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn phase_angle_degrees(&self, instant: &DateTime<Utc>) -> Result<f64, CalendarError> {
        (**self).phase_angle_degrees(instant)
    }

    fn illuminated_fraction(&self, instant: &DateTime<Utc>) -> Result<f64, CalendarError> {
        (**self).illuminated_fraction(instant)
    }

    fn next_quarter_event(&self, after: &DateTime<Utc>) -> Result<QuarterEvent, CalendarError> {
        (**self).next_quarter_event(after)
    }

    fn sample(&self, instant: &DateTime<Utc>) -> Result<MoonSample, CalendarError> {
        (**self).sample(instant)
    }
}

/// Ephemeris built on the truncated ELP-2000/82 lunar theory and the
/// low-precision solar theory.
///
/// Phase angles are good to a few hundredths of a degree and quarter
/// instants to well under a minute for the present era, which is far below
/// the one-day granularity of a calendar.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use lunar_calendar::{Ephemeris, MajorPhase, MeeusEphemeris};
///
/// let ephemeris = MeeusEphemeris::default();
/// let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
/// let event = ephemeris.next_quarter_event(&start).unwrap();
/// assert_eq!(event.kind, MajorPhase::FirstQuarter);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MeeusEphemeris {
    delta_t: Option<f64>,
}

impl MeeusEphemeris {
    /// Creates an ephemeris with an optional fixed ΔT.
    ///
    /// # Arguments
    ///
    /// * `delta_t` - ΔT (TT − UT) in seconds. `None` estimates it from the date.
    ///
    /// # Errors
    ///
    /// [`CalendarError::DeltaTOutOfRange`] if the override is not finite or
    /// lies outside [-8000, 8000] seconds.
    pub fn new(delta_t: Option<f64>) -> Result<Self, CalendarError> {
        if let Some(dt) = delta_t {
            if !(-MAX_DELTA_T..=MAX_DELTA_T).contains(&dt) {
                return Err(CalendarError::DeltaTOutOfRange);
            }
        }
        Ok(Self { delta_t })
    }

    /// ΔT in seconds applied at `instant`.
    pub fn delta_t(&self, instant: &DateTime<Utc>) -> f64 {
        self.delta_t.unwrap_or_else(|| delta_t_seconds(decimal_year(instant)))
    }

    fn state(&self, instant: &DateTime<Utc>) -> Result<LunarState, CalendarError> {
        if !VALID_YEARS.contains(&instant.year()) {
            return Err(CalendarError::EphemerisUnavailable(*instant));
        }
        let ephemeris_day = julian_ephemeris_day_from_julian_day(julian_day(instant), self.delta_t(instant));
        Ok(LunarState::new(*instant, julian_century_from_julian_day(ephemeris_day)))
    }
}

impl Ephemeris for MeeusEphemeris {
    fn phase_angle_degrees(&self, instant: &DateTime<Utc>) -> Result<f64, CalendarError> {
        self.state(instant)?.phase_angle()
    }

    fn illuminated_fraction(&self, instant: &DateTime<Utc>) -> Result<f64, CalendarError> {
        self.state(instant)?.illuminated_fraction()
    }

    fn sample(&self, instant: &DateTime<Utc>) -> Result<MoonSample, CalendarError> {
        let state = self.state(instant)?;
        Ok(MoonSample {
            phase_angle: state.phase_angle()?,
            illuminated_fraction: state.illuminated_fraction()?,
        })
    }

    fn next_quarter_event(&self, after: &DateTime<Utc>) -> Result<QuarterEvent, CalendarError> {
        if !VALID_YEARS.contains(&after.year()) {
            return Err(CalendarError::EphemerisUnavailable(*after));
        }
        let delta_t = self.delta_t(after);
        let ephemeris_day = julian_ephemeris_day_from_julian_day(julian_day(after), delta_t);

        // Start one quarter early: the true phase can precede the mean phase by up to ~14 h.
        let quarters = ((ephemeris_day - MEAN_PHASE_EPOCH_JDE) / MEAN_SYNODIC_MONTH * 4.0).floor() - 1.0;
        if !quarters.is_finite() {
            return Err(CalendarError::EphemerisUnavailable(*after));
        }
        let first = quarters as i64;

        for index in first..first + MAX_QUARTER_CANDIDATES as i64 {
            let event_jde = quarter_ephemeris_day(index);
            let instant = instant_from_julian_day(julian_day_from_julian_ephemeris_day(event_jde, delta_t))
                .map_err(|_| CalendarError::EphemerisUnavailable(*after))?;
            if instant > *after {
                return Ok(QuarterEvent {
                    kind: MajorPhase::from_quarter_index(index),
                    instant_utc: instant,
                });
            }
        }
        Err(CalendarError::EphemerisUnavailable(*after))
    }
}

// ============================================================================
// Per-instant state
// ============================================================================

/// Lunar and solar positions for one instant, evaluated lazily and at most once.
struct LunarState {
    instant: DateTime<Utc>,
    julian_century: f64,
    moon: OnceCell<MoonPosition>,
    sun: OnceCell<SunPosition>,
}

impl LunarState {
    fn new(instant: DateTime<Utc>, julian_century: f64) -> Self {
        Self {
            instant,
            julian_century,
            moon: OnceCell::new(),
            sun: OnceCell::new(),
        }
    }

    fn moon(&self) -> &MoonPosition {
        self.moon.get_or_init(|| MoonPosition::new(self.julian_century))
    }

    fn sun(&self) -> &SunPosition {
        self.sun.get_or_init(|| SunPosition::new(self.julian_century))
    }

    fn phase_angle(&self) -> Result<f64, CalendarError> {
        let angle = calculate_phase_angle(self.moon(), self.sun());
        if !(0.0..360.0).contains(&angle) {
            return Err(CalendarError::EphemerisUnavailable(self.instant));
        }
        Ok(angle)
    }

    fn illuminated_fraction(&self) -> Result<f64, CalendarError> {
        let fraction = calculate_illuminated_fraction(self.moon(), self.sun());
        if !(0.0..=1.0).contains(&fraction) {
            return Err(CalendarError::EphemerisUnavailable(self.instant));
        }
        Ok(fraction)
    }
}

// ============================================================================
// Quarter instants
// ============================================================================

/// JDE of quarter number `index`, counted in quarters from the New Moon of
/// 2000 January 6. `index.rem_euclid(4)` selects the kind.
///
/// # Arguments
/// * `index` - Quarter number; lunation `k = index / 4`
///
/// # Returns
/// Julian Ephemeris Day of the true phase
pub(crate) fn quarter_ephemeris_day(index: i64) -> f64 {
    let k = index as f64 / 4.0;
    let t = k / LUNATIONS_PER_CENTURY;

    let mean = MEAN_PHASE_EPOCH_JDE
        + MEAN_SYNODIC_MONTH * k
        + polynomial(&[0.0, 0.0, 0.000_154_37, -0.000_000_150, 0.000_000_000_73], t);

    let eccentricity = polynomial(&[1.0, -0.002_516, -0.000_007_4], t);
    let sun_anomaly = normalize_degrees_360(2.5534 + 29.105_356_70 * k + polynomial(&[0.0, 0.0, -0.000_001_4, -0.000_000_11], t));
    let moon_anomaly = normalize_degrees_360(
        201.5643 + 385.816_935_28 * k + polynomial(&[0.0, 0.0, 0.010_758_2, 0.000_012_38, -0.000_000_058], t),
    );
    let argument_latitude = normalize_degrees_360(
        160.7108 + 390.670_502_84 * k + polynomial(&[0.0, 0.0, -0.001_611_8, -0.000_002_27, 0.000_000_011], t),
    );
    let ascending_node =
        normalize_degrees_360(124.7746 - 1.563_755_88 * k + polynomial(&[0.0, 0.0, 0.002_067_2, 0.000_002_15], t));
    let arguments = [sun_anomaly, moon_anomaly, argument_latitude, ascending_node];

    let correction = match MajorPhase::from_quarter_index(index) {
        MajorPhase::NewMoon => sum_phase_terms(&NEW_MOON_TERMS, arguments, eccentricity),
        MajorPhase::FullMoon => sum_phase_terms(&FULL_MOON_TERMS, arguments, eccentricity),
        MajorPhase::FirstQuarter => {
            sum_phase_terms(&QUARTER_TERMS, arguments, eccentricity) + quarter_w_correction(arguments, eccentricity)
        }
        MajorPhase::LastQuarter => {
            sum_phase_terms(&QUARTER_TERMS, arguments, eccentricity) - quarter_w_correction(arguments, eccentricity)
        }
    };

    mean + correction + planetary_correction(k, t)
}

fn eccentricity_weight(power: f64, eccentricity: f64) -> f64 {
    match power as u8 {
        0 => 1.0,
        1 => eccentricity,
        _ => eccentricity * eccentricity,
    }
}

/// Sum of sine corrections; `arguments` is [M, M', F, Ω].
fn sum_phase_terms(terms: &[PhaseTerm], arguments: [f64; 4], eccentricity: f64) -> f64 {
    terms.iter().fold(0.0, |sum, term| {
        let argument = term[2..]
            .iter()
            .zip(arguments)
            .fold(0.0, |acc, (multiplier, value)| acc + multiplier * value);
        sum + term[0] * eccentricity_weight(term[1], eccentricity) * sin_deg(argument)
    })
}

/// W correction of the quarter phases (cosine terms over M, M', F).
fn quarter_w_correction(arguments: [f64; 4], eccentricity: f64) -> f64 {
    QUARTER_W_TERMS.iter().fold(0.0, |sum, term| {
        let argument = term[2..]
            .iter()
            .zip(arguments)
            .fold(0.0, |acc, (multiplier, value)| acc + multiplier * value);
        sum + term[0] * eccentricity_weight(term[1], eccentricity) * cos_deg(argument)
    })
}

fn planetary_correction(k: f64, t: f64) -> f64 {
    PLANETARY_TERMS.iter().enumerate().fold(0.0, |sum, (i, [base, rate, coefficient])| {
        let mut argument = base + rate * k;
        if i == 0 {
            argument -= 0.009_173 * t * t;
        }
        sum + coefficient * sin_deg(argument)
    })
}
