//! Quarter-phase events and the per-locale major-phase index.

use alloc::{collections::BTreeMap, vec::Vec};
use core::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    ephemeris::Ephemeris,
    time::{day_start_utc, local_date},
    CalendarError,
};

/// The four principal phases, at phase angles 0°, 90°, 180° and 270°.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MajorPhase {
    #[serde(rename = "New Moon")]
    NewMoon,
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    #[serde(rename = "Full Moon")]
    FullMoon,
    #[serde(rename = "Last Quarter")]
    LastQuarter,
}

impl MajorPhase {
    /// All phases in cycle order.
    pub const ALL: [MajorPhase; 4] = [
        MajorPhase::NewMoon,
        MajorPhase::FirstQuarter,
        MajorPhase::FullMoon,
        MajorPhase::LastQuarter,
    ];

    /// Position in the cycle: 0 for New Moon through 3 for Last Quarter.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Inverse of [`MajorPhase::index`]. `None` for indices above 3.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Phase of an arbitrary quarter count, wrapping modulo 4.
    pub(crate) fn from_quarter_index(quarter: i64) -> Self {
        match quarter.rem_euclid(4) {
            0 => MajorPhase::NewMoon,
            1 => MajorPhase::FirstQuarter,
            2 => MajorPhase::FullMoon,
            _ => MajorPhase::LastQuarter,
        }
    }

    /// The phase that follows this one.
    pub fn next(self) -> Self {
        Self::from_quarter_index(i64::from(self.index()) + 1)
    }

    /// Phase angle in degrees at which this phase occurs.
    pub fn phase_angle(self) -> f64 {
        f64::from(self.index()) * 90.0
    }

    /// Display name, e.g. `"First Quarter"`.
    pub fn name(self) -> &'static str {
        match self {
            MajorPhase::NewMoon => "New Moon",
            MajorPhase::FirstQuarter => "First Quarter",
            MajorPhase::FullMoon => "Full Moon",
            MajorPhase::LastQuarter => "Last Quarter",
        }
    }
}

impl fmt::Display for MajorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An exact instant at which the phase angle crosses a multiple of 90°.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterEvent {
    pub kind: MajorPhase,
    pub instant_utc: DateTime<Utc>,
}

// ============================================================================
// Event iteration
// ============================================================================

/// Successive quarter events after a start instant.
///
/// Yields `Err` and then stops if the provider fails or returns an event that
/// does not advance past the previous one.
pub struct QuarterEvents<E> {
    ephemeris: E,
    cursor: DateTime<Utc>,
    finished: bool,
}

impl<E: Ephemeris> QuarterEvents<E> {
    /// Walks the events strictly after `start`.
    pub fn new(ephemeris: E, start: DateTime<Utc>) -> Self {
        Self {
            ephemeris,
            cursor: start,
            finished: false,
        }
    }
}

impl<E: Ephemeris> Iterator for QuarterEvents<E> {
    type Item = Result<QuarterEvent, CalendarError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.ephemeris.next_quarter_event(&self.cursor).and_then(|event| {
            if event.instant_utc <= self.cursor {
                Err(CalendarError::EphemerisUnavailable(self.cursor))
            } else {
                Ok(event)
            }
        });
        match result {
            Ok(event) => self.cursor = event.instant_utc,
            Err(_) => self.finished = true,
        }
        Some(result)
    }
}

/// All quarter events in the half-open window `(start, end]`, in order.
///
/// # Errors
///
/// Propagates the first provider failure.
pub fn events_between<E: Ephemeris>(
    ephemeris: E,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<QuarterEvent>, CalendarError> {
    let mut events = Vec::new();
    for event in QuarterEvents::new(ephemeris, start) {
        let event = event?;
        if event.instant_utc > end {
            break;
        }
        events.push(event);
    }
    Ok(events)
}

// ============================================================================
// Major-phase index
// ============================================================================

/// Quarter events over a span of UTC years, indexed by the locale-local
/// calendar date each one falls on.
#[derive(Clone, Debug)]
pub struct MajorPhaseIndex {
    timezone: Tz,
    events: Vec<QuarterEvent>,
    by_local_date: BTreeMap<NaiveDate, MajorPhase>,
}

impl MajorPhaseIndex {
    /// Locates every quarter event in the UTC years `first_year..=last_year`.
    ///
    /// Each year is searched from January 1 00:00:00 UTC and keeps events
    /// whose UTC year is not past it. If two events land on the same local
    /// date, the later one is kept in the date index.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidRange`] if `first_year > last_year`; otherwise
    /// any provider failure.
    pub fn build<E: Ephemeris>(
        ephemeris: E,
        timezone: Tz,
        first_year: i32,
        last_year: i32,
    ) -> Result<Self, CalendarError> {
        if first_year > last_year {
            return Err(CalendarError::InvalidRange(alloc::format!(
                "year range {first_year}..={last_year} is inverted"
            )));
        }

        let mut index = Self {
            timezone,
            events: Vec::new(),
            by_local_date: BTreeMap::new(),
        };
        for year in first_year..=last_year {
            let start = NaiveDate::from_ymd_opt(year, 1, 1)
                .map(day_start_utc)
                .ok_or(CalendarError::TimeConversionError)?;
            let before = index.events.len();
            for event in QuarterEvents::new(&ephemeris, start) {
                let event = event?;
                if event.instant_utc.year() > year {
                    break;
                }
                index.insert(event);
            }
            debug!(
                "located {} quarter events in {year} for {}",
                index.events.len() - before,
                timezone.name()
            );
        }
        Ok(index)
    }

    /// Appends events after the last indexed one, up to and including `end`.
    pub(crate) fn extend_through<E: Ephemeris>(&mut self, ephemeris: E, end: DateTime<Utc>) -> Result<(), CalendarError> {
        let Some(last) = self.events.last().map(|event| event.instant_utc) else {
            return Ok(());
        };
        if last >= end {
            return Ok(());
        }
        let extra = events_between(ephemeris, last, end)?;
        debug!("extended horizon by {} quarter events to {end}", extra.len());
        for event in extra {
            self.insert(event);
        }
        Ok(())
    }

    /// Indexes an already ordered event list.
    pub(crate) fn from_events(timezone: Tz, events: Vec<QuarterEvent>) -> Self {
        let mut index = Self {
            timezone,
            events: Vec::with_capacity(events.len()),
            by_local_date: BTreeMap::new(),
        };
        for event in events {
            index.insert(event);
        }
        index
    }

    fn insert(&mut self, event: QuarterEvent) {
        self.by_local_date
            .insert(local_date(&event.instant_utc, self.timezone), event.kind);
        self.events.push(event);
    }

    /// Zone used for the local-date index.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Events in ascending instant order.
    pub fn events(&self) -> &[QuarterEvent] {
        &self.events
    }

    /// The phase whose local date is `date`, if any.
    pub fn phase_on(&self, date: NaiveDate) -> Option<MajorPhase> {
        self.by_local_date.get(&date).copied()
    }

    /// The first event strictly after `instant`.
    pub fn next_after(&self, instant: &DateTime<Utc>) -> Option<&QuarterEvent> {
        let position = self.events.partition_point(|event| event.instant_utc <= *instant);
        self.events.get(position)
    }
}
