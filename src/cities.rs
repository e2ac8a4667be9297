//! Fixed registry of supported cities.

use core::fmt;

use chrono_tz::Tz;

use crate::CalendarError;

/// Observer location and civil timezone.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Locale {
    /// Degrees north, [-90, 90]
    pub latitude: f64,
    /// Degrees east, [-180, 180]
    pub longitude: f64,
    pub timezone: Tz,
}

impl Locale {
    /// Builds a locale from coordinates and an IANA zone name.
    ///
    /// # Arguments
    ///
    /// * `latitude` - Degrees north (negative = south)
    /// * `longitude` - Degrees east (negative = west)
    /// * `timezone` - IANA name such as `"Australia/Melbourne"`
    ///
    /// # Errors
    ///
    /// [`CalendarError::LatitudeOutOfRange`], [`CalendarError::LongitudeOutOfRange`]
    /// or [`CalendarError::UnknownTimezone`].
    pub fn new(latitude: f64, longitude: f64, timezone: &str) -> Result<Self, CalendarError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CalendarError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CalendarError::LongitudeOutOfRange);
        }
        let timezone = timezone
            .parse::<Tz>()
            .map_err(|_| CalendarError::UnknownTimezone(timezone.into()))?;
        Ok(Self {
            latitude,
            longitude,
            timezone,
        })
    }
}

/// A named entry of the registry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub locale: Locale,
}

const fn city(name: &'static str, latitude: f64, longitude: f64, timezone: Tz) -> City {
    City {
        name,
        locale: Locale {
            latitude,
            longitude,
            timezone,
        },
    }
}

/// Every supported city.
pub const CITIES: [City; 7] = [
    city("Cape Town", -33.9249, 18.4241, Tz::Africa__Johannesburg),
    city("New York", 40.7128, -74.0060, Tz::America__New_York),
    city("London", 51.5074, -0.1278, Tz::Europe__London),
    city("Hong Kong", 22.3193, 114.1694, Tz::Asia__Hong_Kong),
    city("Melbourne", -37.8136, 144.9631, Tz::Australia__Melbourne),
    city("San Francisco", 37.7749, -122.4194, Tz::America__Los_Angeles),
    city("Tokyo", 35.6895, 139.6917, Tz::Asia__Tokyo),
];

/// Resolves a city by its exact display name.
///
/// # Errors
///
/// [`CalendarError::UnknownCity`] when the name is not registered.
pub fn lookup_city(name: &str) -> Result<Locale, CalendarError> {
    CITIES
        .iter()
        .find(|city| city.name == name)
        .map(|city| city.locale)
        .ok_or_else(|| CalendarError::UnknownCity(name.into()))
}

/// Names of every registered city, in registry order.
pub fn city_names() -> impl Iterator<Item = &'static str> {
    CITIES.iter().map(|city| city.name)
}

/// Comma-separated city list for error messages.
pub(crate) struct AvailableCities;

impl fmt::Display for AvailableCities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in city_names().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}
