use std::vec::Vec;

use chrono_tz::Tz;

use crate::{city_names, lookup_city, CalendarError, Locale, CITIES};

#[test]
fn registry_lists_every_city() {
    let names: Vec<&str> = city_names().collect();
    assert_eq!(
        names,
        ["Cape Town", "New York", "London", "Hong Kong", "Melbourne", "San Francisco", "Tokyo"]
    );
}

#[test]
fn lookup_resolves_coordinates_and_zone() {
    let melbourne = lookup_city("Melbourne").unwrap();
    assert_eq!(melbourne.latitude, -37.8136);
    assert_eq!(melbourne.longitude, 144.9631);
    assert_eq!(melbourne.timezone, Tz::Australia__Melbourne);

    let san_francisco = lookup_city("San Francisco").unwrap();
    assert_eq!(san_francisco.timezone, Tz::America__Los_Angeles);

    assert_eq!(lookup_city("Cape Town").unwrap().timezone, Tz::Africa__Johannesburg);
}

#[test]
fn lookup_is_exact() {
    assert_eq!(lookup_city("melbourne"), Err(CalendarError::UnknownCity("melbourne".into())));
    assert!(lookup_city("").is_err());
}

#[test]
fn registry_entries_are_valid_locales() {
    for city in CITIES {
        let rebuilt = Locale::new(city.locale.latitude, city.locale.longitude, city.locale.timezone.name()).unwrap();
        assert_eq!(rebuilt, city.locale, "{}", city.name);
    }
}

#[test]
fn locale_validation() {
    assert_eq!(Locale::new(90.5, 0.0, "UTC"), Err(CalendarError::LatitudeOutOfRange));
    assert_eq!(Locale::new(0.0, -181.0, "UTC"), Err(CalendarError::LongitudeOutOfRange));
    assert_eq!(Locale::new(f64::NAN, 0.0, "UTC"), Err(CalendarError::LatitudeOutOfRange));
    assert_eq!(
        Locale::new(0.0, 0.0, "Mars/Olympus_Mons"),
        Err(CalendarError::UnknownTimezone("Mars/Olympus_Mons".into()))
    );
    assert_eq!(Locale::new(51.5, -0.12, "Europe/London").unwrap().timezone, Tz::Europe__London);
}
