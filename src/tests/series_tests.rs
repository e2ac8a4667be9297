use std::string::ToString;
use std::vec::Vec;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use proptest::prelude::*;

use super::{assert_close_instant, utc, NanPhaseEphemeris};
use crate::{
    generate_daily_series, lookup_city, time::local_date, CalendarError, MajorPhase, MeeusEphemeris, MoonCalendar,
    SeriesOptions, CITIES, SYNODIC_MONTH_DAYS,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn new_york_january_2025() {
    let records = generate_daily_series("New York", "20250101", "20250131").unwrap();
    assert_eq!(records.len(), 31);

    let wraps = records
        .windows(2)
        .filter(|pair| pair[1].moon_age_days <= pair[0].moon_age_days)
        .count();
    assert_eq!(wraps, 1, "age must increase every day except at one New Moon");

    // New Moon 2025-01-29 12:36 UTC: the wrap is between the 29th and 30th.
    assert!(records[28].moon_age_days > records[29].moon_age_days);
    assert_eq!(records[0].city, "New York");
    assert_eq!(records[0].latitude, 40.7128);
    assert_eq!(records[0].longitude, -74.0060);

    // 2025-01-01T00:00Z is still New Year's Eve in New York.
    assert_eq!(records[0].local_date, date(2024, 12, 31));
}

#[test]
fn melbourne_phases_follow_local_dates() {
    let records = generate_daily_series("Melbourne", "20250101", "20250131").unwrap();
    let phase_days: Vec<(NaiveDate, MajorPhase)> = records
        .iter()
        .filter_map(|record| record.major_phase.map(|phase| (record.local_date, phase)))
        .collect();

    assert_eq!(
        phase_days,
        [
            (date(2025, 1, 7), MajorPhase::FirstQuarter),
            (date(2025, 1, 14), MajorPhase::FullMoon),
            (date(2025, 1, 22), MajorPhase::LastQuarter),
            (date(2025, 1, 29), MajorPhase::NewMoon),
        ]
    );

    let first = &records[0];
    assert_eq!(first.next_major_phase.name, Some(MajorPhase::FirstQuarter));
    assert_close_instant(first.next_major_phase.instant_utc.unwrap(), utc(2025, 1, 6, 23, 56), 60);
}

#[test]
fn december_tail_has_no_next_phase_without_lookahead() {
    // Last quarter event of 2025 is the First Quarter of 27 December.
    let records = generate_daily_series("Tokyo", "20251225", "20251231").unwrap();
    let missing: Vec<NaiveDate> = records
        .iter()
        .filter(|record| record.next_major_phase.name.is_none())
        .map(|record| record.instant_utc.date_naive())
        .collect();
    assert_eq!(missing, [date(2025, 12, 28), date(2025, 12, 29), date(2025, 12, 30), date(2025, 12, 31)]);
    assert!(records
        .iter()
        .all(|record| record.next_major_phase.name.is_some() == record.next_major_phase.instant_utc.is_some()));

    let calendar = MoonCalendar::new(MeeusEphemeris::default()).with_options(SeriesOptions { lookahead_days: 14 });
    let records = calendar.generate_daily_series("Tokyo", "20251225", "20251231").unwrap();
    assert!(records.iter().all(|record| record.next_major_phase.name.is_some()));
    assert_eq!(records[6].next_major_phase.name, Some(MajorPhase::FullMoon));
}

#[test]
fn range_errors() {
    assert!(matches!(
        generate_daily_series("Melbourne", "20250201", "20250101"),
        Err(CalendarError::InvalidRange(_))
    ));
    assert!(matches!(
        generate_daily_series("Melbourne", "2025-01-01", "20250101"),
        Err(CalendarError::InvalidRange(_))
    ));
    assert!(matches!(
        generate_daily_series("Melbourne", "20250101", "20250230"),
        Err(CalendarError::InvalidRange(_))
    ));
    assert_eq!(
        generate_daily_series("Gotham", "20250101", "20250102"),
        Err(CalendarError::UnknownCity("Gotham".into()))
    );
}

#[test]
fn lookahead_past_the_calendar_is_an_error() {
    let calendar = MoonCalendar::new(MeeusEphemeris::default()).with_options(SeriesOptions {
        lookahead_days: u32::MAX,
    });
    assert!(matches!(
        calendar.generate_daily_series("Tokyo", "20251225", "20251231"),
        Err(CalendarError::InvalidRange(_))
    ));
}

#[test]
fn snapshot_at_the_ends_of_time() {
    let calendar = MoonCalendar::<MeeusEphemeris>::default();
    for instant in [DateTime::<Utc>::MIN_UTC, DateTime::<Utc>::MAX_UTC] {
        assert_eq!(
            calendar.snapshot("Melbourne", &instant),
            Err(CalendarError::EphemerisUnavailable(instant))
        );
    }
}

#[test]
fn single_day_range() {
    let records = generate_daily_series("London", "20250314", "20250314").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].instant_utc, utc(2025, 3, 14, 0, 0));
    assert_eq!(records[0].major_phase, Some(MajorPhase::FullMoon));
}

#[test]
fn invalid_samples_are_not_masked() {
    let calendar = MoonCalendar::new(NanPhaseEphemeris);
    let result = calendar.generate_daily_series("Cape Town", "20250101", "20250103");
    assert_eq!(result, Err(CalendarError::EphemerisUnavailable(utc(2025, 1, 1, 0, 0))));
}

#[test]
fn records_serialize_with_wire_field_names() {
    let records = generate_daily_series("Melbourne", "20250114", "20250114").unwrap();
    let json = serde_json::to_value(&records[0]).unwrap();
    let object = json.as_object().unwrap();

    for key in [
        "city",
        "date_utc",
        "date_local",
        "illuminated_fraction",
        "is_waxing",
        "latitude",
        "longitude",
        "major_phase",
        "moon_age_days",
        "next_major_phase",
    ] {
        assert!(object.contains_key(key), "missing {key}");
    }
    assert!(json["date_utc"].as_str().unwrap().starts_with("2025-01-14T00:00:00"));
    assert_eq!(json["date_local"], "2025-01-14");
    assert_eq!(json["major_phase"], "Full Moon");
    assert_eq!(json["next_major_phase"]["name"], "Last Quarter");
    assert!(json["next_major_phase"]["date_utc"].is_string());

    let empty = serde_json::to_value(crate::NextMajorPhase::default()).unwrap();
    assert!(empty["name"].is_null() && empty["date_utc"].is_null());
}

#[test]
fn snapshot_brackets_instant_with_new_moons() {
    let calendar = MoonCalendar::<MeeusEphemeris>::default();
    let instant = utc(2025, 1, 20, 12, 0);
    let snapshot = calendar.snapshot("Melbourne", &instant).unwrap();

    assert_eq!(snapshot.local_date, date(2025, 1, 20));
    assert!(!snapshot.is_waxing);
    assert_eq!(snapshot.major_phase, None);
    assert_eq!(snapshot.next_major_phase.name, Some(MajorPhase::LastQuarter));
    assert_close_instant(snapshot.next_major_phase.instant_utc.unwrap(), utc(2025, 1, 21, 20, 31), 60);
    assert_close_instant(snapshot.previous_new_moon.unwrap(), utc(2024, 12, 30, 22, 27), 60);
    assert_close_instant(snapshot.next_new_moon.unwrap(), utc(2025, 1, 29, 12, 36), 60);

    let age_from_new_moon = (instant - snapshot.previous_new_moon.unwrap()).num_seconds() as f64 / 86_400.0;
    assert!((snapshot.moon_age_days - age_from_new_moon).abs() < 1.0);
}

#[test]
fn snapshot_unknown_city_lists_alternatives() {
    let error = MoonCalendar::<MeeusEphemeris>::default()
        .snapshot("Paris", &utc(2025, 1, 1, 0, 0))
        .unwrap_err();
    let message = error.to_string();
    assert!(message.contains("Paris"));
    for city in CITIES {
        assert!(message.contains(city.name), "{message}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn generated_series_invariants(
        city in 0usize..CITIES.len(),
        start_offset in 0i64..(365 * 40),
        span in 0i64..70,
    ) {
        let city = CITIES[city];
        let from = date(2000, 1, 1) + Duration::days(start_offset);
        let to = from + Duration::days(span);
        let calendar = MoonCalendar::<MeeusEphemeris>::default();
        let records = calendar
            .generate_daily_series(city.name, &from.format("%Y%m%d").to_string(), &to.format("%Y%m%d").to_string())
            .unwrap();

        prop_assert_eq!(records.len() as i64, span + 1);
        for (offset, record) in records.iter().enumerate() {
            prop_assert_eq!(record.instant_utc.date_naive(), from + Duration::days(offset as i64));
            prop_assert!(record.moon_age_days >= 0.0 && record.moon_age_days < SYNODIC_MONTH_DAYS);
            prop_assert!((0.0..=1.0).contains(&record.illuminated_fraction));
            prop_assert_eq!(record.is_waxing, record.moon_age_days < SYNODIC_MONTH_DAYS / 2.0);
        }

        let locale = lookup_city(city.name).unwrap();
        let index = calendar.major_phases(locale.timezone, from.year(), to.year()).unwrap();
        for record in &records {
            let local = local_date(&record.instant_utc, locale.timezone);
            prop_assert_eq!(record.local_date, local);
            prop_assert_eq!(record.major_phase, index.phase_on(local));

            match (record.next_major_phase.name, record.next_major_phase.instant_utc) {
                (Some(kind), Some(instant)) => {
                    prop_assert!(instant > record.instant_utc);
                    let earlier = index
                        .events()
                        .iter()
                        .any(|event| event.instant_utc > record.instant_utc && event.instant_utc < instant);
                    prop_assert!(!earlier);
                    prop_assert!(index.events().iter().any(|event| event.instant_utc == instant && event.kind == kind));
                }
                (None, None) => {
                    prop_assert!(index.events().iter().all(|event| event.instant_utc <= record.instant_utc));
                }
                other => prop_assert!(false, "inconsistent next phase {:?}", other),
            }
        }
    }

    #[test]
    fn waxing_days_mostly_brighten(start_offset in 0i64..(365 * 30)) {
        let from = date(2000, 1, 1) + Duration::days(start_offset);
        let calendar = MoonCalendar::<MeeusEphemeris>::default();
        let records = calendar
            .daily_series_for_locale("Cape Town", &lookup_city("Cape Town").unwrap(), from, from + Duration::days(59))
            .unwrap();

        let waxing_pairs: Vec<_> = records
            .windows(2)
            .filter(|pair| pair[0].is_waxing && pair[1].is_waxing)
            .collect();
        let brightening = waxing_pairs
            .iter()
            .filter(|pair| pair[1].illuminated_fraction > pair[0].illuminated_fraction)
            .count();
        prop_assert!(!waxing_pairs.is_empty());
        prop_assert!(brightening * 10 >= waxing_pairs.len() * 9, "{} of {}", brightening, waxing_pairs.len());
    }
}
