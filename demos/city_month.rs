#![allow(missing_docs, clippy::unwrap_used)]
//! Prints a month of moon data for one city.
//!
//! ```text
//! RUST_LOG=debug cargo run --example city_month -- Melbourne 202501
//! ```
use chrono::{Datelike, Months, NaiveDate};
use lunar_calendar::{city_names, lookup_city, MeeusEphemeris, MoonCalendar, SeriesOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let city = args.next().unwrap_or_else(|| "Cape Town".to_string());
    let month = args.next().unwrap_or_else(|| "202501".to_string());

    let first = NaiveDate::parse_from_str(&format!("{month}01"), "%Y%m%d")
        .map_err(|_| format!("month must be YYYYMM, got {month:?}"))?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or("month out of range")?;

    let locale = match lookup_city(&city) {
        Ok(locale) => locale,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("Try one of: {}", city_names().collect::<Vec<_>>().join(", "));
            std::process::exit(1);
        }
    };

    // Look a month ahead so December still shows the next phase.
    let calendar = MoonCalendar::<MeeusEphemeris>::default().with_options(SeriesOptions { lookahead_days: 31 });
    let records = calendar.daily_series_for_locale(&city, &locale, first, last)?;

    println!("Moon calendar - {city}");
    println!("Location: {:.4}°, {:.4}° ({})", locale.latitude, locale.longitude, locale.timezone.name());
    println!("Month: {}", first.format("%B %Y"));
    println!("{:=<72}", "");
    println!("{:<12} {:>7} {:>7} {:<8} {:<14} {}", "Date", "Illum", "Age", "Trend", "Phase", "Next");

    for record in &records {
        let next = match (record.next_major_phase.name, record.next_major_phase.instant_utc) {
            (Some(name), Some(instant)) => format!(
                "{name} {}",
                instant.with_timezone(&locale.timezone).format("%d %b %H:%M")
            ),
            _ => "-".to_string(),
        };
        println!(
            "{:<12} {:>6.1}% {:>6.2}d {:<8} {:<14} {}",
            record.local_date.format("%a %d"),
            record.illuminated_fraction * 100.0,
            record.moon_age_days,
            if record.is_waxing { "waxing" } else { "waning" },
            record.major_phase.map(|phase| phase.to_string()).unwrap_or_default(),
            next,
        );
    }

    println!("{:=<72}", "");
    println!("{} days, starting {}", records.len(), first.weekday());
    Ok(())
}
