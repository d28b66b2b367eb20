use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::state::Fixture;

/// Fixtures keyed by local calendar date (`YYYY-MM-DD`). Each day is in
/// kickoff order; the map iterates days in ascending order.
pub type GroupedFixtures = BTreeMap<String, Vec<Fixture>>;

/// Day key for fixtures whose kickoff cannot be parsed. Sorts after every
/// real date.
pub const UNSCHEDULED_KEY: &str = "TBD";

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%d %H:%M%#z"];

/// Groups fixtures by the machine's local calendar date.
pub fn group_fixtures(fixtures: Vec<Fixture>) -> GroupedFixtures {
    group_fixtures_in(&Local, fixtures)
}

/// Sorts by kickoff (stable, unparseable kickoffs last) and folds into day
/// buckets using `tz` for the calendar. Days are truncated in `tz`, not UTC,
/// so the same instant can land on different keys in different zones.
pub fn group_fixtures_in<Tz: TimeZone>(tz: &Tz, fixtures: Vec<Fixture>) -> GroupedFixtures {
    let mut keyed: Vec<(Option<DateTime<Tz>>, Fixture)> = fixtures
        .into_iter()
        .map(|fixture| (parse_kickoff(tz, &fixture.kickoff), fixture))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| a.is_none().cmp(&b.is_none()).then_with(|| a.cmp(b)));

    keyed
        .into_iter()
        .fold(GroupedFixtures::new(), |mut acc, (kickoff, fixture)| {
            let key = kickoff
                .as_ref()
                .map(date_key)
                .unwrap_or_else(|| UNSCHEDULED_KEY.to_string());
            acc.entry(key).or_default().push(fixture);
            acc
        })
}

pub fn date_key<Tz: TimeZone>(kickoff: &DateTime<Tz>) -> String {
    format!(
        "{}-{:02}-{:02}",
        kickoff.year(),
        kickoff.month(),
        kickoff.day()
    )
}

/// Parses a provider kickoff into `tz`.
///
/// Accepted shapes: RFC 3339 / offset-suffixed timestamps (converted), offset-
/// less date-times (read as wall time in `tz`), bare dates (UTC midnight).
pub fn parse_kickoff<Tz: TimeZone>(tz: &Tz, raw: &str) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(tz));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return wall_time_in(tz, naive);
        }
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(tz))
}

fn wall_time_in<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest().or_else(|| {
        // Wall time inside a DST gap: roll forward past it.
        tz.from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
    })
}

/// `HH:MM` of the kickoff on the local clock.
pub fn kickoff_time_label(fixture: &Fixture) -> String {
    kickoff_time_label_in(&Local, fixture)
}

pub fn kickoff_time_label_in<Tz: TimeZone>(tz: &Tz, fixture: &Fixture) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match parse_kickoff(tz, &fixture.kickoff) {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn parse_kickoff_accepts_provider_shapes() {
        let utc = Utc;
        let expect = Utc.with_ymd_and_hms(2024, 5, 10, 14, 0, 0).unwrap();
        assert_eq!(parse_kickoff(&utc, "2024-05-10T14:00:00Z"), Some(expect));
        assert_eq!(parse_kickoff(&utc, "2024-05-10T14:00"), Some(expect));
        assert_eq!(parse_kickoff(&utc, "2024-05-10 14:00:00"), Some(expect));
        assert_eq!(parse_kickoff(&utc, "2024-05-10 16:00:00+02"), Some(expect));
        assert_eq!(
            parse_kickoff(&utc, "2024-05-10"),
            Some(Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_kickoff(&utc, "kickoff soon"), None);
        assert_eq!(parse_kickoff(&utc, "  "), None);
    }

    #[test]
    fn offset_timestamps_convert_but_wall_times_do_not() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let converted = parse_kickoff(&tz, "2024-05-09T23:30:00Z").unwrap();
        assert_eq!(date_key(&converted), "2024-05-10");
        let wall = parse_kickoff(&tz, "2024-05-09T23:30").unwrap();
        assert_eq!(date_key(&wall), "2024-05-09");
    }

    #[test]
    fn date_key_zero_pads() {
        let dt = Utc.with_ymd_and_hms(2025, 1, 3, 9, 5, 0).unwrap();
        assert_eq!(date_key(&dt), "2025-01-03");
    }
}
