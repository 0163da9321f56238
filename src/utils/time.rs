use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Converts a local wall-clock time to UTC.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant; times
/// skipped by a DST jump move forward past the gap.
pub fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    resolve_in(&Local, naive)
}

fn resolve_in<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

pub fn local_midnight(day: NaiveDate) -> DateTime<Utc> {
    local_to_utc(day.and_time(NaiveTime::MIN))
}

/// Half-open `[midnight, next midnight)` window of a local calendar day.
pub fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let next = day.succ_opt().unwrap_or(day);
    (local_midnight(day), local_midnight(next))
}

pub fn local_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// Which end of a date-range query a bound is for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Bound {
    Start,
    End,
}

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
///
/// A bare date is widened to the whole local day: start of day for
/// [`Bound::Start`], last representable instant of the day for [`Bound::End`].
pub fn parse_bound(value: &str, bound: Bound) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(local_to_utc(naive));
    }
    let day = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    Some(match bound {
        Bound::Start => local_midnight(day),
        Bound::End => day_bounds(day).1 - Duration::nanoseconds(1),
    })
}
