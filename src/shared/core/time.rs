// Duration and calendar helpers shared by the aggregation and invoice code.
//
// Instants are milliseconds since the Unix epoch. Calendar questions (which
// day, which week) are always answered in an explicit time zone so callers
// can pin it in tests and use the host zone in production.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

pub fn ms_to_hours(ms: i64) -> f64 {
    ms as f64 / MS_PER_HOUR as f64
}

/// Formats a duration as `HH:MM:SS`. Sub-second remainders are dropped and
/// the hour field grows past two digits when needed.
pub fn format_duration(ms: i64) -> String {
    let total_seconds = ms.max(0) / MS_PER_SECOND;
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Parses the output of [`format_duration`] back into milliseconds.
pub fn parse_duration(text: &str) -> Option<i64> {
    let mut parts = text.split(':');
    let hours: i64 = parts.next()?.parse().ok()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    let seconds: i64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if hours < 0 || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return None;
    }
    Some((hours * 3_600 + minutes * 60 + seconds) * MS_PER_SECOND)
}

pub fn to_utc(instant_ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(instant_ms).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Calendar day of `instant_ms` as seen from `tz`.
pub fn local_date<Tz: TimeZone>(instant_ms: i64, tz: &Tz) -> NaiveDate {
    to_utc(instant_ms).with_timezone(tz).date_naive()
}

/// The Sunday that opens the Sunday to Saturday week containing `instant_ms`.
pub fn week_key<Tz: TimeZone>(instant_ms: i64, tz: &Tz) -> NaiveDate {
    let date = local_date(instant_ms, tz);
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Midnight in `tz` of the Sunday starting the week containing `instant_ms`.
pub fn week_start<Tz: TimeZone>(instant_ms: i64, tz: &Tz) -> i64 {
    local_midnight(week_key(instant_ms, tz), tz)
}

pub fn week_end(week_key: NaiveDate) -> NaiveDate {
    week_key + Duration::days(6)
}

pub fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    at_local_time(date, 0, 0, tz)
}

/// Instant of `hour:minute` on `date` in `tz`. Ambiguous wall times resolve
/// to the earlier instant; wall times skipped by a DST gap move one hour on.
pub fn at_local_time<Tz: TimeZone>(date: NaiveDate, hour: u32, minute: u32, tz: &Tz) -> i64 {
    let naive = date
        .and_hms_opt(hour, minute, 0)
        .unwrap_or_else(|| date.and_time(Default::default()));
    resolve_local(naive, tz)
}

fn resolve_local<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> i64 {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(at) => at.timestamp_millis(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|at| at.timestamp_millis())
            .unwrap_or_else(|| naive.and_utc().timestamp_millis()),
    }
}

/// `M/D/YYYY`, the short date style printed on invoices.
pub fn short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}
