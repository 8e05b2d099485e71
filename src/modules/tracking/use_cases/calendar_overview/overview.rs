use chrono::{Datelike, Days, Months, NaiveDate, TimeZone};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::modules::tracking::core::project::Project;
use crate::modules::tracking::core::time_entry::TimeEntry;
use crate::shared::core::time::{local_date, ms_to_hours};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("{year}-{month:02} is not a calendar month")]
    InvalidMonth { year: i32, month: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotal {
    pub date: NaiveDate,
    pub entry_count: usize,
    pub total_duration_ms: i64,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthOverview {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    /// Weekday of the 1st, 0 = Sunday.
    pub first_weekday: u32,
    pub days: Vec<DayTotal>,
}

/// Entries whose project no longer exists are left out of every view.
fn with_known_project<'a>(
    entries: &'a [TimeEntry],
    projects: &[Project],
) -> impl Iterator<Item = &'a TimeEntry> {
    let known: HashSet<String> = projects.iter().map(|p| p.id.clone()).collect();
    entries
        .iter()
        .filter(move |e| known.contains(&e.project_id))
}

/// One row per day of the month, counting entries by the local day they
/// started on.
pub fn month_overview<Tz: TimeZone>(
    year: i32,
    month: u32,
    entries: &[TimeEntry],
    projects: &[Project],
    tz: &Tz,
) -> Result<MonthOverview, CalendarError> {
    let invalid = || CalendarError::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = first.checked_add_months(Months::new(1)).ok_or_else(invalid)?;
    let days_in_month = next.signed_duration_since(first).num_days() as u32;

    let mut per_day: HashMap<NaiveDate, (usize, i64)> = HashMap::new();
    for entry in with_known_project(entries, projects) {
        let day = local_date(entry.start_time, tz);
        if day < first || day >= next {
            continue;
        }
        let slot = per_day.entry(day).or_default();
        slot.0 += 1;
        slot.1 += entry.duration_ms;
    }

    let days = (0..days_in_month)
        .filter_map(|offset| first.checked_add_days(Days::new(offset.into())))
        .map(|date| {
            let (entry_count, total_duration_ms) = per_day.get(&date).copied().unwrap_or_default();
            DayTotal {
                date,
                entry_count,
                total_duration_ms,
                total_hours: ms_to_hours(total_duration_ms),
            }
        })
        .collect();

    Ok(MonthOverview {
        year,
        month,
        days_in_month,
        first_weekday: first.weekday().num_days_from_sunday(),
        days,
    })
}

/// Entries that started on `date` in `tz`, in input order.
pub fn entries_on<Tz: TimeZone>(
    date: NaiveDate,
    entries: &[TimeEntry],
    projects: &[Project],
    tz: &Tz,
) -> Vec<TimeEntry> {
    with_known_project(entries, projects)
        .filter(|e| local_date(e.start_time, tz) == date)
        .cloned()
        .collect()
}

#[cfg(test)]
mod calendar_overview_tests {
    use super::*;
    use crate::tests::fixtures::{NINETY_MINUTES, ProjectBuilder, TimeEntryBuilder, WEDNESDAY_10_AM};
    use chrono::{FixedOffset, Utc};
    use rstest::{fixture, rstest};

    const HOUR: i64 = 3_600_000;

    #[fixture]
    fn projects() -> Vec<Project> {
        vec![ProjectBuilder::new().build()]
    }

    #[fixture]
    fn entries() -> Vec<TimeEntry> {
        vec![
            TimeEntryBuilder::new().id("a").build(),
            TimeEntryBuilder::new()
                .id("b")
                .span(WEDNESDAY_10_AM + 2 * HOUR, WEDNESDAY_10_AM + 3 * HOUR)
                .build(),
            // 2024-03-14 23:30 UTC
            TimeEntryBuilder::new()
                .id("c")
                .span(WEDNESDAY_10_AM + 37 * HOUR + HOUR / 2, WEDNESDAY_10_AM + 38 * HOUR)
                .build(),
            // 2024-04-01 10:00 UTC
            TimeEntryBuilder::new()
                .id("d")
                .span(WEDNESDAY_10_AM + 19 * 24 * HOUR, WEDNESDAY_10_AM + 19 * 24 * HOUR + HOUR)
                .build(),
        ]
    }

    #[rstest]
    #[case(2024, 2, 29, 4)]
    #[case(2023, 2, 28, 3)]
    #[case(2024, 3, 31, 5)]
    #[case(2024, 12, 31, 0)]
    fn it_should_describe_the_month_grid(
        #[case] year: i32,
        #[case] month: u32,
        #[case] days: u32,
        #[case] first_weekday: u32,
    ) {
        let overview = month_overview(year, month, &[], &[], &Utc).unwrap();
        assert_eq!(overview.days_in_month, days);
        assert_eq!(overview.first_weekday, first_weekday);
        assert_eq!(overview.days.len() as u32, days);
    }

    #[rstest]
    fn it_should_total_entries_per_day(entries: Vec<TimeEntry>, projects: Vec<Project>) {
        let overview = month_overview(2024, 3, &entries, &projects, &Utc).unwrap();
        let wednesday = &overview.days[12];
        assert_eq!(wednesday.date, NaiveDate::from_ymd_opt(2024, 3, 13).unwrap());
        assert_eq!(wednesday.entry_count, 2);
        assert_eq!(wednesday.total_duration_ms, NINETY_MINUTES + HOUR);
        assert!((wednesday.total_hours - 2.5).abs() < 1e-9);
        assert_eq!(overview.days[13].entry_count, 1);
        assert_eq!(overview.days.iter().map(|d| d.entry_count).sum::<usize>(), 3);
    }

    #[rstest]
    fn it_should_assign_entries_to_their_local_day(entries: Vec<TimeEntry>, projects: Vec<Project>) {
        let plus_one = FixedOffset::east_opt(3600).unwrap();
        let overview = month_overview(2024, 3, &entries, &projects, &plus_one).unwrap();
        assert_eq!(overview.days[13].entry_count, 0);
        assert_eq!(overview.days[14].entry_count, 1);
    }

    #[rstest]
    #[case(2024, 0)]
    #[case(2024, 13)]
    fn it_should_reject_months_outside_the_calendar(#[case] year: i32, #[case] month: u32) {
        assert_eq!(
            month_overview(year, month, &[], &[], &Utc),
            Err(CalendarError::InvalidMonth { year, month })
        );
    }

    #[rstest]
    fn it_should_pick_the_entries_of_one_day(entries: Vec<TimeEntry>, projects: Vec<Project>) {
        let day = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
        let ids: Vec<String> = entries_on(day, &entries, &projects, &Utc)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[rstest]
    fn it_should_skip_entries_of_deleted_projects(projects: Vec<Project>) {
        let entries = vec![
            TimeEntryBuilder::new().id("kept").build(),
            TimeEntryBuilder::new().id("orphan").project_id("gone").build(),
        ];
        let day = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();

        let overview = month_overview(2024, 3, &entries, &projects, &Utc).unwrap();
        assert_eq!(overview.days[12].entry_count, 1);
        assert_eq!(overview.days[12].total_duration_ms, NINETY_MINUTES);

        let ids: Vec<String> = entries_on(day, &entries, &projects, &Utc)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["kept"]);
    }
}
