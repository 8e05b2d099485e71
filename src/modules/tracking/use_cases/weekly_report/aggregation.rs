// Derived aggregates over the flat time entry log.
//
// Everything here is pure: callers fetch projects, entries and the active
// timer from the store and pass them in. Entries pointing at a project that
// no longer exists are skipped without error.
//
// Earnings use the project's current hourly rate, so changing a rate
// re-prices every past week. Nothing is rounded here; presentation rounds.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, TimeZone};
use indexmap::IndexMap;
use serde::Serialize;

use crate::modules::tracking::core::project::Project;
use crate::modules::tracking::core::time_entry::TimeEntry;
use crate::modules::tracking::core::timer::ActiveTimer;
use crate::shared::core::time::{format_duration, ms_to_hours, week_end, week_key, local_midnight};

/// Per project rollup inside one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAggregate {
    pub project_id: String,
    pub name: String,
    pub hourly_rate: f64,
    pub duration_ms: i64,
    pub earnings: f64,
}

impl ProjectAggregate {
    pub fn hours(&self) -> f64 {
        ms_to_hours(self.duration_ms)
    }
}

/// All entries starting in one Sunday to Saturday week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekBucket {
    /// ISO date of the Sunday opening the week.
    pub week_key: NaiveDate,
    /// Midnight of that Sunday, in ms since the epoch.
    pub week_start: i64,
    /// Keyed by project id, in order of first appearance in the entry log.
    pub projects: IndexMap<String, ProjectAggregate>,
    pub total_duration_ms: i64,
    pub total_hours: f64,
    pub total_earnings: f64,
}

impl WeekBucket {
    fn empty(week_key: NaiveDate, week_start: i64) -> Self {
        Self {
            week_key,
            week_start,
            projects: IndexMap::new(),
            total_duration_ms: 0,
            total_hours: 0.0,
            total_earnings: 0.0,
        }
    }

    pub fn week_end(&self) -> NaiveDate {
        week_end(self.week_key)
    }

    fn add(&mut self, project: &Project, entry: &TimeEntry) {
        let hours = ms_to_hours(entry.duration_ms);
        let earnings = hours * project.hourly_rate;

        let aggregate = self
            .projects
            .entry(project.id.clone())
            .or_insert_with(|| ProjectAggregate {
                project_id: project.id.clone(),
                name: project.name.clone(),
                hourly_rate: project.hourly_rate,
                duration_ms: 0,
                earnings: 0.0,
            });
        aggregate.duration_ms += entry.duration_ms;
        aggregate.earnings += earnings;

        self.total_duration_ms += entry.duration_ms;
        self.total_hours += hours;
        self.total_earnings += earnings;
    }
}

/// Logged time for a project, plus the running timer's elapsed time when
/// the timer belongs to that project.
pub fn project_total_duration(
    project_id: &str,
    entries: &[TimeEntry],
    active_timer: Option<&ActiveTimer>,
    now: i64,
) -> i64 {
    let logged: i64 = entries
        .iter()
        .filter(|e| e.project_id == project_id)
        .map(|e| e.duration_ms)
        .sum();
    match active_timer {
        Some(timer) if timer.project_id == project_id => logged + timer.elapsed_ms(now),
        _ => logged,
    }
}

/// `hours(total) * rate`; 0 for an unknown project or one without a rate.
pub fn project_earnings(
    project_id: &str,
    projects: &[Project],
    entries: &[TimeEntry],
    active_timer: Option<&ActiveTimer>,
    now: i64,
) -> f64 {
    let Some(project) = projects.iter().find(|p| p.id == project_id) else {
        return 0.0;
    };
    if project.hourly_rate == 0.0 {
        return 0.0;
    }
    ms_to_hours(project_total_duration(project_id, entries, active_timer, now)) * project.hourly_rate
}

pub fn build_weekly_report<Tz: TimeZone>(
    entries: &[TimeEntry],
    projects: &[Project],
    tz: &Tz,
) -> Vec<WeekBucket> {
    let projects_by_id: HashMap<&str, &Project> =
        projects.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut weeks: BTreeMap<NaiveDate, WeekBucket> = BTreeMap::new();

    for entry in entries {
        let Some(project) = projects_by_id.get(entry.project_id.as_str()) else {
            continue;
        };
        let key = week_key(entry.start_time, tz);
        weeks
            .entry(key)
            .or_insert_with(|| WeekBucket::empty(key, local_midnight(key, tz)))
            .add(project, entry);
    }

    weeks.into_values().rev().collect()
}

/// Live totals for one project, as listed next to its timer controls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: Project,
    pub total_duration_ms: i64,
    pub total_duration: String,
    pub total_hours: f64,
    pub earnings: f64,
    pub is_running: bool,
}

pub fn summarize_projects(
    projects: &[Project],
    entries: &[TimeEntry],
    active_timer: Option<&ActiveTimer>,
    now: i64,
) -> Vec<ProjectSummary> {
    projects
        .iter()
        .map(|project| {
            let total = project_total_duration(&project.id, entries, active_timer, now);
            ProjectSummary {
                project: project.clone(),
                total_duration_ms: total,
                total_duration: format_duration(total),
                total_hours: ms_to_hours(total),
                earnings: project_earnings(&project.id, projects, entries, active_timer, now),
                is_running: active_timer.is_some_and(|t| t.project_id == project.id),
            }
        })
        .collect()
}

#[cfg(test)]
mod weekly_aggregation_tests {
    use super::*;
    use crate::tests::fixtures::{
        NINETY_MINUTES, PREVIOUS_WEDNESDAY_10_AM, PROJECT_ID, ProjectBuilder, TimeEntryBuilder,
        WEDNESDAY_10_AM, WEEK_START,
    };
    use chrono::Utc;
    use rstest::{fixture, rstest};

    const TOLERANCE: f64 = 1e-9;

    #[fixture]
    fn project_p() -> Project {
        ProjectBuilder::new().build()
    }

    #[fixture]
    fn project_q() -> Project {
        ProjectBuilder::new()
            .id("project-q")
            .name("Mobile app")
            .hourly_rate(80.0)
            .build()
    }

    #[rstest]
    fn it_should_total_and_price_a_single_entry(project_p: Project) {
        let entries = vec![TimeEntryBuilder::new().duration(5_400_000).build()];
        let projects = vec![project_p];

        assert_eq!(project_total_duration(PROJECT_ID, &entries, None, 0), 5_400_000);
        let earnings = project_earnings(PROJECT_ID, &projects, &entries, None, 0);
        assert!((earnings - 75.0).abs() < TOLERANCE);
    }

    #[rstest]
    fn it_should_include_the_running_timer_in_live_totals() {
        let entries = vec![TimeEntryBuilder::new().build()];
        let timer = ActiveTimer {
            project_id: PROJECT_ID.into(),
            start_time: 1_000,
        };
        let early = project_total_duration(PROJECT_ID, &entries, Some(&timer), 2_000);
        let later = project_total_duration(PROJECT_ID, &entries, Some(&timer), 62_000);
        assert_eq!(early, NINETY_MINUTES + 1_000);
        assert!(later > early);
        assert_eq!(
            project_total_duration("other", &entries, Some(&timer), 62_000),
            0
        );
    }

    #[rstest]
    fn it_should_earn_nothing_without_a_rate_or_a_project(project_p: Project) {
        let entries = vec![TimeEntryBuilder::new().build()];
        let free = ProjectBuilder::new().hourly_rate(0.0).build();
        assert_eq!(project_earnings(PROJECT_ID, &[free], &entries, None, 0), 0.0);
        assert_eq!(project_earnings("missing", &[project_p], &entries, None, 0), 0.0);
    }

    #[rstest]
    fn it_should_group_two_projects_of_one_week_into_one_bucket(
        project_p: Project,
        project_q: Project,
    ) {
        let entries = vec![
            TimeEntryBuilder::new().id("te-1").duration(NINETY_MINUTES).build(),
            TimeEntryBuilder::new()
                .id("te-2")
                .project_id("project-q")
                .span(WEDNESDAY_10_AM + 86_400_000, WEDNESDAY_10_AM + 86_400_000 + 3_600_000)
                .build(),
        ];
        let report = build_weekly_report(&entries, &[project_p, project_q], &Utc);

        assert_eq!(report.len(), 1);
        let week = &report[0];
        assert_eq!(week.week_key, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(week.week_start, WEEK_START);
        assert_eq!(week.projects.len(), 2);
        assert!((week.projects[PROJECT_ID].earnings - 75.0).abs() < TOLERANCE);
        assert!((week.projects["project-q"].earnings - 80.0).abs() < TOLERANCE);
        assert!((week.total_earnings - 155.0).abs() < TOLERANCE);
        assert_eq!(week.total_duration_ms, NINETY_MINUTES + 3_600_000);
    }

    #[rstest]
    fn it_should_keep_week_totals_equal_to_the_sum_of_their_projects(
        project_p: Project,
        project_q: Project,
    ) {
        let entries: Vec<_> = (0..7)
            .map(|i| {
                TimeEntryBuilder::new()
                    .id(format!("te-{i}"))
                    .project_id(if i % 2 == 0 { PROJECT_ID } else { "project-q" })
                    .span(
                        PREVIOUS_WEDNESDAY_10_AM + i * 86_400_000,
                        PREVIOUS_WEDNESDAY_10_AM + i * 86_400_000 + 1_234_567 * (i + 1),
                    )
                    .build()
            })
            .collect();
        let report = build_weekly_report(&entries, &[project_p, project_q], &Utc);

        assert_eq!(report.len(), 2);
        for week in &report {
            let earnings: f64 = week.projects.values().map(|p| p.earnings).sum();
            let hours: f64 = week.projects.values().map(|p| p.hours()).sum();
            let duration: i64 = week.projects.values().map(|p| p.duration_ms).sum();
            assert!((week.total_earnings - earnings).abs() < TOLERANCE);
            assert!((week.total_hours - hours).abs() < TOLERANCE);
            assert_eq!(week.total_duration_ms, duration);
        }
    }

    #[rstest]
    fn it_should_order_weeks_most_recent_first(project_p: Project) {
        let entries = vec![
            TimeEntryBuilder::new()
                .id("older")
                .span(PREVIOUS_WEDNESDAY_10_AM, PREVIOUS_WEDNESDAY_10_AM + 60_000)
                .build(),
            TimeEntryBuilder::new().id("newer").build(),
        ];
        let report = build_weekly_report(&entries, &[project_p], &Utc);
        let keys: Vec<_> = report.iter().map(|w| w.week_key.to_string()).collect();
        assert_eq!(keys, vec!["2024-03-10", "2024-03-03"]);
    }

    #[rstest]
    fn it_should_skip_entries_of_deleted_projects_without_creating_buckets(project_p: Project) {
        let entries = vec![
            TimeEntryBuilder::new().id("kept").build(),
            TimeEntryBuilder::new()
                .id("stale")
                .project_id("deleted-project")
                .span(PREVIOUS_WEDNESDAY_10_AM, PREVIOUS_WEDNESDAY_10_AM + 60_000)
                .build(),
        ];
        let report = build_weekly_report(&entries, &[project_p], &Utc);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].projects.len(), 1);
        assert!(build_weekly_report(&entries, &[], &Utc).is_empty());
    }

    #[rstest]
    fn it_should_reprice_past_weeks_when_the_rate_changes(project_p: Project) {
        let entries = vec![TimeEntryBuilder::new().build()];
        let before = build_weekly_report(&entries, &[project_p.clone()], &Utc);
        let repriced = Project {
            hourly_rate: 100.0,
            ..project_p
        };
        let after = build_weekly_report(&entries, &[repriced], &Utc);
        assert!((before[0].total_earnings - 75.0).abs() < TOLERANCE);
        assert!((after[0].total_earnings - 150.0).abs() < TOLERANCE);
        assert_eq!(after[0].projects[PROJECT_ID].hourly_rate, 100.0);
    }

    #[rstest]
    fn it_should_keep_projects_in_first_seen_order(project_p: Project, project_q: Project) {
        let entries = vec![
            TimeEntryBuilder::new().id("q-first").project_id("project-q").build(),
            TimeEntryBuilder::new().id("p-second").build(),
            TimeEntryBuilder::new().id("q-again").project_id("project-q").build(),
        ];
        let report = build_weekly_report(&entries, &[project_p, project_q], &Utc);
        let order: Vec<_> = report[0].projects.keys().cloned().collect();
        assert_eq!(order, vec!["project-q", PROJECT_ID]);
    }

    #[rstest]
    fn it_should_summarize_projects_with_live_totals(project_p: Project, project_q: Project) {
        let entries = vec![TimeEntryBuilder::new().build()];
        let timer = ActiveTimer {
            project_id: "project-q".into(),
            start_time: 0,
        };
        let summaries =
            summarize_projects(&[project_p, project_q], &entries, Some(&timer), 1_800_000);

        assert_eq!(summaries[0].total_duration, "01:30:00");
        assert!(!summaries[0].is_running);
        assert!(summaries[1].is_running);
        assert_eq!(summaries[1].total_duration_ms, 1_800_000);
        assert!((summaries[1].earnings - 40.0).abs() < TOLERANCE);
    }
}
