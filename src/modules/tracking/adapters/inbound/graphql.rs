use async_graphql::{Context, ErrorExtensions, ID, Object, Result as GqlResult, SimpleObject};

use crate::modules::tracking::core::project::Project;
use crate::modules::tracking::core::time_entry::TimeEntry;
use crate::modules::tracking::core::timer::ActiveTimer;
use crate::modules::tracking::errors::ApplicationError;
use crate::modules::tracking::use_cases::manage_projects::command::CreateProject;
use crate::modules::tracking::use_cases::manage_time_entries::command::RecordTimeEntry;
use crate::modules::tracking::use_cases::render_invoice::invoice::ClientDetails;
use crate::modules::tracking::use_cases::track_time::handler::{TimerOutcome, TimerStatus};
use crate::modules::tracking::use_cases::weekly_report::aggregation::{
    ProjectAggregate, ProjectSummary, WeekBucket,
};
use crate::shell::http::parse_day;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlProject {
    pub id: ID,
    pub name: String,
    pub hourly_rate: f64,
    pub created_at: i64,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
}

impl From<Project> for GqlProject {
    fn from(p: Project) -> Self {
        Self {
            id: ID(p.id),
            name: p.name,
            hourly_rate: p.hourly_rate,
            created_at: p.created_at,
            client_name: p.client_name,
            client_email: p.client_email,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlProjectSummary {
    pub project: GqlProject,
    pub total_duration_ms: i64,
    pub total_duration: String,
    pub total_hours: f64,
    pub earnings: f64,
    pub is_running: bool,
}

impl From<ProjectSummary> for GqlProjectSummary {
    fn from(s: ProjectSummary) -> Self {
        Self {
            project: s.project.into(),
            total_duration_ms: s.total_duration_ms,
            total_duration: s.total_duration,
            total_hours: s.total_hours,
            earnings: s.earnings,
            is_running: s.is_running,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlTimeEntry {
    pub id: ID,
    pub project_id: ID,
    pub start_time: i64,
    pub end_time: i64,
    pub duration_ms: i64,
    pub is_manual: bool,
    pub description: Option<String>,
}

impl From<TimeEntry> for GqlTimeEntry {
    fn from(e: TimeEntry) -> Self {
        Self {
            id: ID(e.id),
            project_id: ID(e.project_id),
            start_time: e.start_time,
            end_time: e.end_time,
            duration_ms: e.duration_ms,
            is_manual: e.is_manual,
            description: e.description,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlActiveTimer {
    pub project_id: ID,
    pub start_time: i64,
}

impl From<ActiveTimer> for GqlActiveTimer {
    fn from(t: ActiveTimer) -> Self {
        Self {
            project_id: ID(t.project_id),
            start_time: t.start_time,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlTimerStatus {
    pub project_id: ID,
    pub start_time: i64,
    pub elapsed_ms: i64,
    pub elapsed: String,
}

impl From<TimerStatus> for GqlTimerStatus {
    fn from(s: TimerStatus) -> Self {
        Self {
            project_id: ID(s.project_id),
            start_time: s.start_time,
            elapsed_ms: s.elapsed_ms,
            elapsed: s.elapsed,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlTimerOutcome {
    pub active: Option<GqlActiveTimer>,
    pub completed_entry: Option<GqlTimeEntry>,
}

impl From<TimerOutcome> for GqlTimerOutcome {
    fn from(o: TimerOutcome) -> Self {
        Self {
            active: o.active.map(Into::into),
            completed_entry: o.completed_entry.map(Into::into),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlWeekProject {
    pub project_id: ID,
    pub name: String,
    pub hourly_rate: f64,
    pub duration_ms: i64,
    pub hours: f64,
    pub earnings: f64,
}

impl From<ProjectAggregate> for GqlWeekProject {
    fn from(a: ProjectAggregate) -> Self {
        Self {
            hours: a.hours(),
            project_id: ID(a.project_id),
            name: a.name,
            hourly_rate: a.hourly_rate,
            duration_ms: a.duration_ms,
            earnings: a.earnings,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlWeek {
    /// Sunday starting the week, `YYYY-MM-DD`.
    pub week_key: String,
    pub week_start: i64,
    pub projects: Vec<GqlWeekProject>,
    pub total_duration_ms: i64,
    pub total_hours: f64,
    pub total_earnings: f64,
}

impl From<WeekBucket> for GqlWeek {
    fn from(w: WeekBucket) -> Self {
        Self {
            week_key: w.week_key.to_string(),
            week_start: w.week_start,
            projects: w.projects.into_values().map(Into::into).collect(),
            total_duration_ms: w.total_duration_ms,
            total_hours: w.total_hours,
            total_earnings: w.total_earnings,
        }
    }
}

fn gql_error(err: ApplicationError) -> async_graphql::Error {
    let code = match &err {
        ApplicationError::Validation(_) => "VALIDATION",
        ApplicationError::NotFound { .. } => "NOT_FOUND",
        ApplicationError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
    };
    (&err).extend_with(|_, ext| ext.set("code", code))
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn projects(&self, context: &Context<'_>) -> GqlResult<Vec<GqlProject>> {
        let state = context.data_unchecked::<AppState>();
        let projects = state.projects.list().await.map_err(gql_error)?;
        Ok(projects.into_iter().map(Into::into).collect())
    }

    async fn project_summaries(&self, context: &Context<'_>) -> GqlResult<Vec<GqlProjectSummary>> {
        let state = context.data_unchecked::<AppState>();
        let summaries = state.reports.project_summaries().await.map_err(gql_error)?;
        Ok(summaries.into_iter().map(Into::into).collect())
    }

    async fn time_entries(&self, context: &Context<'_>) -> GqlResult<Vec<GqlTimeEntry>> {
        let state = context.data_unchecked::<AppState>();
        let entries = state.entries.list().await.map_err(gql_error)?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    async fn active_timer(&self, context: &Context<'_>) -> GqlResult<Option<GqlTimerStatus>> {
        let state = context.data_unchecked::<AppState>();
        let status = state.timer.active().await.map_err(gql_error)?;
        Ok(status.map(Into::into))
    }

    async fn weekly_report(&self, context: &Context<'_>) -> GqlResult<Vec<GqlWeek>> {
        let state = context.data_unchecked::<AppState>();
        let weeks = state.reports.weekly_report().await.map_err(gql_error)?;
        Ok(weeks.into_iter().map(Into::into).collect())
    }

    /// HTML invoice for the week starting on `week_key`.
    async fn invoice(
        &self,
        context: &Context<'_>,
        week_key: String,
        client_name: Option<String>,
        client_email: Option<String>,
        invoice_number: Option<String>,
        notes: Option<String>,
    ) -> GqlResult<String> {
        let state = context.data_unchecked::<AppState>();
        let week_key = parse_day(&week_key).map_err(gql_error)?;
        let client = ClientDetails {
            client_name,
            client_email,
            invoice_number,
            notes,
        };
        let invoice = state
            .invoices
            .render(week_key, &client)
            .await
            .map_err(gql_error)?;
        Ok(invoice.html)
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_project(
        &self,
        context: &Context<'_>,
        name: String,
        hourly_rate: Option<f64>,
        client_name: Option<String>,
        client_email: Option<String>,
    ) -> GqlResult<GqlProject> {
        let state = context.data_unchecked::<AppState>();
        let command = CreateProject {
            name,
            hourly_rate,
            client_name,
            client_email,
        };
        let project = state.projects.create(command).await.map_err(gql_error)?;
        Ok(project.into())
    }

    async fn record_time_entry(
        &self,
        context: &Context<'_>,
        project_id: ID,
        start_time: i64,
        end_time: i64,
        description: Option<String>,
    ) -> GqlResult<GqlTimeEntry> {
        let state = context.data_unchecked::<AppState>();
        let command = RecordTimeEntry {
            project_id: project_id.0,
            start_time,
            end_time,
            description,
        };
        let entry = state.entries.record(command).await.map_err(gql_error)?;
        Ok(entry.into())
    }

    async fn start_timer(&self, context: &Context<'_>, project_id: ID) -> GqlResult<GqlTimerOutcome> {
        let state = context.data_unchecked::<AppState>();
        let outcome = state.timer.start(&project_id).await.map_err(gql_error)?;
        Ok(outcome.into())
    }

    async fn stop_timer(&self, context: &Context<'_>) -> GqlResult<Option<GqlTimeEntry>> {
        let state = context.data_unchecked::<AppState>();
        let entry = state.timer.stop().await.map_err(gql_error)?;
        Ok(entry.map(Into::into))
    }
}
