use chrono::{NaiveDate, TimeZone};
use std::sync::Arc;

use crate::modules::tracking::core::ports::TrackerStore;
use crate::modules::tracking::errors::ApplicationError;
use crate::modules::tracking::use_cases::weekly_report::aggregation::{
    ProjectSummary, WeekBucket, build_weekly_report, summarize_projects,
};
use crate::shared::core::clock::Clock;

/// Read side of the tracker: weekly buckets and live project totals,
/// recomputed from the store on every call.
pub struct WeeklyReportHandler<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
{
    store: Arc<dyn TrackerStore>,
    clock: Arc<dyn Clock>,
    zone: Tz,
}

impl<Tz> WeeklyReportHandler<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
{
    pub fn new(store: Arc<dyn TrackerStore>, clock: Arc<dyn Clock>, zone: Tz) -> Self {
        Self { store, clock, zone }
    }

    pub fn zone(&self) -> &Tz {
        &self.zone
    }

    pub async fn weekly_report(&self) -> Result<Vec<WeekBucket>, ApplicationError> {
        let projects = self.store.list_projects().await?;
        let entries = self.store.list_time_entries().await?;
        Ok(build_weekly_report(&entries, &projects, &self.zone))
    }

    pub async fn week(&self, week_key: NaiveDate) -> Result<WeekBucket, ApplicationError> {
        self.weekly_report()
            .await?
            .into_iter()
            .find(|w| w.week_key == week_key)
            .ok_or_else(|| ApplicationError::week_not_found(week_key.to_string()))
    }

    pub async fn project_summaries(&self) -> Result<Vec<ProjectSummary>, ApplicationError> {
        let projects = self.store.list_projects().await?;
        let entries = self.store.list_time_entries().await?;
        let active_timer = self.store.get_active_timer().await?;
        Ok(summarize_projects(
            &projects,
            &entries,
            active_timer.as_ref(),
            self.clock.now_millis(),
        ))
    }
}
