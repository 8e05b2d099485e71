use chrono::{NaiveDate, TimeZone};
use std::sync::Arc;

use crate::modules::tracking::core::ports::TrackerStore;
use crate::modules::tracking::core::time_entry::TimeEntry;
use crate::modules::tracking::errors::ApplicationError;
use crate::modules::tracking::use_cases::calendar_overview::overview::{
    MonthOverview, entries_on, month_overview,
};

pub struct CalendarOverviewHandler<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
{
    store: Arc<dyn TrackerStore>,
    zone: Tz,
}

impl<Tz> CalendarOverviewHandler<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
{
    pub fn new(store: Arc<dyn TrackerStore>, zone: Tz) -> Self {
        Self { store, zone }
    }

    pub async fn month(&self, year: i32, month: u32) -> Result<MonthOverview, ApplicationError> {
        let entries = self.store.list_time_entries().await?;
        let projects = self.store.list_projects().await?;
        Ok(month_overview(year, month, &entries, &projects, &self.zone)?)
    }

    pub async fn day(&self, date: NaiveDate) -> Result<Vec<TimeEntry>, ApplicationError> {
        let entries = self.store.list_time_entries().await?;
        let projects = self.store.list_projects().await?;
        Ok(entries_on(date, &entries, &projects, &self.zone))
    }
}
