use chrono::Local;
use std::sync::Arc;

use crate::modules::tracking::core::ports::TrackerStore;
use crate::modules::tracking::use_cases::calendar_overview::handler::CalendarOverviewHandler;
use crate::modules::tracking::use_cases::manage_projects::handler::ManageProjectsHandler;
use crate::modules::tracking::use_cases::manage_time_entries::handler::ManageTimeEntriesHandler;
use crate::modules::tracking::use_cases::render_invoice::handler::RenderInvoiceHandler;
use crate::modules::tracking::use_cases::track_time::handler::TimerHandler;
use crate::modules::tracking::use_cases::weekly_report::handler::WeeklyReportHandler;
use crate::shared::core::clock::Clock;

/// Weeks, days and the 09:00 default start follow the host's zone.
pub type Zone = Local;

#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<ManageProjectsHandler>,
    pub entries: Arc<ManageTimeEntriesHandler<Zone>>,
    pub timer: Arc<TimerHandler>,
    pub reports: Arc<WeeklyReportHandler<Zone>>,
    pub invoices: Arc<RenderInvoiceHandler<Zone>>,
    pub calendar: Arc<CalendarOverviewHandler<Zone>>,
}

impl AppState {
    pub fn new(store: Arc<dyn TrackerStore>, clock: Arc<dyn Clock>) -> Self {
        let timer = Arc::new(TimerHandler::new(store.clone(), clock.clone()));
        let reports = Arc::new(WeeklyReportHandler::new(store.clone(), clock.clone(), Local));
        Self {
            projects: Arc::new(ManageProjectsHandler::new(
                store.clone(),
                clock.clone(),
                timer.clone(),
            )),
            entries: Arc::new(ManageTimeEntriesHandler::new(store.clone(), Local)),
            timer,
            invoices: Arc::new(RenderInvoiceHandler::new(reports.clone(), clock)),
            reports,
            calendar: Arc::new(CalendarOverviewHandler::new(store, Local)),
        }
    }
}
