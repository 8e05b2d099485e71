use chrono::{NaiveDate, TimeZone};
use std::sync::Arc;

use crate::modules::tracking::errors::ApplicationError;
use crate::modules::tracking::use_cases::render_invoice::invoice::{
    ClientDetails, invoice_file_name, render_invoice,
};
use crate::modules::tracking::use_cases::weekly_report::handler::WeeklyReportHandler;
use crate::shared::core::clock::Clock;
use crate::shared::core::time::local_date;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedInvoice {
    pub file_name: String,
    pub html: String,
}

pub struct RenderInvoiceHandler<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
{
    reports: Arc<WeeklyReportHandler<Tz>>,
    clock: Arc<dyn Clock>,
}

impl<Tz> RenderInvoiceHandler<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
{
    pub fn new(reports: Arc<WeeklyReportHandler<Tz>>, clock: Arc<dyn Clock>) -> Self {
        Self { reports, clock }
    }

    /// Invoice for the week starting on `week_key`, dated today.
    pub async fn render(
        &self,
        week_key: NaiveDate,
        client: &ClientDetails,
    ) -> Result<RenderedInvoice, ApplicationError> {
        let week = self.reports.week(week_key).await?;
        let issued_on = local_date(self.clock.now_millis(), self.reports.zone());
        let rendered = RenderedInvoice {
            file_name: invoice_file_name(client),
            html: render_invoice(&week, client, issued_on),
        };
        tracing::info!(week = %week_key, file_name = %rendered.file_name, "invoice rendered");
        Ok(rendered)
    }
}
