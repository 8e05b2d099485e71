use chrono::TimeZone;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::tracking::core::ports::TrackerStore;
use crate::modules::tracking::core::project::non_blank;
use crate::modules::tracking::core::time_entry::{
    EntryRuleError, TimeEntry, validate_manual_entry, validate_span,
};
use crate::modules::tracking::errors::ApplicationError;
use crate::modules::tracking::use_cases::manage_time_entries::command::{
    AddManualEntry, EditTimeEntry, RecordTimeEntry,
};
use crate::shared::core::time::{MS_PER_HOUR, at_local_time};

const MANUAL_ENTRY_START_HOUR: u32 = 9;

pub struct ManageTimeEntriesHandler<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
{
    store: Arc<dyn TrackerStore>,
    zone: Tz,
}

impl<Tz> ManageTimeEntriesHandler<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
{
    pub fn new(store: Arc<dyn TrackerStore>, zone: Tz) -> Self {
        Self { store, zone }
    }

    pub async fn record(&self, command: RecordTimeEntry) -> Result<TimeEntry, ApplicationError> {
        validate_manual_entry(&command.project_id, command.start_time, command.end_time)
            .inspect_err(|err| tracing::warn!(error = %err, "rejected manual entry"))?;
        self.ensure_project(&command.project_id).await?;

        let entry = TimeEntry::new(
            Uuid::now_v7().to_string(),
            command.project_id,
            command.start_time,
            command.end_time,
            true,
            non_blank(command.description),
        );
        let entry = self.store.create_entry(entry).await?;
        tracing::info!(
            entry_id = %entry.id,
            project_id = %entry.project_id,
            duration_ms = entry.duration_ms,
            "manual entry recorded"
        );
        Ok(entry)
    }

    /// Records `hours + minutes / 60` hours starting at 09:00 on the given day.
    pub async fn add_manual(&self, command: AddManualEntry) -> Result<TimeEntry, ApplicationError> {
        let hours = command.hours + command.minutes / 60.0;
        if !hours.is_finite() {
            return Err(ApplicationError::Validation(
                "hours and minutes must be finite numbers".into(),
            ));
        }
        let start_time = at_local_time(command.date, MANUAL_ENTRY_START_HOUR, 0, &self.zone);
        let duration_ms = (hours * MS_PER_HOUR as f64).round() as i64;
        self.record(RecordTimeEntry {
            project_id: command.project_id,
            start_time,
            end_time: start_time.saturating_add(duration_ms),
            description: command.description,
        })
        .await
    }

    pub async fn edit(&self, id: &str, patch: EditTimeEntry) -> Result<TimeEntry, ApplicationError> {
        let mut entry = self
            .store
            .find_time_entry(id)
            .await?
            .ok_or_else(|| ApplicationError::entry_not_found(id))?;

        if let Some(project_id) = patch.project_id {
            if project_id.trim().is_empty() {
                return Err(EntryRuleError::MissingProject.into());
            }
            self.ensure_project(&project_id).await?;
            entry.project_id = project_id;
        }
        let start_time = patch.start_time.unwrap_or(entry.start_time);
        let end_time = patch.end_time.unwrap_or(entry.end_time);
        validate_span(start_time, end_time)?;
        entry.reschedule(start_time, end_time);
        if patch.description.is_some() {
            entry.description = non_blank(patch.description);
        }

        let entry = self
            .store
            .update_entry(entry)
            .await?
            .ok_or_else(|| ApplicationError::entry_not_found(id))?;
        tracing::info!(entry_id = id, "time entry edited");
        Ok(entry)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApplicationError> {
        if !self.store.delete_entry(id).await? {
            return Err(ApplicationError::entry_not_found(id));
        }
        tracing::info!(entry_id = id, "time entry deleted");
        Ok(())
    }

    /// Latest start first.
    pub async fn list(&self) -> Result<Vec<TimeEntry>, ApplicationError> {
        Ok(self.store.list_time_entries().await?)
    }

    async fn ensure_project(&self, project_id: &str) -> Result<(), ApplicationError> {
        match self.store.find_project(project_id).await? {
            Some(_) => Ok(()),
            None => Err(ApplicationError::project_not_found(project_id)),
        }
    }
}
