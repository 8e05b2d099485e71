use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::modules::tracking::core::ports::TrackerStore;
use crate::modules::tracking::core::time_entry::{EntryRuleError, TimeEntry};
use crate::modules::tracking::core::timer::{
    ActiveTimer, TimerCommand, TimerDecision, TimerState, decide,
};
use crate::modules::tracking::errors::ApplicationError;
use crate::shared::core::clock::Clock;
use crate::shared::core::time::format_duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStatus {
    pub project_id: String,
    pub start_time: i64,
    pub elapsed_ms: i64,
    pub elapsed: String,
}

impl TimerStatus {
    fn at(timer: ActiveTimer, now: i64) -> Self {
        let elapsed_ms = timer.elapsed_ms(now);
        Self {
            project_id: timer.project_id,
            start_time: timer.start_time,
            elapsed_ms,
            elapsed: format_duration(elapsed_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerOutcome {
    pub active: Option<ActiveTimer>,
    pub completed_entry: Option<TimeEntry>,
}

/// Owner of the single timer slot. Every transition, and every project
/// deletion that may end a running timer, runs under one lock so a running
/// timer turns into exactly one entry.
pub struct TimerHandler {
    store: Arc<dyn TrackerStore>,
    clock: Arc<dyn Clock>,
    transition: Mutex<()>,
}

impl TimerHandler {
    pub fn new(store: Arc<dyn TrackerStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            transition: Mutex::new(()),
        }
    }

    /// Starts timing `project_id`, stopping whatever ran before.
    pub async fn start(&self, project_id: &str) -> Result<TimerOutcome, ApplicationError> {
        if project_id.trim().is_empty() {
            return Err(EntryRuleError::MissingProject.into());
        }
        let _guard = self.transition.lock().await;
        if self.store.find_project(project_id).await?.is_none() {
            tracing::warn!(project_id, "refused to start timer for unknown project");
            return Err(ApplicationError::project_not_found(project_id));
        }
        let outcome = self
            .apply(TimerCommand::Start {
                project_id: project_id.to_string(),
            })
            .await?;
        tracing::info!(project_id, "timer started");
        Ok(outcome)
    }

    /// Stops the running timer. Returns the recorded entry, or `None` when
    /// nothing was running.
    pub async fn stop(&self) -> Result<Option<TimeEntry>, ApplicationError> {
        let _guard = self.transition.lock().await;
        Ok(self.apply(TimerCommand::Stop).await?.completed_entry)
    }

    /// Drops the running timer without recording anything.
    pub async fn clear(&self) -> Result<(), ApplicationError> {
        let _guard = self.transition.lock().await;
        self.apply(TimerCommand::Clear).await?;
        tracing::info!("active timer cleared");
        Ok(())
    }

    pub async fn active(&self) -> Result<Option<TimerStatus>, ApplicationError> {
        let timer = self.store.get_active_timer().await?;
        let now = self.clock.now_millis();
        Ok(timer.map(|t| TimerStatus::at(t, now)))
    }

    /// Deletes a project and its entries. A timer running on it is stopped
    /// first, so its time is recorded before the cascade removes it.
    pub async fn retire_project(&self, project_id: &str) -> Result<bool, ApplicationError> {
        let _guard = self.transition.lock().await;
        let running_here = self
            .store
            .get_active_timer()
            .await?
            .is_some_and(|t| t.project_id == project_id);
        if running_here {
            self.apply(TimerCommand::Stop).await?;
        }
        Ok(self.store.delete_project(project_id).await?)
    }

    async fn apply(&self, command: TimerCommand) -> Result<TimerOutcome, ApplicationError> {
        let state = TimerState::from(self.store.get_active_timer().await?);
        let was_running = state != TimerState::Idle;
        let TimerDecision { next, completed } = decide(&state, command, self.clock.now_millis());

        let completed_entry = match completed {
            Some(span) => {
                let entry = TimeEntry::new(
                    Uuid::now_v7().to_string(),
                    span.project_id,
                    span.start_time,
                    span.end_time,
                    false,
                    None,
                );
                let entry = self.store.create_entry(entry).await?;
                tracing::info!(
                    entry_id = %entry.id,
                    project_id = %entry.project_id,
                    duration_ms = entry.duration_ms,
                    "timer stopped"
                );
                Some(entry)
            }
            None => None,
        };

        let slot = match next {
            TimerState::Running(timer) => self.store.set_active_timer(timer).await.map(Some),
            TimerState::Idle if was_running => self.store.clear_active_timer().await.map(|_| None),
            TimerState::Idle => Ok(None),
        };

        match slot {
            Ok(active) => Ok(TimerOutcome {
                active,
                completed_entry,
            }),
            Err(err) => {
                if let Some(entry) = &completed_entry {
                    tracing::warn!(entry_id = %entry.id, "rolling back entry after timer update failed");
                    if let Err(rollback) = self.store.delete_entry(&entry.id).await {
                        tracing::error!(entry_id = %entry.id, error = %rollback, "rollback failed");
                    }
                }
                Err(err.into())
            }
        }
    }
}
