use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::tracking::core::ports::TrackerStore;
use crate::modules::tracking::core::project::{Project, non_blank, validate_name, validate_rate};
use crate::modules::tracking::errors::ApplicationError;
use crate::modules::tracking::use_cases::manage_projects::command::{CreateProject, UpdateProject};
use crate::modules::tracking::use_cases::track_time::handler::TimerHandler;
use crate::shared::core::clock::Clock;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub client_name: String,
    pub client_email: Option<String>,
}

pub struct ManageProjectsHandler {
    store: Arc<dyn TrackerStore>,
    clock: Arc<dyn Clock>,
    timer: Arc<TimerHandler>,
}

impl ManageProjectsHandler {
    pub fn new(store: Arc<dyn TrackerStore>, clock: Arc<dyn Clock>, timer: Arc<TimerHandler>) -> Self {
        Self { store, clock, timer }
    }

    pub async fn create(&self, command: CreateProject) -> Result<Project, ApplicationError> {
        let name = validate_name(&command.name).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected project");
        })?;
        let hourly_rate = validate_rate(command.hourly_rate)?;
        let project = Project {
            id: Uuid::now_v7().to_string(),
            name,
            hourly_rate,
            created_at: self.clock.now_millis(),
            client_name: non_blank(command.client_name),
            client_email: non_blank(command.client_email),
        };
        let project = self.store.create_project(project).await?;
        tracing::info!(project_id = %project.id, name = %project.name, "project created");
        Ok(project)
    }

    pub async fn update(&self, id: &str, command: UpdateProject) -> Result<Project, ApplicationError> {
        let name = validate_name(&command.name)?;
        let hourly_rate = validate_rate(command.hourly_rate)?;
        let project = self
            .store
            .update_project(id, name, hourly_rate)
            .await?
            .ok_or_else(|| ApplicationError::project_not_found(id))?;
        tracing::info!(project_id = id, "project updated");
        Ok(project)
    }

    pub async fn update_rate(&self, id: &str, hourly_rate: f64) -> Result<Project, ApplicationError> {
        let hourly_rate = validate_rate(Some(hourly_rate))?;
        let project = self
            .store
            .update_project_rate(id, hourly_rate)
            .await?
            .ok_or_else(|| ApplicationError::project_not_found(id))?;
        tracing::info!(project_id = id, hourly_rate, "project rate updated");
        Ok(project)
    }

    /// Removes the project with all of its entries. A timer running on it is
    /// stopped first.
    pub async fn delete(&self, id: &str) -> Result<(), ApplicationError> {
        if !self.timer.retire_project(id).await? {
            return Err(ApplicationError::project_not_found(id));
        }
        tracing::info!(project_id = id, "project deleted");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Project>, ApplicationError> {
        Ok(self.store.list_projects().await?)
    }

    /// Distinct clients named on projects, by name.
    pub async fn list_clients(&self) -> Result<Vec<Client>, ApplicationError> {
        let clients: BTreeSet<Client> = self
            .store
            .list_projects()
            .await?
            .into_iter()
            .filter_map(|p| {
                let client_name = non_blank(p.client_name)?;
                Some(Client {
                    client_name,
                    client_email: non_blank(p.client_email),
                })
            })
            .collect();
        Ok(clients.into_iter().collect())
    }
}
