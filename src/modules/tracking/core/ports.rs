// Ports describe what the tracking core needs from the outside world.
//
// The store is a plain key-value CRUD contract over projects, time entries
// and the single active timer slot. Adapters implement it in
// adapters::outbound; handlers only ever see this trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::modules::tracking::core::project::Project;
use crate::modules::tracking::core::time_entry::TimeEntry;
use crate::modules::tracking::core::timer::ActiveTimer;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store data is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait TrackerStore: Send + Sync {
    /// Newest project first.
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;
    async fn find_project(&self, id: &str) -> Result<Option<Project>, StoreError>;
    async fn create_project(&self, project: Project) -> Result<Project, StoreError>;
    async fn update_project(
        &self,
        id: &str,
        name: String,
        hourly_rate: f64,
    ) -> Result<Option<Project>, StoreError>;
    async fn update_project_rate(
        &self,
        id: &str,
        hourly_rate: f64,
    ) -> Result<Option<Project>, StoreError>;
    /// Removes the project and every time entry that references it.
    async fn delete_project(&self, id: &str) -> Result<bool, StoreError>;

    /// Latest start time first.
    async fn list_time_entries(&self) -> Result<Vec<TimeEntry>, StoreError>;
    async fn find_time_entry(&self, id: &str) -> Result<Option<TimeEntry>, StoreError>;
    async fn create_entry(&self, entry: TimeEntry) -> Result<TimeEntry, StoreError>;
    async fn update_entry(&self, entry: TimeEntry) -> Result<Option<TimeEntry>, StoreError>;
    async fn delete_entry(&self, id: &str) -> Result<bool, StoreError>;

    async fn get_active_timer(&self) -> Result<Option<ActiveTimer>, StoreError>;
    async fn set_active_timer(&self, timer: ActiveTimer) -> Result<ActiveTimer, StoreError>;
    async fn clear_active_timer(&self) -> Result<(), StoreError>;
}
