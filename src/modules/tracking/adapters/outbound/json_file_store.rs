// File backed implementation of the TrackerStore port.
//
// Purpose
// - Keep tracked time across restarts without running a database.
//
// Responsibilities
// - Load the whole snapshot from one JSON file when opened.
// - Write the snapshot through a temp file and rename after every mutation.
// - Only publish a mutation in memory once it reached the disk.

use crate::modules::tracking::adapters::outbound::store_in_memory::TrackerSnapshot;
use crate::modules::tracking::core::ports::{StoreError, TrackerStore};
use crate::modules::tracking::core::project::Project;
use crate::modules::tracking::core::time_entry::TimeEntry;
use crate::modules::tracking::core::timer::ActiveTimer;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

pub struct JsonFileTrackerStore {
    path: PathBuf,
    state: RwLock<TrackerSnapshot>,
}

impl JsonFileTrackerStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => TrackerSnapshot::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound => TrackerSnapshot::default(),
            Err(err) => return Err(err.into()),
        };
        tracing::info!(
            path = %path.display(),
            projects = snapshot.projects.len(),
            time_entries = snapshot.time_entries.len(),
            "tracker data loaded"
        );
        Ok(Self {
            path,
            state: RwLock::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, snapshot: &TrackerSnapshot) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }

    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut TrackerSnapshot) -> T + Send,
    ) -> Result<T, StoreError> {
        let mut guard = self.state.write().await;
        let mut next = guard.clone();
        let outcome = change(&mut next);
        if let Err(err) = self.persist(&next).await {
            tracing::error!(path = %self.path.display(), error = %err, "failed to persist tracker data");
            return Err(err);
        }
        *guard = next;
        Ok(outcome)
    }
}

#[async_trait::async_trait]
impl TrackerStore for JsonFileTrackerStore {
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.state.read().await.projects_newest_first())
    }

    async fn find_project(&self, id: &str) -> Result<Option<Project>, StoreError> {
        Ok(self.state.read().await.project(id))
    }

    async fn create_project(&self, project: Project) -> Result<Project, StoreError> {
        self.mutate(|s| s.insert_project(project)).await
    }

    async fn update_project(
        &self,
        id: &str,
        name: String,
        hourly_rate: f64,
    ) -> Result<Option<Project>, StoreError> {
        self.mutate(|s| s.update_project(id, name, hourly_rate))
            .await
    }

    async fn update_project_rate(
        &self,
        id: &str,
        hourly_rate: f64,
    ) -> Result<Option<Project>, StoreError> {
        self.mutate(|s| s.update_project_rate(id, hourly_rate)).await
    }

    async fn delete_project(&self, id: &str) -> Result<bool, StoreError> {
        self.mutate(|s| s.remove_project(id)).await
    }

    async fn list_time_entries(&self) -> Result<Vec<TimeEntry>, StoreError> {
        Ok(self.state.read().await.entries_latest_first())
    }

    async fn find_time_entry(&self, id: &str) -> Result<Option<TimeEntry>, StoreError> {
        Ok(self.state.read().await.entry(id))
    }

    async fn create_entry(&self, entry: TimeEntry) -> Result<TimeEntry, StoreError> {
        self.mutate(|s| s.insert_entry(entry)).await
    }

    async fn update_entry(&self, entry: TimeEntry) -> Result<Option<TimeEntry>, StoreError> {
        self.mutate(|s| s.replace_entry(entry)).await
    }

    async fn delete_entry(&self, id: &str) -> Result<bool, StoreError> {
        self.mutate(|s| s.remove_entry(id)).await
    }

    async fn get_active_timer(&self) -> Result<Option<ActiveTimer>, StoreError> {
        Ok(self.state.read().await.active_timer.clone())
    }

    async fn set_active_timer(&self, timer: ActiveTimer) -> Result<ActiveTimer, StoreError> {
        self.mutate(|s| {
            s.active_timer = Some(timer.clone());
            timer
        })
        .await
    }

    async fn clear_active_timer(&self) -> Result<(), StoreError> {
        self.mutate(|s| s.active_timer = None).await
    }
}
