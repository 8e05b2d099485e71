// In memory implementation of the TrackerStore port.
//
// Purpose
// - Support handler tests and local development without a database.
//
// Responsibilities
// - Keep projects, entries and the active timer slot in one snapshot.
// - Cascade entry deletion when a project goes away.

use crate::modules::tracking::core::ports::{StoreError, TrackerStore};
use crate::modules::tracking::core::project::Project;
use crate::modules::tracking::core::time_entry::TimeEntry;
use crate::modules::tracking::core::timer::ActiveTimer;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Everything the tracker persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSnapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub time_entries: Vec<TimeEntry>,
    #[serde(default)]
    pub active_timer: Option<ActiveTimer>,
}

impl TrackerSnapshot {
    pub fn projects_newest_first(&self) -> Vec<Project> {
        let mut projects = self.projects.clone();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        projects
    }

    pub fn entries_latest_first(&self) -> Vec<TimeEntry> {
        let mut entries = self.time_entries.clone();
        entries.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        entries
    }

    pub fn project(&self, id: &str) -> Option<Project> {
        self.projects.iter().find(|p| p.id == id).cloned()
    }

    pub fn entry(&self, id: &str) -> Option<TimeEntry> {
        self.time_entries.iter().find(|e| e.id == id).cloned()
    }

    pub fn insert_project(&mut self, project: Project) -> Project {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project.clone(),
            None => self.projects.push(project.clone()),
        }
        project
    }

    pub fn update_project(&mut self, id: &str, name: String, hourly_rate: f64) -> Option<Project> {
        let project = self.projects.iter_mut().find(|p| p.id == id)?;
        project.name = name;
        project.hourly_rate = hourly_rate;
        Some(project.clone())
    }

    pub fn update_project_rate(&mut self, id: &str, hourly_rate: f64) -> Option<Project> {
        let project = self.projects.iter_mut().find(|p| p.id == id)?;
        project.hourly_rate = hourly_rate;
        Some(project.clone())
    }

    pub fn remove_project(&mut self, id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() == before {
            return false;
        }
        self.time_entries.retain(|e| e.project_id != id);
        if self
            .active_timer
            .as_ref()
            .is_some_and(|timer| timer.project_id == id)
        {
            self.active_timer = None;
        }
        true
    }

    pub fn insert_entry(&mut self, entry: TimeEntry) -> TimeEntry {
        match self.time_entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry.clone(),
            None => self.time_entries.push(entry.clone()),
        }
        entry
    }

    pub fn replace_entry(&mut self, entry: TimeEntry) -> Option<TimeEntry> {
        let existing = self.time_entries.iter_mut().find(|e| e.id == entry.id)?;
        *existing = entry.clone();
        Some(entry)
    }

    pub fn remove_entry(&mut self, id: &str) -> bool {
        let before = self.time_entries.len();
        self.time_entries.retain(|e| e.id != id);
        self.time_entries.len() != before
    }
}

#[derive(Default)]
pub struct InMemoryTrackerStore {
    state: RwLock<TrackerSnapshot>,
    is_offline: bool,
}

impl InMemoryTrackerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: TrackerSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
            is_offline: false,
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn snapshot(&self) -> TrackerSnapshot {
        self.state.read().await.clone()
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Unavailable("Tracker store offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TrackerStore for InMemoryTrackerStore {
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        self.ensure_online()?;
        Ok(self.state.read().await.projects_newest_first())
    }

    async fn find_project(&self, id: &str) -> Result<Option<Project>, StoreError> {
        self.ensure_online()?;
        Ok(self.state.read().await.project(id))
    }

    async fn create_project(&self, project: Project) -> Result<Project, StoreError> {
        self.ensure_online()?;
        Ok(self.state.write().await.insert_project(project))
    }

    async fn update_project(
        &self,
        id: &str,
        name: String,
        hourly_rate: f64,
    ) -> Result<Option<Project>, StoreError> {
        self.ensure_online()?;
        Ok(self.state.write().await.update_project(id, name, hourly_rate))
    }

    async fn update_project_rate(
        &self,
        id: &str,
        hourly_rate: f64,
    ) -> Result<Option<Project>, StoreError> {
        self.ensure_online()?;
        Ok(self.state.write().await.update_project_rate(id, hourly_rate))
    }

    async fn delete_project(&self, id: &str) -> Result<bool, StoreError> {
        self.ensure_online()?;
        Ok(self.state.write().await.remove_project(id))
    }

    async fn list_time_entries(&self) -> Result<Vec<TimeEntry>, StoreError> {
        self.ensure_online()?;
        Ok(self.state.read().await.entries_latest_first())
    }

    async fn find_time_entry(&self, id: &str) -> Result<Option<TimeEntry>, StoreError> {
        self.ensure_online()?;
        Ok(self.state.read().await.entry(id))
    }

    async fn create_entry(&self, entry: TimeEntry) -> Result<TimeEntry, StoreError> {
        self.ensure_online()?;
        Ok(self.state.write().await.insert_entry(entry))
    }

    async fn update_entry(&self, entry: TimeEntry) -> Result<Option<TimeEntry>, StoreError> {
        self.ensure_online()?;
        Ok(self.state.write().await.replace_entry(entry))
    }

    async fn delete_entry(&self, id: &str) -> Result<bool, StoreError> {
        self.ensure_online()?;
        Ok(self.state.write().await.remove_entry(id))
    }

    async fn get_active_timer(&self) -> Result<Option<ActiveTimer>, StoreError> {
        self.ensure_online()?;
        Ok(self.state.read().await.active_timer.clone())
    }

    async fn set_active_timer(&self, timer: ActiveTimer) -> Result<ActiveTimer, StoreError> {
        self.ensure_online()?;
        self.state.write().await.active_timer = Some(timer.clone());
        Ok(timer)
    }

    async fn clear_active_timer(&self) -> Result<(), StoreError> {
        self.ensure_online()?;
        self.state.write().await.active_timer = None;
        Ok(())
    }
}

#[cfg(test)]
mod in_memory_tracker_store_tests {
    use super::*;
    use crate::tests::fixtures::{ProjectBuilder, TimeEntryBuilder};
    use rstest::{fixture, rstest};

    #[fixture]
    fn before_each() -> InMemoryTrackerStore {
        InMemoryTrackerStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_projects_newest_first(before_each: InMemoryTrackerStore) {
        let store = before_each;
        store
            .create_project(ProjectBuilder::new().id("old").created_at(1).build())
            .await
            .unwrap();
        store
            .create_project(ProjectBuilder::new().id("new").created_at(2).build())
            .await
            .unwrap();
        let ids: Vec<_> = store
            .list_projects()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_update_the_rate_of_an_existing_project(before_each: InMemoryTrackerStore) {
        let store = before_each;
        store
            .create_project(ProjectBuilder::new().id("p-1").hourly_rate(50.0).build())
            .await
            .unwrap();
        let updated = store.update_project_rate("p-1", 80.0).await.unwrap();
        assert_eq!(updated.map(|p| p.hourly_rate), Some(80.0));
        assert_eq!(store.update_project_rate("missing", 80.0).await.unwrap(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_cascade_entries_when_a_project_is_deleted(
        before_each: InMemoryTrackerStore,
    ) {
        let store = before_each;
        store
            .create_project(ProjectBuilder::new().id("p-1").build())
            .await
            .unwrap();
        store
            .create_project(ProjectBuilder::new().id("p-2").build())
            .await
            .unwrap();
        store
            .create_entry(TimeEntryBuilder::new().id("te-1").project_id("p-1").build())
            .await
            .unwrap();
        store
            .create_entry(TimeEntryBuilder::new().id("te-2").project_id("p-2").build())
            .await
            .unwrap();

        assert!(store.delete_project("p-1").await.unwrap());

        let remaining = store.list_time_entries().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "te-2");
        assert!(!store.delete_project("p-1").await.unwrap());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_entries_latest_first(before_each: InMemoryTrackerStore) {
        let store = before_each;
        for (id, start) in [("a", 1_000), ("b", 3_000), ("c", 2_000)] {
            store
                .create_entry(TimeEntryBuilder::new().id(id).span(start, start + 10).build())
                .await
                .unwrap();
        }
        let ids: Vec<_> = store
            .list_time_entries()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_only_update_or_delete_known_entries(before_each: InMemoryTrackerStore) {
        let store = before_each;
        let entry = TimeEntryBuilder::new().id("te-1").build();
        assert_eq!(store.update_entry(entry.clone()).await.unwrap(), None);
        store.create_entry(entry.clone()).await.unwrap();
        let mut edited = entry.clone();
        edited.description = Some("edited".into());
        assert_eq!(
            store.update_entry(edited.clone()).await.unwrap(),
            Some(edited)
        );
        assert!(store.delete_entry("te-1").await.unwrap());
        assert!(!store.delete_entry("te-1").await.unwrap());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_hold_at_most_one_active_timer(before_each: InMemoryTrackerStore) {
        let store = before_each;
        let first = ActiveTimer {
            project_id: "p-1".into(),
            start_time: 1,
        };
        let second = ActiveTimer {
            project_id: "p-2".into(),
            start_time: 2,
        };
        store.set_active_timer(first).await.unwrap();
        store.set_active_timer(second.clone()).await.unwrap();
        assert_eq!(store.get_active_timer().await.unwrap(), Some(second));
        store.clear_active_timer().await.unwrap();
        assert_eq!(store.get_active_timer().await.unwrap(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_store_is_offline(before_each: InMemoryTrackerStore) {
        let mut store = before_each;
        store.toggle_offline();
        let result = store.list_projects().await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Tracker store offline")
        );
    }
}
