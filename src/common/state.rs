// Application state shared across all commands

use std::sync::Arc;
use tracing::debug;

use crate::applications::Application;
use crate::common::StoreError;
use crate::jobs::Job;
use crate::services::StoreClient;

/// Client-side cache of the store's jobs and applications, with the store
/// handle injected. Reads serve from the cache; refreshes replace it
/// wholesale from the store.
pub struct AppState {
    store: Arc<dyn StoreClient>,
    jobs: Vec<Job>,
    applications: Vec<Application>,
}

impl AppState {
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Self {
            store,
            jobs: Vec::new(),
            applications: Vec::new(),
        }
    }

    pub fn store(&self) -> Arc<dyn StoreClient> {
        Arc::clone(&self.store)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub async fn refresh_jobs(&mut self) -> Result<(), StoreError> {
        self.jobs = self.store.list_jobs().await?;
        debug!(count = self.jobs.len(), "Jobs cache refreshed");
        Ok(())
    }

    pub async fn refresh_applications(&mut self) -> Result<(), StoreError> {
        self.applications = self.store.list_applications().await?;
        debug!(count = self.applications.len(), "Applications cache refreshed");
        Ok(())
    }

    pub async fn refresh_all(&mut self) -> Result<(), StoreError> {
        self.refresh_jobs().await?;
        self.refresh_applications().await
    }
}
