// src/services/rest.rs

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, error};

use crate::applications::{Application, ApplicationStatus, NewApplication};
use crate::candidates::{Candidate, NewCandidate};
use crate::common::StoreError;
use crate::jobs::{CreateJob, Job};
use crate::matching::models::{CvFile, ProcessCvsResponse};

/// REST operations of the external recruiting store. The store is an opaque
/// collaborator; this trait is the seam that lets scoring and provisioning
/// run against an in-memory double in tests.
#[async_trait]
pub trait StoreClient: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError>;
    async fn create_job(&self, job: &CreateJob) -> Result<Job, StoreError>;
    async fn toggle_job_status(&self, job_id: &str) -> Result<Job, StoreError>;

    async fn list_applications(&self) -> Result<Vec<Application>, StoreError>;
    async fn update_application_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Application, StoreError>;
    async fn update_application_notes(
        &self,
        id: i64,
        notes: &str,
    ) -> Result<Application, StoreError>;
    async fn update_application_rating(
        &self,
        id: i64,
        rating: u8,
    ) -> Result<Application, StoreError>;
    async fn create_application(
        &self,
        application: &NewApplication,
    ) -> Result<Application, StoreError>;

    /// Existence probe by exact email match.
    async fn find_candidates_by_email(&self, email: &str) -> Result<Vec<Candidate>, StoreError>;
    async fn create_candidate(&self, candidate: &NewCandidate) -> Result<Candidate, StoreError>;

    /// Duplicate-application probe for one (candidate email, job) pair.
    async fn find_applications_for(
        &self,
        email: &str,
        job_id: &str,
    ) -> Result<Vec<Application>, StoreError>;

    /// Job-scoped bulk CV processing via multipart upload.
    async fn process_cvs(
        &self,
        job_id: &str,
        files: &[CvFile],
    ) -> Result<ProcessCvsResponse, StoreError>;
}

// ============================================================================
// REST Implementation
// ============================================================================

/// `StoreClient` over HTTP. Holds the shared client built at startup and the
/// configured base URL (e.g. `http://localhost:8000/api`).
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
}

impl RestStore {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Checks the status and decodes the JSON body. A non-2xx response is
    /// surfaced as `Rejected` carrying the server's payload verbatim.
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(status = %status, detail = %detail, "Store rejected request");
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::InvalidBody(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        debug!(path = %path, "GET");
        let response = self.client.get(self.url(path)).send().await?;
        Self::read_json(response).await
    }

    async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        debug!(path = %path, "POST");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::read_json(response).await
    }

    async fn patch_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        debug!(path = %path, "PATCH");
        let response = self.client.patch(self.url(path)).json(body).send().await?;
        Self::read_json(response).await
    }
}

#[async_trait]
impl StoreClient for RestStore {
    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        self.get_json("/jobs/").await
    }

    async fn create_job(&self, job: &CreateJob) -> Result<Job, StoreError> {
        self.post_json("/jobs/", job).await
    }

    async fn toggle_job_status(&self, job_id: &str) -> Result<Job, StoreError> {
        let path = format!("/jobs/{}/toggle_status/", job_id);
        let response = self
            .client
            .patch(self.url(&path))
            .json(&json!({}))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn list_applications(&self) -> Result<Vec<Application>, StoreError> {
        self.get_json("/applications/").await
    }

    async fn update_application_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Application, StoreError> {
        let path = format!("/applications/{}/update_status/", id);
        self.patch_json(&path, &json!({ "status": status })).await
    }

    async fn update_application_notes(
        &self,
        id: i64,
        notes: &str,
    ) -> Result<Application, StoreError> {
        let path = format!("/applications/{}/update_notes/", id);
        self.patch_json(&path, &json!({ "notes": notes })).await
    }

    async fn update_application_rating(
        &self,
        id: i64,
        rating: u8,
    ) -> Result<Application, StoreError> {
        let path = format!("/applications/{}/update_rating/", id);
        self.patch_json(&path, &json!({ "rating": rating })).await
    }

    async fn create_application(
        &self,
        application: &NewApplication,
    ) -> Result<Application, StoreError> {
        self.post_json("/applications/", application).await
    }

    async fn find_candidates_by_email(&self, email: &str) -> Result<Vec<Candidate>, StoreError> {
        let path = format!("/candidates/?email={}", urlencoding::encode(email));
        self.get_json(&path).await
    }

    async fn create_candidate(&self, candidate: &NewCandidate) -> Result<Candidate, StoreError> {
        self.post_json("/candidates/", candidate).await
    }

    async fn find_applications_for(
        &self,
        email: &str,
        job_id: &str,
    ) -> Result<Vec<Application>, StoreError> {
        let path = format!(
            "/applications/?candidate__email={}&job={}",
            urlencoding::encode(email),
            urlencoding::encode(job_id)
        );
        self.get_json(&path).await
    }

    async fn process_cvs(
        &self,
        job_id: &str,
        files: &[CvFile],
    ) -> Result<ProcessCvsResponse, StoreError> {
        let mut form = reqwest::multipart::Form::new();
        for file in files {
            let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str("application/pdf")
                .map_err(|e| StoreError::InvalidBody(e.to_string()))?;
            form = form.part("cvs", part);
        }

        let path = format!("/jobs/{}/process_cvs/", job_id);
        debug!(path = %path, files = files.len(), "POST multipart");
        let response = self
            .client
            .post(self.url(&path))
            .multipart(form)
            .send()
            .await?;
        Self::read_json(response).await
    }
}
