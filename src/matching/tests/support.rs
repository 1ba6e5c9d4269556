// src/matching/tests/support.rs
//
// In-memory store double and fixtures shared by the matching tests.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::applications::{Application, ApplicationStatus, MatchStatus, NewApplication};
use crate::candidates::{Candidate, NewCandidate};
use crate::common::StoreError;
use crate::jobs::{CreateJob, Job, JobStatus};
use crate::matching::extraction::{Extraction, SkillExtractor};
use crate::matching::models::{CvFile, MatchResult, ProcessCvsResponse};
use crate::common::MatchError;
use crate::services::StoreClient;

// ============================================================================
// Fixtures
// ============================================================================

pub fn job(id: &str, requirements: &str, status: JobStatus) -> Job {
    Job {
        id: id.to_string(),
        title: format!("Job {}", id),
        department: "Engineering".to_string(),
        location: "Remote".to_string(),
        requirements: requirements.to_string(),
        status,
        created_at: Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).unwrap(),
        applications_count: 0,
    }
}

pub fn skills(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

pub fn match_result(file_name: &str, skill_names: &[&str], job: Job, score: u8) -> MatchResult {
    MatchResult {
        file_name: file_name.to_string(),
        skills: skills(skill_names),
        job,
        score,
        status: MatchStatus::Matched,
        preview: String::new(),
        discovered_at: Utc::now(),
    }
}

pub fn cv(name: &str) -> CvFile {
    CvFile::new(name, Vec::new())
}

// ============================================================================
// Fixed Extractor
// ============================================================================

/// Returns a preconfigured skill list per file name.
pub struct FixedExtractor {
    pub by_file: HashMap<String, Vec<String>>,
}

impl FixedExtractor {
    pub fn new(entries: &[(&str, &[&str])]) -> Self {
        let by_file = entries
            .iter()
            .map(|(name, list)| (name.to_string(), skills(list)))
            .collect();
        Self { by_file }
    }
}

#[async_trait]
impl SkillExtractor for FixedExtractor {
    async fn extract(&self, file: &CvFile) -> Result<Extraction, MatchError> {
        let skills = self
            .by_file
            .get(&file.name)
            .cloned()
            .unwrap_or_default();
        Ok(Extraction {
            skills,
            preview: format!("preview of {}", file.name),
        })
    }
}

// ============================================================================
// Mock Store
// ============================================================================

/// In-memory `StoreClient`. Behavior toggles let tests exercise the probe
/// failure path and server-side rejections.
#[derive(Default)]
pub struct MockStore {
    pub jobs: Mutex<Vec<Job>>,
    pub candidates: Mutex<Vec<Candidate>>,
    pub applications: Mutex<Vec<Application>>,
    /// When set, the email probe channel fails with this flag.
    pub fail_email_probe: bool,
    /// When false, the probe reports every email as free.
    pub probe_sees_candidates: bool,
    /// When set, the probe reports every email as taken.
    pub probe_always_taken: bool,
    /// Number of email probes observed.
    pub email_probes: AtomicUsize,
    /// Reject `create_candidate` with this payload.
    pub reject_candidate_create: Option<String>,
    /// Reject `create_application` with this payload.
    pub reject_application_create: Option<String>,
    next_id: AtomicI64,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            probe_sees_candidates: true,
            next_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    pub fn with_candidates(self, seeded: Vec<Candidate>) -> Self {
        *self.candidates.lock().unwrap() = seeded;
        self
    }

    fn id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn candidate(&self, email: &str) -> Candidate {
        Candidate {
            id: self.id(),
            name: "Seeded".to_string(),
            email: email.to_string(),
            phone: String::new(),
            skills: Vec::new(),
            resume_url: String::new(),
        }
    }
}

#[async_trait]
impl StoreClient for MockStore {
    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        Ok(self.jobs.lock().unwrap().clone())
    }

    async fn create_job(&self, job: &CreateJob) -> Result<Job, StoreError> {
        let created = Job {
            id: format!("job-{}", self.id()),
            title: job.title.clone(),
            department: job.department.clone(),
            location: job.location.clone(),
            requirements: job.requirements.clone(),
            status: job.status,
            created_at: Utc::now(),
            applications_count: 0,
        };
        self.jobs.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn toggle_job_status(&self, job_id: &str) -> Result<Job, StoreError> {
        let mut jobs = self.jobs.lock().unwrap();
        let job = jobs
            .iter_mut()
            .find(|j| j.id == job_id)
            .ok_or(StoreError::Rejected {
                status: 404,
                detail: "job not found".to_string(),
            })?;
        job.status = if job.status.is_open() {
            JobStatus::Closed
        } else {
            JobStatus::Open
        };
        Ok(job.clone())
    }

    async fn list_applications(&self) -> Result<Vec<Application>, StoreError> {
        Ok(self.applications.lock().unwrap().clone())
    }

    async fn update_application_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Application, StoreError> {
        let mut apps = self.applications.lock().unwrap();
        let app = apps
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::Rejected {
                status: 404,
                detail: "application not found".to_string(),
            })?;
        app.status = status;
        Ok(app.clone())
    }

    async fn update_application_notes(
        &self,
        id: i64,
        notes: &str,
    ) -> Result<Application, StoreError> {
        let mut apps = self.applications.lock().unwrap();
        let app = apps
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::Rejected {
                status: 404,
                detail: "application not found".to_string(),
            })?;
        app.notes = notes.to_string();
        Ok(app.clone())
    }

    async fn update_application_rating(
        &self,
        id: i64,
        rating: u8,
    ) -> Result<Application, StoreError> {
        let mut apps = self.applications.lock().unwrap();
        let app = apps
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::Rejected {
                status: 404,
                detail: "application not found".to_string(),
            })?;
        app.rating = rating;
        Ok(app.clone())
    }

    async fn create_application(
        &self,
        application: &NewApplication,
    ) -> Result<Application, StoreError> {
        if let Some(detail) = &self.reject_application_create {
            return Err(StoreError::Rejected {
                status: 400,
                detail: detail.clone(),
            });
        }
        let candidate = self
            .candidates
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == application.candidate)
            .cloned()
            .ok_or(StoreError::Rejected {
                status: 400,
                detail: "unknown candidate".to_string(),
            })?;
        let created = Application {
            id: self.id(),
            candidate,
            job: application.job.clone(),
            job_title: application.job_title.clone(),
            status: application.status,
            applied_at: application.applied_at,
            rating: application.rating,
            notes: application.notes.clone(),
            ai_summary: application.ai_summary.clone(),
            match_score: application.match_score,
            match_status: application.match_status,
        };
        self.applications.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_candidates_by_email(&self, email: &str) -> Result<Vec<Candidate>, StoreError> {
        self.email_probes.fetch_add(1, Ordering::SeqCst);
        if self.probe_always_taken {
            return Ok(vec![self.candidate(email)]);
        }
        if self.fail_email_probe {
            return Err(StoreError::Rejected {
                status: 503,
                detail: "probe unavailable".to_string(),
            });
        }
        if !self.probe_sees_candidates {
            return Ok(Vec::new());
        }
        Ok(self
            .candidates
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.email == email)
            .cloned()
            .collect())
    }

    async fn create_candidate(&self, candidate: &NewCandidate) -> Result<Candidate, StoreError> {
        if let Some(detail) = &self.reject_candidate_create {
            return Err(StoreError::Rejected {
                status: 400,
                detail: detail.clone(),
            });
        }
        let created = Candidate {
            id: self.id(),
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            phone: candidate.phone.clone(),
            skills: candidate.skills.clone(),
            resume_url: candidate.resume_url.clone(),
        };
        self.candidates.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_applications_for(
        &self,
        email: &str,
        job_id: &str,
    ) -> Result<Vec<Application>, StoreError> {
        Ok(self
            .applications
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.candidate.email == email && a.job == job_id)
            .cloned()
            .collect())
    }

    async fn process_cvs(
        &self,
        _job_id: &str,
        files: &[CvFile],
    ) -> Result<ProcessCvsResponse, StoreError> {
        Ok(ProcessCvsResponse {
            total_processed: files.len(),
            filtered_count: 0,
            filtered_cvs: Vec::new(),
        })
    }
}
