// src/jobs/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Job Models
// ============================================================================

/// Lifecycle status of a job opening. Flipped via the toggle endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Open,
    Closed,
}

impl JobStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, JobStatus::Open)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Open => write!(f, "Open"),
            JobStatus::Closed => write!(f, "Closed"),
        }
    }
}

/// A job opening as returned by the external store. The store owns the
/// record; this is a cached copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub department: String,
    pub location: String,
    #[serde(default)]
    pub requirements: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub applications_count: u32,
}

/// Payload for `POST /jobs/`. The store assigns id, created_at and the
/// applications counter.
#[derive(Debug, Clone, Serialize)]
pub struct CreateJob {
    pub title: String,
    pub department: String,
    pub location: String,
    pub requirements: String,
    pub status: JobStatus,
}
