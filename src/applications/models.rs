// src/applications/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::candidates::Candidate;

// ============================================================================
// Pipeline Status
// ============================================================================

/// Pipeline status of an application. The set is flat by design: any status
/// is reachable from any other via direct recruiter action, so a recruiter
/// can revert a rejection. `Offer` and `Rejected` carry no special finality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Screening,
    Interview,
    Offer,
    Rejected,
}

/// Display order of the pipeline, used for filtering and dashboard
/// aggregation only.
pub const PIPELINE_ORDER: [ApplicationStatus; 5] = [
    ApplicationStatus::Applied,
    ApplicationStatus::Screening,
    ApplicationStatus::Interview,
    ApplicationStatus::Offer,
    ApplicationStatus::Rejected,
];

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Screening => "Screening",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "applied" => Ok(ApplicationStatus::Applied),
            "screening" => Ok(ApplicationStatus::Screening),
            "interview" => Ok(ApplicationStatus::Interview),
            "offer" => Ok(ApplicationStatus::Offer),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!("invalid application status: {}", other)),
        }
    }
}

// ============================================================================
// Match Status
// ============================================================================

/// Classification of a match score against the active threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "matched")]
    Matched,
    #[serde(rename = "not_matched")]
    NotMatched,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Matched => write!(f, "Matched"),
            MatchStatus::NotMatched => write!(f, "Not Matched"),
        }
    }
}

// ============================================================================
// Application Models
// ============================================================================

/// An application as returned by the external store. Reads embed the full
/// candidate record; `job` is the owning job's id with the title
/// denormalized alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub candidate: Candidate,
    pub job: String,
    pub job_title: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub ai_summary: String,
    #[serde(default)]
    pub match_score: u8,
    #[serde(default = "default_match_status")]
    pub match_status: MatchStatus,
}

fn default_match_status() -> MatchStatus {
    MatchStatus::NotMatched
}

/// Payload for `POST /applications/`. Writes reference the candidate by id.
#[derive(Debug, Clone, Serialize)]
pub struct NewApplication {
    pub candidate: i64,
    pub job: String,
    pub job_title: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub rating: u8,
    pub notes: String,
    pub ai_summary: String,
    pub match_score: u8,
    pub match_status: MatchStatus,
}
