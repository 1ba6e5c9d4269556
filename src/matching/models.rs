// src/matching/models.rs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::io;
use std::path::Path;

use crate::applications::MatchStatus;
use crate::jobs::Job;

// ============================================================================
// CV File Handles
// ============================================================================

/// An uploaded CV file: a name plus its raw bytes. The bytes are only read
/// by the server upload path and the text extractor; the mock extractor
/// works from the name alone.
#[derive(Debug, Clone)]
pub struct CvFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl CvFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> io::Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path)?;
        Ok(Self { name, bytes })
    }

    /// Lowercased file extension, if any.
    pub fn extension(&self) -> Option<String> {
        self.name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
    }
}

// ============================================================================
// Match Results
// ============================================================================

/// One scored CV against one job. Ephemeral: held in memory for a single
/// upload session and discarded on the next run; a matched result may be
/// promoted into a real candidate + application pair by the provisioner.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub file_name: String,
    pub skills: Vec<String>,
    pub job: Job,
    pub score: u8,
    pub status: MatchStatus,
    pub preview: String,
    pub discovered_at: DateTime<Utc>,
}

// ============================================================================
// Server-Side Processing Contract
// ============================================================================

/// One processed CV from the job-scoped bulk endpoint. The endpoint speaks
/// camelCase; everything else on the wire is snake_case.
#[derive(Debug, Clone, Deserialize)]
pub struct FilteredCv {
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    #[serde(rename = "extractedText", default)]
    pub extracted_text: String,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Response body of `POST /jobs/{id}/process_cvs/`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessCvsResponse {
    pub total_processed: usize,
    pub filtered_count: usize,
    pub filtered_cvs: Vec<FilteredCv>,
}
