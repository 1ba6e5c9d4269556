// src/candidates/models.rs

use serde::{Deserialize, Serialize};

// ============================================================================
// Candidate Models
// ============================================================================

/// A candidate record as returned by the external store. Email is unique
/// across candidates; records are immutable once created from this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub resume_url: String,
}

/// Payload for `POST /candidates/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub resume_url: String,
}
