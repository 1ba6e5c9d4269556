// src/matching/provisioner.rs

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::applications::{Application, ApplicationStatus, NewApplication};
use crate::candidates::{Candidate, NewCandidate};
use crate::common::{safe_email_log, ProvisionError, StoreError};
use crate::matching::models::MatchResult;
use crate::services::StoreClient;

/// Upper bound on email-uniqueness probes for one provisioning attempt.
/// When the cap is hit the last candidate email is used as-is and the
/// store's unique constraint has the final word.
pub const MAX_EMAIL_PROBES: usize = 50;

/// Email domain for synthesized candidate identities.
pub const EMAIL_DOMAIN: &str = "example.com";

/// Phone placeholder until a real value is extracted from the CV.
pub const PLACEHOLDER_PHONE: &str = "+1 (555) 000-0000";

/// Both records created by a successful provisioning run.
#[derive(Debug, Clone)]
pub struct Provisioned {
    pub candidate: Candidate,
    pub application: Application,
}

/// Promotes a matched CV into a candidate + application pair in the external
/// store. Synthesizes the candidate identity from the file name, probes the
/// store for a free email, guards against duplicate applications, and
/// writes both records.
///
/// No rollback is attempted if the application write fails after the
/// candidate write succeeded; that inconsistency window is accepted.
pub struct CandidateProvisioner {
    store: Arc<dyn StoreClient>,
}

impl CandidateProvisioner {
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Self { store }
    }

    pub async fn provision(&self, result: &MatchResult) -> Result<Provisioned, ProvisionError> {
        let name = display_name_from_file(&result.file_name);
        let handle = email_handle(&name);
        let email = self.resolve_unique_email(&handle).await;

        info!(
            file = %result.file_name,
            email = %safe_email_log(&email),
            job = %result.job.id,
            "Provisioning candidate"
        );

        let candidate = self
            .store
            .create_candidate(&NewCandidate {
                name,
                email: email.clone(),
                phone: PLACEHOLDER_PHONE.to_string(),
                skills: result.skills.clone(),
                resume_url: format!("/resumes/{}", result.file_name),
            })
            .await
            .map_err(|e| match e {
                StoreError::Rejected { detail, .. } => {
                    ProvisionError::CandidateCreationFailed { detail }
                }
                other => ProvisionError::ProvisionFailed(other.to_string()),
            })?;

        // Duplicate guard: abort before the application write when the pair
        // (candidate email, job) already has an application.
        let existing = self
            .store
            .find_applications_for(&candidate.email, &result.job.id)
            .await
            .map_err(|e| ProvisionError::ProvisionFailed(e.to_string()))?;
        if !existing.is_empty() {
            warn!(
                email = %safe_email_log(&candidate.email),
                job = %result.job.id,
                "Duplicate application detected, aborting"
            );
            return Err(ProvisionError::DuplicateApplication);
        }

        let application = self
            .store
            .create_application(&NewApplication {
                candidate: candidate.id,
                job: result.job.id.clone(),
                job_title: result.job.title.clone(),
                status: ApplicationStatus::Screening,
                applied_at: Utc::now(),
                rating: 0,
                notes: format!(
                    "Auto-selected candidate with {}% match score. Skills: {}",
                    result.score,
                    result.skills.join(", ")
                ),
                ai_summary:
                    "High-match candidate selected automatically. Strong alignment with job requirements."
                        .to_string(),
                match_score: result.score,
                match_status: result.status,
            })
            .await
            .map_err(|e| match e {
                StoreError::Rejected { detail, .. } => {
                    ProvisionError::ApplicationCreationFailed { detail }
                }
                other => ProvisionError::ProvisionFailed(other.to_string()),
            })?;

        info!(
            candidate_id = candidate.id,
            application_id = application.id,
            "Candidate provisioned into screening"
        );

        Ok(Provisioned {
            candidate,
            application,
        })
    }

    /// Probes the store for a free email, suffixing the handle with 2, 3, ...
    /// until one is unused. A probe channel failure does not block the flow:
    /// the current candidate email is used as-is (availability over
    /// correctness).
    async fn resolve_unique_email(&self, handle: &str) -> String {
        let mut email = format!("{}@{}", handle, EMAIL_DOMAIN);
        let mut suffix = 1usize;

        for _ in 0..MAX_EMAIL_PROBES {
            match self.store.find_candidates_by_email(&email).await {
                Ok(existing) if existing.is_empty() => return email,
                Ok(_) => {
                    suffix += 1;
                    email = format!("{}{}@{}", handle, suffix, EMAIL_DOMAIN);
                }
                Err(e) => {
                    warn!(
                        email = %safe_email_log(&email),
                        error = %e,
                        "Email probe failed, proceeding with current email"
                    );
                    return email;
                }
            }
        }

        warn!(
            email = %safe_email_log(&email),
            probes = MAX_EMAIL_PROBES,
            "Email probe cap reached, proceeding with last email"
        );
        email
    }
}

// ============================================================================
// Identity Derivation
// ============================================================================

const DOCUMENT_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

/// Display name from a CV file name: known document extension stripped,
/// separator characters replaced with spaces.
pub fn display_name_from_file(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, ext))
            if DOCUMENT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext)) =>
        {
            stem
        }
        _ => file_name,
    };
    stem.replace(['-', '_'], " ")
}

/// Base email handle from a display name: non-alphanumerics stripped,
/// lowercased.
pub fn email_handle(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}
