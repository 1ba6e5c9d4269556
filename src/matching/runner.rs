// src/matching/runner.rs
//
// Matching flows for one upload batch. Files are processed sequentially on
// purpose: the email-uniqueness probe for one provisioned candidate must
// observe the writes of the previous one, so parallelizing within a batch
// would race the uniqueness check.

use chrono::Utc;
use tracing::{debug, info};

use crate::common::{MatchError, Validator};
use crate::jobs::Job;
use crate::matching::extraction::SkillExtractor;
use crate::matching::models::{CvFile, MatchResult};
use crate::matching::scorer::{best_job, classify, match_score, MatchConfig};
use crate::matching::validators::{UploadMode, UploadValidator};
use crate::services::StoreClient;

fn guard(files: &[CvFile], mode: UploadMode) -> Result<(), MatchError> {
    let validation = UploadValidator { mode }.validate(files);
    if !validation.is_valid {
        return Err(MatchError::ValidationSkipped(validation.summary()));
    }
    Ok(())
}

fn rank(mut results: Vec<MatchResult>) -> Vec<MatchResult> {
    // Stable sort keeps batch order among equal scores.
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}

/// Scores each file against one job. Results below the per-job threshold
/// are dropped from the output entirely.
pub async fn run_per_job_matching(
    files: &[CvFile],
    job: &Job,
    extractor: &dyn SkillExtractor,
    config: &MatchConfig,
) -> Result<Vec<MatchResult>, MatchError> {
    guard(files, UploadMode::ClientSide)?;

    let mut results = Vec::new();
    for file in files {
        let extraction = extractor.extract(file).await?;
        let score = match_score(&extraction.skills, &job.requirements);
        debug!(file = %file.name, job = %job.id, score, "Scored CV against job");

        if score >= config.per_job_threshold {
            results.push(MatchResult {
                file_name: file.name.clone(),
                skills: extraction.skills,
                job: job.clone(),
                score,
                status: classify(score, config.per_job_threshold),
                preview: extraction.preview,
                discovered_at: Utc::now(),
            });
        }
    }

    info!(processed = files.len(), kept = results.len(), "Per-job matching complete");
    Ok(rank(results))
}

/// Scores each file against every open job and keeps the best-scoring job
/// per file. Files whose best score falls under the inclusion floor are
/// silently dropped. An empty open-jobs list yields zero results without
/// invoking the scorer and without error.
pub async fn run_bulk_matching(
    files: &[CvFile],
    jobs: &[Job],
    extractor: &dyn SkillExtractor,
    config: &MatchConfig,
) -> Result<Vec<MatchResult>, MatchError> {
    guard(files, UploadMode::ClientSide)?;

    if !jobs.iter().any(|j| j.status.is_open()) {
        info!("No open jobs, skipping matching");
        return Ok(Vec::new());
    }

    let mut results = Vec::new();
    for file in files {
        let extraction = extractor.extract(file).await?;
        if let Some((job, score)) = best_job(&extraction.skills, jobs, config.inclusion_floor) {
            debug!(file = %file.name, job = %job.id, score, "Best job selected");
            results.push(MatchResult {
                file_name: file.name.clone(),
                skills: extraction.skills,
                job: job.clone(),
                score,
                status: classify(score, config.bulk_threshold),
                preview: extraction.preview,
                discovered_at: Utc::now(),
            });
        } else {
            debug!(file = %file.name, "Best score under inclusion floor, dropped");
        }
    }

    info!(processed = files.len(), kept = results.len(), "Bulk matching complete");
    Ok(rank(results))
}

/// Uploads the batch to the job-scoped bulk endpoint and maps the server's
/// processed CVs into match results classified at the bulk threshold.
pub async fn run_server_matching(
    store: &dyn StoreClient,
    job: &Job,
    files: &[CvFile],
    config: &MatchConfig,
) -> Result<Vec<MatchResult>, MatchError> {
    guard(files, UploadMode::ServerSide)?;

    let response = store.process_cvs(&job.id, files).await?;
    info!(
        total = response.total_processed,
        filtered = response.filtered_count,
        "Server-side CV processing complete"
    );

    let results = response
        .filtered_cvs
        .into_iter()
        .map(|cv| MatchResult {
            file_name: cv.file_name,
            skills: cv.skills,
            job: job.clone(),
            score: cv.match_score,
            status: classify(cv.match_score, config.bulk_threshold),
            preview: cv.extracted_text,
            discovered_at: cv.uploaded_at.unwrap_or_else(Utc::now),
        })
        .collect();

    Ok(rank(results))
}
