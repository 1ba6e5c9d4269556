// src/matching/scorer.rs
//
// Pure match-scoring logic. No network or storage access; everything here
// computes over its inputs only.

use crate::applications::MatchStatus;
use crate::jobs::Job;

// ============================================================================
// Thresholds
// ============================================================================

/// Score at or above which a result counts as matched in all-jobs mode.
pub const BULK_MATCH_THRESHOLD: u8 = 80;

/// Score at or above which a result counts as matched in per-job mode.
pub const PER_JOB_MATCH_THRESHOLD: u8 = 60;

/// Minimum best-job score for a CV to appear in all-jobs results at all;
/// below it the CV is silently dropped, not reported.
pub const BULK_INCLUSION_FLOOR: u8 = 40;

/// Scoring thresholds, overridable per run.
#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    pub bulk_threshold: u8,
    pub per_job_threshold: u8,
    pub inclusion_floor: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            bulk_threshold: BULK_MATCH_THRESHOLD,
            per_job_threshold: PER_JOB_MATCH_THRESHOLD,
            inclusion_floor: BULK_INCLUSION_FLOOR,
        }
    }
}

// ============================================================================
// Scoring
// ============================================================================

/// Percentage of candidate skills found in the requirements text, rounded
/// to the nearest integer. Empty skill lists score 0.
///
/// Matching is case-insensitive whole-text substring containment: it is not
/// tokenized and not fuzzy, so a requirements text containing a skill as
/// part of another word still counts. Known quirk, kept as-is.
pub fn match_score(skills: &[String], requirements: &str) -> u8 {
    if skills.is_empty() {
        return 0;
    }
    let requirements = requirements.to_lowercase();
    let matched = skills
        .iter()
        .filter(|skill| requirements.contains(&skill.to_lowercase()))
        .count();
    ((matched as f64 / skills.len() as f64) * 100.0).round() as u8
}

/// A score exactly at the threshold counts as matched.
pub fn classify(score: u8, threshold: u8) -> MatchStatus {
    if score >= threshold {
        MatchStatus::Matched
    } else {
        MatchStatus::NotMatched
    }
}

/// Scores one skill set against every open job and returns the job with the
/// strictly greatest score, first-seen winning ties. Returns `None` when no
/// open job reaches `floor`. Closed jobs are never scored.
pub fn best_job<'a>(skills: &[String], jobs: &'a [Job], floor: u8) -> Option<(&'a Job, u8)> {
    let mut best: Option<(&Job, u8)> = None;
    for job in jobs.iter().filter(|j| j.status.is_open()) {
        let score = match_score(skills, &job.requirements);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((job, score)),
        }
    }
    best.filter(|(_, score)| *score >= floor)
}
