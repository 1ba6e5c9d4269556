// src/dashboard/mod.rs
//
// Aggregation for the pipeline overview screen and the application list
// filters. Pure functions over the cached collections.

use crate::applications::{Application, ApplicationStatus, PIPELINE_ORDER};
use crate::jobs::Job;

// ============================================================================
// Overview
// ============================================================================

#[derive(Debug, Clone)]
pub struct PipelineStat {
    pub status: ApplicationStatus,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub open_jobs: usize,
    pub total_applications: usize,
    pub in_progress: usize,
    pub offers_extended: usize,
    pub pipeline: Vec<PipelineStat>,
    pub recent: Vec<Application>,
}

const RECENT_LIMIT: usize = 5;

pub fn summarize(jobs: &[Job], applications: &[Application]) -> DashboardSummary {
    let total = applications.len();

    let pipeline = PIPELINE_ORDER
        .iter()
        .map(|&status| {
            let count = applications.iter().filter(|a| a.status == status).count();
            let percentage = if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            PipelineStat {
                status,
                count,
                percentage,
            }
        })
        .collect();

    let mut recent: Vec<Application> = applications.to_vec();
    recent.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
    recent.truncate(RECENT_LIMIT);

    DashboardSummary {
        open_jobs: jobs.iter().filter(|j| j.status.is_open()).count(),
        total_applications: total,
        in_progress: applications
            .iter()
            .filter(|a| {
                a.status != ApplicationStatus::Rejected && a.status != ApplicationStatus::Offer
            })
            .count(),
        offers_extended: applications
            .iter()
            .filter(|a| a.status == ApplicationStatus::Offer)
            .count(),
        pipeline,
        recent,
    }
}

// ============================================================================
// Application List Filters
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    /// Case-insensitive match over candidate name and skills.
    pub search: Option<String>,
    pub job_id: Option<String>,
    pub status: Option<ApplicationStatus>,
}

pub fn filter_applications<'a>(
    applications: &'a [Application],
    filter: &ApplicationFilter,
) -> Vec<&'a Application> {
    applications
        .iter()
        .filter(|app| {
            let matches_search = match &filter.search {
                Some(term) => {
                    let term = term.to_lowercase();
                    app.candidate.name.to_lowercase().contains(&term)
                        || app
                            .candidate
                            .skills
                            .iter()
                            .any(|s| s.to_lowercase().contains(&term))
                }
                None => true,
            };
            let matches_job = filter
                .job_id
                .as_ref()
                .map(|id| &app.job == id)
                .unwrap_or(true);
            let matches_status = filter
                .status
                .map(|status| app.status == status)
                .unwrap_or(true);

            matches_search && matches_job && matches_status
        })
        .collect()
}
