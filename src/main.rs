// src/main.rs

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod applications;
mod candidates;
mod common;
mod dashboard;
mod jobs;
mod matching;
mod services;

// ============================================================================
// COMMON IMPORTS
// ============================================================================

use applications::ApplicationStatus;
use common::AppState;
use dashboard::{filter_applications, summarize, ApplicationFilter};
use jobs::{CreateJob, JobStatus};
use matching::{
    run_bulk_matching, run_per_job_matching, run_server_matching, CandidateProvisioner, CvFile,
    MatchResult, MockSkillExtractor, SkillExtractor, TextSkillExtractor,
};
use matching::scorer::MatchConfig;
use services::RestStore;

const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

// ============================================================================
// CLI DEFINITION
// ============================================================================

#[derive(Parser)]
#[command(name = "talentflow", about = "Recruiting pipeline dashboard client")]
struct Cli {
    /// Base URL of the recruiting store API
    #[arg(long, env = "API_BASE_URL", default_value = DEFAULT_API_BASE)]
    api_base: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Overview of the hiring pipeline
    Dashboard,
    /// Manage job openings
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
    /// Review and annotate applications
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },
    /// Match uploaded CVs against job requirements
    Match {
        #[command(subcommand)]
        command: MatchCommand,
    },
    /// Create the demo job openings
    Seed,
}

#[derive(Subcommand)]
enum JobsCommand {
    /// List all jobs
    List,
    /// Create a job opening
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value = "")]
        requirements: String,
    },
    /// Flip a job between Open and Closed
    Toggle { job_id: String },
}

#[derive(Subcommand)]
enum ApplicationsCommand {
    /// List applications, optionally filtered
    List {
        /// Case-insensitive search over candidate name and skills
        #[arg(long)]
        search: Option<String>,
        /// Only applications for this job id
        #[arg(long)]
        job: Option<String>,
        /// Only applications in this pipeline status
        #[arg(long)]
        status: Option<String>,
    },
    /// Move an application to a pipeline status
    SetStatus { id: i64, status: String },
    /// Replace the recruiter notes
    SetNotes { id: i64, notes: String },
    /// Set the star rating (0-5)
    SetRating { id: i64, rating: u8 },
}

#[derive(Subcommand)]
enum MatchCommand {
    /// Score CVs against one job (client-side extraction, threshold 60)
    PerJob {
        job_id: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Read skills out of the file contents instead of the mock table
        #[arg(long)]
        text_extraction: bool,
        /// Provision a matched result by its file name (repeatable)
        #[arg(long = "select")]
        select: Vec<String>,
    },
    /// Score CVs against every open job and keep the best match each
    AllJobs {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long)]
        text_extraction: bool,
        #[arg(long = "select")]
        select: Vec<String>,
    },
    /// Upload CVs to the job-scoped bulk processing endpoint
    Server {
        job_id: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long = "select")]
        select: Vec<String>,
    },
}

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let http_client = Client::builder().no_proxy().build()?;
    let store = Arc::new(RestStore::new(http_client, cli.api_base.clone()));
    let mut state = AppState::new(store.clone());

    match cli.command {
        Command::Dashboard => {
            state.refresh_all().await?;
            render_dashboard(&state);
        }
        Command::Jobs { command } => run_jobs_command(&mut state, command).await?,
        Command::Applications { command } => {
            run_applications_command(&mut state, command).await?
        }
        Command::Match { command } => run_match_command(&mut state, command).await?,
        Command::Seed => run_seed(&mut state).await?,
    }

    Ok(())
}

// ============================================================================
// JOBS
// ============================================================================

async fn run_jobs_command(state: &mut AppState, command: JobsCommand) -> anyhow::Result<()> {
    match command {
        JobsCommand::List => {
            state.refresh_jobs().await?;
            for job in state.jobs() {
                println!(
                    "{:<10} {:<32} {:<14} {:<20} {:<7} {} applications",
                    job.id,
                    job.title,
                    job.department,
                    job.location,
                    job.status,
                    job.applications_count
                );
            }
        }
        JobsCommand::Add {
            title,
            department,
            location,
            requirements,
        } => {
            let created = state
                .store()
                .create_job(&CreateJob {
                    title,
                    department,
                    location,
                    requirements,
                    status: JobStatus::Open,
                })
                .await?;
            info!(job_id = %created.id, "Job created");
            println!("Created {} ({})", created.id, created.title);
        }
        JobsCommand::Toggle { job_id } => {
            let updated = state.store().toggle_job_status(&job_id).await?;
            println!("{} is now {}", updated.id, updated.status);
        }
    }
    Ok(())
}

// ============================================================================
// APPLICATIONS
// ============================================================================

async fn run_applications_command(
    state: &mut AppState,
    command: ApplicationsCommand,
) -> anyhow::Result<()> {
    match command {
        ApplicationsCommand::List {
            search,
            job,
            status,
        } => {
            state.refresh_applications().await?;
            let status = status
                .map(|s| s.parse::<ApplicationStatus>())
                .transpose()
                .map_err(anyhow::Error::msg)?;
            let filter = ApplicationFilter {
                search,
                job_id: job,
                status,
            };
            let filtered = filter_applications(state.applications(), &filter);
            println!("{} candidates to review", filtered.len());
            for app in filtered {
                println!(
                    "#{:<5} {:<24} {:<32} {:<10} {}★  applied {}",
                    app.id,
                    app.candidate.name,
                    app.job_title,
                    app.status,
                    app.rating,
                    app.applied_at.format("%Y-%m-%d")
                );
            }
        }
        ApplicationsCommand::SetStatus { id, status } => {
            let status: ApplicationStatus = status.parse().map_err(anyhow::Error::msg)?;
            let updated = state.store().update_application_status(id, status).await?;
            println!(
                "{}'s application status changed to {}",
                updated.candidate.name, updated.status
            );
        }
        ApplicationsCommand::SetNotes { id, notes } => {
            state.store().update_application_notes(id, &notes).await?;
            println!("Notes updated");
        }
        ApplicationsCommand::SetRating { id, rating } => {
            if rating > 5 {
                anyhow::bail!("rating must be between 0 and 5");
            }
            state.store().update_application_rating(id, rating).await?;
            println!("Rating updated");
        }
    }
    Ok(())
}

// ============================================================================
// MATCHING
// ============================================================================

fn load_files(paths: &[PathBuf]) -> Result<Vec<CvFile>, common::MatchError> {
    paths
        .iter()
        .map(|p| {
            CvFile::from_path(p).map_err(|e| common::MatchError::Extraction {
                file: p.display().to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

fn pick_extractor(text_extraction: bool) -> Box<dyn SkillExtractor> {
    if text_extraction {
        Box::new(TextSkillExtractor::new())
    } else {
        Box::new(MockSkillExtractor)
    }
}

async fn run_match_command(state: &mut AppState, command: MatchCommand) -> anyhow::Result<()> {
    let config = MatchConfig::default();

    let (results, select) = match command {
        MatchCommand::PerJob {
            job_id,
            files,
            text_extraction,
            select,
        } => {
            state.refresh_jobs().await?;
            let job = state
                .job(&job_id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("job not found: {}", job_id))?;
            let files = load_files(&files)?;
            let extractor = pick_extractor(text_extraction);
            let results = run_per_job_matching(&files, &job, extractor.as_ref(), &config).await?;
            (results, select)
        }
        MatchCommand::AllJobs {
            files,
            text_extraction,
            select,
        } => {
            state.refresh_jobs().await?;
            let files = load_files(&files)?;
            let extractor = pick_extractor(text_extraction);
            let results =
                run_bulk_matching(&files, state.jobs(), extractor.as_ref(), &config).await?;
            (results, select)
        }
        MatchCommand::Server {
            job_id,
            files,
            select,
        } => {
            state.refresh_jobs().await?;
            let job = state
                .job(&job_id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("job not found: {}", job_id))?;
            let files = load_files(&files)?;
            let results =
                run_server_matching(state.store().as_ref(), &job, &files, &config).await?;
            (results, select)
        }
    };

    render_results(&results);

    if !select.is_empty() {
        provision_selected(state, &results, &select).await?;
    }

    Ok(())
}

fn render_results(results: &[MatchResult]) {
    println!("CV Matching Results ({} processed)", results.len());
    for result in results {
        println!(
            "  {:<28} {:>3}%  {:<11} -> {} ({})",
            result.file_name, result.score, result.status, result.job.title, result.job.id
        );
        println!("    skills: {}", result.skills.join(", "));
        if !result.preview.is_empty() {
            println!("    preview: {}", result.preview);
        }
    }
}

/// Promotes the selected results one at a time. Sequential on purpose: each
/// email-uniqueness probe must see the previous candidate write. A failed
/// selection is reported and does not stop the remaining ones.
async fn provision_selected(
    state: &mut AppState,
    results: &[MatchResult],
    selected: &[String],
) -> anyhow::Result<()> {
    let provisioner = CandidateProvisioner::new(state.store());
    let mut provisioned_any = false;

    for file_name in selected {
        let Some(result) = results.iter().find(|r| &r.file_name == file_name) else {
            eprintln!("No match result for {}", file_name);
            continue;
        };
        if result.status != applications::MatchStatus::Matched {
            eprintln!(
                "{} is not matched ({}%), skipping selection",
                file_name, result.score
            );
            continue;
        }

        match provisioner.provision(result).await {
            Ok(outcome) => {
                provisioned_any = true;
                println!(
                    "Candidate selected: {} has been added to screening for {}",
                    outcome.candidate.name, outcome.application.job_title
                );
            }
            Err(e) => {
                error!(file = %file_name, error = %e, "Provisioning failed");
                eprintln!("Failed to select candidate from {}: {}", file_name, e);
            }
        }
    }

    if provisioned_any {
        state.refresh_all().await?;
    }
    Ok(())
}

// ============================================================================
// DASHBOARD
// ============================================================================

fn render_dashboard(state: &AppState) {
    let summary = summarize(state.jobs(), state.applications());

    println!("Open Jobs:          {}", summary.open_jobs);
    println!("Total Applications: {}", summary.total_applications);
    println!("In Progress:        {}", summary.in_progress);
    println!("Offers Extended:    {}", summary.offers_extended);

    println!("\nPipeline Overview");
    for stat in &summary.pipeline {
        println!("  {:<10} {:>4}  ({:.0}%)", stat.status, stat.count, stat.percentage);
    }

    println!("\nRecent Applications");
    for app in &summary.recent {
        println!(
            "  {:<24} {:<32} {}",
            app.candidate.name, app.job_title, app.status
        );
    }
}

// ============================================================================
// SEED DATA
// ============================================================================

async fn run_seed(state: &mut AppState) -> anyhow::Result<()> {
    let demo_jobs = [
        CreateJob {
            title: "Senior Frontend Developer".to_string(),
            department: "Engineering".to_string(),
            location: "San Francisco, CA".to_string(),
            requirements: "5+ years React, TypeScript, Node.js, GraphQL, AWS. Bachelor's in CS. \
                           Experience with modern frontend frameworks and cloud services."
                .to_string(),
            status: JobStatus::Open,
        },
        CreateJob {
            title: "Product Designer".to_string(),
            department: "Design".to_string(),
            location: "Remote".to_string(),
            requirements: "3+ years UX/UI design, Figma, prototyping, user research. Portfolio \
                           required. Experience with design systems and agile methodologies."
                .to_string(),
            status: JobStatus::Open,
        },
        CreateJob {
            title: "Backend Engineer".to_string(),
            department: "Engineering".to_string(),
            location: "New York, NY".to_string(),
            requirements: "4+ years Python/Django, PostgreSQL, REST APIs, Docker. Experience \
                           with microservices and cloud platforms (AWS/GCP)."
                .to_string(),
            status: JobStatus::Open,
        },
        CreateJob {
            title: "Marketing Manager".to_string(),
            department: "Marketing".to_string(),
            location: "Austin, TX".to_string(),
            requirements: "3+ years digital marketing, Google Analytics, SEO/SEM, social media. \
                           Experience with marketing automation and A/B testing."
                .to_string(),
            status: JobStatus::Closed,
        },
        CreateJob {
            title: "Data Analyst".to_string(),
            department: "Analytics".to_string(),
            location: "Chicago, IL".to_string(),
            requirements: "2+ years SQL, Python/R, Tableau/Power BI, statistical analysis. \
                           Experience with data visualization and business intelligence."
                .to_string(),
            status: JobStatus::Open,
        },
    ];

    for job in &demo_jobs {
        let created = state.store().create_job(job).await?;
        println!("Seeded {} ({})", created.id, created.title);
    }
    Ok(())
}
