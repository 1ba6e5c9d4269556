// src/jobs/mod.rs

pub mod models;

pub use models::{CreateJob, Job, JobStatus};
