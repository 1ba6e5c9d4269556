// src/matching/mod.rs

pub mod extraction;
pub mod models;
pub mod provisioner;
pub mod runner;
pub mod scorer;
pub mod validators;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use extraction::{Extraction, MockSkillExtractor, SkillExtractor, TextSkillExtractor};
pub use models::{CvFile, MatchResult};
pub use provisioner::{CandidateProvisioner, Provisioned};
pub use runner::{run_bulk_matching, run_per_job_matching, run_server_matching};
pub use scorer::{best_job, classify, match_score, MatchConfig};
