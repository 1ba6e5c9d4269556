// src/applications/mod.rs

pub mod models;

pub use models::{Application, ApplicationStatus, MatchStatus, NewApplication, PIPELINE_ORDER};
