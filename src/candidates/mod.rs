// src/candidates/mod.rs

pub mod models;

pub use models::{Candidate, NewCandidate};
