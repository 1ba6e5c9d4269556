// Common module - shared types and utilities across all modules

pub mod error;
pub mod helpers;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use error::{MatchError, ProvisionError, StoreError};
pub use helpers::safe_email_log;
pub use state::AppState;
pub use validation::{ValidationError, ValidationResult, Validator};
