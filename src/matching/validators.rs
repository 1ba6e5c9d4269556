// src/matching/validators.rs

use crate::common::{ValidationResult, Validator};
use crate::matching::models::CvFile;

/// Per-batch file count bounds.
pub const MAX_BATCH_FILES: usize = 100;

/// Which upload surface the batch is headed for. The server bulk endpoint
/// only takes PDFs; the client-side modes take any known document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    ClientSide,
    ServerSide,
}

impl UploadMode {
    fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            UploadMode::ClientSide => &["pdf", "doc", "docx", "txt"],
            UploadMode::ServerSide => &["pdf"],
        }
    }
}

/// Input guard for an upload batch. Blocks the action before any network
/// call when the batch is empty, oversized, or contains a disallowed file
/// type.
pub struct UploadValidator {
    pub mode: UploadMode,
}

impl Validator<[CvFile]> for UploadValidator {
    fn validate(&self, files: &[CvFile]) -> ValidationResult {
        let mut result = ValidationResult::new();

        if files.is_empty() {
            result.add_error("files", "Please select at least 1 file");
        } else if files.len() > MAX_BATCH_FILES {
            result.add_error("files", "Maximum 100 files allowed");
        }

        let allowed = self.mode.allowed_extensions();
        for file in files {
            let ok = file
                .extension()
                .map(|ext| allowed.contains(&ext.as_str()))
                .unwrap_or(false);
            if !ok {
                result.add_error(
                    "files",
                    &format!(
                        "{}: only {} files are allowed",
                        file.name,
                        allowed.join("/")
                    ),
                );
            }
        }

        result
    }
}
