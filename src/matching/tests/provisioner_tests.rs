// src/matching/tests/provisioner_tests.rs

use std::sync::Arc;

use super::support::{job, match_result, MockStore};
use crate::applications::ApplicationStatus;
use crate::common::ProvisionError;
use crate::jobs::JobStatus;
use crate::matching::provisioner::{
    display_name_from_file, email_handle, CandidateProvisioner, MAX_EMAIL_PROBES,
    PLACEHOLDER_PHONE,
};

fn provisioner(store: Arc<MockStore>) -> CandidateProvisioner {
    CandidateProvisioner::new(store)
}

#[test]
fn test_display_name_strips_extension_and_separators() {
    assert_eq!(display_name_from_file("jane-doe.pdf"), "jane doe");
    assert_eq!(display_name_from_file("John_Smith.DOCX"), "John Smith");
    assert_eq!(display_name_from_file("resume.txt"), "resume");
    // Unknown extensions are kept; only document extensions are stripped.
    assert_eq!(display_name_from_file("archive.tar"), "archive.tar");
}

#[test]
fn test_email_handle_strips_non_alphanumerics() {
    assert_eq!(email_handle("jane doe"), "janedoe");
    assert_eq!(email_handle("John Smith"), "johnsmith");
    assert_eq!(email_handle("Anne-Marie O'Neil"), "annemarieoneil");
}

#[tokio::test]
async fn test_provision_creates_candidate_and_application() {
    let store = Arc::new(MockStore::new());
    let result = match_result(
        "jane-doe.pdf",
        &["Python", "Django"],
        job("job-3", "Python/Django backend", JobStatus::Open),
        85,
    );

    let provisioned = provisioner(store.clone()).provision(&result).await.unwrap();

    assert_eq!(provisioned.candidate.name, "jane doe");
    assert_eq!(provisioned.candidate.email, "janedoe@example.com");
    assert_eq!(provisioned.candidate.phone, PLACEHOLDER_PHONE);
    assert_eq!(provisioned.candidate.resume_url, "/resumes/jane-doe.pdf");

    assert_eq!(provisioned.application.status, ApplicationStatus::Screening);
    assert_eq!(provisioned.application.rating, 0);
    assert_eq!(provisioned.application.match_score, 85);
    assert_eq!(provisioned.application.job, "job-3");
    assert!(provisioned.application.notes.contains("85% match score"));
    assert!(provisioned.application.notes.contains("Python, Django"));
    assert!(!provisioned.application.ai_summary.is_empty());

    assert_eq!(store.candidates.lock().unwrap().len(), 1);
    assert_eq!(store.applications.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_uniqueness_probe_appends_numeric_suffix() {
    let seed_store = MockStore::new();
    let seeded = vec![seed_store.candidate("janedoe@example.com")];
    let store = Arc::new(MockStore::new().with_candidates(seeded));

    let result = match_result(
        "jane-doe.pdf",
        &["Python"],
        job("job-1", "Python", JobStatus::Open),
        100,
    );

    let provisioned = provisioner(store).provision(&result).await.unwrap();
    assert_eq!(provisioned.candidate.email, "janedoe2@example.com");
}

#[tokio::test]
async fn test_uniqueness_probe_walks_past_taken_suffixes() {
    let seed_store = MockStore::new();
    let seeded = vec![
        seed_store.candidate("janedoe@example.com"),
        seed_store.candidate("janedoe2@example.com"),
    ];
    let store = Arc::new(MockStore::new().with_candidates(seeded));

    let result = match_result(
        "jane_doe.pdf",
        &["Python"],
        job("job-1", "Python", JobStatus::Open),
        100,
    );

    let provisioned = provisioner(store).provision(&result).await.unwrap();
    assert_eq!(provisioned.candidate.email, "janedoe3@example.com");
}

#[tokio::test]
async fn test_probe_cap_proceeds_with_last_derived_email() {
    // Every email reports taken: the loop must stop at the cap and hand the
    // last derived email to the store rather than probing forever.
    let mut store = MockStore::new();
    store.probe_always_taken = true;
    let store = Arc::new(store);

    let result = match_result(
        "jane-doe.pdf",
        &["Python"],
        job("job-1", "Python", JobStatus::Open),
        100,
    );

    let provisioned = provisioner(store.clone()).provision(&result).await.unwrap();

    use std::sync::atomic::Ordering;
    assert_eq!(store.email_probes.load(Ordering::SeqCst), MAX_EMAIL_PROBES);
    assert_eq!(
        provisioned.candidate.email,
        format!("janedoe{}@example.com", MAX_EMAIL_PROBES + 1)
    );
}

#[tokio::test]
async fn test_probe_failure_proceeds_with_current_email() {
    // Availability over correctness: the probe channel failing must not
    // block provisioning.
    let mut store = MockStore::new();
    store.fail_email_probe = true;
    let store = Arc::new(store);

    let result = match_result(
        "jane-doe.pdf",
        &["Python"],
        job("job-1", "Python", JobStatus::Open),
        100,
    );

    let provisioned = provisioner(store).provision(&result).await.unwrap();
    assert_eq!(provisioned.candidate.email, "janedoe@example.com");
}

#[tokio::test]
async fn test_duplicate_application_aborts_second_attempt() {
    // Probe disabled: both attempts resolve the same email, so the second
    // must trip the duplicate guard and write no second application.
    let mut store = MockStore::new();
    store.probe_sees_candidates = false;
    let store = Arc::new(store);

    let result = match_result(
        "jane-doe.pdf",
        &["Python"],
        job("job-1", "Python", JobStatus::Open),
        100,
    );

    let provisioner = CandidateProvisioner::new(store.clone());
    provisioner.provision(&result).await.unwrap();

    let err = provisioner.provision(&result).await.unwrap_err();
    assert!(matches!(err, ProvisionError::DuplicateApplication));
    assert_eq!(store.applications.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_candidate_rejection_carries_server_payload() {
    let mut store = MockStore::new();
    store.reject_candidate_create = Some("{\"email\":[\"invalid\"]}".to_string());
    let store = Arc::new(store);

    let result = match_result(
        "jane-doe.pdf",
        &["Python"],
        job("job-1", "Python", JobStatus::Open),
        100,
    );

    let err = provisioner(store.clone()).provision(&result).await.unwrap_err();
    match err {
        ProvisionError::CandidateCreationFailed { detail } => {
            assert_eq!(detail, "{\"email\":[\"invalid\"]}");
        }
        other => panic!("expected CandidateCreationFailed, got {:?}", other),
    }
    assert!(store.applications.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_application_rejection_leaves_candidate_in_place() {
    // No rollback: the candidate write stands when the application write
    // fails afterwards.
    let mut store = MockStore::new();
    store.reject_application_create = Some("job closed".to_string());
    let store = Arc::new(store);

    let result = match_result(
        "jane-doe.pdf",
        &["Python"],
        job("job-1", "Python", JobStatus::Open),
        100,
    );

    let err = provisioner(store.clone()).provision(&result).await.unwrap_err();
    match err {
        ProvisionError::ApplicationCreationFailed { detail } => {
            assert_eq!(detail, "job closed");
        }
        other => panic!("expected ApplicationCreationFailed, got {:?}", other),
    }
    assert_eq!(store.candidates.lock().unwrap().len(), 1);
    assert!(store.applications.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_sequential_batch_provisioning_avoids_email_collision() {
    // Two CVs deriving the same handle in one batch: the second probe must
    // observe the first write and pick the next suffix.
    let store = Arc::new(MockStore::new());
    let provisioner = CandidateProvisioner::new(store.clone());

    let first = match_result(
        "jane-doe.pdf",
        &["Python"],
        job("job-1", "Python", JobStatus::Open),
        100,
    );
    let second = match_result(
        "jane_doe.pdf",
        &["Python"],
        job("job-2", "Python", JobStatus::Open),
        100,
    );

    let a = provisioner.provision(&first).await.unwrap();
    let b = provisioner.provision(&second).await.unwrap();

    assert_eq!(a.candidate.email, "janedoe@example.com");
    assert_eq!(b.candidate.email, "janedoe2@example.com");
}
