//! Submission flow tests against the scripted service.

mod common;

use std::path::PathBuf;

use assert_matches::assert_matches;

use common::FakeService;
use stylepanel_core::params::PanelInputs;
use stylepanel_core::worktype::{Category, GENERIC_WORK_TYPE};
use stylepanel_orchestrator::submit::{submit, SubmitError, SubmitRequest};

fn request(category: Category, option: &str) -> SubmitRequest {
    SubmitRequest {
        original_image: PathBuf::from("/tmp/viewport.png"),
        reference_image: None,
        category,
        option: option.to_string(),
        inputs: PanelInputs::default(),
    }
}

#[tokio::test]
async fn unauthenticated_submission_is_rejected() {
    let service = FakeService::unauthenticated();
    let result = submit(&service, &request(Category::Interior, "line-art")).await;
    assert_matches!(result, Err(SubmitError::Auth));
    assert!(service.submissions().is_empty());
}

#[tokio::test]
async fn primary_upload_failure_aborts_submission() {
    let service = FakeService::new();
    service.fail_upload();
    let result = submit(&service, &request(Category::Interior, "line-art")).await;
    assert_matches!(result, Err(SubmitError::Upload(_)));
    assert!(service.submissions().is_empty());
}

#[tokio::test]
async fn reference_upload_failure_degrades_gracefully() {
    let service = FakeService::new();
    service.push_upload("https://cdn.test/original.png");
    service.fail_upload();

    let mut req = request(Category::Interior, "line-art");
    req.reference_image = Some(PathBuf::from("/tmp/reference.png"));

    let job = submit(&service, &req).await.unwrap();
    assert_eq!(job.job_id, "job-1");

    let submissions = service.submissions();
    assert_eq!(submissions.len(), 1);
    let (params, _) = &submissions[0];
    assert_eq!(params.original_url, "https://cdn.test/original.png");
    assert!(params.reference_url.is_none());
}

#[tokio::test]
async fn submission_carries_resolved_work_type_and_request_id() {
    let service = FakeService::new();
    let job = submit(&service, &request(Category::Interior, "line-art"))
        .await
        .unwrap();
    assert_eq!(job.flow_id.as_deref(), Some("flow-1"));

    let submissions = service.submissions();
    let (params, request_id) = &submissions[0];
    assert_eq!(params.work_type, 112);
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn unmapped_option_falls_back_to_generic_pipeline() {
    let service = FakeService::new();
    submit(&service, &request(Category::Landscape, "no-such-option"))
        .await
        .unwrap();

    let submissions = service.submissions();
    assert_eq!(submissions[0].0.work_type, GENERIC_WORK_TYPE);
}
