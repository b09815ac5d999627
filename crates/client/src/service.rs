//! Orchestrator-facing abstraction over the remote service.
//!
//! The orchestrator talks to the service exclusively through
//! [`GenerationService`] so its submit flow and polling state machine
//! can be exercised against scripted fakes. [`crate::api::StyleApi`]
//! is the production implementation.

use std::path::Path;

use async_trait::async_trait;

use crate::api::{ApiError, StyleApi};
use crate::wire::{DetailsData, StatusData, SubmitData};
use stylepanel_core::params::SubmissionParams;

/// The slice of the REST API the orchestrator consumes.
///
/// Interactive login deliberately stays off this trait; the
/// orchestrator requires a token to already be installed.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Whether an auth token is available.
    fn authenticated(&self) -> bool;

    /// Upload an image file, returning its public URL.
    async fn upload_asset(&self, path: &Path) -> Result<String, ApiError>;

    /// Submit a job with a client-generated request ID.
    async fn submit_job(
        &self,
        params: &SubmissionParams,
        request_id: &str,
    ) -> Result<SubmitData, ApiError>;

    /// Poll the status endpoint.
    async fn query_status(
        &self,
        job_id: &str,
        flow_id: Option<&str>,
    ) -> Result<StatusData, ApiError>;

    /// Fetch the detail record (result URLs).
    async fn task_details(&self, job_id: &str) -> Result<DetailsData, ApiError>;

    /// Best-effort server-side cancellation.
    async fn cancel_job(&self, job_id: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl GenerationService for StyleApi {
    fn authenticated(&self) -> bool {
        self.has_token()
    }

    async fn upload_asset(&self, path: &Path) -> Result<String, ApiError> {
        StyleApi::upload_asset(self, path).await
    }

    async fn submit_job(
        &self,
        params: &SubmissionParams,
        request_id: &str,
    ) -> Result<SubmitData, ApiError> {
        StyleApi::submit_job(self, params, request_id).await
    }

    async fn query_status(
        &self,
        job_id: &str,
        flow_id: Option<&str>,
    ) -> Result<StatusData, ApiError> {
        StyleApi::query_status(self, job_id, flow_id).await
    }

    async fn task_details(&self, job_id: &str) -> Result<DetailsData, ApiError> {
        StyleApi::task_details(self, job_id).await
    }

    async fn cancel_job(&self, job_id: &str) -> Result<(), ApiError> {
        StyleApi::cancel_job(self, job_id).await
    }
}
