//! Job submission: uploads, pipeline resolution, parameter assembly.

use std::path::PathBuf;

use stylepanel_client::api::ApiError;
use stylepanel_client::service::GenerationService;
use stylepanel_core::params::{PanelInputs, SubmissionParams};
use stylepanel_core::types::Job;
use stylepanel_core::worktype::{self, Category};

/// Everything the panel hands over when the user hits generate.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    /// Image the generation transforms, usually a viewport capture.
    pub original_image: PathBuf,
    /// Optional style-reference image.
    pub reference_image: Option<PathBuf>,
    /// Selected work category.
    pub category: Category,
    /// Selected option within the category.
    pub option: String,
    /// Prompt and slider values from the panel.
    pub inputs: PanelInputs,
}

/// Why a submission did not produce a job.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// No auth token is installed; the user must log in first.
    #[error("not authenticated; log in before submitting")]
    Auth,

    /// The primary image could not be uploaded. Without it there is
    /// nothing to generate from.
    #[error("primary image upload failed: {0}")]
    Upload(#[source] ApiError),

    /// The submission endpoint rejected the job.
    #[error("job submission failed: {0}")]
    Submission(#[source] ApiError),
}

/// Upload the request's images and submit a generation job.
///
/// The primary image is mandatory and its upload failure aborts the
/// submission. The reference image is best-effort: if its upload fails
/// the job is submitted without it and the degradation is logged.
pub async fn submit<S: GenerationService>(
    service: &S,
    request: &SubmitRequest,
) -> Result<Job, SubmitError> {
    if !service.authenticated() {
        return Err(SubmitError::Auth);
    }

    let original_url = service
        .upload_asset(&request.original_image)
        .await
        .map_err(SubmitError::Upload)?;

    let reference_url = match &request.reference_image {
        Some(path) => match service.upload_asset(path).await {
            Ok(url) => Some(url),
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %error,
                    "Reference image upload failed; submitting without it"
                );
                None
            }
        },
        None => None,
    };

    let work_type = worktype::resolve(request.category, &request.option);
    let params = SubmissionParams::assemble(&work_type, &request.inputs, original_url, reference_url);

    let request_id = uuid::Uuid::new_v4().to_string();
    let submitted = service
        .submit_job(&params, &request_id)
        .await
        .map_err(SubmitError::Submission)?;

    tracing::info!(
        job_id = %submitted.job_id,
        work_type = work_type.code,
        request_id = %request_id,
        "Job submitted"
    );
    Ok(Job::pending(submitted.job_id, submitted.flow_id))
}
