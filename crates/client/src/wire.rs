//! Wire formats for the generation service's REST API.
//!
//! Every endpoint answers with the same envelope shape
//! `{"code": <i32>, "msg": <string?>, "data": {...}}` where a non-zero
//! `code` is a service-level failure even when the HTTP status is 200.
//! This module defines the envelope, the per-endpoint payloads, and the
//! result-URL extraction the details endpoint needs.

use serde::Deserialize;

/// Common response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Service status code; `0` means success.
    pub code: i32,
    /// Human-readable message accompanying non-zero codes.
    #[serde(default)]
    pub msg: Option<String>,
    /// Endpoint-specific payload. Absent on failures; a missing field
    /// deserializes as `None` without requiring `T: Default`.
    pub data: Option<T>,
}

/// Payload of the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
}

/// Payload of the asset-upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadData {
    /// Public URL of the stored asset.
    pub url: String,
}

/// Payload of the job-submission endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitData {
    pub job_id: String,
    #[serde(default)]
    pub flow_id: Option<String>,
}

/// Payload of the status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusData {
    /// Numeric job status code (see `stylepanel_core::types::JobStatus`).
    pub status: i32,
    /// Server-computed completion percentage.
    #[serde(default)]
    pub progress: i32,
}

impl StatusData {
    /// Progress clamped into the 0-100 range the rest of the client uses.
    pub fn progress_pct(&self) -> u8 {
        self.progress.clamp(0, 100) as u8
    }
}

/// Payload of the task-details endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailsData {
    /// Result location. Either a plain URL or a JSON-encoded array of
    /// URLs, depending on the pipeline. May be absent or empty while
    /// the job is still running.
    #[serde(default)]
    pub result: Option<String>,
}

impl DetailsData {
    /// Extract the first usable result URL.
    ///
    /// Some pipelines return a single URL string, others a JSON-encoded
    /// array of URLs; in the array case the first non-empty entry wins.
    pub fn first_result_url(&self) -> Option<String> {
        let raw = self.result.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.starts_with('[') {
            let urls: Vec<String> = serde_json::from_str(raw).ok()?;
            return urls.into_iter().find(|u| !u.trim().is_empty());
        }
        Some(raw.to_string())
    }
}
