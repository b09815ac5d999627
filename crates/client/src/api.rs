//! HTTP client for the generation service endpoints.
//!
//! Wraps login, asset upload, job submission, status polling, detail
//! retrieval and cancellation using [`reqwest`]. All endpoints share
//! the [`wire::Envelope`] response shape; `parse_envelope` converts a
//! response into the payload or an [`ApiError`].

use std::path::Path;
use std::sync::RwLock;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::wire::{self, DetailsData, Envelope, StatusData, SubmitData};
use stylepanel_core::params::SubmissionParams;

/// HTTP client bound to one service deployment.
///
/// Holds the base URL and the bearer token; the token is interior-
/// mutable so a shared handle can be refreshed after login without
/// rebuilding the client.
pub struct StyleApi {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

/// Errors from the REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The envelope carried a non-zero service code.
    #[error("service error ({code}): {message}")]
    Service { code: i32, message: String },

    /// A 2xx response that does not match the expected payload shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// No bearer token is available for an authenticated endpoint.
    #[error("no auth token; log in first")]
    MissingToken,

    /// The asset to upload is unusable before any request is made.
    #[error("unusable asset {path}: {reason}")]
    InvalidAsset { path: String, reason: String },
}

impl StyleApi {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Install a bearer token obtained from a cache or a prior login.
    pub fn set_token(&self, token: String) {
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    /// Whether a bearer token is currently installed.
    pub fn has_token(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    fn bearer(&self) -> Result<String, ApiError> {
        self.token
            .read()
            .expect("token lock poisoned")
            .clone()
            .ok_or(ApiError::MissingToken)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Exchange phone + password for a bearer token.
    ///
    /// Installs the token on success and also returns it so callers can
    /// persist it.
    pub async fn login(&self, phone: &str, password: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({
            "phone": phone,
            "password": password,
        });

        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&body)
            .send()
            .await?;

        let data: wire::LoginData = Self::parse_envelope(response).await?;
        tracing::info!("Logged in to generation service");
        self.set_token(data.token.clone());
        Ok(data.token)
    }

    /// Upload an image file and return its public URL.
    ///
    /// Rejects missing or empty files before issuing any request.
    pub async fn upload_asset(&self, path: &Path) -> Result<String, ApiError> {
        let token = self.bearer()?;

        let metadata = tokio::fs::metadata(path).await.map_err(|e| ApiError::InvalidAsset {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        if metadata.len() == 0 {
            return Err(ApiError::InvalidAsset {
                path: path.display().to_string(),
                reason: "file is empty".into(),
            });
        }

        let bytes = tokio::fs::read(path).await.map_err(|e| ApiError::InvalidAsset {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.png".to_string());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/api/assets/upload"))
            .bearer_auth(&token)
            .multipart(form)
            .send()
            .await?;

        let data: wire::UploadData = Self::parse_envelope(response).await?;
        tracing::debug!(url = %data.url, "Asset uploaded");
        Ok(data.url)
    }

    /// Submit a generation job.
    ///
    /// `request_id` is a client-generated UUID attached to the request
    /// so retries and logs can be correlated server-side.
    pub async fn submit_job(
        &self,
        params: &SubmissionParams,
        request_id: &str,
    ) -> Result<SubmitData, ApiError> {
        let token = self.bearer()?;

        let mut body = serde_json::to_value(params)
            .map_err(|e| ApiError::Malformed(format!("unencodable params: {e}")))?;
        body.as_object_mut()
            .ok_or_else(|| ApiError::Malformed("params did not serialize to an object".into()))?
            .insert("request_id".into(), serde_json::Value::String(request_id.into()));

        let response = self
            .client
            .post(self.url("/api/jobs"))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;

        let data: SubmitData = Self::parse_envelope(response).await?;
        if data.job_id.is_empty() {
            return Err(ApiError::Malformed("submission response missing job_id".into()));
        }
        Ok(data)
    }

    /// Query the current status code and progress of a job.
    pub async fn query_status(
        &self,
        job_id: &str,
        flow_id: Option<&str>,
    ) -> Result<StatusData, ApiError> {
        let token = self.bearer()?;

        let mut request = self
            .client
            .get(self.url(&format!("/api/jobs/{job_id}/status")))
            .bearer_auth(&token);
        if let Some(flow_id) = flow_id {
            request = request.query(&[("flow_id", flow_id)]);
        }

        Self::parse_envelope(request.send().await?).await
    }

    /// Fetch the detail record of a job (result URLs, etc.).
    pub async fn task_details(&self, job_id: &str) -> Result<DetailsData, ApiError> {
        let token = self.bearer()?;

        let response = self
            .client
            .get(self.url(&format!("/api/jobs/{job_id}")))
            .bearer_auth(&token)
            .send()
            .await?;

        Self::parse_envelope(response).await
    }

    /// Ask the server to cancel a job. Best-effort.
    pub async fn cancel_job(&self, job_id: &str) -> Result<(), ApiError> {
        let token = self.bearer()?;

        let response = self
            .client
            .post(self.url(&format!("/api/jobs/{job_id}/cancel")))
            .bearer_auth(&token)
            .send()
            .await?;

        let _: serde_json::Value = Self::parse_envelope(response).await?;
        Ok(())
    }

    // ---- private helpers ----

    /// Convert a response into its envelope payload.
    ///
    /// Non-2xx statuses, non-zero envelope codes, and missing payloads
    /// each map to their own [`ApiError`] variant.
    async fn parse_envelope<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        if envelope.code != 0 {
            return Err(ApiError::Service {
                code: envelope.code,
                message: envelope.msg.unwrap_or_else(|| "<no message>".to_string()),
            });
        }

        envelope
            .data
            .ok_or_else(|| ApiError::Malformed("success envelope without data".into()))
    }
}
