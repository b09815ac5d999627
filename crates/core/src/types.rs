//! Job and status types.
//!
//! The remote service reports job state as a numeric code. This module
//! maps those codes into a typed [`JobStatus`] and defines the [`Job`]
//! record the orchestrator carries from submission to completion.

use serde::{Deserialize, Serialize};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Lifecycle state of a generation job, mapped from the server's
/// numeric status code.
///
/// Codes outside the known set map to [`JobStatus::Unknown`] so that a
/// new server-side state never crashes the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Accepted by the server, not yet running (code `0`).
    Pending,
    /// Generation in progress (code `10`).
    Running,
    /// Finished successfully, result available (code `20`).
    Completed,
    /// Generation failed server-side (code `30`).
    Failed,
    /// Cancelled before completion (code `40`).
    Cancelled,
    /// Any status code the client does not recognize.
    Unknown(i32),
}

impl JobStatus {
    /// Map a server status code to a typed status.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Pending,
            10 => Self::Running,
            20 => Self::Completed,
            30 => Self::Failed,
            40 => Self::Cancelled,
            other => Self::Unknown(other),
        }
    }

    /// Whether this status ends the job's lifecycle.
    ///
    /// `Unknown` is deliberately non-terminal: the monitor keeps polling
    /// until a recognizable terminal code or its own limits apply.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Unknown(code) => write!(f, "unknown({code})"),
        }
    }
}

/// One server-side generation task tracked by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Identifier assigned by the server on submission.
    pub job_id: String,
    /// Secondary identifier some endpoints require alongside `job_id`.
    pub flow_id: Option<String>,
    /// Last observed status.
    pub status: JobStatus,
    /// Server-supplied completion percentage (0-100). The client never
    /// interpolates this value.
    pub progress: u8,
    /// Result image URL, populated only once the job completes.
    pub result_url: Option<String>,
}

impl Job {
    /// A freshly submitted job in `Pending` state.
    pub fn pending(job_id: String, flow_id: Option<String>) -> Self {
        Self {
            job_id,
            flow_id,
            status: JobStatus::Pending,
            progress: 0,
            result_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_named_statuses() {
        assert_eq!(JobStatus::from_code(0), JobStatus::Pending);
        assert_eq!(JobStatus::from_code(10), JobStatus::Running);
        assert_eq!(JobStatus::from_code(20), JobStatus::Completed);
        assert_eq!(JobStatus::from_code(30), JobStatus::Failed);
        assert_eq!(JobStatus::from_code(40), JobStatus::Cancelled);
    }

    #[test]
    fn unknown_codes_map_to_unknown_not_panic() {
        for code in [-1, 1, 5, 11, 25, 50, 99, i32::MAX, i32::MIN] {
            assert_eq!(JobStatus::from_code(code), JobStatus::Unknown(code));
        }
    }

    #[test]
    fn unknown_status_is_clearly_labeled() {
        assert_eq!(JobStatus::Unknown(55).to_string(), "unknown(55)");
    }

    #[test]
    fn terminal_statuses() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(!JobStatus::Unknown(55).is_terminal());
    }

    #[test]
    fn pending_job_starts_at_zero_progress() {
        let job = Job::pending("j-1".into(), Some("f-1".into()));
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.progress, 0);
        assert!(job.result_url.is_none());
    }
}
