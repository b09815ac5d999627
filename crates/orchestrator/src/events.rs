//! Broadcast events emitted while a job is monitored.

use serde::Serialize;
use stylepanel_core::types::{JobStatus, Timestamp};

/// Events published on the orchestrator's broadcast channel.
///
/// Subscribers receive one `Progress` event per successful poll and
/// exactly one terminal event per monitored job.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobEvent {
    /// A polling tick that did not end the job. After a failed status
    /// query this carries the last-known status and progress plus a
    /// `detail` describing the failure.
    Progress {
        job_id: String,
        status: JobStatus,
        progress: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
        at: Timestamp,
    },
    /// Result available, either server-reported or detected early.
    Completed {
        job_id: String,
        result_url: Option<String>,
        at: Timestamp,
    },
    /// The server reported the job as failed.
    Failed {
        job_id: String,
        message: String,
        at: Timestamp,
    },
    /// Monitoring stopped by cancellation, local or server-side.
    Cancelled { job_id: String, at: Timestamp },
    /// Too many consecutive status queries failed. The job itself may
    /// still be running server-side.
    PollingFailed {
        job_id: String,
        failures: u32,
        at: Timestamp,
    },
    /// Attempt ceiling reached without observing a terminal status.
    TimedOut {
        job_id: String,
        attempts: u32,
        at: Timestamp,
    },
}

impl JobEvent {
    /// The job this event belongs to.
    pub fn job_id(&self) -> &str {
        match self {
            Self::Progress { job_id, .. }
            | Self::Completed { job_id, .. }
            | Self::Failed { job_id, .. }
            | Self::Cancelled { job_id, .. }
            | Self::PollingFailed { job_id, .. }
            | Self::TimedOut { job_id, .. } => job_id,
        }
    }

    /// Whether this event ends the job's event stream.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_the_only_non_terminal_event() {
        let at = chrono::Utc::now();
        let progress = JobEvent::Progress {
            job_id: "j-1".into(),
            status: JobStatus::Running,
            progress: 10,
            detail: None,
            at,
        };
        assert!(!progress.is_terminal());
        assert_eq!(progress.job_id(), "j-1");

        let done = JobEvent::Completed {
            job_id: "j-1".into(),
            result_url: None,
            at,
        };
        assert!(done.is_terminal());
    }
}
