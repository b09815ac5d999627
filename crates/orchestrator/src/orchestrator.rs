//! Single-session orchestration of submit plus monitor.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use stylepanel_client::service::GenerationService;
use stylepanel_core::types::Job;

use crate::events::JobEvent;
use crate::monitor::{Monitor, Outcome};
use crate::submit::{self, SubmitError, SubmitRequest};

const EVENT_CHANNEL_CAPACITY: usize = 256;

struct ActiveMonitor {
    job_id: String,
    cancel: CancellationToken,
    handle: JoinHandle<Outcome>,
}

/// Owns the one-at-a-time submit/monitor lifecycle.
///
/// Submitting while a previous job is still monitored tears the old
/// session down first; the panel only ever shows one job. All progress
/// and terminal events go out on a broadcast channel obtained via
/// [`Orchestrator::subscribe`].
pub struct Orchestrator<S> {
    service: Arc<S>,
    events: broadcast::Sender<JobEvent>,
    active: tokio::sync::Mutex<Option<ActiveMonitor>>,
}

impl<S: GenerationService + 'static> Orchestrator<S> {
    pub fn new(service: Arc<S>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            service,
            events,
            active: tokio::sync::Mutex::new(None),
        }
    }

    /// Subscribe to job events. Late subscribers miss earlier events.
    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.events.subscribe()
    }

    /// The job currently being monitored, if any.
    pub async fn active_job(&self) -> Option<String> {
        self.active.lock().await.as_ref().map(|a| a.job_id.clone())
    }

    /// Submit a job and start monitoring it in the background.
    ///
    /// Any previous monitor session is cancelled first.
    pub async fn submit(&self, request: &SubmitRequest) -> Result<Job, SubmitError> {
        let mut active = self.active.lock().await;
        if let Some(previous) = active.take() {
            tracing::info!(job_id = %previous.job_id, "Replacing active monitor session");
            previous.cancel.cancel();
        }

        let job = submit::submit(self.service.as_ref(), request).await?;

        let monitor = Monitor::new(Arc::clone(&self.service), job.clone(), self.events.clone());
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(monitor.run(cancel.clone()));
        *active = Some(ActiveMonitor {
            job_id: job.job_id.clone(),
            cancel,
            handle,
        });
        Ok(job)
    }

    /// Cancel the active job, if any. Safe to call repeatedly.
    ///
    /// Local monitoring stops immediately; the server-side cancel is
    /// best-effort and its failure only logged.
    pub async fn cancel(&self) {
        let Some(active) = self.active.lock().await.take() else {
            return;
        };
        tracing::info!(job_id = %active.job_id, "Cancelling job");
        active.cancel.cancel();
        if let Err(error) = self.service.cancel_job(&active.job_id).await {
            tracing::warn!(
                job_id = %active.job_id,
                error = %error,
                "Server-side cancel failed; job may still run to completion"
            );
        }
    }

    /// Wait for the active monitor session to finish.
    ///
    /// Returns `None` when no session is active or the monitor task was
    /// aborted.
    pub async fn wait(&self) -> Option<Outcome> {
        let active = self.active.lock().await.take()?;
        active.handle.await.ok()
    }
}
