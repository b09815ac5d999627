//! Status polling until a terminal outcome.
//!
//! [`Monitor::run`] drives the polling loop on a timer; [`Monitor::tick`]
//! performs exactly one poll and decides what happens next, so tests can
//! drive the state machine without any timer or real service.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use stylepanel_client::service::GenerationService;
use stylepanel_core::types::{Job, JobStatus};

use crate::events::JobEvent;
use crate::interval::{
    poll_delay, EARLY_RESULT_PROGRESS, FAILURE_RETRY_DELAY, MAX_ATTEMPTS,
    MAX_CONSECUTIVE_FAILURES,
};
use crate::session::MonitorSession;

/// Terminal result of a monitor session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The job finished; `result_url` is absent only when the details
    /// endpoint yielded no usable URL.
    Completed { result_url: Option<String> },
    /// The server reported the job as failed.
    Failed { message: String },
    /// Monitoring was cancelled, locally or server-side.
    Cancelled,
    /// Consecutive status queries failed; the job's true state is
    /// unknown.
    PollingFailure { failures: u32 },
    /// The attempt ceiling was reached without a terminal status.
    TimedOut { attempts: u32 },
}

/// What one polling tick decided.
#[derive(Debug)]
pub enum Tick {
    /// Poll again after the given delay.
    Continue(Duration),
    /// Monitoring is over.
    Terminal(Outcome),
}

/// Polls one job's status until it reaches a terminal outcome.
pub struct Monitor<S> {
    service: Arc<S>,
    job: Job,
    session: MonitorSession,
    events: broadcast::Sender<JobEvent>,
}

impl<S: GenerationService> Monitor<S> {
    pub fn new(service: Arc<S>, job: Job, events: broadcast::Sender<JobEvent>) -> Self {
        Self {
            service,
            job,
            session: MonitorSession::new(),
            events,
        }
    }

    /// Last known view of the monitored job.
    pub fn job(&self) -> &Job {
        &self.job
    }

    /// Run the polling loop until a terminal outcome or cancellation.
    ///
    /// Cancellation is observed between polls; a status query already
    /// in flight is allowed to finish.
    pub async fn run(mut self, cancel: CancellationToken) -> Outcome {
        loop {
            let delay = match self.tick().await {
                Tick::Terminal(outcome) => return outcome,
                Tick::Continue(delay) => delay,
            };

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(job_id = %self.job.job_id, "Monitoring cancelled");
                    self.emit(JobEvent::Cancelled {
                        job_id: self.job.job_id.clone(),
                        at: chrono::Utc::now(),
                    });
                    return Outcome::Cancelled;
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// Perform one polling tick.
    ///
    /// A tick queries the status endpoint once, updates the session
    /// counters, emits the matching event and decides whether to keep
    /// polling. The attempt ceiling is checked before polling, so the
    /// service is never queried more than [`MAX_ATTEMPTS`] times.
    pub async fn tick(&mut self) -> Tick {
        if self.session.attempts() >= MAX_ATTEMPTS {
            let attempts = self.session.attempts();
            tracing::warn!(
                job_id = %self.job.job_id,
                attempts,
                "Giving up on job monitoring; no terminal status in time"
            );
            self.emit(JobEvent::TimedOut {
                job_id: self.job.job_id.clone(),
                attempts,
                at: chrono::Utc::now(),
            });
            return Tick::Terminal(Outcome::TimedOut { attempts });
        }

        self.session.begin_attempt();
        let status = match self
            .service
            .query_status(&self.job.job_id, self.job.flow_id.as_deref())
            .await
        {
            Ok(status) => status,
            Err(error) => return self.query_failed(&error),
        };
        self.session.reset_failures();

        let progress = status.progress_pct();
        let status = JobStatus::from_code(status.status);
        self.job.status = status;
        self.job.progress = progress;

        match status {
            JobStatus::Completed => self.complete().await,
            JobStatus::Failed => {
                let message = "job failed server-side".to_string();
                tracing::warn!(job_id = %self.job.job_id, "Job failed");
                self.emit(JobEvent::Failed {
                    job_id: self.job.job_id.clone(),
                    message: message.clone(),
                    at: chrono::Utc::now(),
                });
                Tick::Terminal(Outcome::Failed { message })
            }
            JobStatus::Cancelled => {
                tracing::info!(job_id = %self.job.job_id, "Job cancelled server-side");
                self.emit(JobEvent::Cancelled {
                    job_id: self.job.job_id.clone(),
                    at: chrono::Utc::now(),
                });
                Tick::Terminal(Outcome::Cancelled)
            }
            JobStatus::Pending | JobStatus::Running | JobStatus::Unknown(_) => {
                // Late in a render the result often lands before the
                // status flips; a usable URL means the job is done.
                if status == JobStatus::Running && progress >= EARLY_RESULT_PROGRESS {
                    if let Some(result_url) = self.probe_result().await {
                        tracing::info!(
                            job_id = %self.job.job_id,
                            progress,
                            "Result available before terminal status"
                        );
                        self.job.status = JobStatus::Completed;
                        self.job.result_url = Some(result_url.clone());
                        self.emit(JobEvent::Completed {
                            job_id: self.job.job_id.clone(),
                            result_url: Some(result_url.clone()),
                            at: chrono::Utc::now(),
                        });
                        return Tick::Terminal(Outcome::Completed {
                            result_url: Some(result_url),
                        });
                    }
                }

                let stable = self.session.observe(status, progress);
                let delay = poll_delay(progress, stable);
                tracing::debug!(
                    job_id = %self.job.job_id,
                    status = %status,
                    progress,
                    stable,
                    next_poll_secs = delay.as_secs(),
                    "Job status polled"
                );
                self.emit(JobEvent::Progress {
                    job_id: self.job.job_id.clone(),
                    status,
                    progress,
                    detail: None,
                    at: chrono::Utc::now(),
                });
                Tick::Continue(delay)
            }
        }
    }

    fn query_failed(&mut self, error: &stylepanel_client::api::ApiError) -> Tick {
        let failures = self.session.record_failure();
        tracing::warn!(
            job_id = %self.job.job_id,
            error = %error,
            "Status query failed ({}/{})",
            failures,
            MAX_CONSECUTIVE_FAILURES,
        );
        if failures >= MAX_CONSECUTIVE_FAILURES {
            self.emit(JobEvent::PollingFailed {
                job_id: self.job.job_id.clone(),
                failures,
                at: chrono::Utc::now(),
            });
            Tick::Terminal(Outcome::PollingFailure { failures })
        } else {
            // Subscribers see the failure with the last-known progress.
            self.emit(JobEvent::Progress {
                job_id: self.job.job_id.clone(),
                status: self.job.status,
                progress: self.job.progress,
                detail: Some(format!(
                    "query failed ({failures}/{MAX_CONSECUTIVE_FAILURES})"
                )),
                at: chrono::Utc::now(),
            });
            Tick::Continue(FAILURE_RETRY_DELAY)
        }
    }

    /// The server reported `Completed`; fetch the result URL.
    ///
    /// A failing details fetch does not undo completion, it only loses
    /// the URL.
    async fn complete(&mut self) -> Tick {
        let result_url = match self.service.task_details(&self.job.job_id).await {
            Ok(details) => details.first_result_url(),
            Err(error) => {
                tracing::warn!(
                    job_id = %self.job.job_id,
                    error = %error,
                    "Job completed but details fetch failed; no result URL"
                );
                None
            }
        };
        self.job.result_url = result_url.clone();
        tracing::info!(job_id = %self.job.job_id, "Job completed");
        self.emit(JobEvent::Completed {
            job_id: self.job.job_id.clone(),
            result_url: result_url.clone(),
            at: chrono::Utc::now(),
        });
        Tick::Terminal(Outcome::Completed { result_url })
    }

    /// Check whether a result URL already exists for a running job.
    async fn probe_result(&self) -> Option<String> {
        match self.service.task_details(&self.job.job_id).await {
            Ok(details) => details.first_result_url(),
            Err(error) => {
                tracing::debug!(
                    job_id = %self.job.job_id,
                    error = %error,
                    "Early result probe failed"
                );
                None
            }
        }
    }

    fn emit(&self, event: JobEvent) {
        // No subscribers is fine; events are advisory.
        let _ = self.events.send(event);
    }
}
