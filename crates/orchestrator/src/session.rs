//! Per-job monitoring bookkeeping.

use stylepanel_core::types::JobStatus;

use crate::interval::STABLE_AFTER;

/// Counters carried across the polling ticks of one monitored job.
///
/// Tracks the attempt count toward the monitoring timeout, the
/// consecutive-failure count toward the polling-failure abort, and the
/// stability of the last observed (status, progress) pair.
#[derive(Debug, Default)]
pub struct MonitorSession {
    attempts: u32,
    consecutive_failures: u32,
    last_observed: Option<(JobStatus, u8)>,
    stable_count: u32,
}

impl MonitorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status queries issued so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Count a new status query and return its attempt number.
    pub fn begin_attempt(&mut self) -> u32 {
        self.attempts += 1;
        self.attempts
    }

    /// Count a failed query and return the consecutive-failure total.
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_failures += 1;
        self.consecutive_failures
    }

    /// A successful query breaks any failure streak.
    pub fn reset_failures(&mut self) {
        self.consecutive_failures = 0;
    }

    /// Record a successful observation; returns whether the job is
    /// stable, i.e. the same (status, progress) pair was seen on
    /// [`STABLE_AFTER`] or more consecutive ticks.
    pub fn observe(&mut self, status: JobStatus, progress: u8) -> bool {
        if self.last_observed == Some((status, progress)) {
            self.stable_count += 1;
        } else {
            self.last_observed = Some((status, progress));
            self.stable_count = 1;
        }
        self.stable_count >= STABLE_AFTER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stability_requires_three_identical_observations() {
        let mut session = MonitorSession::new();
        assert!(!session.observe(JobStatus::Running, 80));
        assert!(!session.observe(JobStatus::Running, 80));
        assert!(session.observe(JobStatus::Running, 80));
        assert!(session.observe(JobStatus::Running, 80));
    }

    #[test]
    fn any_change_resets_stability() {
        let mut session = MonitorSession::new();
        session.observe(JobStatus::Running, 80);
        session.observe(JobStatus::Running, 80);
        assert!(!session.observe(JobStatus::Running, 81));
        assert!(!session.observe(JobStatus::Running, 81));
        assert!(session.observe(JobStatus::Running, 81));
    }

    #[test]
    fn status_change_at_same_progress_resets_stability() {
        let mut session = MonitorSession::new();
        session.observe(JobStatus::Pending, 0);
        session.observe(JobStatus::Pending, 0);
        assert!(!session.observe(JobStatus::Running, 0));
    }

    #[test]
    fn failure_streak_resets_on_success() {
        let mut session = MonitorSession::new();
        assert_eq!(session.record_failure(), 1);
        assert_eq!(session.record_failure(), 2);
        session.reset_failures();
        assert_eq!(session.record_failure(), 1);
    }

    #[test]
    fn attempts_accumulate_across_failures_and_successes() {
        let mut session = MonitorSession::new();
        session.begin_attempt();
        session.record_failure();
        session.begin_attempt();
        session.reset_failures();
        assert_eq!(session.attempts(), 2);
    }
}
