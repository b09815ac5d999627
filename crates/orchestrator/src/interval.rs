//! Adaptive polling schedule.
//!
//! Poll delays follow the server-reported progress: the early phase
//! polls fast to catch the pending-to-running transition, the late
//! phase backs off while the slow final stretch renders. A job whose
//! (status, progress) pair has not changed for several consecutive
//! ticks counts as stable and is polled less often.

use std::time::Duration;

/// Monitoring stops with a timeout once this many status queries ran.
pub const MAX_ATTEMPTS: u32 = 120;

/// Consecutive failed queries tolerated before monitoring aborts.
pub const MAX_CONSECUTIVE_FAILURES: u32 = 3;

/// Identical (status, progress) observations before a job is stable.
pub const STABLE_AFTER: u32 = 3;

/// Delay before retrying after a failed status query.
pub const FAILURE_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Progress from which a result URL may already be available even
/// though the server still reports the job as running.
pub const EARLY_RESULT_PROGRESS: u8 = 80;

/// Delay until the next status poll.
pub fn poll_delay(progress: u8, stable: bool) -> Duration {
    let secs = match (progress, stable) {
        (80.., false) => 5,
        (80.., true) => 10,
        (0..=9, false) => 1,
        (0..=9, true) => 3,
        (10..=49, false) => 2,
        (10..=49, true) => 5,
        (_, false) => 3,
        (_, true) => 8,
    };
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(progress: u8, stable: bool) -> u64 {
        poll_delay(progress, stable).as_secs()
    }

    #[test]
    fn early_phase_polls_fastest() {
        assert_eq!(secs(0, false), 1);
        assert_eq!(secs(9, false), 1);
        assert_eq!(secs(0, true), 3);
    }

    #[test]
    fn mid_phase_slows_down() {
        assert_eq!(secs(10, false), 2);
        assert_eq!(secs(49, false), 2);
        assert_eq!(secs(25, true), 5);
        assert_eq!(secs(50, false), 3);
        assert_eq!(secs(79, true), 8);
    }

    #[test]
    fn late_phase_backs_off_most() {
        assert_eq!(secs(80, false), 5);
        assert_eq!(secs(100, false), 5);
        assert_eq!(secs(80, true), 10);
    }

    #[test]
    fn stable_delay_is_always_longer_than_changing() {
        for progress in 0..=100 {
            assert!(poll_delay(progress, true) > poll_delay(progress, false));
        }
    }
}
