use std::time::Duration;
use wayfinder_config::BrokerSettings;

/// Longest pause between two attempts on one endpoint. Anything slower would
/// burn the request's deadline waiting instead of failing over.
const MAX_RETRY_PAUSE: Duration = Duration::from_secs(8);

/// Pause schedule for quote attempts against one endpoint.
///
/// The whole schedule is derived up front from the configured retry settings:
/// `attempts` tries in total, with doubling pauses between them starting at
/// the configured first pause. Precomputing keeps the per-request retry loop
/// free of mutable pacing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySchedule {
    pauses: Vec<Duration>,
}

impl RetrySchedule {
    /// A schedule of `attempts` tries with doubling pauses from `first_pause`.
    pub fn doubling(attempts: u32, first_pause: Duration) -> Self {
        let mut pauses = Vec::new();
        let mut pause = first_pause;
        for _ in 1..attempts.max(1) {
            pauses.push(pause);
            pause = (pause * 2).min(MAX_RETRY_PAUSE);
        }
        Self { pauses }
    }

    /// Schedule dictated by the broker settings: `max_retries` attempts
    /// paced from `retry_delay_ms`.
    pub fn from_settings(settings: &BrokerSettings) -> Self {
        Self::doubling(
            settings.max_retries,
            Duration::from_millis(settings.retry_delay_ms),
        )
    }

    /// Number of attempts the schedule allows, the first one included.
    pub fn attempts(&self) -> usize {
        self.pauses.len() + 1
    }

    /// Pause to observe before the zero-based `attempt`; `None` before the
    /// first try.
    pub fn pause_before(&self, attempt: usize) -> Option<Duration> {
        if attempt == 0 {
            return None;
        }
        self.pauses.get(attempt - 1).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pauses_double() {
        let schedule = RetrySchedule::doubling(4, Duration::from_millis(500));
        assert_eq!(schedule.attempts(), 4);
        assert_eq!(schedule.pause_before(0), None);
        assert_eq!(schedule.pause_before(1), Some(Duration::from_millis(500)));
        assert_eq!(schedule.pause_before(2), Some(Duration::from_millis(1000)));
        assert_eq!(schedule.pause_before(3), Some(Duration::from_millis(2000)));
        assert_eq!(schedule.pause_before(4), None);
    }

    #[test]
    fn test_pauses_cap_below_the_deadline() {
        let schedule = RetrySchedule::doubling(10, Duration::from_secs(4));
        for attempt in 1..schedule.attempts() {
            assert!(schedule.pause_before(attempt).unwrap() <= MAX_RETRY_PAUSE);
        }
        assert_eq!(schedule.pause_before(3), Some(MAX_RETRY_PAUSE));
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        let schedule = RetrySchedule::doubling(0, Duration::from_millis(500));
        assert_eq!(schedule.attempts(), 1);
        assert_eq!(schedule.pause_before(0), None);
        assert_eq!(schedule.pause_before(1), None);
    }

    #[test]
    fn test_from_settings() {
        let settings = BrokerSettings {
            primary_url: "https://sqs.osmosis.zone".to_string(),
            max_retries: 3,
            retry_delay_ms: 250,
            ..Default::default()
        };
        let schedule = RetrySchedule::from_settings(&settings);
        assert_eq!(schedule.attempts(), 3);
        assert_eq!(schedule.pause_before(1), Some(Duration::from_millis(250)));
        assert_eq!(schedule.pause_before(2), Some(Duration::from_millis(500)));
    }
}
