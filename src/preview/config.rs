use std::time::Duration;

/// Bounded retry for render attempts that found the surface's libraries missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Fixed delay before each retry
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay: Duration::from_millis(600),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }

    /// Delay before the attempt following `attempt` (1-based), or `None` when
    /// the policy is exhausted
    pub fn next_delay(&self, attempt: u32) -> Option<Duration> {
        (attempt < self.max_attempts).then_some(self.delay)
    }
}

/// Offsets, relative to a surface finishing its load, at which the host
/// resends the latest code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendSchedule {
    pub offsets: Vec<Duration>,
}

impl Default for ResendSchedule {
    fn default() -> Self {
        Self {
            offsets: vec![
                Duration::ZERO,
                Duration::from_millis(200),
                Duration::from_millis(600),
            ],
        }
    }
}

/// Timing for one host/surface pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Interval between readiness checks while libraries load
    pub ready_poll: Duration,

    pub retry: RetryPolicy,

    pub resend: ResendSchedule,

    /// Longest a caller waits for a payload to settle
    pub settle_timeout: Duration,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            ready_poll: Duration::from_millis(50),
            retry: RetryPolicy::default(),
            resend: ResendSchedule::default(),
            settle_timeout: Duration::from_secs(10),
        }
    }
}

impl PreviewConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the readiness poll interval
    pub fn ready_poll(mut self, interval: Duration) -> Self {
        self.ready_poll = interval;
        self
    }

    /// Builder method: set the retry policy
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Builder method: set the resend schedule
    pub fn resend(mut self, offsets: Vec<Duration>) -> Self {
        self.resend = ResendSchedule { offsets };
        self
    }

    /// Builder method: set the settle timeout
    pub fn settle_timeout(mut self, timeout: Duration) -> Self {
        self.settle_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retry_allows_one_retry() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.next_delay(1), Some(Duration::from_millis(600)));
        assert_eq!(policy.next_delay(2), None);
    }

    #[test]
    fn test_no_retry_policy() {
        let policy = RetryPolicy::new(1, Duration::from_millis(10));
        assert_eq!(policy.next_delay(1), None);
    }

    #[test]
    fn test_default_resend_schedule() {
        let schedule = ResendSchedule::default();
        let millis: Vec<_> = schedule.offsets.iter().map(|d| d.as_millis()).collect();
        assert_eq!(millis, vec![0, 200, 600]);
    }

    #[test]
    fn test_config_builder() {
        let config = PreviewConfig::new()
            .ready_poll(Duration::from_millis(10))
            .retry(RetryPolicy::new(3, Duration::from_millis(100)))
            .resend(vec![Duration::ZERO])
            .settle_timeout(Duration::from_secs(1));

        assert_eq!(config.ready_poll, Duration::from_millis(10));
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.resend.offsets.len(), 1);
        assert_eq!(config.settle_timeout, Duration::from_secs(1));
    }
}
