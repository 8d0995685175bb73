use std::time::{Duration, Instant};

/// Shortest period a timeout can have. A zero period would spin the loop.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle returned by [`crate::Area::add_timeout`], passed back to
/// [`crate::GlArea::timeout`] when that timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Timeout {
    id: TimerId,
    period: Duration,
    deadline: Instant,
}

/// Periodic timers ordered by deadline.
#[derive(Debug, Default)]
pub struct TimeoutQueue {
    timeouts: Vec<Timeout>,
    next_id: u64,
}

impl TimeoutQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, period: Duration, now: Instant) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let period = period.max(MIN_PERIOD);
        self.timeouts.push(Timeout {
            id,
            period,
            deadline: now + period,
        });
        id
    }

    /// Returns false if the timer was already gone.
    pub fn remove(&mut self, id: TimerId) -> bool {
        let before = self.timeouts.len();
        self.timeouts.retain(|timeout| timeout.id != id);
        self.timeouts.len() != before
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.timeouts.iter().any(|timeout| timeout.id == id)
    }

    pub fn len(&self) -> usize {
        self.timeouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeouts.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timeouts.iter().map(|timeout| timeout.deadline).min()
    }

    /// Time the event loop may sleep before the next timer is due.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Timers whose deadline has passed, earliest first. Ties keep
    /// registration order.
    pub fn due(&self, now: Instant) -> Vec<TimerId> {
        let mut due: Vec<_> = self
            .timeouts
            .iter()
            .filter(|timeout| timeout.deadline <= now)
            .map(|timeout| (timeout.deadline, timeout.id))
            .collect();
        due.sort();
        due.into_iter().map(|(_, id)| id).collect()
    }

    /// Moves a fired timer to its next deadline. A timer that is a full
    /// period or more behind restarts from `now` instead of firing a burst.
    pub fn reschedule(&mut self, id: TimerId, now: Instant) {
        if let Some(timeout) = self.timeouts.iter_mut().find(|timeout| timeout.id == id) {
            let next = timeout.deadline + timeout.period;
            timeout.deadline = if next <= now { now + timeout.period } else { next };
        }
    }
}
