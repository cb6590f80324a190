use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for a scheduler run. These are shared between the admission and
/// consumption halves of the pipeline.
#[derive(Debug, Default)]
pub(crate) struct SchedulerStats {
    /// Packets accepted into the queue
    admitted: AtomicUsize,
    /// Packets dropped because the queue was full
    dropped: AtomicUsize,
    /// Packets handed to the consumer
    delivered: AtomicUsize,
}

impl SchedulerStats {
    #[inline]
    pub(crate) fn increment_admitted(&self) {
        self.admitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the total number of dropped packets, including this one.
    #[inline]
    pub(crate) fn increment_dropped(&self) -> usize {
        self.dropped.fetch_add(1, Ordering::Relaxed) + 1
    }

    #[inline]
    pub(crate) fn increment_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn report(&self) -> ScheduleReport {
        ScheduleReport {
            admitted: self.admitted.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
        }
    }
}

/// Summary of a completed scheduler run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleReport {
    /// Packets accepted into the queue.
    pub admitted: usize,
    /// Packets dropped on overflow. These never reach the consumer.
    pub dropped: usize,
    /// Packets handed to the consumer.
    pub delivered: usize,
}

impl ScheduleReport {
    /// Total packets read from the source.
    #[inline]
    pub const fn received(&self) -> usize {
        self.admitted + self.dropped
    }
}
