/// The default capacity of the admission queue.
const DEFAULT_MAX_SIZE: usize = 1024;

/// Which scheduling discipline to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Discipline {
    /// First come, first served.
    #[default]
    Fifo,
    /// Strict priority, ties broken by the packet ordering.
    Priority,
}

/// When the consumer starts taking packets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Admission {
    /// Start delivering as soon as the first packet is admitted. With the
    /// priority discipline, each delivery is the best packet queued *at that
    /// moment*, so the output is only locally ordered.
    #[default]
    Streaming,
    /// Hold delivery until the source is exhausted. With the priority
    /// discipline the admitted batch comes out fully sorted. Packets beyond
    /// `max_size` are dropped, since nothing drains the queue while the batch
    /// is being admitted.
    DrainFirst,
}

/// Options for a scheduler run.
#[derive(Debug, Clone)]
pub struct SchedulerOptions {
    /// The capacity of the admission queue. Packets arriving while it is full
    /// are dropped.
    pub max_size: usize,
    /// When delivery starts.
    pub admission: Admission,
    /// The discipline used by [`schedule`](crate::schedule).
    pub discipline: Discipline,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            admission: Admission::default(),
            discipline: Discipline::default(),
        }
    }
}

impl SchedulerOptions {
    /// Sets the admission queue capacity. Must be at least 1.
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Sets when delivery starts.
    pub fn admission(mut self, admission: Admission) -> Self {
        self.admission = admission;
        self
    }

    /// Sets the discipline used by [`schedule`](crate::schedule).
    pub fn discipline(mut self, discipline: Discipline) -> Self {
        self.discipline = discipline;
        self
    }

    #[inline]
    pub(crate) const fn drain_first(&self) -> bool {
        matches!(self.admission, Admission::DrainFirst)
    }
}
