//! Bounded packet schedulers.
//!
//! Each scheduler reads packets from a [`Stream`], admits them into a bounded
//! queue and hands them, one at a time, to an async consumer. The next packet
//! is only delivered once the consumer's future for the previous one has
//! completed.
//!
//! Admission never waits for the consumer: when the queue is full the newly
//! arrived packet is dropped and a warning is logged. Only the end of the
//! stream is always delivered, waiting for room if it has to.
//!
//! Admission and consumption are two futures joined inside the future returned
//! by [`fifo`], [`priority`] or [`schedule`]. Nothing is spawned; both halves
//! run on whatever task polls that future.
#![doc(issue_tracker_base_url = "https://github.com/chainbound/dataplane/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use std::future::Future;

use futures::Stream;
use thiserror::Error;
use tokio::sync::watch;

pub use dataplane_common::{Packet, Priority};

mod fifo;
pub use fifo::fifo;

mod priority;
pub use priority::priority;

mod options;
pub use options::{Admission, Discipline, SchedulerOptions};

mod stats;
pub use stats::ScheduleReport;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Queue capacity must be at least 1")]
    ZeroCapacity,
    #[error("Queue closed before the end of the stream")]
    QueueClosed,
    #[error("Admission signalled a packet that is not queued")]
    HeapDesync,
}

/// Runs the discipline selected in `options` over `source`, delivering every
/// admitted packet to `consumer`.
pub async fn schedule<S, F, Fut>(
    source: S,
    consumer: F,
    options: &SchedulerOptions,
) -> Result<ScheduleReport, SchedulerError>
where
    S: Stream<Item = Packet>,
    F: FnMut(Packet) -> Fut,
    Fut: Future<Output = ()>,
{
    match options.discipline {
        Discipline::Fifo => fifo(source, consumer, options).await,
        Discipline::Priority => priority(source, consumer, options).await,
    }
}

/// Validates the configured queue capacity.
fn capacity(options: &SchedulerOptions) -> Result<usize, SchedulerError> {
    match options.max_size {
        0 => Err(SchedulerError::ZeroCapacity),
        n => Ok(n),
    }
}

/// Signals the consumer once the source has been exhausted.
///
/// Used to hold back delivery in [`Admission::DrainFirst`] mode. If the sender
/// is dropped without signalling (admission failed), waiting returns as well.
#[derive(Debug)]
struct DrainBarrier {
    rx: Option<watch::Receiver<bool>>,
}

impl DrainBarrier {
    fn new(options: &SchedulerOptions) -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        let rx = options.drain_first().then_some(rx);

        (tx, Self { rx })
    }

    async fn wait(&mut self) {
        let Some(rx) = self.rx.as_mut() else { return };

        loop {
            let drained = *rx.borrow_and_update();
            if drained || rx.changed().await.is_err() {
                return;
            }
        }
    }
}
