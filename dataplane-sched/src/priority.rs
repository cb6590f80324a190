use std::{cmp::Reverse, collections::BinaryHeap, future::Future};

use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, trace, warn};

use crate::{
    capacity, stats::SchedulerStats, DrainBarrier, Packet, ScheduleReport, SchedulerError,
    SchedulerOptions,
};

/// Tells the consumer that a packet is waiting in the heap, or that the
/// stream has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Ready,
    End,
}

/// Strict priority.
///
/// Admitted packets wait in a min-heap ordered by `(priority, source_ip,
/// dest_ip, payload)`; each delivery takes the smallest packet queued at that
/// moment. At most `options.max_size` packets are queued at once, newly
/// arriving packets are dropped beyond that.
///
/// This is an online scheduler: with [`Admission::Streaming`] a packet is only
/// compared against the ones queued alongside it, so the output is sorted
/// locally rather than across the whole stream. [`Admission::DrainFirst`]
/// holds delivery until the source is exhausted, which sorts the admitted
/// batch fully.
///
/// [`Admission::Streaming`]: crate::Admission::Streaming
/// [`Admission::DrainFirst`]: crate::Admission::DrainFirst
pub async fn priority<S, F, Fut>(
    source: S,
    mut consumer: F,
    options: &SchedulerOptions,
) -> Result<ScheduleReport, SchedulerError>
where
    S: Stream<Item = Packet>,
    F: FnMut(Packet) -> Fut,
    Fut: Future<Output = ()>,
{
    let capacity = capacity(options)?;

    // The channel bounds the heap: one `Ready` per queued packet.
    let (tx, mut rx) = mpsc::channel::<Signal>(capacity);
    let heap = &Mutex::new(BinaryHeap::<Reverse<Packet>>::new());
    let (drained, mut barrier) = DrainBarrier::new(options);
    let stats = &SchedulerStats::default();

    let admit = async move {
        tokio::pin!(source);

        while let Some(packet) = source.next().await {
            // Signal and insert under the heap lock, so the consumer can't pop
            // for a signal whose packet isn't in the heap yet.
            let admitted = {
                let mut heap = heap.lock();
                match tx.try_send(Signal::Ready) {
                    Ok(()) => {
                        heap.push(Reverse(packet));
                        Ok(true)
                    }
                    Err(TrySendError::Full(_)) => Ok(false),
                    Err(TrySendError::Closed(_)) => Err(SchedulerError::QueueClosed),
                }
            }?;

            if admitted {
                stats.increment_admitted();
                trace!("Admitted packet");
            } else {
                let dropped = stats.increment_dropped();
                warn!(capacity, dropped, "Heap overflow, dropping packet");
            }
        }

        drained.send_replace(true);

        // The end signal is never dropped, wait for room instead.
        tx.send(Signal::End).await.map_err(|_| SchedulerError::QueueClosed)
    };

    let consume = async move {
        barrier.wait().await;

        while let Some(Signal::Ready) = rx.recv().await {
            let next = heap.lock().pop();
            let Some(Reverse(packet)) = next else {
                return Err(SchedulerError::HeapDesync);
            };

            consumer(packet).await;
            stats.increment_delivered();
            trace!("Delivered packet");
        }

        Ok(())
    };

    let (admitted, consumed) = tokio::join!(admit, consume);
    consumed?;
    admitted?;

    let report = stats.report();
    debug!(?report, "Priority scheduler finished");

    Ok(report)
}
