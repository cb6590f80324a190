use std::future::Future;

use futures::{Stream, StreamExt};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, trace, warn};

use crate::{
    capacity, stats::SchedulerStats, DrainBarrier, Packet, ScheduleReport, SchedulerError,
    SchedulerOptions,
};

/// First come, first served.
///
/// Packets that are not dropped reach `consumer` in exactly the order they
/// arrived from `source`. When `options.max_size` packets are already queued,
/// newly arriving packets are dropped.
pub async fn fifo<S, F, Fut>(
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

    // `None` is the end-of-stream marker.
    let (tx, mut rx) = mpsc::channel::<Option<Packet>>(capacity);
    let (drained, mut barrier) = DrainBarrier::new(options);
    let stats = &SchedulerStats::default();

    let admit = async move {
        tokio::pin!(source);

        while let Some(packet) = source.next().await {
            match tx.try_send(Some(packet)) {
                Ok(()) => {
                    stats.increment_admitted();
                    trace!("Admitted packet");
                }
                Err(TrySendError::Full(_)) => {
                    let dropped = stats.increment_dropped();
                    warn!(capacity, dropped, "Queue overflow, dropping packet");
                }
                Err(TrySendError::Closed(_)) => return Err(SchedulerError::QueueClosed),
            }
        }

        drained.send_replace(true);

        // The end-of-stream marker is never dropped, wait for room instead.
        tx.send(None).await.map_err(|_| SchedulerError::QueueClosed)
    };

    let consume = async move {
        barrier.wait().await;

        while let Some(Some(packet)) = rx.recv().await {
            consumer(packet).await;
            stats.increment_delivered();
            trace!("Delivered packet");
        }
    };

    let (admitted, ()) = tokio::join!(admit, consume);
    admitted?;

    let report = stats.report();
    debug!(?report, "FIFO scheduler finished");

    Ok(report)
}
