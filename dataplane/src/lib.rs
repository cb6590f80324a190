#![doc(issue_tracker_base_url = "https://github.com/chainbound/dataplane/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use std::future::Future;

use futures::Stream;
use tracing::warn;

pub use dataplane_common::*;
pub use dataplane_router::*;
pub use dataplane_sched::{
    fifo, priority, schedule, Admission, Discipline, ScheduleReport, SchedulerError,
    SchedulerOptions,
};
pub use dataplane_wire as wire;

/// A scheduled packet together with its routing decision.
#[derive(Debug, Clone)]
pub struct Forwarded {
    /// The packet, as delivered by the scheduler.
    pub packet: Packet,
    /// The egress hop for the packet's destination, or the reason its
    /// destination could not be parsed.
    pub hop: Result<Hop, FormatError>,
}

/// Schedules packets from `source` with the discipline in `options`, then
/// routes each delivered packet through `router` before handing it to
/// `consumer`.
///
/// Routing happens after scheduling, so a malformed destination never holds
/// up the pipeline: it reaches the consumer as an error in
/// [`Forwarded::hop`].
pub async fn forward<S, F, Fut>(
    router: &Router,
    source: S,
    mut consumer: F,
    options: &SchedulerOptions,
) -> Result<ScheduleReport, SchedulerError>
where
    S: Stream<Item = Packet>,
    F: FnMut(Forwarded) -> Fut,
    Fut: Future<Output = ()>,
{
    let route = |packet: Packet| {
        let hop = router.route_packet(&packet);
        if let Err(ref e) = hop {
            warn!(error = %e, dest = packet.dest_ip(), "Unroutable destination");
        }

        consumer(Forwarded { packet, hop })
    };

    schedule(source, route, options).await
}
