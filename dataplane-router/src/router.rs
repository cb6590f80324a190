use dataplane_common::Packet;
use dataplane_wire::{to_binary, FormatError};
use tracing::debug;

use crate::{ForwardingTable, Hop, RouteSpec};

/// A longest-prefix-match router over an immutable [`ForwardingTable`].
///
/// The table is built once in [`Router::new`] and never changes afterwards, so
/// a router can be shared between threads and queried concurrently without
/// locking. To change routes, build a new router; [`RouterHandle`] swaps
/// routers atomically.
///
/// [`RouterHandle`]: crate::RouterHandle
#[derive(Debug, Clone)]
pub struct Router {
    table: ForwardingTable,
}

impl Router {
    /// Builds a router from `(cidr, link)` routes.
    ///
    /// Fails with the first [`FormatError`] encountered; no router is built
    /// from a partially valid list.
    pub fn new<I, R>(routes: I) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = R>,
        R: Into<RouteSpec>,
    {
        let table = ForwardingTable::build(routes)?;
        debug!(entries = table.len(), "Built forwarding table");

        Ok(Self { table })
    }

    /// Returns the egress hop for `dest_ip`.
    ///
    /// A malformed destination is an error, not a miss. A well-formed
    /// destination that matches no route yields [`Hop::DefaultGateway`].
    pub fn route(&self, dest_ip: &str) -> Result<Hop, FormatError> {
        let dest = to_binary(dest_ip)?;

        Ok(match self.table.lookup(dest) {
            Some(entry) => Hop::Link(entry.link_arc()),
            None => Hop::DefaultGateway,
        })
    }

    /// Returns the egress hop for the packet's destination address.
    #[inline]
    pub fn route_packet(&self, packet: &Packet) -> Result<Hop, FormatError> {
        self.route(packet.dest_ip())
    }

    /// The forwarding table, in lookup order.
    #[inline]
    pub const fn table(&self) -> &ForwardingTable {
        &self.table
    }
}
