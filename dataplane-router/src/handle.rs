use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::{FormatError, Hop, RouteSpec, Router};

/// A shared, swappable [`Router`].
///
/// Readers take a cheap [`Arc`] snapshot and look up against it without
/// holding any lock. Replacing the routes builds a whole new router first and
/// then swaps the snapshot, so a lookup never sees a half-built table and a
/// failed rebuild leaves the current router in place.
#[derive(Debug, Clone)]
pub struct RouterHandle {
    current: Arc<RwLock<Arc<Router>>>,
}

impl RouterHandle {
    /// Creates a new handle serving `router`.
    pub fn new(router: Router) -> Self {
        Self { current: Arc::new(RwLock::new(Arc::new(router))) }
    }

    /// Returns the router currently being served.
    #[inline]
    pub fn snapshot(&self) -> Arc<Router> {
        Arc::clone(&*self.current.read())
    }

    /// Looks up `dest_ip` on the current router.
    pub fn route(&self, dest_ip: &str) -> Result<Hop, FormatError> {
        self.snapshot().route(dest_ip)
    }

    /// Builds a router from `routes` and swaps it in. Returns the router that
    /// was replaced.
    ///
    /// On error nothing is swapped.
    pub fn replace<I, R>(&self, routes: I) -> Result<Arc<Router>, FormatError>
    where
        I: IntoIterator<Item = R>,
        R: Into<RouteSpec>,
    {
        let router = Router::new(routes)?;
        Ok(self.store(router))
    }

    /// Swaps in an already built router. Returns the router that was replaced.
    pub fn store(&self, router: Router) -> Arc<Router> {
        let entries = router.table().len();
        let previous = std::mem::replace(&mut *self.current.write(), Arc::new(router));
        debug!(entries, previous_entries = previous.table().len(), "Swapped forwarding table");

        previous
    }
}

impl From<Router> for RouterHandle {
    fn from(router: Router) -> Self {
        Self::new(router)
    }
}
