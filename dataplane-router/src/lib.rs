//! Longest-prefix-match forwarding.
//!
//! A [`Router`] owns an immutable [`ForwardingTable`] built once from a list of
//! `(cidr, link)` routes. Lookups scan the table longest prefix first, with
//! equal-length routes tried in the order they were supplied, and fall back to
//! [`Hop::DefaultGateway`] when nothing matches.
//!
//! ```
//! use dataplane_router::{Hop, Router};
//!
//! let router = Router::new([
//!     ("223.1.1.0/24", "Link 0"),
//!     ("223.1.0.0/16", "Link 4 (ISP)"),
//! ])?;
//!
//! assert_eq!(router.route("223.1.1.100")?, Hop::link("Link 0"));
//! assert_eq!(router.route("223.1.250.1")?, Hop::link("Link 4 (ISP)"));
//! assert_eq!(router.route("198.51.100.1")?, Hop::DefaultGateway);
//! # Ok::<(), dataplane_router::FormatError>(())
//! ```
#![doc(issue_tracker_base_url = "https://github.com/chainbound/dataplane/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use std::{fmt, sync::Arc};

pub use dataplane_wire::FormatError;

mod table;
pub use table::{Entry, ForwardingTable, RouteSpec};

mod router;
pub use router::Router;

mod handle;
pub use handle::RouterHandle;

/// The text shown for [`Hop::DefaultGateway`].
pub const DEFAULT_GATEWAY: &str = "Default Gateway";

/// The outcome of a route lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Hop {
    /// A configured route matched; forward on this egress link.
    Link(Arc<str>),
    /// No configured route matched.
    DefaultGateway,
}

impl Hop {
    /// Creates a [`Hop::Link`].
    pub fn link(name: impl Into<Arc<str>>) -> Self {
        Self::Link(name.into())
    }

    /// Returns the link name, or `None` for the default gateway.
    pub fn as_link(&self) -> Option<&str> {
        match self {
            Self::Link(name) => Some(name.as_ref()),
            Self::DefaultGateway => None,
        }
    }

    #[inline]
    pub const fn is_default_gateway(&self) -> bool {
        matches!(self, Self::DefaultGateway)
    }
}

impl fmt::Display for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link(name) => f.write_str(name),
            Self::DefaultGateway => f.write_str(DEFAULT_GATEWAY),
        }
    }
}
