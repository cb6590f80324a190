use std::sync::Arc;

use dataplane_wire::{parse_cidr, AddrBits, Cidr, FormatError};

/// A route as supplied by the caller: CIDR text and an opaque egress link name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    cidr: String,
    link: String,
}

impl RouteSpec {
    /// Creates a new route.
    pub fn new(cidr: impl Into<String>, link: impl Into<String>) -> Self {
        Self { cidr: cidr.into(), link: link.into() }
    }

    #[inline]
    pub fn cidr(&self) -> &str {
        &self.cidr
    }

    #[inline]
    pub fn link(&self) -> &str {
        &self.link
    }
}

impl<C: Into<String>, L: Into<String>> From<(C, L)> for RouteSpec {
    fn from((cidr, link): (C, L)) -> Self {
        Self::new(cidr, link)
    }
}

/// A parsed forwarding table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    cidr: Cidr,
    link: Arc<str>,
}

impl Entry {
    #[inline]
    pub const fn cidr(&self) -> &Cidr {
        &self.cidr
    }

    #[inline]
    pub fn link(&self) -> &str {
        &self.link
    }

    #[inline]
    pub(crate) fn link_arc(&self) -> Arc<str> {
        Arc::clone(&self.link)
    }

    /// Returns `true` if `addr` falls inside this entry's network.
    #[inline]
    pub fn matches(&self, addr: AddrBits) -> bool {
        self.cidr.prefix().matches(addr)
    }
}

/// The routes of a [`Router`](crate::Router), longest prefix first.
///
/// Entries with the same prefix length keep the order in which they were
/// supplied, so a lookup is deterministic even for duplicate routes: the first
/// one supplied wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardingTable {
    entries: Vec<Entry>,
}

impl ForwardingTable {
    /// Parses every route and orders the result by descending prefix length.
    ///
    /// Any malformed CIDR aborts the whole build; no partial table is produced.
    pub fn build<I, R>(routes: I) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = R>,
        R: Into<RouteSpec>,
    {
        let mut entries = routes
            .into_iter()
            .map(|route| {
                let route: RouteSpec = route.into();
                Ok(Entry { cidr: parse_cidr(&route.cidr)?, link: Arc::from(route.link) })
            })
            .collect::<Result<Vec<_>, FormatError>>()?;

        // `sort_by_key` is stable, which is what keeps equal-length routes in
        // their original order.
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.cidr.prefix_len()));

        Ok(Self { entries })
    }

    /// Returns the first entry containing `addr`, trying longer prefixes first.
    pub fn lookup(&self, addr: AddrBits) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.matches(addr))
    }

    /// Iterates over the entries in lookup order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ForwardingTable {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
