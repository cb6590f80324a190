use std::{fmt, str::FromStr};

use bytes::Bytes;
use thiserror::Error;

/// Scheduling precedence of a packet. Lower values are served first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Priority {
    /// Latency sensitive traffic, e.g. voice.
    High = 0,
    /// Interactive traffic, e.g. video.
    Medium = 1,
    /// Bulk data.
    Low = 2,
}

impl Priority {
    /// Returns the ordinal of this priority level.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown priority: {0}")]
pub struct UnknownPriority(String);

impl TryFrom<u8> for Priority {
    type Error = UnknownPriority;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::High),
            1 => Ok(Self::Medium),
            2 => Ok(Self::Low),
            other => Err(UnknownPriority(other.to_string())),
        }
    }
}

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(UnknownPriority(s.to_string())),
        }
    }
}

/// A packet travelling through the data plane. Immutable once built.
///
/// Packets order by `(priority, source_ip, dest_ip, payload)`, compared
/// lexicographically in that field order. The priority scheduler relies on this
/// ordering to break ties between packets of equal priority.
///
/// Addresses are kept as text and are not validated here; the router checks
/// them when it looks up a destination.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Packet {
    // Field order defines the derived ordering.
    priority: Priority,
    source_ip: String,
    dest_ip: String,
    payload: Bytes,
}

impl Packet {
    /// Creates a new packet.
    pub fn new(
        priority: Priority,
        source_ip: impl Into<String>,
        dest_ip: impl Into<String>,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            priority,
            source_ip: source_ip.into(),
            dest_ip: dest_ip.into(),
            payload: payload.into(),
        }
    }

    #[inline]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    #[inline]
    pub fn source_ip(&self) -> &str {
        &self.source_ip
    }

    #[inline]
    pub fn dest_ip(&self) -> &str {
        &self.dest_ip
    }

    #[inline]
    pub const fn payload(&self) -> &Bytes {
        &self.payload
    }

    #[inline]
    pub fn into_payload(self) -> Bytes {
        self.payload
    }
}
