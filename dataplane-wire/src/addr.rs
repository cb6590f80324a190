use std::{fmt, net::Ipv4Addr, str::FromStr};

use crate::{FormatError, MAX_PREFIX_LEN};

/// The number of octets in a dotted-quad address.
const OCTETS: usize = 4;

/// The 32 bits of an IPv4 address, most significant bit first.
///
/// Displays as exactly 32 binary digits, each octet zero-padded to 8 bits and
/// concatenated in address order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddrBits(u32);

impl AddrBits {
    /// Wraps the given host-order bits.
    #[inline]
    pub const fn from_u32(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the address as host-order bits.
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns the leading `len` bits of the address. Lengths above 32 are
    /// treated as 32.
    #[inline]
    pub fn leading(&self, len: u8) -> PrefixBits {
        let len = len.min(MAX_PREFIX_LEN);
        PrefixBits { bits: self.0 & mask(len), len }
    }
}

impl fmt::Display for AddrBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032b}", self.0)
    }
}

impl FromStr for AddrBits {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        to_binary(s)
    }
}

impl From<Ipv4Addr> for AddrBits {
    fn from(addr: Ipv4Addr) -> Self {
        Self(u32::from(addr))
    }
}

impl From<AddrBits> for Ipv4Addr {
    fn from(bits: AddrBits) -> Self {
        Self::from(bits.0)
    }
}

/// The leading bits of an address, as found in a CIDR network prefix.
///
/// Only the first `len` bits are significant; the rest are always zero, so two
/// prefixes compare equal exactly when their lengths and leading bits match.
/// Displays as exactly `len` binary digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrefixBits {
    bits: u32,
    len: u8,
}

impl PrefixBits {
    /// The number of significant bits.
    #[inline]
    pub const fn len(&self) -> u8 {
        self.len
    }

    /// Returns `true` for the zero-length prefix, which matches every address.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The significant bits, left-aligned in a `u32` with the rest zeroed.
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.bits
    }

    /// Returns `true` if `addr` starts with this prefix.
    #[inline]
    pub fn matches(&self, addr: AddrBits) -> bool {
        addr.leading(self.len) == *self
    }
}

impl fmt::Display for PrefixBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len == 0 {
            return Ok(());
        }

        let shift = u32::from(MAX_PREFIX_LEN - self.len);
        write!(f, "{:0width$b}", self.bits >> shift, width = usize::from(self.len))
    }
}

/// Mask selecting the leading `len` bits. `len` must be at most 32.
#[inline]
fn mask(len: u8) -> u32 {
    // A shift by 32 overflows, which is exactly the zero-length case.
    u32::MAX.checked_shl(u32::from(MAX_PREFIX_LEN - len)).unwrap_or(0)
}

/// Converts a dotted-quad IPv4 address into its 32 bits.
///
/// The address must consist of exactly 4 dot-separated decimal octets, each in
/// `[0, 255]`. Leading zeros are accepted; signs, whitespace and empty octets
/// are not.
pub fn to_binary(addr: &str) -> Result<AddrBits, FormatError> {
    let found = addr.split('.').count();
    if found != OCTETS {
        return Err(FormatError::OctetCount { addr: addr.to_string(), found });
    }

    let mut bits = 0u32;
    for octet in addr.split('.') {
        bits = (bits << 8) | u32::from(parse_octet(addr, octet)?);
    }

    Ok(AddrBits(bits))
}

fn parse_octet(addr: &str, octet: &str) -> Result<u8, FormatError> {
    if octet.is_empty() || !octet.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::InvalidOctet {
            addr: addr.to_string(),
            octet: octet.to_string(),
        });
    }

    // Only digits at this point, so the only way to fail is overflow.
    octet.parse::<u8>().map_err(|_| FormatError::OctetOutOfRange {
        addr: addr.to_string(),
        octet: octet.to_string(),
    })
}
